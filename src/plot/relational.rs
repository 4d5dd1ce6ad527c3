//! Scatter and line plots over row data, one series per hue group.

use tracing::debug;

use crate::error::OptionsResult;
use crate::record::Value;

use super::table::{axis_type, distinct, label};
use super::{Plot, Table, mapping};

/// Dataset id of the unfiltered rows every hue group filters from.
pub const RAW_DATASET_ID: &str = "raw";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeriesKind {
    Scatter,
    Line,
}

impl SeriesKind {
    fn series_type(self) -> &'static str {
        match self {
            Self::Scatter => "scatter",
            Self::Line => "line",
        }
    }
}

/// Draws `y` against `x`, with one scatter series per distinct `hue` value.
pub fn scatterplot(data: &Table, x: &str, y: &str, hue: Option<&str>) -> OptionsResult<Plot> {
    relational_plot(SeriesKind::Scatter, data, x, y, hue)
}

/// Draws `y` against `x`, with one line series per distinct `hue` value.
pub fn lineplot(data: &Table, x: &str, y: &str, hue: Option<&str>) -> OptionsResult<Plot> {
    relational_plot(SeriesKind::Line, data, x, y, hue)
}

fn relational_plot(
    kind: SeriesKind,
    data: &Table,
    x: &str,
    y: &str,
    hue: Option<&str>,
) -> OptionsResult<Plot> {
    let mut picks = vec![data.column_index(x)?, data.column_index(y)?];
    if let Some(hue) = hue {
        picks.push(data.column_index(hue)?);
    }

    // Rows with any missing plotted cell are dropped.
    let rows: Vec<Vec<Value>> = data
        .rows()
        .iter()
        .map(|row| picks.iter().map(|&i| row[i].clone()).collect::<Vec<_>>())
        .filter(|cells| !cells.iter().any(Value::is_null))
        .collect();

    let mut plot = Plot::new()?;
    if rows.is_empty() {
        debug!(x, y, "no complete rows to plot");
        return Ok(plot);
    }

    let option = plot.option_mut();
    for (axis, name, column) in [("xAxis", x, 0), ("yAxis", y, 1)] {
        let axis = option.child(axis)?;
        axis.set("name", name)?;
        axis.set("type", axis_type(rows.iter().map(|cells| &cells[column])))?;
    }

    let mut dimensions = vec![x.to_owned(), y.to_owned()];
    dimensions.extend(hue.map(str::to_owned));
    plot.add_dataset(mapping([
        ("id", Value::from(RAW_DATASET_ID)),
        ("dimensions", Value::from(dimensions)),
        (
            "source",
            Value::Seq(rows.iter().cloned().map(Value::Seq).collect()),
        ),
    ]))?;

    let encode = || {
        mapping([
            ("x", Value::from(x)),
            ("y", Value::from(y)),
            ("itemName", Value::from(x)),
            ("tooltip", Value::from(vec![y])),
        ])
    };

    match hue {
        Some(hue) => {
            let groups = distinct(rows.iter().map(|cells| &cells[2]));
            for (offset, group) in groups.into_iter().enumerate() {
                let name = label(&group);
                let filter = mapping([
                    ("type", Value::from("filter")),
                    (
                        "config",
                        Value::Map(mapping([
                            ("dimension", Value::from(hue)),
                            ("=", group),
                        ])),
                    ),
                ]);
                plot.add_dataset(mapping([
                    ("id", Value::from(name.as_str())),
                    ("fromDatasetId", Value::from(RAW_DATASET_ID)),
                    ("transform", Value::Seq(vec![Value::Map(filter)])),
                ]))?;
                plot.add_series(mapping([
                    ("type", Value::from(kind.series_type())),
                    ("name", Value::from(name)),
                    ("datasetIndex", Value::from(offset + 1)),
                    ("encode", Value::Map(encode())),
                ]))?;
            }
        }
        None => {
            plot.add_series(mapping([
                ("type", Value::from(kind.series_type())),
                ("datasetIndex", Value::Int(0)),
                ("encode", Value::Map(encode())),
            ]))?;
        }
    }

    plot.option_mut().set_path(&["tooltip", "trigger"], "axis")?;
    debug!(kind = kind.series_type(), rows = rows.len(), "built relational plot");
    Ok(plot)
}
