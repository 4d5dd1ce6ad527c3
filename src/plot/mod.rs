//! Plot facade over the root option record.
//!
//! A [`Plot`] owns one `EChartsOption` record, applies the default toolbox,
//! validates appended series and datasets against the declared element
//! types, and before encoding lays out axis names so they clear the tick
//! labels. The builder functions turn row data into configured plots.

mod axis_label_formatter;
mod categorical;
mod distribution;
mod relational;
mod table;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::encode::{self, EncodeConfig};
use crate::error::OptionsResult;
use crate::options;
use crate::record::{Mapping, Record, TypeDescriptor, Value, coerce_declared};

pub use axis_label_formatter::{AxisLabelFormatter, SciNotation};
pub use categorical::barplot;
pub use distribution::{Bin, Bins, histogram, histplot};
pub use relational::{RAW_DATASET_ID, lineplot, scatterplot};
pub use table::Table;

const X_AXIS: &str = "xAxis";
const Y_AXIS: &str = "yAxis";

/// Which dataset columns feed the x and y axes when sizing label space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisLayout {
    /// x from column 0, y from column 1.
    #[default]
    Standard,
    /// Bin start/end in columns 0 and 1, bar height in column 2.
    Histogram,
    /// Axis labels are left exactly as configured.
    Unfixed,
}

impl AxisLayout {
    fn columns(self) -> Option<[(&'static str, usize); 2]> {
        match self {
            Self::Standard => Some([(X_AXIS, 0), (Y_AXIS, 1)]),
            Self::Histogram => Some([(X_AXIS, 1), (Y_AXIS, 2)]),
            Self::Unfixed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    option: Record,
    layout: AxisLayout,
    formatters: IndexMap<String, AxisLabelFormatter>,
}

impl Plot {
    /// Creates a plot with the default toolbox enabled.
    pub fn new() -> OptionsResult<Self> {
        let mut option = Record::with_schema(options::echarts_option()?);
        option.set(
            "toolbox",
            json!({
                "show": true,
                "feature": {
                    "dataZoom": {"show": true},
                    "dataView": {"readOnly": false},
                    "restore": {},
                    "saveAsImage": {}
                }
            }),
        )?;
        Ok(Self {
            option,
            layout: AxisLayout::default(),
            formatters: IndexMap::new(),
        })
    }

    #[must_use]
    pub fn with_layout(mut self, layout: AxisLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn layout(&self) -> AxisLayout {
        self.layout
    }

    #[must_use]
    pub fn option(&self) -> &Record {
        &self.option
    }

    pub fn option_mut(&mut self) -> &mut Record {
        &mut self.option
    }

    #[must_use]
    pub fn into_option(self) -> Record {
        self.option
    }

    /// Uses `formatter` for `axis` tick labels instead of the default
    /// scientific-notation limits.
    pub fn set_axis_label_formatter(&mut self, axis: &str, formatter: AxisLabelFormatter) {
        self.formatters.insert(axis.to_owned(), formatter);
    }

    /// Appends a series, converting it to the declared series subtype first.
    pub fn add_series(&mut self, spec: impl Into<Value>) -> OptionsResult<()> {
        self.append_validated("series", spec.into())
    }

    /// Appends a dataset, converting it to the declared dataset subtype first.
    pub fn add_dataset(&mut self, spec: impl Into<Value>) -> OptionsResult<()> {
        self.append_validated("dataset", spec.into())
    }

    fn append_validated(&mut self, field: &str, spec: Value) -> OptionsResult<()> {
        let element = match self.option.declared_type(field) {
            Some(TypeDescriptor::SequenceOf(element)) => coerce_declared(field, element, spec)?,
            _ => spec,
        };
        let slot = self.option.get(field)?;
        if let Value::Seq(items) = slot {
            items.push(element);
            return Ok(());
        }
        let previous = std::mem::take(slot);
        *slot = match previous {
            Value::Null => Value::Seq(vec![element]),
            Value::Record(ref record) if record.is_empty() => Value::Seq(vec![element]),
            previous => Value::Seq(vec![previous, element]),
        };
        Ok(())
    }

    /// Applies the layout defaults that keep axis names clear of tick labels.
    pub fn finalise(&mut self) -> OptionsResult<()> {
        let Some(columns) = self.layout.columns() else {
            warn!("skipping axis label fixing");
            return Ok(());
        };
        self.fix_axis_labels(columns)
    }

    /// Finalises the plot and encodes it for the charting library.
    pub fn to_json(&mut self, config: EncodeConfig) -> OptionsResult<String> {
        self.finalise()?;
        encode::to_js_literal(&self.option, config)
    }

    fn fix_axis_labels(&mut self, columns: [(&'static str, usize); 2]) -> OptionsResult<()> {
        if self.option.peek("grid").is_some_and(|grid| !grid.is_null()) {
            warn!("cannot correct axis labels when a grid is already configured");
            return Ok(());
        }

        // Only single axes the caller configured are laid out; a plot
        // without cartesian axes (pie, sankey) keeps none.
        let axes: Vec<(&'static str, usize)> = columns
            .into_iter()
            .filter(|(axis, _)| matches!(self.option.peek(axis), Some(Value::Record(_))))
            .collect();
        if axes.is_empty() {
            debug!("no cartesian axes to lay out");
            return Ok(());
        }

        // The sole grid's margins make room for the axis names.
        self.option.set("grid", Mapping::new())?;

        for (axis_name, column) in axes {
            let raw_values = self.dataset_column(column);
            let formatter = self
                .formatters
                .get(axis_name)
                .copied()
                .unwrap_or_default();

            let axis = self.option.child(axis_name)?;
            axis.set("nameLocation", "middle")?;
            let is_value_axis = axis.peek("type").and_then(Value::as_str) == Some("value");

            let label = axis.child("axisLabel")?;
            let user_formatter = label.peek("formatter").is_some_and(|f| !f.is_null());
            let rotation = label.peek("rotate").and_then(Value::as_f64).unwrap_or(0.0);

            let label_digits = if is_value_axis {
                let numbers: Vec<f64> = raw_values.iter().filter_map(Value::as_f64).collect();
                let use_sci = if user_formatter {
                    false
                } else {
                    let (code, use_sci) = formatter.apply(Some(&numbers));
                    label.set("formatter", code)?;
                    use_sci
                };
                if use_sci {
                    // Exponent labels such as `1e+5` stay about this wide.
                    5
                } else {
                    numbers
                        .iter()
                        .map(|value| compact_width(round_to_significant(*value, 1)))
                        .max()
                        .unwrap_or(0)
                }
            } else {
                if !user_formatter {
                    let (code, _) = formatter.apply(None);
                    label.set("formatter", code)?;
                }
                raw_values.iter().map(display_width).max().unwrap_or(0)
            };

            let (name_gap, margin) = if axis_name == X_AXIS {
                if rotation != 0.0 {
                    let gap = 25 + label_digits * 4;
                    (gap, Some(("bottom", gap + 15)))
                } else {
                    (25, None)
                }
            } else {
                let gap = 20 + label_digits * 6;
                (gap, Some(("left", gap + 10)))
            };
            axis.set("nameGap", name_gap)?;

            if let Some((side, value)) = margin {
                self.option.child("grid")?.set(side, value)?;
            }
            debug!(
                axis = axis_name,
                column,
                label_digits,
                name_gap,
                "laid out axis name"
            );
        }
        Ok(())
    }

    /// Collects column `column` from every dataset source.
    ///
    /// Row-oriented sources (`[[..], ..]` or `[{..}, ..]`) contribute the
    /// cell at that position; column-oriented sources (`{"col": [..]}`)
    /// contribute the whole column at that position.
    fn dataset_column(&self, column: usize) -> Vec<Value> {
        let datasets: Vec<&Value> = match self.option.peek("dataset") {
            Some(Value::Seq(items)) => items.iter().collect(),
            Some(single) => vec![single],
            None => Vec::new(),
        };
        datasets
            .into_iter()
            .filter_map(|dataset| dataset.lookup("source"))
            .flat_map(|source| source_column(source, column))
            .collect()
    }
}

fn mapping<const N: usize>(entries: [(&str, Value); N]) -> Mapping {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

fn source_column(source: &Value, column: usize) -> Vec<Value> {
    match source {
        Value::Seq(rows) => rows
            .iter()
            .filter_map(|row| match row {
                Value::Seq(cells) => cells.get(column).cloned(),
                Value::Map(cells) => cells.get_index(column).map(|(_, cell)| cell.clone()),
                Value::Record(cells) => cells
                    .entries()
                    .get_index(column)
                    .map(|(_, cell)| cell.clone()),
                _ => None,
            })
            .collect(),
        Value::Map(columns) => columns
            .get_index(column)
            .and_then(|(_, cells)| cells.as_seq())
            .map(<[Value]>::to_vec)
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn round_to_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let exponent = digits - 1 - magnitude;
    if exponent >= 0 {
        let scale = 10f64.powi(exponent);
        (value * scale).round() / scale
    } else {
        let scale = 10f64.powi(-exponent);
        (value / scale).round() * scale
    }
}

fn compact_width(value: f64) -> usize {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64).len()
    } else {
        format!("{value}").len()
    }
}

fn display_width(value: &Value) -> usize {
    match value {
        Value::Str(text) => text.chars().count(),
        Value::Int(number) => number.to_string().len(),
        Value::Float(number) => compact_width(*number),
        Value::Bool(flag) => flag.to_string().len(),
        _ => 0,
    }
}
