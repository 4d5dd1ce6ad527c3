//! Bar plots over a categorical x column.

use tracing::debug;

use crate::error::OptionsResult;
use crate::record::Value;

use super::relational::RAW_DATASET_ID;
use super::table::{distinct, label};
use super::{Plot, Table, mapping};

/// Bars of `y` per `x` category.
///
/// With `hue`, the rows are pivoted to `[x, hue_1, hue_2, ..]` and each hue
/// value becomes its own bar series next to the others; the last row wins
/// when an `(x, hue)` pair repeats.
pub fn barplot(data: &Table, x: &str, y: &str, hue: Option<&str>) -> OptionsResult<Plot> {
    let ix = data.column_index(x)?;
    let iy = data.column_index(y)?;
    let ih = hue.map(|hue| data.column_index(hue)).transpose()?;

    let mut plot = Plot::new()?;
    let option = plot.option_mut();
    let x_axis = option.child("xAxis")?;
    x_axis.set("name", x)?;
    x_axis.set("type", "category")?;
    let y_axis = option.child("yAxis")?;
    y_axis.set("name", y)?;
    y_axis.set("type", "value")?;

    let (dimensions, source) = match ih {
        None => (
            vec![x.to_owned(), y.to_owned()],
            data.rows()
                .iter()
                .map(|row| Value::Seq(vec![row[ix].clone(), row[iy].clone()]))
                .collect::<Vec<_>>(),
        ),
        Some(ih) => {
            option.set_path(&["legend", "orient"], "horizontal")?;
            option.set_path(&["legend", "top"], 25)?;

            let groups = distinct(data.rows().iter().map(|row| &row[ih]));
            let categories = distinct(data.rows().iter().map(|row| &row[ix]));
            let mut pivot: Vec<Vec<Value>> = categories
                .into_iter()
                .map(|category| {
                    let mut cells = vec![Value::Null; groups.len() + 1];
                    cells[0] = category;
                    cells
                })
                .collect();
            for row in data.rows() {
                let column = groups.iter().position(|g| *g == row[ih]);
                let line = pivot.iter_mut().find(|cells| cells[0] == row[ix]);
                if let (Some(column), Some(line)) = (column, line) {
                    line[column + 1] = row[iy].clone();
                }
            }

            let mut dimensions = vec![x.to_owned()];
            dimensions.extend(groups.iter().map(label));
            (dimensions, pivot.into_iter().map(Value::Seq).collect())
        }
    };

    let series_count = dimensions.len() - 1;
    plot.add_dataset(mapping([
        ("id", Value::from(RAW_DATASET_ID)),
        ("dimensions", Value::from(dimensions)),
        ("source", Value::Seq(source)),
    ]))?;
    // Each bar series maps onto the next dataset column.
    for _ in 0..series_count {
        plot.add_series(mapping([("type", Value::from("bar"))]))?;
    }
    debug!(series = series_count, "built bar plot");
    Ok(plot)
}
