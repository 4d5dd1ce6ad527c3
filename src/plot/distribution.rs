//! Histograms drawn as one rectangle per bin.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::encode::RawCode;
use crate::error::{OptionsError, OptionsResult};
use crate::record::Value;

use super::{AxisLayout, Plot, mapping};

/// Draws `[start, end]` x `[0, count]` for each row of the bin dataset.
const RENDER_BIN: &str = "function (params, api) {
    var topLeft = api.coord([api.value(0), api.value(2)]);
    var bottomRight = api.coord([api.value(1), 0]);
    return {
        type: 'rect',
        shape: {
            x: topLeft[0],
            y: topLeft[1],
            width: bottomRight[0] - topLeft[0],
            height: bottomRight[1] - topLeft[1]
        },
        style: api.style()
    };
}";

/// How the value range is split into bins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bins {
    /// This many equal-width bins between the smallest and largest value.
    Count(usize),
    /// Bins of this width starting at the smallest value.
    Width(f64),
}

impl Default for Bins {
    fn default() -> Self {
        Self::Count(10)
    }
}

/// One histogram bin: `[start, end)`, the last bin closed on the right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Counts finite `values` into bins. Empty input yields no bins.
pub fn histogram(values: &[f64], bins: Bins) -> OptionsResult<Vec<Bin>> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let Some((min, max)) = finite.iter().fold(None, |range, &v| match range {
        None => Some((v, v)),
        Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
    }) else {
        return Ok(Vec::new());
    };

    // A single distinct value still gets a bin of unit width around it.
    let (min, max) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let span = max - min;
    let (count, width) = match bins {
        Bins::Count(0) => {
            return Err(OptionsError::InvalidData(
                "histogram needs at least one bin".to_owned(),
            ));
        }
        Bins::Count(count) => (count, span / count as f64),
        Bins::Width(width) if width.is_finite() && width > 0.0 => {
            ((span / width).ceil().max(1.0) as usize, width)
        }
        Bins::Width(width) => {
            return Err(OptionsError::InvalidData(format!(
                "histogram bin width must be positive, got {width}"
            )));
        }
    };

    let mut counts = vec![0usize; count];
    for value in finite {
        let index = ((value - min) / width).floor() as usize;
        counts[index.min(count - 1)] += 1;
    }
    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            start: min + width * i as f64,
            end: min + width * (i + 1) as f64,
            count,
        })
        .collect())
}

/// Histogram of `values` on value axes, laid out with [`AxisLayout::Histogram`].
pub fn histplot(values: &[f64], bins: Bins) -> OptionsResult<Plot> {
    let bins = histogram(values, bins)?;
    let mut plot = Plot::new()?.with_layout(AxisLayout::Histogram);
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        debug!("no finite values to bin");
        return Ok(plot);
    };

    let option = plot.option_mut();
    let x_axis = option.child("xAxis")?;
    x_axis.set("type", "value")?;
    x_axis.set("min", first.start)?;
    x_axis.set("max", last.end)?;
    let y_axis = option.child("yAxis")?;
    y_axis.set("type", "value")?;
    y_axis.set("name", "Count")?;

    let source: Vec<Value> = bins
        .iter()
        .map(|bin| {
            Value::Seq(vec![
                Value::Float(bin.start),
                Value::Float(bin.end),
                Value::from(bin.count),
            ])
        })
        .collect();
    plot.add_dataset(mapping([
        ("id", Value::from("raw")),
        ("dimensions", Value::from(vec!["start", "end", "count"])),
        ("source", Value::Seq(source)),
    ]))?;
    plot.add_series(mapping([
        ("type", Value::from("custom")),
        ("renderItem", Value::from(RawCode::new(RENDER_BIN))),
        (
            "encode",
            Value::Map(mapping([
                ("x", Value::from(vec!["start", "end"])),
                ("y", Value::from("count")),
                ("tooltip", Value::from(vec!["count"])),
            ])),
        ),
    ]))?;
    debug!(bins = bins.len(), "built histogram");
    Ok(plot)
}
