use serde::{Deserialize, Serialize};

use crate::encode::RawCode;

const FORMATTER_TEMPLATE: &str = "function(value, index){
    if (value == 0){
        return 0;
    }
    if (@use_sci == 'false'){
        return value;
    }
    if (@use_sci == 'true'){
        return value.toExponential();
    }
}";

/// When axis tick labels switch to scientific notation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SciNotation {
    Always,
    Never,
    /// Scientific when the largest-magnitude value lies outside
    /// `lower..=upper`.
    Outside { lower: f64, upper: f64 },
}

impl Default for SciNotation {
    fn default() -> Self {
        Self::Outside {
            lower: 0.001,
            upper: 10_000.0,
        }
    }
}

/// Axis tick-label formatter emitted as a JavaScript callback.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisLabelFormatter {
    #[serde(default)]
    pub sci_notation: SciNotation,
}

impl AxisLabelFormatter {
    #[must_use]
    pub fn new(sci_notation: SciNotation) -> Self {
        Self { sci_notation }
    }

    /// Decides whether labels for `values` use scientific notation.
    ///
    /// `None` means a category axis, which always keeps raw labels.
    #[must_use]
    pub fn uses_scientific(&self, values: Option<&[f64]>) -> bool {
        let Some(values) = values else {
            return false;
        };
        match self.sci_notation {
            SciNotation::Always => true,
            SciNotation::Never => false,
            SciNotation::Outside { lower, upper } => {
                let finite = values.iter().copied().filter(|v| v.is_finite());
                let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
                if min > max {
                    return false;
                }
                let extent = min.abs().max(max);
                extent < lower || extent > upper
            }
        }
    }

    /// Renders the callback for `values` and reports whether it uses
    /// scientific notation.
    #[must_use]
    pub fn apply(&self, values: Option<&[f64]>) -> (RawCode, bool) {
        let use_sci = self.uses_scientific(values);
        let code = FORMATTER_TEMPLATE.replace("@use_sci", &format!("'{use_sci}'"));
        (RawCode::new(code), use_sci)
    }
}
