//! chart-options: schema-aware option trees for browser charting libraries.
//!
//! Options are built as [`Record`] trees: attribute-style access over ordered
//! mappings, coerced on write according to per-subtype schemas, auto-vivified
//! on read, and encoded as the JavaScript object literal a report page hands
//! to the charting library.

pub mod encode;
pub mod error;
pub mod options;
pub mod plot;
pub mod record;
pub mod telemetry;

pub use encode::{EncodeConfig, RawCode, to_js_literal};
pub use error::{OptionsError, OptionsResult};
pub use plot::{
    AxisLabelFormatter, AxisLayout, Bins, Plot, SciNotation, Table, barplot, histplot, lineplot,
    scatterplot,
};
pub use record::{
    Mapping, PrimitiveKind, Record, RecordSchema, SchemaRegistry, ToMappingOptions,
    TypeDescriptor, Value,
};
