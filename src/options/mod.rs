//! Built-in option schema for the subset of the charting library's
//! configuration surface the plot layer works with.
//!
//! Larger schemas are better loaded from the library's own JSON schema via
//! [`SchemaRegistry::load_json_schema`].

use std::sync::{Arc, LazyLock};

use crate::error::OptionsResult;
use crate::record::{RecordSchema, SchemaRegistry, TypeDescriptor};

pub const ROOT_SCHEMA_NAME: &str = "EChartsOption";

#[derive(Debug)]
struct BuiltinSchemas {
    magic_object: Arc<RecordSchema>,
    axis_label: Arc<RecordSchema>,
    axis: Arc<RecordSchema>,
    grid: Arc<RecordSchema>,
    toolbox: Arc<RecordSchema>,
    title: Arc<RecordSchema>,
    legend: Arc<RecordSchema>,
    tooltip: Arc<RecordSchema>,
    dataset: Arc<RecordSchema>,
    series: Arc<RecordSchema>,
    root: Arc<RecordSchema>,
}

static BUILTIN: LazyLock<OptionsResult<BuiltinSchemas>> = LazyLock::new(build_builtin);

fn builtin() -> OptionsResult<&'static BuiltinSchemas> {
    BUILTIN.as_ref().map_err(Clone::clone)
}

/// Subtype without declared fields: nested mappings are promoted to records,
/// everything else is kept as given.
pub fn magic_object() -> OptionsResult<Arc<RecordSchema>> {
    builtin().map(|b| Arc::clone(&b.magic_object))
}

pub fn axis_label() -> OptionsResult<Arc<RecordSchema>> {
    builtin().map(|b| Arc::clone(&b.axis_label))
}

pub fn axis_spec() -> OptionsResult<Arc<RecordSchema>> {
    builtin().map(|b| Arc::clone(&b.axis))
}

pub fn grid() -> OptionsResult<Arc<RecordSchema>> {
    builtin().map(|b| Arc::clone(&b.grid))
}

pub fn toolbox() -> OptionsResult<Arc<RecordSchema>> {
    builtin().map(|b| Arc::clone(&b.toolbox))
}

pub fn dataset() -> OptionsResult<Arc<RecordSchema>> {
    builtin().map(|b| Arc::clone(&b.dataset))
}

pub fn series() -> OptionsResult<Arc<RecordSchema>> {
    builtin().map(|b| Arc::clone(&b.series))
}

/// Root option record consumed by the charting library.
pub fn echarts_option() -> OptionsResult<Arc<RecordSchema>> {
    builtin().map(|b| Arc::clone(&b.root))
}

/// Registry holding every built-in subtype.
pub fn builtin_registry() -> OptionsResult<SchemaRegistry> {
    let b = builtin()?;
    let mut registry = SchemaRegistry::new();
    for schema in [
        &b.magic_object,
        &b.axis_label,
        &b.axis,
        &b.grid,
        &b.toolbox,
        &b.title,
        &b.legend,
        &b.tooltip,
        &b.dataset,
        &b.series,
        &b.root,
    ] {
        registry.register(Arc::clone(schema))?;
    }
    Ok(registry)
}

fn build_builtin() -> OptionsResult<BuiltinSchemas> {
    let magic_object = RecordSchema::builder("MagicObject").build()?;
    let magic = || TypeDescriptor::record(&magic_object);

    let axis_label = RecordSchema::builder("AxisLabel")
        .field("show", TypeDescriptor::bool())
        .field("interval", TypeDescriptor::Any)
        .field("inside", TypeDescriptor::bool())
        .field("rotate", TypeDescriptor::float())
        .field("margin", TypeDescriptor::int())
        .field("formatter", TypeDescriptor::Any)
        .field("color", TypeDescriptor::str())
        .field("fontSize", TypeDescriptor::int())
        .build()?;

    let axis = RecordSchema::builder("AxisSpec")
        .field("id", TypeDescriptor::str())
        .field("show", TypeDescriptor::bool())
        .field("gridIndex", TypeDescriptor::int())
        .field("alignTicks", TypeDescriptor::bool())
        .field("position", magic())
        .field("offset", TypeDescriptor::int())
        .field("type", TypeDescriptor::str())
        .field("name", TypeDescriptor::str())
        .field("nameLocation", TypeDescriptor::str())
        .field("nameTextStyle", magic())
        .field("nameGap", TypeDescriptor::int())
        .field("nameRotate", magic())
        .field("inverse", TypeDescriptor::bool())
        .field("boundaryGap", magic())
        .field("min", magic())
        .field("max", magic())
        .field("scale", TypeDescriptor::bool())
        .field("splitNumber", TypeDescriptor::int())
        .field("minInterval", TypeDescriptor::int())
        .field("maxInterval", TypeDescriptor::int())
        .field("interval", magic())
        .field("logBase", TypeDescriptor::int())
        .field("silent", TypeDescriptor::bool())
        .field("triggerEvent", TypeDescriptor::bool())
        .field("axisLabel", TypeDescriptor::record(&axis_label))
        .field("data", TypeDescriptor::Any)
        .build()?;

    let grid = RecordSchema::builder("Grid")
        .field("show", TypeDescriptor::bool())
        .field("left", TypeDescriptor::Any)
        .field("right", TypeDescriptor::Any)
        .field("top", TypeDescriptor::Any)
        .field("bottom", TypeDescriptor::Any)
        .field("containLabel", TypeDescriptor::bool())
        .build()?;

    let toolbox = RecordSchema::builder("Toolbox")
        .field("show", TypeDescriptor::bool())
        .field("orient", TypeDescriptor::str())
        .field("feature", magic())
        .build()?;

    let title = RecordSchema::builder("Title")
        .field("show", TypeDescriptor::bool())
        .field("text", TypeDescriptor::str())
        .field("subtext", TypeDescriptor::str())
        .field("left", TypeDescriptor::Any)
        .field("top", TypeDescriptor::Any)
        .field("textStyle", magic())
        .build()?;

    let legend = RecordSchema::builder("Legend")
        .field("show", TypeDescriptor::bool())
        .field("type", TypeDescriptor::str())
        .field("orient", TypeDescriptor::str())
        .field("left", TypeDescriptor::Any)
        .field("top", TypeDescriptor::Any)
        .field("data", TypeDescriptor::Any)
        .build()?;

    let tooltip = RecordSchema::builder("Tooltip")
        .field("show", TypeDescriptor::bool())
        .field("trigger", TypeDescriptor::str())
        .field("formatter", TypeDescriptor::Any)
        .field("axisPointer", magic())
        .build()?;

    let dataset = RecordSchema::builder("Dataset")
        .field("id", TypeDescriptor::str())
        .field("source", TypeDescriptor::Any)
        .field("dimensions", TypeDescriptor::seq_of(TypeDescriptor::Any))
        .field("sourceHeader", TypeDescriptor::Any)
        .field("transform", TypeDescriptor::Any)
        .field("fromDatasetIndex", TypeDescriptor::int())
        .field("fromDatasetId", TypeDescriptor::str())
        .build()?;

    let series = RecordSchema::builder("Series")
        .field("type", TypeDescriptor::str())
        .field("id", TypeDescriptor::str())
        .field("name", TypeDescriptor::str())
        .field("datasetIndex", TypeDescriptor::int())
        .field("xAxisIndex", TypeDescriptor::int())
        .field("yAxisIndex", TypeDescriptor::int())
        .field("encode", magic())
        .field("data", TypeDescriptor::Any)
        .field("stack", TypeDescriptor::str())
        .field("smooth", TypeDescriptor::Any)
        .field("showSymbol", TypeDescriptor::bool())
        .field("symbolSize", TypeDescriptor::Any)
        .field("itemStyle", magic())
        .field("lineStyle", magic())
        .field("label", magic())
        .field("renderItem", TypeDescriptor::Any)
        .build()?;

    let root = RecordSchema::builder(ROOT_SCHEMA_NAME)
        .field("title", TypeDescriptor::record(&title))
        .field("legend", TypeDescriptor::record(&legend))
        .field("grid", TypeDescriptor::record(&grid))
        .field("xAxis", TypeDescriptor::record(&axis))
        .field("yAxis", TypeDescriptor::record(&axis))
        .field("tooltip", TypeDescriptor::record(&tooltip))
        .field("toolbox", TypeDescriptor::record(&toolbox))
        .field("dataset", TypeDescriptor::seq_of(TypeDescriptor::record(&dataset)))
        .field("series", TypeDescriptor::seq_of(TypeDescriptor::record(&series)))
        .field("dataZoom", TypeDescriptor::Any)
        .field("visualMap", TypeDescriptor::Any)
        .field("color", TypeDescriptor::Any)
        .field("backgroundColor", TypeDescriptor::str())
        .field("textStyle", magic())
        .field("animation", TypeDescriptor::bool())
        .build()?;

    Ok(BuiltinSchemas {
        magic_object,
        axis_label,
        axis,
        grid,
        toolbox,
        title,
        legend,
        tooltip,
        dataset,
        series,
        root,
    })
}
