use chart_options::{
    AxisLabelFormatter, AxisLayout, EncodeConfig, OptionsError, Plot, Record, SciNotation, Value,
};
use serde_json::json;

fn set_axis_type(plot: &mut Plot, axis: &str, kind: &str) {
    plot.option_mut()
        .child(axis)
        .and_then(|a| a.set("type", kind))
        .expect("axis type");
}

fn grid_value(plot: &Plot, side: &str) -> Option<i64> {
    plot.option()
        .peek("grid")
        .and_then(|grid| grid.lookup(side))
        .and_then(Value::as_i64)
}

fn axis_value<'a>(plot: &'a Plot, axis: &str, key: &str) -> Option<&'a Value> {
    plot.option().peek(axis).and_then(|a| a.lookup(key))
}

#[test]
fn new_plot_carries_default_toolbox() {
    let plot = Plot::new().expect("plot");
    let toolbox = plot
        .option()
        .peek("toolbox")
        .and_then(Value::as_record)
        .expect("toolbox");
    assert_eq!(toolbox.schema_name(), Some("Toolbox"));
    assert_eq!(toolbox.peek("show"), Some(&Value::Bool(true)));
    let feature = toolbox.peek("feature").expect("feature");
    assert_eq!(
        feature.lookup("dataView").and_then(|v| v.lookup("readOnly")),
        Some(&Value::Bool(false))
    );
    assert!(feature.lookup("saveAsImage").is_some());
}

#[test]
fn add_series_validates_and_appends_in_order() {
    let mut plot = Plot::new().expect("plot");
    plot.add_series(json!({"type": "line", "datasetIndex": "0"}))
        .expect("first");
    plot.add_series(json!({"type": "bar", "datasetIndex": 1}))
        .expect("second");

    let series = plot
        .option()
        .peek("series")
        .and_then(Value::as_seq)
        .expect("series");
    assert_eq!(series.len(), 2);
    let first = series[0].as_record().expect("record");
    assert_eq!(first.schema_name(), Some("Series"));
    assert_eq!(first.peek("datasetIndex"), Some(&Value::Int(0)));
    assert_eq!(series[1].lookup("type"), Some(&Value::from("bar")));
}

#[test]
fn add_series_rejects_invalid_element_without_touching_existing() {
    let mut plot = Plot::new().expect("plot");
    plot.add_series(json!({"type": "line"})).expect("first");
    let err = plot
        .add_series(json!({"type": "line", "datasetIndex": "first"}))
        .expect_err("bad index");
    assert!(matches!(err, OptionsError::Coercion { .. }));
    assert_eq!(
        plot.option().peek("series").and_then(Value::as_seq).map(<[Value]>::len),
        Some(1)
    );
}

#[test]
fn value_axes_get_formatter_and_name_gap() {
    let mut plot = Plot::new().expect("plot");
    plot.add_dataset(json!({"source": [[1, 12.0], [2, 345.0], [3, 80.0]]}))
        .expect("dataset");
    set_axis_type(&mut plot, "xAxis", "value");
    set_axis_type(&mut plot, "yAxis", "value");

    plot.finalise().expect("finalise");

    assert_eq!(
        axis_value(&plot, "xAxis", "nameLocation"),
        Some(&Value::from("middle"))
    );
    assert_eq!(axis_value(&plot, "xAxis", "nameGap"), Some(&Value::Int(25)));
    // y labels round to 10, 300, 80: three digits at most.
    assert_eq!(axis_value(&plot, "yAxis", "nameGap"), Some(&Value::Int(38)));
    assert_eq!(grid_value(&plot, "left"), Some(48));
    assert_eq!(grid_value(&plot, "bottom"), None);

    let formatter = axis_value(&plot, "yAxis", "axisLabel")
        .and_then(|label| label.lookup("formatter"))
        .and_then(Value::as_raw)
        .expect("raw formatter");
    assert!(formatter.code().contains("'false' == 'false'"));
}

#[test]
fn large_values_switch_to_scientific_labels() {
    let mut plot = Plot::new().expect("plot");
    plot.add_dataset(json!({"source": [[0, 1_500_000], [1, 3]]}))
        .expect("dataset");
    set_axis_type(&mut plot, "yAxis", "value");

    plot.finalise().expect("finalise");

    assert_eq!(axis_value(&plot, "yAxis", "nameGap"), Some(&Value::Int(50)));
    let formatter = axis_value(&plot, "yAxis", "axisLabel")
        .and_then(|label| label.lookup("formatter"))
        .and_then(Value::as_raw)
        .expect("raw formatter");
    assert!(formatter.code().contains("'true' == 'true'"));
}

#[test]
fn rotated_category_labels_widen_bottom_margin() {
    let mut plot = Plot::new().expect("plot");
    plot.add_dataset(json!({"source": [["chr1", 5], ["chr10", 7], ["chrX", 2]]}))
        .expect("dataset");
    set_axis_type(&mut plot, "xAxis", "category");
    plot.option_mut()
        .set_path(&["xAxis", "axisLabel", "rotate"], 45)
        .expect("rotate");

    plot.finalise().expect("finalise");

    // longest category label is five characters
    assert_eq!(axis_value(&plot, "xAxis", "nameGap"), Some(&Value::Int(45)));
    assert_eq!(grid_value(&plot, "bottom"), Some(60));
}

#[test]
fn user_formatter_is_left_in_place() {
    let mut plot = Plot::new().expect("plot");
    plot.add_dataset(json!({"source": [[1, 2]]})).expect("dataset");
    plot.option_mut()
        .set_path(&["yAxis", "axisLabel", "formatter"], "{value} bp")
        .expect("formatter");

    plot.finalise().expect("finalise");

    assert_eq!(
        axis_value(&plot, "yAxis", "axisLabel").and_then(|l| l.lookup("formatter")),
        Some(&Value::from("{value} bp"))
    );
}

#[test]
fn configured_axis_formatter_overrides_default_limits() {
    let mut plot = Plot::new().expect("plot");
    plot.add_dataset(json!({"source": [[1, 2], [2, 3]]})).expect("dataset");
    set_axis_type(&mut plot, "yAxis", "value");
    plot.set_axis_label_formatter("yAxis", AxisLabelFormatter::new(SciNotation::Always));

    plot.finalise().expect("finalise");
    assert_eq!(axis_value(&plot, "yAxis", "nameGap"), Some(&Value::Int(50)));
}

#[test]
fn existing_grid_skips_axis_layout() {
    let mut plot = Plot::new().expect("plot");
    plot.option_mut()
        .set("grid", json!({"left": "10%"}))
        .expect("grid");

    plot.finalise().expect("finalise");

    assert_eq!(grid_value(&plot, "left"), None);
    assert!(plot.option().peek("xAxis").is_none());
}

#[test]
fn histogram_layout_reads_bar_heights_from_third_column() {
    let mut plot = Plot::new().expect("plot").with_layout(AxisLayout::Histogram);
    plot.add_dataset(json!({"source": [[0, 10, 4], [10, 20, 12345]]}))
        .expect("dataset");
    set_axis_type(&mut plot, "yAxis", "value");

    plot.finalise().expect("finalise");
    // 12345 is above the default limit, so labels go scientific.
    assert_eq!(axis_value(&plot, "yAxis", "nameGap"), Some(&Value::Int(50)));
}

#[test]
fn unfixed_layout_leaves_axes_alone() {
    let mut plot = Plot::new().expect("plot").with_layout(AxisLayout::Unfixed);
    plot.finalise().expect("finalise");
    assert!(plot.option().peek("grid").is_none());
    assert!(plot.option().peek("xAxis").is_none());
}

#[test]
fn to_json_emits_formatter_as_code_and_skips_unset() {
    let mut plot = Plot::new().expect("plot");
    plot.add_dataset(json!({"source": [[1, 2]]})).expect("dataset");
    plot.add_series(json!({"type": "scatter", "name": null}))
        .expect("series");
    set_axis_type(&mut plot, "xAxis", "value");
    set_axis_type(&mut plot, "yAxis", "value");

    let literal = plot.to_json(EncodeConfig::default()).expect("encode");

    assert!(literal.contains("\"formatter\":function(value, index){"));
    assert!(!literal.contains("<<js:"));
    assert!(!literal.contains("null"));
    assert!(literal.starts_with("{\"toolbox\":{\"show\":true"));
}

#[test]
fn into_option_hands_back_the_root_record() {
    let plot = Plot::new().expect("plot");
    let option: Record = plot.into_option();
    assert_eq!(option.schema_name(), Some("EChartsOption"));
}

#[test]
fn plot_without_axes_encodes_without_cartesian_layout() {
    let mut plot = Plot::new().expect("plot");
    plot.add_series(json!({"type": "pie", "data": [{"name": "A", "value": 3}]}))
        .expect("series");

    let literal = plot.to_json(EncodeConfig::default()).expect("encode");

    assert!(!literal.contains("\"xAxis\""));
    assert!(!literal.contains("\"yAxis\""));
    assert!(!literal.contains("\"grid\""));
    assert!(plot.option().peek("xAxis").is_none());
}

#[test]
fn only_configured_axis_is_laid_out() {
    let mut plot = Plot::new().expect("plot");
    plot.add_dataset(json!({"source": [[1, 2]]})).expect("dataset");
    set_axis_type(&mut plot, "yAxis", "value");

    plot.finalise().expect("finalise");

    assert!(plot.option().peek("xAxis").is_none());
    assert_eq!(axis_value(&plot, "yAxis", "nameGap"), Some(&Value::Int(26)));
    assert_eq!(grid_value(&plot, "left"), Some(36));
}
