use chart_options::record::reserved::RESERVED_NAMES;
use chart_options::{OptionsError, Record, RecordSchema, TypeDescriptor, Value};
use serde_json::json;

fn axis_schema() -> std::sync::Arc<RecordSchema> {
    let label = RecordSchema::builder("AxisLabel")
        .field("rotate", TypeDescriptor::float())
        .build()
        .expect("label schema");
    RecordSchema::builder("Axis")
        .field("name", TypeDescriptor::str())
        .field("nameGap", TypeDescriptor::int())
        .field("axisLabel", TypeDescriptor::record(&label))
        .build()
        .expect("axis schema")
}

#[test]
fn repeated_reads_of_missing_attribute_return_the_stored_value() {
    let mut record = Record::new();
    assert!(!record.contains("grid"));

    let first = record.get("grid").expect("first read") as *const Value;
    assert!(record.contains("grid"));
    let second = record.get("grid").expect("second read") as *const Value;

    assert_eq!(first, second);
    assert_eq!(record.len(), 1);
}

#[test]
fn writes_through_a_materialized_value_are_visible_on_reread() {
    let mut record = Record::new();
    record
        .get("grid")
        .expect("read")
        .as_record_mut()
        .expect("generic record")
        .set("left", 40)
        .expect("set");

    let grid = record.get("grid").expect("reread");
    assert_eq!(grid.lookup("left"), Some(&Value::Int(40)));
}

#[test]
fn declared_record_field_materializes_its_subtype() {
    let mut axis = Record::with_schema(axis_schema());
    let label = axis.child("axisLabel").expect("vivify");
    assert_eq!(label.schema_name(), Some("AxisLabel"));

    label.set("rotate", 45).expect("set rotate");
    assert_eq!(label.peek("rotate"), Some(&Value::Float(45.0)));
}

#[test]
fn undeclared_field_materializes_a_generic_record() {
    let mut axis = Record::with_schema(axis_schema());
    let extra = axis.child("splitLine").expect("vivify");
    assert_eq!(extra.schema_name(), None);
    assert!(extra.is_empty());
}

#[test]
fn deep_chaining_creates_every_intermediate_level() {
    let mut root = Record::new();
    root.child("a")
        .and_then(|a| a.child("b"))
        .and_then(|b| b.set("c", 5))
        .expect("chain");

    assert_eq!(root.to_json().expect("json"), r#"{"a":{"b":{"c":5}}}"#);
}

#[test]
fn peek_does_not_materialize() {
    let record = Record::new();
    assert!(record.peek("title").is_none());
    assert!(record.is_empty());
}

#[test]
fn every_reserved_name_is_rejected_and_leaves_entries_unchanged() {
    let mut record = Record::new();
    record.set("title", "depth").expect("set");
    let before = record.clone();

    for name in RESERVED_NAMES {
        let err = record.set(*name, 1).expect_err("reserved");
        assert_eq!(
            err,
            OptionsError::ReservedName {
                name: (*name).to_owned()
            }
        );
        assert!(matches!(
            record.get(name),
            Err(OptionsError::ReservedName { .. })
        ));
    }
    assert_eq!(record, before);
}

#[test]
fn undeclared_plain_mapping_becomes_generic_record_with_same_entries() {
    let mut record = Record::new();
    record
        .set("textStyle", json!({"fontSize": 12, "color": "#0084A9"}))
        .expect("set");

    let style = record.peek("textStyle").and_then(Value::as_record).expect("record");
    assert_eq!(style.schema_name(), None);
    let keys: Vec<&str> = style.keys().collect();
    assert_eq!(keys, vec!["fontSize", "color"]);
    assert_eq!(style.peek("fontSize"), Some(&Value::Int(12)));
    assert_eq!(style.peek("color"), Some(&Value::from("#0084A9")));
}

#[test]
fn undeclared_scalar_is_stored_unchanged() {
    let mut record = Record::new();
    record.set("animation", false).expect("set bool");
    record.set("symbolSize", 2.5).expect("set float");
    assert_eq!(record.peek("animation"), Some(&Value::Bool(false)));
    assert_eq!(record.peek("symbolSize"), Some(&Value::Float(2.5)));
}

#[test]
fn undeclared_record_keeps_its_own_subtype() {
    let axis = Record::with_schema(axis_schema());
    let mut root = Record::new();
    root.set("extraAxis", axis).expect("set");
    let stored = root.peek("extraAxis").and_then(Value::as_record).expect("record");
    assert_eq!(stored.schema_name(), Some("Axis"));
}

#[test]
fn remove_drops_key_and_preserves_order_of_the_rest() {
    let mut record = Record::new();
    for name in ["title", "legend", "grid"] {
        record.set(name, Value::Null).expect("set");
    }
    assert!(record.remove("legend").is_some());
    let keys: Vec<&str> = record.keys().collect();
    assert_eq!(keys, vec!["title", "grid"]);
}
