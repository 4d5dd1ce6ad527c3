use std::sync::Arc;

use crate::error::{OptionsError, OptionsResult};

use super::{PrimitiveKind, Record, TypeDescriptor, Value};

/// Applies the constructor resolved for `descriptor` to `value`.
///
/// Resolution order: `Any` and unset values are stored untouched, raw code is
/// never rewritten, primitives convert, sequences convert element-wise in
/// order, plain mappings under a record descriptor are promoted through that
/// subtype. Every other shape passes through as-is.
pub(crate) fn coerce_declared(
    field: &str,
    descriptor: &TypeDescriptor,
    value: Value,
) -> OptionsResult<Value> {
    if matches!(value, Value::Null | Value::Raw(_)) {
        return Ok(value);
    }
    match descriptor {
        TypeDescriptor::Any => Ok(value),
        TypeDescriptor::Primitive(kind) => coerce_primitive(field, *kind, value),
        TypeDescriptor::SequenceOf(element) => match value {
            Value::Seq(items) => items
                .into_iter()
                .map(|item| coerce_declared(field, element, item))
                .collect::<OptionsResult<Vec<_>>>()
                .map(Value::Seq),
            other => Ok(other),
        },
        TypeDescriptor::Record(schema) => match value {
            Value::Map(map) => {
                Record::from_mapping(Some(Arc::clone(schema)), map).map(Value::Record)
            }
            other => Ok(other),
        },
    }
}

/// Promotes undeclared plain mappings to generic records; records keep their
/// own subtype and every other value is stored as given.
pub(crate) fn promote_undeclared(value: Value) -> OptionsResult<Value> {
    match value {
        Value::Map(map) => Record::from_mapping(None, map).map(Value::Record),
        other => Ok(other),
    }
}

// Half-open `i64` range as floats; `i64::MAX` itself is not representable.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

fn coerce_primitive(field: &str, kind: PrimitiveKind, value: Value) -> OptionsResult<Value> {
    let mismatch = |found: &Value| OptionsError::Coercion {
        field: field.to_owned(),
        expected: kind.name(),
        found: describe_found(found),
    };

    match kind {
        PrimitiveKind::Str => match value {
            Value::Str(_) => Ok(value),
            Value::Int(number) => Ok(Value::Str(number.to_string())),
            Value::Float(number) => Ok(Value::Str(format!("{number:?}"))),
            Value::Bool(flag) => Ok(Value::Str(flag.to_string())),
            // Containers render as their compact JSON text.
            other => serde_json::to_string(&other)
                .map(Value::Str)
                .map_err(|e| OptionsError::InvalidData(format!("cannot render {field}: {e}"))),
        },
        PrimitiveKind::Int => match value {
            Value::Int(_) => Ok(value),
            Value::Bool(flag) => Ok(Value::Int(i64::from(flag))),
            Value::Float(number) if (I64_LOWER..I64_UPPER).contains(&number.trunc()) => {
                Ok(Value::Int(number.trunc() as i64))
            }
            Value::Str(ref text) => text
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| mismatch(&value)),
            other => Err(mismatch(&other)),
        },
        PrimitiveKind::Float => match value {
            Value::Float(_) => Ok(value),
            Value::Int(number) => Ok(Value::Float(number as f64)),
            Value::Bool(flag) => Ok(Value::Float(if flag { 1.0 } else { 0.0 })),
            Value::Str(ref text) => text
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| mismatch(&value)),
            other => Err(mismatch(&other)),
        },
        // Booleans have no conversion constructor; anything else is kept.
        PrimitiveKind::Bool => Ok(value),
    }
}

fn describe_found(value: &Value) -> String {
    match value {
        Value::Str(text) => format!("string {text:?}"),
        Value::Float(number) => format!("float {number}"),
        other => other.kind_name().to_owned(),
    }
}
