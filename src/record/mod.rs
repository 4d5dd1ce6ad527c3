//! Schema-aware dynamic records.
//!
//! A [`Record`] is an ordered key/value container that behaves both as a plain
//! mapping and as a typed object. When it carries a [`RecordSchema`], writes to
//! declared fields are coerced to the declared shape; undeclared fields accept
//! anything. Reads never fail for missing keys: they materialize a default and
//! store it, which lets callers build deep option trees one path at a time.

mod coerce;
mod mapping;
mod registry;
pub mod reserved;
mod schema;
mod value;

use std::sync::Arc;

use serde::{Serialize, Serializer};
use tracing::trace;

use crate::error::{OptionsError, OptionsResult};

pub(crate) use coerce::coerce_declared;
pub use mapping::ToMappingOptions;
pub use registry::SchemaRegistry;
pub use reserved::is_reserved;
pub use schema::{PrimitiveKind, RecordSchema, RecordSchemaBuilder, TypeDescriptor};
pub use value::{Mapping, Value};

#[derive(Debug, Clone, Default)]
pub struct Record {
    schema: Option<Arc<RecordSchema>>,
    entries: Mapping,
}

impl Record {
    /// Creates an empty record with no declared fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty record of the given subtype.
    #[must_use]
    pub fn with_schema(schema: Arc<RecordSchema>) -> Self {
        Self {
            schema: Some(schema),
            entries: Mapping::new(),
        }
    }

    /// Builds a record from a plain mapping, promoting nested mappings
    /// according to `schema` all the way down.
    pub fn from_mapping(schema: Option<Arc<RecordSchema>>, mapping: Mapping) -> OptionsResult<Self> {
        let mut record = Self {
            schema,
            entries: Mapping::with_capacity(mapping.len()),
        };
        for (name, value) in mapping {
            record.set(name, value)?;
        }
        Ok(record)
    }

    /// Builds a record from a JSON object.
    pub fn from_json(
        schema: Option<Arc<RecordSchema>>,
        json: serde_json::Value,
    ) -> OptionsResult<Self> {
        match Value::from(json) {
            Value::Map(mapping) => Self::from_mapping(schema, mapping),
            other => Err(OptionsError::InvalidData(format!(
                "record input must be a JSON object, got {}",
                other.kind_name()
            ))),
        }
    }

    #[must_use]
    pub fn schema(&self) -> Option<&Arc<RecordSchema>> {
        self.schema.as_ref()
    }

    #[must_use]
    pub fn schema_name(&self) -> Option<&str> {
        self.schema.as_deref().map(RecordSchema::name)
    }

    #[must_use]
    pub fn declared_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.schema.as_deref()?.field_type(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn entries(&self) -> &Mapping {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Mapping {
        self.entries
    }

    /// Reads a value without materializing a default.
    #[must_use]
    pub fn peek(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.shift_remove(name)
    }

    /// Returns the value stored under `name`, materializing and storing a
    /// default first if the key is missing.
    ///
    /// Repeated reads of a never-set key return the same stored value.
    pub fn get(&mut self, name: &str) -> OptionsResult<&mut Value> {
        if is_reserved(name) {
            return Err(OptionsError::ReservedName {
                name: name.to_owned(),
            });
        }
        let schema = self.schema.as_deref();
        Ok(self.entries.entry(name.to_owned()).or_insert_with(|| {
            let value = default_value(schema, name);
            trace!(
                field = name,
                schema = schema.map(RecordSchema::name),
                kind = value.kind_name(),
                "materialize missing attribute"
            );
            value
        }))
    }

    /// Stores `value` under `name`, coercing it when the field is declared.
    ///
    /// On error the record is left unchanged.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> OptionsResult<()> {
        let name = name.into();
        if is_reserved(&name) {
            return Err(OptionsError::ReservedName { name });
        }
        let value = value.into();
        let stored = match self.schema.as_deref().and_then(|s| s.field_type(&name)) {
            Some(descriptor) => coerce::coerce_declared(&name, descriptor, value)?,
            None => coerce::promote_undeclared(value)?,
        };
        self.entries.insert(name, stored);
        Ok(())
    }

    /// Reads `name` and requires the result to be a nested record.
    pub fn child(&mut self, name: &str) -> OptionsResult<&mut Record> {
        match self.get(name)? {
            Value::Record(record) => Ok(record),
            _ => Err(OptionsError::NotARecord {
                field: name.to_owned(),
            }),
        }
    }

    /// Walks `path` through nested records, materializing them as needed, and
    /// sets the last segment.
    pub fn set_path(&mut self, path: &[&str], value: impl Into<Value>) -> OptionsResult<()> {
        let Some((last, parents)) = path.split_last() else {
            return Err(OptionsError::InvalidData(
                "attribute path must not be empty".to_owned(),
            ));
        };
        let mut node = self;
        for segment in parents {
            node = node.child(segment)?;
        }
        node.set(*last, value)
    }

    /// Serializes every entry, nested records included, as compact JSON.
    pub fn to_json(&self) -> OptionsResult<String> {
        serde_json::to_string(self)
            .map_err(|e| OptionsError::InvalidData(format!("failed to serialize record: {e}")))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.schema_name() == other.schema_name() && self.entries == other.entries
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

fn default_value(schema: Option<&RecordSchema>, name: &str) -> Value {
    match schema.and_then(|s| s.field_type(name)) {
        Some(TypeDescriptor::Record(subtype)) => {
            Value::Record(Record::with_schema(Arc::clone(subtype)))
        }
        Some(TypeDescriptor::SequenceOf(_)) => Value::Seq(Vec::new()),
        Some(TypeDescriptor::Primitive(_)) => Value::Null,
        Some(TypeDescriptor::Any) | None => Value::Record(Record::new()),
    }
}
