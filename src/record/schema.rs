use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{OptionsError, OptionsResult};

use super::reserved::is_reserved;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Str,
    Int,
    Float,
    Bool,
}

impl PrimitiveKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
        }
    }
}

/// Declared expectation for the value stored under a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    Record(Arc<RecordSchema>),
    /// One-dimensional sequence; nesting another sequence is rejected when the
    /// owning schema is built.
    SequenceOf(Box<TypeDescriptor>),
    Any,
}

impl TypeDescriptor {
    #[must_use]
    pub fn str() -> Self {
        Self::Primitive(PrimitiveKind::Str)
    }

    #[must_use]
    pub fn int() -> Self {
        Self::Primitive(PrimitiveKind::Int)
    }

    #[must_use]
    pub fn float() -> Self {
        Self::Primitive(PrimitiveKind::Float)
    }

    #[must_use]
    pub fn bool() -> Self {
        Self::Primitive(PrimitiveKind::Bool)
    }

    #[must_use]
    pub fn record(schema: &Arc<RecordSchema>) -> Self {
        Self::Record(Arc::clone(schema))
    }

    #[must_use]
    pub fn seq_of(element: TypeDescriptor) -> Self {
        Self::SequenceOf(Box::new(element))
    }

    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Primitive(kind) => kind.name().to_owned(),
            Self::Record(schema) => schema.name().to_owned(),
            Self::SequenceOf(element) => format!("[{}]", element.describe()),
            Self::Any => "any".to_owned(),
        }
    }

    fn validate(&self, field: &str) -> OptionsResult<()> {
        match self {
            Self::SequenceOf(element) => match element.as_ref() {
                Self::SequenceOf(_) => Err(OptionsError::UnsupportedType {
                    field: field.to_owned(),
                    reason: format!(
                        "only one-dimensional sequences are supported, got {}",
                        self.describe()
                    ),
                }),
                _ => Ok(()),
            },
            Self::Primitive(_) | Self::Record(_) | Self::Any => Ok(()),
        }
    }
}

/// Field table of one declared record subtype.
///
/// Built once through [`RecordSchemaBuilder`] and shared by reference between
/// every record of the subtype.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    name: String,
    fields: IndexMap<String, TypeDescriptor>,
}

impl RecordSchema {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> RecordSchemaBuilder {
        RecordSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn field_type(&self, field: &str) -> Option<&TypeDescriptor> {
        self.fields.get(field)
    }

    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct RecordSchemaBuilder {
    name: String,
    fields: Vec<(String, TypeDescriptor)>,
}

impl RecordSchemaBuilder {
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        self.fields.push((name.into(), descriptor));
        self
    }

    /// Validates every declared field and freezes the schema.
    ///
    /// Fails on reserved field names, duplicated fields and nested sequence
    /// descriptors, so a malformed schema never produces a single record.
    pub fn build(self) -> OptionsResult<Arc<RecordSchema>> {
        let mut fields = IndexMap::with_capacity(self.fields.len());
        for (field, descriptor) in self.fields {
            if is_reserved(&field) {
                return Err(OptionsError::ReservedName { name: field });
            }
            descriptor.validate(&field)?;
            if fields.contains_key(&field) {
                return Err(OptionsError::InvalidData(format!(
                    "schema `{}` declares field `{field}` twice",
                    self.name
                )));
            }
            fields.insert(field, descriptor);
        }
        Ok(Arc::new(RecordSchema {
            name: self.name,
            fields,
        }))
    }
}
