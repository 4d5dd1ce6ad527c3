use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::error::{OptionsError, OptionsResult};

use super::{RecordSchema, TypeDescriptor, is_reserved};

/// Named record subtypes, each registered once and handed out by reference.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, Arc<RecordSchema>>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `schema` under its name.
    ///
    /// Registering an equal schema again is a no-op; a different schema with
    /// the same name is rejected.
    pub fn register(&mut self, schema: Arc<RecordSchema>) -> OptionsResult<()> {
        if let Some(existing) = self.schemas.get(schema.name()) {
            if Arc::ptr_eq(existing, &schema) || **existing == *schema {
                return Ok(());
            }
            return Err(OptionsError::InvalidData(format!(
                "schema `{}` is already registered with different fields",
                schema.name()
            )));
        }
        debug!(
            schema = schema.name(),
            fields = schema.len(),
            "register record schema"
        );
        self.schemas.insert(schema.name().to_owned(), schema);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<RecordSchema>> {
        self.schemas.get(name)
    }

    pub fn require(&self, name: &str) -> OptionsResult<Arc<RecordSchema>> {
        self.schemas
            .get(name)
            .cloned()
            .ok_or_else(|| OptionsError::UnknownSchema(name.to_owned()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Declares a tree of subtypes from a JSON-schema document and returns the
    /// root subtype.
    ///
    /// `string`, `number`, `integer` and `boolean` properties become
    /// primitives. An `object` with `properties` becomes a nested subtype named
    /// after its parent and field (`Option` + `xAxis` -> `OptionXAxis`); an
    /// object without properties, or a property with no single type, is
    /// `Any`. Arrays map their `items` with the same rules and an array of
    /// arrays fails. Properties named like mapping operations are skipped.
    pub fn load_json_schema(
        &mut self,
        root_name: &str,
        document: &JsonValue,
    ) -> OptionsResult<Arc<RecordSchema>> {
        if !document.is_object() {
            return Err(OptionsError::InvalidData(
                "JSON schema document must be an object".to_owned(),
            ));
        }
        self.load_object(root_name, document)
    }

    fn load_object(&mut self, name: &str, node: &JsonValue) -> OptionsResult<Arc<RecordSchema>> {
        let mut builder = RecordSchema::builder(name);
        if let Some(properties) = node.get("properties").and_then(JsonValue::as_object) {
            for (field, property) in properties {
                if is_reserved(field) {
                    warn!(
                        schema = name,
                        field = field.as_str(),
                        "skipping reserved property name"
                    );
                    continue;
                }
                let descriptor = self.descriptor_for(name, field, property)?;
                builder = builder.field(field.as_str(), descriptor);
            }
        }
        let schema = builder.build()?;
        self.register(Arc::clone(&schema))?;
        Ok(schema)
    }

    fn descriptor_for(
        &mut self,
        parent: &str,
        field: &str,
        property: &JsonValue,
    ) -> OptionsResult<TypeDescriptor> {
        let descriptor = match single_type(property) {
            Some("string") => TypeDescriptor::str(),
            Some("number") => TypeDescriptor::float(),
            Some("integer") => TypeDescriptor::int(),
            Some("boolean") => TypeDescriptor::bool(),
            Some("object") if property.get("properties").is_some() => {
                let nested_name = format!("{parent}{}", upper_first(field));
                TypeDescriptor::Record(self.load_object(&nested_name, property)?)
            }
            Some("array") => match property.get("items") {
                Some(items) if single_type(items) == Some("array") => {
                    return Err(OptionsError::UnsupportedType {
                        field: field.to_owned(),
                        reason: "arrays of arrays are not supported".to_owned(),
                    });
                }
                Some(items) => TypeDescriptor::seq_of(self.descriptor_for(parent, field, items)?),
                None => TypeDescriptor::seq_of(TypeDescriptor::Any),
            },
            _ => TypeDescriptor::Any,
        };
        Ok(descriptor)
    }
}

fn single_type(node: &JsonValue) -> Option<&str> {
    match node.get("type")? {
        JsonValue::String(name) => Some(name.as_str()),
        JsonValue::Array(names) if names.len() == 1 => names[0].as_str(),
        _ => None,
    }
}

fn upper_first(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
