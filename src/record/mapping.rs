use serde::{Deserialize, Serialize};

use super::{Mapping, Record, Value};

/// Flags controlling [`Record::to_mapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToMappingOptions {
    /// Convert nested records into plain mappings, propagating these flags.
    pub recursive: bool,
    /// Drop keys whose value is the unset sentinel.
    pub exclude_unset: bool,
    /// Drop unset keys inside records held by sequences, regardless of
    /// `exclude_unset`.
    pub exclude_unset_in_sequences: bool,
}

impl ToMappingOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recursive conversion without unset values anywhere; the shape used for
    /// emitting chart configuration.
    #[must_use]
    pub fn for_output() -> Self {
        Self {
            recursive: true,
            exclude_unset: true,
            exclude_unset_in_sequences: true,
        }
    }

    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    #[must_use]
    pub fn with_exclude_unset(mut self, exclude_unset: bool) -> Self {
        self.exclude_unset = exclude_unset;
        self
    }

    #[must_use]
    pub fn with_exclude_unset_in_sequences(mut self, exclude_unset_in_sequences: bool) -> Self {
        self.exclude_unset_in_sequences = exclude_unset_in_sequences;
        self
    }
}

impl Record {
    /// Produces a plain mapping of the keys this record holds.
    ///
    /// Only keys that were written or materialized appear; declared fields
    /// that were never touched are absent. Raw code values are copied through
    /// unchanged.
    #[must_use]
    pub fn to_mapping(&self, options: ToMappingOptions) -> Mapping {
        self.entries
            .iter()
            .filter(|(_, value)| !(options.exclude_unset && value.is_null()))
            .map(|(name, value)| (name.clone(), mapping_value(value, options)))
            .collect()
    }
}

fn mapping_value(value: &Value, options: ToMappingOptions) -> Value {
    match value {
        Value::Record(record) if options.recursive => Value::Map(record.to_mapping(options)),
        Value::Seq(items) if options.recursive || options.exclude_unset_in_sequences => {
            Value::Seq(items.iter().map(|item| sequence_item(item, options)).collect())
        }
        Value::Map(map) if options.recursive => Value::Map(
            map.iter()
                .map(|(name, value)| (name.clone(), mapping_value(value, options)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn sequence_item(item: &Value, options: ToMappingOptions) -> Value {
    match item {
        Value::Record(record) if options.exclude_unset_in_sequences => {
            Value::Map(record.to_mapping(options.with_exclude_unset(true)))
        }
        Value::Record(record) if options.recursive => Value::Map(record.to_mapping(options)),
        Value::Seq(_) | Value::Map(_) if options.recursive => mapping_value(item, options),
        other => other.clone(),
    }
}
