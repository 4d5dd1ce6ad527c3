//! JavaScript object-literal output for option trees.
//!
//! The charting library reads its options from a literal embedded in a
//! `<script>` tag. Everything is plain JSON except [`RawCode`] values, which
//! must appear unquoted so callbacks such as label formatters stay executable.
//! Each encoding picks wrapper markers that occur in no string of the tree,
//! wraps only raw-code values in them, and unwraps them after `serde_json`
//! has written the text. Plain strings are therefore always emitted quoted,
//! whatever they contain.

mod raw_code;

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Number, Value as JsonValue};
use tracing::trace;

use crate::error::{OptionsError, OptionsResult};
use crate::record::{Mapping, Record, ToMappingOptions, Value};

pub use raw_code::RawCode;

const RAW_CODE_OPEN: &str = "<<js";
const RAW_CODE_CLOSE: &str = ":js";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeConfig {
    #[serde(default)]
    pub pretty: bool,
    #[serde(default = "default_true")]
    pub exclude_unset: bool,
    #[serde(default = "default_true")]
    pub exclude_unset_in_sequences: bool,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            exclude_unset: true,
            exclude_unset_in_sequences: true,
        }
    }
}

impl EncodeConfig {
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
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

    #[must_use]
    pub fn to_mapping_options(self) -> ToMappingOptions {
        ToMappingOptions::new()
            .with_recursive(true)
            .with_exclude_unset(self.exclude_unset)
            .with_exclude_unset_in_sequences(self.exclude_unset_in_sequences)
    }
}

fn default_true() -> bool {
    true
}

/// Encodes `record` as a JavaScript object literal.
pub fn to_js_literal(record: &Record, config: EncodeConfig) -> OptionsResult<String> {
    let mapping = record.to_mapping(config.to_mapping_options());
    let markers = RawMarkers::unused_in(&mapping);
    let tree = JsonValue::Object(object_tree(&mapping, &markers));
    let json = if config.pretty {
        serde_json::to_string_pretty(&tree)
    } else {
        serde_json::to_string(&tree)
    }
    .map_err(|e| OptionsError::InvalidData(format!("failed to encode options: {e}")))?;
    trace!(bytes = json.len(), salt = markers.salt, "encoded option tree");
    markers.unwrap_all(&json)
}

/// Wrapper pair for one encoding. `salt` grows until neither marker occurs
/// in any key, string or raw-code body of the tree being encoded.
#[derive(Debug)]
struct RawMarkers {
    salt: u32,
    open: String,
    close: String,
}

impl RawMarkers {
    fn with_salt(salt: u32) -> Self {
        let tag = if salt == 0 {
            String::new()
        } else {
            salt.to_string()
        };
        Self {
            salt,
            open: format!("{RAW_CODE_OPEN}{tag}:"),
            close: format!("{RAW_CODE_CLOSE}{tag}>>"),
        }
    }

    fn unused_in(mapping: &Mapping) -> Self {
        let mut texts = Vec::new();
        for (key, value) in mapping {
            texts.push(key.as_str());
            collect_texts(value, &mut texts);
        }
        let mut salt = 0;
        loop {
            let markers = Self::with_salt(salt);
            if !texts.iter().any(|text| markers.occurs_in(text)) {
                return markers;
            }
            salt += 1;
        }
    }

    fn occurs_in(&self, text: &str) -> bool {
        text.contains(&self.open) || text.contains(&self.close)
    }

    fn wrap(&self, code: &RawCode) -> JsonValue {
        JsonValue::String(format!("{}{}{}", self.open, code.code(), self.close))
    }

    /// Replaces every wrapped string literal in `json` with the code it
    /// carries, unquoted and unescaped.
    fn unwrap_all(&self, json: &str) -> OptionsResult<String> {
        let open = format!("\"{}", self.open);
        let close = format!("{}\"", self.close);

        let mut out = String::with_capacity(json.len());
        let mut rest = json;
        while let Some(start) = rest.find(&open) {
            out.push_str(&rest[..start]);
            let body = start + open.len();
            let Some(close_at) = rest[body..].find(&close) else {
                return Err(OptionsError::InvalidData(
                    "unterminated raw code literal".to_owned(),
                ));
            };
            let end = body + close_at + close.len();
            let decoded: String = serde_json::from_str(&rest[start..end]).map_err(|e| {
                OptionsError::InvalidData(format!("malformed raw code literal: {e}"))
            })?;
            let code = decoded
                .strip_prefix(self.open.as_str())
                .and_then(|inner| inner.strip_suffix(self.close.as_str()))
                .unwrap_or(&decoded);
            out.push_str(code);
            rest = &rest[end..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

fn collect_texts<'a>(value: &'a Value, texts: &mut Vec<&'a str>) {
    match value {
        Value::Str(text) => texts.push(text),
        Value::Raw(code) => texts.push(code.code()),
        Value::Seq(items) => items.iter().for_each(|item| collect_texts(item, texts)),
        Value::Map(map) => {
            for (key, item) in map {
                texts.push(key);
                collect_texts(item, texts);
            }
        }
        Value::Record(record) => {
            for (key, item) in record.entries() {
                texts.push(key);
                collect_texts(item, texts);
            }
        }
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) => {}
    }
}

fn object_tree<'a>(
    entries: impl IntoIterator<Item = (&'a String, &'a Value)>,
    markers: &RawMarkers,
) -> JsonMap<String, JsonValue> {
    entries
        .into_iter()
        .map(|(key, value)| (key.clone(), json_tree(value, markers)))
        .collect()
}

fn json_tree(value: &Value, markers: &RawMarkers) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(flag) => JsonValue::Bool(*flag),
        Value::Int(number) => JsonValue::from(*number),
        Value::Float(number) => Number::from_f64(*number).map_or(JsonValue::Null, JsonValue::Number),
        Value::Str(text) => JsonValue::String(text.clone()),
        Value::Seq(items) => {
            JsonValue::Array(items.iter().map(|item| json_tree(item, markers)).collect())
        }
        Value::Map(map) => JsonValue::Object(object_tree(map, markers)),
        Value::Record(record) => JsonValue::Object(object_tree(record.entries(), markers)),
        Value::Raw(code) => markers.wrap(code),
    }
}
