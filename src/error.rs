use thiserror::Error;

pub type OptionsResult<T> = Result<T, OptionsError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("`{name}` is a reserved mapping name and cannot be used as an attribute")]
    ReservedName { name: String },

    #[error("unsupported type for field `{field}`: {reason}")]
    UnsupportedType { field: String, reason: String },

    #[error("cannot coerce field `{field}` to {expected}: found {found}")]
    Coercion {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("field `{field}` holds a value that is not a record")]
    NotARecord { field: String },

    #[error("unknown record schema: {0}")]
    UnknownSchema(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
