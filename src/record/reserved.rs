/// Names of the mapping operations a record exposes; none of them may be used
/// as an attribute name.
pub const RESERVED_NAMES: &[&str] = &[
    "clear",
    "contains",
    "copy",
    "entries",
    "fromkeys",
    "get",
    "insert",
    "items",
    "keys",
    "len",
    "pop",
    "popitem",
    "remove",
    "set",
    "setdefault",
    "update",
    "values",
];

/// Returns `true` for names that collide with a mapping operation, including
/// dunder-style names such as `__init__`.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
        || (name.len() > 4 && name.starts_with("__") && name.ends_with("__"))
}
