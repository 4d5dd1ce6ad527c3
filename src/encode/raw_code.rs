use serde::{Serialize, Serializer};

/// JavaScript source that must reach the browser as code, not as a string.
///
/// Only [`to_js_literal`](super::to_js_literal) emits it unquoted. Any other
/// serializer sees the source text as an ordinary string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawCode(String);

impl RawCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_code(self) -> String {
        self.0
    }
}

impl Serialize for RawCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::RawCode;

    #[test]
    fn plain_serializers_see_the_source_text() {
        let code = RawCode::new("function () {}");
        assert_eq!(
            serde_json::to_string(&code).expect("json"),
            r#""function () {}""#
        );
    }
}
