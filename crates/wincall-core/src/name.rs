use crate::types::Span;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A function name token as it appeared in the source.
///
/// The original spelling is kept for diagnostics; registry lookups go through
/// [`FunctionName::lookup_key`], which folds ASCII case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FunctionName {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    span: Option<Span>,
}

impl FunctionName {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            span: None,
        }
    }

    /// Attaches the byte range the name occupies in the source SQL.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Registry key: the name upper-cased. SQL function names are ASCII.
    pub fn lookup_key(&self) -> String {
        self.text.to_ascii_uppercase()
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for FunctionName {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
