//! Common types shared between request and response.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An issue encountered while resolving window-function calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Severity level
    pub severity: Severity,

    /// Machine-readable issue code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Function the issue is about, as spelled in the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    /// Optional: location in source SQL where issue occurred
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,

    /// Optional: which statement index this issue relates to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_index: Option<usize>,

    /// Optional: source file name where the issue occurred
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}

impl Issue {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    fn new(severity: Severity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            function: None,
            span: None,
            statement_index: None,
            source_name: None,
        }
    }

    pub fn with_function(mut self, name: impl Into<String>) -> Self {
        self.function = Some(name.into());
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_statement(mut self, index: usize) -> Self {
        self.statement_index = Some(index);
        self
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A byte range in the source SQL string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    /// Byte offset from start of SQL string (inclusive)
    pub start: usize,
    /// Byte offset from start of SQL string (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Summary statistics for a resolve run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Total number of statements parsed
    pub statement_count: usize,

    /// Window-function calls that produced a call node
    pub call_count: usize,

    /// Statements abandoned after a failed call
    pub abandoned_statements: usize,

    /// Issue counts by severity
    pub issue_count: IssueCount,

    /// Quick check: true if any errors were encountered
    pub has_errors: bool,
}

/// Counts of issues by severity level.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct IssueCount {
    /// Number of error-level issues
    pub errors: usize,
    /// Number of warning-level issues
    pub warnings: usize,
}

impl IssueCount {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let errors = issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
            .count();
        Self {
            errors,
            warnings: issues.len() - errors,
        }
    }
}

/// Machine-readable issue codes.
pub mod issue_codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const UNKNOWN_FUNCTION: &str = "UNKNOWN_FUNCTION";
    pub const WRONG_ARGUMENT_COUNT: &str = "WRONG_ARGUMENT_COUNT";
    pub const NON_POSITIONAL_ARGUMENT: &str = "NON_POSITIONAL_ARGUMENT";
    pub const INVALID_DIRECTION: &str = "INVALID_DIRECTION";
    pub const STATEMENT_ABANDONED: &str = "STATEMENT_ABANDONED";
}
