//! Response types for the window-call resolve API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{Issue, Span, Summary};
use crate::builder::{BuilderKind, Direction};

/// The result of resolving the window-function calls of a SQL script.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResult {
    /// Per-statement call listings
    pub statements: Vec<StatementCalls>,

    /// All issues encountered while resolving
    pub issues: Vec<Issue>,

    /// Summary statistics
    pub summary: Summary,
}

impl ResolveResult {
    /// Iterates over every call node of every statement.
    pub fn calls(&self) -> impl Iterator<Item = &CallSummary> {
        self.statements.iter().flat_map(|s| s.calls.iter())
    }
}

/// Window-function calls built for one statement.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatementCalls {
    /// Zero-based index of the statement in the input SQL
    pub statement_index: usize,

    /// Optional source name (file path or script identifier)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,

    /// Call nodes in the order their functions appear
    pub calls: Vec<CallSummary>,

    /// True when a failed call caused the statement to be abandoned
    #[serde(default)]
    pub abandoned: bool,
}

/// A rendered call node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallSummary {
    /// Function name as spelled in the source
    pub name: String,

    /// Builder that validated and constructed the call
    pub builder: BuilderKind,

    /// Arguments rendered back to SQL, in call order
    pub arguments: Vec<String>,

    pub respect_nulls: bool,

    pub direction: Direction,

    /// Location of the function name in the source SQL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}
