//! Types for the window-call resolve API.
//!
//! The API accepts SQL text and returns, per statement, the window-function
//! call nodes built for it along with any issues reported by the builders.

mod common;
mod request;
mod response;

pub use common::{issue_codes, Issue, IssueCount, Severity, Span, Summary};
pub use request::{Dialect, FileSource, ResolveOptions, ResolveRequest};
pub use response::{CallSummary, ResolveResult, StatementCalls};
