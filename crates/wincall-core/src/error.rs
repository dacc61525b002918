//! Error types for SQL parsing and call building.
//!
//! # Error Handling Strategy
//!
//! - [`ParseError`]: the SQL text could not be parsed at all. Returned as
//!   `Result<T, ParseError>` and stops processing of the whole script.
//!
//! - [`BuildError`]: a single window-function call was rejected by its builder.
//!   The builder returns it *and* hands it to the context's
//!   [`ErrorReporter`](crate::context::ErrorReporter), so the grammar can keep
//!   going with other statements while the diagnostic is preserved.

use crate::builder::Arity;
use crate::name::FunctionName;
use crate::types::{issue_codes, Dialect};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;
#[cfg(feature = "tracing")]
use tracing::trace;

/// Error encountered during SQL parsing.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Human-readable error message.
    pub message: String,
    /// Position where the error occurred, if available.
    pub position: Option<Position>,
    /// The SQL dialect being parsed when the error occurred.
    pub dialect: Option<Dialect>,
}

/// Position information for a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl ParseError {
    /// Creates a new parse error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
            dialect: None,
        }
    }

    /// Adds dialect context to the error.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Parses position from sqlparser error message format.
    ///
    /// sqlparser uses format like "Expected ..., found ... at Line: X, Column: Y".
    /// Returns `None` when the message carries no position.
    fn parse_position_from_message(message: &str) -> Option<Position> {
        static POSITION_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = POSITION_REGEX.get_or_init(|| {
            Regex::new(r"Line:\s*(\d+)\s*,\s*Column:\s*(\d+)").expect("Invalid regex pattern")
        });

        let result = re.captures(message).and_then(|caps| {
            let line: usize = caps.get(1)?.as_str().parse().ok()?;
            let column: usize = caps.get(2)?.as_str().parse().ok()?;
            Some(Position { line, column })
        });

        #[cfg(feature = "tracing")]
        if result.is_none() && message.contains("Line") {
            trace!("no position found in parser message: {}", message);
        }

        result
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error")?;

        if let Some(dialect) = self.dialect {
            write!(f, " ({dialect:?})")?;
        }

        if let Some(pos) = self.position {
            write!(f, " at line {}, column {}", pos.line, pos.column)?;
        }

        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<sqlparser::parser::ParserError> for ParseError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        let message = err.to_string();
        let position = Self::parse_position_from_message(&message);

        Self {
            message,
            position,
            dialect: None,
        }
    }
}

/// A window-function call rejected while building its call node.
///
/// Every variant names the offending function so diagnostics can point at it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// No builder is registered under this name for the requested syntax.
    #[error("unknown window function '{name}'")]
    UnknownFunction { name: FunctionName },

    /// The argument count is outside what the builder accepts.
    #[error("wrong number of arguments to window function '{name}': expected {expected}, got {actual}")]
    ArityMismatch {
        name: FunctionName,
        expected: Arity,
        actual: usize,
    },

    /// A required argument carries an explicit alias. `position` is 1-based.
    #[error("argument {position} of window function '{name}' must not be aliased")]
    NonPositionalArgument { name: FunctionName, position: usize },

    /// The trailing FROM FIRST/LAST selector has an unusable value.
    #[error("invalid FROM FIRST/LAST selector for window function '{name}'")]
    InvalidDirectionSelector { name: FunctionName },
}

/// Discriminant of [`BuildError`] for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildErrorKind {
    UnknownFunction,
    ArityMismatch,
    NonPositionalArgument,
    InvalidDirectionSelector,
}

impl BuildError {
    pub fn kind(&self) -> BuildErrorKind {
        match self {
            Self::UnknownFunction { .. } => BuildErrorKind::UnknownFunction,
            Self::ArityMismatch { .. } => BuildErrorKind::ArityMismatch,
            Self::NonPositionalArgument { .. } => BuildErrorKind::NonPositionalArgument,
            Self::InvalidDirectionSelector { .. } => BuildErrorKind::InvalidDirectionSelector,
        }
    }

    /// The function the error is about.
    pub fn name(&self) -> &FunctionName {
        match self {
            Self::UnknownFunction { name }
            | Self::ArityMismatch { name, .. }
            | Self::NonPositionalArgument { name, .. }
            | Self::InvalidDirectionSelector { name } => name,
        }
    }

    /// Machine-readable issue code for this error.
    pub fn code(&self) -> &'static str {
        match self.kind() {
            BuildErrorKind::UnknownFunction => issue_codes::UNKNOWN_FUNCTION,
            BuildErrorKind::ArityMismatch => issue_codes::WRONG_ARGUMENT_COUNT,
            BuildErrorKind::NonPositionalArgument => issue_codes::NON_POSITIONAL_ARGUMENT,
            BuildErrorKind::InvalidDirectionSelector => issue_codes::INVALID_DIRECTION,
        }
    }
}
