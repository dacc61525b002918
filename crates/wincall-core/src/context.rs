//! The build context handed to builders: the statement arena plus the
//! error-reporting channel.

use crate::arena::StatementArena;
use crate::error::BuildError;
use crate::types::Issue;

/// Receives a structured diagnostic for every rejected call.
///
/// Reporting never aborts the caller; the builder still returns the error.
pub trait ErrorReporter {
    fn report(&mut self, error: &BuildError);
}

/// Collects build errors as [`Issue`]s.
#[derive(Debug, Default)]
pub struct Diagnostics {
    issues: Vec<Issue>,
    statement_index: Option<usize>,
    source_name: Option<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags every subsequent issue with the statement it belongs to.
    pub fn for_statement(mut self, index: usize) -> Self {
        self.statement_index = Some(index);
        self
    }

    pub fn with_source_name(mut self, name: Option<String>) -> Self {
        self.source_name = name;
        self
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(self.tag(issue));
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    fn tag(&self, mut issue: Issue) -> Issue {
        if let Some(index) = self.statement_index {
            issue = issue.with_statement(index);
        }
        if let Some(source) = &self.source_name {
            issue = issue.with_source_name(source.clone());
        }
        issue
    }
}

impl ErrorReporter for Diagnostics {
    fn report(&mut self, error: &BuildError) {
        let name = error.name();
        let mut issue = Issue::error(error.code(), error.to_string()).with_function(name.as_str());
        if let Some(span) = name.span() {
            issue = issue.with_span(span);
        }
        self.push(issue);
    }
}

impl ErrorReporter for Vec<BuildError> {
    fn report(&mut self, error: &BuildError) {
        self.push(error.clone());
    }
}

/// Everything a builder needs for one call.
pub struct BuildContext<'a> {
    arena: &'a mut StatementArena,
    reporter: &'a mut dyn ErrorReporter,
}

impl<'a> BuildContext<'a> {
    pub fn new(arena: &'a mut StatementArena, reporter: &'a mut dyn ErrorReporter) -> Self {
        Self { arena, reporter }
    }

    pub fn arena(&self) -> &StatementArena {
        &*self.arena
    }

    pub fn arena_mut(&mut self) -> &mut StatementArena {
        &mut *self.arena
    }

    /// Reports `error` and hands it back for returning.
    pub fn report(&mut self, error: BuildError) -> BuildError {
        self.reporter.report(&error);
        error
    }
}
