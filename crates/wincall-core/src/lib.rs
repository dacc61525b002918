pub mod arena;
pub mod builder;
pub mod context;
pub mod error;
pub mod grammar;
pub mod name;
pub mod parser;
pub mod registry;
pub mod types;

// Re-export main types and functions
pub use arena::{CallId, ExprId, StatementArena, WindowFunctionCall};
pub use builder::{
    Argument, ArgumentList, Arity, Builder, BuilderKind, CallFlags, Direction, ARG0, ARG1, ARG2,
    ARG3, NTH_VALUE,
};
pub use context::{BuildContext, Diagnostics, ErrorReporter};
pub use error::{BuildError, BuildErrorKind, ParseError, Position};
pub use grammar::{resolve, resolve_files};
pub use name::FunctionName;
pub use parser::{parse_sql, parse_sql_with_dialect};
pub use registry::{
    find_window_function_builder, find_window_function_builder_respecting_nulls,
    window_function_names,
};

// Re-export types explicitly
pub use types::{
    // Issue codes
    issue_codes,
    // Response types
    CallSummary,
    // Request types
    Dialect,
    FileSource,
    Issue,
    IssueCount,
    ResolveOptions,
    ResolveRequest,
    ResolveResult,
    Severity,
    Span,
    StatementCalls,
    Summary,
};
