//! SQL front end for the window-function builders.
//!
//! [`resolve`] parses a script, finds every function call with an `OVER`
//! clause and runs it through the builder the registry names for it. Each
//! statement gets its own [`StatementArena`]; argument expressions are copied
//! into it before the builder runs.

pub mod span;
mod visit;

use crate::arena::{CallId, StatementArena};
use crate::builder::{Argument, ArgumentList, Arity, CallFlags};
use crate::context::{BuildContext, Diagnostics};
use crate::error::{BuildError, ParseError};
use crate::name::FunctionName;
use crate::parser::parse_sql_with_dialect;
use crate::registry::{
    find_window_function_builder, find_window_function_builder_respecting_nulls,
};
use crate::types::{
    issue_codes, CallSummary, Dialect, FileSource, Issue, IssueCount, ResolveOptions,
    ResolveRequest, ResolveResult, Span, StatementCalls, Summary,
};
use sqlparser::ast::helpers::attached_token::AttachedToken;
use sqlparser::ast::{
    Expr, Function, FunctionArg, FunctionArgExpr, FunctionArgumentClause, FunctionArguments,
    NullTreatment, Statement, Value,
};
#[cfg(feature = "tracing")]
use tracing::{debug, info_span};

/// Resolves every window-function call in `request.sql`.
///
/// Never fails: SQL that does not parse comes back as a `PARSE_ERROR` issue,
/// and rejected calls come back as issues on their statement.
pub fn resolve(request: &ResolveRequest) -> ResolveResult {
    #[cfg(feature = "tracing")]
    let _span = info_span!("resolve_request", dialect = ?request.dialect).entered();
    Resolver::new(request).resolve()
}

/// Resolves several scripts as one run.
///
/// Each file is parsed on its own, so a parse error in one file does not
/// hide the calls of the others. Statement indices restart at zero per
/// file; `source_name` tells them apart.
pub fn resolve_files(
    files: &[FileSource],
    dialect: Dialect,
    options: Option<ResolveOptions>,
) -> ResolveResult {
    let mut merged = ResolveResult::default();
    for file in files {
        let request = ResolveRequest {
            sql: file.content.clone(),
            dialect,
            source_name: Some(file.name.clone()),
            options: options.clone(),
        };
        let result = resolve(&request);

        merged.summary.statement_count += result.summary.statement_count;
        merged.summary.call_count += result.summary.call_count;
        merged.summary.abandoned_statements += result.summary.abandoned_statements;
        merged.statements.extend(result.statements);
        merged.issues.extend(result.issues);
    }
    merged.summary.issue_count = IssueCount::from_issues(&merged.issues);
    merged.summary.has_errors = merged.summary.issue_count.errors > 0;
    merged
}

struct Resolver<'a> {
    request: &'a ResolveRequest,
    abandon_on_error: bool,
    issues: Vec<Issue>,
    statements: Vec<StatementCalls>,
}

impl<'a> Resolver<'a> {
    fn new(request: &'a ResolveRequest) -> Self {
        let abandon_on_error = request
            .options
            .as_ref()
            .map_or(true, |options| options.abandon_statement_on_error());
        Self {
            request,
            abandon_on_error,
            issues: Vec::new(),
            statements: Vec::new(),
        }
    }

    fn resolve(mut self) -> ResolveResult {
        let statements = match parse_sql_with_dialect(&self.request.sql, self.request.dialect) {
            Ok(statements) => statements,
            Err(error) => {
                self.push_parse_error(error);
                return self.build_result(0);
            }
        };

        for (index, statement) in statements.iter().enumerate() {
            #[cfg(feature = "tracing")]
            let _stmt_span = info_span!(
                "resolve_statement",
                index,
                source = self.request.source_name.as_deref().unwrap_or("inline")
            )
            .entered();
            let calls = self.resolve_statement(index, statement);
            self.statements.push(calls);
        }

        self.build_result(statements.len())
    }

    fn resolve_statement(&mut self, index: usize, statement: &Statement) -> StatementCalls {
        let sql = self.request.sql.as_str();
        let mut arena = StatementArena::new();
        let mut diagnostics = Diagnostics::new()
            .for_statement(index)
            .with_source_name(self.request.source_name.clone());
        let mut built = Vec::new();
        let mut abandoned = false;

        for function in visit::window_calls(statement) {
            let mut ctx = BuildContext::new(&mut arena, &mut diagnostics);
            match resolve_call(&mut ctx, sql, function) {
                Ok(Some(id)) => built.push(id),
                Ok(None) => {}
                Err(error) if self.abandon_on_error => {
                    let mut issue = Issue::warning(
                        issue_codes::STATEMENT_ABANDONED,
                        format!(
                            "statement {} abandoned after rejected call to '{}'",
                            index + 1,
                            error.name()
                        ),
                    );
                    if let Some(span) = error.name().span() {
                        issue = issue.with_span(span);
                    }
                    diagnostics.push(issue);
                    abandoned = true;
                    break;
                }
                Err(_) => {}
            }
        }

        let calls = if abandoned {
            Vec::new()
        } else {
            built
                .into_iter()
                .filter_map(|id| summarize(&arena, id))
                .collect()
        };

        self.issues.extend(diagnostics.into_issues());
        StatementCalls {
            statement_index: index,
            source_name: self.request.source_name.clone(),
            calls,
            abandoned,
        }
    }

    fn push_parse_error(&mut self, error: ParseError) {
        let mut issue = Issue::error(issue_codes::PARSE_ERROR, error.to_string());
        if let Some(offset) = error.position.and_then(|position| {
            span::line_col_to_offset(&self.request.sql, position.line, position.column)
        }) {
            issue = issue.with_span(Span::new(offset, offset));
        }
        if let Some(source) = &self.request.source_name {
            issue = issue.with_source_name(source.clone());
        }
        self.issues.push(issue);
    }

    fn build_result(self, statement_count: usize) -> ResolveResult {
        let issue_count = IssueCount::from_issues(&self.issues);
        let summary = Summary {
            statement_count,
            call_count: self.statements.iter().map(|s| s.calls.len()).sum(),
            abandoned_statements: self.statements.iter().filter(|s| s.abandoned).count(),
            has_errors: issue_count.errors > 0,
            issue_count,
        };
        ResolveResult {
            statements: self.statements,
            issues: self.issues,
            summary,
        }
    }
}

/// Builds one call. `Ok(None)` means the function is not a registered
/// window function (an aggregate used with OVER, for instance).
fn resolve_call(
    ctx: &mut BuildContext<'_>,
    sql: &str,
    function: &Function,
) -> Result<Option<CallId>, BuildError> {
    let Some(name) = function_name(sql, function) else {
        return Ok(None);
    };
    let respect_nulls = explicit_null_treatment(function);

    let builder = match respect_nulls {
        Some(_) => match find_window_function_builder_respecting_nulls(&name) {
            Some(builder) => builder,
            None if find_window_function_builder(&name).is_some() => {
                return Err(ctx.report(BuildError::UnknownFunction { name }));
            }
            None => return Ok(None),
        },
        None => match find_window_function_builder(&name) {
            Some(builder) => builder,
            None => return Ok(None),
        },
    };

    let written = written_argument_count(function);
    if let Some(expected) = written_arity(&name).filter(|arity| !arity.accepts(written)) {
        return Err(ctx.report(BuildError::ArityMismatch {
            name,
            expected,
            actual: written,
        }));
    }

    let flags = CallFlags::default().with_respect_nulls(respect_nulls.unwrap_or(true));
    let arguments = collect_arguments(ctx.arena_mut(), function)
        .map(|arguments| normalize_arguments(ctx.arena_mut(), &name, arguments, flags));

    #[cfg(feature = "tracing")]
    debug!(
        function = name.as_str(),
        arguments = arguments.as_ref().map_or(0, ArgumentList::len),
        respect_nulls = flags.respect_nulls,
        "resolving window call"
    );

    builder.create(ctx, &name, arguments, flags).map(Some)
}

/// The unqualified function name with the byte span of its token.
fn function_name(sql: &str, function: &Function) -> Option<FunctionName> {
    let ident = function.name.0.last()?.as_ident()?;
    let name = FunctionName::new(ident.value.clone());
    Some(match span::byte_span(sql, ident.span) {
        Some(span) => name.with_span(span),
        None => name,
    })
}

/// `Some(true)` for RESPECT NULLS, `Some(false)` for IGNORE NULLS, written
/// either after the closing parenthesis or inside the argument list.
fn explicit_null_treatment(function: &Function) -> Option<bool> {
    let respects = |treatment: &NullTreatment| matches!(treatment, NullTreatment::RespectNulls);

    if let Some(treatment) = &function.null_treatment {
        return Some(respects(treatment));
    }
    match &function.args {
        FunctionArguments::List(list) => list.clauses.iter().find_map(|clause| match clause {
            FunctionArgumentClause::IgnoreOrRespectNulls(treatment) => Some(respects(treatment)),
            _ => None,
        }),
        _ => None,
    }
}

fn written_argument_count(function: &Function) -> usize {
    match &function.args {
        FunctionArguments::None => 0,
        FunctionArguments::Subquery(_) => 1,
        FunctionArguments::List(list) => list.args.len(),
    }
}

/// Argument counts accepted in SQL text for the functions whose argument
/// lists [`normalize_arguments`] pads. The builder's own arity applies to the
/// padded list, so these calls are checked against what the user wrote.
fn written_arity(name: &FunctionName) -> Option<Arity> {
    match name.lookup_key().as_str() {
        "LAG" | "LEAD" => Some(Arity::Between { min: 1, max: 3 }),
        "NTH_VALUE" => Some(Arity::Between { min: 2, max: 3 }),
        _ => None,
    }
}

/// Copies the call's arguments into the arena. `None` when the call has no
/// parenthesized argument list at all.
fn collect_arguments(arena: &mut StatementArena, function: &Function) -> Option<ArgumentList> {
    match &function.args {
        FunctionArguments::None => None,
        FunctionArguments::Subquery(query) => {
            let id = arena.alloc_expr(Expr::Subquery(query.clone()));
            Some(ArgumentList::from(vec![Argument::positional(id)]))
        }
        FunctionArguments::List(list) => Some(
            list.args
                .iter()
                .map(|arg| match arg {
                    FunctionArg::Unnamed(value) => {
                        Argument::positional(arena.alloc_expr(argument_expr(value)))
                    }
                    FunctionArg::Named { name, arg, .. } => {
                        Argument::aliased(arena.alloc_expr(argument_expr(arg)), name.value.clone())
                    }
                    FunctionArg::ExprNamed { name, arg, .. } => {
                        Argument::aliased(arena.alloc_expr(argument_expr(arg)), name.to_string())
                    }
                })
                .collect(),
        ),
    }
}

fn argument_expr(arg: &FunctionArgExpr) -> Expr {
    match arg {
        FunctionArgExpr::Expr(expr) => expr.clone(),
        FunctionArgExpr::QualifiedWildcard(prefix) => {
            Expr::QualifiedWildcard(prefix.clone(), AttachedToken::empty())
        }
        FunctionArgExpr::Wildcard => Expr::Wildcard(AttachedToken::empty()),
    }
}

/// Fills the implicit arguments of the functions whose builders expect a
/// longer list than users write.
///
/// LAG and LEAD get a default offset of `1` and a default value of `NULL`.
/// NTH_VALUE gets the respect-nulls literal as its third argument, ahead of
/// any direction selector.
fn normalize_arguments(
    arena: &mut StatementArena,
    name: &FunctionName,
    mut arguments: ArgumentList,
    flags: CallFlags,
) -> ArgumentList {
    match name.lookup_key().as_str() {
        "LAG" | "LEAD" => {
            if arguments.len() == 1 {
                let offset = arena.alloc_expr(literal(Value::Number("1".to_string(), false)));
                arguments.push(Argument::positional(offset));
            }
            if arguments.len() == 2 {
                let default = arena.alloc_expr(literal(Value::Null));
                arguments.push(Argument::positional(default));
            }
        }
        "NTH_VALUE" if arguments.len() >= 2 => {
            let nulls = arena.alloc_expr(literal(Value::Boolean(flags.respect_nulls)));
            arguments.insert(2, Argument::positional(nulls));
        }
        _ => {}
    }
    arguments
}

fn literal(value: Value) -> Expr {
    Expr::Value(value.with_empty_span())
}

fn summarize(arena: &StatementArena, id: CallId) -> Option<CallSummary> {
    let call = arena.call(id)?;
    Some(CallSummary {
        name: call.name().to_string(),
        builder: call.kind(),
        arguments: call
            .arguments()
            .iter()
            .filter_map(|expr| arena.expr(*expr))
            .map(ToString::to_string)
            .collect(),
        respect_nulls: call.flags().respect_nulls,
        direction: call.flags().direction,
        span: call.name().span(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BuilderKind, Direction};
    use crate::types::Severity;

    fn run(sql: &str) -> ResolveResult {
        resolve(&ResolveRequest::new(sql))
    }

    #[test]
    fn test_rank_without_arguments() {
        let result = run("SELECT RANK() OVER (ORDER BY a) FROM t");
        assert!(!result.summary.has_errors);
        let calls: Vec<_> = result.calls().collect();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].builder, BuilderKind::Arg0);
        assert!(calls[0].arguments.is_empty());
        assert_eq!(calls[0].span, Some(Span::new(7, 11)));
    }

    #[test]
    fn test_rank_with_argument_is_rejected() {
        let result = run("SELECT RANK(a) OVER (ORDER BY a) FROM t");
        assert!(result.summary.has_errors);
        assert_eq!(result.issues[0].code, issue_codes::WRONG_ARGUMENT_COUNT);
        assert_eq!(result.issues[0].function.as_deref(), Some("RANK"));
        assert_eq!(result.issues[0].statement_index, Some(0));
    }

    #[test]
    fn test_lag_defaults_are_filled() {
        let result = run("SELECT LAG(price) OVER (ORDER BY day) FROM t");
        let call = result.calls().next().unwrap();
        assert_eq!(call.builder, BuilderKind::Arg3);
        assert_eq!(call.arguments, vec!["price", "1", "NULL"]);
    }

    #[test]
    fn test_lead_keeps_explicit_offset() {
        let result = run("SELECT LEAD(price, 2) OVER (ORDER BY day) FROM t");
        let call = result.calls().next().unwrap();
        assert_eq!(call.arguments, vec!["price", "2", "NULL"]);
    }

    #[test]
    fn test_nth_value_gets_respect_nulls_literal() {
        let result = run("SELECT NTH_VALUE(price, 3) OVER (ORDER BY day) FROM t");
        let call = result.calls().next().unwrap();
        assert_eq!(call.builder, BuilderKind::NthValue);
        assert_eq!(call.arguments, vec!["price", "3", "true"]);
        assert_eq!(call.direction, Direction::FromFirst);
    }

    #[test]
    fn test_nth_value_direction_selector() {
        let result = run("SELECT NTH_VALUE(price, 3, 'LAST') OVER (ORDER BY day) FROM t");
        let call = result.calls().next().unwrap();
        assert_eq!(call.arguments, vec!["price", "3", "true"]);
        assert_eq!(call.direction, Direction::FromLast);
    }

    #[test]
    fn test_ignore_nulls_uses_nulls_aware_lookup() {
        let result = run("SELECT FIRST_VALUE(price) IGNORE NULLS OVER (ORDER BY day) FROM t");
        let call = result.calls().next().unwrap();
        assert!(!call.respect_nulls);
        assert_eq!(call.builder, BuilderKind::Arg1);
    }

    #[test]
    fn test_nth_value_count_is_reported_as_written() {
        let result = run("SELECT NTH_VALUE(a, 2, 'LAST', 9) OVER (ORDER BY d) FROM t");
        assert_eq!(result.issues[0].code, issue_codes::WRONG_ARGUMENT_COUNT);
        assert!(
            result.issues[0].message.ends_with("expected 2 or 3, got 4"),
            "{}",
            result.issues[0].message
        );
    }

    #[test]
    fn test_lag_without_arguments_is_reported_as_written() {
        let result = run("SELECT LAG() OVER (ORDER BY d) FROM t");
        assert_eq!(result.issues[0].code, issue_codes::WRONG_ARGUMENT_COUNT);
        assert!(
            result.issues[0].message.ends_with("'LAG': expected 1 to 3, got 0"),
            "{}",
            result.issues[0].message
        );
    }

    #[test]
    fn test_ignore_nulls_inside_argument_list() {
        let result = run("SELECT LAST_VALUE(price IGNORE NULLS) OVER (ORDER BY day) FROM t");
        let call = result.calls().next().unwrap();
        assert!(!call.respect_nulls);
        assert_eq!(call.arguments, vec!["price"]);
    }

    #[test]
    fn test_nulls_clause_on_ranking_function_is_unknown() {
        let result = run("SELECT RANK() IGNORE NULLS OVER (ORDER BY day) FROM t");
        assert_eq!(result.issues[0].code, issue_codes::UNKNOWN_FUNCTION);
        assert_eq!(result.summary.call_count, 0);
    }

    #[test]
    fn test_aggregates_over_windows_are_skipped() {
        let result = run("SELECT SUM(a) OVER (), ROW_NUMBER() OVER () FROM t");
        assert!(result.issues.is_empty());
        let names: Vec<_> = result.calls().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ROW_NUMBER"]);
    }

    #[test]
    fn test_failed_call_abandons_statement() {
        let result = run(
            "SELECT ROW_NUMBER() OVER (), NTILE() OVER (), RANK() OVER () FROM t; \
             SELECT DENSE_RANK() OVER () FROM t",
        );
        assert_eq!(result.summary.statement_count, 2);
        assert!(result.statements[0].abandoned);
        assert!(result.statements[0].calls.is_empty());
        assert_eq!(result.statements[1].calls.len(), 1);
        assert_eq!(result.summary.abandoned_statements, 1);

        let codes: Vec<_> = result.issues.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(
            codes,
            vec![
                issue_codes::WRONG_ARGUMENT_COUNT,
                issue_codes::STATEMENT_ABANDONED
            ]
        );
        assert_eq!(result.issues[1].severity, Severity::Warning);
    }

    #[test]
    fn test_keep_going_keeps_valid_calls() {
        let request = ResolveRequest::new(
            "SELECT ROW_NUMBER() OVER (), NTILE() OVER (), RANK() OVER () FROM t",
        )
        .with_options(ResolveOptions {
            abandon_statement_on_error: Some(false),
        });
        let result = resolve(&request);
        assert!(!result.statements[0].abandoned);
        let names: Vec<_> = result.calls().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ROW_NUMBER", "RANK"]);
        assert_eq!(result.summary.issue_count.errors, 1);
    }

    #[test]
    fn test_parse_error_becomes_issue() {
        let result = resolve(
            &ResolveRequest::new("SELECT RANK( OVER FROM").with_source_name("bad.sql"),
        );
        assert!(result.statements.is_empty());
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].code, issue_codes::PARSE_ERROR);
        assert_eq!(result.issues[0].source_name.as_deref(), Some("bad.sql"));
        assert!(result.summary.has_errors);
    }

    #[test]
    fn test_dialect_is_honoured() {
        let request = ResolveRequest::new("SELECT LAG(\"Price\") OVER (ORDER BY d) FROM t")
            .with_dialect(Dialect::Postgres);
        let result = resolve(&request);
        let call = result.calls().next().unwrap();
        assert_eq!(call.arguments[0], "\"Price\"");
    }

    #[test]
    fn test_resolve_files_merges_results() {
        let files = vec![
            FileSource {
                name: "a.sql".to_string(),
                content: "SELECT RANK() OVER () FROM t".to_string(),
            },
            FileSource {
                name: "b.sql".to_string(),
                content: "SELECT FROM WHERE".to_string(),
            },
            FileSource {
                name: "c.sql".to_string(),
                content: "SELECT NTILE(2) OVER (), LEAD(x) OVER () FROM t".to_string(),
            },
        ];
        let result = resolve_files(&files, Dialect::Generic, None);

        assert_eq!(result.summary.statement_count, 2);
        assert_eq!(result.summary.call_count, 3);
        assert_eq!(result.summary.issue_count.errors, 1);
        assert_eq!(result.issues[0].source_name.as_deref(), Some("b.sql"));
        let sources: Vec<_> = result
            .statements
            .iter()
            .filter_map(|s| s.source_name.as_deref())
            .collect();
        assert_eq!(sources, vec!["a.sql", "c.sql"]);
    }

    #[test]
    fn test_normalize_leaves_other_functions_alone() {
        let mut arena = StatementArena::new();
        let a = arena.alloc_expr(Expr::Identifier("a".into()));
        let arguments = ArgumentList::from(vec![Argument::positional(a)]);
        let normalized = normalize_arguments(
            &mut arena,
            &FunctionName::new("NTILE"),
            arguments.clone(),
            CallFlags::default(),
        );
        assert_eq!(normalized, arguments);
        assert_eq!(arena.expr_count(), 1);
    }

    #[test]
    fn test_nth_value_single_argument_is_not_padded() {
        let mut arena = StatementArena::new();
        let a = arena.alloc_expr(Expr::Identifier("a".into()));
        let normalized = normalize_arguments(
            &mut arena,
            &FunctionName::new("nth_value"),
            ArgumentList::from(vec![Argument::positional(a)]),
            CallFlags::default(),
        );
        assert_eq!(normalized.len(), 1);
    }
}
