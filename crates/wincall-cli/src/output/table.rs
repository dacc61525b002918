//! Human-readable table output formatting.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::fmt::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use wincall_core::{
    find_window_function_builder, find_window_function_builder_respecting_nulls,
    window_function_names, BuilderKind, Direction, FunctionName, ResolveResult, Severity,
};

#[derive(Tabled)]
struct CallRow {
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Stmt")]
    statement: usize,
    #[tabled(rename = "Function")]
    function: String,
    #[tabled(rename = "Builder")]
    builder: &'static str,
    #[tabled(rename = "Arguments")]
    arguments: String,
    #[tabled(rename = "Nulls")]
    nulls: &'static str,
    #[tabled(rename = "From")]
    direction: &'static str,
}

#[derive(Tabled)]
struct FunctionRow {
    #[tabled(rename = "Function")]
    name: &'static str,
    #[tabled(rename = "Arguments")]
    arity: String,
    #[tabled(rename = "RESPECT/IGNORE NULLS")]
    nulls_aware: &'static str,
}

/// Format the resolve result as human-readable text with optional colors.
pub fn format_table(result: &ResolveResult, quiet: bool, use_colors: bool) -> String {
    let colored = use_colors && std::io::stdout().is_terminal();
    let mut out = String::new();

    write_header(&mut out, colored);
    write_summary(&mut out, result, colored);
    write_calls(&mut out, result);

    if !quiet {
        write_issues(&mut out, result, colored);
    }

    out
}

/// Lists the registered window functions with their accepted arity.
pub fn format_function_list() -> String {
    let rows: Vec<FunctionRow> = window_function_names()
        .into_iter()
        .filter_map(|name| {
            let key = FunctionName::new(name);
            let builder = find_window_function_builder(&key)?;
            let nulls_aware = find_window_function_builder_respecting_nulls(&key).is_some();
            Some(FunctionRow {
                name,
                arity: builder.arity().to_string(),
                nulls_aware: if nulls_aware { "yes" } else { "no" },
            })
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    format!("{table}\n")
}

fn write_header(out: &mut String, colored: bool) {
    let title = "Window Function Calls";
    let line = "═".repeat(50);

    if colored {
        writeln!(out, "{}", title.bold()).unwrap();
        writeln!(out, "{}", line.dimmed()).unwrap();
    } else {
        writeln!(out, "{title}").unwrap();
        writeln!(out, "{line}").unwrap();
    }
}

fn write_summary(out: &mut String, result: &ResolveResult, colored: bool) {
    let summary = &result.summary;
    let mut stats = format!(
        "Summary: {} statements | {} calls",
        summary.statement_count, summary.call_count
    );
    if summary.abandoned_statements > 0 {
        write!(stats, " | {} abandoned", summary.abandoned_statements).unwrap();
    }

    if colored {
        writeln!(out, "{}", stats.cyan()).unwrap();
    } else {
        writeln!(out, "{stats}").unwrap();
    }
    writeln!(out).unwrap();
}

fn write_calls(out: &mut String, result: &ResolveResult) {
    let rows: Vec<CallRow> = result
        .statements
        .iter()
        .flat_map(|statement| {
            statement.calls.iter().map(move |call| CallRow {
                source: statement.source_name.clone().unwrap_or_else(|| "-".to_string()),
                statement: statement.statement_index + 1,
                function: call.name.clone(),
                builder: builder_label(call.builder),
                arguments: call.arguments.join(", "),
                nulls: if call.respect_nulls { "respect" } else { "ignore" },
                direction: match call.direction {
                    Direction::FromFirst => "first",
                    Direction::FromLast => "last",
                },
            })
        })
        .collect();

    if rows.is_empty() {
        writeln!(out, "No window-function calls found.").unwrap();
        writeln!(out).unwrap();
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    writeln!(out, "{table}").unwrap();
    writeln!(out).unwrap();
}

fn builder_label(kind: BuilderKind) -> &'static str {
    match kind {
        BuilderKind::Arg0 => "0 args",
        BuilderKind::Arg1 => "1 arg",
        BuilderKind::Arg2 => "2 args",
        BuilderKind::Arg3 => "3 args",
        BuilderKind::NthValue => "nth_value",
    }
}

fn write_issues(out: &mut String, result: &ResolveResult, colored: bool) {
    if result.issues.is_empty() {
        return;
    }

    let counts = &result.summary.issue_count;
    let mut parts = Vec::new();
    if counts.errors > 0 {
        parts.push(format!("{} errors", counts.errors));
    }
    if counts.warnings > 0 {
        parts.push(format!("{} warnings", counts.warnings));
    }
    let header = format!("Issues ({}):", parts.join(", "));

    if colored {
        writeln!(out, "{}", header.bold()).unwrap();
    } else {
        writeln!(out, "{header}").unwrap();
    }

    for issue in &result.issues {
        let severity = match (issue.severity, colored) {
            (Severity::Error, true) => "ERROR".red().to_string(),
            (Severity::Error, false) => "ERROR".to_string(),
            (Severity::Warning, true) => "WARN".yellow().to_string(),
            (Severity::Warning, false) => "WARN".to_string(),
        };

        let mut location = String::new();
        if let Some(source) = &issue.source_name {
            write!(location, " {source}").unwrap();
        }
        if let Some(span) = &issue.span {
            write!(location, " offset {}", span.start).unwrap();
        }
        if !location.is_empty() {
            location.push(':');
        }

        writeln!(out, "  [{severity}]{location} {}", issue.message).unwrap();
    }
}
