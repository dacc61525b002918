//! wincall CLI - window-function call inspector

use wincall_cli::cli;
use wincall_cli::input;
use wincall_cli::output;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use wincall_core::{resolve_files, ResolveOptions};

use cli::{Args, OutputFormat};
use output::{format_function_list, format_json, format_table};

/// Rejected calls or unparseable SQL.
const EXIT_FAILURE: u8 = 1;
/// Input could not be read or output could not be written.
const EXIT_CONFIG_ERROR: u8 = 66;

fn main() -> ExitCode {
    let args = Args::parse();

    if args.list_functions {
        return match write_output(&format_function_list()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("wincall: error: {e:#}");
                ExitCode::from(EXIT_CONFIG_ERROR)
            }
        };
    }

    match run(args) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("wincall: error: {e:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

/// Resolves every input and prints the report. Returns whether any error
/// was reported.
fn run(args: Args) -> Result<bool> {
    let sources = input::read_input(&args.files)?;

    let options = ResolveOptions {
        abandon_statement_on_error: Some(!args.keep_going),
    };
    let result = resolve_files(&sources, args.dialect.into(), Some(options));

    let rendered = match args.format {
        OutputFormat::Json => {
            format_json(&result, args.compact).context("Failed to serialize result as JSON")?
        }
        OutputFormat::Table => format_table(&result, args.quiet, true),
    };
    write_output(&rendered)?;

    Ok(result.summary.has_errors)
}

fn write_output(content: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(content.as_bytes())
        .context("Failed to write to stdout")?;
    if !content.ends_with('\n') {
        writeln!(stdout).context("Failed to write to stdout")?;
    }
    Ok(())
}
