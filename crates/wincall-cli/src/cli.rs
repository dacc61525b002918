//! CLI argument parsing using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// wincall - window-function call inspector
#[derive(Parser, Debug)]
#[command(name = "wincall")]
#[command(
    about = "Validate and list the window-function calls in SQL files",
    long_about = None
)]
#[command(version)]
pub struct Args {
    /// SQL files to inspect (reads from stdin if none provided)
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// SQL dialect
    #[arg(short, long, default_value = "generic", value_enum)]
    pub dialect: DialectArg,

    /// Output format
    #[arg(short, long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Keep building a statement's remaining calls after one is rejected
    #[arg(short, long)]
    pub keep_going: bool,

    /// Print the registered window-function names and exit
    #[arg(long, conflicts_with = "files")]
    pub list_functions: bool,

    /// Suppress the issue listing in table output
    #[arg(short, long)]
    pub quiet: bool,

    /// Compact JSON output (no pretty-printing)
    #[arg(short, long)]
    pub compact: bool,
}

/// SQL dialect options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectArg {
    Generic,
    Ansi,
    Bigquery,
    Clickhouse,
    Databricks,
    Duckdb,
    Hive,
    Mssql,
    Mysql,
    Postgres,
    Redshift,
    Snowflake,
    Sqlite,
}

impl From<DialectArg> for wincall_core::Dialect {
    fn from(d: DialectArg) -> Self {
        match d {
            DialectArg::Generic => wincall_core::Dialect::Generic,
            DialectArg::Ansi => wincall_core::Dialect::Ansi,
            DialectArg::Bigquery => wincall_core::Dialect::Bigquery,
            DialectArg::Clickhouse => wincall_core::Dialect::Clickhouse,
            DialectArg::Databricks => wincall_core::Dialect::Databricks,
            DialectArg::Duckdb => wincall_core::Dialect::Duckdb,
            DialectArg::Hive => wincall_core::Dialect::Hive,
            DialectArg::Mssql => wincall_core::Dialect::Mssql,
            DialectArg::Mysql => wincall_core::Dialect::Mysql,
            DialectArg::Postgres => wincall_core::Dialect::Postgres,
            DialectArg::Redshift => wincall_core::Dialect::Redshift,
            DialectArg::Snowflake => wincall_core::Dialect::Snowflake,
            DialectArg::Sqlite => wincall_core::Dialect::Sqlite,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON output
    Json,
}
