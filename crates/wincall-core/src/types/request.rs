//! Request types for the window-call resolve API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A request to resolve every window-function call in a SQL script.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    /// The SQL code to resolve (UTF-8 string, multi-statement supported)
    pub sql: String,

    /// SQL dialect
    #[serde(default)]
    pub dialect: Dialect,

    /// Optional source name (file path or script identifier) attached to issues
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,

    /// Optional resolve options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ResolveOptions>,
}

impl ResolveRequest {
    /// Creates a request for `sql` with the generic dialect and default options.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            dialect: Dialect::Generic,
            source_name: None,
            options: None,
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// A named SQL source, typically a file read by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileSource {
    pub name: String,
    pub content: String,
}

/// SQL dialect used to parse the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
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

impl Dialect {
    pub fn to_sqlparser_dialect(&self) -> Box<dyn sqlparser::dialect::Dialect> {
        use sqlparser::dialect::{
            AnsiDialect, BigQueryDialect, ClickHouseDialect, DatabricksDialect, DuckDbDialect,
            GenericDialect, HiveDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect,
            RedshiftSqlDialect, SQLiteDialect, SnowflakeDialect,
        };
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::Ansi => Box::new(AnsiDialect {}),
            Self::Bigquery => Box::new(BigQueryDialect {}),
            Self::Clickhouse => Box::new(ClickHouseDialect {}),
            Self::Databricks => Box::new(DatabricksDialect {}),
            Self::Duckdb => Box::new(DuckDbDialect {}),
            Self::Hive => Box::new(HiveDialect {}),
            Self::Mssql => Box::new(MsSqlDialect {}),
            Self::Mysql => Box::new(MySqlDialect {}),
            Self::Postgres => Box::new(PostgreSqlDialect {}),
            Self::Redshift => Box::new(RedshiftSqlDialect {}),
            Self::Snowflake => Box::new(SnowflakeDialect {}),
            Self::Sqlite => Box::new(SQLiteDialect {}),
        }
    }
}

/// Options controlling how failed calls affect the enclosing statement.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOptions {
    /// Stop building a statement after its first failed call and discard the
    /// calls already built for it (default: true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abandon_statement_on_error: Option<bool>,
}

impl ResolveOptions {
    pub fn abandon_statement_on_error(&self) -> bool {
        self.abandon_statement_on_error.unwrap_or(true)
    }
}
