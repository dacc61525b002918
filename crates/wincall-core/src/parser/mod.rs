use crate::error::ParseError;
use crate::types::Dialect;
use sqlparser::ast::Statement;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

/// Parse SQL using the specified dialect
pub fn parse_sql_with_dialect(sql: &str, dialect: Dialect) -> Result<Vec<Statement>, ParseError> {
    let sqlparser_dialect = dialect.to_sqlparser_dialect();
    match Parser::parse_sql(sqlparser_dialect.as_ref(), sql) {
        Ok(statements) => Ok(statements),
        Err(primary_err) => {
            // Generic rejects Postgres-only casts and named-argument forms that
            // show up in window calls; retry once before giving up.
            if matches!(dialect, Dialect::Generic) && looks_like_postgres_syntax(sql) {
                if let Ok(statements) = Parser::parse_sql(&PostgreSqlDialect {}, sql) {
                    return Ok(statements);
                }
            }
            Err(ParseError::from(primary_err).with_dialect(dialect))
        }
    }
}

fn looks_like_postgres_syntax(sql: &str) -> bool {
    sql.contains("::") || sql.contains(":=")
}

/// Parse SQL using the generic dialect
pub fn parse_sql(sql: &str) -> Result<Vec<Statement>, ParseError> {
    parse_sql_with_dialect(sql, Dialect::Generic)
}
