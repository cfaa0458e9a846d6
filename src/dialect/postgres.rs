//! PostgreSQL dialect.
//!
//! PostgreSQL features surfaced through the core grammar:
//! - ANSI identifier quoting (`"`)
//! - `FILTER (WHERE ...)` on aggregates
//! - `GROUP BY ROLLUP / CUBE / GROUPING SETS`
//! - `$1`-style positional placeholders (handled by the tokenizer)
//! - `SET (a, b) = (1, 2)` multi-assignment

use super::Dialect;

/// PostgreSQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_alphabetic() || ch == '_'
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || ch == '$'
    }

    fn identifier_quote_style(&self, _ident: &str) -> Option<char> {
        Some('"')
    }

    fn supports_filter_during_aggregation(&self) -> bool {
        true
    }

    fn supports_group_by_expression(&self) -> bool {
        true
    }

    fn supports_parenthesized_set_variables(&self) -> bool {
        true
    }
}
