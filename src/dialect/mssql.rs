//! Microsoft SQL Server (T-SQL) dialect.
//!
//! T-SQL features surfaced through the core grammar:
//! - `[bracketed]` identifier quoting
//! - `@variable` placeholders (handled by the tokenizer)
//! - `CONVERT(type, expr)` argument order
//! - No `SUBSTRING(x FROM a FOR b)` form

use super::Dialect;

/// Microsoft SQL Server dialect.
#[derive(Debug, Clone, Copy)]
pub struct MsSqlDialect;

impl Dialect for MsSqlDialect {
    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_alphabetic() || ch == '_' || ch == '#' || ch == '@'
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || ch == '#' || ch == '@' || ch == '$'
    }

    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        ch == '[' || ch == '"'
    }

    fn identifier_quote_style(&self, _ident: &str) -> Option<char> {
        Some('[')
    }

    fn convert_type_before_value(&self) -> bool {
        true
    }

    fn supports_substring_from_for_expression(&self) -> bool {
        false
    }
}
