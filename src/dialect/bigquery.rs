//! Google BigQuery dialect.
//!
//! BigQuery features surfaced through the core grammar:
//! - Backtick identifier quoting
//! - Triple-quoted string literals
//! - Backslash escape sequences in string literals
//! - Trailing commas in comma-separated lists
//! - `SELECT * EXCEPT (...)`
//! - Named `WINDOW` clause references

use super::Dialect;

/// Google BigQuery dialect.
#[derive(Debug, Clone, Copy)]
pub struct BigQueryDialect;

impl Dialect for BigQueryDialect {
    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_'
    }

    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        ch == '`'
    }

    fn identifier_quote_style(&self, _ident: &str) -> Option<char> {
        Some('`')
    }

    fn supports_string_literal_backslash_escape(&self) -> bool {
        true
    }

    fn supports_triple_quoted_string(&self) -> bool {
        true
    }

    fn supports_trailing_commas(&self) -> bool {
        true
    }

    fn supports_select_wildcard_except(&self) -> bool {
        true
    }

    fn supports_window_clause_named_window_reference(&self) -> bool {
        true
    }

    fn supports_window_function_null_treatment_arg(&self) -> bool {
        true
    }

    fn supports_group_by_expression(&self) -> bool {
        true
    }
}
