//! Snowflake dialect.
//!
//! Snowflake features surfaced through the core grammar:
//! - `START WITH ... CONNECT BY` hierarchical queries
//! - Lambda arguments (`x -> x + 1`)
//! - `IGNORE | RESPECT NULLS` in window functions
//! - `SELECT * EXCEPT (...)`
//! - Trailing commas in the projection
//! - `MATCH_RECOGNIZE` capability (clause grammar supplied via hooks)

use super::Dialect;

/// Snowflake dialect.
#[derive(Debug, Clone, Copy)]
pub struct SnowflakeDialect;

impl Dialect for SnowflakeDialect {
    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
    }

    fn identifier_quote_style(&self, _ident: &str) -> Option<char> {
        Some('"')
    }

    fn supports_string_literal_backslash_escape(&self) -> bool {
        true
    }

    fn supports_match_recognize(&self) -> bool {
        true
    }

    fn supports_connect_by(&self) -> bool {
        true
    }

    fn supports_lambda_functions(&self) -> bool {
        true
    }

    fn supports_window_function_null_treatment_arg(&self) -> bool {
        true
    }

    fn supports_select_wildcard_except(&self) -> bool {
        true
    }

    fn supports_projection_trailing_commas(&self) -> bool {
        true
    }
}
