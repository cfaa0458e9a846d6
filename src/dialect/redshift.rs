//! Amazon Redshift dialect.
//!
//! Largely PostgreSQL-compatible; kept separate so Redshift-only behavior
//! has a home as it grows.

use super::Dialect;

/// Amazon Redshift dialect.
#[derive(Debug, Clone, Copy)]
pub struct RedshiftDialect;

impl Dialect for RedshiftDialect {
    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_alphabetic() || ch == '_' || ch == '#'
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || ch == '#' || ch == '$'
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

    fn supports_in_empty_list(&self) -> bool {
        true
    }
}
