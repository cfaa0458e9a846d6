//! Permissive catch-all dialect.
//!
//! Accepts a broad superset of the concrete dialects: both `"` and `` ` ``
//! delimited identifiers, empty `IN ()` lists, `GROUP BY` grouping
//! expressions, dictionary literals, and more. Useful when the target
//! database is unknown.

use super::Dialect;

/// Permissive dialect accepting a superset of the concrete dialects.
#[derive(Debug, Clone, Copy)]
pub struct GenericDialect;

impl Dialect for GenericDialect {
    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_alphabetic() || ch == '_' || ch == '#'
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || ch == '#' || ch == '$'
    }

    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        ch == '"' || ch == '`'
    }

    fn supports_filter_during_aggregation(&self) -> bool {
        true
    }

    fn supports_in_empty_list(&self) -> bool {
        true
    }

    fn supports_group_by_expression(&self) -> bool {
        true
    }

    fn supports_start_transaction_modifier(&self) -> bool {
        true
    }

    fn supports_dictionary_syntax(&self) -> bool {
        true
    }

    fn supports_window_function_null_treatment_arg(&self) -> bool {
        true
    }

    fn supports_select_wildcard_except(&self) -> bool {
        true
    }

    fn supports_parenthesized_set_variables(&self) -> bool {
        true
    }

    fn supports_connect_by(&self) -> bool {
        true
    }
}
