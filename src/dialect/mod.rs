//! SQL dialect definitions.
//!
//! This module provides a trait-based abstraction for SQL dialect
//! differences. A [`Dialect`] bundles three kinds of knobs:
//!
//! - Character classifiers that steer the tokenizer (identifier boundaries,
//!   delimited-identifier quotes)
//! - Parser hooks that let a dialect take over statement, prefix or infix
//!   parsing, or override operator precedence
//! - Capability flags that gate optional grammar (trailing commas, `GROUP BY
//!   ROLLUP`, `SUBSTRING ... FROM ... FOR ...`, and friends)
//!
//! Every hook defers to the built-in behavior by returning `None`; every
//! flag defaults to the conservative ANSI-ish answer. Concrete dialects
//! override a handful each.
//!
//! # Usage
//!
//! ```
//! use katydid::dialect::PostgresDialect;
//! use katydid::parser::Parser;
//!
//! let statements = Parser::parse_sql(&PostgresDialect {}, "SELECT 1").unwrap();
//! assert_eq!(statements.len(), 1);
//! ```

mod ansi;
mod bigquery;
mod duckdb;
mod generic;
mod mssql;
mod mysql;
mod postgres;
mod redshift;
mod snowflake;

pub use ansi::AnsiDialect;
pub use bigquery::BigQueryDialect;
pub use duckdb::DuckDbDialect;
pub use generic::GenericDialect;
pub use mssql::MsSqlDialect;
pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use redshift::RedshiftDialect;
pub use snowflake::SnowflakeDialect;

use std::fmt::Debug;
use std::iter::Peekable;
use std::str::Chars;

use crate::ast::{Expr, Statement};
use crate::parser::{Parser, ParserError};

/// A SQL dialect: character classifiers, parser hooks and capability flags.
///
/// The parser consults the hooks before its built-in handlers; a hook
/// returning `None` defers to the default. Errors from hooks surface to the
/// caller unchanged.
pub trait Dialect: Debug {
    // =========================================================================
    // Character classifiers
    // =========================================================================

    /// Whether `ch` can start an unquoted identifier or keyword.
    fn is_identifier_start(&self, ch: char) -> bool;

    /// Whether `ch` can continue an unquoted identifier or keyword.
    fn is_identifier_part(&self, ch: char) -> bool;

    /// Whether `ch` opens a delimited (quoted) identifier.
    ///
    /// The closing delimiter is the matching pair: `"` and `` ` `` close
    /// themselves, `[` closes with `]`.
    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        ch == '"'
    }

    /// Called with the tokenizer positioned at a delimiter candidate;
    /// returning false makes the tokenizer treat the character as plain
    /// punctuation instead.
    fn is_proper_identifier_inside_quotes(&self, mut _chars: Peekable<Chars<'_>>) -> bool {
        true
    }

    /// The quote character this dialect would use to quote `ident` when
    /// generating SQL, if any.
    fn identifier_quote_style(&self, _ident: &str) -> Option<char> {
        None
    }

    // =========================================================================
    // Parser hooks
    // =========================================================================

    /// Dialect-specific statement parsing, consulted before the built-in
    /// statement dispatch.
    fn parse_statement(&self, _parser: &mut Parser) -> Option<Result<Statement, ParserError>> {
        None
    }

    /// Dialect-specific prefix parsing, consulted before the built-in
    /// prefix handler.
    fn parse_prefix(&self, _parser: &mut Parser) -> Option<Result<Expr, ParserError>> {
        None
    }

    /// Dialect-specific infix parsing, consulted once per infix step with
    /// the expression parsed so far and its precedence.
    fn parse_infix(
        &self,
        _parser: &mut Parser,
        _expr: &Expr,
        _precedence: u8,
    ) -> Option<Result<Expr, ParserError>> {
        None
    }

    /// Dialect-specific precedence for the token the parser is about to
    /// consume. `None` uses the built-in table.
    fn get_next_precedence(&self, _parser: &Parser) -> Option<Result<u8, ParserError>> {
        None
    }

    // =========================================================================
    // Capability flags
    // =========================================================================

    /// `COUNT(x) FILTER (WHERE ...)` after aggregate functions.
    fn supports_filter_during_aggregation(&self) -> bool {
        false
    }

    /// Empty `IN ()` lists.
    fn supports_in_empty_list(&self) -> bool {
        false
    }

    /// `GROUP BY ROLLUP (...)`, `CUBE (...)` and `GROUPING SETS (...)`.
    fn supports_group_by_expression(&self) -> bool {
        false
    }

    /// `SUBSTRING(expr FROM start FOR length)` in addition to the
    /// comma-separated argument form.
    fn supports_substring_from_for_expression(&self) -> bool {
        true
    }

    /// `CONVERT(type, expr)` rather than `CONVERT(expr, type)`.
    fn convert_type_before_value(&self) -> bool {
        false
    }

    /// `BEGIN DEFERRED | IMMEDIATE | EXCLUSIVE TRANSACTION`.
    fn supports_start_transaction_modifier(&self) -> bool {
        false
    }

    /// Named function arguments spelled `name = value` instead of
    /// `name => value`.
    fn supports_named_function_args_with_eq_operator(&self) -> bool {
        false
    }

    /// Backslash escape sequences inside single-quoted strings.
    fn supports_string_literal_backslash_escape(&self) -> bool {
        false
    }

    /// `MATCH_RECOGNIZE` row pattern matching. The flag is part of the
    /// dialect contract; the built-in grammar defers the clause itself to
    /// dialect hooks.
    fn supports_match_recognize(&self) -> bool {
        false
    }

    /// Dictionary literals like `{'key': value}`.
    fn supports_dictionary_syntax(&self) -> bool {
        false
    }

    /// Hierarchical queries via `START WITH ... CONNECT BY`.
    fn supports_connect_by(&self) -> bool {
        false
    }

    /// `OVER window_name` references to a window defined in the `WINDOW`
    /// clause.
    fn supports_window_clause_named_window_reference(&self) -> bool {
        false
    }

    /// Identifiers that begin with digits, like MySQL's `1table`.
    fn supports_numeric_prefix(&self) -> bool {
        false
    }

    /// `IGNORE NULLS` / `RESPECT NULLS` inside window function calls.
    fn supports_window_function_null_treatment_arg(&self) -> bool {
        false
    }

    /// Lambda expressions like `x -> x + 1` in function arguments.
    fn supports_lambda_functions(&self) -> bool {
        false
    }

    /// `SET (a, b) = (1, 2)` multi-assignment.
    fn supports_parenthesized_set_variables(&self) -> bool {
        false
    }

    /// Triple-quoted string literals `'''text'''`.
    fn supports_triple_quoted_string(&self) -> bool {
        false
    }

    /// `SELECT * EXCEPT (a, b)` wildcard trimming.
    fn supports_select_wildcard_except(&self) -> bool {
        false
    }

    /// Trailing commas in comma-separated lists generally.
    fn supports_trailing_commas(&self) -> bool {
        false
    }

    /// Trailing commas in the SELECT projection specifically.
    fn supports_projection_trailing_commas(&self) -> bool {
        self.supports_trailing_commas()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(dialect: &dyn Dialect, word: &str) -> bool {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) if dialect.is_identifier_start(first) => {
                chars.all(|ch| dialect.is_identifier_part(ch))
            }
            _ => false,
        }
    }

    #[test]
    fn test_identifier_classification() {
        assert!(classify(&GenericDialect {}, "_private"));
        assert!(classify(&GenericDialect {}, "table1"));
        assert!(!classify(&AnsiDialect {}, "1table"));
        assert!(classify(&MySqlDialect {}, "@session_var"));
    }

    #[test]
    fn test_delimited_identifier_start() {
        assert!(GenericDialect {}.is_delimited_identifier_start('"'));
        assert!(MySqlDialect {}.is_delimited_identifier_start('`'));
        assert!(MsSqlDialect {}.is_delimited_identifier_start('['));
        assert!(!PostgresDialect {}.is_delimited_identifier_start('`'));
    }

    #[test]
    fn test_quote_styles() {
        assert_eq!(PostgresDialect {}.identifier_quote_style("x"), Some('"'));
        assert_eq!(MySqlDialect {}.identifier_quote_style("x"), Some('`'));
        assert_eq!(MsSqlDialect {}.identifier_quote_style("x"), Some('['));
        assert_eq!(AnsiDialect {}.identifier_quote_style("x"), None);
    }

    #[test]
    fn test_flag_defaults_are_conservative() {
        let ansi = AnsiDialect {};
        assert!(!ansi.supports_trailing_commas());
        assert!(!ansi.supports_in_empty_list());
        assert!(!ansi.supports_dictionary_syntax());
        assert!(ansi.supports_substring_from_for_expression());
    }

    #[test]
    fn test_projection_trailing_commas_follows_general_flag() {
        // BigQuery sets the general flag only; the projection flag inherits
        let bq = BigQueryDialect {};
        assert!(bq.supports_trailing_commas());
        assert!(bq.supports_projection_trailing_commas());

        // Snowflake allows them in the projection only
        let sf = SnowflakeDialect {};
        assert!(!sf.supports_trailing_commas());
        assert!(sf.supports_projection_trailing_commas());
    }
}
