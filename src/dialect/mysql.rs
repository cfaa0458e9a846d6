//! MySQL dialect.
//!
//! MySQL features surfaced through the core grammar:
//! - Backtick identifier quoting
//! - Backslash escape sequences in string literals
//! - Identifiers that begin with digits (`1table`)
//! - `DIV` integer division, supplied through the infix hook
//! - Named `WINDOW` clause references

use super::Dialect;
use crate::ast::{BinaryOperator, Expr};
use crate::parser::{precedence, Parser, ParserError};

/// MySQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn is_identifier_start(&self, ch: char) -> bool {
        // Leading digits are folded in by the tokenizer via
        // `supports_numeric_prefix`, so they can still be told apart from
        // exponent literals.
        ch.is_alphabetic()
            || ch == '_'
            || ch == '$'
            || ch == '@'
            || ('\u{0080}'..='\u{ffff}').contains(&ch)
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        self.is_identifier_start(ch) || ch.is_ascii_digit()
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

    fn supports_numeric_prefix(&self) -> bool {
        true
    }

    fn supports_window_clause_named_window_reference(&self) -> bool {
        true
    }

    /// `DIV` is an operator word rather than a symbol, so the built-in
    /// infix handler never sees it.
    fn parse_infix(
        &self,
        parser: &mut Parser,
        expr: &Expr,
        _precedence: u8,
    ) -> Option<Result<Expr, ParserError>> {
        if !parser.consume_plain_word("DIV") {
            return None;
        }
        Some(
            parser
                .parse_subexpr(precedence::MUL_DIV_MOD)
                .map(|right| Expr::BinaryOp {
                    left: Box::new(expr.clone()),
                    op: BinaryOperator::IntegerDivide,
                    right: Box::new(right),
                }),
        )
    }

    /// Give `DIV` the same binding power as `/`.
    fn get_next_precedence(&self, parser: &Parser) -> Option<Result<u8, ParserError>> {
        if parser.peek_plain_word("DIV") {
            Some(Ok(precedence::MUL_DIV_MOD))
        } else {
            None
        }
    }
}
