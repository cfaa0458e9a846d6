//! Strict ANSI SQL:2011 dialect.
//!
//! Kept as the reference point: every capability flag stays at its default,
//! identifiers are plain ASCII, and only `"` delimits identifiers.

use super::Dialect;

/// Strict ANSI SQL dialect; all capability flags at their defaults.
#[derive(Debug, Clone, Copy)]
pub struct AnsiDialect;

impl Dialect for AnsiDialect {
    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_'
    }
}
