//! # Katydid
//!
//! A multi-dialect SQL parser: source text in, syntax tree out, and back
//! again.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     SQL source text                      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [tokenizer]  ← Dialect classifiers
//! ┌─────────────────────────────────────────────────────────┐
//! │               Tokens (with line/column)                  │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [parser]     ← Dialect hooks + flags
//! ┌─────────────────────────────────────────────────────────┐
//! │                AST (Statement / Expr)                    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!          ┌───────────────┴───────────────┐
//!          ▼ [visit]                       ▼ [Display]
//!   rewritten AST                    canonical SQL text
//! ```
//!
//! The [`dialect::Dialect`] trait specialises the generic tokenizer and
//! parser to a particular SQL variant: character classifiers steer the
//! tokenizer, four hooks can take over parsing, and capability flags gate
//! optional grammar. Rendering needs no dialect - the variant chosen at
//! parse time already captured the difference.
//!
//! ## Example
//!
//! ```
//! use katydid::dialect::GenericDialect;
//!
//! let statements = katydid::parse(&GenericDialect {}, "SELECT a, b FROM t WHERE a > 1").unwrap();
//! assert_eq!(statements.len(), 1);
//! assert_eq!(katydid::render(&statements[0]), "SELECT a, b FROM t WHERE a > 1");
//! ```

pub mod ast;
pub mod dialect;
pub mod keywords;
pub mod parser;
pub mod tokenizer;
pub mod writer;

use ast::{Expr, Statement};
use dialect::Dialect;
use parser::{Parser, ParserError};
use tokenizer::Token;

pub use writer::render;

/// Parse a source string into `;`-separated statements.
pub fn parse(dialect: &dyn Dialect, sql: &str) -> Result<Vec<Statement>, ParserError> {
    Parser::parse_sql(dialect, sql)
}

/// Parse a source string as a single expression; the whole input must be
/// consumed.
pub fn parse_expr(dialect: &dyn Dialect, sql: &str) -> Result<Expr, ParserError> {
    let mut parser = Parser::new(dialect).try_with_sql(sql)?;
    let expr = parser.parse_expr()?;
    parser.expect_token(&Token::Eof)?;
    Ok(expr)
}

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::ast::{
        descendants, visit_expr, visit_statement, DataType, Expr, Ident, ObjectName, Query,
        Select, SetExpr, Statement, Value, Visitor,
    };
    pub use crate::dialect::{Dialect, GenericDialect};
    pub use crate::parser::{Parser, ParserError};
    pub use crate::tokenizer::{Token, Tokenizer, TokenizerError};
    pub use crate::writer::render;
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialect::GenericDialect;

    #[test]
    fn test_parse_entry_point() {
        let statements = parse(&GenericDialect {}, "SELECT 1; SELECT 2").unwrap();
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_parse_expr_entry_point() {
        let expr = parse_expr(&GenericDialect {}, "1 + 2").unwrap();
        assert_eq!(render(&expr), "1 + 2");
    }

    #[test]
    fn test_parse_expr_rejects_trailing_input() {
        assert!(parse_expr(&GenericDialect {}, "1 + 2 garbage trailing").is_err());
    }
}
