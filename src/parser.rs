//! SQL parser.
//!
//! A hand-written recursive-descent parser over the buffered token stream,
//! with a Pratt precedence loop for expressions. The [`Dialect`] is
//! consulted at four points, in this order:
//!
//! 1. `parse_statement` - before built-in statement dispatch
//! 2. `parse_prefix` - before the built-in prefix handler
//! 3. `parse_infix` - before the built-in infix handler
//! 4. `get_next_precedence` - merged (by maximum) with the built-in table
//!
//! The parser never consumes more than it can give back: speculative parses
//! run through [`Parser::maybe_parse`], which restores the token index on
//! failure.

use thiserror::Error;

use crate::ast::*;
use crate::dialect::Dialect;
use crate::keywords::{Keyword, RESERVED_FOR_COLUMN_ALIAS, RESERVED_FOR_TABLE_ALIAS};
use crate::tokenizer::{Location, Token, TokenWithLocation, Tokenizer, TokenizerError, Word};

/// Operator precedence tiers, low to high. Exposed so dialect hooks can
/// slot custom operators into the right tier.
pub mod precedence {
    pub const OR: u8 = 5;
    pub const AND: u8 = 10;
    pub const UNARY_NOT: u8 = 15;
    pub const IS: u8 = 17;
    pub const COMPARISON: u8 = 20;
    pub const BETWEEN_LIKE: u8 = 22;
    pub const PIPE: u8 = 25;
    pub const AMPERSAND: u8 = 27;
    pub const SHIFT: u8 = 30;
    pub const PLUS_MINUS: u8 = 33;
    pub const MUL_DIV_MOD: u8 = 40;
    pub const JSON_ACCESS: u8 = 45;
    pub const DOUBLE_COLON: u8 = 50;
    /// Right-associative
    pub const CARET: u8 = 52;
    pub const UNARY_PREFIX: u8 = 55;
    pub const ARRAY_INDEX: u8 = 60;
}

/// Parser error with source position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} at line {line}, column {column}")]
pub struct ParserError {
    pub message: String,
    pub line: u64,
    pub column: u64,
}

impl From<TokenizerError> for ParserError {
    fn from(err: TokenizerError) -> Self {
        ParserError {
            message: err.message,
            line: err.line,
            column: err.column,
        }
    }
}

fn word_to_ident(word: Word) -> Ident {
    Ident {
        value: word.value,
        quote_style: word.quote_style,
    }
}

static EOF_TOKEN: TokenWithLocation = TokenWithLocation {
    token: Token::Eof,
    location: Location { line: 1, column: 1 },
};

/// SQL parser over a buffered token stream.
pub struct Parser<'a> {
    tokens: Vec<TokenWithLocation>,
    /// Index of the next token to consume
    index: usize,
    dialect: &'a dyn Dialect,
}

impl<'a> Parser<'a> {
    /// Create a parser for the given dialect, with no input yet.
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            tokens: Vec::new(),
            index: 0,
            dialect,
        }
    }

    /// Tokenize `sql` and load the tokens into this parser.
    pub fn try_with_sql(mut self, sql: &str) -> Result<Self, ParserError> {
        self.tokens = Tokenizer::new(self.dialect, sql).tokenize()?;
        self.index = 0;
        Ok(self)
    }

    /// Parse a full source string into statements.
    pub fn parse_sql(dialect: &dyn Dialect, sql: &str) -> Result<Vec<Statement>, ParserError> {
        Parser::new(dialect).try_with_sql(sql)?.parse_statements()
    }

    /// Parse the loaded tokens as `;`-separated statements. An empty
    /// trailing statement is discarded; a stray token after a statement is
    /// an error.
    pub fn parse_statements(&mut self) -> Result<Vec<Statement>, ParserError> {
        let mut statements = Vec::new();
        let mut expecting_delimiter = false;
        loop {
            while self.consume_token(&Token::SemiColon) {
                expecting_delimiter = false;
            }
            if self.peek_token_ref().token == Token::Eof {
                break;
            }
            if expecting_delimiter {
                let found = self.peek_token();
                return self.expected("end of statement", found);
            }
            statements.push(self.parse_statement()?);
            expecting_delimiter = true;
        }
        Ok(statements)
    }

    // =========================================================================
    // Token access
    // =========================================================================

    /// The next unconsumed token (EOF when input is exhausted).
    pub fn peek_token(&self) -> TokenWithLocation {
        self.peek_nth_token(0)
    }

    pub fn peek_token_ref(&self) -> &TokenWithLocation {
        self.tokens.get(self.index).unwrap_or(&EOF_TOKEN)
    }

    pub fn peek_nth_token(&self, n: usize) -> TokenWithLocation {
        self.tokens
            .get(self.index + n)
            .unwrap_or(&EOF_TOKEN)
            .clone()
    }

    /// Consume and return the next token. Repeated calls at end of input
    /// keep returning EOF.
    pub fn next_token(&mut self) -> TokenWithLocation {
        let token = self.peek_token();
        // the token stream ends with EOF; stay parked on it
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
        token
    }

    /// Step back one token.
    pub fn prev_token(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Save the current position for a later [`Parser::restore`].
    pub fn checkpoint(&self) -> usize {
        self.index
    }

    /// Rewind to a previously saved position.
    pub fn restore(&mut self, checkpoint: usize) {
        self.index = checkpoint;
    }

    /// Consume the next token if it equals `expected`.
    pub fn consume_token(&mut self, expected: &Token) -> bool {
        if &self.peek_token_ref().token == expected {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub fn expect_token(&mut self, expected: &Token) -> Result<(), ParserError> {
        if self.consume_token(expected) {
            Ok(())
        } else {
            let found = self.peek_token();
            self.expected(&expected.to_string(), found)
        }
    }

    /// Run `f`; on failure restore the token position and return `None`.
    pub fn maybe_parse<T>(
        &mut self,
        f: impl FnOnce(&mut Parser<'a>) -> Result<T, ParserError>,
    ) -> Option<T> {
        let checkpoint = self.checkpoint();
        match f(self) {
            Ok(value) => Some(value),
            Err(_) => {
                self.restore(checkpoint);
                None
            }
        }
    }

    /// Report `expected ..., found ...` at the location of `found`.
    pub fn expected<T>(&self, expected: &str, found: TokenWithLocation) -> Result<T, ParserError> {
        Err(ParserError {
            message: format!("Expected {}, found: {}", expected, found.token),
            line: found.location.line,
            column: found.location.column,
        })
    }

    fn error_at<T>(&self, message: impl Into<String>, location: Location) -> Result<T, ParserError> {
        Err(ParserError {
            message: message.into(),
            line: location.line,
            column: location.column,
        })
    }

    // =========================================================================
    // Keyword access
    // =========================================================================

    fn peek_keyword_at(&self, n: usize) -> Option<Keyword> {
        match &self.peek_nth_token(n).token {
            Token::Word(w) => w.keyword,
            _ => None,
        }
    }

    fn peek_keyword(&self) -> Option<Keyword> {
        self.peek_keyword_at(0)
    }

    /// Consume the next token if it is the given keyword.
    pub fn parse_keyword(&mut self, keyword: Keyword) -> bool {
        if self.peek_keyword() == Some(keyword) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume a whole keyword sequence, or nothing.
    pub fn parse_keywords(&mut self, keywords: &[Keyword]) -> bool {
        let checkpoint = self.checkpoint();
        for &keyword in keywords {
            if !self.parse_keyword(keyword) {
                self.restore(checkpoint);
                return false;
            }
        }
        true
    }

    /// Consume one keyword out of `keywords`, if the next token is one.
    pub fn parse_one_of_keywords(&mut self, keywords: &[Keyword]) -> Option<Keyword> {
        match self.peek_keyword() {
            Some(keyword) if keywords.contains(&keyword) => {
                self.next_token();
                Some(keyword)
            }
            _ => None,
        }
    }

    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParserError> {
        if self.parse_keyword(keyword) {
            Ok(())
        } else {
            let found = self.peek_token();
            self.expected(&format!("{:?}", keyword), found)
        }
    }

    pub fn expect_one_of_keywords(&mut self, keywords: &[Keyword]) -> Result<Keyword, ParserError> {
        match self.parse_one_of_keywords(keywords) {
            Some(keyword) => Ok(keyword),
            None => {
                let found = self.peek_token();
                self.expected(&format!("one of {:?}", keywords), found)
            }
        }
    }

    /// Whether the next token is the given unquoted non-keyword word,
    /// compared case-insensitively. Lets dialects define keyword operators
    /// the core table does not know (MySQL `DIV`).
    pub fn peek_plain_word(&self, word: &str) -> bool {
        match &self.peek_token_ref().token {
            Token::Word(w) => w.quote_style.is_none() && w.value.eq_ignore_ascii_case(word),
            _ => false,
        }
    }

    /// Consume the next token if [`Parser::peek_plain_word`] matches.
    pub fn consume_plain_word(&mut self, word: &str) -> bool {
        if self.peek_plain_word(word) {
            self.next_token();
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Identifiers and lists
    // =========================================================================

    /// Parse an identifier; keywords are accepted as identifiers here.
    pub fn parse_identifier(&mut self) -> Result<Ident, ParserError> {
        let token = self.next_token();
        match token.token {
            Token::Word(w) => Ok(word_to_ident(w)),
            _ => self.expected("an identifier", token),
        }
    }

    /// Parse a possibly qualified, dotted object name.
    pub fn parse_object_name(&mut self) -> Result<ObjectName, ParserError> {
        let mut parts = vec![self.parse_identifier()?];
        while self.consume_token(&Token::Period) {
            parts.push(self.parse_identifier()?);
        }
        Ok(ObjectName(parts))
    }

    fn parse_parenthesized_column_list(&mut self) -> Result<Vec<Ident>, ParserError> {
        self.expect_token(&Token::LParen)?;
        let columns = self.parse_comma_separated(Parser::parse_identifier)?;
        self.expect_token(&Token::RParen)?;
        Ok(columns)
    }

    fn parse_optional_parenthesized_column_list(&mut self) -> Result<Vec<Ident>, ParserError> {
        if self.peek_token_ref().token == Token::LParen {
            self.parse_parenthesized_column_list()
        } else {
            Ok(Vec::new())
        }
    }

    /// Parse `f`, comma-separated. Trailing commas are accepted when the
    /// dialect enables them generally.
    pub fn parse_comma_separated<T>(
        &mut self,
        f: impl FnMut(&mut Parser<'a>) -> Result<T, ParserError>,
    ) -> Result<Vec<T>, ParserError> {
        let allow_trailing = self.dialect.supports_trailing_commas();
        self.parse_comma_separated_with_trailing(allow_trailing, f)
    }

    fn parse_comma_separated_with_trailing<T>(
        &mut self,
        allow_trailing: bool,
        mut f: impl FnMut(&mut Parser<'a>) -> Result<T, ParserError>,
    ) -> Result<Vec<T>, ParserError> {
        let mut values = Vec::new();
        loop {
            values.push(f(self)?);
            if !self.consume_token(&Token::Comma) {
                break;
            }
            if allow_trailing && self.comma_ends_list() {
                break;
            }
        }
        Ok(values)
    }

    /// After a consumed comma: does the next token close the surrounding
    /// list? Used to normalise trailing commas away.
    fn comma_ends_list(&self) -> bool {
        match &self.peek_token_ref().token {
            Token::RParen | Token::RBracket | Token::RBrace | Token::SemiColon | Token::Eof => true,
            Token::Word(w) => w
                .keyword
                .map(|k| RESERVED_FOR_COLUMN_ALIAS.contains(&k))
                .unwrap_or(false),
            _ => false,
        }
    }

    fn parse_optional_alias(
        &mut self,
        reserved: &[Keyword],
    ) -> Result<Option<Ident>, ParserError> {
        if self.parse_keyword(Keyword::AS) {
            return Ok(Some(self.parse_identifier()?));
        }
        match &self.peek_token_ref().token {
            Token::Word(w) if w.keyword.map(|k| !reserved.contains(&k)).unwrap_or(true) => {
                Ok(Some(self.parse_identifier()?))
            }
            _ => Ok(None),
        }
    }

    fn parse_optional_table_alias(&mut self) -> Result<Option<TableAlias>, ParserError> {
        match self.parse_optional_alias(RESERVED_FOR_TABLE_ALIAS)? {
            Some(name) => {
                let columns = self.parse_optional_parenthesized_column_list()?;
                Ok(Some(TableAlias { name, columns }))
            }
            None => Ok(None),
        }
    }

    fn parse_literal_uint(&mut self) -> Result<u64, ParserError> {
        let token = self.next_token();
        match &token.token {
            Token::Number(s) => match s.parse::<u64>() {
                Ok(n) => Ok(n),
                Err(_) => self.error_at(
                    format!("Could not parse '{}' as an unsigned integer", s),
                    token.location,
                ),
            },
            _ => self.expected("an unsigned integer literal", token),
        }
    }

    fn parse_literal_string(&mut self) -> Result<String, ParserError> {
        let token = self.next_token();
        match token.token {
            Token::SingleQuotedString(s) => Ok(s),
            _ => self.expected("a string literal", token),
        }
    }

    // =========================================================================
    // Statement dispatch
    // =========================================================================

    /// Parse one statement. The dialect hook wins over built-in dispatch.
    pub fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        let dialect = self.dialect;
        if let Some(statement) = dialect.parse_statement(self) {
            return statement;
        }
        let token = self.next_token();
        match &token.token {
            Token::Word(w) => match w.keyword {
                Some(Keyword::SELECT) | Some(Keyword::WITH) | Some(Keyword::VALUES) => {
                    self.prev_token();
                    Ok(Statement::Query(Box::new(self.parse_query()?)))
                }
                Some(Keyword::INSERT) => self.parse_insert(),
                Some(Keyword::UPDATE) => self.parse_update(),
                Some(Keyword::DELETE) => self.parse_delete(),
                Some(Keyword::CREATE) => self.parse_create(),
                Some(Keyword::ALTER) => self.parse_alter(),
                Some(Keyword::DROP) => self.parse_drop(),
                Some(Keyword::TRUNCATE) => self.parse_truncate(),
                Some(Keyword::START) => self.parse_start_transaction(),
                Some(Keyword::BEGIN) => self.parse_begin(),
                Some(Keyword::COMMIT) => Ok(Statement::Commit {
                    chain: self.parse_commit_rollback_chain()?,
                }),
                Some(Keyword::ROLLBACK) => Ok(Statement::Rollback {
                    chain: self.parse_commit_rollback_chain()?,
                }),
                Some(Keyword::SET) => self.parse_set(),
                Some(Keyword::SHOW) => self.parse_show(),
                Some(Keyword::GRANT) => self.parse_grant(),
                Some(Keyword::REVOKE) => self.parse_revoke(),
                Some(Keyword::USE) => Ok(Statement::Use {
                    db_name: self.parse_identifier()?,
                }),
                Some(Keyword::EXPLAIN) => self.parse_explain(),
                _ => self.expected("a SQL statement", token),
            },
            Token::LParen => {
                self.prev_token();
                Ok(Statement::Query(Box::new(self.parse_query()?)))
            }
            _ => self.expected("a SQL statement", token),
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Parse a full expression.
    pub fn parse_expr(&mut self) -> Result<Expr, ParserError> {
        self.parse_subexpr(0)
    }

    /// Pratt loop: prefix, then infix while the next operator binds tighter
    /// than `precedence`.
    pub fn parse_subexpr(&mut self, precedence: u8) -> Result<Expr, ParserError> {
        let mut expr = self.parse_prefix()?;
        loop {
            let next_precedence = self.next_precedence()?;
            if next_precedence <= precedence {
                break;
            }
            expr = self.parse_infix(expr, next_precedence)?;
        }
        Ok(expr)
    }

    /// Binding power of the next token. The dialect override is merged with
    /// the built-in table by taking the maximum.
    pub fn next_precedence(&self) -> Result<u8, ParserError> {
        let built_in = self.built_in_precedence();
        match self.dialect.get_next_precedence(self) {
            Some(result) => Ok(result?.max(built_in)),
            None => Ok(built_in),
        }
    }

    fn built_in_precedence(&self) -> u8 {
        use self::precedence::*;
        match &self.peek_token_ref().token {
            Token::Word(w) => match w.keyword {
                Some(Keyword::OR) => OR,
                Some(Keyword::AND) => AND,
                Some(Keyword::IS) => IS,
                Some(Keyword::NOT) => match self.peek_keyword_at(1) {
                    // NOT IN, NOT BETWEEN, NOT LIKE, ...
                    Some(
                        Keyword::IN
                        | Keyword::BETWEEN
                        | Keyword::LIKE
                        | Keyword::ILIKE
                        | Keyword::SIMILAR,
                    ) => BETWEEN_LIKE,
                    _ => 0,
                },
                Some(
                    Keyword::IN
                    | Keyword::BETWEEN
                    | Keyword::LIKE
                    | Keyword::ILIKE
                    | Keyword::SIMILAR
                    | Keyword::COLLATE,
                ) => BETWEEN_LIKE,
                Some(Keyword::AT) => match self.peek_keyword_at(1) {
                    Some(Keyword::TIME) => BETWEEN_LIKE,
                    _ => 0,
                },
                _ => 0,
            },
            Token::Eq
            | Token::Neq
            | Token::Lt
            | Token::Gt
            | Token::LtEq
            | Token::GtEq => COMPARISON,
            Token::Pipe | Token::StringConcat | Token::DoubleAmpersand => PIPE,
            Token::Ampersand => AMPERSAND,
            Token::ShiftLeft | Token::ShiftRight => SHIFT,
            Token::Plus | Token::Minus => PLUS_MINUS,
            Token::Mul | Token::Div | Token::Mod => MUL_DIV_MOD,
            Token::Arrow
            | Token::LongArrow
            | Token::HashArrow
            | Token::HashLongArrow
            | Token::AtArrow
            | Token::ArrowAt
            | Token::QuestionPipe
            | Token::QuestionAnd => JSON_ACCESS,
            Token::DoubleColon => DOUBLE_COLON,
            Token::Caret => CARET,
            Token::LBracket => ARRAY_INDEX,
            _ => 0,
        }
    }

    /// Built-in prefix handler, behind the dialect hook.
    fn parse_prefix(&mut self) -> Result<Expr, ParserError> {
        let dialect = self.dialect;
        if let Some(prefix) = dialect.parse_prefix(self) {
            return prefix;
        }

        let token = self.next_token();
        match token.token {
            Token::Word(w) => self.parse_word_prefix(w),
            Token::Number(n) => Ok(Expr::Value(Value::Number(n))),
            Token::SingleQuotedString(s) => Ok(Expr::Value(Value::SingleQuotedString(s))),
            Token::NationalStringLiteral(s) => Ok(Expr::Value(Value::NationalStringLiteral(s))),
            Token::HexStringLiteral(s) => Ok(Expr::Value(Value::HexStringLiteral(s))),
            Token::BitStringLiteral(s) => Ok(Expr::Value(Value::BitStringLiteral(s))),
            Token::TripleQuotedString(s) => Ok(Expr::Value(Value::TripleQuotedString(s))),
            Token::Placeholder(s) => Ok(Expr::Value(Value::Placeholder(s))),
            Token::Plus => Ok(Expr::UnaryOp {
                op: UnaryOperator::Plus,
                expr: Box::new(self.parse_subexpr(precedence::UNARY_PREFIX)?),
            }),
            Token::Minus => Ok(Expr::UnaryOp {
                op: UnaryOperator::Minus,
                expr: Box::new(self.parse_subexpr(precedence::UNARY_PREFIX)?),
            }),
            Token::Tilde => Ok(Expr::UnaryOp {
                op: UnaryOperator::BitwiseNot,
                expr: Box::new(self.parse_subexpr(precedence::UNARY_PREFIX)?),
            }),
            Token::LParen => self.parse_parenthesized_prefix(),
            Token::LBracket => self.parse_array_literal(false),
            Token::LBrace => {
                if self.dialect.supports_dictionary_syntax() {
                    self.parse_dictionary()
                } else {
                    self.expected("an expression", TokenWithLocation {
                        token: Token::LBrace,
                        location: token.location,
                    })
                }
            }
            _ => self.expected("an expression", token),
        }
    }

    fn parse_word_prefix(&mut self, w: Word) -> Result<Expr, ParserError> {
        match w.keyword {
            Some(Keyword::TRUE) => return Ok(Expr::Value(Value::Boolean(true))),
            Some(Keyword::FALSE) => return Ok(Expr::Value(Value::Boolean(false))),
            Some(Keyword::NULL) => return Ok(Expr::Value(Value::Null)),
            Some(Keyword::CASE) => return self.parse_case_expr(),
            Some(Keyword::CAST) => return self.parse_cast_expr(false),
            Some(Keyword::TRY_CAST) => return self.parse_cast_expr(true),
            Some(Keyword::CONVERT) => return self.parse_convert_expr(),
            Some(Keyword::EXISTS) => return self.parse_exists_expr(false),
            Some(Keyword::EXTRACT) => return self.parse_extract_expr(),
            Some(Keyword::SUBSTRING) => return self.parse_substring_expr(),
            Some(Keyword::TRIM) => return self.parse_trim_expr(),
            Some(Keyword::POSITION) => return self.parse_position_expr(),
            Some(Keyword::INTERVAL) => return self.parse_interval_expr(),
            Some(Keyword::NOT) => {
                if self.parse_keyword(Keyword::EXISTS) {
                    return self.parse_exists_expr(true);
                }
                return Ok(Expr::UnaryOp {
                    op: UnaryOperator::Not,
                    expr: Box::new(self.parse_subexpr(precedence::UNARY_NOT)?),
                });
            }
            Some(Keyword::ARRAY) if self.peek_token_ref().token == Token::LBracket => {
                self.next_token();
                return self.parse_array_literal(true);
            }
            Some(Keyword::DATE | Keyword::TIME | Keyword::TIMESTAMP)
                if matches!(self.peek_token_ref().token, Token::SingleQuotedString(_)) =>
            {
                let data_type = match w.keyword {
                    Some(Keyword::DATE) => DataType::Date,
                    Some(Keyword::TIME) => DataType::Time {
                        with_time_zone: false,
                    },
                    _ => DataType::Timestamp {
                        with_time_zone: false,
                    },
                };
                let value = self.parse_literal_string()?;
                return Ok(Expr::TypedString { data_type, value });
            }
            _ => {}
        }

        // lambda parameter: `x -> x + 1`
        if self.dialect.supports_lambda_functions()
            && self.peek_token_ref().token == Token::Arrow
        {
            self.next_token();
            return Ok(Expr::Lambda(LambdaFunction {
                params: vec![word_to_ident(w)],
                body: Box::new(self.parse_expr()?),
            }));
        }

        // plain word: identifier chain, wildcard, or function call
        let mut id_parts = vec![word_to_ident(w)];
        while self.consume_token(&Token::Period) {
            let next = self.next_token();
            match next.token {
                Token::Word(w) => id_parts.push(word_to_ident(w)),
                Token::Mul => return Ok(Expr::QualifiedWildcard(ObjectName(id_parts))),
                _ => return self.expected("an identifier or '*' after '.'", next),
            }
        }
        if self.peek_token_ref().token == Token::LParen {
            self.parse_function(ObjectName(id_parts))
        } else if id_parts.len() == 1 {
            Ok(Expr::Identifier(id_parts.pop().expect("one part")))
        } else {
            Ok(Expr::CompoundIdentifier(id_parts))
        }
    }

    fn parse_parenthesized_prefix(&mut self) -> Result<Expr, ParserError> {
        // subquery or parenthesized expression / tuple
        if matches!(
            self.peek_keyword(),
            Some(Keyword::SELECT | Keyword::WITH | Keyword::VALUES)
        ) {
            let query = self.parse_query()?;
            self.expect_token(&Token::RParen)?;
            return Ok(Expr::Subquery(Box::new(query)));
        }
        let exprs = self.parse_comma_separated(Parser::parse_expr)?;
        self.expect_token(&Token::RParen)?;

        // `(x, y) -> body` lambda parameter lists
        if self.dialect.supports_lambda_functions()
            && self.peek_token_ref().token == Token::Arrow
        {
            let mut params = Vec::with_capacity(exprs.len());
            for expr in &exprs {
                match expr {
                    Expr::Identifier(ident) => params.push(ident.clone()),
                    _ => {
                        let found = self.peek_token();
                        return self.expected("an identifier list before '->'", found);
                    }
                }
            }
            self.next_token();
            return Ok(Expr::Lambda(LambdaFunction {
                params,
                body: Box::new(self.parse_expr()?),
            }));
        }

        let mut exprs = exprs;
        if exprs.len() == 1 {
            Ok(Expr::Nested(Box::new(exprs.pop().expect("one expr"))))
        } else {
            Ok(Expr::Tuple(exprs))
        }
    }

    /// Built-in infix handler, behind the dialect hook. `precedence` is the
    /// binding power of the operator about to be consumed.
    fn parse_infix(&mut self, expr: Expr, precedence: u8) -> Result<Expr, ParserError> {
        let dialect = self.dialect;
        if let Some(infix) = dialect.parse_infix(self, &expr, precedence) {
            return infix;
        }

        let token = self.next_token();
        match &token.token {
            Token::Plus => self.parse_binary(expr, BinaryOperator::Plus, precedence, false),
            Token::Minus => self.parse_binary(expr, BinaryOperator::Minus, precedence, false),
            Token::Mul => self.parse_binary(expr, BinaryOperator::Multiply, precedence, false),
            Token::Div => self.parse_binary(expr, BinaryOperator::Divide, precedence, false),
            Token::Mod => self.parse_binary(expr, BinaryOperator::Modulo, precedence, false),
            Token::Caret => self.parse_binary(expr, BinaryOperator::Pow, precedence, true),
            Token::StringConcat => {
                self.parse_binary(expr, BinaryOperator::StringConcat, precedence, false)
            }
            Token::Eq => self.parse_binary(expr, BinaryOperator::Eq, precedence, false),
            Token::Neq => self.parse_binary(expr, BinaryOperator::NotEq, precedence, false),
            Token::Gt => self.parse_binary(expr, BinaryOperator::Gt, precedence, false),
            Token::Lt => self.parse_binary(expr, BinaryOperator::Lt, precedence, false),
            Token::GtEq => self.parse_binary(expr, BinaryOperator::GtEq, precedence, false),
            Token::LtEq => self.parse_binary(expr, BinaryOperator::LtEq, precedence, false),
            Token::Pipe => self.parse_binary(expr, BinaryOperator::BitwiseOr, precedence, false),
            Token::Ampersand => {
                self.parse_binary(expr, BinaryOperator::BitwiseAnd, precedence, false)
            }
            Token::ShiftLeft => {
                self.parse_binary(expr, BinaryOperator::ShiftLeft, precedence, false)
            }
            Token::ShiftRight => {
                self.parse_binary(expr, BinaryOperator::ShiftRight, precedence, false)
            }
            Token::DoubleAmpersand => {
                self.parse_binary(expr, BinaryOperator::Overlap, precedence, false)
            }
            Token::Arrow => self.parse_json_access(expr, JsonOperator::Arrow, precedence),
            Token::LongArrow => self.parse_json_access(expr, JsonOperator::LongArrow, precedence),
            Token::HashArrow => self.parse_json_access(expr, JsonOperator::HashArrow, precedence),
            Token::HashLongArrow => {
                self.parse_json_access(expr, JsonOperator::HashLongArrow, precedence)
            }
            Token::AtArrow => self.parse_json_access(expr, JsonOperator::AtArrow, precedence),
            Token::ArrowAt => self.parse_json_access(expr, JsonOperator::ArrowAt, precedence),
            Token::QuestionPipe => {
                self.parse_json_access(expr, JsonOperator::QuestionPipe, precedence)
            }
            Token::QuestionAnd => {
                self.parse_json_access(expr, JsonOperator::QuestionAnd, precedence)
            }
            Token::DoubleColon => Ok(Expr::Cast {
                expr: Box::new(expr),
                data_type: self.parse_data_type()?,
            }),
            Token::LBracket => {
                let index = self.parse_expr()?;
                self.expect_token(&Token::RBracket)?;
                Ok(Expr::Subscript {
                    expr: Box::new(expr),
                    index: Box::new(index),
                })
            }
            Token::Word(w) => match w.keyword {
                Some(Keyword::AND) => self.parse_binary(expr, BinaryOperator::And, precedence, false),
                Some(Keyword::OR) => self.parse_binary(expr, BinaryOperator::Or, precedence, false),
                Some(Keyword::IS) => self.parse_is(expr),
                Some(Keyword::NOT) => {
                    if self.parse_keyword(Keyword::IN) {
                        self.parse_in(expr, true)
                    } else if self.parse_keyword(Keyword::BETWEEN) {
                        self.parse_between(expr, true)
                    } else if self.parse_keyword(Keyword::LIKE) {
                        self.parse_pattern_match(expr, true, PatternMatchKind::Like)
                    } else if self.parse_keyword(Keyword::ILIKE) {
                        self.parse_pattern_match(expr, true, PatternMatchKind::ILike)
                    } else if self.parse_keywords(&[Keyword::SIMILAR, Keyword::TO]) {
                        self.parse_pattern_match(expr, true, PatternMatchKind::SimilarTo)
                    } else {
                        let found = self.peek_token();
                        self.expected("IN, BETWEEN, LIKE, ILIKE or SIMILAR TO after NOT", found)
                    }
                }
                Some(Keyword::IN) => self.parse_in(expr, false),
                Some(Keyword::BETWEEN) => self.parse_between(expr, false),
                Some(Keyword::LIKE) => {
                    self.parse_pattern_match(expr, false, PatternMatchKind::Like)
                }
                Some(Keyword::ILIKE) => {
                    self.parse_pattern_match(expr, false, PatternMatchKind::ILike)
                }
                Some(Keyword::SIMILAR) => {
                    self.expect_keyword(Keyword::TO)?;
                    self.parse_pattern_match(expr, false, PatternMatchKind::SimilarTo)
                }
                Some(Keyword::COLLATE) => Ok(Expr::Collate {
                    expr: Box::new(expr),
                    collation: self.parse_object_name()?,
                }),
                Some(Keyword::AT) => {
                    self.expect_keyword(Keyword::TIME)?;
                    self.expect_keyword(Keyword::ZONE)?;
                    Ok(Expr::AtTimeZone {
                        timestamp: Box::new(expr),
                        time_zone: self.parse_literal_string()?,
                    })
                }
                _ => self.expected("an infix operator", token),
            },
            _ => self.expected("an infix operator", token),
        }
    }

    /// Finish a binary operator whose token is already consumed.
    /// Right-associative operators recurse with `precedence - 1`.
    fn parse_binary(
        &mut self,
        left: Expr,
        op: BinaryOperator,
        precedence: u8,
        right_assoc: bool,
    ) -> Result<Expr, ParserError> {
        let next = if right_assoc { precedence - 1 } else { precedence };
        let right = self.parse_subexpr(next)?;
        Ok(Expr::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    fn parse_json_access(
        &mut self,
        left: Expr,
        operator: JsonOperator,
        precedence: u8,
    ) -> Result<Expr, ParserError> {
        Ok(Expr::JsonAccess {
            left: Box::new(left),
            operator,
            right: Box::new(self.parse_subexpr(precedence)?),
        })
    }

    /// `IS [NOT] NULL | TRUE | FALSE | DISTINCT FROM ...`, disambiguated by
    /// bounded look-ahead.
    fn parse_is(&mut self, expr: Expr) -> Result<Expr, ParserError> {
        if self.parse_keyword(Keyword::NULL) {
            Ok(Expr::IsNull(Box::new(expr)))
        } else if self.parse_keywords(&[Keyword::NOT, Keyword::NULL]) {
            Ok(Expr::IsNotNull(Box::new(expr)))
        } else if self.parse_keyword(Keyword::TRUE) {
            Ok(Expr::IsTrue(Box::new(expr)))
        } else if self.parse_keywords(&[Keyword::NOT, Keyword::TRUE]) {
            Ok(Expr::IsNotTrue(Box::new(expr)))
        } else if self.parse_keyword(Keyword::FALSE) {
            Ok(Expr::IsFalse(Box::new(expr)))
        } else if self.parse_keywords(&[Keyword::NOT, Keyword::FALSE]) {
            Ok(Expr::IsNotFalse(Box::new(expr)))
        } else if self.parse_keywords(&[Keyword::DISTINCT, Keyword::FROM]) {
            let other = self.parse_subexpr(precedence::IS)?;
            Ok(Expr::IsDistinctFrom(Box::new(expr), Box::new(other)))
        } else if self.parse_keywords(&[Keyword::NOT, Keyword::DISTINCT, Keyword::FROM]) {
            let other = self.parse_subexpr(precedence::IS)?;
            Ok(Expr::IsNotDistinctFrom(Box::new(expr), Box::new(other)))
        } else {
            let found = self.peek_token();
            self.expected("NULL, TRUE, FALSE or DISTINCT FROM after IS", found)
        }
    }

    fn parse_in(&mut self, expr: Expr, negated: bool) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LParen)?;
        if matches!(
            self.peek_keyword(),
            Some(Keyword::SELECT | Keyword::WITH)
        ) {
            let subquery = self.parse_query()?;
            self.expect_token(&Token::RParen)?;
            return Ok(Expr::InSubquery {
                expr: Box::new(expr),
                subquery: Box::new(subquery),
                negated,
            });
        }
        if self.peek_token_ref().token == Token::RParen {
            if !self.dialect.supports_in_empty_list() {
                let found = self.peek_token();
                return self.expected("an expression in the IN list", found);
            }
            self.next_token();
            return Ok(Expr::InList {
                expr: Box::new(expr),
                list: Vec::new(),
                negated,
            });
        }
        let list = self.parse_comma_separated(Parser::parse_expr)?;
        self.expect_token(&Token::RParen)?;
        Ok(Expr::InList {
            expr: Box::new(expr),
            list,
            negated,
        })
    }

    fn parse_between(&mut self, expr: Expr, negated: bool) -> Result<Expr, ParserError> {
        // the AND in BETWEEN .. AND .. is not the boolean operator
        let low = self.parse_subexpr(precedence::BETWEEN_LIKE)?;
        self.expect_keyword(Keyword::AND)?;
        let high = self.parse_subexpr(precedence::BETWEEN_LIKE)?;
        Ok(Expr::Between {
            expr: Box::new(expr),
            negated,
            low: Box::new(low),
            high: Box::new(high),
        })
    }

    fn parse_pattern_match(
        &mut self,
        expr: Expr,
        negated: bool,
        kind: PatternMatchKind,
    ) -> Result<Expr, ParserError> {
        let pattern = Box::new(self.parse_subexpr(precedence::BETWEEN_LIKE)?);
        let escape_char = if self.parse_keyword(Keyword::ESCAPE) {
            let token = self.next_token();
            match &token.token {
                Token::SingleQuotedString(s) if s.chars().count() == 1 => {
                    Some(s.chars().next().expect("one char"))
                }
                _ => return self.expected("a single-character string after ESCAPE", token),
            }
        } else {
            None
        };
        let expr = Box::new(expr);
        Ok(match kind {
            PatternMatchKind::Like => Expr::Like {
                negated,
                expr,
                pattern,
                escape_char,
            },
            PatternMatchKind::ILike => Expr::ILike {
                negated,
                expr,
                pattern,
                escape_char,
            },
            PatternMatchKind::SimilarTo => Expr::SimilarTo {
                negated,
                expr,
                pattern,
                escape_char,
            },
        })
    }

    fn parse_case_expr(&mut self) -> Result<Expr, ParserError> {
        let operand = if self.peek_keyword() == Some(Keyword::WHEN) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        let mut conditions = Vec::new();
        let mut results = Vec::new();
        self.expect_keyword(Keyword::WHEN)?;
        loop {
            conditions.push(self.parse_expr()?);
            self.expect_keyword(Keyword::THEN)?;
            results.push(self.parse_expr()?);
            if !self.parse_keyword(Keyword::WHEN) {
                break;
            }
        }
        let else_result = if self.parse_keyword(Keyword::ELSE) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_keyword(Keyword::END)?;
        Ok(Expr::Case {
            operand,
            conditions,
            results,
            else_result,
        })
    }

    fn parse_cast_expr(&mut self, try_cast: bool) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LParen)?;
        let expr = Box::new(self.parse_expr()?);
        self.expect_keyword(Keyword::AS)?;
        let data_type = self.parse_data_type()?;
        self.expect_token(&Token::RParen)?;
        Ok(if try_cast {
            Expr::TryCast { expr, data_type }
        } else {
            Expr::Cast { expr, data_type }
        })
    }

    /// `CONVERT` canonicalises to a cast; the dialect flag picks the
    /// argument order.
    fn parse_convert_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LParen)?;
        let (expr, data_type) = if self.dialect.convert_type_before_value() {
            let data_type = self.parse_data_type()?;
            self.expect_token(&Token::Comma)?;
            (Box::new(self.parse_expr()?), data_type)
        } else {
            let expr = Box::new(self.parse_expr()?);
            self.expect_token(&Token::Comma)?;
            (expr, self.parse_data_type()?)
        };
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Cast { expr, data_type })
    }

    fn parse_exists_expr(&mut self, negated: bool) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LParen)?;
        let subquery = Box::new(self.parse_query()?);
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Exists { subquery, negated })
    }

    fn parse_extract_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LParen)?;
        let field = self.parse_date_time_field()?;
        self.expect_keyword(Keyword::FROM)?;
        let expr = Box::new(self.parse_expr()?);
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Extract { field, expr })
    }

    fn parse_date_time_field(&mut self) -> Result<DateTimeField, ParserError> {
        let keyword = self.expect_one_of_keywords(&[
            Keyword::YEAR,
            Keyword::MONTH,
            Keyword::WEEK,
            Keyword::DAY,
            Keyword::HOUR,
            Keyword::MINUTE,
            Keyword::SECOND,
        ])?;
        Ok(match keyword {
            Keyword::YEAR => DateTimeField::Year,
            Keyword::MONTH => DateTimeField::Month,
            Keyword::WEEK => DateTimeField::Week,
            Keyword::DAY => DateTimeField::Day,
            Keyword::HOUR => DateTimeField::Hour,
            Keyword::MINUTE => DateTimeField::Minute,
            _ => DateTimeField::Second,
        })
    }

    fn parse_substring_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LParen)?;
        let expr = Box::new(self.parse_expr()?);
        let mut substring_from = None;
        let mut substring_for = None;
        if self.consume_token(&Token::Comma) {
            substring_from = Some(Box::new(self.parse_expr()?));
            if self.consume_token(&Token::Comma) {
                substring_for = Some(Box::new(self.parse_expr()?));
            }
        } else if self.dialect.supports_substring_from_for_expression() {
            if self.parse_keyword(Keyword::FROM) {
                substring_from = Some(Box::new(self.parse_expr()?));
            }
            if self.parse_keyword(Keyword::FOR) {
                substring_for = Some(Box::new(self.parse_expr()?));
            }
        }
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Substring {
            expr,
            substring_from,
            substring_for,
        })
    }

    fn parse_trim_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LParen)?;
        let trim_where = self
            .parse_one_of_keywords(&[Keyword::BOTH, Keyword::LEADING, Keyword::TRAILING])
            .map(|keyword| match keyword {
                Keyword::BOTH => TrimWhereField::Both,
                Keyword::LEADING => TrimWhereField::Leading,
                _ => TrimWhereField::Trailing,
            });
        let mut expr = Box::new(self.parse_expr()?);
        let mut trim_what = None;
        if self.parse_keyword(Keyword::FROM) {
            trim_what = Some(expr);
            expr = Box::new(self.parse_expr()?);
        }
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Trim {
            expr,
            trim_where,
            trim_what,
        })
    }

    fn parse_position_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LParen)?;
        // stop below IN so the keyword is left for us
        let expr = Box::new(self.parse_subexpr(precedence::BETWEEN_LIKE)?);
        self.expect_keyword(Keyword::IN)?;
        let r#in = Box::new(self.parse_expr()?);
        self.expect_token(&Token::RParen)?;
        Ok(Expr::Position { expr, r#in })
    }

    fn parse_interval_expr(&mut self) -> Result<Expr, ParserError> {
        let value = Box::new(self.parse_subexpr(precedence::UNARY_PREFIX)?);
        let leading_field = match self.peek_keyword() {
            Some(
                Keyword::YEAR
                | Keyword::MONTH
                | Keyword::WEEK
                | Keyword::DAY
                | Keyword::HOUR
                | Keyword::MINUTE
                | Keyword::SECOND,
            ) => Some(self.parse_date_time_field()?),
            _ => None,
        };
        Ok(Expr::Interval {
            value,
            leading_field,
        })
    }

    /// Array literal; the opening bracket is already consumed.
    fn parse_array_literal(&mut self, named: bool) -> Result<Expr, ParserError> {
        if self.consume_token(&Token::RBracket) {
            return Ok(Expr::Array {
                elem: Vec::new(),
                named,
            });
        }
        let elem = self.parse_comma_separated(Parser::parse_expr)?;
        self.expect_token(&Token::RBracket)?;
        Ok(Expr::Array { elem, named })
    }

    /// Dictionary literal; the opening brace is already consumed.
    fn parse_dictionary(&mut self) -> Result<Expr, ParserError> {
        if self.consume_token(&Token::RBrace) {
            return Ok(Expr::Dictionary(Vec::new()));
        }
        let fields = self.parse_comma_separated(|parser| {
            let key = Value::SingleQuotedString(parser.parse_literal_string()?);
            parser.expect_token(&Token::Colon)?;
            let value = Box::new(parser.parse_expr()?);
            Ok(DictionaryField { key, value })
        })?;
        self.expect_token(&Token::RBrace)?;
        Ok(Expr::Dictionary(fields))
    }

    // =========================================================================
    // Function calls
    // =========================================================================

    fn parse_function(&mut self, name: ObjectName) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LParen)?;
        let distinct = self.parse_keyword(Keyword::DISTINCT);
        let args = if self.peek_token_ref().token == Token::RParen {
            Vec::new()
        } else {
            self.parse_comma_separated(Parser::parse_function_arg)?
        };
        let null_treatment = if self.dialect.supports_window_function_null_treatment_arg() {
            self.parse_null_treatment()?
        } else {
            None
        };
        self.expect_token(&Token::RParen)?;

        let filter = if self.dialect.supports_filter_during_aggregation()
            && self.parse_keyword(Keyword::FILTER)
        {
            self.expect_token(&Token::LParen)?;
            self.expect_keyword(Keyword::WHERE)?;
            let filter = Box::new(self.parse_expr()?);
            self.expect_token(&Token::RParen)?;
            Some(filter)
        } else {
            None
        };

        let over = if self.parse_keyword(Keyword::OVER) {
            if self.consume_token(&Token::LParen) {
                let spec = self.parse_window_spec()?;
                self.expect_token(&Token::RParen)?;
                Some(WindowType::WindowSpec(spec))
            } else if self.dialect.supports_window_clause_named_window_reference() {
                Some(WindowType::NamedWindow(self.parse_identifier()?))
            } else {
                let found = self.peek_token();
                return self.expected("( after OVER", found);
            }
        } else {
            None
        };

        Ok(Expr::Function(Function {
            name,
            args,
            distinct,
            null_treatment,
            filter,
            over,
        }))
    }

    fn parse_null_treatment(&mut self) -> Result<Option<NullTreatment>, ParserError> {
        if self.parse_keywords(&[Keyword::IGNORE, Keyword::NULLS]) {
            Ok(Some(NullTreatment::IgnoreNulls))
        } else if self.parse_keywords(&[Keyword::RESPECT, Keyword::NULLS]) {
            Ok(Some(NullTreatment::RespectNulls))
        } else {
            Ok(None)
        }
    }

    fn parse_function_arg(&mut self) -> Result<FunctionArg, ParserError> {
        // named arguments: `name => value`, or `name = value` where enabled
        if matches!(self.peek_token_ref().token, Token::Word(_)) {
            let operator = match self.peek_nth_token(1).token {
                Token::RArrow => Some(FunctionArgOperator::RightArrow),
                Token::Eq if self.dialect.supports_named_function_args_with_eq_operator() => {
                    Some(FunctionArgOperator::Equals)
                }
                _ => None,
            };
            if let Some(operator) = operator {
                let name = self.parse_identifier()?;
                self.next_token();
                return Ok(FunctionArg::Named {
                    name,
                    arg: self.parse_expr()?,
                    operator,
                });
            }
        }
        if self.peek_token_ref().token == Token::Mul
            && matches!(
                self.peek_nth_token(1).token,
                Token::RParen | Token::Comma
            )
        {
            self.next_token();
            return Ok(FunctionArg::Unnamed(Expr::Wildcard));
        }
        Ok(FunctionArg::Unnamed(self.parse_expr()?))
    }

    fn parse_window_spec(&mut self) -> Result<WindowSpec, ParserError> {
        let partition_by = if self.parse_keywords(&[Keyword::PARTITION, Keyword::BY]) {
            self.parse_comma_separated(Parser::parse_expr)?
        } else {
            Vec::new()
        };
        let order_by = if self.parse_keywords(&[Keyword::ORDER, Keyword::BY]) {
            self.parse_comma_separated(Parser::parse_order_by_expr)?
        } else {
            Vec::new()
        };
        let window_frame = match self.parse_one_of_keywords(&[
            Keyword::ROWS,
            Keyword::RANGE,
            Keyword::GROUPS,
        ]) {
            Some(keyword) => {
                let units = match keyword {
                    Keyword::ROWS => WindowFrameUnits::Rows,
                    Keyword::RANGE => WindowFrameUnits::Range,
                    _ => WindowFrameUnits::Groups,
                };
                Some(self.parse_window_frame(units)?)
            }
            None => None,
        };
        Ok(WindowSpec {
            partition_by,
            order_by,
            window_frame,
        })
    }

    fn parse_window_frame(&mut self, units: WindowFrameUnits) -> Result<WindowFrame, ParserError> {
        let (start_bound, end_bound) = if self.parse_keyword(Keyword::BETWEEN) {
            let start = self.parse_window_frame_bound()?;
            self.expect_keyword(Keyword::AND)?;
            let end = self.parse_window_frame_bound()?;
            (start, Some(end))
        } else {
            (self.parse_window_frame_bound()?, None)
        };
        Ok(WindowFrame {
            units,
            start_bound,
            end_bound,
        })
    }

    fn parse_window_frame_bound(&mut self) -> Result<WindowFrameBound, ParserError> {
        if self.parse_keywords(&[Keyword::CURRENT, Keyword::ROW]) {
            return Ok(WindowFrameBound::CurrentRow);
        }
        let offset = if self.parse_keyword(Keyword::UNBOUNDED) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        if self.parse_keyword(Keyword::PRECEDING) {
            Ok(WindowFrameBound::Preceding(offset))
        } else if self.parse_keyword(Keyword::FOLLOWING) {
            Ok(WindowFrameBound::Following(offset))
        } else {
            let found = self.peek_token();
            self.expected("PRECEDING or FOLLOWING", found)
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Parse a query: optional WITH, a body, and the trailing clauses.
    pub fn parse_query(&mut self) -> Result<Query, ParserError> {
        let with = if self.parse_keyword(Keyword::WITH) {
            Some(With {
                recursive: self.parse_keyword(Keyword::RECURSIVE),
                cte_tables: self.parse_comma_separated(Parser::parse_cte)?,
            })
        } else {
            None
        };

        let body = Box::new(self.parse_query_body(0)?);

        let order_by = if self.parse_keywords(&[Keyword::ORDER, Keyword::BY]) {
            self.parse_comma_separated(Parser::parse_order_by_expr)?
        } else {
            Vec::new()
        };
        let limit = if self.parse_keyword(Keyword::LIMIT) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let offset = if self.parse_keyword(Keyword::OFFSET) {
            Some(self.parse_offset()?)
        } else {
            None
        };
        let fetch = if self.parse_keyword(Keyword::FETCH) {
            Some(self.parse_fetch()?)
        } else {
            None
        };
        let mut locks = Vec::new();
        while self.parse_keyword(Keyword::FOR) {
            locks.push(self.parse_lock()?);
        }

        Ok(Query {
            with,
            body,
            order_by,
            limit,
            offset,
            fetch,
            locks,
        })
    }

    fn parse_cte(&mut self) -> Result<Cte, ParserError> {
        let name = self.parse_identifier()?;
        let columns = self.parse_optional_parenthesized_column_list()?;
        self.expect_keyword(Keyword::AS)?;
        self.expect_token(&Token::LParen)?;
        let query = Box::new(self.parse_query()?);
        self.expect_token(&Token::RParen)?;
        Ok(Cte {
            alias: TableAlias { name, columns },
            query,
        })
    }

    /// Parse a query body and fold set operations left-associatively;
    /// INTERSECT binds tighter than UNION and EXCEPT.
    fn parse_query_body(&mut self, precedence: u8) -> Result<SetExpr, ParserError> {
        let mut body = if self.parse_keyword(Keyword::SELECT) {
            SetExpr::Select(Box::new(self.parse_select()?))
        } else if self.consume_token(&Token::LParen) {
            let query = Box::new(self.parse_query()?);
            self.expect_token(&Token::RParen)?;
            SetExpr::Query(query)
        } else if self.parse_keyword(Keyword::VALUES) {
            SetExpr::Values(self.parse_values()?)
        } else {
            let found = self.peek_token();
            return self.expected("SELECT, VALUES, or a subquery in the query body", found);
        };

        loop {
            let (op, next_precedence) = match self.peek_keyword() {
                Some(Keyword::UNION) => (SetOperator::Union, 10),
                Some(Keyword::EXCEPT) => (SetOperator::Except, 10),
                Some(Keyword::INTERSECT) => (SetOperator::Intersect, 20),
                _ => break,
            };
            if next_precedence <= precedence {
                break;
            }
            self.next_token();
            let set_quantifier = if self.parse_keyword(Keyword::ALL) {
                SetQuantifier::All
            } else if self.parse_keyword(Keyword::DISTINCT) {
                SetQuantifier::Distinct
            } else {
                SetQuantifier::None
            };
            body = SetExpr::SetOperation {
                op,
                set_quantifier,
                left: Box::new(body),
                right: Box::new(self.parse_query_body(next_precedence)?),
            };
        }
        Ok(body)
    }

    fn parse_select(&mut self) -> Result<Select, ParserError> {
        let distinct = self.parse_all_or_distinct()?;
        let top = if self.parse_keyword(Keyword::TOP) {
            Some(self.parse_top()?)
        } else {
            None
        };

        let allow_trailing = self.dialect.supports_projection_trailing_commas();
        let projection =
            self.parse_comma_separated_with_trailing(allow_trailing, Parser::parse_select_item)?;

        let from = if self.parse_keyword(Keyword::FROM) {
            self.parse_comma_separated(Parser::parse_table_and_joins)?
        } else {
            Vec::new()
        };
        let selection = if self.parse_keyword(Keyword::WHERE) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let connect_by = if self.dialect.supports_connect_by() {
            self.parse_optional_connect_by()?
        } else {
            None
        };

        let group_by = if self.parse_keywords(&[Keyword::GROUP, Keyword::BY]) {
            self.parse_comma_separated(Parser::parse_group_by_expr)?
        } else {
            Vec::new()
        };
        let having = if self.parse_keyword(Keyword::HAVING) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let named_windows = if self.parse_keyword(Keyword::WINDOW) {
            self.parse_comma_separated(|parser| {
                let name = parser.parse_identifier()?;
                parser.expect_keyword(Keyword::AS)?;
                parser.expect_token(&Token::LParen)?;
                let window_spec = parser.parse_window_spec()?;
                parser.expect_token(&Token::RParen)?;
                Ok(NamedWindowDef { name, window_spec })
            })?
        } else {
            Vec::new()
        };

        Ok(Select {
            distinct,
            top,
            projection,
            from,
            selection,
            group_by,
            having,
            named_windows,
            connect_by,
        })
    }

    fn parse_all_or_distinct(&mut self) -> Result<Option<Distinct>, ParserError> {
        let all = self.parse_keyword(Keyword::ALL);
        if self.parse_keyword(Keyword::DISTINCT) {
            if all {
                let found = self.peek_token();
                return self.expected("either ALL or DISTINCT, not both", found);
            }
            if self.parse_keyword(Keyword::ON) {
                self.expect_token(&Token::LParen)?;
                let exprs = self.parse_comma_separated(Parser::parse_expr)?;
                self.expect_token(&Token::RParen)?;
                return Ok(Some(Distinct::On(exprs)));
            }
            return Ok(Some(Distinct::Distinct));
        }
        Ok(None)
    }

    fn parse_top(&mut self) -> Result<Top, ParserError> {
        let quantity = if self.consume_token(&Token::LParen) {
            let quantity = self.parse_expr()?;
            self.expect_token(&Token::RParen)?;
            Some(quantity)
        } else {
            Some(Expr::Value(Value::Number(
                self.parse_literal_uint()?.to_string(),
            )))
        };
        Ok(Top {
            quantity,
            percent: self.parse_keyword(Keyword::PERCENT),
            with_ties: self.parse_keywords(&[Keyword::WITH, Keyword::TIES]),
        })
    }

    fn parse_select_item(&mut self) -> Result<SelectItem, ParserError> {
        if self.consume_token(&Token::Mul) {
            return Ok(SelectItem::Wildcard(self.parse_wildcard_options()?));
        }
        match self.parse_expr()? {
            Expr::QualifiedWildcard(prefix) => Ok(SelectItem::QualifiedWildcard(
                prefix,
                self.parse_wildcard_options()?,
            )),
            expr => match self.parse_optional_alias(RESERVED_FOR_COLUMN_ALIAS)? {
                Some(alias) => Ok(SelectItem::ExprWithAlias { expr, alias }),
                None => Ok(SelectItem::UnnamedExpr(expr)),
            },
        }
    }

    fn parse_wildcard_options(&mut self) -> Result<WildcardOptions, ParserError> {
        let except = if self.dialect.supports_select_wildcard_except()
            && self.parse_keyword(Keyword::EXCEPT)
        {
            Some(self.parse_parenthesized_column_list()?)
        } else {
            None
        };
        Ok(WildcardOptions { except })
    }

    fn parse_group_by_expr(&mut self) -> Result<Expr, ParserError> {
        if !self.dialect.supports_group_by_expression() {
            return self.parse_expr();
        }
        if self.parse_keyword(Keyword::ROLLUP) {
            Ok(Expr::Rollup(self.parse_grouping_sets(false)?))
        } else if self.parse_keyword(Keyword::CUBE) {
            Ok(Expr::Cube(self.parse_grouping_sets(false)?))
        } else if self.parse_keywords(&[Keyword::GROUPING, Keyword::SETS]) {
            Ok(Expr::GroupingSets(self.parse_grouping_sets(true)?))
        } else {
            self.parse_expr()
        }
    }

    /// The parenthesized set list of ROLLUP / CUBE / GROUPING SETS. With
    /// `sets_required`, every element must itself be parenthesized (and may
    /// be empty).
    fn parse_grouping_sets(&mut self, sets_required: bool) -> Result<Vec<Vec<Expr>>, ParserError> {
        self.expect_token(&Token::LParen)?;
        let sets = self.parse_comma_separated(|parser| {
            if parser.consume_token(&Token::LParen) {
                if parser.consume_token(&Token::RParen) {
                    return Ok(Vec::new());
                }
                let exprs = parser.parse_comma_separated(Parser::parse_expr)?;
                parser.expect_token(&Token::RParen)?;
                Ok(exprs)
            } else if sets_required {
                let found = parser.peek_token();
                parser.expected("a parenthesized grouping set", found)
            } else {
                Ok(vec![parser.parse_expr()?])
            }
        })?;
        self.expect_token(&Token::RParen)?;
        Ok(sets)
    }

    fn parse_optional_connect_by(&mut self) -> Result<Option<ConnectBy>, ParserError> {
        if self.parse_keywords(&[Keyword::START, Keyword::WITH]) {
            let start_with = Some(self.parse_expr()?);
            self.expect_keyword(Keyword::CONNECT)?;
            self.expect_keyword(Keyword::BY)?;
            let connect_by = self.parse_comma_separated(Parser::parse_expr)?;
            Ok(Some(ConnectBy {
                start_with,
                connect_by,
            }))
        } else if self.parse_keywords(&[Keyword::CONNECT, Keyword::BY]) {
            let connect_by = self.parse_comma_separated(Parser::parse_expr)?;
            Ok(Some(ConnectBy {
                start_with: None,
                connect_by,
            }))
        } else {
            Ok(None)
        }
    }

    fn parse_table_and_joins(&mut self) -> Result<TableWithJoins, ParserError> {
        let relation = self.parse_table_factor()?;
        let mut joins = Vec::new();
        loop {
            let join = if self.parse_keyword(Keyword::CROSS) {
                self.expect_keyword(Keyword::JOIN)?;
                Join {
                    relation: self.parse_table_factor()?,
                    join_operator: JoinOperator::CrossJoin,
                }
            } else {
                let natural = self.parse_keyword(Keyword::NATURAL);
                let operator = if self.parse_keyword(Keyword::JOIN)
                    || self.parse_keywords(&[Keyword::INNER, Keyword::JOIN])
                {
                    JoinOperator::Inner as fn(JoinConstraint) -> JoinOperator
                } else if self.parse_keyword(Keyword::LEFT) {
                    self.parse_keyword(Keyword::OUTER);
                    self.expect_keyword(Keyword::JOIN)?;
                    JoinOperator::LeftOuter
                } else if self.parse_keyword(Keyword::RIGHT) {
                    self.parse_keyword(Keyword::OUTER);
                    self.expect_keyword(Keyword::JOIN)?;
                    JoinOperator::RightOuter
                } else if self.parse_keyword(Keyword::FULL) {
                    self.parse_keyword(Keyword::OUTER);
                    self.expect_keyword(Keyword::JOIN)?;
                    JoinOperator::FullOuter
                } else if natural {
                    let found = self.peek_token();
                    return self.expected("a join type after NATURAL", found);
                } else {
                    break;
                };
                let relation = self.parse_table_factor()?;
                let constraint = if natural {
                    JoinConstraint::Natural
                } else {
                    self.parse_join_constraint()?
                };
                Join {
                    relation,
                    join_operator: operator(constraint),
                }
            };
            joins.push(join);
        }
        Ok(TableWithJoins { relation, joins })
    }

    fn parse_join_constraint(&mut self) -> Result<JoinConstraint, ParserError> {
        if self.parse_keyword(Keyword::ON) {
            Ok(JoinConstraint::On(self.parse_expr()?))
        } else if self.parse_keyword(Keyword::USING) {
            Ok(JoinConstraint::Using(
                self.parse_parenthesized_column_list()?,
            ))
        } else {
            Ok(JoinConstraint::None)
        }
    }

    fn parse_table_factor(&mut self) -> Result<TableFactor, ParserError> {
        if self.parse_keyword(Keyword::LATERAL) {
            self.expect_token(&Token::LParen)?;
            let subquery = Box::new(self.parse_query()?);
            self.expect_token(&Token::RParen)?;
            let alias = self.parse_optional_table_alias()?;
            return Ok(TableFactor::Derived {
                lateral: true,
                subquery,
                alias,
            });
        }
        if self.consume_token(&Token::LParen) {
            if matches!(
                self.peek_keyword(),
                Some(Keyword::SELECT | Keyword::WITH | Keyword::VALUES)
            ) {
                let subquery = Box::new(self.parse_query()?);
                self.expect_token(&Token::RParen)?;
                let alias = self.parse_optional_table_alias()?;
                return Ok(TableFactor::Derived {
                    lateral: false,
                    subquery,
                    alias,
                });
            }
            let table_with_joins = Box::new(self.parse_table_and_joins()?);
            self.expect_token(&Token::RParen)?;
            let alias = self.parse_optional_table_alias()?;
            return Ok(TableFactor::NestedJoin {
                table_with_joins,
                alias,
            });
        }
        let name = self.parse_object_name()?;
        let alias = self.parse_optional_table_alias()?;
        Ok(TableFactor::Table { name, alias })
    }

    fn parse_order_by_expr(&mut self) -> Result<OrderByExpr, ParserError> {
        let expr = self.parse_expr()?;
        let asc = if self.parse_keyword(Keyword::ASC) {
            Some(true)
        } else if self.parse_keyword(Keyword::DESC) {
            Some(false)
        } else {
            None
        };
        let nulls_first = if self.parse_keywords(&[Keyword::NULLS, Keyword::FIRST]) {
            Some(true)
        } else if self.parse_keywords(&[Keyword::NULLS, Keyword::LAST]) {
            Some(false)
        } else {
            None
        };
        Ok(OrderByExpr {
            expr,
            asc,
            nulls_first,
        })
    }

    fn parse_offset(&mut self) -> Result<crate::ast::Offset, ParserError> {
        let value = self.parse_expr()?;
        let rows = if self.parse_keyword(Keyword::ROW) {
            OffsetRows::Row
        } else if self.parse_keyword(Keyword::ROWS) {
            OffsetRows::Rows
        } else {
            OffsetRows::None
        };
        Ok(crate::ast::Offset { value, rows })
    }

    fn parse_fetch(&mut self) -> Result<Fetch, ParserError> {
        self.expect_one_of_keywords(&[Keyword::FIRST, Keyword::NEXT])?;
        let (quantity, percent) = if matches!(
            self.peek_keyword(),
            Some(Keyword::ROW | Keyword::ROWS)
        ) {
            (None, false)
        } else {
            let quantity = self.parse_expr()?;
            (Some(quantity), self.parse_keyword(Keyword::PERCENT))
        };
        self.expect_one_of_keywords(&[Keyword::ROW, Keyword::ROWS])?;
        let with_ties = if self.parse_keyword(Keyword::ONLY) {
            false
        } else if self.parse_keywords(&[Keyword::WITH, Keyword::TIES]) {
            true
        } else {
            let found = self.peek_token();
            return self.expected("ONLY or WITH TIES", found);
        };
        Ok(Fetch {
            with_ties,
            percent,
            quantity,
        })
    }

    fn parse_lock(&mut self) -> Result<LockClause, ParserError> {
        let lock_type = match self.expect_one_of_keywords(&[Keyword::UPDATE, Keyword::SHARE])? {
            Keyword::UPDATE => LockType::Update,
            _ => LockType::Share,
        };
        Ok(LockClause { lock_type })
    }

    fn parse_values(&mut self) -> Result<Values, ParserError> {
        let rows = self.parse_comma_separated(|parser| {
            parser.expect_token(&Token::LParen)?;
            let row = parser.parse_comma_separated(Parser::parse_expr)?;
            parser.expect_token(&Token::RParen)?;
            Ok(row)
        })?;
        Ok(Values(rows))
    }

    // =========================================================================
    // DML
    // =========================================================================

    fn parse_insert(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::INTO)?;
        let table_name = self.parse_object_name()?;

        // a parenthesized list after the table name is a column list only
        // when a query follows it; otherwise it is the source itself
        let columns = self
            .maybe_parse(|parser| {
                let columns = parser.parse_parenthesized_column_list()?;
                match parser.peek_keyword() {
                    Some(Keyword::VALUES | Keyword::SELECT | Keyword::WITH) => Ok(columns),
                    _ if parser.peek_token_ref().token == Token::LParen => Ok(columns),
                    _ => {
                        let found = parser.peek_token();
                        parser.expected("a query after the column list", found)
                    }
                }
            })
            .unwrap_or_default();

        let source = Box::new(self.parse_query()?);

        let on_conflict = if self.parse_keywords(&[Keyword::ON, Keyword::CONFLICT]) {
            let conflict_target = self.parse_optional_parenthesized_column_list()?;
            self.expect_keyword(Keyword::DO)?;
            let action = if self.parse_keyword(Keyword::NOTHING) {
                OnConflictAction::DoNothing
            } else {
                self.expect_keyword(Keyword::UPDATE)?;
                self.expect_keyword(Keyword::SET)?;
                OnConflictAction::DoUpdate(self.parse_comma_separated(Parser::parse_assignment)?)
            };
            Some(OnConflict {
                conflict_target,
                action,
            })
        } else {
            None
        };

        let returning = self.parse_optional_returning()?;
        Ok(Statement::Insert(Insert {
            table_name,
            columns,
            source,
            on_conflict,
            returning,
        }))
    }

    fn parse_optional_returning(&mut self) -> Result<Option<Vec<SelectItem>>, ParserError> {
        if self.parse_keyword(Keyword::RETURNING) {
            Ok(Some(self.parse_comma_separated(Parser::parse_select_item)?))
        } else {
            Ok(None)
        }
    }

    fn parse_assignment(&mut self) -> Result<Assignment, ParserError> {
        let mut target = vec![self.parse_identifier()?];
        while self.consume_token(&Token::Period) {
            target.push(self.parse_identifier()?);
        }
        self.expect_token(&Token::Eq)?;
        Ok(Assignment {
            target,
            value: self.parse_expr()?,
        })
    }

    fn parse_update(&mut self) -> Result<Statement, ParserError> {
        let table = self.parse_table_and_joins()?;
        self.expect_keyword(Keyword::SET)?;
        let assignments = self.parse_comma_separated(Parser::parse_assignment)?;
        let from = if self.parse_keyword(Keyword::FROM) {
            Some(self.parse_table_and_joins()?)
        } else {
            None
        };
        let selection = if self.parse_keyword(Keyword::WHERE) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let returning = self.parse_optional_returning()?;
        Ok(Statement::Update(Update {
            table,
            assignments,
            from,
            selection,
            returning,
        }))
    }

    fn parse_delete(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::FROM)?;
        let from = self.parse_table_and_joins()?;
        let using = if self.parse_keyword(Keyword::USING) {
            Some(self.parse_comma_separated(Parser::parse_table_and_joins)?)
        } else {
            None
        };
        let selection = if self.parse_keyword(Keyword::WHERE) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let returning = self.parse_optional_returning()?;
        Ok(Statement::Delete(Delete {
            from,
            using,
            selection,
            returning,
        }))
    }

    // =========================================================================
    // DDL
    // =========================================================================

    fn parse_create(&mut self) -> Result<Statement, ParserError> {
        let or_replace = self.parse_keywords(&[Keyword::OR, Keyword::REPLACE]);
        if self.parse_keyword(Keyword::TABLE) {
            self.parse_create_table(or_replace)
        } else if self.parse_keyword(Keyword::MATERIALIZED) {
            self.expect_keyword(Keyword::VIEW)?;
            self.parse_create_view(or_replace, true)
        } else if self.parse_keyword(Keyword::VIEW) {
            self.parse_create_view(or_replace, false)
        } else if self.parse_keyword(Keyword::UNIQUE) {
            self.expect_keyword(Keyword::INDEX)?;
            self.parse_create_index(true)
        } else if self.parse_keyword(Keyword::INDEX) {
            self.parse_create_index(false)
        } else {
            let found = self.peek_token();
            self.expected("TABLE, VIEW or INDEX after CREATE", found)
        }
    }

    fn parse_create_table(&mut self, or_replace: bool) -> Result<Statement, ParserError> {
        let if_not_exists = self.parse_keywords(&[Keyword::IF, Keyword::NOT, Keyword::EXISTS]);
        let name = self.parse_object_name()?;
        let (columns, constraints) = self.parse_columns_and_constraints()?;
        Ok(Statement::CreateTable {
            or_replace,
            if_not_exists,
            name,
            columns,
            constraints,
        })
    }

    fn parse_columns_and_constraints(
        &mut self,
    ) -> Result<(Vec<ColumnDef>, Vec<TableConstraint>), ParserError> {
        let mut columns = Vec::new();
        let mut constraints = Vec::new();
        self.expect_token(&Token::LParen)?;
        if self.consume_token(&Token::RParen) {
            return Ok((columns, constraints));
        }
        loop {
            if let Some(constraint) = self.parse_optional_table_constraint()? {
                constraints.push(constraint);
            } else {
                columns.push(self.parse_column_def()?);
            }
            if self.consume_token(&Token::Comma) {
                continue;
            }
            self.expect_token(&Token::RParen)?;
            break;
        }
        Ok((columns, constraints))
    }

    fn parse_column_def(&mut self) -> Result<ColumnDef, ParserError> {
        let name = self.parse_identifier()?;
        let data_type = self.parse_data_type()?;
        let mut options = Vec::new();
        loop {
            if self.parse_keyword(Keyword::CONSTRAINT) {
                let name = Some(self.parse_identifier()?);
                match self.parse_optional_column_option()? {
                    Some(option) => options.push(ColumnOptionDef { name, option }),
                    None => {
                        let found = self.peek_token();
                        return self.expected("a column option after CONSTRAINT", found);
                    }
                }
            } else if let Some(option) = self.parse_optional_column_option()? {
                options.push(ColumnOptionDef { name: None, option });
            } else {
                break;
            }
        }
        Ok(ColumnDef {
            name,
            data_type,
            options,
        })
    }

    fn parse_optional_column_option(&mut self) -> Result<Option<ColumnOption>, ParserError> {
        if self.parse_keywords(&[Keyword::NOT, Keyword::NULL]) {
            Ok(Some(ColumnOption::NotNull))
        } else if self.parse_keyword(Keyword::NULL) {
            Ok(Some(ColumnOption::Null))
        } else if self.parse_keyword(Keyword::DEFAULT) {
            Ok(Some(ColumnOption::Default(self.parse_expr()?)))
        } else if self.parse_keywords(&[Keyword::PRIMARY, Keyword::KEY]) {
            Ok(Some(ColumnOption::Unique { is_primary: true }))
        } else if self.parse_keyword(Keyword::UNIQUE) {
            Ok(Some(ColumnOption::Unique { is_primary: false }))
        } else if self.parse_keyword(Keyword::REFERENCES) {
            let foreign_table = self.parse_object_name()?;
            let referred_columns = self.parse_optional_parenthesized_column_list()?;
            let (on_delete, on_update) = self.parse_referential_actions()?;
            Ok(Some(ColumnOption::ForeignKey {
                foreign_table,
                referred_columns,
                on_delete,
                on_update,
            }))
        } else if self.parse_keyword(Keyword::CHECK) {
            self.expect_token(&Token::LParen)?;
            let expr = self.parse_expr()?;
            self.expect_token(&Token::RParen)?;
            Ok(Some(ColumnOption::Check(expr)))
        } else {
            Ok(None)
        }
    }

    fn parse_referential_actions(
        &mut self,
    ) -> Result<(Option<ReferentialAction>, Option<ReferentialAction>), ParserError> {
        let mut on_delete = None;
        let mut on_update = None;
        loop {
            if on_delete.is_none() && self.parse_keywords(&[Keyword::ON, Keyword::DELETE]) {
                on_delete = Some(self.parse_referential_action()?);
            } else if on_update.is_none() && self.parse_keywords(&[Keyword::ON, Keyword::UPDATE]) {
                on_update = Some(self.parse_referential_action()?);
            } else {
                break;
            }
        }
        Ok((on_delete, on_update))
    }

    fn parse_referential_action(&mut self) -> Result<ReferentialAction, ParserError> {
        if self.parse_keyword(Keyword::RESTRICT) {
            Ok(ReferentialAction::Restrict)
        } else if self.parse_keyword(Keyword::CASCADE) {
            Ok(ReferentialAction::Cascade)
        } else if self.parse_keywords(&[Keyword::SET, Keyword::NULL]) {
            Ok(ReferentialAction::SetNull)
        } else if self.parse_keywords(&[Keyword::NO, Keyword::ACTION]) {
            Ok(ReferentialAction::NoAction)
        } else if self.parse_keywords(&[Keyword::SET, Keyword::DEFAULT]) {
            Ok(ReferentialAction::SetDefault)
        } else {
            let found = self.peek_token();
            self.expected("a referential action", found)
        }
    }

    fn parse_optional_table_constraint(
        &mut self,
    ) -> Result<Option<TableConstraint>, ParserError> {
        let name = if self.parse_keyword(Keyword::CONSTRAINT) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        if self.parse_keywords(&[Keyword::PRIMARY, Keyword::KEY]) {
            let columns = self.parse_parenthesized_column_list()?;
            Ok(Some(TableConstraint::Unique {
                name,
                columns,
                is_primary: true,
            }))
        } else if self.parse_keyword(Keyword::UNIQUE) {
            let columns = self.parse_parenthesized_column_list()?;
            Ok(Some(TableConstraint::Unique {
                name,
                columns,
                is_primary: false,
            }))
        } else if self.parse_keywords(&[Keyword::FOREIGN, Keyword::KEY]) {
            let columns = self.parse_parenthesized_column_list()?;
            self.expect_keyword(Keyword::REFERENCES)?;
            let foreign_table = self.parse_object_name()?;
            let referred_columns = self.parse_optional_parenthesized_column_list()?;
            let (on_delete, on_update) = self.parse_referential_actions()?;
            Ok(Some(TableConstraint::ForeignKey {
                name,
                columns,
                foreign_table,
                referred_columns,
                on_delete,
                on_update,
            }))
        } else if self.parse_keyword(Keyword::CHECK) {
            self.expect_token(&Token::LParen)?;
            let expr = Box::new(self.parse_expr()?);
            self.expect_token(&Token::RParen)?;
            Ok(Some(TableConstraint::Check { name, expr }))
        } else if let Some(name) = name {
            let found = self.peek_token();
            self.expected(
                &format!("PRIMARY KEY, UNIQUE, FOREIGN KEY or CHECK after CONSTRAINT {}", name),
                found,
            )
        } else {
            Ok(None)
        }
    }

    fn parse_create_view(
        &mut self,
        or_replace: bool,
        materialized: bool,
    ) -> Result<Statement, ParserError> {
        let name = self.parse_object_name()?;
        let columns = self.parse_optional_parenthesized_column_list()?;
        self.expect_keyword(Keyword::AS)?;
        let query = Box::new(self.parse_query()?);
        Ok(Statement::CreateView {
            or_replace,
            materialized,
            name,
            columns,
            query,
        })
    }

    fn parse_create_index(&mut self, unique: bool) -> Result<Statement, ParserError> {
        let if_not_exists = self.parse_keywords(&[Keyword::IF, Keyword::NOT, Keyword::EXISTS]);
        let name = self.parse_object_name()?;
        self.expect_keyword(Keyword::ON)?;
        let table_name = self.parse_object_name()?;
        self.expect_token(&Token::LParen)?;
        let columns = self.parse_comma_separated(Parser::parse_order_by_expr)?;
        self.expect_token(&Token::RParen)?;
        Ok(Statement::CreateIndex {
            name,
            table_name,
            unique,
            if_not_exists,
            columns,
        })
    }

    fn parse_alter(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::TABLE)?;
        let name = self.parse_object_name()?;
        let operation = if self.parse_keyword(Keyword::ADD) {
            if let Some(constraint) = self.parse_optional_table_constraint()? {
                AlterTableOperation::AddConstraint(constraint)
            } else {
                self.parse_keyword(Keyword::COLUMN);
                AlterTableOperation::AddColumn {
                    column_def: self.parse_column_def()?,
                }
            }
        } else if self.parse_keyword(Keyword::RENAME) {
            if self.parse_keyword(Keyword::COLUMN) {
                let old_column_name = self.parse_identifier()?;
                self.expect_keyword(Keyword::TO)?;
                AlterTableOperation::RenameColumn {
                    old_column_name,
                    new_column_name: self.parse_identifier()?,
                }
            } else {
                self.expect_keyword(Keyword::TO)?;
                AlterTableOperation::RenameTable {
                    table_name: self.parse_object_name()?,
                }
            }
        } else if self.parse_keyword(Keyword::DROP) {
            if self.parse_keyword(Keyword::CONSTRAINT) {
                let if_exists = self.parse_keywords(&[Keyword::IF, Keyword::EXISTS]);
                let name = self.parse_identifier()?;
                AlterTableOperation::DropConstraint {
                    name,
                    if_exists,
                    cascade: self.parse_keyword(Keyword::CASCADE),
                }
            } else {
                self.parse_keyword(Keyword::COLUMN);
                let if_exists = self.parse_keywords(&[Keyword::IF, Keyword::EXISTS]);
                let column_name = self.parse_identifier()?;
                AlterTableOperation::DropColumn {
                    column_name,
                    if_exists,
                    cascade: self.parse_keyword(Keyword::CASCADE),
                }
            }
        } else {
            let found = self.peek_token();
            return self.expected("ADD, RENAME or DROP after ALTER TABLE", found);
        };
        Ok(Statement::AlterTable { name, operation })
    }

    fn parse_drop(&mut self) -> Result<Statement, ParserError> {
        let object_type = match self.expect_one_of_keywords(&[
            Keyword::TABLE,
            Keyword::VIEW,
            Keyword::INDEX,
        ])? {
            Keyword::TABLE => ObjectType::Table,
            Keyword::VIEW => ObjectType::View,
            _ => ObjectType::Index,
        };
        let if_exists = self.parse_keywords(&[Keyword::IF, Keyword::EXISTS]);
        let names = self.parse_comma_separated(Parser::parse_object_name)?;
        let cascade = self.parse_keyword(Keyword::CASCADE);
        let restrict = !cascade && self.parse_keyword(Keyword::RESTRICT);
        Ok(Statement::Drop {
            object_type,
            if_exists,
            names,
            cascade,
            restrict,
        })
    }

    fn parse_truncate(&mut self) -> Result<Statement, ParserError> {
        self.parse_keyword(Keyword::TABLE);
        Ok(Statement::Truncate {
            table_name: self.parse_object_name()?,
        })
    }

    // =========================================================================
    // Transactions, SET/SHOW, GRANT/REVOKE, EXPLAIN
    // =========================================================================

    fn parse_start_transaction(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::TRANSACTION)?;
        Ok(Statement::StartTransaction {
            modes: self.parse_transaction_modes()?,
            begin: false,
            modifier: None,
        })
    }

    fn parse_begin(&mut self) -> Result<Statement, ParserError> {
        let modifier = if self.dialect.supports_start_transaction_modifier() {
            match self.parse_one_of_keywords(&[
                Keyword::DEFERRED,
                Keyword::IMMEDIATE,
                Keyword::EXCLUSIVE,
            ]) {
                Some(Keyword::DEFERRED) => Some(TransactionModifier::Deferred),
                Some(Keyword::IMMEDIATE) => Some(TransactionModifier::Immediate),
                Some(Keyword::EXCLUSIVE) => Some(TransactionModifier::Exclusive),
                _ => None,
            }
        } else {
            None
        };
        self.parse_keyword(Keyword::TRANSACTION);
        Ok(Statement::StartTransaction {
            modes: self.parse_transaction_modes()?,
            begin: true,
            modifier,
        })
    }

    fn parse_transaction_modes(&mut self) -> Result<Vec<TransactionMode>, ParserError> {
        let mut modes = Vec::new();
        let mut required = false;
        loop {
            let mode = if self.parse_keywords(&[Keyword::ISOLATION, Keyword::LEVEL]) {
                let level = if self.parse_keywords(&[Keyword::READ, Keyword::UNCOMMITTED]) {
                    TransactionIsolationLevel::ReadUncommitted
                } else if self.parse_keywords(&[Keyword::READ, Keyword::COMMITTED]) {
                    TransactionIsolationLevel::ReadCommitted
                } else if self.parse_keywords(&[Keyword::REPEATABLE, Keyword::READ]) {
                    TransactionIsolationLevel::RepeatableRead
                } else if self.parse_keyword(Keyword::SERIALIZABLE) {
                    TransactionIsolationLevel::Serializable
                } else {
                    let found = self.peek_token();
                    return self.expected("an isolation level", found);
                };
                TransactionMode::IsolationLevel(level)
            } else if self.parse_keywords(&[Keyword::READ, Keyword::ONLY]) {
                TransactionMode::AccessMode(TransactionAccessMode::ReadOnly)
            } else if self.parse_keywords(&[Keyword::READ, Keyword::WRITE]) {
                TransactionMode::AccessMode(TransactionAccessMode::ReadWrite)
            } else if required {
                let found = self.peek_token();
                return self.expected("a transaction mode", found);
            } else {
                break;
            };
            modes.push(mode);
            required = self.consume_token(&Token::Comma);
        }
        Ok(modes)
    }

    fn parse_commit_rollback_chain(&mut self) -> Result<bool, ParserError> {
        self.parse_keyword(Keyword::TRANSACTION);
        if self.parse_keyword(Keyword::AND) {
            let no_chain = self.parse_keyword(Keyword::NO);
            self.expect_keyword(Keyword::CHAIN)?;
            Ok(!no_chain)
        } else {
            Ok(false)
        }
    }

    fn parse_set(&mut self) -> Result<Statement, ParserError> {
        let local = self.parse_keyword(Keyword::LOCAL);
        if self.dialect.supports_parenthesized_set_variables()
            && self.consume_token(&Token::LParen)
        {
            let variables = self.parse_comma_separated(Parser::parse_object_name)?;
            self.expect_token(&Token::RParen)?;
            self.expect_token(&Token::Eq)?;
            self.expect_token(&Token::LParen)?;
            let values = self.parse_comma_separated(Parser::parse_expr)?;
            self.expect_token(&Token::RParen)?;
            return Ok(Statement::SetVariable {
                local,
                variables,
                values,
            });
        }
        let variable = self.parse_object_name()?;
        if !self.consume_token(&Token::Eq) && !self.parse_keyword(Keyword::TO) {
            let found = self.peek_token();
            return self.expected("= or TO after the variable name", found);
        }
        let value = self.parse_expr()?;
        Ok(Statement::SetVariable {
            local,
            variables: vec![variable],
            values: vec![value],
        })
    }

    fn parse_show(&mut self) -> Result<Statement, ParserError> {
        let mut variable = Vec::new();
        while matches!(self.peek_token_ref().token, Token::Word(_)) {
            variable.push(self.parse_identifier()?);
        }
        Ok(Statement::ShowVariable { variable })
    }

    fn parse_grant(&mut self) -> Result<Statement, ParserError> {
        let (privileges, objects) = self.parse_grant_revoke_privileges_objects()?;
        self.expect_keyword(Keyword::TO)?;
        let grantees = self.parse_comma_separated(Parser::parse_identifier)?;
        let with_grant_option =
            self.parse_keywords(&[Keyword::WITH, Keyword::GRANT, Keyword::OPTION]);
        Ok(Statement::Grant {
            privileges,
            objects,
            grantees,
            with_grant_option,
        })
    }

    fn parse_revoke(&mut self) -> Result<Statement, ParserError> {
        let (privileges, objects) = self.parse_grant_revoke_privileges_objects()?;
        self.expect_keyword(Keyword::FROM)?;
        let grantees = self.parse_comma_separated(Parser::parse_identifier)?;
        let cascade = self.parse_keyword(Keyword::CASCADE);
        Ok(Statement::Revoke {
            privileges,
            objects,
            grantees,
            cascade,
        })
    }

    fn parse_grant_revoke_privileges_objects(
        &mut self,
    ) -> Result<(Privileges, GrantObjects), ParserError> {
        let privileges = if self.parse_keyword(Keyword::ALL) {
            Privileges::All {
                with_privileges_keyword: self.parse_keyword(Keyword::PRIVILEGES),
            }
        } else {
            Privileges::Actions(self.parse_comma_separated(Parser::parse_grant_action)?)
        };
        self.expect_keyword(Keyword::ON)?;
        let objects = if self.parse_keyword(Keyword::SCHEMA) {
            GrantObjects::Schemas(self.parse_comma_separated(Parser::parse_object_name)?)
        } else {
            self.parse_keyword(Keyword::TABLE);
            GrantObjects::Tables(self.parse_comma_separated(Parser::parse_object_name)?)
        };
        Ok((privileges, objects))
    }

    fn parse_grant_action(&mut self) -> Result<Action, ParserError> {
        let keyword = self.expect_one_of_keywords(&[
            Keyword::SELECT,
            Keyword::INSERT,
            Keyword::UPDATE,
            Keyword::DELETE,
            Keyword::REFERENCES,
            Keyword::USAGE,
            Keyword::CREATE,
        ])?;
        let with_columns = |parser: &mut Self| -> Result<Option<Vec<Ident>>, ParserError> {
            if parser.peek_token_ref().token == Token::LParen {
                Ok(Some(parser.parse_parenthesized_column_list()?))
            } else {
                Ok(None)
            }
        };
        Ok(match keyword {
            Keyword::SELECT => Action::Select {
                columns: with_columns(self)?,
            },
            Keyword::INSERT => Action::Insert {
                columns: with_columns(self)?,
            },
            Keyword::UPDATE => Action::Update {
                columns: with_columns(self)?,
            },
            Keyword::REFERENCES => Action::References {
                columns: with_columns(self)?,
            },
            Keyword::DELETE => Action::Delete,
            Keyword::USAGE => Action::Usage,
            _ => Action::Create,
        })
    }

    fn parse_explain(&mut self) -> Result<Statement, ParserError> {
        let analyze = self.parse_keyword(Keyword::ANALYZE);
        let verbose = self.parse_keyword(Keyword::VERBOSE);
        let statement = Box::new(self.parse_statement()?);
        Ok(Statement::Explain {
            analyze,
            verbose,
            statement,
        })
    }

    // =========================================================================
    // Data types
    // =========================================================================

    /// Parse a data type, including the three array bracket styles.
    pub fn parse_data_type(&mut self) -> Result<DataType, ParserError> {
        let token = self.next_token();
        let mut data_type = match &token.token {
            Token::Word(w) => match w.keyword {
                Some(Keyword::BOOLEAN) => DataType::Boolean,
                Some(Keyword::TINYINT) => {
                    self.parse_int_type(DataType::TinyInt, DataType::UnsignedTinyInt)?
                }
                Some(Keyword::SMALLINT) => {
                    self.parse_int_type(DataType::SmallInt, DataType::UnsignedSmallInt)?
                }
                Some(Keyword::INT) | Some(Keyword::INTEGER) => {
                    self.parse_int_type(DataType::Int, DataType::UnsignedInt)?
                }
                Some(Keyword::BIGINT) => {
                    self.parse_int_type(DataType::BigInt, DataType::UnsignedBigInt)?
                }
                Some(Keyword::REAL) => DataType::Real,
                Some(Keyword::FLOAT) => DataType::Float(self.parse_optional_length()?),
                Some(Keyword::DOUBLE) => {
                    self.parse_keyword(Keyword::PRECISION);
                    DataType::Double
                }
                Some(Keyword::DECIMAL) | Some(Keyword::DEC) => {
                    let (precision, scale) = self.parse_optional_precision_scale()?;
                    DataType::Decimal(precision, scale)
                }
                Some(Keyword::NUMERIC) => {
                    let (precision, scale) = self.parse_optional_precision_scale()?;
                    DataType::Numeric(precision, scale)
                }
                Some(Keyword::CHAR) | Some(Keyword::CHARACTER) => {
                    if self.parse_keyword(Keyword::VARYING) {
                        DataType::Varchar(self.parse_optional_length()?)
                    } else {
                        DataType::Char(self.parse_optional_length()?)
                    }
                }
                Some(Keyword::VARCHAR) => DataType::Varchar(self.parse_optional_length()?),
                Some(Keyword::TEXT) => DataType::Text,
                Some(Keyword::STRING) => DataType::String,
                Some(Keyword::BINARY) => DataType::Binary(self.parse_optional_length()?),
                Some(Keyword::VARBINARY) => DataType::Varbinary(self.parse_optional_length()?),
                Some(Keyword::BLOB) => DataType::Blob(self.parse_optional_length()?),
                Some(Keyword::BYTEA) => DataType::Bytea,
                Some(Keyword::DATE) => DataType::Date,
                Some(Keyword::TIME) => DataType::Time {
                    with_time_zone: self.parse_time_zone_suffix()?,
                },
                Some(Keyword::TIMESTAMP) => DataType::Timestamp {
                    with_time_zone: self.parse_time_zone_suffix()?,
                },
                Some(Keyword::INTERVAL) => DataType::Interval,
                Some(Keyword::JSON) => DataType::Json,
                Some(Keyword::UUID) => DataType::Uuid,
                Some(Keyword::ARRAY) => {
                    if self.consume_token(&Token::Lt) {
                        let inner = self.parse_data_type()?;
                        self.expect_token(&Token::Gt)?;
                        DataType::Array(ArrayElemTypeDef::AngleBracket(Box::new(inner)))
                    } else if self.consume_token(&Token::LParen) {
                        let inner = self.parse_data_type()?;
                        self.expect_token(&Token::RParen)?;
                        DataType::Array(ArrayElemTypeDef::Parenthesis(Box::new(inner)))
                    } else {
                        let found = self.peek_token();
                        return self.expected("< or ( after ARRAY", found);
                    }
                }
                _ => {
                    self.prev_token();
                    DataType::Custom(self.parse_object_name()?)
                }
            },
            _ => return self.expected("a data type name", token),
        };

        // `INT[]`, `INT[3]`, `INT ARRAY`, `INT ARRAY[3]`
        loop {
            if self.consume_token(&Token::LBracket) {
                let size = if self.peek_token_ref().token == Token::RBracket {
                    None
                } else {
                    Some(self.parse_literal_uint()?)
                };
                self.expect_token(&Token::RBracket)?;
                data_type = DataType::Array(ArrayElemTypeDef::SquareBracket(
                    Box::new(data_type),
                    size,
                ));
            } else if self.parse_keyword(Keyword::ARRAY) {
                let size = if self.consume_token(&Token::LBracket) {
                    let size = self.parse_literal_uint()?;
                    self.expect_token(&Token::RBracket)?;
                    Some(size)
                } else {
                    None
                };
                data_type = DataType::Array(ArrayElemTypeDef::SquareBracket(
                    Box::new(data_type),
                    size,
                ));
            } else {
                break;
            }
        }
        Ok(data_type)
    }

    fn parse_int_type(
        &mut self,
        signed: fn(Option<u64>) -> DataType,
        unsigned: fn(Option<u64>) -> DataType,
    ) -> Result<DataType, ParserError> {
        let length = self.parse_optional_length()?;
        if self.parse_keyword(Keyword::UNSIGNED) {
            Ok(unsigned(length))
        } else {
            Ok(signed(length))
        }
    }

    fn parse_optional_length(&mut self) -> Result<Option<u64>, ParserError> {
        if self.consume_token(&Token::LParen) {
            let length = self.parse_literal_uint()?;
            self.expect_token(&Token::RParen)?;
            Ok(Some(length))
        } else {
            Ok(None)
        }
    }

    fn parse_optional_precision_scale(
        &mut self,
    ) -> Result<(Option<u64>, Option<u64>), ParserError> {
        if self.consume_token(&Token::LParen) {
            let precision = self.parse_literal_uint()?;
            let scale = if self.consume_token(&Token::Comma) {
                Some(self.parse_literal_uint()?)
            } else {
                None
            };
            self.expect_token(&Token::RParen)?;
            Ok((Some(precision), scale))
        } else {
            Ok((None, None))
        }
    }

    fn parse_time_zone_suffix(&mut self) -> Result<bool, ParserError> {
        if self.parse_keywords(&[Keyword::WITH, Keyword::TIME, Keyword::ZONE]) {
            Ok(true)
        } else {
            self.parse_keywords(&[Keyword::WITHOUT, Keyword::TIME, Keyword::ZONE]);
            Ok(false)
        }
    }
}

enum PatternMatchKind {
    Like,
    ILike,
    SimilarTo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;

    fn parse(sql: &str) -> Vec<Statement> {
        Parser::parse_sql(&GenericDialect {}, sql).expect("parsing should succeed")
    }

    #[test]
    fn test_parse_empty_statements_are_discarded() {
        assert!(parse(";;").is_empty());
        assert_eq!(parse("SELECT 1;;").len(), 1);
    }

    #[test]
    fn test_stray_token_after_statement_is_error() {
        let err = Parser::parse_sql(&GenericDialect {}, "SELECT 1 SELECT 2").unwrap_err();
        assert!(err.message.contains("end of statement"), "{}", err);
    }

    #[test]
    fn test_checkpoint_restore() {
        let dialect = GenericDialect {};
        let mut parser = Parser::new(&dialect).try_with_sql("a b c").unwrap();
        let checkpoint = parser.checkpoint();
        parser.next_token();
        parser.next_token();
        parser.restore(checkpoint);
        assert_eq!(parser.next_token().token, Token::make_word("a", None));
    }

    #[test]
    fn test_maybe_parse_restores_on_failure() {
        let dialect = GenericDialect {};
        let mut parser = Parser::new(&dialect).try_with_sql("a.b").unwrap();
        let attempt = parser.maybe_parse(|p| {
            p.parse_identifier()?;
            p.expect_token(&Token::Comma)
        });
        assert!(attempt.is_none());
        assert_eq!(parser.next_token().token, Token::make_word("a", None));
    }

    #[test]
    fn test_error_carries_position() {
        let err = Parser::parse_sql(&GenericDialect {}, "SELECT\n  FROM+").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.column > 0);
    }
}
