//! SQL tokenizer.
//!
//! Converts a source string into a sequence of tokens, consulting the
//! [`Dialect`] for identifier boundaries, quoting rules and literal escape
//! behavior. Whitespace and comments update the source position and are
//! otherwise discarded.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dialect::Dialect;
use crate::keywords::Keyword;

/// A token in a SQL statement.
///
/// Every variant must be handled in `Display` - the compiler enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// A keyword (like SELECT) or an optionally quoted identifier
    Word(Word),
    /// An unsigned numeric literal, kept as written
    Number(String),
    /// Single-quoted string: 'string'
    SingleQuotedString(String),
    /// National string literal: N'string'
    NationalStringLiteral(String),
    /// Hex string literal: X'deadbeef'
    HexStringLiteral(String),
    /// Bit string literal: B'1010'
    BitStringLiteral(String),
    /// Triple-quoted string: '''string'''
    TripleQuotedString(String),
    /// Placeholder: `?`, `$1`, `@name` or `:name`
    Placeholder(String),

    // === Punctuation ===
    /// `,`
    Comma,
    /// `;`
    SemiColon,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `.`
    Period,
    /// `:`
    Colon,
    /// `::`
    DoubleColon,

    // === Operators ===
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `^`
    Caret,
    /// `=`
    Eq,
    /// `=>`
    RArrow,
    /// `<>` or `!=`
    Neq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `&&`
    DoubleAmpersand,
    /// `||`
    StringConcat,
    /// `|`
    Pipe,
    /// `&`
    Ampersand,
    /// `~`
    Tilde,
    /// `#`
    Sharp,
    /// `@`
    AtSign,
    /// `!`
    ExclamationMark,
    /// `->`
    Arrow,
    /// `->>`
    LongArrow,
    /// `#>`
    HashArrow,
    /// `#>>`
    HashLongArrow,
    /// `@>`
    AtArrow,
    /// `<@`
    ArrowAt,
    /// `?|`
    QuestionPipe,
    /// `?&`
    QuestionAnd,
    /// `|/`
    PipeSlash,
    /// `||/`
    DoublePipeSlash,

    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "{}", w),
            Token::Number(n) => f.write_str(n),
            Token::SingleQuotedString(s) => write!(f, "'{}'", s),
            Token::NationalStringLiteral(s) => write!(f, "N'{}'", s),
            Token::HexStringLiteral(s) => write!(f, "X'{}'", s),
            Token::BitStringLiteral(s) => write!(f, "B'{}'", s),
            Token::TripleQuotedString(s) => write!(f, "'''{}'''", s),
            Token::Placeholder(s) => f.write_str(s),
            Token::Comma => f.write_str(","),
            Token::SemiColon => f.write_str(";"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::LBracket => f.write_str("["),
            Token::RBracket => f.write_str("]"),
            Token::LBrace => f.write_str("{"),
            Token::RBrace => f.write_str("}"),
            Token::Period => f.write_str("."),
            Token::Colon => f.write_str(":"),
            Token::DoubleColon => f.write_str("::"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Mul => f.write_str("*"),
            Token::Div => f.write_str("/"),
            Token::Mod => f.write_str("%"),
            Token::Caret => f.write_str("^"),
            Token::Eq => f.write_str("="),
            Token::RArrow => f.write_str("=>"),
            Token::Neq => f.write_str("<>"),
            Token::Lt => f.write_str("<"),
            Token::Gt => f.write_str(">"),
            Token::LtEq => f.write_str("<="),
            Token::GtEq => f.write_str(">="),
            Token::ShiftLeft => f.write_str("<<"),
            Token::ShiftRight => f.write_str(">>"),
            Token::DoubleAmpersand => f.write_str("&&"),
            Token::StringConcat => f.write_str("||"),
            Token::Pipe => f.write_str("|"),
            Token::Ampersand => f.write_str("&"),
            Token::Tilde => f.write_str("~"),
            Token::Sharp => f.write_str("#"),
            Token::AtSign => f.write_str("@"),
            Token::ExclamationMark => f.write_str("!"),
            Token::Arrow => f.write_str("->"),
            Token::LongArrow => f.write_str("->>"),
            Token::HashArrow => f.write_str("#>"),
            Token::HashLongArrow => f.write_str("#>>"),
            Token::AtArrow => f.write_str("@>"),
            Token::ArrowAt => f.write_str("<@"),
            Token::QuestionPipe => f.write_str("?|"),
            Token::QuestionAnd => f.write_str("?&"),
            Token::PipeSlash => f.write_str("|/"),
            Token::DoublePipeSlash => f.write_str("||/"),
            Token::Eof => f.write_str("EOF"),
        }
    }
}

impl Token {
    /// Build a `Word` token, resolving unquoted words against the keyword
    /// table.
    pub fn make_word(value: &str, quote_style: Option<char>) -> Self {
        let keyword = match quote_style {
            None => Keyword::lookup(&value.to_uppercase()),
            Some(_) => None,
        };
        Token::Word(Word {
            value: value.to_string(),
            quote_style,
            keyword,
        })
    }

    /// Build an unquoted keyword token (test helper).
    pub fn make_keyword(value: &str) -> Self {
        Token::make_word(value, None)
    }
}

/// A keyword or an optionally quoted identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// The word text, without enclosing quotes and with doubled quotes
    /// collapsed.
    pub value: String,
    /// The opening quote character, if the identifier was delimited.
    pub quote_style: Option<char>,
    /// Resolved keyword, when the word was unquoted and matched the table.
    pub keyword: Option<Keyword>,
}

impl Word {
    /// The closing quote that pairs with an opening delimiter.
    pub fn matching_end_quote(ch: char) -> char {
        match ch {
            '"' => '"',
            '`' => '`',
            '[' => ']',
            _ => ch,
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quote_style {
            Some(s) => write!(f, "{}{}{}", s, self.value, Word::matching_end_quote(s)),
            None => f.write_str(&self.value),
        }
    }
}

/// A source position, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u64,
    pub column: u64,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A token together with the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenWithLocation {
    pub token: Token,
    pub location: Location,
}

impl fmt::Display for TokenWithLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}

/// Tokenizer error with source position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} at line {line}, column {column}")]
pub struct TokenizerError {
    pub message: String,
    pub line: u64,
    pub column: u64,
}

/// Character cursor with single-character dispatch, arbitrary lookahead and
/// line/column tracking. `\r\n` counts as one newline.
struct Cursor<'a> {
    chars: Peekable<Chars<'a>>,
    line: u64,
    column: u64,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn location(&self) -> Location {
        Location {
            line: self.line,
            column: self.column,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.clone().nth(n)
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.chars.next();
        match ch {
            Some('\n') => {
                self.line += 1;
                self.column = 1;
            }
            Some('\r') => {
                // \r\n advances the line once, when the \n is consumed
                if self.chars.peek() != Some(&'\n') {
                    self.line += 1;
                    self.column = 1;
                }
            }
            Some(_) => self.column += 1,
            None => {}
        }
        ch
    }

    /// Consume characters while `predicate` holds, returning them.
    fn take_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> String {
        let mut s = String::new();
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.next();
            s.push(ch);
        }
        s
    }
}

/// SQL tokenizer over an in-memory buffer.
pub struct Tokenizer<'a> {
    dialect: &'a dyn Dialect,
    cursor: Cursor<'a>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(dialect: &'a dyn Dialect, source: &'a str) -> Self {
        Self {
            dialect,
            cursor: Cursor::new(source),
        }
    }

    /// Tokenize the whole input. The returned sequence always ends with a
    /// single [`Token::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<TokenWithLocation>, TokenizerError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments()?;
            let location = self.cursor.location();
            match self.next_token()? {
                Some(token) => tokens.push(TokenWithLocation { token, location }),
                None => {
                    tokens.push(TokenWithLocation {
                        token: Token::Eof,
                        location,
                    });
                    return Ok(tokens);
                }
            }
        }
    }

    fn error<T>(&self, message: impl Into<String>, location: Location) -> Result<T, TokenizerError> {
        Err(TokenizerError {
            message: message.into(),
            line: location.line,
            column: location.column,
        })
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), TokenizerError> {
        loop {
            match self.cursor.peek() {
                Some(' ') | Some('\t') | Some('\n') | Some('\r') => {
                    self.cursor.next();
                }
                Some('-') if self.cursor.peek_nth(1) == Some('-') => {
                    self.cursor.next();
                    self.cursor.next();
                    self.cursor.take_while(|ch| ch != '\n');
                }
                Some('/') if self.cursor.peek_nth(1) == Some('*') => {
                    let start = self.cursor.location();
                    self.cursor.next();
                    self.cursor.next();
                    self.skip_multiline_comment(start)?;
                }
                _ => return Ok(()),
            }
        }
    }

    /// Skip the body of a `/* ... */` comment, honoring nesting.
    fn skip_multiline_comment(&mut self, start: Location) -> Result<(), TokenizerError> {
        let mut depth = 1u32;
        loop {
            match self.cursor.next() {
                Some('*') if self.cursor.peek() == Some('/') => {
                    self.cursor.next();
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some('/') if self.cursor.peek() == Some('*') => {
                    self.cursor.next();
                    depth += 1;
                }
                Some(_) => {}
                None => return self.error("Unterminated multi-line comment", start),
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, TokenizerError> {
        let location = self.cursor.location();
        let ch = match self.cursor.peek() {
            Some(ch) => ch,
            None => return Ok(None),
        };
        match ch {
            // string literal prefixes have to win over plain words
            'N' if self.cursor.peek_nth(1) == Some('\'') => {
                self.cursor.next();
                let s = self.tokenize_single_quoted_string(location)?;
                Ok(Some(Token::NationalStringLiteral(s)))
            }
            'x' | 'X' if self.cursor.peek_nth(1) == Some('\'') => {
                self.cursor.next();
                let s = self.tokenize_single_quoted_string(location)?;
                Ok(Some(Token::HexStringLiteral(s)))
            }
            'b' | 'B' if self.cursor.peek_nth(1) == Some('\'') => {
                self.cursor.next();
                let s = self.tokenize_single_quoted_string(location)?;
                Ok(Some(Token::BitStringLiteral(s)))
            }
            ch if self.dialect.is_identifier_start(ch) => {
                self.cursor.next();
                let word = self.tokenize_word(ch);
                Ok(Some(Token::make_word(&word, None)))
            }
            '\'' => {
                if self.dialect.supports_triple_quoted_string()
                    && self.cursor.peek_nth(1) == Some('\'')
                    && self.cursor.peek_nth(2) == Some('\'')
                {
                    let s = self.tokenize_triple_quoted_string(location)?;
                    Ok(Some(Token::TripleQuotedString(s)))
                } else {
                    let s = self.tokenize_single_quoted_string(location)?;
                    Ok(Some(Token::SingleQuotedString(s)))
                }
            }
            quote_start
                if self.dialect.is_delimited_identifier_start(quote_start)
                    && self
                        .dialect
                        .is_proper_identifier_inside_quotes(self.cursor.chars.clone()) =>
            {
                self.cursor.next();
                let quote_end = Word::matching_end_quote(quote_start);
                let mut s = String::new();
                loop {
                    match self.cursor.next() {
                        Some(ch) if ch == quote_end => {
                            // a doubled end quote encodes one literal quote
                            if self.cursor.peek() == Some(quote_end) {
                                self.cursor.next();
                                s.push(quote_end);
                            } else {
                                break;
                            }
                        }
                        Some(ch) => s.push(ch),
                        None => {
                            return self.error(
                                format!("Expected close delimiter '{}' before EOF", quote_end),
                                location,
                            )
                        }
                    }
                }
                Ok(Some(Token::make_word(&s, Some(quote_start))))
            }
            '0'..='9' => self.tokenize_number(location).map(Some),
            '.' => {
                if matches!(self.cursor.peek_nth(1), Some('0'..='9')) {
                    self.tokenize_number(location).map(Some)
                } else {
                    self.cursor.next();
                    Ok(Some(Token::Period))
                }
            }
            ',' => self.consume(Token::Comma),
            ';' => self.consume(Token::SemiColon),
            '(' => self.consume(Token::LParen),
            ')' => self.consume(Token::RParen),
            '[' => self.consume(Token::LBracket),
            ']' => self.consume(Token::RBracket),
            '{' => self.consume(Token::LBrace),
            '}' => self.consume(Token::RBrace),
            '+' => self.consume(Token::Plus),
            '*' => self.consume(Token::Mul),
            '/' => self.consume(Token::Div),
            '%' => self.consume(Token::Mod),
            '^' => self.consume(Token::Caret),
            '~' => self.consume(Token::Tilde),
            '=' => {
                self.cursor.next();
                match self.cursor.peek() {
                    Some('>') => self.consume(Token::RArrow),
                    _ => Ok(Some(Token::Eq)),
                }
            }
            '-' => {
                self.cursor.next();
                match self.cursor.peek() {
                    Some('>') => {
                        self.cursor.next();
                        match self.cursor.peek() {
                            Some('>') => self.consume(Token::LongArrow),
                            _ => Ok(Some(Token::Arrow)),
                        }
                    }
                    _ => Ok(Some(Token::Minus)),
                }
            }
            '<' => {
                self.cursor.next();
                match self.cursor.peek() {
                    Some('=') => self.consume(Token::LtEq),
                    Some('>') => self.consume(Token::Neq),
                    Some('@') => self.consume(Token::ArrowAt),
                    Some('<') => self.consume(Token::ShiftLeft),
                    _ => Ok(Some(Token::Lt)),
                }
            }
            '>' => {
                self.cursor.next();
                match self.cursor.peek() {
                    Some('=') => self.consume(Token::GtEq),
                    Some('>') => self.consume(Token::ShiftRight),
                    _ => Ok(Some(Token::Gt)),
                }
            }
            '!' => {
                self.cursor.next();
                match self.cursor.peek() {
                    Some('=') => self.consume(Token::Neq),
                    _ => Ok(Some(Token::ExclamationMark)),
                }
            }
            '&' => {
                self.cursor.next();
                match self.cursor.peek() {
                    Some('&') => self.consume(Token::DoubleAmpersand),
                    _ => Ok(Some(Token::Ampersand)),
                }
            }
            '|' => {
                self.cursor.next();
                match self.cursor.peek() {
                    Some('|') => {
                        self.cursor.next();
                        match self.cursor.peek() {
                            Some('/') => self.consume(Token::DoublePipeSlash),
                            _ => Ok(Some(Token::StringConcat)),
                        }
                    }
                    Some('/') => self.consume(Token::PipeSlash),
                    _ => Ok(Some(Token::Pipe)),
                }
            }
            '#' => {
                self.cursor.next();
                match self.cursor.peek() {
                    Some('>') => {
                        self.cursor.next();
                        match self.cursor.peek() {
                            Some('>') => self.consume(Token::HashLongArrow),
                            _ => Ok(Some(Token::HashArrow)),
                        }
                    }
                    _ => Ok(Some(Token::Sharp)),
                }
            }
            '@' => {
                self.cursor.next();
                match self.cursor.peek() {
                    Some('>') => self.consume(Token::AtArrow),
                    Some(ch) if self.dialect.is_identifier_start(ch) => {
                        self.cursor.next();
                        let word = self.tokenize_word(ch);
                        Ok(Some(Token::Placeholder(format!("@{}", word))))
                    }
                    _ => Ok(Some(Token::AtSign)),
                }
            }
            ':' => {
                self.cursor.next();
                match self.cursor.peek() {
                    Some(':') => self.consume(Token::DoubleColon),
                    Some(ch) if self.dialect.is_identifier_start(ch) => {
                        self.cursor.next();
                        let word = self.tokenize_word(ch);
                        Ok(Some(Token::Placeholder(format!(":{}", word))))
                    }
                    _ => Ok(Some(Token::Colon)),
                }
            }
            '?' => {
                self.cursor.next();
                match self.cursor.peek() {
                    Some('|') => self.consume(Token::QuestionPipe),
                    Some('&') => self.consume(Token::QuestionAnd),
                    _ => Ok(Some(Token::Placeholder("?".into()))),
                }
            }
            '$' => {
                self.cursor.next();
                let tail = match self.cursor.peek() {
                    Some('0'..='9') => self.cursor.take_while(|ch| ch.is_ascii_digit()),
                    Some(ch) if self.dialect.is_identifier_start(ch) => {
                        self.cursor.next();
                        self.tokenize_word(ch)
                    }
                    _ => {
                        return self.error(
                            "Placeholder marker ($) not followed by a number or word",
                            location,
                        )
                    }
                };
                Ok(Some(Token::Placeholder(format!("${}", tail))))
            }
            other => self.error(format!("Unrecognized character '{}'", other), location),
        }
    }

    fn consume(&mut self, token: Token) -> Result<Option<Token>, TokenizerError> {
        self.cursor.next();
        Ok(Some(token))
    }

    /// Finish a word whose first character was already consumed.
    fn tokenize_word(&mut self, first: char) -> String {
        let dialect = self.dialect;
        let mut s = first.to_string();
        s.push_str(&self.cursor.take_while(|ch| dialect.is_identifier_part(ch)));
        s
    }

    fn tokenize_number(&mut self, location: Location) -> Result<Token, TokenizerError> {
        let mut s = self.cursor.take_while(|ch| ch.is_ascii_digit());
        if self.cursor.peek() == Some('.') {
            s.push('.');
            self.cursor.next();
            s.push_str(&self.cursor.take_while(|ch| ch.is_ascii_digit()));
        }
        if s == "." {
            return self.error("Malformed numeric literal", location);
        }
        // exponent only counts when actually followed by digits
        if matches!(self.cursor.peek(), Some('e') | Some('E')) {
            let exponent_digits_at = match self.cursor.peek_nth(1) {
                Some('+') | Some('-') => 2,
                _ => 1,
            };
            if matches!(self.cursor.peek_nth(exponent_digits_at), Some('0'..='9')) {
                s.push(self.cursor.next().unwrap());
                if exponent_digits_at == 2 {
                    s.push(self.cursor.next().unwrap());
                }
                s.push_str(&self.cursor.take_while(|ch| ch.is_ascii_digit()));
                return Ok(Token::Number(s));
            }
        }
        // MySQL allows identifiers that start with digits; a trailing
        // identifier character turns the whole run into a word there
        if self.dialect.supports_numeric_prefix() && !s.contains('.') {
            if let Some(ch) = self.cursor.peek() {
                if self.dialect.is_identifier_part(ch) {
                    let dialect = self.dialect;
                    let rest = self.cursor.take_while(|ch| dialect.is_identifier_part(ch));
                    return Ok(Token::make_word(&format!("{}{}", s, rest), None));
                }
            }
        }
        Ok(Token::Number(s))
    }

    /// Read a `'...'` string starting at the opening quote. `''` encodes one
    /// quote; backslash escapes apply when the dialect enables them.
    fn tokenize_single_quoted_string(
        &mut self,
        location: Location,
    ) -> Result<String, TokenizerError> {
        let backslash_escapes = self.dialect.supports_string_literal_backslash_escape();
        let mut s = String::new();
        self.cursor.next(); // opening quote
        loop {
            match self.cursor.next() {
                Some('\'') => {
                    if self.cursor.peek() == Some('\'') {
                        self.cursor.next();
                        s.push('\'');
                    } else {
                        return Ok(s);
                    }
                }
                Some('\\') if backslash_escapes => match self.cursor.next() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('r') => s.push('\r'),
                    Some('0') => s.push('\0'),
                    Some(ch @ ('\'' | '"' | '\\')) => s.push(ch),
                    Some(ch) => s.push(ch),
                    None => return self.error("Unterminated string literal", location),
                },
                Some(ch) => s.push(ch),
                None => return self.error("Unterminated string literal", location),
            }
        }
    }

    /// Read a `'''...'''` string starting at the first opening quote.
    fn tokenize_triple_quoted_string(
        &mut self,
        location: Location,
    ) -> Result<String, TokenizerError> {
        self.cursor.next();
        self.cursor.next();
        self.cursor.next();
        let mut s = String::new();
        loop {
            match self.cursor.next() {
                Some('\'')
                    if self.cursor.peek() == Some('\'')
                        && self.cursor.peek_nth(1) == Some('\'') =>
                {
                    self.cursor.next();
                    self.cursor.next();
                    return Ok(s);
                }
                Some(ch) => s.push(ch),
                None => return self.error("Unterminated triple-quoted string literal", location),
            }
        }
    }
}
