use katydid::dialect::{GenericDialect, MsSqlDialect, MySqlDialect};
use katydid::keywords::Keyword;
use katydid::tokenizer::{Location, Token, Tokenizer};

fn tokenize(sql: &str) -> Vec<Token> {
    let dialect = GenericDialect {};
    let mut tokens = Tokenizer::new(&dialect, sql)
        .tokenize()
        .expect("tokenizing should succeed");
    assert_eq!(tokens.pop().map(|t| t.token), Some(Token::Eof));
    tokens.into_iter().map(|t| t.token).collect()
}

#[test]
fn test_tokenize_simple_select() {
    let tokens = tokenize("SELECT * FROM customers WHERE id = 1");
    assert_eq!(
        tokens,
        vec![
            Token::make_keyword("SELECT"),
            Token::Mul,
            Token::make_keyword("FROM"),
            Token::make_word("customers", None),
            Token::make_keyword("WHERE"),
            Token::make_word("id", None),
            Token::Eq,
            Token::Number("1".into()),
        ]
    );
}

#[test]
fn test_keyword_resolution_is_case_insensitive() {
    for sql in ["select", "SELECT", "Select", "sElEcT"] {
        match &tokenize(sql)[0] {
            Token::Word(w) => {
                assert_eq!(w.keyword, Some(Keyword::SELECT));
                // original spelling is preserved for round-tripping
                assert_eq!(w.value, sql);
            }
            other => panic!("expected a word, got {:?}", other),
        }
    }
}

#[test]
fn test_quoted_identifiers_are_not_keywords() {
    match &tokenize(r#""select""#)[0] {
        Token::Word(w) => {
            assert_eq!(w.keyword, None);
            assert_eq!(w.quote_style, Some('"'));
        }
        other => panic!("expected a word, got {:?}", other),
    }
}

#[test]
fn test_dialect_quoting_styles() {
    let mysql = MySqlDialect {};
    let tokens = Tokenizer::new(&mysql, "`a b`").tokenize().unwrap();
    assert_eq!(tokens[0].token, Token::make_word("a b", Some('`')));

    let mssql = MsSqlDialect {};
    let tokens = Tokenizer::new(&mssql, "[a b]").tokenize().unwrap();
    assert_eq!(tokens[0].token, Token::make_word("a b", Some('[')));
}

#[test]
fn test_string_literal_prefixes() {
    assert_eq!(
        tokenize("N'text' X'ff' x'ff' B'01' b'01'"),
        vec![
            Token::NationalStringLiteral("text".into()),
            Token::HexStringLiteral("ff".into()),
            Token::HexStringLiteral("ff".into()),
            Token::BitStringLiteral("01".into()),
            Token::BitStringLiteral("01".into()),
        ]
    );
}

#[test]
fn test_prefix_letters_without_quote_are_words() {
    assert_eq!(
        tokenize("N x B"),
        vec![
            Token::make_word("N", None),
            Token::make_word("x", None),
            Token::make_word("B", None),
        ]
    );
}

#[test]
fn test_comments_are_discarded_but_positions_advance() {
    let dialect = GenericDialect {};
    let tokens = Tokenizer::new(&dialect, "-- leading comment\nSELECT 1")
        .tokenize()
        .unwrap();
    assert_eq!(tokens[0].token, Token::make_keyword("SELECT"));
    assert_eq!(tokens[0].location, Location { line: 2, column: 1 });
}

#[test]
fn test_nested_block_comments() {
    assert_eq!(
        tokenize("1 /* outer /* inner */ still outer */ 2"),
        vec![Token::Number("1".into()), Token::Number("2".into())]
    );
}

#[test]
fn test_longest_first_operator_matching() {
    assert_eq!(
        tokenize("->> -> #>> #> >= > <= < <> <@ << >>"),
        vec![
            Token::LongArrow,
            Token::Arrow,
            Token::HashLongArrow,
            Token::HashArrow,
            Token::GtEq,
            Token::Gt,
            Token::LtEq,
            Token::Lt,
            Token::Neq,
            Token::ArrowAt,
            Token::ShiftLeft,
            Token::ShiftRight,
        ]
    );
}

#[test]
fn test_math_operators() {
    assert_eq!(
        tokenize("|/ ||/ || | ?| ?& ^ % ~ !"),
        vec![
            Token::PipeSlash,
            Token::DoublePipeSlash,
            Token::StringConcat,
            Token::Pipe,
            Token::QuestionPipe,
            Token::QuestionAnd,
            Token::Caret,
            Token::Mod,
            Token::Tilde,
            Token::ExclamationMark,
        ]
    );
}

#[test]
fn test_location_tracking_across_lines() {
    let dialect = GenericDialect {};
    let tokens = Tokenizer::new(&dialect, "SELECT a,\n       b\nFROM t")
        .tokenize()
        .unwrap();
    let locations: Vec<(u64, u64)> = tokens
        .iter()
        .map(|t| (t.location.line, t.location.column))
        .collect();
    assert_eq!(
        locations,
        vec![
            (1, 1),  // SELECT
            (1, 8),  // a
            (1, 9),  // ,
            (2, 8),  // b
            (3, 1),  // FROM
            (3, 6),  // t
            (3, 7),  // EOF
        ]
    );
}

#[test]
fn test_error_positions() {
    let dialect = GenericDialect {};
    let err = Tokenizer::new(&dialect, "SELECT\n 'oops")
        .tokenize()
        .unwrap_err();
    assert_eq!((err.line, err.column), (2, 2));

    let err = Tokenizer::new(&dialect, "[ /* unterminated")
        .tokenize()
        .unwrap_err();
    assert_eq!((err.line, err.column), (1, 3));
}

#[test]
fn test_dollar_placeholder_requires_suffix() {
    let dialect = GenericDialect {};
    let err = Tokenizer::new(&dialect, "$ 1").tokenize().unwrap_err();
    assert!(err.message.contains("Placeholder"));
}
