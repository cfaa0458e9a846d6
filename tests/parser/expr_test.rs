use katydid::ast::{
    binary_op, col, lit_int, BinaryOperator, DataType, Expr, Ident, JsonOperator, ObjectName,
    UnaryOperator, Value,
};
use katydid::dialect::GenericDialect;
use katydid::{parse_expr, render};

/// Parse an expression and require that it renders back verbatim.
fn verified(sql: &str) -> Expr {
    let expr = parse_expr(&GenericDialect {}, sql).expect("expression should parse");
    assert_eq!(render(&expr), sql, "expression should round-trip verbatim");
    expr
}

/// Parse an expression that renders to a different canonical spelling.
fn parses_to(sql: &str, canonical: &str) -> Expr {
    let expr = parse_expr(&GenericDialect {}, sql).expect("expression should parse");
    assert_eq!(render(&expr), canonical);
    expr
}

#[test]
fn test_mul_binds_tighter_than_plus() {
    assert_eq!(
        verified("1 + 2 * 3"),
        binary_op(
            lit_int(1),
            BinaryOperator::Plus,
            binary_op(lit_int(2), BinaryOperator::Multiply, lit_int(3)),
        )
    );
}

#[test]
fn test_same_precedence_is_left_associative() {
    assert_eq!(
        verified("1 - 2 - 3"),
        binary_op(
            binary_op(lit_int(1), BinaryOperator::Minus, lit_int(2)),
            BinaryOperator::Minus,
            lit_int(3),
        )
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(
        verified("a OR b AND c"),
        binary_op(
            col("a"),
            BinaryOperator::Or,
            binary_op(col("b"), BinaryOperator::And, col("c")),
        )
    );
}

#[test]
fn test_comparison_binds_tighter_than_not() {
    // NOT a = b reads as NOT (a = b)
    assert_eq!(
        verified("NOT a = b"),
        Expr::UnaryOp {
            op: UnaryOperator::Not,
            expr: Box::new(binary_op(col("a"), BinaryOperator::Eq, col("b"))),
        }
    );
}

#[test]
fn test_exponent_is_right_associative() {
    assert_eq!(
        verified("2 ^ 3 ^ 4"),
        binary_op(
            lit_int(2),
            BinaryOperator::Pow,
            binary_op(lit_int(3), BinaryOperator::Pow, lit_int(4)),
        )
    );
}

#[test]
fn test_every_lower_tier_yields_to_the_next() {
    // one probe per adjacent tier pair: x a y b z parses as x a (y b z)
    assert_eq!(
        verified("a = b | c"),
        binary_op(
            col("a"),
            BinaryOperator::Eq,
            binary_op(col("b"), BinaryOperator::BitwiseOr, col("c")),
        )
    );
    assert_eq!(
        verified("a | b & c"),
        binary_op(
            col("a"),
            BinaryOperator::BitwiseOr,
            binary_op(col("b"), BinaryOperator::BitwiseAnd, col("c")),
        )
    );
    assert_eq!(
        verified("a & b << c"),
        binary_op(
            col("a"),
            BinaryOperator::BitwiseAnd,
            binary_op(col("b"), BinaryOperator::ShiftLeft, col("c")),
        )
    );
    assert_eq!(
        verified("a << b + c"),
        binary_op(
            col("a"),
            BinaryOperator::ShiftLeft,
            binary_op(col("b"), BinaryOperator::Plus, col("c")),
        )
    );
    assert_eq!(
        verified("a + b % c"),
        binary_op(
            col("a"),
            BinaryOperator::Plus,
            binary_op(col("b"), BinaryOperator::Modulo, col("c")),
        )
    );
}

#[test]
fn test_nested_parens_are_preserved() {
    assert_eq!(
        verified("(1 + 2) * 3"),
        binary_op(
            Expr::Nested(Box::new(binary_op(
                lit_int(1),
                BinaryOperator::Plus,
                lit_int(2),
            ))),
            BinaryOperator::Multiply,
            lit_int(3),
        )
    );
}

#[test]
fn test_unary_operators() {
    assert_eq!(
        verified("-1"),
        Expr::UnaryOp {
            op: UnaryOperator::Minus,
            expr: Box::new(lit_int(1)),
        }
    );
    verified("~bits");
    verified("NOT active");
}

#[test]
fn test_compound_identifier() {
    assert_eq!(
        verified("catalog.schema.table"),
        Expr::CompoundIdentifier(vec![
            Ident::new("catalog"),
            Ident::new("schema"),
            Ident::new("table"),
        ])
    );
}

#[test]
fn test_literals() {
    assert_eq!(verified("1.5e10"), Expr::Value(Value::Number("1.5e10".into())));
    assert_eq!(verified(".5"), Expr::Value(Value::Number(".5".into())));
    assert_eq!(
        verified("'it''s'"),
        Expr::Value(Value::SingleQuotedString("it's".into()))
    );
    verified("TRUE");
    verified("FALSE");
    verified("NULL");
    verified("N'text'");
    verified("X'ff'");
    verified("B'01'");
    verified("$1");
    verified("?");
}

#[test]
fn test_typed_string() {
    assert_eq!(
        verified("DATE '2024-01-15'"),
        Expr::TypedString {
            data_type: DataType::Date,
            value: "2024-01-15".into(),
        }
    );
    verified("TIMESTAMP '2024-01-15 10:30:00'");
}

#[test]
fn test_cast_forms() {
    let expected = Expr::Cast {
        expr: Box::new(col("a")),
        data_type: DataType::Int(None),
    };
    assert_eq!(verified("CAST(a AS INT)"), expected);
    // :: canonicalises to CAST
    assert_eq!(parses_to("a::INT", "CAST(a AS INT)"), expected);
    verified("TRY_CAST(a AS VARCHAR(10))");
}

#[test]
fn test_case_expression() {
    verified("CASE WHEN a > 0 THEN 'pos' WHEN a < 0 THEN 'neg' ELSE 'zero' END");
    verified("CASE a WHEN 1 THEN 'one' END");
}

#[test]
fn test_function_calls() {
    verified("count(*)");
    verified("count(DISTINCT a)");
    verified("coalesce(a, b, 0)");
    verified("now()");
    assert_eq!(
        verified("lower(name)"),
        katydid::ast::func("lower", [col("name")])
    );
}

#[test]
fn test_in_list_and_subquery() {
    assert_eq!(
        verified("a IN (1, 2, 3)"),
        Expr::InList {
            expr: Box::new(col("a")),
            list: vec![lit_int(1), lit_int(2), lit_int(3)],
            negated: false,
        }
    );
    verified("a NOT IN (1, 2)");
    verified("a IN (SELECT b FROM t)");
    verified("a NOT IN (SELECT b FROM t)");
}

#[test]
fn test_between() {
    assert_eq!(
        verified("age NOT BETWEEN 25 AND 32"),
        Expr::Between {
            expr: Box::new(col("age")),
            negated: true,
            low: Box::new(lit_int(25)),
            high: Box::new(lit_int(32)),
        }
    );
    // the AND inside BETWEEN does not terminate the range
    verified("a BETWEEN 1 AND 2 AND b");
}

#[test]
fn test_pattern_matching() {
    verified("name LIKE '%ab%'");
    verified("name NOT LIKE '%ab%'");
    verified("name ILIKE 'ab%'");
    verified("name SIMILAR TO '(a|b)*'");
    assert_eq!(
        verified("name LIKE '%a' ESCAPE '!'"),
        Expr::Like {
            negated: false,
            expr: Box::new(col("name")),
            pattern: Box::new(Expr::Value(Value::SingleQuotedString("%a".into()))),
            escape_char: Some('!'),
        }
    );
}

#[test]
fn test_is_forms() {
    verified("a IS NULL");
    verified("a IS NOT NULL");
    verified("a IS TRUE");
    verified("a IS NOT TRUE");
    verified("a IS FALSE");
    verified("a IS NOT FALSE");
    verified("a IS DISTINCT FROM b");
    verified("a IS NOT DISTINCT FROM b");
}

#[test]
fn test_collate_and_at_time_zone() {
    assert_eq!(
        verified("name COLLATE de_DE"),
        Expr::Collate {
            expr: Box::new(col("name")),
            collation: ObjectName(vec![Ident::new("de_DE")]),
        }
    );
    verified("created_at AT TIME ZONE 'UTC'");
}

#[test]
fn test_extract_substring_trim_position() {
    verified("EXTRACT(YEAR FROM d)");
    verified("EXTRACT(SECOND FROM d)");
    verified("SUBSTRING(s FROM 1 FOR 3)");
    verified("SUBSTRING(s FROM 2)");
    parses_to("SUBSTRING(s, 1, 3)", "SUBSTRING(s FROM 1 FOR 3)");
    verified("TRIM(s)");
    verified("TRIM(LEADING ' ' FROM s)");
    verified("TRIM(BOTH 'x' FROM s)");
    verified("POSITION(needle IN haystack)");
}

#[test]
fn test_interval() {
    verified("INTERVAL '1' DAY");
    verified("INTERVAL '2 hours'");
}

#[test]
fn test_array_and_tuple_and_subscript() {
    assert_eq!(
        verified("ARRAY[1, 2, 3]"),
        Expr::Array {
            elem: vec![lit_int(1), lit_int(2), lit_int(3)],
            named: true,
        }
    );
    verified("[1, 2]");
    verified("(a, b, c)");
    assert_eq!(
        verified("arr[1]"),
        Expr::Subscript {
            expr: Box::new(col("arr")),
            index: Box::new(lit_int(1)),
        }
    );
}

#[test]
fn test_exists() {
    verified("EXISTS (SELECT 1)");
    assert_eq!(
        verified("NOT EXISTS (SELECT 1)"),
        Expr::Exists {
            subquery: match verified("EXISTS (SELECT 1)") {
                Expr::Exists { subquery, .. } => subquery,
                other => panic!("expected EXISTS, got {:?}", other),
            },
            negated: true,
        }
    );
}

#[test]
fn test_scalar_subquery() {
    verified("(SELECT max(a) FROM t)");
}

#[test]
fn test_json_access_operators() {
    assert_eq!(
        verified("data -> 'key'"),
        Expr::JsonAccess {
            left: Box::new(col("data")),
            operator: JsonOperator::Arrow,
            right: Box::new(Expr::Value(Value::SingleQuotedString("key".into()))),
        }
    );
    verified("data ->> 'key'");
    verified("data #> 'path'");
    verified("data #>> 'path'");
    verified("data @> other");
    verified("data <@ other");
    verified("tags ?| other");
    verified("tags ?& other");
    // JSON access binds tighter than comparison
    assert_eq!(
        render(&verified("data -> 'k' = b")),
        "data -> 'k' = b"
    );
}

#[test]
fn test_string_concat_and_overlap() {
    verified("first || ' ' || last");
    verified("a && b");
}

#[test]
fn test_error_reports_position_of_offender() {
    let err = parse_expr(&GenericDialect {}, "1 +").unwrap_err();
    assert!(err.message.contains("Expected an expression"));
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 4);
}
