//! Capability-flag gating: the same input accepted under one dialect and
//! rejected (or read differently) under another.

use katydid::ast::{BinaryOperator, Expr, SelectItem, SetExpr, Statement, TransactionModifier};
use katydid::dialect::{
    AnsiDialect, BigQueryDialect, Dialect, DuckDbDialect, GenericDialect, MsSqlDialect,
    MySqlDialect, PostgresDialect, SnowflakeDialect,
};
use katydid::{parse, parse_expr, render};

fn verified_with(dialect: &dyn Dialect, sql: &str) -> Statement {
    let mut statements = parse(dialect, sql).expect("statement should parse");
    assert_eq!(statements.len(), 1);
    let statement = statements.pop().expect("one statement");
    assert_eq!(render(&statement), sql);
    statement
}

fn select_of(statement: &Statement) -> &katydid::ast::Select {
    match statement {
        Statement::Query(query) => match query.body.as_ref() {
            SetExpr::Select(select) => select,
            other => panic!("expected a SELECT body, got {:?}", other),
        },
        other => panic!("expected a query, got {:?}", other),
    }
}

#[test]
fn test_projection_trailing_commas() {
    // normalised away where supported
    for dialect in [&SnowflakeDialect {} as &dyn Dialect, &DuckDbDialect {}] {
        let mut statements = parse(dialect, "SELECT a, b, FROM t").unwrap();
        assert_eq!(render(&statements.pop().unwrap()), "SELECT a, b FROM t");
    }
    assert!(parse(&AnsiDialect {}, "SELECT a, b, FROM t").is_err());
}

#[test]
fn test_general_trailing_commas() {
    let mut statements = parse(&BigQueryDialect {}, "SELECT f(1, 2,) FROM t").unwrap();
    assert_eq!(render(&statements.pop().unwrap()), "SELECT f(1, 2) FROM t");
    assert!(parse(&PostgresDialect {}, "SELECT f(1, 2,) FROM t").is_err());
}

#[test]
fn test_in_empty_list() {
    let expr = parse_expr(&GenericDialect {}, "a IN ()").unwrap();
    assert_eq!(render(&expr), "a IN ()");
    assert!(parse_expr(&PostgresDialect {}, "a IN ()").is_err());
}

#[test]
fn test_group_by_expression_gating() {
    // grouping expression where supported ...
    let statement = verified_with(&GenericDialect {}, "SELECT a FROM t GROUP BY ROLLUP (a)");
    assert!(matches!(select_of(&statement).group_by[0], Expr::Rollup(_)));
    // ... plain function call where not
    let statement = verified_with(&AnsiDialect {}, "SELECT a FROM t GROUP BY ROLLUP(a)");
    assert!(matches!(select_of(&statement).group_by[0], Expr::Function(_)));
}

#[test]
fn test_substring_from_for_gating() {
    let expr = parse_expr(&GenericDialect {}, "SUBSTRING(s FROM 1 FOR 3)").unwrap();
    assert_eq!(render(&expr), "SUBSTRING(s FROM 1 FOR 3)");

    let err = parse_expr(&MsSqlDialect {}, "SUBSTRING(s FROM 1 FOR 3)").unwrap_err();
    assert!(err.message.contains("Expected )"));

    // the comma form works everywhere
    let expr = parse_expr(&MsSqlDialect {}, "SUBSTRING(s, 1, 3)").unwrap();
    assert_eq!(render(&expr), "SUBSTRING(s FROM 1 FOR 3)");
}

#[test]
fn test_convert_argument_order() {
    let expected = "CAST(a AS INT)";
    assert_eq!(
        render(&parse_expr(&MsSqlDialect {}, "CONVERT(INT, a)").unwrap()),
        expected
    );
    assert_eq!(
        render(&parse_expr(&GenericDialect {}, "CONVERT(a, INT)").unwrap()),
        expected
    );
}

#[test]
fn test_named_function_argument_operators() {
    let expr = parse_expr(&SnowflakeDialect {}, "f(x => 1)").unwrap();
    assert_eq!(render(&expr), "f(x => 1)");

    let expr = parse_expr(&DuckDbDialect {}, "f(x = 1)").unwrap();
    assert_eq!(render(&expr), "f(x = 1)");

    // without the flag, `=` stays a comparison
    let expr = parse_expr(&GenericDialect {}, "f(x = 1)").unwrap();
    match expr {
        Expr::Function(function) => match &function.args[0] {
            katydid::ast::FunctionArg::Unnamed(Expr::BinaryOp { op, .. }) => {
                assert_eq!(*op, BinaryOperator::Eq)
            }
            other => panic!("expected a comparison argument, got {:?}", other),
        },
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_filter_during_aggregation_gating() {
    verified_with(&PostgresDialect {}, "SELECT count(*) FILTER (WHERE a) FROM t");
    // without the flag FILTER reads as a column alias
    let statement = verified_with(&AnsiDialect {}, "SELECT count(*) AS FILTER FROM t");
    assert!(matches!(
        select_of(&statement).projection[0],
        SelectItem::ExprWithAlias { .. }
    ));
}

#[test]
fn test_window_function_null_treatment_gating() {
    let sql = "SELECT lag(x IGNORE NULLS) OVER (ORDER BY y) FROM t";
    verified_with(&BigQueryDialect {}, sql);
    assert!(parse(&AnsiDialect {}, sql).is_err());
}

#[test]
fn test_named_window_reference_gating() {
    let sql = "SELECT sum(a) OVER w FROM t WINDOW w AS (PARTITION BY b)";
    verified_with(&MySqlDialect {}, sql);
    assert!(parse(&AnsiDialect {}, sql).is_err());
}

#[test]
fn test_select_wildcard_except_gating() {
    verified_with(&BigQueryDialect {}, "SELECT * EXCEPT (a, b) FROM t");
    assert!(parse(&AnsiDialect {}, "SELECT * EXCEPT (a, b) FROM t").is_err());
}

#[test]
fn test_dictionary_syntax_gating() {
    let expr = parse_expr(&DuckDbDialect {}, "{'a': 1, 'b': two}").unwrap();
    assert_eq!(render(&expr), "{'a': 1, 'b': two}");
    assert!(parse_expr(&AnsiDialect {}, "{'a': 1}").is_err());
}

#[test]
fn test_lambda_gating() {
    let expr = parse_expr(&DuckDbDialect {}, "list_transform(l, x -> x + 1)").unwrap();
    assert_eq!(render(&expr), "list_transform(l, x -> x + 1)");

    let expr = parse_expr(&SnowflakeDialect {}, "filter(l, (x, y) -> x > y)").unwrap();
    assert_eq!(render(&expr), "filter(l, (x, y) -> x > y)");
}

#[test]
fn test_connect_by_gating() {
    let sql = "SELECT emp FROM t START WITH mgr IS NULL CONNECT BY prior_id = id";
    verified_with(&SnowflakeDialect {}, sql);
    assert!(parse(&AnsiDialect {}, sql).is_err());
}

#[test]
fn test_start_transaction_modifier_gating() {
    let statement = verified_with(&GenericDialect {}, "BEGIN DEFERRED TRANSACTION");
    match statement {
        Statement::StartTransaction { modifier, .. } => {
            assert_eq!(modifier, Some(TransactionModifier::Deferred))
        }
        other => panic!("expected BEGIN, got {:?}", other),
    }
}

#[test]
fn test_parenthesized_set_variables_gating() {
    verified_with(&PostgresDialect {}, "SET (a, b) = (1, 2)");
    assert!(parse(&MySqlDialect {}, "SET (a, b) = (1, 2)").is_err());
}

#[test]
fn test_mysql_div_operator_via_infix_hook() {
    let expr = parse_expr(&MySqlDialect {}, "a DIV b + c").unwrap();
    // DIV binds like division, tighter than +
    assert_eq!(render(&expr), "a DIV b + c");
    match expr {
        Expr::BinaryOp { op, left, .. } => {
            assert_eq!(op, BinaryOperator::Plus);
            assert!(matches!(
                *left,
                Expr::BinaryOp {
                    op: BinaryOperator::IntegerDivide,
                    ..
                }
            ));
        }
        other => panic!("expected a binary op, got {:?}", other),
    }
}

#[test]
fn test_triple_quoted_strings_gating() {
    let expr = parse_expr(&BigQueryDialect {}, "'''a'b'''").unwrap();
    assert_eq!(render(&expr), "'''a'b'''");
}

#[test]
fn test_backslash_escape_gating() {
    let expr = parse_expr(&MySqlDialect {}, r"'a\nb'").unwrap();
    assert_eq!(
        expr,
        Expr::Value(katydid::ast::Value::SingleQuotedString("a\nb".into()))
    );
    let expr = parse_expr(&AnsiDialect {}, r"'a\nb'").unwrap();
    assert_eq!(
        expr,
        Expr::Value(katydid::ast::Value::SingleQuotedString(r"a\nb".into()))
    );
}
