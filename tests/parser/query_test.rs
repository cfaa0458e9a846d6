use katydid::ast::{
    Expr, Ident, JoinConstraint, JoinOperator, ObjectName, Select, SelectItem, SetExpr,
    SetOperator, SetQuantifier, Statement, TableFactor, Value,
};
use katydid::dialect::GenericDialect;
use katydid::{parse, render};

/// Parse a single statement and require that it renders back verbatim.
fn verified(sql: &str) -> Statement {
    let mut statements = parse(&GenericDialect {}, sql).expect("statement should parse");
    assert_eq!(statements.len(), 1);
    let statement = statements.pop().expect("one statement");
    assert_eq!(render(&statement), sql, "statement should round-trip verbatim");
    statement
}

/// Parse a single statement that renders to a different canonical spelling.
fn parses_to(sql: &str, canonical: &str) -> Statement {
    let mut statements = parse(&GenericDialect {}, sql).expect("statement should parse");
    assert_eq!(statements.len(), 1);
    let statement = statements.pop().expect("one statement");
    assert_eq!(render(&statement), canonical);
    statement
}

fn body_select(statement: &Statement) -> &Select {
    match statement {
        Statement::Query(query) => match query.body.as_ref() {
            SetExpr::Select(select) => select,
            other => panic!("expected a SELECT body, got {:?}", other),
        },
        other => panic!("expected a query, got {:?}", other),
    }
}

#[test]
fn test_select_projection_forms() {
    let statement = verified("SELECT a, b AS two, * FROM t");
    let select = body_select(&statement);
    assert_eq!(select.projection.len(), 3);
    assert!(matches!(select.projection[0], SelectItem::UnnamedExpr(_)));
    assert!(matches!(select.projection[1], SelectItem::ExprWithAlias { .. }));
    assert!(matches!(select.projection[2], SelectItem::Wildcard(_)));
}

#[test]
fn test_qualified_wildcard() {
    let statement = verified("SELECT t.* FROM t");
    let select = body_select(&statement);
    match &select.projection[0] {
        SelectItem::QualifiedWildcard(name, _) => {
            assert_eq!(name, &ObjectName(vec![Ident::new("t")]))
        }
        other => panic!("expected a qualified wildcard, got {:?}", other),
    }
}

#[test]
fn test_keywords_are_uppercased_identifiers_kept() {
    parses_to("select MyColumn from MyTable", "SELECT MyColumn FROM MyTable");
}

#[test]
fn test_implicit_alias_gets_canonical_as() {
    parses_to("SELECT a b FROM t x", "SELECT a AS b FROM t AS x");
}

#[test]
fn test_select_distinct() {
    verified("SELECT DISTINCT a FROM t");
    verified("SELECT DISTINCT ON (a) a, b FROM t");
}

#[test]
fn test_where_group_having() {
    verified("SELECT a, sum(b) FROM t WHERE b > 0 GROUP BY a HAVING sum(b) > 10");
}

#[test]
fn test_joins() {
    let statement =
        verified("SELECT * FROM a JOIN b ON a.id = b.id LEFT JOIN c USING(id) CROSS JOIN d");
    let select = body_select(&statement);
    let joins = &select.from[0].joins;
    assert_eq!(joins.len(), 3);
    assert!(matches!(joins[0].join_operator, JoinOperator::Inner(JoinConstraint::On(_))));
    assert!(matches!(
        joins[1].join_operator,
        JoinOperator::LeftOuter(JoinConstraint::Using(_))
    ));
    assert!(matches!(joins[2].join_operator, JoinOperator::CrossJoin));
}

#[test]
fn test_outer_join_noise_word_is_dropped() {
    parses_to(
        "SELECT * FROM a LEFT OUTER JOIN b ON TRUE",
        "SELECT * FROM a LEFT JOIN b ON TRUE",
    );
    verified("SELECT * FROM a RIGHT JOIN b ON TRUE");
    verified("SELECT * FROM a FULL JOIN b ON TRUE");
}

#[test]
fn test_natural_join() {
    verified("SELECT * FROM a NATURAL JOIN b");
}

#[test]
fn test_derived_table_and_lateral() {
    verified("SELECT * FROM (SELECT 1) AS sub");
    verified("SELECT * FROM t, LATERAL (SELECT t.a) AS l");
}

#[test]
fn test_nested_join() {
    verified("SELECT * FROM (a JOIN b ON a.id = b.id) AS ab");
}

#[test]
fn test_order_by_limit_offset_fetch_lock() {
    verified("SELECT a FROM t ORDER BY a DESC NULLS LAST, b LIMIT 10 OFFSET 5 ROWS");
    verified("SELECT a FROM t FETCH FIRST 3 ROWS ONLY");
    parses_to(
        "SELECT a FROM t FETCH NEXT 3 ROWS WITH TIES",
        "SELECT a FROM t FETCH FIRST 3 ROWS WITH TIES",
    );
    verified("SELECT a FROM t FOR UPDATE");
    verified("SELECT a FROM t FOR SHARE");
}

#[test]
fn test_set_operations_precedence() {
    // INTERSECT binds tighter than UNION
    let statement = verified("SELECT 1 UNION SELECT 2 INTERSECT SELECT 3");
    match statement {
        Statement::Query(query) => match *query.body {
            SetExpr::SetOperation { op, ref right, .. } => {
                assert_eq!(op, SetOperator::Union);
                assert!(matches!(
                    right.as_ref(),
                    SetExpr::SetOperation {
                        op: SetOperator::Intersect,
                        ..
                    }
                ));
            }
            other => panic!("expected a set operation, got {:?}", other),
        },
        other => panic!("expected a query, got {:?}", other),
    }
}

#[test]
fn test_union_all_and_except() {
    let statement = verified("SELECT 1 UNION ALL SELECT 2");
    match statement {
        Statement::Query(query) => match *query.body {
            SetExpr::SetOperation { set_quantifier, .. } => {
                assert_eq!(set_quantifier, SetQuantifier::All)
            }
            other => panic!("expected a set operation, got {:?}", other),
        },
        other => panic!("expected a query, got {:?}", other),
    }
    verified("SELECT 1 EXCEPT SELECT 2");
    verified("SELECT 1 UNION DISTINCT SELECT 2");
}

#[test]
fn test_parenthesized_set_operand() {
    verified("(SELECT 1 ORDER BY 1) UNION SELECT 2");
}

#[test]
fn test_values_statement() {
    verified("VALUES (1, 'a'), (2, 'b')");
}

#[test]
fn test_ctes() {
    verified("WITH cte AS (SELECT 1) SELECT * FROM cte");
    verified("WITH RECURSIVE r (n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM r) SELECT * FROM r");
    verified("WITH a AS (SELECT 1), b AS (SELECT 2) SELECT * FROM a JOIN b ON TRUE");
}

#[test]
fn test_window_functions() {
    verified("SELECT row_number() OVER (PARTITION BY a ORDER BY b DESC) FROM t");
    verified(
        "SELECT sum(x) OVER (ORDER BY y ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) FROM t",
    );
    verified("SELECT sum(x) OVER (ROWS 2 PRECEDING) FROM t");
    verified("SELECT sum(x) OVER (GROUPS BETWEEN 1 PRECEDING AND 1 FOLLOWING) FROM t");
}

#[test]
fn test_aggregate_filter_clause() {
    verified("SELECT count(*) FILTER (WHERE a > 0) FROM t");
}

#[test]
fn test_group_by_grouping_expressions() {
    verified("SELECT a, b FROM t GROUP BY ROLLUP (a, (a, b))");
    verified("SELECT a, b FROM t GROUP BY CUBE (a, b)");
    verified("SELECT a, b FROM t GROUP BY GROUPING SETS ((a), (a, b), ())");
}

#[test]
fn test_quoted_identifiers_round_trip() {
    verified(r#"SELECT "my col" FROM "my table""#);
    verified(r#"SELECT "a""b" FROM t"#);
}

#[test]
fn test_subquery_expression_in_where() {
    verified("SELECT a FROM t WHERE a = (SELECT max(a) FROM t)");
    verified("SELECT a FROM t WHERE EXISTS (SELECT 1 FROM u WHERE u.id = t.id)");
}

#[test]
fn test_select_without_from() {
    let statement = verified("SELECT 1");
    let select = body_select(&statement);
    assert!(select.from.is_empty());
    assert_eq!(
        select.projection[0],
        SelectItem::UnnamedExpr(Expr::Value(Value::Number("1".into())))
    );
}

#[test]
fn test_table_factor_shapes() {
    let statement = verified("SELECT * FROM db.schema.t AS x (a, b)");
    let select = body_select(&statement);
    match &select.from[0].relation {
        TableFactor::Table { name, alias } => {
            assert_eq!(name.0.len(), 3);
            let alias = alias.as_ref().expect("alias");
            assert_eq!(alias.name, Ident::new("x"));
            assert_eq!(alias.columns.len(), 2);
        }
        other => panic!("expected a table, got {:?}", other),
    }
}

#[test]
fn test_missing_body_is_an_error() {
    let err = parse(&GenericDialect {}, "WITH cte AS (SELECT 1)").unwrap_err();
    assert!(err.message.contains("SELECT, VALUES, or a subquery"));
}
