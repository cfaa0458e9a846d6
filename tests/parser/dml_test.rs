use katydid::ast::{OnConflictAction, SetExpr, Statement, TransactionMode};
use katydid::dialect::{GenericDialect, PostgresDialect};
use katydid::{parse, render};

fn verified(sql: &str) -> Statement {
    let mut statements = parse(&GenericDialect {}, sql).expect("statement should parse");
    assert_eq!(statements.len(), 1);
    let statement = statements.pop().expect("one statement");
    assert_eq!(render(&statement), sql, "statement should round-trip verbatim");
    statement
}

fn parses_to(sql: &str, canonical: &str) -> Statement {
    let mut statements = parse(&GenericDialect {}, sql).expect("statement should parse");
    let statement = statements.pop().expect("one statement");
    assert_eq!(render(&statement), canonical);
    statement
}

#[test]
fn test_insert_values() {
    let statement = verified("INSERT INTO t (a, b) VALUES (1, 'x'), (2, 'y')");
    match statement {
        Statement::Insert(insert) => {
            assert_eq!(insert.columns.len(), 2);
            assert!(matches!(*insert.source.body, SetExpr::Values(_)));
        }
        other => panic!("expected INSERT, got {:?}", other),
    }
    verified("INSERT INTO t VALUES (1)");
}

#[test]
fn test_insert_from_query() {
    verified("INSERT INTO t (a) SELECT a FROM u");
    // the parenthesized group here is the source, not a column list
    verified("INSERT INTO t (SELECT a FROM u)");
}

#[test]
fn test_insert_on_conflict() {
    let statement = verified("INSERT INTO t (a) VALUES (1) ON CONFLICT (a) DO NOTHING");
    match statement {
        Statement::Insert(insert) => {
            let on_conflict = insert.on_conflict.expect("on conflict");
            assert_eq!(on_conflict.conflict_target.len(), 1);
            assert!(matches!(on_conflict.action, OnConflictAction::DoNothing));
        }
        other => panic!("expected INSERT, got {:?}", other),
    }
    verified("INSERT INTO t (a, b) VALUES (1, 2) ON CONFLICT (a) DO UPDATE SET b = 2 RETURNING a");
}

#[test]
fn test_update() {
    verified("UPDATE t SET a = 1, b = b + 1 WHERE c = 3");
    verified("UPDATE t SET a = u.a FROM u WHERE t.id = u.id");
    verified("UPDATE t AS x SET x.a = 1");
    verified("UPDATE t SET a = 1 RETURNING a, b");
}

#[test]
fn test_delete() {
    verified("DELETE FROM t WHERE a = 1");
    verified("DELETE FROM t USING u WHERE t.id = u.id");
    verified("DELETE FROM t WHERE stale RETURNING id");
}

#[test]
fn test_transactions() {
    let statement = verified("START TRANSACTION READ ONLY, ISOLATION LEVEL SERIALIZABLE");
    match statement {
        Statement::StartTransaction { modes, begin, .. } => {
            assert!(!begin);
            assert_eq!(modes.len(), 2);
            assert!(matches!(modes[0], TransactionMode::AccessMode(_)));
            assert!(matches!(modes[1], TransactionMode::IsolationLevel(_)));
        }
        other => panic!("expected START TRANSACTION, got {:?}", other),
    }
    parses_to("BEGIN", "BEGIN TRANSACTION");
    verified("BEGIN TRANSACTION");
    verified("COMMIT");
    verified("COMMIT AND CHAIN");
    parses_to("COMMIT AND NO CHAIN", "COMMIT");
    verified("ROLLBACK");
    verified("ROLLBACK AND CHAIN");
    parses_to("ROLLBACK TRANSACTION", "ROLLBACK");
}

#[test]
fn test_set_and_show() {
    verified("SET search_path = 'public'");
    parses_to("SET search_path TO 'public'", "SET search_path = 'public'");
    verified("SET LOCAL statement_timeout = 1000");
    verified("SHOW max_connections");

    // multi-assignment needs the dialect capability
    let statements = parse(&PostgresDialect {}, "SET (a, b) = (1, 2)").unwrap();
    assert_eq!(render(&statements[0]), "SET (a, b) = (1, 2)");
}

#[test]
fn test_grant_revoke() {
    verified("GRANT SELECT (a, b), INSERT ON t1, t2 TO alice, bob WITH GRANT OPTION");
    verified("GRANT ALL PRIVILEGES ON SCHEMA s TO admin");
    parses_to("GRANT ALL ON TABLE t TO carol", "GRANT ALL ON t TO carol");
    verified("REVOKE USAGE, CREATE ON SCHEMA s FROM bob CASCADE");
    verified("REVOKE SELECT ON t FROM alice");
}

#[test]
fn test_use() {
    verified("USE analytics");
}

#[test]
fn test_explain() {
    verified("EXPLAIN SELECT 1");
    verified("EXPLAIN ANALYZE VERBOSE SELECT a FROM t");
    verified("EXPLAIN DELETE FROM t WHERE a = 1");
}

#[test]
fn test_multiple_statements_with_semicolons() {
    let statements = parse(
        &GenericDialect {},
        "INSERT INTO t VALUES (1); DELETE FROM t; SELECT * FROM t;",
    )
    .unwrap();
    assert_eq!(statements.len(), 3);
}
