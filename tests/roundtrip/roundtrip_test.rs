//! The round-trip law: for any statement parsed from well-formed input,
//! rendering and re-parsing yields a structurally equal tree.

use katydid::ast::Statement;
use katydid::dialect::{Dialect, GenericDialect};
use katydid::{parse, render};

fn assert_roundtrip(dialect: &dyn Dialect, sql: &str) {
    let first = parse(dialect, sql)
        .unwrap_or_else(|err| panic!("`{}` should parse: {}", sql, err));
    let rendered: Vec<String> = first.iter().map(render).collect();
    let second = parse(dialect, &rendered.join("; "))
        .unwrap_or_else(|err| panic!("`{}` should re-parse: {}", rendered.join("; "), err));
    assert_eq!(first, second, "round-trip changed the tree for `{}`", sql);
}

#[test]
fn test_roundtrip_corpus() {
    let corpus = [
        "SELECT 1 + 2 * 3",
        "SELECT a.b FROM t",
        "select distinct x, count(*) from big_table group by x having count(*) > 10",
        "SELECT * FROM a JOIN b ON a.id = b.id LEFT JOIN c USING(id)",
        "WITH totals AS (SELECT region, sum(amount) AS total FROM sales GROUP BY region) SELECT * FROM totals ORDER BY total DESC LIMIT 10",
        "SELECT CASE WHEN a THEN 1 WHEN b THEN 2 ELSE 3 END FROM t",
        "SELECT CAST(a AS DECIMAL(10,2)), a::INT FROM t",
        "SELECT * FROM t WHERE a BETWEEN 1 AND 10 AND b NOT IN (1, 2) OR c IS NOT NULL",
        "SELECT sum(a) OVER (PARTITION BY b ORDER BY c ROWS BETWEEN 2 PRECEDING AND CURRENT ROW) FROM t",
        "SELECT 1 UNION ALL SELECT 2 INTERSECT SELECT 3 EXCEPT SELECT 4",
        "VALUES (1, 'a'), (2, 'b')",
        "INSERT INTO t (a, b) VALUES (1, 2) ON CONFLICT (a) DO UPDATE SET b = 2",
        "UPDATE t SET a = a + 1 WHERE b = 'x' RETURNING a",
        "DELETE FROM t USING u WHERE t.id = u.id",
        "CREATE TABLE t (id INT PRIMARY KEY, v VARCHAR(10) NOT NULL DEFAULT 'x', CHECK (id > 0))",
        "CREATE TABLE t (a INT ARRAY[3], b INT[], c ARRAY<INT>, d ARRAY(INT))",
        "CREATE OR REPLACE MATERIALIZED VIEW v AS SELECT a FROM t",
        "CREATE UNIQUE INDEX i ON t(a DESC, b)",
        "ALTER TABLE t ADD CONSTRAINT fk FOREIGN KEY (a) REFERENCES u (id) ON DELETE CASCADE",
        "DROP TABLE IF EXISTS t CASCADE",
        "TRUNCATE TABLE t",
        "START TRANSACTION ISOLATION LEVEL REPEATABLE READ",
        "BEGIN; COMMIT AND CHAIN; ROLLBACK",
        "SET search_path = 'public'",
        "SHOW server_version",
        "GRANT SELECT (a), USAGE ON t TO alice WITH GRANT OPTION",
        "REVOKE ALL PRIVILEGES ON SCHEMA s FROM bob",
        "USE db",
        "EXPLAIN ANALYZE SELECT * FROM t WHERE a = $1",
        "SELECT EXTRACT(YEAR FROM d), SUBSTRING(s FROM 1 FOR 3), TRIM(LEADING 'x' FROM s) FROM t",
        "SELECT data -> 'k' ->> 'l' FROM t WHERE meta @> '{}'",
        "SELECT INTERVAL '1' DAY + INTERVAL '2' HOUR FROM t",
        "SELECT a FROM t ORDER BY a NULLS FIRST OFFSET 2 ROWS FETCH FIRST 5 ROWS WITH TIES FOR UPDATE",
    ];
    let dialect = GenericDialect {};
    for sql in corpus {
        assert_roundtrip(&dialect, sql);
    }
}

#[test]
fn test_canonical_rendering_snapshots() {
    let dialect = GenericDialect {};
    let rendered = |sql: &str| {
        let statements = parse(&dialect, sql).expect("should parse");
        statements
            .iter()
            .map(render)
            .collect::<Vec<_>>()
            .join("; ")
    };

    insta::assert_snapshot!(
        rendered("select a,b , c from t"),
        @"SELECT a, b, c FROM t"
    );
    insta::assert_snapshot!(
        rendered("select * from t where x=1 and y<>2"),
        @"SELECT * FROM t WHERE x = 1 AND y <> 2"
    );
    insta::assert_snapshot!(
        rendered("insert into t values(1,2)"),
        @"INSERT INTO t VALUES (1, 2)"
    );
    insta::assert_snapshot!(
        rendered("select x  y from t z"),
        @"SELECT x AS y FROM t AS z"
    );
}

#[test]
fn test_statements_serialize_through_json() {
    let dialect = GenericDialect {};
    let statements = parse(
        &dialect,
        "SELECT a, count(*) FROM t WHERE a IS NOT NULL GROUP BY a ORDER BY 2 DESC",
    )
    .unwrap();
    let json = serde_json::to_string(&statements).expect("should serialize");
    let back: Vec<Statement> = serde_json::from_str(&json).expect("should deserialize");
    assert_eq!(statements, back);
}

#[test]
fn test_comments_do_not_survive_roundtrip() {
    let dialect = GenericDialect {};
    let statements = parse(
        &dialect,
        "SELECT a -- trailing comment\nFROM t /* block */ WHERE b",
    )
    .unwrap();
    assert_eq!(render(&statements[0]), "SELECT a FROM t WHERE b");
}
