use katydid::ast::{
    ArrayElemTypeDef, ColumnOption, DataType, ObjectType, ReferentialAction, Statement,
    TableConstraint,
};
use katydid::dialect::GenericDialect;
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
fn test_create_table_columns_and_options() {
    let statement = verified(
        "CREATE TABLE users (id INT NOT NULL PRIMARY KEY, name VARCHAR(255) DEFAULT 'anon', age SMALLINT NULL, active BOOLEAN, CONSTRAINT positive_age CHECK (age > 0))",
    );
    match statement {
        Statement::CreateTable {
            columns,
            constraints,
            ..
        } => {
            assert_eq!(columns.len(), 4);
            assert_eq!(columns[0].options.len(), 2);
            assert_eq!(columns[1].data_type, DataType::Varchar(Some(255)));
            assert_eq!(constraints.len(), 1);
            assert!(matches!(constraints[0], TableConstraint::Check { .. }));
        }
        other => panic!("expected CREATE TABLE, got {:?}", other),
    }
}

#[test]
fn test_create_table_foreign_keys() {
    let statement = verified(
        "CREATE TABLE orders (user_id INT REFERENCES users (id) ON DELETE CASCADE ON UPDATE SET NULL, CONSTRAINT fk FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE NO ACTION)",
    );
    match statement {
        Statement::CreateTable {
            columns,
            constraints,
            ..
        } => {
            match &columns[0].options[0].option {
                ColumnOption::ForeignKey {
                    on_delete,
                    on_update,
                    ..
                } => {
                    assert_eq!(*on_delete, Some(ReferentialAction::Cascade));
                    assert_eq!(*on_update, Some(ReferentialAction::SetNull));
                }
                other => panic!("expected a foreign key option, got {:?}", other),
            }
            match &constraints[0] {
                TableConstraint::ForeignKey { on_delete, .. } => {
                    assert_eq!(*on_delete, Some(ReferentialAction::NoAction))
                }
                other => panic!("expected a foreign key constraint, got {:?}", other),
            }
        }
        other => panic!("expected CREATE TABLE, got {:?}", other),
    }
}

#[test]
fn test_create_table_modifiers() {
    verified("CREATE OR REPLACE TABLE t (a INT)");
    verified("CREATE TABLE IF NOT EXISTS t (a INT)");
}

#[test]
fn test_array_type_bracket_styles_are_preserved() {
    let statement = parses_to(
        "CREATE TABLE t (a INT ARRAY[3], b INT[], c ARRAY<TEXT>, d ARRAY(TEXT))",
        "CREATE TABLE t (a INT[3], b INT[], c ARRAY<TEXT>, d ARRAY(TEXT))",
    );
    match statement {
        Statement::CreateTable { columns, .. } => {
            assert_eq!(
                columns[0].data_type,
                DataType::Array(ArrayElemTypeDef::SquareBracket(
                    Box::new(DataType::Int(None)),
                    Some(3),
                ))
            );
            assert_eq!(
                columns[1].data_type,
                DataType::Array(ArrayElemTypeDef::SquareBracket(
                    Box::new(DataType::Int(None)),
                    None,
                ))
            );
            assert_eq!(
                columns[2].data_type,
                DataType::Array(ArrayElemTypeDef::AngleBracket(Box::new(DataType::Text)))
            );
            assert_eq!(
                columns[3].data_type,
                DataType::Array(ArrayElemTypeDef::Parenthesis(Box::new(DataType::Text)))
            );
        }
        other => panic!("expected CREATE TABLE, got {:?}", other),
    }
}

#[test]
fn test_data_type_spellings() {
    parses_to(
        "CREATE TABLE t (a INTEGER, b DEC(10,2), c CHARACTER VARYING(5), d DOUBLE PRECISION, e TIMESTAMP WITHOUT TIME ZONE)",
        "CREATE TABLE t (a INT, b DECIMAL(10,2), c VARCHAR(5), d DOUBLE PRECISION, e TIMESTAMP)",
    );
    verified("CREATE TABLE t (a TIMESTAMP WITH TIME ZONE, b TIME, c UUID, d JSON, e BYTEA)");
    verified("CREATE TABLE t (a BIGINT UNSIGNED, b TINYINT(1), c BLOB, d NUMERIC(4))");
    verified("CREATE TABLE t (a geo.point)");
}

#[test]
fn test_create_view() {
    verified("CREATE VIEW v AS SELECT a FROM t");
    verified("CREATE OR REPLACE MATERIALIZED VIEW v (a, b) AS SELECT a, b FROM t");
}

#[test]
fn test_create_index() {
    verified("CREATE INDEX idx_name ON t(a, b DESC)");
    verified("CREATE UNIQUE INDEX IF NOT EXISTS idx ON s.t(a)");
}

#[test]
fn test_alter_table() {
    verified("ALTER TABLE t ADD COLUMN c INT NOT NULL");
    parses_to("ALTER TABLE t ADD c INT", "ALTER TABLE t ADD COLUMN c INT");
    verified("ALTER TABLE t DROP COLUMN IF EXISTS c CASCADE");
    parses_to("ALTER TABLE t DROP c", "ALTER TABLE t DROP COLUMN c");
    verified("ALTER TABLE t RENAME COLUMN a TO b");
    verified("ALTER TABLE t RENAME TO u");
    verified("ALTER TABLE t ADD CONSTRAINT uq UNIQUE (a, b)");
    verified("ALTER TABLE t DROP CONSTRAINT uq");
}

#[test]
fn test_drop() {
    let statement = verified("DROP TABLE IF EXISTS t1, t2 CASCADE");
    match statement {
        Statement::Drop {
            object_type,
            if_exists,
            names,
            cascade,
            ..
        } => {
            assert_eq!(object_type, ObjectType::Table);
            assert!(if_exists);
            assert_eq!(names.len(), 2);
            assert!(cascade);
        }
        other => panic!("expected DROP, got {:?}", other),
    }
    verified("DROP VIEW v");
    verified("DROP INDEX idx RESTRICT");
}

#[test]
fn test_truncate() {
    verified("TRUNCATE TABLE t");
    parses_to("TRUNCATE t", "TRUNCATE TABLE t");
}

#[test]
fn test_create_without_object_is_an_error() {
    let err = parse(&GenericDialect {}, "CREATE SEQUENCE s").unwrap_err();
    assert!(err.message.contains("TABLE, VIEW or INDEX"));
}
