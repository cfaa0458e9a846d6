//! SQL keyword table.
//!
//! Words collected by the tokenizer are compared case-insensitively against
//! this table; a match turns the word into a keyword token while keeping the
//! original spelling for round-tripping.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A recognized SQL keyword.
///
/// Adding a new variant here requires a matching entry in [`ALL_KEYWORDS`];
/// the lookup map is built from that single list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum Keyword {
    ACTION,
    ADD,
    ALL,
    ALTER,
    ANALYZE,
    AND,
    ARRAY,
    AS,
    ASC,
    AT,
    BEGIN,
    BETWEEN,
    BIGINT,
    BINARY,
    BLOB,
    BOOLEAN,
    BOTH,
    BY,
    BYTEA,
    CASCADE,
    CASE,
    CAST,
    CHAIN,
    CHAR,
    CHARACTER,
    CHECK,
    COLLATE,
    COLUMN,
    COMMIT,
    COMMITTED,
    CONFLICT,
    CONNECT,
    CONSTRAINT,
    CONVERT,
    CREATE,
    CROSS,
    CUBE,
    CURRENT,
    DATE,
    DAY,
    DEC,
    DECIMAL,
    DEFAULT,
    DEFERRED,
    DELETE,
    DESC,
    DISTINCT,
    DO,
    DOUBLE,
    DROP,
    ELSE,
    END,
    ESCAPE,
    EXCEPT,
    EXCLUSIVE,
    EXISTS,
    EXPLAIN,
    EXTRACT,
    FALSE,
    FETCH,
    FILTER,
    FIRST,
    FLOAT,
    FOLLOWING,
    FOR,
    FOREIGN,
    FROM,
    FULL,
    GRANT,
    GROUP,
    GROUPING,
    GROUPS,
    HAVING,
    HOUR,
    IF,
    IGNORE,
    ILIKE,
    IMMEDIATE,
    IN,
    INDEX,
    INNER,
    INSERT,
    INT,
    INTEGER,
    INTERSECT,
    INTERVAL,
    INTO,
    IS,
    ISOLATION,
    JOIN,
    JSON,
    KEY,
    LAST,
    LATERAL,
    LEADING,
    LEFT,
    LEVEL,
    LIKE,
    LIMIT,
    LOCAL,
    MATERIALIZED,
    MINUTE,
    MONTH,
    NATIONAL,
    NATURAL,
    NEXT,
    NO,
    NOT,
    NOTHING,
    NULL,
    NULLS,
    NUMERIC,
    OFFSET,
    ON,
    ONLY,
    OPTION,
    OR,
    ORDER,
    OUTER,
    OVER,
    PARTITION,
    PERCENT,
    POSITION,
    PRECEDING,
    PRECISION,
    PRIMARY,
    PRIVILEGES,
    RANGE,
    READ,
    REAL,
    RECURSIVE,
    REFERENCES,
    RENAME,
    REPEATABLE,
    REPLACE,
    RESPECT,
    RESTRICT,
    RETURNING,
    REVOKE,
    RIGHT,
    ROLLBACK,
    ROLLUP,
    ROW,
    ROWS,
    SCHEMA,
    SECOND,
    SELECT,
    SERIALIZABLE,
    SET,
    SETS,
    SHARE,
    SHOW,
    SIMILAR,
    SMALLINT,
    START,
    STRING,
    SUBSTRING,
    TABLE,
    TEXT,
    THEN,
    TIES,
    TIME,
    TIMESTAMP,
    TINYINT,
    TO,
    TOP,
    TRAILING,
    TRANSACTION,
    TRIM,
    TRUE,
    TRUNCATE,
    TRY_CAST,
    UNBOUNDED,
    UNCOMMITTED,
    UNION,
    UNIQUE,
    UNSIGNED,
    UPDATE,
    USAGE,
    USE,
    USING,
    UUID,
    VALUES,
    VARBINARY,
    VARCHAR,
    VARYING,
    VERBOSE,
    VIEW,
    WEEK,
    WHEN,
    WHERE,
    WINDOW,
    WITH,
    WITHOUT,
    WRITE,
    YEAR,
    ZONE,
}

/// Uppercase spelling of every keyword, paired with its variant.
///
/// This is the single source of truth; the lookup map and the reserved
/// lists below refer back to it.
pub const ALL_KEYWORDS: &[(&str, Keyword)] = &[
    ("ACTION", Keyword::ACTION),
    ("ADD", Keyword::ADD),
    ("ALL", Keyword::ALL),
    ("ALTER", Keyword::ALTER),
    ("ANALYZE", Keyword::ANALYZE),
    ("AND", Keyword::AND),
    ("ARRAY", Keyword::ARRAY),
    ("AS", Keyword::AS),
    ("ASC", Keyword::ASC),
    ("AT", Keyword::AT),
    ("BEGIN", Keyword::BEGIN),
    ("BETWEEN", Keyword::BETWEEN),
    ("BIGINT", Keyword::BIGINT),
    ("BINARY", Keyword::BINARY),
    ("BLOB", Keyword::BLOB),
    ("BOOLEAN", Keyword::BOOLEAN),
    ("BOTH", Keyword::BOTH),
    ("BY", Keyword::BY),
    ("BYTEA", Keyword::BYTEA),
    ("CASCADE", Keyword::CASCADE),
    ("CASE", Keyword::CASE),
    ("CAST", Keyword::CAST),
    ("CHAIN", Keyword::CHAIN),
    ("CHAR", Keyword::CHAR),
    ("CHARACTER", Keyword::CHARACTER),
    ("CHECK", Keyword::CHECK),
    ("COLLATE", Keyword::COLLATE),
    ("COLUMN", Keyword::COLUMN),
    ("COMMIT", Keyword::COMMIT),
    ("COMMITTED", Keyword::COMMITTED),
    ("CONFLICT", Keyword::CONFLICT),
    ("CONNECT", Keyword::CONNECT),
    ("CONSTRAINT", Keyword::CONSTRAINT),
    ("CONVERT", Keyword::CONVERT),
    ("CREATE", Keyword::CREATE),
    ("CROSS", Keyword::CROSS),
    ("CUBE", Keyword::CUBE),
    ("CURRENT", Keyword::CURRENT),
    ("DATE", Keyword::DATE),
    ("DAY", Keyword::DAY),
    ("DEC", Keyword::DEC),
    ("DECIMAL", Keyword::DECIMAL),
    ("DEFAULT", Keyword::DEFAULT),
    ("DEFERRED", Keyword::DEFERRED),
    ("DELETE", Keyword::DELETE),
    ("DESC", Keyword::DESC),
    ("DISTINCT", Keyword::DISTINCT),
    ("DO", Keyword::DO),
    ("DOUBLE", Keyword::DOUBLE),
    ("DROP", Keyword::DROP),
    ("ELSE", Keyword::ELSE),
    ("END", Keyword::END),
    ("ESCAPE", Keyword::ESCAPE),
    ("EXCEPT", Keyword::EXCEPT),
    ("EXCLUSIVE", Keyword::EXCLUSIVE),
    ("EXISTS", Keyword::EXISTS),
    ("EXPLAIN", Keyword::EXPLAIN),
    ("EXTRACT", Keyword::EXTRACT),
    ("FALSE", Keyword::FALSE),
    ("FETCH", Keyword::FETCH),
    ("FILTER", Keyword::FILTER),
    ("FIRST", Keyword::FIRST),
    ("FLOAT", Keyword::FLOAT),
    ("FOLLOWING", Keyword::FOLLOWING),
    ("FOR", Keyword::FOR),
    ("FOREIGN", Keyword::FOREIGN),
    ("FROM", Keyword::FROM),
    ("FULL", Keyword::FULL),
    ("GRANT", Keyword::GRANT),
    ("GROUP", Keyword::GROUP),
    ("GROUPING", Keyword::GROUPING),
    ("GROUPS", Keyword::GROUPS),
    ("HAVING", Keyword::HAVING),
    ("HOUR", Keyword::HOUR),
    ("IF", Keyword::IF),
    ("IGNORE", Keyword::IGNORE),
    ("ILIKE", Keyword::ILIKE),
    ("IMMEDIATE", Keyword::IMMEDIATE),
    ("IN", Keyword::IN),
    ("INDEX", Keyword::INDEX),
    ("INNER", Keyword::INNER),
    ("INSERT", Keyword::INSERT),
    ("INT", Keyword::INT),
    ("INTEGER", Keyword::INTEGER),
    ("INTERSECT", Keyword::INTERSECT),
    ("INTERVAL", Keyword::INTERVAL),
    ("INTO", Keyword::INTO),
    ("IS", Keyword::IS),
    ("ISOLATION", Keyword::ISOLATION),
    ("JOIN", Keyword::JOIN),
    ("JSON", Keyword::JSON),
    ("KEY", Keyword::KEY),
    ("LAST", Keyword::LAST),
    ("LATERAL", Keyword::LATERAL),
    ("LEADING", Keyword::LEADING),
    ("LEFT", Keyword::LEFT),
    ("LEVEL", Keyword::LEVEL),
    ("LIKE", Keyword::LIKE),
    ("LIMIT", Keyword::LIMIT),
    ("LOCAL", Keyword::LOCAL),
    ("MATERIALIZED", Keyword::MATERIALIZED),
    ("MINUTE", Keyword::MINUTE),
    ("MONTH", Keyword::MONTH),
    ("NATIONAL", Keyword::NATIONAL),
    ("NATURAL", Keyword::NATURAL),
    ("NEXT", Keyword::NEXT),
    ("NO", Keyword::NO),
    ("NOT", Keyword::NOT),
    ("NOTHING", Keyword::NOTHING),
    ("NULL", Keyword::NULL),
    ("NULLS", Keyword::NULLS),
    ("NUMERIC", Keyword::NUMERIC),
    ("OFFSET", Keyword::OFFSET),
    ("ON", Keyword::ON),
    ("ONLY", Keyword::ONLY),
    ("OPTION", Keyword::OPTION),
    ("OR", Keyword::OR),
    ("ORDER", Keyword::ORDER),
    ("OUTER", Keyword::OUTER),
    ("OVER", Keyword::OVER),
    ("PARTITION", Keyword::PARTITION),
    ("PERCENT", Keyword::PERCENT),
    ("POSITION", Keyword::POSITION),
    ("PRECEDING", Keyword::PRECEDING),
    ("PRECISION", Keyword::PRECISION),
    ("PRIMARY", Keyword::PRIMARY),
    ("PRIVILEGES", Keyword::PRIVILEGES),
    ("RANGE", Keyword::RANGE),
    ("READ", Keyword::READ),
    ("REAL", Keyword::REAL),
    ("RECURSIVE", Keyword::RECURSIVE),
    ("REFERENCES", Keyword::REFERENCES),
    ("RENAME", Keyword::RENAME),
    ("REPEATABLE", Keyword::REPEATABLE),
    ("REPLACE", Keyword::REPLACE),
    ("RESPECT", Keyword::RESPECT),
    ("RESTRICT", Keyword::RESTRICT),
    ("RETURNING", Keyword::RETURNING),
    ("REVOKE", Keyword::REVOKE),
    ("RIGHT", Keyword::RIGHT),
    ("ROLLBACK", Keyword::ROLLBACK),
    ("ROLLUP", Keyword::ROLLUP),
    ("ROW", Keyword::ROW),
    ("ROWS", Keyword::ROWS),
    ("SCHEMA", Keyword::SCHEMA),
    ("SECOND", Keyword::SECOND),
    ("SELECT", Keyword::SELECT),
    ("SERIALIZABLE", Keyword::SERIALIZABLE),
    ("SET", Keyword::SET),
    ("SETS", Keyword::SETS),
    ("SHARE", Keyword::SHARE),
    ("SHOW", Keyword::SHOW),
    ("SIMILAR", Keyword::SIMILAR),
    ("SMALLINT", Keyword::SMALLINT),
    ("START", Keyword::START),
    ("STRING", Keyword::STRING),
    ("SUBSTRING", Keyword::SUBSTRING),
    ("TABLE", Keyword::TABLE),
    ("TEXT", Keyword::TEXT),
    ("THEN", Keyword::THEN),
    ("TIES", Keyword::TIES),
    ("TIME", Keyword::TIME),
    ("TIMESTAMP", Keyword::TIMESTAMP),
    ("TINYINT", Keyword::TINYINT),
    ("TO", Keyword::TO),
    ("TOP", Keyword::TOP),
    ("TRAILING", Keyword::TRAILING),
    ("TRANSACTION", Keyword::TRANSACTION),
    ("TRIM", Keyword::TRIM),
    ("TRUE", Keyword::TRUE),
    ("TRUNCATE", Keyword::TRUNCATE),
    ("TRY_CAST", Keyword::TRY_CAST),
    ("UNBOUNDED", Keyword::UNBOUNDED),
    ("UNCOMMITTED", Keyword::UNCOMMITTED),
    ("UNION", Keyword::UNION),
    ("UNIQUE", Keyword::UNIQUE),
    ("UNSIGNED", Keyword::UNSIGNED),
    ("UPDATE", Keyword::UPDATE),
    ("USAGE", Keyword::USAGE),
    ("USE", Keyword::USE),
    ("USING", Keyword::USING),
    ("UUID", Keyword::UUID),
    ("VALUES", Keyword::VALUES),
    ("VARBINARY", Keyword::VARBINARY),
    ("VARCHAR", Keyword::VARCHAR),
    ("VARYING", Keyword::VARYING),
    ("VERBOSE", Keyword::VERBOSE),
    ("VIEW", Keyword::VIEW),
    ("WEEK", Keyword::WEEK),
    ("WHEN", Keyword::WHEN),
    ("WHERE", Keyword::WHERE),
    ("WINDOW", Keyword::WINDOW),
    ("WITH", Keyword::WITH),
    ("WITHOUT", Keyword::WITHOUT),
    ("WRITE", Keyword::WRITE),
    ("YEAR", Keyword::YEAR),
    ("ZONE", Keyword::ZONE),
];

static KEYWORD_LOOKUP: Lazy<HashMap<&'static str, Keyword>> =
    Lazy::new(|| ALL_KEYWORDS.iter().copied().collect());

impl Keyword {
    /// Look up a keyword by its uppercased spelling.
    pub fn lookup(upper: &str) -> Option<Keyword> {
        KEYWORD_LOOKUP.get(upper).copied()
    }
}

/// Keywords that terminate a table factor and therefore can never be taken
/// as an implicit (AS-less) table alias.
pub const RESERVED_FOR_TABLE_ALIAS: &[Keyword] = &[
    Keyword::WITH,
    Keyword::SELECT,
    Keyword::WHERE,
    Keyword::GROUP,
    Keyword::HAVING,
    Keyword::ORDER,
    Keyword::WINDOW,
    Keyword::UNION,
    Keyword::EXCEPT,
    Keyword::INTERSECT,
    Keyword::ON,
    Keyword::JOIN,
    Keyword::INNER,
    Keyword::LEFT,
    Keyword::RIGHT,
    Keyword::FULL,
    Keyword::CROSS,
    Keyword::NATURAL,
    Keyword::USING,
    Keyword::LIMIT,
    Keyword::OFFSET,
    Keyword::FETCH,
    Keyword::FOR,
    Keyword::SET,
    Keyword::OUTER,
    Keyword::START,
    Keyword::CONNECT,
    Keyword::RETURNING,
];

/// Keywords that terminate a projection item and therefore can never be
/// taken as an implicit column alias.
pub const RESERVED_FOR_COLUMN_ALIAS: &[Keyword] = &[
    Keyword::FROM,
    Keyword::WHERE,
    Keyword::GROUP,
    Keyword::HAVING,
    Keyword::ORDER,
    Keyword::WINDOW,
    Keyword::UNION,
    Keyword::EXCEPT,
    Keyword::INTERSECT,
    Keyword::LIMIT,
    Keyword::OFFSET,
    Keyword::FETCH,
    Keyword::INTO,
    Keyword::END,
    Keyword::RETURNING,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_sensitive_uppercase() {
        assert_eq!(Keyword::lookup("SELECT"), Some(Keyword::SELECT));
        assert_eq!(Keyword::lookup("select"), None);
    }

    #[test]
    fn test_lookup_unknown_word() {
        assert_eq!(Keyword::lookup("FROBNICATE"), None);
    }

    #[test]
    fn test_spellings_are_sorted_and_unique() {
        for pair in ALL_KEYWORDS.windows(2) {
            assert!(
                pair[0].0 < pair[1].0,
                "{} must sort before {}",
                pair[0].0,
                pair[1].0
            );
        }
    }

    #[test]
    fn test_reserved_lists_are_known_keywords() {
        for kw in RESERVED_FOR_TABLE_ALIAS.iter().chain(RESERVED_FOR_COLUMN_ALIAS) {
            assert!(ALL_KEYWORDS.iter().any(|(_, k)| k == kw));
        }
    }
}
