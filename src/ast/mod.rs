//! SQL Abstract Syntax Tree.
//!
//! A closed family of tagged variants with exhaustive pattern matching
//! enforced by the compiler. Every node:
//!
//! - is an immutable value with structural equality,
//! - renders itself back to canonical SQL through `Display`,
//! - is walkable through [`visit`] with rewrite-on-change semantics.
//!
//! Submodules split the families the way the grammar does:
//!
//! - [`query`] - SELECT bodies, set operations, joins, windows
//! - [`dml`] - INSERT, UPDATE, DELETE
//! - [`ddl`] - column definitions, constraints, ALTER operations
//! - [`types`] - data types
//! - [`visit`] - traversal

pub mod ddl;
pub mod dml;
pub mod query;
pub mod types;
pub mod visit;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use ddl::{
    AlterTableOperation, ColumnDef, ColumnOption, ColumnOptionDef, ObjectType, ReferentialAction,
    TableConstraint,
};
pub use dml::{Assignment, Delete, Insert, OnConflict, OnConflictAction, Update};
pub use query::{
    ConnectBy, Cte, Distinct, Fetch, Join, JoinConstraint, JoinOperator, LockClause, LockType,
    NamedWindowDef, Offset, OffsetRows, OrderByExpr, Query, Select, SelectItem, SetExpr,
    SetOperator, SetQuantifier, TableAlias, TableFactor, TableWithJoins, Top, Values, WildcardOptions,
    WindowFrame, WindowFrameBound, WindowFrameUnits, WindowSpec, WindowType, With,
};
pub use types::{ArrayElemTypeDef, DataType};
pub use visit::{descendants, visit_expr, visit_statement, AstNode, VisitError, Visitor};

use crate::writer::{display_comma_separated, display_separated};

// =============================================================================
// Identifiers
// =============================================================================

/// An identifier, with the quote style it was written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ident {
    /// The identifier text, unquoted and unescaped
    pub value: String,
    /// `None` for a bare word; `"`, `` ` `` or `[` when delimited
    pub quote_style: Option<char>,
}

impl Ident {
    /// An unquoted identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote_style: None,
        }
    }

    /// An identifier quoted with the given opening character.
    pub fn with_quote(quote: char, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote_style: Some(quote),
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quote_style {
            None => f.write_str(&self.value),
            Some(quote) => {
                let end = crate::tokenizer::Word::matching_end_quote(quote);
                write!(f, "{}", quote)?;
                for ch in self.value.chars() {
                    if ch == end {
                        // the closing delimiter is escaped by doubling
                        write!(f, "{}{}", end, end)?;
                    } else {
                        write!(f, "{}", ch)?;
                    }
                }
                write!(f, "{}", end)
            }
        }
    }
}

/// A dotted, possibly qualified name (`catalog.schema.table`). Always holds
/// at least one part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectName(pub Vec<Ident>);

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", display_separated(&self.0, "."))
    }
}

// =============================================================================
// Literal values
// =============================================================================

/// A literal value. Numbers keep their source text so nothing is lost to
/// re-formatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Numeric literal, as written
    Number(String),
    /// `'string'`
    SingleQuotedString(String),
    /// `N'string'`
    NationalStringLiteral(String),
    /// `X'hex'`
    HexStringLiteral(String),
    /// `B'bits'`
    BitStringLiteral(String),
    /// `'''string'''`
    TripleQuotedString(String),
    /// `TRUE` / `FALSE`
    Boolean(bool),
    /// `NULL`
    Null,
    /// `?`, `$1`, `@name`, `:name`
    Placeholder(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(n),
            Value::SingleQuotedString(s) => write!(f, "'{}'", escape_single_quote(s)),
            Value::NationalStringLiteral(s) => write!(f, "N'{}'", escape_single_quote(s)),
            Value::HexStringLiteral(s) => write!(f, "X'{}'", s),
            Value::BitStringLiteral(s) => write!(f, "B'{}'", s),
            Value::TripleQuotedString(s) => write!(f, "'''{}'''", s),
            Value::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            Value::Null => f.write_str("NULL"),
            Value::Placeholder(s) => f.write_str(s),
        }
    }
}

fn escape_single_quote(s: &str) -> String {
    s.replace('\'', "''")
}

/// A date/time component, as used by EXTRACT and INTERVAL qualifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateTimeField {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl fmt::Display for DateTimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateTimeField::Year => "YEAR",
            DateTimeField::Month => "MONTH",
            DateTimeField::Week => "WEEK",
            DateTimeField::Day => "DAY",
            DateTimeField::Hour => "HOUR",
            DateTimeField::Minute => "MINUTE",
            DateTimeField::Second => "SECOND",
        })
    }
}

// =============================================================================
// Operators
// =============================================================================

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    /// `^`, right-associative exponentiation
    Pow,
    StringConcat,
    Gt,
    Lt,
    GtEq,
    LtEq,
    Eq,
    NotEq,
    And,
    Or,
    BitwiseOr,
    BitwiseAnd,
    ShiftLeft,
    ShiftRight,
    /// MySQL `DIV`
    IntegerDivide,
    /// Postgres `&&`
    Overlap,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Pow => "^",
            BinaryOperator::StringConcat => "||",
            BinaryOperator::Gt => ">",
            BinaryOperator::Lt => "<",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Eq => "=",
            BinaryOperator::NotEq => "<>",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::IntegerDivide => "DIV",
            BinaryOperator::Overlap => "&&",
        })
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
    /// `~`
    BitwiseNot,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "NOT",
            UnaryOperator::BitwiseNot => "~",
        })
    }
}

/// JSON access operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JsonOperator {
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
}

impl fmt::Display for JsonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JsonOperator::Arrow => "->",
            JsonOperator::LongArrow => "->>",
            JsonOperator::HashArrow => "#>",
            JsonOperator::HashLongArrow => "#>>",
            JsonOperator::AtArrow => "@>",
            JsonOperator::ArrowAt => "<@",
            JsonOperator::QuestionPipe => "?|",
            JsonOperator::QuestionAnd => "?&",
        })
    }
}

// =============================================================================
// Expressions
// =============================================================================

/// A SQL expression.
///
/// Every variant must be handled in `Display` and in the visitor's child
/// walk - the compiler enforces both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A bare identifier
    Identifier(Ident),
    /// A dotted identifier chain: `a.b.c`
    CompoundIdentifier(Vec<Ident>),
    /// `*` in an expression position (function arguments)
    Wildcard,
    /// `table.*` in an expression position
    QualifiedWildcard(ObjectName),
    /// A literal
    Value(Value),
    /// `DATE '2024-01-01'` and friends
    TypedString { data_type: DataType, value: String },
    /// `left op right`
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    /// `op expr`
    UnaryOp { op: UnaryOperator, expr: Box<Expr> },
    /// JSON access: `expr -> 'key'` and friends
    JsonAccess {
        left: Box<Expr>,
        operator: JsonOperator,
        right: Box<Expr>,
    },
    /// A function call
    Function(Function),
    /// `CASE [operand] WHEN ... THEN ... [ELSE ...] END`
    Case {
        operand: Option<Box<Expr>>,
        conditions: Vec<Expr>,
        results: Vec<Expr>,
        else_result: Option<Box<Expr>>,
    },
    /// `CAST(expr AS type)`; also produced by `expr::type`
    Cast {
        expr: Box<Expr>,
        data_type: DataType,
    },
    /// `TRY_CAST(expr AS type)`
    TryCast {
        expr: Box<Expr>,
        data_type: DataType,
    },
    /// A parenthesized expression, kept so rendering reproduces the parens
    Nested(Box<Expr>),
    /// A parenthesized scalar subquery
    Subquery(Box<Query>),
    /// `[NOT] EXISTS (subquery)`
    Exists {
        subquery: Box<Query>,
        negated: bool,
    },
    /// `expr [NOT] IN (list)`
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    /// `expr [NOT] IN (subquery)`
    InSubquery {
        expr: Box<Expr>,
        subquery: Box<Query>,
        negated: bool,
    },
    /// `expr [NOT] BETWEEN low AND high`
    Between {
        expr: Box<Expr>,
        negated: bool,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    /// `expr [NOT] LIKE pattern [ESCAPE char]`
    Like {
        negated: bool,
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape_char: Option<char>,
    },
    /// `expr [NOT] ILIKE pattern [ESCAPE char]`
    ILike {
        negated: bool,
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape_char: Option<char>,
    },
    /// `expr [NOT] SIMILAR TO pattern [ESCAPE char]`
    SimilarTo {
        negated: bool,
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape_char: Option<char>,
    },
    /// `expr IS NULL`
    IsNull(Box<Expr>),
    /// `expr IS NOT NULL`
    IsNotNull(Box<Expr>),
    /// `expr IS TRUE`
    IsTrue(Box<Expr>),
    /// `expr IS NOT TRUE`
    IsNotTrue(Box<Expr>),
    /// `expr IS FALSE`
    IsFalse(Box<Expr>),
    /// `expr IS NOT FALSE`
    IsNotFalse(Box<Expr>),
    /// `a IS DISTINCT FROM b`
    IsDistinctFrom(Box<Expr>, Box<Expr>),
    /// `a IS NOT DISTINCT FROM b`
    IsNotDistinctFrom(Box<Expr>, Box<Expr>),
    /// `expr COLLATE collation`
    Collate {
        expr: Box<Expr>,
        collation: ObjectName,
    },
    /// `expr AT TIME ZONE 'tz'`
    AtTimeZone {
        timestamp: Box<Expr>,
        time_zone: String,
    },
    /// `EXTRACT(field FROM expr)`
    Extract {
        field: DateTimeField,
        expr: Box<Expr>,
    },
    /// `SUBSTRING(expr [FROM start] [FOR length])`
    Substring {
        expr: Box<Expr>,
        substring_from: Option<Box<Expr>>,
        substring_for: Option<Box<Expr>>,
    },
    /// `TRIM([BOTH | LEADING | TRAILING] [what FROM] expr)`
    Trim {
        expr: Box<Expr>,
        trim_where: Option<TrimWhereField>,
        trim_what: Option<Box<Expr>>,
    },
    /// `POSITION(expr IN haystack)`
    Position { expr: Box<Expr>, r#in: Box<Expr> },
    /// `INTERVAL '1' DAY`
    Interval {
        value: Box<Expr>,
        leading_field: Option<DateTimeField>,
    },
    /// `ARRAY[...]` (named) or `[...]`
    Array { elem: Vec<Expr>, named: bool },
    /// `(a, b, c)` with more than one element
    Tuple(Vec<Expr>),
    /// `expr[index]`
    Subscript {
        expr: Box<Expr>,
        index: Box<Expr>,
    },
    /// `{'key': value, ...}`
    Dictionary(Vec<DictionaryField>),
    /// `x -> x + 1` / `(x, y) -> x + y`
    Lambda(LambdaFunction),
    /// `ROLLUP (a, (b, c))` inside GROUP BY
    Rollup(Vec<Vec<Expr>>),
    /// `CUBE (a, (b, c))` inside GROUP BY
    Cube(Vec<Vec<Expr>>),
    /// `GROUPING SETS ((a), (b, c), ())` inside GROUP BY
    GroupingSets(Vec<Vec<Expr>>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(ident) => write!(f, "{}", ident),
            Expr::CompoundIdentifier(parts) => write!(f, "{}", display_separated(parts, ".")),
            Expr::Wildcard => f.write_str("*"),
            Expr::QualifiedWildcard(prefix) => write!(f, "{}.*", prefix),
            Expr::Value(value) => write!(f, "{}", value),
            Expr::TypedString { data_type, value } => {
                write!(f, "{} '{}'", data_type, escape_single_quote(value))
            }
            Expr::BinaryOp { left, op, right } => write!(f, "{} {} {}", left, op, right),
            Expr::UnaryOp { op, expr } => match op {
                UnaryOperator::Not => write!(f, "NOT {}", expr),
                _ => write!(f, "{}{}", op, expr),
            },
            Expr::JsonAccess {
                left,
                operator,
                right,
            } => write!(f, "{} {} {}", left, operator, right),
            Expr::Function(function) => write!(f, "{}", function),
            Expr::Case {
                operand,
                conditions,
                results,
                else_result,
            } => {
                f.write_str("CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {}", operand)?;
                }
                for (condition, result) in conditions.iter().zip(results) {
                    write!(f, " WHEN {} THEN {}", condition, result)?;
                }
                if let Some(else_result) = else_result {
                    write!(f, " ELSE {}", else_result)?;
                }
                f.write_str(" END")
            }
            Expr::Cast { expr, data_type } => write!(f, "CAST({} AS {})", expr, data_type),
            Expr::TryCast { expr, data_type } => write!(f, "TRY_CAST({} AS {})", expr, data_type),
            Expr::Nested(expr) => write!(f, "({})", expr),
            Expr::Subquery(query) => write!(f, "({})", query),
            Expr::Exists { subquery, negated } => write!(
                f,
                "{}EXISTS ({})",
                if *negated { "NOT " } else { "" },
                subquery
            ),
            Expr::InList {
                expr,
                list,
                negated,
            } => write!(
                f,
                "{} {}IN ({})",
                expr,
                if *negated { "NOT " } else { "" },
                display_comma_separated(list)
            ),
            Expr::InSubquery {
                expr,
                subquery,
                negated,
            } => write!(
                f,
                "{} {}IN ({})",
                expr,
                if *negated { "NOT " } else { "" },
                subquery
            ),
            Expr::Between {
                expr,
                negated,
                low,
                high,
            } => write!(
                f,
                "{} {}BETWEEN {} AND {}",
                expr,
                if *negated { "NOT " } else { "" },
                low,
                high
            ),
            Expr::Like {
                negated,
                expr,
                pattern,
                escape_char,
            } => display_pattern_match(f, "LIKE", expr, pattern, *negated, escape_char),
            Expr::ILike {
                negated,
                expr,
                pattern,
                escape_char,
            } => display_pattern_match(f, "ILIKE", expr, pattern, *negated, escape_char),
            Expr::SimilarTo {
                negated,
                expr,
                pattern,
                escape_char,
            } => display_pattern_match(f, "SIMILAR TO", expr, pattern, *negated, escape_char),
            Expr::IsNull(expr) => write!(f, "{} IS NULL", expr),
            Expr::IsNotNull(expr) => write!(f, "{} IS NOT NULL", expr),
            Expr::IsTrue(expr) => write!(f, "{} IS TRUE", expr),
            Expr::IsNotTrue(expr) => write!(f, "{} IS NOT TRUE", expr),
            Expr::IsFalse(expr) => write!(f, "{} IS FALSE", expr),
            Expr::IsNotFalse(expr) => write!(f, "{} IS NOT FALSE", expr),
            Expr::IsDistinctFrom(a, b) => write!(f, "{} IS DISTINCT FROM {}", a, b),
            Expr::IsNotDistinctFrom(a, b) => write!(f, "{} IS NOT DISTINCT FROM {}", a, b),
            Expr::Collate { expr, collation } => write!(f, "{} COLLATE {}", expr, collation),
            Expr::AtTimeZone {
                timestamp,
                time_zone,
            } => write!(
                f,
                "{} AT TIME ZONE '{}'",
                timestamp,
                escape_single_quote(time_zone)
            ),
            Expr::Extract { field, expr } => write!(f, "EXTRACT({} FROM {})", field, expr),
            Expr::Substring {
                expr,
                substring_from,
                substring_for,
            } => {
                write!(f, "SUBSTRING({}", expr)?;
                if let Some(from) = substring_from {
                    write!(f, " FROM {}", from)?;
                }
                if let Some(len) = substring_for {
                    write!(f, " FOR {}", len)?;
                }
                f.write_str(")")
            }
            Expr::Trim {
                expr,
                trim_where,
                trim_what,
            } => {
                f.write_str("TRIM(")?;
                if let Some(trim_where) = trim_where {
                    write!(f, "{} ", trim_where)?;
                }
                if let Some(trim_what) = trim_what {
                    write!(f, "{} FROM ", trim_what)?;
                }
                write!(f, "{})", expr)
            }
            Expr::Position { expr, r#in } => write!(f, "POSITION({} IN {})", expr, r#in),
            Expr::Interval {
                value,
                leading_field,
            } => {
                write!(f, "INTERVAL {}", value)?;
                if let Some(field) = leading_field {
                    write!(f, " {}", field)?;
                }
                Ok(())
            }
            Expr::Array { elem, named } => write!(
                f,
                "{}[{}]",
                if *named { "ARRAY" } else { "" },
                display_comma_separated(elem)
            ),
            Expr::Tuple(exprs) => write!(f, "({})", display_comma_separated(exprs)),
            Expr::Subscript { expr, index } => write!(f, "{}[{}]", expr, index),
            Expr::Dictionary(fields) => write!(f, "{{{}}}", display_comma_separated(fields)),
            Expr::Lambda(lambda) => write!(f, "{}", lambda),
            Expr::Rollup(sets) => {
                write!(f, "ROLLUP ({})", DisplayGroupingSets(sets))
            }
            Expr::Cube(sets) => write!(f, "CUBE ({})", DisplayGroupingSets(sets)),
            Expr::GroupingSets(sets) => {
                f.write_str("GROUPING SETS (")?;
                let mut first = true;
                for set in sets {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "({})", display_comma_separated(set))?;
                }
                f.write_str(")")
            }
        }
    }
}

/// ROLLUP/CUBE sets: single-column sets print bare, multi-column sets keep
/// their parens.
struct DisplayGroupingSets<'a>(&'a [Vec<Expr>]);

impl fmt::Display for DisplayGroupingSets<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for set in self.0 {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            if set.len() == 1 {
                write!(f, "{}", set[0])?;
            } else {
                write!(f, "({})", display_comma_separated(set))?;
            }
        }
        Ok(())
    }
}

fn display_pattern_match(
    f: &mut fmt::Formatter<'_>,
    keyword: &str,
    expr: &Expr,
    pattern: &Expr,
    negated: bool,
    escape_char: &Option<char>,
) -> fmt::Result {
    write!(
        f,
        "{} {}{} {}",
        expr,
        if negated { "NOT " } else { "" },
        keyword,
        pattern
    )?;
    if let Some(ch) = escape_char {
        write!(f, " ESCAPE '{}'", ch)?;
    }
    Ok(())
}

/// BOTH / LEADING / TRAILING in TRIM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrimWhereField {
    Both,
    Leading,
    Trailing,
}

impl fmt::Display for TrimWhereField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrimWhereField::Both => "BOTH",
            TrimWhereField::Leading => "LEADING",
            TrimWhereField::Trailing => "TRAILING",
        })
    }
}

/// One `'key': value` entry of a dictionary literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryField {
    pub key: Value,
    pub value: Box<Expr>,
}

impl fmt::Display for DictionaryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// A lambda passed as a function argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaFunction {
    pub params: Vec<Ident>,
    pub body: Box<Expr>,
}

impl fmt::Display for LambdaFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.params.len() {
            1 => write!(f, "{} -> {}", self.params[0], self.body),
            _ => write!(
                f,
                "({}) -> {}",
                display_comma_separated(&self.params),
                self.body
            ),
        }
    }
}

// =============================================================================
// Function calls
// =============================================================================

/// A function call, with the window and filter clauses that may trail it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: ObjectName,
    pub args: Vec<FunctionArg>,
    pub distinct: bool,
    /// `IGNORE NULLS` / `RESPECT NULLS` inside the argument list
    pub null_treatment: Option<NullTreatment>,
    /// `FILTER (WHERE ...)` after the argument list
    pub filter: Option<Box<Expr>>,
    /// `OVER (...)` or `OVER window_name`
    pub over: Option<WindowType>,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}{}",
            self.name,
            if self.distinct { "DISTINCT " } else { "" },
            display_comma_separated(&self.args)
        )?;
        if let Some(null_treatment) = &self.null_treatment {
            write!(f, " {}", null_treatment)?;
        }
        f.write_str(")")?;
        if let Some(filter) = &self.filter {
            write!(f, " FILTER (WHERE {})", filter)?;
        }
        if let Some(over) = &self.over {
            write!(f, " OVER {}", over)?;
        }
        Ok(())
    }
}

/// One function argument, positional or named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FunctionArg {
    Named {
        name: Ident,
        arg: Expr,
        operator: FunctionArgOperator,
    },
    Unnamed(Expr),
}

impl fmt::Display for FunctionArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionArg::Named {
                name,
                arg,
                operator,
            } => write!(f, "{} {} {}", name, operator, arg),
            FunctionArg::Unnamed(arg) => write!(f, "{}", arg),
        }
    }
}

/// How a named argument binds its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionArgOperator {
    /// `name = value`
    Equals,
    /// `name => value`
    RightArrow,
}

impl fmt::Display for FunctionArgOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FunctionArgOperator::Equals => "=",
            FunctionArgOperator::RightArrow => "=>",
        })
    }
}

/// `IGNORE NULLS` / `RESPECT NULLS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NullTreatment {
    IgnoreNulls,
    RespectNulls,
}

impl fmt::Display for NullTreatment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NullTreatment::IgnoreNulls => "IGNORE NULLS",
            NullTreatment::RespectNulls => "RESPECT NULLS",
        })
    }
}

// =============================================================================
// Statements
// =============================================================================

/// A top-level SQL statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// SELECT / VALUES / set operations
    Query(Box<Query>),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    CreateTable {
        or_replace: bool,
        if_not_exists: bool,
        name: ObjectName,
        columns: Vec<ColumnDef>,
        constraints: Vec<TableConstraint>,
    },
    CreateView {
        or_replace: bool,
        materialized: bool,
        name: ObjectName,
        columns: Vec<Ident>,
        query: Box<Query>,
    },
    CreateIndex {
        name: ObjectName,
        table_name: ObjectName,
        unique: bool,
        if_not_exists: bool,
        columns: Vec<OrderByExpr>,
    },
    AlterTable {
        name: ObjectName,
        operation: AlterTableOperation,
    },
    Drop {
        object_type: ObjectType,
        if_exists: bool,
        names: Vec<ObjectName>,
        cascade: bool,
        restrict: bool,
    },
    Truncate {
        table_name: ObjectName,
    },
    StartTransaction {
        modes: Vec<TransactionMode>,
        /// Written as `BEGIN` rather than `START TRANSACTION`
        begin: bool,
        modifier: Option<TransactionModifier>,
    },
    Commit {
        chain: bool,
    },
    Rollback {
        chain: bool,
    },
    SetVariable {
        local: bool,
        variables: Vec<ObjectName>,
        values: Vec<Expr>,
    },
    ShowVariable {
        variable: Vec<Ident>,
    },
    Grant {
        privileges: Privileges,
        objects: GrantObjects,
        grantees: Vec<Ident>,
        with_grant_option: bool,
    },
    Revoke {
        privileges: Privileges,
        objects: GrantObjects,
        grantees: Vec<Ident>,
        cascade: bool,
    },
    Use {
        db_name: Ident,
    },
    Explain {
        analyze: bool,
        verbose: bool,
        statement: Box<Statement>,
    },
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Query(query) => write!(f, "{}", query),
            Statement::Insert(insert) => write!(f, "{}", insert),
            Statement::Update(update) => write!(f, "{}", update),
            Statement::Delete(delete) => write!(f, "{}", delete),
            Statement::CreateTable {
                or_replace,
                if_not_exists,
                name,
                columns,
                constraints,
            } => {
                write!(
                    f,
                    "CREATE {}TABLE {}{} (",
                    if *or_replace { "OR REPLACE " } else { "" },
                    if *if_not_exists { "IF NOT EXISTS " } else { "" },
                    name
                )?;
                write!(f, "{}", display_comma_separated(columns))?;
                if !columns.is_empty() && !constraints.is_empty() {
                    f.write_str(", ")?;
                }
                write!(f, "{})", display_comma_separated(constraints))
            }
            Statement::CreateView {
                or_replace,
                materialized,
                name,
                columns,
                query,
            } => {
                write!(
                    f,
                    "CREATE {}{}VIEW {}",
                    if *or_replace { "OR REPLACE " } else { "" },
                    if *materialized { "MATERIALIZED " } else { "" },
                    name
                )?;
                if !columns.is_empty() {
                    write!(f, " ({})", display_comma_separated(columns))?;
                }
                write!(f, " AS {}", query)
            }
            Statement::CreateIndex {
                name,
                table_name,
                unique,
                if_not_exists,
                columns,
            } => write!(
                f,
                "CREATE {}INDEX {}{} ON {}({})",
                if *unique { "UNIQUE " } else { "" },
                if *if_not_exists { "IF NOT EXISTS " } else { "" },
                name,
                table_name,
                display_comma_separated(columns)
            ),
            Statement::AlterTable { name, operation } => {
                write!(f, "ALTER TABLE {} {}", name, operation)
            }
            Statement::Drop {
                object_type,
                if_exists,
                names,
                cascade,
                restrict,
            } => write!(
                f,
                "DROP {} {}{}{}{}",
                object_type,
                if *if_exists { "IF EXISTS " } else { "" },
                display_comma_separated(names),
                if *cascade { " CASCADE" } else { "" },
                if *restrict { " RESTRICT" } else { "" }
            ),
            Statement::Truncate { table_name } => write!(f, "TRUNCATE TABLE {}", table_name),
            Statement::StartTransaction {
                modes,
                begin,
                modifier,
            } => {
                if *begin {
                    f.write_str("BEGIN")?;
                    if let Some(modifier) = modifier {
                        write!(f, " {}", modifier)?;
                    }
                    f.write_str(" TRANSACTION")?;
                } else {
                    f.write_str("START TRANSACTION")?;
                }
                if !modes.is_empty() {
                    write!(f, " {}", display_comma_separated(modes))?;
                }
                Ok(())
            }
            Statement::Commit { chain } => {
                write!(f, "COMMIT{}", if *chain { " AND CHAIN" } else { "" })
            }
            Statement::Rollback { chain } => {
                write!(f, "ROLLBACK{}", if *chain { " AND CHAIN" } else { "" })
            }
            Statement::SetVariable {
                local,
                variables,
                values,
            } => {
                write!(f, "SET {}", if *local { "LOCAL " } else { "" })?;
                if variables.len() > 1 {
                    write!(
                        f,
                        "({}) = ({})",
                        display_comma_separated(variables),
                        display_comma_separated(values)
                    )
                } else {
                    write!(
                        f,
                        "{} = {}",
                        display_comma_separated(variables),
                        display_comma_separated(values)
                    )
                }
            }
            Statement::ShowVariable { variable } => {
                f.write_str("SHOW")?;
                if !variable.is_empty() {
                    write!(f, " {}", display_separated(variable, " "))?;
                }
                Ok(())
            }
            Statement::Grant {
                privileges,
                objects,
                grantees,
                with_grant_option,
            } => {
                write!(f, "GRANT {} ", privileges)?;
                write!(f, "ON {} ", objects)?;
                write!(f, "TO {}", display_comma_separated(grantees))?;
                if *with_grant_option {
                    f.write_str(" WITH GRANT OPTION")?;
                }
                Ok(())
            }
            Statement::Revoke {
                privileges,
                objects,
                grantees,
                cascade,
            } => {
                write!(f, "REVOKE {} ", privileges)?;
                write!(f, "ON {} ", objects)?;
                write!(f, "FROM {}", display_comma_separated(grantees))?;
                if *cascade {
                    f.write_str(" CASCADE")?;
                }
                Ok(())
            }
            Statement::Use { db_name } => write!(f, "USE {}", db_name),
            Statement::Explain {
                analyze,
                verbose,
                statement,
            } => write!(
                f,
                "EXPLAIN {}{}{}",
                if *analyze { "ANALYZE " } else { "" },
                if *verbose { "VERBOSE " } else { "" },
                statement
            ),
        }
    }
}

/// The privileges of a GRANT / REVOKE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Privileges {
    /// `ALL [PRIVILEGES]`
    All { with_privileges_keyword: bool },
    /// A list of specific actions
    Actions(Vec<Action>),
}

impl fmt::Display for Privileges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Privileges::All {
                with_privileges_keyword,
            } => write!(
                f,
                "ALL{}",
                if *with_privileges_keyword {
                    " PRIVILEGES"
                } else {
                    ""
                }
            ),
            Privileges::Actions(actions) => write!(f, "{}", display_comma_separated(actions)),
        }
    }
}

/// A single grantable action, with optional column list where the grammar
/// allows one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Create,
    Delete,
    Insert { columns: Option<Vec<Ident>> },
    References { columns: Option<Vec<Ident>> },
    Select { columns: Option<Vec<Ident>> },
    Update { columns: Option<Vec<Ident>> },
    Usage,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = match self {
            Action::Create => {
                f.write_str("CREATE")?;
                &None
            }
            Action::Delete => {
                f.write_str("DELETE")?;
                &None
            }
            Action::Usage => {
                f.write_str("USAGE")?;
                &None
            }
            Action::Insert { columns } => {
                f.write_str("INSERT")?;
                columns
            }
            Action::References { columns } => {
                f.write_str("REFERENCES")?;
                columns
            }
            Action::Select { columns } => {
                f.write_str("SELECT")?;
                columns
            }
            Action::Update { columns } => {
                f.write_str("UPDATE")?;
                columns
            }
        };
        if let Some(columns) = columns {
            write!(f, " ({})", display_comma_separated(columns))?;
        }
        Ok(())
    }
}

/// What a GRANT / REVOKE applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GrantObjects {
    Tables(Vec<ObjectName>),
    Schemas(Vec<ObjectName>),
}

impl fmt::Display for GrantObjects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrantObjects::Tables(names) => write!(f, "{}", display_comma_separated(names)),
            GrantObjects::Schemas(names) => {
                write!(f, "SCHEMA {}", display_comma_separated(names))
            }
        }
    }
}

/// One mode of a START TRANSACTION statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionMode {
    AccessMode(TransactionAccessMode),
    IsolationLevel(TransactionIsolationLevel),
}

impl fmt::Display for TransactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionMode::AccessMode(mode) => write!(f, "{}", mode),
            TransactionMode::IsolationLevel(level) => write!(f, "ISOLATION LEVEL {}", level),
        }
    }
}

/// READ ONLY / READ WRITE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionAccessMode {
    ReadOnly,
    ReadWrite,
}

impl fmt::Display for TransactionAccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionAccessMode::ReadOnly => "READ ONLY",
            TransactionAccessMode::ReadWrite => "READ WRITE",
        })
    }
}

/// The standard isolation levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionIsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl fmt::Display for TransactionIsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionIsolationLevel::ReadUncommitted => "READ UNCOMMITTED",
            TransactionIsolationLevel::ReadCommitted => "READ COMMITTED",
            TransactionIsolationLevel::RepeatableRead => "REPEATABLE READ",
            TransactionIsolationLevel::Serializable => "SERIALIZABLE",
        })
    }
}

/// `BEGIN DEFERRED | IMMEDIATE | EXCLUSIVE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionModifier {
    Deferred,
    Immediate,
    Exclusive,
}

impl fmt::Display for TransactionModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionModifier::Deferred => "DEFERRED",
            TransactionModifier::Immediate => "IMMEDIATE",
            TransactionModifier::Exclusive => "EXCLUSIVE",
        })
    }
}

// =============================================================================
// Builder helpers
// =============================================================================

/// A bare column reference.
pub fn col(name: &str) -> Expr {
    Expr::Identifier(Ident::new(name))
}

/// An integer literal.
pub fn lit_int(n: i64) -> Expr {
    Expr::Value(Value::Number(n.to_string()))
}

/// A string literal.
pub fn lit_str(s: &str) -> Expr {
    Expr::Value(Value::SingleQuotedString(s.into()))
}

/// A boolean literal.
pub fn lit_bool(b: bool) -> Expr {
    Expr::Value(Value::Boolean(b))
}

/// The NULL literal.
pub fn lit_null() -> Expr {
    Expr::Value(Value::Null)
}

/// A binary operation.
pub fn binary_op(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::BinaryOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

/// A plain function call over positional arguments.
pub fn func(name: &str, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Function(Function {
        name: ObjectName(vec![Ident::new(name)]),
        args: args.into_iter().map(FunctionArg::Unnamed).collect(),
        distinct: false,
        null_treatment: None,
        filter: None,
        over: None,
    })
}
