//! Query AST nodes: SELECT, set operations, joins, ordering and windows.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Expr, Ident, ObjectName};
use crate::writer::display_comma_separated;

// =============================================================================
// Query
// =============================================================================

/// A complete query: body plus the clauses that may trail any body.
///
/// There is exactly one body; ORDER BY, LIMIT, OFFSET, FETCH and the lock
/// clauses each appear at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// `WITH` clause, possibly recursive
    pub with: Option<With>,
    /// SELECT, VALUES, a parenthesized query, or a set operation
    pub body: Box<SetExpr>,
    pub order_by: Vec<OrderByExpr>,
    pub limit: Option<Expr>,
    pub offset: Option<Offset>,
    pub fetch: Option<Fetch>,
    pub locks: Vec<LockClause>,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{} ", with)?;
        }
        write!(f, "{}", self.body)?;
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", display_comma_separated(&self.order_by))?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {}", limit)?;
        }
        if let Some(offset) = &self.offset {
            write!(f, " {}", offset)?;
        }
        if let Some(fetch) = &self.fetch {
            write!(f, " {}", fetch)?;
        }
        for lock in &self.locks {
            write!(f, " {}", lock)?;
        }
        Ok(())
    }
}

/// `WITH [RECURSIVE] cte [, cte ...]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct With {
    pub recursive: bool,
    pub cte_tables: Vec<Cte>,
}

impl fmt::Display for With {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WITH {}{}",
            if self.recursive { "RECURSIVE " } else { "" },
            display_comma_separated(&self.cte_tables)
        )
    }
}

/// A single common table expression: `alias [(columns)] AS (query)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cte {
    pub alias: TableAlias,
    pub query: Box<Query>,
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} AS ({})", self.alias, self.query)
    }
}

// =============================================================================
// Query body
// =============================================================================

/// The body of a query, possibly a tree of set operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SetExpr {
    Select(Box<Select>),
    /// A parenthesized query, e.g. the operand of a set operation
    Query(Box<Query>),
    SetOperation {
        op: SetOperator,
        set_quantifier: SetQuantifier,
        left: Box<SetExpr>,
        right: Box<SetExpr>,
    },
    Values(Values),
}

impl fmt::Display for SetExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetExpr::Select(select) => write!(f, "{}", select),
            SetExpr::Query(query) => write!(f, "({})", query),
            SetExpr::SetOperation {
                op,
                set_quantifier,
                left,
                right,
            } => {
                write!(f, "{} {}", left, op)?;
                match set_quantifier {
                    SetQuantifier::All | SetQuantifier::Distinct => {
                        write!(f, " {}", set_quantifier)?
                    }
                    SetQuantifier::None => {}
                }
                write!(f, " {}", right)
            }
            SetExpr::Values(values) => write!(f, "{}", values),
        }
    }
}

/// UNION, EXCEPT or INTERSECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOperator {
    Union,
    Except,
    Intersect,
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SetOperator::Union => "UNION",
            SetOperator::Except => "EXCEPT",
            SetOperator::Intersect => "INTERSECT",
        })
    }
}

/// ALL / DISTINCT modifier on a set operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetQuantifier {
    All,
    Distinct,
    None,
}

impl fmt::Display for SetQuantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetQuantifier::All => f.write_str("ALL"),
            SetQuantifier::Distinct => f.write_str("DISTINCT"),
            SetQuantifier::None => Ok(()),
        }
    }
}

/// `VALUES (...), (...)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Values(pub Vec<Vec<Expr>>);

impl fmt::Display for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VALUES ")?;
        let mut first = true;
        for row in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "({})", display_comma_separated(row))?;
        }
        Ok(())
    }
}

// =============================================================================
// SELECT
// =============================================================================

/// A SELECT ... FROM ... body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
    pub distinct: Option<Distinct>,
    /// T-SQL `TOP n`
    pub top: Option<Top>,
    pub projection: Vec<SelectItem>,
    pub from: Vec<TableWithJoins>,
    pub selection: Option<Expr>,
    /// GROUP BY expressions; grouping expressions (ROLLUP, CUBE, GROUPING
    /// SETS) appear as `Expr` variants here
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
    /// `WINDOW name AS (...)` definitions
    pub named_windows: Vec<NamedWindowDef>,
    /// `START WITH ... CONNECT BY` hierarchy clause
    pub connect_by: Option<ConnectBy>,
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT")?;
        if let Some(distinct) = &self.distinct {
            write!(f, " {}", distinct)?;
        }
        if let Some(top) = &self.top {
            write!(f, " {}", top)?;
        }
        write!(f, " {}", display_comma_separated(&self.projection))?;
        if !self.from.is_empty() {
            write!(f, " FROM {}", display_comma_separated(&self.from))?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {}", selection)?;
        }
        if let Some(connect_by) = &self.connect_by {
            write!(f, " {}", connect_by)?;
        }
        if !self.group_by.is_empty() {
            write!(f, " GROUP BY {}", display_comma_separated(&self.group_by))?;
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {}", having)?;
        }
        if !self.named_windows.is_empty() {
            write!(f, " WINDOW {}", display_comma_separated(&self.named_windows))?;
        }
        Ok(())
    }
}

/// DISTINCT modifier on a projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Distinct {
    Distinct,
    /// Postgres `DISTINCT ON (...)`
    On(Vec<Expr>),
}

impl fmt::Display for Distinct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distinct::Distinct => f.write_str("DISTINCT"),
            Distinct::On(exprs) => write!(f, "DISTINCT ON ({})", display_comma_separated(exprs)),
        }
    }
}

/// T-SQL `TOP n [PERCENT] [WITH TIES]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Top {
    pub quantity: Option<Expr>,
    pub percent: bool,
    pub with_ties: bool,
}

impl fmt::Display for Top {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TOP")?;
        if let Some(quantity) = &self.quantity {
            write!(f, " {}", quantity)?;
        }
        if self.percent {
            f.write_str(" PERCENT")?;
        }
        if self.with_ties {
            f.write_str(" WITH TIES")?;
        }
        Ok(())
    }
}

/// One item in the SELECT projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectItem {
    /// A bare expression
    UnnamedExpr(Expr),
    /// `expr AS alias`
    ExprWithAlias { expr: Expr, alias: Ident },
    /// `table.*`
    QualifiedWildcard(ObjectName, WildcardOptions),
    /// `*`
    Wildcard(WildcardOptions),
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectItem::UnnamedExpr(expr) => write!(f, "{}", expr),
            SelectItem::ExprWithAlias { expr, alias } => write!(f, "{} AS {}", expr, alias),
            SelectItem::QualifiedWildcard(prefix, options) => write!(f, "{}.*{}", prefix, options),
            SelectItem::Wildcard(options) => write!(f, "*{}", options),
        }
    }
}

/// Modifiers that may trail a wildcard projection item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WildcardOptions {
    /// `EXCEPT (a, b)` column trimming
    pub except: Option<Vec<Ident>>,
}

impl fmt::Display for WildcardOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(except) = &self.except {
            write!(f, " EXCEPT ({})", display_comma_separated(except))?;
        }
        Ok(())
    }
}

// =============================================================================
// FROM clause
// =============================================================================

/// A table factor followed by its joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableWithJoins {
    pub relation: TableFactor,
    pub joins: Vec<Join>,
}

impl fmt::Display for TableWithJoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relation)?;
        for join in &self.joins {
            write!(f, "{}", join)?;
        }
        Ok(())
    }
}

/// One relation in a FROM clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableFactor {
    /// A named table (or view)
    Table {
        name: ObjectName,
        alias: Option<TableAlias>,
    },
    /// A parenthesized subquery, optionally LATERAL
    Derived {
        lateral: bool,
        subquery: Box<Query>,
        alias: Option<TableAlias>,
    },
    /// A parenthesized join tree
    NestedJoin {
        table_with_joins: Box<TableWithJoins>,
        alias: Option<TableAlias>,
    },
}

impl fmt::Display for TableFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFactor::Table { name, alias } => {
                write!(f, "{}", name)?;
                if let Some(alias) = alias {
                    write!(f, " AS {}", alias)?;
                }
                Ok(())
            }
            TableFactor::Derived {
                lateral,
                subquery,
                alias,
            } => {
                if *lateral {
                    f.write_str("LATERAL ")?;
                }
                write!(f, "({})", subquery)?;
                if let Some(alias) = alias {
                    write!(f, " AS {}", alias)?;
                }
                Ok(())
            }
            TableFactor::NestedJoin {
                table_with_joins,
                alias,
            } => {
                write!(f, "({})", table_with_joins)?;
                if let Some(alias) = alias {
                    write!(f, " AS {}", alias)?;
                }
                Ok(())
            }
        }
    }
}

/// `AS name [(col, ...)]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableAlias {
    pub name: Ident,
    pub columns: Vec<Ident>,
}

impl fmt::Display for TableAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", display_comma_separated(&self.columns))?;
        }
        Ok(())
    }
}

/// A join attached to the preceding table factor. Rendering includes the
/// leading space so `TableWithJoins` can simply concatenate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub relation: TableFactor,
    pub join_operator: JoinOperator,
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn prefix(constraint: &JoinConstraint) -> &'static str {
            match constraint {
                JoinConstraint::Natural => "NATURAL ",
                _ => "",
            }
        }
        struct Suffix<'a>(&'a JoinConstraint);
        impl fmt::Display for Suffix<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.0 {
                    JoinConstraint::On(expr) => write!(f, " ON {}", expr),
                    JoinConstraint::Using(columns) => {
                        write!(f, " USING({})", display_comma_separated(columns))
                    }
                    JoinConstraint::Natural | JoinConstraint::None => Ok(()),
                }
            }
        }
        match &self.join_operator {
            JoinOperator::Inner(constraint) => write!(
                f,
                " {}JOIN {}{}",
                prefix(constraint),
                self.relation,
                Suffix(constraint)
            ),
            JoinOperator::LeftOuter(constraint) => write!(
                f,
                " {}LEFT JOIN {}{}",
                prefix(constraint),
                self.relation,
                Suffix(constraint)
            ),
            JoinOperator::RightOuter(constraint) => write!(
                f,
                " {}RIGHT JOIN {}{}",
                prefix(constraint),
                self.relation,
                Suffix(constraint)
            ),
            JoinOperator::FullOuter(constraint) => write!(
                f,
                " {}FULL JOIN {}{}",
                prefix(constraint),
                self.relation,
                Suffix(constraint)
            ),
            JoinOperator::CrossJoin => write!(f, " CROSS JOIN {}", self.relation),
        }
    }
}

/// How a join combines rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JoinOperator {
    Inner(JoinConstraint),
    LeftOuter(JoinConstraint),
    RightOuter(JoinConstraint),
    FullOuter(JoinConstraint),
    CrossJoin,
}

/// The join condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JoinConstraint {
    On(Expr),
    Using(Vec<Ident>),
    Natural,
    None,
}

// =============================================================================
// Trailing clauses
// =============================================================================

/// One expression in ORDER BY.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByExpr {
    pub expr: Expr,
    /// `Some(true)` for ASC, `Some(false)` for DESC
    pub asc: Option<bool>,
    pub nulls_first: Option<bool>,
}

impl fmt::Display for OrderByExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        match self.asc {
            Some(true) => f.write_str(" ASC")?,
            Some(false) => f.write_str(" DESC")?,
            None => {}
        }
        match self.nulls_first {
            Some(true) => f.write_str(" NULLS FIRST")?,
            Some(false) => f.write_str(" NULLS LAST")?,
            None => {}
        }
        Ok(())
    }
}

/// `OFFSET <value> [ROW | ROWS]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub value: Expr,
    pub rows: OffsetRows,
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OFFSET {}{}", self.value, self.rows)
    }
}

/// The optional ROW/ROWS noise word after OFFSET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffsetRows {
    None,
    Row,
    Rows,
}

impl fmt::Display for OffsetRows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetRows::None => Ok(()),
            OffsetRows::Row => f.write_str(" ROW"),
            OffsetRows::Rows => f.write_str(" ROWS"),
        }
    }
}

/// `FETCH { FIRST | NEXT } [<quantity> [PERCENT]] ROWS { ONLY | WITH TIES }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fetch {
    pub with_ties: bool,
    pub percent: bool,
    pub quantity: Option<Expr>,
}

impl fmt::Display for Fetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extension = if self.with_ties { "WITH TIES" } else { "ONLY" };
        match &self.quantity {
            Some(quantity) => {
                let percent = if self.percent { " PERCENT" } else { "" };
                write!(f, "FETCH FIRST {}{} ROWS {}", quantity, percent, extension)
            }
            None => write!(f, "FETCH FIRST ROWS {}", extension),
        }
    }
}

/// `FOR UPDATE` / `FOR SHARE`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockClause {
    pub lock_type: LockType,
}

impl fmt::Display for LockClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FOR {}", self.lock_type)
    }
}

/// What kind of row lock the query requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockType {
    Update,
    Share,
}

impl fmt::Display for LockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LockType::Update => "UPDATE",
            LockType::Share => "SHARE",
        })
    }
}

// =============================================================================
// Windows and hierarchies
// =============================================================================

/// `WINDOW <name> AS (<spec>)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedWindowDef {
    pub name: Ident,
    pub window_spec: WindowSpec,
}

impl fmt::Display for NamedWindowDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} AS ({})", self.name, self.window_spec)
    }
}

/// What follows OVER: an inline spec or a named window reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WindowType {
    WindowSpec(WindowSpec),
    NamedWindow(Ident),
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowType::WindowSpec(spec) => write!(f, "({})", spec),
            WindowType::NamedWindow(name) => write!(f, "{}", name),
        }
    }
}

/// The inside of an OVER (...) specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderByExpr>,
    pub window_frame: Option<WindowFrame>,
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut delim = "";
        if !self.partition_by.is_empty() {
            write!(
                f,
                "PARTITION BY {}",
                display_comma_separated(&self.partition_by)
            )?;
            delim = " ";
        }
        if !self.order_by.is_empty() {
            write!(
                f,
                "{}ORDER BY {}",
                delim,
                display_comma_separated(&self.order_by)
            )?;
            delim = " ";
        }
        if let Some(frame) = &self.window_frame {
            write!(f, "{}{}", delim, frame)?;
        }
        Ok(())
    }
}

/// A window frame clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowFrame {
    pub units: WindowFrameUnits,
    pub start_bound: WindowFrameBound,
    pub end_bound: Option<WindowFrameBound>,
}

impl fmt::Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.end_bound {
            Some(end) => write!(
                f,
                "{} BETWEEN {} AND {}",
                self.units, self.start_bound, end
            ),
            None => write!(f, "{} {}", self.units, self.start_bound),
        }
    }
}

/// ROWS, RANGE or GROUPS framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowFrameUnits {
    Rows,
    Range,
    Groups,
}

impl fmt::Display for WindowFrameUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WindowFrameUnits::Rows => "ROWS",
            WindowFrameUnits::Range => "RANGE",
            WindowFrameUnits::Groups => "GROUPS",
        })
    }
}

/// One frame boundary; `None` offsets mean UNBOUNDED.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WindowFrameBound {
    CurrentRow,
    Preceding(Option<Box<Expr>>),
    Following(Option<Box<Expr>>),
}

impl fmt::Display for WindowFrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowFrameBound::CurrentRow => f.write_str("CURRENT ROW"),
            WindowFrameBound::Preceding(None) => f.write_str("UNBOUNDED PRECEDING"),
            WindowFrameBound::Preceding(Some(n)) => write!(f, "{} PRECEDING", n),
            WindowFrameBound::Following(None) => f.write_str("UNBOUNDED FOLLOWING"),
            WindowFrameBound::Following(Some(n)) => write!(f, "{} FOLLOWING", n),
        }
    }
}

/// `[START WITH <expr>] CONNECT BY <exprs>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectBy {
    pub start_with: Option<Expr>,
    pub connect_by: Vec<Expr>,
}

impl fmt::Display for ConnectBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start_with) = &self.start_with {
            write!(f, "START WITH {} ", start_with)?;
        }
        write!(f, "CONNECT BY {}", display_comma_separated(&self.connect_by))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Value;

    fn ident_expr(name: &str) -> Expr {
        Expr::Identifier(Ident::new(name))
    }

    #[test]
    fn test_order_by_display() {
        let order = OrderByExpr {
            expr: ident_expr("a"),
            asc: Some(false),
            nulls_first: Some(true),
        };
        assert_eq!(order.to_string(), "a DESC NULLS FIRST");
    }

    #[test]
    fn test_window_frame_display() {
        let frame = WindowFrame {
            units: WindowFrameUnits::Rows,
            start_bound: WindowFrameBound::Preceding(None),
            end_bound: Some(WindowFrameBound::CurrentRow),
        };
        assert_eq!(
            frame.to_string(),
            "ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW"
        );

        let frame = WindowFrame {
            units: WindowFrameUnits::Range,
            start_bound: WindowFrameBound::Preceding(Some(Box::new(Expr::Value(Value::Number(
                "1".into(),
            ))))),
            end_bound: None,
        };
        assert_eq!(frame.to_string(), "RANGE 1 PRECEDING");
    }

    #[test]
    fn test_values_display() {
        let values = Values(vec![
            vec![Expr::Value(Value::Number("1".into())), ident_expr("a")],
            vec![Expr::Value(Value::Number("2".into())), ident_expr("b")],
        ]);
        assert_eq!(values.to_string(), "VALUES (1, a), (2, b)");
    }

    #[test]
    fn test_join_display() {
        let join = Join {
            relation: TableFactor::Table {
                name: ObjectName(vec![Ident::new("t2")]),
                alias: None,
            },
            join_operator: JoinOperator::LeftOuter(JoinConstraint::Using(vec![Ident::new("id")])),
        };
        assert_eq!(join.to_string(), " LEFT JOIN t2 USING(id)");

        let natural = Join {
            relation: TableFactor::Table {
                name: ObjectName(vec![Ident::new("t3")]),
                alias: None,
            },
            join_operator: JoinOperator::Inner(JoinConstraint::Natural),
        };
        assert_eq!(natural.to_string(), " NATURAL JOIN t3");
    }

    #[test]
    fn test_connect_by_display() {
        let connect = ConnectBy {
            start_with: Some(ident_expr("root")),
            connect_by: vec![ident_expr("child")],
        };
        assert_eq!(connect.to_string(), "START WITH root CONNECT BY child");
    }
}
