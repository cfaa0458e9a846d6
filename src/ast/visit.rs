//! AST traversal with rewrite-on-change.
//!
//! A [`Visitor`] gets pre/post hooks for the five privileged node kinds
//! (statement, query, expression, table factor, object name). Hooks take the
//! node by value and return the possibly-replaced node; the default hooks
//! are the identity. The walk moves unchanged children straight back into
//! their parents, so a visitor that replaces nothing hands back the original
//! tree, and replacing one node rebuilds exactly the ancestors on its path.
//!
//! Children are visited in field declaration order. [`descendants`] gives
//! the same order as a lazy pre-order borrow of the tree.
//!
//! A hook returning an error aborts the walk immediately; the error reaches
//! the caller unchanged. Nodes are immutable values, so there is no torn
//! intermediate state to roll back.

use std::fmt;

use thiserror::Error;

use super::ddl::{AlterTableOperation, ColumnDef, ColumnOption, TableConstraint};
use super::dml::{Assignment, Delete, Insert, OnConflict, OnConflictAction, Update};
use super::query::{
    ConnectBy, Cte, Distinct, Fetch, Join, JoinConstraint, JoinOperator, NamedWindowDef, Offset,
    OrderByExpr, Query, Select, SelectItem, SetExpr, TableFactor, TableWithJoins, Top, Values,
    WindowFrame, WindowFrameBound, WindowSpec, WindowType, With,
};
use super::{
    DictionaryField, Expr, Function, FunctionArg, GrantObjects, LambdaFunction, ObjectName,
    Statement,
};

/// Error raised by a visitor hook; carried out of the walk unchanged.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct VisitError {
    pub message: String,
    /// The user error that triggered the abort, if one was attached.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl VisitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source),
        }
    }
}

/// Pre/post hooks over the privileged node kinds. All default to identity.
pub trait Visitor {
    fn pre_visit_statement(&mut self, statement: Statement) -> Result<Statement, VisitError> {
        Ok(statement)
    }

    fn post_visit_statement(&mut self, statement: Statement) -> Result<Statement, VisitError> {
        Ok(statement)
    }

    fn pre_visit_query(&mut self, query: Query) -> Result<Query, VisitError> {
        Ok(query)
    }

    fn post_visit_query(&mut self, query: Query) -> Result<Query, VisitError> {
        Ok(query)
    }

    fn pre_visit_expr(&mut self, expr: Expr) -> Result<Expr, VisitError> {
        Ok(expr)
    }

    fn post_visit_expr(&mut self, expr: Expr) -> Result<Expr, VisitError> {
        Ok(expr)
    }

    fn pre_visit_table_factor(&mut self, factor: TableFactor) -> Result<TableFactor, VisitError> {
        Ok(factor)
    }

    fn post_visit_table_factor(&mut self, factor: TableFactor) -> Result<TableFactor, VisitError> {
        Ok(factor)
    }

    fn pre_visit_object_name(&mut self, name: ObjectName) -> Result<ObjectName, VisitError> {
        Ok(name)
    }

    fn post_visit_object_name(&mut self, name: ObjectName) -> Result<ObjectName, VisitError> {
        Ok(name)
    }
}

// =============================================================================
// Rewriting walk
// =============================================================================

type VResult<T> = Result<T, VisitError>;

/// Walk a statement, returning the possibly-rewritten statement.
pub fn visit_statement<V: Visitor>(statement: Statement, visitor: &mut V) -> VResult<Statement> {
    let statement = visitor.pre_visit_statement(statement)?;
    let statement = walk_statement(statement, visitor)?;
    visitor.post_visit_statement(statement)
}

/// Walk a bare expression, returning the possibly-rewritten expression.
pub fn visit_expr<V: Visitor>(expr: Expr, visitor: &mut V) -> VResult<Expr> {
    let expr = visitor.pre_visit_expr(expr)?;
    let expr = walk_expr(expr, visitor)?;
    visitor.post_visit_expr(expr)
}

fn visit_query<V: Visitor>(query: Query, visitor: &mut V) -> VResult<Query> {
    let query = visitor.pre_visit_query(query)?;
    let query = walk_query(query, visitor)?;
    visitor.post_visit_query(query)
}

fn visit_table_factor<V: Visitor>(factor: TableFactor, visitor: &mut V) -> VResult<TableFactor> {
    let factor = visitor.pre_visit_table_factor(factor)?;
    let factor = walk_table_factor(factor, visitor)?;
    visitor.post_visit_table_factor(factor)
}

fn visit_object_name<V: Visitor>(name: ObjectName, visitor: &mut V) -> VResult<ObjectName> {
    let name = visitor.pre_visit_object_name(name)?;
    visitor.post_visit_object_name(name)
}

fn visit_boxed_query<V: Visitor>(query: Box<Query>, visitor: &mut V) -> VResult<Box<Query>> {
    Ok(Box::new(visit_query(*query, visitor)?))
}

fn visit_boxed_expr<V: Visitor>(expr: Box<Expr>, visitor: &mut V) -> VResult<Box<Expr>> {
    Ok(Box::new(visit_expr(*expr, visitor)?))
}

fn visit_opt_expr<V: Visitor>(expr: Option<Expr>, visitor: &mut V) -> VResult<Option<Expr>> {
    expr.map(|e| visit_expr(e, visitor)).transpose()
}

fn visit_opt_boxed_expr<V: Visitor>(
    expr: Option<Box<Expr>>,
    visitor: &mut V,
) -> VResult<Option<Box<Expr>>> {
    expr.map(|e| visit_boxed_expr(e, visitor)).transpose()
}

fn visit_exprs<V: Visitor>(exprs: Vec<Expr>, visitor: &mut V) -> VResult<Vec<Expr>> {
    exprs.into_iter().map(|e| visit_expr(e, visitor)).collect()
}

fn visit_expr_sets<V: Visitor>(sets: Vec<Vec<Expr>>, visitor: &mut V) -> VResult<Vec<Vec<Expr>>> {
    sets.into_iter().map(|set| visit_exprs(set, visitor)).collect()
}

fn walk_statement<V: Visitor>(statement: Statement, visitor: &mut V) -> VResult<Statement> {
    Ok(match statement {
        Statement::Query(query) => Statement::Query(visit_boxed_query(query, visitor)?),
        Statement::Insert(insert) => Statement::Insert(walk_insert(insert, visitor)?),
        Statement::Update(update) => Statement::Update(walk_update(update, visitor)?),
        Statement::Delete(delete) => Statement::Delete(walk_delete(delete, visitor)?),
        Statement::CreateTable {
            or_replace,
            if_not_exists,
            name,
            columns,
            constraints,
        } => Statement::CreateTable {
            or_replace,
            if_not_exists,
            name: visit_object_name(name, visitor)?,
            columns: columns
                .into_iter()
                .map(|c| walk_column_def(c, visitor))
                .collect::<VResult<_>>()?,
            constraints: constraints
                .into_iter()
                .map(|c| walk_table_constraint(c, visitor))
                .collect::<VResult<_>>()?,
        },
        Statement::CreateView {
            or_replace,
            materialized,
            name,
            columns,
            query,
        } => Statement::CreateView {
            or_replace,
            materialized,
            name: visit_object_name(name, visitor)?,
            columns,
            query: visit_boxed_query(query, visitor)?,
        },
        Statement::CreateIndex {
            name,
            table_name,
            unique,
            if_not_exists,
            columns,
        } => Statement::CreateIndex {
            name: visit_object_name(name, visitor)?,
            table_name: visit_object_name(table_name, visitor)?,
            unique,
            if_not_exists,
            columns: columns
                .into_iter()
                .map(|c| walk_order_by(c, visitor))
                .collect::<VResult<_>>()?,
        },
        Statement::AlterTable { name, operation } => Statement::AlterTable {
            name: visit_object_name(name, visitor)?,
            operation: walk_alter_operation(operation, visitor)?,
        },
        Statement::Drop {
            object_type,
            if_exists,
            names,
            cascade,
            restrict,
        } => Statement::Drop {
            object_type,
            if_exists,
            names: names
                .into_iter()
                .map(|n| visit_object_name(n, visitor))
                .collect::<VResult<_>>()?,
            cascade,
            restrict,
        },
        Statement::Truncate { table_name } => Statement::Truncate {
            table_name: visit_object_name(table_name, visitor)?,
        },
        Statement::SetVariable {
            local,
            variables,
            values,
        } => Statement::SetVariable {
            local,
            variables: variables
                .into_iter()
                .map(|n| visit_object_name(n, visitor))
                .collect::<VResult<_>>()?,
            values: visit_exprs(values, visitor)?,
        },
        Statement::Grant {
            privileges,
            objects,
            grantees,
            with_grant_option,
        } => Statement::Grant {
            privileges,
            objects: walk_grant_objects(objects, visitor)?,
            grantees,
            with_grant_option,
        },
        Statement::Revoke {
            privileges,
            objects,
            grantees,
            cascade,
        } => Statement::Revoke {
            privileges,
            objects: walk_grant_objects(objects, visitor)?,
            grantees,
            cascade,
        },
        Statement::Explain {
            analyze,
            verbose,
            statement,
        } => Statement::Explain {
            analyze,
            verbose,
            statement: Box::new(visit_statement(*statement, visitor)?),
        },
        // leaf statements: no visitable children
        other @ (Statement::StartTransaction { .. }
        | Statement::Commit { .. }
        | Statement::Rollback { .. }
        | Statement::ShowVariable { .. }
        | Statement::Use { .. }) => other,
    })
}

fn walk_grant_objects<V: Visitor>(
    objects: GrantObjects,
    visitor: &mut V,
) -> VResult<GrantObjects> {
    let visit_names = |names: Vec<ObjectName>, visitor: &mut V| {
        names
            .into_iter()
            .map(|n| visit_object_name(n, visitor))
            .collect::<VResult<_>>()
    };
    Ok(match objects {
        GrantObjects::Tables(names) => GrantObjects::Tables(visit_names(names, visitor)?),
        GrantObjects::Schemas(names) => GrantObjects::Schemas(visit_names(names, visitor)?),
    })
}

fn walk_insert<V: Visitor>(insert: Insert, visitor: &mut V) -> VResult<Insert> {
    Ok(Insert {
        table_name: visit_object_name(insert.table_name, visitor)?,
        columns: insert.columns,
        source: visit_boxed_query(insert.source, visitor)?,
        on_conflict: insert
            .on_conflict
            .map(|oc| walk_on_conflict(oc, visitor))
            .transpose()?,
        returning: insert
            .returning
            .map(|items| walk_select_items(items, visitor))
            .transpose()?,
    })
}

fn walk_on_conflict<V: Visitor>(on_conflict: OnConflict, visitor: &mut V) -> VResult<OnConflict> {
    Ok(OnConflict {
        conflict_target: on_conflict.conflict_target,
        action: match on_conflict.action {
            OnConflictAction::DoNothing => OnConflictAction::DoNothing,
            OnConflictAction::DoUpdate(assignments) => OnConflictAction::DoUpdate(
                assignments
                    .into_iter()
                    .map(|a| walk_assignment(a, visitor))
                    .collect::<VResult<_>>()?,
            ),
        },
    })
}

fn walk_assignment<V: Visitor>(assignment: Assignment, visitor: &mut V) -> VResult<Assignment> {
    Ok(Assignment {
        target: assignment.target,
        value: visit_expr(assignment.value, visitor)?,
    })
}

fn walk_update<V: Visitor>(update: Update, visitor: &mut V) -> VResult<Update> {
    Ok(Update {
        table: walk_table_with_joins(update.table, visitor)?,
        assignments: update
            .assignments
            .into_iter()
            .map(|a| walk_assignment(a, visitor))
            .collect::<VResult<_>>()?,
        from: update
            .from
            .map(|t| walk_table_with_joins(t, visitor))
            .transpose()?,
        selection: visit_opt_expr(update.selection, visitor)?,
        returning: update
            .returning
            .map(|items| walk_select_items(items, visitor))
            .transpose()?,
    })
}

fn walk_delete<V: Visitor>(delete: Delete, visitor: &mut V) -> VResult<Delete> {
    Ok(Delete {
        from: walk_table_with_joins(delete.from, visitor)?,
        using: delete
            .using
            .map(|tables| {
                tables
                    .into_iter()
                    .map(|t| walk_table_with_joins(t, visitor))
                    .collect::<VResult<_>>()
            })
            .transpose()?,
        selection: visit_opt_expr(delete.selection, visitor)?,
        returning: delete
            .returning
            .map(|items| walk_select_items(items, visitor))
            .transpose()?,
    })
}

fn walk_column_def<V: Visitor>(column: ColumnDef, visitor: &mut V) -> VResult<ColumnDef> {
    Ok(ColumnDef {
        name: column.name,
        data_type: column.data_type,
        options: column
            .options
            .into_iter()
            .map(|mut def| {
                def.option = match def.option {
                    ColumnOption::Default(expr) => {
                        ColumnOption::Default(visit_expr(expr, visitor)?)
                    }
                    ColumnOption::Check(expr) => ColumnOption::Check(visit_expr(expr, visitor)?),
                    ColumnOption::ForeignKey {
                        foreign_table,
                        referred_columns,
                        on_delete,
                        on_update,
                    } => ColumnOption::ForeignKey {
                        foreign_table: visit_object_name(foreign_table, visitor)?,
                        referred_columns,
                        on_delete,
                        on_update,
                    },
                    other => other,
                };
                Ok(def)
            })
            .collect::<VResult<_>>()?,
    })
}

fn walk_table_constraint<V: Visitor>(
    constraint: TableConstraint,
    visitor: &mut V,
) -> VResult<TableConstraint> {
    Ok(match constraint {
        TableConstraint::ForeignKey {
            name,
            columns,
            foreign_table,
            referred_columns,
            on_delete,
            on_update,
        } => TableConstraint::ForeignKey {
            name,
            columns,
            foreign_table: visit_object_name(foreign_table, visitor)?,
            referred_columns,
            on_delete,
            on_update,
        },
        TableConstraint::Check { name, expr } => TableConstraint::Check {
            name,
            expr: visit_boxed_expr(expr, visitor)?,
        },
        unique @ TableConstraint::Unique { .. } => unique,
    })
}

fn walk_alter_operation<V: Visitor>(
    operation: AlterTableOperation,
    visitor: &mut V,
) -> VResult<AlterTableOperation> {
    Ok(match operation {
        AlterTableOperation::AddColumn { column_def } => AlterTableOperation::AddColumn {
            column_def: walk_column_def(column_def, visitor)?,
        },
        AlterTableOperation::AddConstraint(constraint) => {
            AlterTableOperation::AddConstraint(walk_table_constraint(constraint, visitor)?)
        }
        AlterTableOperation::RenameTable { table_name } => AlterTableOperation::RenameTable {
            table_name: visit_object_name(table_name, visitor)?,
        },
        other => other,
    })
}

fn walk_query<V: Visitor>(query: Query, visitor: &mut V) -> VResult<Query> {
    Ok(Query {
        with: query.with.map(|w| walk_with(w, visitor)).transpose()?,
        body: Box::new(walk_set_expr(*query.body, visitor)?),
        order_by: query
            .order_by
            .into_iter()
            .map(|o| walk_order_by(o, visitor))
            .collect::<VResult<_>>()?,
        limit: visit_opt_expr(query.limit, visitor)?,
        offset: query
            .offset
            .map(|o| {
                Ok(Offset {
                    value: visit_expr(o.value, visitor)?,
                    rows: o.rows,
                })
            })
            .transpose()?,
        fetch: query
            .fetch
            .map(|fetch| {
                Ok(Fetch {
                    with_ties: fetch.with_ties,
                    percent: fetch.percent,
                    quantity: visit_opt_expr(fetch.quantity, visitor)?,
                })
            })
            .transpose()?,
        locks: query.locks,
    })
}

fn walk_with<V: Visitor>(with: With, visitor: &mut V) -> VResult<With> {
    Ok(With {
        recursive: with.recursive,
        cte_tables: with
            .cte_tables
            .into_iter()
            .map(|cte| {
                Ok(Cte {
                    alias: cte.alias,
                    query: visit_boxed_query(cte.query, visitor)?,
                })
            })
            .collect::<VResult<_>>()?,
    })
}

fn walk_set_expr<V: Visitor>(body: SetExpr, visitor: &mut V) -> VResult<SetExpr> {
    Ok(match body {
        SetExpr::Select(select) => SetExpr::Select(Box::new(walk_select(*select, visitor)?)),
        SetExpr::Query(query) => SetExpr::Query(visit_boxed_query(query, visitor)?),
        SetExpr::SetOperation {
            op,
            set_quantifier,
            left,
            right,
        } => SetExpr::SetOperation {
            op,
            set_quantifier,
            left: Box::new(walk_set_expr(*left, visitor)?),
            right: Box::new(walk_set_expr(*right, visitor)?),
        },
        SetExpr::Values(Values(rows)) => SetExpr::Values(Values(visit_expr_sets(rows, visitor)?)),
    })
}

fn walk_select<V: Visitor>(select: Select, visitor: &mut V) -> VResult<Select> {
    Ok(Select {
        distinct: select
            .distinct
            .map(|d| {
                Ok(match d {
                    Distinct::Distinct => Distinct::Distinct,
                    Distinct::On(exprs) => Distinct::On(visit_exprs(exprs, visitor)?),
                })
            })
            .transpose()?,
        top: select
            .top
            .map(|top| {
                Ok(Top {
                    quantity: visit_opt_expr(top.quantity, visitor)?,
                    percent: top.percent,
                    with_ties: top.with_ties,
                })
            })
            .transpose()?,
        projection: walk_select_items(select.projection, visitor)?,
        from: select
            .from
            .into_iter()
            .map(|t| walk_table_with_joins(t, visitor))
            .collect::<VResult<_>>()?,
        selection: visit_opt_expr(select.selection, visitor)?,
        group_by: visit_exprs(select.group_by, visitor)?,
        having: visit_opt_expr(select.having, visitor)?,
        named_windows: select
            .named_windows
            .into_iter()
            .map(|def| {
                Ok(NamedWindowDef {
                    name: def.name,
                    window_spec: walk_window_spec(def.window_spec, visitor)?,
                })
            })
            .collect::<VResult<_>>()?,
        connect_by: select
            .connect_by
            .map(|cb| {
                Ok(ConnectBy {
                    start_with: visit_opt_expr(cb.start_with, visitor)?,
                    connect_by: visit_exprs(cb.connect_by, visitor)?,
                })
            })
            .transpose()?,
    })
}

fn walk_select_items<V: Visitor>(
    items: Vec<SelectItem>,
    visitor: &mut V,
) -> VResult<Vec<SelectItem>> {
    items
        .into_iter()
        .map(|item| {
            Ok(match item {
                SelectItem::UnnamedExpr(expr) => {
                    SelectItem::UnnamedExpr(visit_expr(expr, visitor)?)
                }
                SelectItem::ExprWithAlias { expr, alias } => SelectItem::ExprWithAlias {
                    expr: visit_expr(expr, visitor)?,
                    alias,
                },
                SelectItem::QualifiedWildcard(name, options) => {
                    SelectItem::QualifiedWildcard(visit_object_name(name, visitor)?, options)
                }
                wildcard @ SelectItem::Wildcard(_) => wildcard,
            })
        })
        .collect()
}

fn walk_table_with_joins<V: Visitor>(
    table: TableWithJoins,
    visitor: &mut V,
) -> VResult<TableWithJoins> {
    Ok(TableWithJoins {
        relation: visit_table_factor(table.relation, visitor)?,
        joins: table
            .joins
            .into_iter()
            .map(|join| {
                Ok(Join {
                    relation: visit_table_factor(join.relation, visitor)?,
                    join_operator: walk_join_operator(join.join_operator, visitor)?,
                })
            })
            .collect::<VResult<_>>()?,
    })
}

fn walk_join_operator<V: Visitor>(op: JoinOperator, visitor: &mut V) -> VResult<JoinOperator> {
    fn walk_constraint<V: Visitor>(
        constraint: JoinConstraint,
        visitor: &mut V,
    ) -> VResult<JoinConstraint> {
        Ok(match constraint {
            JoinConstraint::On(expr) => JoinConstraint::On(visit_expr(expr, visitor)?),
            other => other,
        })
    }
    Ok(match op {
        JoinOperator::Inner(c) => JoinOperator::Inner(walk_constraint(c, visitor)?),
        JoinOperator::LeftOuter(c) => JoinOperator::LeftOuter(walk_constraint(c, visitor)?),
        JoinOperator::RightOuter(c) => JoinOperator::RightOuter(walk_constraint(c, visitor)?),
        JoinOperator::FullOuter(c) => JoinOperator::FullOuter(walk_constraint(c, visitor)?),
        JoinOperator::CrossJoin => JoinOperator::CrossJoin,
    })
}

fn walk_table_factor<V: Visitor>(factor: TableFactor, visitor: &mut V) -> VResult<TableFactor> {
    Ok(match factor {
        TableFactor::Table { name, alias } => TableFactor::Table {
            name: visit_object_name(name, visitor)?,
            alias,
        },
        TableFactor::Derived {
            lateral,
            subquery,
            alias,
        } => TableFactor::Derived {
            lateral,
            subquery: visit_boxed_query(subquery, visitor)?,
            alias,
        },
        TableFactor::NestedJoin {
            table_with_joins,
            alias,
        } => TableFactor::NestedJoin {
            table_with_joins: Box::new(walk_table_with_joins(*table_with_joins, visitor)?),
            alias,
        },
    })
}

fn walk_order_by<V: Visitor>(order_by: OrderByExpr, visitor: &mut V) -> VResult<OrderByExpr> {
    Ok(OrderByExpr {
        expr: visit_expr(order_by.expr, visitor)?,
        asc: order_by.asc,
        nulls_first: order_by.nulls_first,
    })
}

fn walk_window_spec<V: Visitor>(spec: WindowSpec, visitor: &mut V) -> VResult<WindowSpec> {
    Ok(WindowSpec {
        partition_by: visit_exprs(spec.partition_by, visitor)?,
        order_by: spec
            .order_by
            .into_iter()
            .map(|o| walk_order_by(o, visitor))
            .collect::<VResult<_>>()?,
        window_frame: spec
            .window_frame
            .map(|frame| {
                Ok(WindowFrame {
                    units: frame.units,
                    start_bound: walk_frame_bound(frame.start_bound, visitor)?,
                    end_bound: frame
                        .end_bound
                        .map(|b| walk_frame_bound(b, visitor))
                        .transpose()?,
                })
            })
            .transpose()?,
    })
}

fn walk_frame_bound<V: Visitor>(
    bound: WindowFrameBound,
    visitor: &mut V,
) -> VResult<WindowFrameBound> {
    Ok(match bound {
        WindowFrameBound::Preceding(Some(expr)) => {
            WindowFrameBound::Preceding(Some(visit_boxed_expr(expr, visitor)?))
        }
        WindowFrameBound::Following(Some(expr)) => {
            WindowFrameBound::Following(Some(visit_boxed_expr(expr, visitor)?))
        }
        other => other,
    })
}

fn walk_function<V: Visitor>(function: Function, visitor: &mut V) -> VResult<Function> {
    Ok(Function {
        name: visit_object_name(function.name, visitor)?,
        args: function
            .args
            .into_iter()
            .map(|arg| {
                Ok(match arg {
                    FunctionArg::Named {
                        name,
                        arg,
                        operator,
                    } => FunctionArg::Named {
                        name,
                        arg: visit_expr(arg, visitor)?,
                        operator,
                    },
                    FunctionArg::Unnamed(arg) => FunctionArg::Unnamed(visit_expr(arg, visitor)?),
                })
            })
            .collect::<VResult<_>>()?,
        distinct: function.distinct,
        null_treatment: function.null_treatment,
        filter: visit_opt_boxed_expr(function.filter, visitor)?,
        over: function
            .over
            .map(|over| {
                Ok(match over {
                    WindowType::WindowSpec(spec) => {
                        WindowType::WindowSpec(walk_window_spec(spec, visitor)?)
                    }
                    named @ WindowType::NamedWindow(_) => named,
                })
            })
            .transpose()?,
    })
}

fn walk_expr<V: Visitor>(expr: Expr, visitor: &mut V) -> VResult<Expr> {
    Ok(match expr {
        // leaves
        leaf @ (Expr::Identifier(_)
        | Expr::CompoundIdentifier(_)
        | Expr::Wildcard
        | Expr::Value(_)
        | Expr::TypedString { .. }) => leaf,
        Expr::QualifiedWildcard(name) => {
            Expr::QualifiedWildcard(visit_object_name(name, visitor)?)
        }
        Expr::BinaryOp { left, op, right } => Expr::BinaryOp {
            left: visit_boxed_expr(left, visitor)?,
            op,
            right: visit_boxed_expr(right, visitor)?,
        },
        Expr::UnaryOp { op, expr } => Expr::UnaryOp {
            op,
            expr: visit_boxed_expr(expr, visitor)?,
        },
        Expr::JsonAccess {
            left,
            operator,
            right,
        } => Expr::JsonAccess {
            left: visit_boxed_expr(left, visitor)?,
            operator,
            right: visit_boxed_expr(right, visitor)?,
        },
        Expr::Function(function) => Expr::Function(walk_function(function, visitor)?),
        Expr::Case {
            operand,
            conditions,
            results,
            else_result,
        } => Expr::Case {
            operand: visit_opt_boxed_expr(operand, visitor)?,
            conditions: visit_exprs(conditions, visitor)?,
            results: visit_exprs(results, visitor)?,
            else_result: visit_opt_boxed_expr(else_result, visitor)?,
        },
        Expr::Cast { expr, data_type } => Expr::Cast {
            expr: visit_boxed_expr(expr, visitor)?,
            data_type,
        },
        Expr::TryCast { expr, data_type } => Expr::TryCast {
            expr: visit_boxed_expr(expr, visitor)?,
            data_type,
        },
        Expr::Nested(expr) => Expr::Nested(visit_boxed_expr(expr, visitor)?),
        Expr::Subquery(query) => Expr::Subquery(visit_boxed_query(query, visitor)?),
        Expr::Exists { subquery, negated } => Expr::Exists {
            subquery: visit_boxed_query(subquery, visitor)?,
            negated,
        },
        Expr::InList {
            expr,
            list,
            negated,
        } => Expr::InList {
            expr: visit_boxed_expr(expr, visitor)?,
            list: visit_exprs(list, visitor)?,
            negated,
        },
        Expr::InSubquery {
            expr,
            subquery,
            negated,
        } => Expr::InSubquery {
            expr: visit_boxed_expr(expr, visitor)?,
            subquery: visit_boxed_query(subquery, visitor)?,
            negated,
        },
        Expr::Between {
            expr,
            negated,
            low,
            high,
        } => Expr::Between {
            expr: visit_boxed_expr(expr, visitor)?,
            negated,
            low: visit_boxed_expr(low, visitor)?,
            high: visit_boxed_expr(high, visitor)?,
        },
        Expr::Like {
            negated,
            expr,
            pattern,
            escape_char,
        } => Expr::Like {
            negated,
            expr: visit_boxed_expr(expr, visitor)?,
            pattern: visit_boxed_expr(pattern, visitor)?,
            escape_char,
        },
        Expr::ILike {
            negated,
            expr,
            pattern,
            escape_char,
        } => Expr::ILike {
            negated,
            expr: visit_boxed_expr(expr, visitor)?,
            pattern: visit_boxed_expr(pattern, visitor)?,
            escape_char,
        },
        Expr::SimilarTo {
            negated,
            expr,
            pattern,
            escape_char,
        } => Expr::SimilarTo {
            negated,
            expr: visit_boxed_expr(expr, visitor)?,
            pattern: visit_boxed_expr(pattern, visitor)?,
            escape_char,
        },
        Expr::IsNull(expr) => Expr::IsNull(visit_boxed_expr(expr, visitor)?),
        Expr::IsNotNull(expr) => Expr::IsNotNull(visit_boxed_expr(expr, visitor)?),
        Expr::IsTrue(expr) => Expr::IsTrue(visit_boxed_expr(expr, visitor)?),
        Expr::IsNotTrue(expr) => Expr::IsNotTrue(visit_boxed_expr(expr, visitor)?),
        Expr::IsFalse(expr) => Expr::IsFalse(visit_boxed_expr(expr, visitor)?),
        Expr::IsNotFalse(expr) => Expr::IsNotFalse(visit_boxed_expr(expr, visitor)?),
        Expr::IsDistinctFrom(a, b) => Expr::IsDistinctFrom(
            visit_boxed_expr(a, visitor)?,
            visit_boxed_expr(b, visitor)?,
        ),
        Expr::IsNotDistinctFrom(a, b) => Expr::IsNotDistinctFrom(
            visit_boxed_expr(a, visitor)?,
            visit_boxed_expr(b, visitor)?,
        ),
        Expr::Collate { expr, collation } => Expr::Collate {
            expr: visit_boxed_expr(expr, visitor)?,
            collation: visit_object_name(collation, visitor)?,
        },
        Expr::AtTimeZone {
            timestamp,
            time_zone,
        } => Expr::AtTimeZone {
            timestamp: visit_boxed_expr(timestamp, visitor)?,
            time_zone,
        },
        Expr::Extract { field, expr } => Expr::Extract {
            field,
            expr: visit_boxed_expr(expr, visitor)?,
        },
        Expr::Substring {
            expr,
            substring_from,
            substring_for,
        } => Expr::Substring {
            expr: visit_boxed_expr(expr, visitor)?,
            substring_from: visit_opt_boxed_expr(substring_from, visitor)?,
            substring_for: visit_opt_boxed_expr(substring_for, visitor)?,
        },
        Expr::Trim {
            expr,
            trim_where,
            trim_what,
        } => Expr::Trim {
            expr: visit_boxed_expr(expr, visitor)?,
            trim_where,
            trim_what: visit_opt_boxed_expr(trim_what, visitor)?,
        },
        Expr::Position { expr, r#in } => Expr::Position {
            expr: visit_boxed_expr(expr, visitor)?,
            r#in: visit_boxed_expr(r#in, visitor)?,
        },
        Expr::Interval {
            value,
            leading_field,
        } => Expr::Interval {
            value: visit_boxed_expr(value, visitor)?,
            leading_field,
        },
        Expr::Array { elem, named } => Expr::Array {
            elem: visit_exprs(elem, visitor)?,
            named,
        },
        Expr::Tuple(exprs) => Expr::Tuple(visit_exprs(exprs, visitor)?),
        Expr::Subscript { expr, index } => Expr::Subscript {
            expr: visit_boxed_expr(expr, visitor)?,
            index: visit_boxed_expr(index, visitor)?,
        },
        Expr::Dictionary(fields) => Expr::Dictionary(
            fields
                .into_iter()
                .map(|field| {
                    Ok(DictionaryField {
                        key: field.key,
                        value: visit_boxed_expr(field.value, visitor)?,
                    })
                })
                .collect::<VResult<_>>()?,
        ),
        Expr::Lambda(lambda) => Expr::Lambda(LambdaFunction {
            params: lambda.params,
            body: visit_boxed_expr(lambda.body, visitor)?,
        }),
        Expr::Rollup(sets) => Expr::Rollup(visit_expr_sets(sets, visitor)?),
        Expr::Cube(sets) => Expr::Cube(visit_expr_sets(sets, visitor)?),
        Expr::GroupingSets(sets) => Expr::GroupingSets(visit_expr_sets(sets, visitor)?),
    })
}

// =============================================================================
// Descendants
// =============================================================================

/// A borrowed reference to one of the privileged node kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AstNode<'a> {
    Statement(&'a Statement),
    Query(&'a Query),
    TableFactor(&'a TableFactor),
    Expr(&'a Expr),
    ObjectName(&'a ObjectName),
}

impl fmt::Display for AstNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Statement(node) => write!(f, "{}", node),
            AstNode::Query(node) => write!(f, "{}", node),
            AstNode::TableFactor(node) => write!(f, "{}", node),
            AstNode::Expr(node) => write!(f, "{}", node),
            AstNode::ObjectName(node) => write!(f, "{}", node),
        }
    }
}

/// Lazy pre-order enumeration of a statement and every privileged node
/// reachable from it, in child declaration order.
pub fn descendants(statement: &Statement) -> Descendants<'_> {
    Descendants {
        stack: vec![AstNode::Statement(statement)],
    }
}

/// Iterator state for [`descendants`].
pub struct Descendants<'a> {
    stack: Vec<AstNode<'a>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = AstNode<'a>;

    fn next(&mut self) -> Option<AstNode<'a>> {
        let node = self.stack.pop()?;
        let mut children = Vec::new();
        collect_children(node, &mut children);
        self.stack.extend(children.into_iter().rev());
        Some(node)
    }
}

fn collect_children<'a>(node: AstNode<'a>, out: &mut Vec<AstNode<'a>>) {
    match node {
        AstNode::Statement(statement) => collect_statement(statement, out),
        AstNode::Query(query) => collect_query(query, out),
        AstNode::TableFactor(factor) => collect_table_factor(factor, out),
        AstNode::Expr(expr) => collect_expr(expr, out),
        AstNode::ObjectName(_) => {}
    }
}

fn collect_statement<'a>(statement: &'a Statement, out: &mut Vec<AstNode<'a>>) {
    match statement {
        Statement::Query(query) => out.push(AstNode::Query(query)),
        Statement::Insert(insert) => {
            out.push(AstNode::ObjectName(&insert.table_name));
            out.push(AstNode::Query(&insert.source));
            if let Some(on_conflict) = &insert.on_conflict {
                if let OnConflictAction::DoUpdate(assignments) = &on_conflict.action {
                    out.extend(assignments.iter().map(|a| AstNode::Expr(&a.value)));
                }
            }
            if let Some(returning) = &insert.returning {
                collect_select_items(returning, out);
            }
        }
        Statement::Update(update) => {
            collect_table_with_joins(&update.table, out);
            out.extend(update.assignments.iter().map(|a| AstNode::Expr(&a.value)));
            if let Some(from) = &update.from {
                collect_table_with_joins(from, out);
            }
            out.extend(update.selection.iter().map(AstNode::Expr));
            if let Some(returning) = &update.returning {
                collect_select_items(returning, out);
            }
        }
        Statement::Delete(delete) => {
            collect_table_with_joins(&delete.from, out);
            if let Some(using) = &delete.using {
                for table in using {
                    collect_table_with_joins(table, out);
                }
            }
            out.extend(delete.selection.iter().map(AstNode::Expr));
            if let Some(returning) = &delete.returning {
                collect_select_items(returning, out);
            }
        }
        Statement::CreateTable {
            name,
            columns,
            constraints,
            ..
        } => {
            out.push(AstNode::ObjectName(name));
            for column in columns {
                for def in &column.options {
                    match &def.option {
                        ColumnOption::Default(expr) | ColumnOption::Check(expr) => {
                            out.push(AstNode::Expr(expr))
                        }
                        ColumnOption::ForeignKey { foreign_table, .. } => {
                            out.push(AstNode::ObjectName(foreign_table))
                        }
                        _ => {}
                    }
                }
            }
            for constraint in constraints {
                match constraint {
                    TableConstraint::ForeignKey { foreign_table, .. } => {
                        out.push(AstNode::ObjectName(foreign_table))
                    }
                    TableConstraint::Check { expr, .. } => out.push(AstNode::Expr(expr)),
                    TableConstraint::Unique { .. } => {}
                }
            }
        }
        Statement::CreateView { name, query, .. } => {
            out.push(AstNode::ObjectName(name));
            out.push(AstNode::Query(query));
        }
        Statement::CreateIndex {
            name,
            table_name,
            columns,
            ..
        } => {
            out.push(AstNode::ObjectName(name));
            out.push(AstNode::ObjectName(table_name));
            out.extend(columns.iter().map(|c| AstNode::Expr(&c.expr)));
        }
        Statement::AlterTable { name, operation } => {
            out.push(AstNode::ObjectName(name));
            match operation {
                AlterTableOperation::AddColumn { column_def } => {
                    for def in &column_def.options {
                        match &def.option {
                            ColumnOption::Default(expr) | ColumnOption::Check(expr) => {
                                out.push(AstNode::Expr(expr))
                            }
                            ColumnOption::ForeignKey { foreign_table, .. } => {
                                out.push(AstNode::ObjectName(foreign_table))
                            }
                            _ => {}
                        }
                    }
                }
                AlterTableOperation::AddConstraint(constraint) => match constraint {
                    TableConstraint::ForeignKey { foreign_table, .. } => {
                        out.push(AstNode::ObjectName(foreign_table))
                    }
                    TableConstraint::Check { expr, .. } => out.push(AstNode::Expr(expr)),
                    TableConstraint::Unique { .. } => {}
                },
                AlterTableOperation::RenameTable { table_name } => {
                    out.push(AstNode::ObjectName(table_name))
                }
                _ => {}
            }
        }
        Statement::Drop { names, .. } => out.extend(names.iter().map(AstNode::ObjectName)),
        Statement::Truncate { table_name } => out.push(AstNode::ObjectName(table_name)),
        Statement::SetVariable {
            variables, values, ..
        } => {
            out.extend(variables.iter().map(AstNode::ObjectName));
            out.extend(values.iter().map(AstNode::Expr));
        }
        Statement::Grant { objects, .. } | Statement::Revoke { objects, .. } => match objects {
            GrantObjects::Tables(names) | GrantObjects::Schemas(names) => {
                out.extend(names.iter().map(AstNode::ObjectName))
            }
        },
        Statement::Explain { statement, .. } => out.push(AstNode::Statement(statement)),
        Statement::StartTransaction { .. }
        | Statement::Commit { .. }
        | Statement::Rollback { .. }
        | Statement::ShowVariable { .. }
        | Statement::Use { .. } => {}
    }
}

fn collect_query<'a>(query: &'a Query, out: &mut Vec<AstNode<'a>>) {
    if let Some(with) = &query.with {
        out.extend(with.cte_tables.iter().map(|cte| AstNode::Query(&cte.query)));
    }
    collect_set_expr(&query.body, out);
    out.extend(query.order_by.iter().map(|o| AstNode::Expr(&o.expr)));
    out.extend(query.limit.iter().map(AstNode::Expr));
    if let Some(offset) = &query.offset {
        out.push(AstNode::Expr(&offset.value));
    }
    if let Some(fetch) = &query.fetch {
        out.extend(fetch.quantity.iter().map(AstNode::Expr));
    }
}

fn collect_set_expr<'a>(body: &'a SetExpr, out: &mut Vec<AstNode<'a>>) {
    match body {
        SetExpr::Select(select) => collect_select(select, out),
        SetExpr::Query(query) => out.push(AstNode::Query(query)),
        SetExpr::SetOperation { left, right, .. } => {
            collect_set_expr(left, out);
            collect_set_expr(right, out);
        }
        SetExpr::Values(Values(rows)) => {
            for row in rows {
                out.extend(row.iter().map(AstNode::Expr));
            }
        }
    }
}

fn collect_select<'a>(select: &'a Select, out: &mut Vec<AstNode<'a>>) {
    if let Some(Distinct::On(exprs)) = &select.distinct {
        out.extend(exprs.iter().map(AstNode::Expr));
    }
    if let Some(top) = &select.top {
        out.extend(top.quantity.iter().map(AstNode::Expr));
    }
    collect_select_items(&select.projection, out);
    for table in &select.from {
        collect_table_with_joins(table, out);
    }
    out.extend(select.selection.iter().map(AstNode::Expr));
    out.extend(select.group_by.iter().map(AstNode::Expr));
    out.extend(select.having.iter().map(AstNode::Expr));
    for def in &select.named_windows {
        collect_window_spec(&def.window_spec, out);
    }
    if let Some(connect_by) = &select.connect_by {
        out.extend(connect_by.start_with.iter().map(AstNode::Expr));
        out.extend(connect_by.connect_by.iter().map(AstNode::Expr));
    }
}

fn collect_select_items<'a>(items: &'a [SelectItem], out: &mut Vec<AstNode<'a>>) {
    for item in items {
        match item {
            SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } => {
                out.push(AstNode::Expr(expr))
            }
            SelectItem::QualifiedWildcard(name, _) => out.push(AstNode::ObjectName(name)),
            SelectItem::Wildcard(_) => {}
        }
    }
}

fn collect_table_with_joins<'a>(table: &'a TableWithJoins, out: &mut Vec<AstNode<'a>>) {
    out.push(AstNode::TableFactor(&table.relation));
    for join in &table.joins {
        out.push(AstNode::TableFactor(&join.relation));
        match &join.join_operator {
            JoinOperator::Inner(JoinConstraint::On(expr))
            | JoinOperator::LeftOuter(JoinConstraint::On(expr))
            | JoinOperator::RightOuter(JoinConstraint::On(expr))
            | JoinOperator::FullOuter(JoinConstraint::On(expr)) => out.push(AstNode::Expr(expr)),
            _ => {}
        }
    }
}

fn collect_table_factor<'a>(factor: &'a TableFactor, out: &mut Vec<AstNode<'a>>) {
    match factor {
        TableFactor::Table { name, .. } => out.push(AstNode::ObjectName(name)),
        TableFactor::Derived { subquery, .. } => out.push(AstNode::Query(subquery)),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => collect_table_with_joins(table_with_joins, out),
    }
}

fn collect_window_spec<'a>(spec: &'a WindowSpec, out: &mut Vec<AstNode<'a>>) {
    out.extend(spec.partition_by.iter().map(AstNode::Expr));
    out.extend(spec.order_by.iter().map(|o| AstNode::Expr(&o.expr)));
    if let Some(frame) = &spec.window_frame {
        collect_frame_bound(&frame.start_bound, out);
        if let Some(end) = &frame.end_bound {
            collect_frame_bound(end, out);
        }
    }
}

fn collect_frame_bound<'a>(bound: &'a WindowFrameBound, out: &mut Vec<AstNode<'a>>) {
    match bound {
        WindowFrameBound::Preceding(Some(expr)) | WindowFrameBound::Following(Some(expr)) => {
            out.push(AstNode::Expr(expr))
        }
        _ => {}
    }
}

fn collect_expr<'a>(expr: &'a Expr, out: &mut Vec<AstNode<'a>>) {
    match expr {
        Expr::Identifier(_)
        | Expr::CompoundIdentifier(_)
        | Expr::Wildcard
        | Expr::Value(_)
        | Expr::TypedString { .. } => {}
        Expr::QualifiedWildcard(name) => out.push(AstNode::ObjectName(name)),
        Expr::BinaryOp { left, right, .. } => {
            out.push(AstNode::Expr(left));
            out.push(AstNode::Expr(right));
        }
        Expr::UnaryOp { expr, .. } => out.push(AstNode::Expr(expr)),
        Expr::JsonAccess { left, right, .. } => {
            out.push(AstNode::Expr(left));
            out.push(AstNode::Expr(right));
        }
        Expr::Function(function) => {
            out.push(AstNode::ObjectName(&function.name));
            for arg in &function.args {
                match arg {
                    FunctionArg::Named { arg, .. } => out.push(AstNode::Expr(arg)),
                    FunctionArg::Unnamed(arg) => out.push(AstNode::Expr(arg)),
                }
            }
            out.extend(function.filter.iter().map(|e| AstNode::Expr(e)));
            if let Some(WindowType::WindowSpec(spec)) = &function.over {
                collect_window_spec(spec, out);
            }
        }
        Expr::Case {
            operand,
            conditions,
            results,
            else_result,
        } => {
            out.extend(operand.iter().map(|e| AstNode::Expr(e)));
            out.extend(conditions.iter().map(AstNode::Expr));
            out.extend(results.iter().map(AstNode::Expr));
            out.extend(else_result.iter().map(|e| AstNode::Expr(e)));
        }
        Expr::Cast { expr, .. } | Expr::TryCast { expr, .. } => out.push(AstNode::Expr(expr)),
        Expr::Nested(expr) => out.push(AstNode::Expr(expr)),
        Expr::Subquery(query) => out.push(AstNode::Query(query)),
        Expr::Exists { subquery, .. } => out.push(AstNode::Query(subquery)),
        Expr::InList { expr, list, .. } => {
            out.push(AstNode::Expr(expr));
            out.extend(list.iter().map(AstNode::Expr));
        }
        Expr::InSubquery { expr, subquery, .. } => {
            out.push(AstNode::Expr(expr));
            out.push(AstNode::Query(subquery));
        }
        Expr::Between {
            expr, low, high, ..
        } => {
            out.push(AstNode::Expr(expr));
            out.push(AstNode::Expr(low));
            out.push(AstNode::Expr(high));
        }
        Expr::Like { expr, pattern, .. }
        | Expr::ILike { expr, pattern, .. }
        | Expr::SimilarTo { expr, pattern, .. } => {
            out.push(AstNode::Expr(expr));
            out.push(AstNode::Expr(pattern));
        }
        Expr::IsNull(expr)
        | Expr::IsNotNull(expr)
        | Expr::IsTrue(expr)
        | Expr::IsNotTrue(expr)
        | Expr::IsFalse(expr)
        | Expr::IsNotFalse(expr) => out.push(AstNode::Expr(expr)),
        Expr::IsDistinctFrom(a, b) | Expr::IsNotDistinctFrom(a, b) => {
            out.push(AstNode::Expr(a));
            out.push(AstNode::Expr(b));
        }
        Expr::Collate { expr, collation } => {
            out.push(AstNode::Expr(expr));
            out.push(AstNode::ObjectName(collation));
        }
        Expr::AtTimeZone { timestamp, .. } => out.push(AstNode::Expr(timestamp)),
        Expr::Extract { expr, .. } => out.push(AstNode::Expr(expr)),
        Expr::Substring {
            expr,
            substring_from,
            substring_for,
        } => {
            out.push(AstNode::Expr(expr));
            out.extend(substring_from.iter().map(|e| AstNode::Expr(e)));
            out.extend(substring_for.iter().map(|e| AstNode::Expr(e)));
        }
        Expr::Trim {
            expr, trim_what, ..
        } => {
            out.push(AstNode::Expr(expr));
            out.extend(trim_what.iter().map(|e| AstNode::Expr(e)));
        }
        Expr::Position { expr, r#in } => {
            out.push(AstNode::Expr(expr));
            out.push(AstNode::Expr(r#in));
        }
        Expr::Interval { value, .. } => out.push(AstNode::Expr(value)),
        Expr::Array { elem, .. } => out.extend(elem.iter().map(AstNode::Expr)),
        Expr::Tuple(exprs) => out.extend(exprs.iter().map(AstNode::Expr)),
        Expr::Subscript { expr, index } => {
            out.push(AstNode::Expr(expr));
            out.push(AstNode::Expr(index));
        }
        Expr::Dictionary(fields) => {
            out.extend(fields.iter().map(|field| AstNode::Expr(&field.value)))
        }
        Expr::Lambda(lambda) => out.push(AstNode::Expr(&lambda.body)),
        Expr::Rollup(sets) | Expr::Cube(sets) | Expr::GroupingSets(sets) => {
            for set in sets {
                out.extend(set.iter().map(AstNode::Expr));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{binary_op, col, lit_int, BinaryOperator, Ident};

    /// Visitor that renames every plain identifier.
    struct Rename {
        from: String,
        to: String,
    }

    impl Visitor for Rename {
        fn pre_visit_expr(&mut self, expr: Expr) -> Result<Expr, VisitError> {
            match expr {
                Expr::Identifier(ident) if ident.value == self.from => {
                    Ok(Expr::Identifier(Ident::new(self.to.clone())))
                }
                other => Ok(other),
            }
        }
    }

    struct NoOp;
    impl Visitor for NoOp {}

    struct FailOn42;
    impl Visitor for FailOn42 {
        fn pre_visit_expr(&mut self, expr: Expr) -> Result<Expr, VisitError> {
            if expr == lit_int(42) {
                Err(VisitError::new("refusing to visit 42"))
            } else {
                Ok(expr)
            }
        }
    }

    #[test]
    fn test_noop_visitor_returns_equal_tree() {
        let expr = binary_op(col("a"), BinaryOperator::Plus, lit_int(1));
        let visited = visit_expr(expr.clone(), &mut NoOp).unwrap();
        assert_eq!(visited, expr);
    }

    #[test]
    fn test_rename_visitor_rewrites_leaves() {
        let expr = binary_op(col("a"), BinaryOperator::Plus, col("b"));
        let mut visitor = Rename {
            from: "a".into(),
            to: "x".into(),
        };
        let visited = visit_expr(expr, &mut visitor).unwrap();
        assert_eq!(
            visited,
            binary_op(col("x"), BinaryOperator::Plus, col("b"))
        );
    }

    #[test]
    fn test_visit_error_propagates() {
        let expr = binary_op(col("a"), BinaryOperator::Plus, lit_int(42));
        let err = visit_expr(expr, &mut FailOn42).unwrap_err();
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_descendants_preorder_on_expr() {
        // a + b * c: pre-order is +, a, *, b, c
        let expr = binary_op(
            col("a"),
            BinaryOperator::Plus,
            binary_op(col("b"), BinaryOperator::Multiply, col("c")),
        );
        let statement = Statement::Query(Box::new(Query {
            with: None,
            body: Box::new(SetExpr::Select(Box::new(Select {
                distinct: None,
                top: None,
                projection: vec![SelectItem::UnnamedExpr(expr)],
                from: vec![],
                selection: None,
                group_by: vec![],
                having: None,
                named_windows: vec![],
                connect_by: None,
            }))),
            order_by: vec![],
            limit: None,
            offset: None,
            fetch: None,
            locks: vec![],
        }));

        let rendered: Vec<String> = descendants(&statement)
            .filter_map(|node| match node {
                AstNode::Expr(e) => Some(e.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(rendered, vec!["a + b * c", "a", "b * c", "b", "c"]);
    }
}
