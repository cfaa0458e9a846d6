//! Data manipulation AST nodes: INSERT, UPDATE, DELETE.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Expr, Ident, ObjectName, Query, SelectItem, TableWithJoins};
use crate::writer::{display_comma_separated, display_separated};

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    pub table_name: ObjectName,
    pub columns: Vec<Ident>,
    /// The rows: a VALUES body or a full query
    pub source: Box<Query>,
    pub on_conflict: Option<OnConflict>,
    pub returning: Option<Vec<SelectItem>>,
}

impl fmt::Display for Insert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {}", self.table_name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", display_comma_separated(&self.columns))?;
        }
        write!(f, " {}", self.source)?;
        if let Some(on_conflict) = &self.on_conflict {
            write!(f, " {}", on_conflict)?;
        }
        if let Some(returning) = &self.returning {
            write!(f, " RETURNING {}", display_comma_separated(returning))?;
        }
        Ok(())
    }
}

/// `ON CONFLICT [(target)] DO ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnConflict {
    pub conflict_target: Vec<Ident>,
    pub action: OnConflictAction,
}

impl fmt::Display for OnConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ON CONFLICT")?;
        if !self.conflict_target.is_empty() {
            write!(f, " ({})", display_comma_separated(&self.conflict_target))?;
        }
        write!(f, " {}", self.action)
    }
}

/// What to do when an INSERT conflicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OnConflictAction {
    DoNothing,
    DoUpdate(Vec<Assignment>),
}

impl fmt::Display for OnConflictAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnConflictAction::DoNothing => f.write_str("DO NOTHING"),
            OnConflictAction::DoUpdate(assignments) => {
                write!(f, "DO UPDATE SET {}", display_comma_separated(assignments))
            }
        }
    }
}

/// `column = value` in SET clauses. The target may be compound
/// (`t.c = ...`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub target: Vec<Ident>,
    pub value: Expr,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", display_separated(&self.target, "."), self.value)
    }
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub table: TableWithJoins,
    pub assignments: Vec<Assignment>,
    pub from: Option<TableWithJoins>,
    pub selection: Option<Expr>,
    pub returning: Option<Vec<SelectItem>>,
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UPDATE {} SET {}",
            self.table,
            display_comma_separated(&self.assignments)
        )?;
        if let Some(from) = &self.from {
            write!(f, " FROM {}", from)?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {}", selection)?;
        }
        if let Some(returning) = &self.returning {
            write!(f, " RETURNING {}", display_comma_separated(returning))?;
        }
        Ok(())
    }
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    pub from: TableWithJoins,
    pub using: Option<Vec<TableWithJoins>>,
    pub selection: Option<Expr>,
    pub returning: Option<Vec<SelectItem>>,
}

impl fmt::Display for Delete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.from)?;
        if let Some(using) = &self.using {
            write!(f, " USING {}", display_comma_separated(using))?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {}", selection)?;
        }
        if let Some(returning) = &self.returning {
            write!(f, " RETURNING {}", display_comma_separated(returning))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{TableFactor, Value};

    #[test]
    fn test_assignment_display() {
        let assignment = Assignment {
            target: vec![Ident::new("t"), Ident::new("c")],
            value: Expr::Value(Value::Number("1".into())),
        };
        assert_eq!(assignment.to_string(), "t.c = 1");
    }

    #[test]
    fn test_on_conflict_display() {
        let on_conflict = OnConflict {
            conflict_target: vec![Ident::new("id")],
            action: OnConflictAction::DoNothing,
        };
        assert_eq!(on_conflict.to_string(), "ON CONFLICT (id) DO NOTHING");
    }

    #[test]
    fn test_delete_display() {
        let delete = Delete {
            from: TableWithJoins {
                relation: TableFactor::Table {
                    name: ObjectName(vec![Ident::new("logs")]),
                    alias: None,
                },
                joins: vec![],
            },
            using: None,
            selection: Some(Expr::Identifier(Ident::new("stale"))),
            returning: None,
        };
        assert_eq!(delete.to_string(), "DELETE FROM logs WHERE stale");
    }
}
