//! Data definition AST nodes: column definitions, table constraints and
//! ALTER TABLE operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DataType, Expr, Ident, ObjectName};
use crate::writer::display_comma_separated;

/// A column definition inside CREATE TABLE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: Ident,
    pub data_type: DataType,
    pub options: Vec<ColumnOptionDef>,
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        for option in &self.options {
            write!(f, " {}", option)?;
        }
        Ok(())
    }
}

/// A column option, optionally named via `CONSTRAINT <name>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOptionDef {
    pub name: Option<Ident>,
    pub option: ColumnOption,
}

impl fmt::Display for ColumnOptionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {} ", name)?;
        }
        write!(f, "{}", self.option)
    }
}

/// Options that follow a column's data type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnOption {
    /// `NULL`
    Null,
    /// `NOT NULL`
    NotNull,
    /// `DEFAULT <expr>`
    Default(Expr),
    /// `UNIQUE` or `PRIMARY KEY`
    Unique { is_primary: bool },
    /// `REFERENCES <table> (<columns>)` with optional referential actions
    ForeignKey {
        foreign_table: ObjectName,
        referred_columns: Vec<Ident>,
        on_delete: Option<ReferentialAction>,
        on_update: Option<ReferentialAction>,
    },
    /// `CHECK (<expr>)`
    Check(Expr),
}

impl fmt::Display for ColumnOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnOption::Null => f.write_str("NULL"),
            ColumnOption::NotNull => f.write_str("NOT NULL"),
            ColumnOption::Default(expr) => write!(f, "DEFAULT {}", expr),
            ColumnOption::Unique { is_primary } => {
                f.write_str(if *is_primary { "PRIMARY KEY" } else { "UNIQUE" })
            }
            ColumnOption::ForeignKey {
                foreign_table,
                referred_columns,
                on_delete,
                on_update,
            } => {
                write!(f, "REFERENCES {}", foreign_table)?;
                if !referred_columns.is_empty() {
                    write!(f, " ({})", display_comma_separated(referred_columns))?;
                }
                if let Some(action) = on_delete {
                    write!(f, " ON DELETE {}", action)?;
                }
                if let Some(action) = on_update {
                    write!(f, " ON UPDATE {}", action)?;
                }
                Ok(())
            }
            ColumnOption::Check(expr) => write!(f, "CHECK ({})", expr),
        }
    }
}

/// `ON DELETE` / `ON UPDATE` behavior of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferentialAction {
    Restrict,
    Cascade,
    SetNull,
    NoAction,
    SetDefault,
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::SetDefault => "SET DEFAULT",
        })
    }
}

/// A table-level constraint in CREATE TABLE or ALTER TABLE ADD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableConstraint {
    /// `[CONSTRAINT <name>] {PRIMARY KEY | UNIQUE} (<columns>)`
    Unique {
        name: Option<Ident>,
        columns: Vec<Ident>,
        is_primary: bool,
    },
    /// `[CONSTRAINT <name>] FOREIGN KEY (<columns>) REFERENCES <table> (<columns>)`
    ForeignKey {
        name: Option<Ident>,
        columns: Vec<Ident>,
        foreign_table: ObjectName,
        referred_columns: Vec<Ident>,
        on_delete: Option<ReferentialAction>,
        on_update: Option<ReferentialAction>,
    },
    /// `[CONSTRAINT <name>] CHECK (<expr>)`
    Check {
        name: Option<Ident>,
        expr: Box<Expr>,
    },
}

fn display_constraint_name(f: &mut fmt::Formatter<'_>, name: &Option<Ident>) -> fmt::Result {
    if let Some(name) = name {
        write!(f, "CONSTRAINT {} ", name)?;
    }
    Ok(())
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableConstraint::Unique {
                name,
                columns,
                is_primary,
            } => {
                display_constraint_name(f, name)?;
                write!(
                    f,
                    "{} ({})",
                    if *is_primary { "PRIMARY KEY" } else { "UNIQUE" },
                    display_comma_separated(columns)
                )
            }
            TableConstraint::ForeignKey {
                name,
                columns,
                foreign_table,
                referred_columns,
                on_delete,
                on_update,
            } => {
                display_constraint_name(f, name)?;
                write!(
                    f,
                    "FOREIGN KEY ({}) REFERENCES {} ({})",
                    display_comma_separated(columns),
                    foreign_table,
                    display_comma_separated(referred_columns)
                )?;
                if let Some(action) = on_delete {
                    write!(f, " ON DELETE {}", action)?;
                }
                if let Some(action) = on_update {
                    write!(f, " ON UPDATE {}", action)?;
                }
                Ok(())
            }
            TableConstraint::Check { name, expr } => {
                display_constraint_name(f, name)?;
                write!(f, "CHECK ({})", expr)
            }
        }
    }
}

/// One operation in an ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AlterTableOperation {
    /// `ADD [COLUMN] <def>`
    AddColumn { column_def: ColumnDef },
    /// `DROP [COLUMN] [IF EXISTS] <name> [CASCADE]`
    DropColumn {
        column_name: Ident,
        if_exists: bool,
        cascade: bool,
    },
    /// `RENAME COLUMN <old> TO <new>`
    RenameColumn {
        old_column_name: Ident,
        new_column_name: Ident,
    },
    /// `RENAME TO <name>`
    RenameTable { table_name: ObjectName },
    /// `ADD <constraint>`
    AddConstraint(TableConstraint),
    /// `DROP CONSTRAINT [IF EXISTS] <name> [CASCADE]`
    DropConstraint {
        name: Ident,
        if_exists: bool,
        cascade: bool,
    },
}

impl fmt::Display for AlterTableOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlterTableOperation::AddColumn { column_def } => {
                write!(f, "ADD COLUMN {}", column_def)
            }
            AlterTableOperation::DropColumn {
                column_name,
                if_exists,
                cascade,
            } => {
                write!(
                    f,
                    "DROP COLUMN {}{}{}",
                    if *if_exists { "IF EXISTS " } else { "" },
                    column_name,
                    if *cascade { " CASCADE" } else { "" }
                )
            }
            AlterTableOperation::RenameColumn {
                old_column_name,
                new_column_name,
            } => write!(f, "RENAME COLUMN {} TO {}", old_column_name, new_column_name),
            AlterTableOperation::RenameTable { table_name } => {
                write!(f, "RENAME TO {}", table_name)
            }
            AlterTableOperation::AddConstraint(constraint) => write!(f, "ADD {}", constraint),
            AlterTableOperation::DropConstraint {
                name,
                if_exists,
                cascade,
            } => {
                write!(
                    f,
                    "DROP CONSTRAINT {}{}{}",
                    if *if_exists { "IF EXISTS " } else { "" },
                    name,
                    if *cascade { " CASCADE" } else { "" }
                )
            }
        }
    }
}

/// Kind of object a DROP statement removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectType {
    Table,
    View,
    Index,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectType::Table => "TABLE",
            ObjectType::View => "VIEW",
            ObjectType::Index => "INDEX",
        })
    }
}
