//! SQL data types.
//!
//! The parser maps dialect spellings onto this set; rendering reproduces the
//! canonical spelling, including which of the three array bracket styles the
//! source used.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ObjectName;

/// A SQL data type, as written in casts and column definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// BOOLEAN
    Boolean,
    /// TINYINT with optional display width
    TinyInt(Option<u64>),
    /// TINYINT UNSIGNED
    UnsignedTinyInt(Option<u64>),
    /// SMALLINT
    SmallInt(Option<u64>),
    /// SMALLINT UNSIGNED
    UnsignedSmallInt(Option<u64>),
    /// INT / INTEGER
    Int(Option<u64>),
    /// INT UNSIGNED
    UnsignedInt(Option<u64>),
    /// BIGINT
    BigInt(Option<u64>),
    /// BIGINT UNSIGNED
    UnsignedBigInt(Option<u64>),
    /// REAL
    Real,
    /// FLOAT with optional precision
    Float(Option<u64>),
    /// DOUBLE PRECISION
    Double,
    /// DECIMAL(p, s)
    Decimal(Option<u64>, Option<u64>),
    /// NUMERIC(p, s)
    Numeric(Option<u64>, Option<u64>),
    /// CHAR / CHARACTER with optional length
    Char(Option<u64>),
    /// VARCHAR / CHARACTER VARYING with optional length
    Varchar(Option<u64>),
    /// TEXT
    Text,
    /// STRING
    String,
    /// BINARY with optional length
    Binary(Option<u64>),
    /// VARBINARY with optional length
    Varbinary(Option<u64>),
    /// BLOB with optional length
    Blob(Option<u64>),
    /// BYTEA
    Bytea,
    /// DATE
    Date,
    /// TIME [WITH | WITHOUT TIME ZONE]
    Time { with_time_zone: bool },
    /// TIMESTAMP [WITH | WITHOUT TIME ZONE]
    Timestamp { with_time_zone: bool },
    /// INTERVAL
    Interval,
    /// JSON
    Json,
    /// UUID
    Uuid,
    /// Array type; the bracket style the source used is preserved
    Array(ArrayElemTypeDef),
    /// A type this grammar does not know, kept by name
    Custom(ObjectName),
}

/// The surface syntax an array type was written in. The three shapes
/// round-trip differently, so the distinction is kept in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrayElemTypeDef {
    /// `ARRAY<INT>`
    AngleBracket(Box<DataType>),
    /// `INT[]` or `INT[3]`
    SquareBracket(Box<DataType>, Option<u64>),
    /// `ARRAY(INT)`
    Parenthesis(Box<DataType>),
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => f.write_str("BOOLEAN"),
            DataType::TinyInt(n) => format_type_with_optional_length(f, "TINYINT", n, false),
            DataType::UnsignedTinyInt(n) => format_type_with_optional_length(f, "TINYINT", n, true),
            DataType::SmallInt(n) => format_type_with_optional_length(f, "SMALLINT", n, false),
            DataType::UnsignedSmallInt(n) => {
                format_type_with_optional_length(f, "SMALLINT", n, true)
            }
            DataType::Int(n) => format_type_with_optional_length(f, "INT", n, false),
            DataType::UnsignedInt(n) => format_type_with_optional_length(f, "INT", n, true),
            DataType::BigInt(n) => format_type_with_optional_length(f, "BIGINT", n, false),
            DataType::UnsignedBigInt(n) => format_type_with_optional_length(f, "BIGINT", n, true),
            DataType::Real => f.write_str("REAL"),
            DataType::Float(n) => format_type_with_optional_length(f, "FLOAT", n, false),
            DataType::Double => f.write_str("DOUBLE PRECISION"),
            DataType::Decimal(precision, scale) => {
                format_decimal_type(f, "DECIMAL", precision, scale)
            }
            DataType::Numeric(precision, scale) => {
                format_decimal_type(f, "NUMERIC", precision, scale)
            }
            DataType::Char(n) => format_type_with_optional_length(f, "CHAR", n, false),
            DataType::Varchar(n) => format_type_with_optional_length(f, "VARCHAR", n, false),
            DataType::Text => f.write_str("TEXT"),
            DataType::String => f.write_str("STRING"),
            DataType::Binary(n) => format_type_with_optional_length(f, "BINARY", n, false),
            DataType::Varbinary(n) => format_type_with_optional_length(f, "VARBINARY", n, false),
            DataType::Blob(n) => format_type_with_optional_length(f, "BLOB", n, false),
            DataType::Bytea => f.write_str("BYTEA"),
            DataType::Date => f.write_str("DATE"),
            DataType::Time { with_time_zone } => {
                if *with_time_zone {
                    f.write_str("TIME WITH TIME ZONE")
                } else {
                    f.write_str("TIME")
                }
            }
            DataType::Timestamp { with_time_zone } => {
                if *with_time_zone {
                    f.write_str("TIMESTAMP WITH TIME ZONE")
                } else {
                    f.write_str("TIMESTAMP")
                }
            }
            DataType::Interval => f.write_str("INTERVAL"),
            DataType::Json => f.write_str("JSON"),
            DataType::Uuid => f.write_str("UUID"),
            DataType::Array(def) => match def {
                ArrayElemTypeDef::AngleBracket(inner) => write!(f, "ARRAY<{}>", inner),
                ArrayElemTypeDef::SquareBracket(inner, None) => write!(f, "{}[]", inner),
                ArrayElemTypeDef::SquareBracket(inner, Some(size)) => {
                    write!(f, "{}[{}]", inner, size)
                }
                ArrayElemTypeDef::Parenthesis(inner) => write!(f, "ARRAY({})", inner),
            },
            DataType::Custom(name) => write!(f, "{}", name),
        }
    }
}

fn format_type_with_optional_length(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    length: &Option<u64>,
    unsigned: bool,
) -> fmt::Result {
    f.write_str(name)?;
    if let Some(len) = length {
        write!(f, "({})", len)?;
    }
    if unsigned {
        f.write_str(" UNSIGNED")?;
    }
    Ok(())
}

fn format_decimal_type(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    precision: &Option<u64>,
    scale: &Option<u64>,
) -> fmt::Result {
    f.write_str(name)?;
    match (precision, scale) {
        (Some(p), Some(s)) => write!(f, "({},{})", p, s),
        (Some(p), None) => write!(f, "({})", p),
        (None, _) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Ident;

    #[test]
    fn test_display_simple_types() {
        assert_eq!(DataType::Boolean.to_string(), "BOOLEAN");
        assert_eq!(DataType::Int(None).to_string(), "INT");
        assert_eq!(DataType::Int(Some(11)).to_string(), "INT(11)");
        assert_eq!(DataType::UnsignedBigInt(None).to_string(), "BIGINT UNSIGNED");
        assert_eq!(DataType::Varchar(Some(255)).to_string(), "VARCHAR(255)");
        assert_eq!(DataType::Decimal(Some(10), Some(2)).to_string(), "DECIMAL(10,2)");
        assert_eq!(DataType::Decimal(Some(10), None).to_string(), "DECIMAL(10)");
        assert_eq!(DataType::Decimal(None, None).to_string(), "DECIMAL");
    }

    #[test]
    fn test_display_datetime_types() {
        assert_eq!(DataType::Time { with_time_zone: false }.to_string(), "TIME");
        assert_eq!(
            DataType::Timestamp { with_time_zone: true }.to_string(),
            "TIMESTAMP WITH TIME ZONE"
        );
    }

    #[test]
    fn test_array_bracket_styles_render_distinctly() {
        let int = Box::new(DataType::Int(None));
        assert_eq!(
            DataType::Array(ArrayElemTypeDef::AngleBracket(int.clone())).to_string(),
            "ARRAY<INT>"
        );
        assert_eq!(
            DataType::Array(ArrayElemTypeDef::SquareBracket(int.clone(), None)).to_string(),
            "INT[]"
        );
        assert_eq!(
            DataType::Array(ArrayElemTypeDef::SquareBracket(int.clone(), Some(3))).to_string(),
            "INT[3]"
        );
        assert_eq!(
            DataType::Array(ArrayElemTypeDef::Parenthesis(int)).to_string(),
            "ARRAY(INT)"
        );
    }

    #[test]
    fn test_custom_type_renders_name() {
        let name = ObjectName(vec![Ident::new("geo"), Ident::new("point")]);
        assert_eq!(DataType::Custom(name).to_string(), "geo.point");
    }
}
