//! Type coercion for EPF field values
//!
//! Each column carries a declared type such as `BIGINT` or `VARCHAR(1000)`.
//! Only the name before `(` decides how the raw text is converted.

use crate::app::models::Value;
use crate::constants::{BOOLEAN_TRUE, type_names};
use crate::{Error, Result};

/// How a declared column type is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    BigInt,
    Integer,
    Boolean,
    /// Every other declared type is passed through as text
    Text,
}

impl ColumnType {
    /// Parse a declaration like `VARCHAR(1000)`; the length suffix is ignored
    pub fn from_declaration(declared: &str) -> Self {
        match type_name(declared) {
            type_names::BIGINT => ColumnType::BigInt,
            type_names::INTEGER => ColumnType::Integer,
            type_names::BOOLEAN => ColumnType::Boolean,
            _ => ColumnType::Text,
        }
    }

    /// Convert raw field text into a typed value.
    ///
    /// Empty text is always null, whatever the column type.
    pub fn coerce(self, raw: &str) -> Result<Value> {
        if raw.is_empty() {
            return Ok(Value::Null);
        }

        match self {
            ColumnType::BigInt => raw
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| Error::numeric_format(raw, type_names::BIGINT, e)),
            ColumnType::Integer => raw
                .parse::<isize>()
                .map(|value| Value::Int(value as i64))
                .map_err(|e| Error::numeric_format(raw, type_names::INTEGER, e)),
            ColumnType::Boolean => Ok(Value::Bool(raw == BOOLEAN_TRUE)),
            ColumnType::Text => Ok(Value::Text(raw.to_string())),
        }
    }
}

/// Coerce `raw` according to the declared type string
pub fn coerce(raw: &str, declared: &str) -> Result<Value> {
    ColumnType::from_declaration(declared).coerce(raw)
}

/// Type name without its parenthesised length or precision
pub fn type_name(declared: &str) -> &str {
    declared
        .split_once('(')
        .map_or(declared, |(name, _)| name)
}
