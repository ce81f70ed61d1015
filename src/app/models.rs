//! Data structures produced by the EPF reader
//!
//! [`Metadata`] describes a file once its header and footer are parsed.
//! Each data record is decoded into a [`Row`] of typed [`Value`]s.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::app::services::epf_parser::field_parsers::ColumnType;
use crate::constants::EXPORT_MODE_FULL;

/// Whether a file is a complete snapshot or a delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    Full,
    #[default]
    Incremental,
}

impl ExportMode {
    /// Interpret the value of the `#exportMode:` header line.
    ///
    /// Only the exact text `FULL` marks a full export; anything else,
    /// including an empty or unknown value, is treated as incremental.
    pub fn from_header_value(value: &str) -> Self {
        if value == EXPORT_MODE_FULL {
            ExportMode::Full
        } else {
            ExportMode::Incremental
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportMode::Full => "full",
            ExportMode::Incremental => "incremental",
        }
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema, export mode and declared row count of an EPF file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Column names in file order
    pub fields: Vec<String>,

    /// Columns forming the declared primary key (may be empty)
    pub primary_key: Vec<String>,

    /// Declared type of each column, aligned with `fields`
    pub types: Vec<String>,

    pub export_mode: ExportMode,

    /// Row count recorded in the footer
    pub total_items: usize,
}

impl Metadata {
    /// Number of declared columns
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// True when every field has a type declaration and vice versa
    pub fn is_consistent(&self) -> bool {
        self.fields.len() == self.types.len()
    }

    /// Parsed column type at `index`; columns without a declaration are text
    pub fn column_type(&self, index: usize) -> ColumnType {
        self.types
            .get(index)
            .map(|declared| ColumnType::from_declaration(declared))
            .unwrap_or(ColumnType::Text)
    }

    /// Position of a column by name
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field == name)
    }

    /// Check whether a column is part of the primary key
    pub fn is_primary_key(&self, name: &str) -> bool {
        self.primary_key.iter().any(|key| key == name)
    }
}

/// A single decoded field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Int(i64),
    Bool(bool),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(value) => write!(f, "{}", value),
            Value::Bool(value) => write!(f, "{}", value),
            Value::Text(value) => f.write_str(value),
        }
    }
}

/// One decoded data record, keyed by field name
pub type Row = HashMap<String, Value>;
