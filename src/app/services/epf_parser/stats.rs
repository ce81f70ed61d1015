//! Read statistics and result structures for EPF processing

use serde::{Deserialize, Serialize};

use super::record_parser::EndReason;
use crate::app::models::{Metadata, Row};

/// Whole-file parse result with rows and statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub metadata: Metadata,

    /// Rows in file order
    pub rows: Vec<Row>,

    pub stats: ReadStats,
}

/// Counters maintained by a parser session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadStats {
    /// Number of complete rows returned
    pub rows_read: usize,

    /// How the data section ended, once it has
    pub end_reason: Option<EndReason>,

    /// Fields completed in a trailing record cut off by end of stream
    pub truncated_fields: Option<usize>,
}

impl ReadStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the row count against the footer's declared total
    pub fn matches_footer(&self, total_items: usize) -> bool {
        self.rows_read == total_items
    }

    /// True when reading stopped at the footer with no truncated record
    pub fn is_complete(&self) -> bool {
        self.end_reason == Some(EndReason::Footer) && self.truncated_fields.is_none()
    }
}
