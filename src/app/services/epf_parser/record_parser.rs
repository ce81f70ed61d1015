//! Streaming tokenizer for EPF data records
//!
//! A record is a run of values separated by `^A` and ended by `^B`
//! (optionally followed by a newline):
//!
//! ```text
//! 1490173201020^A318519^AWilliam Boyce^A1^B
//! ```
//!
//! A `#` at the start of a record marks the footer and ends the data.

use serde::{Deserialize, Serialize};
use std::io::{Read, Seek};

use super::source::ByteSource;
use crate::app::models::{Metadata, Row};
use crate::constants::{COMMENT_MARKER, FIELD_SEPARATOR, RECORD_TERMINATOR};
use crate::{Error, Result};

/// Why the data section ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// A comment line (the footer) was found at a record boundary
    Footer,
    /// The source ran out of bytes
    StreamExhausted,
}

/// Result of a single read
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Row(Row),
    /// No more rows. `partial` holds the fields completed before the stream
    /// ended mid-record, so callers can decide how to treat a truncated
    /// trailing record.
    EndOfData {
        reason: EndReason,
        partial: Option<Row>,
    },
}

impl ReadOutcome {
    pub fn is_end_of_data(&self) -> bool {
        matches!(self, ReadOutcome::EndOfData { .. })
    }

    /// The completed row, if this outcome carries one
    pub fn into_row(self) -> Option<Row> {
        match self {
            ReadOutcome::Row(row) => Some(row),
            ReadOutcome::EndOfData { .. } => None,
        }
    }
}

/// Read the next record from `source`.
///
/// `record` is the 1-based record number, used only for error context.
pub fn read_record<R: Read + Seek>(
    source: &mut ByteSource<R>,
    metadata: &Metadata,
    record: usize,
) -> Result<ReadOutcome> {
    let mut row = Row::with_capacity(metadata.fields.len());
    let mut text: Vec<u8> = Vec::new();
    let mut index = 0;
    let mut at_record_start = true;

    loop {
        let Some(byte) = source.next_byte()? else {
            return Ok(ReadOutcome::EndOfData {
                reason: EndReason::StreamExhausted,
                partial: (!at_record_start).then_some(row),
            });
        };

        if at_record_start && byte == COMMENT_MARKER {
            // Leave the marker in place so repeated reads stay at the footer
            source.unread(byte);
            return Ok(ReadOutcome::EndOfData {
                reason: EndReason::Footer,
                partial: None,
            });
        }
        at_record_start = false;

        match byte {
            FIELD_SEPARATOR | RECORD_TERMINATOR => {
                close_field(&mut row, &mut text, metadata, index, record)?;

                if byte == RECORD_TERMINATOR {
                    source.finish_line()?;
                    return Ok(ReadOutcome::Row(row));
                }
                index += 1;
            }
            _ => text.push(byte),
        }
    }
}

/// Coerce the accumulated text and store it under `fields[index]`
fn close_field(
    row: &mut Row,
    text: &mut Vec<u8>,
    metadata: &Metadata,
    index: usize,
    record: usize,
) -> Result<()> {
    let Some(field) = metadata.fields.get(index) else {
        return Err(Error::OutOfRange {
            record,
            index,
            declared: metadata.fields.len(),
        });
    };

    let value = metadata
        .column_type(index)
        .coerce(&String::from_utf8_lossy(text))?;
    text.clear();

    row.insert(field.clone(), value);
    Ok(())
}
