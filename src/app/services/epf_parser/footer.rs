//! Footer extraction
//!
//! Every export ends with `#recordsWritten:<n>^B` (plus an optional
//! newline). Only the number varies in length, so a short fixed window
//! from the end of the file always contains the whole footer line and no
//! reverse line scan is needed.

use std::io::{Read, Seek};
use tracing::debug;

use super::source::ByteSource;
use crate::constants::{NEWLINE, RECORD_TERMINATOR};
use crate::{Error, Result};

/// Extract the declared record count from the trailing bytes of a file
pub fn parse_footer(tail: &[u8]) -> Result<usize> {
    let text = String::from_utf8_lossy(tail);

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 2 {
        return Err(Error::footer_unreadable(format!(
            "expected exactly one ':' in trailing bytes {:?}, found {}",
            text,
            parts.len() - 1
        )));
    }

    let count = parts[1]
        .trim_matches(|c: char| c == char::from(RECORD_TERMINATOR) || c == char::from(NEWLINE));

    count
        .parse::<usize>()
        .map_err(|e| Error::numeric_format(count, "recordsWritten", e))
}

/// Read the footer of `source` without moving its forward cursor
pub fn read_footer<R: Read + Seek>(source: &mut ByteSource<R>, window: usize) -> Result<usize> {
    let tail = source.read_tail(window)?;
    let total = parse_footer(&tail)?;
    debug!("Footer declares {} records", total);
    Ok(total)
}
