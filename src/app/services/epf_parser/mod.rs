//! EPF export parser
//!
//! EPF files are self-describing exports where fields are separated by
//! `^A` (0x01) and records end with `^B` (0x02), usually followed by a
//! newline. A `#`-prefixed header declares the columns, primary key, column
//! types and export mode, and a `#recordsWritten:<n>` footer records the
//! row count.
//!
//! ## Architecture
//!
//! - [`source`] - Buffered byte source with one byte of pushback and tail reads
//! - [`header`] - Header block state machine
//! - [`record_parser`] - Streaming data record tokenizer
//! - [`field_parsers`] - Declared-type coercion of field text
//! - [`footer`] - Footer record count extraction
//! - [`parser`] - Parser session tying the pieces together
//! - [`conversion`] - Polars DataFrame conversion
//! - [`stats`] - Read statistics and result structures
//!
//! ## Usage
//!
//! ```no_run
//! use epf_reader::app::services::epf_parser::{EpfParser, ReadOutcome};
//!
//! # fn example() -> epf_reader::Result<()> {
//! let mut parser = EpfParser::open("artist")?;
//! println!("{} records declared", parser.metadata()?.total_items);
//!
//! while let ReadOutcome::Row(row) = parser.read()? {
//!     println!("{:?}", row.get("name"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod conversion;
pub mod field_parsers;
pub mod footer;
pub mod header;
pub mod parser;
pub mod record_parser;
pub mod source;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use field_parsers::{ColumnType, coerce};
pub use parser::{EpfParser, Rows, load_file, parse_file};
pub use record_parser::{EndReason, ReadOutcome};
pub use stats::{ParseResult, ReadStats};
