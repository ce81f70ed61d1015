//! Format constants for EPF exports
//!
//! The control characters are fixed by the export format and are not
//! configurable. Only the I/O tuning defaults can be overridden through
//! [`ReaderConfig`](crate::config::ReaderConfig).

// =============================================================================
// Control Characters
// =============================================================================

/// Starts every header line and the footer line
pub const COMMENT_MARKER: u8 = b'#';

/// Separates values within one line or record (`^A`)
pub const FIELD_SEPARATOR: u8 = 0x01;

/// Ends a line or record (`^B`), usually followed by a newline
pub const RECORD_TERMINATOR: u8 = 0x02;

/// Optional newline after a record terminator
pub const NEWLINE: u8 = b'\n';

/// Splits a labelled header line (`#dbTypes:...`) into label and values
pub const LABEL_SEPARATOR: u8 = b':';

// =============================================================================
// Header Values
// =============================================================================

/// Export mode value that marks a complete snapshot
pub const EXPORT_MODE_FULL: &str = "FULL";

/// Boolean columns store true as this exact text
pub const BOOLEAN_TRUE: &str = "1";

/// Declared type names with dedicated coercion
pub mod type_names {
    pub const BIGINT: &str = "BIGINT";
    pub const INTEGER: &str = "INTEGER";
    pub const BOOLEAN: &str = "BOOLEAN";
}

// =============================================================================
// I/O Defaults
// =============================================================================

/// Bytes read from the end of the source to find `#recordsWritten:<n>`
pub const DEFAULT_FOOTER_WINDOW: usize = 28;

/// Read buffer used for the forward stream
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;
