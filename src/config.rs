//! Reader configuration and validation.
//!
//! Only I/O tuning lives here. The control characters of the format are
//! fixed in [`crate::constants`].

use crate::constants::{DEFAULT_BUFFER_CAPACITY, DEFAULT_FOOTER_WINDOW};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for an [`EpfParser`](crate::EpfParser) session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Capacity of the forward read buffer in bytes
    pub buffer_capacity: usize,

    /// Number of trailing bytes inspected for the footer
    pub footer_window: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            footer_window: DEFAULT_FOOTER_WINDOW,
        }
    }
}

impl ReaderConfig {
    /// Create configuration with a custom read buffer size
    pub fn with_buffer_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }

    /// Create configuration with a custom footer window
    pub fn with_footer_window(mut self, footer_window: usize) -> Self {
        self.footer_window = footer_window;
        self
    }

    /// Check that the configuration can drive a reader
    pub fn validate(&self) -> Result<()> {
        if self.buffer_capacity == 0 {
            return Err(Error::configuration("buffer_capacity must be greater than 0"));
        }
        if self.footer_window == 0 {
            return Err(Error::configuration("footer_window must be greater than 0"));
        }
        Ok(())
    }
}
