//! EPF Reader Library
//!
//! A Rust library for reading EPF exports: control-character delimited
//! tabular files that describe their own schema in a comment header and
//! record their row count in a footer.
//!
//! This library provides tools for:
//! - Discovering the schema and export mode before reading any data
//! - Streaming rows as typed values without loading the whole file
//! - Reading the declared row count from the footer without a full scan
//! - Converting decoded rows into Polars DataFrames

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod epf_parser;
    }
}

// Re-export commonly used types
pub use app::models::{ExportMode, Metadata, Row, Value};
pub use app::services::epf_parser::{EndReason, EpfParser, ReadOutcome, ReadStats};
pub use config::ReaderConfig;
pub use error::{Error, Result};
