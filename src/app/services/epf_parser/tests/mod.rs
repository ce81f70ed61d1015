//! Test utilities and fixtures for EPF parser testing
//!
//! This module provides builders for in-memory EPF content and helpers
//! shared by the test modules below.

use std::io::{Cursor, Write};
use tempfile::NamedTempFile;
use tracing_subscriber::EnvFilter;

use super::EpfParser;
use super::source::ByteSource;
use crate::app::models::{ExportMode, Metadata};

mod header_tests;

/// Standard header used by most fixtures: BIGINT, INTEGER and VARCHAR columns
pub const DEMO_HEADER: &str = "#export_date\x01id\x01name\x02\n\
#primaryKey:id\x02\n\
#dbTypes:BIGINT\x01INTEGER\x01VARCHAR(200)\x02\n\
#exportMode:FULL\x02\n";

/// Route tracing output to the test harness
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("epf_reader=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Complete demo export with `count` rows and a matching footer
pub fn create_demo_epf(count: usize) -> Vec<u8> {
    let mut content = String::from(DEMO_HEADER);
    for index in 1..=count {
        content.push_str(&format!("1490173201020\x01{index}\x01item {index}\x02\n"));
    }
    content.push_str(&format!("#recordsWritten:{count}\x02\n"));
    content.into_bytes()
}

/// Metadata matching [`DEMO_HEADER`]
pub fn demo_metadata(total_items: usize) -> Metadata {
    Metadata {
        fields: vec!["export_date".into(), "id".into(), "name".into()],
        primary_key: vec!["id".into()],
        types: vec!["BIGINT".into(), "INTEGER".into(), "VARCHAR(200)".into()],
        export_mode: ExportMode::Full,
        total_items,
    }
}

/// Byte source over in-memory content
pub fn source_from(content: &[u8]) -> ByteSource<Cursor<Vec<u8>>> {
    ByteSource::new(Cursor::new(content.to_vec()))
}

/// Parser session over in-memory content
pub fn parser_from(content: &[u8]) -> EpfParser<Cursor<Vec<u8>>> {
    init_test_logging();
    EpfParser::new(Cursor::new(content.to_vec()))
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
