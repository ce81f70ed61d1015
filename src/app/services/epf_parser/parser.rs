//! EPF parser session
//!
//! A session owns one byte source and walks it strictly forward: header,
//! then data records, stopping at the footer. The footer itself is read
//! through a random-access tail read that leaves the forward cursor alone.

use std::fs::File;
use std::io::{ErrorKind, Read, Seek};
use std::path::Path;
use tokio::task;
use tracing::{debug, info, trace, warn};

use super::conversion::rows_to_dataframe;
use super::footer::read_footer;
use super::header::parse_header;
use super::record_parser::{EndReason, ReadOutcome, read_record};
use super::source::ByteSource;
use super::stats::{ParseResult, ReadStats};
use crate::app::models::{Metadata, Row};
use crate::config::ReaderConfig;
use crate::{Error, Result};
use polars::prelude::DataFrame;

/// Streaming reader over a single EPF export
///
/// Metadata is parsed lazily on first use and cached for the life of the
/// session. Rows are produced one at a time in file order.
#[derive(Debug)]
pub struct EpfParser<R> {
    source: ByteSource<R>,
    config: ReaderConfig,
    metadata: Option<Metadata>,
    stats: ReadStats,
}

impl EpfParser<File> {
    /// Open an EPF file with the default configuration
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, ReaderConfig::default())
    }

    /// Open an EPF file with a custom configuration
    pub fn open_with_config(path: impl AsRef<Path>, config: ReaderConfig) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening EPF file: {}", path.display());

        let file = File::open(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        Self::with_config(file, config)
    }
}

impl<R: Read + Seek> EpfParser<R> {
    /// Create a session over any seekable reader
    pub fn new(reader: R) -> Self {
        let config = ReaderConfig::default();
        Self {
            source: ByteSource::with_capacity(config.buffer_capacity, reader),
            config,
            metadata: None,
            stats: ReadStats::new(),
        }
    }

    /// Create a session with a validated custom configuration
    pub fn with_config(reader: R, config: ReaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source: ByteSource::with_capacity(config.buffer_capacity, reader),
            config,
            metadata: None,
            stats: ReadStats::new(),
        })
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn stats(&self) -> &ReadStats {
        &self.stats
    }

    /// Schema, export mode and declared row count.
    ///
    /// The first call parses the header and the footer; later calls return
    /// the cached value. If the first call fails the stream position is
    /// undefined and the session should be discarded.
    pub fn metadata(&mut self) -> Result<&Metadata> {
        let metadata = match self.metadata.take() {
            Some(metadata) => metadata,
            None => self.load_metadata()?,
        };
        Ok(self.metadata.insert(metadata))
    }

    fn load_metadata(&mut self) -> Result<Metadata> {
        let header = parse_header(&mut self.source)?;
        let total_items = read_footer(&mut self.source, self.config.footer_window)?;

        let metadata = Metadata {
            fields: header.fields,
            primary_key: header.primary_key,
            types: header.types,
            export_mode: header.export_mode,
            total_items,
        };

        debug!(
            "Loaded metadata: {} fields, {} export, {} records declared",
            metadata.fields.len(),
            metadata.export_mode,
            metadata.total_items
        );

        Ok(metadata)
    }

    /// Read the next record.
    ///
    /// Returns [`ReadOutcome::EndOfData`] at the footer or when the source is
    /// exhausted; neither is an error. Once end of data is reached callers
    /// should stop reading.
    pub fn read(&mut self) -> Result<ReadOutcome> {
        let metadata = match self.metadata.take() {
            Some(metadata) => metadata,
            None => self.load_metadata()?,
        };

        let record = self.stats.rows_read + 1;
        let outcome = read_record(&mut self.source, &metadata, record);
        self.metadata = Some(metadata);

        match outcome? {
            ReadOutcome::Row(row) => {
                self.stats.rows_read += 1;
                trace!("Read record {} with {} fields", record, row.len());
                Ok(ReadOutcome::Row(row))
            }
            ReadOutcome::EndOfData { reason, partial } => {
                self.finish(reason, partial.as_ref());
                Ok(ReadOutcome::EndOfData { reason, partial })
            }
        }
    }

    /// Record how the data section ended
    fn finish(&mut self, reason: EndReason, partial: Option<&Row>) {
        if self.stats.end_reason.is_some() {
            return;
        }
        self.stats.end_reason = Some(reason);

        if let Some(row) = partial {
            warn!(
                "Stream ended inside record {} after {} complete fields",
                self.stats.rows_read + 1,
                row.len()
            );
            self.stats.truncated_fields = Some(row.len());
        }

        if let Some(metadata) = &self.metadata {
            if !self.stats.matches_footer(metadata.total_items) {
                warn!(
                    "Read {} records but footer declares {}",
                    self.stats.rows_read, metadata.total_items
                );
            }
        }
    }

    /// Iterate over the remaining rows
    pub fn rows(&mut self) -> Rows<'_, R> {
        Rows {
            parser: self,
            done: false,
        }
    }

    /// Read every remaining row into memory
    pub fn read_all(&mut self) -> Result<Vec<Row>> {
        self.rows().collect()
    }

    /// Read every remaining row into a typed DataFrame
    pub fn collect_dataframe(&mut self) -> Result<DataFrame> {
        let rows = self.read_all()?;
        let metadata = self.metadata()?;
        rows_to_dataframe(metadata, &rows)
    }

    /// Release the underlying source
    pub fn close(self) {
        debug!("Closing EPF parser after {} records", self.stats.rows_read);
    }

    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }
}

/// Iterator over the rows of a session
///
/// Ends at the footer. A trailing record cut off by the end of the stream
/// is reported as [`Error::TruncatedRecord`]. Iteration stops after the
/// first error.
#[derive(Debug)]
pub struct Rows<'a, R> {
    parser: &'a mut EpfParser<R>,
    done: bool,
}

impl<R: Read + Seek> Iterator for Rows<'_, R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.parser.read() {
            Ok(ReadOutcome::Row(row)) => Some(Ok(row)),
            Ok(ReadOutcome::EndOfData { partial, .. }) => {
                self.done = true;
                match partial {
                    Some(row) => Some(Err(Error::TruncatedRecord {
                        record: self.parser.stats.rows_read + 1,
                        fields_read: row.len(),
                    })),
                    None => None,
                }
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Parse a whole EPF file into memory
pub fn parse_file(path: &Path, config: ReaderConfig) -> Result<ParseResult> {
    let mut parser = EpfParser::open_with_config(path, config)?;
    let metadata = parser.metadata()?.clone();
    let rows = parser.read_all()?;
    let stats = parser.stats().clone();

    info!(
        "Parsed {} of {} declared records from {}",
        stats.rows_read,
        metadata.total_items,
        path.display()
    );

    Ok(ParseResult {
        metadata,
        rows,
        stats,
    })
}

/// Parse a whole EPF file on the blocking thread pool
pub async fn load_file(path: impl AsRef<Path>, config: ReaderConfig) -> Result<ParseResult> {
    let path = path.as_ref().to_path_buf();

    task::spawn_blocking({
        let path = path.clone();
        move || parse_file(&path, config)
    })
    .await
    .map_err(|e| Error::processing_failed(&path, format!("Parsing task failed: {}", e)))?
}
