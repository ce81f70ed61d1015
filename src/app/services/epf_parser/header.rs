//! EPF header block parsing
//!
//! The header is a fixed sequence of `#`-prefixed lines:
//!
//! ```text
//! #export_date^Aartist_id^Aname^B
//! #primaryKey:artist_id^B
//! #dbTypes:BIGINT^AINTEGER^AVARCHAR(1000)^B
//! #exportMode:FULL^B
//! ```
//!
//! followed by any number of free-form comment lines. Parsing is a byte
//! driven state machine that never moves backwards. The first byte after
//! the header is pushed back onto the source so the record tokenizer
//! starts exactly at the first data record.

use std::io::{Read, Seek};
use std::mem;
use tracing::{debug, warn};

use super::source::ByteSource;
use crate::app::models::ExportMode;
use crate::constants::{COMMENT_MARKER, FIELD_SEPARATOR, LABEL_SEPARATOR, RECORD_TERMINATOR};
use crate::{Error, Result};

/// Header line currently being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    Fields,
    PrimaryKey,
    Types,
    ExportMode,
    TrailingComment,
    Done,
}

impl HeaderState {
    /// State entered once the current line is complete
    pub fn next(self) -> Self {
        match self {
            HeaderState::Fields => HeaderState::PrimaryKey,
            HeaderState::PrimaryKey => HeaderState::Types,
            HeaderState::Types => HeaderState::ExportMode,
            HeaderState::ExportMode => HeaderState::TrailingComment,
            HeaderState::TrailingComment => HeaderState::TrailingComment,
            HeaderState::Done => HeaderState::Done,
        }
    }

    /// Lines of the form `#<label>:<values>`
    fn has_label(self) -> bool {
        matches!(
            self,
            HeaderState::PrimaryKey | HeaderState::Types | HeaderState::ExportMode
        )
    }

    fn describe(self) -> &'static str {
        match self {
            HeaderState::Fields => "field names",
            HeaderState::PrimaryKey => "primary key",
            HeaderState::Types => "column types",
            HeaderState::ExportMode => "export mode",
            HeaderState::TrailingComment => "comment",
            HeaderState::Done => "data",
        }
    }
}

/// Position within a single header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinePhase {
    /// Expecting the comment marker
    Start,
    /// Skipping the label up to `:`
    Label,
    /// Collecting separator-delimited values
    Values,
}

/// Everything the header block declares
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderInfo {
    pub fields: Vec<String>,
    pub primary_key: Vec<String>,
    pub types: Vec<String>,
    pub export_mode: ExportMode,

    /// Free-form comment lines after the export mode line
    pub comment_lines: usize,

    /// False when the stream ended before the export mode line
    pub complete: bool,
}

/// State machine over the header bytes
#[derive(Debug)]
struct HeaderMachine {
    state: HeaderState,
    phase: LinePhase,
    line: usize,
    token: Vec<u8>,
    values: Vec<String>,
    info: HeaderInfo,
}

impl HeaderMachine {
    fn new() -> Self {
        Self {
            state: HeaderState::Fields,
            phase: LinePhase::Start,
            line: 1,
            token: Vec::new(),
            values: Vec::new(),
            info: HeaderInfo::default(),
        }
    }

    /// Apply one byte to the machine
    fn transition<R: Read + Seek>(&mut self, byte: u8, source: &mut ByteSource<R>) -> Result<()> {
        match (self.phase, byte) {
            (LinePhase::Start, COMMENT_MARKER) => {
                self.phase = if self.state.has_label() {
                    LinePhase::Label
                } else {
                    LinePhase::Values
                };
            }
            (LinePhase::Start, _) if self.state == HeaderState::TrailingComment => {
                source.unread(byte);
                self.state = HeaderState::Done;
            }
            (LinePhase::Start, _) => {
                return Err(Error::format(
                    self.line,
                    format!(
                        "expected '#' at the start of the {} line, found byte 0x{:02x}",
                        self.state.describe(),
                        byte
                    ),
                ));
            }
            (LinePhase::Label, LABEL_SEPARATOR) => self.phase = LinePhase::Values,
            (LinePhase::Label, RECORD_TERMINATOR) => {
                source.finish_line()?;
                self.close_line();
            }
            (LinePhase::Label, _) => {}
            (LinePhase::Values, FIELD_SEPARATOR) => self.close_token(),
            (LinePhase::Values, RECORD_TERMINATOR) => {
                source.finish_line()?;
                self.close_token();
                self.close_line();
            }
            (LinePhase::Values, _) => self.token.push(byte),
        }
        Ok(())
    }

    fn close_token(&mut self) {
        let token = String::from_utf8_lossy(&self.token).into_owned();
        self.token.clear();
        self.values.push(token);
    }

    fn close_line(&mut self) {
        let mut values = mem::take(&mut self.values);
        if values.len() == 1 && values[0].is_empty() {
            values.clear();
        }

        match self.state {
            HeaderState::Fields => self.info.fields = values,
            HeaderState::PrimaryKey => self.info.primary_key = values,
            HeaderState::Types => self.info.types = values,
            HeaderState::ExportMode => {
                self.info.export_mode = match values.as_slice() {
                    [value] => ExportMode::from_header_value(value),
                    _ => ExportMode::Incremental,
                };
                self.info.complete = true;
            }
            HeaderState::TrailingComment => self.info.comment_lines += 1,
            HeaderState::Done => {}
        }

        self.state = self.state.next();
        self.phase = LinePhase::Start;
        self.line += 1;
    }
}

/// Consume the header block from the start of `source`.
///
/// Reaching the end of the stream ends the header without error, so
/// files with an empty body still yield whatever the header declared.
pub fn parse_header<R: Read + Seek>(source: &mut ByteSource<R>) -> Result<HeaderInfo> {
    let mut machine = HeaderMachine::new();

    while machine.state != HeaderState::Done {
        let Some(byte) = source.next_byte()? else {
            debug!(
                "Stream ended while reading the {} header line",
                machine.state.describe()
            );
            break;
        };
        machine.transition(byte, source)?;
    }

    let info = machine.info;
    if info.fields.len() != info.types.len() {
        warn!(
            "Header declares {} fields but {} types",
            info.fields.len(),
            info.types.len()
        );
    }

    debug!(
        "Parsed header: {} fields, primary key {:?}, export mode {}, {} comment lines",
        info.fields.len(),
        info.primary_key,
        info.export_mode,
        info.comment_lines
    );

    Ok(info)
}
