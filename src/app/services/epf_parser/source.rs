//! Buffered byte source with one byte of pushback
//!
//! The header parser and the record tokenizer both need to peek one byte
//! past a record terminator, and the header parser must hand the first data
//! byte back to the tokenizer. Neither is possible with a plain `BufRead`,
//! so the source keeps a single lookahead slot in front of the buffer.

use std::io::{self, BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom};

use crate::constants::NEWLINE;

/// Forward byte stream over a seekable reader
#[derive(Debug)]
pub struct ByteSource<R> {
    reader: BufReader<R>,
    pushback: Option<u8>,
}

impl<R: Read + Seek> ByteSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
            pushback: None,
        }
    }

    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, inner),
            pushback: None,
        }
    }

    /// Next byte of the stream, or `None` once it is exhausted
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pushback.take() {
            return Ok(Some(byte));
        }

        loop {
            match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let byte = buf[0];
                    self.reader.consume(1);
                    return Ok(Some(byte));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Push a byte back so the next [`next_byte`](Self::next_byte) returns it.
    ///
    /// Only one byte can be pending at a time.
    pub fn unread(&mut self, byte: u8) {
        debug_assert!(self.pushback.is_none(), "pushback slot already occupied");
        self.pushback = Some(byte);
    }

    /// Complete a line after a record terminator has been read.
    ///
    /// Consumes the newline that usually follows the terminator. Any other
    /// byte is pushed back and starts the next token.
    pub fn finish_line(&mut self) -> io::Result<()> {
        match self.next_byte()? {
            None | Some(NEWLINE) => Ok(()),
            Some(byte) => {
                self.unread(byte);
                Ok(())
            }
        }
    }

    /// Read up to `window` bytes from the end of the source.
    ///
    /// The forward position, including any pushed back byte, is restored
    /// before returning.
    pub fn read_tail(&mut self, window: usize) -> io::Result<Vec<u8>> {
        let size = self.len()?;
        let resume_at = self.reader.stream_position()?;

        let start = size.saturating_sub(window as u64);
        self.reader.seek(SeekFrom::Start(start))?;

        let mut tail = Vec::with_capacity((size - start) as usize);
        let read = (&mut self.reader).take(size - start).read_to_end(&mut tail);

        // Restore the cursor even if the tail read failed
        self.reader.seek(SeekFrom::Start(resume_at))?;
        read?;

        Ok(tail)
    }

    /// Total size of the underlying source in bytes
    pub fn len(&mut self) -> io::Result<u64> {
        let resume_at = self.reader.stream_position()?;
        let size = self.reader.seek(SeekFrom::End(0))?;
        self.reader.seek(SeekFrom::Start(resume_at))?;
        Ok(size)
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}
