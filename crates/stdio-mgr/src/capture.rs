// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capturing output stream.

use crate::buffer::TextBuffer;
use crate::error::StdioError;
use crate::registry::{OutputHandle, TextOutput};
use parking_lot::Mutex;
use std::io::{self, Seek, SeekFrom, Write};
use std::sync::Arc;

/// In-memory text stream that stands in for stdout or stderr.
///
/// Clones share the same buffer. The accumulated text stays available
/// through [`getvalue`](Self::getvalue) after the stream is closed.
#[derive(Clone, Debug, Default)]
pub struct CaptureStream {
    inner: Arc<Mutex<CaptureState>>,
}

#[derive(Debug, Default)]
struct CaptureState {
    buffer: TextBuffer,
    closed: bool,
    // Incomplete UTF-8 sequence left over from the last byte write
    partial: Vec<u8>,
}

impl CaptureState {
    fn open(&mut self) -> Result<&mut TextBuffer, StdioError> {
        if self.closed {
            return Err(StdioError::Closed);
        }
        Ok(&mut self.buffer)
    }

    /// Write raw bytes as text, holding back a trailing incomplete UTF-8
    /// sequence until a later call completes it.
    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        let mut bytes = std::mem::take(&mut self.partial);
        bytes.extend_from_slice(buf);

        let (text, tail) = match std::str::from_utf8(&bytes) {
            Ok(text) => (text, &[] as &[u8]),
            Err(e) if e.error_len().is_none() => {
                let (head, tail) = bytes.split_at(e.valid_up_to());
                (std::str::from_utf8(head).unwrap_or_default(), tail)
            }
            Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        };

        self.open()?.write(text)?;
        self.partial = tail.to_vec();
        Ok(())
    }
}

impl CaptureStream {
    /// Create an empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `text` at the current position, returning the characters written
    pub fn write(&self, text: &str) -> Result<usize, StdioError> {
        self.inner.lock().open()?.write(text)
    }

    pub fn read(&self, size: Option<usize>) -> Result<String, StdioError> {
        Ok(self.inner.lock().open()?.read(size))
    }

    pub fn read_line(&self, limit: Option<usize>) -> Result<String, StdioError> {
        Ok(self.inner.lock().open()?.read_line(limit))
    }

    pub fn seek(&self, pos: SeekFrom) -> Result<u64, StdioError> {
        self.inner.lock().open()?.seek(pos)
    }

    pub fn tell(&self) -> Result<u64, StdioError> {
        Ok(self.inner.lock().open()?.tell())
    }

    /// Everything written so far, whether or not the stream is closed
    pub fn getvalue(&self) -> String {
        self.inner.lock().buffer.value().to_string()
    }

    /// Close the stream. Closing twice is a no-op.
    pub fn close(&self) {
        self.inner.lock().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }
}

impl TextOutput for CaptureStream {
    fn write_text(&self, text: &str) -> io::Result<()> {
        CaptureStream::write(self, text)?;
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        if self.is_closed() {
            return Err(StdioError::Closed.into());
        }
        Ok(())
    }
}

impl From<CaptureStream> for OutputHandle {
    fn from(stream: CaptureStream) -> Self {
        OutputHandle::new(stream)
    }
}

/// Bytes must form UTF-8 text. A multi-byte character may be split across
/// calls; invalid sequences fail with [`io::ErrorKind::InvalidData`].
impl Write for CaptureStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        TextOutput::flush(&*self)
    }
}

impl Seek for CaptureStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(CaptureStream::seek(self, pos)?)
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
