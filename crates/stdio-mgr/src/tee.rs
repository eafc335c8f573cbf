// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Stdin substitute that tees everything read into an output stream.
//!
//! Teeing happens on content *read*, not on content appended: a test appends
//! simulated keystrokes, and the code under test echoes them into the captured
//! stdout only when it actually consumes them.

use crate::buffer::TextBuffer;
use crate::error::StdioError;
use crate::registry::{InputHandle, OutputHandle, TextInput};
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Cursor, Seek, SeekFrom};
use std::sync::Arc;

/// In-memory stdin whose reads are mirrored into `tee`.
///
/// Clones share the same buffer and cursor.
#[derive(Clone)]
pub struct TeeStdin {
    inner: Arc<Mutex<TeeState>>,
    tee: OutputHandle,
}

#[derive(Debug)]
struct TeeState {
    buffer: Option<TextBuffer>,
    closed: bool,
}

impl TeeState {
    fn open(&mut self) -> Result<&mut TextBuffer, StdioError> {
        if self.closed {
            return Err(StdioError::Closed);
        }
        self.buffer.as_mut().ok_or(StdioError::Detached)
    }
}

impl TeeStdin {
    /// Create a stream holding `init_text` with the cursor at the start.
    pub fn new(init_text: &str, tee: impl Into<OutputHandle>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TeeState {
                buffer: Some(TextBuffer::new(init_text)),
                closed: false,
            })),
            tee: tee.into(),
        }
    }

    /// The stream receiving teed text.
    pub fn tee(&self) -> &OutputHandle {
        &self.tee
    }

    /// Read up to `size` characters (all remaining for `None`) and tee them.
    pub fn read(&self, size: Option<usize>) -> Result<String, StdioError> {
        let text = self.inner.lock().open()?.read(size);
        self.mirror(&text)?;
        Ok(text)
    }

    /// Read one line including its newline, capped at `limit` characters, and
    /// tee it.
    pub fn read_line(&self, limit: Option<usize>) -> Result<String, StdioError> {
        let text = self.inner.lock().open()?.read_line(limit);
        self.mirror(&text)?;
        Ok(text)
    }

    /// Add `text` to the end of the stream, leaving the read position alone.
    ///
    /// Returns the number of bytes appended.
    pub fn append(&self, text: &str) -> Result<usize, StdioError> {
        Ok(self.inner.lock().open()?.append(text))
    }

    pub fn seek(&self, pos: SeekFrom) -> Result<u64, StdioError> {
        self.inner.lock().open()?.seek(pos)
    }

    pub fn tell(&self) -> Result<u64, StdioError> {
        Ok(self.inner.lock().open()?.tell())
    }

    /// Text not yet read.
    pub fn getvalue(&self) -> Result<String, StdioError> {
        Ok(self.inner.lock().open()?.pending().to_string())
    }

    /// Close the stream. Closing twice is a no-op.
    pub fn close(&self) {
        self.inner.lock().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Take the underlying buffer out, leaving this stream unusable.
    pub fn detach(&self) -> Result<Cursor<Vec<u8>>, StdioError> {
        let mut state = self.inner.lock();
        state.open()?;
        state
            .buffer
            .take()
            .map(TextBuffer::into_cursor)
            .ok_or(StdioError::Detached)
    }

    fn mirror(&self, text: &str) -> Result<(), StdioError> {
        if !text.is_empty() {
            self.tee.write_text(text)?;
        }
        Ok(())
    }
}

impl TextInput for TeeStdin {
    fn read(&self, size: Option<usize>) -> io::Result<String> {
        Ok(TeeStdin::read(self, size)?)
    }

    fn read_line(&self, limit: Option<usize>) -> io::Result<String> {
        Ok(TeeStdin::read_line(self, limit)?)
    }
}

impl Seek for TeeStdin {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(TeeStdin::seek(self, pos)?)
    }
}

impl fmt::Debug for TeeStdin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeeStdin")
            .field("state", &*self.inner.lock())
            .field("tee", &self.tee)
            .finish()
    }
}

impl From<TeeStdin> for InputHandle {
    fn from(stream: TeeStdin) -> Self {
        InputHandle::new(stream)
    }
}

#[cfg(test)]
#[path = "tee_tests.rs"]
mod tests;
