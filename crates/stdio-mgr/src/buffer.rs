// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory text buffer with a byte cursor.
//!
//! The bytes are always valid UTF-8 and the cursor always sits on a character
//! boundary or past the end. Reads count characters; positions are bytes.

use crate::error::StdioError;
use std::io::{self, Cursor, Seek, SeekFrom};

#[derive(Debug, Default)]
pub(crate) struct TextBuffer {
    cursor: Cursor<Vec<u8>>,
}

impl TextBuffer {
    pub(crate) fn new(initial: &str) -> Self {
        Self {
            cursor: Cursor::new(initial.as_bytes().to_vec()),
        }
    }

    pub(crate) fn into_cursor(self) -> Cursor<Vec<u8>> {
        self.cursor
    }

    pub(crate) fn tell(&self) -> u64 {
        self.cursor.position()
    }

    /// Text between the cursor and the end of the buffer.
    pub(crate) fn pending(&self) -> &str {
        let data = self.cursor.get_ref();
        let start = self.offset().min(data.len());
        text_of(data.get(start..).unwrap_or_default())
    }

    /// The whole buffer, regardless of the cursor.
    pub(crate) fn value(&self) -> &str {
        text_of(self.cursor.get_ref())
    }

    /// Read up to `size` characters, or everything remaining for `None`.
    pub(crate) fn read(&mut self, size: Option<usize>) -> String {
        let rest = self.pending();
        let end = match size {
            Some(n) => char_end(rest, n),
            None => rest.len(),
        };
        let text = rest.get(..end).unwrap_or_default().to_string();
        self.advance(end);
        text
    }

    /// Read through the next newline (inclusive), capped at `limit` characters.
    pub(crate) fn read_line(&mut self, limit: Option<usize>) -> String {
        let rest = self.pending();
        let line_end = rest.find('\n').map_or(rest.len(), |i| i + 1);
        let end = match limit {
            Some(n) => char_end(rest, n).min(line_end),
            None => line_end,
        };
        let text = rest.get(..end).unwrap_or_default().to_string();
        self.advance(end);
        text
    }

    /// Write `text` at the cursor, overwriting what is there.
    ///
    /// A character cut by the end of the overwritten range is dropped whole.
    /// Returns the number of characters written. Fails without touching the
    /// buffer when the cursor is too far past the end to pad up to it.
    pub(crate) fn write(&mut self, text: &str) -> Result<usize, StdioError> {
        let pos = self.offset();
        let tell = self.cursor.position();
        let new_pos = pos
            .checked_add(text.len())
            .ok_or(StdioError::InvalidPosition { pos: tell })?;

        let data = self.cursor.get_mut();
        if pos > data.len() {
            data.try_reserve(new_pos - data.len())
                .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
            data.resize(pos, 0);
        }

        let mut end = new_pos.min(data.len());
        while data.get(end).is_some_and(|b| is_continuation(*b)) {
            end += 1;
        }
        data.splice(pos..end, text.bytes());

        self.cursor.set_position(new_pos as u64);
        Ok(text.chars().count())
    }

    /// Push `text` onto the end without moving the cursor.
    pub(crate) fn append(&mut self, text: &str) -> usize {
        self.cursor.get_mut().extend_from_slice(text.as_bytes());
        text.len()
    }

    pub(crate) fn seek(&mut self, from: SeekFrom) -> Result<u64, StdioError> {
        let previous = self.cursor.position();
        let pos = self.cursor.seek(from)?;

        let data = self.cursor.get_ref();
        let in_char = usize::try_from(pos)
            .ok()
            .and_then(|p| data.get(p))
            .is_some_and(|b| is_continuation(*b));
        if in_char {
            self.cursor.set_position(previous);
            return Err(StdioError::InvalidPosition { pos });
        }
        Ok(pos)
    }

    fn offset(&self) -> usize {
        usize::try_from(self.cursor.position()).unwrap_or(usize::MAX)
    }

    fn advance(&mut self, bytes: usize) {
        let pos = self.cursor.position();
        self.cursor.set_position(pos + bytes as u64);
    }
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Byte index just past the first `n` characters of `text`.
fn char_end(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map_or(text.len(), |(i, _)| i)
}

fn text_of(bytes: &[u8]) -> &str {
    // Every mutation keeps the bytes valid UTF-8.
    std::str::from_utf8(bytes).unwrap_or_default()
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
