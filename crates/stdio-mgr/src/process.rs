// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Registry defaults backed by the real process streams.

use crate::registry::{TextInput, TextOutput};
use std::io::{self, BufRead, Read, Write};

#[derive(Debug)]
pub(crate) struct ProcessStdin;

#[derive(Debug)]
pub(crate) struct ProcessStdout;

#[derive(Debug)]
pub(crate) struct ProcessStderr;

impl TextInput for ProcessStdin {
    fn read(&self, size: Option<usize>) -> io::Result<String> {
        let mut stdin = io::stdin().lock();
        match size {
            Some(n) => read_chars(&mut stdin, Some(n), false),
            None => {
                let mut text = String::new();
                stdin.read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }

    fn read_line(&self, limit: Option<usize>) -> io::Result<String> {
        read_chars(&mut io::stdin().lock(), limit, true)
    }
}

impl TextOutput for ProcessStdout {
    fn write_text(&self, text: &str) -> io::Result<()> {
        io::stdout().lock().write_all(text.as_bytes())
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().flush()
    }
}

impl TextOutput for ProcessStderr {
    fn write_text(&self, text: &str) -> io::Result<()> {
        io::stderr().lock().write_all(text.as_bytes())
    }

    fn flush(&self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Read UTF-8 text from `reader`, at most `max` characters, stopping after a
/// newline when `line` is set.
///
/// Never asks `reader` for more data once the limit or the newline is reached.
pub(crate) fn read_chars<R: BufRead>(
    reader: &mut R,
    max: Option<usize>,
    line: bool,
) -> io::Result<String> {
    let mut out = Vec::new();
    let mut chars = 0usize;
    // Continuation bytes still owed by the last lead byte
    let mut owed = 0usize;

    if max == Some(0) {
        return Ok(String::new());
    }

    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            break;
        }

        let mut used = 0;
        let mut done = false;
        for &byte in available {
            if byte & 0xC0 == 0x80 {
                owed = owed.saturating_sub(1);
            } else {
                chars += 1;
                owed = sequence_len(byte) - 1;
            }
            used += 1;

            let at_limit = owed == 0 && max.is_some_and(|m| chars >= m);
            if at_limit || (line && byte == b'\n') {
                done = true;
                break;
            }
        }

        out.extend_from_slice(available.get(..used).unwrap_or_default());
        reader.consume(used);
        if done {
            break;
        }
    }

    String::from_utf8(out).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Encoded length announced by a UTF-8 lead byte.
fn sequence_len(lead: u8) -> usize {
    match lead.leading_ones() {
        2 => 2,
        3 => 3,
        4 => 4,
        _ => 1,
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
