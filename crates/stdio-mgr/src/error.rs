// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error type shared by the in-memory streams.

use std::io;
use thiserror::Error;

/// Errors raised by [`TeeStdin`](crate::TeeStdin) and
/// [`CaptureStream`](crate::CaptureStream).
#[derive(Debug, Error)]
pub enum StdioError {
    #[error("I/O operation on closed stream")]
    Closed,

    #[error("underlying buffer has been detached")]
    Detached,

    #[error("position {pos} is not on a character boundary")]
    InvalidPosition { pos: u64 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<StdioError> for io::Error {
    fn from(err: StdioError) -> Self {
        match err {
            StdioError::Io(inner) => inner,
            StdioError::InvalidPosition { .. } => io::Error::new(io::ErrorKind::InvalidInput, err),
            StdioError::Closed | StdioError::Detached => io::Error::other(err),
        }
    }
}

impl StdioError {
    /// True for errors caused by using a finalized stream.
    pub fn is_closed(&self) -> bool {
        matches!(self, StdioError::Closed | StdioError::Detached)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
