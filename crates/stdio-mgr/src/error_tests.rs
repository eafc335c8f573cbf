// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rstest::rstest;

#[rstest]
#[case(StdioError::Closed, io::ErrorKind::Other)]
#[case(StdioError::Detached, io::ErrorKind::Other)]
#[case(StdioError::InvalidPosition { pos: 3 }, io::ErrorKind::InvalidInput)]
#[case(StdioError::Io(io::ErrorKind::UnexpectedEof.into()), io::ErrorKind::UnexpectedEof)]
fn test_into_io_error_kind(#[case] err: StdioError, #[case] kind: io::ErrorKind) {
    assert_eq!(io::Error::from(err).kind(), kind);
}

#[test]
fn test_closed_message_survives_conversion() {
    let err = io::Error::from(StdioError::Closed);
    assert_eq!(err.to_string(), "I/O operation on closed stream");
}

#[test]
fn test_is_closed() {
    assert!(StdioError::Closed.is_closed());
    assert!(StdioError::Detached.is_closed());
    assert!(!StdioError::InvalidPosition { pos: 0 }.is_closed());
}
