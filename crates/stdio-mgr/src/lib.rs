// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped stdin/stdout/stderr substitution for tests.
//!
//! [`stdio_mgr`] swaps in-memory streams into the process-wide stdio registry
//! and restores the previous ones when the returned guard drops. Everything the
//! code under test reads from the substitute stdin is teed into the substitute
//! stdout, so the captured output reads like an interactive terminal session.
//! Tests feed further input mid-run with [`TeeStdin::append`].

mod buffer;
mod capture;
mod config;
mod error;
mod manager;
mod process;
mod registry;
mod tee;

pub use capture::CaptureStream;
pub use config::StdioConfig;
pub use error::StdioError;
pub use manager::{stdio_mgr, with_stdio, StdioGuard, StdioManager, StdioSnapshot};
#[doc(hidden)]
pub use registry::_print;
pub use registry::{
    current, input, stderr, stdin, stdout, InputHandle, OutputHandle, StdioHandles, TextInput,
    TextOutput,
};
pub use tee::TeeStdin;
