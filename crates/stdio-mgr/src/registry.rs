// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide stdio registry.
//!
//! Holds the currently installed stdin/stdout/stderr handles. At start-up the
//! slot delegates to the real process streams; [`StdioManager`] swaps in
//! in-memory substitutes for the duration of a scope. Code that should be
//! observable under test reads and writes through [`stdin`], [`stdout`],
//! [`stderr`], [`input`] and the `sprint!` family of macros.
//!
//! [`StdioManager`]: crate::StdioManager

use crate::process::{ProcessStderr, ProcessStdin, ProcessStdout};
use parking_lot::RwLock;
use std::fmt;
use std::io;
use std::sync::{Arc, LazyLock};

/// A readable text stream that can be installed as stdin.
pub trait TextInput: Send + Sync {
    /// Read up to `size` characters, or everything for `None`.
    fn read(&self, size: Option<usize>) -> io::Result<String>;

    /// Read one line including its newline, capped at `limit` characters.
    fn read_line(&self, limit: Option<usize>) -> io::Result<String>;
}

/// A writable text stream that can be installed as stdout or stderr.
pub trait TextOutput: Send + Sync {
    fn write_text(&self, text: &str) -> io::Result<()>;

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Shared handle to an input stream.
///
/// Equality is identity: two handles are the same stream when
/// [`ptr_eq`](Self::ptr_eq) holds.
#[derive(Clone)]
pub struct InputHandle(Arc<dyn TextInput>);

/// Shared handle to an output stream.
#[derive(Clone)]
pub struct OutputHandle(Arc<dyn TextOutput>);

impl InputHandle {
    pub fn new(input: impl TextInput + 'static) -> Self {
        Self(Arc::new(input))
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }

    pub fn read(&self, size: Option<usize>) -> io::Result<String> {
        self.0.read(size)
    }

    pub fn read_line(&self, limit: Option<usize>) -> io::Result<String> {
        self.0.read_line(limit)
    }
}

impl OutputHandle {
    pub fn new(output: impl TextOutput + 'static) -> Self {
        Self(Arc::new(output))
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }

    pub fn write_text(&self, text: &str) -> io::Result<()> {
        self.0.write_text(text)
    }

    pub fn flush(&self) -> io::Result<()> {
        self.0.flush()
    }
}

impl fmt::Debug for InputHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InputHandle")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

impl fmt::Debug for OutputHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OutputHandle")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// The three handles installed in the registry at one moment.
#[derive(Clone, Debug)]
pub struct StdioHandles {
    stdin: InputHandle,
    stdout: OutputHandle,
    stderr: OutputHandle,
}

impl StdioHandles {
    pub fn new(stdin: InputHandle, stdout: OutputHandle, stderr: OutputHandle) -> Self {
        Self {
            stdin,
            stdout,
            stderr,
        }
    }

    fn process() -> Self {
        Self::new(
            InputHandle::new(ProcessStdin),
            OutputHandle::new(ProcessStdout),
            OutputHandle::new(ProcessStderr),
        )
    }

    pub fn stdin(&self) -> &InputHandle {
        &self.stdin
    }

    pub fn stdout(&self) -> &OutputHandle {
        &self.stdout
    }

    pub fn stderr(&self) -> &OutputHandle {
        &self.stderr
    }

    /// True when all three handles are the same streams as `other`'s.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.stdin.ptr_eq(&other.stdin)
            && self.stdout.ptr_eq(&other.stdout)
            && self.stderr.ptr_eq(&other.stderr)
    }
}

static REGISTRY: LazyLock<RwLock<StdioHandles>> =
    LazyLock::new(|| RwLock::new(StdioHandles::process()));

/// Snapshot of the currently installed handles.
pub fn current() -> StdioHandles {
    REGISTRY.read().clone()
}

/// The currently installed stdin.
pub fn stdin() -> InputHandle {
    REGISTRY.read().stdin.clone()
}

/// The currently installed stdout.
pub fn stdout() -> OutputHandle {
    REGISTRY.read().stdout.clone()
}

/// The currently installed stderr.
pub fn stderr() -> OutputHandle {
    REGISTRY.read().stderr.clone()
}

/// Install `handles` and hand back the ones they replaced.
pub(crate) fn replace(handles: StdioHandles) -> StdioHandles {
    std::mem::replace(&mut *REGISTRY.write(), handles)
}

/// Prompt on stdout and read one line from stdin without its newline.
///
/// Fails with [`io::ErrorKind::UnexpectedEof`] when stdin is exhausted.
pub fn input(prompt: &str) -> io::Result<String> {
    let handles = current();
    if !prompt.is_empty() {
        handles.stdout.write_text(prompt)?;
        handles.stdout.flush()?;
    }

    let mut line = handles.stdin.read_line(None)?;
    if line.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "EOF when reading a line",
        ));
    }
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

#[doc(hidden)]
#[allow(clippy::panic)]
pub fn _print(args: fmt::Arguments<'_>, to_stderr: bool) {
    let (handle, label) = if to_stderr {
        (stderr(), "stderr")
    } else {
        (stdout(), "stdout")
    };
    if let Err(e) = handle.write_text(&args.to_string()) {
        panic!("failed printing to {label}: {e}");
    }
}

/// Print to the installed stdout, like [`print!`].
#[macro_export]
macro_rules! sprint {
    ($($arg:tt)*) => {
        $crate::_print(format_args!($($arg)*), false)
    };
}

/// Print a line to the installed stdout, like [`println!`].
#[macro_export]
macro_rules! sprintln {
    () => {
        $crate::_print(format_args!("\n"), false)
    };
    ($($arg:tt)*) => {
        $crate::_print(format_args!("{}\n", format_args!($($arg)*)), false)
    };
}

/// Print to the installed stderr, like [`eprint!`].
#[macro_export]
macro_rules! seprint {
    ($($arg:tt)*) => {
        $crate::_print(format_args!($($arg)*), true)
    };
}

/// Print a line to the installed stderr, like [`eprintln!`].
#[macro_export]
macro_rules! seprintln {
    () => {
        $crate::_print(format_args!("\n"), true)
    };
    ($($arg:tt)*) => {
        $crate::_print(format_args!("{}\n", format_args!($($arg)*)), true)
    };
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
