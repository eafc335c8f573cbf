// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped substitution of the process-wide stdio handles.

use crate::capture::CaptureStream;
use crate::config::StdioConfig;
use crate::registry::{self, InputHandle, OutputHandle, StdioHandles};
use crate::tee::TeeStdin;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace};

/// Number of scopes currently entered, for diagnostics only.
static DEPTH: AtomicUsize = AtomicUsize::new(0);

/// Builds the three substitute streams for a scope.
///
/// The streams exist as soon as the manager does; [`enter`](Self::enter)
/// installs them. stdin tees into stdout.
#[derive(Debug)]
pub struct StdioManager {
    config: StdioConfig,
    stdin: TeeStdin,
    stdout: CaptureStream,
    stderr: CaptureStream,
}

impl StdioManager {
    /// Manager whose stdin starts out holding `in_str`.
    pub fn new(in_str: &str) -> Self {
        Self::with_config(StdioConfig::new().with_stdin(in_str))
    }

    pub fn with_config(config: StdioConfig) -> Self {
        let stdout = CaptureStream::new();
        let stderr = CaptureStream::new();
        let stdin = TeeStdin::new(&config.stdin, stdout.clone());
        Self {
            config,
            stdin,
            stdout,
            stderr,
        }
    }

    pub fn stdin(&self) -> &TeeStdin {
        &self.stdin
    }

    pub fn stdout(&self) -> &CaptureStream {
        &self.stdout
    }

    pub fn stderr(&self) -> &CaptureStream {
        &self.stderr
    }

    /// Install the substitutes, returning the guard that restores the
    /// previous handles when dropped.
    pub fn enter(self) -> StdioGuard {
        let installed = StdioHandles::new(
            InputHandle::from(self.stdin.clone()),
            OutputHandle::from(self.stdout.clone()),
            OutputHandle::from(self.stderr.clone()),
        );
        let prior = registry::replace(installed.clone());
        let depth = DEPTH.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            depth,
            stdin_len = self.config.stdin.len(),
            "stdio substitutes installed"
        );

        StdioGuard {
            prior: Some(prior),
            installed,
            stdin: self.stdin,
            stdout: self.stdout,
            stderr: self.stderr,
            close_on_exit: self.config.close,
        }
    }
}

impl Default for StdioManager {
    fn default() -> Self {
        Self::with_config(StdioConfig::default())
    }
}

/// Active stdio scope.
///
/// Dropping the guard (normal scope end, early `?` return or panic unwind)
/// puts back the handles that were installed at entry, then closes the
/// substitutes if the scope was configured to. Nested guards must be dropped
/// in reverse order of entry, which ordinary lexical scoping guarantees.
#[must_use = "the previous stdio handles are restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct StdioGuard {
    prior: Option<StdioHandles>,
    installed: StdioHandles,
    stdin: TeeStdin,
    stdout: CaptureStream,
    stderr: CaptureStream,
    close_on_exit: bool,
}

impl StdioGuard {
    /// The substitutes in fixed order: stdin, stdout, stderr.
    pub fn streams(&self) -> (&TeeStdin, &CaptureStream, &CaptureStream) {
        (&self.stdin, &self.stdout, &self.stderr)
    }

    pub fn stdin(&self) -> &TeeStdin {
        &self.stdin
    }

    pub fn stdout(&self) -> &CaptureStream {
        &self.stdout
    }

    pub fn stderr(&self) -> &CaptureStream {
        &self.stderr
    }

    /// The handles this scope installed in the registry.
    pub fn handles(&self) -> &StdioHandles {
        &self.installed
    }

    /// Record of what the streams hold right now.
    pub fn snapshot(&self) -> StdioSnapshot {
        StdioSnapshot {
            stdin_pending: self.stdin.getvalue().ok(),
            stdout: self.stdout.getvalue(),
            stderr: self.stderr.getvalue(),
        }
    }

    /// Close all three substitutes without leaving the scope.
    pub fn close(&self) {
        self.stdin.close();
        self.stdout.close();
        self.stderr.close();
    }

    /// Leave the scope now instead of at the end of the enclosing block.
    pub fn exit(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        let Some(prior) = self.prior.take() else {
            return;
        };

        let replaced = registry::replace(prior);
        if !replaced.ptr_eq(&self.installed) {
            trace!("stdio scope exited out of order");
        }
        let depth = DEPTH.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
        debug!(depth, close = self.close_on_exit, "stdio handles restored");

        if self.close_on_exit {
            self.close();
        }
    }
}

impl Drop for StdioGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Captured state of a scope's streams, for comparison against baselines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdioSnapshot {
    /// Unread stdin text; `None` once stdin is closed or detached.
    pub stdin_pending: Option<String>,
    pub stdout: String,
    pub stderr: String,
}

/// Enter a scope whose stdin holds `in_str`.
///
/// ```
/// use stdio_mgr::{input, sprintln, stdio_mgr};
///
/// let guard = stdio_mgr("Ada\n");
/// let name = input("name? ").unwrap();
/// sprintln!("hello {name}");
/// assert_eq!(guard.stdout().getvalue(), "name? Ada\nhello Ada\n");
/// ```
pub fn stdio_mgr(in_str: &str) -> StdioGuard {
    StdioManager::new(in_str).enter()
}

/// Run `f` with substituted stdio, restoring the previous handles before
/// returning its result or resuming its panic.
pub fn with_stdio<R>(
    in_str: &str,
    f: impl FnOnce(&TeeStdin, &CaptureStream, &CaptureStream) -> R,
) -> R {
    let guard = stdio_mgr(in_str);
    let (stdin, stdout, stderr) = guard.streams();
    f(stdin, stdout, stderr)
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
