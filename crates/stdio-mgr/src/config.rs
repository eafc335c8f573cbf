// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scope configuration.

use serde::{Deserialize, Serialize};

/// Options for a [`StdioManager`](crate::StdioManager) scope.
///
/// Deserializable so suites can keep stdin fixtures in TOML or JSON:
/// ```toml
/// stdin = "yes\n"
/// close = false
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StdioConfig {
    /// Initial contents of the substitute stdin.
    pub stdin: String,

    /// Close the three substitutes when the scope exits.
    ///
    /// Captured stdout/stderr text stays readable either way; a closed stdin
    /// rejects further reads.
    pub close: bool,
}

impl Default for StdioConfig {
    fn default() -> Self {
        Self {
            stdin: String::new(),
            close: true,
        }
    }
}

impl StdioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stdin(mut self, text: impl Into<String>) -> Self {
        self.stdin = text.into();
        self
    }

    pub fn with_close(mut self, close: bool) -> Self {
        self.close = close;
        self
    }
}
