// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for stdio scope integration tests.

#![allow(dead_code)]

use parking_lot::{const_mutex, Mutex, MutexGuard};
use std::io;

static SCOPE_LOCK: Mutex<()> = const_mutex(());

/// Hold for the duration of any test that enters a stdio scope.
pub fn scope_lock() -> MutexGuard<'static, ()> {
    SCOPE_LOCK.lock()
}

// =============================================================================
// Programs under test
// =============================================================================

/// Echo prompt loop: greets each name until it reads `quit`.
pub fn greeter() -> io::Result<usize> {
    let mut greeted = 0;
    loop {
        let name = stdio_mgr::input("name> ")?;
        if name == "quit" {
            stdio_mgr::sprintln!("bye");
            return Ok(greeted);
        }
        if name.is_empty() {
            stdio_mgr::seprintln!("empty name");
            continue;
        }
        stdio_mgr::sprintln!("hello, {}", name);
        greeted += 1;
    }
}

/// Sum integers read one per line from stdin until end of input.
pub fn summer() -> io::Result<i64> {
    let stdin = stdio_mgr::stdin();
    let mut total = 0;
    loop {
        let line = stdin.read_line(None)?;
        if line.is_empty() {
            return Ok(total);
        }
        match line.trim().parse::<i64>() {
            Ok(n) => total += n,
            Err(_) => stdio_mgr::seprintln!("skipping {:?}", line.trim()),
        }
    }
}
