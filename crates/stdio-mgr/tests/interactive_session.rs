// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! End-to-end scopes driving small interactive programs.

mod common;

use common::{greeter, scope_lock, summer};
use std::io;
use stdio_mgr::{stdio_mgr, with_stdio, StdioConfig, StdioManager};

#[test]
fn test_greeter_transcript() {
    let _lock = scope_lock();
    let guard = stdio_mgr("Ada\nGrace\nquit\n");

    assert_eq!(greeter().unwrap(), 2);
    assert_eq!(
        guard.stdout().getvalue(),
        "name> Ada\nhello, Ada\nname> Grace\nhello, Grace\nname> quit\nbye\n"
    );
    assert_eq!(guard.stderr().getvalue(), "");
}

#[test]
fn test_greeter_reports_empty_names_on_stderr() {
    let _lock = scope_lock();
    let guard = stdio_mgr("\nquit\n");

    assert_eq!(greeter().unwrap(), 0);
    assert_eq!(guard.stderr().getvalue(), "empty name\n");
}

#[test]
fn test_greeter_runs_out_of_input() {
    let _lock = scope_lock();
    let before = stdio_mgr::current();

    let result = with_stdio("Ada\n", |_i, o, _e| {
        let result = greeter();
        assert_eq!(o.getvalue(), "name> Ada\nhello, Ada\nname> ");
        result
    });

    assert_eq!(result.unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    assert!(stdio_mgr::current().ptr_eq(&before));
}

#[test]
fn test_input_fed_incrementally() {
    let _lock = scope_lock();
    let guard = stdio_mgr("");
    let (i, o, _e) = guard.streams();

    i.append("1\n2\n").unwrap();
    assert_eq!(stdio_mgr::input("").unwrap(), "1");

    // Unread "2\n" is consumed before anything appended now
    i.append("3\n").unwrap();
    assert_eq!(stdio_mgr::input("").unwrap(), "2");
    assert_eq!(stdio_mgr::input("").unwrap(), "3");
    assert_eq!(o.getvalue(), "1\n2\n3\n");
}

#[test]
fn test_summer_skips_garbage() {
    let _lock = scope_lock();
    let guard = stdio_mgr("1\ntwo\n3\n");

    assert_eq!(summer().unwrap(), 4);
    assert_eq!(guard.stdout().getvalue(), "1\ntwo\n3\n");
    assert_eq!(guard.stderr().getvalue(), "skipping \"two\"\n");
}

#[test]
fn test_nested_scope_isolates_output() {
    let _lock = scope_lock();
    let outer = stdio_mgr("outer\n");

    let inner_out = {
        let inner = stdio_mgr("inner\n");
        assert_eq!(stdio_mgr::input("").unwrap(), "inner");
        inner.stdout().clone()
    };

    assert_eq!(stdio_mgr::input("").unwrap(), "outer");
    assert_eq!(inner_out.getvalue(), "inner\n");
    assert_eq!(outer.stdout().getvalue(), "outer\n");
}

#[test]
fn test_config_fixture() {
    let _lock = scope_lock();
    let config: StdioConfig = toml::from_str(
        r#"
        stdin = "Ada\nquit\n"
        close = false
        "#,
    )
    .unwrap();

    let stdin = {
        let guard = StdioManager::with_config(config).enter();
        assert_eq!(greeter().unwrap(), 1);
        guard.stdin().clone()
    };

    assert!(!stdin.is_closed());
    assert_eq!(stdin.getvalue().unwrap(), "");
}
