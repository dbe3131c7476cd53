//! Integration Test: Core Independence
//!
//! **Policy**: `tabswitch-core` is headless. It must not import a terminal
//! or UI framework, and must not pull in an async runtime; surfaces own
//! those concerns.

use std::fs;

use architectural_enforcement::{find_violations, workspace_root};

/// Crates the core must never depend on
const FORBIDDEN_CRATES: &[&str] = &["ratatui", "crossterm", "tokio", "futures"];

#[test]
fn test_core_sources_import_no_ui_or_runtime() {
    let violations = find_violations("switcher/core/src", |code| {
        FORBIDDEN_CRATES
            .iter()
            .any(|krate| code.contains(&format!("{krate}::")))
    });

    assert!(
        violations.is_empty(),
        "Core imports UI or runtime crates:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_core_manifest_declares_no_ui_or_runtime() {
    let manifest = fs::read_to_string(workspace_root().join("switcher/core/Cargo.toml"))
        .unwrap_or_default();

    let declared: Vec<&str> = manifest
        .lines()
        .filter_map(|line| line.split('=').next())
        .map(str::trim)
        .filter(|name| FORBIDDEN_CRATES.contains(name))
        .collect();

    assert!(
        declared.is_empty(),
        "Core Cargo.toml declares {declared:?}"
    );
}

#[test]
fn test_core_is_not_async() {
    let violations = find_violations("switcher/core/src", |code| {
        code.contains("async fn") || code.contains(".await")
    });

    assert!(
        violations.is_empty(),
        "Core has async code:\n{}",
        violations.join("\n")
    );
}
