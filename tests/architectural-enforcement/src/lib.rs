//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The switcher core has no UI framework or async runtime dependency
//! - No sleep() calls in production code; playback is driven by host ticks
//!
//! These tests are designed to catch violations early in the development cycle.
//! The helpers here find and scan the workspace's production sources.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root (two levels above this package)
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// All `.rs` files under a workspace-relative directory
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let path = workspace_root().join(dir);
    if !path.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// A production source line
#[derive(Debug)]
pub struct CodeLine {
    pub number: usize,
    /// The line with any `//` comment removed
    pub code: String,
    pub raw: String,
}

/// Production lines of a file: comments stripped, `#[cfg(test)]` tail dropped
pub fn production_lines(path: &Path) -> Vec<CodeLine> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };

    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
        .map(|(idx, line)| CodeLine {
            number: idx + 1,
            code: line.split("//").next().unwrap_or(line).to_string(),
            raw: line.trim().to_string(),
        })
        .filter(|line| !line.code.trim().is_empty())
        .collect()
}

/// Lines in `dir` whose code matches `pred`, formatted as `path:line - text`
pub fn find_violations(dir: &str, pred: impl Fn(&str) -> bool) -> Vec<String> {
    let root = workspace_root();
    rust_files(dir)
        .iter()
        .flat_map(|path| {
            let shown = path.strip_prefix(&root).unwrap_or(path).display().to_string();
            production_lines(path)
                .into_iter()
                .filter(|line| pred(&line.code))
                .map(move |line| format!("{}:{} - {}", shown, line.number, line.raw))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_holds_core() {
        assert!(workspace_root().join("switcher/core/Cargo.toml").exists());
        assert!(!rust_files("switcher/core/src").is_empty());
    }
}
