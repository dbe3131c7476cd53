//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT call sleep methods. Slides advance
//! by host ticks (`SlideAnimation::update`, `TransitionStage::tick`), and the
//! terminal surface paces frames with `tokio::time::interval`.
//!
//! **Exceptions**: test code (after `#[cfg(test)]`).

use architectural_enforcement::find_violations;

fn is_sleep_call(code: &str) -> bool {
    code.contains("::sleep(") || code.contains(".sleep(") || code.contains("sleep_until(")
}

fn report(area: &str, violations: &[String]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ CRITICAL: Sleep calls found in {area} production code!\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    eprintln!("\n✅ Use instead:");
    eprintln!("  - Host-driven ticks (TransitionStage::tick / SlideAnimation::update)");
    eprintln!("  - tokio::time::interval() for frame pacing in the terminal surface");

    panic!(
        "\nFound {} sleep violation(s) in {area}.\nFix these before merging!",
        violations.len()
    );
}

#[test]
fn test_no_sleep_in_core() {
    report("core", &find_violations("switcher/core/src", is_sleep_call));
}

#[test]
fn test_no_sleep_in_replay() {
    report("replay", &find_violations("switcher/replay/src", is_sleep_call));
}

#[test]
fn test_no_sleep_in_tui() {
    report("tui", &find_violations("tui/src", is_sleep_call));
}

#[test]
fn test_detector_catches_sleep_forms() {
    assert!(is_sleep_call("std::thread::sleep(d);"));
    assert!(is_sleep_call("tokio::time::sleep(d).await;"));
    assert!(!is_sleep_call("ticker.tick().await;"));
}
