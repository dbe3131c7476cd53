//! Replay scripts
//!
//! A script is a JSON array of steps:
//!
//! ```json
//! [
//!   { "step": "scroll", "screen": 0, "offset": -30 },
//!   { "step": "tap" },
//!   { "step": "tick", "ms": 800 },
//!   { "step": "pan", "screen": 1, "phase": "began", "velocity_x": 50 },
//!   { "step": "pan", "screen": 1, "phase": "changed", "translation_x": 200 },
//!   { "step": "pan", "screen": 1, "phase": "ended", "translation_x": 200 },
//!   { "step": "settle" }
//! ]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tabswitch_core::{GesturePhase, PanGesture, ScreenId};

/// One scripted event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Tap on the header
    Tap,
    /// A screen's content scrolled to `offset`
    Scroll { screen: u32, offset: f32 },
    /// A screen became visible
    Appear { screen: u32 },
    /// Horizontal pan callback from a screen's recognizer
    Pan {
        screen: u32,
        phase: GesturePhase,
        #[serde(default)]
        translation_x: f32,
        #[serde(default)]
        velocity_x: f32,
    },
    /// Advance playback
    Tick { ms: u32 },
    /// Advance playback until the running slide ends
    Settle,
}

impl Step {
    /// Short name for snapshots
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::Scroll { .. } => "scroll",
            Self::Appear { .. } => "appear",
            Self::Pan { .. } => "pan",
            Self::Tick { .. } => "tick",
            Self::Settle => "settle",
        }
    }

    /// Screen the step targets, if any
    pub fn screen(&self) -> Option<ScreenId> {
        match self {
            Self::Scroll { screen, .. } | Self::Appear { screen } | Self::Pan { screen, .. } => {
                Some(ScreenId(*screen))
            }
            _ => None,
        }
    }

    /// The pan gesture carried by a `pan` step
    pub fn gesture(&self) -> Option<PanGesture> {
        match self {
            Self::Pan {
                phase,
                translation_x,
                velocity_x,
                ..
            } => Some(PanGesture::horizontal(*phase, *translation_x, *velocity_x)),
            _ => None,
        }
    }
}

/// Parse a script from JSON text
pub fn parse_script(text: &str) -> Result<Vec<Step>> {
    serde_json::from_str(text).context("Invalid replay script")
}

/// Read and parse a script file
pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    parse_script(&text).with_context(|| format!("In script {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_parse_all_step_kinds() {
        let steps = parse_script(
            r#"[
                {"step": "tap"},
                {"step": "scroll", "screen": 0, "offset": -30},
                {"step": "appear", "screen": 1},
                {"step": "pan", "screen": 0, "phase": "began", "velocity_x": -50},
                {"step": "tick", "ms": 16},
                {"step": "settle"}
            ]"#,
        )
        .unwrap();

        assert_eq!(steps.len(), 6);
        assert_eq!(
            steps[1],
            Step::Scroll {
                screen: 0,
                offset: -30.0
            }
        );
        assert_eq!(
            steps[3].gesture(),
            Some(PanGesture::horizontal(GesturePhase::Began, 0.0, -50.0))
        );
        assert_eq!(steps[2].screen(), Some(ScreenId(1)));
        assert_eq!(steps[0].screen(), None);
    }

    #[test]
    fn test_unknown_step_is_rejected() {
        let err = parse_script(r#"[{"step": "shake"}]"#).unwrap_err();
        assert!(err.to_string().contains("Invalid replay script"));
    }

    #[test]
    fn test_load_script_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"[{{"step": "tick", "ms": 100}}]"#).unwrap();

        let steps = load_script(file.path()).unwrap();
        assert_eq!(steps, vec![Step::Tick { ms: 100 }]);
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = load_script(&path).unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }
}
