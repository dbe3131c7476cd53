//! Replay runner
//!
//! Plays the host side of the protocol: feed a step to the controller,
//! drain the recorded host calls, and drive the stage from them.

use serde::Serialize;
use tracing::{debug, warn};

use tabswitch_core::{
    view_for, Direction, HostCall, NavigatorConfig, Rect, RecordingHost, Screen, ScreenId,
    SlideOutcome, TabSwitchController, TransitionStage,
};

use crate::script::Step;

/// Playback frame length in milliseconds
pub const FRAME_MS: u32 = 16;

/// Upper bound on frames for a `settle` step
const MAX_SETTLE_FRAMES: u32 = 10_000;

/// Screens the replay registers, in tab order
pub const SCREENS: [ScreenId; 2] = [ScreenId(0), ScreenId(1)];

/// Observable state after one step
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub step: usize,
    pub event: &'static str,
    pub selected: usize,
    pub committed: usize,
    pub header_y: f32,
    pub header: Rect,
    pub direction: Direction,
    pub animating: bool,
    pub scrubbing: bool,
    pub frames: Vec<ScreenFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<SlideOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub host_calls: Vec<HostCall>,
}

/// A screen's frame on the stage
#[derive(Debug, Serialize)]
pub struct ScreenFrame {
    pub screen: ScreenId,
    pub frame: Rect,
}

/// Controller plus headless stage
pub struct Replay {
    controller: TabSwitchController<RecordingHost>,
    stage: TransitionStage,
    steps_run: usize,
}

impl Replay {
    /// Create a replay over a `width` x `height` content area
    pub fn new(config: NavigatorConfig, width: f32, height: f32) -> Self {
        let bounds = Rect::new(0.0, 0.0, width, height);
        let mut controller = TabSwitchController::new(RecordingHost::new(), config, width);
        controller.initialize(SCREENS.map(|id| Screen::new(id, bounds)));

        let mut stage = TransitionStage::new();
        stage.add_view(view_for(SCREENS[0]), bounds);
        stage.add_view(view_for(SCREENS[1]), bounds.offset_x(width));

        Self {
            controller,
            stage,
            steps_run: 0,
        }
    }

    /// The controller
    pub fn controller(&self) -> &TabSwitchController<RecordingHost> {
        &self.controller
    }

    /// Calls recorded since the last step (setup calls before the first)
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        self.controller.host_mut().drain()
    }

    /// Run one step and capture the resulting state
    pub fn apply(&mut self, step: &Step) -> anyhow::Result<Snapshot> {
        let mut calls = Vec::new();
        let mut outcome = None;

        match step {
            Step::Tap => {
                if self.stage.is_active() {
                    debug!("Tap while a slide is playing, ignoring");
                } else {
                    self.controller.toggle_tab()?;
                }
            }
            Step::Scroll { screen, offset } => {
                self.controller.screen_scrolled(ScreenId(*screen), *offset)?;
            }
            Step::Appear { screen } => {
                self.controller.screen_appeared(ScreenId(*screen))?;
            }
            Step::Pan { .. } => {
                if let (Some(screen), Some(gesture)) = (step.screen(), step.gesture()) {
                    self.controller.handle_pan(screen, &gesture)?;
                }
            }
            Step::Tick { ms } => {
                self.pump(&mut calls);
                let mut remaining = *ms;
                while remaining > 0 {
                    let delta = remaining.min(FRAME_MS);
                    remaining -= delta;
                    outcome = outcome.or(self.advance(delta, &mut calls)?);
                }
            }
            Step::Settle => {
                self.pump(&mut calls);
                let mut frames = 0;
                while self.stage.is_active() && !self.stage.is_scrubbing() {
                    if frames == MAX_SETTLE_FRAMES {
                        anyhow::bail!("Slide did not settle after {frames} frames");
                    }
                    outcome = outcome.or(self.advance(FRAME_MS, &mut calls)?);
                    frames += 1;
                }
            }
        }

        self.pump(&mut calls);
        self.steps_run += 1;
        Ok(self.snapshot(step.name(), outcome, calls))
    }

    /// Tick the stage and tell the visible screen it appeared
    fn advance(
        &mut self,
        delta_ms: u32,
        calls: &mut Vec<HostCall>,
    ) -> anyhow::Result<Option<SlideOutcome>> {
        let outcome = self.stage.tick(&mut self.controller, delta_ms);
        if let Some(outcome) = outcome {
            debug!(?outcome, "Slide ended");
            self.controller.screen_appeared(outcome.visible)?;
            self.pump(calls);
        }
        Ok(outcome)
    }

    /// Act on pending host calls
    fn pump(&mut self, calls: &mut Vec<HostCall>) {
        for call in self.controller.host_mut().drain() {
            match call {
                HostCall::SelectionChanged(change) => {
                    if let Err(e) = self.stage.start(&mut self.controller, change) {
                        warn!(error = %e, ?change, "Could not start slide");
                    }
                }
                HostCall::UpdateInteractive(percent) => self.stage.scrub(percent),
                HostCall::FinishInteractive => self.stage.finish_interactive(),
                HostCall::CancelInteractive => self.stage.cancel_interactive(),
                _ => {}
            }
            calls.push(call);
        }
    }

    fn snapshot(
        &self,
        event: &'static str,
        outcome: Option<SlideOutcome>,
        host_calls: Vec<HostCall>,
    ) -> Snapshot {
        let frames = SCREENS
            .iter()
            .filter_map(|&screen| {
                self.stage
                    .frame_of(view_for(screen))
                    .map(|frame| ScreenFrame { screen, frame })
            })
            .collect();

        Snapshot {
            step: self.steps_run,
            event,
            selected: self.controller.selected_index(),
            committed: self.controller.committed_index(),
            header_y: self.controller.last_offset(),
            header: self.controller.header().frame(),
            direction: self.controller.animator().direction(),
            animating: self.stage.is_active(),
            scrubbing: self.stage.is_scrubbing(),
            frames,
            outcome,
            host_calls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;
    use pretty_assertions::assert_eq;
    use tabswitch_core::GesturePhase;

    fn replay() -> Replay {
        let mut replay = Replay::new(NavigatorConfig::default(), 320.0, 568.0);
        replay.take_calls();
        replay
    }

    fn run(replay: &mut Replay, script: &str) -> Vec<Snapshot> {
        parse_script(script)
            .unwrap()
            .iter()
            .map(|step| replay.apply(step).unwrap())
            .collect()
    }

    #[test]
    fn test_scroll_steps_move_header() {
        let mut replay = replay();
        let snaps = run(
            &mut replay,
            r#"[
                {"step": "scroll", "screen": 0, "offset": 0},
                {"step": "scroll", "screen": 0, "offset": -30},
                {"step": "scroll", "screen": 0, "offset": -80},
                {"step": "scroll", "screen": 0, "offset": 10}
            ]"#,
        );
        let ys: Vec<f32> = snaps.iter().map(|s| s.header_y).collect();
        assert_eq!(ys, vec![100.0, 70.0, 20.0, -10.0]);
        assert_eq!(snaps[3].step, 4);
    }

    #[test]
    fn test_tap_then_settle_switches_tabs() {
        let mut replay = replay();
        let snaps = run(&mut replay, r#"[{"step": "tap"}, {"step": "settle"}]"#);

        assert!(snaps[0].animating);
        assert_eq!(snaps[0].direction, Direction::Forward);
        assert_eq!(
            snaps[1].outcome,
            Some(SlideOutcome {
                completed: true,
                visible: ScreenId(1)
            })
        );
        assert!(!snaps[1].animating);
        assert_eq!(snaps[1].frames[1].frame, Rect::new(0.0, 0.0, 320.0, 568.0));
        assert_eq!(snaps[1].frames[0].frame, Rect::new(-320.0, 0.0, 320.0, 568.0));
    }

    #[test]
    fn test_tap_during_slide_is_ignored() {
        let mut replay = replay();
        let snaps = run(
            &mut replay,
            r#"[{"step": "tap"}, {"step": "tick", "ms": 100}, {"step": "tap"}]"#,
        );
        assert_eq!(snaps[2].selected, 1);
        assert!(snaps[2].host_calls.is_empty());
    }

    #[test]
    fn test_short_swipe_cancels() {
        let mut replay = replay();
        let snaps = run(
            &mut replay,
            r#"[
                {"step": "pan", "screen": 0, "phase": "began", "velocity_x": -50},
                {"step": "pan", "screen": 0, "phase": "changed", "translation_x": -64},
                {"step": "pan", "screen": 0, "phase": "ended", "translation_x": -64},
                {"step": "settle"}
            ]"#,
        );

        assert_eq!(snaps[0].selected, 1);
        assert!(snaps[1].scrubbing);
        assert_eq!(snaps[2].selected, 0);
        assert_eq!(
            snaps[3].outcome,
            Some(SlideOutcome {
                completed: false,
                visible: ScreenId(0)
            })
        );
        assert_eq!(replay.controller().committed_index(), 0);
    }

    #[test]
    fn test_long_swipe_commits() {
        let mut replay = replay();
        for (phase, tx) in [
            (GesturePhase::Began, 0.0),
            (GesturePhase::Changed, -250.0),
            (GesturePhase::Ended, -250.0),
        ] {
            replay
                .apply(&Step::Pan {
                    screen: 0,
                    phase,
                    translation_x: tx,
                    velocity_x: -50.0,
                })
                .unwrap();
        }
        let last = replay.apply(&Step::Settle).unwrap();

        assert_eq!(last.outcome.map(|o| o.completed), Some(true));
        assert_eq!(last.committed, 1);
    }

    #[test]
    fn test_swipe_during_tap_slide_keeps_tab_in_sync() {
        let mut replay = replay();
        let snaps = run(
            &mut replay,
            r#"[
                {"step": "tap"},
                {"step": "tick", "ms": 100},
                {"step": "pan", "screen": 1, "phase": "began", "velocity_x": 50},
                {"step": "pan", "screen": 1, "phase": "changed", "translation_x": 250, "velocity_x": 50},
                {"step": "pan", "screen": 1, "phase": "ended", "translation_x": 250, "velocity_x": 50},
                {"step": "settle"}
            ]"#,
        );

        assert!(snaps[2..5].iter().all(|s| s.host_calls.is_empty()));
        assert!(snaps[2..5].iter().all(|s| !s.scrubbing));
        assert_eq!(
            snaps[5].outcome,
            Some(SlideOutcome {
                completed: true,
                visible: ScreenId(1)
            })
        );
        assert_eq!(snaps[5].committed, 1);
        assert_eq!(snaps[5].selected, 1);
    }

    #[test]
    fn test_unknown_screen_fails_step() {
        let mut replay = replay();
        let step = Step::Scroll {
            screen: 9,
            offset: 0.0,
        };
        assert!(replay.apply(&step).is_err());
    }
}
