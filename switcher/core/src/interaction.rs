//! Swipe Interaction
//!
//! Turns a horizontal pan on a screen into a percent-driven tab transition.
//! One instance is shared by both screens, but it holds at most one
//! [session](InteractiveSession) at a time: a second `Began` while a session
//! is open is refused rather than stealing the target.
//!
//! | Phase       | Effect                                                        |
//! |-------------|---------------------------------------------------------------|
//! | `Began`     | open session; move selection +1 (leftward) or -1 (otherwise)  |
//! | `Changed`   | progress = clamp(\|dx\| / width); complete if > threshold     |
//! | `Cancelled` | close session; cancel                                         |
//! | `Ended`     | close session; finish if past threshold, else cancel          |
//! | other       | ignored                                                       |

use serde::{Deserialize, Serialize};

use crate::config::NavigatorConfig;
use crate::geometry::Point;
use crate::screen::ScreenId;

/// Recognizer phase of a pan gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    /// Touch down, not yet recognized
    Possible,
    /// Recognized as a pan
    Began,
    /// Finger moved
    Changed,
    /// Finger lifted
    Ended,
    /// System cancelled the gesture
    Cancelled,
    /// Recognition failed
    Failed,
}

/// One pan callback from the host
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanGesture {
    /// Recognizer phase
    pub phase: GesturePhase,
    /// Total translation since the gesture began
    pub translation: Point,
    /// Current velocity (units per second)
    pub velocity: Point,
}

impl PanGesture {
    /// Convenience constructor for horizontal-only pans
    #[must_use]
    pub fn horizontal(phase: GesturePhase, translation_x: f32, velocity_x: f32) -> Self {
        Self {
            phase,
            translation: Point::new(translation_x, 0.0),
            velocity: Point::new(velocity_x, 0.0),
        }
    }
}

/// What the owner of the interaction must do in response to a pan event
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwipeCommand {
    /// Start a transition by moving the selection by `delta`
    Begin {
        /// +1 for a right-to-left swipe, -1 otherwise
        delta: isize,
    },
    /// Update the percent-driven transition
    Update {
        /// Completion fraction, 0.0 to 1.0
        progress: f32,
    },
    /// Run the transition to its end
    Finish,
    /// Reverse the transition to where it started
    Cancel,
    /// Nothing to do
    Ignore,
}

/// Progress of a horizontal drag across a screen of `width`
#[must_use]
pub fn swipe_progress(translation_x: f32, width: f32) -> f32 {
    if width <= 0.0 || !width.is_finite() {
        return 0.0;
    }
    (translation_x / width).abs().clamp(0.0, 1.0)
}

/// The open interactive session
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractiveSession {
    /// Screen the drag started on
    pub screen: ScreenId,
    /// Latest progress
    pub progress: f32,
    /// Whether release would finish the transition
    pub should_complete: bool,
}

/// Shared swipe-to-switch interaction controller
#[derive(Clone, Debug)]
pub struct SwipeInteraction {
    completion_threshold: f32,
    wired: Vec<ScreenId>,
    session: Option<InteractiveSession>,
}

impl Default for SwipeInteraction {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_COMPLETION_THRESHOLD)
    }
}

impl SwipeInteraction {
    /// Create with a completion threshold (release completes when progress
    /// is strictly greater)
    #[must_use]
    pub fn new(completion_threshold: f32) -> Self {
        Self {
            completion_threshold,
            wired: Vec::new(),
            session: None,
        }
    }

    /// Create from configuration
    #[must_use]
    pub fn from_config(config: &NavigatorConfig) -> Self {
        Self::new(config.completion_threshold)
    }

    /// Accept pans from `screen`
    ///
    /// The host attaches the recognizer; this only records the screen as a
    /// valid gesture source.
    pub fn wire_to_screen(&mut self, screen: ScreenId) {
        if !self.wired.contains(&screen) {
            self.wired.push(screen);
        }
    }

    /// Whether pans from `screen` are accepted
    #[must_use]
    pub fn is_wired(&self, screen: ScreenId) -> bool {
        self.wired.contains(&screen)
    }

    /// Whether a drag is steering a transition
    #[must_use]
    pub fn interaction_in_progress(&self) -> bool {
        self.session.is_some()
    }

    /// The open session, if any
    #[must_use]
    pub fn session(&self) -> Option<&InteractiveSession> {
        self.session.as_ref()
    }

    /// Release threshold
    #[must_use]
    pub fn completion_threshold(&self) -> f32 {
        self.completion_threshold
    }

    /// Feed one pan event from `screen`, whose width scales the progress
    pub fn handle(&mut self, screen: ScreenId, gesture: &PanGesture, width: f32) -> SwipeCommand {
        match gesture.phase {
            GesturePhase::Began => self.begin(screen, gesture),
            GesturePhase::Changed => {
                let threshold = self.completion_threshold;
                let Some(session) = self.session_for(screen) else {
                    return SwipeCommand::Ignore;
                };
                let progress = swipe_progress(gesture.translation.x, width);
                session.progress = progress;
                session.should_complete = progress > threshold;
                tracing::trace!(
                    %screen,
                    progress,
                    right_to_left = gesture.velocity.x < 0.0,
                    "Swipe progress"
                );
                SwipeCommand::Update { progress }
            }
            GesturePhase::Cancelled => {
                if self.session_for(screen).is_none() {
                    return SwipeCommand::Ignore;
                }
                self.session = None;
                SwipeCommand::Cancel
            }
            GesturePhase::Ended => {
                let Some(session) = self.session_for(screen).copied() else {
                    return SwipeCommand::Ignore;
                };
                self.session = None;
                if session.should_complete {
                    SwipeCommand::Finish
                } else {
                    SwipeCommand::Cancel
                }
            }
            GesturePhase::Possible | GesturePhase::Failed => {
                tracing::debug!(%screen, phase = ?gesture.phase, "Unhandled gesture phase");
                SwipeCommand::Ignore
            }
        }
    }

    /// Close a session whose `Begin` could not be honoured
    pub fn abandon(&mut self) {
        self.session = None;
    }

    fn begin(&mut self, screen: ScreenId, gesture: &PanGesture) -> SwipeCommand {
        if !self.is_wired(screen) {
            tracing::warn!(%screen, "Pan from a screen that was never wired");
            return SwipeCommand::Ignore;
        }
        if let Some(active) = &self.session {
            tracing::warn!(
                %screen,
                active = %active.screen,
                "Refusing second swipe while one is in progress"
            );
            return SwipeCommand::Ignore;
        }

        self.session = Some(InteractiveSession {
            screen,
            progress: 0.0,
            should_complete: false,
        });

        let delta = if gesture.velocity.x < 0.0 { 1 } else { -1 };
        SwipeCommand::Begin { delta }
    }

    fn session_for(&mut self, screen: ScreenId) -> Option<&mut InteractiveSession> {
        self.session.as_mut().filter(|s| s.screen == screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WIDTH: f32 = 320.0;

    fn wired() -> SwipeInteraction {
        let mut interaction = SwipeInteraction::default();
        interaction.wire_to_screen(ScreenId(0));
        interaction.wire_to_screen(ScreenId(1));
        interaction
    }

    fn pan(phase: GesturePhase, dx: f32, vx: f32) -> PanGesture {
        PanGesture::horizontal(phase, dx, vx)
    }

    #[test]
    fn test_progress_clamps() {
        assert!((swipe_progress(2.0 * WIDTH, WIDTH) - 1.0).abs() < f32::EPSILON);
        assert!(swipe_progress(0.0, WIDTH).abs() < f32::EPSILON);
        assert!((swipe_progress(-160.0, WIDTH) - 0.5).abs() < f32::EPSILON);
        assert!(swipe_progress(100.0, 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_began_direction_from_velocity() {
        let mut interaction = wired();
        let cmd = interaction.handle(ScreenId(0), &pan(GesturePhase::Began, 0.0, -50.0), WIDTH);
        assert_eq!(cmd, SwipeCommand::Begin { delta: 1 });
        assert!(interaction.interaction_in_progress());

        let mut interaction = wired();
        let cmd = interaction.handle(ScreenId(0), &pan(GesturePhase::Began, 0.0, 50.0), WIDTH);
        assert_eq!(cmd, SwipeCommand::Begin { delta: -1 });

        // Zero velocity is not right-to-left
        let mut interaction = wired();
        let cmd = interaction.handle(ScreenId(0), &pan(GesturePhase::Began, 0.0, 0.0), WIDTH);
        assert_eq!(cmd, SwipeCommand::Begin { delta: -1 });
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut interaction = wired();
        interaction.handle(ScreenId(0), &pan(GesturePhase::Began, 0.0, -10.0), WIDTH);

        interaction.handle(ScreenId(0), &pan(GesturePhase::Changed, -160.0, -10.0), WIDTH);
        assert!(!interaction.session().unwrap().should_complete);
        assert_eq!(
            interaction.handle(ScreenId(0), &pan(GesturePhase::Ended, -160.0, 0.0), WIDTH),
            SwipeCommand::Cancel
        );

        interaction.handle(ScreenId(0), &pan(GesturePhase::Began, 0.0, -10.0), WIDTH);
        interaction.handle(
            ScreenId(0),
            &pan(GesturePhase::Changed, -0.500_01 * WIDTH, -10.0),
            WIDTH,
        );
        assert!(interaction.session().unwrap().should_complete);
        assert_eq!(
            interaction.handle(ScreenId(0), &pan(GesturePhase::Ended, -170.0, 0.0), WIDTH),
            SwipeCommand::Finish
        );
        assert!(!interaction.interaction_in_progress());
    }

    #[test]
    fn test_cancel_closes_session() {
        let mut interaction = wired();
        interaction.handle(ScreenId(1), &pan(GesturePhase::Began, 0.0, 10.0), WIDTH);
        interaction.handle(ScreenId(1), &pan(GesturePhase::Changed, 300.0, 10.0), WIDTH);
        assert_eq!(
            interaction.handle(ScreenId(1), &pan(GesturePhase::Cancelled, 300.0, 0.0), WIDTH),
            SwipeCommand::Cancel
        );
        assert!(!interaction.interaction_in_progress());
    }

    #[test]
    fn test_second_begin_is_refused() {
        let mut interaction = wired();
        interaction.handle(ScreenId(0), &pan(GesturePhase::Began, 0.0, -10.0), WIDTH);
        let cmd = interaction.handle(ScreenId(1), &pan(GesturePhase::Began, 0.0, 10.0), WIDTH);
        assert_eq!(cmd, SwipeCommand::Ignore);
        assert_eq!(interaction.session().unwrap().screen, ScreenId(0));

        // Events from the other screen do not touch the session
        let cmd = interaction.handle(ScreenId(1), &pan(GesturePhase::Changed, 300.0, 10.0), WIDTH);
        assert_eq!(cmd, SwipeCommand::Ignore);
        assert!(interaction.session().unwrap().progress.abs() < f32::EPSILON);
    }

    #[test]
    fn test_unwired_and_unhandled_are_ignored() {
        let mut interaction = SwipeInteraction::default();
        let cmd = interaction.handle(ScreenId(0), &pan(GesturePhase::Began, 0.0, -10.0), WIDTH);
        assert_eq!(cmd, SwipeCommand::Ignore);

        let mut interaction = wired();
        for phase in [GesturePhase::Possible, GesturePhase::Failed] {
            assert_eq!(
                interaction.handle(ScreenId(0), &pan(phase, 0.0, 0.0), WIDTH),
                SwipeCommand::Ignore
            );
        }
        // Changed/Ended without a session
        assert_eq!(
            interaction.handle(ScreenId(0), &pan(GesturePhase::Changed, 10.0, 0.0), WIDTH),
            SwipeCommand::Ignore
        );
        assert_eq!(
            interaction.handle(ScreenId(0), &pan(GesturePhase::Ended, 10.0, 0.0), WIDTH),
            SwipeCommand::Ignore
        );
    }
}
