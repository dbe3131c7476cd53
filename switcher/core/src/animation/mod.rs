//! Slide Transition Animator
//!
//! Moves the outgoing screen off one edge while the incoming screen slides
//! into the slot it vacates. The animator does not render anything: it
//! places the views in the host's transition container, sets the incoming
//! view's starting frame, and hands the host a [`SlidePlan`] to play.
//!
//! # Lifecycle
//!
//! ```text
//!   Idle ──animate()──► Animating ──animation_finished()──► Idle
//! ```
//!
//! A timed run has no cancellation path. When the same plan is driven by the
//! swipe interaction instead, the interaction decides whether the host
//! finishes or cancels, and the completion report reflects that.

mod timing;

pub use timing::{EasingFunction, SlideAnimation};

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::NavigatorConfig;
use crate::error::TransitionError;
use crate::geometry::Rect;

/// Which way the tabs slide
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Destination index is greater: content moves right to left
    #[default]
    Forward,
    /// Destination index is smaller: content moves left to right
    Backward,
}

impl Direction {
    /// Direction for a switch between two tab indices
    #[must_use]
    pub fn between(from_index: usize, to_index: usize) -> Self {
        if to_index > from_index {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    /// Whether this is [`Direction::Forward`]
    #[must_use]
    pub fn is_forward(self) -> bool {
        matches!(self, Self::Forward)
    }
}

/// Role of a view within a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKey {
    /// The screen being left
    From,
    /// The screen being shown
    To,
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => write!(f, "from"),
            Self::To => write!(f, "to"),
        }
    }
}

/// Host-assigned handle for a view taking part in a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(pub u32);

/// The host's side of a running transition
///
/// Mirrors what a platform transition context offers: the participating
/// views, a container to put them in, and a way to report completion.
pub trait TransitionContext {
    /// View for the given role, if the host supplied one
    fn view(&self, key: ViewKey) -> Option<ViewId>;

    /// Current frame of a view
    fn frame(&self, view: ViewId) -> Rect;

    /// Move a view
    fn set_frame(&mut self, view: ViewId, frame: Rect);

    /// Insert a view into the transition container (later inserts on top)
    fn add_to_container(&mut self, view: ViewId);

    /// Whether a percent-driven interaction is steering this transition
    fn is_interactive(&self) -> bool;

    /// Whether the interaction cancelled the transition
    fn transition_was_cancelled(&self) -> bool;

    /// Tell the host the transition is over
    fn complete_transition(&mut self, completed: bool);
}

/// Frames for both views at one instant of a slide
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlideFrames {
    /// Frame of the outgoing view
    pub from: Rect,
    /// Frame of the incoming view
    pub to: Rect,
}

/// Everything a host needs to play one slide
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlidePlan {
    /// Outgoing view
    pub from_view: ViewId,
    /// Incoming view
    pub to_view: ViewId,
    /// Slide direction
    pub direction: Direction,
    /// Where both views start
    pub start: SlideFrames,
    /// Where both views end
    pub end: SlideFrames,
    /// Timed run length
    pub duration: Duration,
    /// Curve for timed runs
    pub easing: EasingFunction,
}

impl SlidePlan {
    /// Frames at linear progress `t` (0.0 = start, 1.0 = end)
    ///
    /// Interactive hosts pass gesture progress directly; timed hosts pass
    /// [`SlideAnimation::progress`], which already has easing applied.
    #[must_use]
    pub fn frames_at(&self, t: f32) -> SlideFrames {
        SlideFrames {
            from: Rect::lerp(self.start.from, self.end.from, t),
            to: Rect::lerp(self.start.to, self.end.to, t),
        }
    }

    /// Write the frames at progress `t` into the transition context
    pub fn apply_at(&self, ctx: &mut dyn TransitionContext, t: f32) {
        let frames = self.frames_at(t);
        ctx.set_frame(self.from_view, frames.from);
        ctx.set_frame(self.to_view, frames.to);
    }

    /// A timed player for this plan
    #[must_use]
    pub fn timed(&self) -> SlideAnimation {
        SlideAnimation::new(self.duration, self.easing)
    }
}

/// Compute start and end frames for a slide out of `visible`
///
/// Forward: incoming starts one width to the right, outgoing ends one width
/// to the left. Backward mirrors both.
#[must_use]
pub fn slide_frames(visible: Rect, direction: Direction) -> (SlideFrames, SlideFrames) {
    let width = visible.width;
    let (to_start, from_end) = match direction {
        Direction::Forward => (visible.offset_x(width), visible.offset_x(-width)),
        Direction::Backward => (visible.offset_x(-width), visible.offset_x(width)),
    };

    (
        SlideFrames {
            from: visible,
            to: to_start,
        },
        SlideFrames {
            from: from_end,
            to: visible,
        },
    )
}

/// Animator state
#[derive(Clone, Debug, Default)]
enum SlideState {
    #[default]
    Idle,
    Animating(SlidePlan),
}

/// The shared slide animator
///
/// The tab switch controller owns one of these and sets its direction each
/// time the host asks for an animator.
#[derive(Clone, Debug)]
pub struct SlideTransition {
    direction: Direction,
    duration: Duration,
    easing: EasingFunction,
    state: SlideState,
}

impl Default for SlideTransition {
    fn default() -> Self {
        Self::new(Duration::from_millis(700), EasingFunction::default())
    }
}

impl SlideTransition {
    /// Create an idle animator
    #[must_use]
    pub fn new(duration: Duration, easing: EasingFunction) -> Self {
        Self {
            direction: Direction::Forward,
            duration,
            easing,
            state: SlideState::Idle,
        }
    }

    /// Create an animator from configuration
    #[must_use]
    pub fn from_config(config: &NavigatorConfig) -> Self {
        Self::new(config.animation_duration, config.easing)
    }

    /// Current direction
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Set the direction for the next `animate`
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Length of a timed run
    #[must_use]
    pub fn transition_duration(&self) -> Duration {
        self.duration
    }

    /// Whether a slide is in flight
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.state, SlideState::Animating(_))
    }

    /// Plan of the slide in flight
    #[must_use]
    pub fn current_plan(&self) -> Option<&SlidePlan> {
        match &self.state {
            SlideState::Animating(plan) => Some(plan),
            SlideState::Idle => None,
        }
    }

    /// Begin a slide in the given context
    ///
    /// Inserts "from" then "to" into the container, moves "to" to its
    /// off-screen start frame and returns the plan for the host to play.
    ///
    /// # Errors
    ///
    /// [`TransitionError::MissingView`] if the context lacks either view,
    /// [`TransitionError::AlreadyAnimating`] if a slide is still running.
    pub fn animate(&mut self, ctx: &mut dyn TransitionContext) -> Result<SlidePlan, TransitionError> {
        if self.is_animating() {
            return Err(TransitionError::AlreadyAnimating);
        }

        let from_view = ctx
            .view(ViewKey::From)
            .ok_or(TransitionError::MissingView(ViewKey::From))?;
        let to_view = ctx
            .view(ViewKey::To)
            .ok_or(TransitionError::MissingView(ViewKey::To))?;

        ctx.add_to_container(from_view);
        ctx.add_to_container(to_view);

        let visible = ctx.frame(from_view);
        let (start, end) = slide_frames(visible, self.direction);
        ctx.set_frame(to_view, start.to);

        let plan = SlidePlan {
            from_view,
            to_view,
            direction: self.direction,
            start,
            end,
            duration: self.duration,
            easing: self.easing,
        };

        tracing::debug!(
            direction = ?self.direction,
            duration_ms = self.duration.as_millis() as u64,
            interactive = ctx.is_interactive(),
            "Slide transition started"
        );

        self.state = SlideState::Animating(plan.clone());
        Ok(plan)
    }

    /// The host finished playing the plan
    ///
    /// Timed runs always report "not cancelled". Interactive runs report
    /// whatever the interaction decided. Returns the value reported.
    pub fn animation_finished(&mut self, ctx: &mut dyn TransitionContext) -> bool {
        let SlideState::Animating(plan) = std::mem::take(&mut self.state) else {
            tracing::warn!("Slide completion reported with no slide running");
            return false;
        };

        let completed = if ctx.is_interactive() {
            !ctx.transition_was_cancelled()
        } else {
            true
        };

        if completed {
            plan.apply_at(ctx, 1.0);
        } else {
            plan.apply_at(ctx, 0.0);
        }

        tracing::debug!(completed, direction = ?plan.direction, "Slide transition finished");
        ctx.complete_transition(completed);
        completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_between_indices() {
        assert_eq!(Direction::between(0, 1), Direction::Forward);
        assert_eq!(Direction::between(1, 0), Direction::Backward);
        // Same index counts as backward (not greater)
        assert_eq!(Direction::between(1, 1), Direction::Backward);
    }

    #[test]
    fn test_forward_frames() {
        let visible = Rect::new(0.0, 0.0, 320.0, 568.0);
        let (start, end) = slide_frames(visible, Direction::Forward);

        assert_eq!(start.from, visible);
        assert_eq!(start.to, Rect::new(320.0, 0.0, 320.0, 568.0));
        assert_eq!(end.from, Rect::new(-320.0, 0.0, 320.0, 568.0));
        assert_eq!(end.to, visible);
    }

    #[test]
    fn test_backward_frames_mirror_forward() {
        let visible = Rect::new(0.0, 0.0, 320.0, 568.0);
        let (start, end) = slide_frames(visible, Direction::Backward);

        assert_eq!(start.to, Rect::new(-320.0, 0.0, 320.0, 568.0));
        assert_eq!(end.from, Rect::new(320.0, 0.0, 320.0, 568.0));
        assert_eq!(end.to, visible);
    }

    #[test]
    fn test_plan_midpoint() {
        let visible = Rect::new(0.0, 0.0, 100.0, 50.0);
        let (start, end) = slide_frames(visible, Direction::Forward);
        let plan = SlidePlan {
            from_view: ViewId(0),
            to_view: ViewId(1),
            direction: Direction::Forward,
            start,
            end,
            duration: Duration::from_millis(700),
            easing: EasingFunction::Linear,
        };

        let mid = plan.frames_at(0.5);
        assert!((mid.from.x + 50.0).abs() < f32::EPSILON);
        assert!((mid.to.x - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_default_duration_is_seven_tenths() {
        assert_eq!(
            SlideTransition::default().transition_duration(),
            Duration::from_millis(700)
        );
    }
}
