//! Headless Transition Stage
//!
//! An in-memory [`TransitionContext`] plus the playback loop a host runs
//! around it. Surfaces without a platform transition engine (the terminal
//! surface, the replay tool, tests) use this to play slides:
//!
//! ```text
//! SelectionChanged ──start()──► Timed ──tick()…──────────────► done
//!                          └──► Interactive ──scrub()…
//!                                   ├─finish()──► Settling ──tick()…► done
//!                                   └─cancel()──► Settling ──tick()…► done
//! ```
//!
//! When a slide is done the stage reports completion through the shared
//! animator, and [`tick`](TransitionStage::tick) returns the outcome so the
//! host can tell the newly visible screen it appeared.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::{
    EasingFunction, SlideAnimation, SlidePlan, TransitionContext, ViewId, ViewKey,
};
use crate::controller::TabSwitchController;
use crate::error::TransitionError;
use crate::geometry::Rect;
use crate::host::NavigationHost;
use crate::screen::ScreenId;
use crate::selection::SelectionChange;

/// View handle the stage uses for a screen's root view
#[must_use]
pub fn view_for(screen: ScreenId) -> ViewId {
    ViewId(screen.0)
}

/// How a finished slide ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideOutcome {
    /// Whether the destination is now showing
    pub completed: bool,
    /// Screen visible after the slide
    pub visible: ScreenId,
}

#[derive(Clone, Debug)]
enum Playback {
    Idle,
    Timed {
        plan: SlidePlan,
        anim: SlideAnimation,
    },
    Interactive {
        plan: SlidePlan,
        percent: f32,
    },
    Settling {
        plan: SlidePlan,
        from_t: f32,
        to_t: f32,
        anim: SlideAnimation,
    },
}

/// In-memory transition context and slide player
#[derive(Clone, Debug)]
pub struct TransitionStage {
    frames: HashMap<ViewId, Rect>,
    container: Vec<ViewId>,
    from: Option<ViewId>,
    to: Option<ViewId>,
    screens: Option<(ScreenId, ScreenId)>,
    interactive: bool,
    cancelled: bool,
    completion: Option<bool>,
    playback: Playback,
}

impl Default for TransitionStage {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionStage {
    /// Create an empty stage
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: HashMap::new(),
            container: Vec::new(),
            from: None,
            to: None,
            screens: None,
            interactive: false,
            cancelled: false,
            completion: None,
            playback: Playback::Idle,
        }
    }

    /// Register a view and its current frame
    pub fn add_view(&mut self, view: ViewId, frame: Rect) {
        self.frames.insert(view, frame);
    }

    /// Current frame of a view
    #[must_use]
    pub fn frame_of(&self, view: ViewId) -> Option<Rect> {
        self.frames.get(&view).copied()
    }

    /// Container contents, bottom to top
    #[must_use]
    pub fn container(&self) -> &[ViewId] {
        &self.container
    }

    /// Completion reported for the last slide
    #[must_use]
    pub fn completion(&self) -> Option<bool> {
        self.completion
    }

    /// Whether a slide is in progress
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.playback, Playback::Idle)
    }

    /// Whether a swipe is currently scrubbing the slide
    #[must_use]
    pub fn is_scrubbing(&self) -> bool {
        matches!(self.playback, Playback::Interactive { .. })
    }

    /// Mark the roles for the next transition
    ///
    /// Low-level; [`start`](Self::start) does this for a selection change.
    pub fn prepare(&mut self, from: Option<ViewId>, to: Option<ViewId>, interactive: bool) {
        self.from = from;
        self.to = to;
        self.interactive = interactive;
        self.cancelled = false;
        self.completion = None;
        self.container.clear();
    }

    /// Begin playing a selection change announced by the controller
    ///
    /// # Errors
    ///
    /// [`TransitionError::AlreadyAnimating`] while a slide is still playing,
    /// plus the animator's precondition errors. A change naming a tab
    /// with no registered screen surfaces as a missing view.
    pub fn start<H: NavigationHost>(
        &mut self,
        controller: &mut TabSwitchController<H>,
        change: SelectionChange,
    ) -> Result<(), TransitionError> {
        if self.is_active() {
            return Err(TransitionError::AlreadyAnimating);
        }
        let from = controller.screen_at(change.from).map(|s| s.id());
        let to = controller.screen_at(change.to).map(|s| s.id());
        let interactive = change.interactive;

        self.prepare(from.map(view_for), to.map(view_for), interactive);
        let (Some(from), Some(to)) = (from, to) else {
            let key = if from.is_none() { ViewKey::From } else { ViewKey::To };
            return Err(TransitionError::MissingView(key));
        };

        let plan = controller.animator_for_transition(from, to).animate(self)?;
        self.screens = Some((from, to));

        self.playback = if interactive {
            Playback::Interactive { plan, percent: 0.0 }
        } else {
            let mut anim = plan.timed();
            anim.play();
            Playback::Timed { plan, anim }
        };
        Ok(())
    }

    /// Scrub an interactive slide to `percent`
    pub fn scrub(&mut self, percent: f32) {
        let plan = match &mut self.playback {
            Playback::Interactive { plan, percent: p } => {
                *p = percent.clamp(0.0, 1.0);
                plan.clone()
            }
            _ => return,
        };
        plan.apply_at(self, percent);
    }

    /// Let an interactive slide run to its end
    pub fn finish_interactive(&mut self) {
        self.settle(1.0);
    }

    /// Reverse an interactive slide to its start
    pub fn cancel_interactive(&mut self) {
        if self.is_scrubbing() {
            self.cancelled = true;
            self.settle(0.0);
        }
    }

    fn settle(&mut self, target: f32) {
        if !self.is_scrubbing() {
            return;
        }
        let Playback::Interactive { plan, percent } =
            std::mem::replace(&mut self.playback, Playback::Idle)
        else {
            return;
        };

        let remaining = (target - percent).abs();
        let duration = Duration::from_secs_f32(plan.duration.as_secs_f32() * remaining);
        let mut anim = SlideAnimation::new(duration, EasingFunction::EaseOut);
        anim.play();

        self.playback = Playback::Settling {
            plan,
            from_t: percent,
            to_t: target,
            anim,
        };
    }

    /// Advance playback by `delta_ms`
    ///
    /// Returns the outcome on the tick that ends the slide.
    pub fn tick<H: NavigationHost>(
        &mut self,
        controller: &mut TabSwitchController<H>,
        delta_ms: u32,
    ) -> Option<SlideOutcome> {
        let (plan, t, done) = match &mut self.playback {
            Playback::Idle | Playback::Interactive { .. } => return None,
            Playback::Timed { plan, anim } => {
                let done = anim.update(delta_ms);
                (plan.clone(), anim.progress(), done)
            }
            Playback::Settling {
                plan,
                from_t,
                to_t,
                anim,
            } => {
                let done = anim.update(delta_ms);
                let t = *from_t + (*to_t - *from_t) * anim.progress();
                (plan.clone(), t, done)
            }
        };

        plan.apply_at(self, t);
        if !done {
            return None;
        }

        self.playback = Playback::Idle;
        let completed = controller.animator_mut().animation_finished(self);
        let (from, to) = self.screens.take()?;
        Some(SlideOutcome {
            completed,
            visible: if completed { to } else { from },
        })
    }
}

impl TransitionContext for TransitionStage {
    fn view(&self, key: ViewKey) -> Option<ViewId> {
        match key {
            ViewKey::From => self.from,
            ViewKey::To => self.to,
        }
    }

    fn frame(&self, view: ViewId) -> Rect {
        self.frames.get(&view).copied().unwrap_or_default()
    }

    fn set_frame(&mut self, view: ViewId, frame: Rect) {
        self.frames.insert(view, frame);
    }

    fn add_to_container(&mut self, view: ViewId) {
        self.container.retain(|v| *v != view);
        self.container.push(view);
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn transition_was_cancelled(&self) -> bool {
        self.cancelled
    }

    fn complete_transition(&mut self, completed: bool) {
        self.completion = Some(completed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Direction, SlideTransition};

    #[test]
    fn test_missing_views_are_contract_errors() {
        let mut stage = TransitionStage::new();
        let mut animator = SlideTransition::default();

        stage.prepare(None, Some(ViewId(1)), false);
        assert_eq!(
            animator.animate(&mut stage),
            Err(TransitionError::MissingView(ViewKey::From))
        );

        stage.prepare(Some(ViewId(0)), None, false);
        assert_eq!(
            animator.animate(&mut stage),
            Err(TransitionError::MissingView(ViewKey::To))
        );
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_animate_orders_container_and_places_incoming() {
        let visible = Rect::new(0.0, 0.0, 320.0, 568.0);
        let mut stage = TransitionStage::new();
        stage.add_view(ViewId(0), visible);
        stage.add_view(ViewId(1), visible);
        stage.prepare(Some(ViewId(0)), Some(ViewId(1)), false);

        let mut animator = SlideTransition::default();
        animator.set_direction(Direction::Backward);
        let plan = animator.animate(&mut stage).unwrap();

        assert_eq!(stage.container(), &[ViewId(0), ViewId(1)]);
        assert_eq!(stage.frame_of(ViewId(1)), Some(visible.offset_x(-320.0)));
        assert_eq!(plan.end.from, visible.offset_x(320.0));

        // Second animate while running is refused
        assert_eq!(
            animator.animate(&mut stage),
            Err(TransitionError::AlreadyAnimating)
        );
    }

    #[test]
    fn test_timed_completion_ignores_cancel_flag() {
        let visible = Rect::new(0.0, 0.0, 320.0, 568.0);
        let mut stage = TransitionStage::new();
        stage.add_view(ViewId(0), visible);
        stage.add_view(ViewId(1), visible);
        stage.prepare(Some(ViewId(0)), Some(ViewId(1)), false);

        let mut animator = SlideTransition::default();
        animator.animate(&mut stage).unwrap();
        stage.cancelled = true;

        assert!(animator.animation_finished(&mut stage));
        assert_eq!(stage.completion(), Some(true));
        assert_eq!(stage.frame_of(ViewId(1)), Some(visible));
        assert!(!animator.is_animating());
    }
}
