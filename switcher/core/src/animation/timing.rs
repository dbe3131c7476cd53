//! Slide Timing
//!
//! Frame-rate independent playback for a fixed-duration slide, for hosts
//! that have no animation engine of their own (the terminal surface, the
//! replay tool). Hosts with native property animation only need the
//! duration and easing from the plan.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Easing curves for the slide
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Constant speed
    Linear,

    /// Slow start, fast end
    EaseIn,

    /// Fast start, slow end
    EaseOut,

    /// Slow start and end (platform default for view animations)
    #[default]
    EaseInOut,
}

impl EasingFunction {
    /// Apply the curve to a progress value (clamped to 0.0..=1.0)
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(2),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Playback state of one timed slide
///
/// Cannot be cancelled once started; it only runs to completion.
#[derive(Clone, Debug)]
pub struct SlideAnimation {
    /// Total duration in milliseconds
    duration_ms: f32,

    /// Time played so far in milliseconds
    elapsed_ms: f32,

    /// Curve applied to the linear time fraction
    easing: EasingFunction,

    /// Whether time is advancing
    is_playing: bool,

    /// Whether the full duration has elapsed
    completed: bool,
}

impl SlideAnimation {
    /// Create a stopped animation
    #[must_use]
    pub fn new(duration: Duration, easing: EasingFunction) -> Self {
        Self {
            duration_ms: (duration.as_secs_f32() * 1000.0).max(1.0),
            elapsed_ms: 0.0,
            easing,
            is_playing: false,
            completed: false,
        }
    }

    /// Start playback
    pub fn play(&mut self) {
        if !self.completed {
            self.is_playing = true;
        }
    }

    /// Advance by `delta_ms`
    ///
    /// Returns `true` on the tick that completes the animation.
    pub fn update(&mut self, delta_ms: u32) -> bool {
        if !self.is_playing || self.completed {
            return false;
        }

        self.elapsed_ms += delta_ms as f32;
        if self.elapsed_ms >= self.duration_ms {
            self.elapsed_ms = self.duration_ms;
            self.completed = true;
            self.is_playing = false;
            return true;
        }

        false
    }

    /// Linear fraction of the duration played (0.0 to 1.0)
    #[must_use]
    pub fn linear_progress(&self) -> f32 {
        (self.elapsed_ms / self.duration_ms).min(1.0)
    }

    /// Eased progress, suitable for [`SlidePlan::frames_at`](super::SlidePlan::frames_at)
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.easing.apply(self.linear_progress())
    }

    /// Whether the animation is advancing
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether the animation has run its full duration
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            EasingFunction::Linear,
            EasingFunction::EaseIn,
            EasingFunction::EaseOut,
            EasingFunction::EaseInOut,
        ] {
            assert!(easing.apply(0.0).abs() < f32::EPSILON, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < f32::EPSILON, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric_at_half() {
        assert!((EasingFunction::EaseInOut.apply(0.5) - 0.5).abs() < 0.001);
        assert!(EasingFunction::EaseInOut.apply(0.25) < 0.25);
        assert!(EasingFunction::EaseInOut.apply(0.75) > 0.75);
    }

    #[test]
    fn test_slide_runs_exactly_its_duration() {
        let mut anim = SlideAnimation::new(Duration::from_millis(700), EasingFunction::Linear);

        // Not playing yet
        assert!(!anim.update(100));
        assert!(anim.linear_progress().abs() < f32::EPSILON);

        anim.play();
        assert!(!anim.update(350));
        assert!((anim.linear_progress() - 0.5).abs() < 0.001);

        assert!(!anim.update(349));
        assert!(anim.update(1));
        assert!(anim.is_completed());
        assert!(!anim.is_playing());

        // Completed animations stay put
        assert!(!anim.update(100));
        assert!((anim.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_play_after_completion_is_noop() {
        let mut anim = SlideAnimation::new(Duration::from_millis(10), EasingFunction::EaseOut);
        anim.play();
        assert!(anim.update(20));
        anim.play();
        assert!(!anim.is_playing());
    }
}
