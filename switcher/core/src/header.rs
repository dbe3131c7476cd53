//! Collapsible Header
//!
//! The header is a single overlay band at the top of the content area.
//! Its vertical position follows the active screen's scroll offset:
//!
//! - at or above the top (`offset <= 0`, i.e. overscrolling) the header
//!   sits at `inset - |offset|`, sliding toward its expanded position as the
//!   offset approaches zero;
//! - once content scrolls up (`offset > 0`) the header moves up by exactly
//!   the scrolled amount, `-offset`.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Bounds applied to the computed header position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeaderClamp {
    /// Follow the offset without limits
    #[default]
    None,
    /// Stop the header once it has fully collapsed (`y >= -inset`)
    CollapseOnly,
    /// Keep the header within `-inset..=inset`
    Both,
}

impl HeaderClamp {
    /// Apply the policy to a raw header position
    #[must_use]
    pub fn apply(self, y: f32, inset: f32) -> f32 {
        match self {
            Self::None => y,
            Self::CollapseOnly => y.max(-inset),
            Self::Both => y.clamp(-inset, inset),
        }
    }
}

/// Header position for a scroll offset, before any clamp
#[must_use]
pub fn header_y_for_offset(offset: f32, inset: f32) -> f32 {
    if offset <= 0.0 {
        inset - offset.abs()
    } else {
        -offset
    }
}

/// The shared header band
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderView {
    frame: Rect,
    content_top: f32,
}

impl HeaderView {
    /// Lay the header out at the top of the content area, spanning `width`
    #[must_use]
    pub fn new(width: f32, height: f32, content_top: f32) -> Self {
        Self {
            frame: Rect::new(0.0, content_top, width, height),
            content_top,
        }
    }

    /// Current frame
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Position relative to the content top
    #[must_use]
    pub fn y(&self) -> f32 {
        self.frame.y - self.content_top
    }

    /// Move the header so its position relative to the content top is `y`
    pub(crate) fn set_y(&mut self, y: f32) {
        self.frame = self.frame.with_y(self.content_top + y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overscroll_reveals() {
        assert!((header_y_for_offset(0.0, 100.0) - 100.0).abs() < f32::EPSILON);
        assert!((header_y_for_offset(-30.0, 100.0) - 70.0).abs() < f32::EPSILON);
        assert!((header_y_for_offset(-80.0, 100.0) - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_scroll_up_collapses() {
        assert!((header_y_for_offset(10.0, 100.0) + 10.0).abs() < f32::EPSILON);
        assert!((header_y_for_offset(250.0, 100.0) + 250.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_monotonic_on_each_side_of_zero() {
        let inset = 100.0;
        let mut prev = f32::NEG_INFINITY;
        for step in 0..=40 {
            let offset = -200.0 + step as f32 * 5.0; // -200 ..= 0
            let y = header_y_for_offset(offset, inset);
            assert!(y >= prev, "y must grow as offset approaches 0 from below");
            prev = y;
        }

        let mut prev = f32::INFINITY;
        for step in 1..=40 {
            let y = header_y_for_offset(step as f32 * 5.0, inset);
            assert!(y < prev, "y must fall as offset grows");
            prev = y;
        }
    }

    #[test]
    fn test_clamp_policies() {
        assert!((HeaderClamp::None.apply(-500.0, 100.0) + 500.0).abs() < f32::EPSILON);
        assert!((HeaderClamp::CollapseOnly.apply(-500.0, 100.0) + 100.0).abs() < f32::EPSILON);
        assert!((HeaderClamp::CollapseOnly.apply(400.0, 100.0) - 400.0).abs() < f32::EPSILON);
        assert!((HeaderClamp::Both.apply(400.0, 100.0) - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_header_frame_tracks_content_top() {
        let mut header = HeaderView::new(320.0, 100.0, 20.0);
        assert_eq!(header.frame(), Rect::new(0.0, 20.0, 320.0, 100.0));

        header.set_y(-10.0);
        assert!((header.frame().y - 10.0).abs() < f32::EPSILON);
        assert!((header.y() + 10.0).abs() < f32::EPSILON);
    }
}
