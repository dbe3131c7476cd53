//! Screens and the Scroll Coordinator Role
//!
//! A [`Screen`] is one of the two sibling content views. It knows its
//! root bounds, its scroll offset and the inset reserved for the header, and
//! it reports its offset to whichever coordinator it was attached to.
//!
//! The screen never holds a reference to its coordinator. Attachment hands
//! it a [`CoordinatorTicket`]; a report is addressed by ticket and the
//! coordinator accepts only reports carrying its own.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Host-chosen screen identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenId(pub u32);

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen-{}", self.0)
    }
}

/// Non-owning handle naming a scroll coordinator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoordinatorTicket(u64);

impl CoordinatorTicket {
    /// Issue a fresh ticket
    #[must_use]
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for CoordinatorTicket {
    fn default() -> Self {
        Self::new()
    }
}

/// Receives scroll offsets from screens and repositions the header
pub trait ScrollCoordinator {
    /// Ticket screens must carry for their reports to be accepted
    fn ticket(&self) -> CoordinatorTicket;

    /// A screen's vertical content offset changed (or it became visible)
    fn report_scroll_offset(&mut self, offset: f32);

    /// Deliver a report, dropping it if it is addressed elsewhere
    ///
    /// Returns whether the report was accepted.
    fn deliver(&mut self, report: ScrollReport) -> bool {
        if report.ticket != self.ticket() {
            tracing::debug!(screen = %report.screen, "Dropping scroll report for another coordinator");
            return false;
        }
        self.report_scroll_offset(report.offset);
        true
    }
}

/// A screen's offset, addressed to its coordinator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollReport {
    /// Coordinator the report is for
    pub ticket: CoordinatorTicket,
    /// Reporting screen
    pub screen: ScreenId,
    /// Vertical content offset
    pub offset: f32,
}

/// One of the two sibling content views
#[derive(Clone, Debug, PartialEq)]
pub struct Screen {
    id: ScreenId,
    bounds: Rect,
    scroll_offset: f32,
    inset: f32,
    delegate: Option<CoordinatorTicket>,
}

impl Screen {
    /// Create an unattached screen with the given root bounds
    #[must_use]
    pub fn new(id: ScreenId, bounds: Rect) -> Self {
        Self {
            id,
            bounds,
            scroll_offset: 0.0,
            inset: 0.0,
            delegate: None,
        }
    }

    /// Identifier
    #[must_use]
    pub fn id(&self) -> ScreenId {
        self.id
    }

    /// Root view bounds
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Width used for swipe progress
    #[must_use]
    pub fn width(&self) -> f32 {
        self.bounds.width
    }

    /// Current vertical content offset
    #[must_use]
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Top inset reserved for the header
    #[must_use]
    pub fn inset(&self) -> f32 {
        self.inset
    }

    /// Coordinator this screen reports to
    #[must_use]
    pub fn delegate(&self) -> Option<CoordinatorTicket> {
        self.delegate
    }

    /// Host resized the screen
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Attach to a coordinator, reserving `inset` for its header
    pub fn attach(&mut self, ticket: CoordinatorTicket, inset: f32) {
        self.inset = inset;
        self.delegate = Some(ticket);
    }

    /// Content scrolled; returns the report for the delegate, if any
    pub fn scroll_to(&mut self, offset: f32) -> Option<ScrollReport> {
        self.scroll_offset = offset;
        self.report()
    }

    /// Screen became visible; returns the report for the delegate, if any
    ///
    /// Reporting on appearance keeps the header right even if the user never
    /// scrolls this screen.
    #[must_use]
    pub fn did_appear(&self) -> Option<ScrollReport> {
        self.report()
    }

    fn report(&self) -> Option<ScrollReport> {
        self.delegate.map(|ticket| ScrollReport {
            ticket,
            screen: self.id,
            offset: self.scroll_offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Collector {
        ticket: CoordinatorTicket,
        seen: Vec<f32>,
    }

    impl ScrollCoordinator for Collector {
        fn ticket(&self) -> CoordinatorTicket {
            self.ticket
        }

        fn report_scroll_offset(&mut self, offset: f32) {
            self.seen.push(offset);
        }
    }

    #[test]
    fn test_unattached_screen_reports_nothing() {
        let mut screen = Screen::new(ScreenId(0), Rect::new(0.0, 0.0, 320.0, 568.0));
        assert!(screen.scroll_to(12.0).is_none());
        assert!(screen.did_appear().is_none());
        assert!((screen.scroll_offset() - 12.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_reports_reach_only_their_coordinator() {
        let mut mine = Collector {
            ticket: CoordinatorTicket::new(),
            seen: Vec::new(),
        };
        let mut other = Collector {
            ticket: CoordinatorTicket::new(),
            seen: Vec::new(),
        };
        assert_ne!(mine.ticket, other.ticket);

        let mut screen = Screen::new(ScreenId(1), Rect::new(0.0, 0.0, 320.0, 568.0));
        screen.attach(mine.ticket, 100.0);
        assert!((screen.inset() - 100.0).abs() < f32::EPSILON);

        let report = screen.scroll_to(-30.0).unwrap();
        assert!(!other.deliver(report));
        assert!(mine.deliver(report));

        let appear = screen.did_appear().unwrap();
        assert!(mine.deliver(appear));

        assert_eq!(mine.seen, vec![-30.0, -30.0]);
        assert!(other.seen.is_empty());
    }
}
