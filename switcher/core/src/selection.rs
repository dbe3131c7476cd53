//! Selected Tab
//!
//! The selection has a committed index and, while a swipe is in flight, a
//! provisional one. Hosts see the provisional index immediately so the
//! animator and interaction pair reflect the drag's direction from its first
//! event; the committed index only moves when the swipe finishes.

use serde::{Deserialize, Serialize};

use crate::animation::Direction;

/// Number of tabs the switcher manages
pub const TAB_COUNT: usize = 2;

/// A change of the visible tab, as announced to the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChange {
    /// Index being left
    pub from: usize,
    /// Index being shown
    pub to: usize,
    /// Whether a swipe drives this change
    pub interactive: bool,
}

impl SelectionChange {
    /// Slide direction for this change
    #[must_use]
    pub fn direction(&self) -> Direction {
        Direction::between(self.from, self.to)
    }
}

/// Committed and provisional tab index
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    committed: usize,
    provisional: Option<usize>,
}

impl Selection {
    /// Start on the first tab
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the host should display right now
    #[must_use]
    pub fn current(&self) -> usize {
        self.provisional.unwrap_or(self.committed)
    }

    /// Last committed index
    #[must_use]
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Whether a swipe has a provisional index pending
    #[must_use]
    pub fn is_provisional(&self) -> bool {
        self.provisional.is_some()
    }

    /// Flip between the two tabs and commit immediately
    ///
    /// Refused while a swipe is pending.
    pub fn toggle(&mut self) -> Option<SelectionChange> {
        if self.provisional.is_some() {
            return None;
        }
        let from = self.committed;
        let to = if from == 0 { 1 } else { 0 };
        self.committed = to;
        Some(SelectionChange {
            from,
            to,
            interactive: false,
        })
    }

    /// Provisionally move by `delta` tabs
    ///
    /// Refused if a swipe is already pending or the target is not a tab.
    pub fn propose(&mut self, delta: isize) -> Option<SelectionChange> {
        if self.provisional.is_some() {
            return None;
        }
        let from = self.committed;
        let to = from.checked_add_signed(delta).filter(|&to| to < TAB_COUNT)?;
        self.provisional = Some(to);
        Some(SelectionChange {
            from,
            to,
            interactive: true,
        })
    }

    /// Make the provisional index the committed one
    pub fn commit(&mut self) -> Option<usize> {
        let to = self.provisional.take()?;
        self.committed = to;
        Some(to)
    }

    /// Drop the provisional index; returns the change back to committed
    pub fn rollback(&mut self) -> Option<SelectionChange> {
        let from = self.provisional.take()?;
        Some(SelectionChange {
            from,
            to: self.committed,
            interactive: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_and_commits() {
        let mut sel = Selection::new();
        let change = sel.toggle().unwrap();
        assert_eq!((change.from, change.to), (0, 1));
        assert_eq!(change.direction(), Direction::Forward);
        assert_eq!(sel.committed(), 1);

        let change = sel.toggle().unwrap();
        assert_eq!(change.direction(), Direction::Backward);
        assert_eq!(sel.current(), 0);
    }

    #[test]
    fn test_propose_then_commit() {
        let mut sel = Selection::new();
        let change = sel.propose(1).unwrap();
        assert!(change.interactive);
        assert_eq!(sel.current(), 1);
        assert_eq!(sel.committed(), 0);

        assert_eq!(sel.commit(), Some(1));
        assert_eq!(sel.committed(), 1);
        assert!(!sel.is_provisional());
    }

    #[test]
    fn test_propose_then_rollback() {
        let mut sel = Selection::new();
        sel.propose(1).unwrap();
        let back = sel.rollback().unwrap();
        assert_eq!((back.from, back.to), (1, 0));
        assert_eq!(sel.current(), 0);
    }

    #[test]
    fn test_propose_out_of_range_is_refused() {
        let mut sel = Selection::new();
        assert!(sel.propose(-1).is_none());
        sel.toggle();
        assert!(sel.propose(1).is_none());
        assert_eq!(sel.current(), 1);
    }

    #[test]
    fn test_pending_swipe_blocks_other_changes() {
        let mut sel = Selection::new();
        sel.propose(1).unwrap();
        assert!(sel.propose(-1).is_none());
        assert!(sel.toggle().is_none());
        assert_eq!(sel.current(), 1);
    }
}
