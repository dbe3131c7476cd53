//! Host Capabilities
//!
//! What the core needs from the platform it runs in. The host owns real
//! views, recognizers and the animation engine; the core tells it what to
//! do through this trait and never renders anything itself.
//!
//! All calls happen on the host's UI thread.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::screen::ScreenId;
use crate::selection::SelectionChange;

/// View a gesture recognizer is attached to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureTarget {
    /// The shared header band
    Header,
    /// A screen's root view
    Screen(ScreenId),
}

/// Outbound capabilities the tab switch controller requires
pub trait NavigationHost {
    /// Attach a tap recognizer; taps come back through
    /// [`TabSwitchController::toggle_tab`](crate::TabSwitchController::toggle_tab)
    fn install_tap_recognizer(&mut self, target: GestureTarget);

    /// Attach a pan recognizer; pans come back through
    /// [`TabSwitchController::handle_pan`](crate::TabSwitchController::handle_pan)
    fn install_pan_recognizer(&mut self, target: GestureTarget);

    /// Show or hide the platform's own tab strip
    fn set_tab_strip_hidden(&mut self, hidden: bool);

    /// Move the header band
    fn layout_header(&mut self, frame: Rect);

    /// The visible tab changed
    ///
    /// The host starts a transition and asks the controller for the
    /// animator (and, for interactive changes, the interaction controller).
    fn selection_changed(&mut self, change: SelectionChange);

    /// Scrub the percent-driven transition
    fn update_interactive_transition(&mut self, percent: f32);

    /// Let the percent-driven transition run to its end
    fn finish_interactive_transition(&mut self);

    /// Reverse the percent-driven transition to its start
    fn cancel_interactive_transition(&mut self);
}
