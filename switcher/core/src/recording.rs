//! Recording Host
//!
//! A [`NavigationHost`] that queues every call. Event-loop surfaces drain
//! the queue after feeding an event to the controller and act on it (the
//! controller owns the host, so the host cannot call back into the
//! controller from inside a callback). Tests use the queue directly.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::host::{GestureTarget, NavigationHost};
use crate::selection::SelectionChange;

/// One recorded host call
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "call", content = "args")]
pub enum HostCall {
    /// `install_tap_recognizer`
    InstallTap(GestureTarget),
    /// `install_pan_recognizer`
    InstallPan(GestureTarget),
    /// `set_tab_strip_hidden`
    TabStripHidden(bool),
    /// `layout_header`
    LayoutHeader(Rect),
    /// `selection_changed`
    SelectionChanged(SelectionChange),
    /// `update_interactive_transition`
    UpdateInteractive(f32),
    /// `finish_interactive_transition`
    FinishInteractive,
    /// `cancel_interactive_transition`
    CancelInteractive,
}

/// Host that records calls for later processing
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    calls: Vec<HostCall>,
    tab_strip_hidden: bool,
    header_frame: Option<Rect>,
}

impl RecordingHost {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls not yet drained
    #[must_use]
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Take all pending calls
    pub fn drain(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Whether the platform tab strip was hidden
    #[must_use]
    pub fn tab_strip_hidden(&self) -> bool {
        self.tab_strip_hidden
    }

    /// Latest header frame laid out
    #[must_use]
    pub fn header_frame(&self) -> Option<Rect> {
        self.header_frame
    }
}

impl NavigationHost for RecordingHost {
    fn install_tap_recognizer(&mut self, target: GestureTarget) {
        self.calls.push(HostCall::InstallTap(target));
    }

    fn install_pan_recognizer(&mut self, target: GestureTarget) {
        self.calls.push(HostCall::InstallPan(target));
    }

    fn set_tab_strip_hidden(&mut self, hidden: bool) {
        self.tab_strip_hidden = hidden;
        self.calls.push(HostCall::TabStripHidden(hidden));
    }

    fn layout_header(&mut self, frame: Rect) {
        self.header_frame = Some(frame);
        self.calls.push(HostCall::LayoutHeader(frame));
    }

    fn selection_changed(&mut self, change: SelectionChange) {
        self.calls.push(HostCall::SelectionChanged(change));
    }

    fn update_interactive_transition(&mut self, percent: f32) {
        self.calls.push(HostCall::UpdateInteractive(percent));
    }

    fn finish_interactive_transition(&mut self) {
        self.calls.push(HostCall::FinishInteractive);
    }

    fn cancel_interactive_transition(&mut self) {
        self.calls.push(HostCall::CancelInteractive);
    }
}
