//! Error Types
//!
//! The taxonomy is small: almost everything the core does is a synchronous
//! UI callback with no I/O. What remains are host contract violations.

use thiserror::Error;

use crate::animation::ViewKey;
use crate::screen::ScreenId;

/// Errors from the tab switch controller's event entry points
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigatorError {
    /// The host referred to a screen that was never registered
    #[error("Unknown screen {0}")]
    UnknownScreen(ScreenId),

    /// An event arrived before `initialize` registered the screens
    #[error("Controller has not been initialized")]
    NotInitialized,
}

/// Errors raised by the slide transition animator
///
/// These are precondition violations on the host's transition context.
/// There is no recovery path; the host must fix its context.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// The transition context had no view for the given role
    #[error("Transition context is missing the {0} view")]
    MissingView(ViewKey),

    /// `animate` was called while a slide was still running
    #[error("A slide transition is already running")]
    AlreadyAnimating,
}
