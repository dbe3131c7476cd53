//! Tabswitch Core - Headless Tab Switching for Two Sibling Screens
//!
//! This crate provides the interaction logic behind a two-tab switcher with
//! a collapsible header, completely independent of any UI framework. It can
//! drive a phone toolkit, a terminal UI, or run headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Host Surface                            │
//! │   taps · pans · scroll offsets        views · recognizers · anim │
//! └───────────────┬─────────────────────────────────▲───────────────┘
//!                 │ entry points                    │ NavigationHost
//! ┌───────────────▼─────────────────────────────────┴───────────────┐
//! │                     TabSwitchController                          │
//! │  ┌────────────┐  ┌───────────┐  ┌────────────────┐  ┌─────────┐  │
//! │  │ HeaderView │  │ Selection │  │ SwipeInteraction│  │ Slide   │  │
//! │  │ (scroll    │  │ committed │  │ (one session)  │──▶ Transi- │  │
//! │  │  coord.)   │  │ +provis.  │  │                │  │ tion    │  │
//! │  └────────────┘  └───────────┘  └────────────────┘  └─────────┘  │
//! │        ▲ ScrollReport (ticket-addressed)                          │
//! │  ┌─────┴──────┐  ┌────────────┐                                   │
//! │  │  Screen 0  │  │  Screen 1  │                                   │
//! │  └────────────┘  └────────────┘                                   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`TabSwitchController`]: owns everything; the host talks to it
//! - [`NavigationHost`]: what the core needs from the platform
//! - [`SlideTransition`]: the shared slide animator
//! - [`SwipeInteraction`]: the shared swipe-to-switch interaction
//! - [`Screen`]: one of the two content screens
//! - [`TransitionStage`]: in-memory transition context for headless hosts
//!
//! # Quick Start
//!
//! ```
//! use tabswitch_core::{
//!     NavigatorConfig, Rect, RecordingHost, Screen, ScreenId, TabSwitchController,
//! };
//!
//! let bounds = Rect::new(0.0, 0.0, 320.0, 568.0);
//! let mut controller =
//!     TabSwitchController::new(RecordingHost::new(), NavigatorConfig::default(), 320.0);
//! controller.initialize([
//!     Screen::new(ScreenId(0), bounds),
//!     Screen::new(ScreenId(1), bounds),
//! ]);
//!
//! controller.screen_scrolled(ScreenId(0), -30.0).unwrap();
//! assert_eq!(controller.last_offset(), 70.0);
//!
//! controller.toggle_tab().unwrap();
//! assert_eq!(controller.selected_index(), 1);
//! ```
//!
//! # Module Overview
//!
//! - [`animation`]: slide animator, transition context trait, timing
//! - [`config`]: TOML/env configuration
//! - [`controller`]: the tab switch controller
//! - [`geometry`]: points and rectangles
//! - [`header`]: header position math
//! - [`host`]: host capability trait
//! - [`interaction`]: swipe gesture state machine
//! - [`recording`]: call-recording host for event loops and tests
//! - [`screen`]: screens and the scroll coordinator role
//! - [`selection`]: committed/provisional tab index
//! - [`stage`]: headless transition context and slide player
//!
//! # No UI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod animation;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod header;
pub mod host;
pub mod interaction;
pub mod recording;
pub mod screen;
pub mod selection;
pub mod stage;

// Re-exports for convenience
pub use animation::{
    Direction, EasingFunction, SlideAnimation, SlideFrames, SlidePlan, SlideTransition,
    TransitionContext, ViewId, ViewKey,
};
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigOverrides,
    ConfigSource, NavigatorConfig,
};
pub use controller::TabSwitchController;
pub use error::{NavigatorError, TransitionError};
pub use geometry::{Point, Rect};
pub use header::{header_y_for_offset, HeaderClamp, HeaderView};
pub use host::{GestureTarget, NavigationHost};
pub use interaction::{
    swipe_progress, GesturePhase, InteractiveSession, PanGesture, SwipeCommand, SwipeInteraction,
};
pub use recording::{HostCall, RecordingHost};
pub use screen::{CoordinatorTicket, Screen, ScreenId, ScrollCoordinator, ScrollReport};
pub use selection::{Selection, SelectionChange, TAB_COUNT};
pub use stage::{view_for, SlideOutcome, TransitionStage};
