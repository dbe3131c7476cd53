//! Tab Switch Controller - The Orchestration Core
//!
//! Owns the header, both screens, the selection, the shared slide animator
//! and the shared swipe interaction. It plays the scroll-coordinator role
//! for both screens.
//!
//! # Design Philosophy
//!
//! The controller is platform-agnostic. It communicates through:
//! - [`NavigationHost`]: commands sent TO the platform (layout, recognizers,
//!   transition control)
//! - Entry points called FROM the platform: [`toggle_tab`], [`handle_pan`],
//!   [`screen_scrolled`], [`screen_appeared`], and the transition protocol
//!   [`animator_for_transition`] / [`interaction_controller_for`]
//!
//! Header geometry, selection and transition state are separate fields, so a
//! scroll arriving mid-transition cannot disturb the transition.
//!
//! [`toggle_tab`]: TabSwitchController::toggle_tab
//! [`handle_pan`]: TabSwitchController::handle_pan
//! [`screen_scrolled`]: TabSwitchController::screen_scrolled
//! [`screen_appeared`]: TabSwitchController::screen_appeared
//! [`animator_for_transition`]: TabSwitchController::animator_for_transition
//! [`interaction_controller_for`]: TabSwitchController::interaction_controller_for

use crate::animation::{Direction, SlideTransition};
use crate::config::NavigatorConfig;
use crate::error::NavigatorError;
use crate::geometry::Rect;
use crate::header::{header_y_for_offset, HeaderView};
use crate::host::{GestureTarget, NavigationHost};
use crate::interaction::{PanGesture, SwipeCommand, SwipeInteraction};
use crate::screen::{CoordinatorTicket, Screen, ScreenId, ScrollCoordinator};
use crate::selection::{Selection, SelectionChange, TAB_COUNT};

/// The tab switch controller
pub struct TabSwitchController<H: NavigationHost> {
    /// Configuration
    config: NavigatorConfig,
    /// Platform capabilities
    host: H,
    /// Ticket handed to screens as their scroll delegate
    ticket: CoordinatorTicket,
    /// Width of the content area
    view_width: f32,
    /// The shared header band
    header: HeaderView,
    /// Registered screens, in tab order
    screens: Vec<Screen>,
    /// Committed and provisional tab
    selection: Selection,
    /// Shared slide animator
    animator: SlideTransition,
    /// Shared swipe interaction
    interaction: SwipeInteraction,
    /// Header position from the last scroll report
    last_offset: f32,
}

impl<H: NavigationHost> TabSwitchController<H> {
    /// Create a controller for a content area `view_width` wide
    pub fn new(host: H, config: NavigatorConfig, view_width: f32) -> Self {
        let header = HeaderView::new(view_width, config.header_height, config.content_top);
        let animator = SlideTransition::from_config(&config);
        let interaction = SwipeInteraction::from_config(&config);

        Self {
            config,
            host,
            ticket: CoordinatorTicket::new(),
            view_width,
            header,
            screens: Vec::with_capacity(TAB_COUNT),
            selection: Selection::new(),
            animator,
            interaction,
            last_offset: 0.0,
        }
    }

    /// One-time setup: register the two screens and lay out the header
    ///
    /// Each screen gets the header height as its inset and this controller
    /// as its scroll delegate, and is wired to the shared swipe interaction.
    /// The platform tab strip is hidden and the header is placed at the top
    /// of the content area, spanning its width.
    pub fn initialize(&mut self, screens: [Screen; TAB_COUNT]) {
        let inset = self.config.header_height;

        self.screens.clear();
        for mut screen in screens {
            screen.attach(self.ticket, inset);
            self.interaction.wire_to_screen(screen.id());
            self.host
                .install_pan_recognizer(GestureTarget::Screen(screen.id()));
            self.screens.push(screen);
        }

        self.host.set_tab_strip_hidden(true);

        self.header = HeaderView::new(self.view_width, inset, self.config.content_top);
        self.host.install_tap_recognizer(GestureTarget::Header);
        self.host.layout_header(self.header.frame());

        tracing::info!(
            screens = ?self.screens.iter().map(Screen::id).collect::<Vec<_>>(),
            header_height = inset,
            width = self.view_width,
            "Tab switcher initialized"
        );
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Whether `initialize` has run
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        !self.screens.is_empty()
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// The host
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Registered screens in tab order
    #[must_use]
    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    /// Screen at a tab index
    #[must_use]
    pub fn screen_at(&self, index: usize) -> Option<&Screen> {
        self.screens.get(index)
    }

    /// Tab index of a screen
    #[must_use]
    pub fn index_of(&self, id: ScreenId) -> Option<usize> {
        self.screens.iter().position(|s| s.id() == id)
    }

    /// Index the host should display (provisional during a swipe)
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selection.current()
    }

    /// Last committed index
    #[must_use]
    pub fn committed_index(&self) -> usize {
        self.selection.committed()
    }

    /// The header band
    #[must_use]
    pub fn header(&self) -> &HeaderView {
        &self.header
    }

    /// Header position from the last scroll report
    #[must_use]
    pub fn last_offset(&self) -> f32 {
        self.last_offset
    }

    /// The shared animator
    #[must_use]
    pub fn animator(&self) -> &SlideTransition {
        &self.animator
    }

    /// The shared animator, mutably (for reporting completion)
    pub fn animator_mut(&mut self) -> &mut SlideTransition {
        &mut self.animator
    }

    /// The shared swipe interaction
    #[must_use]
    pub fn interaction(&self) -> &SwipeInteraction {
        &self.interaction
    }

    // =========================================================================
    // Tap
    // =========================================================================

    /// Header tap: flip between the two tabs
    ///
    /// Returns the change announced to the host, or `None` if a swipe is
    /// pending and the tap was ignored.
    ///
    /// # Errors
    ///
    /// [`NavigatorError::NotInitialized`] before `initialize`.
    pub fn toggle_tab(&mut self) -> Result<Option<SelectionChange>, NavigatorError> {
        self.ensure_initialized()?;

        let Some(change) = self.selection.toggle() else {
            tracing::debug!("Ignoring tab toggle while a swipe is pending");
            return Ok(None);
        };

        tracing::info!(from = change.from, to = change.to, "Tab toggled");
        self.host.selection_changed(change);
        Ok(Some(change))
    }

    // =========================================================================
    // Scroll
    // =========================================================================

    /// Reposition the header for a screen's scroll offset
    ///
    /// This is the only writer of header geometry after `initialize`.
    pub fn on_scroll_update(&mut self, screen_offset: f32) {
        let inset = self.config.header_height;
        let y = self
            .config
            .header_clamp
            .apply(header_y_for_offset(screen_offset, inset), inset);

        self.last_offset = y;
        self.header.set_y(y);
        self.host.layout_header(self.header.frame());

        tracing::debug!(screen_offset, header_y = y, "Header repositioned");
    }

    /// A screen's content scrolled
    ///
    /// # Errors
    ///
    /// [`NavigatorError::UnknownScreen`] if `id` was never registered.
    pub fn screen_scrolled(&mut self, id: ScreenId, offset: f32) -> Result<(), NavigatorError> {
        let index = self.require_index(id)?;
        if let Some(report) = self.screens[index].scroll_to(offset) {
            self.deliver(report);
        }
        Ok(())
    }

    /// A screen became visible; its current offset is reported at once
    ///
    /// # Errors
    ///
    /// [`NavigatorError::UnknownScreen`] if `id` was never registered.
    pub fn screen_appeared(&mut self, id: ScreenId) -> Result<(), NavigatorError> {
        let index = self.require_index(id)?;
        if let Some(report) = self.screens[index].did_appear() {
            self.deliver(report);
        }
        Ok(())
    }

    /// Host resized the content area
    pub fn resize(&mut self, view_width: f32, screen_bounds: Rect) {
        self.view_width = view_width;
        for screen in &mut self.screens {
            screen.set_bounds(screen_bounds);
        }
        let mut header = HeaderView::new(view_width, self.config.header_height, self.config.content_top);
        header.set_y(self.last_offset);
        self.header = header;
        self.host.layout_header(self.header.frame());
    }

    // =========================================================================
    // Transition protocol
    // =========================================================================

    /// Animator for a transition between two screens
    ///
    /// Sets the shared animator's direction from the screens' tab indices.
    /// If either screen is unknown the direction falls back to forward.
    pub fn animator_for_transition(&mut self, from: ScreenId, to: ScreenId) -> &mut SlideTransition {
        let direction = match (self.index_of(from), self.index_of(to)) {
            (Some(from_index), Some(to_index)) => Direction::between(from_index, to_index),
            _ => {
                tracing::warn!(%from, %to, "Transition between unregistered screens, sliding forward");
                Direction::Forward
            }
        };
        self.animator.set_direction(direction);
        &mut self.animator
    }

    /// Interaction controller for an animator
    ///
    /// Always the single shared instance, whichever animator is passed.
    /// Hosts check [`SwipeInteraction::interaction_in_progress`] to decide
    /// between a timed and a percent-driven run.
    #[must_use]
    pub fn interaction_controller_for(&self, _animator: &SlideTransition) -> &SwipeInteraction {
        &self.interaction
    }

    /// The interaction controller if a swipe is driving the transition
    #[must_use]
    pub fn active_interaction(&self) -> Option<&SwipeInteraction> {
        self.interaction
            .interaction_in_progress()
            .then_some(&self.interaction)
    }

    // =========================================================================
    // Swipe
    // =========================================================================

    /// Pan callback from a screen's recognizer
    ///
    /// Returns the command that was carried out.
    ///
    /// # Errors
    ///
    /// [`NavigatorError::UnknownScreen`] if `screen` was never registered.
    pub fn handle_pan(
        &mut self,
        screen: ScreenId,
        gesture: &PanGesture,
    ) -> Result<SwipeCommand, NavigatorError> {
        let index = self.require_index(screen)?;
        let width = self.screens[index].width();

        let command = self.interaction.handle(screen, gesture, width);
        match command {
            SwipeCommand::Begin { .. } if self.animator.is_animating() => {
                tracing::warn!(%screen, "Slide still running, ignoring swipe");
                self.interaction.abandon();
                return Ok(SwipeCommand::Ignore);
            }
            SwipeCommand::Begin { delta } => match self.selection.propose(delta) {
                Some(change) => {
                    tracing::info!(%screen, from = change.from, to = change.to, "Swipe started");
                    self.host.selection_changed(change);
                }
                None => {
                    tracing::warn!(
                        %screen,
                        delta,
                        selected = self.selection.current(),
                        "Swipe would leave the tab range, ignoring"
                    );
                    self.interaction.abandon();
                    return Ok(SwipeCommand::Ignore);
                }
            },
            SwipeCommand::Update { progress } => {
                self.host.update_interactive_transition(progress);
            }
            SwipeCommand::Finish => {
                if let Some(index) = self.selection.commit() {
                    tracing::info!(%screen, selected = index, "Swipe finished");
                }
                self.host.finish_interactive_transition();
            }
            SwipeCommand::Cancel => {
                if let Some(back) = self.selection.rollback() {
                    tracing::info!(%screen, restored = back.to, "Swipe cancelled");
                }
                self.host.cancel_interactive_transition();
            }
            SwipeCommand::Ignore => {}
        }

        Ok(command)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn ensure_initialized(&self) -> Result<(), NavigatorError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(NavigatorError::NotInitialized)
        }
    }

    fn require_index(&self, id: ScreenId) -> Result<usize, NavigatorError> {
        self.ensure_initialized()?;
        self.index_of(id).ok_or(NavigatorError::UnknownScreen(id))
    }
}

impl<H: NavigationHost> ScrollCoordinator for TabSwitchController<H> {
    fn ticket(&self) -> CoordinatorTicket {
        self.ticket
    }

    fn report_scroll_offset(&mut self, offset: f32) {
        self.on_scroll_update(offset);
    }
}
