//! Main Application
//!
//! The App is the terminal host of the tab switcher:
//! - Event loop (keyboard, mouse, resize, frame ticks)
//! - Feeds taps, scrolls and drags to the `TabSwitchController`
//! - Drains recorded host calls and plays slides on a `TransitionStage`
//! - Renders both pages at their stage frames with the header on top
//!
//! # Layout
//!
//! The header overlays the top of the content area. Each page's scroll
//! range starts with blank rows under the header, and the page reports
//! its scroll to the controller as a non-positive offset, so the header
//! rides up with the content and is gone once the page has scrolled past
//! it. The controller is configured with the content area starting one
//! header-height above the screen for that reason.

use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use tokio::time::MissedTickBehavior;

use tabswitch_core::{
    view_for, GesturePhase, HostCall, NavigatorConfig, PanGesture, RecordingHost, Screen,
    ScreenId, SwipeCommand, TabSwitchController, TransitionStage,
};

use crate::surface::CellGrid;
use crate::theme::{DIM_GRAY, PAGE_BG, PAGE_FG, SWIPE_BLUE};
use crate::widgets::{HeaderBand, Page, PageState, PageView};

/// Status line height (rows)
const STATUS_HEIGHT: u16 = 1;

/// ~60 FPS so slides look smooth
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Rows per mouse wheel notch
const WHEEL_ROWS: i32 = 3;

/// The two screens, in tab order
pub const SCREENS: [ScreenId; 2] = [ScreenId(0), ScreenId(1)];

/// A left-button drag in progress
#[derive(Clone, Copy, Debug)]
struct Drag {
    /// Screen that was visible when the button went down
    screen: ScreenId,
    origin_col: u16,
    last_col: u16,
    last_at: Instant,
    /// Horizontal velocity in units per second
    velocity: f32,
    moved: bool,
    /// `Began` was delivered for this drag
    began: bool,
    /// The controller opened a swipe session for this drag
    swiping: bool,
}

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,

    // === Switcher ===
    /// Headless navigation core
    controller: TabSwitchController<RecordingHost>,
    /// Plays slides the controller announces
    stage: TransitionStage,
    /// Unit/cell conversion
    grid: CellGrid,

    // === Pages ===
    pages: [Page; 2],
    states: [PageState; 2],
    /// Header height in rows
    header_rows: u16,

    // === Input State ===
    drag: Option<Drag>,

    // === Misc State ===
    /// Last frame time (for animations)
    last_frame: Instant,
    /// Developer mode
    dev_mode: bool,
    /// Terminal size
    size: (u16, u16),
}

impl App {
    /// Create an App for a terminal `size` (columns, rows)
    ///
    /// `header_rows` sets the cell scale: the configured header height
    /// spans that many rows.
    pub fn new(
        mut config: NavigatorConfig,
        pages: [Page; 2],
        header_rows: u16,
        size: (u16, u16),
    ) -> Self {
        let grid = CellGrid::for_header(config.header_height, header_rows);
        let header_rows = u16::try_from(grid.units_to_rows(config.header_height)).unwrap_or(0);
        config.content_top = -config.header_height;

        let content = content_area(size);
        let bounds = grid.area_units(content);
        let mut controller = TabSwitchController::new(RecordingHost::new(), config, bounds.width);
        controller.initialize(SCREENS.map(|id| Screen::new(id, bounds)));

        let mut states: [PageState; 2] = Default::default();
        for (state, page) in states.iter_mut().zip(&pages) {
            state.layout(page, content.width);
        }

        let mut app = Self {
            running: true,
            controller,
            stage: TransitionStage::new(),
            grid,
            pages,
            states,
            header_rows,
            drag: None,
            last_frame: Instant::now(),
            dev_mode: false,
            size,
        };
        app.rebase_frames();

        if let Err(e) = app.controller.screen_appeared(SCREENS[0]) {
            tracing::warn!(error = %e, "Initial appear failed");
        }
        app.pump();
        app
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Is the app still running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The navigation core
    pub fn controller(&self) -> &TabSwitchController<RecordingHost> {
        &self.controller
    }

    /// The slide player
    pub fn stage(&self) -> &TransitionStage {
        &self.stage
    }

    /// Unit/cell conversion in use
    pub fn grid(&self) -> CellGrid {
        self.grid
    }

    /// Rows a page has scrolled
    pub fn page_scroll(&self, index: usize) -> usize {
        self.states.get(index).map_or(0, |s| s.scroll)
    }

    /// Header height in rows
    pub fn header_rows(&self) -> u16 {
        self.header_rows
    }

    // =========================================================================
    // Event loop
    // =========================================================================

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut ticker = tokio::time::interval(FRAME_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Render initial frame immediately so user sees UI
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => return Err(e.into()),
                    None => self.running = false,
                },

                // Frame tick - advance playback
                _ = ticker.tick() => {
                    let now = Instant::now();
                    let delta = now.duration_since(self.last_frame);
                    self.last_frame = now;
                    self.on_tick(u32::try_from(delta.as_millis()).unwrap_or(u32::MAX));
                }
            }

            self.render(terminal)?;
        }

        Ok(())
    }

    /// Dispatch one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(w, h) => self.handle_resize(w, h),
            _ => {}
        }
    }

    /// Advance slide playback by `delta_ms`
    pub fn on_tick(&mut self, delta_ms: u32) {
        if let Some(outcome) = self.stage.tick(&mut self.controller, delta_ms) {
            tracing::debug!(?outcome, "Slide ended");
            if let Err(e) = self.controller.screen_appeared(outcome.visible) {
                tracing::warn!(error = %e, "Appear after slide failed");
            }
        }
        self.pump();
    }

    /// Act on pending host calls
    fn pump(&mut self) {
        for call in self.controller.host_mut().drain() {
            tracing::trace!(?call, "Host call");
            match call {
                HostCall::SelectionChanged(change) => {
                    if let Err(e) = self.stage.start(&mut self.controller, change) {
                        tracing::warn!(error = %e, ?change, "Could not start slide");
                    }
                }
                HostCall::UpdateInteractive(percent) => self.stage.scrub(percent),
                HostCall::FinishInteractive => self.stage.finish_interactive(),
                HostCall::CancelInteractive => self.stage.cancel_interactive(),
                _ => {}
            }
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) {
        let page_rows = i32::from(self.content_rows() / 2).max(1);
        match key.code {
            // Quit
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }

            // Switch tabs
            KeyCode::Tab | KeyCode::BackTab => self.toggle(),

            // Page scrolling
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-page_rows),
            KeyCode::PageDown => self.scroll_by(page_rows),
            KeyCode::Home => self.scroll_by(i32::MIN / 2),
            KeyCode::End => self.scroll_by(i32::MAX / 2),

            // Toggle dev mode
            KeyCode::F(12) => self.dev_mode = !self.dev_mode,

            _ => {}
        }
    }

    /// Handle mouse input
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_ROWS),
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_ROWS),
            MouseEventKind::Down(MouseButton::Left) => self.start_drag(mouse.column),
            MouseEventKind::Drag(MouseButton::Left) => self.drag_to(mouse.column),
            MouseEventKind::Up(MouseButton::Left) => self.end_drag(mouse.column, mouse.row),
            _ => {}
        }
    }

    /// Handle terminal resize
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        let content = content_area(self.size);
        let bounds = self.grid.area_units(content);
        self.controller.resize(bounds.width, bounds);

        for (state, page) in self.states.iter_mut().zip(&self.pages) {
            state.layout(page, content.width);
        }
        if !self.stage.is_active() {
            self.rebase_frames();
        }

        // Re-clamp and re-report the visible page
        self.scroll_by(0);
    }

    /// Header tap
    fn toggle(&mut self) {
        if self.stage.is_active() {
            tracing::debug!("Ignoring tab switch while a slide is playing");
            return;
        }
        match self.controller.toggle_tab() {
            Ok(_) => self.pump(),
            Err(e) => tracing::warn!(error = %e, "Tab switch failed"),
        }
    }

    /// Scroll the visible page by `delta` rows
    fn scroll_by(&mut self, delta: i32) {
        let index = self.controller.committed_index();
        let rows = self.content_rows();
        let Some(state) = self.states.get_mut(index) else {
            return;
        };
        let scroll = state.scroll_by(delta, rows, self.header_rows);

        let offset = -self
            .grid
            .rows_to_units(i32::try_from(scroll).unwrap_or(i32::MAX));
        if let Err(e) = self.controller.screen_scrolled(SCREENS[index], offset) {
            tracing::warn!(error = %e, "Scroll report failed");
        }
        self.pump();
    }

    fn start_drag(&mut self, col: u16) {
        // A drag whose release never arrived is a cancelled gesture
        if let Some(stale) = self.drag.take() {
            if stale.swiping {
                self.pan(stale.screen, GesturePhase::Cancelled, 0.0, 0.0);
            }
        }

        self.drag = Some(Drag {
            screen: SCREENS[self.controller.committed_index()],
            origin_col: col,
            last_col: col,
            last_at: Instant::now(),
            velocity: 0.0,
            moved: false,
            began: false,
            swiping: false,
        });
    }

    fn drag_to(&mut self, col: u16) {
        let Some(mut drag) = self.drag.take() else {
            return;
        };

        let now = Instant::now();
        let step = i32::from(col) - i32::from(drag.last_col);
        if step != 0 {
            let dt = now.duration_since(drag.last_at).as_secs_f32().max(1e-3);
            drag.velocity = self.grid.cols_to_units(step) / dt;
            drag.moved = true;
        }
        drag.last_col = col;
        drag.last_at = now;

        let translation = self
            .grid
            .cols_to_units(i32::from(col) - i32::from(drag.origin_col));

        if drag.moved && !drag.began {
            drag.began = true;
            if !self.stage.is_active() {
                let began = self.pan(drag.screen, GesturePhase::Began, translation, drag.velocity);
                drag.swiping = matches!(began, Some(SwipeCommand::Begin { .. }));
            }
        }
        if drag.swiping {
            self.pan(drag.screen, GesturePhase::Changed, translation, drag.velocity);
        }

        self.drag = Some(drag);
    }

    fn end_drag(&mut self, col: u16, row: u16) {
        let Some(drag) = self.drag.take() else {
            return;
        };

        if drag.swiping {
            let translation = self
                .grid
                .cols_to_units(i32::from(col) - i32::from(drag.origin_col));
            self.pan(drag.screen, GesturePhase::Ended, translation, drag.velocity);
        } else if !drag.moved && self.header_band().contains_row(i32::from(row)) {
            self.toggle();
        }
    }

    /// Deliver a pan callback and act on the result
    fn pan(
        &mut self,
        screen: ScreenId,
        phase: GesturePhase,
        translation: f32,
        velocity: f32,
    ) -> Option<SwipeCommand> {
        let gesture = PanGesture::horizontal(phase, translation, velocity);
        match self.controller.handle_pan(screen, &gesture) {
            Ok(command) => {
                self.pump();
                Some(command)
            }
            Err(e) => {
                tracing::warn!(error = %e, %screen, "Pan rejected");
                None
            }
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Place the visible page in view and the other beside it
    fn rebase_frames(&mut self) {
        let committed = self.controller.committed_index();
        for (index, &id) in SCREENS.iter().enumerate() {
            let Some(screen) = self.controller.screen_at(index) else {
                continue;
            };
            let bounds = screen.bounds();
            let shift = (index as f32 - committed as f32) * bounds.width;
            self.stage.add_view(view_for(id), bounds.offset_x(shift));
        }
    }

    fn content_rows(&self) -> u16 {
        content_area(self.size).height
    }

    fn header_band(&self) -> HeaderBand<'_> {
        let top = self.grid.units_to_rows(self.controller.header().frame().y);
        HeaderBand::new(
            [self.pages[0].title.as_str(), self.pages[1].title.as_str()],
            self.controller.selected_index(),
            top,
            self.header_rows,
        )
    }

    /// Page indices bottom to top
    fn draw_order(&self) -> Vec<usize> {
        let order: Vec<usize> = self
            .stage
            .container()
            .iter()
            .filter_map(|view| SCREENS.iter().position(|&id| view_for(id) == *view))
            .collect();
        if order.len() == SCREENS.len() {
            order
        } else {
            let visible = self.controller.committed_index();
            vec![1 - visible, visible]
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        terminal.draw(|frame| self.draw(frame))?;
        Ok(())
    }

    /// Draw the whole UI into a frame
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let content = Rect::new(
            area.x,
            area.y,
            area.width,
            area.height.saturating_sub(STATUS_HEIGHT),
        );

        for index in self.draw_order() {
            let Some(unit_frame) = self.stage.frame_of(view_for(SCREENS[index])) else {
                continue;
            };
            let cells = self.grid.to_cells(unit_frame);
            let view = PageView::new(cells.x, self.header_rows)
                .style(Style::default().bg(PAGE_BG[index]).fg(PAGE_FG));
            frame.render_stateful_widget(view, content, &mut self.states[index]);
        }

        frame.render_widget(self.header_band(), content);

        if area.height > content.height {
            let status = Rect::new(area.x, content.bottom(), area.width, STATUS_HEIGHT);
            frame.render_widget(Paragraph::new(self.status_line()), status);
        }
    }

    fn status_line(&self) -> Line<'static> {
        let mut spans = Vec::new();

        if let Some(session) = self.controller.interaction().session() {
            spans.push(Span::styled(
                format!("swiping {:>3.0}%  ", session.progress * 100.0),
                Style::default().fg(SWIPE_BLUE),
            ));
        }

        if self.dev_mode {
            spans.push(Span::styled(
                format!(
                    "sel {} · committed {} · header {:.1} · {} ",
                    self.controller.selected_index(),
                    self.controller.committed_index(),
                    self.controller.last_offset(),
                    if self.stage.is_scrubbing() {
                        "scrubbing"
                    } else if self.stage.is_active() {
                        "sliding"
                    } else {
                        "idle"
                    },
                ),
                Style::default().fg(SWIPE_BLUE),
            ));
        }

        spans.push(Span::styled(
            "Tab switch · ↑↓ scroll · drag swipe · q quit",
            Style::default().fg(DIM_GRAY),
        ));
        Line::from(spans)
    }
}

/// Area the pages and header draw into
fn content_area(size: (u16, u16)) -> Rect {
    Rect::new(0, 0, size.0, size.1.saturating_sub(STATUS_HEIGHT))
}
