//! Theme and Colors
//!
//! Palette for the header band, the two pages and the status line.

use ratatui::style::Color;

// ============================================================================
// Header
// ============================================================================

/// Header background - deep indigo
pub const HEADER_BG: Color = Color::Rgb(48, 44, 92);

/// Header text
pub const HEADER_FG: Color = Color::Rgb(220, 218, 240);

/// Selected tab title - warm yellow
pub const TAB_ACTIVE: Color = Color::Rgb(255, 223, 128);

/// Unselected tab title
pub const TAB_INACTIVE: Color = Color::Rgb(150, 146, 190);

// ============================================================================
// Pages
// ============================================================================

/// Page backgrounds, one per tab, so a slide is easy to follow
pub const PAGE_BG: [Color; 2] = [Color::Rgb(24, 30, 40), Color::Rgb(34, 26, 36)];

/// Page text
pub const PAGE_FG: Color = Color::Rgb(210, 210, 210);

// ============================================================================
// Status Line
// ============================================================================

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Swipe in progress
pub const SWIPE_BLUE: Color = Color::Rgb(100, 180, 255);
