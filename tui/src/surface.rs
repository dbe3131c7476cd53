//! Cell Geometry
//!
//! The switcher core works in float units; the terminal works in cells.
//! A [`CellGrid`] converts between the two. Cells are roughly twice as
//! tall as they are wide, so a column covers half the units of a row.
//!
//! Frames can sit partly or wholly off screen during a slide, so cell
//! frames carry signed origins and are clipped to the drawable area.

use ratatui::layout::Rect;
use tabswitch_core::Rect as UnitRect;

/// Default header height in rows
pub const HEADER_ROWS: u16 = 3;

/// Unit-to-cell conversion
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellGrid {
    col_units: f32,
    row_units: f32,
}

impl CellGrid {
    /// Grid with explicit cell sizes in units
    pub fn new(col_units: f32, row_units: f32) -> Self {
        Self {
            col_units: col_units.max(f32::EPSILON),
            row_units: row_units.max(f32::EPSILON),
        }
    }

    /// Grid on which a header `header_height` units tall spans `rows` rows
    pub fn for_header(header_height: f32, rows: u16) -> Self {
        let row_units = header_height / f32::from(rows.max(1));
        Self::new(row_units / 2.0, row_units)
    }

    /// Units per column
    pub fn col_units(&self) -> f32 {
        self.col_units
    }

    /// Units per row
    pub fn row_units(&self) -> f32 {
        self.row_units
    }

    pub fn cols_to_units(&self, cols: i32) -> f32 {
        cols as f32 * self.col_units
    }

    pub fn rows_to_units(&self, rows: i32) -> f32 {
        rows as f32 * self.row_units
    }

    pub fn units_to_cols(&self, x: f32) -> i32 {
        (x / self.col_units).round() as i32
    }

    pub fn units_to_rows(&self, y: f32) -> i32 {
        (y / self.row_units).round() as i32
    }

    /// A cell area expressed in units, anchored at the unit origin
    pub fn area_units(&self, area: Rect) -> UnitRect {
        UnitRect::new(
            0.0,
            0.0,
            self.cols_to_units(i32::from(area.width)),
            self.rows_to_units(i32::from(area.height)),
        )
    }

    /// Cell frame of a unit frame, relative to the area origin
    pub fn to_cells(&self, frame: UnitRect) -> CellFrame {
        CellFrame {
            x: self.units_to_cols(frame.x),
            y: self.units_to_rows(frame.y),
            width: self.units_to_cols(frame.width).max(0),
            height: self.units_to_rows(frame.height).max(0),
        }
    }
}

/// A frame in cells with a signed origin
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellFrame {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CellFrame {
    /// The visible part of this frame inside `area`, in buffer coordinates
    ///
    /// The frame's origin is relative to the area origin.
    pub fn clip(&self, area: Rect) -> Option<Rect> {
        let left = self.x.max(0);
        let top = self.y.max(0);
        let right = (self.x + self.width).min(i32::from(area.width));
        let bottom = (self.y + self.height).min(i32::from(area.height));
        if right <= left || bottom <= top {
            return None;
        }

        let to_u16 = |v: i32| u16::try_from(v).unwrap_or(u16::MAX);
        Some(Rect::new(
            area.x.saturating_add(to_u16(left)),
            area.y.saturating_add(to_u16(top)),
            to_u16(right - left),
            to_u16(bottom - top),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_grid_maps_header_to_rows() {
        let grid = CellGrid::for_header(100.0, HEADER_ROWS);
        assert_eq!(grid.units_to_rows(100.0), 3);
        assert_eq!(grid.units_to_rows(-100.0), -3);
        assert!((grid.col_units() * 2.0 - grid.row_units()).abs() < 1e-4);
    }

    #[test]
    fn test_area_round_trips_through_units() {
        let grid = CellGrid::new(2.0, 4.0);
        let area = Rect::new(0, 0, 80, 24);
        let units = grid.area_units(area);
        assert_eq!(units, UnitRect::new(0.0, 0.0, 160.0, 96.0));
        assert_eq!(
            grid.to_cells(units),
            CellFrame {
                x: 0,
                y: 0,
                width: 80,
                height: 24
            }
        );
    }

    #[test]
    fn test_clip_partially_offscreen_frame() {
        let area = Rect::new(0, 1, 80, 20);
        let frame = CellFrame {
            x: -30,
            y: 0,
            width: 80,
            height: 20,
        };
        assert_eq!(frame.clip(area), Some(Rect::new(0, 1, 50, 20)));

        let right = CellFrame { x: 70, ..frame };
        assert_eq!(right.clip(area), Some(Rect::new(70, 1, 10, 20)));
    }

    #[test]
    fn test_clip_fully_offscreen_frame() {
        let area = Rect::new(0, 0, 80, 20);
        let frame = CellFrame {
            x: 80,
            y: 0,
            width: 80,
            height: 20,
        };
        assert_eq!(frame.clip(area), None);
        assert_eq!(
            CellFrame {
                x: 0,
                y: -3,
                width: 80,
                height: 3
            }
            .clip(area),
            None
        );
    }
}
