//! Header Band
//!
//! The collapsible band above both pages. It shows the two tab titles with
//! the selected one highlighted and can sit partly above the top edge.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::theme::{HEADER_BG, HEADER_FG, TAB_ACTIVE, TAB_INACTIVE};

/// Separator between the two titles
const SEPARATOR: &str = "  │  ";

/// Header band at a signed row offset
pub struct HeaderBand<'a> {
    titles: [&'a str; 2],
    selected: usize,
    top: i32,
    rows: u16,
}

impl<'a> HeaderBand<'a> {
    /// Band `rows` tall whose top edge is `top` rows below the area origin
    pub fn new(titles: [&'a str; 2], selected: usize, top: i32, rows: u16) -> Self {
        Self {
            titles,
            selected,
            top,
            rows,
        }
    }

    /// Row (relative to the area) carrying the titles
    pub fn title_row(&self) -> i32 {
        self.top + i32::from(self.rows / 2)
    }

    /// Whether a row (relative to the area) is inside the band
    pub fn contains_row(&self, row: i32) -> bool {
        row >= self.top && row < self.top + i32::from(self.rows)
    }
}

impl Widget for HeaderBand<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let base = Style::default().bg(HEADER_BG).fg(HEADER_FG);

        for row in 0..area.height {
            if !self.contains_row(i32::from(row)) {
                continue;
            }
            let line = Rect::new(area.x, area.y + row, area.width, 1);
            buf.set_style(line, base);
            for x in line.left()..line.right() {
                buf[(x, line.y)].set_symbol(" ");
            }
        }

        let Ok(row) = u16::try_from(self.title_row()) else {
            return;
        };
        if row >= area.height {
            return;
        }

        let total = self.titles[0].width() + SEPARATOR.width() + self.titles[1].width();
        let start = usize::from(area.width).saturating_sub(total) / 2;
        let y = area.y + row;
        let mut x = area.x + u16::try_from(start).unwrap_or(0);

        for (index, title) in self.titles.iter().enumerate() {
            let style = if index == self.selected {
                base.fg(TAB_ACTIVE).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                base.fg(TAB_INACTIVE)
            };
            let remaining = usize::from(area.right().saturating_sub(x));
            let (next, _) = buf.set_stringn(x, y, title, remaining, style);
            x = next;

            if index == 0 {
                let remaining = usize::from(area.right().saturating_sub(x));
                let (next, _) = buf.set_stringn(x, y, SEPARATOR, remaining, base);
                x = next;
            }
        }
    }
}
