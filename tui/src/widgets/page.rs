//! Page Widget
//!
//! One tab's scrollable text, drawn at a signed horizontal shift so it can
//! slide in and out of view. The first `top_pad` rows of the scroll range
//! sit under the header.

use std::fs;
use std::io;
use std::path::Path;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::StatefulWidget;
use textwrap::wrap;
use unicode_width::UnicodeWidthChar;

/// A tab's content
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Title shown in the header
    pub title: String,
    /// Raw text, wrapped at render time
    pub text: String,
}

impl Page {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Load a page from a text file, titled by the file stem
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        let title = path
            .file_stem()
            .map_or_else(|| "Untitled".to_string(), |s| s.to_string_lossy().into_owned());
        Ok(Self::new(title, text))
    }
}

/// Built-in pages used when no files are given
pub fn sample_pages() -> [Page; 2] {
    let inbox = (1..=60)
        .map(|n| format!("Message {n:02}: scroll to collapse the header, drag sideways to switch."))
        .collect::<Vec<_>>()
        .join("\n");
    let archive = (1..=40)
        .map(|n| format!("Archived item {n:02}"))
        .collect::<Vec<_>>()
        .join("\n");
    [Page::new("Inbox", inbox), Page::new("Archive", archive)]
}

/// Scroll state for a page
#[derive(Clone, Debug, Default)]
pub struct PageState {
    /// Rows scrolled from the top
    pub scroll: usize,
    /// Wrapped lines at `wrap_width`
    lines: Vec<String>,
    /// Width the cached lines were wrapped at
    wrap_width: u16,
}

impl PageState {
    /// Re-wrap `page` if the width changed
    pub fn layout(&mut self, page: &Page, width: u16) {
        if width == self.wrap_width && !self.lines.is_empty() {
            return;
        }
        self.wrap_width = width;
        self.lines = page
            .text
            .lines()
            .flat_map(|line| {
                if line.is_empty() || width == 0 {
                    vec![String::new()]
                } else {
                    wrap(line, usize::from(width))
                        .into_iter()
                        .map(|cow| cow.to_string())
                        .collect()
                }
            })
            .collect();
    }

    /// Wrapped line count
    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    /// Largest scroll for a viewport `rows` tall with `top_pad` header rows
    pub fn max_scroll(&self, rows: u16, top_pad: u16) -> usize {
        (self.lines.len() + usize::from(top_pad)).saturating_sub(usize::from(rows))
    }

    /// Scroll by `delta` rows (positive = down), clamped; returns the new scroll
    pub fn scroll_by(&mut self, delta: i32, rows: u16, top_pad: u16) -> usize {
        let max = self.max_scroll(rows, top_pad);
        let target = i64::try_from(self.scroll).unwrap_or(i64::MAX) + i64::from(delta);
        self.scroll = usize::try_from(target.max(0)).unwrap_or(0).min(max);
        self.scroll
    }
}

/// A page drawn `shift` columns right of the area origin
pub struct PageView {
    shift: i32,
    top_pad: u16,
    style: Style,
}

impl PageView {
    pub fn new(shift: i32, top_pad: u16) -> Self {
        Self {
            shift,
            top_pad,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl StatefulWidget for PageView {
    type State = PageState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let width = i32::from(area.width);
        let left = self.shift.max(0);
        let right = (self.shift + width).min(width);
        if right <= left {
            return;
        }

        // Solid background so a sliding page hides what is under it
        let to_u16 = |v: i32| u16::try_from(v).unwrap_or(0);
        let band = Rect::new(area.x + to_u16(left), area.y, to_u16(right - left), area.height);
        buf.set_style(band, self.style);
        for y in band.top()..band.bottom() {
            for x in band.left()..band.right() {
                buf[(x, y)].set_symbol(" ");
            }
        }

        for row in 0..area.height {
            let Some(index) = (state.scroll + usize::from(row)).checked_sub(usize::from(self.top_pad))
            else {
                continue;
            };
            let Some(line) = state.lines.get(index) else {
                break;
            };

            let y = area.y + row;
            let mut col = self.shift;
            for ch in line.chars() {
                let w = i32::try_from(ch.width().unwrap_or(0)).unwrap_or(0);
                if col >= right {
                    break;
                }
                if col >= left && col + w <= right && w > 0 {
                    let x = area.x + to_u16(col);
                    buf[(x, y)].set_char(ch).set_style(self.style);
                }
                col += w;
            }
        }
    }
}
