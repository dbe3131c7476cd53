//! Widgets
//!
//! - [`page`]: a tab's scrollable text at a horizontal shift
//! - [`header`]: the collapsible header band

pub mod header;
pub mod page;

pub use header::HeaderBand;
pub use page::{sample_pages, Page, PageState, PageView};
