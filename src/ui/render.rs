// Render module split into focused submodules: crumb column, rows, modeline and result screen.

pub mod column;
pub mod full;
pub mod list;
pub mod modeline;
pub mod result;
pub mod styles;
pub mod util;

use crate::host::{ResultWindow, SLIDE_OFFSET, Slide, SlideDirection};

pub use column::render_crumbs;
pub use full::render_full;
pub use list::render_rows;
pub use modeline::{breadcrumbs, render_modeline};
pub use result::render_result;

pub const DEFAULT_WIDTH: usize = 80;
pub const DEFAULT_HEIGHT: usize = 24;
/// Items per grid row for levels in thin display mode.
pub const GRID_COLUMNS: usize = 3;
/// Cells taken by the crumb column at the left edge.
pub const CRUMB_WIDTH: usize = 3;

/// What the terminal currently shows, shared between the host and the renderer.
#[derive(Clone, Debug, Default)]
pub struct Screen {
    pub width: usize,
    pub height: usize,
    /// Name of the root level in the modeline.
    pub title: String,
    pub selected_row: usize,
    /// Slide currently running, if any.
    pub sliding: Option<SlideDirection>,
    /// Slides requested by the menu that have not been started yet.
    pub pending: Vec<Slide>,
    pub menu_visible: bool,
    pub result: Option<ResultWindow>,
}

impl Screen {
    /// Terminal size with defaults for a size not reported yet.
    pub fn size(&self) -> (usize, usize) {
        let width = if self.width > 0 { self.width } else { DEFAULT_WIDTH };
        let height = if self.height > 0 {
            self.height
        } else {
            DEFAULT_HEIGHT
        };
        (width, height)
    }

    /// How far the rows are pushed right by the running slide.
    pub fn content_offset(&self) -> usize {
        let offset = usize::from(SLIDE_OFFSET);
        match self.sliding {
            None => 0,
            Some(SlideDirection::Out) => offset,
            Some(SlideDirection::In) => offset / 2,
        }
    }

    pub fn crumbs_visible(&self) -> bool {
        self.sliding.is_none()
    }
}
