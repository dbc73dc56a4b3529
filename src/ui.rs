// UI module root: the menu session and its terminal front end

pub mod model;
pub mod render;
pub mod run;
pub mod update;

// Re-export commonly used symbols so call sites can stay at `crate::ui::...`.
pub use model::{ActionMenu, Align, CloseCallback, MenuColors, MenuConfig, Nav, Rgb, on_close};
pub use render::{render_full, render_result};
pub use run::run;
pub use update::handle_update;

// Messages driving the navigation state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Msg {
    Up,
    Down,
    Select,
    Back,
    /// The host finished the slide it was last asked to run.
    SlideFinished { finished: bool },
}
