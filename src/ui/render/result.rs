use crate::host::ResultWindow;
use crate::ui::render::styles::{STYLE_HINT, STYLE_RESULT_BOX, STYLE_RESULT_TITLE};
use crate::ui::render::util::{normalize_and_pad, truncate};

const HINT: &str = "press any key to exit";

/// Full-screen view of the window handed over when the menu closed.
pub fn render_result(window: &ResultWindow, width: usize, height: usize) -> String {
    // border and padding take two cells on each side
    let inner_width = width.saturating_sub(4);
    // border, title, spacer and the hint below the box
    let body_room = height.saturating_sub(5);

    let mut body: Vec<String> = window
        .body
        .lines()
        .map(|line| truncate(line, inner_width))
        .collect();
    if body.len() > body_room {
        body.truncate(body_room.saturating_sub(1));
        body.push("…".to_string());
    }

    let mut inner = vec![STYLE_RESULT_TITLE.render(&truncate(&window.title, inner_width))];
    if !body.is_empty() {
        inner.push(String::new());
        inner.extend(body);
    }
    let boxed = STYLE_RESULT_BOX
        .clone()
        .width(width.saturating_sub(2) as i32)
        .render(&inner.join("\n"));

    let mut lines: Vec<String> = boxed.lines().map(str::to_string).collect();
    lines.push(STYLE_HINT.render(&format!(" {}", truncate(HINT, width.saturating_sub(1)))));
    normalize_and_pad(lines, width, height)
}
