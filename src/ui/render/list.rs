use crate::hierarchy::{DisplayMode, Item, Level};
use crate::ui::model::Align;
use crate::ui::render::styles::{STYLE_LABEL, STYLE_SELECTED, STYLE_SLIDING, STYLE_SUBMENU_MARK};
use crate::ui::render::util::fit;
use crate::ui::render::GRID_COLUMNS;

const SUBMENU_MARK: &str = "›";

fn label<T, C>(item: &Item<T, C>) -> &str {
    item.label().unwrap_or("")
}

fn mark<T, C>(item: &Item<T, C>) -> &'static str {
    if item.is_submenu() {
        SUBMENU_MARK
    } else {
        " "
    }
}

// one item per line: label on the left, submenu mark at the right edge
fn wide_line<T, C>(item: &Item<T, C>, selected: bool, sliding: bool, width: usize) -> String {
    if width < 3 {
        return fit(label(item), width);
    }
    let text = fit(&format!(" {}", label(item)), width - 2);
    let tail = format!("{} ", mark(item));
    if sliding {
        STYLE_SLIDING.render(&format!("{text}{tail}"))
    } else if selected {
        STYLE_SELECTED.render(&format!("{text}{tail}"))
    } else {
        format!("{}{}", STYLE_LABEL.render(&text), STYLE_SUBMENU_MARK.render(&tail))
    }
}

fn grid_cell<T, C>(item: &Item<T, C>, selected: bool, sliding: bool, width: usize) -> String {
    let mark = if item.is_submenu() { SUBMENU_MARK } else { "" };
    let text = fit(&format!(" {}{mark}", label(item)), width);
    if sliding {
        STYLE_SLIDING.render(&text)
    } else if selected {
        STYLE_SELECTED.render(&text)
    } else {
        STYLE_LABEL.render(&text)
    }
}

/// Rows of `level` for a content area `width` cells wide and at most `per` lines tall.
///
/// The window scrolls so the selected row stays visible. Short levels are
/// centered vertically when `align` asks for it.
pub fn render_rows<T, C>(
    level: &Level<T, C>,
    selected: usize,
    width: usize,
    per: usize,
    align: Align,
    sliding: bool,
) -> Vec<String> {
    if per == 0 {
        return Vec::new();
    }
    let (lines, selected_line) = match level.display_mode() {
        DisplayMode::Wide => {
            let lines: Vec<String> = level
                .items()
                .iter()
                .enumerate()
                .map(|(row, item)| wide_line(item, row == selected, sliding, width))
                .collect();
            (lines, selected)
        }
        DisplayMode::Thin => {
            let cell = width / GRID_COLUMNS;
            let lines: Vec<String> = level
                .items()
                .chunks(GRID_COLUMNS)
                .enumerate()
                .map(|(line, chunk)| {
                    chunk
                        .iter()
                        .enumerate()
                        .map(|(col, item)| {
                            let row = line * GRID_COLUMNS + col;
                            grid_cell(item, row == selected, sliding, cell)
                        })
                        .collect::<String>()
                })
                .collect();
            (lines, selected / GRID_COLUMNS)
        }
    };

    let start = (selected_line + 1).saturating_sub(per);
    let mut visible: Vec<String> = lines.into_iter().skip(start).take(per).collect();
    if align == Align::Center && visible.len() < per {
        let top = (per - visible.len()) / 2;
        visible.splice(0..0, std::iter::repeat(String::new()).take(top));
    }
    visible
}
