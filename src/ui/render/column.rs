use crate::ui::model::MenuColors;
use crate::ui::render::styles::color;
use crate::ui::render::CRUMB_WIDTH;
use lipgloss::Style;

/// Left column with one crumb per level of depth, `height` lines tall.
///
/// The column keeps its fill while a slide runs but drops the crumbs, so
/// the count changes only once the new level is in place.
pub fn render_crumbs(depth: u16, colors: MenuColors, visible: bool, height: usize) -> Vec<String> {
    let fill = Style::new()
        .background(color(colors.background))
        .width(CRUMB_WIDTH as i32);
    let crumb = fill.clone().foreground(color(colors.foreground)).bold(true);
    let shown = if visible { usize::from(depth) } else { 0 };
    (0..height)
        .map(|line| {
            if line < shown {
                crumb.render(" • ")
            } else {
                fill.render("   ")
            }
        })
        .collect()
}
