use crate::ui::model::ActionMenu;
use crate::ui::render::column::render_crumbs;
use crate::ui::render::list::render_rows;
use crate::ui::render::modeline::render_modeline;
use crate::ui::render::result::render_result;
use crate::ui::render::util::normalize_and_pad;
use crate::ui::render::{CRUMB_WIDTH, Screen};

/// Whole terminal frame: crumb column and rows above the modeline, or the
/// result screen once the menu handed over to it.
pub fn render_full<T, C>(menu: &ActionMenu<T, C>, screen: &Screen) -> String {
    let (width, height) = screen.size();
    if let Some(window) = &screen.result {
        return render_result(window, width, height);
    }
    if !screen.menu_visible {
        return normalize_and_pad(Vec::new(), width, height);
    }

    let per = height.saturating_sub(1);
    let config = menu.config();
    let colors = config.map(|c| c.colors).unwrap_or_default();
    let align = config.map(|c| c.align).unwrap_or_default();

    let crumbs = render_crumbs(menu.depth(), colors, screen.crumbs_visible(), per);
    let content_width = width.saturating_sub(CRUMB_WIDTH);
    let offset = screen.content_offset().min(content_width);
    let rows = menu
        .level()
        .map(|level| {
            render_rows(
                level,
                screen.selected_row,
                content_width - offset,
                per,
                align,
                screen.sliding.is_some(),
            )
        })
        .unwrap_or_default();
    let pad = " ".repeat(offset);

    let body: Vec<String> = crumbs
        .into_iter()
        .enumerate()
        .map(|(i, crumb)| match rows.get(i) {
            Some(row) if !row.is_empty() => format!("{crumb}{pad}{row}"),
            _ => crumb,
        })
        .collect();

    let mut out = normalize_and_pad(body, width, per);
    let modeline = render_modeline(menu, &screen.title, width);
    if per > 0 {
        out.push('\n');
    }
    out.push_str(&modeline);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::{Hierarchy, LevelId};
    use crate::host::testing::RecordingHost;
    use crate::host::{ResultWindow, SlideDirection};
    use crate::ui::model::MenuConfig;
    use crate::ui::render::testing::strip_ansi;
    use crate::ui::Msg;
    use std::sync::Arc;

    fn menu(entries: usize) -> (ActionMenu<(), ()>, LevelId) {
        let mut tree = Hierarchy::new();
        let root = tree.create_level(entries as u16 + 1).unwrap();
        for i in 0..entries {
            tree.add_action(root, Some(format!("cmd{}", i + 1).as_str()), None, None)
                .unwrap();
        }
        let sub = tree.create_level(1).unwrap();
        tree.add_action(sub, Some("nested"), None, None).unwrap();
        tree.add_child(root, sub, Some("sub")).unwrap();
        let menu = ActionMenu::open(
            MenuConfig::new(Arc::new(tree), root, ()),
            RecordingHost::new().boxed(),
        )
        .unwrap();
        (menu, sub)
    }

    fn screen(width: usize, height: usize) -> Screen {
        Screen {
            width,
            height,
            title: "Main".to_string(),
            menu_visible: true,
            ..Screen::default()
        }
    }

    #[test]
    fn render_full_matches_dimensions() {
        let sizes = [(80usize, 24usize), (100usize, 10usize), (40usize, 20usize)];
        for (w, h) in sizes {
            let (m, _) = menu(50);
            let stripped = strip_ansi(&render_full(&m, &screen(w, h)));
            let lines: Vec<&str> = stripped.lines().collect();
            assert_eq!(
                lines.len(),
                h,
                "height mismatch for {w}x{h}\n<<output>>\n{stripped}"
            );
            for (idx, line) in lines.iter().enumerate() {
                let lw = line.chars().count();
                assert!(
                    lw <= w,
                    "line {idx} is {lw} chars wide for {w}x{h}\n<<output>>\n{stripped}"
                );
            }
            assert!(lines[0].contains("cmd1"));
            assert!(lines[h - 1].contains("Main"), "modeline is the last line");
        }
    }

    #[test]
    fn crumb_count_matches_depth() {
        let (mut m, sub) = menu(2);
        let count = |out: &str| out.lines().filter(|l| l.starts_with(" • ")).count();

        let root_view = strip_ansi(&render_full(&m, &screen(40, 10)));
        assert_eq!(count(&root_view), 1);

        m.update(Msg::Down);
        m.update(Msg::Down);
        m.update(Msg::Select);
        m.update(Msg::SlideFinished { finished: true });
        m.update(Msg::SlideFinished { finished: true });
        assert_eq!(m.current_level(), sub);
        let sub_view = strip_ansi(&render_full(&m, &screen(40, 10)));
        assert_eq!(count(&sub_view), 2);
        assert!(sub_view.contains("nested"));
        assert!(sub_view.contains("Main › sub"));
    }

    #[test]
    fn sliding_hides_crumbs_and_shifts_rows() {
        let (m, _) = menu(1);
        let mut s = screen(40, 6);
        s.sliding = Some(SlideDirection::Out);
        let out = strip_ansi(&render_full(&m, &s));
        assert!(!out.contains('•'));
        let first = out.lines().next().unwrap_or("");
        let indent = first.chars().skip(CRUMB_WIDTH).take_while(|c| *c == ' ').count();
        assert!(indent > s.content_offset(), "rows start past the offset: `{first}`");
    }

    #[test]
    fn result_window_replaces_the_menu() {
        let (m, _) = menu(1);
        let mut s = screen(40, 8);
        s.menu_visible = false;
        s.result = Some(ResultWindow::new("done", "all good"));
        let out = strip_ansi(&render_full(&m, &s));
        assert_eq!(out.lines().count(), 8);
        assert!(out.contains("all good"));
        assert!(!out.contains("cmd1"));
    }

    #[test]
    fn wide_labels_keep_the_frame_inside_the_terminal() {
        let mut tree: Hierarchy<(), ()> = Hierarchy::new();
        let root = tree.create_level(2).unwrap();
        let label = "设置".repeat(10);
        tree.add_action(root, Some(label.as_str()), None, None).unwrap();
        tree.add_action(root, Some("ok"), None, None).unwrap();
        let m = ActionMenu::open(
            MenuConfig::new(Arc::new(tree), root, ()),
            RecordingHost::new().boxed(),
        )
        .unwrap();

        let out = strip_ansi(&render_full(&m, &screen(30, 6)));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 6, "<<output>>\n{out}");
        for (idx, line) in lines.iter().enumerate() {
            let lw = lipgloss::width(line);
            assert!(lw <= 30, "line {idx} is {lw} cells wide\n<<output>>\n{out}");
        }
        assert!(lines[0].contains('…'));
        assert!(lines[1].contains("ok"));
        assert!(lines[5].contains("Main"));
    }

    #[test]
    fn tiny_terminal_renders_only_the_modeline() {
        let (m, _) = menu(3);
        let out = strip_ansi(&render_full(&m, &screen(30, 1)));
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("Main"));
    }
}
