use crate::ui::model::ActionMenu;
use crate::ui::render::styles::STYLE_MODELINE;
use crate::ui::render::util::truncate;
use lipgloss::Color;

const PATH_SEP: &str = " › ";

/// Names along the path from the root to the visible level.
///
/// The root is called `title`; every other level is named after the item
/// that leads into it.
pub fn breadcrumbs<T, C>(menu: &ActionMenu<T, C>, title: &str) -> Vec<String> {
    let tree = menu.hierarchy();
    let path: Vec<_> = tree.ancestors(menu.current_level()).collect();
    let mut names: Vec<String> = path
        .windows(2)
        .map(|pair| {
            let (child, parent) = (pair[0], pair[1]);
            tree.level(parent)
                .and_then(|level| level.items().iter().find(|item| item.child() == Some(child)))
                .and_then(|item| item.label())
                .unwrap_or("")
                .to_string()
        })
        .collect();
    names.push(title.to_string());
    names.reverse();
    names
}

/// Single status line: the path on the left, key hints on the right.
pub fn render_modeline<T, C>(menu: &ActionMenu<T, C>, title: &str, width: usize) -> String {
    let inner = STYLE_MODELINE.clone().padding(0, 0, 0, 0);
    let key_style = STYLE_MODELINE
        .clone()
        .foreground(Color::from_rgb(238, 0, 238))
        .bold(true)
        .padding(0, 0, 0, 0);
    let busy_style = STYLE_MODELINE.clone().faint(true).padding(0, 0, 0, 0);

    let pairs_def: Vec<(&str, &str)> = if menu.is_frozen() {
        Vec::new()
    } else {
        vec![("↑↓", "move"), ("⏎", "select"), ("⎋", "back")]
    };
    let pairs: Vec<(String, usize)> = pairs_def
        .iter()
        .map(|(k, d)| {
            let plain = lipgloss::width(d) + 1 + lipgloss::width(k);
            let rendered = format!("{}{}{}", inner.render(d), inner.render(":"), key_style.render(k));
            (rendered, plain)
        })
        .collect();

    // one cell of padding at each edge
    let avail = width.saturating_sub(2);
    let mut right_plain = if menu.is_frozen() { lipgloss::width("working…") } else { 0 };
    let mut count = pairs.len();
    let hints_width = |n: usize| -> usize {
        if n == 0 {
            0
        } else {
            pairs.iter().take(n).map(|(_, w)| *w).sum::<usize>() + 2 * (n - 1)
        }
    };
    // keep at least a little of the path visible
    while count > 0 && hints_width(count) + 8 > avail {
        count -= 1;
    }
    right_plain += hints_width(count);
    let right = if menu.is_frozen() {
        busy_style.render("working…")
    } else {
        pairs
            .iter()
            .take(count)
            .map(|(r, _)| r.clone())
            .collect::<Vec<_>>()
            .join(&inner.render("  "))
    };

    let path_room = avail.saturating_sub(right_plain + 1);
    let path = truncate(&breadcrumbs(menu, title).join(PATH_SEP), path_room);
    let gap = avail.saturating_sub(lipgloss::width(&path) + right_plain);
    let filler = if gap > 0 {
        STYLE_MODELINE.clone().width(gap as i32).render("")
    } else {
        String::new()
    };

    let line = format!("{}{filler}{right}", inner.clone().bold(true).render(&path));
    STYLE_MODELINE.clone().width(width as i32).render(&line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::Hierarchy;
    use crate::host::testing::RecordingHost;
    use crate::ui::model::MenuConfig;
    use crate::ui::render::testing::strip_ansi;
    use crate::ui::Msg;
    use std::sync::Arc;

    fn nested() -> ActionMenu<(), ()> {
        let mut tree = Hierarchy::new();
        let root = tree.create_level(1).unwrap();
        let tools = tree.create_level(1).unwrap();
        let git = tree.create_level(1).unwrap();
        tree.add_child(root, tools, Some("Tools")).unwrap();
        tree.add_child(tools, git, Some("Git")).unwrap();
        tree.add_action(git, Some("status"), None, None).unwrap();
        let host = RecordingHost::new();
        let mut menu =
            ActionMenu::open(MenuConfig::new(Arc::new(tree), root, ()), host.boxed()).unwrap();
        for _ in 0..2 {
            menu.update(Msg::Select);
            menu.update(Msg::SlideFinished { finished: true });
            menu.update(Msg::SlideFinished { finished: true });
        }
        menu
    }

    #[test]
    fn breadcrumbs_follow_the_items_that_were_descended() {
        let menu = nested();
        assert_eq!(menu.depth(), 3);
        assert_eq!(breadcrumbs(&menu, "Main"), vec!["Main", "Tools", "Git"]);
    }

    #[test]
    fn modeline_shows_path_and_hints_within_width() {
        let menu = nested();
        let line = strip_ansi(&render_modeline(&menu, "Main", 80));
        assert!(line.contains("Main › Tools › Git"));
        assert!(line.contains("select:⏎"));
        assert!(line.chars().count() <= 80);
    }

    #[test]
    fn wide_path_names_fit_the_line() {
        let mut tree: Hierarchy<(), ()> = Hierarchy::new();
        let root = tree.create_level(1).unwrap();
        let sub = tree.create_level(1).unwrap();
        tree.add_child(root, sub, Some("设置设置设置设置设置")).unwrap();
        tree.add_action(sub, Some("ok"), None, None).unwrap();
        let mut menu = ActionMenu::open(
            MenuConfig::new(Arc::new(tree), root, ()),
            RecordingHost::new().boxed(),
        )
        .unwrap();
        menu.update(Msg::Select);
        menu.update(Msg::SlideFinished { finished: true });
        menu.update(Msg::SlideFinished { finished: true });

        let line = render_modeline(&menu, "主菜单", 30);
        assert_eq!(line.lines().count(), 1);
        assert!(lipgloss::width(&line) <= 30);
        assert!(strip_ansi(&line).contains("主菜单"));
    }

    #[test]
    fn narrow_modeline_drops_hints_first() {
        let menu = nested();
        let line = strip_ansi(&render_modeline(&menu, "Main", 24));
        assert!(!line.contains("back:⎋"));
        assert!(line.contains("Main"));
    }

    #[test]
    fn frozen_menu_shows_it_is_working() {
        let mut menu = nested();
        menu.freeze();
        let line = strip_ansi(&render_modeline(&menu, "Main", 80));
        assert!(line.contains("working…"));
        assert!(!line.contains("select"));
    }
}
