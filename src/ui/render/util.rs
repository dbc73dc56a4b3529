use lipgloss::Style;

pub fn normalize_and_pad(lines: Vec<String>, total_width: usize, per: usize) -> String {
    let line_style = Style::new().width(total_width as i32);
    let mut normalized: Vec<String> = lines.into_iter().map(|l| line_style.render(&l)).collect();
    if normalized.len() > per {
        normalized.truncate(per);
    } else {
        while normalized.len() < per {
            normalized.push(line_style.render(""));
        }
    }
    normalized.join("\n")
}

/// Cut `s` to at most `max` terminal cells, marking the cut with an ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if lipgloss::width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = Style::truncate_visible_line(s, max - 1);
    out.push('…');
    out
}

/// Right-pad `s` with spaces to exactly `width` cells, truncating if wider.
pub fn fit(s: &str, width: usize) -> String {
    let cut = truncate(s, width);
    let len = lipgloss::width(&cut);
    format!("{cut}{}", " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("settings", 20), "settings");
        assert_eq!(truncate("settings", 5), "sett…");
        assert_eq!(truncate("settings", 0), "");
    }

    #[test]
    fn fit_pads_and_cuts_to_width() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("", 0), "");
    }

    #[test]
    fn wide_characters_count_as_two_cells() {
        assert_eq!(truncate("设置设置", 8), "设置设置");
        assert_eq!(truncate("设置设置", 5), "设置…");
        assert_eq!(lipgloss::width(&truncate("设置设置", 4)), 3);
        assert_eq!(fit("设置", 6), "设置  ");
        assert_eq!(lipgloss::width(&fit("设置设置设置", 7)), 7);
    }
}
