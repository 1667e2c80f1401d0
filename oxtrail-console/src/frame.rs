use colored::Colorize;

const RULE: &str = "----------------------------------------";

/// Dress up a screen for the terminal. The first line of every screen is its
/// header, numbered menu lines are the choices.
pub fn render(text: &str, color: bool) -> String {
    let mut out = String::with_capacity(text.len() + RULE.len() * 2);
    out.push_str(&paint_rule(color));
    out.push('\n');
    for (index, line) in text.lines().enumerate() {
        let painted = if !color {
            line.to_string()
        } else if index == 0 {
            line.bold().to_string()
        } else if is_menu_line(line) {
            line.bright_white().to_string()
        } else if line.starts_with('(') {
            line.dimmed().to_string()
        } else {
            line.to_string()
        };
        out.push_str(&painted);
        out.push('\n');
    }
    out.push_str(&paint_rule(color));
    out
}

fn paint_rule(color: bool) -> String {
    if color {
        RULE.cyan().to_string()
    } else {
        RULE.to_string()
    }
}

fn is_menu_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && trimmed[digits..].starts_with(". ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_frames_keep_the_text() {
        let framed = render("Day 3\n1. Continue on trail", false);
        let lines: Vec<&str> = framed.lines().collect();
        assert_eq!(lines, vec![RULE, "Day 3", "1. Continue on trail", RULE]);
    }

    #[test]
    fn menu_lines_need_a_number_and_a_dot() {
        assert!(is_menu_line("10. Quit"));
        assert!(is_menu_line("  2. Store - Buy supplies"));
        assert!(!is_menu_line("2024 was a good year"));
        assert!(!is_menu_line("Day 3"));
    }
}
