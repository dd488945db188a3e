//! Display-width helpers for styled cell text
//!
//! Cell text may carry inline colour markup of the form
//! `<color_red>text</color>`. Widths are measured on the visible text only,
//! with wide glyphs counted by `unicode-width`.

use ratatui::style::{Color, Style};
use std::str::FromStr;
use unicode_width::UnicodeWidthStr;

const OPEN_TAG: &str = "<color_";
const CLOSE_TAG: &str = "</color>";

/// Visible width of text with colour markup removed
pub fn display_width(s: &str) -> usize {
    if s.contains('<') {
        strip_color_tags(s).width()
    } else {
        s.width()
    }
}

/// Remove all colour markup
pub fn strip_color_tags(s: &str) -> String {
    styled_runs(s, Style::default())
        .into_iter()
        .map(|(text, _)| text)
        .collect()
}

/// Split marked-up text into runs of plain text and their styles
///
/// Unknown colour names keep the base style; unmatched tags are kept as text.
pub fn styled_runs(s: &str, base: Style) -> Vec<(String, Style)> {
    let mut runs = Vec::new();
    let mut stack: Vec<Style> = Vec::new();
    let mut rest = s;
    let mut current = String::new();

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(OPEN_TAG) {
            if let Some(end) = after.find('>') {
                flush(&mut runs, &mut current, *stack.last().unwrap_or(&base));
                let style = match parse_color_name(&after[..end]) {
                    Some(color) => base.fg(color),
                    None => base,
                };
                stack.push(style);
                rest = &after[end + 1..];
                continue;
            }
        }
        if let Some(after) = rest.strip_prefix(CLOSE_TAG) {
            flush(&mut runs, &mut current, *stack.last().unwrap_or(&base));
            stack.pop();
            rest = after;
            continue;
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            current.push(c);
        }
        rest = chars.as_str();
    }
    flush(&mut runs, &mut current, *stack.last().unwrap_or(&base));
    runs
}

fn flush(runs: &mut Vec<(String, Style)>, current: &mut String, style: Style) {
    if !current.is_empty() {
        runs.push((std::mem::take(current), style));
    }
}

/// Parse a colour name as used in markup (`red`, `ltgray`, `light_blue`, `#ff8800`)
pub fn parse_color_name(name: &str) -> Option<Color> {
    let name = name.trim();
    let expanded = if let Some(rest) = name.strip_prefix("lt") {
        format!("light{rest}")
    } else if let Some(rest) = name.strip_prefix("dk") {
        format!("dark{rest}")
    } else {
        name.to_string()
    };
    Color::from_str(&expanded).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_ignores_markup() {
        assert_eq!(display_width("plain"), 5);
        assert_eq!(display_width("<color_red>12.5</color> kg"), 7);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn test_styled_runs() {
        let base = Style::default();
        let runs = styled_runs("a<color_red>b</color>c", base);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].0, "a");
        assert_eq!(runs[1], ("b".to_string(), base.fg(Color::Red)));
        assert_eq!(runs[2].0, "c");
    }

    #[test]
    fn test_unterminated_tag_is_text() {
        assert_eq!(strip_color_tags("<color_red"), "<color_red");
        assert_eq!(strip_color_tags("a < b"), "a < b");
    }

    #[test]
    fn test_parse_color_name() {
        assert_eq!(parse_color_name("red"), Some(Color::Red));
        assert_eq!(parse_color_name("ltblue"), Some(Color::LightBlue));
        assert_eq!(parse_color_name("dkgray"), Some(Color::DarkGray));
        assert_eq!(parse_color_name("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_color_name("no-such-colour"), None);
    }
}
