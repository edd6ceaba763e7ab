use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::widgets::color::parse_color;
use crate::utils::truncate;
use crate::Config;

const SEPARATOR: &str = " • ";
const ELLIPSIS: &str = "...";

/// Join as many hints as fit in `max_width`, ending with "..." when some are dropped
pub fn fit_hints(hints: &[&str], max_width: usize) -> String {
    let mut text = String::new();

    for (i, hint) in hints.iter().enumerate() {
        let current_len = text.chars().count();
        let would_be_len = if i == 0 {
            hint.chars().count()
        } else {
            current_len + SEPARATOR.chars().count() + hint.chars().count()
        };

        if would_be_len > max_width {
            if i == 0 {
                return truncate(hint, max_width);
            }
            if current_len + ELLIPSIS.len() <= max_width {
                text.push_str(ELLIPSIS);
            } else {
                text = text.chars().take(max_width.saturating_sub(ELLIPSIS.len())).collect();
                text.push_str(ELLIPSIS);
            }
            return text;
        }

        if i > 0 {
            text.push_str(SEPARATOR);
        }
        text.push_str(hint);
    }

    text
}

/// One line at the bottom: the status message if there is one, otherwise key hints
pub fn render_status_bar(f: &mut Frame, area: Rect, message: Option<&str>, hints: &[&str], config: &Config) {
    let theme = &config.theme;
    let width = area.width as usize;

    let (content, style) = match message {
        Some(msg) => (
            truncate(msg, width),
            Style::default()
                .fg(parse_color(&theme.highlight_fg))
                .bg(parse_color(&theme.highlight_bg))
                .add_modifier(Modifier::BOLD),
        ),
        None => (
            fit_hints(hints, width),
            Style::default().fg(parse_color(&theme.fg)).bg(parse_color(&theme.bg)),
        ),
    };

    f.render_widget(Paragraph::new(content).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_hints_fit() {
        assert_eq!(fit_hints(&["a: add", "q: quit"], 40), "a: add • q: quit");
    }

    #[test]
    fn test_overflow_adds_ellipsis() {
        let text = fit_hints(&["a: add", "d: done", "q: quit"], 19);
        assert_eq!(text, "a: add • d: done...");

        // No room for the ellipsis after the last hint, so it gets cut
        let tight = fit_hints(&["a: add", "d: done", "q: quit"], 18);
        assert_eq!(tight, "a: add • d: don...");
        assert_eq!(tight.chars().count(), 18);
    }

    #[test]
    fn test_first_hint_too_long() {
        assert_eq!(fit_hints(&["abcdefghij"], 6), "abc...");
    }

    #[test]
    fn test_empty_hints() {
        assert_eq!(fit_hints(&[], 10), "");
    }
}
