use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::app::{Prompt, PromptKind};
use crate::tui::widgets::color::parse_color;
use crate::Config;

/// Block title, with the step number for the multi-field add prompt
pub fn prompt_title(prompt: &Prompt) -> String {
    match prompt.kind {
        PromptKind::AddTask => format!("{} ({}/4) - Enter: next, Esc: cancel", prompt.title(), prompt.answers.len() + 1),
        _ => format!("{} - Enter: apply, Esc: cancel", prompt.title()),
    }
}

/// Terminal cell just after the typed text, clamped inside the box
pub fn cursor_position(area: Rect, prompt: &Prompt) -> (u16, u16) {
    let typed = (prompt.label().chars().count() + prompt.buffer.chars().count()) as u16;
    let max_x = area.x + area.width.saturating_sub(2);
    ((area.x + 1 + typed).min(max_x), area.y + 1)
}

pub fn render_prompt(f: &mut Frame, area: Rect, prompt: &Prompt, config: &Config) {
    if area.height == 0 {
        return;
    }
    let theme = &config.theme;

    let line = Line::from(vec![
        Span::styled(prompt.label(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(prompt.buffer.clone()),
    ]);

    let paragraph = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(prompt_title(prompt))
                .border_style(Style::default().fg(parse_color(&theme.highlight_bg))),
        )
        .style(Style::default().fg(parse_color(&theme.fg)).bg(parse_color(&theme.bg)));

    f.render_widget(paragraph, area);
    f.set_cursor_position(cursor_position(area, prompt));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_follows_buffer() {
        let area = Rect::new(0, 10, 80, 3);
        let mut prompt = Prompt::new(PromptKind::Search);
        assert_eq!(cursor_position(area, &prompt), (15, 11));

        prompt.buffer.push_str("abc");
        assert_eq!(cursor_position(area, &prompt), (18, 11));
    }

    #[test]
    fn test_cursor_clamped_to_box() {
        let area = Rect::new(0, 0, 20, 3);
        let mut prompt = Prompt::new(PromptKind::Search);
        prompt.buffer = "x".repeat(50);
        assert_eq!(cursor_position(area, &prompt), (18, 1));
    }

    #[test]
    fn test_add_prompt_title_counts_steps() {
        let mut prompt = Prompt::new(PromptKind::AddTask);
        assert!(prompt_title(&prompt).starts_with("New task (1/4)"));
        prompt.answers.push("Title".to_string());
        assert!(prompt_title(&prompt).starts_with("New task (2/4)"));
        assert_eq!(prompt.label(), "Category: ");
    }
}
