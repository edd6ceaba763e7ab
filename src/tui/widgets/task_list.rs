use chrono::NaiveDate;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, HighlightSpacing, List, ListItem, ListState};
use ratatui::Frame;

use crate::config::Theme;
use crate::dates::due_status;
use crate::models::Task;
use crate::tui::widgets::color::{due_color, parse_color, priority_color};
use crate::utils::truncate;
use crate::Config;

/// One open task: priority symbol, title, `#category`, due date
pub fn open_task_line(task: &Task, today: NaiveDate, theme: &Theme, max_width: usize) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("{} ", task.priority.symbol()),
            Style::default().fg(priority_color(task.priority)),
        ),
        Span::raw(truncate(&task.title, max_width.saturating_sub(3))),
    ];

    if task.has_category() {
        spans.push(Span::styled(
            format!("  #{}", task.category),
            Style::default().fg(parse_color(&theme.category)),
        ));
    }

    if let Some(due) = task.due.as_deref().filter(|d| !d.is_empty()) {
        let mut style = Style::default();
        if let Some(color) = due_color(due_status(due, today), theme) {
            style = style.fg(color);
        }
        spans.push(Span::styled(format!("  {}", due), style));
    }

    Line::from(spans)
}

/// One finished task: `[x]`, priority, title, category, due and the day it was completed
pub fn completed_task_line(task: &Task, theme: &Theme, max_width: usize) -> Line<'static> {
    let mut spans = vec![
        Span::styled("[x] ", Style::default().add_modifier(Modifier::DIM)),
        Span::styled(
            format!("{} ", task.priority.symbol()),
            Style::default().fg(priority_color(task.priority)),
        ),
        Span::styled(
            truncate(&task.title, max_width.saturating_sub(7)),
            Style::default().add_modifier(Modifier::CROSSED_OUT),
        ),
    ];

    if task.has_category() {
        spans.push(Span::styled(
            format!("  #{}", task.category),
            Style::default().fg(parse_color(&theme.category)),
        ));
    }
    if let Some(due) = task.due.as_deref().filter(|d| !d.is_empty()) {
        spans.push(Span::raw(format!("  (due {})", due)));
    }
    if let Some(date) = task.completed_date {
        spans.push(Span::styled(
            format!("  {}", date.format("%Y-%m-%d")),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    Line::from(spans)
}

pub fn render_task_list(
    f: &mut Frame,
    area: Rect,
    tasks: &[Task],
    list_state: &mut ListState,
    today: NaiveDate,
    config: &Config,
) {
    let theme = &config.theme;
    // Borders plus the "-> " marker
    let max_width = area.width.saturating_sub(5) as usize;

    let items: Vec<ListItem> = if tasks.is_empty() {
        vec![ListItem::new(Line::styled(
            "No open tasks. Press 'a' to add one.",
            Style::default().add_modifier(Modifier::DIM),
        ))]
    } else {
        tasks
            .iter()
            .map(|task| ListItem::new(open_task_line(task, today, theme, max_width)))
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Open"))
        .style(Style::default().fg(parse_color(&theme.fg)).bg(parse_color(&theme.bg)))
        .highlight_style(
            Style::default()
                .fg(parse_color(&theme.highlight_fg))
                .bg(parse_color(&theme.highlight_bg))
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("-> ")
        .highlight_spacing(HighlightSpacing::Always);

    f.render_stateful_widget(list, area, list_state);
}

pub fn render_completed_list(f: &mut Frame, area: Rect, tasks: &[Task], config: &Config) {
    let theme = &config.theme;
    let max_width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = if tasks.is_empty() {
        vec![ListItem::new(Line::styled(
            "Nothing completed yet.",
            Style::default().add_modifier(Modifier::DIM),
        ))]
    } else {
        tasks
            .iter()
            .map(|task| ListItem::new(completed_task_line(task, theme, max_width)))
            .collect()
    };

    let title = format!("Completed ({})", tasks.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(parse_color(&theme.fg)).bg(parse_color(&theme.bg)));

    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use ratatui::style::Color;

    fn jan_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn task(title: &str, category: &str, due: Option<&str>) -> Task {
        Task {
            id: 1,
            title: title.to_string(),
            category: category.to_string(),
            due: due.map(str::to_string),
            priority: Priority::High,
            done: false,
            completed_date: None,
            deleted: false,
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_open_line_shows_category_and_due() {
        let theme = Theme::default();
        let line = open_task_line(&task("Write report", "work", Some("2024-01-09")), jan_10(), &theme, 60);
        assert_eq!(text(&line), "🔴 Write report  #work  2024-01-09");

        let due = line.spans.last().unwrap();
        assert_eq!(due.style.fg, Some(Color::Red));
    }

    #[test]
    fn test_open_line_without_category_or_due() {
        let theme = Theme::default();
        let line = open_task_line(&task("Stretch", "", None), jan_10(), &theme, 60);
        assert_eq!(text(&line), "🔴 Stretch");
    }

    #[test]
    fn test_unparsed_due_has_no_color() {
        let theme = Theme::default();
        let line = open_task_line(&task("Call", "", Some("someday")), jan_10(), &theme, 60);
        assert_eq!(line.spans.last().unwrap().style.fg, None);
    }

    #[test]
    fn test_long_titles_are_truncated() {
        let theme = Theme::default();
        let line = open_task_line(&task("abcdefghijklmnop", "", None), jan_10(), &theme, 13);
        assert_eq!(text(&line), "🔴 abcdefg...");
    }

    #[test]
    fn test_completed_line() {
        let theme = Theme::default();
        let mut t = task("Ship it", "work", None);
        t.done = true;
        t.completed_date = Some(jan_10());
        let line = completed_task_line(&t, &theme, 60);
        assert_eq!(text(&line), "[x] 🔴 Ship it  #work  2024-01-10");

        t.due = Some("2024-01-12".to_string());
        t.priority = Priority::Low;
        let line = completed_task_line(&t, &theme, 60);
        assert_eq!(text(&line), "[x] 🟢 Ship it  #work  (due 2024-01-12)  2024-01-10");
    }
}
