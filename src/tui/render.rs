use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::app::View;
use crate::tui::widgets::{
    bars::progress_bar,
    color::parse_color,
    grind::render_grind,
    prompt::render_prompt,
    status_bar::render_status_bar,
    task_list::{render_completed_list, render_task_list},
    weekly::render_weekly,
};
use crate::tui::{App, Layout};

pub fn view_title(view: View) -> &'static str {
    match view {
        View::Dashboard => "Dashboard",
        View::Completed => "Completed",
        View::Grind => "Daily Grind",
        View::Weekly => "Weekly Review",
    }
}

pub fn key_hints(view: View, prompt_open: bool) -> &'static [&'static str] {
    if prompt_open {
        return &["Enter: submit", "Esc: cancel", "Ctrl+C: quit"];
    }
    match view {
        View::Dashboard => &[
            "↑/↓ j/k: move",
            "a: add",
            "d: done",
            "x: delete",
            "f: filter",
            "/: search",
            "b: clear filter",
            "c: completed",
            "g: grind",
            "w: weekly",
            "q: quit",
        ],
        View::Grind => &["s: set goal", "b: back", "q: quit"],
        View::Completed | View::Weekly => &["b: back", "q: quit"],
    }
}

/// `Total: n  Done: n  Progress: p%`
pub fn footer_text(totals: (u32, u32), percent: u32) -> String {
    format!("Total: {}  Done: {}  Progress: {}%", totals.0, totals.1, percent)
}

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    render_header(f, layout.header_area, app);

    match app.view {
        View::Dashboard => render_dashboard(f, layout.body_area, app),
        View::Completed => render_completed_list(f, layout.body_area, &app.completed_tasks, &app.config),
        View::Grind => render_grind(f, layout.body_area, &app.summary, &app.config),
        View::Weekly => render_weekly(f, layout.body_area, &app.summary, &app.config),
    }

    if let Some(prompt) = &app.prompt {
        render_prompt(f, layout.prompt_area, prompt, &app.config);
    }

    render_status_bar(
        f,
        layout.status_area,
        app.status.message.as_deref(),
        key_hints(app.view, app.prompt.is_some()),
        &app.config,
    );
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.config.theme;
    let summary = &app.summary;

    let lines = vec![
        Line::from(vec![
            Span::styled("dayplan", Style::default().fg(parse_color(&theme.highlight_bg)).add_modifier(Modifier::BOLD)),
            Span::raw(" | "),
            Span::styled(view_title(app.view), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::styled(
            format!(
                "{}  Today: {}/{}",
                summary.date.format("%A %Y-%m-%d"),
                summary.completed,
                summary.goal
            ),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ];

    let header = Paragraph::new(lines)
        .style(Style::default().fg(parse_color(&theme.fg)).bg(parse_color(&theme.bg)));
    f.render_widget(header, area);
}

fn render_dashboard(f: &mut Frame, area: Rect, app: &mut App) {
    let subtitle = app.filter.subtitle();
    let subtitle_height = if subtitle.is_some() { 1 } else { 0 };

    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(subtitle_height),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(area);

    if let Some(subtitle) = subtitle {
        let line = Line::styled(subtitle, Style::default().add_modifier(Modifier::ITALIC));
        f.render_widget(Paragraph::new(line), chunks[0]);
    }

    let today = app.today();
    render_task_list(f, chunks[1], &app.open_tasks, &mut app.list_state, today, &app.config);

    let percent = app.progress_percent();
    let bar_width = (app.config.progress_bar_width as usize).min(area.width.saturating_sub(8) as usize);
    let footer = Paragraph::new(vec![
        Line::from(footer_text(app.totals, percent)),
        Line::from(progress_bar(percent, bar_width)),
    ])
    .style(Style::default().fg(parse_color(&app.config.theme.fg)).bg(parse_color(&app.config.theme.bg)));
    f.render_widget(footer, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Input;
    use crate::{Config, Database};
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn jan_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| {
                let layout = Layout::calculate(f.area(), app.prompt.is_some());
                render(f, app, &layout);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_footer_text() {
        assert_eq!(footer_text((4, 1), 25), "Total: 4  Done: 1  Progress: 25%");
        assert_eq!(footer_text((0, 0), 0), "Total: 0  Done: 0  Progress: 0%");
    }

    #[test]
    fn test_hints_depend_on_view_and_prompt() {
        assert!(key_hints(View::Dashboard, false).contains(&"a: add"));
        assert!(key_hints(View::Grind, false).contains(&"s: set goal"));
        assert_eq!(key_hints(View::Weekly, true)[0], "Enter: submit");
    }

    #[test]
    fn test_every_view_draws() {
        let db = Database::open_in_memory().unwrap();
        db.add_task("Write report", "work", "2024-01-12", crate::Priority::High).unwrap();
        let mut app = App::with_clock(Config::default(), db, jan_10).unwrap();

        let screen = draw(&mut app);
        assert!(screen.contains("Dashboard"));
        assert!(screen.contains("-> "));
        assert!(screen.contains("#work"));
        assert!(screen.contains("Total: 1  Done: 0  Progress: 0%"));

        for (key, title) in [('g', "Daily Grind"), ('w', "Weekly Review"), ('c', "Completed")] {
            app.handle_input(Input::Char('b')).unwrap();
            app.handle_input(Input::Char(key)).unwrap();
            assert!(draw(&mut app).contains(title));
        }
    }

    #[test]
    fn test_prompt_and_subtitle_draw() {
        let db = Database::open_in_memory().unwrap();
        let mut app = App::with_clock(Config::default(), db, jan_10).unwrap();

        app.handle_input(Input::Char('/')).unwrap();
        app.handle_input(Input::Char('x')).unwrap();
        assert!(draw(&mut app).contains("Search title: x"));

        app.handle_input(Input::Enter).unwrap();
        assert!(draw(&mut app).contains("Search results for 'x'"));
    }
}
