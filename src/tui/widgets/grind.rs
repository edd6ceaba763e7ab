use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::stats::DailySummary;
use crate::tui::widgets::bars::progress_bar;
use crate::tui::widgets::color::{emphasis_style, parse_color};
use crate::Config;

pub fn grind_lines(summary: &DailySummary, bar_width: usize) -> Vec<Line<'static>> {
    let streak = match summary.streak {
        0 => "No streak yet. Hit your goal today to start one.".to_string(),
        1 => "Streak: 1 day".to_string(),
        n => format!("Streak: {} days", n),
    };

    vec![
        Line::styled(
            format!("Today: {} / {} tasks", summary.completed, summary.goal),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(progress_bar(summary.percent, bar_width)),
        Line::from(""),
        Line::styled(summary.tier.message(), emphasis_style(summary.tier.emphasis())),
        Line::from(""),
        Line::from(streak),
    ]
}

pub fn render_grind(f: &mut Frame, area: Rect, summary: &DailySummary, config: &Config) {
    let theme = &config.theme;
    // Leave room for the borders and the "[] 100%" around the bar
    let bar_width = (config.progress_bar_width as usize).min(area.width.saturating_sub(10) as usize);

    let paragraph = Paragraph::new(grind_lines(summary, bar_width))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Daily grind - {}", summary.date.format("%a %Y-%m-%d"))),
        )
        .style(Style::default().fg(parse_color(&theme.fg)).bg(parse_color(&theme.bg)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::DayCount;
    use chrono::NaiveDate;

    fn summary(counts: [u32; 7], goal: u32) -> DailySummary {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let series = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| DayCount {
                date: today - chrono::Duration::days(6 - i as i64),
                count,
            })
            .collect();
        DailySummary::from_series(today, series, goal)
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_grind_lines_for_partial_day() {
        let lines = grind_lines(&summary([0, 0, 0, 0, 0, 5, 1], 4), 8);
        assert_eq!(text(&lines[0]), "Today: 1 / 4 tasks");
        assert_eq!(text(&lines[2]), "[##------] 25%");
        assert_eq!(text(&lines[4]), "Good start, keep grinding.");
        assert!(text(&lines[6]).starts_with("No streak yet"));
    }

    #[test]
    fn test_grind_lines_when_goal_met() {
        let lines = grind_lines(&summary([0, 0, 0, 0, 3, 3, 3], 3), 4);
        assert_eq!(text(&lines[2]), "[####] 100%");
        assert_eq!(text(&lines[4]), "Goal crushed! You're on fire today.");
        assert_eq!(text(&lines[6]), "Streak: 3 days");
    }
}
