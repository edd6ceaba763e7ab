use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::stats::{DailySummary, DayCount};
use crate::tui::widgets::bars::{progress_bar, relative_bar};
use crate::tui::widgets::color::parse_color;
use crate::Config;

/// `Mon 01-08 ███░░ 3`, one row per day, bars scaled to the busiest day
pub fn chart_rows(series: &[DayCount], width: usize) -> Vec<String> {
    let max = series.iter().map(|d| d.count).max().unwrap_or(0);
    series
        .iter()
        .map(|day| {
            format!(
                "{} {} {}",
                day.date.format("%a %m-%d"),
                relative_bar(day.count, max, width),
                day.count
            )
        })
        .collect()
}

pub fn weekly_lines(summary: &DailySummary, chart_width: usize, bar_width: usize) -> Vec<Line<'static>> {
    let weekly = summary.weekly();
    let mut lines: Vec<Line> = chart_rows(&summary.series, chart_width)
        .into_iter()
        .map(Line::from)
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Total: {}  Average: {:.1}/day",
        weekly.total, weekly.average
    )));
    lines.push(Line::from(format!(
        "Weekly goal: {}/{}  {}",
        weekly.total,
        weekly.weekly_goal,
        progress_bar(weekly.percent, bar_width)
    )));

    match summary.best_day() {
        Some(best) if best.count > 0 => lines.push(Line::from(format!(
            "Best day: {} ({})",
            best.date.format("%a %m-%d"),
            best.count
        ))),
        _ => lines.push(Line::from("Best day: none yet")),
    }
    lines.push(Line::styled(
        format!("Streak: {}", summary.streak),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    lines
}

pub fn render_weekly(f: &mut Frame, area: Rect, summary: &DailySummary, config: &Config) {
    let theme = &config.theme;
    let inner_width = area.width.saturating_sub(2) as usize;
    // "Mon 01-08 " plus room for the count
    let chart_width = (config.chart_width as usize).min(inner_width.saturating_sub(14));
    let bar_width = (config.progress_bar_width as usize).min(inner_width.saturating_sub(30));

    let paragraph = Paragraph::new(weekly_lines(summary, chart_width, bar_width))
        .block(Block::default().borders(Borders::ALL).title("Last 7 days"))
        .style(Style::default().fg(parse_color(&theme.fg)).bg(parse_color(&theme.bg)));

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(counts: [u32; 7]) -> Vec<DayCount> {
        let today = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| DayCount {
                date: today - chrono::Duration::days(6 - i as i64),
                count,
            })
            .collect()
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_chart_rows() {
        let rows = chart_rows(&series([3, 5, 0, 0, 0, 0, 1]), 5);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], "Mon 01-08 ███░░ 3");
        assert_eq!(rows[1], "Tue 01-09 █████ 5");
        assert_eq!(rows[2], "Wed 01-10 ░░░░░ 0");
        assert_eq!(rows[6], "Sun 01-14 █░░░░ 1");
    }

    #[test]
    fn test_chart_rows_all_zero() {
        let rows = chart_rows(&series([0; 7]), 3);
        assert!(rows.iter().all(|r| r.contains("░░░ 0")));
    }

    #[test]
    fn test_weekly_lines_totals() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
        let summary = DailySummary::from_series(today, series([3, 5, 0, 0, 0, 0, 1]), 2);
        let lines = weekly_lines(&summary, 5, 4);
        let texts: Vec<String> = lines.iter().map(text).collect();

        assert_eq!(texts[8], "Total: 9  Average: 1.3/day");
        assert_eq!(texts[9], "Weekly goal: 9/14  [##--] 64%");
        assert_eq!(texts[10], "Best day: Tue 01-09 (5)");
        assert_eq!(texts[11], "Streak: 0");
    }

    #[test]
    fn test_weekly_lines_empty_week() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
        let summary = DailySummary::from_series(today, series([0; 7]), 5);
        let texts: Vec<String> = weekly_lines(&summary, 5, 4).iter().map(text).collect();
        assert_eq!(texts[10], "Best day: none yet");
    }
}
