use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime};

/// Calendar formats tried, in order, once the relative keywords have missed
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Matched against lowercased input, so the separator is `t`
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dt%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Formats without a year; the current year is assumed
const YEARLESS_FORMATS: &[&str] = &["%B %d %Y", "%b %d %Y", "%d %B %Y", "%d %b %Y"];

/// How a stored due value relates to today, used for color coding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    Today,
    Future,
    /// Stored verbatim because it never parsed as a date
    Unparsed,
}

/// Today's date on the local wall clock
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve a due-date phrase to an ISO date string.
///
/// Accepts `today`, `tomorrow`, `+Nd`, `+Nw` and a handful of calendar
/// formats. Empty input means no due date and yields an empty string. Input
/// that cannot be parsed comes back trimmed and lowercased rather than
/// failing, so adding a task never errors on a bad date.
pub fn resolve_due(input: &str, today: NaiveDate) -> String {
    let s = input.trim().to_lowercase();
    if s.is_empty() {
        return String::new();
    }

    match resolve_relative(&s, today).or_else(|| parse_calendar_date(&s, today)) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => s,
    }
}

fn resolve_relative(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    if s == "today" {
        return Some(today);
    }
    if s == "tomorrow" {
        return today.checked_add_days(Days::new(1));
    }

    let offset = s.strip_prefix('+')?;
    if let Some(n) = offset.strip_suffix('d').and_then(parse_count) {
        return today.checked_add_days(Days::new(n));
    }
    if let Some(n) = offset.strip_suffix('w').and_then(parse_count) {
        return today.checked_add_days(Days::new(n.checked_mul(7)?));
    }
    None
}

/// Digits only: no sign, no whitespace
fn parse_count(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_calendar_date(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(date);
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date());
    }

    let with_year = format!("{} {}", s, today.year());
    YEARLESS_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&with_year, fmt).ok())
}

/// Classify a stored due value against `today`
pub fn due_status(due: &str, today: NaiveDate) -> DueStatus {
    match NaiveDate::parse_from_str(due, "%Y-%m-%d") {
        Ok(date) if date < today => DueStatus::Overdue,
        Ok(date) if date == today => DueStatus::Today,
        Ok(_) => DueStatus::Future,
        Err(_) => DueStatus::Unparsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(resolve_due("today", today()), "2024-01-10");
        assert_eq!(resolve_due("  Today ", today()), "2024-01-10");
        assert_eq!(resolve_due("tomorrow", today()), "2024-01-11");
        assert_eq!(resolve_due("TOMORROW", today()), "2024-01-11");
    }

    #[test]
    fn test_relative_offsets() {
        assert_eq!(resolve_due("+2d", today()), "2024-01-12");
        assert_eq!(resolve_due("+1w", today()), "2024-01-17");
        assert_eq!(resolve_due("+3D", today()), "2024-01-13");
        assert_eq!(resolve_due("+30d", today()), "2024-02-09");
        assert_eq!(resolve_due("+2w", today()), "2024-01-24");
    }

    #[test]
    fn test_malformed_offsets_pass_through() {
        assert_eq!(resolve_due("+d", today()), "+d");
        assert_eq!(resolve_due("+-2d", today()), "+-2d");
        assert_eq!(resolve_due("+2x", today()), "+2x");
        assert_eq!(resolve_due("2d", today()), "2d");
    }

    #[test]
    fn test_empty_means_no_due_date() {
        assert_eq!(resolve_due("", today()), "");
        assert_eq!(resolve_due("   ", today()), "");
    }

    #[test]
    fn test_calendar_formats() {
        assert_eq!(resolve_due("2024-03-05", today()), "2024-03-05");
        assert_eq!(resolve_due("2024/03/05", today()), "2024-03-05");
        assert_eq!(resolve_due("03/05/2024", today()), "2024-03-05");
        assert_eq!(resolve_due("March 5, 2024", today()), "2024-03-05");
        assert_eq!(resolve_due("Mar 5 2024", today()), "2024-03-05");
        assert_eq!(resolve_due("5 March 2024", today()), "2024-03-05");
        assert_eq!(resolve_due("2024-03-05 14:30", today()), "2024-03-05");
    }

    #[test]
    fn test_iso_timestamp_with_t_separator() {
        assert_eq!(resolve_due("2024-03-05T14:30:00", today()), "2024-03-05");
        assert_eq!(resolve_due("2024-03-05t14:30:00", today()), "2024-03-05");
    }

    #[test]
    fn test_month_day_assumes_current_year() {
        assert_eq!(resolve_due("Feb 14", today()), "2024-02-14");
    }

    #[test]
    fn test_unparseable_passthrough() {
        assert_eq!(resolve_due("banana", today()), "banana");
        assert_eq!(resolve_due("  Next Tuesday ", today()), "next tuesday");
        assert_eq!(resolve_due("2024-13-40", today()), "2024-13-40");
    }

    #[test]
    fn test_due_status() {
        assert_eq!(due_status("2024-01-09", today()), DueStatus::Overdue);
        assert_eq!(due_status("2024-01-10", today()), DueStatus::Today);
        assert_eq!(due_status("2024-01-11", today()), DueStatus::Future);
        assert_eq!(due_status("banana", today()), DueStatus::Unparsed);
    }
}
