use chrono::NaiveDate;
use std::fmt;

/// Default number of completions per day before the goal counts as met
pub const DEFAULT_DAILY_GOAL: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank, lower sorts first
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Parse user input case-insensitively. Anything unrecognised falls back to Medium.
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "high" | "h" => Priority::High,
            "low" | "l" => Priority::Low,
            _ => Priority::Medium,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Priority::High => "🔴",
            Priority::Medium => "🟡",
            Priority::Low => "🟢",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub category: String,         // empty means no category
    pub due: Option<String>,      // YYYY-MM-DD, or verbatim text when unparseable
    pub priority: Priority,
    pub done: bool,
    pub completed_date: Option<NaiveDate>,
    pub deleted: bool,
    pub created_at: String,
}

impl Task {
    pub fn has_category(&self) -> bool {
        !self.category.is_empty()
    }
}

/// The three ways the task list can be narrowed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    None,
    ByCategory(String),
    /// Case-sensitive substring match on the title
    ByTitleSubstring(String),
}

impl TaskFilter {
    pub fn is_active(&self) -> bool {
        !matches!(self, TaskFilter::None)
    }

    /// Heading shown above a filtered list
    pub fn subtitle(&self) -> Option<String> {
        match self {
            TaskFilter::None => None,
            TaskFilter::ByCategory(tag) => Some(format!("Filtered by #{}", tag)),
            TaskFilter::ByTitleSubstring(text) => Some(format!("Search results for '{}'", text)),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::None => true,
            TaskFilter::ByCategory(tag) => task.category == *tag,
            TaskFilter::ByTitleSubstring(text) => task.title.contains(text.as_str()),
        }
    }
}

/// Persisted user settings, loaded once at startup and written back on change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub daily_goal: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_goal: DEFAULT_DAILY_GOAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, category: &str) -> Task {
        Task {
            id: 1,
            title: title.to_string(),
            category: category.to_string(),
            due: None,
            priority: Priority::Medium,
            done: false,
            completed_date: None,
            deleted: false,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_priority_from_input_falls_back_to_medium() {
        assert_eq!(Priority::from_input("HIGH"), Priority::High);
        assert_eq!(Priority::from_input(" low "), Priority::Low);
        assert_eq!(Priority::from_input("medium"), Priority::Medium);
        assert_eq!(Priority::from_input("urgent"), Priority::Medium);
        assert_eq!(Priority::from_input(""), Priority::Medium);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn test_filter_matching_is_case_sensitive() {
        let t = task("Write Report", "work");
        assert!(TaskFilter::None.matches(&t));
        assert!(TaskFilter::ByCategory("work".into()).matches(&t));
        assert!(!TaskFilter::ByCategory("Work".into()).matches(&t));
        assert!(TaskFilter::ByTitleSubstring("Report".into()).matches(&t));
        assert!(!TaskFilter::ByTitleSubstring("report".into()).matches(&t));
    }

    #[test]
    fn test_filter_subtitle() {
        assert_eq!(TaskFilter::None.subtitle(), None);
        assert_eq!(
            TaskFilter::ByCategory("home".into()).subtitle().as_deref(),
            Some("Filtered by #home")
        );
        assert_eq!(
            TaskFilter::ByTitleSubstring("milk".into()).subtitle().as_deref(),
            Some("Search results for 'milk'")
        );
    }
}
