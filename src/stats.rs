use chrono::{Days, NaiveDate};
use std::cmp::Ordering;

use crate::database::{Database, DatabaseError};
use crate::models::{Settings, Task, TaskFilter};

/// Number of days in the rolling weekly window, today included
pub const WEEK_LEN: usize = 7;

/// Completions on a single calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: u32,
}

/// Dashboard ordering: priority first (High, Medium, Low), newest task first within a priority
pub fn open_task_order(a: &Task, b: &Task) -> Ordering {
    a.priority
        .rank()
        .cmp(&b.priority.rank())
        .then_with(|| b.id.cmp(&a.id))
}

pub fn sort_open(tasks: &mut [Task]) {
    tasks.sort_by(open_task_order);
}

/// Open tasks under `filter`, in dashboard order
pub fn open_tasks(db: &Database, filter: &TaskFilter) -> Result<Vec<Task>, DatabaseError> {
    let mut tasks = db.query_tasks(filter, false)?;
    sort_open(&mut tasks);
    Ok(tasks)
}

/// Every completed task, newest first
pub fn completed_tasks(db: &Database) -> Result<Vec<Task>, DatabaseError> {
    db.query_tasks(&TaskFilter::None, true)
}

/// `floor(done / total * 100)`, or 0 when there is nothing to divide by
pub fn progress_percent(done: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((done as u64 * 100) / total as u64) as u32
}

/// Completion counts for today and the six days before it, oldest first
pub fn weekly_series(db: &Database, today: NaiveDate) -> Result<Vec<DayCount>, DatabaseError> {
    (0..WEEK_LEN as u64)
        .rev()
        .map(|back| {
            let date = today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
            Ok(DayCount {
                date,
                count: db.count_completed_on(date)?,
            })
        })
        .collect()
}

/// Length of the run of goal-meeting days that ends today.
///
/// Zero whenever today itself is below the goal.
pub fn streak(series: &[DayCount], daily_goal: u32) -> u32 {
    series
        .iter()
        .rev()
        .take_while(|day| day.count >= daily_goal)
        .count() as u32
}

/// Day with the most completions; the earliest wins a tie
pub fn best_day(series: &[DayCount]) -> Option<DayCount> {
    series.iter().fold(None, |best: Option<DayCount>, day| match best {
        Some(b) if b.count >= day.count => Some(b),
        _ => Some(*day),
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklySummary {
    pub total: u32,
    pub average: f64,
    pub weekly_goal: u32,
    pub percent: u32,
}

impl WeeklySummary {
    pub fn from_series(series: &[DayCount], daily_goal: u32) -> Self {
        let total: u32 = series.iter().map(|d| d.count).sum();
        let weekly_goal = daily_goal.saturating_mul(WEEK_LEN as u32);
        Self {
            total,
            average: total as f64 / WEEK_LEN as f64,
            weekly_goal,
            percent: progress_percent(total, weekly_goal),
        }
    }
}

/// Visual weight the renderer gives a motivational message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Celebrate,
    Strong,
    Steady,
    Mild,
    Subtle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotivationTier {
    CrushedIt,
    AlmostThere,
    Halfway,
    GoodStart,
    JustBeginning,
}

impl MotivationTier {
    /// Tier for today's goal progress percentage
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            p if p >= 100 => MotivationTier::CrushedIt,
            p if p >= 75 => MotivationTier::AlmostThere,
            p if p >= 50 => MotivationTier::Halfway,
            p if p >= 25 => MotivationTier::GoodStart,
            _ => MotivationTier::JustBeginning,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            MotivationTier::CrushedIt => "Goal crushed! You're on fire today.",
            MotivationTier::AlmostThere => "Almost there, just a few more!",
            MotivationTier::Halfway => "Halfway there, keep the momentum going.",
            MotivationTier::GoodStart => "Good start, keep grinding.",
            MotivationTier::JustBeginning => "Every task counts. Let's get moving!",
        }
    }

    pub fn emphasis(self) -> Emphasis {
        match self {
            MotivationTier::CrushedIt => Emphasis::Celebrate,
            MotivationTier::AlmostThere => Emphasis::Strong,
            MotivationTier::Halfway => Emphasis::Steady,
            MotivationTier::GoodStart => Emphasis::Mild,
            MotivationTier::JustBeginning => Emphasis::Subtle,
        }
    }
}

/// Everything the daily "grind" view shows
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub completed: u32,
    pub goal: u32,
    pub percent: u32,
    pub tier: MotivationTier,
    pub streak: u32,
    pub series: Vec<DayCount>,
}

impl DailySummary {
    pub fn load(db: &Database, today: NaiveDate, settings: &Settings) -> Result<Self, DatabaseError> {
        let series = weekly_series(db, today)?;
        Ok(Self::from_series(today, series, settings.daily_goal))
    }

    pub fn from_series(today: NaiveDate, series: Vec<DayCount>, goal: u32) -> Self {
        let completed = series.last().map(|d| d.count).unwrap_or(0);
        let percent = progress_percent(completed, goal);
        Self {
            date: today,
            completed,
            goal,
            percent,
            tier: MotivationTier::from_percent(percent),
            streak: streak(&series, goal),
            series,
        }
    }

    pub fn weekly(&self) -> WeeklySummary {
        WeeklySummary::from_series(&self.series, self.goal)
    }

    pub fn best_day(&self) -> Option<DayCount> {
        best_day(&self.series)
    }
}
