use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::database::{Database, DatabaseError};
use crate::dates::resolve_due;
use crate::models::Priority;
use crate::stats::DailySummary;

#[derive(Parser)]
#[command(name = "dayplan")]
#[command(about = "Daily planner - tasks, goals and streaks in the terminal")]
#[command(version)]
pub struct Cli {
    /// Use development mode (separate config and database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive dashboard (default)
    Tui,
    /// Quickly add a new task
    Add {
        /// Task title
        title: String,
        /// Category tag
        #[arg(long, short, default_value = "")]
        category: String,
        /// Due date: today, tomorrow, +3d, +1w or a calendar date
        #[arg(long, short, default_value = "")]
        due: String,
        /// High, Medium or Low
        #[arg(long, short, default_value = "Medium")]
        priority: String,
    },
    /// Print today's progress and the last seven days
    Stats,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
}

/// Handle the add command, returning the new task's ID
pub fn handle_add(
    db: &Database,
    title: &str,
    category: &str,
    due: &str,
    priority: &str,
    today: NaiveDate,
) -> Result<i64, CliError> {
    let due = resolve_due(due, today);
    let priority = Priority::from_input(priority);
    let id = db.add_task(title, category.trim(), &due, priority)?;
    println!("Task created successfully (ID: {})", id);
    Ok(id)
}

/// Handle the stats command
pub fn handle_stats(db: &Database, today: NaiveDate) -> Result<DailySummary, CliError> {
    let settings = db.load_settings()?;
    let summary = DailySummary::load(db, today, &settings)?;
    let weekly = summary.weekly();

    println!(
        "Today: {}/{} ({}%) - {}",
        summary.completed,
        summary.goal,
        summary.percent,
        summary.tier.message()
    );
    println!("Streak: {} day(s)", summary.streak);
    for day in &summary.series {
        println!("  {} {:>3}", day.date.format("%a %m-%d"), day.count);
    }
    println!(
        "Week: {}/{} ({}%), average {:.1}/day",
        weekly.total, weekly.weekly_goal, weekly.percent, weekly.average
    );

    Ok(summary)
}
