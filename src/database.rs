use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, ToSql};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Priority, Settings, Task, TaskFilter, DEFAULT_DAILY_GOAL};

/// Settings key holding the number of completions per day
pub const DAILY_GOAL_KEY: &str = "dailyGoal";

const TASK_COLUMNS: &str =
    "id, title, category, due, priority, done, completed_date, deleted, created_at";

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create database directory: {0}")]
    DirectoryError(String),
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database connection and initialize the schema
    pub fn new(path: &str) -> Result<Self, DatabaseError> {
        let db_path = PathBuf::from(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(&db_path)?;
        info!(path = %db_path.display(), "opened task database");

        let db = Database { conn };
        db.initialize_schema()?;

        Ok(db)
    }

    /// Open a throwaway database that lives only as long as the connection
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let db = Database {
            conn: Connection::open_in_memory()?,
        };
        db.initialize_schema()?;
        Ok(db)
    }

    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL DEFAULT '',
                category        TEXT NOT NULL DEFAULT '',
                due             TEXT,
                done            INTEGER NOT NULL DEFAULT 0,
                deleted         INTEGER NOT NULL DEFAULT 0,
                created_at      TEXT NOT NULL DEFAULT ''
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key             TEXT PRIMARY KEY,
                value           TEXT NOT NULL
            )",
            [],
        )?;

        self.migrate_add_columns()?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_tasks_completed_date ON tasks(completed_date)",
            [],
        )?;

        Ok(())
    }

    /// Bring older databases up to date with the current column set
    fn migrate_add_columns(&self) -> Result<(), DatabaseError> {
        fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool, DatabaseError> {
            let mut stmt = conn.prepare(
                "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2"
            )?;
            let count: i64 = stmt.query_row(rusqlite::params![table, column], |row| row.get(0))?;
            Ok(count > 0)
        }

        if !column_exists(&self.conn, "tasks", "priority")? {
            self.conn.execute(
                "ALTER TABLE tasks ADD COLUMN priority TEXT NOT NULL DEFAULT 'Medium'",
                [],
            )?;
            info!("migrated tasks table: added priority column");
        }

        // Rows completed before this column existed keep NULL
        if !column_exists(&self.conn, "tasks", "completed_date")? {
            self.conn.execute("ALTER TABLE tasks ADD COLUMN completed_date TEXT", [])?;
            info!("migrated tasks table: added completed_date column");
        }

        Ok(())
    }

    fn row_to_task(row: &rusqlite::Row) -> Result<Task, rusqlite::Error> {
        let priority: String = row.get(4)?;
        let due: Option<String> = row.get(3)?;
        Ok(Task {
            id: row.get(0)?,
            title: row.get(1)?,
            category: row.get(2)?,
            due: due.filter(|d| !d.is_empty()),
            priority: Priority::from_input(&priority),
            done: row.get::<_, i64>(5)? != 0,
            completed_date: row.get(6)?,
            deleted: row.get::<_, i64>(7)? != 0,
            created_at: row.get(8)?,
        })
    }

    /// Insert a new open task and return its ID. `due` must already be resolved.
    pub fn add_task(
        &self,
        title: &str,
        category: &str,
        due: &str,
        priority: Priority,
    ) -> Result<i64, DatabaseError> {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let due = if due.is_empty() { None } else { Some(due) };
        self.conn.execute(
            "INSERT INTO tasks (title, category, due, priority, done, deleted, created_at)
             VALUES (?1, ?2, ?3, ?4, 0, 0, ?5)",
            rusqlite::params![title, category, due, priority.as_str(), now],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, priority = %priority, "task added");
        Ok(id)
    }

    /// Mark a task done, stamping `today` as its completion date.
    ///
    /// Marking an already-done task again moves the stamp to `today`.
    /// Returns false when the task is missing or deleted.
    pub fn mark_done(&self, id: i64, today: NaiveDate) -> Result<bool, DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE tasks SET done = 1, completed_date = ?1 WHERE id = ?2 AND deleted = 0",
            rusqlite::params![today, id],
        )?;
        if changed == 0 {
            debug!(id, "mark_done ignored: no such live task");
        } else {
            info!(id, %today, "task marked done");
        }
        Ok(changed > 0)
    }

    /// Tombstone a task. The row stays in the table.
    pub fn soft_delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE tasks SET deleted = 1 WHERE id = ?1",
            rusqlite::params![id],
        )?;
        if changed == 0 {
            debug!(id, "soft_delete ignored: no such task");
        } else {
            info!(id, "task deleted");
        }
        Ok(changed > 0)
    }

    /// Fetch a single task by ID, including deleted ones
    pub fn get_task(&self, id: i64) -> Result<Option<Task>, DatabaseError> {
        let sql = format!("SELECT {} FROM tasks WHERE id = ?1", TASK_COLUMNS);
        self.conn
            .query_row(&sql, rusqlite::params![id], Self::row_to_task)
            .optional()
            .map_err(DatabaseError::from)
    }

    /// Live tasks with the given done state that match `filter`, newest first
    pub fn query_tasks(&self, filter: &TaskFilter, done: bool) -> Result<Vec<Task>, DatabaseError> {
        let (clause, value) = filter_predicate(filter, 2);
        let sql = format!(
            "SELECT {} FROM tasks WHERE deleted = 0 AND done = ?1{} ORDER BY id DESC",
            TASK_COLUMNS, clause
        );
        let done_flag: i64 = if done { 1 } else { 0 };
        let mut params: Vec<&dyn ToSql> = vec![&done_flag as &dyn ToSql];
        if let Some(ref v) = value {
            params.push(v);
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(params.as_slice(), Self::row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// `(total, done)` over live tasks matching `filter`
    pub fn stats(&self, filter: &TaskFilter) -> Result<(u32, u32), DatabaseError> {
        let (clause, value) = filter_predicate(filter, 1);
        let sql = format!(
            "SELECT COUNT(*), COALESCE(SUM(done), 0) FROM tasks WHERE deleted = 0{}",
            clause
        );
        let mut params: Vec<&dyn ToSql> = Vec::new();
        if let Some(ref v) = value {
            params.push(v);
        }

        let (total, done): (i64, i64) = self
            .conn
            .query_row(&sql, params.as_slice(), |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok((total as u32, done as u32))
    }

    /// Number of live tasks completed on `date`
    pub fn count_completed_on(&self, date: NaiveDate) -> Result<u32, DatabaseError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM tasks WHERE deleted = 0 AND done = 1 AND completed_date = ?1",
            rusqlite::params![date],
            |row| row.get(0),
        )?;
        Ok(count as u32)
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        self.conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                rusqlite::params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(DatabaseError::from)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        info!(key, value, "setting saved");
        Ok(())
    }

    /// Load the settings record, substituting defaults for missing or bad values
    pub fn load_settings(&self) -> Result<Settings, DatabaseError> {
        let daily_goal = match self.get_setting(DAILY_GOAL_KEY)? {
            None => DEFAULT_DAILY_GOAL,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(goal) if goal > 0 => goal,
                _ => {
                    warn!(value = %raw, "ignoring invalid stored daily goal");
                    DEFAULT_DAILY_GOAL
                }
            },
        };
        Ok(Settings { daily_goal })
    }

    pub fn save_daily_goal(&self, goal: u32) -> Result<(), DatabaseError> {
        self.set_setting(DAILY_GOAL_KEY, &goal.to_string())
    }
}

/// SQL fragment and bound value for a filter. `index` is the placeholder number to use.
fn filter_predicate(filter: &TaskFilter, index: usize) -> (String, Option<String>) {
    match filter {
        TaskFilter::None => (String::new(), None),
        TaskFilter::ByCategory(tag) => (format!(" AND category = ?{}", index), Some(tag.clone())),
        // instr() is case-sensitive and has no wildcard characters, unlike LIKE
        TaskFilter::ByTitleSubstring(text) => {
            (format!(" AND instr(title, ?{}) > 0", index), Some(text.clone()))
        }
    }
}
