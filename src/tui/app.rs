use chrono::NaiveDate;
use ratatui::widgets::ListState;
use std::time::Instant;
use tracing::{debug, info};

use crate::database::DatabaseError;
use crate::dates::{local_today, resolve_due};
use crate::models::{Priority, Settings, Task, TaskFilter};
use crate::stats::{self, DailySummary};
use crate::{Config, Database};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Completed,
    Grind,
    Weekly,
}

/// Input events the controller understands, already decoded from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Up,
    Down,
    Char(char),
    Enter,
    Backspace,
    Esc,
    /// Leave the application regardless of view or prompt
    Quit,
}

/// Whether the event loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    AddTask,
    Filter,
    Search,
    Goal,
}

/// Fields of the add-task prompt, asked in this order
const ADD_TASK_LABELS: [&str; 4] = [
    "Title: ",
    "Category: ",
    "Due (YYYY-MM-DD, today, tomorrow, +3d): ",
    "Priority (High/Medium/Low) [Medium]: ",
];

/// A line-input prompt layered over the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub buffer: String,
    /// Answers already submitted for multi-field prompts
    pub answers: Vec<String>,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            buffer: String::new(),
            answers: Vec::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self.kind {
            PromptKind::AddTask => ADD_TASK_LABELS[self.answers.len().min(ADD_TASK_LABELS.len() - 1)],
            PromptKind::Filter => "Filter by category (#tag): ",
            PromptKind::Search => "Search title: ",
            PromptKind::Goal => "Daily goal (positive number): ",
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            PromptKind::AddTask => "New task",
            PromptKind::Filter => "Filter",
            PromptKind::Search => "Search",
            PromptKind::Goal => "Set goal",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App {
    pub config: Config,
    pub database: Database,
    pub settings: Settings,

    pub view: View,
    pub cursor: usize,
    pub list_state: ListState,
    pub filter: TaskFilter,
    pub prompt: Option<Prompt>,
    pub status: StatusState,

    // Display data, refreshed after every handled input
    pub open_tasks: Vec<Task>,
    pub completed_tasks: Vec<Task>,
    pub totals: (u32, u32),
    pub summary: DailySummary,

    clock: fn() -> NaiveDate,
}

impl App {
    pub fn new(config: Config, database: Database) -> Result<Self, DatabaseError> {
        Self::with_clock(config, database, local_today)
    }

    /// Build an app whose notion of "today" comes from `clock`
    pub fn with_clock(
        config: Config,
        database: Database,
        clock: fn() -> NaiveDate,
    ) -> Result<Self, DatabaseError> {
        let settings = database.load_settings()?;
        let today = clock();
        let summary = DailySummary::from_series(today, Vec::new(), settings.daily_goal);

        let mut app = Self {
            config,
            database,
            settings,
            view: View::Dashboard,
            cursor: 0,
            list_state: ListState::default(),
            filter: TaskFilter::None,
            prompt: None,
            status: StatusState::default(),
            open_tasks: Vec::new(),
            completed_tasks: Vec::new(),
            totals: (0, 0),
            summary,
            clock,
        };
        app.reload()?;
        info!(daily_goal = app.settings.daily_goal, "dashboard ready");
        Ok(app)
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// Re-run every query the views display
    pub fn reload(&mut self) -> Result<(), DatabaseError> {
        let today = self.today();
        self.open_tasks = stats::open_tasks(&self.database, &self.filter)?;
        self.completed_tasks = stats::completed_tasks(&self.database)?;
        self.totals = self.database.stats(&self.filter)?;
        self.summary = DailySummary::load(&self.database, today, &self.settings)?;

        if self.cursor >= self.open_tasks.len() {
            self.cursor = self.open_tasks.len().saturating_sub(1);
        }
        self.sync_list_state();
        Ok(())
    }

    pub fn sync_list_state(&mut self) {
        if self.open_tasks.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(self.cursor));
        }
    }

    /// Dashboard progress over the filtered list
    pub fn progress_percent(&self) -> u32 {
        stats::progress_percent(self.totals.1, self.totals.0)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.open_tasks.get(self.cursor)
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    /// Clear the status message once it has been up for 3 seconds
    pub fn check_status_message_timeout(&mut self) {
        const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }

    /// Apply one input. Storage errors abort the operation and are returned.
    pub fn handle_input(&mut self, input: Input) -> Result<Flow, DatabaseError> {
        if input == Input::Quit {
            return Ok(Flow::Quit);
        }

        if self.prompt.is_some() {
            self.handle_prompt_input(input)?;
            return Ok(Flow::Continue);
        }

        if input == Input::Char('q') {
            return Ok(Flow::Quit);
        }

        match self.view {
            View::Dashboard => self.handle_dashboard_input(input)?,
            View::Grind => match input {
                Input::Char('b') => self.switch_view(View::Dashboard),
                Input::Char('s') => self.open_prompt(PromptKind::Goal),
                _ => {}
            },
            View::Completed | View::Weekly => {
                if input == Input::Char('b') {
                    self.switch_view(View::Dashboard);
                }
            }
        }

        self.reload()?;
        Ok(Flow::Continue)
    }

    fn handle_dashboard_input(&mut self, input: Input) -> Result<(), DatabaseError> {
        match input {
            Input::Up | Input::Char('k') => self.move_cursor_up(),
            Input::Down | Input::Char('j') => self.move_cursor_down(),
            Input::Char('a') => self.open_prompt(PromptKind::AddTask),
            Input::Char('d') => {
                if let Some(task) = self.selected_task() {
                    let (id, title) = (task.id, task.title.clone());
                    self.database.mark_done(id, self.today())?;
                    self.cursor = 0;
                    self.set_status_message(format!("Done: {}", title));
                }
            }
            Input::Char('x') => {
                if let Some(task) = self.selected_task() {
                    let (id, title) = (task.id, task.title.clone());
                    self.database.soft_delete(id)?;
                    self.cursor = 0;
                    self.set_status_message(format!("Deleted: {}", title));
                }
            }
            Input::Char('c') => self.switch_view(View::Completed),
            Input::Char('g') => self.switch_view(View::Grind),
            Input::Char('w') => self.switch_view(View::Weekly),
            Input::Char('f') => self.open_prompt(PromptKind::Filter),
            Input::Char('/') => self.open_prompt(PromptKind::Search),
            Input::Char('b') => {
                self.filter = TaskFilter::None;
                self.cursor = 0;
            }
            _ => {}
        }
        Ok(())
    }

    fn move_cursor_up(&mut self) {
        let len = self.open_tasks.len();
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
            self.sync_list_state();
        }
    }

    fn move_cursor_down(&mut self) {
        let len = self.open_tasks.len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
            self.sync_list_state();
        }
    }

    fn switch_view(&mut self, view: View) {
        debug!(from = ?self.view, to = ?view, "switching view");
        if view == View::Dashboard {
            self.cursor = 0;
        }
        self.view = view;
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some(Prompt::new(kind));
    }

    fn handle_prompt_input(&mut self, input: Input) -> Result<(), DatabaseError> {
        let Some(prompt) = self.prompt.as_mut() else {
            return Ok(());
        };

        match input {
            Input::Char(c) => prompt.buffer.push(c),
            Input::Backspace => {
                prompt.buffer.pop();
            }
            Input::Esc => {
                self.prompt = None;
            }
            Input::Enter => {
                let answer = std::mem::take(&mut prompt.buffer);
                prompt.answers.push(answer);
                let done = prompt.kind != PromptKind::AddTask
                    || prompt.answers.len() == ADD_TASK_LABELS.len();
                if done {
                    if let Some(prompt) = self.prompt.take() {
                        self.submit_prompt(prompt)?;
                    }
                }
            }
            Input::Up | Input::Down | Input::Quit => {}
        }
        Ok(())
    }

    fn submit_prompt(&mut self, prompt: Prompt) -> Result<(), DatabaseError> {
        let mut answers = prompt.answers.into_iter();
        let mut next = || answers.next().unwrap_or_default();

        match prompt.kind {
            PromptKind::AddTask => {
                let title = next();
                let category = next();
                let due = resolve_due(&next(), self.today());
                let priority = Priority::from_input(&next());
                self.database.add_task(&title, category.trim(), &due, priority)?;
                self.cursor = 0;
                self.filter = TaskFilter::None;
                self.set_status_message(format!("Added: {}", title));
            }
            PromptKind::Filter => {
                let category = next().trim().to_string();
                if !category.is_empty() {
                    self.filter = TaskFilter::ByCategory(category);
                    self.cursor = 0;
                }
            }
            PromptKind::Search => {
                let text = next();
                if !text.is_empty() {
                    self.filter = TaskFilter::ByTitleSubstring(text);
                    self.cursor = 0;
                }
            }
            PromptKind::Goal => {
                if let Ok(goal) = next().trim().parse::<u32>() {
                    if goal > 0 {
                        self.database.save_daily_goal(goal)?;
                        self.settings.daily_goal = goal;
                        self.set_status_message(format!("Daily goal set to {}", goal));
                    }
                }
            }
        }

        self.reload()
    }
}
