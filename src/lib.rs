pub mod cli;
pub mod config;
pub mod database;
pub mod dates;
pub mod logging;
pub mod models;
pub mod stats;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use database::Database;
pub use models::{Priority, Settings, Task, TaskFilter};
pub use utils::Profile;
