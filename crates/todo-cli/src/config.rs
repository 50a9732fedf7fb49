use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Command-line todo list backed by SQLite.
///
/// Every flag can also be set through the environment or a `.env` file.
#[derive(Debug, Parser)]
#[command(name = "todos", version)]
pub struct Config {
    /// SQLite database file.
    #[arg(long = "db", env = "TODO_DB_PATH", default_value = "todos.db")]
    pub db_path: PathBuf,

    /// Require `register`/`login` and keep each user's todos separate.
    #[arg(long, env = "TODO_ACCOUNTS", default_value_t = true, action = ArgAction::Set)]
    pub accounts: bool,
}
