mod config;

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use todo_db::Database;
use todo_repl::Repl;

use crate::config::Config;

fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout belongs to the REPL
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todos=warn,todo_db=warn,todo_repl=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::parse();

    let db = Database::open(&config.db_path)
        .with_context(|| format!("opening database {}", config.db_path.display()))?;
    info!(accounts = config.accounts, "starting todo REPL");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut repl = Repl::new(db, config.accounts, stdin.lock(), stdout.lock());
    repl.run()?;

    Ok(())
}
