pub mod error;
pub mod migrations;
pub mod models;
pub mod queries;

pub use error::{DbError, Result};

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::info;

/// Handle to the todo database. Holds no open connection: every operation
/// opens its own and closes it before returning.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let db = Self {
            path: path.to_path_buf(),
        };

        db.with_conn(|conn| {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            migrations::run(conn)
        })?;

        info!("Database opened at {}", path.display());
        Ok(db)
    }

    /// Run `f` on a fresh connection. The connection is dropped when `f`
    /// returns, on success and on error alike.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        f(&conn)
    }
}
