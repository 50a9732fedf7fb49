use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// A lookup that must match a row matched nothing.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
