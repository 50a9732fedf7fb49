use thiserror::Error;
use todo_db::DbError;

#[derive(Debug, Error)]
pub enum ReplError {
    #[error(transparent)]
    Storage(#[from] DbError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Input closed. Treated as `exit` by `Repl::run`.
    #[error("end of input")]
    EndOfInput,
}

pub type Result<T> = std::result::Result<T, ReplError>;
