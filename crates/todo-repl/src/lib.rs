pub mod command;
pub mod error;
mod handlers;
pub mod repl;
pub mod session;

pub use error::ReplError;
pub use repl::Repl;
pub use session::Session;
