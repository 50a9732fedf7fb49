pub mod models;

pub use models::{NewTodo, NewUser, Todo, TodoListing, User};
