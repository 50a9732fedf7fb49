//! Row types as read from SQLite. Kept separate from `todo-types` so the
//! column layout stays local to this crate.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use todo_types::{Todo, TodoListing, User};

pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub password: String,
}

impl UserRow {
    /// Expects columns `id, name, password`.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            password: row.get(2)?,
        })
    }

    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            password: self.password,
            todos: Vec::new(),
        }
    }
}

pub struct TodoRow {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub created_date: DateTime<Utc>,
    pub owner_id: Option<i64>,
    pub owner_name: Option<String>,
}

impl TodoRow {
    /// Expects columns `id, title, completed, created_date, owner_id, owner_name`.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            completed: row.get(2)?,
            created_date: row.get(3)?,
            owner_id: row.get(4)?,
            owner_name: row.get(5)?,
        })
    }

    pub fn into_listing(self) -> TodoListing {
        TodoListing {
            todo: Todo {
                id: self.id,
                title: self.title,
                completed: self.completed,
                created_date: self.created_date,
                owner_id: self.owner_id,
            },
            owner_name: self.owner_name,
        }
    }
}
