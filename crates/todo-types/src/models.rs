use chrono::{DateTime, Utc};

/// A persisted todo item. `id` is assigned by storage on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    /// Always UTC.
    pub created_date: DateTime<Utc>,
    pub owner_id: Option<i64>,
}

impl Todo {
    pub fn completed_label(&self) -> &'static str {
        if self.completed { "Yes" } else { "No" }
    }
}

/// A todo that has not been written yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
    pub created_date: DateTime<Utc>,
    pub owner_id: Option<i64>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>, owner_id: Option<i64>) -> Self {
        Self {
            title: title.into(),
            completed: false,
            created_date: Utc::now(),
            owner_id,
        }
    }

    /// Attach the id storage assigned to this record.
    pub fn into_todo(self, id: i64) -> Todo {
        Todo {
            id,
            title: self.title,
            completed: self.completed,
            created_date: self.created_date,
            owner_id: self.owner_id,
        }
    }
}

/// An account. Passwords are kept exactly as entered.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub password: String,
    /// Back-reference to owned todos. Only populated when loaded explicitly,
    /// never persisted on its own.
    pub todos: Vec<Todo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub password: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}

/// A todo joined with its owner's name, as shown by `list-todos`.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoListing {
    pub todo: Todo,
    pub owner_name: Option<String>,
}
