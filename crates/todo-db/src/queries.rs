use rusqlite::{Connection, OptionalExtension, params};
use todo_types::{NewTodo, NewUser, TodoListing, User};
use tracing::debug;

use crate::models::{TodoRow, UserRow};
use crate::{Database, DbError, Result};

const TODO_COLUMNS: &str =
    "t.id, t.title, t.completed, t.created_date, t.owner_id, u.name";

impl Database {
    // -- Users --

    pub fn insert_user(&self, user: &NewUser) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (name, password) VALUES (?1, ?2)",
                (&user.name, &user.password),
            )?;
            let id = conn.last_insert_rowid();
            debug!(user_id = id, name = %user.name, "inserted user");
            Ok(id)
        })
    }

    pub fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    /// Exact match on both name and password. No match is `DbError::NotFound`.
    pub fn find_user_by_credentials(&self, name: &str, password: &str) -> Result<User> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, name, password FROM users
                 WHERE name = ?1 AND password = ?2
                 ORDER BY id
                 LIMIT 1",
                (name, password),
                UserRow::from_row,
            )
            .optional()?
            .map(UserRow::into_user)
            .ok_or_else(|| DbError::NotFound(format!("no user named {name} with that password")))
        })
    }

    /// The user together with every todo it owns.
    pub fn find_user_with_todos(&self, id: i64) -> Result<Option<User>> {
        self.with_conn(|conn| {
            let Some(mut user) = query_user_by_id(conn, id)? else {
                return Ok(None);
            };
            user.todos = query_todos(conn, Some(id))?
                .into_iter()
                .map(|listing| listing.todo)
                .collect();
            Ok(Some(user))
        })
    }

    // -- Todos --

    pub fn insert_todo(&self, todo: &NewTodo) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO todos (title, completed, created_date, owner_id)
                 VALUES (?1, ?2, ?3, ?4)",
                params![todo.title, todo.completed, todo.created_date, todo.owner_id],
            )?;
            let id = conn.last_insert_rowid();
            debug!(todo_id = id, owner_id = ?todo.owner_id, "inserted todo");
            Ok(id)
        })
    }

    /// Todos whose owner is exactly `owner_id` (`None` selects unowned todos),
    /// joined with the owner's name. Every call runs a fresh query.
    pub fn list_todos_for_owner(&self, owner_id: Option<i64>) -> Result<Vec<TodoListing>> {
        self.with_conn(|conn| query_todos(conn, owner_id))
    }

    /// Deletes the todo with `id` only if it is owned by `owner_id`.
    /// Returns the number of rows removed (0 or 1).
    pub fn delete_todo_where(&self, id: i64, owner_id: Option<i64>) -> Result<usize> {
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM todos WHERE id = ?1 AND owner_id IS ?2",
                params![id, owner_id],
            )?;
            debug!(todo_id = id, owner_id = ?owner_id, removed, "delete todo");
            Ok(removed)
        })
    }
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, name, password FROM users WHERE id = ?1",
            [id],
            UserRow::from_row,
        )
        .optional()?
        .map(UserRow::into_user);
    Ok(user)
}

fn query_todos(conn: &Connection, owner_id: Option<i64>) -> Result<Vec<TodoListing>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TODO_COLUMNS}
         FROM todos t
         LEFT JOIN users u ON t.owner_id = u.id
         WHERE t.owner_id IS ?1
         ORDER BY t.id"
    ))?;

    let rows = stmt
        .query_map([owner_id], TodoRow::from_row)?
        .map(|row| row.map(TodoRow::into_listing))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
