use std::io::{BufRead, Write};

use todo_types::{NewTodo, NewUser};
use tracing::{info, warn};

use crate::error::Result;
use crate::repl::Repl;
use crate::session::Session;

impl<R: BufRead, W: Write> Repl<R, W> {
    // -- Accounts --

    pub(crate) fn register(&mut self) -> Result<()> {
        let name = self.prompt("Enter a username: ")?;
        let password = self.prompt("Enter a password: ")?;

        let id = self.db.insert_user(&NewUser::new(name, password))?;
        info!(user_id = id, "user registered");

        self.say("Created user. Try logging in.")
    }

    /// `Some(session)` on a credential match, `None` after reporting a miss.
    pub(crate) fn login(&mut self) -> Result<Option<Session>> {
        let name = self.prompt("Enter a username: ")?;
        let password = self.prompt("Enter a password: ")?;

        let user = match self.db.find_user_by_credentials(&name, &password) {
            Ok(user) => user,
            Err(e) if e.is_not_found() => {
                warn!(name = %name, "login failed");
                self.say("Invalid username or password.")?;
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let user = self.db.find_user_with_todos(user.id)?.unwrap_or(user);
        info!(user_id = user.id, todos = user.todos.len(), "logged in");

        self.say("You have logged in!")?;
        Ok(Some(Session::User(user)))
    }

    // -- Todos --

    pub(crate) fn create_todo(&mut self, session: &mut Session) -> Result<()> {
        let title = self.prompt("Enter a title: ")?;

        let owner_id = match session.owner_id() {
            Some(id) => {
                if self.db.find_user_by_id(id)?.is_none() {
                    return self.say("You are not logged in.");
                }
                Some(id)
            }
            None => None,
        };

        let todo = NewTodo::new(title, owner_id);
        let id = self.db.insert_todo(&todo)?;
        session.remember(todo.into_todo(id));

        self.say("Saved todo to database.")
    }

    pub(crate) fn delete_todo(&mut self, session: &Session) -> Result<()> {
        let input = self.prompt("Enter an id: ")?;
        let Ok(id) = input.trim().parse::<i64>() else {
            return self.say(&format!("Invalid id: {input}"));
        };

        if self.db.delete_todo_where(id, session.owner_id())? == 0 {
            return self.say("Could not remove todo.");
        }

        self.say("Removed todo from database.")
    }

    pub(crate) fn list_todos(&mut self, session: &Session) -> Result<()> {
        let todos = self.db.list_todos_for_owner(session.owner_id())?;
        let show_owner = session.user().is_some();

        for listing in todos {
            let todo = &listing.todo;
            writeln!(self.output, "- {} {}", todo.id, todo.title)?;
            writeln!(self.output, "  Completed: {}", todo.completed_label())?;
            if show_owner {
                let name = listing.owner_name.as_deref().unwrap_or("unknown");
                writeln!(self.output, "  Username: {name}")?;
            }
        }
        Ok(())
    }
}
