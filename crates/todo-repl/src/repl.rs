use std::io::{BufRead, Write};

use todo_db::Database;
use tracing::debug;

use crate::command::{AUTH_HELP, AuthCommand, TODO_HELP, TodoCommand};
use crate::error::{ReplError, Result};
use crate::session::Session;

const UNKNOWN_COMMAND: &str = "No such command exists, please try again.";

/// Line-oriented command loop over any reader/writer pair.
///
/// With accounts enabled the loop runs two phases: `register`/`login` until a
/// login succeeds, then the todo commands. Without accounts it goes straight
/// to the todo commands with an anonymous session.
pub struct Repl<R, W> {
    pub(crate) db: Database,
    accounts: bool,
    input: R,
    pub(crate) output: W,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(db: Database, accounts: bool, input: R, output: W) -> Self {
        Self {
            db,
            accounts,
            input,
            output,
        }
    }

    /// Run until `exit` or end of input. Storage and terminal errors end the
    /// loop and are returned to the caller.
    pub fn run(&mut self) -> Result<()> {
        match self.run_phases() {
            Err(ReplError::EndOfInput) => {
                debug!("input closed");
                Ok(())
            }
            other => other,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn run_phases(&mut self) -> Result<()> {
        self.say("Welcome to the todo application.")?;

        let session = if self.accounts {
            match self.auth_phase()? {
                Some(session) => session,
                None => return Ok(()),
            }
        } else {
            Session::Anonymous
        };

        self.todo_phase(session)
    }

    /// Returns `None` when the user exits before logging in.
    fn auth_phase(&mut self) -> Result<Option<Session>> {
        for line in AUTH_HELP {
            self.say(line)?;
        }

        loop {
            let command = self.read_line()?;
            match AuthCommand::parse(&command) {
                Some(AuthCommand::Register) => self.register()?,
                Some(AuthCommand::Login) => {
                    if let Some(session) = self.login()? {
                        return Ok(Some(session));
                    }
                }
                Some(AuthCommand::Exit) => return Ok(None),
                None => self.say(UNKNOWN_COMMAND)?,
            }
        }
    }

    fn todo_phase(&mut self, mut session: Session) -> Result<()> {
        for line in TODO_HELP {
            self.say(line)?;
        }

        loop {
            let command = self.read_line()?;
            match TodoCommand::parse(&command) {
                Some(TodoCommand::Create) => self.create_todo(&mut session)?,
                Some(TodoCommand::Delete) => self.delete_todo(&session)?,
                Some(TodoCommand::List) => self.list_todos(&session)?,
                Some(TodoCommand::Exit) => return Ok(()),
                None => self.say(UNKNOWN_COMMAND)?,
            }
        }
    }

    pub(crate) fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Print `label` without a newline and read the answer.
    pub(crate) fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Next input line without its line terminator.
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ReplError::EndOfInput);
        }
        if line.ends_with('\n') {
            line.pop();
        }
        if line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;
    use todo_types::{NewTodo, NewUser};

    fn open_db() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&dir.path().join("todos.db")).unwrap();
        (dir, db)
    }

    fn run_script(db: &Database, accounts: bool, script: &str) -> String {
        let mut repl = Repl::new(
            db.clone(),
            accounts,
            Cursor::new(script.to_string()),
            Vec::new(),
        );
        repl.run().unwrap();
        String::from_utf8(repl.into_output()).unwrap()
    }

    #[test]
    fn anonymous_create_then_list() {
        let (_dir, db) = open_db();
        let out = run_script(&db, false, "create-todo\nBuy milk\nlist-todos\nexit\n");

        assert!(out.contains("Enter a title: Saved todo to database."));
        assert!(out.contains("- 1 Buy milk\n  Completed: No\n"));
        assert!(!out.contains("Username:"));
        assert!(!out.contains("register -"));

        let todos = db.list_todos_for_owner(None).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].todo.title, "Buy milk");
        assert!(!todos[0].todo.completed);
    }

    #[test]
    fn delete_missing_todo_reports_failure() {
        let (_dir, db) = open_db();
        let out = run_script(&db, false, "delete-todo\n42\nexit\n");
        assert!(out.contains("Enter an id: Could not remove todo."));
    }

    #[test]
    fn delete_existing_todo_removes_it() {
        let (_dir, db) = open_db();
        let id = db.insert_todo(&NewTodo::new("Buy milk", None)).unwrap();

        let out = run_script(&db, false, &format!("delete-todo\n{id}\nlist-todos\nexit\n"));
        assert!(out.contains("Removed todo from database."));
        assert!(!out.contains("- 1 Buy milk"));
        assert!(db.list_todos_for_owner(None).unwrap().is_empty());
    }

    #[test]
    fn malformed_id_is_reported_and_loop_continues() {
        let (_dir, db) = open_db();
        let out = run_script(&db, false, "delete-todo\nabc\ncreate-todo\nStill here\nexit\n");
        assert!(out.contains("Invalid id: abc"));
        assert!(out.contains("Saved todo to database."));
        assert_eq!(db.list_todos_for_owner(None).unwrap().len(), 1);
    }

    #[test]
    fn unknown_commands_are_rejected_in_both_phases() {
        let (_dir, db) = open_db();
        let out = run_script(&db, true, "hello\nexit\n");
        assert!(out.contains(UNKNOWN_COMMAND));

        let out = run_script(&db, false, "Create-Todo\nexit\n");
        assert!(out.contains(UNKNOWN_COMMAND));
    }

    #[test]
    fn exit_before_login_skips_todo_phase() {
        let (_dir, db) = open_db();
        let out = run_script(&db, true, "exit\ncreate-todo\nnever\n");
        assert!(!out.contains("create-todo -"));
        assert!(db.list_todos_for_owner(None).unwrap().is_empty());
    }

    #[test]
    fn todo_commands_are_not_accepted_before_login() {
        let (_dir, db) = open_db();
        let out = run_script(&db, true, "create-todo\nexit\n");
        assert!(out.contains(UNKNOWN_COMMAND));
        assert!(!out.contains("Enter a title: "));
    }

    #[test]
    fn register_login_and_list_with_owner_name() {
        let (_dir, db) = open_db();
        let out = run_script(
            &db,
            true,
            "register\nalice\np1\nlogin\nalice\np1\ncreate-todo\nBuy milk\nlist-todos\nexit\n",
        );

        assert!(out.contains("Created user. Try logging in."));
        assert!(out.contains("You have logged in!"));
        assert!(out.contains("- 1 Buy milk\n  Completed: No\n  Username: alice\n"));

        let alice = db.find_user_by_credentials("alice", "p1").unwrap();
        let todos = db.list_todos_for_owner(Some(alice.id)).unwrap();
        assert_eq!(todos.len(), 1);
    }

    #[test]
    fn wrong_password_is_recoverable() {
        let (_dir, db) = open_db();
        db.insert_user(&NewUser::new("alice", "p1")).unwrap();

        let out = run_script(&db, true, "login\nalice\nnope\nlogin\nalice\np1\nexit\n");
        assert!(out.contains("Invalid username or password."));
        assert!(out.contains("You have logged in!"));
        assert!(out.contains("create-todo -"));
    }

    #[test]
    fn users_only_see_and_delete_their_own_todos() {
        let (_dir, db) = open_db();
        let alice = db.insert_user(&NewUser::new("alice", "p1")).unwrap();
        db.insert_user(&NewUser::new("bob", "p2")).unwrap();
        let id = db.insert_todo(&NewTodo::new("alice's", Some(alice))).unwrap();

        let out = run_script(
            &db,
            true,
            &format!("login\nbob\np2\nlist-todos\ndelete-todo\n{id}\nexit\n"),
        );
        assert!(!out.contains("alice's"));
        assert!(out.contains("Could not remove todo."));
        assert_eq!(db.list_todos_for_owner(Some(alice)).unwrap().len(), 1);
    }

    #[test]
    fn end_of_input_ends_cleanly() {
        let (_dir, db) = open_db();
        run_script(&db, true, "");
        run_script(&db, true, "register\nalice\n");
        run_script(&db, false, "create-todo\n");
        assert!(db.list_todos_for_owner(None).unwrap().is_empty());
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let (_dir, db) = open_db();
        let out = run_script(&db, false, "create-todo\r\nBuy milk\r\nlist-todos\r\nexit\r\n");
        assert!(out.contains("- 1 Buy milk\n"));
    }

    #[test]
    fn unterminated_crlf_exit_is_recognised() {
        let (_dir, db) = open_db();
        let out = run_script(&db, true, "exit\r");
        assert!(!out.contains(UNKNOWN_COMMAND));
    }

    #[test]
    fn login_returns_session_for_registered_user() {
        let (_dir, db) = open_db();
        let alice = db.insert_user(&NewUser::new("alice", "p1")).unwrap();

        let mut repl = Repl::new(db.clone(), true, Cursor::new("alice\np1\n".to_string()), Vec::new());
        match repl.login().unwrap() {
            Some(Session::User(user)) => {
                assert_eq!(user.id, alice);
                assert_eq!(user.name, "alice");
            }
            other => panic!("expected a user session, got {other:?}"),
        }

        let mut repl = Repl::new(db, true, Cursor::new("alice\nwrong\n".to_string()), Vec::new());
        assert_eq!(repl.login().unwrap(), None);
    }

    #[test]
    fn create_todo_refuses_when_session_user_is_gone() {
        let (_dir, db) = open_db();
        let id = db.insert_user(&NewUser::new("alice", "p1")).unwrap();
        let mut session = Session::User(db.find_user_by_id(id).unwrap().unwrap());
        db.with_conn(|c| {
            c.execute("DELETE FROM users WHERE id = ?1", [id])?;
            Ok(())
        })
        .unwrap();

        let mut repl = Repl::new(db.clone(), true, Cursor::new("Buy milk\n".to_string()), Vec::new());
        repl.create_todo(&mut session).unwrap();
        let out = String::from_utf8(repl.into_output()).unwrap();

        assert!(out.contains("You are not logged in."));
        assert!(!out.contains("Saved todo to database."));
        assert!(db.list_todos_for_owner(Some(id)).unwrap().is_empty());
        assert!(session.user().unwrap().todos.is_empty());
    }
}
