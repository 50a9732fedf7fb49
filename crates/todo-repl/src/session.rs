use todo_types::{Todo, User};

/// Who the todo commands act for. Created once before the todo phase starts
/// and never cleared.
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    /// Accounts are disabled; todos have no owner.
    Anonymous,
    /// Logged in through `login`.
    User(User),
}

impl Session {
    /// Owner id used to scope every todo query and delete.
    pub fn owner_id(&self) -> Option<i64> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user.id),
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user),
        }
    }

    /// Keep the in-memory back-reference in step with a todo just saved.
    pub(crate) fn remember(&mut self, todo: Todo) {
        if let Self::User(user) = self {
            user.todos.push(todo);
        }
    }
}
