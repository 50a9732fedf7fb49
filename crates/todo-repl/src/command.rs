/// Commands accepted before login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthCommand {
    Register,
    Login,
    Exit,
}

impl AuthCommand {
    /// Exact, case-sensitive match.
    pub fn parse(line: &str) -> Option<Self> {
        match line {
            "register" => Some(Self::Register),
            "login" => Some(Self::Login),
            "exit" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Commands accepted once a session exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoCommand {
    Create,
    Delete,
    List,
    Exit,
}

impl TodoCommand {
    /// Exact, case-sensitive match.
    pub fn parse(line: &str) -> Option<Self> {
        match line {
            "create-todo" => Some(Self::Create),
            "delete-todo" => Some(Self::Delete),
            "list-todos" => Some(Self::List),
            "exit" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub const AUTH_HELP: &[&str] = &[
    "register - Create and save a user account.",
    "login    - Login to the application.",
];

pub const TODO_HELP: &[&str] = &[
    "create-todo - Create and save todos to database.",
    "delete-todo - Remove todos from database.",
    "list-todos  - View all todos.",
];
