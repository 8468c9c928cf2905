//! Turn-log record format.
//!
//! A session's turn log is an ordered sequence of role-prefixed lines
//! ("User: ..." / "Assistant: ..."). The prefix format lives here so every
//! store adapter writes and reads the same shape.

use std::fmt;

/// Who produced a turn-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    /// Formats a turn as its stored record line.
    pub fn record_line(&self, text: &str) -> String {
        format!("{}: {}", self, text)
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "User"),
            TurnRole::Assistant => write!(f, "Assistant"),
        }
    }
}
