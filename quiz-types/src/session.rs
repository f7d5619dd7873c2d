use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type SessionId = Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: i32,
}

/// Screen the session is on. `Start` is the pre-session setup screen; a
/// live session begins at `Board` (the category menu in linear sessions)
/// and `Final` is terminal until the session is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Start,
    Board,
    Question,
    Result,
    Final,
}

/// One answered or skipped question. Append-only; `bonus` is only present
/// for correct answers in judged sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub player: String,
    pub category: String,
    pub question: String,
    pub picked: String,
    pub answer: String,
    pub correct: bool,
    pub earned: i32,
    pub points: i32,
    pub elapsed_secs: f64,
    pub bonus: Option<f64>,
    pub timestamp: String, // ISO 8601 string
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standing {
    pub rank: u32,
    pub name: String,
    pub score: i32,
}
