use crate::session::Phase;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("invalid session configuration: {0}")]
    Configuration(String),
    #[error("{category} for {points} is not available")]
    InvalidSelection { category: String, points: i32 },
    #[error("no questions left in this session")]
    QuestionsExhausted,
    #[error("no {difficulty} questions in {category}, try another")]
    EmptyPool { category: String, difficulty: String },
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("no player named {0} in this session")]
    PlayerNotFound(String),
    #[error("no question is in flight")]
    NoActiveQuestion,
    #[error("{op} is not allowed on the {phase:?} screen")]
    WrongPhase { op: &'static str, phase: Phase },
    #[error("{op} does not apply to this session's mode")]
    WrongMode { op: &'static str },
}
