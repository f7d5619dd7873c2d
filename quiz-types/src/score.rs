use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One persisted leaderboard row. Records are append-only; the date is a
/// local "YYYY-MM-DD HH:MM" string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: i32,
    pub total: i32,
    pub category: String,
    pub date: String,
}

/// Aggregate over every saved record for one player, case-insensitive on
/// the name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games: u32,
    pub total_correct: i32,
    pub total_questions: i32,
    pub categories: BTreeMap<String, CategoryStats>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CategoryStats {
    pub correct: i32,
    pub total: i32,
}
