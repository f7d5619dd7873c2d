use std::cmp::Reverse;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use quiz_types::{PlayerStats, ScoreRecord};
use tracing::warn;

/// Append-only JSON score file. Every write rewrites the whole file; records
/// are never mutated after being appended.
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing or unreadable file is just an empty leaderboard.
    pub fn load(&self) -> Vec<ScoreRecord> {
        let payload = match fs::read_to_string(&self.path) {
            Ok(payload) => payload,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&payload) {
            Ok(records) => records,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "score file is corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Append one record stamped with the current local time.
    pub fn save(&self, name: &str, score: i32, total: i32, category: &str) -> Result<ScoreRecord> {
        let record = ScoreRecord {
            name: name.to_string(),
            score,
            total,
            category: category.to_string(),
            date: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
        };

        let mut records = self.load();
        records.push(record.clone());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let payload = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, payload)
            .with_context(|| format!("writing {}", self.path.display()))?;

        Ok(record)
    }

    /// Best records first; equal scores keep their save order.
    pub fn top_scores(&self, limit: usize) -> Vec<ScoreRecord> {
        let mut records = self.load();
        records.sort_by_key(|record| Reverse(record.score));
        records.truncate(limit);
        records
    }

    /// Aggregate every record saved under `name`, case-insensitive. `None`
    /// when the player has never saved a score.
    pub fn player_stats(&self, name: &str) -> Option<PlayerStats> {
        let mut stats = PlayerStats::default();
        let mut found = false;

        for record in self.load() {
            if !record.name.eq_ignore_ascii_case(name) {
                continue;
            }
            found = true;
            stats.games += 1;
            stats.total_correct += record.score;
            stats.total_questions += record.total;

            let category = stats.categories.entry(record.category).or_default();
            category.correct += record.score;
            category.total += record.total;
        }

        found.then_some(stats)
    }
}
