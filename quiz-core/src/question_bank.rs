use anyhow::{Context, Result};
use quiz_types::{Difficulty, GameError, Question};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;

use crate::board::{Board, CellKey};

/// Standard board ladder, lowest row first.
pub const DEFAULT_POINT_VALUES: [i32; 5] = [200, 400, 600, 800, 1000];

/// In-memory question source. Callers own the I/O and hand the payload in,
/// so the bank itself never touches the filesystem.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    categories: Vec<(String, Vec<Question>)>,
    point_values: Vec<i32>,
}

impl QuestionBank {
    pub fn new(categories: Vec<(String, Vec<Question>)>) -> Self {
        Self {
            categories,
            point_values: DEFAULT_POINT_VALUES.to_vec(),
        }
    }

    /// Parse a `{ category: [question, ...] }` JSON payload, keeping the
    /// category order of the document.
    pub fn from_json(payload: &str) -> Result<Self> {
        let data: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(payload).context("question payload is not a JSON object")?;

        let mut categories = Vec::with_capacity(data.len());
        for (name, value) in data {
            let questions: Vec<Question> = serde_json::from_value(value)
                .with_context(|| format!("malformed questions under category {name:?}"))?;
            categories.push((name, questions));
        }
        Ok(Self::new(categories))
    }

    pub fn with_point_values(mut self, point_values: Vec<i32>) -> Self {
        self.point_values = point_values;
        self
    }

    /// Category names, ordered as loaded.
    pub fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn point_values(&self) -> &[i32] {
        &self.point_values
    }

    /// A shuffled copy of one category's questions, optionally filtered by
    /// difficulty. An empty result is a reprompt at the boundary, never a
    /// session mutation.
    pub fn questions(
        &self,
        category: &str,
        difficulty: Option<Difficulty>,
        rng: &mut impl Rng,
    ) -> Result<Vec<Question>, GameError> {
        let pool = self
            .category_pool(category)
            .ok_or_else(|| GameError::UnknownCategory(category.to_string()))?;

        let mut picked: Vec<Question> = match difficulty {
            Some(wanted) => pool
                .iter()
                .filter(|q| q.difficulty == Some(wanted))
                .cloned()
                .collect(),
            None => pool.to_vec(),
        };
        if picked.is_empty() {
            return Err(GameError::EmptyPool {
                category: category.to_string(),
                difficulty: difficulty.map_or_else(|| "any".to_string(), |d| d.to_string()),
            });
        }
        picked.shuffle(rng);
        Ok(picked)
    }

    /// Draw a fresh board: one question per (category, point value) cell,
    /// taken from each category's shuffled pool. A category that cannot
    /// fill the ladder fails here rather than mid-game.
    pub fn build_board(&self, rng: &mut impl Rng) -> Result<Board, GameError> {
        if self.categories.is_empty() {
            return Err(GameError::Configuration(
                "question bank has no categories".to_string(),
            ));
        }

        let mut cells: HashMap<CellKey, Question> = HashMap::new();
        for (name, pool) in &self.categories {
            if pool.len() < self.point_values.len() {
                return Err(GameError::Configuration(format!(
                    "category {name:?} has {} questions but the board needs {}",
                    pool.len(),
                    self.point_values.len()
                )));
            }
            let mut drawn = pool.clone();
            drawn.shuffle(rng);
            for (points, question) in self.point_values.iter().zip(drawn) {
                cells.insert((name.clone(), *points), question);
            }
        }

        Ok(Board::new(
            self.categories.iter().map(|(name, _)| name.clone()).collect(),
            self.point_values.clone(),
            cells,
        ))
    }

    fn category_pool(&self, category: &str) -> Option<&[Question]> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, pool)| pool.as_slice())
    }
}
