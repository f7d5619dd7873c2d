use quiz_types::Question;
use std::collections::HashMap;

/// One (category, point value) slot on the board.
pub type CellKey = (String, i32);

/// Category x point-value grid, each cell holding exactly one question.
/// Built once per session; whether a cell has been played is tracked by the
/// session's used-set, not here.
#[derive(Debug, Clone)]
pub struct Board {
    categories: Vec<String>,
    point_values: Vec<i32>,
    cells: HashMap<CellKey, Question>,
}

impl Board {
    pub(crate) fn new(
        categories: Vec<String>,
        point_values: Vec<i32>,
        cells: HashMap<CellKey, Question>,
    ) -> Self {
        Self {
            categories,
            point_values,
            cells,
        }
    }

    /// Column order as loaded from the question bank.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Row ladder, lowest value first.
    pub fn point_values(&self) -> &[i32] {
        &self.point_values
    }

    pub fn question(&self, category: &str, points: i32) -> Option<&Question> {
        self.cells.get(&(category.to_string(), points))
    }

    pub fn contains(&self, category: &str, points: i32) -> bool {
        self.cells.contains_key(&(category.to_string(), points))
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }
}
