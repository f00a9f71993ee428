//! Letter grid model.
//!
//! Each player owns one grid of `max_turns` rows by [`WORD_LENGTH`] cells.
//! A row is either entirely unfilled or entirely lettered; feedback
//! classifications arrive later cell by cell (staggered reveal), so a
//! lettered row may temporarily carry `Unset` classifications.

use serde::Serialize;
use std::fmt;

/// Letters per guess.
pub const WORD_LENGTH: usize = 5;

/// Default maximum turns per match.
pub const DEFAULT_MAX_TURNS: usize = 6;

/// The two competing players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Display name as the match engine sends it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "Player 1",
            Self::Two => "Player 2",
        }
    }

    /// Parse a wire player name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Player 1" => Some(Self::One),
            "Player 2" => Some(Self::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-cell feedback classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Not yet revealed
    #[default]
    Unset,
    /// Letter in the correct position
    Correct,
    /// Letter in the word, wrong position
    Present,
    /// Letter not in the word
    Absent,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Correct => "correct",
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }
}

/// A single grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub letter: Option<char>,
    pub classification: Classification,
}

impl Cell {
    pub fn is_filled(&self) -> bool {
        self.letter.is_some()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "letter": self.letter.map(String::from).unwrap_or_default(),
            "classification": self.classification.as_str()
        })
    }
}

/// One guess row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: [Cell; WORD_LENGTH],
}

impl Row {
    /// A row is filled once its letters are set; classifications may lag.
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(Cell::is_filled)
    }

    pub fn cells(&self) -> &[Cell; WORD_LENGTH] {
        &self.cells
    }

    /// Letters of a filled row, in order.
    pub fn letters(&self) -> Vec<char> {
        self.cells.iter().filter_map(|c| c.letter).collect()
    }
}

/// One player's letter grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// Create an empty grid with `max_turns` rows.
    pub fn new(max_turns: usize) -> Self {
        Self {
            rows: vec![Row::default(); max_turns],
        }
    }

    pub fn max_turns(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, turn_index: usize) -> &Row {
        &self.rows[turn_index]
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Index of the first unfilled row, or `None` when the grid is full.
    pub fn next_unfilled_row(&self) -> Option<usize> {
        self.rows.iter().position(|r| !r.is_filled())
    }

    /// Fill a row's letters without touching classifications.
    ///
    /// # Panics
    ///
    /// Panics if `turn_index` is out of range or the row is already filled.
    /// Both are programming errors, not recoverable input errors.
    pub fn set_row(&mut self, turn_index: usize, letters: [char; WORD_LENGTH]) {
        assert!(
            turn_index < self.rows.len(),
            "row {} out of range (max_turns {})",
            turn_index,
            self.rows.len()
        );
        let row = &mut self.rows[turn_index];
        assert!(!row.is_filled(), "row {} already filled", turn_index);
        for (cell, letter) in row.cells.iter_mut().zip(letters) {
            cell.letter = Some(letter);
        }
    }

    /// Set one cell's classification.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn set_classification(
        &mut self,
        turn_index: usize,
        letter_index: usize,
        classification: Classification,
    ) {
        assert!(
            turn_index < self.rows.len(),
            "row {} out of range (max_turns {})",
            turn_index,
            self.rows.len()
        );
        assert!(
            letter_index < WORD_LENGTH,
            "letter index {} out of range",
            letter_index
        );
        self.rows[turn_index].cells[letter_index].classification = classification;
    }

    /// Clear all rows, keeping dimensions.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            *row = Row::default();
        }
    }

    /// Resize to a new row count, clearing all content.
    pub fn reset(&mut self, max_turns: usize) {
        self.rows = vec![Row::default(); max_turns];
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| !r.is_filled())
    }

    /// Convert grid to a JSON snapshot for clients.
    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|row| {
                let cells: Vec<serde_json::Value> =
                    row.cells.iter().map(|c| c.to_json()).collect();
                serde_json::Value::Array(cells)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}
