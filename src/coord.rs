use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};


pub const DEFAULT_NUM_ROWS: u8 = 8;
pub const DEFAULT_NUM_COLS: u8 = 8;


// Board-relative cell coordinates, zero-based. Row 0 is White's home row regardless of who is
// looking at the board: only rendering flips.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self { Self { row, col } }

    // Parses cell names like "b2" or "B2": column letter followed by one-based row.
    pub fn from_notation(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let col_char = chars.next()?.to_ascii_uppercase();
        if !col_char.is_ascii_uppercase() {
            return None;
        }
        let row_one_based: u8 = chars.as_str().parse().ok()?;
        let row = row_one_based.checked_sub(1)?;
        Some(Self::new(row, col_char as u8 - b'A'))
    }

    // Columns past 'Z' have no letter and fall back to raw "(row, col)".
    pub fn to_notation(self) -> String {
        if self.col < 26 {
            format!("{}{}", char::from(b'A' + self.col), u32::from(self.row) + 1)
        } else {
            format!("({}, {})", self.row, self.col)
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.to_notation()) }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BoardShape {
    pub rows: u8,
    pub cols: u8,
}

impl BoardShape {
    pub fn contains(self, pos: Position) -> bool { pos.row < self.rows && pos.col < self.cols }

    // All cells, row-major starting from row 0.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        (0..self.rows)
            .cartesian_product(0..self.cols)
            .map(|(row, col)| Position::new(row, col))
    }

    pub fn num_cells(self) -> usize { usize::from(self.rows) * usize::from(self.cols) }
}

impl Default for BoardShape {
    fn default() -> Self { BoardShape { rows: DEFAULT_NUM_ROWS, cols: DEFAULT_NUM_COLS } }
}
