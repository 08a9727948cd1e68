use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::coord::{BoardShape, Position};
use crate::piece::{Piece, PieceOnBoard};


// A move as sent to the server. Built from two clicks; the client never checks legality,
// so `start == destination` is a perfectly sendable move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Move {
    pub start: Position,
    pub destination: Position,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SnapshotError {
    DuplicatePosition(Position),
    OutOfBounds(Position),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::DuplicatePosition(pos) => {
                write!(f, "more than one piece at row {}, col {}", pos.row, pos.col)
            }
            SnapshotError::OutOfBounds(pos) => {
                write!(f, "piece outside the board at row {}, col {}", pos.row, pos.col)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

// Complete piece placement at one point in time. Snapshots are never patched: each push
// from the server produces a new one that replaces the old.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BoardSnapshot {
    shape: BoardShape,
    pieces: HashMap<Position, PieceOnBoard>,
}

impl BoardSnapshot {
    pub fn empty(shape: BoardShape) -> Self { BoardSnapshot { shape, pieces: HashMap::new() } }

    pub fn from_pieces(
        shape: BoardShape, pieces: impl IntoIterator<Item = Piece>,
    ) -> Result<Self, SnapshotError> {
        let mut snapshot = Self::empty(shape);
        for piece in pieces {
            if !shape.contains(piece.position) {
                return Err(SnapshotError::OutOfBounds(piece.position));
            }
            if snapshot.pieces.insert(piece.position, piece.on_board()).is_some() {
                return Err(SnapshotError::DuplicatePosition(piece.position));
            }
        }
        Ok(snapshot)
    }

    pub fn shape(&self) -> BoardShape { self.shape }
    pub fn get(&self, pos: Position) -> Option<PieceOnBoard> { self.pieces.get(&pos).copied() }
    pub fn is_occupied(&self, pos: Position) -> bool { self.pieces.contains_key(&pos) }
    pub fn len(&self) -> usize { self.pieces.len() }
    pub fn is_empty(&self) -> bool { self.pieces.is_empty() }

    // Sorted by position to keep output deterministic.
    pub fn pieces(&self) -> Vec<Piece> {
        self.pieces
            .iter()
            .map(|(&position, piece)| Piece::new(piece.kind, piece.force, position))
            .sorted_by_key(|piece| piece.position)
            .collect()
    }
}
