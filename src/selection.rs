use crate::board::{BoardSnapshot, Move};
use crate::coord::Position;


// Two-click move input. The state decides which cells accept clicks; renderers derive
// clickability from it instead of tracking handlers themselves.
//
//   Idle --(click on a piece)--> PieceSelected --(click on any cell)--> Submitted
//   any state --(new snapshot)--> Idle
//
// `Submitted` accepts no clicks at all. Only the next snapshot from the server brings the
// machine back to `Idle`, so at most one move is in flight per round-trip. There is no
// timeout: if the server never answers, input stays disabled.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    PieceSelected {
        origin: Position,
    },
    Submitted {
        mv: Move,
    },
}

#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClickOutcome {
    // Cell is not clickable in the current state.
    Ignored,
    OriginSelected(Position),
    // Move is complete and must be sent exactly once.
    MoveReady(Move),
}

impl SelectionState {
    pub fn origin(&self) -> Option<Position> {
        match self {
            SelectionState::PieceSelected { origin } => Some(*origin),
            SelectionState::Idle | SelectionState::Submitted { .. } => None,
        }
    }

    pub fn awaiting_server(&self) -> bool { matches!(self, SelectionState::Submitted { .. }) }

    pub fn is_clickable(&self, pos: Position, snapshot: &BoardSnapshot) -> bool {
        if !snapshot.shape().contains(pos) {
            return false;
        }
        match self {
            SelectionState::Idle => snapshot.is_occupied(pos),
            SelectionState::PieceSelected { .. } => true,
            SelectionState::Submitted { .. } => false,
        }
    }

    pub fn click(&mut self, pos: Position, snapshot: &BoardSnapshot) -> ClickOutcome {
        if !self.is_clickable(pos, snapshot) {
            return ClickOutcome::Ignored;
        }
        match *self {
            SelectionState::Idle => {
                *self = SelectionState::PieceSelected { origin: pos };
                ClickOutcome::OriginSelected(pos)
            }
            SelectionState::PieceSelected { origin } => {
                let mv = Move { start: origin, destination: pos };
                *self = SelectionState::Submitted { mv };
                ClickOutcome::MoveReady(mv)
            }
            SelectionState::Submitted { .. } => ClickOutcome::Ignored,
        }
    }

    pub fn reset(&mut self) { *self = SelectionState::Idle; }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::BoardShape;
    use crate::force::Force;
    use crate::piece::{Piece, PieceKind};

    fn snapshot() -> BoardSnapshot {
        BoardSnapshot::from_pieces(BoardShape::default(), [
            Piece::new(PieceKind::WhiteSarbaz, Force::White, Position::new(1, 4)),
            Piece::new(PieceKind::BlackSarbaz, Force::Black, Position::new(6, 4)),
        ])
        .unwrap()
    }

    #[test]
    fn empty_cell_inert_when_idle() {
        let snapshot = snapshot();
        let mut state = SelectionState::Idle;
        assert_eq!(state.click(Position::new(3, 4), &snapshot), ClickOutcome::Ignored);
        assert_eq!(state, SelectionState::Idle);
    }

    #[test]
    fn opponent_piece_is_selectable() {
        let snapshot = snapshot();
        let mut state = SelectionState::Idle;
        let origin = Position::new(6, 4);
        assert_eq!(state.click(origin, &snapshot), ClickOutcome::OriginSelected(origin));
    }

    #[test]
    fn same_cell_twice_makes_degenerate_move() {
        let snapshot = snapshot();
        let mut state = SelectionState::Idle;
        let pos = Position::new(1, 4);
        let _ = state.click(pos, &snapshot);
        assert_eq!(
            state.click(pos, &snapshot),
            ClickOutcome::MoveReady(Move { start: pos, destination: pos })
        );
    }

    #[test]
    fn submitted_ignores_everything_until_reset() {
        let snapshot = snapshot();
        let mut state = SelectionState::Idle;
        let _ = state.click(Position::new(1, 4), &snapshot);
        let _ = state.click(Position::new(3, 4), &snapshot);
        assert!(state.awaiting_server());
        for pos in snapshot.shape().positions() {
            assert!(!state.is_clickable(pos, &snapshot));
            assert_eq!(state.click(pos, &snapshot), ClickOutcome::Ignored);
        }
        state.reset();
        assert!(state.is_clickable(Position::new(1, 4), &snapshot));
    }

    #[test]
    fn outside_board_ignored() {
        let snapshot = snapshot();
        let mut state = SelectionState::Idle;
        let _ = state.click(Position::new(1, 4), &snapshot);
        assert_eq!(state.click(Position::new(8, 0), &snapshot), ClickOutcome::Ignored);
        assert_eq!(state.origin(), Some(Position::new(1, 4)));
    }
}
