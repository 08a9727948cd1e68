// Render model for the board: what every cell should look like right now. Hosts (DOM,
// terminal) mirror it verbatim; they never consult the snapshot or the selection directly.

use crate::board::BoardSnapshot;
use crate::coord::{BoardShape, Position};
use crate::display::{BoardOrientation, DisplayCoord, from_display_coord};
use crate::piece::PieceOnBoard;
use crate::selection::SelectionState;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FieldShade {
    Dark,
    Light,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellView {
    pub position: Position,
    pub display: DisplayCoord,
    pub shade: FieldShade,
    pub piece: Option<PieceOnBoard>,
    pub clickable: bool,
    pub selected_origin: bool,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BoardView {
    shape: BoardShape,
    orientation: BoardOrientation,
    // Display order: `rows[0]` is the top row on screen.
    rows: Vec<Vec<CellView>>,
}

pub fn field_shade(pos: Position) -> FieldShade {
    if (pos.row + pos.col) % 2 == 0 { FieldShade::Dark } else { FieldShade::Light }
}

pub fn render_board(
    snapshot: &BoardSnapshot, selection: &SelectionState, orientation: BoardOrientation,
) -> BoardView {
    let shape = snapshot.shape();
    let origin = selection.origin();
    let rows = (0..shape.rows)
        .map(|y| {
            (0..shape.cols)
                .filter_map(|x| {
                    let display = DisplayCoord { x, y };
                    let position = from_display_coord(display, shape, orientation)?;
                    Some(CellView {
                        position,
                        display,
                        shade: field_shade(position),
                        piece: snapshot.get(position),
                        clickable: selection.is_clickable(position, snapshot),
                        selected_origin: origin == Some(position),
                    })
                })
                .collect()
        })
        .collect();
    BoardView { shape, orientation, rows }
}

impl BoardView {
    pub fn shape(&self) -> BoardShape { self.shape }
    pub fn orientation(&self) -> BoardOrientation { self.orientation }
    pub fn rows(&self) -> &[Vec<CellView>] { &self.rows }
    pub fn cells(&self) -> impl Iterator<Item = &CellView> { self.rows.iter().flatten() }

    pub fn cell(&self, pos: Position) -> Option<&CellView> {
        self.cells().find(|cell| cell.position == pos)
    }

    pub fn any_clickable(&self) -> bool { self.cells().any(|cell| cell.clickable) }
}

impl CellView {
    // Class list understood by the board stylesheet.
    pub fn css_classes(&self, orientation: BoardOrientation) -> Vec<&'static str> {
        let mut classes = vec!["cell"];
        classes.push(match self.shade {
            FieldShade::Dark => "black_field",
            FieldShade::Light => "white_field",
        });
        if let Some(piece) = self.piece {
            classes.push(piece.kind.to_code());
            classes.push(piece.force.to_wire_name());
            classes.push("piece");
            if orientation == BoardOrientation::Rotated {
                classes.push("rotated");
            }
        }
        if self.clickable {
            classes.push("clickable");
        }
        if self.selected_origin {
            classes.push("selected_piece");
        }
        classes
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::force::Force;
    use crate::piece::{Piece, PieceKind};

    #[test]
    fn rotated_board_keeps_positions() {
        let snapshot = BoardSnapshot::from_pieces(BoardShape::default(), [Piece::new(
            PieceKind::Rukh,
            Force::White,
            Position::new(0, 0),
        )])
        .unwrap();
        let view = render_board(&snapshot, &SelectionState::Idle, BoardOrientation::Rotated);
        let top_right = view.rows()[0][7];
        assert_eq!(top_right.position, Position::new(0, 0));
        assert!(top_right.clickable);
        assert_eq!(top_right.css_classes(view.orientation()), [
            "cell",
            "black_field",
            "RH",
            "WHITE",
            "piece",
            "rotated",
            "clickable"
        ]);
        assert_eq!(view.cells().count(), 64);
    }
}
