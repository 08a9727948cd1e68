use crate::coord::{BoardShape, Position};
use crate::force::Force;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardOrientation {
    Normal,  // White at bottom
    Rotated, // Black at bottom
}

// Screen coordinates of a cell: `y == 0` is the top-most rendered row, `x == 0` the left-most
// column. Unlike `Position` these depend on who is looking.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DisplayCoord {
    pub x: u8,
    pub y: u8,
}

impl BoardOrientation {
    pub fn for_force(force: Force) -> Self {
        match force {
            Force::White => BoardOrientation::Normal,
            Force::Black => BoardOrientation::Rotated,
        }
    }
}

pub fn to_display_coord(
    pos: Position, shape: BoardShape, orientation: BoardOrientation,
) -> DisplayCoord {
    match orientation {
        BoardOrientation::Normal => DisplayCoord { x: pos.col, y: shape.rows - 1 - pos.row },
        BoardOrientation::Rotated => DisplayCoord { x: shape.cols - 1 - pos.col, y: pos.row },
    }
}

pub fn from_display_coord(
    coord: DisplayCoord, shape: BoardShape, orientation: BoardOrientation,
) -> Option<Position> {
    if coord.x >= shape.cols || coord.y >= shape.rows {
        return None;
    }
    Some(match orientation {
        BoardOrientation::Normal => Position::new(shape.rows - 1 - coord.y, coord.x),
        BoardOrientation::Rotated => Position::new(coord.y, shape.cols - 1 - coord.x),
    })
}
