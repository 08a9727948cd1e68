use derive_new::new;
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::coord::Position;
use crate::force::Force;


// Shatranj piece set. The client never reasons about how pieces move; the kind is a
// presentation tag that travels as a two-letter code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, Serialize, Deserialize)]
pub enum PieceKind {
    #[serde(rename = "SH")]
    Shah,
    #[serde(rename = "FZ")]
    Ferz,
    #[serde(rename = "RH")]
    Rukh,
    #[serde(rename = "PL")]
    Pil,
    #[serde(rename = "AB")]
    Asb,
    #[serde(rename = "WS")]
    WhiteSarbaz,
    #[serde(rename = "BS")]
    BlackSarbaz,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new)]
pub struct PieceOnBoard {
    pub kind: PieceKind,
    pub force: Force,
}

// A piece as it appears in a pushed position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type")]
    pub kind: PieceKind,
    #[serde(rename = "color")]
    pub force: Force,
    pub position: Position,
}

impl PieceKind {
    pub fn to_code(self) -> &'static str {
        match self {
            PieceKind::Shah => "SH",
            PieceKind::Ferz => "FZ",
            PieceKind::Rukh => "RH",
            PieceKind::Pil => "PL",
            PieceKind::Asb => "AB",
            PieceKind::WhiteSarbaz => "WS",
            PieceKind::BlackSarbaz => "BS",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SH" => Some(PieceKind::Shah),
            "FZ" => Some(PieceKind::Ferz),
            "RH" => Some(PieceKind::Rukh),
            "PL" => Some(PieceKind::Pil),
            "AB" => Some(PieceKind::Asb),
            "WS" => Some(PieceKind::WhiteSarbaz),
            "BS" => Some(PieceKind::BlackSarbaz),
            _ => None,
        }
    }
}

impl Piece {
    pub fn on_board(self) -> PieceOnBoard { PieceOnBoard::new(self.kind, self.force) }
}

// Closest chess glyphs: shah ~ king, ferz ~ queen, rukh ~ rook, pil ~ bishop, asb ~ knight,
// sarbaz ~ pawn.
pub fn piece_to_pictogram(kind: PieceKind, force: Force) -> char {
    use self::Force::*;
    use self::PieceKind::*;
    match (force, kind) {
        (White, Shah) => '♔',
        (White, Ferz) => '♕',
        (White, Rukh) => '♖',
        (White, Pil) => '♗',
        (White, Asb) => '♘',
        (White, WhiteSarbaz | BlackSarbaz) => '♙',
        (Black, Shah) => '♚',
        (Black, Ferz) => '♛',
        (Black, Rukh) => '♜',
        (Black, Pil) => '♝',
        (Black, Asb) => '♞',
        (Black, WhiteSarbaz | BlackSarbaz) => '♟',
    }
}
