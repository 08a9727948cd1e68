// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::sync::mpsc;
use std::time::Duration;

use instant::Instant;
use shatranj_client::coord::Position;
use shatranj_client::event::GameId;
use shatranj_client::force::Force;
use shatranj_client::game_client::GamePage;
use shatranj_client::piece::{Piece, PieceKind};


pub const MS: Duration = Duration::from_millis(1);

#[allow(dead_code)]
pub fn pos(notation: &str) -> Position { Position::from_notation(notation).unwrap() }

// Everything sent so far, in order. Leaves the channel open.
#[allow(dead_code)]
pub fn drain<T>(rx: &mpsc::Receiver<T>) -> Vec<T> { rx.try_iter().collect() }

#[allow(dead_code)]
pub fn sarbaz_duel() -> Vec<Piece> {
    vec![
        Piece::new(PieceKind::Rukh, Force::White, Position::new(0, 0)),
        Piece::new(PieceKind::WhiteSarbaz, Force::White, Position::new(1, 4)),
        Piece::new(PieceKind::BlackSarbaz, Force::Black, Position::new(6, 4)),
        Piece::new(PieceKind::Shah, Force::Black, Position::new(7, 4)),
    ]
}

#[allow(dead_code)]
pub fn game_page(my_name: &str, my_force: Force) -> GamePage {
    GamePage {
        game_id: GameId::new("7"),
        my_name: my_name.to_owned(),
        my_force,
        board_shape: Default::default(),
        position: sarbaz_duel(),
        turn: Force::White,
    }
}

// Test clock. Only moves when told to.
#[allow(dead_code)]
pub struct FakeClock {
    now: Instant,
}

#[allow(dead_code)]
impl FakeClock {
    pub fn new() -> Self { FakeClock { now: Instant::now() } }
    pub fn now(&self) -> Instant { self.now }
    pub fn advance(&mut self, d: Duration) -> Instant {
        self.now += d;
        self.now
    }
}
