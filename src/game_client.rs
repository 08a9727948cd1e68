use std::collections::VecDeque;
use std::sync::mpsc;

use instant::Instant;
use log::{debug, warn};
use serde::Deserialize;

use crate::board::{BoardSnapshot, Move, SnapshotError};
use crate::board_view::{BoardView, render_board};
use crate::config::ProtocolTimings;
use crate::coord::{BoardShape, Position};
use crate::display::BoardOrientation;
use crate::event::{EventError, GameClientEvent, GameId, GameServerEvent};
use crate::force::Force;
use crate::piece::Piece;
use crate::polling::OneShotTimer;
use crate::selection::{ClickOutcome, SelectionState};


// Everything the hosting page knows about the game before the socket opens.
#[derive(Clone, Debug, Deserialize)]
pub struct GamePage {
    pub game_id: GameId,
    #[serde(rename = "user")]
    pub my_name: String,
    #[serde(rename = "player_color")]
    pub my_force: Force,
    #[serde(rename = "board", default)]
    pub board_shape: BoardShape,
    #[serde(default)]
    pub position: Vec<Piece>,
    #[serde(default = "default_turn")]
    pub turn: Force,
}

fn default_turn() -> Force { Force::White }

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameOutcome {
    Victory { winner: String },
    Draw,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameNotableEvent {
    MoveSent(Move),
    PositionUpdated,
    DrawOffered,
    GameOver(GameOutcome),
}

// Session context for one game page. Created when the page mounts, dropped when it goes
// away; nothing here outlives the socket.
pub struct GameClientState {
    page: GamePage,
    events_tx: mpsc::Sender<GameClientEvent>,
    snapshot: BoardSnapshot,
    selection: SelectionState,
    // Toggled on every position push. The server never states whose turn it is, so this
    // drifts if a push is lost.
    inferred_turn: Force,
    move_log: Vec<String>,
    outcome: Option<GameOutcome>,
    draw_offer_visible: bool,
    init_timer: OneShotTimer,
    notable_events: VecDeque<GameNotableEvent>,
}

impl GameClientState {
    pub fn new(
        page: GamePage, timings: &ProtocolTimings, events_tx: mpsc::Sender<GameClientEvent>,
        now: Instant,
    ) -> Result<Self, SnapshotError> {
        let snapshot = BoardSnapshot::from_pieces(page.board_shape, page.position.iter().copied())?;
        let mut init_timer = OneShotTimer::new(timings.init_delay);
        init_timer.arm(now);
        Ok(GameClientState {
            inferred_turn: page.turn,
            page,
            events_tx,
            snapshot,
            selection: SelectionState::Idle,
            move_log: Vec::new(),
            outcome: None,
            draw_offer_visible: false,
            init_timer,
            notable_events: VecDeque::new(),
        })
    }

    pub fn page(&self) -> &GamePage { &self.page }
    pub fn my_name(&self) -> &str { &self.page.my_name }
    pub fn my_force(&self) -> Force { self.page.my_force }
    pub fn snapshot(&self) -> &BoardSnapshot { &self.snapshot }
    pub fn selection(&self) -> SelectionState { self.selection }
    pub fn inferred_turn(&self) -> Force { self.inferred_turn }
    pub fn move_log(&self) -> &[String] { &self.move_log }
    pub fn outcome(&self) -> Option<&GameOutcome> { self.outcome.as_ref() }
    pub fn draw_offer_visible(&self) -> bool { self.draw_offer_visible }
    pub fn orientation(&self) -> BoardOrientation {
        BoardOrientation::for_force(self.page.my_force)
    }

    pub fn board_view(&self) -> BoardView {
        render_board(&self.snapshot, &self.selection, self.orientation())
    }

    pub fn status_line(&self) -> String {
        match &self.outcome {
            None => format!("Turn: {}", self.inferred_turn),
            Some(GameOutcome::Victory { winner }) => format!("GAME OVER, {} won", winner),
            Some(GameOutcome::Draw) => "Draw".to_owned(),
        }
    }

    // Fires the delayed `init` request. Hosts call this regularly.
    pub fn tick(&mut self, now: Instant) {
        if self.init_timer.poll(now) {
            self.send(GameClientEvent::Init);
        }
    }

    pub fn click_cell(&mut self, pos: Position) -> ClickOutcome {
        let outcome = self.selection.click(pos, &self.snapshot);
        if let ClickOutcome::MoveReady(mv) = outcome {
            self.send(GameClientEvent::MakeMove { mv });
            self.notable_events.push_back(GameNotableEvent::MoveSent(mv));
        }
        outcome
    }

    pub fn resign(&mut self) { self.send(GameClientEvent::Resign); }
    pub fn suggest_draw(&mut self) { self.send(GameClientEvent::SuggestDraw); }

    pub fn accept_draw(&mut self) {
        self.draw_offer_visible = false;
        self.send(GameClientEvent::AcceptDraw);
    }

    // Declining is purely local: the server is not told.
    pub fn decline_draw(&mut self) { self.draw_offer_visible = false; }

    pub fn process_server_event(&mut self, event: GameServerEvent) -> Result<(), EventError> {
        debug!("Game {}: got {:?}", self.page.game_id, event);
        match event {
            GameServerEvent::Position { position, last_move } => {
                let snapshot = BoardSnapshot::from_pieces(self.page.board_shape, position)
                    .map_err(|err| {
                        EventError::CannotApplyEvent(format!("Malformed position: {}", err))
                    })?;
                self.snapshot = snapshot;
                self.selection.reset();
                self.inferred_turn = self.inferred_turn.opponent();
                if let Some(last_move) = last_move {
                    self.append_moves(&last_move);
                }
                self.notable_events.push_back(GameNotableEvent::PositionUpdated);
            }
            GameServerEvent::Over { winner } => {
                let outcome = match winner {
                    Some(winner) if !winner.is_empty() => GameOutcome::Victory { winner },
                    _ => GameOutcome::Draw,
                };
                self.outcome = Some(outcome.clone());
                self.notable_events.push_back(GameNotableEvent::GameOver(outcome));
            }
            GameServerEvent::Init { moves } => {
                if let Some(moves) = moves {
                    self.append_moves(&moves);
                }
            }
            GameServerEvent::SuggestDraw { to } => {
                if to == self.page.my_name {
                    self.draw_offer_visible = true;
                    self.notable_events.push_back(GameNotableEvent::DrawOffered);
                }
            }
            GameServerEvent::Error { text } => {
                warn!("Game {}: server error: {}", self.page.game_id, text);
            }
            GameServerEvent::Unknown => {
                warn!("Game {}: ignoring unknown command", self.page.game_id);
            }
        }
        Ok(())
    }

    pub fn next_notable_event(&mut self) -> Option<GameNotableEvent> {
        self.notable_events.pop_front()
    }

    fn append_moves(&mut self, moves: &str) {
        self.move_log.extend(
            moves
                .split('|')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_owned),
        );
    }

    fn send(&self, event: GameClientEvent) {
        if self.events_tx.send(event).is_err() {
            warn!("Game {}: connection closed, dropping outgoing event", self.page.game_id);
        }
    }
}
