mod common;

use std::sync::mpsc;

use common::*;
use indoc::indoc;
use pretty_assertions::assert_eq;
use shatranj_client::board::Move;
use shatranj_client::config::ProtocolTimings;
use shatranj_client::coord::Position;
use shatranj_client::display::BoardOrientation;
use shatranj_client::event::{GameClientEvent, GameServerEvent};
use shatranj_client::force::Force;
use shatranj_client::game_client::{GameClientState, GameNotableEvent, GameOutcome};
use shatranj_client::piece::PieceKind;
use shatranj_client::selection::{ClickOutcome, SelectionState};
use shatranj_client::wire::{encode_obj, parse_obj};


struct TestGame {
    clock: FakeClock,
    state: GameClientState,
    rx: mpsc::Receiver<GameClientEvent>,
}

impl TestGame {
    fn new(my_name: &str, my_force: Force) -> Self {
        let clock = FakeClock::new();
        let (tx, rx) = mpsc::channel();
        let state = GameClientState::new(
            game_page(my_name, my_force),
            &ProtocolTimings::default(),
            tx,
            clock.now(),
        )
        .unwrap();
        TestGame { clock, state, rx }
    }

    fn sent(&self) -> Vec<GameClientEvent> { drain(&self.rx) }

    fn notable(&mut self) -> Vec<GameNotableEvent> {
        std::iter::from_fn(|| self.state.next_notable_event()).collect()
    }

    fn push(&mut self, json: &str) {
        let event: GameServerEvent = parse_obj(json).unwrap();
        self.state.process_server_event(event).unwrap();
    }
}

#[test]
fn two_clicks_send_one_move() {
    let mut game = TestGame::new("alice", Force::White);
    assert_eq!(
        game.state.click_cell(Position::new(1, 4)),
        ClickOutcome::OriginSelected(Position::new(1, 4))
    );
    assert!(game.sent().is_empty());
    let mv = Move {
        start: Position::new(1, 4),
        destination: Position::new(3, 4),
    };
    assert_eq!(game.state.click_cell(Position::new(3, 4)), ClickOutcome::MoveReady(mv));
    let sent = game.sent();
    assert_eq!(sent, vec![GameClientEvent::MakeMove { mv }]);
    assert_eq!(
        encode_obj(&sent[0]).unwrap(),
        r#"{"command":"make_move","move":{"start":{"row":1,"col":4},"destination":{"row":3,"col":4}}}"#
    );
    assert_eq!(game.notable(), vec![GameNotableEvent::MoveSent(mv)]);
}

#[test]
fn nothing_clickable_while_move_in_flight() {
    let mut game = TestGame::new("alice", Force::White);
    let _ = game.state.click_cell(pos("e2"));
    let _ = game.state.click_cell(pos("e4"));
    assert!(!game.state.board_view().any_clickable());
    assert_eq!(game.state.click_cell(pos("a1")), ClickOutcome::Ignored);
    assert_eq!(game.state.click_cell(pos("e5")), ClickOutcome::Ignored);
    assert_eq!(game.sent().len(), 1);
}

#[test]
fn empty_cell_ignored_before_selection() {
    let mut game = TestGame::new("alice", Force::White);
    assert_eq!(game.state.click_cell(pos("d4")), ClickOutcome::Ignored);
    assert_eq!(game.state.selection(), SelectionState::Idle);
    assert!(game.sent().is_empty());
}

#[test]
fn position_push_replaces_snapshot() {
    let mut game = TestGame::new("alice", Force::White);
    let _ = game.state.click_cell(pos("e2"));
    let _ = game.state.click_cell(pos("e4"));
    game.push(indoc! {r#"
        {
            "command": "position",
            "position": [
                {"type": "WS", "color": "WHITE", "position": {"row": 3, "col": 4}},
                {"type": "SH", "color": "BLACK", "position": {"row": 7, "col": 4}}
            ],
            "move": "e2-e4"
        }
    "#});
    let snapshot = game.state.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert!(!snapshot.is_occupied(Position::new(0, 0)));
    assert!(!snapshot.is_occupied(Position::new(1, 4)));
    assert_eq!(snapshot.get(Position::new(3, 4)).unwrap().kind, PieceKind::WhiteSarbaz);
    assert_eq!(game.state.selection(), SelectionState::Idle);
    assert_eq!(game.state.inferred_turn(), Force::Black);
    assert_eq!(game.state.status_line(), "Turn: BLACK");
    assert_eq!(game.state.move_log(), ["e2-e4"]);

    // Input is live again: occupied cells only.
    let view = game.state.board_view();
    assert!(view.cell(Position::new(3, 4)).unwrap().clickable);
    assert!(!view.cell(Position::new(1, 4)).unwrap().clickable);
}

#[test]
fn malformed_position_leaves_state_alone() {
    let mut game = TestGame::new("alice", Force::White);
    let before = game.state.snapshot().clone();
    let event: GameServerEvent = parse_obj(
        r#"{"command": "position", "position": [
            {"type": "WS", "color": "WHITE", "position": {"row": 3, "col": 4}},
            {"type": "BS", "color": "BLACK", "position": {"row": 3, "col": 4}}
        ]}"#,
    )
    .unwrap();
    assert!(game.state.process_server_event(event).is_err());
    assert_eq!(game.state.snapshot(), &before);
    assert_eq!(game.state.inferred_turn(), Force::White);
}

#[test]
fn out_of_board_push_rejected() {
    let mut game = TestGame::new("alice", Force::White);
    let _ = game.state.click_cell(pos("e2"));
    let before = game.state.snapshot().clone();
    let event: GameServerEvent = parse_obj(
        r#"{"command": "position", "position": [
            {"type": "SH", "color": "WHITE", "position": {"row": 0, "col": 200}}
        ]}"#,
    )
    .unwrap();
    let err = game.state.process_server_event(event).unwrap_err();
    assert!(err.to_string().contains("row 0, col 200"));
    assert_eq!(game.state.snapshot(), &before);
    assert_eq!(game.state.selection(), SelectionState::PieceSelected { origin: pos("e2") });
    assert_eq!(game.state.inferred_turn(), Force::White);
    assert!(game.notable().is_empty());
}

#[test]
fn position_push_drops_pending_selection() {
    let mut game = TestGame::new("alice", Force::White);
    assert_eq!(game.state.click_cell(pos("a1")), ClickOutcome::OriginSelected(pos("a1")));
    assert!(game.state.board_view().cell(pos("a1")).unwrap().selected_origin);
    game.push(
        r#"{"command": "position", "position": [
            {"type": "RH", "color": "WHITE", "position": {"row": 0, "col": 0}},
            {"type": "SH", "color": "BLACK", "position": {"row": 7, "col": 4}}
        ]}"#,
    );
    assert_eq!(game.state.selection(), SelectionState::Idle);
    let view = game.state.board_view();
    assert!(view.cells().all(|cell| !cell.selected_origin));
    assert!(view.cell(pos("a1")).unwrap().clickable);
    assert!(!view.cell(pos("b1")).unwrap().clickable);
    assert!(game.sent().is_empty());
}

#[test]
fn init_sent_once_after_delay() {
    let mut game = TestGame::new("alice", Force::White);
    let now = game.clock.advance(50 * MS);
    game.state.tick(now);
    assert!(game.sent().is_empty());
    let now = game.clock.advance(60 * MS);
    game.state.tick(now);
    assert_eq!(game.sent(), vec![GameClientEvent::Init]);
    let now = game.clock.advance(10_000 * MS);
    game.state.tick(now);
    assert!(game.sent().is_empty());
}

#[test]
fn init_reply_fills_move_log() {
    let mut game = TestGame::new("alice", Force::White);
    game.push(r#"{"command": "init", "moves": "e2-e4|e7-e5| |g1-f3"}"#);
    assert_eq!(game.state.move_log(), ["e2-e4", "e7-e5", "g1-f3"]);
    game.push(r#"{"command": "init"}"#);
    assert_eq!(game.state.move_log().len(), 3);
}

#[test]
fn game_over() {
    let mut game = TestGame::new("alice", Force::White);
    game.push(r#"{"command": "over", "winner": "bob"}"#);
    assert_eq!(game.state.outcome(), Some(&GameOutcome::Victory { winner: "bob".to_owned() }));
    assert_eq!(game.state.status_line(), "GAME OVER, bob won");
    assert_eq!(game.notable(), vec![GameNotableEvent::GameOver(GameOutcome::Victory {
        winner: "bob".to_owned()
    })]);
}

#[test]
fn game_over_without_winner_is_draw() {
    let mut game = TestGame::new("alice", Force::White);
    game.push(r#"{"command": "over", "winner": ""}"#);
    assert_eq!(game.state.outcome(), Some(&GameOutcome::Draw));
    let mut game = TestGame::new("alice", Force::White);
    game.push(r#"{"command": "over"}"#);
    assert_eq!(game.state.status_line(), "Draw");
}

#[test]
fn draw_offer_shown_only_to_addressee() {
    let mut bob = TestGame::new("bob", Force::Black);
    bob.push(r#"{"command": "suggest_draw", "to": "bob"}"#);
    assert!(bob.state.draw_offer_visible());
    assert_eq!(bob.notable(), vec![GameNotableEvent::DrawOffered]);

    let mut alice = TestGame::new("alice", Force::White);
    alice.push(r#"{"command": "suggest_draw", "to": "bob"}"#);
    assert!(!alice.state.draw_offer_visible());
    assert!(alice.notable().is_empty());
}

#[test]
fn accept_and_decline_draw() {
    let mut game = TestGame::new("bob", Force::Black);
    game.push(r#"{"command": "suggest_draw", "to": "bob"}"#);
    game.state.decline_draw();
    assert!(!game.state.draw_offer_visible());
    assert!(game.sent().is_empty());

    game.push(r#"{"command": "suggest_draw", "to": "bob"}"#);
    game.state.accept_draw();
    assert!(!game.state.draw_offer_visible());
    assert_eq!(game.sent(), vec![GameClientEvent::AcceptDraw]);
}

#[test]
fn resign_and_offer_draw() {
    let mut game = TestGame::new("alice", Force::White);
    game.state.suggest_draw();
    game.state.resign();
    assert_eq!(game.sent(), vec![GameClientEvent::SuggestDraw, GameClientEvent::Resign]);
    assert_eq!(encode_obj(&GameClientEvent::AcceptDraw).unwrap(), r#"{"command":"accept_draw"}"#);
}

#[test]
fn error_and_unknown_pushes_are_ignored() {
    let mut game = TestGame::new("alice", Force::White);
    let _ = game.state.click_cell(pos("e2"));
    let _ = game.state.click_cell(pos("e4"));
    game.notable();
    game.push(r#"{"command": "error", "text": "Not your turn"}"#);
    game.push(r#"{"command": "chat", "text": "hi"}"#);
    assert!(game.state.selection().awaiting_server());
    assert!(game.notable().is_empty());
}

#[test]
fn black_sees_rotated_board() {
    let game = TestGame::new("bob", Force::Black);
    let view = game.state.board_view();
    assert_eq!(view.orientation(), BoardOrientation::Rotated);
    // White's rukh on a1 is in the top-right corner for black.
    assert_eq!(view.rows()[0][7].position, Position::new(0, 0));
    assert_eq!(view.rows()[7][0].position, Position::new(7, 7));

    let game = TestGame::new("alice", Force::White);
    assert_eq!(game.state.board_view().rows()[7][0].position, Position::new(0, 0));
}
