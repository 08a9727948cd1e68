use std::io;
use std::path::Path;
use std::sync::mpsc;

use anyhow::Context;

use crossterm::style::{self, Stylize};
use crossterm::{cursor, execute, terminal};
use instant::Instant;
use itertools::Itertools;
use log::info;
use scopeguard::defer;
use shatranj_client::coord::Position;
use shatranj_client::event::{GameClientEvent, GameId, GameServerEvent};
use shatranj_client::force::Force;
use shatranj_client::game_client::{GameClientState, GameNotableEvent, GamePage};
use shatranj_client::piece::Piece;
use shatranj_client::selection::ClickOutcome;
use shatranj_client::wire;

use crate::client_config::ClientConfig;
use crate::event_loop::{
    IncomingEvent, KeyboardAction, KeyboardInput, parse_command, spawn_terminal_input,
    spawn_ticker, writeln_raw,
};
use crate::{network, tui};


const MOVE_LOG_TAIL: usize = 10;

pub struct GameArgs {
    pub server_address: String,
    pub game_id: String,
    pub player_name: String,
    pub force: Force,
    // Placement the game starts from. The server only pushes positions after moves.
    pub position: Vec<Piece>,
}

// Same piece list format as the `position` push.
pub fn parse_position(json: &str) -> anyhow::Result<Vec<Piece>> {
    serde_json::from_str(json).context("Expected a JSON list of pieces.")
}

pub fn read_position_file(path: &Path) -> anyhow::Result<Vec<Piece>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read position file '{}'.", path.display()))?;
    parse_position(&contents)
        .with_context(|| format!("Failed to parse position file '{}'.", path.display()))
}

fn render(
    stdout: &mut io::Stdout, state: &GameClientState, keyboard_input: &str,
    message: &Option<String>, disconnected: &Option<String>,
) -> io::Result<()> {
    execute!(stdout, cursor::MoveTo(0, 0))?;
    writeln_raw(stdout, tui::render_board(&state.board_view()))?;
    // Note. Don't clear the board to avoid blinking.
    execute!(stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;
    writeln_raw(
        stdout,
        format!(
            "{}    {}    {}",
            state.my_name(),
            state.status_line(),
            tui::render_material(state.snapshot())
        ),
    )?;
    let log = state.move_log();
    let tail = &log[log.len().saturating_sub(MOVE_LOG_TAIL)..];
    writeln_raw(stdout, format!("Moves: {}\n", tail.iter().join(" ")))?;
    if state.draw_offer_visible() {
        writeln_raw(stdout, "Draw offered: /accept or /decline".with(style::Color::Magenta))?;
    }

    let input_style = if state.selection().awaiting_server() {
        style::Color::DarkGrey
    } else {
        style::Color::White
    };
    let prompt = match state.selection().origin() {
        Some(origin) => format!("{} -> {}▂", origin, keyboard_input),
        None => format!("{}▂", keyboard_input),
    };
    writeln_raw(stdout, prompt.with(input_style))?;
    if let Some(msg) = message {
        writeln_raw(stdout, msg.clone().with(style::Color::Red))?;
    }
    if let Some(reason) = disconnected {
        writeln_raw(stdout, format!("Disconnected: {}", reason).with(style::Color::Red))?;
    }
    Ok(())
}

// Moves are typed as cells: "e2 e4" clicks both, "e2" then "e4" does the same in two steps.
fn process_input(state: &mut GameClientState, input: &str) -> Result<(), String> {
    if let Some((cmd, _)) = parse_command(input) {
        match cmd {
            "resign" => state.resign(),
            "draw" => state.suggest_draw(),
            "accept" => state.accept_draw(),
            "decline" => state.decline_draw(),
            _ => return Err(format!("Unknown command: '{}'", cmd)),
        }
        return Ok(());
    }
    for word in input.split_whitespace() {
        let pos = Position::from_notation(word).ok_or_else(|| format!("Bad cell: '{}'", word))?;
        if state.click_cell(pos) == ClickOutcome::Ignored {
            return Err(format!("Cannot select {} now", pos));
        }
    }
    Ok(())
}

pub fn run(args: GameArgs, config: ClientConfig) -> anyhow::Result<()> {
    let (socket_in, socket_out) = network::connect(
        &args.server_address,
        &wire::game_socket_path(&args.game_id),
        config.cookie.as_deref(),
    )?;

    let (tx, rx) = mpsc::channel::<IncomingEvent<GameServerEvent>>();
    network::spawn_reader(socket_in, tx.clone());
    spawn_terminal_input(tx.clone());
    spawn_ticker(tx, config.tick_interval);
    let (server_tx, server_rx) = mpsc::channel::<GameClientEvent>();
    network::spawn_writer(socket_out, server_rx);

    let page = GamePage {
        game_id: GameId::new(args.game_id),
        my_name: args.player_name,
        my_force: args.force,
        board_shape: Default::default(),
        position: args.position,
        turn: Force::White,
    };
    let mut state = GameClientState::new(page, &config.timings, server_tx, Instant::now())?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    defer! {
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    };

    let mut keyboard_input = KeyboardInput::default();
    let mut message = None;
    let mut disconnected = None;
    for event in rx {
        match event {
            IncomingEvent::Network(event) => {
                if let Err(err) = state.process_server_event(event) {
                    message = Some(err.to_string());
                }
            }
            IncomingEvent::Disconnected(reason) => {
                disconnected = Some(reason);
            }
            IncomingEvent::Terminal(event) => match keyboard_input.process(&event) {
                KeyboardAction::None => {}
                KeyboardAction::Quit => return Ok(()),
                KeyboardAction::Submit(input) => {
                    message = process_input(&mut state, &input).err();
                }
            },
            IncomingEvent::Tick => {
                state.tick(Instant::now());
            }
        }
        while let Some(event) = state.next_notable_event() {
            match event {
                GameNotableEvent::MoveSent(mv) => {
                    info!("Sent move {} -> {}", mv.start, mv.destination);
                }
                GameNotableEvent::PositionUpdated | GameNotableEvent::DrawOffered => {}
                GameNotableEvent::GameOver(outcome) => {
                    info!("Game over: {:?}", outcome);
                }
            }
        }
        render(&mut stdout, &state, keyboard_input.text(), &message, &disconnected)?;
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use shatranj_client::board::Move;
    use shatranj_client::config::ProtocolTimings;
    use shatranj_client::piece::{Piece, PieceKind};

    use super::*;

    fn new_state(position: Vec<Piece>) -> (GameClientState, mpsc::Receiver<GameClientEvent>) {
        let (tx, rx) = mpsc::channel();
        let page = GamePage {
            game_id: GameId::new("1"),
            my_name: "alice".to_owned(),
            my_force: Force::White,
            board_shape: Default::default(),
            position,
            turn: Force::White,
        };
        let state =
            GameClientState::new(page, &ProtocolTimings::default(), tx, Instant::now()).unwrap();
        (state, rx)
    }

    #[test]
    fn typed_commands() {
        let (mut state, rx) = new_state(Vec::new());
        assert_eq!(process_input(&mut state, "/draw"), Ok(()));
        assert_eq!(process_input(&mut state, "/resign"), Ok(()));
        assert!(process_input(&mut state, "/castle").is_err());
        assert_eq!(rx.try_iter().collect_vec(), vec![
            GameClientEvent::SuggestDraw,
            GameClientEvent::Resign
        ]);
    }

    #[test]
    fn typed_move() {
        let e2 = Position::new(1, 4);
        let (mut state, rx) =
            new_state(vec![Piece::new(PieceKind::WhiteSarbaz, Force::White, e2)]);
        assert_eq!(process_input(&mut state, "e2"), Ok(()));
        assert_eq!(state.selection().origin(), Some(e2));
        assert_eq!(process_input(&mut state, "e4"), Ok(()));
        assert_eq!(rx.try_iter().collect_vec(), vec![GameClientEvent::MakeMove {
            mv: Move { start: e2, destination: Position::new(3, 4) }
        }]);
        assert!(process_input(&mut state, "e4 e5").is_err());
    }

    #[test]
    fn opening_move_from_supplied_position() {
        let position = parse_position(
            r#"[
                {"type": "WS", "color": "WHITE", "position": {"row": 1, "col": 4}},
                {"type": "SH", "color": "BLACK", "position": {"row": 7, "col": 4}}
            ]"#,
        )
        .unwrap();
        let (mut state, rx) = new_state(position);
        assert_eq!(process_input(&mut state, "e2 e3"), Ok(()));
        assert_eq!(rx.try_iter().collect_vec(), vec![GameClientEvent::MakeMove {
            mv: Move { start: Position::new(1, 4), destination: Position::new(2, 4) }
        }]);
        assert!(parse_position(r#"{"type": "WS"}"#).is_err());
    }

    #[test]
    fn typed_move_on_empty_cell_rejected() {
        let (mut state, rx) = new_state(Vec::new());
        assert!(process_input(&mut state, "e2 e4").is_err());
        assert!(process_input(&mut state, "z9").is_err());
        assert!(process_input(&mut state, "9z").is_err());
        assert!(rx.try_iter().next().is_none());
    }
}
