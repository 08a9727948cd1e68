use std::io;
use std::sync::mpsc;

use crossterm::style::{self, Stylize};
use crossterm::{cursor, execute, terminal};
use instant::Instant;
use log::{info, warn};
use scopeguard::defer;
use shatranj_client::event::{GameId, GameSettings, LobbyClientEvent, LobbyServerEvent};
use shatranj_client::lobby_client::{LobbyClientState, LobbyNotableEvent, LobbyPage};
use shatranj_client::wire;

use crate::client_config::ClientConfig;
use crate::event_loop::{
    IncomingEvent, KeyboardAction, KeyboardInput, parse_command, spawn_terminal_input,
    spawn_ticker, writeln_raw,
};
use crate::{network, tui};


const HELP: &str = "/new [key=value...]  /cancel  /join <id>  /logout  /quit";

pub struct LobbyArgs {
    pub server_address: String,
    pub player_name: Option<String>,
}

// How the lobby session ended.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LobbyExit {
    Quit,
    Navigate(String),
    LoggedOut,
}

fn render(
    stdout: &mut io::Stdout, state: &LobbyClientState, keyboard_input: &str,
    message: &Option<String>, disconnected: &Option<String>,
) -> io::Result<()> {
    execute!(stdout, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::All))?;
    let name = state.page().my_name.as_deref().unwrap_or("anonymous");
    writeln_raw(stdout, format!("Lobby ({})\n", name))?;
    writeln_raw(stdout, format!("{}\n", tui::render_lobby_table(&state.table())))?;
    let panels = state.panels();
    if panels.waiting_for_opponent {
        let game_id = state.game_id().map_or(String::new(), GameId::to_string);
        writeln_raw(
            stdout,
            format!("Waiting for opponent in game {}... /cancel to stop", game_id)
                .with(style::Color::Yellow),
        )?;
    }
    if panels.auth_window {
        writeln_raw(
            stdout,
            "Not authorized. Log in on the website and pass the session cookie via config."
                .with(style::Color::Magenta),
        )?;
    }
    writeln_raw(stdout, HELP.with(style::Color::DarkGrey))?;
    writeln_raw(stdout, format!("{}▂", keyboard_input))?;
    if let Some(msg) = message {
        writeln_raw(stdout, msg.clone().with(style::Color::Red))?;
    }
    if let Some(reason) = disconnected {
        writeln_raw(stdout, format!("Disconnected: {}", reason).with(style::Color::Red))?;
    }
    Ok(())
}

// Each "key=value" word becomes one game setting.
fn parse_settings(words: &[&str]) -> Result<GameSettings, String> {
    words
        .iter()
        .map(|word| {
            word.split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .ok_or_else(|| format!("Expected key=value, got '{}'", word))
        })
        .collect()
}

fn process_input(state: &mut LobbyClientState, input: &str) -> Result<Option<LobbyExit>, String> {
    let Some((cmd, args)) = parse_command(input) else {
        return Err(format!("Commands start with '/'. {}", HELP));
    };
    match (cmd, args.as_slice()) {
        ("new", settings) => {
            let settings = parse_settings(settings)?;
            state.open_settings();
            state.create_game(settings);
        }
        ("cancel", []) => state.cancel_created_game(),
        ("join", [game_id]) => state.join(GameId::new(*game_id)),
        ("logout", []) => state.log_out(),
        ("quit", []) => {
            state.close();
            return Ok(Some(LobbyExit::Quit));
        }
        _ => return Err(format!("Unknown command: '{}'. {}", input.trim(), HELP)),
    }
    Ok(None)
}

pub fn run(args: LobbyArgs, config: ClientConfig) -> anyhow::Result<LobbyExit> {
    let (socket_in, socket_out) =
        network::connect(&args.server_address, wire::LOBBY_SOCKET_PATH, config.cookie.as_deref())?;

    let (tx, rx) = mpsc::channel::<IncomingEvent<LobbyServerEvent>>();
    network::spawn_reader(socket_in, tx.clone());
    spawn_terminal_input(tx.clone());
    spawn_ticker(tx, config.tick_interval);
    let (server_tx, server_rx) = mpsc::channel::<LobbyClientEvent>();
    let writer = network::spawn_writer(socket_out, server_rx);

    let page = LobbyPage {
        authorized: config.cookie.is_some(),
        my_name: args.player_name,
    };
    let mut state = LobbyClientState::new(page, &config.timings, server_tx, Instant::now());

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
            IncomingEvent::Network(event) => state.process_server_event(event, Instant::now()),
            IncomingEvent::Disconnected(reason) => {
                state.close();
                disconnected = Some(reason);
            }
            IncomingEvent::Terminal(event) => match keyboard_input.process(&event) {
                KeyboardAction::None => {}
                KeyboardAction::Quit => {
                    state.close();
                    return Ok(LobbyExit::Quit);
                }
                KeyboardAction::Submit(input) => match process_input(&mut state, &input) {
                    Ok(Some(exit)) => return Ok(exit),
                    Ok(None) => message = None,
                    Err(err) => message = Some(err),
                },
            },
            IncomingEvent::Tick => state.tick(Instant::now()),
        }
        while let Some(event) = state.next_notable_event() {
            match event {
                LobbyNotableEvent::Navigate(path) => {
                    info!("Leaving lobby for {}", path);
                    return Ok(LobbyExit::Navigate(path));
                }
                LobbyNotableEvent::ReloadPage => {
                    // Dropping the state closes the outgoing channel, so the writer exits
                    // right after sending `log_out`.
                    drop(state);
                    if writer.join().is_err() {
                        warn!("Writer thread panicked before `log_out` was sent");
                    }
                    return Ok(LobbyExit::LoggedOut);
                }
                LobbyNotableEvent::GameCreated(game_id) => {
                    info!("Created game {}", game_id);
                }
                LobbyNotableEvent::TableUpdated | LobbyNotableEvent::AuthRequired => {}
            }
        }
        render(&mut stdout, &state, keyboard_input.text(), &message, &disconnected)?;
    }
    Ok(LobbyExit::Quit)
}
