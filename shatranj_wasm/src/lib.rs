// Browser host for the game and lobby pages. The page script owns the WebSocket and a timer:
// it feeds incoming frames to `process_server_event`, drains `next_outgoing_event` into the
// socket, and calls `refresh` + `update_state` on every timer tick.
//
// TODO: Reconnect when the socket closes. Currently the page has to be reloaded.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod web_board;
pub mod web_document;
pub mod web_element_ext;
pub mod web_error_handling;
pub mod web_lobby;

use std::sync::mpsc;

use instant::Instant;
use serde::Serialize;
use shatranj_client::config::ProtocolTimings;
use shatranj_client::coord::Position;
use shatranj_client::event::{GameClientEvent, GameId, GameSettings, LobbyClientEvent};
use shatranj_client::game_client::{GameClientState, GameNotableEvent, GameOutcome, GamePage};
use shatranj_client::lobby_client::{LobbyClientState, LobbyNotableEvent, LobbyPage};
use shatranj_client::wire;
use wasm_bindgen::prelude::*;
use web_document::web_document;
use web_error_handling::JsResult;


#[wasm_bindgen]
pub struct JsEventNoop {} // in contrast to `null`, indicates that event list is not over

#[wasm_bindgen]
pub struct JsEventMoveSent {}

#[wasm_bindgen]
pub struct JsEventDrawOffered {}

#[wasm_bindgen(getter_with_clone)]
pub struct JsEventGameOver {
    // Empty for a draw.
    pub winner: String,
}

#[wasm_bindgen(getter_with_clone)]
pub struct JsEventNavigate {
    pub path: String,
}

#[wasm_bindgen]
pub struct JsEventReloadPage {}

fn parse_page<T: serde::de::DeserializeOwned>(page_json: &str) -> JsResult<T> {
    serde_json::from_str(page_json).map_err(|err| rust_error!("Bad page data: {}", err))
}

fn parse_timings(timings_json: Option<String>) -> JsResult<ProtocolTimings> {
    match timings_json {
        None => Ok(ProtocolTimings::default()),
        Some(json) => {
            serde_json::from_str(&json).map_err(|err| rust_error!("Bad timings: {}", err))
        }
    }
}

fn parse_settings(settings_json: &str) -> JsResult<GameSettings> {
    serde_json::from_str(settings_json).map_err(|err| rust_error!("Bad game settings: {}", err))
}

fn drain_one<T: Serialize>(rx: &mpsc::Receiver<T>) -> JsResult<Option<String>> {
    match rx.try_recv() {
        Ok(event) => wire::encode_obj(&event)
            .map(Some)
            .map_err(|err| rust_error!("Cannot encode event: {}", err)),
        Err(mpsc::TryRecvError::Empty) => Ok(None),
        Err(mpsc::TryRecvError::Disconnected) => Err(rust_error!("Event channel disconnected")),
    }
}


#[wasm_bindgen]
pub struct WebGameClient {
    state: GameClientState,
    server_rx: mpsc::Receiver<GameClientEvent>,
}

#[wasm_bindgen]
impl WebGameClient {
    // `page_json` is the game descriptor rendered into the page by the server.
    pub fn new_client(page_json: &str, timings_json: Option<String>) -> JsResult<WebGameClient> {
        let page: GamePage = parse_page(page_json)?;
        let timings = parse_timings(timings_json)?;
        let (server_tx, server_rx) = mpsc::channel();
        let state = GameClientState::new(page, &timings, server_tx, Instant::now())
            .map_err(|err| rust_error!("Bad initial position: {}", err))?;
        Ok(WebGameClient { state, server_rx })
    }

    pub fn socket_path(&self) -> String {
        wire::game_socket_path(self.state.page().game_id.as_str())
    }

    pub fn click_cell(&mut self, row: u8, col: u8) {
        // Non-clickable cells are ignored by the state machine itself.
        let _ = self.state.click_cell(Position::new(row, col));
    }

    pub fn resign(&mut self) { self.state.resign(); }
    pub fn suggest_draw(&mut self) { self.state.suggest_draw(); }
    pub fn accept_draw(&mut self) { self.state.accept_draw(); }
    pub fn decline_draw(&mut self) { self.state.decline_draw(); }

    pub fn process_server_event(&mut self, event: &str) -> JsResult<()> {
        let server_event = wire::parse_obj(event)
            .map_err(|err| rust_error!("Cannot parse server event: {}", err))?;
        self.state.process_server_event(server_event).map_err(|err| rust_error!("{}", err))
    }

    pub fn next_notable_event(&mut self) -> JsValue {
        match self.state.next_notable_event() {
            Some(GameNotableEvent::MoveSent(_)) => JsEventMoveSent {}.into(),
            Some(GameNotableEvent::PositionUpdated) => JsEventNoop {}.into(),
            Some(GameNotableEvent::DrawOffered) => JsEventDrawOffered {}.into(),
            Some(GameNotableEvent::GameOver(outcome)) => {
                let winner = match outcome {
                    GameOutcome::Victory { winner } => winner,
                    GameOutcome::Draw => String::new(),
                };
                JsEventGameOver { winner }.into()
            }
            None => JsValue::NULL,
        }
    }

    pub fn next_outgoing_event(&mut self) -> JsResult<Option<String>> {
        drain_one(&self.server_rx)
    }

    pub fn refresh(&mut self) { self.state.tick(Instant::now()); }

    pub fn update_state(&self) -> JsResult<()> {
        web_board::render_game_page(&web_document()?, &self.state)
    }
}


#[wasm_bindgen]
pub struct WebLobbyClient {
    state: LobbyClientState,
    server_rx: mpsc::Receiver<LobbyClientEvent>,
}

#[wasm_bindgen]
impl WebLobbyClient {
    pub fn new_client(page_json: &str, timings_json: Option<String>) -> JsResult<WebLobbyClient> {
        let page: LobbyPage = parse_page(page_json)?;
        let timings = parse_timings(timings_json)?;
        let (server_tx, server_rx) = mpsc::channel();
        let state = LobbyClientState::new(page, &timings, server_tx, Instant::now());
        Ok(WebLobbyClient { state, server_rx })
    }

    pub fn socket_path() -> String { wire::LOBBY_SOCKET_PATH.to_owned() }

    pub fn open_settings(&mut self) { self.state.open_settings(); }
    pub fn close_settings(&mut self) { self.state.close_settings(); }

    // `settings_json` is a flat object of form field names to values.
    pub fn create_game(&mut self, settings_json: &str) -> JsResult<()> {
        let settings = parse_settings(settings_json)?;
        self.state.create_game(settings);
        Ok(())
    }

    pub fn join(&mut self, game_id: &str) { self.state.join(GameId::new(game_id)); }
    pub fn cancel_created_game(&mut self) { self.state.cancel_created_game(); }
    pub fn log_out(&mut self) { self.state.log_out(); }
    pub fn show_auth_window(&mut self) { self.state.show_auth_window(); }
    pub fn hide_auth_window(&mut self) { self.state.hide_auth_window(); }
    pub fn register(&mut self) { self.state.register(); }

    // Call when the lobby view is torn down without navigating away.
    pub fn close(&mut self) { self.state.close(); }

    pub fn process_server_event(&mut self, event: &str) -> JsResult<()> {
        let server_event = wire::parse_obj(event)
            .map_err(|err| rust_error!("Cannot parse server event: {}", err))?;
        self.state.process_server_event(server_event, Instant::now());
        Ok(())
    }

    pub fn next_notable_event(&mut self) -> JsValue {
        match self.state.next_notable_event() {
            Some(LobbyNotableEvent::Navigate(path)) => JsEventNavigate { path }.into(),
            Some(LobbyNotableEvent::ReloadPage) => JsEventReloadPage {}.into(),
            Some(
                LobbyNotableEvent::TableUpdated
                | LobbyNotableEvent::GameCreated(_)
                | LobbyNotableEvent::AuthRequired,
            ) => JsEventNoop {}.into(),
            None => JsValue::NULL,
        }
    }

    pub fn next_outgoing_event(&mut self) -> JsResult<Option<String>> {
        drain_one(&self.server_rx)
    }

    pub fn refresh(&mut self) { self.state.tick(Instant::now()); }

    pub fn update_state(&self) -> JsResult<()> {
        web_lobby::render_lobby_page(&web_document()?, &self.state)
    }
}
