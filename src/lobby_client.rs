use std::collections::VecDeque;
use std::sync::mpsc;

use instant::Instant;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::config::ProtocolTimings;
use crate::event::{GameId, GameSettings, LobbyClientEvent, LobbyEntry, LobbyServerEvent};
use crate::lobby::{LobbyPanels, LobbyTableRow, lobby_table};
use crate::polling::RepeatingTimer;


pub const REGISTER_PAGE_PATH: &str = "/register/";

// `game` may already carry its leading slash.
fn game_page_path(game: &str) -> String { format!("/{}", game.trim_start_matches('/')) }

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LobbyPage {
    #[serde(rename = "username", default)]
    pub my_name: Option<String>,
    #[serde(default)]
    pub authorized: bool,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LobbyNotableEvent {
    // Same-tab navigation to a site-relative path.
    Navigate(String),
    ReloadPage,
    TableUpdated,
    GameCreated(GameId),
    AuthRequired,
}

// Session context for one lobby visit. Owns both lobby timers; once the visit ends (game
// start, logout, `close`) they never fire again.
pub struct LobbyClientState {
    page: LobbyPage,
    events_tx: mpsc::Sender<LobbyClientEvent>,
    active_games: Vec<LobbyEntry>,
    // Game this client created and is now waiting for an opponent in.
    game_id: Option<GameId>,
    panels: LobbyPanels,
    refresh_timer: RepeatingTimer,
    opponent_timer: RepeatingTimer,
    closed: bool,
    notable_events: VecDeque<LobbyNotableEvent>,
}

impl LobbyClientState {
    pub fn new(
        page: LobbyPage, timings: &ProtocolTimings, events_tx: mpsc::Sender<LobbyClientEvent>,
        now: Instant,
    ) -> Self {
        let mut refresh_timer =
            RepeatingTimer::new(timings.lobby_refresh_delay, timings.lobby_refresh_interval);
        refresh_timer.start(now);
        LobbyClientState {
            page,
            events_tx,
            active_games: Vec::new(),
            game_id: None,
            panels: LobbyPanels::default(),
            refresh_timer,
            opponent_timer: RepeatingTimer::new(
                timings.opponent_check_interval,
                timings.opponent_check_interval,
            ),
            closed: false,
            notable_events: VecDeque::new(),
        }
    }

    pub fn page(&self) -> &LobbyPage { &self.page }
    pub fn active_games(&self) -> &[LobbyEntry] { &self.active_games }
    pub fn table(&self) -> Vec<LobbyTableRow> { lobby_table(&self.active_games) }
    pub fn game_id(&self) -> Option<&GameId> { self.game_id.as_ref() }
    pub fn panels(&self) -> LobbyPanels { self.panels }
    pub fn is_closed(&self) -> bool { self.closed }
    pub fn is_refreshing(&self) -> bool { self.refresh_timer.is_running() }
    pub fn is_waiting_for_opponent(&self) -> bool { self.opponent_timer.is_running() }

    pub fn tick(&mut self, now: Instant) {
        if self.refresh_timer.poll(now) {
            self.send(LobbyClientEvent::GetGames);
        }
        if self.opponent_timer.poll(now) {
            match self.game_id.clone() {
                Some(game_id) => self.send(LobbyClientEvent::CheckOpponent { game_id }),
                None => {
                    warn!("Opponent check without a created game");
                    self.opponent_timer.stop();
                }
            }
        }
    }

    pub fn open_settings(&mut self) {
        self.panels.settings_form = true;
        self.panels.new_game_button = false;
    }

    pub fn close_settings(&mut self) {
        self.panels.settings_form = false;
        self.panels.new_game_button = true;
    }

    pub fn create_game(&mut self, settings: GameSettings) {
        self.close_settings();
        self.send(LobbyClientEvent::Create { settings });
    }

    pub fn join(&mut self, game_id: GameId) { self.send(LobbyClientEvent::Join { game_id }); }

    // Optimistic: the waiting state is dropped without waiting for the server to confirm.
    pub fn cancel_created_game(&mut self) {
        match self.game_id.take() {
            Some(game_id) => self.send(LobbyClientEvent::CancelCreatedGame { game_id }),
            None => warn!("Nothing to cancel: no game created"),
        }
        self.opponent_timer.stop();
        self.panels.waiting_for_opponent = false;
        self.panels.new_game_button = true;
    }

    // Logout is assumed to succeed; the page reloads right away.
    pub fn log_out(&mut self) {
        self.send(LobbyClientEvent::LogOut);
        self.close();
        self.notable_events.push_back(LobbyNotableEvent::ReloadPage);
    }

    pub fn show_auth_window(&mut self) { self.panels.auth_window = true; }
    pub fn hide_auth_window(&mut self) { self.panels.auth_window = false; }

    pub fn register(&mut self) {
        self.close();
        self.notable_events.push_back(LobbyNotableEvent::Navigate(REGISTER_PAGE_PATH.to_owned()));
    }

    // The lobby view goes away. Stops all polling.
    pub fn close(&mut self) {
        self.refresh_timer.stop();
        self.opponent_timer.stop();
        self.closed = true;
    }

    pub fn process_server_event(&mut self, event: LobbyServerEvent, now: Instant) {
        debug!("Lobby: got {:?}", event);
        if self.closed {
            debug!("Lobby: closed, ignoring event");
            return;
        }
        match event {
            LobbyServerEvent::ActiveGamesUpdate { active_games } => {
                self.active_games = active_games.unwrap_or_default();
                self.notable_events.push_back(LobbyNotableEvent::TableUpdated);
            }
            LobbyServerEvent::GameCreated { game_id } => {
                info!("Created game {}, waiting for opponent", game_id);
                self.game_id = Some(game_id.clone());
                self.opponent_timer.start(now);
                self.panels.waiting_for_opponent = true;
                self.notable_events.push_back(LobbyNotableEvent::GameCreated(game_id));
            }
            LobbyServerEvent::StartGame { game } => {
                info!("Starting game at {}", game);
                self.game_id = None;
                self.panels.waiting_for_opponent = false;
                self.close();
                self.notable_events
                    .push_back(LobbyNotableEvent::Navigate(game_page_path(&game)));
            }
            LobbyServerEvent::NotAuthorized => {
                self.panels.auth_window = true;
                self.notable_events.push_back(LobbyNotableEvent::AuthRequired);
            }
            LobbyServerEvent::GameCancelled => {
                debug!("Lobby: server confirmed cancellation");
            }
            LobbyServerEvent::Unknown => {
                warn!("Lobby: ignoring unknown command");
            }
        }
    }

    pub fn next_notable_event(&mut self) -> Option<LobbyNotableEvent> {
        self.notable_events.pop_front()
    }

    fn send(&self, event: LobbyClientEvent) {
        if self.events_tx.send(event).is_err() {
            warn!("Lobby: connection closed, dropping outgoing event");
        }
    }
}
