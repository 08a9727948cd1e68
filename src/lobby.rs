// Render model for the lobby: the table of open games and the visibility of the lobby panels.

use crate::event::{GameId, LobbyEntry};
use crate::force::Force;


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LobbyTableRow {
    pub game_id: GameId,
    // Seat the local user would take by joining. `None` if the game lists both players or
    // neither: the row is still joinable and the server picks the seat.
    pub join_as: Option<Force>,
    pub white: Option<String>,
    pub black: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LobbyPanels {
    pub new_game_button: bool,
    pub settings_form: bool,
    pub waiting_for_opponent: bool,
    pub auth_window: bool,
}

impl Default for LobbyPanels {
    fn default() -> Self {
        LobbyPanels {
            new_game_button: true,
            settings_form: false,
            waiting_for_opponent: false,
            auth_window: false,
        }
    }
}

pub fn lobby_table(entries: &[LobbyEntry]) -> Vec<LobbyTableRow> {
    entries
        .iter()
        .map(|entry| {
            let join_as = match (&entry.white, &entry.black) {
                (Some(_), None) => Some(Force::Black),
                (None, Some(_)) => Some(Force::White),
                _ => None,
            };
            LobbyTableRow {
                game_id: entry.id.clone(),
                join_as,
                white: entry.white.clone(),
                black: entry.black.clone(),
            }
        })
        .collect()
}

impl LobbyTableRow {
    // The name shown in the "Player" column.
    pub fn player_name(&self) -> Option<&str> { self.white.as_deref().or(self.black.as_deref()) }

    // Every listed game gets a join control; the seat is only a hint.
    pub fn join_label(&self) -> String {
        match self.join_as {
            Some(force) => format!("Join as {}", force),
            None => "Join".to_owned(),
        }
    }

    pub fn color_class(&self) -> Option<&'static str> {
        self.join_as.map(|force| match force {
            Force::Black => "play_for_black",
            Force::White => "play_for_white",
        })
    }
}
