// Wire events. Every message in either direction is a JSON object with a `command`
// discriminator; there are no sequence numbers and no correlation ids.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::board::Move;
use crate::piece::Piece;


// Opaque game identifier. The server sends integer ids, but the clients only ever echo
// them back, so they are kept as strings.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self { GameId(id.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl Serialize for GameId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for GameId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawGameId {
            Number(u64),
            Text(String),
        }
        Ok(match RawGameId::deserialize(deserializer)? {
            RawGameId::Number(id) => GameId(id.to_string()),
            RawGameId::Text(id) => GameId(id),
        })
    }
}

// Settings collected by the "new game" form. Passed to the server as is.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameSettings(BTreeMap<String, String>);

impl GameSettings {
    pub fn new() -> Self { GameSettings(BTreeMap::new()) }
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
    pub fn get(&self, key: &str) -> Option<&str> { self.0.get(key).map(String::as_str) }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GameSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        GameSettings(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LobbyEntry {
    pub id: GameId,
    #[serde(default)]
    pub white: Option<String>,
    #[serde(default)]
    pub black: Option<String>,
}


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum GameClientEvent {
    Init,
    MakeMove {
        #[serde(rename = "move")]
        mv: Move,
    },
    Resign,
    SuggestDraw,
    AcceptDraw,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum GameServerEvent {
    // New authoritative position after a move by either player.
    Position {
        position: Vec<Piece>,
        #[serde(rename = "move", default)]
        last_move: Option<String>,
    },
    // Game finished. No winner means a draw.
    Over {
        #[serde(default)]
        winner: Option<String>,
    },
    // Reply to `init`: the whole move history as a `|`-separated string.
    Init {
        #[serde(default)]
        moves: Option<String>,
    },
    SuggestDraw {
        to: String,
    },
    // Sent for moves out of turn and moves the engine refuses. Carries no reference to the
    // offending move.
    Error {
        #[serde(default)]
        text: String,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum LobbyClientEvent {
    GetGames,
    Create { settings: GameSettings },
    Join { game_id: GameId },
    CancelCreatedGame { game_id: GameId },
    CheckOpponent { game_id: GameId },
    LogOut,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum LobbyServerEvent {
    ActiveGamesUpdate {
        #[serde(default)]
        active_games: Option<Vec<LobbyEntry>>,
    },
    GameCreated {
        game_id: GameId,
    },
    // `game` is a page path relative to the site root, e.g. "game/7".
    StartGame {
        game: String,
    },
    NotAuthorized,
    GameCancelled,
    #[serde(other)]
    Unknown,
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EventError {
    CannotApplyEvent(String),
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::CannotApplyEvent(message) => write!(f, "cannot apply event: {}", message),
        }
    }
}

impl std::error::Error for EventError {}
