// Improvement potential: Report unknown `command` values with their name instead of collapsing
//   them into `Unknown` (requires a two-step parse through `serde_json::Value`).

use serde::{Serialize, de};


pub const GAME_SOCKET_PREFIX: &str = "/ws/game/";
pub const LOBBY_SOCKET_PATH: &str = "/ws/game_pool/";

pub fn game_socket_path(game_id: &str) -> String { format!("{}{}/", GAME_SOCKET_PREFIX, game_id) }

pub fn encode_obj(obj: &impl Serialize) -> Result<String, serde_json::Error> {
    serde_json::to_string(obj)
}

pub fn parse_obj<T: de::DeserializeOwned>(s: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(s)
}
