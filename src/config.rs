use std::time::Duration;

use serde::{Deserialize, Serialize};


// Fixed timer periods used by the protocol clients. None of these are tuned adaptively.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolTimings {
    // Between opening the game socket and sending `init`. Gives the server time to finish
    // accepting the connection.
    #[serde(with = "humantime_serde")]
    pub init_delay: Duration,
    // Before the first `get_games` after the lobby opens.
    #[serde(with = "humantime_serde")]
    pub lobby_refresh_delay: Duration,
    #[serde(with = "humantime_serde")]
    pub lobby_refresh_interval: Duration,
    #[serde(with = "humantime_serde")]
    pub opponent_check_interval: Duration,
}

impl Default for ProtocolTimings {
    fn default() -> Self {
        ProtocolTimings {
            init_delay: Duration::from_millis(100),
            lobby_refresh_delay: Duration::from_millis(100),
            lobby_refresh_interval: Duration::from_secs(1),
            opponent_check_interval: Duration::from_secs(1),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override() {
        let timings: ProtocolTimings =
            serde_json::from_str(r#"{"lobby_refresh_interval": "5s"}"#).unwrap();
        assert_eq!(timings.lobby_refresh_interval, Duration::from_secs(5));
        assert_eq!(timings.init_delay, ProtocolTimings::default().init_delay);
    }
}
