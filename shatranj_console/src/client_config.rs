use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shatranj_client::config::ProtocolTimings;


#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub timings: ProtocolTimings,
    // How often timers are polled and the screen is redrawn.
    #[serde(with = "humantime_serde")]
    pub tick_interval: Duration,
    // Raw `Cookie` header sent with the WebSocket handshake, e.g. "sessionid=abc123".
    pub cookie: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timings: ProtocolTimings::default(),
            tick_interval: Duration::from_millis(50),
            cookie: None,
        }
    }
}

pub fn read_config_file(path: &Path) -> anyhow::Result<ClientConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'.", path.display()))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file '{}'.", path.display()))
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn yaml_overrides() {
        let config: ClientConfig = serde_yaml::from_str(
            "timings:\n  init_delay: 250ms\ntick_interval: 20ms\ncookie: sessionid=abc\n",
        )
        .unwrap();
        assert_eq!(config.timings.init_delay, Duration::from_millis(250));
        assert_eq!(config.timings.lobby_refresh_interval, Duration::from_secs(1));
        assert_eq!(config.tick_interval, Duration::from_millis(20));
        assert_eq!(config.cookie.as_deref(), Some("sessionid=abc"));
    }
}
