// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod network;
pub mod tui;

mod client_config;
mod event_loop;
mod game_main;
mod lobby_main;

use std::path::PathBuf;

use clap::{Command, arg, value_parser};
use client_config::ClientConfig;
use shatranj_client::force::Force;


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let matches = Command::new("Shatranj")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Shatranj online console client")
        .subcommand_required(true)
        .arg(
            arg!(-c --config <config_file> "Path to the configuration file: yaml-serialized ClientConfig.")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new("lobby")
                .about("Browse, create and join games")
                .arg(arg!(<server_address> "Server address, host:port"))
                .arg(arg!(--name <player_name> "Name shown in the lobby header")),
        )
        .subcommand(
            Command::new("game")
                .about("Play a game")
                .arg(arg!(<server_address> "Server address, host:port"))
                .arg(arg!(<game_id> "Game ID"))
                .arg(arg!(<player_name> "Player name, as known to the server"))
                .arg(
                    arg!(--color <color> "Side you play for")
                        .value_parser(["white", "black"])
                        .default_value("white"),
                )
                .arg(
                    arg!(--position <position_file> "JSON file with the starting piece list")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => client_config::read_config_file(path)?,
        None => ClientConfig::default(),
    };

    match matches.subcommand() {
        Some(("lobby", sub_matches)) => {
            let args = lobby_main::LobbyArgs {
                server_address: required_arg(sub_matches, "server_address")?,
                player_name: sub_matches.get_one::<String>("name").cloned(),
            };
            match lobby_main::run(args, config)? {
                lobby_main::LobbyExit::Quit => {}
                lobby_main::LobbyExit::LoggedOut => println!("Logged out."),
                lobby_main::LobbyExit::Navigate(path) => {
                    println!("Game is ready at {}. Use the `game` subcommand to play.", path)
                }
            }
            Ok(())
        }
        Some(("game", sub_matches)) => {
            let force = match sub_matches.get_one::<String>("color").map(String::as_str) {
                Some("black") => Force::Black,
                _ => Force::White,
            };
            let position = match sub_matches.get_one::<PathBuf>("position") {
                Some(path) => game_main::read_position_file(path)?,
                None => Vec::new(),
            };
            let args = game_main::GameArgs {
                server_address: required_arg(sub_matches, "server_address")?,
                game_id: required_arg(sub_matches, "game_id")?,
                player_name: required_arg(sub_matches, "player_name")?,
                force,
                position,
            };
            game_main::run(args, config)
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}

fn required_arg(matches: &clap::ArgMatches, name: &str) -> anyhow::Result<String> {
    matches
        .get_one::<String>(name)
        .map(|s| s.trim().to_owned())
        .ok_or_else(|| anyhow::anyhow!("Missing argument: {}", name))
}
