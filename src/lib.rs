#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod board_view;
pub mod config;
pub mod coord;
pub mod display;
pub mod event;
pub mod force;
pub mod game_client;
pub mod lobby;
pub mod lobby_client;
pub mod piece;
pub mod polling;
pub mod selection;
pub mod wire;
