#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
mod common;
mod config;
mod coordinate;
mod game;
#[cfg(feature = "std")]
mod logging;
mod player;
#[cfg(feature = "std")]
pub mod service;
mod ship;
#[cfg(feature = "std")]
pub mod store;
pub mod view;

pub use board::*;
pub use common::*;
pub use config::*;
pub use coordinate::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use player::*;
#[cfg(feature = "std")]
pub use service::GameService;
pub use ship::*;
#[cfg(feature = "std")]
pub use store::{GameStore, InMemoryGameStore};
pub use view::{project, GameView, PlayerView, ShipView};
