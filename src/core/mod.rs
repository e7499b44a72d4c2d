//! Core types: players, pieces, state, requests, dice, configuration.
//!
//! Everything here is data. Rule logic lives in `rules`; turn bookkeeping in
//! `turn`.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Capture, MoveRecord, MoveRequest};
pub use config::{BoardConfig, ConfigError, GameConfig, PIECES_PER_PLAYER};
pub use player::{Color, PieceSlot, Player, PlayerId, SlotList, TeamId};
pub use rng::{DiceRng, DiceRngState};
pub use state::{GameState, SeatError, SnapshotError, Status};
