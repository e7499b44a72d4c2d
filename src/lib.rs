//! # ashta-engine
//!
//! Move validation and turn engine for Ashta Chamma, the square race game
//! played on a spiral board with cowrie-shell throws.
//!
//! ## Design Principles
//!
//! 1. **Pure validation**: `RulesEngine::attempt_move` is a function of the
//!    state and the request. It returns a new state or a typed rejection and
//!    never touches its input.
//!
//! 2. **Single writer**: `TurnController` is the only code that moves the
//!    turn pointer, completes a game, or names a winner.
//!
//! 3. **Configuration over convention**: board radius, safe squares, player
//!    count, and team mode come from `GameConfig`.
//!
//! ## Modules
//!
//! - `core`: Players, pieces, state, requests, dice, configuration
//! - `board`: Grid topology, rings, per-color spiral paths, safe squares
//! - `rules`: `RulesEngine` trait and the standard `AshtaRules`
//! - `turn`: `TurnController` sequencing moves and passes
//! - `history`: Move log and deterministic replay
//! - `room`: Locked per-room controllers and the room registry
//! - `sim`: Seeded random self-play

pub mod board;
pub mod core;
pub mod history;
pub mod room;
pub mod rules;
pub mod sim;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    BoardConfig, Capture, Color, ConfigError, DiceRng, DiceRngState, GameConfig, GameState,
    MoveRecord, MoveRequest, PieceSlot, Player, PlayerId, SeatError, SlotList, SnapshotError,
    Status, TeamId, PIECES_PER_PLAYER,
};

pub use crate::board::{BoardTopology, Ring, Square};

pub use crate::rules::{
    check_preconditions, AppliedMove, AshtaRules, GameResult, MoveError, MoveOutcome, RejectReason,
    RulesEngine,
};

pub use crate::turn::{TurnController, TurnOutcome};

pub use crate::history::{replay, MoveLog, ReplayError};

pub use crate::room::{Room, RoomCode, RoomError, RoomRegistry, RoomUpdate};
pub use crate::sim::{play_game, play_games, GameSummary, SimConfig, SimError};
