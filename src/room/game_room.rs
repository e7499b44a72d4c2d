//! A single room: one game behind a mutex.
//!
//! Calls are serialized per room, and results are owned copies made under
//! the lock. Nothing borrowed from the controller outlives a call.

use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::core::{
    Color, ConfigError, DiceRng, GameConfig, GameState, MoveRequest, PlayerId, SeatError, SlotList,
};
use crate::history::MoveLog;
use crate::rules::MoveError;
use crate::turn::{TurnController, TurnOutcome};

/// Characters of a generated join code.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated join code.
pub const CODE_LENGTH: usize = 6;

/// Identifier of a room, e.g. a join code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomCode(String);

impl RoomCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// A random join code of `CODE_LENGTH` upper-case letters and digits.
    #[must_use]
    pub fn random(rng: &mut DiceRng) -> Self {
        let code = (0..CODE_LENGTH)
            .filter_map(|_| rng.choose(CODE_ALPHABET))
            .map(|&b| char::from(b))
            .collect();
        Self(code)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors from room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    #[error("room {0} not found")]
    NotFound(RoomCode),

    #[error("room {0} already exists")]
    AlreadyExists(RoomCode),

    #[error("room {0} is unusable after a panic")]
    Poisoned(RoomCode),

    #[error("room registry is unusable after a panic")]
    RegistryPoisoned,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Seat(#[from] SeatError),

    #[error(transparent)]
    Move(#[from] MoveError),
}

/// Result of a submitted request, taken after the room lock is released.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomUpdate {
    pub outcome: TurnOutcome,
    /// Committed state to hand to observers. `None` for a rejection.
    pub snapshot: Option<GameState>,
}

/// One game room: a turn controller behind a lock.
///
/// Every call takes the lock for the duration of a single synchronous
/// engine call and returns owned copies, so callers broadcast without
/// holding it.
#[derive(Debug)]
pub struct Room {
    code: RoomCode,
    controller: Mutex<TurnController>,
}

impl Room {
    /// Open a room with an empty table.
    pub fn new(code: RoomCode, config: GameConfig) -> Result<Self, RoomError> {
        Ok(Self::from_controller(code, TurnController::new(config)?))
    }

    /// Open a room around an existing controller, e.g. a restored game.
    #[must_use]
    pub fn from_controller(code: RoomCode, controller: TurnController) -> Self {
        Self {
            code,
            controller: Mutex::new(controller),
        }
    }

    #[must_use]
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    /// Take a seat. The game starts as soon as the last seat fills.
    pub fn join(
        &self,
        name: impl Into<String>,
        color: Color,
    ) -> Result<(PlayerId, GameState), RoomError> {
        let mut ctl = self.lock()?;
        let position = ctl.seat(name, color)?;
        if ctl.state().is_full() {
            ctl.try_start()?;
            log::info!("room {} started", self.code);
        }
        Ok((position, ctl.state().clone()))
    }

    /// Leave before the game starts.
    pub fn leave(&self, position: PlayerId) -> Result<GameState, RoomError> {
        let mut ctl = self.lock()?;
        ctl.unseat(position)?;
        Ok(ctl.state().clone())
    }

    /// Run a move or pass.
    pub fn submit(&self, request: MoveRequest) -> Result<RoomUpdate, RoomError> {
        let update = {
            let mut ctl = self.lock()?;
            let outcome = ctl.submit(request)?;
            let snapshot = outcome.record().map(|_| ctl.state().clone());
            RoomUpdate { outcome, snapshot }
        };
        if let TurnOutcome::Committed(record) = &update.outcome {
            log::debug!("room {} committed record {}", self.code, record.sequence);
        }
        Ok(update)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Result<GameState, RoomError> {
        Ok(self.lock()?.state().clone())
    }

    /// Copy of the move log.
    pub fn history(&self) -> Result<MoveLog, RoomError> {
        Ok(self.lock()?.log().clone())
    }

    pub fn legal_moves(&self, player: PlayerId, dice: u8) -> Result<SlotList, RoomError> {
        Ok(self.lock()?.legal_moves(player, dice))
    }

    fn lock(&self) -> Result<MutexGuard<'_, TurnController>, RoomError> {
        self.controller
            .lock()
            .map_err(|_| RoomError::Poisoned(self.code.clone()))
    }
}
