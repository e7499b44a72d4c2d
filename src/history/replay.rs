//! Rebuilding a game from its starting table and move log.
//!
//! Each record is resubmitted through a fresh turn controller and must
//! commit to the same record again.

use crate::core::{ConfigError, GameState, SeatError, Status};
use crate::rules::{MoveError, RejectReason};
use crate::turn::{TurnController, TurnOutcome};

use super::log::MoveLog;

/// Errors from replaying a log.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("invalid starting config: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot start replay: {0}")]
    Seat(#[from] SeatError),

    #[error("record {sequence} failed: {source}")]
    Move {
        sequence: u32,
        #[source]
        source: MoveError,
    },

    #[error("record {sequence} was rejected on replay: {reason}")]
    Rejected { sequence: u32, reason: RejectReason },

    #[error("record {sequence} produced a different result on replay")]
    Diverged { sequence: u32 },
}

/// Re-run `log` from `start` and return the controller it ends in.
///
/// `start` is the seated table the log began from. A table still `Waiting`
/// is started first.
pub fn replay(start: GameState, log: &MoveLog) -> Result<TurnController, ReplayError> {
    let mut ctl = TurnController::from_state(start)?;
    if ctl.state().status() == Status::Waiting {
        ctl.try_start()?;
    }

    for expected in log {
        let sequence = expected.sequence;
        let outcome = ctl
            .submit(expected.request())
            .map_err(|source| ReplayError::Move { sequence, source })?;
        match outcome {
            TurnOutcome::Rejected(reason) => return Err(ReplayError::Rejected { sequence, reason }),
            TurnOutcome::Committed(record) if record != *expected => {
                return Err(ReplayError::Diverged { sequence });
            }
            TurnOutcome::Committed(_) => {}
        }
    }

    log::debug!("replayed {} records", log.len());
    Ok(ctl)
}
