//! What a move attempt can produce.
//!
//! Two failure classes are kept apart:
//!
//! - `MoveError`: the caller asked for something that is not a move at all
//!   (wrong turn, bad slot, bad face, game not running). Returned as `Err`.
//! - `RejectReason`: a well-formed move the rules forbid. Returned inside
//!   `Ok(MoveOutcome::Rejected(..))`.
//!
//! Neither touches the state.

use serde::{Deserialize, Serialize};

use super::engine::GameResult;
use crate::board::Square;
use crate::core::{Capture, GameState, PieceSlot, PlayerId, Status};

/// Caller/precondition errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is not in progress (status: {0})")]
    GameNotInProgress(Status),

    #[error("{0} is not seated")]
    UnknownPlayer(PlayerId),

    #[error("not {player}'s turn (current: {current})")]
    NotPlayerTurn { player: PlayerId, current: PlayerId },

    #[error("piece index {0} is out of range")]
    InvalidPieceIndex(usize),

    #[error("{0} is not a dice face")]
    InvalidDiceValue(u8),

    #[error("{player} has a legal move for a {dice}; the throw cannot be passed")]
    MoveAvailable { player: PlayerId, dice: u8 },
}

/// Rule rejections for well-formed requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// Only 1, 5, or 6 bring a piece onto the board.
    EnterNeedsOneFiveSix,
    /// The step would carry the piece past Home.
    Overshoot,
    /// Crossing out of the outer ring needs at least one capture.
    BloodGateBlocked,
    /// The face is larger than the whole remaining stretch from the start of
    /// the piece's ring to Home, so it can never finish from this ring.
    ExactLandingRequired,
    /// The piece already finished.
    PieceAlreadyHome,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            RejectReason::EnterNeedsOneFiveSix => "need 1, 5, or 6 to enter",
            RejectReason::Overshoot => "move wasted, need the exact number to reach home",
            RejectReason::BloodGateBlocked => {
                "blood gate: a kill is needed to enter the inner rings"
            }
            RejectReason::ExactLandingRequired => {
                "this face can never land exactly home from this ring"
            }
            RejectReason::PieceAlreadyHome => "piece is already home",
        };
        f.write_str(msg)
    }
}

/// A move the rules accepted, with the state after it.
///
/// `state` carries the new pieces, kills, and finished counts. Turn pointer,
/// status, and winner are left for the turn controller to write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedMove {
    pub state: GameState,
    pub player: PlayerId,
    pub piece: usize,
    pub from: PieceSlot,
    pub to: PieceSlot,
    /// Square left, `None` when entering.
    pub from_square: Option<Square>,
    /// Square reached (the center for Home).
    pub to_square: Square,
    pub capture: Option<Capture>,
    /// Bonus face thrown or capture made.
    pub bonus: bool,
    /// Set when this move wins the game.
    pub victory: Option<GameResult>,
}

/// Result of a well-formed move attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Rejected(RejectReason),
    Applied(Box<AppliedMove>),
}

impl MoveOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied(_))
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            MoveOutcome::Rejected(reason) => Some(*reason),
            MoveOutcome::Applied(_) => None,
        }
    }

    /// The applied move, if any.
    #[must_use]
    pub fn applied(&self) -> Option<&AppliedMove> {
        match self {
            MoveOutcome::Applied(applied) => Some(applied),
            MoveOutcome::Rejected(_) => None,
        }
    }
}
