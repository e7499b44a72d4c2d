//! Rules engine trait and shared precondition checks.
//!
//! A rule set decides:
//! - Whether a requested move is legal
//! - The state after it (pieces, captures, kills, finished counts)
//! - Whether it wins the game
//!
//! It never writes the turn pointer, status, or winner; the turn controller
//! does that from the returned `AppliedMove`.

use serde::{Deserialize, Serialize};

use super::outcome::{MoveError, MoveOutcome};
use crate::board::BoardTopology;
use crate::core::config::{is_dice_face, PIECES_PER_PLAYER};
use crate::core::{GameState, PlayerId, SlotList, Status, TeamId};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Solo win.
    Winner(PlayerId),
    /// Team win, every member listed.
    Team { team: TeamId, players: Vec<PlayerId> },
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Team { players, .. } => players.contains(&player),
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `attempt_move` must be deterministic and must not modify `state`
/// - Precondition failures are `Err`, rule rejections are `Ok(Rejected)`
/// - `legal_moves` returns exactly the slots `attempt_move` would apply
pub trait RulesEngine {
    /// Board the rules run on.
    fn topology(&self) -> &BoardTopology;

    /// Validate and resolve one move.
    fn attempt_move(
        &self,
        state: &GameState,
        player: PlayerId,
        piece: usize,
        dice: u8,
    ) -> Result<MoveOutcome, MoveError>;

    /// Slots that can legally move with `dice`. Empty when the player cannot
    /// act at all.
    fn legal_moves(&self, state: &GameState, player: PlayerId, dice: u8) -> SlotList;

    /// Whether any piece can move with `dice`.
    fn has_legal_move(&self, state: &GameState, player: PlayerId, dice: u8) -> bool {
        !self.legal_moves(state, player, dice).is_empty()
    }
}

/// Check everything about a request except the rules themselves.
///
/// Order: status, seat, turn, piece index, dice face. `piece` is `None` for
/// a pass.
pub fn check_preconditions(
    state: &GameState,
    player: PlayerId,
    piece: Option<usize>,
    dice: u8,
) -> Result<(), MoveError> {
    if state.status() != Status::InProgress {
        return Err(MoveError::GameNotInProgress(state.status()));
    }
    if state.player(player).is_none() {
        return Err(MoveError::UnknownPlayer(player));
    }
    if state.current_player() != player {
        return Err(MoveError::NotPlayerTurn {
            player,
            current: state.current_player(),
        });
    }
    if let Some(slot) = piece {
        if slot >= PIECES_PER_PLAYER {
            return Err(MoveError::InvalidPieceIndex(slot));
        }
    }
    if !is_dice_face(dice) {
        return Err(MoveError::InvalidDiceValue(dice));
    }
    Ok(())
}
