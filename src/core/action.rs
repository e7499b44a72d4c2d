//! Move requests and the records kept for executed moves.
//!
//! A request is what the outside world sends: who is acting, which piece
//! (or none, to forfeit the throw), and the face thrown. A record is what the
//! turn controller appends after committing a request.

use serde::{Deserialize, Serialize};

use super::player::{PieceSlot, PlayerId};
use crate::board::Square;

/// One request from the request boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Acting seat.
    pub player: PlayerId,

    /// Piece slot to move, or `None` to pass a throw that has no legal move.
    pub piece: Option<usize>,

    /// Face thrown.
    pub dice: u8,
}

impl MoveRequest {
    /// Request to move a piece.
    #[must_use]
    pub const fn piece(player: PlayerId, piece: usize, dice: u8) -> Self {
        Self {
            player,
            piece: Some(piece),
            dice,
        }
    }

    /// Request to pass a throw.
    #[must_use]
    pub const fn pass(player: PlayerId, dice: u8) -> Self {
        Self {
            player,
            piece: None,
            dice,
        }
    }
}

/// An opposing piece sent back off the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capture {
    /// Owner of the captured piece.
    pub victim: PlayerId,

    /// Slot of the captured piece.
    pub slot: usize,

    /// Where it happened.
    pub square: Square,
}

/// A committed move (or pass), in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Position in the log, starting at 0.
    pub sequence: u32,

    /// Acting seat.
    pub player: PlayerId,

    /// Face thrown.
    pub dice: u8,

    /// Moved slot, `None` for a pass.
    pub piece: Option<usize>,

    /// Slot state before the move.
    pub from: PieceSlot,

    /// Slot state after the move.
    pub to: PieceSlot,

    /// Capture caused by the move.
    pub capture: Option<Capture>,

    /// Whether the mover keeps the turn.
    pub bonus: bool,
}

impl MoveRecord {
    /// The request that reproduces this record.
    #[must_use]
    pub fn request(&self) -> MoveRequest {
        MoveRequest {
            player: self.player,
            piece: self.piece,
            dice: self.dice,
        }
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.piece.is_none()
    }
}
