//! Seats, colors, teams, and per-player piece records.
//!
//! ## PlayerId
//!
//! Turn-order position of a seat, 0-based and unique within a game.
//!
//! ## Player
//!
//! Six piece slots plus the kill and finish counters. Everything here is a
//! read; pieces only change through the rules engine (or `GameState::arrange`
//! when loading a prepared position).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::PIECES_PER_PLAYER;
use crate::board::{BoardTopology, Ring};

/// Turn-order position of a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw position (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one, wrapping around the table.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all player IDs for a table of `player_count` seats.
    ///
    /// ```
    /// use ashta_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Piece color. Each color owns one entry square and one path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    /// All colors in path-rotation order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    /// Quarter turns between Red's path and this color's path.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
            Color::Green => 2,
            Color::Yellow => 3,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        };
        f.write_str(name)
    }
}

/// Team identifier (1 or 2) in team mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl TeamId {
    /// Team for a seat: seats 0 and 1 are team 1, seats 2 and 3 team 2.
    #[must_use]
    pub const fn for_seat(position: PlayerId) -> Self {
        Self(position.0 / 2 + 1)
    }
}

/// Where a single piece is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceSlot {
    /// Not yet entered, or captured.
    #[default]
    OffBoard,
    /// On the owner's path at a linear index short of Home.
    OnPath(u8),
    /// Finished.
    Home,
}

impl PieceSlot {
    /// Path index if the piece is on the board.
    #[must_use]
    pub const fn path_index(self) -> Option<u8> {
        match self {
            PieceSlot::OnPath(index) => Some(index),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_home(self) -> bool {
        matches!(self, PieceSlot::Home)
    }
}

impl std::fmt::Display for PieceSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceSlot::OffBoard => f.write_str("off"),
            PieceSlot::OnPath(index) => write!(f, "{index}"),
            PieceSlot::Home => f.write_str("home"),
        }
    }
}

/// Slot indices, inline for a full set of pieces.
pub type SlotList = SmallVec<[usize; PIECES_PER_PLAYER]>;

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) name: String,
    pub(crate) color: Color,
    pub(crate) position: PlayerId,
    pub(crate) pieces: [PieceSlot; PIECES_PER_PLAYER],
    pub(crate) kills: u32,
    pub(crate) finished: u32,
    pub(crate) team: Option<TeamId>,
}

impl Player {
    /// Create a player with every piece off the board.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        color: Color,
        position: PlayerId,
        team: Option<TeamId>,
    ) -> Self {
        Self {
            name: name.into(),
            color,
            position,
            pieces: [PieceSlot::OffBoard; PIECES_PER_PLAYER],
            kills: 0,
            finished: 0,
            team,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn position(&self) -> PlayerId {
        self.position
    }

    #[must_use]
    pub fn pieces(&self) -> &[PieceSlot; PIECES_PER_PLAYER] {
        &self.pieces
    }

    /// Get one slot.
    #[must_use]
    pub fn piece(&self, slot: usize) -> Option<PieceSlot> {
        self.pieces.get(slot).copied()
    }

    /// Opponent pieces this player has sent back off the board.
    #[must_use]
    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// Pieces that reached Home.
    #[must_use]
    pub fn finished(&self) -> u32 {
        self.finished
    }

    #[must_use]
    pub fn team(&self) -> Option<TeamId> {
        self.team
    }

    /// Whether `other` plays against this player.
    #[must_use]
    pub fn is_opponent(&self, other: &Player) -> bool {
        if self.position == other.position {
            return false;
        }
        match (self.team, other.team) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        }
    }

    /// Slots whose piece has not entered (or was captured).
    #[must_use]
    pub fn slots_off_board(&self) -> SlotList {
        self.slots_where(|p| p == PieceSlot::OffBoard)
    }

    /// Slots whose piece is on the path.
    #[must_use]
    pub fn slots_on_path(&self) -> SlotList {
        self.slots_where(|p| matches!(p, PieceSlot::OnPath(_)))
    }

    /// First slot that can enter a new piece.
    #[must_use]
    pub fn first_off_board_slot(&self) -> Option<usize> {
        self.pieces.iter().position(|&p| p == PieceSlot::OffBoard)
    }

    /// Number of on-path pieces whose ring is one of `rings`.
    #[must_use]
    pub fn count_in_rings(&self, topology: &BoardTopology, rings: &[Ring]) -> usize {
        self.pieces
            .iter()
            .filter_map(|p| p.path_index())
            .filter(|&index| rings.contains(&topology.ring_at(index)))
            .count()
    }

    /// Number of pieces inside the blood gate.
    #[must_use]
    pub fn count_gated(&self, topology: &BoardTopology) -> usize {
        self.count_in_rings(topology, &Ring::GATED)
    }

    /// Number of slots holding a Home piece.
    #[must_use]
    pub fn home_count(&self) -> u32 {
        self.pieces.iter().filter(|p| p.is_home()).count() as u32
    }

    fn slots_where(&self, pred: impl Fn(PieceSlot) -> bool) -> SlotList {
        self.pieces
            .iter()
            .enumerate()
            .filter(|&(_, &p)| pred(p))
            .map(|(i, _)| i)
            .collect()
    }

    pub(crate) fn debug_check(&self) {
        debug_assert_eq!(
            self.finished,
            self.home_count(),
            "{} finished counter out of sync with Home slots",
            self.position
        );
    }
}
