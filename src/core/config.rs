//! Game configuration types.
//!
//! Tables are configured at creation time by providing:
//! - `BoardConfig`: board radius and the safe-square set
//! - `GameConfig`: seat count, team mode, and the board
//!
//! Both are plain `serde` types so a host can keep them next to its room
//! records or load them from JSON.

use serde::{Deserialize, Serialize};

/// Faces of the cowrie/dice throw.
pub const DICE_FACES: [u8; 7] = [1, 2, 3, 4, 5, 6, 12];

/// Faces that may bring a new piece onto the board.
pub const ENTRY_FACES: [u8; 3] = [1, 5, 6];

/// Faces that grant another throw.
pub const BONUS_FACES: [u8; 4] = [1, 5, 6, 12];

/// Maximum step for a player's only piece inside the gated rings.
pub const LONE_WOLF_CAP: u8 = 5;

/// Piece slots per player.
pub const PIECES_PER_PLAYER: usize = 6;

/// Combined finished pieces a team needs to win.
pub const TEAM_FINISH_TARGET: u32 = 12;

/// Largest board whose path indices fit in a `u8`.
pub const MAX_RADIUS: u8 = 7;

/// Errors raised while validating or loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("player count must be 2 or 4, got {0}")]
    PlayerCount(usize),

    #[error("team mode needs 4 players, got {0}")]
    TeamModePlayerCount(usize),

    #[error("board radius must be at least 2, got {0}")]
    RadiusTooSmall(u8),

    #[error("board radius must be at most {MAX_RADIUS}, got {0}")]
    RadiusTooLarge(u8),

    #[error("safe square ({x}, {y}) is off a board of radius {radius}")]
    SafeSquareOffBoard { x: u8, y: u8, radius: u8 },

    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Whether a face is one the throw can produce.
#[must_use]
pub fn is_dice_face(value: u8) -> bool {
    DICE_FACES.contains(&value)
}

/// Whether a face may enter a new piece.
#[must_use]
pub fn is_entry_face(value: u8) -> bool {
    ENTRY_FACES.contains(&value)
}

/// Whether a face grants a bonus throw by itself.
#[must_use]
pub fn is_bonus_face(value: u8) -> bool {
    BONUS_FACES.contains(&value)
}

/// Board layout parameters.
///
/// The board is a `(2 * radius + 1)` square grid. Safe squares are given as
/// `(x, y)` grid coordinates; the center is always safe whether listed or not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Chebyshev distance from the center to the outer ring.
    pub radius: u8,

    /// Squares where no capture happens.
    pub safe_squares: Vec<(u8, u8)>,
}

impl Default for BoardConfig {
    /// The 7x7 board: entry squares, inner-ring corners, and the squares
    /// orthogonally next to the center.
    fn default() -> Self {
        Self {
            radius: 3,
            safe_squares: vec![
                (3, 6),
                (0, 3),
                (3, 0),
                (6, 3),
                (1, 1),
                (5, 1),
                (1, 5),
                (5, 5),
                (3, 2),
                (2, 3),
                (4, 3),
                (3, 4),
                (3, 3),
            ],
        }
    }
}

impl BoardConfig {
    /// Create a board of the given radius with only the center safe.
    #[must_use]
    pub fn new(radius: u8) -> Self {
        Self {
            radius,
            safe_squares: vec![(radius, radius)],
        }
    }

    /// Add a safe square.
    #[must_use]
    pub fn with_safe_square(mut self, x: u8, y: u8) -> Self {
        if !self.safe_squares.contains(&(x, y)) {
            self.safe_squares.push((x, y));
        }
        self
    }

    /// Replace the whole safe-square set.
    #[must_use]
    pub fn with_safe_squares(mut self, squares: impl IntoIterator<Item = (u8, u8)>) -> Self {
        self.safe_squares = squares.into_iter().collect();
        self
    }

    /// Grid side length.
    #[must_use]
    pub fn side(&self) -> u8 {
        self.radius * 2 + 1
    }

    /// Path index of Home. Every square is on the path, so this is
    /// `side * side - 1`, or `4R(R + 1)`. Saturates for radii past
    /// `MAX_RADIUS`.
    #[must_use]
    pub fn home_index(&self) -> u8 {
        let r = u16::from(self.radius);
        u8::try_from(4 * r * (r + 1)).unwrap_or(u8::MAX)
    }

    /// Check that the layout is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius < 2 {
            return Err(ConfigError::RadiusTooSmall(self.radius));
        }
        if self.radius > MAX_RADIUS {
            return Err(ConfigError::RadiusTooLarge(self.radius));
        }
        let side = self.side();
        if let Some(&(x, y)) = self.safe_squares.iter().find(|(x, y)| *x >= side || *y >= side) {
            return Err(ConfigError::SafeSquareOffBoard {
                x,
                y,
                radius: self.radius,
            });
        }
        Ok(())
    }
}

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2 or 4).
    pub player_count: usize,

    /// Seats 0/1 and 2/3 play as teams 1 and 2.
    #[serde(default)]
    pub team_mode: bool,

    /// Board layout.
    #[serde(default)]
    pub board: BoardConfig,
}

impl GameConfig {
    /// Create a solo configuration on the default board.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            team_mode: false,
            board: BoardConfig::default(),
        }
    }

    /// Enable team mode.
    #[must_use]
    pub fn with_team_mode(mut self) -> Self {
        self.team_mode = true;
        self
    }

    /// Use a custom board.
    #[must_use]
    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    /// Parse and validate a configuration from JSON.
    ///
    /// ```
    /// use ashta_engine::core::GameConfig;
    ///
    /// let config = GameConfig::from_json(r#"{ "player_count": 4, "team_mode": true }"#).unwrap();
    /// assert!(config.team_mode);
    /// assert_eq!(config.board.radius, 3);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check seat count, team mode, and board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count != 2 && self.player_count != 4 {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.team_mode && self.player_count != 4 {
            return Err(ConfigError::TeamModePlayerCount(self.player_count));
        }
        self.board.validate()
    }
}
