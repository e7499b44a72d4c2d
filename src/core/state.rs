//! Game state: seats, pieces, turn pointer, and status.
//!
//! ## Lifecycle
//!
//! ```text
//! Waiting --(all seats filled, try_start)--> InProgress --(win)--> Completed
//! ```
//!
//! Seats are filled with `seat` while `Waiting`. The turn controller is the
//! only writer of `current_player`, `status`, and `winner` once play starts.
//!
//! ## Snapshots
//!
//! `GameState` is a plain `serde` value. `to_bytes`/`from_bytes` use
//! `bincode` for the persistence boundary; `from_bytes` re-checks invariants
//! so a corrupt record never reaches the engine.

use serde::{Deserialize, Serialize};

use super::config::{GameConfig, PIECES_PER_PLAYER};
use super::player::{Color, PieceSlot, Player, PlayerId, TeamId};

/// Game status. Never moves backwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Waiting,
    InProgress,
    Completed,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Status::Waiting => "waiting",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Errors from seating players or starting a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatError {
    #[error("game already started")]
    AlreadyStarted,

    #[error("game is full ({0} seats)")]
    Full(usize),

    #[error("color {0} is already taken")]
    ColorTaken(Color),

    #[error("no seat at {0}")]
    NoSuchSeat(PlayerId),

    #[error("waiting for players: {seated} of {needed} seated")]
    NotEnoughPlayers { seated: usize, needed: usize },
}

/// Errors from encoding or decoding a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) players: Vec<Player>,
    pub(crate) current_player: PlayerId,
    pub(crate) status: Status,
    pub(crate) winner: Option<PlayerId>,
    /// Committed moves and passes so far.
    pub(crate) turn_number: u32,
}

impl GameState {
    /// Create an empty table. The config is assumed valid; see
    /// `GameConfig::validate`.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid config {config:?}");
        Self {
            players: Vec::with_capacity(config.player_count),
            config,
            current_player: PlayerId::new(0),
            status: Status::Waiting,
            winner: None,
            turn_number: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seats at the table once full.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    #[must_use]
    pub fn is_team_mode(&self) -> bool {
        self.config.team_mode
    }

    /// Players seated so far, in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get a seated player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Seated players on a team.
    pub fn team_members(&self, team: TeamId) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.team == Some(team))
    }

    /// Combined finished pieces of a team.
    #[must_use]
    pub fn team_finished(&self, team: TeamId) -> u32 {
        self.team_members(team).map(Player::finished).sum()
    }

    // === Seating ===

    /// Seat a player at the next free position.
    pub fn seat(&mut self, name: impl Into<String>, color: Color) -> Result<PlayerId, SeatError> {
        if self.status != Status::Waiting {
            return Err(SeatError::AlreadyStarted);
        }
        if self.players.len() >= self.player_count() {
            return Err(SeatError::Full(self.player_count()));
        }
        if self.players.iter().any(|p| p.color == color) {
            return Err(SeatError::ColorTaken(color));
        }

        let position = PlayerId::new(self.players.len() as u8);
        let team = self.config.team_mode.then(|| TeamId::for_seat(position));
        self.players.push(Player::new(name, color, position, team));
        log::debug!("seated {} as {} ({})", position, color, self.players.len());
        Ok(position)
    }

    /// Remove a seat before the game starts. Later seats move up one place.
    pub fn unseat(&mut self, position: PlayerId) -> Result<Player, SeatError> {
        if self.status != Status::Waiting {
            return Err(SeatError::AlreadyStarted);
        }
        if position.index() >= self.players.len() {
            return Err(SeatError::NoSuchSeat(position));
        }

        let removed = self.players.remove(position.index());
        let team_mode = self.config.team_mode;
        for (i, player) in self.players.iter_mut().enumerate() {
            player.position = PlayerId::new(i as u8);
            player.team = team_mode.then(|| TeamId::for_seat(player.position));
        }
        Ok(removed)
    }

    /// Whether every seat is filled.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.players.len() == self.player_count()
    }

    /// Start play if every seat is filled.
    pub fn try_start(&mut self) -> Result<(), SeatError> {
        if self.status != Status::Waiting {
            return Err(SeatError::AlreadyStarted);
        }
        if !self.is_full() {
            return Err(SeatError::NotEnoughPlayers {
                seated: self.players.len(),
                needed: self.player_count(),
            });
        }
        self.status = Status::InProgress;
        self.current_player = PlayerId::new(0);
        log::info!("game started with {} players", self.players.len());
        Ok(())
    }

    // === Position setup ===

    /// Put a piece directly in a slot, bypassing the rules.
    ///
    /// For loading prepared positions (puzzles, tests, imported games). Keeps
    /// `finished` in step with the Home slots.
    ///
    /// # Panics
    ///
    /// Panics if the player is not seated, `slot` is out of range, or the
    /// piece is `OnPath` at or past the Home index.
    pub fn arrange(&mut self, player: PlayerId, slot: usize, piece: PieceSlot) {
        assert!(slot < PIECES_PER_PLAYER, "slot {slot} out of range");
        assert!(self.on_board(piece), "{piece:?} is off the path");
        let p = &mut self.players[player.index()];
        p.pieces[slot] = piece;
        p.finished = p.home_count();
    }

    /// Set a player's kill count directly. See `arrange`.
    ///
    /// # Panics
    ///
    /// Panics if the player is not seated.
    pub fn arrange_kills(&mut self, player: PlayerId, kills: u32) {
        self.players[player.index()].kills = kills;
    }

    /// Hand the turn to a player directly. See `arrange`.
    ///
    /// # Panics
    ///
    /// Panics if the player is not seated.
    pub fn arrange_turn(&mut self, player: PlayerId) {
        assert!(player.index() < self.players.len(), "{player} is not seated");
        self.current_player = player;
    }

    // === Crate-internal mutation (rules engine and turn controller) ===

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Whether a slot names a real place. Home is the `Home` variant, never
    /// `OnPath(home_index)`.
    fn on_board(&self, piece: PieceSlot) -> bool {
        match piece {
            PieceSlot::OnPath(index) => index < self.config.board.home_index(),
            PieceSlot::OffBoard | PieceSlot::Home => true,
        }
    }

    pub(crate) fn debug_check(&self) {
        debug_assert!(self.players.len() <= self.player_count());
        for (i, player) in self.players.iter().enumerate() {
            debug_assert_eq!(player.position.index(), i);
            player.debug_check();
        }
    }

    // === Snapshots ===

    /// Encode for storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a stored snapshot, checking structural invariants.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let state: Self = bincode::deserialize(bytes)?;
        state.check()?;
        Ok(state)
    }

    fn check(&self) -> Result<(), SnapshotError> {
        let corrupt = |msg: String| Err(SnapshotError::Corrupt(msg));

        if self.config.validate().is_err() {
            return corrupt("invalid config".into());
        }
        if self.players.len() > self.player_count() {
            let seated = self.players.len();
            return corrupt(format!("{seated} players at a {}-seat table", self.player_count()));
        }
        if self.status != Status::Waiting && !self.is_full() {
            return corrupt(format!("status {} with empty seats", self.status));
        }
        if self.status != Status::Waiting && self.current_player.index() >= self.players.len() {
            return corrupt(format!("turn pointer at {}", self.current_player));
        }
        if (self.status == Status::Completed) != self.winner.is_some() {
            return corrupt(format!("status {} with winner {:?}", self.status, self.winner));
        }
        for (i, player) in self.players.iter().enumerate() {
            if player.position.index() != i {
                return corrupt(format!("seat {i} holds {}", player.position));
            }
            if player.finished != player.home_count() {
                return corrupt(format!("{} finished counter mismatch", player.position));
            }
            let team = self.config.team_mode.then(|| TeamId::for_seat(player.position));
            if player.team != team {
                let found = player.team;
                return corrupt(format!("{} on team {found:?}, expected {team:?}", player.position));
            }
            if let Some(piece) = player.pieces.iter().find(|p| !self.on_board(**p)) {
                return corrupt(format!("{} has a piece at {piece:?}", player.position));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_table(config: GameConfig) -> GameState {
        let mut state = GameState::new(config);
        for (i, color) in Color::ALL.iter().take(state.player_count()).enumerate() {
            state.seat(format!("p{i}"), *color).unwrap();
        }
        state
    }

    #[test]
    fn test_new_state_waits() {
        let state = GameState::new(GameConfig::new(4));
        assert_eq!(state.status(), Status::Waiting);
        assert!(state.players().is_empty());
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_seating_assigns_positions() {
        let mut state = GameState::new(GameConfig::new(2));
        assert_eq!(state.seat("ana", Color::Red), Ok(PlayerId::new(0)));
        assert_eq!(state.seat("ben", Color::Green), Ok(PlayerId::new(1)));
        assert_eq!(state.seat("cat", Color::Blue), Err(SeatError::Full(2)));

        let ben = state.player(PlayerId::new(1)).unwrap();
        assert_eq!(ben.name(), "ben");
        assert_eq!(ben.color(), Color::Green);
        assert_eq!(ben.team(), None);
    }

    #[test]
    fn test_color_taken() {
        let mut state = GameState::new(GameConfig::new(4));
        state.seat("ana", Color::Red).unwrap();
        assert_eq!(state.seat("ben", Color::Red), Err(SeatError::ColorTaken(Color::Red)));
    }

    #[test]
    fn test_team_assignment() {
        let state = full_table(GameConfig::new(4).with_team_mode());
        let teams: Vec<_> = state.players().iter().map(|p| p.team()).collect();
        assert_eq!(
            teams,
            vec![Some(TeamId(1)), Some(TeamId(1)), Some(TeamId(2)), Some(TeamId(2))]
        );
    }

    #[test]
    fn test_unseat_shifts_positions() {
        let mut state = GameState::new(GameConfig::new(4).with_team_mode());
        state.seat("a", Color::Red).unwrap();
        state.seat("b", Color::Blue).unwrap();
        state.seat("c", Color::Green).unwrap();

        let removed = state.unseat(PlayerId::new(0)).unwrap();
        assert_eq!(removed.name(), "a");

        let c = state.player(PlayerId::new(1)).unwrap();
        assert_eq!(c.name(), "c");
        assert_eq!(c.position(), PlayerId::new(1));
        assert_eq!(c.team(), Some(TeamId(1)));

        assert_eq!(
            state.unseat(PlayerId::new(5)).unwrap_err(),
            SeatError::NoSuchSeat(PlayerId::new(5))
        );
    }

    #[test]
    fn test_try_start() {
        let mut state = GameState::new(GameConfig::new(2));
        state.seat("a", Color::Red).unwrap();
        assert_eq!(
            state.try_start(),
            Err(SeatError::NotEnoughPlayers { seated: 1, needed: 2 })
        );

        state.seat("b", Color::Yellow).unwrap();
        assert_eq!(state.try_start(), Ok(()));
        assert_eq!(state.status(), Status::InProgress);
        assert_eq!(state.try_start(), Err(SeatError::AlreadyStarted));
        assert_eq!(state.seat("c", Color::Blue), Err(SeatError::AlreadyStarted));
        assert!(state.unseat(PlayerId::new(0)).is_err());
    }

    #[test]
    fn test_arrange_keeps_finished_in_step() {
        let mut state = full_table(GameConfig::new(2));
        let p0 = PlayerId::new(0);

        state.arrange(p0, 0, PieceSlot::Home);
        state.arrange(p0, 1, PieceSlot::Home);
        assert_eq!(state.player(p0).unwrap().finished(), 2);

        state.arrange(p0, 1, PieceSlot::OnPath(10));
        assert_eq!(state.player(p0).unwrap().finished(), 1);

        state.arrange_kills(p0, 3);
        assert_eq!(state.player(p0).unwrap().kills(), 3);
    }

    #[test]
    fn test_team_finished() {
        let mut state = full_table(GameConfig::new(4).with_team_mode());
        state.arrange(PlayerId::new(0), 0, PieceSlot::Home);
        state.arrange(PlayerId::new(1), 0, PieceSlot::Home);
        state.arrange(PlayerId::new(1), 1, PieceSlot::Home);
        state.arrange(PlayerId::new(2), 0, PieceSlot::Home);

        assert_eq!(state.team_finished(TeamId(1)), 3);
        assert_eq!(state.team_finished(TeamId(2)), 1);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut state = full_table(GameConfig::new(4));
        state.try_start().unwrap();
        state.arrange(PlayerId::new(2), 3, PieceSlot::OnPath(27));

        let bytes = state.to_bytes().unwrap();
        let restored = GameState::from_bytes(&bytes).unwrap();
        assert_eq!(state, restored);
    }

    #[test]
    fn test_snapshot_rejects_corrupt_state() {
        let mut state = full_table(GameConfig::new(2));
        state.try_start().unwrap();
        state.players[0].finished = 4;

        let bytes = state.to_bytes().unwrap();
        assert!(matches!(
            GameState::from_bytes(&bytes),
            Err(SnapshotError::Corrupt(_))
        ));

        assert!(matches!(
            GameState::from_bytes(&[1, 2, 3]),
            Err(SnapshotError::Codec(_))
        ));
    }

    #[test]
    fn test_snapshot_rejects_piece_off_path() {
        let mut state = full_table(GameConfig::new(2));
        state.try_start().unwrap();
        let home = state.config().board.home_index();

        for index in [home, 200] {
            let mut bad = state.clone();
            bad.players[1].pieces[0] = PieceSlot::OnPath(index);
            let bytes = bad.to_bytes().unwrap();
            assert!(matches!(
                GameState::from_bytes(&bytes),
                Err(SnapshotError::Corrupt(_))
            ));
        }

        let mut last = state.clone();
        last.players[1].pieces[0] = PieceSlot::OnPath(home - 1);
        assert!(GameState::from_bytes(&last.to_bytes().unwrap()).is_ok());
    }

    #[test]
    fn test_snapshot_rejects_wrong_teams() {
        let mut state = full_table(GameConfig::new(4).with_team_mode());
        state.try_start().unwrap();

        let mut missing = state.clone();
        missing.players[2].team = None;
        assert!(matches!(
            GameState::from_bytes(&missing.to_bytes().unwrap()),
            Err(SnapshotError::Corrupt(_))
        ));

        let mut swapped = state.clone();
        swapped.players[0].team = Some(TeamId(2));
        assert!(matches!(
            GameState::from_bytes(&swapped.to_bytes().unwrap()),
            Err(SnapshotError::Corrupt(_))
        ));

        let mut solo = full_table(GameConfig::new(2));
        solo.players[0].team = Some(TeamId(1));
        assert!(GameState::from_bytes(&solo.to_bytes().unwrap()).is_err());
    }

    #[test]
    #[should_panic(expected = "off the path")]
    fn test_arrange_rejects_home_index() {
        let mut state = full_table(GameConfig::new(2));
        let home = state.config().board.home_index();
        state.arrange(PlayerId::new(0), 0, PieceSlot::OnPath(home));
    }

    #[test]
    fn test_json_view() {
        let state = full_table(GameConfig::new(2));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "Waiting");
        assert_eq!(json["players"][1]["color"], "Blue");
    }
}
