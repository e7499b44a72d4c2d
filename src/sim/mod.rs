//! Seeded random self-play.
//!
//! Plays whole games through the turn controller: throw, pick a random legal
//! piece, pass when nothing can move. Used by the `ashta-sim` binary and as a
//! soak test of the engine.

use serde::{Deserialize, Serialize};

use crate::core::{Color, ConfigError, DiceRng, GameConfig, PlayerId, SeatError, Status};
use crate::rules::{GameResult, MoveError, MoveOutcome};
use crate::turn::TurnController;

/// Errors that stop a simulated game.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Seat(#[from] SeatError),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("{player} was offered slot {slot} for a {dice} but the move was rejected")]
    IllegalChoice { player: PlayerId, slot: usize, dice: u8 },
}

/// Configuration for self-play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Table setup for every game.
    pub game: GameConfig,

    /// Committed records after which a game is abandoned.
    pub max_moves: u32,

    /// Seed for the dice. Each game gets its own fork.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::new(4),
            max_moves: 5_000,
            seed: 0,
        }
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table setup.
    #[must_use]
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Set the move cap per game.
    #[must_use]
    pub fn with_max_moves(mut self, max: u32) -> Self {
        self.max_moves = max;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// What happened in one simulated game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Index of the game in its batch.
    pub game: usize,

    /// `None` when the move cap was hit first.
    pub result: Option<GameResult>,

    /// Committed records, passes included.
    pub moves: u32,

    pub passes: u32,

    pub captures: u32,
}

impl GameSummary {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }
}

/// Play one game to completion or to the move cap.
pub fn play_game(
    config: &SimConfig,
    rng: &mut DiceRng,
    game: usize,
) -> Result<GameSummary, SimError> {
    let mut ctl = TurnController::new(config.game.clone())?;
    for (i, color) in Color::ALL.iter().take(config.game.player_count).enumerate() {
        ctl.seat(format!("bot{i}"), *color)?;
    }
    ctl.try_start()?;

    let mut result = None;
    while ctl.state().status() == Status::InProgress
        && ctl.log().next_sequence() < config.max_moves
    {
        let player = ctl.state().current_player();
        let dice = rng.roll();
        let legal = ctl.legal_moves(player, dice);

        let Some(&slot) = rng.choose(&legal) else {
            ctl.pass(player, dice)?;
            continue;
        };

        match ctl.attempt_move(player, slot, dice)? {
            MoveOutcome::Applied(applied) => {
                if applied.victory.is_some() {
                    result = applied.victory;
                }
            }
            MoveOutcome::Rejected(_) => return Err(SimError::IllegalChoice { player, slot, dice }),
        }
    }

    let history = ctl.log();
    let summary = GameSummary {
        game,
        result,
        moves: history.len() as u32,
        passes: history.iter().filter(|r| r.is_pass()).count() as u32,
        captures: history.captures().count() as u32,
    };
    match &summary.result {
        Some(result) => log::info!("game {game}: {result:?} after {} moves", summary.moves),
        None => log::info!("game {game}: abandoned after {} moves", summary.moves),
    }
    Ok(summary)
}

/// Play `count` games, each with its own dice stream forked from the seed.
pub fn play_games(config: &SimConfig, count: usize) -> Result<Vec<GameSummary>, SimError> {
    let mut root = DiceRng::new(config.seed);
    (0..count)
        .map(|game| {
            let mut rng = root.fork();
            play_game(config, &mut rng, game)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PIECES_PER_PLAYER;

    #[test]
    fn test_config_builder() {
        let config = SimConfig::new()
            .with_game(GameConfig::new(2))
            .with_max_moves(100)
            .with_seed(9);
        assert_eq!(config.game.player_count, 2);
        assert_eq!(config.max_moves, 100);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn test_move_cap() {
        let config = SimConfig::new().with_game(GameConfig::new(2)).with_max_moves(30);
        let summary = play_game(&config, &mut DiceRng::new(1), 0).unwrap();
        assert!(summary.moves <= 30);
        if !summary.is_finished() {
            assert_eq!(summary.moves, 30);
        }
    }

    #[test]
    fn test_games_are_deterministic() {
        let config = SimConfig::new()
            .with_game(GameConfig::new(4))
            .with_max_moves(400)
            .with_seed(42);
        let a = play_games(&config, 3).unwrap();
        let b = play_games(&config, 3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_finished_game_has_winner() {
        let config = SimConfig::new().with_game(GameConfig::new(2)).with_seed(7);
        for summary in play_games(&config, 4).unwrap() {
            if let Some(GameResult::Winner(_)) = summary.result {
                // Every piece needs an entry and a step home, and the Blood
                // Gate needs a capture first.
                assert!(summary.moves as usize >= 2 * PIECES_PER_PLAYER);
                assert!(summary.captures >= 1);
            }
        }
    }

    #[test]
    fn test_invalid_config() {
        let config = SimConfig::new().with_game(GameConfig::new(3));
        assert!(matches!(
            play_game(&config, &mut DiceRng::new(0), 0),
            Err(SimError::Config(ConfigError::PlayerCount(3)))
        ));
    }
}
