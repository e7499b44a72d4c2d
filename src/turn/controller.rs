//! Turn controller: the only writer of turn pointer, status, and winner.
//!
//! ## Commit
//!
//! An `Applied` outcome from the rules engine is committed in one step:
//!
//! 1. `turn_number` increments
//! 2. On victory the game is `Completed` and the mover is the winner
//! 3. Otherwise the turn passes to the next seat unless the move earned a
//!    bonus
//! 4. A `MoveRecord` is appended to the log
//!
//! A rejection or a caller error leaves both state and log untouched.

use serde::{Deserialize, Serialize};

use crate::core::{
    Color, ConfigError, GameConfig, GameState, MoveRecord, MoveRequest, PieceSlot, Player,
    PlayerId, SeatError, SlotList, Status,
};
use crate::history::MoveLog;
use crate::rules::{
    check_preconditions, AppliedMove, AshtaRules, MoveError, MoveOutcome, RejectReason, RulesEngine,
};

/// What a submitted request did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The move or pass was committed and logged.
    Committed(MoveRecord),
    /// The rules refused the move; nothing changed.
    Rejected(RejectReason),
}

impl TurnOutcome {
    #[must_use]
    pub fn record(&self) -> Option<&MoveRecord> {
        match self {
            TurnOutcome::Committed(record) => Some(record),
            TurnOutcome::Rejected(_) => None,
        }
    }

    #[must_use]
    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            TurnOutcome::Committed(_) => None,
            TurnOutcome::Rejected(reason) => Some(*reason),
        }
    }
}

/// Owns one game's state and log and sequences moves against it.
#[derive(Clone, Debug)]
pub struct TurnController<R: RulesEngine = AshtaRules> {
    rules: R,
    state: GameState,
    log: MoveLog,
}

impl TurnController<AshtaRules> {
    /// Empty table for a validated config.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rules = AshtaRules::from_board(&config.board)?;
        Ok(Self::with_rules(rules, GameState::new(config)))
    }

    /// Take over an existing state, e.g. a loaded snapshot or a prepared
    /// position. The log starts empty.
    pub fn from_state(state: GameState) -> Result<Self, ConfigError> {
        state.config().validate()?;
        let rules = AshtaRules::from_board(&state.config().board)?;
        Ok(Self::with_rules(rules, state))
    }
}

impl<R: RulesEngine> TurnController<R> {
    /// Controller over a custom rule set.
    #[must_use]
    pub fn with_rules(rules: R, state: GameState) -> Self {
        Self {
            rules,
            state,
            log: MoveLog::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Split into committed state and log.
    #[must_use]
    pub fn into_parts(self) -> (GameState, MoveLog) {
        (self.state, self.log)
    }

    // === Seating ===

    pub fn seat(&mut self, name: impl Into<String>, color: Color) -> Result<PlayerId, SeatError> {
        self.state.seat(name, color)
    }

    pub fn unseat(&mut self, position: PlayerId) -> Result<Player, SeatError> {
        self.state.unseat(position)
    }

    pub fn try_start(&mut self) -> Result<(), SeatError> {
        self.state.try_start()
    }

    // === Play ===

    /// Slots that can move with `dice` for `player`.
    #[must_use]
    pub fn legal_moves(&self, player: PlayerId, dice: u8) -> SlotList {
        self.rules.legal_moves(&self.state, player, dice)
    }

    /// Validate a move and commit it if the rules allow it.
    ///
    /// The returned `Applied` outcome carries the committed state, turn
    /// pointer included.
    pub fn attempt_move(
        &mut self,
        player: PlayerId,
        piece: usize,
        dice: u8,
    ) -> Result<MoveOutcome, MoveError> {
        match self.rules.attempt_move(&self.state, player, piece, dice)? {
            MoveOutcome::Rejected(reason) => Ok(MoveOutcome::Rejected(reason)),
            MoveOutcome::Applied(mut applied) => {
                self.commit(&mut applied, dice);
                Ok(MoveOutcome::Applied(applied))
            }
        }
    }

    /// Forfeit a throw that no piece can use. The turn passes on.
    pub fn pass(&mut self, player: PlayerId, dice: u8) -> Result<MoveRecord, MoveError> {
        check_preconditions(&self.state, player, None, dice)?;
        if self.rules.has_legal_move(&self.state, player, dice) {
            return Err(MoveError::MoveAvailable { player, dice });
        }

        self.state.turn_number += 1;
        self.advance_turn(player);

        let record = MoveRecord {
            sequence: self.log.next_sequence(),
            player,
            dice,
            piece: None,
            from: PieceSlot::OffBoard,
            to: PieceSlot::OffBoard,
            capture: None,
            bonus: false,
        };
        self.log.push(record.clone());
        self.state.debug_check();
        Ok(record)
    }

    /// Run a request from the request boundary.
    pub fn submit(&mut self, request: MoveRequest) -> Result<TurnOutcome, MoveError> {
        let Some(piece) = request.piece else {
            return self.pass(request.player, request.dice).map(TurnOutcome::Committed);
        };

        match self.rules.attempt_move(&self.state, request.player, piece, request.dice)? {
            MoveOutcome::Rejected(reason) => Ok(TurnOutcome::Rejected(reason)),
            MoveOutcome::Applied(mut applied) => {
                Ok(TurnOutcome::Committed(self.commit(&mut applied, request.dice)))
            }
        }
    }

    fn commit(&mut self, applied: &mut AppliedMove, dice: u8) -> MoveRecord {
        let mover = applied.player;
        applied.state.turn_number += 1;

        if applied.victory.is_some() {
            applied.state.status = Status::Completed;
            applied.state.winner = Some(mover);
            log::info!("{mover} wins after {} turns", applied.state.turn_number);
        } else if applied.bonus {
            log::debug!("{mover} keeps the turn");
        } else {
            let next = mover.next(applied.state.player_count());
            applied.state.current_player = next;
            log::debug!("turn passes to {next}");
        }

        let record = MoveRecord {
            sequence: self.log.next_sequence(),
            player: mover,
            dice,
            piece: Some(applied.piece),
            from: applied.from,
            to: applied.to,
            capture: applied.capture,
            bonus: applied.bonus,
        };
        self.log.push(record.clone());

        applied.state.debug_check();
        self.state = applied.state.clone();
        record
    }

    fn advance_turn(&mut self, mover: PlayerId) {
        let next = mover.next(self.state.player_count());
        self.state.current_player = next;
        log::debug!("{mover} passes, turn to {next}");
    }
}
