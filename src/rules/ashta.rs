//! Ashta Chamma rules.
//!
//! ## Move resolution order
//!
//! 1. Preconditions (`check_preconditions`)
//! 2. Piece already Home → `PieceAlreadyHome`
//! 3. Off board: face must be 1, 5, or 6; the piece lands on its entry square
//! 4. On path: step is the face, capped at 5 for a Lone Wolf; passing Home
//!    is rejected, then the Blood Gate is checked
//! 5. Landing: Home increments `finished` and checks victory; any other
//!    square resolves a capture unless it is safe
//! 6. Bonus: bonus face or capture
//!
//! ## Capture
//!
//! The first opposing piece found on the landing square (seat order, then
//! slot order) is sent off the board, unless underdog protection applies:
//! the defender's only gated piece cannot be taken by a mover holding two or
//! more gated pieces (counting the piece that just landed). A protected
//! piece stays and shares the square.

use crate::board::{BoardTopology, Ring, Square};
use crate::core::config::{
    is_bonus_face, is_entry_face, BoardConfig, ConfigError, LONE_WOLF_CAP, PIECES_PER_PLAYER,
    TEAM_FINISH_TARGET,
};
use crate::core::{Capture, GameState, PieceSlot, PlayerId, SlotList};

use super::engine::{check_preconditions, GameResult, RulesEngine};
use super::outcome::{AppliedMove, MoveError, MoveOutcome, RejectReason};

/// A legal step, before it is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Step {
    from: PieceSlot,
    dest: u8,
}

/// The standard rule set over a board topology.
#[derive(Clone, Debug)]
pub struct AshtaRules {
    topology: BoardTopology,
}

impl AshtaRules {
    /// Rules on the given board.
    #[must_use]
    pub fn new(topology: BoardTopology) -> Self {
        Self { topology }
    }

    /// Rules on a configured board.
    pub fn from_board(board: &BoardConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(BoardTopology::new(board)?))
    }

    /// Rules on the default 7x7 board.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(BoardTopology::standard())
    }

    /// Whether the player's piece in `slot` is their only gated piece and
    /// already gated, so its step is capped.
    #[must_use]
    pub fn is_lone_wolf(&self, state: &GameState, player: PlayerId, slot: usize) -> bool {
        let Some(p) = state.player(player) else {
            return false;
        };
        let in_gate = p
            .piece(slot)
            .and_then(PieceSlot::path_index)
            .is_some_and(|index| self.topology.ring_at(index).is_gated());
        in_gate && p.count_gated(&self.topology) == 1
    }

    /// Rule check for a single slot. Preconditions must already hold.
    fn plan(
        &self,
        state: &GameState,
        player: PlayerId,
        slot: usize,
        dice: u8,
    ) -> Result<Step, RejectReason> {
        let topo = &self.topology;
        let home = topo.home_index();
        let Some(p) = state.player(player) else {
            unreachable!("preconditions checked {player} is seated");
        };

        let origin = match p.pieces[slot] {
            PieceSlot::Home => return Err(RejectReason::PieceAlreadyHome),
            PieceSlot::OffBoard => {
                if !is_entry_face(dice) {
                    return Err(RejectReason::EnterNeedsOneFiveSix);
                }
                return Ok(Step {
                    from: PieceSlot::OffBoard,
                    dest: 0,
                });
            }
            PieceSlot::OnPath(origin) => origin,
        };

        let step = if self.is_lone_wolf(state, player, slot) {
            dice.min(LONE_WOLF_CAP)
        } else {
            dice
        };

        let dest = u16::from(origin) + u16::from(step);
        if dest > u16::from(home) {
            let stretch = home - topo.ring_start_of(origin);
            return Err(if step > stretch {
                RejectReason::ExactLandingRequired
            } else {
                RejectReason::Overshoot
            });
        }
        let dest = dest as u8;

        let crosses_gate = topo.ring_at(origin) == Ring::Outer && topo.ring_at(dest) != Ring::Outer;
        if crosses_gate && p.kills == 0 {
            return Err(RejectReason::BloodGateBlocked);
        }

        Ok(Step {
            from: PieceSlot::OnPath(origin),
            dest,
        })
    }

    /// Send back the first opposing piece on `dest`, unless the square is
    /// safe or the defender is protected.
    fn resolve_capture(&self, state: &mut GameState, mover: PlayerId, dest: u8) -> Option<Capture> {
        let topo = &self.topology;
        let mover_player = state.player(mover)?;
        let square = topo.square(mover_player.color, dest);
        if topo.is_safe(square) {
            return None;
        }

        let (victim, slot, index) = state
            .players()
            .iter()
            .filter(|other| mover_player.is_opponent(other))
            .find_map(|other| {
                other.pieces.iter().enumerate().find_map(|(slot, piece)| {
                    piece
                        .path_index()
                        .filter(|&i| topo.square(other.color, i) == square)
                        .map(|i| (other.position, slot, i))
                })
            })?;

        let defender_gated = state.player(victim)?.count_gated(topo);
        let mover_gated = mover_player.count_gated(topo);
        if topo.ring_at(index).is_gated() && defender_gated == 1 && mover_gated >= 2 {
            log::debug!(
                "{victim} slot {slot} at {square} protected: lone gated piece against {mover_gated}"
            );
            return None;
        }

        state.player_mut(victim).pieces[slot] = PieceSlot::OffBoard;
        state.player_mut(mover).kills += 1;
        log::info!("{mover} captured {victim} slot {slot} at {square}");

        Some(Capture { victim, slot, square })
    }

    /// Win check after `mover` finished a piece.
    fn victory(&self, state: &GameState, mover: PlayerId) -> Option<GameResult> {
        let player = state.player(mover)?;
        match player.team {
            Some(team) if state.is_team_mode() => {
                (state.team_finished(team) >= TEAM_FINISH_TARGET).then(|| GameResult::Team {
                    team,
                    players: state.team_members(team).map(|p| p.position).collect(),
                })
            }
            _ => (player.finished as usize == PIECES_PER_PLAYER)
                .then_some(GameResult::Winner(mover)),
        }
    }

    fn apply(
        &self,
        state: &GameState,
        player: PlayerId,
        slot: usize,
        dice: u8,
        step: Step,
    ) -> AppliedMove {
        let topo = &self.topology;
        let mut next = state.clone();
        let color = next.player_mut(player).color;
        let home = step.dest == topo.home_index();

        let to = if home {
            PieceSlot::Home
        } else {
            PieceSlot::OnPath(step.dest)
        };
        next.player_mut(player).pieces[slot] = to;

        let mut capture = None;
        let mut victory = None;
        if home {
            next.player_mut(player).finished += 1;
            victory = self.victory(&next, player);
        } else {
            capture = self.resolve_capture(&mut next, player, step.dest);
        }
        next.debug_check();

        let from_square: Option<Square> = step.from.path_index().map(|i| topo.square(color, i));
        AppliedMove {
            state: next,
            player,
            piece: slot,
            from: step.from,
            to,
            from_square,
            to_square: topo.square(color, step.dest),
            bonus: is_bonus_face(dice) || capture.is_some(),
            capture,
            victory,
        }
    }
}

impl RulesEngine for AshtaRules {
    fn topology(&self) -> &BoardTopology {
        &self.topology
    }

    fn attempt_move(
        &self,
        state: &GameState,
        player: PlayerId,
        piece: usize,
        dice: u8,
    ) -> Result<MoveOutcome, MoveError> {
        check_preconditions(state, player, Some(piece), dice)?;

        match self.plan(state, player, piece, dice) {
            Ok(step) => {
                let applied = self.apply(state, player, piece, dice, step);
                Ok(MoveOutcome::Applied(Box::new(applied)))
            }
            Err(reason) => {
                log::debug!("{player} slot {piece} with {dice} rejected: {reason}");
                Ok(MoveOutcome::Rejected(reason))
            }
        }
    }

    fn legal_moves(&self, state: &GameState, player: PlayerId, dice: u8) -> SlotList {
        if check_preconditions(state, player, None, dice).is_err() {
            return SlotList::new();
        }
        (0..PIECES_PER_PLAYER)
            .filter(|&slot| self.plan(state, player, slot, dice).is_ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, GameConfig, Status};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    /// Red (seat 0) against Green (seat 1), game started.
    fn duel() -> GameState {
        let mut state = GameState::new(GameConfig::new(2));
        state.seat("red", Color::Red).unwrap();
        state.seat("green", Color::Green).unwrap();
        state.try_start().unwrap();
        state
    }

    fn applied(outcome: Result<MoveOutcome, MoveError>) -> AppliedMove {
        match outcome {
            Ok(MoveOutcome::Applied(applied)) => *applied,
            other => panic!("expected applied move, got {other:?}"),
        }
    }

    fn rejected(outcome: Result<MoveOutcome, MoveError>) -> RejectReason {
        match outcome {
            Ok(MoveOutcome::Rejected(reason)) => reason,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    /// Green path index that lands on the same square as Red's `red_index`.
    fn green_index_at(rules: &AshtaRules, red_index: u8) -> u8 {
        let topo = rules.topology();
        topo.index_of(Color::Green, topo.square(Color::Red, red_index)).unwrap()
    }

    #[test]
    fn test_entry_faces() {
        let rules = AshtaRules::standard();
        let state = duel();

        for dice in [1, 5, 6] {
            let m = applied(rules.attempt_move(&state, P0, 0, dice));
            assert_eq!(m.from, PieceSlot::OffBoard);
            assert_eq!(m.to, PieceSlot::OnPath(0));
            assert_eq!(m.from_square, None);
            assert_eq!(m.to_square, rules.topology().entry_square(Color::Red));
            assert!(m.bonus);
        }
        for dice in [2, 3, 4, 12] {
            assert_eq!(
                rejected(rules.attempt_move(&state, P0, 0, dice)),
                RejectReason::EnterNeedsOneFiveSix
            );
        }
    }

    #[test]
    fn test_plain_step_no_bonus() {
        let rules = AshtaRules::standard();
        let mut state = duel();
        state.arrange(P0, 2, PieceSlot::OnPath(4));

        let m = applied(rules.attempt_move(&state, P0, 2, 3));
        assert_eq!(m.to, PieceSlot::OnPath(7));
        assert!(!m.bonus);
        assert!(m.capture.is_none());
        // Input untouched.
        assert_eq!(state.player(P0).unwrap().piece(2), Some(PieceSlot::OnPath(4)));
    }

    #[test]
    fn test_twelve_moves_on_path_piece() {
        let rules = AshtaRules::standard();
        let mut state = duel();
        state.arrange(P0, 0, PieceSlot::OnPath(1));

        let m = applied(rules.attempt_move(&state, P0, 0, 12));
        assert_eq!(m.to, PieceSlot::OnPath(13));
        assert!(m.bonus);
    }

    #[test]
    fn test_piece_already_home() {
        let rules = AshtaRules::standard();
        let mut state = duel();
        state.arrange(P0, 0, PieceSlot::Home);
        assert_eq!(
            rejected(rules.attempt_move(&state, P0, 0, 1)),
            RejectReason::PieceAlreadyHome
        );
    }

    #[test]
    fn test_overshoot_and_exact_landing() {
        let rules = AshtaRules::standard();
        let mut state = duel();
        state.arrange_kills(P0, 1);
        state.arrange(P0, 0, PieceSlot::OnPath(45));
        state.arrange(P0, 1, PieceSlot::OnPath(30));

        assert_eq!(rejected(rules.attempt_move(&state, P0, 0, 6)), RejectReason::Overshoot);
        assert_eq!(
            rejected(rules.attempt_move(&state, P0, 0, 12)),
            RejectReason::ExactLandingRequired
        );
        let m = applied(rules.attempt_move(&state, P0, 0, 3));
        assert_eq!(m.to, PieceSlot::Home);
        assert_eq!(m.state.player(P0).unwrap().finished(), 1);
    }

    #[test]
    fn test_blood_gate() {
        let rules = AshtaRules::standard();
        let mut state = duel();
        state.arrange(P0, 0, PieceSlot::OnPath(22));

        assert_eq!(
            rejected(rules.attempt_move(&state, P0, 0, 3)),
            RejectReason::BloodGateBlocked
        );
        // Staying outside is fine.
        assert!(applied(rules.attempt_move(&state, P0, 0, 1)).to == PieceSlot::OnPath(23));

        state.arrange_kills(P0, 1);
        let m = applied(rules.attempt_move(&state, P0, 0, 3));
        assert_eq!(m.to, PieceSlot::OnPath(25));
    }

    #[test]
    fn test_lone_wolf_cap() {
        let rules = AshtaRules::standard();
        let mut state = duel();
        state.arrange_kills(P0, 1);
        state.arrange(P0, 0, PieceSlot::OnPath(26));

        assert!(rules.is_lone_wolf(&state, P0, 0));
        let m = applied(rules.attempt_move(&state, P0, 0, 6));
        assert_eq!(m.to, PieceSlot::OnPath(31));
        // Bonus still follows the face thrown.
        assert!(m.bonus);

        let m = applied(rules.attempt_move(&state, P0, 0, 12));
        assert_eq!(m.to, PieceSlot::OnPath(31));
    }

    #[test]
    fn test_lone_wolf_lifts_with_company() {
        let rules = AshtaRules::standard();
        let mut state = duel();
        state.arrange_kills(P0, 1);
        state.arrange(P0, 0, PieceSlot::OnPath(26));
        state.arrange(P0, 1, PieceSlot::OnPath(41));

        assert!(!rules.is_lone_wolf(&state, P0, 0));
        let m = applied(rules.attempt_move(&state, P0, 0, 6));
        assert_eq!(m.to, PieceSlot::OnPath(32));
    }

    #[test]
    fn test_lone_wolf_not_applied_when_entering_gate() {
        let rules = AshtaRules::standard();
        let mut state = duel();
        state.arrange_kills(P0, 1);
        state.arrange(P0, 0, PieceSlot::OnPath(20));

        let m = applied(rules.attempt_move(&state, P0, 0, 12));
        assert_eq!(m.to, PieceSlot::OnPath(32));
    }

    #[test]
    fn test_capture_on_landing() {
        let rules = AshtaRules::standard();
        let mut state = duel();
        // Red index 2 is (5, 6), not safe.
        let green_index = green_index_at(&rules, 2);
        state.arrange(P1, 4, PieceSlot::OnPath(green_index));
        state.arrange(P0, 0, PieceSlot::OnPath(0));

        let m = applied(rules.attempt_move(&state, P0, 0, 2));
        let capture = m.capture.expect("capture");
        assert_eq!(capture.victim, P1);
        assert_eq!(capture.slot, 4);
        assert_eq!(capture.square, Square::new(5, 6));
        assert!(m.bonus);
        assert_eq!(m.state.player(P1).unwrap().piece(4), Some(PieceSlot::OffBoard));
        assert_eq!(m.state.player(P0).unwrap().kills(), 1);
    }

    #[test]
    fn test_safe_square_shares() {
        let rules = AshtaRules::standard();
        let mut state = duel();
        // Red index 6 is (6, 3): Yellow's entry square, safe.
        let green_index = green_index_at(&rules, 6);
        state.arrange(P1, 0, PieceSlot::OnPath(green_index));
        state.arrange(P0, 0, PieceSlot::OnPath(3));

        let m = applied(rules.attempt_move(&state, P0, 0, 3));
        assert!(m.capture.is_none());
        assert!(!m.bonus);
        assert_eq!(m.state.player(P1).unwrap().piece(0), Some(PieceSlot::OnPath(green_index)));
    }

    #[test]
    fn test_capture_on_entry_when_entry_unsafe() {
        let config = GameConfig::new(2).with_board(BoardConfig::new(3));
        let rules = AshtaRules::from_board(&config.board).unwrap();
        let mut state = GameState::new(config);
        state.seat("red", Color::Red).unwrap();
        state.seat("green", Color::Green).unwrap();
        state.try_start().unwrap();

        let green_index = green_index_at(&rules, 0);
        state.arrange(P1, 5, PieceSlot::OnPath(green_index));

        let m = applied(rules.attempt_move(&state, P0, 0, 1));
        assert_eq!(m.capture.map(|c| c.victim), Some(P1));
        assert_eq!(m.state.player(P0).unwrap().kills(), 1);
    }

    #[test]
    fn test_one_capture_per_landing() {
        let config = GameConfig::new(4).with_board(BoardConfig::new(3));
        let rules = AshtaRules::from_board(&config.board).unwrap();
        let mut state = GameState::new(config);
        for color in Color::ALL {
            state.seat(color.to_string(), color).unwrap();
        }
        state.try_start().unwrap();

        let topo = rules.topology();
        let target = topo.square(Color::Red, 10);
        for (seat, color) in [(1, Color::Blue), (2, Color::Green)] {
            let index = topo.index_of(color, target).unwrap();
            state.arrange(PlayerId::new(seat), 0, PieceSlot::OnPath(index));
        }
        state.arrange(P0, 0, PieceSlot::OnPath(7));

        let m = applied(rules.attempt_move(&state, P0, 0, 3));
        assert_eq!(m.capture.map(|c| c.victim), Some(PlayerId::new(1)));
        assert!(m.state.player(PlayerId::new(2)).unwrap().piece(0).unwrap().path_index().is_some());
        assert_eq!(m.state.player(P0).unwrap().kills(), 1);
    }

    #[test]
    fn test_underdog_protection() {
        let rules = AshtaRules::standard();
        let mut state = duel();
        state.arrange_kills(P0, 1);
        state.arrange_kills(P1, 1);

        // Red index 28 is (1, 2): Inner ring, not safe.
        let green_index = green_index_at(&rules, 28);
        state.arrange(P1, 0, PieceSlot::OnPath(green_index));
        state.arrange(P0, 0, PieceSlot::OnPath(26));
        state.arrange(P0, 1, PieceSlot::OnPath(42));

        let m = applied(rules.attempt_move(&state, P0, 0, 2));
        assert!(m.capture.is_none());
        assert_eq!(m.state.player(P1).unwrap().piece(0), Some(PieceSlot::OnPath(green_index)));
        assert_eq!(m.state.player(P0).unwrap().kills(), 1);
        assert!(!m.bonus);
    }

    #[test]
    fn test_underdog_needs_lone_defender() {
        let rules = AshtaRules::standard();
        let mut state = duel();
        state.arrange_kills(P0, 1);
        state.arrange_kills(P1, 1);

        let green_index = green_index_at(&rules, 28);
        state.arrange(P1, 0, PieceSlot::OnPath(green_index));
        state.arrange(P1, 1, PieceSlot::OnPath(44));
        state.arrange(P0, 0, PieceSlot::OnPath(26));
        state.arrange(P0, 1, PieceSlot::OnPath(42));

        let m = applied(rules.attempt_move(&state, P0, 0, 2));
        assert_eq!(m.capture.map(|c| c.victim), Some(P1));
    }

    #[test]
    fn test_solo_victory() {
        let rules = AshtaRules::standard();
        let mut state = duel();
        for slot in 0..5 {
            state.arrange(P0, slot, PieceSlot::Home);
        }
        state.arrange(P0, 5, PieceSlot::OnPath(46));
        state.arrange_kills(P0, 1);

        let m = applied(rules.attempt_move(&state, P0, 5, 2));
        assert_eq!(m.victory, Some(GameResult::Winner(P0)));
        // Status is the controller's to write.
        assert_eq!(m.state.status(), Status::InProgress);
    }

    #[test]
    fn test_legal_moves() {
        let rules = AshtaRules::standard();
        let mut state = duel();
        state.arrange(P0, 0, PieceSlot::OnPath(22));
        state.arrange(P0, 1, PieceSlot::Home);

        assert_eq!(rules.legal_moves(&state, P0, 3).as_slice(), &[] as &[usize]);
        assert_eq!(rules.legal_moves(&state, P0, 1).as_slice(), &[0, 2, 3, 4, 5]);
        assert!(rules.legal_moves(&state, P1, 1).is_empty());
        assert!(!rules.has_legal_move(&state, P0, 4));
    }

    #[test]
    fn test_preconditions_surface_as_errors() {
        let rules = AshtaRules::standard();
        let state = duel();
        assert_eq!(
            rules.attempt_move(&state, P0, 6, 1),
            Err(MoveError::InvalidPieceIndex(6))
        );
        assert_eq!(
            rules.attempt_move(&state, P0, 0, 8),
            Err(MoveError::InvalidDiceValue(8))
        );
    }
}
