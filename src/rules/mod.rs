//! Move validation and resolution.
//!
//! `RulesEngine` is the seam the turn controller calls through; `AshtaRules`
//! is the standard rule set (entry gating, Blood Gate, Lone Wolf, capture
//! with underdog protection, exact landing, team scoring).
//!
//! Everything here is a pure function of its inputs: the incoming state is
//! never modified, and a rejection carries no state at all.

pub mod ashta;
pub mod engine;
pub mod outcome;

pub use ashta::AshtaRules;
pub use engine::{check_preconditions, GameResult, RulesEngine};
pub use outcome::{AppliedMove, MoveError, MoveOutcome, RejectReason};
