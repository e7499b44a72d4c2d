//! Turn sequencing over a rules engine.

pub mod controller;

pub use controller::{TurnController, TurnOutcome};
