//! Move history and deterministic replay.
//!
//! Every committed move or pass is kept as a `MoveRecord`. Replaying a log
//! from its starting position must land on the same state; `replay` checks
//! this record by record.

pub mod log;
pub mod replay;

pub use log::MoveLog;
pub use replay::{replay, ReplayError};
