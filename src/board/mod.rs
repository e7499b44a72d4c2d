//! Board topology: path geometry, ring classification, and safe squares.
//!
//! Nothing here is mutable. One `BoardTopology` is built per board layout
//! and shared by every game on it.

pub mod topology;

pub use topology::{BoardTopology, Ring, Square};
