//! Rooms: one locked game per room, many rooms in parallel.
//!
//! A `Room` serializes every call against its game. A `RoomRegistry` maps
//! room codes to shared `Arc<Room>` handles. Results are owned copies taken
//! under the room lock and handed back after it is released, ready for the
//! caller to broadcast.

pub mod game_room;
pub mod registry;

pub use game_room::{Room, RoomCode, RoomError, RoomUpdate};
pub use registry::RoomRegistry;
