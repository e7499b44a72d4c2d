//! The table of open rooms.

use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;

use super::game_room::{Room, RoomCode, RoomError};
use crate::core::{DiceRng, GameConfig};

/// All open rooms by code.
///
/// Rooms share nothing; the registry lock only guards the map itself and is
/// never held while a room is locked.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: RwLock<FxHashMap<RoomCode, Arc<Room>>>,
}

impl RoomRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new room under `code`.
    pub fn create(&self, code: RoomCode, config: GameConfig) -> Result<Arc<Room>, RoomError> {
        let room = Arc::new(Room::new(code.clone(), config)?);
        self.insert(room)
    }

    /// Open a new room under a fresh random join code.
    pub fn create_random(
        &self,
        rng: &mut DiceRng,
        config: GameConfig,
    ) -> Result<Arc<Room>, RoomError> {
        let mut rooms = self.rooms.write().map_err(|_| RoomError::RegistryPoisoned)?;
        let code = loop {
            let code = RoomCode::random(rng);
            if !rooms.contains_key(&code) {
                break code;
            }
        };
        let room = Arc::new(Room::new(code.clone(), config)?);
        rooms.insert(code.clone(), Arc::clone(&room));
        log::info!("room {code} opened ({} open)", rooms.len());
        Ok(room)
    }

    /// Register an already built room.
    pub fn insert(&self, room: Arc<Room>) -> Result<Arc<Room>, RoomError> {
        let mut rooms = self.rooms.write().map_err(|_| RoomError::RegistryPoisoned)?;
        let code = room.code().clone();
        if rooms.contains_key(&code) {
            return Err(RoomError::AlreadyExists(code));
        }
        rooms.insert(code.clone(), Arc::clone(&room));
        log::info!("room {code} opened ({} open)", rooms.len());
        Ok(room)
    }

    pub fn get(&self, code: &RoomCode) -> Result<Arc<Room>, RoomError> {
        let rooms = self.rooms.read().map_err(|_| RoomError::RegistryPoisoned)?;
        rooms
            .get(code)
            .cloned()
            .ok_or_else(|| RoomError::NotFound(code.clone()))
    }

    /// Close a room. Handles already given out stay usable.
    pub fn remove(&self, code: &RoomCode) -> Result<Arc<Room>, RoomError> {
        let mut rooms = self.rooms.write().map_err(|_| RoomError::RegistryPoisoned)?;
        let room = rooms.remove(code).ok_or_else(|| RoomError::NotFound(code.clone()))?;
        log::info!("room {code} closed");
        Ok(room)
    }

    /// Open room codes, sorted.
    pub fn codes(&self) -> Result<Vec<RoomCode>, RoomError> {
        let rooms = self.rooms.read().map_err(|_| RoomError::RegistryPoisoned)?;
        let mut codes: Vec<_> = rooms.keys().cloned().collect();
        codes.sort();
        Ok(codes)
    }

    /// Number of open rooms.
    pub fn len(&self) -> Result<usize, RoomError> {
        let rooms = self.rooms.read().map_err(|_| RoomError::RegistryPoisoned)?;
        Ok(rooms.len())
    }

    pub fn is_empty(&self) -> Result<bool, RoomError> {
        Ok(self.len()? == 0)
    }
}
