//! Append-only log of committed moves.
//!
//! Backed by `im::Vector` so a room can hand out a copy of its history
//! without holding its lock for long.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{MoveRecord, PlayerId, SnapshotError};

/// Ordered move records for one game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    records: Vector<MoveRecord>,
}

impl MoveLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sequence number the next record must carry.
    #[must_use]
    pub fn next_sequence(&self) -> u32 {
        self.records.len() as u32
    }

    /// Append a record.
    pub fn push(&mut self, record: MoveRecord) {
        debug_assert_eq!(record.sequence, self.next_sequence(), "out-of-order record");
        self.records.push_back(record);
    }

    #[must_use]
    pub fn get(&self, sequence: u32) -> Option<&MoveRecord> {
        self.records.get(sequence as usize)
    }

    #[must_use]
    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> {
        self.records.iter()
    }

    /// Records made by one player.
    pub fn by_player(&self, player: PlayerId) -> impl Iterator<Item = &MoveRecord> {
        self.records.iter().filter(move |r| r.player == player)
    }

    /// Records that captured a piece.
    pub fn captures(&self) -> impl Iterator<Item = &MoveRecord> {
        self.records.iter().filter(|r| r.capture.is_some())
    }

    /// Encode for storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a stored log, checking sequence numbers.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let log: Self = bincode::deserialize(bytes)?;
        if let Some((i, r)) = log
            .records
            .iter()
            .enumerate()
            .find(|(i, r)| r.sequence as usize != *i)
        {
            return Err(SnapshotError::Corrupt(format!(
                "record {i} carries sequence {}",
                r.sequence
            )));
        }
        Ok(log)
    }
}

impl<'a> IntoIterator for &'a MoveLog {
    type Item = &'a MoveRecord;
    type IntoIter = im::vector::Iter<'a, MoveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
