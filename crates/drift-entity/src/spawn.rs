//! Deferred spawning and entity id allocation.

use drift_physics::EntityId;

use crate::dynamic::DynamicEntity;

/// Entities created during an update pass, merged into the live collection
/// once the pass has finished iterating.
#[derive(Default)]
pub struct SpawnQueue {
    pending: Vec<DynamicEntity>,
}

impl SpawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: DynamicEntity) {
        self.pending.push(entity);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Takes everything queued, in spawn order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, DynamicEntity> {
        self.pending.drain(..)
    }
}

/// Hands out entity ids. Ids are never reused.
#[derive(Debug, Default)]
pub struct EntityIds {
    next: u64,
}

impl EntityIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}
