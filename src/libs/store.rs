//! Persistence seam for the cycle registry.
//!
//! The registry computes every mutation in memory first and hands the result
//! to a [`CycleStore`] as one batch. Implementations must apply a batch
//! atomically: either every entity is written or none is.

use crate::libs::cycle::{CycleId, ShiftCycle};
use crate::libs::shift::{ShiftType, ShiftTypeId};
use anyhow::Result;
use std::collections::BTreeMap;

/// Something a [`CycleStore`] can persist.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    ShiftType(ShiftType),
    Cycle(ShiftCycle),
}

/// Key of an [`Entity`], for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    ShiftType(ShiftTypeId),
    Cycle(CycleId),
}

/// Persistence behind the registry.
///
/// Implementations write a `save` batch all-or-nothing. Deleting a shift type
/// unlinks it from the cycles that own a copy: their other days keep
/// resolving to the same shifts and the removed shift's days become
/// unassigned.
pub trait CycleStore {
    fn load_all_shift_types(&mut self) -> Result<Vec<ShiftType>>;

    /// Cycles with their owned shift copies and overrides.
    fn load_all_cycles(&mut self) -> Result<Vec<ShiftCycle>>;

    /// Inserts or replaces every entity in one atomic batch.
    fn save(&mut self, entities: &[Entity]) -> Result<()>;

    /// Deleting a cycle removes its overrides. Deleting a shift type only
    /// unlinks it from cycles.
    fn delete(&mut self, entity: EntityRef) -> Result<()>;
}

/// Store that keeps everything in memory. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    shift_types: BTreeMap<ShiftTypeId, ShiftType>,
    cycles: BTreeMap<CycleId, ShiftCycle>,
    batches: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store as if the entities had been saved earlier.
    pub fn with_entities(entities: Vec<Entity>) -> Self {
        let mut store = Self::new();
        for entity in entities {
            store.put(entity);
        }
        store
    }

    /// Number of successful `save` and `delete` calls.
    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn cycle(&self, id: CycleId) -> Option<&ShiftCycle> {
        self.cycles.get(&id)
    }

    pub fn shift_type(&self, id: ShiftTypeId) -> Option<&ShiftType> {
        self.shift_types.get(&id)
    }

    fn put(&mut self, entity: Entity) {
        match entity {
            Entity::ShiftType(shift) => {
                self.shift_types.insert(shift.id, shift);
            }
            Entity::Cycle(cycle) => {
                self.cycles.insert(cycle.id, cycle);
            }
        }
    }
}

impl CycleStore for MemoryStore {
    fn load_all_shift_types(&mut self) -> Result<Vec<ShiftType>> {
        Ok(self.shift_types.values().cloned().collect())
    }

    fn load_all_cycles(&mut self) -> Result<Vec<ShiftCycle>> {
        Ok(self.cycles.values().cloned().collect())
    }

    fn save(&mut self, entities: &[Entity]) -> Result<()> {
        for entity in entities {
            self.put(entity.clone());
        }
        self.batches += 1;
        Ok(())
    }

    fn delete(&mut self, entity: EntityRef) -> Result<()> {
        match entity {
            EntityRef::ShiftType(id) => {
                self.shift_types.remove(&id);
                for cycle in self.cycles.values_mut() {
                    cycle.unlink_shift(id);
                }
            }
            EntityRef::Cycle(id) => {
                self.cycles.remove(&id);
            }
        }
        self.batches += 1;
        Ok(())
    }
}
