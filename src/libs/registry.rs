//! Cycle registry: the set of all cycles and shift types, with at most one
//! active cycle.
//!
//! Every mutation follows the same shape:
//!
//! 1. validate against the current state,
//! 2. build the changed entities as clones,
//! 3. hand them to the store as one batch,
//! 4. only on success, swap the clones into memory.
//!
//! A store failure therefore leaves the registry exactly as it was and is
//! reported as [`RotaError::Persistence`].

use crate::libs::cycle::{CycleId, ShiftCycle};
use crate::libs::daily_override::DailyOverride;
use crate::libs::error::RotaError;
use crate::libs::resolution::DayView;
use crate::libs::shift::{ShiftType, ShiftTypeId};
use crate::libs::store::{CycleStore, Entity, EntityRef};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// In-memory view of every shift type and cycle, written through to a
/// [`CycleStore`].
///
/// Shift types are kept sorted by `order` then name, cycles by name. A
/// usage index maps each shift type to the cycles that reference it.
pub struct CycleRegistry<S: CycleStore> {
    store: S,
    shift_types: Vec<ShiftType>,
    cycles: Vec<ShiftCycle>,
    usage: HashMap<ShiftTypeId, BTreeSet<CycleId>>,
}

impl<S: CycleStore> CycleRegistry<S> {
    /// Loads everything from `store`. Legacy data with several active cycles
    /// is repaired by keeping the first one in name order.
    pub fn open(mut store: S) -> Result<Self, RotaError> {
        let mut shift_types = store.load_all_shift_types().map_err(RotaError::persistence)?;
        let mut cycles = store.load_all_cycles().map_err(RotaError::persistence)?;
        shift_types.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        cycles.sort_by(|a, b| a.name.cmp(&b.name));

        let mut repaired = Vec::new();
        let mut seen_active = false;
        for cycle in cycles.iter_mut().filter(|cycle| cycle.is_active) {
            if seen_active {
                cycle.is_active = false;
                repaired.push(Entity::Cycle(cycle.clone()));
            }
            seen_active = true;
        }
        if !repaired.is_empty() {
            tracing::warn!("deactivating {} extra active cycle(s) found on load", repaired.len());
            store.save(&repaired).map_err(RotaError::persistence)?;
        }

        let mut registry = CycleRegistry {
            store,
            shift_types,
            cycles,
            usage: HashMap::new(),
        };
        registry.reindex();
        tracing::debug!(
            "registry opened with {} shift type(s) and {} cycle(s)",
            registry.shift_types.len(),
            registry.cycles.len()
        );
        Ok(registry)
    }

    /// Backing store, mostly for inspection in tests.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn shift_types(&self) -> &[ShiftType] {
        &self.shift_types
    }

    pub fn cycles(&self) -> &[ShiftCycle] {
        &self.cycles
    }

    pub fn shift_type(&self, id: ShiftTypeId) -> Option<&ShiftType> {
        self.shift_types.iter().find(|shift| shift.id == id)
    }

    pub fn shift_type_by_name(&self, name: &str) -> Option<&ShiftType> {
        self.shift_types.iter().find(|shift| shift.name == name)
    }

    pub fn cycle(&self, id: CycleId) -> Option<&ShiftCycle> {
        self.cycles.iter().find(|cycle| cycle.id == id)
    }

    pub fn cycle_by_name(&self, name: &str) -> Option<&ShiftCycle> {
        self.cycles.iter().find(|cycle| cycle.name == name)
    }

    /// The active cycle, if any.
    pub fn active(&self) -> Option<&ShiftCycle> {
        self.cycles.iter().find(|cycle| cycle.is_active)
    }

    /// Shift of the active cycle on `date`, without overrides.
    pub fn resolve_active(&self, date: NaiveDate) -> Option<&ShiftType> {
        self.active()?.resolve_shift(date)
    }

    /// Day view of the active cycle on `date`, with overrides applied.
    pub fn active_day_view(&self, date: NaiveDate) -> Option<DayView<'_>> {
        self.active()?.day_view(date)
    }

    /// Ids of the cycles whose shift list or overrides reference `id`.
    pub fn cycles_using(&self, id: ShiftTypeId) -> Vec<CycleId> {
        self.usage.get(&id).map(|ids| ids.iter().copied().collect()).unwrap_or_default()
    }

    /// Adds a shift type to the catalogue.
    ///
    /// An `order` already taken by another shift type is replaced with one past
    /// the current maximum, so the new entry sorts last.
    ///
    /// # Arguments
    ///
    /// * `shift` - Shift type to add; its name must not be blank
    ///
    /// # Returns
    ///
    /// The id of the stored shift type.
    pub fn add_shift_type(&mut self, mut shift: ShiftType) -> Result<ShiftTypeId, RotaError> {
        shift.validate()?;
        if self.shift_types.iter().any(|existing| existing.order == shift.order) {
            shift.order = self.next_order();
        }

        self.persist(&[Entity::ShiftType(shift.clone())])?;

        let id = shift.id;
        tracing::debug!("added shift type '{}' ({})", shift.name, id);
        self.shift_types.push(shift);
        self.sort_shift_types();
        Ok(id)
    }

    /// Replaces a shift type and refreshes the copies owned by cycles.
    ///
    /// The order-collision rule of [`add_shift_type`](Self::add_shift_type)
    /// applies here as well; keeping its own order is not a collision.
    ///
    /// # Arguments
    ///
    /// * `shift` - New definition; its id must already be registered
    ///
    /// # Returns
    ///
    /// [`RotaError::ShiftTypeNotFound`] for an unknown id. The shift type and
    /// every cycle using it are written in one batch.
    pub fn update_shift_type(&mut self, mut shift: ShiftType) -> Result<(), RotaError> {
        shift.validate()?;
        let index = self.shift_type_index(shift.id)?;
        if self
            .shift_types
            .iter()
            .any(|existing| existing.id != shift.id && existing.order == shift.order)
        {
            shift.order = self.next_order();
        }

        let mut staged_cycles = Vec::new();
        for cycle in self.cycles.iter().filter(|cycle| cycle.uses_shift_type(shift.id)) {
            let mut staged = cycle.clone();
            staged.replace_shift(&shift);
            staged_cycles.push(staged);
        }

        let mut batch = vec![Entity::ShiftType(shift.clone())];
        batch.extend(staged_cycles.iter().cloned().map(Entity::Cycle));
        self.persist(&batch)?;

        self.shift_types[index] = shift;
        self.sort_shift_types();
        for staged in staged_cycles {
            self.replace_cycle(staged);
        }
        Ok(())
    }

    /// Removes a shift type that no cycle references.
    ///
    /// # Arguments
    ///
    /// * `id` - Shift type to delete
    ///
    /// # Returns
    ///
    /// The removed shift type, or [`RotaError::ShiftTypeInUse`] naming how many
    /// cycles still use it.
    pub fn delete_shift_type(&mut self, id: ShiftTypeId) -> Result<ShiftType, RotaError> {
        let index = self.shift_type_index(id)?;
        let users = self.usage.get(&id).map_or(0, |ids| ids.len());
        if users > 0 {
            return Err(RotaError::ShiftTypeInUse {
                name: self.shift_types[index].name.clone(),
                cycles: users,
            });
        }

        self.store.delete(EntityRef::ShiftType(id)).map_err(RotaError::persistence)?;

        let removed = self.shift_types.remove(index);
        self.usage.remove(&id);
        tracing::debug!("deleted shift type '{}' ({})", removed.name, id);
        Ok(removed)
    }

    /// Adds a cycle. The first cycle ever created becomes active; later ones
    /// only when `activate` is set.
    ///
    /// # Arguments
    ///
    /// * `cycle` - Cycle to add; its name must be unique and every shift it uses
    ///   must be registered
    /// * `activate` - Make it the active cycle, deactivating the previous one
    ///
    /// # Returns
    ///
    /// The id of the new cycle.
    pub fn create_cycle(&mut self, mut cycle: ShiftCycle, activate: bool) -> Result<CycleId, RotaError> {
        cycle.validate()?;
        self.check_unique_name(&cycle.name, None)?;
        self.check_shift_types_known(&cycle)?;

        cycle.is_active = activate || self.cycles.is_empty();
        let mut batch = vec![Entity::Cycle(cycle.clone())];
        let deactivated = if cycle.is_active { self.deactivated_others(cycle.id) } else { Vec::new() };
        batch.extend(deactivated.iter().cloned().map(Entity::Cycle));
        self.persist(&batch)?;

        for staged in deactivated {
            self.replace_cycle(staged);
        }
        let id = cycle.id;
        tracing::debug!("created cycle '{}' ({}), active: {}", cycle.name, id, cycle.is_active);
        self.cycles.push(cycle);
        self.sort_cycles();
        self.reindex();
        Ok(id)
    }

    /// Replaces a cycle's definition. Activation state is kept as is; use
    /// [`activate`](Self::activate) and [`deactivate`](Self::deactivate).
    pub fn update_cycle(&mut self, mut cycle: ShiftCycle) -> Result<(), RotaError> {
        let index = self.cycle_index(cycle.id)?;
        cycle.validate()?;
        self.check_unique_name(&cycle.name, Some(cycle.id))?;
        self.check_shift_types_known(&cycle)?;
        cycle.is_active = self.cycles[index].is_active;

        self.persist(&[Entity::Cycle(cycle.clone())])?;

        self.cycles[index] = cycle;
        self.sort_cycles();
        self.reindex();
        Ok(())
    }

    /// Makes `id` the only active cycle. Activating the active cycle again
    /// writes nothing.
    pub fn activate(&mut self, id: CycleId) -> Result<(), RotaError> {
        let index = self.cycle_index(id)?;
        let mut staged = self.deactivated_others(id);
        if !self.cycles[index].is_active {
            let mut target = self.cycles[index].clone();
            target.is_active = true;
            staged.push(target);
        }
        if staged.is_empty() {
            return Ok(());
        }

        let batch: Vec<Entity> = staged.iter().cloned().map(Entity::Cycle).collect();
        self.persist(&batch)?;

        for cycle in staged {
            self.replace_cycle(cycle);
        }
        tracing::debug!("activated cycle {}", id);
        Ok(())
    }

    /// Leaves no cycle active when `id` was the active one.
    pub fn deactivate(&mut self, id: CycleId) -> Result<(), RotaError> {
        let index = self.cycle_index(id)?;
        if !self.cycles[index].is_active {
            return Ok(());
        }
        let mut staged = self.cycles[index].clone();
        staged.is_active = false;

        self.persist(&[Entity::Cycle(staged.clone())])?;

        self.cycles[index] = staged;
        Ok(())
    }

    /// Deletes a cycle together with its overrides.
    ///
    /// The active cycle cannot be deleted; deactivate it or activate another
    /// one first.
    ///
    /// # Arguments
    ///
    /// * `id` - Cycle to delete
    ///
    /// # Returns
    ///
    /// The removed cycle, or [`RotaError::CycleInUse`] when it is active.
    pub fn delete_cycle(&mut self, id: CycleId) -> Result<ShiftCycle, RotaError> {
        let index = self.cycle_index(id)?;
        if self.cycles[index].is_active {
            return Err(RotaError::CycleInUse(self.cycles[index].name.clone()));
        }

        self.store.delete(EntityRef::Cycle(id)).map_err(RotaError::persistence)?;

        let removed = self.cycles.remove(index);
        self.reindex();
        tracing::debug!("deleted cycle '{}' ({})", removed.name, id);
        Ok(removed)
    }

    /// Changes a cycle's length, cascading to its pattern and overrides.
    pub fn set_cycle_length(&mut self, id: CycleId, length: u32) -> Result<(), RotaError> {
        self.edit_cycle(id, |cycle| cycle.set_length(length))
    }

    /// Sets the override for one day of a cycle.
    ///
    /// # Arguments
    ///
    /// * `id` - Cycle to edit
    /// * `daily` - Override for its 1-indexed day; an empty one clears the day
    ///
    /// # Returns
    ///
    /// [`RotaError::ShiftTypeNotFound`] when the override selects an unknown
    /// shift type. Nothing is written when the cycle is unchanged.
    pub fn set_override(&mut self, id: CycleId, daily: DailyOverride) -> Result<(), RotaError> {
        if let Some(selected) = daily.selected_shift_id {
            if self.shift_type(selected).is_none() {
                return Err(RotaError::ShiftTypeNotFound(selected));
            }
        }
        self.edit_cycle(id, |cycle| cycle.set_override(daily))
    }

    /// Returns whether an override existed for the day.
    pub fn clear_override(&mut self, id: CycleId, day_number: u32) -> Result<bool, RotaError> {
        let mut cleared = false;
        self.edit_cycle(id, |cycle| {
            cleared = cycle.clear_override(day_number);
            Ok(())
        })?;
        Ok(cleared)
    }

    fn edit_cycle<F>(&mut self, id: CycleId, edit: F) -> Result<(), RotaError>
    where
        F: FnOnce(&mut ShiftCycle) -> Result<(), RotaError>,
    {
        let index = self.cycle_index(id)?;
        let mut staged = self.cycles[index].clone();
        edit(&mut staged)?;
        if staged == self.cycles[index] {
            return Ok(());
        }

        self.persist(&[Entity::Cycle(staged.clone())])?;

        self.cycles[index] = staged;
        self.reindex();
        Ok(())
    }

    fn persist(&mut self, batch: &[Entity]) -> Result<(), RotaError> {
        tracing::debug!("persisting {} entit(ies)", batch.len());
        self.store.save(batch).map_err(|e| {
            tracing::warn!("store rejected batch: {:#}", e);
            RotaError::persistence(e)
        })
    }

    fn deactivated_others(&self, keep: CycleId) -> Vec<ShiftCycle> {
        self.cycles
            .iter()
            .filter(|cycle| cycle.is_active && cycle.id != keep)
            .map(|cycle| {
                let mut staged = cycle.clone();
                staged.is_active = false;
                staged
            })
            .collect()
    }

    fn check_unique_name(&self, name: &str, except: Option<CycleId>) -> Result<(), RotaError> {
        let taken = self.cycles.iter().any(|cycle| cycle.name == name && Some(cycle.id) != except);
        if taken {
            return Err(RotaError::DuplicateCycleName(name.to_string()));
        }
        Ok(())
    }

    fn check_shift_types_known(&self, cycle: &ShiftCycle) -> Result<(), RotaError> {
        match cycle.shifts.iter().find(|shift| self.shift_type(shift.id).is_none()) {
            Some(unknown) => Err(RotaError::ShiftTypeNotFound(unknown.id)),
            None => Ok(()),
        }
    }

    fn shift_type_index(&self, id: ShiftTypeId) -> Result<usize, RotaError> {
        self.shift_types
            .iter()
            .position(|shift| shift.id == id)
            .ok_or(RotaError::ShiftTypeNotFound(id))
    }

    fn cycle_index(&self, id: CycleId) -> Result<usize, RotaError> {
        self.cycles.iter().position(|cycle| cycle.id == id).ok_or(RotaError::CycleNotFound(id))
    }

    fn next_order(&self) -> i64 {
        self.shift_types.iter().map(|shift| shift.order).max().map_or(0, |max| max + 1)
    }

    fn replace_cycle(&mut self, staged: ShiftCycle) {
        if let Some(slot) = self.cycles.iter_mut().find(|cycle| cycle.id == staged.id) {
            *slot = staged;
        }
    }

    fn sort_shift_types(&mut self) {
        self.shift_types.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
    }

    fn sort_cycles(&mut self) {
        self.cycles.sort_by(|a, b| a.name.cmp(&b.name));
    }

    fn reindex(&mut self) {
        self.usage.clear();
        for cycle in &self.cycles {
            let referenced = cycle
                .shifts
                .iter()
                .map(|shift| shift.id)
                .chain(cycle.daily_overrides.iter().filter_map(|daily| daily.selected_shift_id));
            for shift_id in referenced {
                self.usage.entry(shift_id).or_default().insert(cycle.id);
            }
        }
    }
}
