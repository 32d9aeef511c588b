//! Error types for the rotation engine and cycle registry.
//!
//! Validation errors are detected before any mutation happens, so a returned
//! error always means the registry and the store are unchanged. Resolution
//! functions never produce these errors; they degrade to "no shift" instead.

use crate::libs::cycle::CycleId;
use crate::libs::shift::ShiftTypeId;
use thiserror::Error;

/// What kind of entity an empty name was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Cycle,
    ShiftType,
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameKind::Cycle => write!(f, "cycle"),
            NameKind::ShiftType => write!(f, "shift type"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RotaError {
    #[error("cycle length {0} is outside 1..=30 days")]
    InvalidCycleLength(u32),

    #[error("pattern has {actual} entries but the cycle is {expected} days long")]
    PatternLengthMismatch { expected: usize, actual: usize },

    #[error("day {day} of the pattern points at shift slot {index}, but the cycle only has {available} shifts")]
    PatternIndexOutOfRange { day: usize, index: usize, available: usize },

    #[error("a cycle named '{0}' already exists")]
    DuplicateCycleName(String),

    #[error("cycle '{0}' is active; activate another cycle or deactivate it first")]
    CycleInUse(String),

    #[error("shift type '{name}' is used by {cycles} cycle(s)")]
    ShiftTypeInUse { name: String, cycles: usize },

    #[error("{0} name must not be empty")]
    EmptyName(NameKind),

    #[error("override day {day} is outside 1..={length}")]
    OverrideDayOutOfRange { day: u32, length: u32 },

    #[error("override day {0} is defined more than once")]
    DuplicateOverrideDay(u32),

    #[error("cycle {0} not found")]
    CycleNotFound(CycleId),

    #[error("shift type {0} not found")]
    ShiftTypeNotFound(ShiftTypeId),

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("failed to persist changes: {0:#}")]
    Persistence(anyhow::Error),
}

impl RotaError {
    /// Wraps a store failure so callers can tell it apart from validation errors.
    pub fn persistence(error: anyhow::Error) -> Self {
        RotaError::Persistence(error)
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, RotaError::Persistence(_))
    }
}
