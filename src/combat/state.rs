//! Per-actor defensive state
//!
//! Transient by design: it lives in the world's in-memory table and is
//! never persisted. Absence of a `DefenseState` means "not defending".

use crate::combat::stance::Stance;
use crate::core::types::ItemId;

/// An actor's standing defense: the stances that will meet successive
/// incoming attacks, round-robin, and the weapon that conferred them.
///
/// Invariant: `stances` is never empty while the state exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefenseState {
    stances: Vec<Stance>,
    /// Exact item instance recorded at `defend` time. When this item
    /// leaves the holder's possession the whole state is cleared.
    pub weapon: ItemId,
}

impl DefenseState {
    /// Panics if `stances` is empty; callers validate first.
    pub fn new(stances: Vec<Stance>, weapon: ItemId) -> Self {
        assert!(!stances.is_empty(), "defense list must not be empty");
        Self { stances, weapon }
    }

    /// The stance that will meet the next incoming attack
    pub fn current(&self) -> Stance {
        self.stances[0]
    }

    /// Rotate one position: the head moves to the tail. Called once per
    /// resolved incoming attack, whether or not it was decisive.
    pub fn advance(&mut self) {
        if self.stances.len() > 1 {
            self.stances.rotate_left(1);
        }
    }

    pub fn stances(&self) -> &[Stance] {
        &self.stances
    }

    /// Comma-separated list for the defend status report
    pub fn describe(&self) -> String {
        self.stances
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
