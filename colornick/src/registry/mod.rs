//! The single source of truth for which color a player has picked and
//! whether an operator has locked it.
//!
//! Everything else in the plugin (commands, the selection menu, the loader,
//! the team sync) goes through [`NickColorRegistry`]. Mutating call sites
//! announce what they changed with a [`NickColorChangedMessage`] so the
//! presentation layer can follow along for connected players.

use bevy::{platform::collections::HashMap, prelude::*};
use uuid::Uuid;

use crate::palette::NickColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A player's stored color choice
pub struct ColorAssignment {
    /// The color this player's nickname is shown in
    pub color: NickColor,
    /// Set when an operator assigned the color. A locked color can only be
    /// changed or cleared by another operator.
    pub locked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What [`NickColorRegistry::unlock`] found.
///
/// `AlreadyUnlocked` is a reportable outcome rather than an error so callers
/// can word their feedback differently.
pub enum UnlockOutcome {
    /// The lock was set and has been cleared
    Unlocked,
    /// There was no lock to clear
    AlreadyUnlocked,
}

#[derive(Message, Debug, Clone, Copy)]
/// Sent whenever a player's stored color changes.
///
/// `color` is the new state - [`None`] means the assignment was cleared.
pub struct NickColorChangedMessage {
    /// The player whose assignment changed
    pub id: Uuid,
    /// Their color after the change
    pub color: Option<NickColor>,
}

#[derive(Resource, Default, Debug)]
/// Maps player account ids to their [`ColorAssignment`].
///
/// No entry means the player never picked a color (or reset it).
pub struct NickColorRegistry {
    assignments: HashMap<Uuid, ColorAssignment>,
}

impl NickColorRegistry {
    /// Records `color` for this player, replacing any previous choice.
    ///
    /// `locked` should be true exactly when an operator (or the console) made
    /// the assignment. Callers are responsible for checking
    /// [`Self::is_locked`] before letting a non-operator in here.
    pub fn set_color(&mut self, id: Uuid, color: NickColor, locked: bool) {
        self.assignments.insert(id, ColorAssignment { color, locked });
    }

    /// Removes this player's color and lock flag. Clearing a player with no
    /// entry is a no-op.
    pub fn clear_color(&mut self, id: Uuid) {
        self.assignments.remove(&id);
    }

    /// Whether this player's color was set by an operator
    pub fn is_locked(&self, id: Uuid) -> bool {
        self.assignments.get(&id).map(|assignment| assignment.locked).unwrap_or(false)
    }

    /// Clears only the lock flag, leaving the color itself alone
    pub fn unlock(&mut self, id: Uuid) -> UnlockOutcome {
        match self.assignments.get_mut(&id) {
            Some(assignment) if assignment.locked => {
                assignment.locked = false;
                UnlockOutcome::Unlocked
            }
            _ => UnlockOutcome::AlreadyUnlocked,
        }
    }

    /// The player's current color, if they have one
    pub fn color_of(&self, id: Uuid) -> Option<NickColor> {
        self.assignments.get(&id).map(|assignment| assignment.color)
    }

    /// Iterates over every stored assignment
    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &ColorAssignment)> {
        self.assignments.iter()
    }

    /// Replaces the entire registry with `assignments`.
    ///
    /// Used by the loader so that a reload never merge-appends onto stale
    /// state.
    pub fn replace_all(&mut self, assignments: HashMap<Uuid, ColorAssignment>) {
        self.assignments = assignments;
    }

    /// How many players have a stored color
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether no player has a stored color
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

pub(super) fn register(app: &mut App) {
    app.init_resource::<NickColorRegistry>();
    app.add_message::<NickColorChangedMessage>();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steve() -> Uuid {
        Uuid::from_u128(0x1111)
    }

    #[test]
    fn set_then_query() {
        let mut registry = NickColorRegistry::default();

        for color in NickColor::ALL {
            registry.set_color(steve(), color, false);

            assert_eq!(registry.color_of(steve()), Some(color));
            assert!(!registry.is_locked(steve()));
        }
    }

    #[test]
    fn clear_is_idempotent() {
        let mut registry = NickColorRegistry::default();
        registry.set_color(steve(), NickColor::Gold, true);

        registry.clear_color(steve());
        assert_eq!(registry.color_of(steve()), None);
        assert!(!registry.is_locked(steve()));

        registry.clear_color(steve());
        assert_eq!(registry.color_of(steve()), None);
    }

    #[test]
    fn unlock_preserves_the_color() {
        let mut registry = NickColorRegistry::default();
        registry.set_color(steve(), NickColor::Red, true);

        assert_eq!(registry.unlock(steve()), UnlockOutcome::Unlocked);
        assert_eq!(registry.color_of(steve()), Some(NickColor::Red));
        assert!(!registry.is_locked(steve()));

        assert_eq!(registry.unlock(steve()), UnlockOutcome::AlreadyUnlocked);
        assert_eq!(registry.color_of(steve()), Some(NickColor::Red));
    }

    #[test]
    fn unlock_without_an_entry_reports_already_unlocked() {
        let mut registry = NickColorRegistry::default();

        assert_eq!(registry.unlock(steve()), UnlockOutcome::AlreadyUnlocked);
        assert_eq!(registry.color_of(steve()), None);
    }

    #[test]
    fn replace_all_drops_previous_state() {
        let mut registry = NickColorRegistry::default();
        registry.set_color(steve(), NickColor::Red, false);

        let alex = Uuid::from_u128(0x2222);
        let mut fresh = HashMap::new();
        fresh.insert(alex, ColorAssignment {
            color: NickColor::Blue,
            locked: true,
        });

        registry.replace_all(fresh);

        assert_eq!(registry.color_of(steve()), None);
        assert_eq!(registry.color_of(alex), Some(NickColor::Blue));
        assert_eq!(registry.len(), 1);
    }
}
