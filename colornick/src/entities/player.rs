//! Represents a player
//!
//! The host server spawns an entity with this component when a client joins
//! and despawns it when they leave. Color assignments are keyed by the
//! account id, so they survive disconnects and server restarts.

use bevy::prelude::Component;
use uuid::Uuid;

#[derive(Component, Debug)]
/// Represents a connected player
pub struct Player {
    name: String,
    id: Uuid,
}

impl Player {
    /// Creates a player
    ///
    /// * `id` The stable, per-account unique identifier for this player
    pub fn new(name: String, id: Uuid) -> Self {
        Self { name, id }
    }

    /// Gets the player's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the stable account id for this player
    pub fn id(&self) -> Uuid {
        self.id
    }
}
