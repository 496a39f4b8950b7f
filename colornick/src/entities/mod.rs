//! Contains the entities the host server shares with this plugin

pub mod player;
