//! Keeps the presentation layer in step with the registry.
//!
//! Each palette color has one team grouping (used by the host to tint name
//! tags and the tab list) and every connected player carries a
//! [`DisplayName`] with their chat color baked in. Memberships are keyed by
//! player name, scoreboard-style, so they are re-derived from the registry
//! when a player joins.

use bevy::{
    platform::collections::{HashMap, HashSet},
    prelude::*,
};
use derive_more::{Deref, Display};

use crate::{
    commands::ProcessCommandsSet,
    entities::player::Player,
    palette::NickColor,
    registry::{NickColorChangedMessage, NickColorRegistry},
};

#[derive(Component, Debug, Display, Deref, Clone, PartialEq, Eq)]
/// The name the host should show for this player in chat and on name tags
pub struct DisplayName(String);

impl DisplayName {
    /// A display name tinted with this color's chat code
    pub fn colored(name: &str, color: NickColor) -> Self {
        Self(format!("{}{}", color.chat_code(), name))
    }

    /// An untinted display name
    pub fn plain(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// The formatted name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Resource, Default, Debug)]
/// Membership of the per-color team groupings.
///
/// A player name is in at most one grouping at a time - [`Self::assign`]
/// removes them from every other team before adding them to the new one.
pub struct ColorTeams {
    members: HashMap<NickColor, HashSet<String>>,
}

impl ColorTeams {
    /// Moves this player into `color`'s team, leaving whatever team they were
    /// in before
    pub fn assign(&mut self, name: &str, color: NickColor) {
        for (team_color, members) in self.members.iter_mut() {
            if *team_color != color {
                members.remove(name);
            }
        }

        self.members.entry(color).or_default().insert(name.to_owned());
    }

    /// Removes this player from every color team
    pub fn remove_all(&mut self, name: &str) {
        for members in self.members.values_mut() {
            members.remove(name);
        }
    }

    /// The team this player is currently grouped under, if any
    pub fn team_of(&self, name: &str) -> Option<NickColor> {
        self.members
            .iter()
            .find(|(_, members)| members.contains(name))
            .map(|(team_color, _)| *team_color)
    }

    /// Everyone grouped under this color
    pub fn members(&self, color: NickColor) -> impl Iterator<Item = &str> {
        self.members.get(&color).into_iter().flatten().map(String::as_str)
    }
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
/// Where the registry-to-presentation sync happens within [`Update`]
pub enum ColorTeamsSet {
    /// Applies registry changes to team memberships and display names
    Sync,
}

fn apply_colors_on_join(
    q_joined: Query<(Entity, &Player), Added<Player>>,
    registry: Res<NickColorRegistry>,
    mut teams: ResMut<ColorTeams>,
    mut commands: Commands,
) {
    for (entity, player) in q_joined.iter() {
        match registry.color_of(player.id()) {
            Some(color) => {
                teams.assign(player.name(), color);
                commands.entity(entity).insert(DisplayName::colored(player.name(), color));
            }
            None => {
                commands.entity(entity).insert(DisplayName::plain(player.name()));
            }
        }
    }
}

fn sync_color_teams(
    mut evr_color_changed: MessageReader<NickColorChangedMessage>,
    q_players: Query<(Entity, &Player)>,
    mut teams: ResMut<ColorTeams>,
    mut commands: Commands,
) {
    for ev in evr_color_changed.read() {
        // Presentation only matters for connected players - anyone offline
        // gets re-applied from the registry when they join.
        let Some((entity, player)) = q_players.iter().find(|(_, player)| player.id() == ev.id) else {
            continue;
        };

        match ev.color {
            Some(color) => {
                teams.assign(player.name(), color);
                commands.entity(entity).insert(DisplayName::colored(player.name(), color));
            }
            None => {
                teams.remove_all(player.name());
                commands.entity(entity).insert(DisplayName::plain(player.name()));
            }
        }
    }
}

pub(super) fn register(app: &mut App) {
    app.init_resource::<ColorTeams>();

    app.configure_sets(Update, ColorTeamsSet::Sync.after(ProcessCommandsSet::HandleCommands));

    app.add_systems(Update, (apply_colors_on_join, sync_color_teams).chain().in_set(ColorTeamsSet::Sync));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_moves_between_teams() {
        let mut teams = ColorTeams::default();

        teams.assign("Steve", NickColor::Red);
        assert_eq!(teams.team_of("Steve"), Some(NickColor::Red));

        teams.assign("Steve", NickColor::Blue);
        assert_eq!(teams.team_of("Steve"), Some(NickColor::Blue));
        assert_eq!(teams.members(NickColor::Red).count(), 0);
        assert_eq!(teams.members(NickColor::Blue).count(), 1);
    }

    #[test]
    fn remove_all_clears_membership() {
        let mut teams = ColorTeams::default();

        teams.assign("Steve", NickColor::Gray);
        teams.remove_all("Steve");
        assert_eq!(teams.team_of("Steve"), None);

        // removing again is fine
        teams.remove_all("Steve");
        assert_eq!(teams.team_of("Steve"), None);
    }

    #[test]
    fn display_names_carry_the_chat_code() {
        assert_eq!(DisplayName::colored("Steve", NickColor::Red).as_str(), "\u{00A7}cSteve");
        assert_eq!(DisplayName::plain("Steve").as_str(), "Steve");
    }
}
