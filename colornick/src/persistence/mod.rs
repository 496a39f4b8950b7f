//! Loads and saves the color assignment table.
//!
//! On-disk shape is a flat table in `colors.toml`: one `"<uuid>" = "<color>"`
//! entry per player, with a sibling `"<uuid>_admin" = true` entry when the
//! color is operator-locked. The whole table is rewritten on every save, so
//! the file always mirrors the registry exactly.

use std::fs;

use anyhow::Context;
use bevy::{platform::collections::HashMap, prelude::*};
use uuid::Uuid;

use crate::{
    palette::NickColor,
    registry::{ColorAssignment, NickColorChangedMessage, NickColorRegistry},
    settings::ColorNickSettings,
};

const ADMIN_KEY_SUFFIX: &str = "_admin";

#[derive(Message, Debug, Default)]
/// Host request to write the color table to disk right now, regardless of
/// whether anything changed
pub struct FlushNickColorsMessage;

/// Decodes a persisted color table.
///
/// Records that fail to parse (unknown color token, malformed id, wrong
/// value type) are dropped with a warning; one bad line never takes the rest
/// of the table with it.
fn assignments_from_table(table: &toml::Table) -> HashMap<Uuid, ColorAssignment> {
    let mut assignments = HashMap::new();

    for (key, value) in table.iter() {
        if key.ends_with(ADMIN_KEY_SUFFIX) {
            // Lock flags are picked up alongside their color entry
            continue;
        }

        let Ok(id) = Uuid::parse_str(key) else {
            warn!("Invalid player id in colors file: {key}");
            continue;
        };

        let Some(token) = value.as_str() else {
            warn!("Invalid color for player {key}: {value}");
            continue;
        };

        let Some(color) = NickColor::from_token(token) else {
            warn!("Invalid color for player {key}: {token}");
            continue;
        };

        let locked = table
            .get(&format!("{key}{ADMIN_KEY_SUFFIX}"))
            .and_then(|flag| flag.as_bool())
            .unwrap_or(false);

        assignments.insert(id, ColorAssignment { color, locked });
    }

    assignments
}

/// Encodes the registry into the persisted table shape
fn table_from_registry(registry: &NickColorRegistry) -> toml::Table {
    let mut table = toml::Table::new();

    for (id, assignment) in registry.iter() {
        table.insert(id.to_string(), toml::Value::String(assignment.color.token().to_owned()));
        table.insert(format!("{id}{ADMIN_KEY_SUFFIX}"), toml::Value::Boolean(assignment.locked));
    }

    table
}

fn write_colors(registry: &NickColorRegistry, settings: &ColorNickSettings) -> anyhow::Result<()> {
    fs::create_dir_all(settings.data_folder()).context("creating the plugin data folder")?;

    let serialized = toml::to_string(&table_from_registry(registry)).context("serializing color assignments")?;
    fs::write(settings.colors_file(), serialized).context("writing the colors file")?;

    Ok(())
}

fn load_colors(
    mut registry: ResMut<NickColorRegistry>,
    settings: Res<ColorNickSettings>,
    mut evw_color_changed: MessageWriter<NickColorChangedMessage>,
) {
    let path = settings.colors_file();

    // Nothing saved yet is the normal first run
    let Ok(contents) = fs::read_to_string(&path) else {
        return;
    };

    let table = match contents.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => {
            error!("Could not parse {} - {e}", path.display());
            return;
        }
    };

    registry.replace_all(assignments_from_table(&table));
    info!("Loaded {} color assignment(s)", registry.len());

    // Re-apply the loaded colors to anyone already connected
    evw_color_changed.write_batch(registry.iter().map(|(id, assignment)| NickColorChangedMessage {
        id: *id,
        color: Some(assignment.color),
    }));
}

fn save_colors(registry: Res<NickColorRegistry>, settings: Res<ColorNickSettings>) {
    if let Err(e) = write_colors(&registry, &settings) {
        error!("Could not save {} - {e:#}", settings.colors_file().display());
    }
}

fn flush_colors(
    mut evr_flush: MessageReader<FlushNickColorsMessage>,
    registry: Res<NickColorRegistry>,
    settings: Res<ColorNickSettings>,
) {
    if evr_flush.is_empty() {
        return;
    }
    evr_flush.clear();

    save_colors(registry, settings);
}

pub(super) fn register(app: &mut App) {
    app.add_message::<FlushNickColorsMessage>();

    app.add_systems(Startup, load_colors);

    app.add_systems(
        Last,
        (save_colors.run_if(resource_exists_and_changed::<NickColorRegistry>), flush_colors),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steve() -> Uuid {
        Uuid::from_u128(0xA1CE)
    }

    #[test]
    fn round_trips_colors_and_lock_flags() {
        let mut registry = NickColorRegistry::default();
        registry.set_color(steve(), NickColor::Red, true);
        registry.set_color(Uuid::from_u128(0xB0B), NickColor::LightPurple, false);

        let serialized = toml::to_string(&table_from_registry(&registry)).unwrap();
        let reloaded = assignments_from_table(&serialized.parse::<toml::Table>().unwrap());

        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded[&steve()], ColorAssignment {
            color: NickColor::Red,
            locked: true,
        });
        assert_eq!(reloaded[&Uuid::from_u128(0xB0B)], ColorAssignment {
            color: NickColor::LightPurple,
            locked: false,
        });
    }

    #[test]
    fn bad_records_are_dropped_not_fatal() {
        let steve = steve();
        let table = format!(
            "\"{steve}\" = \"red\"\n\
             \"not-a-uuid\" = \"blue\"\n\
             \"{teal}\" = \"teal\"\n\
             \"{number}\" = 7\n",
            teal = Uuid::from_u128(0xBAD),
            number = Uuid::from_u128(0xBAD2),
        )
        .parse::<toml::Table>()
        .unwrap();

        let assignments = assignments_from_table(&table);

        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[&steve].color, NickColor::Red);
    }

    #[test]
    fn missing_admin_key_defaults_to_unlocked() {
        let steve = steve();
        let table = format!("\"{steve}\" = \"gold\"\n").parse::<toml::Table>().unwrap();

        let assignments = assignments_from_table(&table);

        assert!(!assignments[&steve].locked);
    }

    #[test]
    fn admin_key_with_the_wrong_type_defaults_to_unlocked() {
        let steve = steve();
        let table = format!("\"{steve}\" = \"gold\"\n\"{steve}_admin\" = \"yes\"\n")
            .parse::<toml::Table>()
            .unwrap();

        let assignments = assignments_from_table(&table);

        assert!(!assignments[&steve].locked);
    }
}
