//! Used to get human-readable & localized text for the plugin's messages.
//!
//! Language tables are flat `key=value` files. Two tables ship with the
//! plugin and are written to the data folder on first run so server owners
//! can edit them or add their own.

use std::{fs, path::Path};

use bevy::{platform::collections::HashMap, prelude::*};

use crate::settings::ColorNickSettings;

/// The language tables bundled with the plugin, seeded to disk when missing
const BUNDLED_TABLES: [(&str, &str); 2] = [
    ("en_us", include_str!("../../assets/lang/en_us.lang")),
    ("ru_ru", include_str!("../../assets/lang/ru_ru.lang")),
];

#[derive(Resource, Debug, Default)]
/// The active language table.
///
/// Lookup never fails: a key with no translation is returned as-is, which
/// also makes missing entries easy to spot in game.
pub struct Lang {
    contents: HashMap<String, String>,
}

fn load_data(contents: &str, source: &str, map: &mut HashMap<String, String>) {
    for line in contents.split('\n').map(|x| x.trim()).filter(|x| !x.is_empty() && !x.starts_with('#')) {
        let Some((key, value)) = line.split_once('=') else {
            warn!("Invalid line in lang file {source} (missing = sign) - {line}");
            continue;
        };

        if !map.contains_key(key) {
            map.insert(key.to_owned(), value.to_owned());
        }
    }
}

fn seed_bundled_tables(folder: &Path) {
    for (name, contents) in BUNDLED_TABLES {
        let path = folder.join(format!("{name}.lang"));
        if path.exists() {
            continue;
        }

        if let Err(e) = fs::create_dir_all(folder).and_then(|()| fs::write(&path, contents)) {
            error!("Could not write bundled lang file {} - {e}", path.display());
        }
    }
}

impl Lang {
    /// Loads the table for the configured language from the data folder,
    /// seeding the bundled tables first if this is the first run.
    ///
    /// A table that cannot be read yields an empty `Lang`, which degrades to
    /// showing raw message keys rather than failing.
    pub fn load(settings: &ColorNickSettings) -> Self {
        let folder = settings.lang_folder();
        seed_bundled_tables(&folder);

        let path = folder.join(format!("{}.lang", settings.language));
        let mut contents = HashMap::new();

        match fs::read_to_string(&path) {
            Ok(data) => load_data(&data, &path.display().to_string(), &mut contents),
            Err(e) => error!("Could not read lang file {} - {e}", path.display()),
        }

        Self { contents }
    }

    /// Gets the text for this message key, or the key itself if no
    /// translation is loaded
    pub fn message<'a>(&'a self, key: &'a str) -> &'a str {
        self.contents.get(key).map(String::as_str).unwrap_or(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang_from(contents: &str) -> Lang {
        let mut map = HashMap::new();
        load_data(contents, "test", &mut map);
        Lang { contents: map }
    }

    #[test]
    fn parses_key_value_lines() {
        let lang = lang_from("# a comment\n\ngui-title=Choose Nick Color\ncolor-red=Red\n");

        assert_eq!(lang.message("gui-title"), "Choose Nick Color");
        assert_eq!(lang.message("color-red"), "Red");
    }

    #[test]
    fn first_occurrence_of_a_key_wins() {
        let lang = lang_from("color-red=Red\ncolor-red=Crimson\n");

        assert_eq!(lang.message("color-red"), "Red");
    }

    #[test]
    fn values_may_contain_equals_signs() {
        let lang = lang_from("usage-command=Usage: /colornick <player> <color>=token\n");

        assert_eq!(lang.message("usage-command"), "Usage: /colornick <player> <color>=token");
    }

    #[test]
    fn missing_keys_fall_back_to_the_key() {
        let lang = lang_from("");

        assert_eq!(lang.message("no-permission"), "no-permission");
    }

    #[test]
    fn bundled_tables_agree_on_their_keys() {
        let mut en = HashMap::new();
        let mut ru = HashMap::new();
        load_data(BUNDLED_TABLES[0].1, "en_us", &mut en);
        load_data(BUNDLED_TABLES[1].1, "ru_ru", &mut ru);

        let mut en_keys = en.keys().collect::<Vec<_>>();
        let mut ru_keys = ru.keys().collect::<Vec<_>>();
        en_keys.sort();
        ru_keys.sort();

        assert_eq!(en_keys, ru_keys);
    }
}
