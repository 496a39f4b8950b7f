//! Settings for the plugin, read from `config.toml` in the data folder

use std::{
    fs,
    path::{Path, PathBuf},
};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
struct SettingsSerialized {
    language: String,
}

impl Default for SettingsSerialized {
    fn default() -> Self {
        Self {
            language: "en_us".to_owned(),
        }
    }
}

#[derive(Resource, Debug, Clone)]
/// Settings for the plugin, loaded once when it is built
pub struct ColorNickSettings {
    /// Which bundled (or user-provided) language table to use
    pub language: String,

    data_folder: PathBuf,
}

impl ColorNickSettings {
    /// Reads the plugin settings from `config.toml` under `data_folder`.
    ///
    /// A missing file means first run: the default config is written out so
    /// the server owner has something to edit. A file that fails to parse is
    /// reported and replaced with defaults in memory (the file is left
    /// alone).
    pub fn load(data_folder: &Path) -> Self {
        let path = data_folder.join("config.toml");

        let serialized = match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str::<SettingsSerialized>(&contents).unwrap_or_else(|e| {
                warn!("Could not parse {} - using defaults ({e})", path.display());
                SettingsSerialized::default()
            }),
            Err(_) => {
                let defaults = SettingsSerialized::default();

                if let Err(e) = fs::create_dir_all(data_folder)
                    .and_then(|()| fs::write(&path, toml::to_string(&defaults).expect("default settings always serialize")))
                {
                    error!("Could not write the default {} - {e}", path.display());
                }

                defaults
            }
        };

        Self {
            language: serialized.language,
            data_folder: data_folder.to_owned(),
        }
    }

    /// The folder all of this plugin's files live in
    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    /// Where color assignments are persisted
    pub fn colors_file(&self) -> PathBuf {
        self.data_folder.join("colors.toml")
    }

    /// Where the language tables live
    pub fn lang_folder(&self) -> PathBuf {
        self.data_folder.join("lang")
    }
}
