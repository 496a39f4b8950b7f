//! Nickname colors for bevy-based game servers.
//!
//! Players pick a chat/nickname color from a fixed palette (via the
//! `colornick` command and its selection menu), operators can assign and
//! lock colors (`setcolornick`, `unlockcolornick`), and choices persist
//! across restarts in the plugin's data folder.
//!
//! The host server is expected to:
//! - spawn an entity with [`entities::player::Player`] when a client joins
//!   (and tag operators with [`commands::Operator`]),
//! - forward chat lines as [`chat::ChatMessageReceived`] and console
//!   commands as [`commands::ColorCommandSent`],
//! - render [`menu::ColorMenu`] when asked to via
//!   [`menu::OpenColorMenuMessage`] and report clicks back as
//!   [`menu::ColorMenuClickMessage`],
//! - deliver [`commands::SendCommandMessageMessage`] and
//!   [`chat::ServerSendChatMessage`] to clients, and tint name tags from
//!   [`teams::ColorTeams`] / [`teams::DisplayName`].

pub mod chat;
pub mod commands;
pub mod entities;
pub mod lang;
pub mod menu;
pub mod palette;
pub mod persistence;
pub mod registry;
pub mod settings;
pub mod teams;

use std::path::PathBuf;

use bevy::prelude::{App, Plugin};

use crate::{lang::Lang, menu::ColorMenu, settings::ColorNickSettings};

/// The plugin. Add it to the server's [`App`]:
///
/// ```no_run
/// use bevy::prelude::*;
/// use colornick::ColorNickPlugin;
///
/// App::new().add_plugins(ColorNickPlugin::default());
/// ```
pub struct ColorNickPlugin {
    /// Where this plugin keeps its config, language tables and color
    /// assignments
    pub data_folder: PathBuf,
}

impl Default for ColorNickPlugin {
    fn default() -> Self {
        Self {
            data_folder: PathBuf::from("colornick"),
        }
    }
}

impl Plugin for ColorNickPlugin {
    fn build(&self, app: &mut App) {
        // Config and the language table are read once, up front, so every
        // system can assume they exist.
        let settings = ColorNickSettings::load(&self.data_folder);
        let lang = Lang::load(&settings);

        app.insert_resource(ColorMenu::from_lang(&lang));
        app.insert_resource(lang);
        app.insert_resource(settings);

        registry::register(app);
        commands::register(app);
        teams::register(app);
        menu::register(app);
        chat::register(app);
        persistence::register(app);
    }
}
