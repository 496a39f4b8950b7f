//! The 9-slot color selection menu.
//!
//! The plugin owns the menu's contents and its click semantics; actually
//! drawing an inventory grid is the host's job. The host shows
//! [`ColorMenu`] when it sees an [`OpenColorMenuMessage`] and reports
//! clicks back as [`ColorMenuClickMessage`]s.

use bevy::prelude::*;

use crate::{
    commands::{Operator, ProcessCommandsSet, SendCommandMessageMessage},
    entities::player::Player,
    lang::Lang,
    palette::{NickColor, PALETTE},
    registry::{NickColorChangedMessage, NickColorRegistry},
};

#[derive(Debug, Clone)]
/// One selectable swatch in the menu
pub struct MenuSlot {
    /// The color this slot assigns
    pub color: NickColor,
    /// The block the host should render in this slot
    pub swatch: &'static str,
    /// The slot's label, localized and tinted with the color's chat code
    pub label: String,
}

#[derive(Resource, Debug, Clone)]
/// The selection menu, one slot per palette color
pub struct ColorMenu {
    title: String,
    slots: Vec<MenuSlot>,
}

impl ColorMenu {
    /// Builds the menu from the palette table and the active language
    pub fn from_lang(lang: &Lang) -> Self {
        Self {
            title: lang.message("gui-title").to_owned(),
            slots: PALETTE
                .iter()
                .map(|entry| MenuSlot {
                    color: entry.color,
                    swatch: entry.swatch,
                    label: format!("{}{}", entry.chat_code, lang.message(entry.lang_key)),
                })
                .collect(),
        }
    }

    /// The menu's window title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Every slot, in display order
    pub fn slots(&self) -> &[MenuSlot] {
        &self.slots
    }

    /// A single slot, if `slot` is within the menu
    pub fn slot(&self, slot: usize) -> Option<&MenuSlot> {
        self.slots.get(slot)
    }
}

#[derive(Message, Debug, Clone, Copy)]
/// Tells the host to show the color menu to this player
pub struct OpenColorMenuMessage {
    /// Who should see the menu
    pub player: Entity,
}

#[derive(Message, Debug, Clone, Copy)]
/// Sent by the host when a player clicks a menu slot
pub struct ColorMenuClickMessage {
    /// Who clicked
    pub player: Entity,
    /// The clicked slot index
    pub slot: usize,
}

#[derive(Message, Debug, Clone, Copy)]
/// Tells the host to close the menu it is showing this player
pub struct CloseColorMenuMessage {
    /// Whose menu to close
    pub player: Entity,
}

fn handle_menu_clicks(
    mut evr_click: MessageReader<ColorMenuClickMessage>,
    q_players: Query<&Player>,
    q_operator: Query<&Operator>,
    mut registry: ResMut<NickColorRegistry>,
    lang: Res<Lang>,
    mut evw_color_changed: MessageWriter<NickColorChangedMessage>,
    mut evw_send_message: MessageWriter<SendCommandMessageMessage>,
    mut evw_close: MessageWriter<CloseColorMenuMessage>,
) {
    for ev in evr_click.read() {
        // Clicks outside the palette slots do nothing
        let Some(color) = NickColor::from_slot(ev.slot) else {
            continue;
        };

        let Ok(player) = q_players.get(ev.player) else {
            continue;
        };

        // An operator can have locked this color while the menu was open
        if registry.is_locked(player.id()) && !q_operator.contains(ev.player) {
            evw_send_message.write(SendCommandMessageMessage {
                to: ev.player,
                message: lang.message("color-locked-by-admin").to_owned(),
            });
            continue;
        }

        registry.set_color(player.id(), color, false);
        evw_color_changed.write(NickColorChangedMessage {
            id: player.id(),
            color: Some(color),
        });

        evw_send_message.write(SendCommandMessageMessage {
            to: ev.player,
            message: lang
                .message("your-color-changed")
                .replace("%color%", lang.message(color.lang_key())),
        });

        evw_close.write(CloseColorMenuMessage { player: ev.player });
    }
}

pub(super) fn register(app: &mut App) {
    app.add_message::<OpenColorMenuMessage>()
        .add_message::<ColorMenuClickMessage>()
        .add_message::<CloseColorMenuMessage>();

    app.add_systems(Update, handle_menu_clicks.in_set(ProcessCommandsSet::HandleCommands));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_slots_follow_the_palette() {
        let menu = ColorMenu::from_lang(&Lang::default());

        assert_eq!(menu.slots().len(), PALETTE.len());

        for (slot, entry) in PALETTE.iter().enumerate() {
            let menu_slot = menu.slot(slot).unwrap();
            assert_eq!(menu_slot.color, entry.color);
            assert_eq!(menu_slot.swatch, entry.swatch);
        }

        assert!(menu.slot(PALETTE.len()).is_none());
    }

    #[test]
    fn labels_fall_back_to_lang_keys() {
        // No translations loaded, so the label is the chat code + the key
        let menu = ColorMenu::from_lang(&Lang::default());

        assert_eq!(menu.slot(0).unwrap().label, "\u{00A7}ccolor-red");
        assert_eq!(menu.title(), "gui-title");
    }
}
