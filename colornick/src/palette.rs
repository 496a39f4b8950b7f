//! The fixed set of nickname colors and everything the rest of the plugin
//! needs to know about each of them.
//!
//! Every color-keyed lookup (menu slots, team names, chat codes, swatch
//! blocks, localization keys) goes through the one [`PALETTE`] table so the
//! enumeration only exists in one place.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// A color a player can give their nickname
pub enum NickColor {
    /// Red (`§c`)
    Red,
    /// Blue (`§9`)
    Blue,
    /// Green (`§a`)
    Green,
    /// Yellow (`§e`)
    Yellow,
    /// Aqua (`§b`)
    Aqua,
    /// Light purple (`§d`)
    LightPurple,
    /// Gold (`§6`)
    Gold,
    /// Gray (`§7`)
    Gray,
    /// White (`§f`)
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Everything derived from a palette color.
///
/// One entry per [`NickColor`], in menu-slot order.
pub struct PaletteEntry {
    /// The color this entry describes
    pub color: NickColor,
    /// The token users type in commands (also the persisted form)
    pub token: &'static str,
    /// Localization key for the color's display label
    pub lang_key: &'static str,
    /// Block shown as this color's swatch in the selection menu
    pub swatch: &'static str,
    /// Name of the team grouping used to tint name tags
    pub team_name: &'static str,
    /// Legacy chat formatting code
    pub chat_code: &'static str,
    rgb: (u8, u8, u8),
}

impl PaletteEntry {
    /// The sRGB value used to tint name tags in this color's team
    pub fn tint(&self) -> Color {
        Color::srgb_u8(self.rgb.0, self.rgb.1, self.rgb.2)
    }
}

/// The full palette, in menu-slot order.
///
/// The swatch blocks are not all the matching wool color on purpose: aqua,
/// light purple and gold have no wool of their own, so the closest dye
/// (cyan, magenta, orange) stands in for them.
pub const PALETTE: [PaletteEntry; 9] = [
    PaletteEntry {
        color: NickColor::Red,
        token: "red",
        lang_key: "color-red",
        swatch: "red_wool",
        team_name: "colornick_red",
        chat_code: "\u{00A7}c",
        rgb: (255, 85, 85),
    },
    PaletteEntry {
        color: NickColor::Blue,
        token: "blue",
        lang_key: "color-blue",
        swatch: "blue_wool",
        team_name: "colornick_blue",
        chat_code: "\u{00A7}9",
        rgb: (85, 85, 255),
    },
    PaletteEntry {
        color: NickColor::Green,
        token: "green",
        lang_key: "color-green",
        swatch: "green_wool",
        team_name: "colornick_green",
        chat_code: "\u{00A7}a",
        rgb: (85, 255, 85),
    },
    PaletteEntry {
        color: NickColor::Yellow,
        token: "yellow",
        lang_key: "color-yellow",
        swatch: "yellow_wool",
        team_name: "colornick_yellow",
        chat_code: "\u{00A7}e",
        rgb: (255, 255, 85),
    },
    PaletteEntry {
        color: NickColor::Aqua,
        token: "aqua",
        lang_key: "color-aqua",
        swatch: "cyan_wool",
        team_name: "colornick_aqua",
        chat_code: "\u{00A7}b",
        rgb: (85, 255, 255),
    },
    PaletteEntry {
        color: NickColor::LightPurple,
        token: "light_purple",
        lang_key: "color-light_purple",
        swatch: "magenta_wool",
        team_name: "colornick_light_purple",
        chat_code: "\u{00A7}d",
        rgb: (255, 85, 255),
    },
    PaletteEntry {
        color: NickColor::Gold,
        token: "gold",
        lang_key: "color-gold",
        swatch: "orange_wool",
        team_name: "colornick_gold",
        chat_code: "\u{00A7}6",
        rgb: (255, 170, 0),
    },
    PaletteEntry {
        color: NickColor::Gray,
        token: "gray",
        lang_key: "color-gray",
        swatch: "gray_wool",
        team_name: "colornick_gray",
        chat_code: "\u{00A7}7",
        rgb: (170, 170, 170),
    },
    PaletteEntry {
        color: NickColor::White,
        token: "white",
        lang_key: "color-white",
        swatch: "white_wool",
        team_name: "colornick_white",
        chat_code: "\u{00A7}f",
        rgb: (255, 255, 255),
    },
];

impl NickColor {
    /// Every palette color, in menu-slot order
    pub const ALL: [Self; 9] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Aqua,
        Self::LightPurple,
        Self::Gold,
        Self::Gray,
        Self::White,
    ];

    /// Parses a user-provided color token (case-insensitive).
    ///
    /// Returns [`None`] for anything outside the palette, including `reset`,
    /// which callers treat separately.
    pub fn from_token(token: &str) -> Option<Self> {
        PALETTE.iter().find(|entry| entry.token.eq_ignore_ascii_case(token)).map(|entry| entry.color)
    }

    /// The color shown in this menu slot, if the slot is within the palette
    pub fn from_slot(slot: usize) -> Option<Self> {
        PALETTE.get(slot).map(|entry| entry.color)
    }

    /// This color's slot in the selection menu
    pub fn slot(self) -> usize {
        self as usize
    }

    /// This color's [`PaletteEntry`]
    pub fn entry(self) -> &'static PaletteEntry {
        &PALETTE[self.slot()]
    }

    /// The token users type for this color
    pub fn token(self) -> &'static str {
        self.entry().token
    }

    /// Localization key for this color's display label
    pub fn lang_key(self) -> &'static str {
        self.entry().lang_key
    }

    /// The team grouping name for this color
    pub fn team_name(self) -> &'static str {
        self.entry().team_name
    }

    /// Legacy chat formatting code for this color
    pub fn chat_code(self) -> &'static str {
        self.entry().chat_code
    }
}

impl std::fmt::Display for NickColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_parse_case_insensitively() {
        assert_eq!(NickColor::from_token("red"), Some(NickColor::Red));
        assert_eq!(NickColor::from_token("RED"), Some(NickColor::Red));
        assert_eq!(NickColor::from_token("Light_Purple"), Some(NickColor::LightPurple));
        assert_eq!(NickColor::from_token("teal"), None);
        assert_eq!(NickColor::from_token("reset"), None);
    }

    #[test]
    fn slots_match_palette_order() {
        for (slot, color) in NickColor::ALL.iter().enumerate() {
            assert_eq!(color.slot(), slot);
            assert_eq!(NickColor::from_slot(slot), Some(*color));
            assert_eq!(PALETTE[slot].color, *color);
        }

        assert_eq!(NickColor::from_slot(9), None);
    }

    #[test]
    fn table_has_no_collisions() {
        for a in 0..PALETTE.len() {
            for b in (a + 1)..PALETTE.len() {
                assert_ne!(PALETTE[a].token, PALETTE[b].token);
                assert_ne!(PALETTE[a].team_name, PALETTE[b].team_name);
                assert_ne!(PALETTE[a].chat_code, PALETTE[b].chat_code);
            }
        }
    }

    #[test]
    fn team_names_share_the_plugin_namespace() {
        for entry in PALETTE.iter() {
            assert!(entry.team_name.starts_with("colornick_"));
            assert!(entry.team_name.ends_with(entry.token));
        }
    }
}
