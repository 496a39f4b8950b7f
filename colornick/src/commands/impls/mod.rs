use bevy::prelude::*;

use crate::{
    entities::player::Player,
    lang::Lang,
    palette::NickColor,
    registry::{NickColorChangedMessage, NickColorRegistry},
};

use super::{CommandSender, SendCommandMessageMessage};

mod colornick;
mod help;
mod setcolornick;
mod unlockcolornick;

/// The shared tail of `colornick <player> <color>` and `setcolornick`.
///
/// Callers have already checked that the sender is allowed here, so the
/// assignment is recorded as operator-locked. Feedback goes to the sender
/// and, when the target is someone else's nick, to the target too.
fn apply_color_command(
    sender: CommandSender,
    target_name: &str,
    token: &str,
    q_players: &Query<(Entity, &Player)>,
    registry: &mut NickColorRegistry,
    lang: &Lang,
    evw_color_changed: &mut MessageWriter<NickColorChangedMessage>,
    evw_send_message: &mut MessageWriter<SendCommandMessageMessage>,
) {
    let Some((target_entity, target)) = q_players.iter().find(|(_, player)| player.name() == target_name) else {
        sender.write(lang.message("player-not-found"), evw_send_message);
        return;
    };

    if token.eq_ignore_ascii_case("reset") {
        registry.clear_color(target.id());
        evw_color_changed.write(NickColorChangedMessage {
            id: target.id(),
            color: None,
        });

        sender.write(lang.message("color-reset").replace("%player%", target.name()), evw_send_message);
        evw_send_message.write(SendCommandMessageMessage {
            to: target_entity,
            message: lang.message("your-color-reset").to_owned(),
        });
        return;
    }

    let Some(color) = NickColor::from_token(token) else {
        sender.write(lang.message("invalid-color"), evw_send_message);
        return;
    };

    registry.set_color(target.id(), color, true);
    evw_color_changed.write(NickColorChangedMessage {
        id: target.id(),
        color: Some(color),
    });

    let label = lang.message(color.lang_key());
    sender.write(
        lang.message("color-set").replace("%player%", target.name()).replace("%color%", label),
        evw_send_message,
    );
    evw_send_message.write(SendCommandMessageMessage {
        to: target_entity,
        message: lang.message("your-color-changed").replace("%color%", label),
    });
}

pub(super) fn register(app: &mut App) {
    colornick::register(app);
    setcolornick::register(app);
    unlockcolornick::register(app);
    help::register(app);
}
