use bevy::prelude::*;

use crate::{
    commands::{
        ArgumentError, ColorCommandSent, ColorCommandType, CommandMessage, CommandSender, Operator, ProcessCommandsSet,
        SendCommandMessageMessage, ServerCommand, create_color_command,
    },
    entities::player::Player,
    lang::Lang,
    menu::OpenColorMenuMessage,
    registry::{NickColorChangedMessage, NickColorRegistry},
};

use super::apply_color_command;

struct ColorNickCommand {
    args: Vec<String>,
}

impl ColorCommandType for ColorNickCommand {
    fn from_input(ev: &ColorCommandSent) -> Result<Self, ArgumentError> {
        // Which form this is (open the menu vs. set a player's color)
        // depends on who sent it, so shape checking happens in the handler.
        Ok(Self { args: ev.args.clone() })
    }
}

fn handle_colornick(
    mut evr_command: MessageReader<CommandMessage<ColorNickCommand>>,
    q_operator: Query<&Operator>,
    q_players: Query<(Entity, &Player)>,
    mut registry: ResMut<NickColorRegistry>,
    lang: Res<Lang>,
    mut evw_open_menu: MessageWriter<OpenColorMenuMessage>,
    mut evw_color_changed: MessageWriter<NickColorChangedMessage>,
    mut evw_send_message: MessageWriter<SendCommandMessageMessage>,
) {
    for ev in evr_command.read() {
        let is_operator = ev.sender.is_operator(&q_operator);

        if !ev.command.args.is_empty() && is_operator {
            // Operator / console form: colornick <player> <color|reset>
            if ev.command.args.len() < 2 {
                ev.sender.write(
                    format!("{}\n{}", lang.message("usage-command"), lang.message("available-colors")),
                    &mut evw_send_message,
                );
                continue;
            }

            apply_color_command(
                ev.sender,
                &ev.command.args[0],
                &ev.command.args[1],
                &q_players,
                &mut registry,
                &lang,
                &mut evw_color_changed,
                &mut evw_send_message,
            );
            continue;
        }

        // Self-service form: open the selection menu
        let CommandSender::Player(entity) = ev.sender else {
            ev.sender.write(lang.message("console-only-players"), &mut evw_send_message);
            continue;
        };

        let Ok((_, player)) = q_players.get(entity) else {
            continue;
        };

        if registry.is_locked(player.id()) && !is_operator {
            ev.sender.write(lang.message("color-locked-by-admin"), &mut evw_send_message);
            continue;
        }

        evw_open_menu.write(OpenColorMenuMessage { player: entity });
    }
}

pub(super) fn register(app: &mut App) {
    create_color_command::<ColorNickCommand>(
        ServerCommand::new(
            "colornick",
            "[player] [color|reset]",
            "Opens the color picker, or sets a player's nickname color (operators).",
        ),
        app,
    );

    app.add_systems(Update, handle_colornick.in_set(ProcessCommandsSet::HandleCommands));
}
