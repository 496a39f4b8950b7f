use bevy::prelude::*;

use crate::{
    commands::{
        ArgumentError, ColorCommandSent, ColorCommandType, CommandMessage, Operator, ProcessCommandsSet,
        SendCommandMessageMessage, ServerCommand, create_color_command,
    },
    entities::player::Player,
    lang::Lang,
    registry::{NickColorRegistry, UnlockOutcome},
};

struct UnlockColorNickCommand {
    target: String,
}

impl ColorCommandType for UnlockColorNickCommand {
    fn from_input(ev: &ColorCommandSent) -> Result<Self, ArgumentError> {
        if ev.args.is_empty() {
            return Err(ArgumentError::TooFewArguments);
        }
        if ev.args.len() > 1 {
            return Err(ArgumentError::TooManyArguments);
        }

        Ok(Self {
            target: ev.args[0].clone(),
        })
    }
}

fn handle_unlockcolornick(
    mut evr_command: MessageReader<CommandMessage<UnlockColorNickCommand>>,
    q_operator: Query<&Operator>,
    q_players: Query<(Entity, &Player)>,
    mut registry: ResMut<NickColorRegistry>,
    lang: Res<Lang>,
    mut evw_send_message: MessageWriter<SendCommandMessageMessage>,
) {
    for ev in evr_command.read() {
        if !ev.sender.is_operator(&q_operator) {
            ev.sender.write(lang.message("no-permission"), &mut evw_send_message);
            continue;
        }

        let Some((target_entity, target)) = q_players.iter().find(|(_, player)| player.name() == ev.command.target)
        else {
            ev.sender.write(lang.message("player-not-found"), &mut evw_send_message);
            continue;
        };

        match registry.unlock(target.id()) {
            UnlockOutcome::Unlocked => {
                ev.sender
                    .write(lang.message("color-unlocked").replace("%player%", target.name()), &mut evw_send_message);
                evw_send_message.write(SendCommandMessageMessage {
                    to: target_entity,
                    message: lang.message("your-color-unlocked").to_owned(),
                });
            }
            UnlockOutcome::AlreadyUnlocked => {
                ev.sender.write(
                    lang.message("color-not-locked").replace("%player%", target.name()),
                    &mut evw_send_message,
                );
            }
        }
    }
}

pub(super) fn register(app: &mut App) {
    create_color_command::<UnlockColorNickCommand>(
        ServerCommand::new(
            "unlockcolornick",
            "[player]",
            "Lets a player change their own nickname color again.",
        ),
        app,
    );

    app.add_systems(Update, handle_unlockcolornick.in_set(ProcessCommandsSet::HandleCommands));
}

#[cfg(test)]
mod tests {
    use crate::commands::CommandSender;

    use super::*;

    #[test]
    fn requires_exactly_one_argument() {
        let too_few = ColorCommandSent::new("unlockcolornick".into(), CommandSender::Server);
        assert_eq!(
            UnlockColorNickCommand::from_input(&too_few).err(),
            Some(ArgumentError::TooFewArguments)
        );

        let too_many = ColorCommandSent::new("unlockcolornick Steve Alex".into(), CommandSender::Server);
        assert_eq!(
            UnlockColorNickCommand::from_input(&too_many).err(),
            Some(ArgumentError::TooManyArguments)
        );

        assert!(
            UnlockColorNickCommand::from_input(&ColorCommandSent::new(
                "unlockcolornick Steve".into(),
                CommandSender::Server
            ))
            .is_ok()
        );
    }
}
