use bevy::prelude::*;

use crate::{
    commands::{
        ArgumentError, ColorCommandSent, ColorCommandType, CommandMessage, Operator, ProcessCommandsSet,
        SendCommandMessageMessage, ServerCommand, create_color_command,
    },
    entities::player::Player,
    lang::Lang,
    registry::{NickColorChangedMessage, NickColorRegistry},
};

use super::apply_color_command;

struct SetColorNickCommand {
    target: String,
    token: String,
}

impl ColorCommandType for SetColorNickCommand {
    fn from_input(ev: &ColorCommandSent) -> Result<Self, ArgumentError> {
        if ev.args.len() < 2 {
            return Err(ArgumentError::TooFewArguments);
        }
        if ev.args.len() > 2 {
            return Err(ArgumentError::TooManyArguments);
        }

        Ok(Self {
            target: ev.args[0].clone(),
            token: ev.args[1].clone(),
        })
    }
}

fn handle_setcolornick(
    mut evr_command: MessageReader<CommandMessage<SetColorNickCommand>>,
    q_operator: Query<&Operator>,
    q_players: Query<(Entity, &Player)>,
    mut registry: ResMut<NickColorRegistry>,
    lang: Res<Lang>,
    mut evw_color_changed: MessageWriter<NickColorChangedMessage>,
    mut evw_send_message: MessageWriter<SendCommandMessageMessage>,
) {
    for ev in evr_command.read() {
        if !ev.sender.is_operator(&q_operator) {
            ev.sender.write(lang.message("no-permission"), &mut evw_send_message);
            continue;
        }

        apply_color_command(
            ev.sender,
            &ev.command.target,
            &ev.command.token,
            &q_players,
            &mut registry,
            &lang,
            &mut evw_color_changed,
            &mut evw_send_message,
        );
    }
}

pub(super) fn register(app: &mut App) {
    create_color_command::<SetColorNickCommand>(
        ServerCommand::new(
            "setcolornick",
            "[player] [color|reset]",
            "Sets a player's nickname color and locks it against self-service changes.",
        ),
        app,
    );

    app.add_systems(Update, handle_setcolornick.in_set(ProcessCommandsSet::HandleCommands));
}

#[cfg(test)]
mod tests {
    use crate::commands::CommandSender;

    use super::*;

    #[test]
    fn requires_exactly_two_arguments() {
        let too_few = ColorCommandSent::new("setcolornick Steve".into(), CommandSender::Server);
        assert_eq!(
            SetColorNickCommand::from_input(&too_few).err(),
            Some(ArgumentError::TooFewArguments)
        );

        let too_many = ColorCommandSent::new("setcolornick Steve red now".into(), CommandSender::Server);
        assert_eq!(
            SetColorNickCommand::from_input(&too_many).err(),
            Some(ArgumentError::TooManyArguments)
        );

        let just_right = ColorCommandSent::new("setcolornick Steve red".into(), CommandSender::Server);
        let command = SetColorNickCommand::from_input(&just_right).unwrap();
        assert_eq!(command.target, "Steve");
        assert_eq!(command.token, "red");
    }
}
