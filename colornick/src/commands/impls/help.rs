use bevy::prelude::*;

use crate::commands::{
    ArgumentError, ColorCommandSent, ColorCommandType, ColorNickCommands, CommandMessage, ProcessCommandsSet,
    SendCommandMessageMessage, ServerCommand, create_color_command,
};

struct HelpCommand {
    command: Option<String>,
}

impl ColorCommandType for HelpCommand {
    fn from_input(ev: &ColorCommandSent) -> Result<Self, ArgumentError> {
        if ev.args.len() > 1 {
            return Err(ArgumentError::TooManyArguments);
        }

        Ok(Self {
            command: ev.args.first().cloned(),
        })
    }
}

fn display_help(command_name: Option<&str>, commands: &ColorNickCommands) -> String {
    if let Some(info) = command_name.and_then(|name| commands.command_info(name)) {
        return format!("=== {} ===\n/{} {}\n\t{}", info.name, info.name, info.usage, info.description);
    }

    let mut out = String::from("=== ColorNick Commands ===");
    for info in commands.commands() {
        out.push_str(&format!("\n/{} {}\n\t{}", info.name, info.usage, info.description));
    }
    out
}

fn handle_help(
    mut evr_command: MessageReader<CommandMessage<HelpCommand>>,
    commands: Res<ColorNickCommands>,
    mut evw_send_message: MessageWriter<SendCommandMessageMessage>,
) {
    for ev in evr_command.read() {
        ev.sender
            .write(display_help(ev.command.command.as_deref(), &commands), &mut evw_send_message);
    }
}

pub(super) fn register(app: &mut App) {
    create_color_command::<HelpCommand>(
        ServerCommand::new("colornickhelp", "[command?]", "Gets information about this plugin's commands."),
        app,
    );

    app.add_systems(Update, handle_help.in_set(ProcessCommandsSet::HandleCommands));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_commands_fall_back_to_the_full_listing() {
        let mut commands = ColorNickCommands::default();
        commands.add_command_info(ServerCommand::new("colornick", "[player] [color|reset]", "Picks a color."));

        let listing = display_help(Some("nope"), &commands);
        assert!(listing.starts_with("=== ColorNick Commands ==="));
        assert!(listing.contains("/colornick"));

        let specific = display_help(Some("colornick"), &commands);
        assert!(specific.starts_with("=== colornick ==="));
    }
}
