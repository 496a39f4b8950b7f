//! Responsible for the registration & parsing of this plugin's commands.
//!
//! The host routes raw command lines here as [`ColorCommandSent`] messages
//! (the chat module does this for `/`-prefixed chat). Each command gets a
//! typed parser via [`create_color_command`] and handles its own
//! [`CommandMessage`]s. Feedback goes back through
//! [`SendCommandMessageMessage`], or straight to the console for the server
//! sender.

use bevy::prelude::*;
use thiserror::Error;

mod impls;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The entity or server that sent this command
pub enum CommandSender {
    /// The server console sent this command
    Server,
    /// A player sent this command
    Player(Entity),
}

#[derive(Component, Debug)]
/// If a player is an operator, they may manage other players' colors and
/// bypass color locks
pub struct Operator;

#[derive(Message, Debug)]
/// Sends output from a command to the player entity
pub struct SendCommandMessageMessage {
    /// Who should see the message
    pub to: Entity,
    /// The text to show them
    pub message: String,
}

impl CommandSender {
    /// Checks if this sender has operator privileges
    pub fn is_operator(&self, q_operator: &Query<&Operator>) -> bool {
        match self {
            Self::Player(entity) => q_operator.contains(*entity),
            Self::Server => true,
        }
    }

    /// Sends a message to this command sender
    ///
    /// Player - delivered via [`SendCommandMessageMessage`]
    /// Server - logged in the server console
    pub fn write(&self, message: impl Into<String>, evw_send_message: &mut MessageWriter<SendCommandMessageMessage>) {
        match self {
            Self::Player(entity) => {
                evw_send_message.write(SendCommandMessageMessage {
                    message: message.into(),
                    to: *entity,
                });
            }
            Self::Server => {
                println!("{}", message.into());
            }
        }
    }
}

#[derive(Message, Debug)]
/// Sent when someone invokes one of this plugin's commands
pub struct ColorCommandSent {
    /// The sender of this command
    pub sender: CommandSender,
    /// The raw string the user typed (this includes the command name)
    pub text: String,
    /// The name of the command, lowercased
    pub name: String,
    /// The args split around spaces
    pub args: Vec<String>,
}

impl ColorCommandSent {
    /// Creates a new command message.
    ///
    /// * `text` The entire command line, without any leading slash
    pub fn new(text: String, sender: CommandSender) -> Self {
        let split: Vec<&str> = text.split(' ').collect();
        let (name_arr, args_arr) = split.split_at(1);

        let name = name_arr[0].to_lowercase();
        let args = args_arr
            .iter()
            .filter(|x| !x.is_empty())
            .map(|x| (*x).to_owned())
            .collect::<Vec<String>>();

        Self { text, name, args, sender }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Information that describes how a command should be formatted by the user
pub struct ServerCommand {
    /// Name of the command.
    ///
    /// Example: "colornick"
    pub name: String,
    /// How to use the command.
    ///
    /// Example: "\[player\] \[color\]"
    pub usage: String,
    /// What the command does.
    pub description: String,
}

impl ServerCommand {
    /// Creates a new command descriptor
    ///
    /// * `name` Used to call the command
    /// * `usage` Shows the usage - do not include the `name` in this
    /// * `description` An overview of what the command does
    pub fn new(name: impl Into<String>, usage: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usage: usage.into(),
            description: description.into(),
        }
    }
}

#[derive(Resource, Default, Debug)]
/// Every command this plugin registered, for help output
pub struct ColorNickCommands {
    commands: Vec<ServerCommand>,
}

impl ColorNickCommands {
    /// Adds a command's descriptor
    pub fn add_command_info(&mut self, command: ServerCommand) {
        self.commands.push(command);
    }

    /// Gets the descriptor for this command name, if it was registered
    pub fn command_info(&self, name: &str) -> Option<&ServerCommand> {
        self.commands.iter().find(|command| command.name == name)
    }

    /// Iterates over every registered command's descriptor
    pub fn commands(&self) -> impl Iterator<Item = &ServerCommand> {
        self.commands.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// The ways a command invocation can fail to parse
pub enum ArgumentError {
    /// Not enough arguments were given
    #[error("Not enough arguments")]
    TooFewArguments,
    /// Too many arguments were given
    #[error("Too many arguments")]
    TooManyArguments,
    /// An argument could not be parsed as the type the command expects
    #[error("Argument {arg_index} is not a valid {type_name}")]
    InvalidType {
        /// Which argument was malformed (0-based)
        arg_index: usize,
        /// What the command expected there
        type_name: String,
    },
}

/// A command's typed arguments, parsed from a raw [`ColorCommandSent`]
pub trait ColorCommandType: Sized + Send + Sync + 'static {
    /// Parses this command's arguments, without touching any world state
    fn from_input(ev: &ColorCommandSent) -> Result<Self, ArgumentError>;
}

#[derive(Debug)]
/// A successfully parsed invocation of the command `T`
pub struct CommandMessage<T: ColorCommandType> {
    /// Who invoked the command
    pub sender: CommandSender,
    /// The parsed arguments
    pub command: T,
}

impl<T: ColorCommandType> Message for CommandMessage<T> {}

#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
/// The stages command processing goes through every [`Update`]
pub enum ProcessCommandsSet {
    /// Raw [`ColorCommandSent`] messages are parsed into typed
    /// [`CommandMessage`]s (or rejected with a usage message)
    ParseCommands,
    /// Typed commands are executed
    HandleCommands,
}

/// Registers a command: its descriptor for help output, its typed message,
/// and the parsing system that feeds it.
///
/// The command's handler system should be added separately, in
/// [`ProcessCommandsSet::HandleCommands`].
pub fn create_color_command<T: ColorCommandType>(command: ServerCommand, app: &mut App) {
    let name = command.name.clone();
    let usage = format!("Usage: /{} {}", command.name, command.usage);

    app.init_resource::<ColorNickCommands>();
    app.world_mut().resource_mut::<ColorNickCommands>().add_command_info(command);

    app.add_message::<CommandMessage<T>>();

    app.add_systems(
        Update,
        (move |mut evr_command: MessageReader<ColorCommandSent>,
               mut evw_parsed: MessageWriter<CommandMessage<T>>,
               mut evw_send_message: MessageWriter<SendCommandMessageMessage>| {
            for ev in evr_command.read() {
                if ev.name != name {
                    continue;
                }

                match T::from_input(ev) {
                    Ok(command) => {
                        evw_parsed.write(CommandMessage {
                            sender: ev.sender,
                            command,
                        });
                    }
                    Err(error) => {
                        ev.sender.write(format!("{error}. {usage}"), &mut evw_send_message);
                    }
                }
            }
        })
        .in_set(ProcessCommandsSet::ParseCommands),
    );
}

pub(super) fn register(app: &mut App) {
    app.init_resource::<ColorNickCommands>();

    app.configure_sets(
        Update,
        (ProcessCommandsSet::ParseCommands, ProcessCommandsSet::HandleCommands).chain(),
    );

    app.add_message::<ColorCommandSent>().add_message::<SendCommandMessageMessage>();

    impls::register(app);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_lines_split_into_name_and_args() {
        let ev = ColorCommandSent::new("SetColorNick Steve  red".into(), CommandSender::Server);

        assert_eq!(ev.name, "setcolornick");
        assert_eq!(ev.args, vec!["Steve".to_owned(), "red".to_owned()]);
    }

    #[test]
    fn bare_command_has_no_args() {
        let ev = ColorCommandSent::new("colornick".into(), CommandSender::Server);

        assert_eq!(ev.name, "colornick");
        assert!(ev.args.is_empty());
    }
}
