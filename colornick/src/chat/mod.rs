//! Chat intake for the plugin.
//!
//! The host forwards every chat line here. Slash-prefixed lines become
//! [`ColorCommandSent`] messages for the command dispatcher (lines for
//! commands this plugin does not own are simply never picked up by a
//! parser); everything else is relayed to all clients with the sender's
//! colored display name.

use bevy::prelude::*;

use crate::{
    commands::{ColorCommandSent, CommandSender, ProcessCommandsSet},
    entities::player::Player,
    teams::DisplayName,
};

#[derive(Message, Debug)]
/// Sent by the host when a connected player says something in chat
pub struct ChatMessageReceived {
    /// The player entity that sent this message
    pub sender: Entity,
    /// What they typed
    pub text: String,
}

#[derive(Message, Debug)]
/// Sent to the host to display this chat message to everyone
pub struct ServerSendChatMessage {
    /// The entity that sent this message - none if no entity sent it
    pub sender: Option<Entity>,
    /// The message to display
    pub message: String,
}

fn receive_messages(
    mut evr_chat_msg: MessageReader<ChatMessageReceived>,
    q_player: Query<(&Player, Option<&DisplayName>)>,
    mut evw_command: MessageWriter<ColorCommandSent>,
    mut evw_send_chat_msg: MessageWriter<ServerSendChatMessage>,
) {
    for ev in evr_chat_msg.read() {
        let Ok((player, display_name)) = q_player.get(ev.sender) else {
            continue;
        };

        if let Some(command_line) = ev.text.strip_prefix('/') {
            if command_line.trim().is_empty() {
                continue;
            }

            evw_command.write(ColorCommandSent::new(
                command_line.to_owned(),
                CommandSender::Player(ev.sender),
            ));
            continue;
        }

        let shown_name = display_name.map(|name| name.as_str()).unwrap_or(player.name());
        let message = format!("{}> {}", shown_name, ev.text);

        info!("{message}");

        evw_send_chat_msg.write(ServerSendChatMessage {
            sender: Some(ev.sender),
            message,
        });
    }
}

pub(super) fn register(app: &mut App) {
    app.add_message::<ChatMessageReceived>().add_message::<ServerSendChatMessage>();

    app.add_systems(Update, receive_messages.before(ProcessCommandsSet::ParseCommands));
}
