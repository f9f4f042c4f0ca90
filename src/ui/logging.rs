use bevy::prelude::*;

use crate::constants::TERMINAL_LOG_CAPACITY;

/// Player-visible feedback lines: command errors, join notices.
#[derive(Resource, Default)]
pub struct TerminalLog {
    pub messages: Vec<String>,
    pub max_messages: usize,
}

impl TerminalLog {
    pub fn new(max_messages: usize) -> Self {
        Self {
            messages: Vec::new(),
            max_messages,
        }
    }

    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }
}

/// Message: a line for the terminal log
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct TerminalLogEvent {
    pub message: String,
}

/// Text node showing the terminal log.
#[derive(Component)]
pub struct TerminalOutput;

pub fn consume_log_events(
    mut reader: MessageReader<TerminalLogEvent>,
    mut terminal_log: ResMut<TerminalLog>,
) {
    for ev in reader.read() {
        info!("{}", ev.message);
        terminal_log.add_message(ev.message.clone());
    }
}

pub fn update_terminal_output(
    terminal_log: Res<TerminalLog>,
    mut query: Query<&mut Text, With<TerminalOutput>>,
) {
    if terminal_log.is_changed() {
        for mut text in query.iter_mut() {
            let mut output = String::new();
            // Newest first
            for message in terminal_log.messages.iter().rev() {
                output.push_str(message);
                output.push('\n');
            }
            text.0 = output;
        }
    }
}

/// Keeps the last lines of toolbar feedback.
pub struct TerminalLogPlugin {
    pub max_messages: usize,
}

impl Default for TerminalLogPlugin {
    fn default() -> Self {
        Self {
            max_messages: TERMINAL_LOG_CAPACITY,
        }
    }
}

impl Plugin for TerminalLogPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(TerminalLog::new(self.max_messages))
            .add_message::<TerminalLogEvent>()
            .add_systems(
                Update,
                (consume_log_events, update_terminal_output)
                    .chain()
                    .after(crate::toolbar::RailToolbarSet::Flush),
            );
    }
}
