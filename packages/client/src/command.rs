//! Parsing of lines typed at the chat prompt.

use crate::error::ClientError;

/// What a typed line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/join` without a name asks for it with a prompt
    Join(Option<String>),
    Switch(String),
    /// `/group <group> <text>` posts without switching
    Post { group: String, content: String },
    Groups,
    Help,
    Quit,
    /// Any line that is not a command
    Message(String),
}

impl Command {
    /// Parse a line from the composer.
    ///
    /// Lines starting with `/` are commands; everything else (including blank
    /// lines) is message text for the composer.
    pub fn parse(line: &str) -> Result<Self, ClientError> {
        let trimmed = line.trim();
        if !trimmed.starts_with('/') {
            return Ok(Command::Message(line.to_string()));
        }

        let (name, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, Some(rest.trim()).filter(|r| !r.is_empty())),
            None => (trimmed, None),
        };

        match name {
            "/join" => Ok(Command::Join(arg.map(str::to_string))),
            "/switch" => arg
                .map(|group| Command::Switch(group.to_string()))
                .ok_or(ClientError::Usage("/switch <group>")),
            "/group" => arg
                .and_then(|rest| rest.split_once(char::is_whitespace))
                .map(|(group, content)| Command::Post {
                    group: group.to_string(),
                    content: content.trim().to_string(),
                })
                .ok_or(ClientError::Usage("/group <group> <text>")),
            "/groups" => Ok(Command::Groups),
            "/help" => Ok(Command::Help),
            "/quit" => Ok(Command::Quit),
            other => Err(ClientError::UnknownCommand(other.to_string())),
        }
    }
}
