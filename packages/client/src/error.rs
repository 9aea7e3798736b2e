//! Error types for the Kaiwa chat client.

use thiserror::Error;

/// Client-specific errors
///
/// The user-facing variants are shown as alerts; their messages are the alert
/// texts.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Login attempted with a blank username
    #[error("Please enter a username")]
    UsernameRequired,

    /// Message sent while no group is selected
    #[error("Please select a group or user first!")]
    NoTarget,

    /// Switch requested to a group that is not in the sidebar
    #[error("You have not joined #{0}")]
    UnknownGroup(String),

    /// Command line that starts with `/` but names no known command
    #[error("Unknown command: {0} (type /help for commands)")]
    UnknownCommand(String),

    /// Command used without a required argument
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// Action that needs the connection attempted before login completed
    #[error("Not connected")]
    NotConnected,

    /// Login attempted while a connection is already held
    #[error("Already connected as '{0}'")]
    AlreadyConnected(String),

    /// Inbound frame is not valid JSON, or an outbound frame failed to encode
    #[error("Invalid frame: {0}")]
    InvalidFrame(#[from] serde_json::Error),

    /// Terminal input could not be set up
    #[error("Terminal error: {0}")]
    TerminalError(String),
}

impl ClientError {
    /// Whether the error is shown to the user as an alert instead of ending
    /// the client.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            ClientError::UsernameRequired
                | ClientError::NoTarget
                | ClientError::UnknownGroup(_)
                | ClientError::UnknownCommand(_)
                | ClientError::Usage(_)
                | ClientError::NotConnected
                | ClientError::AlreadyConnected(_)
        )
    }
}
