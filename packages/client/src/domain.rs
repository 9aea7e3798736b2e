//! Domain logic for client-side operations.
//!
//! This module contains pure functions and small value types that implement
//! the session rules without side effects, making them easy to test.

use crate::error::ClientError;

/// Connection lifecycle of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No login yet
    #[default]
    Disconnected,
    /// Username accepted, connection being opened
    Connecting,
    /// Connection open and login frame sent
    LoggedIn,
    /// Connection gone; the session is finished
    Closed,
}

impl SessionState {
    /// State after a login attempt, or `None` if login is not allowed here.
    pub fn on_login(self) -> Option<Self> {
        match self {
            SessionState::Disconnected => Some(SessionState::Connecting),
            _ => None,
        }
    }

    /// State after the connection opened, or `None` if nothing was connecting.
    pub fn on_open(self) -> Option<Self> {
        match self {
            SessionState::Connecting => Some(SessionState::LoggedIn),
            _ => None,
        }
    }

    /// Closing is accepted from every state.
    pub fn on_close(self) -> Self {
        SessionState::Closed
    }

    /// Whether inbound frames are dispatched in this state.
    pub fn accepts_frames(self) -> bool {
        self == SessionState::LoggedIn
    }
}

/// Recipient context for outgoing messages
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    Unset,
    Group(String),
}

impl Target {
    /// Name of the target, if one is selected
    pub fn name(&self) -> Option<&str> {
        match self {
            Target::Unset => None,
            Target::Group(name) => Some(name),
        }
    }

    /// Whether the target is the given group
    pub fn is_group(&self, group: &str) -> bool {
        matches!(self, Target::Group(name) if name == group)
    }
}

/// Validate a username typed at the login prompt.
///
/// # Returns
///
/// The trimmed username, or [`ClientError::UsernameRequired`] when it is blank
pub fn validate_username(input: &str) -> Result<String, ClientError> {
    let username = input.trim();
    if username.is_empty() {
        return Err(ClientError::UsernameRequired);
    }
    Ok(username.to_string())
}

/// Normalize a group name answer. Blank answers mean "cancel".
pub fn normalize_group_name(input: &str) -> Option<String> {
    let name = input.trim();
    (!name.is_empty()).then(|| name.to_string())
}
