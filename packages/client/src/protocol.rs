//! JSON frames exchanged with the chat server.
//!
//! Outbound frames are tagged by `action`. Inbound frames carry no single
//! tag: they are told apart by the presence of `status` or `type`, first
//! match wins.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ClientError;

/// Frame sent from the client to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OutboundFrame {
    /// Announce the username; this client never sends a public key
    Login {
        username: String,
        public_key: Option<String>,
    },
    /// Join (or create) a named group
    JoinGroup { group: String },
    /// Post a message to a group
    Group { group: String, content: String },
}

impl OutboundFrame {
    pub fn login(username: impl Into<String>) -> Self {
        Self::Login {
            username: username.into(),
            public_key: None,
        }
    }

    pub fn join_group(group: impl Into<String>) -> Self {
        Self::JoinGroup {
            group: group.into(),
        }
    }

    pub fn group(group: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Group {
            group: group.into(),
            content: content.into(),
        }
    }

    /// Encode the frame as JSON text
    pub fn to_json(&self) -> Result<String, ClientError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Frame received from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    /// `{status: "success", message, default_model?}`
    Success {
        message: String,
        default_model: Option<String>,
    },
    /// `{status: "error", message}`
    Error { message: String },
    /// `{type: "group", group, from, content}`
    Group {
        group: String,
        from: String,
        content: String,
    },
    /// `{type: "private", from, content}`; the content is never kept
    Private { from: String },
    /// Valid JSON of any other shape
    Unrecognized,
}

impl InboundFrame {
    /// Parse a text frame.
    ///
    /// Only invalid JSON is an error. Anything else that parses but does not
    /// match a known shape is [`InboundFrame::Unrecognized`].
    pub fn parse(text: &str) -> Result<Self, ClientError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(fields) = value else {
            return Ok(Self::Unrecognized);
        };

        let frame = match (
            text_field(&fields, "status").as_deref(),
            text_field(&fields, "type").as_deref(),
        ) {
            (Some("success"), _) => Self::Success {
                message: text_field(&fields, "message").unwrap_or_default(),
                default_model: text_field(&fields, "default_model"),
            },
            (Some("error"), _) => Self::Error {
                message: text_field(&fields, "message").unwrap_or_default(),
            },
            (_, Some("group")) => Self::Group {
                group: text_field(&fields, "group").unwrap_or_default(),
                from: text_field(&fields, "from").unwrap_or_default(),
                content: text_field(&fields, "content").unwrap_or_default(),
            },
            (_, Some("private")) => Self::Private {
                from: text_field(&fields, "from").unwrap_or_default(),
            },
            _ => Self::Unrecognized,
        };

        Ok(frame)
    }
}

/// Read a field as display text. Strings are taken as-is, other scalars are
/// rendered as JSON; `null` and missing fields are `None`.
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
