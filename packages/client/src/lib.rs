//! Terminal group chat client.
//!
//! Connects to a chat server over WebSocket, logs in with a plaintext
//! username, joins named groups and renders group traffic as message bubbles.
//! All protocol traffic is a single JSON envelope per frame, see [`protocol`].

pub mod command;
pub mod connection;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod input;
pub mod protocol;
pub mod runner;
pub mod session;
pub mod ui;
pub mod view;

pub use error::ClientError;
pub use runner::{ClientConfig, run_client, run_client_with};
pub use session::ChatSession;
