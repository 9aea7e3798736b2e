//! Client execution logic: login prompt, connection, and reload on disconnect.

use std::sync::Arc;

use kaiwa_shared::time::{Clock, SystemClock};

use crate::{
    connection::{SessionEnd, run_connection},
    error::ClientError,
    input::{LineEvent, LineRequest, LineSource, ReadlineSource},
    session::ChatSession,
    ui::{Screen, TerminalScreen},
};

/// Default chat server endpoint
pub const DEFAULT_URL: &str = "ws://localhost:8765";

const DISCONNECTED_NOTICE: &str = "Disconnected from server";

/// Settings for one client run
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket endpoint of the chat server
    pub url: String,
    /// Username for the first login; later logins always prompt
    pub username: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            username: None,
        }
    }
}

/// Run the chat client on the terminal until the user quits
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let mut lines = ReadlineSource::spawn().await?;
    let mut screen = TerminalScreen::default();
    run_client_with(config, Arc::new(SystemClock), &mut lines, &mut screen).await
}

/// Run the client loop with the given clock, input and screen.
///
/// Every disconnect is fatal to the session: the user is alerted, all session
/// state is discarded, and the login prompt is shown again. There is no
/// automatic reconnection.
pub async fn run_client_with<L, S>(
    config: ClientConfig,
    clock: Arc<dyn Clock>,
    lines: &mut L,
    screen: &mut S,
) -> Result<(), ClientError>
where
    L: LineSource + ?Sized,
    S: Screen + ?Sized,
{
    let mut preset_username = config.username;

    loop {
        let mut session = ChatSession::new(clock.clone());

        // Login prompt
        loop {
            let answer = match preset_username.take() {
                Some(username) => username,
                None => {
                    let request = LineRequest::login();
                    screen.set_prompt(&request.prompt);
                    lines.request(request);
                    match lines.next_line().await {
                        Some(LineEvent::Line(line)) => line,
                        Some(LineEvent::Interrupted) | Some(LineEvent::Eof) | None => {
                            tracing::info!("Exiting before login");
                            return Ok(());
                        }
                    }
                }
            };

            match session.login(&answer) {
                Ok(()) => break,
                Err(e) => screen.alert(&e.to_string()),
            }
        }

        tracing::info!(
            "Connecting to {} as '{}'",
            config.url,
            session.username().unwrap_or_default()
        );

        match run_connection(&config.url, &mut session, lines, screen).await? {
            SessionEnd::Quit => {
                tracing::info!("Client session ended by user");
                return Ok(());
            }
            SessionEnd::Closed => {
                screen.set_prompt("");
                screen.alert(DISCONNECTED_NOTICE);
                tracing::info!("Reloading client");
            }
        }
    }
}
