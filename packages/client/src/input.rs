//! Line input from the terminal.
//!
//! rustyline blocks, so it runs on its own thread. The connection loop asks
//! for one line at a time with a [`LineRequest`] and receives the answer as a
//! [`LineEvent`].

use async_trait::async_trait;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{mpsc, oneshot};

use crate::error::ClientError;

const LOGIN_PROMPT: &str = "Enter your username: ";

/// Prompt to show and text to pre-fill for the next line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRequest {
    pub prompt: String,
    pub initial: String,
}

impl LineRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            initial: String::new(),
        }
    }

    pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
        self.initial = initial.into();
        self
    }

    /// The login question
    pub fn login() -> Self {
        Self::new(LOGIN_PROMPT)
    }
}

/// Result of one line request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Line(String),
    /// Ctrl+C
    Interrupted,
    /// Ctrl+D or input closed
    Eof,
}

/// Source of typed lines
#[async_trait]
pub trait LineSource: Send {
    /// Ask for the next line.
    ///
    /// At most one prompt is shown at a time. A request made while another
    /// one is still shown supersedes it: the answer to the old prompt is
    /// discarded and the new prompt is shown before any line is returned.
    fn request(&mut self, request: LineRequest);

    /// Wait for the answer to the last request. `None` once input is gone.
    async fn next_line(&mut self) -> Option<LineEvent>;
}

/// Terminal line source backed by rustyline
pub struct ReadlineSource {
    requests: std::sync::mpsc::Sender<LineRequest>,
    lines: mpsc::UnboundedReceiver<LineEvent>,
    /// Prompt the editor is currently showing
    shown: Option<LineRequest>,
    /// Request waiting for the shown prompt to be answered
    queued: Option<LineRequest>,
}

impl ReadlineSource {
    /// Start the readline thread
    pub async fn spawn() -> Result<Self, ClientError> {
        let (request_tx, request_rx) = std::sync::mpsc::channel::<LineRequest>();
        let (line_tx, line_rx) = mpsc::unbounded_channel::<LineEvent>();
        let (ready_tx, ready_rx) = oneshot::channel::<Result<(), String>>();

        std::thread::spawn(move || {
            let mut rl = match DefaultEditor::new() {
                Ok(rl) => {
                    ready_tx.send(Ok(())).ok();
                    rl
                }
                Err(e) => {
                    ready_tx.send(Err(e.to_string())).ok();
                    return;
                }
            };

            while let Ok(request) = request_rx.recv() {
                let initial = (request.initial.as_str(), "");
                let event = match rl.readline_with_initial(&request.prompt, initial) {
                    Ok(line) => {
                        if !line.trim().is_empty() {
                            rl.add_history_entry(line.as_str()).ok();
                        }
                        LineEvent::Line(line)
                    }
                    Err(ReadlineError::Interrupted) => LineEvent::Interrupted,
                    Err(ReadlineError::Eof) => LineEvent::Eof,
                    Err(err) => {
                        tracing::error!("Readline error: {}", err);
                        LineEvent::Eof
                    }
                };

                if line_tx.send(event).is_err() {
                    // Receiver dropped, client is shutting down
                    break;
                }
            }
        });

        match ready_rx.await {
            Ok(Ok(())) => Ok(Self::from_channels(request_tx, line_rx)),
            Ok(Err(e)) => Err(ClientError::TerminalError(e)),
            Err(_) => Err(ClientError::TerminalError(
                "readline thread exited during setup".to_string(),
            )),
        }
    }

    /// Line source talking to an editor over the given channels
    fn from_channels(
        requests: std::sync::mpsc::Sender<LineRequest>,
        lines: mpsc::UnboundedReceiver<LineEvent>,
    ) -> Self {
        Self {
            requests,
            lines,
            shown: None,
            queued: None,
        }
    }

    fn show(&mut self, request: LineRequest) {
        if self.requests.send(request.clone()).is_ok() {
            self.shown = Some(request);
        }
    }
}

#[async_trait]
impl LineSource for ReadlineSource {
    fn request(&mut self, request: LineRequest) {
        if self.shown.is_none() {
            self.show(request);
        } else if self.shown.as_ref() != Some(&request) {
            tracing::debug!("Prompt superseded by '{}'", request.prompt);
            self.queued = Some(request);
        } else {
            self.queued = None;
        }
    }

    async fn next_line(&mut self) -> Option<LineEvent> {
        loop {
            let event = self.lines.recv().await?;
            self.shown = None;

            match (self.queued.take(), event) {
                (Some(next), LineEvent::Line(_)) => {
                    // Answer to a prompt nobody is waiting for anymore
                    tracing::debug!("Discarding line typed at a superseded prompt");
                    self.show(next);
                }
                (_, event) => return Some(event),
            }
        }
    }
}
