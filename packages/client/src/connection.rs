//! The connection loop: one WebSocket, one session, one event at a time.

use futures_util::{Sink, SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    error::ClientError,
    input::{LineEvent, LineSource},
    session::{ChatSession, InputOutcome},
    ui::Screen,
};

/// Why a connection loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The connection closed or could not be opened
    Closed,
    /// The user asked to leave
    Quit,
}

/// Connect to `url` and drive `session` until the connection closes or the
/// user quits.
///
/// The session must already be logged in (state `Connecting`). Inbound frames
/// and typed lines are handled strictly one after the other; after each event
/// queued outbound frames are written and view changes are rendered.
pub async fn run_connection<L, S>(
    url: &str,
    session: &mut ChatSession,
    lines: &mut L,
    screen: &mut S,
) -> Result<SessionEnd, ClientError>
where
    L: LineSource + ?Sized,
    S: Screen + ?Sized,
{
    let ws_stream = match connect_async(url).await {
        Ok((ws_stream, _response)) => ws_stream,
        Err(e) => {
            tracing::warn!("Failed to connect to {}: {}", url, e);
            session.on_close();
            render(session, screen);
            return Ok(SessionEnd::Closed);
        }
    };
    let (mut write, mut read) = ws_stream.split();

    session.on_open();
    let mut end = flush(session, &mut write).await?;
    render(session, screen);
    let mut wants_line = true;

    while end.is_none() {
        if wants_line {
            let request = session.line_request();
            screen.set_prompt(&request.prompt);
            lines.request(request);
            wants_line = false;
        }

        tokio::select! {
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    if let Err(e) = session.on_message(text.as_str()) {
                        tracing::error!("Failed to handle frame: {}", e);
                    }
                }
                Some(Ok(Message::Binary(data))) => {
                    tracing::debug!("Ignoring {} bytes of binary data", data.len());
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    end = Some(SessionEnd::Closed);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    end = Some(SessionEnd::Closed);
                }
            },
            event = lines.next_line() => {
                wants_line = true;
                let outcome = match event {
                    Some(LineEvent::Line(line)) => session.handle_line(&line),
                    Some(LineEvent::Interrupted) => Ok(session.handle_interrupt()),
                    Some(LineEvent::Eof) | None => Ok(InputOutcome::Quit),
                };
                match outcome {
                    Ok(InputOutcome::Continue) => {}
                    Ok(InputOutcome::ListGroups) => {
                        let current = session.target().name().map(str::to_string);
                        screen.show_groups(session.view().sidebar(), current);
                    }
                    Ok(InputOutcome::Help) => screen.show_help(),
                    Ok(InputOutcome::Quit) => end = Some(SessionEnd::Quit),
                    Err(e) if e.is_user_facing() => screen.alert(&e.to_string()),
                    Err(e) => return Err(e),
                }
            }
        }

        if let Some(closed) = flush(session, &mut write).await?
            && end.is_none()
        {
            end = Some(closed);
        }
        render(session, screen);
    }

    if end == Some(SessionEnd::Quit) {
        tracing::info!("Closing connection");
        write.close().await.ok();
    }
    session.on_close();
    render(session, screen);

    Ok(end.unwrap_or(SessionEnd::Closed))
}

/// Write queued outbound frames.
///
/// A failed write means the connection is gone; it is reported as
/// `Some(SessionEnd::Closed)` rather than an error.
async fn flush<W>(
    session: &mut ChatSession,
    write: &mut W,
) -> Result<Option<SessionEnd>, ClientError>
where
    W: Sink<Message, Error = tokio_tungstenite::tungstenite::Error> + Unpin,
{
    for frame in session.take_outbound() {
        let json = frame.to_json()?;
        tracing::debug!("Sending frame: {}", json);
        if let Err(e) = write.send(Message::Text(json.into())).await {
            tracing::warn!("Failed to send frame: {}", e);
            return Ok(Some(SessionEnd::Closed));
        }
    }
    Ok(None)
}

/// Hand pending view changes to the screen
pub fn render<S: Screen + ?Sized>(session: &mut ChatSession, screen: &mut S) {
    for change in session.take_view_changes() {
        screen.render(&change);
    }
}
