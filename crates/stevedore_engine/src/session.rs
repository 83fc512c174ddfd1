use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use ingest_logging::{ingest_error, ingest_info, ingest_warn};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc as async_mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, WebSocketStream};

use crate::{PushMessage, SessionEvent, STOP_SIGNAL};

/// Connection parameters for the import socket.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub socket_url: String,
}

enum SessionCommand {
    Send(String),
    Reconnect,
}

/// Command half of a session, cheap to clone into effect executors.
#[derive(Clone)]
pub struct SessionLink {
    cmd_tx: async_mpsc::UnboundedSender<SessionCommand>,
}

impl SessionLink {
    /// Queue one serialized payload for the live socket.
    pub fn send(&self, payload: String) {
        let _ = self.cmd_tx.send(SessionCommand::Send(payload));
    }

    /// Tear down the current socket and open a new one.
    pub fn reconnect(&self) {
        let _ = self.cmd_tx.send(SessionCommand::Reconnect);
    }
}

/// Handle to the background import session.
///
/// The session owns the one live socket; a reconnect tears it down before a
/// replacement opens. Events are polled from the UI loop via `try_recv`.
/// Dropping the handle and every link shuts the session thread down.
pub struct SessionHandle {
    link: SessionLink,
    event_rx: mpsc::Receiver<SessionEvent>,
}

impl SessionHandle {
    /// Spawn the session thread and start the first connection attempt.
    pub fn connect(settings: SessionSettings) -> Self {
        let (cmd_tx, cmd_rx) = async_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("session runtime");
            runtime.block_on(run_session(settings, cmd_rx, event_tx));
        });

        Self {
            link: SessionLink { cmd_tx },
            event_rx,
        }
    }

    pub fn link(&self) -> SessionLink {
        self.link.clone()
    }

    /// See [`SessionLink::send`].
    pub fn send(&self, payload: String) {
        self.link.send(payload);
    }

    /// See [`SessionLink::reconnect`].
    pub fn reconnect(&self) {
        self.link.reconnect();
    }

    pub fn try_recv(&self) -> Option<SessionEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Block up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SessionEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

enum DriveOutcome {
    /// The socket ended; stay idle until an explicit reconnect.
    Dead,
    /// Reconnect was requested; open a new socket immediately.
    Reopen,
    /// The command sender or event receiver is gone; stop the thread.
    Shutdown,
}

async fn run_session(
    settings: SessionSettings,
    mut cmd_rx: async_mpsc::UnboundedReceiver<SessionCommand>,
    event_tx: mpsc::Sender<SessionEvent>,
) {
    loop {
        match connect_async(settings.socket_url.as_str()).await {
            Ok((socket, _response)) => {
                ingest_info!("Import socket open to {}", settings.socket_url);
                if event_tx.send(SessionEvent::Opened).is_err() {
                    return;
                }
                match drive_socket(socket, &mut cmd_rx, &event_tx).await {
                    DriveOutcome::Reopen => continue,
                    DriveOutcome::Shutdown => return,
                    DriveOutcome::Dead => {}
                }
            }
            Err(err) => {
                ingest_warn!(
                    "Import socket connect to {} failed: {err}",
                    settings.socket_url
                );
                if event_tx.send(SessionEvent::Closed { clean: false }).is_err() {
                    return;
                }
            }
        }

        // No socket. Sends fail fast; only an explicit reconnect retries.
        loop {
            match cmd_rx.recv().await {
                Some(SessionCommand::Reconnect) => break,
                Some(SessionCommand::Send(_)) => {
                    if event_tx.send(SessionEvent::SendFailed).is_err() {
                        return;
                    }
                }
                None => return,
            }
        }
    }
}

async fn drive_socket<S>(
    mut socket: WebSocketStream<S>,
    cmd_rx: &mut async_mpsc::UnboundedReceiver<SessionCommand>,
    event_tx: &mpsc::Sender<SessionEvent>,
) -> DriveOutcome
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        tokio::select! {
            frame = socket.next() => match frame {
                Some(Ok(message)) => {
                    if let Some(event) = inbound_event(message) {
                        let closing = matches!(event, SessionEvent::Closed { .. });
                        if event_tx.send(event).is_err() {
                            return DriveOutcome::Shutdown;
                        }
                        if closing {
                            return DriveOutcome::Dead;
                        }
                    }
                }
                Some(Err(err)) => {
                    ingest_error!("Import socket error: {err}");
                    if event_tx.send(SessionEvent::Closed { clean: false }).is_err() {
                        return DriveOutcome::Shutdown;
                    }
                    return DriveOutcome::Dead;
                }
                None => {
                    if event_tx.send(SessionEvent::Closed { clean: false }).is_err() {
                        return DriveOutcome::Shutdown;
                    }
                    return DriveOutcome::Dead;
                }
            },
            command = cmd_rx.recv() => match command {
                Some(SessionCommand::Send(payload)) => {
                    if let Err(err) = socket.send(Message::Text(payload.into())).await {
                        ingest_error!("Import socket send failed: {err}");
                        let _ = event_tx.send(SessionEvent::SendFailed);
                        let _ = event_tx.send(SessionEvent::Closed { clean: false });
                        return DriveOutcome::Dead;
                    }
                }
                Some(SessionCommand::Reconnect) => {
                    // Tear the old socket down before the next one opens.
                    let _ = socket.close(None).await;
                    return DriveOutcome::Reopen;
                }
                None => {
                    let _ = socket.close(None).await;
                    return DriveOutcome::Shutdown;
                }
            },
        }
    }
}

fn inbound_event(message: Message) -> Option<SessionEvent> {
    match message {
        Message::Text(text) => parse_frame(text.as_str()),
        Message::Close(_) => Some(SessionEvent::Closed { clean: true }),
        // Binary frames and transport pings carry no console data.
        _ => None,
    }
}

/// Decode one inbound frame. Malformed frames are dropped after a log line
/// and never surface to the user.
fn parse_frame(raw: &str) -> Option<SessionEvent> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            ingest_error!("Dropping non-JSON import frame: {err}");
            return None;
        }
    };

    if value.get("type").and_then(|tag| tag.as_str()) == Some(STOP_SIGNAL) {
        return Some(SessionEvent::Finished);
    }

    match serde_json::from_value::<PushMessage>(value) {
        Ok(message) => Some(SessionEvent::Console(message)),
        Err(err) => {
            ingest_error!("Dropping malformed import frame: {err}");
            None
        }
    }
}
