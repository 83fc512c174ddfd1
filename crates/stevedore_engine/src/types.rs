use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Frame `type` value that marks the end of an import run.
pub const STOP_SIGNAL: &str = "STOP";

/// Severity tag on a backend console frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageSeverity {
    Info,
    Warning,
    Success,
    Error,
}

/// One console frame pushed by the backend during an import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    #[serde(rename = "type")]
    pub severity: MessageSeverity,
    pub message: String,
}

/// Events emitted by the import session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The socket handshake completed.
    Opened,
    /// The backend pushed a console frame.
    Console(PushMessage),
    /// The backend signalled the end of the import run.
    Finished,
    /// The socket is gone; `clean` mirrors the close handshake.
    Closed { clean: bool },
    /// A payload could not be delivered; the socket is dead.
    SendFailed,
}

/// One file in transportable form: base64 content plus naming metadata so
/// the backend can pick a reader without sniffing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDocument {
    pub filename: String,
    pub extension: String,
    pub content: String,
}

/// Theme block forwarded with every config submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSetting {
    #[serde(rename = "selectedTheme")]
    pub selected_theme: String,
    pub themes: Value,
}

/// The `config` object shared by the import payload and the REST body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadConfig {
    #[serde(rename = "RAG")]
    pub rag: Value,
    #[serde(rename = "SETTING")]
    pub setting: ThemeSetting,
}

/// Full import payload sent over the socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportPayload {
    pub config: PayloadConfig,
    pub data: Vec<FileDocument>,
    #[serde(rename = "textValues")]
    pub text_values: Vec<String>,
}

/// Body of `POST /api/set_config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigPayload {
    pub config: PayloadConfig,
}

/// Error from the config endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub kind: ConfigFailure,
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(kind: ConfigFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigFailure {
    InvalidHost,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedResponse,
}

impl fmt::Display for ConfigFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFailure::InvalidHost => write!(f, "invalid api host"),
            ConfigFailure::HttpStatus(code) => write!(f, "http status {code}"),
            ConfigFailure::Timeout => write!(f, "timeout"),
            ConfigFailure::Network => write!(f, "network error"),
            ConfigFailure::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

/// Error preparing a file for transport.
#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path:?} exceeds the {max_bytes} byte import limit")]
    TooLarge { path: PathBuf, max_bytes: u64 },
}
