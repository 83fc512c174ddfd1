use std::path::PathBuf;

use serde_json::Value;

use crate::ConsoleEntry;

/// Inputs to the panel state machine: UI events, session events, and
/// completions of async work.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Editor replaced one group descriptor (per-group shallow update).
    GroupUpdated { group: String, value: Value },
    /// User picked files for import; replaces the current selection.
    FilesPicked(Vec<PathBuf>),
    /// User removed one selected file.
    FileRemoved(usize),
    /// User added a pasted text snippet.
    TextAdded(String),
    /// User removed a pasted text snippet.
    TextRemoved(usize),
    /// Primary action: import or config-only save, depending on panel mode.
    ActionClicked,
    /// Secondary action: restore the draft, clear console/files/texts.
    ResetClicked,
    /// Import socket finished its handshake.
    SocketOpened,
    /// Backend pushed a console entry.
    ConsoleMessage(ConsoleEntry),
    /// Backend signalled the end of the import run.
    ImportFinished,
    /// Socket closed; `clean` mirrors the close handshake.
    SocketClosed { clean: bool },
    /// A send was attempted on a dead socket.
    SendFailed,
    /// Document preparation failed before anything was sent.
    ImportFailed,
    /// Config-only save finished, successfully or not.
    ConfigSaved { ok: bool },
    /// Fallback for placeholder wiring.
    NoOp,
}
