use std::path::PathBuf;

use crate::{RagConfig, ThemeContext};

/// Side effects requested by `update` and executed by the platform shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Push the draft back to the committed configuration.
    CommitDraft { config: RagConfig },
    /// Prepare the listed files and send the import payload on the socket.
    StartImport {
        config: RagConfig,
        theme: ThemeContext,
        files: Vec<PathBuf>,
        texts: Vec<String>,
    },
    /// POST the configuration to the backend.
    SaveConfig {
        config: RagConfig,
        theme: ThemeContext,
    },
    /// Tear down the import socket and open a new one.
    Reconnect,
    /// Move the shell to the post-save view.
    AdvanceView,
}
