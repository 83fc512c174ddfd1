use serde_json::Value;

use crate::{ConnectionState, ConsoleEntry, PanelMode};

/// Render-ready snapshot of the panel, derived via `PanelState::view`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelViewModel {
    /// Allow-listed groups in draft order. Empty means the draft is not
    /// ready and the shell shows a loading placeholder.
    pub groups: Vec<GroupView>,
    pub mode: PanelMode,
    pub action_label: String,
    /// Display names of the selected files.
    pub files: Vec<String>,
    pub texts: Vec<String>,
    pub busy: bool,
    pub connection: ConnectionState,
    pub console: Vec<ConsoleEntry>,
    pub dirty: bool,
}

/// One allow-listed settings group and its opaque descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupView {
    pub name: String,
    pub value: Value,
}
