use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::view_model::{GroupView, PanelViewModel};
use crate::{ConnectionState, ConsoleEntry, PanelMode, RagConfig, ThemeContext};

/// Everything the shell supplies when building a panel.
#[derive(Debug, Clone, Default)]
pub struct PanelSetup {
    pub config: RagConfig,
    /// Allow-list of group names the panel renders.
    pub visible_groups: Vec<String>,
    pub mode: PanelMode,
    pub action_label: String,
    /// Absent host disables the config-only save.
    pub api_host: Option<String>,
    pub theme: ThemeContext,
}

/// Panel state: the settings draft plus everything the import session
/// accumulates. Mutated only through `update`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelState {
    original: RagConfig,
    draft: RagConfig,
    visible_groups: Vec<String>,
    mode: PanelMode,
    action_label: String,
    api_host: Option<String>,
    theme: ThemeContext,
    files: Vec<PathBuf>,
    texts: Vec<String>,
    busy: bool,
    connection: ConnectionState,
    console: Vec<ConsoleEntry>,
    dirty: bool,
}

impl PanelState {
    /// Build the panel. The draft starts as a structural clone of the
    /// supplied configuration and stays independent of it until the primary
    /// action pushes it back.
    pub fn new(setup: PanelSetup) -> Self {
        let draft = setup.config.clone();
        Self {
            original: setup.config,
            draft,
            visible_groups: setup.visible_groups,
            mode: setup.mode,
            action_label: setup.action_label,
            api_host: setup.api_host,
            theme: setup.theme,
            files: Vec::new(),
            texts: Vec::new(),
            busy: false,
            connection: ConnectionState::Connecting,
            console: Vec::new(),
            dirty: true,
        }
    }

    pub fn view(&self) -> PanelViewModel {
        let groups = self
            .draft
            .iter()
            .filter(|(name, _)| self.visible_groups.iter().any(|g| g == *name))
            .map(|(name, value)| GroupView {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();

        PanelViewModel {
            groups,
            mode: self.mode,
            action_label: self.action_label.clone(),
            files: self.files.iter().map(|path| display_name(path)).collect(),
            texts: self.texts.clone(),
            busy: self.busy,
            connection: self.connection,
            console: self.console.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it; the shell re-renders when true.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mode(&self) -> PanelMode {
        self.mode
    }

    pub(crate) fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub(crate) fn api_host(&self) -> Option<&str> {
        self.api_host.as_deref()
    }

    pub(crate) fn draft(&self) -> &RagConfig {
        &self.draft
    }

    pub(crate) fn theme(&self) -> &ThemeContext {
        &self.theme
    }

    pub(crate) fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub(crate) fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Push the draft over the committed copy; a later reset restores to
    /// this point, not to the construction-time configuration.
    pub(crate) fn commit_draft(&mut self) -> RagConfig {
        self.original = self.draft.clone();
        self.original.clone()
    }

    pub(crate) fn set_group(&mut self, group: String, value: Value) {
        // Per-group shallow update; unknown groups are new entries.
        self.draft.insert(group, value);
        self.dirty = true;
    }

    pub(crate) fn set_files(&mut self, files: Vec<PathBuf>) {
        self.files = files;
        self.dirty = true;
    }

    pub(crate) fn remove_file(&mut self, index: usize) {
        if index < self.files.len() {
            self.files.remove(index);
            self.dirty = true;
        }
    }

    pub(crate) fn take_files(&mut self) -> Vec<PathBuf> {
        self.dirty = true;
        std::mem::take(&mut self.files)
    }

    pub(crate) fn add_text(&mut self, text: String) {
        self.texts.push(text);
        self.dirty = true;
    }

    pub(crate) fn remove_text(&mut self, index: usize) {
        if index < self.texts.len() {
            self.texts.remove(index);
            self.dirty = true;
        }
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        self.dirty = true;
    }

    pub(crate) fn set_connection(&mut self, connection: ConnectionState) {
        self.connection = connection;
        self.dirty = true;
    }

    pub(crate) fn push_console(&mut self, entry: ConsoleEntry) {
        self.console.push(entry);
        self.dirty = true;
    }

    /// Restore the draft to the original configuration and drop everything
    /// the session accumulated.
    pub(crate) fn reset(&mut self) {
        self.draft = self.original.clone();
        self.console.clear();
        self.texts.clear();
        self.files.clear();
        self.dirty = true;
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
