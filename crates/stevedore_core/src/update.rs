use crate::{ConnectionState, ConsoleEntry, ConsoleSeverity, Effect, Msg, PanelMode, PanelState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PanelState, msg: Msg) -> (PanelState, Vec<Effect>) {
    let effects = match msg {
        Msg::GroupUpdated { group, value } => {
            state.set_group(group, value);
            Vec::new()
        }
        Msg::FilesPicked(paths) => {
            state.set_files(paths);
            Vec::new()
        }
        Msg::FileRemoved(index) => {
            state.remove_file(index);
            Vec::new()
        }
        Msg::TextAdded(text) => {
            state.add_text(text);
            Vec::new()
        }
        Msg::TextRemoved(index) => {
            state.remove_text(index);
            Vec::new()
        }
        Msg::ActionClicked => match state.mode() {
            PanelMode::Import => start_import(&mut state),
            PanelMode::ConfigOnly => start_config_save(&mut state),
        },
        Msg::ResetClicked => {
            state.reset();
            Vec::new()
        }
        Msg::SocketOpened => {
            state.set_connection(ConnectionState::Open);
            state.push_console(ConsoleEntry::new(
                ConsoleSeverity::Info,
                "Ready for data import",
            ));
            Vec::new()
        }
        Msg::ConsoleMessage(entry) => {
            state.push_console(entry);
            Vec::new()
        }
        Msg::ImportFinished => {
            state.set_busy(false);
            Vec::new()
        }
        Msg::SocketClosed { clean } => {
            state.set_connection(ConnectionState::Closed { clean });
            // An unclean close is developer-log territory only; the user
            // learns about it on the next failed send.
            if clean {
                state.push_console(ConsoleEntry::new(ConsoleSeverity::Info, "Connection closed"));
            }
            Vec::new()
        }
        Msg::SendFailed => vec![lost_connection(&mut state)],
        Msg::ImportFailed => {
            state.set_busy(false);
            Vec::new()
        }
        Msg::ConfigSaved { ok } => {
            state.set_busy(false);
            if ok {
                vec![Effect::AdvanceView]
            } else {
                Vec::new()
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Primary action in Import mode. The draft is committed on every primary
/// action; the import itself is a no-op without files or pasted texts.
fn start_import(state: &mut PanelState) -> Vec<Effect> {
    let mut effects = vec![Effect::CommitDraft {
        config: state.commit_draft(),
    }];

    if state.files().is_empty() && state.texts().is_empty() {
        return effects;
    }

    if state.connection() != ConnectionState::Open {
        effects.push(lost_connection(state));
        return effects;
    }

    state.set_busy(true);
    state.push_console(ConsoleEntry::new(ConsoleSeverity::Info, "Starting Import"));
    let files = state.take_files();
    effects.push(Effect::StartImport {
        config: state.draft().clone(),
        theme: state.theme().clone(),
        files,
        texts: state.texts().to_vec(),
    });
    effects
}

/// Primary action in any non-Import mode: POST the configuration, provided
/// an API host is configured at all.
fn start_config_save(state: &mut PanelState) -> Vec<Effect> {
    let mut effects = vec![Effect::CommitDraft {
        config: state.commit_draft(),
    }];

    if state.api_host().is_none() {
        return effects;
    }

    state.set_busy(true);
    effects.push(Effect::SaveConfig {
        config: state.draft().clone(),
        theme: state.theme().clone(),
    });
    effects
}

/// Shared recovery path for a dead socket: drop the busy flag, warn the
/// user, and ask the shell for a fresh connection.
fn lost_connection(state: &mut PanelState) -> Effect {
    state.set_busy(false);
    state.push_console(ConsoleEntry::new(
        ConsoleSeverity::Warning,
        "Lost connection to backend, trying to reconnect...",
    ));
    state.set_connection(ConnectionState::Connecting);
    Effect::Reconnect
}
