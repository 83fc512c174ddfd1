use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use ingest_logging::{ingest_error, ingest_info, ingest_warn};
use stevedore_core::{ConsoleEntry, ConsoleSeverity, Effect, Msg, RagConfig, ThemeContext};
use stevedore_engine::{
    prepare_documents, ClientSettings, ConfigApi, ConfigPayload, ImportPayload, MessageSeverity,
    PayloadConfig, PrepareSettings, ReqwestConfigClient, SessionEvent, SessionHandle, SessionLink,
    SessionSettings, ThemeSetting,
};

use super::config::AppSettings;

/// Executes core effects against the engine and pumps session events back
/// into the message queue.
pub(crate) struct EffectRunner {
    session: SessionLink,
    config_api: Option<Arc<ReqwestConfigClient>>,
    runtime: tokio::runtime::Runtime,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(settings: &AppSettings, msg_tx: mpsc::Sender<Msg>) -> Self {
        let session = SessionHandle::connect(SessionSettings {
            socket_url: settings.socket_url.clone(),
        });
        let link = session.link();
        spawn_event_pump(session, msg_tx.clone());

        let config_api = settings
            .api_host
            .as_ref()
            .map(|host| Arc::new(ReqwestConfigClient::new(host.clone(), ClientSettings::default())));

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("effect runtime");

        Self {
            session: link,
            config_api,
            runtime,
            msg_tx,
        }
    }

    /// Execute one engine-bound effect. `CommitDraft` and `AdvanceView` are
    /// shell concerns and never reach this point.
    pub fn run(&self, effect: Effect) {
        match effect {
            Effect::StartImport {
                config,
                theme,
                files,
                texts,
            } => self.start_import(config, theme, files, texts),
            Effect::SaveConfig { config, theme } => self.save_config(config, theme),
            Effect::Reconnect => self.session.reconnect(),
            Effect::CommitDraft { .. } | Effect::AdvanceView => {
                ingest_warn!("Shell effect reached the runner: {effect:?}");
            }
        }
    }

    fn start_import(
        &self,
        config: RagConfig,
        theme: ThemeContext,
        files: Vec<PathBuf>,
        texts: Vec<String>,
    ) {
        let session = self.session.clone();
        let msg_tx = self.msg_tx.clone();
        self.runtime.spawn(async move {
            let documents = match prepare_documents(&files, &PrepareSettings::default()).await {
                Ok(documents) => documents,
                Err(err) => {
                    ingest_error!("Preparing import documents failed: {err}");
                    let _ = msg_tx.send(Msg::ImportFailed);
                    return;
                }
            };

            let payload = ImportPayload {
                config: payload_config(config, theme),
                data: documents,
                text_values: texts,
            };
            match serde_json::to_string(&payload) {
                Ok(text) => session.send(text),
                Err(err) => {
                    ingest_error!("Serializing import payload failed: {err}");
                    let _ = msg_tx.send(Msg::ImportFailed);
                }
            }
        });
    }

    fn save_config(&self, config: RagConfig, theme: ThemeContext) {
        let Some(api) = self.config_api.clone() else {
            // Core gates on a configured host; this is belt and braces.
            let _ = self.msg_tx.send(Msg::ConfigSaved { ok: false });
            return;
        };
        let msg_tx = self.msg_tx.clone();
        self.runtime.spawn(async move {
            let payload = ConfigPayload {
                config: payload_config(config, theme),
            };
            let ok = match api.set_config(&payload).await {
                Ok(body) => {
                    ingest_info!("Configuration saved: {body}");
                    true
                }
                Err(err) => {
                    ingest_error!("Saving configuration failed: {err}");
                    false
                }
            };
            let _ = msg_tx.send(Msg::ConfigSaved { ok });
        });
    }
}

fn payload_config(config: RagConfig, theme: ThemeContext) -> PayloadConfig {
    PayloadConfig {
        rag: serde_json::to_value(config).unwrap_or_default(),
        setting: ThemeSetting {
            selected_theme: theme.selected,
            themes: theme.themes,
        },
    }
}

fn spawn_event_pump(session: SessionHandle, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || loop {
        if let Some(event) = session.try_recv() {
            let msg = match event {
                SessionEvent::Opened => Msg::SocketOpened,
                SessionEvent::Console(push) => Msg::ConsoleMessage(ConsoleEntry::new(
                    map_severity(push.severity),
                    push.message,
                )),
                SessionEvent::Finished => Msg::ImportFinished,
                SessionEvent::Closed { clean } => Msg::SocketClosed { clean },
                SessionEvent::SendFailed => Msg::SendFailed,
            };
            if msg_tx.send(msg).is_err() {
                return;
            }
        } else {
            thread::sleep(Duration::from_millis(20));
        }
    });
}

fn map_severity(severity: MessageSeverity) -> ConsoleSeverity {
    match severity {
        MessageSeverity::Info => ConsoleSeverity::Info,
        MessageSeverity::Warning => ConsoleSeverity::Warning,
        MessageSeverity::Success => ConsoleSeverity::Success,
        MessageSeverity::Error => ConsoleSeverity::Error,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn severities_map_one_to_one() {
        assert_eq!(map_severity(MessageSeverity::Info), ConsoleSeverity::Info);
        assert_eq!(
            map_severity(MessageSeverity::Warning),
            ConsoleSeverity::Warning
        );
        assert_eq!(
            map_severity(MessageSeverity::Success),
            ConsoleSeverity::Success
        );
        assert_eq!(map_severity(MessageSeverity::Error), ConsoleSeverity::Error);
    }

    #[test]
    fn payload_config_carries_theme_and_groups() {
        let config: RagConfig = [("Reader".to_string(), json!({ "selected": "PlainReader" }))]
            .into_iter()
            .collect();
        let theme = ThemeContext {
            selected: "Dark".to_string(),
            themes: json!({ "Dark": {} }),
        };

        let payload = payload_config(config, theme);
        assert_eq!(
            payload.rag,
            json!({ "Reader": { "selected": "PlainReader" } })
        );
        assert_eq!(payload.setting.selected_theme, "Dark");
    }
}
