use serde_json::json;
use stevedore_core::{PanelMode, RagConfig, ThemeContext};

pub(crate) const API_HOST_VAR: &str = "STEVEDORE_API_HOST";
pub(crate) const SOCKET_URL_VAR: &str = "STEVEDORE_WS_URL";

const DEFAULT_API_HOST: &str = "http://localhost:8000";
const DEFAULT_SOCKET_URL: &str = "ws://localhost:8000/ws/import_files";

/// Hosts and panel options resolved once at startup.
#[derive(Debug, Clone)]
pub(crate) struct AppSettings {
    /// Absent host disables the config-only save.
    pub api_host: Option<String>,
    pub socket_url: String,
    pub visible_groups: Vec<String>,
    pub theme: ThemeContext,
}

impl AppSettings {
    /// Resolve hosts from the environment, with localhost defaults. Setting
    /// a variable to the empty string opts out of it entirely.
    pub fn from_env() -> Self {
        Self {
            api_host: env_host(API_HOST_VAR, Some(DEFAULT_API_HOST)),
            socket_url: env_host(SOCKET_URL_VAR, Some(DEFAULT_SOCKET_URL))
                .unwrap_or_else(|| DEFAULT_SOCKET_URL.to_string()),
            visible_groups: vec![
                "Reader".to_string(),
                "Chunker".to_string(),
                "Embedder".to_string(),
                "Retriever".to_string(),
                "Generator".to_string(),
            ],
            theme: ThemeContext {
                selected: "Default".to_string(),
                themes: json!({}),
            },
        }
    }
}

/// Primary-action label for a panel mode.
pub(crate) fn action_label(mode: PanelMode) -> &'static str {
    match mode {
        PanelMode::Import => "Import",
        PanelMode::ConfigOnly => "Save Config",
    }
}

fn env_host(var: &str, default: Option<&str>) -> Option<String> {
    match std::env::var(var) {
        Ok(value) if value.trim().is_empty() => None,
        Ok(value) => Some(value),
        Err(_) => default.map(str::to_string),
    }
}

/// Built-in configuration template used until a persisted one exists, so the
/// panel is usable before the backend ever responds.
pub(crate) fn default_template() -> RagConfig {
    [
        (
            "Reader".to_string(),
            json!({
                "selected": "PlainReader",
                "components": {
                    "PlainReader": { "strip_html": true },
                    "PdfReader": { "ocr": false },
                }
            }),
        ),
        (
            "Chunker".to_string(),
            json!({
                "selected": "TokenChunker",
                "components": {
                    "TokenChunker": { "chunk_size": 250, "overlap": 50 },
                    "SentenceChunker": { "max_sentences": 10 },
                }
            }),
        ),
        (
            "Embedder".to_string(),
            json!({
                "selected": "MiniLMEmbedder",
                "components": {
                    "MiniLMEmbedder": { "batch_size": 32 },
                }
            }),
        ),
        (
            "Retriever".to_string(),
            json!({
                "selected": "WindowRetriever",
                "components": {
                    "WindowRetriever": { "limit": 8, "window": 2 },
                }
            }),
        ),
        (
            "Generator".to_string(),
            json!({
                "selected": "ChatGenerator",
                "components": {
                    "ChatGenerator": { "model": "default", "temperature": 0.1 },
                }
            }),
        ),
    ]
    .into_iter()
    .collect()
}
