#![allow(dead_code)]

use serde_json::json;
use stevedore_core::{PanelMode, PanelSetup, PanelState, RagConfig, ThemeContext};

pub fn sample_config() -> RagConfig {
    [
        (
            "Reader".to_string(),
            json!({
                "selected": "PlainReader",
                "components": {
                    "PlainReader": { "chunk_size": 256, "strip_html": true }
                }
            }),
        ),
        (
            "Embedder".to_string(),
            json!({ "selected": "MiniEmbedder" }),
        ),
        (
            "Generator".to_string(),
            json!({ "selected": "EchoGenerator" }),
        ),
    ]
    .into_iter()
    .collect()
}

pub fn setup(mode: PanelMode) -> PanelSetup {
    PanelSetup {
        config: sample_config(),
        // Generator is deliberately left off the allow-list.
        visible_groups: vec!["Reader".to_string(), "Embedder".to_string()],
        mode,
        action_label: match mode {
            PanelMode::Import => "Import".to_string(),
            PanelMode::ConfigOnly => "Save Config".to_string(),
        },
        api_host: Some("http://localhost:8000".to_string()),
        theme: ThemeContext {
            selected: "Default".to_string(),
            themes: json!({}),
        },
    }
}

pub fn import_panel() -> PanelState {
    PanelState::new(setup(PanelMode::Import))
}

pub fn config_panel() -> PanelState {
    PanelState::new(setup(PanelMode::ConfigOnly))
}
