use std::fs;
use std::io;
use std::path::Path;

use ingest_logging::{ingest_error, ingest_info, ingest_warn};
use serde::{Deserialize, Serialize};
use stevedore_core::RagConfig;
use stevedore_engine::AtomicFileWriter;

const STATE_FILENAME: &str = ".stevedore_state.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedState {
    committed: RagConfig,
}

/// Load the committed configuration, if a readable snapshot exists.
pub(crate) fn load_committed(dir: &Path) -> Option<RagConfig> {
    let path = dir.join(STATE_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            ingest_warn!("Failed to read persisted config from {:?}: {}", path, err);
            return None;
        }
    };

    match ron::from_str::<PersistedState>(&content) {
        Ok(state) => {
            ingest_info!("Loaded persisted config from {:?}", path);
            Some(state.committed)
        }
        Err(err) => {
            ingest_warn!("Failed to parse persisted config from {:?}: {}", path, err);
            None
        }
    }
}

/// Save the committed configuration with a temp-file-then-rename write.
pub(crate) fn save_committed(dir: &Path, config: &RagConfig) {
    let state = PersistedState {
        committed: config.clone(),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&state, pretty) {
        Ok(text) => text,
        Err(err) => {
            ingest_error!("Failed to serialize persisted config: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(dir.to_path_buf());
    if let Err(err) = writer.write(STATE_FILENAME, &content) {
        ingest_error!("Failed to write persisted config to {:?}: {}", dir, err);
    }
}
