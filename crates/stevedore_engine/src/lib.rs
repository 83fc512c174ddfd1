//! Stevedore engine: import session IO and backend calls.
mod config_client;
mod documents;
mod persist;
mod session;
mod types;

pub use config_client::{ClientSettings, ConfigApi, ReqwestConfigClient};
pub use documents::{prepare_documents, PrepareSettings};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use session::{SessionHandle, SessionLink, SessionSettings};
pub use types::{
    ConfigError, ConfigFailure, ConfigPayload, FileDocument, ImportPayload, MessageSeverity,
    PayloadConfig, PrepareError, PushMessage, SessionEvent, ThemeSetting, STOP_SIGNAL,
};
