//! Stevedore core: pure panel state machine and view-model helpers.
mod config;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use config::{
    ConnectionState, ConsoleEntry, ConsoleSeverity, PanelMode, RagConfig, ThemeContext,
};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{PanelSetup, PanelState};
pub use update::update;
pub use view_model::{GroupView, PanelViewModel};
