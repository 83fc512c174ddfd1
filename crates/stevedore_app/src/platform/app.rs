use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use eframe::egui;
use ingest_logging::ingest_info;
use serde_json::Value;
use stevedore_core::{
    update, ConnectionState, Effect, Msg, PanelMode, PanelSetup, PanelState, PanelViewModel,
    RagConfig,
};

use super::config::{self, AppSettings};
use super::effects::EffectRunner;
use super::{logging, persistence, ui};

/// Top-level shell pages. The config save advances back to Import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Page {
    Import,
    Config,
}

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::Both);

    let settings = AppSettings::from_env();
    let state_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    ingest_info!(
        "Starting stevedore (socket {}, api {:?})",
        settings.socket_url,
        settings.api_host
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1120.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Stevedore",
        options,
        Box::new(move |_cc| Ok(Box::new(StevedoreApp::new(settings, state_dir)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to start ui shell: {err}"))
}

struct StevedoreApp {
    page: Page,
    settings: AppSettings,
    state_dir: PathBuf,
    /// Last committed configuration; the panel draft forks from this.
    committed: RagConfig,
    state: PanelState,
    view: PanelViewModel,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    /// Per-group draft copies the editors mutate directly.
    mirror: BTreeMap<String, Value>,
    text_input: String,
}

impl StevedoreApp {
    fn new(settings: AppSettings, state_dir: PathBuf) -> Self {
        let committed =
            persistence::load_committed(&state_dir).unwrap_or_else(config::default_template);

        let (msg_tx, msg_rx) = mpsc::channel();
        let runner = EffectRunner::new(&settings, msg_tx);

        let mut state = build_panel(&settings, &committed, Page::Import);
        let view = state.view();
        let _ = state.consume_dirty();
        let mirror = mirror_from(&view);

        Self {
            page: Page::Import,
            settings,
            state_dir,
            committed,
            state,
            view,
            runner,
            msg_rx,
            mirror,
            text_input: String::new(),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        if state.consume_dirty() {
            self.view = view;
            self.mirror = mirror_from(&self.view);
        }
        self.state = state;

        for effect in effects {
            self.apply_effect(effect);
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::CommitDraft { config } => {
                persistence::save_committed(&self.state_dir, &config);
                self.committed = config;
            }
            Effect::AdvanceView => self.switch_page(Page::Import),
            engine_effect => self.runner.run(engine_effect),
        }
    }

    /// Rebuild the panel for another page, forking a fresh draft from the
    /// committed configuration.
    fn switch_page(&mut self, page: Page) {
        if self.page == page {
            return;
        }
        let connection = self.view.connection;
        self.page = page;
        self.state = build_panel(&self.settings, &self.committed, page);
        self.view = self.state.view();
        let _ = self.state.consume_dirty();
        self.mirror = mirror_from(&self.view);
        self.text_input.clear();

        // The socket outlives the panel; replay its readiness into the
        // fresh console.
        if connection == ConnectionState::Open {
            self.dispatch(Msg::SocketOpened);
        }
    }
}

impl eframe::App for StevedoreApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
        }

        let out = ui::render(ctx, &self.view, self.page, &mut self.mirror, &mut self.text_input);
        for msg in out.msgs {
            self.dispatch(msg);
        }
        if let Some(page) = out.switch_to {
            self.switch_page(page);
        }

        // Session events arrive off the UI thread; poll for them between frames.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

fn build_panel(settings: &AppSettings, committed: &RagConfig, page: Page) -> PanelState {
    let mode = match page {
        Page::Import => PanelMode::Import,
        Page::Config => PanelMode::ConfigOnly,
    };
    PanelState::new(PanelSetup {
        config: committed.clone(),
        visible_groups: settings.visible_groups.clone(),
        mode,
        action_label: config::action_label(mode).to_string(),
        api_host: settings.api_host.clone(),
        theme: settings.theme.clone(),
    })
}

fn mirror_from(view: &PanelViewModel) -> BTreeMap<String, Value> {
    view.groups
        .iter()
        .map(|group| (group.name.clone(), group.value.clone()))
        .collect()
}
