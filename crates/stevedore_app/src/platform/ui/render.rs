use std::collections::BTreeMap;

use eframe::egui::{self, Button, RichText, ScrollArea, Spinner};
use serde_json::Value;
use stevedore_core::{ConnectionState, Msg, PanelMode, PanelViewModel};

use super::super::app::Page;
use super::constants::{ERROR_TEXT, SUCCESS_TEXT, TEXT_MUTED, WARNING_TEXT};
use super::{console, group_editor};

/// What one frame of rendering asks the shell to do.
#[derive(Default)]
pub(crate) struct UiOutput {
    pub msgs: Vec<Msg>,
    pub switch_to: Option<Page>,
}

/// Render the whole shell from the current view model. Draft edits go
/// through `mirror`, a per-group copy of the draft owned by the shell.
pub(crate) fn render(
    ctx: &egui::Context,
    view: &PanelViewModel,
    page: Page,
    mirror: &mut BTreeMap<String, Value>,
    text_input: &mut String,
) -> UiOutput {
    let mut out = UiOutput::default();

    egui::TopBottomPanel::top("shell_tabs").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Stevedore");
            ui.separator();
            if ui
                .selectable_label(page == Page::Import, "Import")
                .clicked()
            {
                out.switch_to = Some(Page::Import);
            }
            if ui
                .selectable_label(page == Page::Config, "Configuration")
                .clicked()
            {
                out.switch_to = Some(Page::Config);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let (label, color) = connection_badge(view.connection);
                ui.label(RichText::new(label).color(color).size(12.0));
            });
        });
    });

    egui::SidePanel::right("action_panel")
        .resizable(false)
        .default_width(360.0)
        .show(ctx, |ui| {
            render_actions(ui, view, text_input, &mut out);
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        if view.groups.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.add(Spinner::new().size(24.0));
                ui.label(RichText::new("Loading Components...").color(TEXT_MUTED));
            });
            return;
        }

        ScrollArea::vertical()
            .id_salt("group_panels")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for group in &view.groups {
                    let Some(value) = mirror.get_mut(&group.name) else {
                        continue;
                    };
                    ui.group(|ui| {
                        ui.label(RichText::new(&group.name).strong().size(15.0));
                        ui.add_space(4.0);
                        if group_editor::edit_group(ui, &group.name, value) {
                            out.msgs.push(Msg::GroupUpdated {
                                group: group.name.clone(),
                                value: value.clone(),
                            });
                        }
                    });
                    ui.add_space(8.0);
                }
            });
    });

    out
}

fn render_actions(
    ui: &mut egui::Ui,
    view: &PanelViewModel,
    text_input: &mut String,
    out: &mut UiOutput,
) {
    ui.add_space(8.0);

    ui.label(RichText::new("Files").strong());
    if ui
        .add_enabled(!view.busy, Button::new("Add Files..."))
        .clicked()
    {
        if let Some(paths) = rfd::FileDialog::new().pick_files() {
            out.msgs.push(Msg::FilesPicked(paths));
        }
    }
    for (index, name) in view.files.iter().enumerate() {
        ui.horizontal(|ui| {
            ui.label(RichText::new(name).size(12.0));
            if ui.small_button("Remove").clicked() {
                out.msgs.push(Msg::FileRemoved(index));
            }
        });
    }

    ui.add_space(8.0);
    ui.label(RichText::new("Pasted Text").strong());
    ui.text_edit_multiline(text_input);
    if ui
        .add_enabled(!text_input.trim().is_empty(), Button::new("Add Text"))
        .clicked()
    {
        out.msgs.push(Msg::TextAdded(std::mem::take(text_input)));
    }
    for (index, text) in view.texts.iter().enumerate() {
        ui.horizontal(|ui| {
            ui.label(RichText::new(preview(text)).size(12.0).color(TEXT_MUTED));
            if ui.small_button("Remove").clicked() {
                out.msgs.push(Msg::TextRemoved(index));
            }
        });
    }

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        let label = if view.files.is_empty() {
            view.action_label.clone()
        } else {
            format!("{} ({})", view.action_label, view.files.len())
        };
        if ui
            .add_enabled(!view.busy, Button::new(RichText::new(label).size(14.0)))
            .clicked()
        {
            out.msgs.push(Msg::ActionClicked);
        }
        if view.busy {
            ui.add(Spinner::new().size(14.0));
        }
        if ui.add_enabled(!view.busy, Button::new("Clear")).clicked() {
            out.msgs.push(Msg::ResetClicked);
        }
    });

    if view.mode == PanelMode::Import && !view.console.is_empty() {
        ui.add_space(12.0);
        ui.separator();
        console::render_console(ui, &view.console);
    }
}

fn connection_badge(connection: ConnectionState) -> (&'static str, egui::Color32) {
    match connection {
        ConnectionState::Open => ("connected", SUCCESS_TEXT),
        ConnectionState::Connecting => ("connecting...", TEXT_MUTED),
        ConnectionState::Disconnected => ("disconnected", WARNING_TEXT),
        ConnectionState::Closed { .. } => ("connection lost", ERROR_TEXT),
    }
}

fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > 40 {
        let cut: String = line.chars().take(40).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}
