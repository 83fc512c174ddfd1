use eframe::egui::{self, Color32, RichText, ScrollArea};
use stevedore_core::{ConsoleEntry, ConsoleSeverity};

use super::constants::{ERROR_TEXT, INFO_TEXT, SUCCESS_TEXT, WARNING_TEXT};

/// Scrolling console of import progress messages.
pub(crate) fn render_console(ui: &mut egui::Ui, entries: &[ConsoleEntry]) {
    ScrollArea::vertical()
        .id_salt("import_console")
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .max_height(360.0)
        .show(ui, |ui| {
            for entry in entries {
                ui.label(
                    RichText::new(format!(
                        "({}) {}",
                        severity_label(entry.severity),
                        entry.message
                    ))
                    .monospace()
                    .size(12.0)
                    .color(severity_color(entry.severity)),
                );
            }
        });
}

fn severity_label(severity: ConsoleSeverity) -> &'static str {
    match severity {
        ConsoleSeverity::Info => "INFO",
        ConsoleSeverity::Warning => "WARNING",
        ConsoleSeverity::Success => "SUCCESS",
        ConsoleSeverity::Error => "ERROR",
    }
}

fn severity_color(severity: ConsoleSeverity) -> Color32 {
    match severity {
        ConsoleSeverity::Info => INFO_TEXT,
        ConsoleSeverity::Warning => WARNING_TEXT,
        ConsoleSeverity::Success => SUCCESS_TEXT,
        ConsoleSeverity::Error => ERROR_TEXT,
    }
}
