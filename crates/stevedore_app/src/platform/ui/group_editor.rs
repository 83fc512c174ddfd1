use eframe::egui::{self, CollapsingHeader, DragValue};
use serde_json::Value;

/// Generic editor over one opaque group descriptor.
///
/// Scalars become widgets, nested objects become collapsible sections,
/// arrays and nulls render read-only. Returns true when any field changed.
pub(crate) fn edit_group(ui: &mut egui::Ui, group: &str, value: &mut Value) -> bool {
    edit_value(ui, group, value)
}

fn edit_value(ui: &mut egui::Ui, key_path: &str, value: &mut Value) -> bool {
    let mut changed = false;
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                let child_path = format!("{key_path}.{key}");
                if child.is_object() {
                    CollapsingHeader::new(key.as_str())
                        .id_salt(child_path.as_str())
                        .show(ui, |ui| {
                            changed |= edit_value(ui, &child_path, child);
                        });
                } else {
                    ui.horizontal(|ui| {
                        ui.label(key.as_str());
                        changed |= edit_scalar(ui, child);
                    });
                }
            }
        }
        _ => {
            changed |= edit_scalar(ui, value);
        }
    }
    changed
}

fn edit_scalar(ui: &mut egui::Ui, value: &mut Value) -> bool {
    match value {
        Value::Bool(flag) => ui.checkbox(flag, "").changed(),
        Value::Number(number) => {
            if number.is_i64() || number.is_u64() {
                let mut current = number.as_i64().unwrap_or_default();
                if ui.add(DragValue::new(&mut current)).changed() {
                    *value = Value::from(current);
                    return true;
                }
                false
            } else {
                let mut current = number.as_f64().unwrap_or_default();
                if ui.add(DragValue::new(&mut current).speed(0.1)).changed() {
                    *value = Value::from(current);
                    return true;
                }
                false
            }
        }
        Value::String(text) => ui.text_edit_singleline(text).changed(),
        Value::Array(items) => {
            ui.label(format!("[{} items]", items.len()));
            false
        }
        Value::Null => {
            ui.label("-");
            false
        }
        // Objects are handled by the caller.
        Value::Object(_) => false,
    }
}
