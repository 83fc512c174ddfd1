use eframe::egui::Color32;

pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x8a, 0x91, 0x99);
pub const INFO_TEXT: Color32 = Color32::from_rgb(0xc8, 0xd0, 0xd8);
pub const WARNING_TEXT: Color32 = Color32::from_rgb(0xe8, 0xb3, 0x4b);
pub const SUCCESS_TEXT: Color32 = Color32::from_rgb(0x6f, 0xc2, 0x76);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(0xe0, 0x6c, 0x75);
