mod console;
mod constants;
mod group_editor;
mod render;

pub(crate) use render::{render, UiOutput};
