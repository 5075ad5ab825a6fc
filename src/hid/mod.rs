//! HID keyboard report types and the character-to-keycode mapping layer.

pub mod keyboard;
pub mod keymap;
