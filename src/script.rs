//! Compile-time script store.
//!
//! The ordered list of shell command lines the device types after the
//! terminal opens.  Each line is implicitly followed by an Enter
//! keystroke.  The store is fixed at build time and read-only at run
//! time; there is no configuration surface for it.
//!
//! Only characters the keymap covers (letters, space, period, comma)
//! survive typing - anything else is silently dropped.

/// The lines typed into the freshly opened terminal, in order.
pub const SCRIPT_LINES: &[&str] = &[
    "cd",
    "cd Desktop",
    "gedit notes.txt",
    "Hello world from a scripted keyboard",
];
