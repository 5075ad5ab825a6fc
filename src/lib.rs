//! Host-testable core of hid-typist.
//!
//! The keystroke-injection engine is pure logic with no hardware
//! dependencies: character mapping, report construction, keystroke
//! sequencing, the run-once session state machine, and the status LED
//! policy all build and test on the host with `cargo test`.
//!
//! The embedded binary (`main.rs`, `--features embedded`) wires this
//! engine to the nRF52840 USB peripheral through Embassy.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod hid;
pub mod indicator;
pub mod script;
pub mod sequencer;
pub mod session;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
