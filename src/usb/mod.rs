//! USB Device subsystem - presents an HID keyboard to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`.  A single boot-protocol keyboard interface carries the
//! injected keystrokes; the host's LED output report and the bus
//! configured/suspended callbacks are surfaced as signals for the
//! status LED task.

pub mod hid_device;
