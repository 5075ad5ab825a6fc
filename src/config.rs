//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, USB identity strings, and indicator intervals
//! live here so they can be tuned in one place.

// Keystroke timing
//
// The engine serializes key presses: down report, settle, up report,
// pause.  The host debounces nothing for us, so the settle delay must be
// long enough for the host input stack to register the press.

/// Delay between a key-down report and its key-up report (ms).
pub const SETTLE_DELAY_MS: u64 = 100;

/// Delay after a key-up report before the next key-down (ms).
pub const INTER_KEY_DELAY_MS: u64 = 1000;

/// Settle delay for the terminal-opening chord (ms).  Longer than a plain
/// keystroke so the desktop environment reliably sees all three keys held.
pub const CHORD_SETTLE_DELAY_MS: u64 = 500;

/// Delay after releasing the chord, giving the terminal time to open and
/// grab keyboard focus before typing starts (ms).
pub const TERMINAL_LAUNCH_DELAY_MS: u64 = 2000;

/// Delay before the very first keystroke of a session, letting the host
/// finish enumeration and settle the input stack (ms).
pub const STARTUP_DELAY_MS: u64 = 2000;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "hid-typist";
pub const USB_PRODUCT: &str = "Scripted HID Keyboard";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 10;

// Status LED
//
// Blink interval encodes the USB mount state:
//   - 250 ms  : device not mounted
//   - 1000 ms : device mounted
//   - 2500 ms : device suspended

pub const BLINK_NOT_MOUNTED_MS: u64 = 250;
pub const BLINK_MOUNTED_MS: u64 = 1000;
pub const BLINK_SUSPENDED_MS: u64 = 2500;

/// How often the LED task wakes to service the blinker (ms).
pub const LED_TICK_MS: u64 = 25;
