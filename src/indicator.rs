//! Status LED indicator state.
//!
//! Blink interval encodes the USB mount state; a Caps Lock LED report
//! from the host pins the LED solid on.  All state lives in one owned
//! struct driven by a millisecond clock reading - no globals, single
//! writer.

use crate::config::{BLINK_MOUNTED_MS, BLINK_NOT_MOUNTED_MS, BLINK_SUSPENDED_MS};
use crate::hid::keyboard::LED_CAPS_LOCK;

/// USB device mount state as seen from bus callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MountState {
    NotMounted,
    Mounted,
    Suspended,
}

/// Blink interval for a mount state (ms).
pub const fn blink_interval_ms(mount: MountState) -> u64 {
    match mount {
        MountState::NotMounted => BLINK_NOT_MOUNTED_MS,
        MountState::Mounted => BLINK_MOUNTED_MS,
        MountState::Suspended => BLINK_SUSPENDED_MS,
    }
}

pub struct Indicator {
    mount: MountState,
    /// Current blink interval; 0 means blinking is suppressed.
    interval_ms: u64,
    last_toggle_ms: u64,
    led_on: bool,
    caps_lock: bool,
}

impl Indicator {
    pub const fn new() -> Self {
        Self {
            mount: MountState::NotMounted,
            interval_ms: BLINK_NOT_MOUNTED_MS,
            last_toggle_ms: 0,
            led_on: false,
            caps_lock: false,
        }
    }

    pub fn set_mount_state(&mut self, mount: MountState) {
        self.mount = mount;
        // Caps Lock owns the LED until the host clears it.
        if !self.caps_lock {
            self.interval_ms = blink_interval_ms(mount);
        }
    }

    /// Process the keyboard LED byte the host wrote in its output
    /// report.  Returns the level to drive the LED to, if it changed.
    pub fn on_led_report(&mut self, leds: u8) -> Option<bool> {
        let caps = leds & LED_CAPS_LOCK != 0;
        if caps == self.caps_lock {
            return None;
        }
        self.caps_lock = caps;
        if caps {
            self.interval_ms = 0;
            self.led_on = true;
        } else {
            self.interval_ms = blink_interval_ms(self.mount);
            self.led_on = false;
        }
        Some(self.led_on)
    }

    /// Advance the blinker.  Returns the new LED level when the blink
    /// interval has elapsed, `None` otherwise (or while suppressed).
    pub fn tick(&mut self, now_ms: u64) -> Option<bool> {
        if self.interval_ms == 0 {
            return None;
        }
        if now_ms.wrapping_sub(self.last_toggle_ms) < self.interval_ms {
            return None;
        }
        self.last_toggle_ms = now_ms;
        self.led_on = !self.led_on;
        Some(self.led_on)
    }
}

impl Default for Indicator {
    fn default() -> Self {
        Self::new()
    }
}
