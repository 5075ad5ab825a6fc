//! Character-to-keycode mapping (US layout).
//!
//! Maps the characters the script store may contain onto HID
//! Keyboard/Keypad usage codes.  Characters outside the mapped set
//! translate to the [`KEY_NONE`] sentinel; callers skip them without
//! emitting a report.  That silent-skip policy is deliberate: the typed
//! text simply loses unsupported characters, it never errors.

// HID Keyboard/Keypad usage page codes.
pub const KEY_NONE: u8 = 0x00;
pub const KEY_A: u8 = 0x04;
pub const KEY_T: u8 = 0x17;
pub const KEY_ENTER: u8 = 0x28;
pub const KEY_SPACE: u8 = 0x2C;
pub const KEY_COMMA: u8 = 0x36;
pub const KEY_PERIOD: u8 = 0x37;

// Modifier bits (byte 0 of the keyboard report).
pub const MOD_NONE: u8 = 0x00;
pub const MOD_LEFT_CTRL: u8 = 0x01;
pub const MOD_LEFT_SHIFT: u8 = 0x02;
pub const MOD_LEFT_ALT: u8 = 0x04;

/// One logical key press: a usage code plus the modifiers held with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Keystroke {
    pub keycode: u8,
    pub modifier: u8,
}

impl Keystroke {
    pub const fn new(keycode: u8, modifier: u8) -> Self {
        Self { keycode, modifier }
    }

    /// `false` for the [`KEY_NONE`] sentinel produced by unmapped characters.
    pub const fn is_mappable(&self) -> bool {
        self.keycode != KEY_NONE
    }
}

/// Map a character to its keystroke.
///
/// - `a`..`z` → `KEY_A` + offset, no modifier
/// - `A`..`Z` → same keycode, Left Shift
/// - space, period, comma → dedicated keycodes
/// - anything else → `KEY_NONE` sentinel
pub fn map_char(c: char) -> Keystroke {
    match c {
        'a'..='z' => Keystroke::new(KEY_A + (c as u8 - b'a'), MOD_NONE),
        'A'..='Z' => Keystroke::new(KEY_A + (c as u8 - b'A'), MOD_LEFT_SHIFT),
        ' ' => Keystroke::new(KEY_SPACE, MOD_NONE),
        '.' => Keystroke::new(KEY_PERIOD, MOD_NONE),
        ',' => Keystroke::new(KEY_COMMA, MOD_NONE),
        _ => Keystroke::new(KEY_NONE, MOD_NONE),
    }
}
