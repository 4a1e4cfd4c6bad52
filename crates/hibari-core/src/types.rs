use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Modifier bits carried in the upper byte of a keycode, so a combo output or
/// command-table entry like Ctrl+Z is a single value.
pub const KEY_MOD_CTRL: u16 = 0x0100;
pub const KEY_MOD_SHIFT: u16 = 0x0200;
pub const KEY_MOD_ALT: u16 = 0x0400;
pub const KEY_MOD_GUI: u16 = 0x0800;

/// 16-bit keycode: HID usage id in the low byte, modifier bits above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub u16);

impl Key {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub const fn code(self) -> u16 {
        self.0
    }

    /// The keycode with modifier bits stripped.
    pub const fn base(self) -> Key {
        Key(self.0 & 0x00FF)
    }

    pub const fn ctrl(self) -> Key {
        Key(self.0 | KEY_MOD_CTRL)
    }

    pub const fn shift(self) -> Key {
        Key(self.0 | KEY_MOD_SHIFT)
    }

    pub const fn alt(self) -> Key {
        Key(self.0 | KEY_MOD_ALT)
    }

    pub const fn gui(self) -> Key {
        Key(self.0 | KEY_MOD_GUI)
    }

    pub const fn has_shift(self) -> bool {
        self.0 & KEY_MOD_SHIFT != 0
    }
}

/// Modifier state snapshot taken by the host at the moment of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mods {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub gui: bool,
}

impl Mods {
    pub const fn none() -> Self {
        Self {
            ctrl: false,
            shift: false,
            alt: false,
            gui: false,
        }
    }

    pub const fn shift_only() -> Self {
        Self {
            ctrl: false,
            shift: true,
            alt: false,
            gui: false,
        }
    }

    pub const fn is_empty(self) -> bool {
        !(self.ctrl || self.shift || self.alt || self.gui)
    }

    /// Any modifier besides Shift. Engaging one forces the engine back to the
    /// plain layout so hotkeys land on physical key positions.
    pub const fn besides_shift(self) -> bool {
        self.ctrl || self.alt || self.gui
    }
}

/// How a produced keystroke interacts with the live Shift state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftHint {
    /// Deliver under whatever modifiers are currently held.
    Inherit,
    /// Temporarily add Shift for this keystroke.
    Force,
    /// Temporarily drop Shift for this keystroke.
    Suppress,
}

/// Output command for the host's keystroke primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Press and release in one go.
    Tap { key: Key, shift: ShiftHint },
    /// Register a sustained press; a matching `EndHold` follows later.
    BeginHold { key: Key, shift: ShiftHint },
    /// Release a sustained press, restoring the Shift state the hold changed.
    EndHold { key: Key, shift: ShiftHint },
    /// Literal text (romanized chord output), sent as a string.
    Text(String),
    /// Delete exactly this many characters.
    Backspaces(u8),
}

/// Per-event verdict returned to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// The host should continue its default handling of the physical key
    /// (used for dual-role modifiers, which must still register as modifiers).
    Pass(Vec<Output>),
    /// Event fully consumed; only the carried outputs are emitted.
    Consumed(Vec<Output>),
}

impl KeyAction {
    pub fn outputs(&self) -> &[Output] {
        match self {
            KeyAction::Pass(out) | KeyAction::Consumed(out) => out,
        }
    }

    pub fn is_consumed(&self) -> bool {
        matches!(self, KeyAction::Consumed(_))
    }
}

/// A physical key transition as delivered by the host scan loop.
#[derive(Debug, Clone, Copy)]
pub struct KeyInput {
    pub key: Key,
    pub pressed: bool,
    /// Highest active layer at the time of the event.
    pub layer: u8,
    pub mods: Mods,
    pub at: Instant,
}

/// Result of running a keycode through the transform chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformed {
    pub key: Key,
    /// The produced code only types correctly with Shift suppressed.
    pub needs_unshift: bool,
}
