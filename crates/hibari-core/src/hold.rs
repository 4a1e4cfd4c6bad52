//! The single sustained-press slot. At most one synthesized key is ever held;
//! promotion paths in the combo resolver create it, and source release,
//! eviction, or an unwind destroy it, always reversing the Shift side effect
//! the registration applied.

use crate::types::{Key, Output, ShiftHint};
use crate::keycodes::KC_NO;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct HoldState {
    key: Key,
    confirmed_at: Option<Instant>,
    held: bool,
    source_a: Key,
    source_b: Key,
    a_down: bool,
    b_down: bool,
    /// The hold was registered with Shift forced on.
    shift_held: bool,
}

impl Default for HoldState {
    fn default() -> Self {
        Self {
            key: KC_NO,
            confirmed_at: None,
            held: false,
            source_a: KC_NO,
            source_b: KC_NO,
            a_down: false,
            b_down: false,
            shift_held: false,
        }
    }
}

impl HoldState {
    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn key(&self) -> Key {
        self.key
    }

    /// Start holding `key`. `source_b` is `KC_NO` for single-key promotions.
    pub fn begin(&mut self, key: Key, now: Instant, source_a: Key, source_b: Key, shift_held: bool) {
        self.key = key;
        self.confirmed_at = Some(now);
        self.held = true;
        self.source_a = source_a;
        self.source_b = source_b;
        self.a_down = true;
        self.b_down = source_b != KC_NO;
        self.shift_held = shift_held;
    }

    /// Release the held key if any, restoring the Shift state the
    /// registration changed, and zero the slot.
    pub fn clear(&mut self, now: Instant, out: &mut Vec<Output>) {
        if self.held {
            let shift = if self.shift_held {
                ShiftHint::Force
            } else {
                ShiftHint::Suppress
            };
            out.push(Output::EndHold {
                key: self.key,
                shift,
            });
            if let Some(confirmed) = self.confirmed_at {
                debug!(key = self.key.code(), held_ms = now.duration_since(confirmed).as_millis() as u64, "hold released");
            }
        }
        *self = Self::default();
    }

    /// Record a physical release of `key`. Returns true when the hold has
    /// lost a source and must be cleared before the next tick completes.
    pub fn note_release(&mut self, key: Key) -> bool {
        if !self.held {
            return false;
        }
        if key == self.source_a {
            self.a_down = false;
        }
        if key == self.source_b {
            self.b_down = false;
        }
        !self.a_down || (self.source_b != KC_NO && !self.b_down)
    }
}
