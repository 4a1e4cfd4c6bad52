//! Chord accumulation and transcription. Level-triggered: keys collect while
//! any chord key is down, and the whole set converts in one shot when the
//! last one lifts. Conversion tries the command table, then the phonetic
//! reading, then falls back to tapping the raw keys so nothing is lost.

use crate::commands::{self, ChordCommand};
use crate::keycodes::*;
use crate::phonetic;
use crate::types::{Key, Output, ShiftHint};
use std::collections::VecDeque;
use tracing::debug;

pub const CHORD_MAX_KEYS: usize = 32;
pub const HISTORY_SIZE: usize = 20;
/// Characters deleted by undo when there is no history to consult.
const UNDO_FALLBACK_BACKSPACES: u8 = 2;

// Pattern id bit order, one label per bit, left bank then right bank.
const LABELS_LEFT: [&str; 12] = ["S", "T", "K", "N", "Y", "I", "A", "U", "n", "t", "k", "#"];
const LABELS_RIGHT: [&str; 12] = ["S", "T", "K", "N", "Y", "I", "A", "U", "n", "t", "k", "*"];

/// Physical chord-bank key to its pattern bit. Paired physical keys (split
/// number bar, doubled S and star keys) share a bit.
fn chord_key_bit(key: Key) -> Option<u8> {
    let bit = match key {
        ST_S1 | ST_S2 => 0,
        ST_TL => 1,
        ST_KL => 2,
        ST_WL => 3,
        ST_PL => 4,
        ST_HL => 5,
        ST_RL => 6,
        ST_ST1 | ST_ST2 => 7,
        ST_N3 => 8,
        ST_A => 9,
        ST_O => 10,
        ST_N1 | ST_N2 => 11,
        ST_SR | ST_TR => 12,
        ST_LR => 13,
        ST_GR => 14,
        ST_BR => 15,
        ST_PR => 16,
        ST_FR => 17,
        ST_RR => 18,
        ST_ST3 | ST_ST4 => 19,
        ST_N4 => 20,
        ST_U => 21,
        ST_E => 22,
        ST_DR | ST_ZR => 23,
        _ => return None,
    };
    Some(bit)
}

pub fn is_chord_key(key: Key) -> bool {
    chord_key_bit(key).is_some()
}

#[derive(Debug, Clone)]
struct HistoryEntry {
    text: String,
    len: u8,
}

/// Accumulates simultaneously-down chord keys and transcribes on release.
pub struct ChordTranscriber {
    chord: Vec<Key>,
    down_count: u8,
    active: bool,
    history: VecDeque<HistoryEntry>,
}

impl Default for ChordTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl ChordTranscriber {
    pub fn new() -> Self {
        Self {
            chord: Vec::with_capacity(CHORD_MAX_KEYS),
            down_count: 0,
            active: false,
            history: VecDeque::with_capacity(HISTORY_SIZE),
        }
    }

    pub fn on_press(&mut self, key: Key) {
        if !self.active {
            self.active = true;
        }
        if self.chord.len() < CHORD_MAX_KEYS && !self.chord.contains(&key) {
            self.chord.push(key);
        }
        self.down_count = self.down_count.saturating_add(1);
    }

    pub fn on_release(&mut self, _key: Key, out: &mut Vec<Output>) {
        if self.down_count > 0 {
            self.down_count -= 1;
        }
        if self.active && self.down_count == 0 {
            self.convert(out);
            // Unconditional: a failed chord must never block the next one.
            self.reset();
        }
    }

    /// Drop any half-formed chord without emitting.
    pub fn reset(&mut self) {
        self.chord.clear();
        self.down_count = 0;
        self.active = false;
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Canonical pattern id: left-bank labels, one separator, right-bank
    /// labels. The separator rides along even for one-handed chords, so its
    /// position tells left-only from right-only.
    fn pattern(&self) -> Option<String> {
        if self.chord.is_empty() {
            return None;
        }
        let mut bits: u32 = 0;
        for key in &self.chord {
            if let Some(b) = chord_key_bit(*key) {
                bits |= 1 << b;
            }
        }
        if bits == 0 {
            return None;
        }
        let mut out = String::new();
        for (i, label) in LABELS_LEFT.iter().enumerate() {
            if bits & (1 << i) != 0 {
                out.push_str(label);
            }
        }
        out.push('-');
        for (i, label) in LABELS_RIGHT.iter().enumerate() {
            if bits & (1 << (12 + i)) != 0 {
                out.push_str(label);
            }
        }
        Some(out)
    }

    fn convert(&mut self, out: &mut Vec<Output>) {
        let Some(pattern) = self.pattern() else {
            return;
        };
        debug!(%pattern, "chord released");

        if let Some(cmd) = commands::lookup(&pattern) {
            match cmd {
                ChordCommand::Repeat => {
                    if let Some(last) = self.history.back() {
                        out.push(Output::Text(last.text.clone()));
                    }
                }
                ChordCommand::Undo => {
                    if let Some(last) = self.history.pop_back() {
                        out.push(Output::Backspaces(last.len));
                    } else {
                        out.push(Output::Backspaces(UNDO_FALLBACK_BACKSPACES));
                    }
                }
                ChordCommand::Key(key) => {
                    out.push(Output::Tap {
                        key,
                        shift: ShiftHint::Inherit,
                    });
                }
                ChordCommand::Text(s) => {
                    out.push(Output::Text(s.to_string()));
                    self.push_history(s.to_string(), s.chars().count() as u8);
                }
            }
            return;
        }

        match phonetic::transliterate(&pattern) {
            Some(r) => {
                out.push(Output::Text(r.romaji.clone()));
                self.push_history(r.romaji, r.kana_len);
            }
            None => {
                debug!(%pattern, "no reading, passing keys through");
                self.passthrough(out);
            }
        }
    }

    fn passthrough(&self, out: &mut Vec<Output>) {
        for key in &self.chord {
            out.push(Output::Tap {
                key: *key,
                shift: ShiftHint::Inherit,
            });
        }
    }

    fn push_history(&mut self, text: String, len: u8) {
        if self.history.len() == HISTORY_SIZE {
            self.history.pop_front();
        }
        self.history.push_back(HistoryEntry { text, len });
    }
}
