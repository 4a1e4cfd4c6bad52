//! Keycode constants: HID usage page 7 ids, JIS-locale aliases, and the
//! custom ranges for the symbol macros and the chord banks.

use crate::types::Key;

pub const KC_NO: Key = Key::new(0x00);

pub const KC_A: Key = Key::new(0x04);
pub const KC_B: Key = Key::new(0x05);
pub const KC_C: Key = Key::new(0x06);
pub const KC_D: Key = Key::new(0x07);
pub const KC_E: Key = Key::new(0x08);
pub const KC_F: Key = Key::new(0x09);
pub const KC_G: Key = Key::new(0x0A);
pub const KC_H: Key = Key::new(0x0B);
pub const KC_I: Key = Key::new(0x0C);
pub const KC_J: Key = Key::new(0x0D);
pub const KC_K: Key = Key::new(0x0E);
pub const KC_L: Key = Key::new(0x0F);
pub const KC_M: Key = Key::new(0x10);
pub const KC_N: Key = Key::new(0x11);
pub const KC_O: Key = Key::new(0x12);
pub const KC_P: Key = Key::new(0x13);
pub const KC_Q: Key = Key::new(0x14);
pub const KC_R: Key = Key::new(0x15);
pub const KC_S: Key = Key::new(0x16);
pub const KC_T: Key = Key::new(0x17);
pub const KC_U: Key = Key::new(0x18);
pub const KC_V: Key = Key::new(0x19);
pub const KC_W: Key = Key::new(0x1A);
pub const KC_X: Key = Key::new(0x1B);
pub const KC_Y: Key = Key::new(0x1C);
pub const KC_Z: Key = Key::new(0x1D);

pub const KC_1: Key = Key::new(0x1E);
pub const KC_2: Key = Key::new(0x1F);
pub const KC_3: Key = Key::new(0x20);
pub const KC_4: Key = Key::new(0x21);
pub const KC_5: Key = Key::new(0x22);
pub const KC_6: Key = Key::new(0x23);
pub const KC_7: Key = Key::new(0x24);
pub const KC_8: Key = Key::new(0x25);
pub const KC_9: Key = Key::new(0x26);
pub const KC_0: Key = Key::new(0x27);

pub const KC_ENT: Key = Key::new(0x28);
pub const KC_ESC: Key = Key::new(0x29);
pub const KC_BSPC: Key = Key::new(0x2A);
pub const KC_TAB: Key = Key::new(0x2B);
pub const KC_SPC: Key = Key::new(0x2C);
pub const KC_MINS: Key = Key::new(0x2D);
pub const KC_EQL: Key = Key::new(0x2E);
pub const KC_LBRC: Key = Key::new(0x2F);
pub const KC_RBRC: Key = Key::new(0x30);
pub const KC_BSLS: Key = Key::new(0x31);
pub const KC_NUHS: Key = Key::new(0x32);
pub const KC_SCLN: Key = Key::new(0x33);
pub const KC_QUOT: Key = Key::new(0x34);
pub const KC_GRV: Key = Key::new(0x35);
pub const KC_COMM: Key = Key::new(0x36);
pub const KC_DOT: Key = Key::new(0x37);
pub const KC_SLSH: Key = Key::new(0x38);
pub const KC_CAPS: Key = Key::new(0x39);

pub const KC_F1: Key = Key::new(0x3A);
pub const KC_F2: Key = Key::new(0x3B);
pub const KC_F3: Key = Key::new(0x3C);
pub const KC_F4: Key = Key::new(0x3D);
pub const KC_F5: Key = Key::new(0x3E);
pub const KC_F6: Key = Key::new(0x3F);
pub const KC_F7: Key = Key::new(0x40);
pub const KC_F8: Key = Key::new(0x41);
pub const KC_F9: Key = Key::new(0x42);
pub const KC_F10: Key = Key::new(0x43);
pub const KC_F11: Key = Key::new(0x44);
pub const KC_F12: Key = Key::new(0x45);

pub const KC_PSCR: Key = Key::new(0x46);
pub const KC_INS: Key = Key::new(0x49);
pub const KC_HOME: Key = Key::new(0x4A);
pub const KC_PGUP: Key = Key::new(0x4B);
pub const KC_DEL: Key = Key::new(0x4C);
pub const KC_END: Key = Key::new(0x4D);
pub const KC_PGDN: Key = Key::new(0x4E);
pub const KC_RGHT: Key = Key::new(0x4F);
pub const KC_LEFT: Key = Key::new(0x50);
pub const KC_DOWN: Key = Key::new(0x51);
pub const KC_UP: Key = Key::new(0x52);

/// International keys used by the JIS layout (Ro and Yen).
pub const KC_INT1: Key = Key::new(0x87);
pub const KC_INT3: Key = Key::new(0x89);

/// Language keys: LANG1 = kana, LANG2 = eisu.
pub const KC_LNG1: Key = Key::new(0x90);
pub const KC_LNG2: Key = Key::new(0x91);

pub const KC_LCTL: Key = Key::new(0xE0);
pub const KC_LSFT: Key = Key::new(0xE1);
pub const KC_LALT: Key = Key::new(0xE2);
pub const KC_LGUI: Key = Key::new(0xE3);
pub const KC_RCTL: Key = Key::new(0xE4);
pub const KC_RSFT: Key = Key::new(0xE5);
pub const KC_RALT: Key = Key::new(0xE6);
pub const KC_RGUI: Key = Key::new(0xE7);

// Shifted aliases for the US layout, used in the remap tables.
pub const KC_EXLM: Key = KC_1.shift();
pub const KC_AT: Key = KC_2.shift();
pub const KC_HASH: Key = KC_3.shift();
pub const KC_DLR: Key = KC_4.shift();
pub const KC_PERC: Key = KC_5.shift();
pub const KC_CIRC: Key = KC_6.shift();
pub const KC_AMPR: Key = KC_7.shift();
pub const KC_ASTR: Key = KC_8.shift();
pub const KC_LPRN: Key = KC_9.shift();
pub const KC_RPRN: Key = KC_0.shift();
pub const KC_UNDS: Key = KC_MINS.shift();
pub const KC_PLUS: Key = KC_EQL.shift();
pub const KC_LCBR: Key = KC_LBRC.shift();
pub const KC_RCBR: Key = KC_RBRC.shift();
pub const KC_PIPE: Key = KC_BSLS.shift();
pub const KC_COLN: Key = KC_SCLN.shift();
pub const KC_DQUO: Key = KC_QUOT.shift();
pub const KC_TILD: Key = KC_GRV.shift();
pub const KC_LABK: Key = KC_COMM.shift();
pub const KC_RABK: Key = KC_DOT.shift();
pub const KC_QUES: Key = KC_SLSH.shift();

// JIS layout aliases: where each glyph actually lives when the OS is set to a
// Japanese keyboard. Unshifted positional moves first, shifted glyphs after.
pub const JP_AT: Key = KC_LBRC;
pub const JP_CIRC: Key = KC_EQL;
pub const JP_LBRC: Key = KC_RBRC;
pub const JP_RBRC: Key = KC_NUHS;
pub const JP_COLN: Key = KC_QUOT;
pub const JP_BSLS: Key = KC_INT1;
pub const JP_YEN: Key = KC_INT3;
pub const JP_MINS: Key = KC_MINS;
pub const JP_SCLN: Key = KC_SCLN;
pub const JP_COMM: Key = KC_COMM;
pub const JP_DOT: Key = KC_DOT;
pub const JP_SLSH: Key = KC_SLSH;

pub const JP_EXLM: Key = KC_1.shift();
pub const JP_DQUO: Key = KC_2.shift();
pub const JP_HASH: Key = KC_3.shift();
pub const JP_DLR: Key = KC_4.shift();
pub const JP_PERC: Key = KC_5.shift();
pub const JP_AMPR: Key = KC_6.shift();
pub const JP_QUOT: Key = KC_7.shift();
pub const JP_LPRN: Key = KC_8.shift();
pub const JP_RPRN: Key = KC_9.shift();
pub const JP_EQL: Key = JP_MINS.shift();
pub const JP_TILD: Key = JP_CIRC.shift();
pub const JP_GRV: Key = JP_AT.shift();
pub const JP_PLUS: Key = JP_SCLN.shift();
pub const JP_ASTR: Key = JP_COLN.shift();
pub const JP_LCBR: Key = JP_LBRC.shift();
pub const JP_RCBR: Key = JP_RBRC.shift();
pub const JP_PIPE: Key = JP_YEN.shift();
pub const JP_UNDS: Key = JP_BSLS.shift();
pub const JP_LABK: Key = JP_COMM.shift();
pub const JP_RABK: Key = JP_DOT.shift();
pub const JP_QUES: Key = JP_SLSH.shift();

// Custom range, above the HID-defined codes.
const CUSTOM_BASE: u16 = 0x7E40;

/// Double-zero macro key.
pub const KC_DZ: Key = Key::new(CUSTOM_BASE);
/// Triple-zero macro key.
pub const KC_TZ: Key = Key::new(CUSTOM_BASE + 1);

// Chord bank. Two hands of phonetic keys plus number-bar and thumb vowels;
// naming follows steno convention (L/R suffix = hand, ST = star keys).
const CHORD_BASE: u16 = 0x7E50;

pub const ST_N1: Key = Key::new(CHORD_BASE);
pub const ST_N2: Key = Key::new(CHORD_BASE + 1);
pub const ST_N3: Key = Key::new(CHORD_BASE + 2);
pub const ST_N4: Key = Key::new(CHORD_BASE + 3);
pub const ST_S1: Key = Key::new(CHORD_BASE + 4);
pub const ST_S2: Key = Key::new(CHORD_BASE + 5);
pub const ST_TL: Key = Key::new(CHORD_BASE + 6);
pub const ST_KL: Key = Key::new(CHORD_BASE + 7);
pub const ST_PL: Key = Key::new(CHORD_BASE + 8);
pub const ST_WL: Key = Key::new(CHORD_BASE + 9);
pub const ST_HL: Key = Key::new(CHORD_BASE + 10);
pub const ST_RL: Key = Key::new(CHORD_BASE + 11);
pub const ST_ST1: Key = Key::new(CHORD_BASE + 12);
pub const ST_ST2: Key = Key::new(CHORD_BASE + 13);
pub const ST_ST3: Key = Key::new(CHORD_BASE + 14);
pub const ST_ST4: Key = Key::new(CHORD_BASE + 15);
pub const ST_FR: Key = Key::new(CHORD_BASE + 16);
pub const ST_PR: Key = Key::new(CHORD_BASE + 17);
pub const ST_LR: Key = Key::new(CHORD_BASE + 18);
pub const ST_TR: Key = Key::new(CHORD_BASE + 19);
pub const ST_DR: Key = Key::new(CHORD_BASE + 20);
pub const ST_RR: Key = Key::new(CHORD_BASE + 21);
pub const ST_BR: Key = Key::new(CHORD_BASE + 22);
pub const ST_GR: Key = Key::new(CHORD_BASE + 23);
pub const ST_SR: Key = Key::new(CHORD_BASE + 24);
pub const ST_ZR: Key = Key::new(CHORD_BASE + 25);
pub const ST_A: Key = Key::new(CHORD_BASE + 26);
pub const ST_O: Key = Key::new(CHORD_BASE + 27);
pub const ST_E: Key = Key::new(CHORD_BASE + 28);
pub const ST_U: Key = Key::new(CHORD_BASE + 29);

/// Physical modifier keycodes are never combo material.
pub fn is_modifier_key(key: Key) -> bool {
    matches!(
        key,
        KC_LCTL | KC_RCTL | KC_LALT | KC_RALT | KC_LGUI | KC_RGUI | KC_LSFT | KC_RSFT
    )
}
