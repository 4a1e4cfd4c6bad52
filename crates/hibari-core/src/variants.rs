//! Built-in keymap variants. The engine itself is variant-agnostic; a
//! `Variant` is pure data (combo table, remap tables, routing rules) and is
//! validated once at engine construction.

use crate::combo::ComboPair;
use crate::keycodes::*;
use crate::transform::{AltMapping, SymbolMapping, TransformChain};
use crate::types::Key;
use thiserror::Error;

pub const LAYER_BASE: u8 = 0;
pub const LAYER_CHORD: u8 = 1;
pub const LAYER_NUMBER: u8 = 2;
pub const LAYER_FUNCTION: u8 = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VariantError {
    #[error("combo pair maps key {0:#06x} to itself")]
    SelfPair(u16),
    #[error("duplicate combo pair {a:#06x}+{b:#06x} on layer {layer}")]
    DuplicatePair { a: u16, b: u16, layer: u8 },
    #[error("duplicate dual-role binding for key {0:#06x}")]
    DuplicateDualRole(u16),
    #[error("dual-role key {0:#06x} also appears in the combo table")]
    DualRoleInComboTable(u16),
}

/// Everything that distinguishes one keyboard variant from another.
#[derive(Debug, Clone, Copy)]
pub struct Variant {
    pub name: &'static str,
    pub base_layer: u8,
    /// Layer on which chord transcription runs, if the variant has one.
    pub chord_layer: Option<u8>,
    pub combos: &'static [ComboPair],
    pub alt_layout: &'static [AltMapping],
    pub symbol_layer: &'static [SymbolMapping],
    /// Layers where a shifted symbol-layer hit forces Shift suppression.
    pub unshift_layers: &'static [u8],
    /// Whether the variant targets a JIS host.
    pub locale_remap: bool,
    /// `(modifier key, tap key)` dual-role bindings.
    pub dual_role_shifts: &'static [(Key, Key)],
    /// Keys routed through the resolver even without a combo entry.
    pub extra_candidates: &'static [Key],
    /// Keys that are candidates only on one specific layer.
    pub layer_candidates: &'static [(Key, u8)],
    /// Keys that are candidates only under Shift with the symbol layer on.
    pub shifted_symbol_candidates: &'static [Key],
    /// Layers on which the layout override never engages.
    pub override_exempt_layers: &'static [u8],
}

impl Variant {
    pub fn chain(&self) -> TransformChain {
        TransformChain::new(
            self.alt_layout,
            self.symbol_layer,
            self.base_layer,
            self.unshift_layers,
            self.locale_remap,
        )
    }

    /// Reject degenerate tables before the engine ever runs on them.
    pub fn validate(&self) -> Result<(), VariantError> {
        for (i, p) in self.combos.iter().enumerate() {
            if p.a == p.b {
                return Err(VariantError::SelfPair(p.a.code()));
            }
            for q in &self.combos[i + 1..] {
                let same = q.layer == p.layer
                    && ((q.a == p.a && q.b == p.b) || (q.a == p.b && q.b == p.a));
                if same {
                    return Err(VariantError::DuplicatePair {
                        a: p.a.code(),
                        b: p.b.code(),
                        layer: p.layer,
                    });
                }
            }
        }
        for (i, (key, _)) in self.dual_role_shifts.iter().enumerate() {
            if self.dual_role_shifts[i + 1..].iter().any(|(k, _)| k == key) {
                return Err(VariantError::DuplicateDualRole(key.code()));
            }
            if self.combos.iter().any(|p| p.a == *key || p.b == *key) {
                return Err(VariantError::DualRoleInComboTable(key.code()));
            }
        }
        Ok(())
    }
}

// Vertical-pair combos on the base layer recover the missing home row of the
// two-row physical grid; the number-layer set mirrors it for the numpad half.
static COMBOS: &[ComboPair] = &[
    ComboPair { a: KC_Q, b: KC_Z, out: KC_A, layer: LAYER_BASE },
    ComboPair { a: KC_W, b: KC_X, out: KC_S, layer: LAYER_BASE },
    ComboPair { a: KC_E, b: KC_C, out: KC_D, layer: LAYER_BASE },
    ComboPair { a: KC_R, b: KC_V, out: KC_F, layer: LAYER_BASE },
    ComboPair { a: KC_T, b: KC_B, out: KC_G, layer: LAYER_BASE },
    ComboPair { a: KC_Y, b: KC_N, out: KC_H, layer: LAYER_BASE },
    ComboPair { a: KC_U, b: KC_M, out: KC_J, layer: LAYER_BASE },
    ComboPair { a: KC_I, b: KC_COMM, out: KC_K, layer: LAYER_BASE },
    ComboPair { a: KC_O, b: KC_DOT, out: KC_L, layer: LAYER_BASE },
    ComboPair { a: KC_P, b: KC_SLSH, out: KC_SCLN, layer: LAYER_BASE },
    ComboPair { a: KC_MINS, b: KC_BSLS, out: KC_QUOT, layer: LAYER_BASE },
    ComboPair { a: KC_LBRC, b: KC_RBRC, out: KC_EQL, layer: LAYER_BASE },
    ComboPair { a: KC_V, b: KC_B, out: KC_TAB, layer: LAYER_BASE },
    ComboPair { a: KC_R, b: KC_T, out: KC_ESC, layer: LAYER_BASE },
    ComboPair { a: KC_N, b: KC_M, out: KC_BSPC, layer: LAYER_BASE },
    ComboPair { a: KC_Y, b: KC_U, out: KC_DEL, layer: LAYER_BASE },

    ComboPair { a: KC_1, b: KC_7, out: KC_4, layer: LAYER_NUMBER },
    ComboPair { a: KC_2, b: KC_8, out: KC_5, layer: LAYER_NUMBER },
    ComboPair { a: KC_3, b: KC_9, out: KC_6, layer: LAYER_NUMBER },
    ComboPair { a: KC_0, b: KC_DZ, out: KC_TZ, layer: LAYER_NUMBER },
    ComboPair { a: KC_DOT, b: KC_MINS, out: KC_COMM, layer: LAYER_NUMBER },
    ComboPair { a: KC_9, b: KC_DOT, out: KC_TAB, layer: LAYER_NUMBER },
    ComboPair { a: KC_3, b: KC_MINS, out: KC_ESC, layer: LAYER_NUMBER },
    ComboPair { a: KC_PGDN, b: KC_LEFT, out: KC_BSPC, layer: LAYER_NUMBER },
    ComboPair { a: KC_PGUP, b: KC_HOME, out: KC_DEL, layer: LAYER_NUMBER },
];

static DUAL_ROLE_SHIFTS: &[(Key, Key)] = &[(KC_LSFT, KC_SPC), (KC_RSFT, KC_ENT)];

static OVERRIDE_EXEMPT: &[u8] = &[LAYER_NUMBER, LAYER_FUNCTION];

// Graphite letter arrangement over the physical grid.
static GRAPHITE_ALT: &[AltMapping] = &[
    AltMapping { base: KC_Q, unshifted: KC_Q, shifted: KC_Q },
    AltMapping { base: KC_W, unshifted: KC_P, shifted: KC_P },
    AltMapping { base: KC_E, unshifted: KC_U, shifted: KC_U },
    AltMapping { base: KC_R, unshifted: KC_Y, shifted: KC_Y },
    AltMapping { base: KC_T, unshifted: KC_COMM, shifted: KC_LABK },
    AltMapping { base: KC_Y, unshifted: KC_J, shifted: KC_J },
    AltMapping { base: KC_U, unshifted: KC_D, shifted: KC_D },
    AltMapping { base: KC_I, unshifted: KC_H, shifted: KC_H },
    AltMapping { base: KC_O, unshifted: KC_G, shifted: KC_G },
    AltMapping { base: KC_P, unshifted: KC_W, shifted: KC_W },
    AltMapping { base: KC_MINS, unshifted: KC_MINS, shifted: KC_UNDS },

    AltMapping { base: KC_A, unshifted: KC_I, shifted: KC_I },
    AltMapping { base: KC_S, unshifted: KC_O, shifted: KC_O },
    AltMapping { base: KC_D, unshifted: KC_E, shifted: KC_E },
    AltMapping { base: KC_F, unshifted: KC_A, shifted: KC_A },
    AltMapping { base: KC_G, unshifted: KC_DOT, shifted: KC_RABK },
    AltMapping { base: KC_H, unshifted: KC_K, shifted: KC_K },
    AltMapping { base: KC_J, unshifted: KC_T, shifted: KC_T },
    AltMapping { base: KC_K, unshifted: KC_N, shifted: KC_N },
    AltMapping { base: KC_L, unshifted: KC_S, shifted: KC_S },
    AltMapping { base: KC_SCLN, unshifted: KC_R, shifted: KC_R },
    AltMapping { base: KC_QUOT, unshifted: KC_QUOT, shifted: KC_DQUO },

    AltMapping { base: KC_Z, unshifted: KC_Z, shifted: KC_Z },
    AltMapping { base: KC_X, unshifted: KC_X, shifted: KC_X },
    AltMapping { base: KC_C, unshifted: KC_SLSH, shifted: KC_QUES },
    AltMapping { base: KC_V, unshifted: KC_C, shifted: KC_C },
    AltMapping { base: KC_B, unshifted: KC_SCLN, shifted: KC_COLN },
    AltMapping { base: KC_N, unshifted: KC_M, shifted: KC_M },
    AltMapping { base: KC_M, unshifted: KC_L, shifted: KC_L },
    AltMapping { base: KC_COMM, unshifted: KC_F, shifted: KC_F },
    AltMapping { base: KC_DOT, unshifted: KC_B, shifted: KC_B },
    AltMapping { base: KC_SLSH, unshifted: KC_V, shifted: KC_V },
    AltMapping { base: KC_BSLS, unshifted: KC_BSLS, shifted: KC_PIPE },
];

// Workman letter arrangement.
static WORKMAN_ALT: &[AltMapping] = &[
    AltMapping { base: KC_Q, unshifted: KC_Q, shifted: KC_Q },
    AltMapping { base: KC_W, unshifted: KC_D, shifted: KC_D },
    AltMapping { base: KC_E, unshifted: KC_R, shifted: KC_R },
    AltMapping { base: KC_R, unshifted: KC_W, shifted: KC_W },
    AltMapping { base: KC_T, unshifted: KC_B, shifted: KC_B },
    AltMapping { base: KC_Y, unshifted: KC_J, shifted: KC_J },
    AltMapping { base: KC_U, unshifted: KC_F, shifted: KC_F },
    AltMapping { base: KC_I, unshifted: KC_U, shifted: KC_U },
    AltMapping { base: KC_O, unshifted: KC_P, shifted: KC_P },
    AltMapping { base: KC_P, unshifted: KC_SCLN, shifted: KC_COLN },
    AltMapping { base: KC_MINS, unshifted: KC_MINS, shifted: KC_UNDS },

    AltMapping { base: KC_A, unshifted: KC_A, shifted: KC_A },
    AltMapping { base: KC_S, unshifted: KC_S, shifted: KC_S },
    AltMapping { base: KC_D, unshifted: KC_H, shifted: KC_H },
    AltMapping { base: KC_F, unshifted: KC_T, shifted: KC_T },
    AltMapping { base: KC_G, unshifted: KC_G, shifted: KC_G },
    AltMapping { base: KC_H, unshifted: KC_Y, shifted: KC_Y },
    AltMapping { base: KC_J, unshifted: KC_N, shifted: KC_N },
    AltMapping { base: KC_K, unshifted: KC_E, shifted: KC_E },
    AltMapping { base: KC_L, unshifted: KC_O, shifted: KC_O },
    AltMapping { base: KC_SCLN, unshifted: KC_I, shifted: KC_I },
    AltMapping { base: KC_QUOT, unshifted: KC_QUOT, shifted: KC_DQUO },

    AltMapping { base: KC_Z, unshifted: KC_Z, shifted: KC_Z },
    AltMapping { base: KC_X, unshifted: KC_X, shifted: KC_X },
    AltMapping { base: KC_C, unshifted: KC_M, shifted: KC_M },
    AltMapping { base: KC_V, unshifted: KC_C, shifted: KC_C },
    AltMapping { base: KC_B, unshifted: KC_V, shifted: KC_V },
    AltMapping { base: KC_N, unshifted: KC_K, shifted: KC_K },
    AltMapping { base: KC_M, unshifted: KC_L, shifted: KC_L },
    AltMapping { base: KC_COMM, unshifted: KC_COMM, shifted: KC_LABK },
    AltMapping { base: KC_DOT, unshifted: KC_DOT, shifted: KC_RABK },
    AltMapping { base: KC_SLSH, unshifted: KC_SLSH, shifted: KC_QUES },
    AltMapping { base: KC_BSLS, unshifted: KC_BSLS, shifted: KC_PIPE },
];

// Thumb cluster doubles as language switching on the base layer; the number
// layer carries the bracket/operator plane under Shift.
static JIS_GRAPHITE_SYMBOLS: &[SymbolMapping] = &[
    SymbolMapping { base: KC_LBRC, unshifted: KC_LNG2, shifted: KC_EXLM, layer: LAYER_BASE },
    SymbolMapping { base: KC_RBRC, unshifted: KC_LNG1, shifted: KC_QUES, layer: LAYER_BASE },
    SymbolMapping { base: KC_EQL, unshifted: KC_AT, shifted: KC_HASH, layer: LAYER_BASE },

    SymbolMapping { base: KC_DZ, unshifted: KC_DZ, shifted: KC_PERC, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_1, unshifted: KC_1, shifted: KC_LCBR, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_2, unshifted: KC_2, shifted: KC_LBRC, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_3, unshifted: KC_3, shifted: KC_LPRN, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_MINS, unshifted: KC_MINS, shifted: KC_LABK, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_TZ, unshifted: KC_TZ, shifted: KC_SLSH, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_4, unshifted: KC_4, shifted: KC_ASTR, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_5, unshifted: KC_5, shifted: KC_EQL, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_6, unshifted: KC_6, shifted: KC_PLUS, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_COMM, unshifted: KC_COMM, shifted: KC_CIRC, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_0, unshifted: KC_0, shifted: KC_DLR, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_7, unshifted: KC_7, shifted: KC_RCBR, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_8, unshifted: KC_8, shifted: KC_RBRC, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_9, unshifted: KC_9, shifted: KC_RPRN, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_DOT, unshifted: KC_DOT, shifted: KC_RABK, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_LNG2, unshifted: KC_AMPR, shifted: KC_AMPR, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_LNG1, unshifted: KC_PIPE, shifted: KC_PIPE, layer: LAYER_NUMBER },
];

static US_WORKMAN_SYMBOLS: &[SymbolMapping] = &[
    SymbolMapping { base: KC_LBRC, unshifted: KC_EXLM, shifted: KC_AMPR, layer: LAYER_BASE },
    SymbolMapping { base: KC_RBRC, unshifted: KC_QUES, shifted: KC_PIPE, layer: LAYER_BASE },
    SymbolMapping { base: KC_EQL, unshifted: KC_HASH, shifted: KC_AT, layer: LAYER_BASE },

    SymbolMapping { base: KC_LBRC, unshifted: KC_EXLM, shifted: KC_AMPR, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_RBRC, unshifted: KC_QUES, shifted: KC_PIPE, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_EQL, unshifted: KC_HASH, shifted: KC_AT, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_DZ, unshifted: KC_DZ, shifted: KC_PERC, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_1, unshifted: KC_1, shifted: KC_LCBR, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_2, unshifted: KC_2, shifted: KC_LBRC, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_3, unshifted: KC_3, shifted: KC_LPRN, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_MINS, unshifted: KC_MINS, shifted: KC_LABK, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_TZ, unshifted: KC_TZ, shifted: KC_SLSH, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_4, unshifted: KC_4, shifted: KC_ASTR, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_5, unshifted: KC_5, shifted: KC_EQL, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_6, unshifted: KC_6, shifted: KC_PLUS, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_COMM, unshifted: KC_COMM, shifted: KC_CIRC, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_0, unshifted: KC_0, shifted: KC_DLR, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_7, unshifted: KC_7, shifted: KC_RCBR, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_8, unshifted: KC_8, shifted: KC_RBRC, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_9, unshifted: KC_9, shifted: KC_RPRN, layer: LAYER_NUMBER },
    SymbolMapping { base: KC_DOT, unshifted: KC_DOT, shifted: KC_RABK, layer: LAYER_NUMBER },
];

static UNSHIFT_LAYERS: &[u8] = &[LAYER_BASE, LAYER_NUMBER];

/// Graphite letters on a JIS host, with the chord layer enabled.
pub static JIS_GRAPHITE: Variant = Variant {
    name: "jis-graphite",
    base_layer: LAYER_BASE,
    chord_layer: Some(LAYER_CHORD),
    combos: COMBOS,
    alt_layout: GRAPHITE_ALT,
    symbol_layer: JIS_GRAPHITE_SYMBOLS,
    unshift_layers: UNSHIFT_LAYERS,
    locale_remap: true,
    dual_role_shifts: DUAL_ROLE_SHIFTS,
    extra_candidates: &[KC_GRV, KC_DOWN, KC_UP, KC_RGHT, KC_CAPS],
    layer_candidates: &[(KC_LNG1, LAYER_NUMBER), (KC_LNG2, LAYER_NUMBER)],
    shifted_symbol_candidates: &[KC_DZ, KC_TZ],
    override_exempt_layers: OVERRIDE_EXEMPT,
};

/// Workman letters on a US host; no locale remap stage.
pub static US_WORKMAN: Variant = Variant {
    name: "us-workman",
    base_layer: LAYER_BASE,
    chord_layer: Some(LAYER_CHORD),
    combos: COMBOS,
    alt_layout: WORKMAN_ALT,
    symbol_layer: US_WORKMAN_SYMBOLS,
    unshift_layers: UNSHIFT_LAYERS,
    locale_remap: false,
    dual_role_shifts: DUAL_ROLE_SHIFTS,
    extra_candidates: &[],
    layer_candidates: &[],
    shifted_symbol_candidates: &[KC_DZ, KC_TZ],
    override_exempt_layers: OVERRIDE_EXEMPT,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_variants_validate() {
        JIS_GRAPHITE.validate().unwrap();
        US_WORKMAN.validate().unwrap();
    }

    #[test]
    fn test_self_pair_rejected() {
        static BAD: &[ComboPair] = &[ComboPair {
            a: KC_A,
            b: KC_A,
            out: KC_B,
            layer: LAYER_BASE,
        }];
        let v = Variant {
            combos: BAD,
            ..JIS_GRAPHITE
        };
        assert_eq!(v.validate(), Err(VariantError::SelfPair(KC_A.code())));
    }

    #[test]
    fn test_duplicate_unordered_pair_rejected() {
        static BAD: &[ComboPair] = &[
            ComboPair {
                a: KC_A,
                b: KC_B,
                out: KC_C,
                layer: LAYER_BASE,
            },
            ComboPair {
                a: KC_B,
                b: KC_A,
                out: KC_D,
                layer: LAYER_BASE,
            },
        ];
        let v = Variant {
            combos: BAD,
            ..JIS_GRAPHITE
        };
        assert!(matches!(
            v.validate(),
            Err(VariantError::DuplicatePair { .. })
        ));
    }

    #[test]
    fn test_same_pair_on_other_layer_allowed() {
        static OK: &[ComboPair] = &[
            ComboPair {
                a: KC_A,
                b: KC_B,
                out: KC_C,
                layer: LAYER_BASE,
            },
            ComboPair {
                a: KC_A,
                b: KC_B,
                out: KC_D,
                layer: LAYER_NUMBER,
            },
        ];
        let v = Variant {
            combos: OK,
            ..JIS_GRAPHITE
        };
        assert_eq!(v.validate(), Ok(()));
    }

    #[test]
    fn test_dual_role_key_conflicting_with_combo_rejected() {
        static DUALS: &[(Key, Key)] = &[(KC_Q, KC_SPC)];
        let v = Variant {
            dual_role_shifts: DUALS,
            ..JIS_GRAPHITE
        };
        assert_eq!(
            v.validate(),
            Err(VariantError::DualRoleInComboTable(KC_Q.code()))
        );
    }
}
