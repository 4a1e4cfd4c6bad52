//! The keycode transform chain: alternate layout, symbol layer, locale
//! remap, composed in that fixed order. Each stage is toggleable through the
//! persisted mode flags and bypassed entirely while the layout override is
//! engaged.

use crate::config::ModeFlags;
use crate::jis;
use crate::types::{Key, Transformed};

/// One alternate-layout cell: base-layer physical key to its remapped output,
/// with a separate shifted column for keys whose shifted glyph moves too.
#[derive(Debug, Clone, Copy)]
pub struct AltMapping {
    pub base: Key,
    pub unshifted: Key,
    pub shifted: Key,
}

/// One symbol-layer cell, valid on a single layer.
#[derive(Debug, Clone, Copy)]
pub struct SymbolMapping {
    pub base: Key,
    pub unshifted: Key,
    pub shifted: Key,
    pub layer: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    AltLayout,
    SymbolLayer,
    LocaleRemap,
}

const PIPELINE: [Stage; 3] = [Stage::AltLayout, Stage::SymbolLayer, Stage::LocaleRemap];

/// The composed remap pipeline for one keymap variant.
#[derive(Debug, Clone, Copy)]
pub struct TransformChain {
    alt: &'static [AltMapping],
    symbol: &'static [SymbolMapping],
    /// The only layer the alternate layout applies to.
    base_layer: u8,
    /// Layers where a shifted symbol-layer hit forces Shift suppression.
    unshift_layers: &'static [u8],
    /// Whether this variant targets a JIS host at all.
    locale: bool,
}

impl TransformChain {
    pub fn new(
        alt: &'static [AltMapping],
        symbol: &'static [SymbolMapping],
        base_layer: u8,
        unshift_layers: &'static [u8],
        locale: bool,
    ) -> Self {
        Self {
            alt,
            symbol,
            base_layer,
            unshift_layers,
            locale,
        }
    }

    /// Rewrite a scanned keycode into the code to actually send.
    ///
    /// `plain` is the layout-override state: while a non-shift modifier is
    /// engaged, the alternate layout and symbol layer step aside so hotkeys
    /// land on physical positions; the locale remap stays active because the
    /// host OS still expects JIS positions.
    pub fn transform(&self, key: Key, shifted: bool, layer: u8, flags: &ModeFlags, plain: bool) -> Transformed {
        let mut kc = key;
        let mut needs_unshift = false;

        for stage in PIPELINE {
            match stage {
                Stage::AltLayout => {
                    if flags.alt_layout && !plain && layer == self.base_layer {
                        if let Some(m) = self.alt.iter().find(|m| m.base == kc) {
                            kc = if shifted { m.shifted } else { m.unshifted };
                        }
                    }
                }
                Stage::SymbolLayer => {
                    if flags.symbol_layer && !plain {
                        // Compare against this stage's own input: a key the
                        // alternate layout already rewrote counts as "not
                        // remapped here" unless the symbol table hits again.
                        let before = kc;
                        if let Some(m) = self
                            .symbol
                            .iter()
                            .find(|m| m.layer == layer && m.base == kc)
                        {
                            kc = if shifted { m.shifted } else { m.unshifted };
                        }
                        if shifted && kc != before && self.unshift_layers.contains(&layer) {
                            needs_unshift = true;
                        }
                    }
                }
                Stage::LocaleRemap => {
                    if self.locale && flags.locale_remap {
                        if jis::shift_suppress_target(kc, shifted) {
                            needs_unshift = true;
                        }
                        kc = jis::remap(kc, shifted);
                    }
                }
            }
        }

        Transformed {
            key: kc,
            needs_unshift,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycodes::*;

    const ALT: &[AltMapping] = &[
        AltMapping {
            base: KC_K,
            unshifted: KC_N,
            shifted: KC_N,
        },
        AltMapping {
            base: KC_T,
            unshifted: KC_COMM,
            shifted: KC_LABK,
        },
    ];

    const SYMBOL: &[SymbolMapping] = &[
        SymbolMapping {
            base: KC_EQL,
            unshifted: KC_AT,
            shifted: KC_HASH,
            layer: 0,
        },
        SymbolMapping {
            base: KC_1,
            unshifted: KC_1,
            shifted: KC_LCBR,
            layer: 2,
        },
        SymbolMapping {
            base: KC_2,
            unshifted: KC_2,
            shifted: KC_LBRC,
            layer: 2,
        },
    ];

    const UNSHIFT_LAYERS: &[u8] = &[0, 2];

    fn chain() -> TransformChain {
        TransformChain::new(ALT, SYMBOL, 0, UNSHIFT_LAYERS, true)
    }

    #[test]
    fn test_alt_layout_base_layer_only() {
        let flags = ModeFlags::default();
        let t = chain().transform(KC_K, false, 0, &flags, false);
        assert_eq!(t.key, KC_N);
        let t = chain().transform(KC_K, false, 2, &flags, false);
        assert_eq!(t.key, KC_K);
    }

    #[test]
    fn test_symbol_hit_under_shift_forces_unshift() {
        let flags = ModeFlags::default();
        let t = chain().transform(KC_1, true, 2, &flags, false);
        assert_eq!(t.key, KC_LCBR);
        assert!(t.needs_unshift);
    }

    #[test]
    fn test_shift_encoded_alt_output_passes_locale_untouched() {
        // Shifted T remaps to an already-shift-encoded angle bracket; the
        // locale stage only judges plain codes, so it stays as-is.
        let flags = ModeFlags::default();
        let t = chain().transform(KC_T, true, 0, &flags, false);
        assert_eq!(t.key, KC_LABK);
        assert!(!t.needs_unshift);
    }

    #[test]
    fn test_locale_stage_sees_post_symbol_key() {
        // Shifted 2 becomes a plain bracket in the symbol layer, and the
        // locale stage must then judge the bracket, not the digit.
        let flags = ModeFlags::default();
        let t = chain().transform(KC_2, true, 2, &flags, false);
        assert_eq!(t.key, JP_LCBR);
        assert!(t.needs_unshift);
    }

    #[test]
    fn test_override_bypasses_remap_stages() {
        let flags = ModeFlags::default();
        let t = chain().transform(KC_K, false, 0, &flags, true);
        assert_eq!(t.key, KC_K);
        // The locale remap still applies under the override.
        let t = chain().transform(KC_2, true, 0, &flags, true);
        assert_eq!(t.key, JP_AT);
        assert!(t.needs_unshift);
    }

    #[test]
    fn test_stages_toggle_independently() {
        let flags = ModeFlags {
            alt_layout: false,
            ..ModeFlags::default()
        };
        let t = chain().transform(KC_K, false, 0, &flags, false);
        assert_eq!(t.key, KC_K);

        let flags = ModeFlags {
            locale_remap: false,
            ..ModeFlags::default()
        };
        let t = chain().transform(KC_2, true, 0, &flags, false);
        assert_eq!(t.key, KC_2);
        assert!(!t.needs_unshift);
    }

    #[test]
    fn test_transform_stable_on_second_pass() {
        // Alphanumeric output space is disjoint from every lookup column, so
        // re-running the chain on its own output is a no-op there.
        let flags = ModeFlags::default();
        for key in [KC_A, KC_K, KC_Q, KC_5, KC_0, KC_SPC, KC_ENT] {
            let once = chain().transform(key, false, 0, &flags, false);
            let twice = chain().transform(once.key, false, 0, &flags, false);
            assert_eq!(once.key, twice.key, "unstable for {:?}", key);
        }
    }
}
