//! US-to-JIS punctuation remap. When the OS thinks the keyboard is a JIS
//! unit, every symbol that moved between the layouts has to be re-aimed at
//! its JIS position, and a handful of them additionally need Shift dropped
//! because the JIS glyph lives on the unshifted plane.

use crate::keycodes::*;
use crate::types::Key;

/// Remap a US-layout keycode to the position producing the same glyph on a
/// JIS host. Keys the layouts agree on pass through untouched.
pub fn remap(key: Key, shifted: bool) -> Key {
    match key {
        KC_1 => {
            if shifted {
                JP_EXLM
            } else {
                KC_1
            }
        }
        KC_2 => {
            if shifted {
                JP_AT
            } else {
                KC_2
            }
        }
        KC_3 => {
            if shifted {
                JP_HASH
            } else {
                KC_3
            }
        }
        KC_4 => {
            if shifted {
                JP_DLR
            } else {
                KC_4
            }
        }
        KC_5 => {
            if shifted {
                JP_PERC
            } else {
                KC_5
            }
        }
        KC_6 => {
            if shifted {
                JP_CIRC
            } else {
                KC_6
            }
        }
        KC_7 => {
            if shifted {
                JP_AMPR
            } else {
                KC_7
            }
        }
        KC_8 => {
            if shifted {
                JP_ASTR
            } else {
                KC_8
            }
        }
        KC_9 => {
            if shifted {
                JP_LPRN
            } else {
                KC_9
            }
        }
        KC_0 => {
            if shifted {
                JP_RPRN
            } else {
                KC_0
            }
        }
        KC_GRV => {
            if shifted {
                JP_TILD
            } else {
                JP_GRV
            }
        }
        KC_MINS => {
            if shifted {
                JP_UNDS
            } else {
                JP_MINS
            }
        }
        KC_EQL => {
            if shifted {
                JP_PLUS
            } else {
                JP_EQL
            }
        }
        KC_LBRC => {
            if shifted {
                JP_LCBR
            } else {
                JP_LBRC
            }
        }
        KC_RBRC => {
            if shifted {
                JP_RCBR
            } else {
                JP_RBRC
            }
        }
        KC_BSLS => {
            if shifted {
                JP_PIPE
            } else {
                JP_BSLS
            }
        }
        KC_SCLN => {
            if shifted {
                JP_COLN
            } else {
                JP_SCLN
            }
        }
        KC_QUOT => {
            if shifted {
                JP_DQUO
            } else {
                JP_QUOT
            }
        }
        KC_COMM => {
            if shifted {
                JP_LABK
            } else {
                JP_COMM
            }
        }
        KC_DOT => {
            if shifted {
                JP_RABK
            } else {
                JP_DOT
            }
        }
        KC_SLSH => {
            if shifted {
                JP_QUES
            } else {
                JP_SLSH
            }
        }
        other => other,
    }
}

/// Keys whose JIS remap encodes its own Shift plane, so the physical Shift
/// must be suppressed for the remapped code to type correctly.
pub fn shift_suppress_target(key: Key, shifted: bool) -> bool {
    if !shifted {
        return false;
    }
    matches!(
        key,
        KC_1 | KC_2
            | KC_3
            | KC_4
            | KC_5
            | KC_6
            | KC_7
            | KC_8
            | KC_9
            | KC_0
            | KC_GRV
            | KC_MINS
            | KC_EQL
            | KC_LBRC
            | KC_RBRC
            | KC_BSLS
            | KC_SCLN
            | KC_QUOT
            | KC_COMM
            | KC_DOT
            | KC_SLSH
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_row_shifted_glyphs() {
        assert_eq!(remap(KC_2, true), JP_AT);
        assert_eq!(remap(KC_2, false), KC_2);
        assert_eq!(remap(KC_8, true), JP_ASTR);
    }

    #[test]
    fn test_letters_untouched() {
        assert_eq!(remap(KC_A, true), KC_A);
        assert_eq!(remap(KC_A, false), KC_A);
        assert!(!shift_suppress_target(KC_A, true));
    }

    #[test]
    fn test_suppress_set_matches_remap_set() {
        // Every suppress target must actually remap under shift.
        for key in [KC_1, KC_GRV, KC_MINS, KC_LBRC, KC_SCLN, KC_SLSH] {
            assert!(shift_suppress_target(key, true));
            assert_ne!(remap(key, true), key);
        }
    }
}
