//! Engine facade. The host delivers every key transition and a periodic tick;
//! the engine routes each event to the chord transcriber or the combo
//! resolver and hands back the keystroke commands to emit. All state is owned
//! here and passed down explicitly; the host decides where the engine lives.

use crate::chord::{self, ChordTranscriber};
use crate::combo::ComboFifo;
use crate::config::{ModeFlags, Tuning};
use crate::keycodes::{self, KC_GRV};
use crate::transform::TransformChain;
use crate::types::{Key, KeyAction, KeyInput, Mods, Output, ShiftHint, Transformed};
use crate::variants::{Variant, VariantError};
use std::time::Instant;
use tracing::{debug, info};

pub struct Engine {
    variant: &'static Variant,
    flags: ModeFlags,
    chain: TransformChain,
    fifo: ComboFifo,
    chord: ChordTranscriber,
    /// A non-shift modifier is engaged: remap stages step aside and chord
    /// state is flushed so hotkeys see the physical layout.
    override_active: bool,
    last_mods: Mods,
    last_layer: u8,
}

impl Engine {
    pub fn new(variant: &'static Variant, flags: ModeFlags, tuning: Tuning) -> Result<Self, VariantError> {
        variant.validate()?;
        info!(variant = variant.name, "engine initialized");
        Ok(Self {
            chain: variant.chain(),
            fifo: ComboFifo::new(
                variant.combos,
                variant.dual_role_shifts,
                tuning.combo_timeout(),
                tuning.hold_eviction,
            ),
            chord: ChordTranscriber::new(),
            variant,
            flags,
            override_active: false,
            last_mods: Mods::none(),
            last_layer: variant.base_layer,
        })
    }

    pub fn with_defaults(variant: &'static Variant) -> Result<Self, VariantError> {
        Self::new(variant, ModeFlags::default(), Tuning::default())
    }

    pub fn flags(&self) -> ModeFlags {
        self.flags
    }

    pub fn variant_name(&self) -> &'static str {
        self.variant.name
    }

    /// Whether the host should route this key into `on_key` at all when the
    /// chord layer is active.
    pub fn is_chord_key(&self, key: Key) -> bool {
        chord::is_chord_key(key)
    }

    /// Whether this key goes through the FIFO resolver. Modifier and chord
    /// keys never do; the rest is variant data.
    pub fn is_combo_candidate(&self, key: Key, layer: u8, mods: Mods) -> bool {
        if keycodes::is_modifier_key(key) {
            return false;
        }
        if chord::is_chord_key(key) {
            return false;
        }
        if self
            .variant
            .layer_candidates
            .iter()
            .any(|(k, l)| *k == key && *l == layer)
        {
            return true;
        }
        if self.variant.extra_candidates.contains(&key) {
            return true;
        }
        if self.variant.shifted_symbol_candidates.contains(&key) {
            return self.flags.symbol_layer && mods.shift;
        }
        self.fifo.in_pair_table(key)
    }

    pub fn toggle_locale_remap(&mut self) -> bool {
        self.flags.locale_remap = !self.flags.locale_remap;
        info!(on = self.flags.locale_remap, "locale remap toggled");
        self.flags.locale_remap
    }

    pub fn toggle_alt_layout(&mut self) -> bool {
        self.flags.alt_layout = !self.flags.alt_layout;
        info!(on = self.flags.alt_layout, "alternate layout toggled");
        self.flags.alt_layout
    }

    pub fn toggle_symbol_layer(&mut self) -> bool {
        self.flags.symbol_layer = !self.flags.symbol_layer;
        info!(on = self.flags.symbol_layer, "symbol layer toggled");
        self.flags.symbol_layer
    }

    pub fn toggle_chord_mode(&mut self) -> bool {
        if self.flags.chord_mode {
            // Turning transcription off mid-chord must not strand keys.
            self.chord.reset();
        }
        self.flags.chord_mode = !self.flags.chord_mode;
        info!(on = self.flags.chord_mode, "chord mode toggled");
        self.flags.chord_mode
    }

    /// Host-driven cleanup for conditions the engine cannot see itself
    /// (sleep, layer teardown). Releases the hold and drops chord state.
    pub fn unwind(&mut self, now: Instant) -> Vec<Output> {
        let mut out = Vec::new();
        self.fifo.clear_hold(now, &mut out);
        self.chord.reset();
        out
    }

    /// Entry point for every physical key transition.
    pub fn on_key(&mut self, input: KeyInput) -> KeyAction {
        let KeyInput {
            key,
            pressed,
            layer,
            mods,
            at,
        } = input;
        self.last_mods = mods;
        self.last_layer = layer;

        let mut out = Vec::new();
        self.refresh_override(mods, layer, at, &mut out);

        if self.flags.chord_mode && Some(layer) == self.variant.chord_layer && chord::is_chord_key(key) {
            if pressed {
                self.chord.on_press(key);
            } else {
                self.chord.on_release(key, &mut out);
            }
            return KeyAction::Consumed(out);
        }

        if self.variant.dual_role_shifts.iter().any(|(k, _)| *k == key) {
            let tf = self.transform_fn();
            if pressed {
                self.fifo.on_dual_press(key, layer, mods, at);
            } else {
                self.fifo.on_dual_release(key, at, &tf, &mut out);
            }
            // The physical modifier still has to register host-side.
            return KeyAction::Pass(out);
        }

        if self.is_combo_candidate(key, layer, mods) {
            // Alt+backtick is the IME toggle on a JIS host; it must fire on
            // press, never wait out the combo window.
            if key == KC_GRV && self.flags.locale_remap && mods.alt {
                if pressed {
                    out.push(Output::Tap {
                        key: KC_GRV,
                        shift: ShiftHint::Inherit,
                    });
                }
                return KeyAction::Consumed(out);
            }

            let tf = self.transform_fn();
            if pressed {
                self.fifo.on_press(key, layer, mods, at, &tf, &mut out);
            } else {
                self.fifo.on_release(key, at, &tf, &mut out);
            }
            return KeyAction::Consumed(out);
        }

        KeyAction::Pass(out)
    }

    /// Called once per scan cycle to drive the timeout machinery.
    pub fn on_tick(&mut self, now: Instant) -> Vec<Output> {
        let mut out = Vec::new();
        self.refresh_override(self.last_mods, self.last_layer, now, &mut out);
        let tf = self.transform_fn();
        self.fifo.service(now, &tf, &mut out);
        out
    }

    fn transform_fn(&self) -> impl Fn(Key, bool, u8) -> Transformed {
        let chain = self.chain;
        let flags = self.flags;
        let plain = self.override_active;
        move |key, shifted, layer| chain.transform(key, shifted, layer, &flags, plain)
    }

    fn refresh_override(&mut self, mods: Mods, layer: u8, now: Instant, out: &mut Vec<Output>) {
        let exempt = self.variant.override_exempt_layers.contains(&layer);
        let engaged = mods.besides_shift() && !exempt;
        if engaged {
            if !self.override_active {
                debug!("layout override engaged");
                self.override_active = true;
            }
            if Some(layer) == self.variant.chord_layer {
                self.chord.reset();
            }
            self.fifo.clear_hold(now, out);
        } else if self.override_active {
            debug!("layout override released");
            self.override_active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycodes::*;
    use crate::variants::{JIS_GRAPHITE, LAYER_BASE, LAYER_CHORD, LAYER_NUMBER};
    use std::time::Duration;

    fn engine() -> Engine {
        Engine::with_defaults(&JIS_GRAPHITE).unwrap()
    }

    fn press(key: Key, layer: u8, at: Instant) -> KeyInput {
        KeyInput {
            key,
            pressed: true,
            layer,
            mods: Mods::none(),
            at,
        }
    }

    fn release(key: Key, layer: u8, at: Instant) -> KeyInput {
        KeyInput {
            key,
            pressed: false,
            layer,
            mods: Mods::none(),
            at,
        }
    }

    #[test]
    fn test_non_candidate_passes() {
        let mut e = engine();
        // KC_A only appears as a combo output, never a source.
        let action = e.on_key(press(KC_A, LAYER_BASE, Instant::now()));
        assert_eq!(action, KeyAction::Pass(vec![]));
    }

    #[test]
    fn test_candidate_tap_is_transformed() {
        let mut e = engine();
        let t0 = Instant::now();
        assert!(e.on_key(press(KC_E, LAYER_BASE, t0)).is_consumed());
        let action = e.on_key(release(KC_E, LAYER_BASE, t0 + Duration::from_millis(40)));
        // Graphite rewrites E to U.
        assert_eq!(
            action.outputs(),
            &[Output::Tap {
                key: KC_U,
                shift: ShiftHint::Suppress
            }]
        );
    }

    #[test]
    fn test_chord_layer_routing() {
        let mut e = engine();
        let t0 = Instant::now();
        assert!(e.is_chord_key(ST_KL));
        e.on_key(press(ST_KL, LAYER_CHORD, t0));
        e.on_key(press(ST_RL, LAYER_CHORD, t0));
        e.on_key(release(ST_KL, LAYER_CHORD, t0));
        let action = e.on_key(release(ST_RL, LAYER_CHORD, t0));
        assert_eq!(action.outputs(), &[Output::Text("ka".to_string())]);
    }

    #[test]
    fn test_chord_keys_ignored_off_chord_layer() {
        let mut e = engine();
        let action = e.on_key(press(ST_KL, LAYER_BASE, Instant::now()));
        assert_eq!(action, KeyAction::Pass(vec![]));
    }

    #[test]
    fn test_dual_role_shift_passes_and_taps() {
        let mut e = engine();
        let t0 = Instant::now();
        let action = e.on_key(press(KC_LSFT, LAYER_BASE, t0));
        assert!(!action.is_consumed());
        let action = e.on_key(release(KC_LSFT, LAYER_BASE, t0 + Duration::from_millis(50)));
        assert!(!action.is_consumed());
        assert_eq!(
            action.outputs(),
            &[Output::Tap {
                key: KC_SPC,
                shift: ShiftHint::Suppress
            }]
        );
    }

    #[test]
    fn test_alt_backtick_fires_immediately() {
        let mut e = engine();
        let input = KeyInput {
            key: KC_GRV,
            pressed: true,
            layer: LAYER_BASE,
            mods: Mods {
                alt: true,
                ..Mods::none()
            },
            at: Instant::now(),
        };
        let action = e.on_key(input);
        assert!(action.is_consumed());
        assert_eq!(
            action.outputs(),
            &[Output::Tap {
                key: KC_GRV,
                shift: ShiftHint::Inherit
            }]
        );
    }

    #[test]
    fn test_override_disables_remap_but_queue_survives() {
        let mut e = engine();
        let t0 = Instant::now();
        e.on_key(press(KC_E, LAYER_BASE, t0));
        // Ctrl engages the layout override while E is still queued.
        e.on_key(KeyInput {
            key: KC_LCTL,
            pressed: true,
            layer: LAYER_BASE,
            mods: Mods {
                ctrl: true,
                ..Mods::none()
            },
            at: t0 + Duration::from_millis(10),
        });
        let action = e.on_key(KeyInput {
            key: KC_E,
            pressed: false,
            layer: LAYER_BASE,
            mods: Mods {
                ctrl: true,
                ..Mods::none()
            },
            at: t0 + Duration::from_millis(40),
        });
        // Plain E, not the Graphite remap.
        assert_eq!(
            action.outputs(),
            &[Output::Tap {
                key: KC_E,
                shift: ShiftHint::Suppress
            }]
        );
    }

    #[test]
    fn test_tick_promotes_and_release_frees_hold() {
        let mut e = engine();
        let t0 = Instant::now();
        e.on_key(press(KC_E, LAYER_BASE, t0));
        let out = e.on_tick(t0 + Duration::from_millis(250));
        assert_eq!(
            out,
            vec![Output::BeginHold {
                key: KC_U,
                shift: ShiftHint::Suppress
            }]
        );
        let action = e.on_key(release(KC_E, LAYER_BASE, t0 + Duration::from_millis(300)));
        assert_eq!(
            action.outputs()[0],
            Output::EndHold {
                key: KC_U,
                shift: ShiftHint::Suppress
            }
        );
    }

    #[test]
    fn test_shifted_symbol_candidate_gating() {
        let mut e = engine();
        // DZ is only a candidate under Shift with the symbol layer on.
        assert!(!e.is_combo_candidate(KC_DZ, LAYER_NUMBER, Mods::none()));
        assert!(e.is_combo_candidate(KC_DZ, LAYER_NUMBER, Mods::shift_only()));
        e.toggle_symbol_layer();
        assert!(!e.is_combo_candidate(KC_DZ, LAYER_NUMBER, Mods::shift_only()));
    }

    #[test]
    fn test_unwind_releases_hold() {
        let mut e = engine();
        let t0 = Instant::now();
        e.on_key(press(KC_E, LAYER_BASE, t0));
        e.on_tick(t0 + Duration::from_millis(250));
        let out = e.unwind(t0 + Duration::from_millis(260));
        assert_eq!(
            out,
            vec![Output::EndHold {
                key: KC_U,
                shift: ShiftHint::Suppress
            }]
        );
    }
}
