//! FIFO-based combo resolution. Key-down events for combo-capable keys wait
//! in a bounded queue; the head is matched against every later same-layer
//! entry, and timeouts promote a lone waiting key into a genuine sustained
//! press. Resolution is greedy: one pass dequeues as much as it can, and the
//! loop re-runs until no further progress is made.

use crate::config::HoldEvictionPolicy;
use crate::hold::HoldState;
use crate::keycodes::KC_NO;
use crate::types::{Key, Mods, Output, ShiftHint, Transformed};
use std::time::{Duration, Instant};
use tracing::debug;

/// Queue capacity. Presses past this bound degrade to immediate taps.
pub const COMBO_FIFO_LEN: usize = 30;

/// One combo definition: two source keys (unordered) on one layer.
#[derive(Debug, Clone, Copy)]
pub struct ComboPair {
    pub a: Key,
    pub b: Key,
    pub out: Key,
    pub layer: u8,
}

#[derive(Debug, Clone, Copy)]
struct PendingKey {
    key: Key,
    layer: u8,
    mods: Mods,
    pressed_at: Instant,
    released: bool,
}

/// The resolver state machine: pending-event queue plus the hold slot.
pub struct ComboFifo {
    queue: Vec<PendingKey>,
    hold: HoldState,
    pairs: &'static [ComboPair],
    dual_roles: &'static [(Key, Key)],
    /// Dual-role keys currently physically down.
    dual_down: Vec<Key>,
    timeout: Duration,
    eviction: HoldEvictionPolicy,
}

/// Tap delivery for a transformed code: suppressed-Shift unless the press-time
/// mods had Shift and the code tolerates it.
fn tap_output(t: Transformed, shifted: bool) -> Output {
    let shift = if t.needs_unshift {
        ShiftHint::Suppress
    } else if shifted {
        ShiftHint::Force
    } else {
        ShiftHint::Suppress
    };
    Output::Tap { key: t.key, shift }
}

impl ComboFifo {
    pub fn new(
        pairs: &'static [ComboPair],
        dual_roles: &'static [(Key, Key)],
        timeout: Duration,
        eviction: HoldEvictionPolicy,
    ) -> Self {
        Self {
            queue: Vec::with_capacity(COMBO_FIFO_LEN),
            hold: HoldState::default(),
            pairs,
            dual_roles,
            dual_down: Vec::with_capacity(4),
            timeout,
            eviction,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn hold_is_active(&self) -> bool {
        self.hold.is_held()
    }

    /// Whether `key` appears in any combo definition, on any layer.
    pub fn in_pair_table(&self, key: Key) -> bool {
        self.pairs.iter().any(|p| p.a == key || p.b == key)
    }

    fn find_pair(&self, a: Key, b: Key, layer: u8) -> Option<&ComboPair> {
        self.pairs
            .iter()
            .find(|p| p.layer == layer && ((p.a == a && p.b == b) || (p.a == b && p.b == a)))
    }

    fn dual_tap(&self, key: Key) -> Option<Key> {
        self.dual_roles
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, tap)| *tap)
    }

    fn other_dual_down(&self, key: Key) -> bool {
        self.dual_down.iter().any(|k| *k != key)
    }

    /// Enqueue a combo-candidate press, or fall back to an immediate tap when
    /// the queue is full. Never drops input.
    pub fn on_press<F>(&mut self, key: Key, layer: u8, mods: Mods, at: Instant, transform: &F, out: &mut Vec<Output>)
    where
        F: Fn(Key, bool, u8) -> Transformed,
    {
        let evict = match self.eviction {
            HoldEvictionPolicy::QueuedPress => !self.queue.is_empty(),
            HoldEvictionPolicy::AnyPress => true,
            HoldEvictionPolicy::Never => false,
        };
        if evict && self.hold.is_held() {
            self.hold.clear(at, out);
        }

        if self.queue.len() < COMBO_FIFO_LEN {
            self.queue.push(PendingKey {
                key,
                layer,
                mods,
                pressed_at: at,
                released: false,
            });
        } else {
            debug!(key = key.code(), "combo queue full, passthrough tap");
            let t = transform(key, mods.shift, layer);
            out.push(tap_output(t, mods.shift));
        }
    }

    /// Enqueue a dual-role modifier press. It joins the queue for tap-vs-hold
    /// discrimination but never evicts an active hold.
    pub fn on_dual_press(&mut self, key: Key, layer: u8, mods: Mods, at: Instant) {
        if !self.dual_down.contains(&key) {
            self.dual_down.push(key);
        }
        if self.queue.len() < COMBO_FIFO_LEN {
            self.queue.push(PendingKey {
                key,
                layer,
                mods,
                pressed_at: at,
                released: false,
            });
        }
    }

    pub fn on_dual_release<F>(&mut self, key: Key, now: Instant, transform: &F, out: &mut Vec<Output>)
    where
        F: Fn(Key, bool, u8) -> Transformed,
    {
        self.dual_down.retain(|k| *k != key);
        self.mark_released(key, now, transform, out);
    }

    /// Handle a combo-candidate release: update hold sources, flag the queue
    /// entry, and resolve whatever the new information unlocks.
    pub fn on_release<F>(&mut self, key: Key, now: Instant, transform: &F, out: &mut Vec<Output>)
    where
        F: Fn(Key, bool, u8) -> Transformed,
    {
        if self.hold.note_release(key) {
            self.hold.clear(now, out);
        }
        self.mark_released(key, now, transform, out);
    }

    fn mark_released<F>(&mut self, key: Key, now: Instant, transform: &F, out: &mut Vec<Output>)
    where
        F: Fn(Key, bool, u8) -> Transformed,
    {
        let mut updated = false;
        for entry in self.queue.iter_mut() {
            if entry.key == key && !entry.released {
                entry.released = true;
                updated = true;
                break;
            }
        }
        if updated {
            self.service(now, transform, out);
        }
    }

    /// Force-release the held key (layout override, mode toggle).
    pub fn clear_hold(&mut self, now: Instant, out: &mut Vec<Output>) {
        self.hold.clear(now, out);
    }

    /// Run the resolution loop until no more progress can be made.
    pub fn service<F>(&mut self, now: Instant, transform: &F, out: &mut Vec<Output>)
    where
        F: Fn(Key, bool, u8) -> Transformed,
    {
        loop {
            match self.queue.len() {
                0 => break,
                1 => {
                    let head = self.queue[0];
                    if head.released {
                        self.queue.remove(0);
                        if let Some(tap_key) = self.dual_tap(head.key) {
                            let shift = if self.other_dual_down(head.key) {
                                ShiftHint::Inherit
                            } else {
                                ShiftHint::Suppress
                            };
                            out.push(Output::Tap { key: tap_key, shift });
                            continue;
                        }
                        let t = transform(head.key, head.mods.shift, head.layer);
                        out.push(tap_output(t, head.mods.shift));
                        continue;
                    }
                    if now.duration_since(head.pressed_at) > self.timeout {
                        self.queue.remove(0);
                        if self.dual_tap(head.key).is_some() {
                            // Still physically down past the window: the
                            // modifier role won, nothing to emit.
                            continue;
                        }
                        let t = transform(head.key, head.mods.shift, head.layer);
                        self.hold.clear(now, out);
                        if t.needs_unshift {
                            out.push(Output::Tap {
                                key: t.key,
                                shift: ShiftHint::Suppress,
                            });
                        } else if head.mods.shift {
                            self.hold.begin(t.key, now, head.key, KC_NO, true);
                            out.push(Output::BeginHold {
                                key: t.key,
                                shift: ShiftHint::Force,
                            });
                        } else {
                            self.hold.begin(t.key, now, head.key, KC_NO, false);
                            out.push(Output::BeginHold {
                                key: t.key,
                                shift: ShiftHint::Suppress,
                            });
                        }
                        continue;
                    }
                    break;
                }
                _ => {
                    if self.resolve_head(now, transform, out) {
                        continue;
                    }
                    let head = self.queue[0];
                    if head.released {
                        if self.hold.is_held() {
                            self.hold.clear(now, out);
                        }
                        self.queue.remove(0);
                        let t = transform(head.key, head.mods.shift, head.layer);
                        out.push(tap_output(t, head.mods.shift));
                        continue;
                    }
                    if now.duration_since(head.pressed_at) > self.timeout {
                        let t = transform(head.key, head.mods.shift, head.layer);
                        out.push(tap_output(t, head.mods.shift));
                        self.queue.remove(0);
                        continue;
                    }
                    break;
                }
            }
        }
    }

    /// Try to resolve the queue head against every later same-layer entry, in
    /// queue order; first match wins. Returns true when a pair was consumed.
    fn resolve_head<F>(&mut self, now: Instant, transform: &F, out: &mut Vec<Output>) -> bool
    where
        F: Fn(Key, bool, u8) -> Transformed,
    {
        if self.queue.len() < 2 {
            return false;
        }
        let head = self.queue[0];
        for i in 1..self.queue.len() {
            let other = self.queue[i];
            if other.layer != head.layer {
                continue;
            }
            let Some(pair) = self.find_pair(head.key, other.key, head.layer) else {
                continue;
            };
            let out_key = pair.out;
            debug!(
                a = head.key.code(),
                b = other.key.code(),
                out = out_key.code(),
                "combo matched"
            );

            // Shift is judged at the head key's press, even if mods have
            // moved on since.
            let shifted = head.mods.shift;
            let t = transform(out_key, shifted, head.layer);
            let head_down = !head.released;
            let other_down = !other.released;

            self.hold.clear(now, out);
            if !head_down || !other_down {
                // A source is already gone, so a hold would stick: tap.
                out.push(tap_output(t, shifted));
            } else if t.needs_unshift {
                out.push(Output::Tap {
                    key: t.key,
                    shift: ShiftHint::Suppress,
                });
            } else if shifted {
                self.hold.begin(t.key, now, head.key, other.key, true);
                out.push(Output::BeginHold {
                    key: t.key,
                    shift: ShiftHint::Force,
                });
            } else {
                self.hold.begin(t.key, now, head.key, other.key, false);
                out.push(Output::BeginHold {
                    key: t.key,
                    shift: ShiftHint::Suppress,
                });
            }

            // Higher index first so the head index stays valid.
            self.queue.remove(i);
            self.queue.remove(0);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycodes::*;
    use std::time::Duration;

    const PAIRS: &[ComboPair] = &[
        ComboPair {
            a: KC_A,
            b: KC_C,
            out: KC_X,
            layer: 0,
        },
        ComboPair {
            a: KC_Q,
            b: KC_Z,
            out: KC_F,
            layer: 0,
        },
    ];

    const DUALS: &[(Key, Key)] = &[(KC_LSFT, KC_SPC), (KC_RSFT, KC_ENT)];

    fn identity(key: Key, _shifted: bool, _layer: u8) -> Transformed {
        Transformed {
            key,
            needs_unshift: false,
        }
    }

    fn fifo() -> ComboFifo {
        ComboFifo::new(
            PAIRS,
            DUALS,
            Duration::from_millis(200),
            HoldEvictionPolicy::QueuedPress,
        )
    }

    fn taps(out: &[Output]) -> Vec<Key> {
        out.iter()
            .filter_map(|o| match o {
                Output::Tap { key, .. } => Some(*key),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_released_resolves_as_tap() {
        let t0 = Instant::now();
        let mut f = fifo();
        let mut out = Vec::new();
        f.on_press(KC_A, 0, Mods::none(), t0, &identity, &mut out);
        assert!(out.is_empty());
        f.on_release(KC_A, t0 + Duration::from_millis(50), &identity, &mut out);
        assert_eq!(taps(&out), vec![KC_A]);
        assert!(f.is_empty());
    }

    #[test]
    fn test_single_timeout_promotes_to_hold() {
        let t0 = Instant::now();
        let mut f = fifo();
        let mut out = Vec::new();
        f.on_press(KC_Q, 0, Mods::none(), t0, &identity, &mut out);
        f.service(t0 + Duration::from_millis(250), &identity, &mut out);
        assert_eq!(
            out,
            vec![Output::BeginHold {
                key: KC_Q,
                shift: ShiftHint::Suppress
            }]
        );
        assert!(f.hold_is_active());

        // Source release must unregister the held key: no stuck keys.
        out.clear();
        f.on_release(KC_Q, t0 + Duration::from_millis(300), &identity, &mut out);
        assert_eq!(
            out[0],
            Output::EndHold {
                key: KC_Q,
                shift: ShiftHint::Suppress
            }
        );
        assert!(!f.hold_is_active());
    }

    #[test]
    fn test_combo_both_down_becomes_hold() {
        let t0 = Instant::now();
        let mut f = fifo();
        let mut out = Vec::new();
        f.on_press(KC_A, 0, Mods::none(), t0, &identity, &mut out);
        f.on_press(KC_C, 0, Mods::none(), t0 + Duration::from_millis(10), &identity, &mut out);
        f.service(t0 + Duration::from_millis(20), &identity, &mut out);
        assert_eq!(
            out,
            vec![Output::BeginHold {
                key: KC_X,
                shift: ShiftHint::Suppress
            }]
        );
        assert!(f.is_empty());

        out.clear();
        f.on_release(KC_C, t0 + Duration::from_millis(60), &identity, &mut out);
        assert_eq!(
            out[0],
            Output::EndHold {
                key: KC_X,
                shift: ShiftHint::Suppress
            }
        );
    }

    #[test]
    fn test_combo_source_released_early_downgrades_to_tap() {
        let t0 = Instant::now();
        let mut f = fifo();
        let mut out = Vec::new();
        f.on_press(KC_A, 0, Mods::none(), t0, &identity, &mut out);
        f.on_press(KC_C, 0, Mods::none(), t0 + Duration::from_millis(5), &identity, &mut out);
        // A releases before resolution runs: must be a tap, never a hold.
        f.on_release(KC_A, t0 + Duration::from_millis(10), &identity, &mut out);
        assert_eq!(taps(&out), vec![KC_X]);
        assert!(!f.hold_is_active());
        assert!(f.is_empty());
    }

    #[test]
    fn test_greedy_head_scan_order() {
        // Queue [A, B, C] with only (A, C) defined: resolution must match
        // head against C and leave B pending.
        let t0 = Instant::now();
        let mut f = fifo();
        let mut out = Vec::new();
        f.on_press(KC_A, 0, Mods::none(), t0, &identity, &mut out);
        f.on_press(KC_B, 0, Mods::none(), t0 + Duration::from_millis(5), &identity, &mut out);
        f.on_press(KC_C, 0, Mods::none(), t0 + Duration::from_millis(10), &identity, &mut out);
        f.service(t0 + Duration::from_millis(20), &identity, &mut out);
        assert_eq!(
            out,
            vec![Output::BeginHold {
                key: KC_X,
                shift: ShiftHint::Suppress
            }]
        );
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn test_layer_mismatch_blocks_pair() {
        let t0 = Instant::now();
        let mut f = fifo();
        let mut out = Vec::new();
        f.on_press(KC_A, 0, Mods::none(), t0, &identity, &mut out);
        f.on_press(KC_C, 2, Mods::none(), t0 + Duration::from_millis(5), &identity, &mut out);
        f.on_release(KC_A, t0 + Duration::from_millis(10), &identity, &mut out);
        // No combo across layers: A resolves alone.
        assert_eq!(taps(&out), vec![KC_A]);
    }

    #[test]
    fn test_queue_overflow_taps_immediately() {
        let t0 = Instant::now();
        let mut f = fifo();
        let mut out = Vec::new();
        for n in 0..COMBO_FIFO_LEN {
            f.on_press(Key::new(0x04 + n as u16), 0, Mods::none(), t0, &identity, &mut out);
        }
        assert!(out.is_empty());
        assert_eq!(f.len(), COMBO_FIFO_LEN);
        f.on_press(KC_SLSH, 0, Mods::none(), t0, &identity, &mut out);
        assert_eq!(taps(&out), vec![KC_SLSH]);
        assert_eq!(f.len(), COMBO_FIFO_LEN);
    }

    #[test]
    fn test_head_timeout_with_followers_taps_head() {
        let t0 = Instant::now();
        let mut f = fifo();
        let mut out = Vec::new();
        f.on_press(KC_A, 0, Mods::none(), t0, &identity, &mut out);
        f.on_press(KC_B, 0, Mods::none(), t0 + Duration::from_millis(150), &identity, &mut out);
        f.service(t0 + Duration::from_millis(210), &identity, &mut out);
        // A timed out with B still pending: A taps, B keeps waiting.
        assert_eq!(taps(&out), vec![KC_A]);
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn test_hold_eviction_on_queued_press() {
        let t0 = Instant::now();
        let mut f = fifo();
        let mut out = Vec::new();
        f.on_press(KC_Q, 0, Mods::none(), t0, &identity, &mut out);
        f.service(t0 + Duration::from_millis(250), &identity, &mut out);
        assert!(f.hold_is_active());

        // First press while the queue is empty: the hold survives.
        out.clear();
        f.on_press(KC_A, 0, Mods::none(), t0 + Duration::from_millis(260), &identity, &mut out);
        assert!(f.hold_is_active());
        assert!(out.is_empty());

        // Second press with the queue occupied: the hold is evicted.
        f.on_press(KC_B, 0, Mods::none(), t0 + Duration::from_millis(270), &identity, &mut out);
        assert!(!f.hold_is_active());
        assert_eq!(
            out,
            vec![Output::EndHold {
                key: KC_Q,
                shift: ShiftHint::Suppress
            }]
        );
    }

    #[test]
    fn test_dual_role_lone_tap() {
        let t0 = Instant::now();
        let mut f = fifo();
        let mut out = Vec::new();
        f.on_dual_press(KC_LSFT, 0, Mods::none(), t0);
        f.on_dual_release(KC_LSFT, t0 + Duration::from_millis(50), &identity, &mut out);
        assert_eq!(
            out,
            vec![Output::Tap {
                key: KC_SPC,
                shift: ShiftHint::Suppress
            }]
        );
    }

    #[test]
    fn test_dual_role_with_other_shift_down_inherits() {
        let t0 = Instant::now();
        let mut f = fifo();
        let mut out = Vec::new();
        f.on_dual_press(KC_RSFT, 0, Mods::none(), t0);
        f.on_dual_press(KC_LSFT, 0, Mods::shift_only(), t0 + Duration::from_millis(10));
        // Nothing resolves while the right shift still heads the queue.
        f.on_dual_release(KC_LSFT, t0 + Duration::from_millis(60), &identity, &mut out);
        assert!(out.is_empty());
        // Once the head ages out, the lone tap delivers under live mods
        // because the other dual-role shift is still physically down.
        f.service(t0 + Duration::from_millis(260), &identity, &mut out);
        assert!(out.contains(&Output::Tap {
            key: KC_SPC,
            shift: ShiftHint::Inherit
        }));
    }

    #[test]
    fn test_dual_role_timeout_is_silent() {
        let t0 = Instant::now();
        let mut f = fifo();
        let mut out = Vec::new();
        f.on_dual_press(KC_LSFT, 0, Mods::none(), t0);
        f.service(t0 + Duration::from_millis(250), &identity, &mut out);
        assert!(out.is_empty());
        assert!(f.is_empty());
        assert!(!f.hold_is_active());
    }
}
