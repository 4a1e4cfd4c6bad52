use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Persisted per-user mode flags. The host owns storage (read at boot,
/// written back whenever a toggle fires); the core only holds the values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeFlags {
    /// Locale punctuation remap (JIS-hosted output).
    pub locale_remap: bool,
    /// Alternate physical layout on the base layer.
    pub alt_layout: bool,
    /// Symbol-layer remap.
    pub symbol_layer: bool,
    /// Chord transcription on the chord layer.
    pub chord_mode: bool,
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self {
            locale_remap: true,
            alt_layout: true,
            symbol_layer: true,
            chord_mode: true,
        }
    }
}

/// What to do with an active hold when a fresh press lands in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldEvictionPolicy {
    /// Evict only when the queue is non-empty at the new press. A lone
    /// timed-out hold survives unrelated keystrokes and ends on its own
    /// source release.
    QueuedPress,
    /// Any new press evicts the hold.
    AnyPress,
    /// Holds end only on source release or unwind.
    Never,
}

impl Default for HoldEvictionPolicy {
    fn default() -> Self {
        Self::QueuedPress
    }
}

/// Resolution tunables, persisted alongside the mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Combo wait window in milliseconds.
    #[serde(default = "default_combo_timeout_ms")]
    pub combo_timeout_ms: u64,
    #[serde(default)]
    pub hold_eviction: HoldEvictionPolicy,
}

fn default_combo_timeout_ms() -> u64 {
    200
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            combo_timeout_ms: default_combo_timeout_ms(),
            hold_eviction: HoldEvictionPolicy::default(),
        }
    }
}

impl Tuning {
    pub fn combo_timeout(&self) -> Duration {
        Duration::from_millis(self.combo_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_default_on() {
        let flags = ModeFlags::default();
        assert!(flags.locale_remap && flags.alt_layout && flags.symbol_layer && flags.chord_mode);
    }

    #[test]
    fn test_tuning_defaults() {
        let tuning = Tuning::default();
        assert_eq!(tuning.combo_timeout(), Duration::from_millis(200));
        assert_eq!(tuning.hold_eviction, HoldEvictionPolicy::QueuedPress);
    }
}
