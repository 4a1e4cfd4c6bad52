//! Static chord command table, consulted before phonetic transliteration.
//! Patterns are the canonical chord strings produced by the transcriber.

use crate::keycodes::*;
use crate::types::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordCommand {
    /// Replay the most recent history entry.
    Repeat,
    /// Delete the most recent history entry's characters and pop it.
    Undo,
    /// Tap a fixed keycode.
    Key(Key),
    /// Send a fixed string (recorded in history).
    Text(&'static str),
}

pub struct CommandEntry {
    pub pattern: &'static str,
    pub command: ChordCommand,
}

pub static COMMAND_TABLE: &[CommandEntry] = &[
    CommandEntry { pattern: "#-", command: ChordCommand::Repeat },
    CommandEntry { pattern: "-U", command: ChordCommand::Undo },

    // Editing
    CommandEntry { pattern: "#-S", command: ChordCommand::Key(KC_Z.ctrl()) },
    CommandEntry { pattern: "#-K", command: ChordCommand::Key(KC_X.ctrl()) },
    CommandEntry { pattern: "#-N", command: ChordCommand::Key(KC_C.ctrl()) },
    CommandEntry { pattern: "#-A", command: ChordCommand::Key(KC_V.ctrl()) },
    CommandEntry { pattern: "n#-A", command: ChordCommand::Key(KC_V.ctrl().shift()) },

    // Punctuation keycodes
    CommandEntry { pattern: "-YA", command: ChordCommand::Key(KC_DQUO) },
    CommandEntry { pattern: "-NI", command: ChordCommand::Key(KC_QUOT) },
    CommandEntry { pattern: "-TK", command: ChordCommand::Key(KC_PIPE) },
    CommandEntry { pattern: "-IA", command: ChordCommand::Key(KC_COLN) },
    CommandEntry { pattern: "-NY", command: ChordCommand::Key(KC_SLSH) },
    CommandEntry { pattern: "-TN", command: ChordCommand::Key(KC_ASTR) },
    CommandEntry { pattern: "-TI", command: ChordCommand::Key(KC_TILD) },
    CommandEntry { pattern: "-YI", command: ChordCommand::Key(KC_LPRN) },
    CommandEntry { pattern: "-TY", command: ChordCommand::Key(KC_RPRN) },
    CommandEntry { pattern: "-NA", command: ChordCommand::Key(KC_LBRC) },
    CommandEntry { pattern: "-KN", command: ChordCommand::Key(KC_RBRC) },
    CommandEntry { pattern: "-SNA", command: ChordCommand::Key(KC_LCBR) },
    CommandEntry { pattern: "-SKN", command: ChordCommand::Key(KC_RCBR) },
    CommandEntry { pattern: "-NYIA", command: ChordCommand::Key(KC_LABK) },
    CommandEntry { pattern: "-TKNY", command: ChordCommand::Key(KC_RABK) },
    CommandEntry { pattern: "-AU", command: ChordCommand::Key(KC_BSPC) },
    CommandEntry { pattern: "-IU", command: ChordCommand::Key(KC_DEL) },
    CommandEntry { pattern: "-S", command: ChordCommand::Key(KC_ESC) },

    // Navigation
    CommandEntry { pattern: "-A", command: ChordCommand::Key(KC_LEFT) },
    CommandEntry { pattern: "-N", command: ChordCommand::Key(KC_DOWN) },
    CommandEntry { pattern: "-Y", command: ChordCommand::Key(KC_UP) },
    CommandEntry { pattern: "-K", command: ChordCommand::Key(KC_RGHT) },
    CommandEntry { pattern: "-I", command: ChordCommand::Key(KC_HOME) },
    CommandEntry { pattern: "-T", command: ChordCommand::Key(KC_END) },

    // Navigation with selection
    CommandEntry { pattern: "-An", command: ChordCommand::Key(KC_LEFT.shift()) },
    CommandEntry { pattern: "-Nn", command: ChordCommand::Key(KC_DOWN.shift()) },
    CommandEntry { pattern: "-Yn", command: ChordCommand::Key(KC_UP.shift()) },
    CommandEntry { pattern: "-Kn", command: ChordCommand::Key(KC_RGHT.shift()) },
    CommandEntry { pattern: "-In", command: ChordCommand::Key(KC_HOME.shift()) },
    CommandEntry { pattern: "-Tn", command: ChordCommand::Key(KC_END.shift()) },

    CommandEntry { pattern: "-n", command: ChordCommand::Key(KC_ENT) },
    CommandEntry { pattern: "n-", command: ChordCommand::Key(KC_SPC) },
    CommandEntry { pattern: "n-n", command: ChordCommand::Key(KC_TAB) },
    CommandEntry { pattern: "-ntk", command: ChordCommand::Key(KC_F7) },
    CommandEntry { pattern: "n-ntk", command: ChordCommand::Key(KC_F8) },

    // String macros
    CommandEntry { pattern: "-KY", command: ChordCommand::Text("\" ") },
    CommandEntry { pattern: "-TKIA", command: ChordCommand::Text("||") },
    CommandEntry { pattern: "-KA", command: ChordCommand::Text("/// ") },
    CommandEntry { pattern: "-SYA", command: ChordCommand::Text("@@") },
    CommandEntry { pattern: "-SNI", command: ChordCommand::Text("&&") },
    CommandEntry { pattern: "-nt", command: ChordCommand::Text(".") },
    CommandEntry { pattern: "-nk", command: ChordCommand::Text(",") },
    CommandEntry { pattern: "n-nt", command: ChordCommand::Text("?") },
    CommandEntry { pattern: "n-nk", command: ChordCommand::Text("!") },
];

pub fn lookup(pattern: &str) -> Option<ChordCommand> {
    COMMAND_TABLE
        .iter()
        .find(|e| e.pattern == pattern)
        .map(|e| e.command)
}
