pub mod chord;
pub mod combo;
pub mod commands;
pub mod config;
pub mod engine;
pub mod hold;
pub mod jis;
pub mod keycodes;
pub mod phonetic;
pub mod transform;
pub mod types;
pub mod variants;

pub use engine::Engine;
pub use types::{Key, KeyAction, KeyInput, Mods, Output, ShiftHint};
