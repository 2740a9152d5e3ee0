//! Canonical keymap model.
//!
//! A [`Keymap`] is an ordered list of [`Action`]s; each action holds
//! [`Keybinding`]s made of [`KeyChord`]s. Chords are parsed from and
//! formatted to text like `ctrl+shift+f`, with `Meta` spelled per platform.
//!
//! # Quick Start
//!
//! ```rust
//! use onekeymap_keymap::{Keybinding, Platform};
//!
//! let kb = Keybinding::parse("ctrl+k cmd+s", "+").unwrap();
//! assert_eq!(kb.format(Platform::Linux, "+"), "ctrl+k meta+s");
//! ```

pub mod bimap;
pub mod dedup;
pub mod keybinding;
pub mod keychord;
pub mod keycode;
pub mod keymap;
pub mod setting;

pub use bimap::BiMap;
pub use dedup::{dedup_actions, dedup_keymap, pair_key, union_bindings};
pub use keybinding::Keybinding;
pub use keychord::{ChordFormat, KeyChord};
pub use keycode::{KeyCode, KeyModifier};
pub use keymap::{Action, ActionMeta, Keymap};
pub use onekeymap_common::Platform;
pub use setting::{load_setting, save_setting};
