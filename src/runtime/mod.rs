pub mod key_bindings;

pub use key_bindings::{KeyBinding, KeyBindings};
