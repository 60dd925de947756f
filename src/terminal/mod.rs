pub mod backend;
pub mod input_event;
pub mod terminal_event;

pub use backend::{CursorPos, Terminal, TerminalSize};
pub use input_event::{KeyCode, KeyEvent, KeyModifiers};
pub use terminal_event::TerminalEvent;
