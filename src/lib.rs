pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod palette;
pub mod runtime;
pub mod terminal;
pub mod ui;

pub use crate::core::CommandId;
pub use crate::core::candidate::Candidate;
pub use crate::core::search::{FilteredList, MatchResult, Score, filter, filter_limited, matches};
pub use error::{Error, Result};
pub use palette::{ActionDispatch, CommandPalette, DispatchRequest, PaletteEvent, PaletteMode};
