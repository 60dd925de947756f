pub mod filter;
pub mod fuzzy;

pub use filter::{FilteredList, MatchResult, filter, filter_limited};
pub use fuzzy::{FuzzyMatch, Score, match_indices, matches};
