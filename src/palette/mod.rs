pub mod dispatch;
pub mod event;
pub mod mode;
pub mod query;

use crate::core::candidate::Candidate;
use crate::core::search::MatchResult;
use crate::core::search::fuzzy::{FuzzyMatch, rank_candidates};
use tracing::{debug, trace};

pub use dispatch::{ActionDispatch, DispatchRequest, Dispatched, RecordingDispatcher};
pub use event::{EventQueue, PaletteEvent};
pub use mode::{COMMANDLINE_SIGIL, PaletteInput, PaletteMode};
pub use query::QueryInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteCommand {
    SelectNext,
    SelectPrevious,
    Confirm,
    Dismiss,
    InsertChar(char),
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    MoveHome,
    MoveEnd,
    DeleteWord,
    ClearQuery,
}

/// One activation of the command palette: the commands on offer, what the
/// user has typed, and which filtered row is selected.
pub struct CommandPalette<A> {
    candidates: Vec<Candidate<A>>,
    query: QueryInput,
    mode: PaletteMode,
    entries: Vec<FuzzyMatch>,
    selected: Option<usize>,
    visible: bool,
    max_results: Option<usize>,
    events: EventQueue,
}

impl<A> CommandPalette<A> {
    pub fn new(candidates: Vec<Candidate<A>>) -> Self {
        let mut palette = Self {
            candidates,
            query: QueryInput::new(),
            mode: PaletteMode::Action,
            entries: Vec::new(),
            selected: None,
            visible: false,
            max_results: None,
            events: EventQueue::new(),
        };
        palette.recompute();
        palette
    }

    /// Caps the number of rows kept after ranking. Zero removes the cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.set_max_results(max_results);
        self
    }

    pub fn set_max_results(&mut self, max_results: usize) {
        self.max_results = (max_results > 0).then_some(max_results);
        self.recompute();
    }

    pub fn set_actions(&mut self, candidates: Vec<Candidate<A>>) {
        self.candidates = candidates;
        self.recompute();
    }

    pub fn candidates(&self) -> &[Candidate<A>] {
        &self.candidates
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn mode(&self) -> PaletteMode {
        self.mode
    }

    pub fn query(&self) -> &QueryInput {
        &self.query
    }

    pub fn query_text(&self) -> &str {
        self.query.value()
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query.set(text);
        self.recompute();
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Filtered rows, best first.
    pub fn entries(&self) -> Vec<MatchResult<'_, A>> {
        self.entries
            .iter()
            .filter_map(|entry| self.to_result(entry))
            .collect()
    }

    pub fn selected_entry(&self) -> Option<MatchResult<'_, A>> {
        let entry = self.entries.get(self.selected?)?;
        self.to_result(entry)
    }

    pub fn next_event(&mut self) -> Option<PaletteEvent> {
        self.events.next_event()
    }

    pub fn drain_events(&mut self) -> Vec<PaletteEvent> {
        self.events.drain()
    }

    /// Shows the palette with the first row selected, or closes it when it
    /// is already showing.
    pub fn toggle_visibility(&mut self) {
        if self.visible {
            self.dismiss();
            return;
        }
        self.visible = true;
        self.selected = if self.entries.is_empty() { None } else { Some(0) };
        debug!(candidates = self.candidates.len(), "command palette opened");
        self.events.emit(PaletteEvent::Opened);
    }

    /// Hides the palette and queues `Closed`. The query is kept so the next
    /// activation resumes the same search.
    pub fn dismiss(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        self.visible = false;
        debug!("command palette closed");
        self.events.emit(PaletteEvent::Closed);
        true
    }

    pub fn select_next(&mut self) -> bool {
        self.step_selection(true)
    }

    pub fn select_previous(&mut self) -> bool {
        self.step_selection(false)
    }

    fn step_selection(&mut self, move_down: bool) -> bool {
        let count = self.entries.len();
        if count == 0 {
            return false;
        }
        let current = self.selected.unwrap_or(0).min(count - 1);
        let next = if move_down {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        self.selected = Some(next);
        true
    }

    /// Runs the selected command, or the typed command line in command-line
    /// mode. Returns true when something was dispatched and the palette
    /// closed.
    pub fn confirm<D>(&mut self, dispatcher: &mut D) -> bool
    where
        D: ActionDispatch<A> + ?Sized,
    {
        match self.mode {
            PaletteMode::Action => self.dispatch_action(dispatcher),
            PaletteMode::Commandline => self.dispatch_commandline(dispatcher),
        }
    }

    fn dispatch_action<D>(&mut self, dispatcher: &mut D) -> bool
    where
        D: ActionDispatch<A> + ?Sized,
    {
        let Some(entry) = self.selected.and_then(|selected| self.entries.get(selected)) else {
            return false;
        };
        let Some(candidate) = self.candidates.get(entry.index) else {
            return false;
        };
        let id = candidate.id.clone();
        let handled = dispatcher.dispatch(DispatchRequest::Action(&candidate.action));
        debug!(%id, handled, "dispatched palette action");
        self.events.emit(PaletteEvent::ActionDispatched { id });
        self.dismiss();
        true
    }

    fn dispatch_commandline<D>(&mut self, dispatcher: &mut D) -> bool
    where
        D: ActionDispatch<A> + ?Sized,
    {
        let PaletteInput::Commandline(Some(commandline)) = PaletteInput::parse(self.query.value())
        else {
            return false;
        };
        if !dispatcher.dispatch(DispatchRequest::Commandline(commandline)) {
            debug!(commandline, "command line rejected by dispatcher");
            return false;
        }
        let commandline = commandline.to_string();
        debug!(%commandline, "dispatched command line");
        self.events
            .emit(PaletteEvent::CommandlineDispatched { commandline });
        self.dismiss();
        true
    }

    /// Applies one editing or navigation command. Returns whether anything
    /// changed.
    pub fn apply<D>(&mut self, command: PaletteCommand, dispatcher: &mut D) -> bool
    where
        D: ActionDispatch<A> + ?Sized,
    {
        match command {
            PaletteCommand::SelectNext => self.select_next(),
            PaletteCommand::SelectPrevious => self.select_previous(),
            PaletteCommand::Confirm => self.confirm(dispatcher),
            PaletteCommand::Dismiss => self.dismiss(),
            PaletteCommand::InsertChar(ch) => {
                self.query.insert_char(ch);
                self.recompute();
                true
            }
            PaletteCommand::Backspace => self.edit(QueryInput::backspace),
            PaletteCommand::Delete => self.edit(QueryInput::delete),
            PaletteCommand::DeleteWord => self.edit(QueryInput::delete_word_left),
            PaletteCommand::ClearQuery => self.edit(QueryInput::clear),
            PaletteCommand::MoveLeft => self.query.move_left(),
            PaletteCommand::MoveRight => self.query.move_right(),
            PaletteCommand::MoveHome => self.query.move_home(),
            PaletteCommand::MoveEnd => self.query.move_end(),
        }
    }

    fn edit(&mut self, op: fn(&mut QueryInput) -> bool) -> bool {
        if !op(&mut self.query) {
            return false;
        }
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        let input = PaletteInput::parse(self.query.value());
        let entries = match input {
            PaletteInput::Commandline(_) => Vec::new(),
            PaletteInput::Search(query) => {
                let mut ranked =
                    rank_candidates(query, self.candidates.iter().map(Candidate::label));
                if let Some(limit) = self.max_results {
                    ranked.truncate(limit);
                }
                ranked
            }
        };
        self.mode = input.mode();
        self.entries = entries;
        self.selected = if self.entries.is_empty() { None } else { Some(0) };
        trace!(
            query = self.query.value(),
            mode = ?self.mode,
            matched = self.entries.len(),
            "recomputed palette entries"
        );
    }

    fn to_result(&self, entry: &FuzzyMatch) -> Option<MatchResult<'_, A>> {
        self.candidates
            .get(entry.index)
            .map(|candidate| MatchResult {
                candidate,
                index: entry.index,
                score: entry.score,
                matched_indices: entry.matched_indices.clone(),
            })
    }
}
