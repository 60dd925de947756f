use clap::Parser;
use cmdpal::config::PaletteConfig;
use cmdpal::core::candidate::Candidate;
use cmdpal::core::search::{MatchResult, Score, filter, filter_limited};
use cmdpal::logging::init_logging;
use cmdpal::palette::{CommandPalette, Dispatched, PaletteEvent, PaletteInput, RecordingDispatcher};
use cmdpal::runtime::KeyBindings;
use cmdpal::terminal::{Terminal, TerminalEvent};
use cmdpal::ui::PaletteView;
use cmdpal::Result;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, warn};

const EXIT_NO_MATCH: u8 = 1;
const EXIT_ABORTED: u8 = 130;

#[derive(Parser, Debug)]
#[command(name = "cmdpal", version, about = "Fuzzy command palette for terminal actions")]
struct Cli {
    /// YAML command set; the built-in terminal commands are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Filter once and print the ranked results instead of opening the palette.
    #[arg(short, long)]
    query: Option<String>,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    /// Maximum number of results (overrides `max_results`, 0 for no limit).
    #[arg(short, long)]
    limit: Option<usize>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Serialize)]
struct ResultRow<'a> {
    id: &'a str,
    label: &'a str,
    action: &'a str,
    keys: Option<&'a str>,
    score: Score,
    positions: &'a [usize],
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Selection<'a> {
    Action(&'a str),
    Commandline(&'a str),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli.log_level) {
        eprintln!("{e}");
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match cli.config.as_deref() {
        Some(path) => PaletteConfig::load(path)?,
        None => PaletteConfig::builtin()?,
    };
    let limit = cli.limit.or(config.max_results).unwrap_or(0);
    let candidates = config.candidates();

    match cli.query.as_deref() {
        Some(query) => print_query(&candidates, query, limit, cli.json),
        None => run_interactive(candidates, limit, config.show_keys, cli.json),
    }
}

fn print_query(
    candidates: &[Candidate<String>],
    query: &str,
    limit: usize,
    json: bool,
) -> Result<ExitCode> {
    match PaletteInput::parse(query) {
        PaletteInput::Commandline(None) => Ok(ExitCode::from(EXIT_NO_MATCH)),
        PaletteInput::Commandline(Some(commandline)) => {
            print_selection(&Selection::Commandline(commandline), json)?;
            Ok(ExitCode::SUCCESS)
        }
        PaletteInput::Search(query) => {
            let results = if limit == 0 {
                filter(candidates, query)
            } else {
                filter_limited(candidates, query, limit)
            };
            debug!(query, matched = results.len(), "filtered commands");
            print_results(&results, json)?;
            if results.is_empty() {
                Ok(ExitCode::from(EXIT_NO_MATCH))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn print_results(results: &[MatchResult<'_, String>], json: bool) -> Result<()> {
    if json {
        let rows: Vec<ResultRow<'_>> = results
            .iter()
            .map(|entry| ResultRow {
                id: entry.candidate.id.as_str(),
                label: entry.candidate.label(),
                action: entry.candidate.action.as_str(),
                keys: entry.candidate.keys.as_deref(),
                score: entry.score,
                positions: &entry.matched_indices,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for entry in results {
        println!("{}\t{}", entry.candidate.id, entry.candidate.label());
    }
    Ok(())
}

fn print_selection(selection: &Selection<'_>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(selection)?);
        return Ok(());
    }
    match selection {
        Selection::Action(action) => println!("{action}"),
        Selection::Commandline(commandline) => println!("{commandline}"),
    }
    Ok(())
}

fn run_interactive(
    candidates: Vec<Candidate<String>>,
    limit: usize,
    show_keys: bool,
    json: bool,
) -> Result<ExitCode> {
    let mut palette = CommandPalette::new(candidates).with_max_results(limit);
    let mut dispatcher = RecordingDispatcher::new();
    let bindings = KeyBindings::new();
    let view = PaletteView::new().with_show_keys(show_keys);

    // stdout carries the selection, so the palette draws on stderr.
    let mut terminal = Terminal::stderr()?;
    terminal.enter()?;
    palette.toggle_visibility();

    let result = event_loop(&mut terminal, &mut palette, &mut dispatcher, &bindings, &view);
    let restored = terminal.exit();
    finish_session(result, restored)?;

    let selection = match dispatcher.last() {
        Some(Dispatched::Action(action)) => Selection::Action(action.as_str()),
        Some(Dispatched::Commandline(commandline)) => Selection::Commandline(commandline.as_str()),
        None => return Ok(ExitCode::from(EXIT_ABORTED)),
    };
    print_selection(&selection, json)?;
    Ok(ExitCode::SUCCESS)
}

/// The event-loop error wins over a failure to restore the terminal, which
/// is only logged in that case.
fn finish_session(result: Result<()>, restored: std::io::Result<()>) -> Result<()> {
    match (result, restored) {
        (Err(e), Err(restore_err)) => {
            warn!(error = %restore_err, "failed to restore terminal");
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), restored) => Ok(restored?),
    }
}

fn event_loop(
    terminal: &mut Terminal,
    palette: &mut CommandPalette<String>,
    dispatcher: &mut RecordingDispatcher<String>,
    bindings: &KeyBindings,
    view: &PaletteView,
) -> Result<()> {
    let mut render_requested = true;

    loop {
        if render_requested {
            terminal.render_frame(&view.render(palette, terminal.size()))?;
            render_requested = false;
        }

        match terminal.poll_event(Duration::from_millis(100))? {
            TerminalEvent::Key(key) => {
                if let Some(command) = bindings.resolve(key) {
                    render_requested = palette.apply(command, dispatcher);
                }
            }
            TerminalEvent::Resize(_) => render_requested = true,
            TerminalEvent::Tick => {}
        }

        while let Some(event) = palette.next_event() {
            debug!(?event, "palette event");
            if event == PaletteEvent::Closed {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdpal::Error;
    use std::io;

    #[test]
    fn loop_error_is_kept_when_restore_also_fails() {
        let loop_err = Error::DuplicateId("newTab".to_string());
        let restore_err = io::Error::other("tty gone");
        let err = finish_session(Err(loop_err), Err(restore_err)).expect_err("should fail");
        assert!(matches!(err, Error::DuplicateId(ref id) if id == "newTab"));
    }

    #[test]
    fn restore_failure_surfaces_after_clean_loop() {
        let err = finish_session(Ok(()), Err(io::Error::other("tty gone"))).expect_err("should fail");
        assert!(matches!(err, Error::Terminal(_)));
        assert!(finish_session(Ok(()), Ok(())).is_ok());
    }
}
