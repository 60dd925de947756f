use crate::palette::{CommandPalette, PaletteInput};
use crate::terminal::{CursorPos, TerminalSize};
use crate::ui::text::{Color, Span, SpanLine, Style, line_width};
use unicode_width::UnicodeWidthStr;

const PROMPT: &str = "❯ ";
const SELECTED_MARKER: &str = "› ";
const IDLE_MARKER: &str = "  ";

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

#[derive(Debug, Clone, Copy)]
pub struct PaletteTheme {
    pub prompt: Style,
    pub hint: Style,
    pub label: Style,
    pub selected: Style,
    pub highlight: Style,
    pub keys: Style,
}

impl Default for PaletteTheme {
    fn default() -> Self {
        Self {
            prompt: Style::new().color(Color::Cyan).bold(),
            hint: Style::new().color(Color::DarkGrey),
            label: Style::new(),
            selected: Style::new().color(Color::White).background(Color::Blue),
            highlight: Style::new().color(Color::Yellow).bold(),
            keys: Style::new().color(Color::DarkGrey),
        }
    }
}

pub struct PaletteView {
    theme: PaletteTheme,
    show_keys: bool,
}

impl PaletteView {
    pub fn new() -> Self {
        Self {
            theme: PaletteTheme::default(),
            show_keys: true,
        }
    }

    pub fn with_theme(mut self, theme: PaletteTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_show_keys(mut self, show_keys: bool) -> Self {
        self.show_keys = show_keys;
        self
    }

    /// Prompt line, status line, then as many result rows as fit. The window
    /// scrolls so the selected row stays visible.
    pub fn render<A>(&self, palette: &CommandPalette<A>, size: TerminalSize) -> RenderFrame {
        let mut frame = RenderFrame::default();
        let width = size.width as usize;

        frame.lines.push(vec![
            Span::styled(PROMPT, self.theme.prompt),
            Span::styled(palette.query_text(), self.theme.label),
        ]);
        let cursor_col = UnicodeWidthStr::width(PROMPT)
            + palette
                .query_text()
                .chars()
                .take(palette.query().cursor())
                .map(|ch| unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0))
                .sum::<usize>();
        frame.cursor = Some(CursorPos {
            col: cursor_col.min(u16::MAX as usize) as u16,
            row: 0,
        });

        frame.lines.push(vec![Span::styled(
            self.status_text(palette),
            self.theme.hint,
        )]);

        let rows_available = (size.height as usize).saturating_sub(frame.lines.len());
        let entries = palette.entries();
        let start = visible_start(palette.selected_index(), rows_available, entries.len());

        for (row, entry) in entries.iter().enumerate().skip(start).take(rows_available) {
            let active = palette.selected_index() == Some(row);
            let base = if active {
                self.theme.label.merge(self.theme.selected)
            } else {
                self.theme.label
            };
            let mut line = vec![Span::styled(
                if active { SELECTED_MARKER } else { IDLE_MARKER },
                base,
            )];
            line.extend(render_text_spans(
                entry.candidate.label(),
                &entry.ranges(),
                base,
                self.theme.highlight,
            ));
            if self.show_keys {
                if let Some(keys) = entry.candidate.keys.as_deref() {
                    let used = line_width(&line);
                    let keys_width = UnicodeWidthStr::width(keys);
                    let pad = width.saturating_sub(used + keys_width + 1).max(1);
                    line.push(Span::styled(" ".repeat(pad), base));
                    line.push(Span::styled(keys, base.merge(self.theme.keys)));
                }
            }
            frame.lines.push(line);
        }

        frame
    }

    fn status_text<A>(&self, palette: &CommandPalette<A>) -> String {
        match PaletteInput::parse(palette.query_text()) {
            PaletteInput::Commandline(Some(commandline)) => {
                format!("Enter runs: {commandline}")
            }
            PaletteInput::Commandline(None) => "Type a command line to run".to_string(),
            PaletteInput::Search(_) => format!(
                "{} of {} commands  (> for command line)",
                palette.len(),
                palette.candidates().len()
            ),
        }
    }
}

impl Default for PaletteView {
    fn default() -> Self {
        Self::new()
    }
}

fn visible_start(selected: Option<usize>, rows: usize, total: usize) -> usize {
    if rows == 0 || total <= rows {
        return 0;
    }
    let selected = selected.unwrap_or(0).min(total - 1);
    selected.saturating_sub(rows - 1)
}

/// Splits `text` into plain and highlighted spans. `highlights` are
/// half-open char ranges.
pub fn render_text_spans(
    text: &str,
    highlights: &[(usize, usize)],
    base_style: Style,
    highlight_style: Style,
) -> Vec<Span> {
    if highlights.is_empty() {
        return vec![Span::styled(text, base_style)];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut sorted = highlights.to_vec();
    sorted.sort_unstable();

    let mut spans = Vec::<Span>::new();
    let mut cursor = 0usize;
    for (start, end) in sorted {
        let start = start.min(chars.len()).max(cursor);
        let end = end.min(chars.len());
        if start > cursor {
            spans.push(Span::styled(
                chars[cursor..start].iter().collect::<String>(),
                base_style,
            ));
        }
        if end > start {
            spans.push(Span::styled(
                chars[start..end].iter().collect::<String>(),
                base_style.merge(highlight_style),
            ));
        }
        cursor = end.max(cursor);
    }
    if cursor < chars.len() {
        spans.push(Span::styled(
            chars[cursor..].iter().collect::<String>(),
            base_style,
        ));
    }

    spans
}
