use unicode_width::UnicodeWidthStr;

/// Colors the palette theme can ask for. The backend maps them onto the
/// terminal's sixteen-color set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Reset,
    DarkGrey,
    Yellow,
    Blue,
    Cyan,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub color: Option<Color>,
    pub background: Option<Color>,
    pub bold: bool,
}

impl Style {
    pub const PLAIN: Style = Style {
        color: None,
        background: None,
        bold: false,
    };

    pub fn new() -> Self {
        Self::PLAIN
    }

    pub fn color(self, color: Color) -> Self {
        Self {
            color: Some(color),
            ..self
        }
    }

    pub fn background(self, background: Color) -> Self {
        Self {
            background: Some(background),
            ..self
        }
    }

    pub fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    /// `top` wins wherever it sets a field. Selected rows layer the match
    /// highlight over the selection colors this way.
    pub fn merge(self, top: Style) -> Self {
        Self {
            color: top.color.or(self.color),
            background: top.background.or(self.background),
            bold: top.bold || self.bold,
        }
    }
}

/// A run of label, prompt or hint text drawn with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Span {
            text: text.into(),
            style,
        }
    }

    /// Display columns, not chars.
    pub fn width(&self) -> usize {
        self.text.width()
    }
}

pub type SpanLine = Vec<Span>;

pub fn line_width(line: &[Span]) -> usize {
    line.iter().map(Span::width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_base_fields_the_top_leaves_unset() {
        let selected = Style::new().color(Color::White).background(Color::Blue);
        let highlight = Style::new().color(Color::Yellow).bold();
        let merged = selected.merge(highlight);
        assert_eq!(merged.color, Some(Color::Yellow));
        assert_eq!(merged.background, Some(Color::Blue));
        assert!(merged.bold);
        assert_eq!(Style::PLAIN.merge(Style::PLAIN), Style::default());
    }

    #[test]
    fn width_counts_terminal_columns() {
        let line = vec![
            Span::styled("❯ ", Style::PLAIN),
            Span::styled("設定", Style::PLAIN),
        ];
        assert_eq!(line_width(&line), 6);
    }
}
