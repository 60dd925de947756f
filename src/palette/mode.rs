pub const COMMANDLINE_SIGIL: char = '>';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteMode {
    #[default]
    Action,
    Commandline,
}

impl PaletteMode {
    pub fn of(input: &str) -> Self {
        if input.starts_with(COMMANDLINE_SIGIL) {
            Self::Commandline
        } else {
            Self::Action
        }
    }
}

/// How the palette reads the current input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteInput<'a> {
    Search(&'a str),
    /// `None` when nothing but whitespace follows the sigil.
    Commandline(Option<&'a str>),
}

impl<'a> PaletteInput<'a> {
    pub fn parse(input: &'a str) -> Self {
        match input.strip_prefix(COMMANDLINE_SIGIL) {
            Some(rest) => {
                let commandline = rest.trim_start();
                if commandline.is_empty() {
                    Self::Commandline(None)
                } else {
                    Self::Commandline(Some(commandline))
                }
            }
            None => Self::Search(input),
        }
    }

    pub fn mode(&self) -> PaletteMode {
        match self {
            Self::Search(_) => PaletteMode::Action,
            Self::Commandline(_) => PaletteMode::Commandline,
        }
    }
}
