use std::io::{self, IsTerminal};

/// What the display sink supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminalFacts {
    /// Columns available, `None` when output is not a terminal.
    pub width: Option<usize>,
    pub color: bool,
}

impl TerminalFacts {
    pub fn detect() -> Self {
        if !io::stdout().is_terminal() {
            return Self::default();
        }

        let width = crossterm::terminal::size()
            .ok()
            .map(|(columns, _)| usize::from(columns))
            .filter(|columns| *columns > 0);

        Self { width, color: true }
    }
}
