use owo_colors::AnsiColors;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    pub(crate) fn ansi(self) -> AnsiColors {
        match self {
            Color::Black => AnsiColors::Black,
            Color::Red => AnsiColors::Red,
            Color::Green => AnsiColors::Green,
            Color::Yellow => AnsiColors::Yellow,
            Color::Blue => AnsiColors::Blue,
            Color::Magenta => AnsiColors::Magenta,
            Color::Cyan => AnsiColors::Cyan,
            Color::White => AnsiColors::White,
        }
    }

    /// Backgrounds use the high intensity variants so badges stay legible.
    pub(crate) fn bright_ansi(self) -> AnsiColors {
        match self {
            Color::Black => AnsiColors::BrightBlack,
            Color::Red => AnsiColors::BrightRed,
            Color::Green => AnsiColors::BrightGreen,
            Color::Yellow => AnsiColors::BrightYellow,
            Color::Blue => AnsiColors::BrightBlue,
            Color::Magenta => AnsiColors::BrightMagenta,
            Color::Cyan => AnsiColors::BrightCyan,
            Color::White => AnsiColors::BrightWhite,
        }
    }
}

/// Recency pool, least recently used first.
pub const TAG_PALETTE: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

/// Framework tags with a fixed color.
pub const KNOWN_TAGS: &[(&str, Color)] = &[
    ("dalvikvm", Color::White),
    ("Process", Color::White),
    ("ActivityManager", Color::White),
    ("ActivityThread", Color::White),
    ("AndroidRuntime", Color::Cyan),
    ("jdwp", Color::White),
    ("StrictMode", Color::White),
    ("DEBUG", Color::Yellow),
];

/// Hands out tag colors from a six color pool, reusing the least recently
/// used one. A tag keeps its color for the whole run, so once more than six
/// tags are active two of them will share a color.
#[derive(Debug, Clone)]
pub struct ColorAllocator {
    assigned: HashMap<String, Color>,
    recency: Vec<Color>,
}

impl Default for ColorAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorAllocator {
    pub fn new() -> Self {
        Self {
            assigned: KNOWN_TAGS
                .iter()
                .map(|(tag, color)| (tag.to_string(), *color))
                .collect(),
            recency: TAG_PALETTE.to_vec(),
        }
    }

    pub fn allocate(&mut self, tag: &str) -> Color {
        let color = match self.assigned.get(tag) {
            Some(color) => *color,
            None => {
                let color = self.recency[0];
                self.assigned.insert(tag.to_string(), color);
                color
            }
        };

        if let Some(index) = self.recency.iter().position(|c| *c == color) {
            self.recency.remove(index);
            self.recency.push(color);
        }

        color
    }

    pub fn assigned(&self, tag: &str) -> Option<Color> {
        self.assigned.get(tag).copied()
    }

    /// Pool order, least recently used first.
    pub fn recency(&self) -> &[Color] {
        &self.recency
    }
}
