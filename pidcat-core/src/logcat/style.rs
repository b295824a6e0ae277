use crate::logcat::color::Color;
use owo_colors::OwoColorize;

/// ANSI styling that collapses to plain text when the sink has no color support.
#[derive(Debug, Clone, Copy)]
pub struct Styler {
    enabled: bool,
}

impl Styler {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn fg(&self, text: &str, fg: Color) -> String {
        if self.enabled {
            text.color(fg.ansi()).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bg(&self, text: &str, bg: Color) -> String {
        if self.enabled {
            text.on_color(bg.bright_ansi()).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn fg_on(&self, text: &str, fg: Color, bg: Color) -> String {
        if self.enabled {
            text.color(fg.ansi()).on_color(bg.bright_ansi()).to_string()
        } else {
            text.to_string()
        }
    }
}
