use crate::conf::FilterConfig;
use crate::logcat::color::{Color, ColorAllocator};
use crate::logcat::constants::{LEVEL_BADGE_WIDTH, TAB_EXPANSION, TIMESTAMP_WIDTH};
use crate::logcat::rules::MessageRules;
use crate::logcat::style::Styler;
use crate::logcat::types::{Level, Lifecycle, LogRecord, ProcessStart};

/// Renders records into aligned, colored output blocks.
///
/// Layout of one line:
///
/// ```text
/// [timestamp ]<tag column> <badge> <message>
/// ```
///
/// Everything left of the message is the header; wrapped message lines are
/// indented by the header width so the message column stays aligned.
pub struct ColumnFormatter {
    tag_width: usize,
    show_timestamp: bool,
    width: Option<usize>,
    styler: Styler,
    rules: MessageRules,
    colors: ColorAllocator,
}

impl ColumnFormatter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            tag_width: config.tag_width,
            show_timestamp: config.show_timestamp,
            width: config.terminal_width,
            styler: Styler::new(config.color),
            rules: MessageRules::new(config.color_gc),
            colors: ColorAllocator::new(),
        }
    }

    pub fn header_width(&self) -> usize {
        let timestamp = if self.show_timestamp {
            TIMESTAMP_WIDTH + 1
        } else {
            0
        };
        let tag = if self.tag_width > 0 {
            self.tag_width + 1
        } else {
            0
        };
        timestamp + tag + LEVEL_BADGE_WIDTH + 1
    }

    pub fn colors(&self) -> &ColorAllocator {
        &self.colors
    }

    /// Render one record. `new_tag_header` controls whether the tag is printed
    /// or replaced by blanks of the same width.
    pub fn render(&mut self, record: &LogRecord, new_tag_header: bool) -> String {
        let mut line = String::new();

        if self.show_timestamp {
            let timestamp = record.timestamp.as_deref().unwrap_or("");
            line.push_str(&format!("{:<width$} ", timestamp, width = TIMESTAMP_WIDTH));
        }

        if self.tag_width > 0 {
            if new_tag_header {
                let color = self.colors.allocate(&record.tag);
                let column = tag_column(&record.tag, self.tag_width);
                line.push_str(&self.styler.fg(&column, color));
            } else {
                line.push_str(&" ".repeat(self.tag_width));
            }
            line.push(' ');
        }

        line.push_str(&self.level_badge(record.level));
        line.push(' ');

        let message = self.rules.apply(&record.message, &self.styler);
        line.push_str(&self.indent_wrap(&message));
        line
    }

    pub fn render_lifecycle(&self, notice: &Lifecycle) -> String {
        match notice {
            Lifecycle::Created(start) => self.render_created(start),
            Lifecycle::Ended { pid, package } => self.render_ended(pid, package),
        }
    }

    pub fn render_created(&self, start: &ProcessStart) -> String {
        let bar = self.banner_bar(Color::White);

        let mut block = String::from("\n");
        block.push_str(&bar);
        block.push_str(&self.indent_wrap(&format!(
            " Process {} created for {}",
            start.package, start.target
        )));
        block.push('\n');
        block.push_str(&bar);
        block.push_str(&format!(
            " PID: {}   UID: {}   GIDs: {}",
            start.pid, start.uid, start.gids
        ));
        if let Some(start_time) = &start.start_time {
            block.push_str(&format!("   Started: {start_time}"));
        }
        block.push('\n');
        block
    }

    pub fn render_ended(&self, pid: &str, package: &str) -> String {
        let mut block = String::from("\n");
        block.push_str(&self.banner_bar(Color::Red));
        block.push_str(&format!(" Process {package} (PID: {pid}) ended"));
        block.push('\n');
        block
    }

    fn banner_bar(&self, color: Color) -> String {
        let width = self.header_width().saturating_sub(1);
        self.styler.bg(&" ".repeat(width), color)
    }

    fn level_badge(&self, level: Level) -> String {
        let (fg, bg) = match level {
            Level::Verbose => (Color::White, Color::Black),
            Level::Debug => (Color::Black, Color::Blue),
            Level::Info => (Color::Black, Color::Green),
            Level::Warn => (Color::Black, Color::Yellow),
            Level::Error | Level::Fatal => (Color::Black, Color::Red),
        };
        self.styler.fg_on(&format!(" {} ", level.symbol()), fg, bg)
    }

    fn indent_wrap(&self, message: &str) -> String {
        let Some(width) = self.width else {
            return message.to_string();
        };
        let header = self.header_width();
        let message = message.replace('\t', TAB_EXPANSION);
        wrap_indented(&message, width.saturating_sub(header), header)
    }
}

/// Fit `tag` into exactly `width` columns: keep its rightmost characters and
/// right-align.
pub fn tag_column(tag: &str, width: usize) -> String {
    let count = tag.chars().count();
    let tail: String = tag.chars().skip(count.saturating_sub(width)).collect();
    format!("{tail:>width$}")
}

/// Hard-wrap `message` every `wrap_area` visible characters, indenting each
/// continuation line by `indent` spaces. ANSI escape sequences take no room
/// and are never split. A zero `wrap_area` disables wrapping.
pub fn wrap_indented(message: &str, wrap_area: usize, indent: usize) -> String {
    if wrap_area == 0 {
        return message.to_string();
    }

    let mut out = String::with_capacity(message.len());
    let mut visible = 0;
    let mut chars = message.chars();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            out.push(c);
            for next in chars.by_ref() {
                out.push(next);
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if visible == wrap_area {
            out.push('\n');
            out.push_str(&" ".repeat(indent));
            visible = 0;
        }
        out.push(c);
        visible += 1;
    }

    out
}
