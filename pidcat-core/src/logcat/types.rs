use std::fmt;

/// Logcat priority, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Verbose,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub const SYMBOLS: &'static str = "VDIWEF";

    /// Strict lookup used by the line parser; logcat only emits upper case.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'V' => Some(Level::Verbose),
            'D' => Some(Level::Debug),
            'I' => Some(Level::Info),
            'W' => Some(Level::Warn),
            'E' => Some(Level::Error),
            'F' => Some(Level::Fatal),
            _ => None,
        }
    }

    /// Lenient lookup for user input: a single symbol in either case.
    pub fn parse(value: &str) -> Option<Self> {
        let mut chars = value.trim().chars();
        let symbol = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::from_symbol(symbol.to_ascii_uppercase())
    }

    pub fn symbol(self) -> char {
        match self {
            Level::Verbose => 'V',
            Level::Debug => 'D',
            Level::Info => 'I',
            Level::Warn => 'W',
            Level::Error => 'E',
            Level::Fatal => 'F',
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One parsed logcat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: Option<String>,
    pub level: Level,
    pub tag: String,
    /// pid of the emitting process, kept in its textual form
    pub owner: String,
    pub message: String,
}

/// Announcement that an application process was spawned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessStart {
    pub pid: String,
    pub package: String,
    pub target: String,
    pub uid: String,
    pub gids: String,
    pub start_time: Option<String>,
}

/// Process lifecycle signal extracted from well-known system messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Started(ProcessStart),
    Killed {
        pid: String,
        package: String,
        reason: String,
    },
    Left {
        pid: String,
        package: String,
    },
    Died {
        pid: String,
        package: String,
    },
}

impl ProcessEvent {
    pub fn pid(&self) -> &str {
        match self {
            ProcessEvent::Started(start) => &start.pid,
            ProcessEvent::Killed { pid, .. }
            | ProcessEvent::Left { pid, .. }
            | ProcessEvent::Died { pid, .. } => pid,
        }
    }

    pub fn package(&self) -> &str {
        match self {
            ProcessEvent::Started(start) => &start.package,
            ProcessEvent::Killed { package, .. }
            | ProcessEvent::Left { package, .. }
            | ProcessEvent::Died { package, .. } => package,
        }
    }
}

/// Registry notification that gets rendered as a banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    Created(ProcessStart),
    Ended { pid: String, package: String },
}
