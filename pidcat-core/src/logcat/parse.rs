use crate::logcat::constants::{ACTIVITY_MANAGER_TAG, DALVIK_TAG, NOISE_MARKER};
use crate::logcat::types::{Level, LogRecord, ProcessEvent, ProcessStart};
use once_cell::sync::Lazy;
use regex::Regex;

// D/Tag( 1234): message
static BRIEF_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z])/(.+?)\(\s*(\d+)\s*\):(?: (.*))?$").expect("valid brief line regex")
});

// 10-18 12:34:56.789 D/Tag( 1234): message
static TIME_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3})\s+)?([A-Z])/(.+?)\(\s*(\d+)\s*\):(?: (.*))?$")
        .expect("valid time line regex")
});

// Start proc com.example for activity com.example/.Main: pid=1234 uid=10045 gids={50045, 3003}
static START_PROC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Start proc ([a-zA-Z0-9._:]+) for ([a-z]+ [^:]+): pid=(\d+) uid=(\d+) gids=(.*)$")
        .expect("valid start proc regex")
});

// Start proc 1234:com.example/u0a45 for activity com.example/.Main
static START_PROC_COMPACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Start proc (\d+):([a-zA-Z0-9._:]+)/[a-z0-9]+ for (.*)$")
        .expect("valid compact start proc regex")
});

// >>>>> com.example [ userId:0 | appId:10045 ]
static DALVIK_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^>>>>> ([a-zA-Z0-9._:]+) \[ userId:0 \| appId:(\d+) \]$")
        .expect("valid dalvik start regex")
});

static PID_KILL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Killing (\d+):([a-zA-Z0-9._:]+)/[^:]+: (.*)$").expect("valid kill regex")
});

static PID_LEAVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^No longer want ([a-zA-Z0-9._:]+) \(pid (\d+)\): .*$").expect("valid leave regex")
});

static PID_DEATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Process ([a-zA-Z0-9._:]+) \(pid (\d+)\) has died.?$").expect("valid death regex")
});

static BACKTRACE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(.*?)pc\s(.*?)$").expect("valid backtrace regex"));

/// Line shape produced by `adb logcat -v <format>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFormat {
    #[default]
    Brief,
    /// Brief with a leading date-time token. The token stays optional so
    /// brief lines interleaved in the same stream still parse.
    Time,
}

impl LineFormat {
    /// Value passed to `logcat -v`.
    pub fn logcat_arg(self) -> &'static str {
        match self {
            LineFormat::Brief => "brief",
            LineFormat::Time => "time",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LineParser {
    format: LineFormat,
}

impl LineParser {
    pub fn new(format: LineFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> LineFormat {
        self.format
    }

    /// Parse one raw line. Invalid UTF-8 is replaced rather than rejected.
    pub fn parse(&self, raw: &[u8]) -> Option<LogRecord> {
        let decoded = String::from_utf8_lossy(raw);
        self.parse_str(&decoded)
    }

    pub fn parse_str(&self, line: &str) -> Option<LogRecord> {
        // Only the terminator goes; trailing blanks belong to the message.
        let line = line.trim_end_matches(['\r', '\n']).trim_start();
        if line.trim_end().is_empty() || line.contains(NOISE_MARKER) {
            return None;
        }

        let (timestamp, caps, first) = match self.format {
            LineFormat::Brief => (None, BRIEF_LINE.captures(line)?, 1),
            LineFormat::Time => {
                let caps = TIME_LINE.captures(line)?;
                let timestamp = caps.get(1).map(|m| m.as_str().to_string());
                (timestamp, caps, 2)
            }
        };

        let symbol = caps[first].chars().next()?;
        let Some(level) = Level::from_symbol(symbol) else {
            tracing::trace!(%symbol, "dropping line with unknown level");
            return None;
        };

        Some(LogRecord {
            timestamp,
            level,
            tag: caps[first + 1].trim().to_string(),
            owner: caps[first + 2].to_string(),
            message: caps
                .get(first + 3)
                .map_or_else(String::new, |m| m.as_str().to_string()),
        })
    }
}

/// Detect a process lifecycle announcement carried by `record`.
///
/// Start announcements are checked first, most specific shape first. Terminal
/// announcements only count when emitted by the activity manager.
pub fn detect_event(record: &LogRecord) -> Option<ProcessEvent> {
    detect_start(record)
        .map(ProcessEvent::Started)
        .or_else(|| detect_termination(record))
}

fn detect_start(record: &LogRecord) -> Option<ProcessStart> {
    let message = record.message.as_str();

    if let Some(caps) = START_PROC.captures(message) {
        return Some(ProcessStart {
            package: caps[1].to_string(),
            target: caps[2].to_string(),
            pid: caps[3].to_string(),
            uid: caps[4].to_string(),
            gids: caps[5].to_string(),
            start_time: record.timestamp.clone(),
        });
    }

    if let Some(caps) = START_PROC_COMPACT.captures(message) {
        return Some(ProcessStart {
            pid: caps[1].to_string(),
            package: caps[2].to_string(),
            target: caps[3].to_string(),
            start_time: record.timestamp.clone(),
            ..Default::default()
        });
    }

    if record.level == Level::Error && record.tag == DALVIK_TAG {
        if let Some(caps) = DALVIK_START.captures(message) {
            return Some(ProcessStart {
                pid: record.owner.clone(),
                package: caps[1].to_string(),
                uid: caps[2].to_string(),
                start_time: record.timestamp.clone(),
                ..Default::default()
            });
        }
    }

    None
}

fn detect_termination(record: &LogRecord) -> Option<ProcessEvent> {
    if record.tag != ACTIVITY_MANAGER_TAG {
        return None;
    }
    let message = record.message.as_str();

    if let Some(caps) = PID_KILL.captures(message) {
        return Some(ProcessEvent::Killed {
            pid: caps[1].to_string(),
            package: caps[2].to_string(),
            reason: caps[3].to_string(),
        });
    }

    if let Some(caps) = PID_LEAVE.captures(message) {
        return Some(ProcessEvent::Left {
            pid: caps[2].to_string(),
            package: caps[1].to_string(),
        });
    }

    PID_DEATH.captures(message).map(|caps| ProcessEvent::Died {
        pid: caps[2].to_string(),
        package: caps[1].to_string(),
    })
}

/// Whether `message` is one frame of a native crash backtrace (`#00 pc ...`).
pub fn is_backtrace_frame(message: &str) -> bool {
    BACKTRACE_LINE.is_match(message.trim_start())
}
