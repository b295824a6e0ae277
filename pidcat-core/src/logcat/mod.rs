//! Logcat Processing Pipeline
//!
//! This module turns a raw `adb logcat` stream into readable, filtered output
//! for the packages being debugged.
//!
//! Log lines flow in one at a time and each one goes through the same steps:
//! - **Parse**: split the line into level, tag, pid and message, or drop it
//! - **Track**: process start and death announcements update the registry of
//!   pids that belong to the watched packages, and print a banner
//! - **Filter**: keep the line only if its pid is watched and its level and tag
//!   pass the configured filters
//! - **Render**: print the line with a right-aligned colored tag column, a
//!   level badge and the message wrapped to the terminal width
//!
//! An optional background thread re-seeds the registry from `ps` snapshots so
//! processes that started before we attached are picked up as well.
//!
//! The overall data processing architecture is:
//!
//! LineSource
//! LineParser
//! LogRecord
//! ProcessRegistry
//! FilterConfig
//! ColumnFormatter
//! stdout
//!

mod color;
pub(crate) mod constants;
mod error;
mod format;
mod parse;
mod pipeline;
mod refresh;
mod registry;
mod rules;
mod snapshot;
mod stream;
mod style;
mod types;

#[cfg(test)]
mod tests;

pub use color::{Color, ColorAllocator, KNOWN_TAGS, TAG_PALETTE};
pub use constants::{DEFAULT_TAG_WIDTH, TIMESTAMP_WIDTH};
pub use error::StreamError;
pub use format::{ColumnFormatter, tag_column, wrap_indented};
pub use parse::{LineFormat, LineParser, detect_event, is_backtrace_frame};
pub use pipeline::{FilterPipeline, Outcome, PipelineState};
pub use refresh::SnapshotRefresher;
pub use registry::{ProcessRegistry, SharedRegistry, lock_registry};
pub use rules::{MessageRule, MessageRules};
pub use snapshot::{SnapshotEntry, parse_snapshot};
pub use stream::{ExternalRedirect, Interrupt, LineSource, OwnedProcess, describe_command};
pub use style::Styler;
pub use types::{Level, Lifecycle, LogRecord, ProcessEvent, ProcessStart};
