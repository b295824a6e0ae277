use crate::conf::FilterConfig;
use crate::logcat::constants::NATIVE_CRASH_TAG;
use crate::logcat::error::StreamError;
use crate::logcat::format::ColumnFormatter;
use crate::logcat::parse::{LineParser, detect_event, is_backtrace_frame};
use crate::logcat::registry::{ProcessRegistry, SharedRegistry, lock_registry};
use crate::logcat::stream::{Interrupt, LineSource};
use crate::logcat::types::LogRecord;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Streaming,
    Closed,
    Interrupted,
}

/// How a run ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The producer closed the stream.
    Closed,
    /// The user asked to stop.
    Interrupted,
}

/// Owns all per-run state: registry handle, formatter (and with it the color
/// allocator) and the last tag shown.
pub struct FilterPipeline {
    config: FilterConfig,
    parser: LineParser,
    registry: SharedRegistry,
    formatter: ColumnFormatter,
    last_tag: Option<String>,
    state: PipelineState,
}

impl FilterPipeline {
    pub fn new(config: FilterConfig) -> Self {
        let registry = ProcessRegistry::new(config.packages.clone()).shared();
        Self::with_registry(config, registry)
    }

    /// Build around an existing registry, e.g. one seeded from a process
    /// snapshot and refreshed in the background.
    pub fn with_registry(config: FilterConfig, registry: SharedRegistry) -> Self {
        Self {
            parser: LineParser::new(config.line_format()),
            formatter: ColumnFormatter::new(&config),
            config,
            registry,
            last_tag: None,
            state: PipelineState::Init,
        }
    }

    pub fn registry(&self) -> SharedRegistry {
        self.registry.clone()
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn formatter(&self) -> &ColumnFormatter {
        &self.formatter
    }

    /// Run one raw line through parse, registry update, filter and render.
    ///
    /// Returns the output blocks in display order: lifecycle banners first,
    /// then the line itself if it survived filtering.
    pub fn process_line(&mut self, raw: &[u8]) -> Vec<String> {
        let mut blocks = Vec::new();

        let Some(mut record) = self.parser.parse(raw) else {
            return blocks;
        };

        // One lock per line keeps a snapshot refresh from landing between the
        // lifecycle update and the ownership check.
        let show = {
            let mut registry = lock_registry(&self.registry);

            if let Some(event) = detect_event(&record) {
                if let Some(notice) = registry.apply(event) {
                    blocks.push(self.formatter.render_lifecycle(&notice));
                    self.last_tag = None;
                }
            }

            if record.tag == NATIVE_CRASH_TAG && is_backtrace_frame(&record.message) {
                record.message = record.message.trim_start().to_string();
                if let Some(app_pid) = registry.app_pid() {
                    record.owner = app_pid.to_string();
                }
            }

            (self.config.show_all || registry.is_watched(&record.owner, &record.tag))
                && self.config.admits(record.level, &record.tag)
        };

        if show {
            blocks.push(self.render(&record));
        }

        blocks
    }

    fn render(&mut self, record: &LogRecord) -> String {
        let new_tag_header =
            self.config.always_tags || self.last_tag.as_deref() != Some(record.tag.as_str());
        if new_tag_header {
            self.last_tag = Some(record.tag.clone());
        }
        self.formatter.render(record, new_tag_header)
    }

    /// Pull lines from `source` until it ends or `interrupt` fires, writing
    /// every rendered block to `out`.
    pub fn run<S, W>(
        &mut self,
        source: &mut S,
        out: &mut W,
        interrupt: &Interrupt,
    ) -> Result<Outcome, StreamError>
    where
        S: LineSource + ?Sized,
        W: Write + ?Sized,
    {
        self.state = PipelineState::Streaming;
        let mut buf = Vec::with_capacity(256);

        loop {
            if interrupt.is_triggered() {
                return Ok(self.interrupted(source));
            }

            buf.clear();
            let read = source.read_line(&mut buf);

            // A producer killed by the interrupt surfaces as EOF or a failed exit.
            if interrupt.is_triggered() {
                return Ok(self.interrupted(source));
            }

            match read {
                Ok(true) => {}
                Ok(false) => {
                    self.state = PipelineState::Closed;
                    tracing::debug!("log stream closed");
                    return Ok(Outcome::Closed);
                }
                Err(e) => {
                    self.state = PipelineState::Closed;
                    source.request_stop();
                    return Err(e);
                }
            }

            for block in self.process_line(&buf) {
                if let Err(e) = writeln!(out, "{block}") {
                    self.state = PipelineState::Closed;
                    source.request_stop();
                    return Err(StreamError::Output(e));
                }
            }
        }
    }

    fn interrupted<S: LineSource + ?Sized>(&mut self, source: &mut S) -> Outcome {
        self.state = PipelineState::Interrupted;
        source.request_stop();
        tracing::debug!("log stream interrupted");
        Outcome::Interrupted
    }
}
