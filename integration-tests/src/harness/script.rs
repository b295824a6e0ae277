use pidcat_core::logcat::{Interrupt, LineSource, StreamError};
use std::collections::VecDeque;

/// In-memory log producer for driving a pipeline from fixture text.
pub struct ScriptedSource {
    lines: VecDeque<Vec<u8>>,
    delivered: usize,
    interrupt_after: Option<(usize, Interrupt)>,
    stop_requests: usize,
}

impl ScriptedSource {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text
                .split_inclusive('\n')
                .map(|line| line.as_bytes().to_vec())
                .collect(),
            delivered: 0,
            interrupt_after: None,
            stop_requests: 0,
        }
    }

    /// Fire `interrupt` once `count` lines have been handed out, the way a
    /// Ctrl-C during a live stream would.
    pub fn interrupt_after(mut self, count: usize, interrupt: Interrupt) -> Self {
        self.interrupt_after = Some((count, interrupt));
        self
    }

    pub fn stop_requests(&self) -> usize {
        self.stop_requests
    }

    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl LineSource for ScriptedSource {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<bool, StreamError> {
        if let Some((count, interrupt)) = &self.interrupt_after {
            if self.delivered == *count {
                // A killed producer reports end of stream.
                interrupt.trigger();
                return Ok(false);
            }
        }

        match self.lines.pop_front() {
            Some(line) => {
                buf.extend_from_slice(&line);
                self.delivered += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn request_stop(&mut self) {
        self.stop_requests += 1;
    }
}
