use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited unexpectedly ({status})")]
    Exited { command: String, status: ExitStatus },

    #[error("failed to read log stream: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

impl StreamError {
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            source,
        }
    }
}
