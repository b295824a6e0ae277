use crate::logcat::{LineFormat, StreamError, describe_command};
use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use std::process::{Command, Output, Stdio};

// Pre-Android 10: "* TaskRecord{8c3a12 #35 A=com.example U=0 StackId=1 sz=1}"
static TASK_RECORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r".*TaskRecord.*A[= ]([^ ^}]*)").expect("valid task record regex")
});

// Android 10+: "mResumedActivity: ActivityRecord{5e2a3b u0 com.example/.MainActivity t42}"
static RESUMED_ACTIVITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"mResumedActivity: ActivityRecord\{\S+ \S+ ([^/ ]+)/").expect("valid resumed activity regex")
});

/// Which device `adb` talks to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdbTarget {
    pub serial: Option<String>,
    pub use_device: bool,
    pub use_emulator: bool,
}

/// Builds `adb` invocations against one target.
#[derive(Debug, Clone)]
pub struct Adb {
    program: String,
    target: AdbTarget,
}

impl Adb {
    pub fn new(target: AdbTarget) -> Self {
        Self {
            program: "adb".to_string(),
            target,
        }
    }

    /// Use another binary in place of `adb` (a wrapper script, a fake in tests).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn base_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(serial) = &self.target.serial {
            args.push("-s".to_string());
            args.push(serial.clone());
        }
        if self.target.use_device {
            args.push("-d".to_string());
        }
        if self.target.use_emulator {
            args.push("-e".to_string());
        }
        args
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut command = Command::new(&self.program);
        command.args(self.base_args());
        command.args(args.into_iter().map(|a| a.as_ref().to_string()));
        command
    }

    /// `adb logcat -v <format>`, ready to be handed to `OwnedProcess::spawn`.
    pub fn logcat(&self, format: LineFormat) -> Command {
        self.command(["logcat", "-v", format.logcat_arg()])
    }

    /// Clear the device log buffer and wait for it to finish.
    pub fn clear_log(&self) -> Result<(), StreamError> {
        let mut command = self.command(["logcat", "-c"]);
        let label = describe_command(&command);

        let status = command
            .stdin(Stdio::null())
            .status()
            .map_err(|e| StreamError::spawn(label.clone(), e))?;

        if !status.success() {
            return Err(StreamError::Exited {
                command: label,
                status,
            });
        }
        tracing::debug!("device log cleared");
        Ok(())
    }

    /// Raw `adb shell ps` output.
    pub fn process_snapshot(&self) -> Result<String> {
        self.capture(["shell", "ps"])
    }

    /// Package of the activity currently in the foreground, if any.
    pub fn current_app(&self) -> Result<Option<String>> {
        let dump = self.capture(["shell", "dumpsys", "activity", "activities"])?;
        Ok(parse_current_app(&dump))
    }

    fn capture<const N: usize>(&self, args: [&str; N]) -> Result<String> {
        let mut command = self.command(args);
        let label = describe_command(&command);

        let Output { status, stdout, .. } = command
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .with_context(|| format!("failed to run `{label}`"))?;

        if !status.success() {
            bail!("`{label}` exited with {status}");
        }
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

/// Extract the foreground package from `dumpsys activity activities` output.
pub fn parse_current_app(dump: &str) -> Option<String> {
    TASK_RECORD
        .captures(dump)
        .or_else(|| RESUMED_ACTIVITY.captures(dump))
        .map(|caps| caps[1].to_string())
        .filter(|package| !package.is_empty())
}
