use crate::logcat::error::StreamError;
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use std::io::{self, BufRead, BufReader, StdinLock};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// Producer of raw log lines.
pub trait LineSource {
    /// Read the next line, terminator included, into `buf`.
    ///
    /// Returns `Ok(false)` once the stream has ended.
    fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<bool, StreamError>;

    /// Ask the producer to stop. Must be safe to call more than once.
    fn request_stop(&mut self);
}

/// Lines that are already being piped in, e.g. `adb logcat | pidcat`.
pub struct ExternalRedirect<R> {
    reader: R,
    stopped: bool,
}

impl<R: BufRead> ExternalRedirect<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            stopped: false,
        }
    }
}

impl ExternalRedirect<StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> LineSource for ExternalRedirect<R> {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<bool, StreamError> {
        if self.stopped {
            return Ok(false);
        }
        let read = self
            .reader
            .read_until(b'\n', buf)
            .map_err(StreamError::Read)?;
        Ok(read > 0)
    }

    fn request_stop(&mut self) {
        // The upstream writer is not ours to kill; just stop consuming.
        self.stopped = true;
    }
}

/// A log producer spawned and owned by us, e.g. `adb logcat -v brief`.
#[derive(Debug)]
pub struct OwnedProcess {
    command: String,
    child: Child,
    stdout: BufReader<ChildStdout>,
    reaped: bool,
    watcher: Option<Interrupt>,
}

impl OwnedProcess {
    pub fn spawn(mut command: Command) -> Result<Self, StreamError> {
        let label = describe_command(&command);
        command.stdin(Stdio::null()).stdout(Stdio::piped());

        let mut child = command
            .spawn()
            .map_err(|e| StreamError::spawn(label.clone(), e))?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(StreamError::spawn(
                label,
                io::Error::other("child stdout was not captured"),
            ));
        };

        tracing::debug!(command = %label, pid = child.id(), "log producer started");

        Ok(Self {
            command: label,
            child,
            stdout: BufReader::new(stdout),
            reaped: false,
            watcher: None,
        })
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Let `interrupt` terminate this process until it is reaped.
    pub fn watch(&mut self, interrupt: &Interrupt) {
        if self.reaped {
            return;
        }
        interrupt.watch_child(self.id());
        self.watcher = Some(interrupt.clone());
    }

    /// Must run before the child is reaped; its pid may be recycled after.
    fn release_watcher(&mut self) {
        if let Some(interrupt) = self.watcher.take() {
            interrupt.forget_child(self.child.id());
        }
    }
}

impl LineSource for OwnedProcess {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<bool, StreamError> {
        if self.reaped {
            return Ok(false);
        }

        let read = self
            .stdout
            .read_until(b'\n', buf)
            .map_err(StreamError::Read)?;
        if read > 0 {
            return Ok(true);
        }

        self.release_watcher();
        let status = self.child.wait().map_err(StreamError::Read)?;
        self.reaped = true;
        tracing::debug!(command = %self.command, %status, "log producer exited");

        if status.success() {
            Ok(false)
        } else {
            Err(StreamError::Exited {
                command: self.command.clone(),
                status,
            })
        }
    }

    fn request_stop(&mut self) {
        if self.reaped {
            return;
        }
        self.release_watcher();
        if let Err(e) = self.child.kill() {
            tracing::debug!(error = %e, "log producer already gone");
        }
        let _ = self.child.wait();
        self.reaped = true;
    }
}

impl Drop for OwnedProcess {
    fn drop(&mut self) {
        self.request_stop();
    }
}

/// Render a command the way a user would type it.
pub fn describe_command(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// User cancellation shared between the signal handler and the pipeline.
///
/// Triggering sets a flag that the pipeline checks around every read and, if a
/// producer process is registered, terminates it so a blocked read returns.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    inner: Arc<InterruptState>,
}

#[derive(Debug, Default)]
struct InterruptState {
    triggered: AtomicBool,
    /// 0 when no producer process is registered
    child: AtomicI32,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the producer process to terminate on interrupt.
    pub fn watch_child(&self, pid: u32) {
        let pid = i32::try_from(pid).unwrap_or(0);
        self.inner.child.store(pid, Ordering::SeqCst);
    }

    /// Drop the registration of `pid`, leaving any newer one in place.
    pub fn forget_child(&self, pid: u32) {
        let Ok(pid) = i32::try_from(pid) else {
            return;
        };
        let _ = self
            .inner
            .child
            .compare_exchange(pid, 0, Ordering::SeqCst, Ordering::SeqCst);
    }

    /// Mark the run as interrupted and terminate the registered producer.
    ///
    /// Returns `true` when a producer was signalled, i.e. a blocked read is
    /// about to return.
    pub fn trigger(&self) -> bool {
        self.inner.triggered.store(true, Ordering::SeqCst);

        let pid = self.inner.child.swap(0, Ordering::SeqCst);
        if pid <= 0 {
            return false;
        }
        match kill(Pid::from_raw(pid), Signal::SIGTERM) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, pid, "failed to signal log producer");
                false
            }
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.inner.triggered.load(Ordering::SeqCst)
    }

    /// Route Ctrl-C to this handle.
    ///
    /// With no producer of our own to terminate, a read of redirected input
    /// cannot be woken up, so the process exits right away.
    pub fn install_ctrlc(&self) -> Result<(), ctrlc::Error> {
        let interrupt = self.clone();
        ctrlc::set_handler(move || {
            tracing::debug!("interrupt requested");
            if !interrupt.trigger() {
                tracing::debug!("no log producer to stop, exiting");
                std::process::exit(0);
            }
        })
    }
}
