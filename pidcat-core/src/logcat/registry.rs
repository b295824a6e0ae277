use crate::conf::PackageRule;
use crate::logcat::constants::NATIVE_CRASH_TAG;
use crate::logcat::snapshot::SnapshotEntry;
use crate::logcat::types::{Lifecycle, ProcessEvent, ProcessStart};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Registry shared between the pipeline and the snapshot refresher.
pub type SharedRegistry = Arc<Mutex<ProcessRegistry>>;

/// Lock the shared registry. A panicked holder cannot leave the map half
/// written (every mutation is a single insert, remove or swap), so a poisoned
/// lock is still safe to use.
pub fn lock_registry(registry: &SharedRegistry) -> MutexGuard<'_, ProcessRegistry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Tracks which pids currently belong to the watched packages.
#[derive(Debug, Default)]
pub struct ProcessRegistry {
    rule: PackageRule,
    pids: HashMap<String, String>,
    /// pid of the most recently started watched process
    app_pid: Option<String>,
}

impl ProcessRegistry {
    pub fn new(rule: PackageRule) -> Self {
        Self {
            rule,
            pids: HashMap::new(),
            app_pid: None,
        }
    }

    pub fn shared(self) -> SharedRegistry {
        Arc::new(Mutex::new(self))
    }

    pub fn apply(&mut self, event: ProcessEvent) -> Option<Lifecycle> {
        match event {
            ProcessEvent::Started(start) => self.on_start(start),
            ProcessEvent::Killed {
                pid,
                package,
                reason,
            } => {
                tracing::debug!(%pid, %package, %reason, "process killed");
                self.on_terminal(&pid, &package)
            }
            ProcessEvent::Left { pid, package } | ProcessEvent::Died { pid, package } => {
                self.on_terminal(&pid, &package)
            }
        }
    }

    pub fn on_start(&mut self, start: ProcessStart) -> Option<Lifecycle> {
        if !self.rule.matches(&start.package) {
            return None;
        }

        self.pids.insert(start.pid.clone(), start.package.clone());
        self.app_pid = Some(start.pid.clone());
        tracing::debug!(pid = %start.pid, package = %start.package, "watching process");

        Some(Lifecycle::Created(start))
    }

    pub fn on_terminal(&mut self, pid: &str, package: &str) -> Option<Lifecycle> {
        if !self.rule.matches(package) {
            return None;
        }

        let registered = self.pids.get(pid)?;
        if registered != package || !self.rule.matches(registered) {
            // The pid was recycled by another process before this death notice arrived.
            tracing::debug!(
                %pid,
                %package,
                %registered,
                "ignoring terminal event for a reused pid"
            );
            return None;
        }

        self.pids.remove(pid);
        tracing::debug!(%pid, %package, "process ended");

        Some(Lifecycle::Ended {
            pid: pid.to_string(),
            package: package.to_string(),
        })
    }

    /// Whether lines emitted by `pid` under `tag` belong to a watched app.
    pub fn is_watched(&self, pid: &str, tag: &str) -> bool {
        if self.rule.is_unrestricted() || self.pids.contains_key(pid) {
            return true;
        }
        // debuggerd prints the crashed app's backtrace from its own pid
        tag == NATIVE_CRASH_TAG && self.app_pid.as_deref() == Some(pid)
    }

    /// Replace the whole mapping from a process list snapshot.
    ///
    /// Returns how many processes are watched afterwards.
    pub fn replace_all<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = SnapshotEntry>,
    {
        self.pids = entries
            .into_iter()
            .filter(|entry| self.rule.matches(&entry.name))
            .map(|entry| (entry.pid, entry.name))
            .collect();
        self.pids.len()
    }

    pub fn app_pid(&self) -> Option<&str> {
        self.app_pid.as_deref()
    }

    pub fn package_of(&self, pid: &str) -> Option<&str> {
        self.pids.get(pid).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
    }
}
