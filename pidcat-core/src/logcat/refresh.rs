use crate::logcat::constants::LOOP_IDLE_SLEEP;
use crate::logcat::registry::{SharedRegistry, lock_registry};
use crate::logcat::snapshot::parse_snapshot;
use crate::logcat::stream::Interrupt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Background thread that periodically replaces the registry contents with a
/// fresh process list snapshot.
pub struct SnapshotRefresher {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SnapshotRefresher {
    /// Start refreshing every `interval`. `fetch` returns raw `ps` output.
    pub fn spawn<F>(
        registry: SharedRegistry,
        interval: Duration,
        interrupt: Interrupt,
        mut fetch: F,
    ) -> Self
    where
        F: FnMut() -> anyhow::Result<String> + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));

        let handle = thread::spawn({
            let stop = stop.clone();
            move || {
                tracing::debug!(?interval, "snapshot refresher started");
                let mut last_refresh = Instant::now();

                while !stop.load(Ordering::SeqCst) && !interrupt.is_triggered() {
                    if last_refresh.elapsed() < interval {
                        thread::sleep(LOOP_IDLE_SLEEP);
                        continue;
                    }
                    last_refresh = Instant::now();

                    match fetch() {
                        Ok(text) => {
                            let entries = parse_snapshot(&text);
                            let watched = lock_registry(&registry).replace_all(entries);
                            tracing::debug!(watched, "process registry refreshed");
                        }
                        Err(e) => tracing::warn!(error = %e, "process snapshot failed"),
                    }
                }

                tracing::debug!("snapshot refresher stopped");
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stop the thread and wait for it to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SnapshotRefresher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
