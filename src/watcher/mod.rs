//! Refresh scheduling and file watching
//!
//! [`RefreshScheduler`] debounces change notifications per document key and
//! emits [`RefreshSignal`]s on a channel. [`FileWatcher`] is the host-side
//! notify bridge the CLI uses to feed it.
//!
//! # Debounce model
//!
//! Each armed timer is a spawned task tagged with a generation number. The
//! pending map and the generation check share one lock, and a timer only sends
//! after confirming under that lock that it is still the current entry for its
//! key. Rearming or cancelling a key therefore can never let an older timer fire.

mod events;
pub mod filtering;
pub mod types;

use anyhow::{Context, Result};
use notify::Watcher;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::{debug, error, info, warn};

pub use events::classify_event;
pub use types::{FileChangeEvent, FileChangeType, RefreshSignal};

#[derive(Debug)]
struct PendingRefresh {
    generation: u64,
    handle: AbortHandle,
}

#[derive(Debug, Default)]
struct PendingTimers {
    next_generation: u64,
    by_key: HashMap<String, PendingRefresh>,
}

fn lock_timers(timers: &Mutex<PendingTimers>) -> MutexGuard<'_, PendingTimers> {
    match timers.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("Refresh timer map mutex poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

/// Per-key debounce of refresh requests.
///
/// Arming a timer spawns a task on the current tokio runtime. Without one,
/// `schedule` degrades to an immediate `Reparse`.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    delay: Duration,
    timers: Arc<Mutex<PendingTimers>>,
    signals: mpsc::UnboundedSender<RefreshSignal>,
}

impl RefreshScheduler {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<RefreshSignal>) {
        let (signals, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            delay,
            timers: Arc::new(Mutex::new(PendingTimers::default())),
            signals,
        };
        (scheduler, receiver)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Applies to timers armed from now on
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Cancel any pending timer for `key` and arm a new one.
    ///
    /// Outside a tokio runtime no timer can be armed: the reparse is signalled
    /// immediately instead.
    pub fn schedule(&self, key: &str) {
        let Ok(runtime) = Handle::try_current() else {
            warn!("No tokio runtime for the refresh timer of {}, signalling now", key);
            self.cancel(key);
            self.send(RefreshSignal::Reparse {
                key: key.to_string(),
            });
            return;
        };

        let mut timers = lock_timers(&self.timers);

        if let Some(previous) = timers.by_key.remove(key) {
            previous.handle.abort();
            debug!("Rearmed refresh timer for {}", key);
        }

        let generation = timers.next_generation;
        timers.next_generation += 1;

        let delay = self.delay;
        let owned_key = key.to_string();
        let shared = Arc::clone(&self.timers);
        let signals = self.signals.clone();

        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;

            let mut timers = lock_timers(&shared);
            let current = timers
                .by_key
                .get(&owned_key)
                .is_some_and(|pending| pending.generation == generation);
            if !current {
                return;
            }
            timers.by_key.remove(&owned_key);

            debug!("Refresh timer fired for {}", owned_key);
            if signals
                .send(RefreshSignal::Reparse { key: owned_key })
                .is_err()
            {
                debug!("Refresh receiver dropped, signal discarded");
            }
        });

        timers.by_key.insert(
            key.to_string(),
            PendingRefresh {
                generation,
                handle: task.abort_handle(),
            },
        );
    }

    /// Unchanged content: signal a repaint right away, no timer
    pub fn notify_unchanged(&self, key: &str) {
        self.send(RefreshSignal::Repaint {
            key: key.to_string(),
        });
    }

    fn send(&self, signal: RefreshSignal) {
        if self.signals.send(signal).is_err() {
            debug!("Refresh receiver dropped, signal discarded");
        }
    }

    /// Cancel the pending timer for `key`; returns whether one was pending
    pub fn cancel(&self, key: &str) -> bool {
        let mut timers = lock_timers(&self.timers);
        match timers.by_key.remove(key) {
            Some(pending) => {
                pending.handle.abort();
                debug!("Cancelled refresh timer for {}", key);
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) {
        let mut timers = lock_timers(&self.timers);
        for (_, pending) in timers.by_key.drain() {
            pending.handle.abort();
        }
    }

    pub fn is_pending(&self, key: &str) -> bool {
        lock_timers(&self.timers).by_key.contains_key(key)
    }

    pub fn pending_count(&self) -> usize {
        lock_timers(&self.timers).by_key.len()
    }
}

/// Recursive notify watcher delivering filtered [`FileChangeEvent`]s
pub struct FileWatcher {
    _watcher: notify::RecommendedWatcher,
}

impl FileWatcher {
    /// Watch `roots` and forward relevant changes on the returned channel
    pub fn start(
        roots: &[&Path],
        supported_extensions: BTreeSet<String>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<FileChangeEvent>)> {
        let ignore_patterns = filtering::build_ignore_patterns()?;
        let (tx, rx) = mpsc::unbounded_channel::<FileChangeEvent>();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) => {
                    for change in classify_event(event, &supported_extensions, &ignore_patterns) {
                        if let Err(e) = tx.send(change) {
                            error!("Failed to send file event: {}", e);
                        }
                    }
                }
                Err(e) => warn!("File watcher error: {}", e),
            }
        })?;

        for root in roots {
            watcher
                .watch(root, notify::RecursiveMode::Recursive)
                .with_context(|| format!("Failed to start watching {}", root.display()))?;
            info!("Watching {}", root.display());
        }

        Ok((Self { _watcher: watcher }, rx))
    }
}
