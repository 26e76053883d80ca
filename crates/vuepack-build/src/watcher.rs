//! File watching for incremental repacking.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A component document was created or modified
    Changed(PathBuf),

    /// A component document was deleted
    Removed(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::Changed(path) | Self::Removed(path) => path,
        }
    }
}

/// File watcher for component documents.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Watch `paths` recursively for documents with the given extension.
    ///
    /// Returns the watcher and a channel to receive events. Events stop when
    /// the watcher is dropped.
    pub fn new(
        paths: &[PathBuf],
        extension: &str,
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            }
        }

        let extension = extension.to_string();
        std::thread::spawn(move || {
            let mut debouncer = Debouncer::new(DEBOUNCE);

            loop {
                let received = match debouncer.next_deadline() {
                    Some(deadline) => sync_rx
                        .recv_timeout(deadline.saturating_duration_since(Instant::now())),
                    None => sync_rx
                        .recv()
                        .map_err(|_| mpsc::RecvTimeoutError::Disconnected),
                };

                let disconnected = match received {
                    Ok(event) => {
                        let now = Instant::now();
                        for path in event.paths {
                            if path.extension().and_then(|e| e.to_str())
                                != Some(extension.as_str())
                            {
                                continue;
                            }
                            if let Some(watch_event) = classify_event(&path, &event.kind) {
                                debouncer.push(watch_event, now);
                            }
                        }
                        false
                    }
                    Err(mpsc::RecvTimeoutError::Timeout) => false,
                    Err(mpsc::RecvTimeoutError::Disconnected) => true,
                };

                let ready = if disconnected {
                    debouncer.drain_all()
                } else {
                    debouncer.drain_ready(Instant::now())
                };
                for watch_event in ready {
                    if async_tx.blocking_send(watch_event).is_err() {
                        return;
                    }
                }

                if disconnected {
                    return;
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Quiet period a path needs before its last event is emitted.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Trailing-edge debounce keyed by path.
///
/// Editors emit several events per save. Only the last event for a path is
/// kept, and it is released once no newer event arrived for `quiet`.
#[derive(Debug)]
struct Debouncer {
    quiet: Duration,
    pending: HashMap<PathBuf, (WatchEvent, Instant)>,
}

impl Debouncer {
    fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: HashMap::new(),
        }
    }

    fn push(&mut self, event: WatchEvent, now: Instant) {
        self.pending
            .insert(event.path().to_path_buf(), (event, now));
    }

    /// Earliest instant at which a pending event becomes ready.
    fn next_deadline(&self) -> Option<Instant> {
        self.pending
            .values()
            .map(|(_, seen)| *seen + self.quiet)
            .min()
    }

    /// Remove and return events whose path has been quiet long enough.
    fn drain_ready(&mut self, now: Instant) -> Vec<WatchEvent> {
        let ready: Vec<PathBuf> = self
            .pending
            .iter()
            .filter(|(_, (_, seen))| now.duration_since(*seen) >= self.quiet)
            .map(|(path, _)| path.clone())
            .collect();

        let mut events: Vec<WatchEvent> = ready
            .into_iter()
            .filter_map(|path| self.pending.remove(&path).map(|(event, _)| event))
            .collect();
        events.sort_by(|a, b| a.path().cmp(b.path()));
        events
    }

    fn drain_all(&mut self) -> Vec<WatchEvent> {
        let mut events: Vec<WatchEvent> =
            self.pending.drain().map(|(_, (event, _))| event).collect();
        events.sort_by(|a, b| a.path().cmp(b.path()));
        events
    }
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &notify::EventKind) -> Option<WatchEvent> {
    use notify::EventKind;

    match kind {
        EventKind::Create(_) | EventKind::Modify(_) => {
            if path.exists() {
                Some(WatchEvent::Changed(path.to_path_buf()))
            } else {
                // Renamed away
                Some(WatchEvent::Removed(path.to_path_buf()))
            }
        }
        EventKind::Remove(_) => Some(WatchEvent::Removed(path.to_path_buf())),
        _ => None,
    }
}
