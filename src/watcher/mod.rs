//! Debounced change notifications for a markdown file on disk.
//!
//! The parent directory is watched rather than the file: editors commonly
//! save by writing a temp file and renaming it over the original, which
//! silently drops a watch placed on the file itself.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::debounce::Debouncer;

/// The file being followed, in the canonical form the OS reports events in.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WatchTarget {
    dir: PathBuf,
    file: PathBuf,
    name: Option<OsString>,
}

impl WatchTarget {
    fn resolve(path: &Path) -> Self {
        let file = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self {
            dir: parent_dir(&file),
            name: file.file_name().map(OsStr::to_os_string),
            file,
        }
    }

    /// Directory-level events count too, since some backends report a
    /// rename only against the directory.
    fn is_touched_by(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.dir
                || path == &self.file
                || matches!((&self.name, path.file_name()), (Some(name), Some(f)) if f == name)
        })
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Follows one source file and reports when a burst of changes has settled.
pub struct SourceWatcher {
    _backend: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    target: WatchTarget,
    settle: Debouncer<()>,
}

impl SourceWatcher {
    /// Start following `path`. Changes are reported once no further event
    /// has arrived for `settle_ms`.
    ///
    /// # Errors
    /// Returns an error if the notify backend cannot be created or the
    /// directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, settle_ms: u64) -> notify::Result<Self> {
        let target = WatchTarget::resolve(path.as_ref());

        let (tx, events) = mpsc::channel();
        let mut backend = notify::recommended_watcher(move |res| {
            // The receiver only goes away with the watcher itself.
            let _ = tx.send(res);
        })?;
        backend.watch(&target.dir, RecursiveMode::NonRecursive)?;
        tracing::debug!(path = %target.file.display(), "watching source");

        Ok(Self {
            _backend: backend,
            events,
            target,
            settle: Debouncer::new(settle_ms),
        })
    }

    pub fn target_path(&self) -> &Path {
        &self.target.file
    }

    /// Drain pending events; returns true once a change has settled.
    pub fn poll_settled(&mut self, now_ms: u64) -> bool {
        let touched = self
            .events
            .try_iter()
            .filter(|res| match res {
                Ok(event) if self.target.is_touched_by(event) => true,
                Ok(event) => {
                    tracing::trace!(kind = ?event.kind, "ignoring unrelated fs event");
                    false
                }
                Err(err) => {
                    tracing::warn!(error = %err, "file watcher error");
                    false
                }
            })
            .count();
        if touched > 0 {
            tracing::trace!(touched, "source changed");
            self.settle.queue((), now_ms);
        }
        self.settle.take_ready(now_ms).is_some()
    }
}
