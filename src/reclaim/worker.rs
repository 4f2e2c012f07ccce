//! Reclaim worker
//!
//! Background thread draining the reclamation queue.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};
use tempfile::TempDir;

use crate::error::{Result, SpillError};
use crate::store::{slot_path, SlotId};

/// Messages accepted by the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReclaimRequest {
    /// Delete the file backing this slot
    Slot(SlotId),

    /// Remove the whole directory and stop
    Terminate,
}

/// Counters describing what the worker has done
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReclaimReport {
    /// Slot files deleted
    pub reclaimed: u64,
    /// Slot deletions that failed (missing file, permissions, ...)
    pub failed: u64,
    /// Whether the private directory was removed on shutdown
    pub dir_removed: bool,
}

/// Counters shared between the worker and its handle
#[derive(Debug, Default)]
struct ReclaimStats {
    reclaimed: AtomicU64,
    failed: AtomicU64,
}

impl ReclaimStats {
    fn snapshot(&self, dir_removed: bool) -> ReclaimReport {
        ReclaimReport {
            reclaimed: self.reclaimed.load(Ordering::Acquire),
            failed: self.failed.load(Ordering::Acquire),
            dir_removed,
        }
    }
}

/// Foreground handle to a running reclaim worker
///
/// Dropping the handle without calling `terminate` disconnects the queue;
/// the worker treats that like terminate, so the private directory is
/// always removed.
#[derive(Debug)]
pub struct Reclaimer {
    /// Queue into the worker
    sender: Sender<ReclaimRequest>,
    /// Worker thread
    join: JoinHandle<ReclaimReport>,
    /// Live counters
    stats: Arc<ReclaimStats>,
    /// Directory the worker owns
    dir: PathBuf,
}

impl Reclaimer {
    /// Start a worker that owns `dir`
    ///
    /// `queue_capacity` bounds the request queue; `reclaim` blocks while
    /// the queue is full.
    pub fn spawn(dir: TempDir, queue_capacity: usize) -> Result<Self> {
        let (sender, receiver) = channel::bounded(queue_capacity);
        let stats = Arc::new(ReclaimStats::default());
        let path = dir.path().to_path_buf();

        let worker_stats = Arc::clone(&stats);
        let join = thread::Builder::new()
            .name("spillslice-reclaim".to_string())
            .spawn(move || run(dir, receiver, worker_stats))
            .map_err(|e| SpillError::Reclaim(format!("failed to spawn worker: {}", e)))?;

        tracing::debug!("Reclaim worker started for {}", path.display());

        Ok(Self {
            sender,
            join,
            stats,
            dir: path,
        })
    }

    /// Queue slot `id` for deletion
    ///
    /// Never surfaces an error: if the worker is gone its teardown has
    /// already removed the directory.
    pub fn reclaim(&self, id: SlotId) {
        if self.sender.send(ReclaimRequest::Slot(id)).is_err() {
            tracing::warn!("Reclaim worker gone, slot {} not queued", id);
        }
    }

    /// Current counters (the worker may still be running)
    pub fn stats(&self) -> ReclaimReport {
        self.stats.snapshot(false)
    }

    /// Directory owned by the worker
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ask the worker to remove the directory and stop
    ///
    /// Returns immediately; wait on the returned handle to join.
    pub fn terminate(self) -> CleanupHandle {
        if self.sender.send(ReclaimRequest::Terminate).is_err() {
            tracing::warn!("Reclaim worker for {} already stopped", self.dir.display());
        }
        CleanupHandle {
            join: self.join,
            dir: self.dir,
        }
    }
}

/// Returned by cleanup; optionally wait for teardown to finish
#[derive(Debug)]
pub struct CleanupHandle {
    join: JoinHandle<ReclaimReport>,
    dir: PathBuf,
}

impl CleanupHandle {
    /// Block until the worker has removed the directory and exited
    pub fn wait(self) -> Result<ReclaimReport> {
        self.join
            .join()
            .map_err(|_| SpillError::Reclaim("worker panicked".to_string()))
    }

    /// Whether the worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Directory being removed
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

// =============================================================================
// Worker Loop
// =============================================================================

fn run(dir: TempDir, receiver: Receiver<ReclaimRequest>, stats: Arc<ReclaimStats>) -> ReclaimReport {
    loop {
        match receiver.recv() {
            Ok(ReclaimRequest::Slot(id)) => remove_slot(dir.path(), id, &stats),
            Ok(ReclaimRequest::Terminate) => {
                tracing::debug!("Reclaim worker received terminate");
                break;
            }
            Err(_) => {
                tracing::debug!("Reclaim queue disconnected");
                break;
            }
        }
    }

    let path = dir.path().to_path_buf();
    let dir_removed = match dir.close() {
        Ok(()) => {
            tracing::info!("Removed slot directory {}", path.display());
            true
        }
        Err(e) => {
            tracing::warn!("Failed to remove slot directory {}: {}", path.display(), e);
            false
        }
    };

    stats.snapshot(dir_removed)
}

fn remove_slot(dir: &Path, id: SlotId, stats: &ReclaimStats) {
    let path = slot_path(dir, id);
    match fs::remove_file(&path) {
        Ok(()) => {
            stats.reclaimed.fetch_add(1, Ordering::AcqRel);
            tracing::trace!("Reclaimed slot {}", id);
        }
        Err(e) => {
            stats.failed.fetch_add(1, Ordering::AcqRel);
            tracing::warn!("Error removing file {}: {}", path.display(), e);
        }
    }
}
