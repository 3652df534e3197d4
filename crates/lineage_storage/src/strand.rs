//! Single-threaded serialized task queue.
//!
//! A [`Strand`] owns one worker thread that runs posted tasks in FIFO order.
//! Code running on that worker can ask [`Strand::running_in_this_thread`],
//! which is how [`SafeRegistry`](crate::SafeRegistry) enforces single-writer
//! access.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Sender, bounded, unbounded};
use lineage_foundation::{Error, ErrorKind, Result};
use tracing::{debug, trace};

use crate::config::StrandConfig;

type Task = Box<dyn FnOnce() + Send + 'static>;

static NEXT_STRAND_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static CURRENT_STRAND: Cell<Option<StrandId>> = const { Cell::new(None) };
}

/// Process-unique identity of a strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrandId(u64);

impl StrandId {
    fn next() -> Self {
        Self(NEXT_STRAND_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StrandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "strand#{}", self.0)
    }
}

/// A dedicated worker thread executing tasks one at a time.
///
/// Dropping the strand closes its queue, lets queued tasks finish, and joins
/// the worker.
pub struct Strand {
    id: StrandId,
    name: String,
    sender: Option<Sender<Task>>,
    worker: Option<JoinHandle<()>>,
}

impl fmt::Debug for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strand")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("open", &self.sender.is_some())
            .finish()
    }
}

impl Strand {
    /// Starts a strand with its worker thread.
    pub fn new(config: &StrandConfig) -> Result<Self> {
        let id = StrandId::next();
        let (sender, receiver) = match config.queue_capacity {
            Some(capacity) => bounded::<Task>(capacity),
            None => unbounded::<Task>(),
        };

        let worker = thread::Builder::new()
            .name(config.name.clone())
            .spawn(move || {
                CURRENT_STRAND.with(|current| current.set(Some(id)));
                debug!(strand = %id, "strand started");
                for task in receiver {
                    trace!(strand = %id, "running task");
                    task();
                }
                debug!(strand = %id, "strand stopped");
            })
            .map_err(|err| Error::new(ErrorKind::Internal(format!("spawn strand: {err}"))))?;

        Ok(Self {
            id,
            name: config.name.clone(),
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Returns this strand's id.
    #[must_use]
    pub fn id(&self) -> StrandId {
        self.id
    }

    /// Returns the worker thread's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the strand the calling thread is a worker of, if any.
    #[must_use]
    pub fn current() -> Option<StrandId> {
        CURRENT_STRAND.with(Cell::get)
    }

    /// Returns true when called from this strand's worker thread.
    #[must_use]
    pub fn running_in_this_thread(&self) -> bool {
        Self::current() == Some(self.id)
    }

    fn closed(&self) -> Error {
        Error::new(ErrorKind::StrandClosed(self.name.clone()))
    }

    /// Queues `task` to run after everything posted before it.
    ///
    /// Blocks while a bounded queue is full.
    pub fn post<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let sender = self.sender.as_ref().ok_or_else(|| self.closed())?;
        sender.send(Box::new(task)).map_err(|_| self.closed())
    }

    /// Runs `task` on the strand and waits for its result.
    ///
    /// Runs inline when already on this strand, since waiting on our own
    /// queue would deadlock. Fails if the task panics.
    pub fn invoke<F, R>(&self, task: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.running_in_this_thread() {
            return Ok(task());
        }

        let (reply, result) = bounded(1);
        self.post(move || {
            // The caller may have stopped waiting
            let _ = reply.send(task());
        })?;
        result.recv().map_err(|_| self.closed())
    }

    /// Waits until every task posted so far has run.
    pub fn flush(&self) -> Result<()> {
        self.invoke(|| ())
    }

    /// Closes the queue and waits for the worker to drain it.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.sender.take();
        let Some(worker) = self.worker.take() else {
            return;
        };
        // A strand dropped from its own worker cannot join itself
        if worker.thread().id() == thread::current().id() {
            return;
        }
        if worker.join().is_err() {
            debug!(strand = %self.id, "strand worker panicked");
        }
    }
}

impl Drop for Strand {
    fn drop(&mut self) {
        self.stop();
    }
}
