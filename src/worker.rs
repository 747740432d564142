//! Background render thread.
//!
//! Renders run on a dedicated thread so a slow frame never blocks the caller.
//! The newest request always wins:
//! - requests still queued when a newer one arrives are skipped
//! - a render already in progress runs to completion
//! - a finished result older than the one already held is dropped

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::ascii::{render, CharacterGrid, RenderError, RenderOptions};

/// A render job sent to the worker thread.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub id: u64,
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub options: RenderOptions,
}

/// Result of one render job.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    /// Id returned by [`RenderWorker::submit`]
    pub id: u64,
    pub result: Result<CharacterGrid, RenderError>,
}

/// Commands sent to the worker thread.
enum WorkerCommand {
    Render(RenderRequest),
    Stop,
}

/// Newest finished outcome, shared with the worker thread.
type ResultSlot = Arc<(Mutex<Option<RenderOutcome>>, Condvar)>;

/// Handle to the background render thread.
pub struct RenderWorker {
    /// Newest finished outcome (shared with worker thread)
    slot: ResultSlot,
    /// Worker thread handle
    worker_thread: Option<JoinHandle<()>>,
    /// Channel to send commands to the worker thread
    command_tx: Option<Sender<WorkerCommand>>,
    /// Id of the last submitted request
    last_submitted: u64,
    /// Id of the last outcome handed to the caller
    last_delivered: u64,
}

impl std::fmt::Debug for RenderWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderWorker")
            .field("last_submitted", &self.last_submitted)
            .field("last_delivered", &self.last_delivered)
            .field("is_running", &self.is_running())
            .finish_non_exhaustive()
    }
}

/// Pull every queued command and keep only the newest render request.
///
/// Returns `None` when a stop command was seen.
fn newest_request(first: RenderRequest, rx: &Receiver<WorkerCommand>) -> Option<RenderRequest> {
    let mut newest = first;
    while let Ok(cmd) = rx.try_recv() {
        match cmd {
            WorkerCommand::Render(req) => {
                log::trace!("skipping superseded render request {}", newest.id);
                newest = req;
            }
            WorkerCommand::Stop => return None,
        }
    }
    Some(newest)
}

/// Run the render loop until a stop command arrives or the handle drops.
fn run_render_loop(rx: Receiver<WorkerCommand>, slot: ResultSlot) {
    while let Ok(cmd) = rx.recv() {
        let first = match cmd {
            WorkerCommand::Render(req) => req,
            WorkerCommand::Stop => break,
        };
        let Some(req) = newest_request(first, &rx) else {
            break;
        };

        log::trace!("rendering request {}", req.id);
        let result = render(&req.pixels, req.width, req.height, &req.options);
        if let Err(ref e) = result {
            log::debug!("render request {} failed: {}", req.id, e);
        }

        let (lock, ready) = &*slot;
        if let Ok(mut held) = lock.lock() {
            let newer = held.as_ref().map_or(true, |o| o.id < req.id);
            if newer {
                *held = Some(RenderOutcome { id: req.id, result });
                ready.notify_all();
            }
        }
    }
}

impl RenderWorker {
    /// Spawn the worker thread.
    pub fn spawn() -> Self {
        let slot: ResultSlot = Arc::new((Mutex::new(None), Condvar::new()));
        let (tx, rx) = mpsc::channel();

        let thread_slot = Arc::clone(&slot);
        let handle = std::thread::spawn(move || run_render_loop(rx, thread_slot));

        Self {
            slot,
            worker_thread: Some(handle),
            command_tx: Some(tx),
            last_submitted: 0,
            last_delivered: 0,
        }
    }

    /// Queue a render and return its id.
    ///
    /// Ids increase with every call, so a larger id is always the newer
    /// request.
    ///
    /// # Errors
    /// * `RenderError::WorkerGone` - If the worker thread has stopped
    pub fn submit(
        &mut self,
        pixels: Vec<u8>,
        width: usize,
        height: usize,
        options: RenderOptions,
    ) -> Result<u64, RenderError> {
        let tx = self.command_tx.as_ref().ok_or(RenderError::WorkerGone)?;
        let id = self.last_submitted + 1;
        tx.send(WorkerCommand::Render(RenderRequest {
            id,
            pixels,
            width,
            height,
            options,
        }))
        .map_err(|_| RenderError::WorkerGone)?;
        self.last_submitted = id;
        Ok(id)
    }

    /// Take the newest finished outcome, if one arrived since the last call.
    pub fn latest(&mut self) -> Option<RenderOutcome> {
        let outcome = {
            let (lock, _) = &*self.slot;
            lock.lock().ok()?.clone()
        };
        self.deliver(outcome.as_ref())
    }

    /// Block until the outcome for request `id` (or a newer one) is ready.
    ///
    /// Returns `None` on timeout or if that outcome was already delivered.
    pub fn wait_for(&mut self, id: u64, timeout: Duration) -> Option<RenderOutcome> {
        let deadline = Instant::now() + timeout;
        let slot = Arc::clone(&self.slot);
        let (lock, ready) = &*slot;
        let mut held = lock.lock().ok()?;

        loop {
            if held.as_ref().is_some_and(|o| o.id >= id) {
                break;
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            let (guard, _) = ready.wait_timeout(held, deadline - now).ok()?;
            held = guard;
        }

        let outcome = held.clone();
        drop(held);
        self.deliver(outcome.as_ref())
    }

    fn deliver(&mut self, outcome: Option<&RenderOutcome>) -> Option<RenderOutcome> {
        let outcome = outcome.filter(|o| o.id > self.last_delivered)?.clone();
        self.last_delivered = outcome.id;
        Some(outcome)
    }

    /// Id of the most recently submitted request (0 before the first).
    pub fn last_submitted(&self) -> u64 {
        self.last_submitted
    }

    /// Check if the worker thread is still alive.
    pub fn is_running(&self) -> bool {
        self.worker_thread
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// Stop the worker thread and wait for any in-flight render to finish.
    pub fn stop(&mut self) {
        if let Some(tx) = self.command_tx.take() {
            let _ = tx.send(WorkerCommand::Stop);
        }
        if let Some(handle) = self.worker_thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        self.stop();
    }
}
