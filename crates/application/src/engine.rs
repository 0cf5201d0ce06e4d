use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;

use filepick_domain::{FileId, RawFile, ValidFile, ValidatedEntry};
use futures::channel::mpsc;
use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, Stream, StreamExt};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    AggregateSnapshot, ChangeNotifier, EngineError, StateAggregator, ValidFilesListener,
    ValidationPipeline,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    Started,
    Stopped,
}

/// Source subscriptions and selection batches of a started engine.
///
/// The host polls it on the engine's thread, for example with
/// [`tokio::task::spawn_local`]. It finishes once the engine stops or
/// every handle to the engine is dropped.
pub type EngineTask = LocalBoxFuture<'static, ()>;

type BatchFuture = LocalBoxFuture<'static, (u64, Vec<ValidatedEntry>)>;
type DirectBatch = (u64, Vec<RawFile>);

/// Merges initial entries, validated selections and removals into one
/// file set and reports every distinct set of valid files to the host.
///
/// Single-threaded. Clones are handles to the same engine, so a listener
/// may keep one and call back in.
#[derive(Clone)]
pub struct FilePickEngine {
    inner: Rc<EngineInner>,
}

struct EngineInner {
    pipeline: ValidationPipeline,
    listener: Box<dyn ValidFilesListener>,
    core: RefCell<EngineCore>,
    direct: mpsc::UnboundedSender<DirectBatch>,
    delivering: Cell<bool>,
    idle: Notify,
    shutdown: CancellationToken,
}

struct EngineCore {
    state: LifecycleState,
    aggregator: StateAggregator,
    notifier: ChangeNotifier,
    direct_rx: Option<mpsc::UnboundedReceiver<DirectBatch>>,
    latest_batch: u64,
    in_flight: usize,
}

impl FilePickEngine {
    pub fn new(pipeline: ValidationPipeline, listener: Box<dyn ValidFilesListener>) -> Self {
        let (direct, direct_rx) = mpsc::unbounded();
        Self {
            inner: Rc::new(EngineInner {
                pipeline,
                listener,
                core: RefCell::new(EngineCore {
                    state: LifecycleState::Created,
                    aggregator: StateAggregator::new(),
                    notifier: ChangeNotifier::new(),
                    direct_rx: Some(direct_rx),
                    latest_batch: 0,
                    in_flight: 0,
                }),
                direct,
                delivering: Cell::new(false),
                idle: Notify::new(),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.inner.core.borrow().state
    }

    /// Subscribes to both sources and begins notifying the listener. If
    /// channels were written while `Created`, the current valid set is
    /// delivered right away.
    ///
    /// Nothing is validated until the returned [`EngineTask`] is polled.
    pub fn start<S, R>(&self, selections: S, removals: R) -> Result<EngineTask, EngineError>
    where
        S: Stream<Item = Vec<RawFile>> + 'static,
        R: Stream<Item = FileId> + 'static,
    {
        let direct = {
            let mut core = self.inner.core.borrow_mut();
            let core = &mut *core;
            let invalid = EngineError::InvalidTransition {
                from: core.state,
                to: LifecycleState::Started,
            };
            if core.state != LifecycleState::Created {
                return Err(invalid);
            }
            let direct = core.direct_rx.take().ok_or(invalid)?;
            core.state = LifecycleState::Started;
            if core.aggregator.has_real_update() {
                let snapshot = core.aggregator.snapshot();
                core.notifier.observe(&snapshot.valid);
            }
            direct
        };
        info!("file pick engine started");

        let task = drive_engine(
            Rc::downgrade(&self.inner),
            self.inner.shutdown.clone(),
            selections,
            removals,
            direct,
        );
        self.inner.deliver();
        Ok(task.boxed_local())
    }

    /// Terminal. Batches still validating are dropped with the engine
    /// task and their results never applied.
    pub fn stop(&self) {
        {
            let mut core = self.inner.core.borrow_mut();
            if core.state == LifecycleState::Stopped {
                return;
            }
            info!(from = ?core.state, "file pick engine stopped");
            core.state = LifecycleState::Stopped;
            core.notifier.close();
            core.in_flight = 0;
        }
        self.inner.shutdown.cancel();
        self.inner.idle.notify_waiters();
    }

    /// Submits one selection batch directly, as if it came from the
    /// selection stream.
    pub fn select_files(&self, files: Vec<RawFile>) -> Result<(), EngineError> {
        let sequence = self.inner.begin_batch(files.len())?;
        if self.inner.direct.unbounded_send((sequence, files)).is_err() {
            self.inner.end_batch();
            return Err(EngineError::TaskDropped);
        }
        Ok(())
    }

    /// Resolves once no submitted batch is still validating.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            if self.inner.core.borrow().in_flight == 0 {
                return;
            }
            notified.await;
        }
    }

    pub fn set_initial(&self, entries: Vec<ValidatedEntry>) -> Result<(), EngineError> {
        self.inner.apply(|aggregator| aggregator.set_initial(entries))
    }

    pub fn remove_entry(&self, id: FileId) -> Result<(), EngineError> {
        self.inner.apply(|aggregator| aggregator.remove_entry(id))
    }

    pub fn snapshot(&self) -> AggregateSnapshot {
        self.inner.core.borrow().aggregator.snapshot()
    }

    /// Current file set, rejected files included.
    pub fn current_files(&self) -> Vec<ValidatedEntry> {
        self.snapshot().current
    }

    pub fn valid_files(&self) -> Vec<ValidFile> {
        self.snapshot().valid
    }
}

impl EngineInner {
    fn apply(
        &self,
        update: impl FnOnce(&mut StateAggregator) -> AggregateSnapshot,
    ) -> Result<(), EngineError> {
        {
            let mut core = self.core.borrow_mut();
            let core = &mut *core;
            match core.state {
                LifecycleState::Stopped => return Err(EngineError::Stopped),
                LifecycleState::Created => {
                    update(&mut core.aggregator);
                    return Ok(());
                }
                LifecycleState::Started => {
                    let snapshot = update(&mut core.aggregator);
                    core.notifier.observe(&snapshot.valid);
                }
            }
        }
        self.deliver();
        Ok(())
    }

    /// Assigns the next selection sequence number.
    fn begin_batch(&self, files: usize) -> Result<u64, EngineError> {
        let mut core = self.core.borrow_mut();
        match core.state {
            LifecycleState::Created => Err(EngineError::NotStarted),
            LifecycleState::Stopped => Err(EngineError::Stopped),
            LifecycleState::Started => {
                core.latest_batch += 1;
                core.in_flight += 1;
                debug!(sequence = core.latest_batch, files, "validating selection");
                Ok(core.latest_batch)
            }
        }
    }

    fn end_batch(&self) {
        {
            let mut core = self.core.borrow_mut();
            core.in_flight = core.in_flight.saturating_sub(1);
        }
        self.idle.notify_waiters();
    }

    fn validate(&self, sequence: u64, files: Vec<RawFile>) -> BatchFuture {
        let pipeline = self.pipeline.clone();
        let files: Vec<Arc<RawFile>> = files.into_iter().map(Arc::new).collect();
        async move { (sequence, pipeline.validate_batch(files).await) }.boxed_local()
    }

    fn complete_batch(&self, sequence: u64, entries: Vec<ValidatedEntry>) {
        {
            let mut core = self.core.borrow_mut();
            let core = &mut *core;
            if core.state != LifecycleState::Started {
                debug!(sequence, "discarding batch finished after stop");
                return;
            }
            if sequence < core.latest_batch {
                debug!(
                    sequence,
                    latest = core.latest_batch,
                    "discarding superseded batch"
                );
                return;
            }
            let snapshot = core.aggregator.apply_upload_batch(entries);
            core.notifier.observe(&snapshot.valid);
        }
        self.deliver();
    }

    /// Drains queued emissions. Emissions queued by a listener that calls
    /// back into the engine go out after the one being delivered.
    fn deliver(&self) {
        if self.delivering.replace(true) {
            return;
        }
        loop {
            let next = self.core.borrow_mut().notifier.next_emission();
            let Some(files) = next else {
                break;
            };
            self.listener.valid_files_changed(&files);
        }
        self.delivering.set(false);
    }
}

impl Drop for EngineInner {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn drive_engine<S, R>(
    engine: Weak<EngineInner>,
    shutdown: CancellationToken,
    selections: S,
    removals: R,
    mut direct: mpsc::UnboundedReceiver<DirectBatch>,
) where
    S: Stream<Item = Vec<RawFile>> + 'static,
    R: Stream<Item = FileId> + 'static,
{
    let mut selections = Box::pin(selections.fuse());
    let mut removals = Box::pin(removals.fuse());
    let mut batches: FuturesUnordered<BatchFuture> = FuturesUnordered::new();

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            Some((sequence, entries)) = batches.next() => {
                let Some(engine) = engine.upgrade() else {
                    break;
                };
                engine.complete_batch(sequence, entries);
                engine.end_batch();
            }
            Some((sequence, files)) = direct.next() => {
                let Some(engine) = engine.upgrade() else {
                    break;
                };
                batches.push(engine.validate(sequence, files));
            }
            Some(files) = selections.next() => {
                let Some(engine) = engine.upgrade() else {
                    break;
                };
                if let Ok(sequence) = engine.begin_batch(files.len()) {
                    batches.push(engine.validate(sequence, files));
                }
            }
            Some(id) = removals.next() => {
                let Some(engine) = engine.upgrade() else {
                    break;
                };
                if engine.apply(|aggregator| aggregator.remove_entry(id)).is_err() {
                    break;
                }
            }
            else => break,
        }
    }
    debug!(dropped = batches.len(), "engine task finished");
}
