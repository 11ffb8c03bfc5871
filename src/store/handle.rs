//! Store actor
//!
//! Moves a [`WindowStore`] into one tokio task. Commands arrive over an
//! `mpsc` queue and are applied one at a time; readers see the latest
//! snapshot through a `watch` channel without touching the queue.
//!
//! ```text
//! dispatch ─▶ mpsc ─▶ [store task] ─▶ watch ─▶ state() / subscribe()
//! ```

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use super::action::WindowAction;
use super::error::{StoreError, StoreResult};
use super::snapshot::WindowSnapshot;
use super::store::{DispatchOutcome, StoreStats, WindowStore};
use crate::series::ValidRange;

/// Default depth of the command queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Reply to a dispatched command
#[derive(Debug, Clone)]
pub struct Dispatched {
    pub outcome: DispatchOutcome,
    /// Snapshot current right after this command was applied
    pub snapshot: WindowSnapshot,
}

enum StoreCommand {
    Dispatch {
        action: WindowAction,
        reply: oneshot::Sender<Dispatched>,
    },
    Stats {
        reply: oneshot::Sender<StoreStats>,
    },
}

/// Cloneable handle to a running store task
#[derive(Clone)]
pub struct StoreHandle {
    commands: mpsc::Sender<StoreCommand>,
    state: watch::Receiver<WindowSnapshot>,
    range: ValidRange,
}

impl StoreHandle {
    /// Spawn the store task. It runs until every handle is dropped.
    pub fn spawn(store: WindowStore, capacity: usize) -> (Self, JoinHandle<()>) {
        let (commands, mut rx) = mpsc::channel(capacity.max(1));
        let (state_tx, state) = watch::channel(store.snapshot());
        let range = store.valid_range();

        let task = tokio::spawn(async move {
            let mut store = store;

            while let Some(command) = rx.recv().await {
                match command {
                    StoreCommand::Dispatch { action, reply } => {
                        let outcome = store.dispatch(action);
                        let snapshot = store.snapshot();
                        if outcome.is_accepted() {
                            state_tx.send_replace(snapshot.clone());
                        }
                        // Caller may have given up waiting
                        let _ = reply.send(Dispatched { outcome, snapshot });
                    }
                    StoreCommand::Stats { reply } => {
                        let _ = reply.send(store.stats());
                    }
                }
            }

            tracing::debug!("Store task stopped");
        });

        (
            Self {
                commands,
                state,
                range,
            },
            task,
        )
    }

    /// Queue a command and wait for its outcome and resulting snapshot
    pub async fn dispatch(&self, action: WindowAction) -> StoreResult<Dispatched> {
        let (reply, dispatched) = oneshot::channel();
        self.commands
            .send(StoreCommand::Dispatch { action, reply })
            .await
            .map_err(|_| StoreError::Closed)?;
        dispatched.await.map_err(|_| StoreError::Closed)
    }

    /// Latest committed snapshot
    pub fn state(&self) -> WindowSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver notified on every accepted command
    pub fn subscribe(&self) -> watch::Receiver<WindowSnapshot> {
        self.state.clone()
    }

    pub async fn stats(&self) -> StoreResult<StoreStats> {
        let (reply, stats) = oneshot::channel();
        self.commands
            .send(StoreCommand::Stats { reply })
            .await
            .map_err(|_| StoreError::Closed)?;
        stats.await.map_err(|_| StoreError::Closed)
    }

    pub fn valid_range(&self) -> ValidRange {
        self.range
    }

    /// Check if the store task is still accepting commands
    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }
}
