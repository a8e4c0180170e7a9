//! Intention-driven state store.
//!
//! A [`StateStore`] owns one sequential runner task per session. Intentions
//! published by observers are queued (FIFO) and handed to the
//! [`IntentionHandler`] one at a time; the runner never starts the next
//! intention before the async work of the previous one has finished.
//! Background feeds launched through [`SessionScope`] do not write state
//! themselves: they send signals into the same queue, so intentions and
//! signals are handled in the order they arrived.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, oneshot};

use super::dispatchers::Dispatchers;
use super::intent::Intent;
use super::session::Session;
use super::state::UiState;

/// Default number of snapshots buffered per subscriber.
pub const DEFAULT_STATE_BUFFER: usize = 64;

const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("State store is closed")]
    Closed,
    #[error("State store did not settle within {0:?}")]
    Timeout(Duration),
    #[error("No Tokio runtime available for the state store")]
    NoRuntime,
}

/// Per-screen logic driven by a [`StateStore`].
///
/// `handle_intention` may await use-cases before updating state through the
/// [`StateContext`]. An `Err` never reaches the observer: the runner passes
/// it to [`IntentionHandler::recover`] and stores the returned state instead.
#[async_trait]
pub trait IntentionHandler: Send + Sized + 'static {
    type State: UiState;
    type Intent: Intent;
    /// Results of background work, routed back through the runner.
    type Signal: Send + 'static;
    type Error: std::error::Error + Send + 'static;

    /// Called once on the runner before the first intention.
    ///
    /// Default implementation launches nothing.
    async fn on_start(&mut self, _scope: &SessionScope<Self>) {}

    async fn handle_intention(
        &mut self,
        intention: Self::Intent,
        ctx: &StateContext<Self::State>,
    ) -> Result<(), Self::Error>;

    /// Default implementation ignores signals.
    async fn handle_signal(
        &mut self,
        _signal: Self::Signal,
        _ctx: &StateContext<Self::State>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Turn a failed intention or signal into a state the UI can branch on.
    fn recover(&self, state: &Self::State, error: &Self::Error) -> Self::State;
}

enum Command<H: IntentionHandler> {
    Intention(H::Intent),
    Signal(H::Signal),
    Settle(oneshot::Sender<()>),
}

struct StateCell<S> {
    inner: Mutex<CellInner<S>>,
    buffer: usize,
}

struct CellInner<S> {
    current: S,
    /// `None` once the runner has stopped.
    updates: Option<broadcast::Sender<S>>,
}

impl<S: UiState> StateCell<S> {
    fn new(initial: S, buffer: usize) -> Self {
        let buffer = buffer.max(1);
        let (updates, _) = broadcast::channel(buffer);
        Self {
            inner: Mutex::new(CellInner {
                current: initial,
                updates: Some(updates),
            }),
            buffer,
        }
    }

    fn current(&self) -> S {
        self.inner.lock().current.clone()
    }

    /// Snapshot and receiver are taken under the same lock as `update`, so a
    /// subscriber never misses or duplicates an emission.
    fn snapshot_and_receiver(&self) -> (S, broadcast::Receiver<S>) {
        let inner = self.inner.lock();
        let receiver = match &inner.updates {
            Some(updates) => updates.subscribe(),
            None => broadcast::channel(self.buffer).1,
        };
        (inner.current.clone(), receiver)
    }

    fn update<F>(&self, transform: F)
    where
        F: FnOnce(&S) -> S,
    {
        let mut inner = self.inner.lock();
        let next = transform(&inner.current);
        if next == inner.current {
            return;
        }
        inner.current = next.clone();
        if let Some(updates) = &inner.updates {
            // Err only means nobody is subscribed right now.
            let _ = updates.send(next);
        }
    }

    fn close(&self) {
        self.inner.lock().updates = None;
    }
}

/// Write access to a store's state, only handed to the sequential runner.
pub struct StateContext<S> {
    cell: Arc<StateCell<S>>,
}

impl<S: UiState> StateContext<S> {
    pub fn state(&self) -> S {
        self.cell.current()
    }

    /// Replace the snapshot with `transform(previous)` and broadcast it.
    ///
    /// A result equal to the previous snapshot is not re-broadcast.
    pub fn update_state<F>(&self, transform: F)
    where
        F: FnOnce(&S) -> S,
    {
        self.cell.update(transform);
    }
}

/// Stream of snapshots: the current one first, then every update in order.
pub struct StateSubscription<S> {
    pending: Option<S>,
    updates: broadcast::Receiver<S>,
    cell: Arc<StateCell<S>>,
}

impl<S: UiState> StateSubscription<S> {
    /// Next snapshot, or `None` once the store has stopped and every
    /// buffered snapshot has been delivered.
    pub async fn next(&mut self) -> Option<S> {
        if let Some(state) = self.pending.take() {
            return Some(state);
        }
        match self.updates.recv().await {
            Ok(state) => Some(state),
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "State subscriber lagged; resyncing on latest snapshot");
                let (state, updates) = self.cell.snapshot_and_receiver();
                self.updates = updates;
                Some(state)
            }
            Err(RecvError::Closed) => None,
        }
    }

    /// Wait for the first snapshot matching `predicate`.
    ///
    /// Returns `None` on timeout or when the store stops first.
    pub async fn wait_for<P>(&mut self, timeout: Duration, mut predicate: P) -> Option<S>
    where
        P: FnMut(&S) -> bool,
    {
        let search = async {
            while let Some(state) = self.next().await {
                if predicate(&state) {
                    return Some(state);
                }
            }
            None
        };
        tokio::time::timeout(timeout, search).await.ok().flatten()
    }
}

/// Background-work context handed to [`IntentionHandler::on_start`].
pub struct SessionScope<H: IntentionHandler> {
    session: Session,
    dispatchers: Dispatchers,
    commands: mpsc::UnboundedSender<Command<H>>,
}

impl<H: IntentionHandler> SessionScope<H> {
    /// Run `future` on the I/O dispatcher until it ends or the session is cancelled.
    pub fn launch<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.session.spawn(self.dispatchers.io(), future);
    }

    pub fn signal_sender(&self) -> SignalSender<H> {
        SignalSender {
            session: self.session.clone(),
            commands: self.commands.clone(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

/// Sends background results into the store's queue, behind anything
/// already published.
pub struct SignalSender<H: IntentionHandler> {
    session: Session,
    commands: mpsc::UnboundedSender<Command<H>>,
}

impl<H: IntentionHandler> Clone for SignalSender<H> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            commands: self.commands.clone(),
        }
    }
}

impl<H: IntentionHandler> SignalSender<H> {
    /// Returns `false` when the session is over; the signal is dropped.
    pub fn send(&self, signal: H::Signal) -> bool {
        if self.session.is_cancelled() || self.commands.send(Command::Signal(signal)).is_err() {
            tracing::trace!("Signal dropped after session teardown");
            return false;
        }
        true
    }
}

/// Single-writer state container with a FIFO intention queue.
///
/// Dropping the store cancels its session.
pub struct StateStore<H: IntentionHandler> {
    commands: mpsc::UnboundedSender<Command<H>>,
    cell: Arc<StateCell<H::State>>,
    session: Session,
}

impl<H: IntentionHandler> StateStore<H> {
    pub fn new(
        handler: H,
        initial_state: H::State,
        dispatchers: &Dispatchers,
        session: Session,
    ) -> Self {
        Self::with_buffer(handler, initial_state, dispatchers, session, DEFAULT_STATE_BUFFER)
    }

    pub fn with_buffer(
        handler: H,
        initial_state: H::State,
        dispatchers: &Dispatchers,
        session: Session,
        state_buffer: usize,
    ) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let cell = Arc::new(StateCell::new(initial_state, state_buffer));

        let runner = Runner {
            handler,
            ctx: StateContext { cell: cell.clone() },
            commands: commands_rx,
            scope: SessionScope {
                session: session.clone(),
                dispatchers: dispatchers.clone(),
                commands: commands_tx.clone(),
            },
        };
        dispatchers.io().spawn(runner.run());

        Self {
            commands: commands_tx,
            cell,
            session,
        }
    }

    /// Queue an intention. Never blocks and never runs handler code inline.
    pub fn publish(&self, intention: H::Intent) -> Result<(), StoreError> {
        if self.session.is_cancelled() {
            return Err(StoreError::Closed);
        }
        self.commands
            .send(Command::Intention(intention))
            .map_err(|_| StoreError::Closed)
    }

    /// Latest snapshot.
    pub fn state(&self) -> H::State {
        self.cell.current()
    }

    pub fn subscribe(&self) -> StateSubscription<H::State> {
        let (state, updates) = self.cell.snapshot_and_receiver();
        StateSubscription {
            pending: Some(state),
            updates,
            cell: self.cell.clone(),
        }
    }

    /// Resolves once every intention published, and every signal sent, before
    /// this call has been handled.
    ///
    /// Signals a feed sends later are not covered; use
    /// [`StateSubscription::wait_for`] for those.
    pub async fn settle(&self) -> Result<(), StoreError> {
        let (done, receiver) = oneshot::channel();
        self.commands
            .send(Command::Settle(done))
            .map_err(|_| StoreError::Closed)?;
        match tokio::time::timeout(SETTLE_TIMEOUT, receiver).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(StoreError::Closed),
            Err(_) => Err(StoreError::Timeout(SETTLE_TIMEOUT)),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// End the session: the runner stops after the intention in flight.
    pub fn close(&self) {
        self.session.cancel();
    }
}

impl<H: IntentionHandler> Drop for StateStore<H> {
    fn drop(&mut self) {
        self.session.cancel();
    }
}

struct Runner<H: IntentionHandler> {
    handler: H,
    ctx: StateContext<H::State>,
    commands: mpsc::UnboundedReceiver<Command<H>>,
    scope: SessionScope<H>,
}

impl<H: IntentionHandler> Runner<H> {
    async fn run(mut self) {
        let session = self.scope.session.clone();
        if session.is_cancelled() {
            self.ctx.cell.close();
            return;
        }
        self.handler.on_start(&self.scope).await;

        loop {
            // Cancellation is only observed between messages, so a handler
            // that already started always runs to completion.
            tokio::select! {
                biased;
                _ = session.cancelled() => break,
                command = self.commands.recv() => match command {
                    Some(Command::Intention(intention)) => self.handle_intention(intention).await,
                    Some(Command::Signal(signal)) => self.handle_signal(signal).await,
                    Some(Command::Settle(done)) => {
                        let _ = done.send(());
                    }
                    None => break,
                },
            }
        }

        self.ctx.cell.close();
        tracing::debug!("State store runner stopped");
    }

    async fn handle_intention(&mut self, intention: H::Intent) {
        let result = self.handler.handle_intention(intention, &self.ctx).await;
        self.recover_from(result);
    }

    async fn handle_signal(&mut self, signal: H::Signal) {
        let result = self.handler.handle_signal(signal, &self.ctx).await;
        self.recover_from(result);
    }

    fn recover_from(&self, result: Result<(), H::Error>) {
        if let Err(error) = result {
            tracing::warn!(error = %error, "Handler failed; converting error into state");
            let handler = &self.handler;
            self.ctx.update_state(|state| handler.recover(state, &error));
        }
    }
}
