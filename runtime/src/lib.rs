//! # FreshCart Runtime
//!
//! Runtime implementation for the FreshCart store architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back
//!   to reducers
//! - **Cancellation Groups**: Pending effects registered under an
//!   [`EffectGroup`] are torn down together, all-or-nothing
//!
//! ## Concurrency Model
//!
//! Reducer execution serializes behind the store's write lock — the single
//! logical thread of control the surrounding UI expects. Actions sent to a
//! store apply in `send` order; effects execute on spawned tasks and feed
//! any produced actions back through the same lock.
//!
//! ## Example
//!
//! ```ignore
//! use freshcart_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state via a closure so the lock is released promptly
//! let value = store.state(|s| s.some_field).await;
//! ```

use freshcart_core::effect::{Effect, EffectGroup};
use freshcart_core::reducer::Reducer;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{RwLock, broadcast, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    ///
    /// These are operational errors only. Domain-level failures never
    /// surface here: stores treat unknown ids and other not-found
    /// conditions as silent no-ops.
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

pub use error::StoreError;

/// Configuration for a [`Store`]
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Capacity of the action broadcast channel (default 16)
    pub broadcast_capacity: usize,
}

impl StoreConfig {
    /// Set the action broadcast capacity
    ///
    /// Increase this when many slow observers subscribe via
    /// [`Store::subscribe_actions`].
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
        }
    }
}

/// The Store runtime
///
/// Owns a store's state exclusively and routes every mutation through the
/// reducer. Consumers read snapshots via [`Store::state`] and must not hold
/// on to interior references; all mutation goes through [`Store::send`].
///
/// Stores are constructed once at session start, cloned (cheaply — state is
/// shared behind an `Arc`) into whatever needs them, and torn down at
/// session end via [`Store::shutdown`], which also cancels every pending
/// effect group.
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    shutdown: Arc<AtomicBool>,
    /// Cancellation scopes for pending effects. One watch channel per
    /// group; cancelling flips the value and wakes every member at once.
    groups: Arc<Mutex<HashMap<EffectGroup, watch::Sender<bool>>>>,
    /// Actions produced by effects (delays, futures) are broadcast to
    /// observers. Directly sent actions are not.
    action_broadcast: broadcast::Sender<A>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_config(initial_state, reducer, environment, StoreConfig::default())
    }

    /// Create a new store with custom configuration
    #[must_use]
    pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
        let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
            groups: Arc::new(Mutex::new(HashMap::new())),
            action_broadcast,
        }
    }

    /// Send an action to the store
    ///
    /// 1. Acquires the write lock on state
    /// 2. Calls the reducer with (state, action, environment)
    /// 3. Dispatches returned effects onto spawned tasks
    ///
    /// `send` returns after *starting* effect execution, not completion.
    /// Cancellation groups named by the returned effects are registered
    /// before `send` returns, so a `Cancel` sent immediately afterwards
    /// reliably covers them.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<(), StoreError> {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::warn!("rejected action: store is shutting down");
            return Err(StoreError::ShutdownInProgress);
        }

        let effects = {
            let mut state = self.state.write().await;
            self.reducer.reduce(&mut state, action, &self.environment)
        };

        tracing::trace!(effects = effects.len(), "reducer completed");
        for effect in effects {
            self.dispatch_effect(effect, None);
        }

        Ok(())
    }

    /// Read current state via a closure
    ///
    /// Access state through a closure to ensure the lock is released
    /// promptly:
    ///
    /// ```ignore
    /// let order_count = store.state(|s| s.orders.len()).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Subscribe to actions produced by this store's effects
    ///
    /// Returns a receiver that gets a clone of every action fed back by a
    /// delay or future effect. Directly sent actions are not broadcast.
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
        self.action_broadcast.subscribe()
    }

    /// Tear the store down
    ///
    /// Rejects all subsequent actions and cancels every pending effect
    /// group. Delayed actions that were not grouped may still be sleeping;
    /// they are dropped on arrival instead of reaching the reducer.
    pub fn shutdown(&self) {
        tracing::debug!("store shutting down");
        self.shutdown.store(true, Ordering::Release);

        let mut groups = self.lock_groups();
        for (group, cancel) in groups.drain() {
            tracing::trace!(%group, "cancelling effect group at shutdown");
            let _ = cancel.send(true);
        }
    }

    /// Dispatch a single effect
    ///
    /// Group registration (`Cancellable`) and cancellation (`Cancel`) are
    /// handled synchronously here so that callers observe them as soon as
    /// `send` returns; everything that actually waits runs on a spawned
    /// task.
    fn dispatch_effect(&self, effect: Effect<A>, cancel: Option<watch::Receiver<bool>>) {
        match effect {
            Effect::None => {},
            Effect::Parallel(effects) => {
                for effect in effects {
                    self.dispatch_effect(effect, cancel.clone());
                }
            },
            Effect::Cancellable { group, effect } => {
                let cancel = self.join_group(&group);
                let store = self.clone();
                tokio::spawn(async move {
                    store.clone().run_effect(*effect, Some(cancel)).await;
                    store.release_group(&group);
                });
            },
            Effect::Cancel(group) => self.cancel_group(&group),
            effect @ (Effect::Sequential(_) | Effect::Delay { .. } | Effect::Future(_)) => {
                let store = self.clone();
                tokio::spawn(async move {
                    store.run_effect(effect, cancel).await;
                });
            },
        }
    }

    /// Run an effect to completion on the current task
    fn run_effect(
        self,
        effect: Effect<A>,
        cancel: Option<watch::Receiver<bool>>,
    ) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            match effect {
                Effect::None => {},
                Effect::Parallel(effects) => {
                    let mut tasks = Vec::with_capacity(effects.len());
                    for effect in effects {
                        let store = self.clone();
                        let cancel = cancel.clone();
                        tasks.push(tokio::spawn(async move {
                            store.run_effect(effect, cancel).await;
                        }));
                    }
                    for task in tasks {
                        let _ = task.await;
                    }
                },
                Effect::Sequential(effects) => {
                    for effect in effects {
                        self.clone().run_effect(effect, cancel.clone()).await;
                    }
                },
                Effect::Delay { duration, action } => {
                    tokio::select! {
                        () = tokio::time::sleep(duration) => {
                            self.feed(*action).await;
                        }
                        () = cancelled(cancel.clone()) => {
                            tracing::trace!("delayed action cancelled before firing");
                        }
                    }
                },
                Effect::Future(future) => {
                    tokio::select! {
                        action = future => {
                            if let Some(action) = action {
                                self.feed(action).await;
                            }
                        }
                        () = cancelled(cancel.clone()) => {
                            tracing::trace!("future effect cancelled");
                        }
                    }
                },
                Effect::Cancellable { group, effect } => {
                    let cancel = self.join_group(&group);
                    self.clone().run_effect(*effect, Some(cancel)).await;
                    self.release_group(&group);
                },
                Effect::Cancel(group) => self.cancel_group(&group),
            }
        })
    }

    /// Feed an effect-produced action back through the reducer
    async fn feed(&self, action: A) {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::debug!("dropping effect action: store is shutting down");
            return;
        }

        let effects = {
            let mut state = self.state.write().await;
            self.reducer
                .reduce(&mut state, action.clone(), &self.environment)
        };

        let _ = self.action_broadcast.send(action);

        for effect in effects {
            self.dispatch_effect(effect, None);
        }
    }

    /// Subscribe a new member to the group, creating it if needed
    fn join_group(&self, group: &EffectGroup) -> watch::Receiver<bool> {
        let mut groups = self.lock_groups();
        groups
            .entry(group.clone())
            .or_insert_with(|| watch::channel(false).0)
            .subscribe()
    }

    /// Cancel every pending effect registered under the group
    ///
    /// Unknown groups are a silent no-op.
    fn cancel_group(&self, group: &EffectGroup) {
        let mut groups = self.lock_groups();
        if let Some(cancel) = groups.remove(group) {
            tracing::debug!(%group, "cancelling effect group");
            let _ = cancel.send(true);
        }
    }

    /// Drop the group's registration once its last member completed
    fn release_group(&self, group: &EffectGroup) {
        let mut groups = self.lock_groups();
        let drained = groups
            .get(group)
            .is_some_and(|cancel| cancel.receiver_count() == 0);
        if drained {
            groups.remove(group);
        }
    }

    fn lock_groups(&self) -> MutexGuard<'_, HashMap<EffectGroup, watch::Sender<bool>>> {
        self.groups.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resolves when the group is cancelled; pends forever when ungrouped
///
/// A dropped group sender also counts as cancelled: it only happens on
/// store teardown.
async fn cancelled(cancel: Option<watch::Receiver<bool>>) {
    match cancel {
        Some(mut cancel) => {
            let _ = cancel.wait_for(|cancelled| *cancelled).await;
        },
        None => std::future::pending::<()>().await,
    }
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            environment: self.environment.clone(),
            shutdown: Arc::clone(&self.shutdown),
            groups: Arc::clone(&self.groups),
            action_broadcast: self.action_broadcast.clone(),
        }
    }
}
