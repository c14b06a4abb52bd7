//! # Sync Engine
//!
//! The single task that owns the entity store.
//!
//! ```text
//!   routines ──emit──→ mpsc ──→ SyncEngine::step
//!                                  │ 1. guard.observe(event)
//!                                  │ 2. store.apply(event) [+ SessionInvalidated]
//!                                  │ 3. snapshot → watch
//!                                  └ 4. publish → bus (observers)
//! ```
//!
//! Events are applied in the order routines emit them, so when two intents
//! target the same slice the one that settles last wins.

use sf_01_credential_store::{CredentialError, CredentialStore};
use sf_03_entity_store::EntityStore;
use sf_04_effect_orchestrator::{DispatchError, Dispatched, IntentDispatcher};
use sf_05_session_guard::SessionGuard;
use shared_bus::{
    EventFilter, EventPublisher, InMemoryEventBus, Subscription, SubscriptionError, SyncEvent,
};
use shared_types::{EntityKind, Intent, StoreId};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::PagingConfig;

/// Event loop state. Consumed by [`SyncEngine::run`].
pub struct SyncEngine {
    store: EntityStore,
    events: mpsc::UnboundedReceiver<SyncEvent>,
    guard: Arc<SessionGuard>,
    snapshots: watch::Sender<EntityStore>,
    bus: Arc<InMemoryEventBus>,
    shutdown: watch::Receiver<bool>,
}

impl SyncEngine {
    pub fn new(
        store: EntityStore,
        events: mpsc::UnboundedReceiver<SyncEvent>,
        guard: Arc<SessionGuard>,
        bus: Arc<InMemoryEventBus>,
        shutdown: watch::Receiver<bool>,
    ) -> (Self, watch::Receiver<EntityStore>) {
        let (snapshots, snapshot_rx) = watch::channel(store.clone());
        let engine = Self {
            store,
            events,
            guard,
            snapshots,
            bus,
            shutdown,
        };
        (engine, snapshot_rx)
    }

    /// Apply events until every sender is dropped or shutdown is signalled.
    pub async fn run(mut self) {
        info!("Sync engine started");
        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(event) => self.step(event).await,
                    None => break,
                },
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        info!("Sync engine stopped");
    }

    /// Apply one event.
    ///
    /// The guard sees the event before the store does; waiters on the bus
    /// are only woken once the snapshot already reflects it.
    pub async fn step(&mut self, event: SyncEvent) {
        let invalidated = self.guard.observe(&event);

        self.store.apply(&event);
        if invalidated {
            self.store.apply(&SyncEvent::SessionInvalidated);
        }
        self.snapshots.send_replace(self.store.clone());

        debug!(topic = ?event.topic(), kind = ?event.kind(), "Event applied");
        self.bus.publish(event).await;
        if invalidated {
            self.bus.publish(SyncEvent::SessionInvalidated).await;
        }
    }

    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }
}

/// The handle views drive the engine through.
pub struct EngineHandle {
    dispatcher: Arc<dyn IntentDispatcher>,
    credentials: Arc<dyn CredentialStore>,
    guard: Arc<SessionGuard>,
    bus: Arc<InMemoryEventBus>,
    snapshots: watch::Receiver<EntityStore>,
    paging: PagingConfig,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl EngineHandle {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        dispatcher: Arc<dyn IntentDispatcher>,
        credentials: Arc<dyn CredentialStore>,
        guard: Arc<SessionGuard>,
        bus: Arc<InMemoryEventBus>,
        snapshots: watch::Receiver<EntityStore>,
        paging: PagingConfig,
        shutdown: watch::Sender<bool>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            dispatcher,
            credentials,
            guard,
            bus,
            snapshots,
            paging,
            shutdown,
            task,
        }
    }

    /// Dispatch without waiting for the outcome.
    pub fn dispatch(&self, intent: Intent) -> Result<Dispatched, DispatchError> {
        self.dispatcher.dispatch(intent)
    }

    /// Dispatch and wait until the store reflects the intent's final event.
    ///
    /// Returns that event. A Submit rejected locally returns the validation
    /// error, after its `SubmitRejected` has been applied.
    pub async fn dispatch_and_wait(&self, intent: Intent) -> Result<SyncEvent, DispatchError> {
        let mut events = self.bus.subscribe(EventFilter::all());
        let local = match &intent {
            Intent::ClearDetail { kind } => Some(SyncEvent::DetailCleared { kind: *kind }),
            Intent::Logout => Some(SyncEvent::LoggedOut),
            _ => None,
        };

        match self.dispatcher.dispatch(intent) {
            Ok(dispatched) => match local {
                Some(expected) => wait_for(&mut events, |event| *event == expected).await,
                None => {
                    let wanted = dispatched.intent_id;
                    wait_for(&mut events, |event| {
                        event.intent_id() == Some(wanted) && event.is_terminal()
                    })
                    .await
                }
            },
            Err(DispatchError::Validation(error)) => {
                wait_for(&mut events, |event| {
                    matches!(event, SyncEvent::SubmitRejected { error: e, .. } if *e == error)
                })
                .await?;
                Err(DispatchError::Validation(error))
            }
            Err(other) => Err(other),
        }
    }

    /// Current store snapshot.
    #[must_use]
    pub fn snapshot(&self) -> EntityStore {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every applied event.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<EntityStore> {
        self.snapshots.clone()
    }

    /// Observe applied events.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.bus.subscribe(filter)
    }

    /// Store the current session is scoped to.
    #[must_use]
    pub fn scope(&self) -> Option<StoreId> {
        self.credentials.claims().map(|claims| claims.store_id)
    }

    #[must_use]
    pub fn page_size(&self, kind: EntityKind) -> u32 {
        self.paging.page_size(kind)
    }

    #[must_use]
    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    /// Open the login boundary, dropping any stored session.
    pub fn enter_login(&self) -> Result<(), CredentialError> {
        self.guard.enter_login()
    }

    /// Stop the engine loop and wait for it to finish.
    pub async fn shutdown(self) {
        self.shutdown.send_replace(true);
        let _ = self.task.await;
    }
}

async fn wait_for(
    events: &mut Subscription,
    done: impl Fn(&SyncEvent) -> bool,
) -> Result<SyncEvent, DispatchError> {
    loop {
        let event = events.recv_lossless().await.map_err(|e| match e {
            SubscriptionError::Closed => DispatchError::EngineStopped,
            SubscriptionError::Lagged(count) => DispatchError::EventsLagged(count),
        })?;
        if done(&event) {
            return Ok(event);
        }
    }
}
