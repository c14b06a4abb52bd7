//! # Component Container
//!
//! Builds every engine component with its dependencies, in dependency order:
//!
//! 1. Credential store (durable, file-backed)
//! 2. Request gateway (reads the credential store on every call)
//! 3. Session guard + navigator
//! 4. Effect orchestrator (emits into the engine loop)
//! 5. Sync engine (owns the entity store)

use sf_01_credential_store::{
    CredentialError, CredentialStore, FileTokenStorage, SessionCredentials,
};
use sf_02_request_gateway::{GatewayError, HttpGateway, RequestGateway};
use sf_03_entity_store::EntityStore;
use sf_04_effect_orchestrator::{DispatchError, EffectOrchestrator, Endpoints};
use sf_05_session_guard::{ChannelNavigator, SessionGuard};
use shared_bus::InMemoryEventBus;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tracing::info;

use crate::config::{ConfigError, ConsoleConfig, PagingConfig};
use crate::engine::{EngineHandle, SyncEngine};

/// Why the components could not be assembled.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Every component the engine needs, before the loop is started.
pub struct ConsoleContainer {
    pub credentials: Arc<dyn CredentialStore>,
    pub gateway: Arc<dyn RequestGateway>,
    pub navigator: Arc<ChannelNavigator>,
    pub bus: Arc<InMemoryEventBus>,
    pub endpoints: Endpoints,
    pub paging: PagingConfig,
}

impl ConsoleContainer {
    /// Production wiring: file-backed credentials and the HTTP gateway.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self, ContainerError> {
        config.validate()?;

        let storage = FileTokenStorage::new(&config.session.token_path);
        let credentials: Arc<dyn CredentialStore> = Arc::new(SessionCredentials::open(storage)?);
        let gateway = Arc::new(HttpGateway::new(config.gateway(), Arc::clone(&credentials))?);

        info!(
            api_domain = %config.api.api_domain,
            authenticated = credentials.is_authenticated(),
            "Components initialized"
        );
        Ok(Self::with_parts(credentials, gateway, config))
    }

    /// Wire caller-provided credential store and gateway.
    pub fn with_parts(
        credentials: Arc<dyn CredentialStore>,
        gateway: Arc<dyn RequestGateway>,
        config: &ConsoleConfig,
    ) -> Self {
        Self {
            credentials,
            gateway,
            navigator: Arc::new(ChannelNavigator::new()),
            bus: Arc::new(InMemoryEventBus::with_capacity(config.runtime.event_buffer)),
            endpoints: config.endpoints(),
            paging: config.paging.clone(),
        }
    }

    /// Spawn the engine loop on the current runtime.
    ///
    /// The loop runs until the returned handle is shut down or dropped.
    pub fn start(self) -> Result<EngineHandle, DispatchError> {
        let runtime = Handle::try_current().map_err(|_| DispatchError::NoRuntime)?;

        let (sender, events) = mpsc::unbounded_channel();
        let orchestrator = Arc::new(EffectOrchestrator::new(
            self.gateway,
            Arc::clone(&self.credentials),
            self.endpoints,
            Arc::new(sender),
        ));
        let guard = Arc::new(SessionGuard::new(
            Arc::clone(&self.credentials),
            self.navigator,
        ));

        let store = EntityStore::new(self.credentials.claims().as_ref());
        let (shutdown, shutdown_rx) = watch::channel(false);
        let (engine, snapshots) = SyncEngine::new(
            store,
            events,
            Arc::clone(&guard),
            Arc::clone(&self.bus),
            shutdown_rx,
        );
        let task = runtime.spawn(engine.run());

        Ok(EngineHandle::new(
            orchestrator,
            self.credentials,
            guard,
            self.bus,
            snapshots,
            self.paging,
            shutdown,
            task,
        ))
    }
}
