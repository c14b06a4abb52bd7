//! Effect orchestrator service.

use sf_01_credential_store::CredentialStore;
use sf_02_request_gateway::RequestGateway;
use shared_bus::SyncEvent;
use shared_types::{Intent, IntentId, SubmitMode};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::domain::{is_member_id, validate_submit, Endpoints};
use crate::error::DispatchError;
use crate::ports::{Dispatched, EventSink, IntentDispatcher};
use crate::routines::{self, RoutineContext};

/// Dispatches intents onto the current Tokio runtime.
pub struct EffectOrchestrator {
    ctx: Arc<RoutineContext>,
    sink: Arc<dyn EventSink>,
}

impl EffectOrchestrator {
    pub fn new(
        gateway: Arc<dyn RequestGateway>,
        credentials: Arc<dyn CredentialStore>,
        endpoints: Endpoints,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            ctx: Arc::new(RoutineContext {
                gateway,
                credentials,
                endpoints,
            }),
            sink,
        }
    }

    fn logout(&self) -> Result<Dispatched, DispatchError> {
        let cleared = self.ctx.credentials.clear();
        self.sink.emit(SyncEvent::LoggedOut)?;
        cleared?;
        info!("Logged out");
        Ok(Dispatched {
            intent_id: IntentId::new(),
            handle: None,
        })
    }
}

/// The id an intent's member path is built from, if it targets one member.
fn member_target(intent: &Intent) -> Option<&str> {
    let (kind, scope, id) = match intent {
        Intent::FetchDetail { kind, scope, id }
        | Intent::UpdateStatus { kind, scope, id, .. }
        | Intent::Submit {
            kind,
            scope,
            mode: SubmitMode::Update { id },
            ..
        } => (*kind, scope, Some(id.as_str())),
        Intent::Submit { kind, scope, .. } => (*kind, scope, None),
        _ => return None,
    };
    if kind.config().keyed_by_scope {
        Some(scope.as_str())
    } else {
        id
    }
}

impl IntentDispatcher for EffectOrchestrator {
    fn dispatch(&self, intent: Intent) -> Result<Dispatched, DispatchError> {
        let intent_id = IntentId::new();

        if let Some(id) = member_target(&intent).filter(|id| !is_member_id(id)) {
            debug!(%intent_id, id, "Intent rejected, id is not a path segment");
            return Err(DispatchError::InvalidId(id.to_string()));
        }

        match &intent {
            Intent::ClearDetail { kind } => {
                self.sink.emit(SyncEvent::DetailCleared { kind: *kind })?;
                return Ok(Dispatched {
                    intent_id,
                    handle: None,
                });
            }
            Intent::Logout => return self.logout(),
            Intent::Submit { kind, payload, .. } => {
                if let Err(error) = validate_submit(*kind, payload) {
                    debug!(%intent_id, kind = %kind, missing = ?error.missing, "Submit rejected locally");
                    self.sink.emit(SyncEvent::SubmitRejected {
                        intent_id,
                        error: error.clone(),
                    })?;
                    return Err(error.into());
                }
            }
            _ => {}
        }

        let runtime = Handle::try_current().map_err(|_| DispatchError::NoRuntime)?;

        self.sink.emit(SyncEvent::Issued {
            intent_id,
            kind: intent.kind(),
            op: intent.operation(),
        })?;
        debug!(%intent_id, kind = ?intent.kind(), op = ?intent.operation(), "Intent issued");

        let ctx = Arc::clone(&self.ctx);
        let sink = Arc::clone(&self.sink);
        let handle = runtime.spawn(async move {
            let Some(event) = routines::run(&ctx, intent_id, intent).await else {
                return;
            };
            if sink.emit(event).is_err() {
                warn!(%intent_id, "Engine stopped before the outcome could be applied");
            }
        });

        Ok(Dispatched {
            intent_id,
            handle: Some(handle),
        })
    }
}
