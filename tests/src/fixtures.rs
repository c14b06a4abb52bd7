//! # Test Fixtures
//!
//! A scripted gateway whose calls are answered from a queue or held until the
//! test releases them, a session token builder, and a harness running the
//! full engine over both.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{oneshot, watch};

use console_runtime::{ConsoleConfig, ConsoleContainer, EngineHandle};
use sf_01_credential_store::{MemoryTokenStorage, SessionCredentials};
use sf_02_request_gateway::{ApiRequest, RequestGateway};
use sf_05_session_guard::ChannelNavigator;
use shared_types::{FailureReason, MediaFile, Outcome};

// =============================================================================
// SESSION TOKENS
// =============================================================================

/// Unsigned JWT whose claims scope the session to `store_id`.
pub fn jwt(store_id: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({"data": {"storeId": store_id}}).to_string());
    format!("{header}.{payload}.test-signature")
}

// =============================================================================
// SCRIPTED GATEWAY
// =============================================================================

/// Gateway driven by the test.
///
/// Each call takes the next queued outcome. With the queue empty the call is
/// held until [`ScriptedGateway::release`] answers it, so tests can settle
/// concurrent calls in any order.
pub struct ScriptedGateway {
    queued: Mutex<VecDeque<Outcome<Value>>>,
    held: Mutex<Vec<Option<oneshot::Sender<Outcome<Value>>>>>,
    held_count: watch::Sender<usize>,
    calls: Mutex<Vec<ApiRequest>>,
    uploads: Mutex<Vec<MediaFile>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::answering(Vec::new())
    }

    /// Answer upcoming calls with these outcomes, in order.
    pub fn answering(outcomes: Vec<Outcome<Value>>) -> Self {
        Self {
            queued: Mutex::new(outcomes.into()),
            held: Mutex::new(Vec::new()),
            held_count: watch::channel(0).0,
            calls: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, outcome: Outcome<Value>) {
        self.queued.lock().push_back(outcome);
    }

    /// Wait until `n` calls have been held in total.
    pub async fn wait_held(&self, n: usize) {
        let mut count = self.held_count.subscribe();
        // Sender lives in self, so the channel cannot close here.
        let _ = count.wait_for(|held| *held >= n).await;
    }

    /// Answer the `index`-th held call.
    pub fn release(&self, index: usize, outcome: Outcome<Value>) {
        let sender = self
            .held
            .lock()
            .get_mut(index)
            .and_then(Option::take)
            .expect("no held call at that index");
        let _ = sender.send(outcome);
    }

    /// Every request received so far, uploads excluded.
    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().clone()
    }

    pub fn uploads(&self) -> Vec<MediaFile> {
        self.uploads.lock().clone()
    }

    async fn answer(&self) -> Outcome<Value> {
        if let Some(outcome) = self.queued.lock().pop_front() {
            return outcome;
        }

        let (sender, receiver) = oneshot::channel();
        {
            let mut held = self.held.lock();
            held.push(Some(sender));
            self.held_count.send_replace(held.len());
        }
        receiver
            .await
            .unwrap_or_else(|_| Outcome::Failure(FailureReason::Transport("dropped".into())))
    }
}

impl Default for ScriptedGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RequestGateway for ScriptedGateway {
    async fn call(&self, request: ApiRequest) -> Outcome<Value> {
        self.calls.lock().push(request);
        self.answer().await
    }

    async fn upload(&self, file: MediaFile) -> Outcome<Value> {
        self.uploads.lock().push(file);
        self.answer().await
    }
}

// =============================================================================
// CONSOLE HARNESS
// =============================================================================

/// A running engine over a scripted gateway and in-memory credentials.
pub struct Console {
    pub engine: EngineHandle,
    pub gateway: Arc<ScriptedGateway>,
    pub credentials: Arc<SessionCredentials<MemoryTokenStorage>>,
    pub navigator: Arc<ChannelNavigator>,
    pub config: ConsoleConfig,
}

impl Console {
    /// Start an engine logged into `store_id`.
    pub fn signed_in(store_id: &str, gateway: ScriptedGateway) -> Self {
        Self::start(MemoryTokenStorage::with_token(jwt(store_id)), gateway)
    }

    /// Start an engine with no session.
    pub fn anonymous(gateway: ScriptedGateway) -> Self {
        Self::start(MemoryTokenStorage::new(), gateway)
    }

    /// Must be called inside a Tokio runtime.
    pub fn start(storage: MemoryTokenStorage, gateway: ScriptedGateway) -> Self {
        let config = ConsoleConfig::default();
        let credentials =
            Arc::new(SessionCredentials::open(storage).expect("memory storage never fails"));
        let gateway = Arc::new(gateway);

        let container =
            ConsoleContainer::with_parts(credentials.clone(), gateway.clone(), &config);
        let navigator = Arc::clone(&container.navigator);
        let engine = container.start().expect("inside a Tokio runtime");

        Self {
            engine,
            gateway,
            credentials,
            navigator,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::SessionClaims;

    #[test]
    fn test_jwt_carries_store_id() {
        let claims = SessionClaims::decode(&jwt("S7")).unwrap();
        assert_eq!(claims.store_id.as_str(), "S7");
    }

    #[tokio::test]
    async fn test_held_calls_release_out_of_order() {
        let gateway = Arc::new(ScriptedGateway::new());

        let first = tokio::spawn({
            let gateway = gateway.clone();
            async move { gateway.call(ApiRequest::get("/a")).await }
        });
        gateway.wait_held(1).await;
        let second = tokio::spawn({
            let gateway = gateway.clone();
            async move { gateway.call(ApiRequest::get("/b")).await }
        });
        gateway.wait_held(2).await;

        gateway.release(1, Outcome::Success(json!(2)));
        assert_eq!(second.await.unwrap(), Outcome::Success(json!(2)));
        gateway.release(0, Outcome::Success(json!(1)));
        assert_eq!(first.await.unwrap(), Outcome::Success(json!(1)));
        assert_eq!(gateway.calls().len(), 2);
    }
}
