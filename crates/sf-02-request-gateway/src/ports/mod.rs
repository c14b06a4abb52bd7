//! Ports Layer
//!
//! `RequestGateway` is the only way the orchestrator reaches the network.

use async_trait::async_trait;
use serde_json::Value;
use shared_types::{MediaFile, Outcome};

use crate::domain::ApiRequest;

/// Issues one call and settles it into exactly one `Outcome`.
#[async_trait]
pub trait RequestGateway: Send + Sync {
    /// Perform a JSON call, attaching the current credential if present.
    async fn call(&self, request: ApiRequest) -> Outcome<Value>;

    /// Upload one file as a multipart request.
    async fn upload(&self, file: MediaFile) -> Outcome<Value>;
}
