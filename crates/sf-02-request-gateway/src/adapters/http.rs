//! reqwest-backed gateway.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use sf_01_credential_store::CredentialStore;
use shared_types::{FailureReason, MediaFile, Outcome};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{classify, ApiRequest, GatewayConfig, Method};
use crate::error::GatewayError;
use crate::ports::RequestGateway;

/// Multipart field name the upload endpoint reads.
const UPLOAD_FIELD: &str = "file";

/// Gateway over a shared reqwest client.
///
/// The credential is read from the store on every call, never cached here.
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpGateway {
    pub fn new(
        config: GatewayConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, GatewayError> {
        let domain = config.api_domain.as_str();
        if !(domain.starts_with("http://") || domain.starts_with("https://")) {
            return Err(GatewayError::InvalidBaseUrl(domain.to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.credentials.get() {
            Some(token) => builder.header(AUTHORIZATION, token.as_str()),
            None => builder,
        }
    }

    async fn settle(
        &self,
        method: Method,
        path: &str,
        sent: Result<Response, reqwest::Error>,
    ) -> Outcome<Value> {
        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                warn!(%method, path, error = %e, "Request failed before a response arrived");
                return Outcome::Failure(FailureReason::Transport(e.to_string()));
            }
        };

        let status = response.status().as_u16();
        let body = if response.status().is_success() {
            match response.bytes().await {
                Ok(bytes) => bytes.to_vec(),
                Err(e) => {
                    warn!(%method, path, status, error = %e, "Response body could not be read");
                    return Outcome::Failure(FailureReason::Transport(e.to_string()));
                }
            }
        } else {
            Vec::new()
        };

        let outcome = classify(status, &body);
        match &outcome {
            Outcome::Success(_) => debug!(%method, path, status, "Call settled"),
            Outcome::Unauthorized => warn!(%method, path, status, "Call unauthorized"),
            Outcome::Failure(reason) => warn!(%method, path, status, reason = %reason, "Call failed"),
        }
        outcome
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
    }
}

#[async_trait]
impl RequestGateway for HttpGateway {
    async fn call(&self, request: ApiRequest) -> Outcome<Value> {
        let ApiRequest {
            method,
            path,
            query,
            body,
        } = request;

        let mut builder = self
            .client
            .request(to_reqwest(method), self.config.url(&path))
            .query(&query);
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        debug!(%method, path = %path, "Issuing call");
        let sent = self.authorize(builder).send().await;
        self.settle(method, &path, sent).await
    }

    async fn upload(&self, file: MediaFile) -> Outcome<Value> {
        let MediaFile {
            file_name,
            content_type,
            bytes,
        } = file;

        let size = bytes.len();
        let mut part = Part::bytes(bytes).file_name(file_name.clone());
        if let Some(content_type) = content_type.as_deref() {
            part = match part.mime_str(content_type) {
                Ok(part) => part,
                Err(e) => {
                    warn!(file = %file_name, content_type, "Rejected upload content type");
                    return Outcome::Failure(FailureReason::Transport(e.to_string()));
                }
            };
        }

        let path = self.config.upload_path.clone();
        let builder = self
            .client
            .post(self.config.url(&path))
            .multipart(Form::new().part(UPLOAD_FIELD, part));

        debug!(file = %file_name, size, path = %path, "Uploading media");
        let sent = self.authorize(builder).send().await;
        self.settle(Method::Post, &path, sent).await
    }
}
