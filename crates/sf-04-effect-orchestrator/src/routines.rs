//! One routine per operation.
//!
//! Each routine issues exactly one gateway call and turns its outcome into
//! the settled event for that operation. Routines never retry and never
//! inspect the outcome tag beyond decoding: unauthorized outcomes travel on
//! unchanged so the session guard sees every one of them.

use sf_01_credential_store::{CredentialError, CredentialStore};
use sf_02_request_gateway::RequestGateway;
use shared_bus::SyncEvent;
use shared_types::{
    EntityKind, FailureReason, Intent, IntentId, ListResponse, MediaFile, MediaRef, Outcome,
    PaginationRequest, PaginationResult, Record, ReferenceData, SessionClaims, SessionToken,
    StoreId, SubmitMode,
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::endpoints::{LoginResponse, ReferenceBody};
use crate::domain::Endpoints;

/// Everything a routine may touch.
pub struct RoutineContext {
    pub gateway: Arc<dyn RequestGateway>,
    pub credentials: Arc<dyn CredentialStore>,
    pub endpoints: Endpoints,
}

/// Run the routine for a gateway-bound intent.
///
/// Returns `None` for intents handled synchronously by the dispatcher.
pub async fn run(ctx: &RoutineContext, intent_id: IntentId, intent: Intent) -> Option<SyncEvent> {
    let event = match intent {
        Intent::FetchList { kind, page } => fetch_list(ctx, intent_id, kind, page).await,
        Intent::FetchDetail { kind, scope, id } => {
            fetch_detail(ctx, intent_id, kind, scope, id).await
        }
        Intent::Submit {
            kind,
            scope,
            mode,
            payload,
        } => submit(ctx, intent_id, kind, scope, mode, payload).await,
        Intent::UpdateStatus {
            kind,
            scope,
            id,
            status,
        } => update_status(ctx, intent_id, kind, scope, id, status).await,
        Intent::UploadMedia { file } => upload_media(ctx, intent_id, file).await,
        Intent::FetchReference { data } => fetch_reference(ctx, intent_id, data).await,
        Intent::Login { username, password } => login(ctx, intent_id, username, password).await,
        Intent::ClearDetail { .. } | Intent::Logout => return None,
    };

    debug!(%intent_id, topic = ?event.topic(), kind = ?event.kind(), "Routine settled");
    Some(event)
}

pub async fn fetch_list(
    ctx: &RoutineContext,
    intent_id: IntentId,
    kind: EntityKind,
    page: PaginationRequest,
) -> SyncEvent {
    let outcome = ctx
        .gateway
        .call(ctx.endpoints.list(kind, &page))
        .await
        .decode::<ListResponse>()
        .map(PaginationResult::from);

    SyncEvent::ListSettled {
        intent_id,
        kind,
        page,
        outcome,
    }
}

pub async fn fetch_detail(
    ctx: &RoutineContext,
    intent_id: IntentId,
    kind: EntityKind,
    scope: StoreId,
    id: String,
) -> SyncEvent {
    let outcome = ctx
        .gateway
        .call(ctx.endpoints.detail(kind, &scope, &id))
        .await
        .decode::<Record>();

    SyncEvent::DetailSettled {
        intent_id,
        kind,
        id,
        outcome,
    }
}

/// Submit a payload that has already passed validation.
pub async fn submit(
    ctx: &RoutineContext,
    intent_id: IntentId,
    kind: EntityKind,
    scope: StoreId,
    mode: SubmitMode,
    payload: Record,
) -> SyncEvent {
    let outcome = ctx
        .gateway
        .call(ctx.endpoints.submit(kind, &scope, &mode, &payload))
        .await
        .decode::<Record>();

    SyncEvent::Submitted {
        intent_id,
        kind,
        mode,
        outcome,
    }
}

pub async fn update_status(
    ctx: &RoutineContext,
    intent_id: IntentId,
    kind: EntityKind,
    scope: StoreId,
    id: String,
    status: String,
) -> SyncEvent {
    let outcome = ctx
        .gateway
        .call(ctx.endpoints.status(kind, &scope, &id, &status))
        .await
        .discard();

    SyncEvent::StatusSettled {
        intent_id,
        kind,
        id,
        status,
        outcome,
    }
}

pub async fn upload_media(ctx: &RoutineContext, intent_id: IntentId, file: MediaFile) -> SyncEvent {
    let outcome = ctx.gateway.upload(file).await.decode::<MediaRef>();
    SyncEvent::MediaUploaded { intent_id, outcome }
}

pub async fn fetch_reference(
    ctx: &RoutineContext,
    intent_id: IntentId,
    data: ReferenceData,
) -> SyncEvent {
    let outcome = ctx
        .gateway
        .call(ctx.endpoints.reference(data))
        .await
        .decode::<ReferenceBody>()
        .map(Vec::<Record>::from);

    SyncEvent::ReferenceSettled {
        intent_id,
        data,
        outcome,
    }
}

/// Exchange credentials for a session token and store it.
///
/// The password is never logged.
pub async fn login(
    ctx: &RoutineContext,
    intent_id: IntentId,
    username: String,
    password: String,
) -> SyncEvent {
    let outcome = ctx
        .gateway
        .call(ctx.endpoints.login(&username, &password))
        .await
        .decode::<LoginResponse>()
        .and_then(|body| establish(ctx.credentials.as_ref(), SessionToken::new(body.token)));

    if let Outcome::Success(claims) = &outcome {
        info!(username = %username, store_id = %claims.store_id, "Login succeeded");
    }

    SyncEvent::LoginSettled { intent_id, outcome }
}

fn establish(
    credentials: &dyn CredentialStore,
    token: SessionToken,
) -> Result<SessionClaims, FailureReason> {
    let claims = token
        .claims()
        .map_err(|e| FailureReason::Decode(e.to_string()))?;
    credentials.set(token).map_err(|e| match e {
        CredentialError::InvalidToken(inner) => FailureReason::Decode(inner.to_string()),
        other @ CredentialError::Io { .. } => FailureReason::Storage(other.to_string()),
    })?;
    Ok(claims)
}
