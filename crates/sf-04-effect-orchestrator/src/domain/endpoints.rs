//! Endpoint map: which call each intent becomes.
//!
//! For an entity with plural path `P`:
//!
//! | Operation    | Call                                      |
//! |--------------|-------------------------------------------|
//! | FetchList    | `GET /P?storeId&pageSize&pageNo`          |
//! | FetchDetail  | `GET /P/<id>?storeId`                     |
//! | Submit       | `POST /P` or `PUT /P/<id>`, body + storeId |
//! | UpdateStatus | `PATCH /P/<id>` with `{storeId, status}`  |
//!
//! Kinds keyed by scope (store settings) use the store id as `<id>`. The id
//! is percent-encoded so it always stays one path segment.

use serde_json::json;
use sf_02_request_gateway::ApiRequest;
use shared_types::{
    EntityKind, PaginationRequest, Record, ReferenceData, StoreId, SubmitMode, SCOPE_FIELD,
    STATUS_FIELD,
};

/// Paths outside the per-entity map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub login_path: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
        }
    }
}

fn collection(kind: EntityKind) -> String {
    format!("/{}", kind.path())
}

fn member(kind: EntityKind, scope: &StoreId, id: &str) -> String {
    let id = if kind.config().keyed_by_scope {
        scope.as_str()
    } else {
        id
    };
    format!("/{}/{}", kind.path(), urlencoding::encode(id))
}

/// Whether `id` can address a member path.
///
/// Empty and dot segments survive encoding and would be collapsed by URL
/// normalization onto the collection or its parent.
#[must_use]
pub fn is_member_id(id: &str) -> bool {
    !matches!(id, "" | "." | "..")
}

impl Endpoints {
    #[must_use]
    pub fn list(&self, kind: EntityKind, page: &PaginationRequest) -> ApiRequest {
        ApiRequest::get(collection(kind)).with_query_pairs(page.query())
    }

    #[must_use]
    pub fn detail(&self, kind: EntityKind, scope: &StoreId, id: &str) -> ApiRequest {
        let request = ApiRequest::get(member(kind, scope, id));
        if kind.config().keyed_by_scope {
            request
        } else {
            request.with_query(SCOPE_FIELD, scope)
        }
    }

    #[must_use]
    pub fn submit(
        &self,
        kind: EntityKind,
        scope: &StoreId,
        mode: &SubmitMode,
        payload: &Record,
    ) -> ApiRequest {
        let mut body = payload.clone();
        body.insert(SCOPE_FIELD, scope.as_str());
        let body = body.into_value();

        match mode {
            SubmitMode::Create if !kind.config().keyed_by_scope => {
                ApiRequest::post(collection(kind), body)
            }
            SubmitMode::Create => ApiRequest::put(member(kind, scope, ""), body),
            SubmitMode::Update { id } => ApiRequest::put(member(kind, scope, id), body),
        }
    }

    #[must_use]
    pub fn status(&self, kind: EntityKind, scope: &StoreId, id: &str, status: &str) -> ApiRequest {
        ApiRequest::patch(
            member(kind, scope, id),
            json!({ SCOPE_FIELD: scope.as_str(), STATUS_FIELD: status }),
        )
    }

    #[must_use]
    pub fn reference(&self, data: ReferenceData) -> ApiRequest {
        ApiRequest::get(data.path())
    }

    #[must_use]
    pub fn login(&self, username: &str, password: &str) -> ApiRequest {
        ApiRequest::post(
            self.login_path.clone(),
            json!({ "username": username, "password": password }),
        )
    }
}

/// Body shape of a successful login.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
}

/// Reference endpoints answer either a bare array or a list page.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum ReferenceBody {
    Items(Vec<Record>),
    Page { data: Vec<Record> },
}

impl From<ReferenceBody> for Vec<Record> {
    fn from(body: ReferenceBody) -> Self {
        match body {
            ReferenceBody::Items(items) | ReferenceBody::Page { data: items } => items,
        }
    }
}
