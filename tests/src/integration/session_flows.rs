//! # Session Lifecycle Flows
//!
//! Login, logout, cold start and persistence across engine restarts.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sf_01_credential_store::{
        CredentialStore, FileTokenStorage, MemoryTokenStorage, TokenStorage,
    };
    use sf_02_request_gateway::Method;
    use sf_03_entity_store::{AuthSlice, EntityStore, SliceStatus};
    use sf_05_session_guard::Navigation;
    use shared_types::{
        EntityKind, FailureReason, Intent, Outcome, PaginationRequest, StoreId,
    };

    use console_runtime::{ConsoleConfig, ConsoleContainer};

    use crate::fixtures::{jwt, Console, ScriptedGateway};

    fn login() -> Intent {
        Intent::Login {
            username: "admin".into(),
            password: "hunter2".into(),
        }
    }

    // =========================================================================
    // LOGIN
    // =========================================================================

    #[tokio::test]
    async fn test_login_establishes_scoped_session() {
        let gateway =
            ScriptedGateway::answering(vec![Outcome::Success(json!({"token": jwt("S9")}))]);
        let console = Console::anonymous(gateway);
        assert_eq!(console.engine.snapshot().auth, AuthSlice::Anonymous);

        console.engine.dispatch_and_wait(login()).await.unwrap();

        assert_eq!(
            console.engine.snapshot().auth,
            AuthSlice::Authenticated {
                store_id: StoreId::from("S9")
            }
        );
        assert_eq!(console.engine.scope(), Some(StoreId::from("S9")));
        assert_eq!(console.credentials.storage().peek(), Some(jwt("S9")));

        let calls = console.gateway.calls();
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[0].path, "/login");
        assert_eq!(
            calls[0].body,
            Some(json!({"username": "admin", "password": "hunter2"}))
        );
    }

    #[tokio::test]
    async fn test_rejected_login_stores_nothing() {
        let gateway = ScriptedGateway::answering(vec![
            Outcome::Failure(FailureReason::Status(400)),
            Outcome::Success(json!({"token": "not-a-jwt"})),
        ]);
        let console = Console::anonymous(gateway);

        console.engine.dispatch_and_wait(login()).await.unwrap();
        assert_eq!(console.engine.snapshot().auth, AuthSlice::Rejected);
        assert!(console.credentials.get().is_none());

        // A token without readable claims is refused as well.
        console.engine.dispatch_and_wait(login()).await.unwrap();
        assert_eq!(console.engine.snapshot().auth, AuthSlice::Rejected);
        assert!(console.credentials.get().is_none());
        assert_eq!(console.engine.guard().invalidations(), 0);
    }

    #[tokio::test]
    async fn test_unauthorized_login_still_signals_navigation() {
        let gateway = ScriptedGateway::answering(vec![Outcome::Unauthorized]);
        let console = Console::anonymous(gateway);
        let mut navigations = console.navigator.subscribe();

        console.engine.dispatch_and_wait(login()).await.unwrap();

        assert_eq!(navigations.recv().await.unwrap(), Navigation::Login);
        assert_eq!(console.engine.guard().invalidations(), 1);
        assert!(console.credentials.get().is_none());
    }

    #[tokio::test]
    async fn test_entering_login_drops_stored_session() {
        let console = Console::signed_in("S1", ScriptedGateway::new());
        assert!(console.credentials.is_authenticated());

        console.engine.enter_login().unwrap();

        assert!(console.credentials.get().is_none());
        assert_eq!(console.credentials.storage().peek(), None);
        assert_eq!(console.engine.scope(), None);
    }

    // =========================================================================
    // LOGOUT
    // =========================================================================

    #[tokio::test]
    async fn test_logout_resets_every_slice() {
        let gateway = ScriptedGateway::answering(vec![Outcome::Success(json!({
            "data": [{"code": "P1", "name": "Boot"}],
            "count": 1
        }))]);
        let console = Console::signed_in("S1", gateway);
        let mut presence = console.credentials.subscribe();

        console
            .engine
            .dispatch_and_wait(Intent::FetchList {
                kind: EntityKind::Product,
                page: PaginationRequest::first(StoreId::from("S1"), 20).unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(
            console.engine.snapshot().slice(EntityKind::Product).unwrap().status,
            SliceStatus::Success
        );

        console.engine.dispatch_and_wait(Intent::Logout).await.unwrap();

        let store = console.engine.snapshot();
        assert_eq!(store, EntityStore::new(None));
        assert!(console.credentials.get().is_none());
        assert!(presence.has_changed().unwrap());
        assert!(!*presence.borrow_and_update());
        // Logout is not an invalidation.
        assert_eq!(console.navigator.signals(), 0);
        assert_eq!(console.gateway.calls().len(), 1);
    }

    // =========================================================================
    // COLD START
    // =========================================================================

    #[tokio::test]
    async fn test_restored_session_seeds_auth_slice() {
        let console = Console::signed_in("S4", ScriptedGateway::new());
        assert_eq!(
            console.engine.snapshot().auth,
            AuthSlice::Authenticated {
                store_id: StoreId::from("S4")
            }
        );
    }

    #[tokio::test]
    async fn test_corrupt_stored_token_is_cleared_at_start() {
        let console = Console::start(
            MemoryTokenStorage::with_token("garbage"),
            ScriptedGateway::new(),
        );
        assert!(console.credentials.get().is_none());
        assert_eq!(console.credentials.storage().peek(), None);
        assert_eq!(console.engine.snapshot().auth, AuthSlice::Anonymous);
    }

    // =========================================================================
    // PERSISTENCE
    // =========================================================================

    fn file_config(dir: &tempfile::TempDir) -> ConsoleConfig {
        let mut config = ConsoleConfig::default();
        config.session.token_path = dir.path().join("session").join("access_token");
        config
    }

    #[tokio::test]
    async fn test_session_survives_restart_and_logout_is_durable() {
        let dir = tempfile::tempdir().unwrap();
        let config = file_config(&dir);
        FileTokenStorage::new(&config.session.token_path)
            .save(&jwt("S2"))
            .unwrap();

        let engine = ConsoleContainer::from_config(&config)
            .unwrap()
            .start()
            .unwrap();
        assert_eq!(engine.scope(), Some(StoreId::from("S2")));

        engine.dispatch_and_wait(Intent::Logout).await.unwrap();
        engine.shutdown().await;

        let storage = FileTokenStorage::new(&config.session.token_path);
        assert_eq!(storage.load().unwrap(), None);

        let restarted = ConsoleContainer::from_config(&config)
            .unwrap()
            .start()
            .unwrap();
        assert_eq!(restarted.scope(), None);
        assert_eq!(restarted.snapshot().auth, AuthSlice::Anonymous);
        restarted.shutdown().await;
    }

    #[tokio::test]
    async fn test_snapshot_watch_sees_each_change() {
        let gateway = ScriptedGateway::answering(vec![Outcome::Success(json!({"code": "O1"}))]);
        let console = Console::signed_in("S1", gateway);
        let mut snapshots = console.engine.watch();
        snapshots.borrow_and_update();

        console
            .engine
            .dispatch_and_wait(Intent::FetchDetail {
                kind: EntityKind::Order,
                scope: StoreId::from("S1"),
                id: "O1".into(),
            })
            .await
            .unwrap();

        assert!(snapshots.has_changed().unwrap());
        let store = snapshots.borrow_and_update().clone();
        let detail = store.slice(EntityKind::Order).unwrap().detail.record().cloned();
        assert_eq!(detail.and_then(|r| r.code().map(str::to_string)), Some("O1".into()));
    }
}
