//! # Engine Scenarios
//!
//! End-to-end runs through the engine: intent → orchestrator → scripted
//! gateway → engine loop → entity store snapshot.
//!
//! ## Flows Tested:
//!
//! 1. **List fetch**: a settled page replaces the slice's list
//! 2. **Status patch**: the matching item is updated in place, no refetch
//! 3. **Unauthorized**: any 401 clears the session and signals navigation
//! 4. **Local validation**: a Submit missing required fields never leaves the engine
//! 5. **Settle order**: the call that settles last wins

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sf_02_request_gateway::Method;
    use sf_03_entity_store::{AuthSlice, Detail, SliceStatus};
    use sf_04_effect_orchestrator::DispatchError;
    use sf_05_session_guard::Navigation;
    use shared_bus::{EventFilter, SyncEvent};
    use shared_types::{
        EntityKind, FailureReason, Intent, MediaFile, Outcome, PaginationRequest, Record,
        ReferenceData, StoreId, SubmitMode,
    };

    use sf_01_credential_store::CredentialStore;

    use console_runtime::cli::{execute, Command};

    use crate::fixtures::{jwt, Console, ScriptedGateway};

    fn scope() -> StoreId {
        StoreId::from("S")
    }

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    // =========================================================================
    // LIST FETCH
    // =========================================================================

    #[tokio::test]
    async fn test_category_list_fills_slice() {
        let gateway = ScriptedGateway::answering(vec![Outcome::Success(json!({
            "data": [{"code": "C1", "name": "Shoes", "level": 1}],
            "count": 1
        }))]);
        let console = Console::signed_in("S", gateway);

        console
            .engine
            .dispatch_and_wait(Intent::FetchList {
                kind: EntityKind::Category,
                page: PaginationRequest::new(scope(), 200, 1).unwrap(),
            })
            .await
            .unwrap();

        let store = console.engine.snapshot();
        let slice = store.slice(EntityKind::Category).unwrap();
        assert_eq!(slice.status, SliceStatus::Success);
        assert_eq!(slice.list.total_count, 1);
        assert_eq!(slice.list.items.len(), 1);
        assert_eq!(slice.list.items[0].code(), Some("C1"));
        assert_eq!(slice.list.items[0].get_str("name"), Some("Shoes"));
        assert_eq!(slice.list.page_count(), 1);

        let calls = console.gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Get);
        assert_eq!(calls[0].path, "/categories");
        assert_eq!(calls[0].query_value("storeId"), Some("S"));
        assert_eq!(calls[0].query_value("pageSize"), Some("200"));
        assert_eq!(calls[0].query_value("pageNo"), Some("1"));
    }

    #[tokio::test]
    async fn test_list_page_count_rounds_up() {
        let items: Vec<_> = (0..20).map(|i| json!({"code": format!("P{i}")})).collect();
        let gateway =
            ScriptedGateway::answering(vec![Outcome::Success(json!({"data": items, "count": 41}))]);
        let console = Console::signed_in("S", gateway);

        console
            .engine
            .dispatch_and_wait(Intent::FetchList {
                kind: EntityKind::Product,
                page: PaginationRequest::first(scope(), 20).unwrap(),
            })
            .await
            .unwrap();

        let store = console.engine.snapshot();
        assert_eq!(store.slice(EntityKind::Product).unwrap().list.page_count(), 3);
    }

    #[tokio::test]
    async fn test_failed_list_marks_error_and_keeps_items() {
        let gateway = ScriptedGateway::answering(vec![
            Outcome::Success(json!({"data": [{"code": "O1"}], "count": 1})),
            Outcome::Failure(FailureReason::Status(500)),
        ]);
        let console = Console::signed_in("S", gateway);
        let page = PaginationRequest::first(scope(), 20).unwrap();

        for _ in 0..2 {
            console
                .engine
                .dispatch_and_wait(Intent::FetchList {
                    kind: EntityKind::Order,
                    page: page.clone(),
                })
                .await
                .unwrap();
        }

        let store = console.engine.snapshot();
        let slice = store.slice(EntityKind::Order).unwrap();
        assert_eq!(slice.status, SliceStatus::Error);
        assert_eq!(slice.list.items.len(), 1);
        // A server error is not a session problem.
        assert_eq!(console.engine.guard().invalidations(), 0);
        assert!(console.credentials.is_authenticated());
    }

    // =========================================================================
    // STATUS PATCH
    // =========================================================================

    #[tokio::test]
    async fn test_status_update_patches_item_in_place() {
        let gateway = ScriptedGateway::answering(vec![
            Outcome::Success(json!({
                "data": [
                    {"code": "S0", "name": "Zeta", "status": "active"},
                    {"code": "S1", "name": "Acme", "status": "active"},
                    {"code": "S2", "name": "Beta", "status": "active"}
                ],
                "count": 3
            })),
            Outcome::Success(serde_json::Value::Null),
        ]);
        let console = Console::signed_in("S", gateway);

        console
            .engine
            .dispatch_and_wait(Intent::FetchList {
                kind: EntityKind::Supplier,
                page: PaginationRequest::first(scope(), 20).unwrap(),
            })
            .await
            .unwrap();
        let before = console.engine.snapshot();

        console
            .engine
            .dispatch_and_wait(Intent::UpdateStatus {
                kind: EntityKind::Supplier,
                scope: scope(),
                id: "S1".into(),
                status: "inactive".into(),
            })
            .await
            .unwrap();

        let after = console.engine.snapshot();
        let old = &before.slice(EntityKind::Supplier).unwrap().list.items;
        let new = &after.slice(EntityKind::Supplier).unwrap().list.items;

        let codes: Vec<_> = new.iter().map(|item| item.code()).collect();
        assert_eq!(codes, vec![Some("S0"), Some("S1"), Some("S2")]);
        assert_eq!(new[1].status(), Some("inactive"));
        assert_eq!(new[0], old[0]);
        assert_eq!(new[2], old[2]);

        // One list fetch, one patch; no refetch.
        let calls = console.gateway.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].method, Method::Patch);
        assert_eq!(calls[1].path, "/suppliers/S1");
        assert_eq!(
            calls[1].body,
            Some(json!({"storeId": "S", "status": "inactive"}))
        );
    }

    // =========================================================================
    // UNAUTHORIZED
    // =========================================================================

    #[tokio::test]
    async fn test_unauthorized_clears_session_for_every_operation() {
        let console = Console::signed_in("S", ScriptedGateway::new());
        let mut navigations = console.navigator.subscribe();

        let intents = vec![
            Intent::FetchList {
                kind: EntityKind::Manufacturer,
                page: PaginationRequest::first(scope(), 20).unwrap(),
            },
            Intent::FetchDetail {
                kind: EntityKind::Product,
                scope: scope(),
                id: "P1".into(),
            },
            Intent::UpdateStatus {
                kind: EntityKind::Order,
                scope: scope(),
                id: "O1".into(),
                status: "shipped".into(),
            },
            Intent::Submit {
                kind: EntityKind::Category,
                scope: scope(),
                mode: SubmitMode::Create,
                payload: record(json!({"name": "Hats"})),
            },
            Intent::UploadMedia {
                file: MediaFile {
                    file_name: "logo.png".into(),
                    content_type: Some("image/png".into()),
                    bytes: vec![1, 2, 3],
                },
            },
            Intent::FetchReference {
                data: ReferenceData::Currencies,
            },
        ];

        for (round, intent) in intents.into_iter().enumerate() {
            console
                .credentials
                .set(shared_types::SessionToken::new(jwt("S")))
                .unwrap();
            console.gateway.push(Outcome::Unauthorized);

            let settled = console.engine.dispatch_and_wait(intent).await.unwrap();
            assert!(settled.is_unauthorized());

            assert!(console.credentials.get().is_none(), "round {round}");
            assert_eq!(navigations.recv().await.unwrap(), Navigation::Login);
            assert_eq!(console.engine.guard().invalidations(), round as u64 + 1);
            assert_eq!(console.engine.snapshot().auth, AuthSlice::Expired);
        }
        assert_eq!(console.navigator.signals(), 6);
    }

    #[tokio::test]
    async fn test_unauthorized_returns_pending_slice_to_idle() {
        let gateway = ScriptedGateway::answering(vec![Outcome::Unauthorized]);
        let console = Console::signed_in("S", gateway);
        let mut invalidated = console.engine.subscribe(EventFilter::all());

        console
            .engine
            .dispatch_and_wait(Intent::FetchDetail {
                kind: EntityKind::Product,
                scope: scope(),
                id: "P1".into(),
            })
            .await
            .unwrap();

        let store = console.engine.snapshot();
        let slice = store.slice(EntityKind::Product).unwrap();
        assert_eq!(slice.status, SliceStatus::Idle);
        assert_eq!(slice.detail, Detail::Empty);

        // The invalidation directly follows the outcome on the bus.
        let mut previous = None;
        loop {
            let event = invalidated.recv().await.unwrap();
            if event == SyncEvent::SessionInvalidated {
                break;
            }
            previous = Some(event);
        }
        assert!(previous.is_some_and(|event| event.is_unauthorized()));
    }

    // =========================================================================
    // LOCAL VALIDATION
    // =========================================================================

    #[tokio::test]
    async fn test_submit_missing_field_never_reaches_gateway() {
        let console = Console::signed_in("S", ScriptedGateway::new());
        let status_before = console
            .engine
            .snapshot()
            .slice(EntityKind::Manufacturer)
            .unwrap()
            .status;

        let result = console
            .engine
            .dispatch_and_wait(Intent::Submit {
                kind: EntityKind::Manufacturer,
                scope: scope(),
                mode: SubmitMode::Create,
                payload: record(json!({
                    "name": "Acme",
                    "countryId": "VN",
                    "address": "1 Main St"
                })),
            })
            .await;

        let Err(DispatchError::Validation(error)) = result else {
            panic!("expected a validation error, got {result:?}");
        };
        assert_eq!(error.kind, EntityKind::Manufacturer);
        assert_eq!(error.missing, vec!["contact".to_string()]);

        assert!(console.gateway.calls().is_empty());
        let store = console.engine.snapshot();
        let slice = store.slice(EntityKind::Manufacturer).unwrap();
        assert_eq!(slice.status, status_before);
        assert!(slice.field_errors.contains_key("contact"));
        assert_eq!(slice.field_errors.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_string_counts_as_missing() {
        let console = Console::signed_in("S", ScriptedGateway::new());

        let result = console
            .engine
            .dispatch_and_wait(Intent::Submit {
                kind: EntityKind::Order,
                scope: scope(),
                mode: SubmitMode::Update { id: "O1".into() },
                payload: record(json!({
                    "customerName": "   ",
                    "customerContact": "ann@example.com",
                    "shippingAddress": "A",
                    "billingAddress": null
                })),
            })
            .await;

        let Err(DispatchError::Validation(error)) = result else {
            panic!("expected a validation error");
        };
        assert_eq!(
            error.missing,
            vec!["customerName".to_string(), "billingAddress".to_string()]
        );
        assert!(console.gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_successful_submit_clears_field_errors() {
        let gateway = ScriptedGateway::answering(vec![Outcome::Success(
            json!({"code": "M1", "name": "Acme", "contact": "x", "countryId": "VN", "address": "A"}),
        )]);
        let console = Console::signed_in("S", gateway);

        let incomplete = record(json!({"name": "Acme"}));
        let _ = console
            .engine
            .dispatch_and_wait(Intent::Submit {
                kind: EntityKind::Manufacturer,
                scope: scope(),
                mode: SubmitMode::Create,
                payload: incomplete,
            })
            .await;
        assert_eq!(
            console
                .engine
                .snapshot()
                .slice(EntityKind::Manufacturer)
                .unwrap()
                .field_errors
                .len(),
            3
        );

        let complete = record(json!({
            "name": "Acme", "contact": "x", "countryId": "VN", "address": "A"
        }));
        console
            .engine
            .dispatch_and_wait(Intent::Submit {
                kind: EntityKind::Manufacturer,
                scope: scope(),
                mode: SubmitMode::Create,
                payload: complete,
            })
            .await
            .unwrap();

        let store = console.engine.snapshot();
        let slice = store.slice(EntityKind::Manufacturer).unwrap();
        assert!(slice.field_errors.is_empty());
        assert_eq!(slice.status, SliceStatus::Success);
        assert_eq!(slice.detail.record().and_then(Record::code), Some("M1"));

        let calls = console.gateway.calls();
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[0].path, "/manufacturers");
        assert_eq!(
            calls[0].body.as_ref().and_then(|b| b.get("storeId")),
            Some(&json!("S"))
        );
    }

    // =========================================================================
    // SETTLE ORDER
    // =========================================================================

    #[tokio::test]
    async fn test_last_settled_detail_wins() {
        let console = Console::signed_in("S", ScriptedGateway::new());
        let detail = || Intent::FetchDetail {
            kind: EntityKind::Product,
            scope: scope(),
            id: "P1".into(),
        };

        let first = console.engine.dispatch(detail()).unwrap();
        let second = console.engine.dispatch(detail()).unwrap();
        console.gateway.wait_held(2).await;

        let mut first_settled = console.engine.subscribe(EventFilter::intent(first.intent_id));
        let mut second_settled = console.engine.subscribe(EventFilter::intent(second.intent_id));

        // The later call answers first.
        console
            .gateway
            .release(1, Outcome::Success(json!({"code": "P1", "name": "second"})));
        second_settled.settled().await.unwrap();
        console
            .gateway
            .release(0, Outcome::Success(json!({"code": "P1", "name": "first"})));
        first_settled.settled().await.unwrap();

        let store = console.engine.snapshot();
        let slice = store.slice(EntityKind::Product).unwrap();
        assert_eq!(slice.status, SliceStatus::Success);
        assert_eq!(
            slice.detail.record().and_then(|r| r.get_str("name")),
            Some("first")
        );
        assert_eq!(console.gateway.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_clear_detail_is_idempotent() {
        let gateway =
            ScriptedGateway::answering(vec![Outcome::Success(json!({"code": "S1", "name": "Acme"}))]);
        let console = Console::signed_in("S", gateway);

        console
            .engine
            .dispatch_and_wait(Intent::FetchDetail {
                kind: EntityKind::Supplier,
                scope: scope(),
                id: "S1".into(),
            })
            .await
            .unwrap();

        let clear = || Intent::ClearDetail {
            kind: EntityKind::Supplier,
        };
        console.engine.dispatch_and_wait(clear()).await.unwrap();
        let once = console.engine.snapshot();
        console.engine.dispatch_and_wait(clear()).await.unwrap();
        let twice = console.engine.snapshot();

        assert_eq!(once, twice);
        let slice = once.slice(EntityKind::Supplier).unwrap();
        assert_eq!(slice.detail, Detail::Empty);
        assert_eq!(console.gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_events_for_other_kinds_leave_slice_untouched() {
        let gateway = ScriptedGateway::answering(vec![Outcome::Success(
            json!({"data": [{"code": "C1"}], "count": 1}),
        )]);
        let console = Console::signed_in("S", gateway);
        let before = console.engine.snapshot();

        console
            .engine
            .dispatch_and_wait(Intent::FetchList {
                kind: EntityKind::Category,
                page: PaginationRequest::first(scope(), 200).unwrap(),
            })
            .await
            .unwrap();

        let after = console.engine.snapshot();
        for kind in EntityKind::ALL {
            if kind != EntityKind::Category {
                assert_eq!(before.slice(kind), after.slice(kind), "{kind} changed");
            }
        }
    }

    // =========================================================================
    // REFERENCE DATA AND MEDIA
    // =========================================================================

    #[tokio::test]
    async fn test_reference_and_upload_fill_public_slice() {
        let gateway = ScriptedGateway::answering(vec![
            Outcome::Success(json!([{"code": "VN", "name": "Vietnam"}])),
            Outcome::Success(json!({"data": [{"code": "USD"}, {"code": "EUR"}]})),
            Outcome::Success(json!({"path": "uploads/logo.png"})),
        ]);
        let console = Console::anonymous(gateway);

        for data in [ReferenceData::Countries, ReferenceData::Currencies] {
            console
                .engine
                .dispatch_and_wait(Intent::FetchReference { data })
                .await
                .unwrap();
        }
        console
            .engine
            .dispatch_and_wait(Intent::UploadMedia {
                file: MediaFile {
                    file_name: "logo.png".into(),
                    content_type: None,
                    bytes: vec![0; 4],
                },
            })
            .await
            .unwrap();

        let store = console.engine.snapshot();
        assert_eq!(store.public.reference(ReferenceData::Countries).len(), 1);
        assert_eq!(store.public.reference(ReferenceData::Currencies).len(), 2);
        let media = store.public.uploaded_file.clone().unwrap();
        assert_eq!(
            media.resolve(&console.config.media.media_file_domain),
            "http://localhost:3000/media/uploads/logo.png"
        );
        assert_eq!(console.gateway.uploads().len(), 1);

        // Entity slices are not touched by public data.
        for kind in EntityKind::ALL {
            assert_eq!(store.slice(kind).unwrap().status, SliceStatus::Idle);
        }
    }

    // =========================================================================
    // LOGO UPLOAD
    // =========================================================================

    #[tokio::test]
    async fn test_submit_with_logo_uploads_then_references_it() {
        let gateway = ScriptedGateway::answering(vec![
            Outcome::Success(json!({"path": "uploads/acme.png"})),
            Outcome::Success(json!({"code": "M1", "name": "Acme", "logo": "uploads/acme.png"})),
        ]);
        let console = Console::signed_in("S", gateway);

        let dir = tempfile::tempdir().unwrap();
        let payload = dir.path().join("acme.json");
        std::fs::write(
            &payload,
            r#"{"name": "Acme", "contact": "Ann", "countryId": 1, "address": "Main St"}"#,
        )
        .unwrap();
        let logo = dir.path().join("acme.png");
        std::fs::write(&logo, b"\x89PNG").unwrap();

        let command = Command::Submit {
            kind: EntityKind::Manufacturer,
            file: payload,
            id: None,
            logo: Some(logo),
        };
        let view = execute(command, &console.engine, &console.config).await.unwrap();

        assert_eq!(console.gateway.uploads().len(), 1);
        let calls = console.gateway.calls();
        assert_eq!((calls[0].method, calls[0].path.as_str()), (Method::Post, "/manufacturers"));
        assert_eq!(
            calls[0].body.as_ref().and_then(|body| body.get("logo")),
            Some(&json!("uploads/acme.png"))
        );
        assert_eq!(view["logoUrl"], json!("http://localhost:3000/media/uploads/acme.png"));
        assert_eq!(view["status"], json!("success"));
    }

    #[tokio::test]
    async fn test_upload_refused_without_local_media() {
        let mut console = Console::signed_in("S", ScriptedGateway::new());
        console.config.media.save_media_file_local = false;

        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("acme.png");
        std::fs::write(&logo, b"\x89PNG").unwrap();

        let err = execute(Command::Upload { file: logo }, &console.engine, &console.config)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("save_media_file_local"));
        assert!(console.gateway.uploads().is_empty());
    }
}
