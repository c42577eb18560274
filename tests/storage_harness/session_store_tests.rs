//! Macro-generated test suite for `SessionStore` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use kapi::storage::InMemorySessionStore;
//!
//! session_store_tests!(InMemorySessionStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## Sessions
//! - `test_create_and_get`: create then retrieve, creator is first participant
//! - `test_get_nonexistent`: unknown id returns None
//! - `test_add_participant`: participant appended and visible on the session
//!
//! ## Items
//! - `test_items_keep_submission_order`: lines listed in arrival order
//! - `test_items_tagged_with_participant`: participant id and name recorded
//! - `test_unknown_participant_rejected`: nothing stored
//! - `test_closed_session_rejects_items`: nothing stored, reads still work
//! - `test_unknown_session`: every operation reports NotFound
//!
//! ## Edge Cases
//! - `test_concurrent_submissions`: parallel submissions from spawned tasks

/// Generate a full `SessionStore` conformance test suite.
///
/// `$factory` is re-evaluated for each test. For the concurrent test the
/// store must also implement `Clone + 'static` (shared state via Arc).
#[macro_export]
macro_rules! session_store_tests {
    ($factory:expr) => {
        mod session_store_contract_tests {
            use super::*;
            use chrono::Duration;
            use kapi::core::error::{KapiError, SessionError};
            use kapi::core::service::SessionStore;
            use uuid::Uuid;

            // ==================================================================
            // Sessions
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let store = $factory;
                let session = create_test_session(Duration::hours(1));

                let created = store.create_session(session.clone()).await.unwrap();
                assert_eq!(created, session);

                let fetched = store.get_session(&session.id).await.unwrap();
                let fetched = fetched.expect("session should exist after create");
                assert_eq!(fetched.participants.len(), 1);
                assert_eq!(fetched.participants[0].name, "Meera");
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;
                assert!(store.get_session(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_add_participant() {
                let store = $factory;
                let session = store
                    .create_session(create_test_session(Duration::hours(1)))
                    .await
                    .unwrap();

                let guest = store
                    .add_participant(&session.id, "Ravi".to_string())
                    .await
                    .unwrap();
                let fetched = store.get_session(&session.id).await.unwrap().unwrap();

                assert_eq!(fetched.participants.len(), 2);
                assert_eq!(fetched.participants[1].id, guest.id);
                assert_eq!(fetched.participants[1].name, "Ravi");
            }

            // ==================================================================
            // Items
            // ==================================================================

            #[tokio::test]
            async fn test_items_keep_submission_order() {
                let store = $factory;
                let session = store
                    .create_session(create_test_session(Duration::hours(1)))
                    .await
                    .unwrap();
                let creator = session.participants[0].id;
                let guest = store
                    .add_participant(&session.id, "Ravi".to_string())
                    .await
                    .unwrap();

                store
                    .add_items(&session.id, &creator, vec![create_test_line("a", 1)])
                    .await
                    .unwrap();
                store
                    .add_items(
                        &session.id,
                        &guest.id,
                        vec![create_test_line("b", 2), create_test_line("a", 1)],
                    )
                    .await
                    .unwrap();

                let items = store.list_items(&session.id).await.unwrap();
                let order: Vec<(&str, &str)> = items
                    .iter()
                    .map(|i| (i.order_id.as_str(), i.participant_name.as_str()))
                    .collect();
                assert_eq!(order, vec![("a", "Meera"), ("b", "Ravi"), ("a", "Ravi")]);
            }

            #[tokio::test]
            async fn test_items_tagged_with_participant() {
                let store = $factory;
                let session = store
                    .create_session(create_test_session(Duration::hours(1)))
                    .await
                    .unwrap();
                let creator = session.participants[0].id;

                let stored = store
                    .add_items(
                        &session.id,
                        &creator,
                        vec![create_test_line_with_addon("c", 2, "Oat Milk", 1905)],
                    )
                    .await
                    .unwrap();

                assert_eq!(stored.len(), 1);
                assert_eq!(stored[0].participant_id, creator.to_string());
                assert_eq!(stored[0].participant_name, "Meera");
                assert_eq!(stored[0].addons[0].name, "Oat Milk");
                assert_eq!(stored[0].total, (25000 + 1905) * 2);
            }

            #[tokio::test]
            async fn test_unknown_participant_rejected() {
                let store = $factory;
                let session = store
                    .create_session(create_test_session(Duration::hours(1)))
                    .await
                    .unwrap();

                let err = store
                    .add_items(&session.id, &Uuid::new_v4(), vec![create_test_line("a", 1)])
                    .await
                    .unwrap_err();
                assert!(matches!(
                    err,
                    KapiError::Session(SessionError::ParticipantNotFound { .. })
                ));
                assert!(store.list_items(&session.id).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_closed_session_rejects_items() {
                let store = $factory;
                let session = store
                    .create_session(create_test_session(Duration::seconds(-1)))
                    .await
                    .unwrap();
                let creator = session.participants[0].id;

                let err = store
                    .add_items(&session.id, &creator, vec![create_test_line("a", 1)])
                    .await
                    .unwrap_err();
                assert!(matches!(err, KapiError::Session(SessionError::Closed { .. })));

                assert!(store.get_session(&session.id).await.unwrap().is_some());
                assert!(store.list_items(&session.id).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_unknown_session() {
                let store = $factory;
                let id = Uuid::new_v4();

                let not_found = |err: KapiError| {
                    matches!(err, KapiError::Session(SessionError::NotFound { .. }))
                };
                assert!(not_found(store.list_items(&id).await.unwrap_err()));
                assert!(not_found(
                    store.add_participant(&id, "Ravi".to_string()).await.unwrap_err()
                ));
                assert!(not_found(
                    store
                        .add_items(&id, &Uuid::new_v4(), vec![create_test_line("a", 1)])
                        .await
                        .unwrap_err()
                ));
            }

            // ==================================================================
            // Edge Cases
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_submissions() {
                let store = $factory;
                let session = store
                    .create_session(create_test_session(Duration::hours(1)))
                    .await
                    .unwrap();
                let creator = session.participants[0].id;

                let mut handles = Vec::new();
                for i in 0..10 {
                    let store = store.clone();
                    let session_id = session.id;
                    handles.push(tokio::spawn(async move {
                        store
                            .add_items(&session_id, &creator, vec![create_test_line(&format!("d{}", i), 1)])
                            .await
                    }));
                }
                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                assert_eq!(store.list_items(&session.id).await.unwrap().len(), 10);
            }
        }
    };
}
