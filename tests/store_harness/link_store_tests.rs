//! Macro-generated conformance suite for `LinkStore` implementations
//!
//! Every generated test only links ids that exist and never repeats a pair,
//! so the suite holds in both integrity modes.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//! use treaty_links::storage::InMemoryLinkStore;
//!
//! link_store_tests!(InMemoryLinkStore::new());
//! ```

/// Generate the `LinkStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty store. It is re-evaluated for
/// each test.
#[macro_export]
macro_rules! link_store_tests {
    ($factory:expr) => {
        mod link_store_contract_tests {
            use super::*;
            use treaty_links::core::link::NewLink;
            use treaty_links::core::service::LinkStore;

            // ==================================================================
            // Contracts & exposure files
            // ==================================================================

            #[tokio::test]
            async fn test_create_then_get_contract() {
                let store = $factory;
                let input = new_contract("CNT-1", "A");

                let created = store.create_contract(input.clone()).await.unwrap();
                assert_eq!(created.id, 1);
                assert_eq!(created, input.into_contract(1));

                let fetched = store.get_contract(created.id).await.unwrap();
                assert_eq!(fetched, Some(created.clone()));
                assert_eq!(store.list_contracts().await.unwrap(), vec![created]);
            }

            #[tokio::test]
            async fn test_ids_are_unique_and_increasing() {
                let store = $factory;
                let (contracts, files) = populate(&store, 3, 2).await;

                let contract_ids: Vec<u64> = contracts.iter().map(|c| c.id).collect();
                let file_ids: Vec<u64> = files.iter().map(|f| f.id).collect();
                assert_eq!(contract_ids, vec![1, 2, 3]);
                assert_eq!(file_ids, vec![1, 2]);
            }

            #[tokio::test]
            async fn test_lists_keep_insertion_order() {
                let store = $factory;
                populate(&store, 0, 3).await;

                let labels: Vec<String> = store
                    .list_exposure_files()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|f| f.file_id)
                    .collect();
                assert_eq!(labels, vec!["F0001", "F0002", "F0003"]);
            }

            #[tokio::test]
            async fn test_get_unknown_ids() {
                let store = $factory;
                assert!(store.get_contract(999).await.unwrap().is_none());
                assert!(store.get_exposure_file(999).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_exposure_file_round_trip() {
                let store = $factory;
                let created = store
                    .create_exposure_file(new_exposure_file("803837"))
                    .await
                    .unwrap();
                let fetched = store.get_exposure_file(created.id).await.unwrap().unwrap();

                assert_eq!(fetched, created);
                assert_eq!(fetched.total_gwp, "1000.00");
                assert_eq!(fetched.exposure_by_country, r#"{"US": 60, "UK": 40}"#);
            }

            // ==================================================================
            // Links
            // ==================================================================

            #[tokio::test]
            async fn test_links_for_unknown_contract_are_empty() {
                let store = $factory;
                assert!(store.list_links_for_contract(42).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_create_list_delete_link() {
                let store = $factory;
                populate(&store, 1, 1).await;

                let link = store.create_link(NewLink::new(1, 1)).await.unwrap();
                assert_eq!(link.id, 1);

                let links = store.list_links_for_contract(1).await.unwrap();
                assert_eq!(links.len(), 1);
                assert_eq!(links[0].exposure_file_id, 1);

                let removed = store.delete_link(1, 1).await.unwrap();
                assert_eq!(removed, Some(link));
                assert!(store.list_links_for_contract(1).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_links_filtered_by_contract() {
                let store = $factory;
                populate(&store, 2, 3).await;

                store.create_link(NewLink::new(1, 1)).await.unwrap();
                store.create_link(NewLink::new(2, 1)).await.unwrap();
                store.create_link(NewLink::new(1, 3)).await.unwrap();

                let links = store.list_links_for_contract(1).await.unwrap();
                let files: Vec<u64> = links.iter().map(|l| l.exposure_file_id).collect();
                assert_eq!(files, vec![1, 3]);
                assert!(links.iter().all(|l| l.contract_id == 1));
            }

            #[tokio::test]
            async fn test_list_reflects_interleaved_creates_and_deletes() {
                let store = $factory;
                populate(&store, 1, 4).await;

                store.create_link(NewLink::new(1, 1)).await.unwrap();
                store.create_link(NewLink::new(1, 2)).await.unwrap();
                store.delete_link(1, 1).await.unwrap();
                store.create_link(NewLink::new(1, 3)).await.unwrap();
                store.create_link(NewLink::new(1, 4)).await.unwrap();
                store.delete_link(1, 3).await.unwrap();

                let mut files: Vec<u64> = store
                    .list_links_for_contract(1)
                    .await
                    .unwrap()
                    .iter()
                    .map(|l| l.exposure_file_id)
                    .collect();
                files.sort();
                assert_eq!(files, vec![2, 4]);
            }

            #[tokio::test]
            async fn test_delete_is_idempotent() {
                let store = $factory;
                populate(&store, 1, 2).await;
                store.create_link(NewLink::new(1, 1)).await.unwrap();
                store.create_link(NewLink::new(1, 2)).await.unwrap();

                store.delete_link(1, 1).await.unwrap();
                let after_first = store.list_links_for_contract(1).await.unwrap();

                let second = store.delete_link(1, 1).await.unwrap();
                assert!(second.is_none());
                assert_eq!(store.list_links_for_contract(1).await.unwrap(), after_first);
            }

            #[tokio::test]
            async fn test_delete_missing_link_is_noop() {
                let store = $factory;
                assert!(store.delete_link(7, 8).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_concurrent_link_creation_assigns_unique_ids() {
                let store = std::sync::Arc::new($factory);
                populate(store.as_ref(), 1, 20).await;

                let mut handles = Vec::new();
                for file_id in 1..=20u64 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store.create_link(NewLink::new(1, file_id)).await.unwrap()
                    }));
                }

                let mut ids = Vec::new();
                for handle in handles {
                    ids.push(handle.await.unwrap().id);
                }
                ids.sort();
                assert_eq!(ids, (1..=20).collect::<Vec<u64>>());
                assert_eq!(store.list_links_for_contract(1).await.unwrap().len(), 20);
            }
        }
    };
}
