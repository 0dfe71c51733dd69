//! Concurrent access to the reference store.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use vectool_store::{CallContext, VectorStore};
use vectool_store_memory::MemoryStore;
use vectool_types::Document;

#[tokio::test]
async fn generated_ids_are_distinct() {
    let store = MemoryStore::new();
    let ctx = CallContext::background();
    store.create_collection(&ctx, "c", "text", "").await.expect("create");

    let first = store.insert(&ctx, "c", vec![Document::new("u", "a")]).await.expect("first");
    let second = store.insert(&ctx, "c", vec![Document::new("u", "a")]).await.expect("second");
    assert!(!first[0].is_empty());
    assert!(!second[0].is_empty());
    assert_ne!(first[0], second[0]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_inserts_into_one_collection_lose_nothing() {
    let store = Arc::new(MemoryStore::new());
    let ctx = CallContext::background();
    store.create_collection(&ctx, "shared", "text", "").await.expect("create");

    let mut handles = Vec::new();
    for worker in 0..10 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let ctx = CallContext::background();
            for i in 0..10 {
                let id = format!("w{worker}-d{i}");
                store
                    .insert(&ctx, "shared", vec![Document::new("u", "t").with_id(id)])
                    .await
                    .expect("insert");
            }
        }));
    }
    for handle in handles {
        handle.await.expect("worker");
    }

    assert_eq!(store.count_documents(&ctx, "shared").await.expect("count"), 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_generated_ids_never_collide() {
    let store = Arc::new(MemoryStore::new());
    let ctx = CallContext::background();
    store.create_collection(&ctx, "c", "text", "").await.expect("create");

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let ctx = CallContext::background();
            let docs = (0..25).map(|_| Document::new("u", "t")).collect();
            store.insert(&ctx, "c", docs).await.expect("insert")
        }));
    }
    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.await.expect("worker") {
            assert!(ids.insert(id));
        }
    }
    assert_eq!(ids.len(), 200);
    assert_eq!(store.count_documents(&ctx, "c").await.expect("count"), 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn different_collections_do_not_serialise() {
    let store = Arc::new(MemoryStore::new());
    let ctx = CallContext::background();
    for name in ["left", "right"] {
        store.create_collection(&ctx, name, "text", "").await.expect("create");
    }

    let start = Instant::now();
    let tasks = ["left", "right"].map(|name| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let ctx = CallContext::background();
            for i in 0..500 {
                store
                    .insert(&ctx, name, vec![Document::new("u", format!("{i}"))])
                    .await
                    .expect("insert");
            }
        })
    });
    for task in tasks {
        task.await.expect("task");
    }

    assert!(start.elapsed() < Duration::from_secs(5));
    assert_eq!(store.count_documents(&ctx, "left").await.expect("left"), 500);
    assert_eq!(store.count_documents(&ctx, "right").await.expect("right"), 500);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn readers_and_writers_interleave() {
    let store = Arc::new(MemoryStore::new());
    let ctx = CallContext::background();
    store.create_collection(&ctx, "c", "text", "").await.expect("create");

    let writer = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let ctx = CallContext::background();
            for i in 0..200 {
                store
                    .insert(&ctx, "c", vec![Document::new("u", format!("alpha {i}"))])
                    .await
                    .expect("insert");
            }
        })
    };
    let reader = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let ctx = CallContext::background();
            let mut last = 0;
            for _ in 0..200 {
                let count = store.count_documents(&ctx, "c").await.expect("count");
                assert!(count >= last);
                last = count;
                store.search(&ctx, "c", "alpha", 5).await.expect("search");
            }
        })
    };
    writer.await.expect("writer");
    reader.await.expect("reader");
    assert_eq!(store.count_documents(&ctx, "c").await.expect("count"), 200);
}
