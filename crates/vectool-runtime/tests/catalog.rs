//! The tool catalog through the dispatcher, against the in-memory store.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};

use vectool_runtime::{
    build_registry, catalog_tools, CatalogOptions, CollectionPreset, RegistryBuilder, RuntimeError,
};
use vectool_store_memory::MemoryStore;
use vectool_types::ErrorKind;

use common::catalog_dispatcher;

const EXPECTED_TOOLS: [&str; 13] = [
    "ai_rewrite_query",
    "ai_suggest_schema",
    "count_documents",
    "create_collection",
    "delete_collection",
    "delete_document",
    "get_collection_info",
    "get_document",
    "insert_documents",
    "list_collections",
    "list_documents",
    "query",
    "search",
];

#[test]
fn catalog_registers_every_tool_sorted() {
    let registry = build_registry(Arc::new(MemoryStore::new()), &CatalogOptions::default())
        .expect("registry");
    let names: Vec<_> = registry.list().iter().map(|t| t.name().to_string()).collect();
    assert_eq!(names, EXPECTED_TOOLS);
}

#[test]
fn registering_catalog_twice_fails() {
    let store = Arc::new(MemoryStore::new());
    let options = CatalogOptions::default();
    let mut builder = RegistryBuilder::new();
    builder
        .register_all(catalog_tools(store.clone(), &options))
        .expect("first pass");
    let err = builder
        .register_all(catalog_tools(store, &options))
        .unwrap_err();
    assert!(matches!(err, RuntimeError::DuplicateTool { .. }));
}

#[test]
fn schemas_declare_required_fields() {
    let registry = build_registry(Arc::new(MemoryStore::new()), &CatalogOptions::default())
        .expect("registry");
    let search = registry.get("search").expect("search");
    assert_eq!(search.input_schema()["required"], json!(["collection", "query"]));
    assert_eq!(search.input_schema()["properties"]["limit"]["default"], json!(10));

    let list = registry.get("list_collections").expect("list");
    assert!(list.input_schema().get("required").is_none());
}

#[tokio::test]
async fn docs_scenario_through_dispatcher() {
    let d = catalog_dispatcher(CatalogOptions::default());

    let created = d
        .invoke("create_collection", json!({"name": "Docs", "type": "text"}))
        .await
        .expect("create");
    assert_eq!(created, json!({"created": "Docs"}));

    let inserted = d
        .invoke(
            "insert_documents",
            json!({
                "collection": "Docs",
                "documents": [
                    {"url": "https://a", "text": "alpha"},
                    {"url": "https://b", "text": "beta"}
                ]
            }),
        )
        .await
        .expect("insert");
    assert_eq!(inserted["inserted"], json!(2));
    let ids = inserted["ids"].as_array().expect("ids");
    assert_ne!(ids[0], ids[1]);

    let count = d
        .invoke("count_documents", json!({"collection": "Docs"}))
        .await
        .expect("count");
    assert_eq!(count, json!({"collection": "Docs", "count": 2}));

    let found = d
        .invoke("search", json!({"collection": "Docs", "query": "alpha", "limit": 10}))
        .await
        .expect("search");
    let results = found["results"].as_array().expect("results");
    assert_eq!(results.len(), 2);
    let score = |url: &str| -> f64 {
        results
            .iter()
            .find(|r| r["document"]["url"] == url)
            .and_then(|r| r["score"].as_f64())
            .expect("score")
    };
    assert!(score("https://a") >= score("https://b"));

    d.invoke("delete_collection", json!({"name": "Docs"}))
        .await
        .expect("delete");
    let err = d
        .invoke("get_collection_info", json!({"collection": "Docs"}))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn duplicate_create_is_already_exists() {
    let d = catalog_dispatcher(CatalogOptions::default());
    d.invoke("create_collection", json!({"name": "c"})).await.expect("create");
    d.invoke(
        "insert_documents",
        json!({"collection": "c", "documents": [{"text": "x"}]}),
    )
    .await
    .expect("insert");

    let err = d
        .invoke("create_collection", json!({"name": "c"}))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AlreadyExists);

    let info = d
        .invoke("get_collection_info", json!({"collection": "c"}))
        .await
        .expect("info");
    assert_eq!(info["document_count"], json!(1));
    assert_eq!(info["type"], json!("text"));
}

#[tokio::test]
async fn document_crud() {
    let d = catalog_dispatcher(CatalogOptions::default());
    d.invoke("create_collection", json!({"name": "c"})).await.expect("create");
    d.invoke(
        "insert_documents",
        json!({"collection": "c", "documents": [
            {"id": "d1", "url": "https://one", "text": "one", "metadata": {"lang": "en"}},
            {"id": "d2", "url": "https://two", "text": "two"}
        ]}),
    )
    .await
    .expect("insert");

    let doc = d
        .invoke("get_document", json!({"collection": "c", "id": "d1"}))
        .await
        .expect("get");
    assert_eq!(doc["url"], json!("https://one"));
    assert_eq!(doc["metadata"]["lang"], json!("en"));

    let listed = d
        .invoke("list_documents", json!({"collection": "c", "limit": 1}))
        .await
        .expect("list");
    assert_eq!(listed["count"], json!(1));

    let deleted = d
        .invoke("delete_document", json!({"collection": "c", "id": "d1"}))
        .await
        .expect("delete");
    assert_eq!(deleted, json!({"deleted": "d1"}));

    let err = d
        .invoke("get_document", json!({"collection": "c", "id": "d1"}))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let collections = d.invoke("list_collections", Value::Null).await.expect("list");
    assert_eq!(collections, json!({"collections": ["c"]}));
}

#[tokio::test]
async fn query_reports_query_and_total() {
    let d = catalog_dispatcher(CatalogOptions::default());
    d.invoke("create_collection", json!({"name": "c"})).await.expect("create");
    d.invoke(
        "insert_documents",
        json!({"collection": "c", "documents": [{"text": "a"}, {"text": "b"}, {"text": "c"}]}),
    )
    .await
    .expect("insert");
    let out = d
        .invoke("query", json!({"collection": "c", "query": "a", "limit": 2}))
        .await
        .expect("query");
    assert_eq!(out["query"], json!("a"));
    assert_eq!(out["total"], json!(2));
    assert_eq!(out["results"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn handler_argument_rules() {
    let d = catalog_dispatcher(CatalogOptions::default());
    d.invoke("create_collection", json!({"name": "c"})).await.expect("create");

    let cases = [
        ("create_collection", json!({"name": ""}), "'name'"),
        ("search", json!({"collection": "c", "query": "q", "limit": 0}), "'limit'"),
        ("search", json!({"collection": "c", "query": "  "}), "'query'"),
        ("insert_documents", json!({"collection": "c", "documents": [1]}), "documents[0]"),
        ("list_documents", json!({"collection": "c", "offset": -2}), "'offset'"),
        ("create_collection", json!({"name": "x", "preset": "nope"}), "'preset'"),
    ];
    for (tool, args, field) in cases {
        let err = d.invoke(tool, args).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument, "{tool}");
        assert!(err.message.contains(field), "{tool}: {}", err.message);
    }
}

#[tokio::test]
async fn presets_fill_type_and_description() {
    let mut presets = HashMap::new();
    presets.insert(
        "gallery".to_string(),
        CollectionPreset {
            kind: "image".into(),
            description: "Photo gallery".into(),
        },
    );
    let d = catalog_dispatcher(CatalogOptions {
        presets,
        ..CatalogOptions::default()
    });

    d.invoke("create_collection", json!({"name": "pics", "preset": "gallery"}))
        .await
        .expect("create");
    let info = d
        .invoke("get_collection_info", json!({"collection": "pics"}))
        .await
        .expect("info");
    assert_eq!(info["type"], json!("image"));
    assert_eq!(info["description"], json!("Photo gallery"));

    d.invoke(
        "create_collection",
        json!({"name": "mixed", "preset": "gallery", "description": "Explicit"}),
    )
    .await
    .expect("create");
    let info = d
        .invoke("get_collection_info", json!({"collection": "mixed"}))
        .await
        .expect("info");
    assert_eq!(info["type"], json!("image"));
    assert_eq!(info["description"], json!("Explicit"));
}

#[tokio::test]
async fn missing_collection_is_not_found_for_every_collection_tool() {
    let d = catalog_dispatcher(CatalogOptions::default());
    let calls = [
        ("delete_collection", json!({"name": "ghost"})),
        ("insert_documents", json!({"collection": "ghost", "documents": []})),
        ("list_documents", json!({"collection": "ghost"})),
        ("count_documents", json!({"collection": "ghost"})),
        ("get_document", json!({"collection": "ghost", "id": "x"})),
        ("delete_document", json!({"collection": "ghost", "id": "x"})),
        ("search", json!({"collection": "ghost", "query": "x"})),
        ("query", json!({"collection": "ghost", "query": "x"})),
        ("get_collection_info", json!({"collection": "ghost"})),
    ];
    for (tool, args) in calls {
        let err = d.invoke(tool, args).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound, "{tool}");
    }
}

#[cfg(unix)]
#[tokio::test]
async fn assist_tool_returns_command_output() {
    let d = catalog_dispatcher(CatalogOptions {
        assist: vectool_runtime::AssistCommand {
            program: "sh".into(),
            args: vec!["-c".into(), "echo suggested".into(), "sh".into()],
        },
        ..CatalogOptions::default()
    });
    let out = d
        .invoke("ai_suggest_schema", json!({"description": "product reviews"}))
        .await
        .expect("assist");
    assert_eq!(out, json!({"output": "suggested\n"}));
}

#[tokio::test]
async fn assist_tool_without_binary_is_fatal() {
    let d = catalog_dispatcher(CatalogOptions {
        assist: vectool_runtime::AssistCommand {
            program: "vectool-missing-llm-cli".into(),
            args: vec![],
        },
        ..CatalogOptions::default()
    });
    let err = d
        .invoke("ai_rewrite_query", json!({"query": "cheap"}))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Fatal);
}
