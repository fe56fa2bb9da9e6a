//! Ingestion against a local feed server

use std::net::SocketAddr;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use salesboard_server::db::{create_pool, ensure_schema, TransactionRepo};
use salesboard_server::ingest::{IngestError, IngestReport, Ingestor};
use salesboard_server::readiness::IngestStatus;
use salesboard_server::{open_store, start_ingestion, ServerConfig};

fn feed() -> Value {
    json!([
        {
            "id": 1,
            "title": "Fjallraven  - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 329.85,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://example.com/1.jpg",
            "sold": false,
            "dateOfSale": "2021-11-27T20:29:54+05:30"
        },
        {
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts",
            "price": 44.6,
            "description": "Slim-fitting style, contrast raglan long sleeve.",
            "category": "men's clothing",
            "image": "https://example.com/2.jpg",
            "sold": true,
            "dateOfSale": "2021-10-27T20:29:54+05:30"
        },
        {
            "id": 3,
            "title": "Broken record",
            "price": "free",
            "description": "",
            "category": "electronics",
            "image": "",
            "sold": false,
            "dateOfSale": "2022-01-27T20:29:54+05:30"
        },
        {
            "id": 4,
            "title": "WD 2TB Elements Portable External Hard Drive",
            "price": 64,
            "description": "USB 3.0 and USB 2.0 compatibility",
            "category": "electronics",
            "image": "https://example.com/4.jpg",
            "sold": true,
            "dateOfSale": "2022-03-27T20:29:54+05:30"
        }
    ])
}

/// Serve `router` on an ephemeral localhost port.
async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn feed_server() -> SocketAddr {
    spawn(Router::new().route("/feed.json", get(|| async { Json(feed()) }))).await
}

async fn memory_store() -> sqlx::SqlitePool {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    ensure_schema(&pool).await.unwrap();
    pool
}

#[tokio::test]
async fn ingests_feed_and_skips_malformed_record() {
    let addr = feed_server().await;
    let pool = memory_store().await;

    let report = Ingestor::new(format!("http://{addr}/feed.json"))
        .run(&pool)
        .await
        .unwrap();

    assert_eq!(
        report,
        IngestReport {
            fetched: 4,
            inserted: 3,
            duplicates: 0,
            failed: 1
        }
    );

    let rows = TransactionRepo::new(&pool).list_all().await.unwrap();
    let mut ids: Vec<_> = rows.iter().map(|t| t.id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2, 4]);
    let drive = rows.iter().find(|t| t.id == 4).unwrap();
    assert_eq!(drive.price, 64.0);
    assert!(drive.sold);
}

#[tokio::test]
async fn reingesting_does_not_duplicate() {
    let addr = feed_server().await;
    let pool = memory_store().await;
    let ingestor = Ingestor::new(format!("http://{addr}/feed.json"));

    ingestor.run(&pool).await.unwrap();
    let first = TransactionRepo::new(&pool).count().await.unwrap();
    let report = ingestor.run(&pool).await.unwrap();
    let second = TransactionRepo::new(&pool).count().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(report.inserted, 0);
    assert_eq!(report.duplicates, 3);
}

#[tokio::test]
async fn non_success_status_abandons_ingestion() {
    let addr = spawn(Router::new().route(
        "/feed.json",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
    ))
    .await;
    let pool = memory_store().await;

    let err = Ingestor::new(format!("http://{addr}/feed.json"))
        .run(&pool)
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Status { status: 503, .. }));
    assert_eq!(TransactionRepo::new(&pool).count().await.unwrap(), 0);
}

#[tokio::test]
async fn object_body_abandons_ingestion() {
    let addr = spawn(Router::new().route(
        "/feed.json",
        get(|| async { Json(json!({"items": []})) }),
    ))
    .await;
    let pool = memory_store().await;

    let err = Ingestor::new(format!("http://{addr}/feed.json"))
        .run(&pool)
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::NotAnArray { found: "object" }));
}

#[tokio::test]
async fn startup_ingestion_opens_the_gate() {
    let addr = feed_server().await;
    let config = ServerConfig {
        database_url: "sqlite::memory:".into(),
        feed_url: format!("http://{addr}/feed.json"),
        ..Default::default()
    };

    let pool = open_store(&config).await.unwrap();
    let readiness = start_ingestion(&config, &pool);
    readiness.wait().await;

    match readiness.status() {
        IngestStatus::Completed { report } => assert_eq!(report.inserted, 3),
        other => panic!("unexpected status: {other:?}"),
    }
    assert_eq!(TransactionRepo::new(&pool).count().await.unwrap(), 3);
}

#[tokio::test]
async fn failed_startup_ingestion_still_opens_the_gate() {
    let addr = spawn(Router::new().route(
        "/feed.json",
        get(|| async { StatusCode::NOT_FOUND }),
    ))
    .await;
    let config = ServerConfig {
        database_url: "sqlite::memory:".into(),
        feed_url: format!("http://{addr}/feed.json"),
        ..Default::default()
    };

    let pool = open_store(&config).await.unwrap();
    let readiness = start_ingestion(&config, &pool);
    readiness.wait().await;

    assert!(matches!(readiness.status(), IngestStatus::Failed { .. }));
    assert_eq!(TransactionRepo::new(&pool).count().await.unwrap(), 0);
}

#[tokio::test]
async fn file_backed_store_survives_reopen() {
    let addr = feed_server().await;
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        database_url: format!("sqlite://{}", dir.path().join("transaction.db").display()),
        feed_url: format!("http://{addr}/feed.json"),
        ..Default::default()
    };

    let pool = open_store(&config).await.unwrap();
    Ingestor::new(config.feed_url.clone()).run(&pool).await.unwrap();
    pool.close().await;

    let pool = open_store(&config).await.unwrap();
    assert_eq!(TransactionRepo::new(&pool).count().await.unwrap(), 3);
}

async fn stalled_feed_server() -> SocketAddr {
    spawn(Router::new().route(
        "/feed.json",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Json(feed())
        }),
    ))
    .await
}

#[tokio::test]
async fn stalled_feed_times_out() {
    let addr = stalled_feed_server().await;
    let pool = memory_store().await;

    let err = Ingestor::new(format!("http://{addr}/feed.json"))
        .with_timeout(Duration::from_millis(200))
        .run(&pool)
        .await
        .unwrap_err();

    match err {
        IngestError::Http(e) => assert!(e.is_timeout(), "expected timeout, got {e}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn stalled_startup_ingestion_still_opens_the_gate() {
    let addr = stalled_feed_server().await;
    let config = ServerConfig {
        database_url: "sqlite::memory:".into(),
        feed_url: format!("http://{addr}/feed.json"),
        feed_timeout: Duration::from_millis(200),
        ..Default::default()
    };

    let pool = open_store(&config).await.unwrap();
    let readiness = start_ingestion(&config, &pool);
    tokio::time::timeout(Duration::from_secs(5), readiness.wait())
        .await
        .expect("gate opened after the feed timed out");

    assert!(matches!(readiness.status(), IngestStatus::Failed { .. }));
}
