//! Full stack: HTTP remote (wiremock), SQLite on disk, scheduler, transfer.

use quoteboard_core::{default_quotes, CategoryFilter, Quote};
use quoteboard_db::{Database, DbConfig, QuoteRepository};
use quoteboard_sync::{
    HttpRemote, NoOpPresenter, QuoteBook, RemoteSettings, RunOutcome, StatusLine, SyncScheduler,
    SYNCED_MESSAGE,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn open_book(db_path: &Path, server: &MockServer) -> (Database, Arc<QuoteBook>) {
    let db = Database::new(DbConfig::new(db_path)).await.unwrap();
    let remote = HttpRemote::new(&RemoteSettings {
        url: format!("{}/posts", server.uri()),
        fetch_limit: 5,
        timeout_secs: 2,
    })
    .unwrap();

    let book = QuoteBook::open(
        QuoteRepository::new(Arc::new(db.clone())),
        Arc::new(remote),
        Arc::new(NoOpPresenter),
    )
    .await
    .unwrap();

    (db, Arc::new(book))
}

#[tokio::test]
async fn sync_cycle_persists_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("quoteboard.db");
    let server = MockServer::start().await;

    let seeded_text = default_quotes()[2].text.clone();
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "userId": 1, "id": 1, "title": seeded_text, "body": "" },
            { "userId": 1, "id": 2, "title": "qui est esse", "body": "" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "id": 101 })))
        .mount(&server)
        .await;

    {
        let (db, book) = open_book(&db_path, &server).await;
        let line = Arc::new(StatusLine::new(
            book.presenter().clone(),
            Duration::from_millis(3000),
        ));
        let scheduler = SyncScheduler::new(book.clone(), line.clone());

        let receipt = book.add_quote("Ship it", "Work").await.unwrap();
        assert_eq!(receipt.remote.unwrap().id.as_deref(), Some("101"));

        let RunOutcome::Completed(report) = scheduler.run_once().await else {
            panic!("expected a completed run");
        };
        assert_eq!(report.added, 1);
        assert_eq!(report.updated, 1);
        assert_eq!(report.conflicts[0].text, seeded_text);
        assert_eq!(line.current().as_deref(), Some(SYNCED_MESSAGE));

        db.close().await;
    }

    let (_, book) = open_book(&db_path, &server).await;
    let collection = book.snapshot().await;

    assert_eq!(collection.len(), 5);
    assert_eq!(collection.as_slice()[2], Quote::new(seeded_text, "Server"));
    assert_eq!(collection.as_slice()[3], Quote::new("Ship it", "Work"));
    assert_eq!(collection.as_slice()[4], Quote::new("qui est esse", "Server"));
    assert_eq!(
        book.categories().await,
        vec!["Inspirational", "Motivational", "Server", "Work"]
    );
}

#[tokio::test]
async fn unreachable_remote_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (db, book) = open_book(&dir.path().join("q.db"), &server).await;
    let scheduler = SyncScheduler::new(
        book.clone(),
        Arc::new(StatusLine::new(Arc::new(NoOpPresenter), Duration::from_millis(10))),
    );

    assert_eq!(scheduler.run_once().await, RunOutcome::NoCandidates);
    assert_eq!(db.kv().keys().await.unwrap(), Vec::<String>::new());

    // Remote rejection does not undo the local add
    let receipt = book.add_quote("Offline", "Local").await.unwrap();
    assert!(receipt.remote.is_none());
    assert_eq!(db.kv().keys().await.unwrap(), vec!["quotes"]);
}

#[tokio::test]
async fn export_then_import_into_another_profile() {
    let dir = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;

    let (_, source) = open_book(&dir.path().join("a.db"), &server).await;
    source.select_category(&CategoryFilter::from("Life")).await.unwrap();
    let exported = source.export_to_file(dir.path()).await.unwrap();
    assert_eq!(exported.file_name().unwrap(), "quotes.json");

    let (_, target) = open_book(&dir.path().join("b.db"), &server).await;
    let count = target.import_file(&exported).await.unwrap();

    // Import appends, duplicates and all
    assert_eq!(count, 3);
    assert_eq!(target.snapshot().await.len(), 6);
    assert_eq!(
        target.preferences().await.unwrap().filter(),
        CategoryFilter::All
    );
}
