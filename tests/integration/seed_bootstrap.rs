//! First-run bootstrap: remote seed, persistence and restore

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use userdeck::core::{Bootstrap, HttpSeedSource, UserStore, LOAD_ERROR_MESSAGE};
use userdeck::App;
use userdeck::Config;

use super::common::fixtures::{
    seed_payload, spawn_seed_server, user, FailingSeed, StaticSeed, TestStorage,
};

#[tokio::test]
async fn test_http_seed_populates_and_persists() {
    let env = TestStorage::new();
    let url = spawn_seed_server(StatusCode::OK, seed_payload()).await;
    let seed = HttpSeedSource::new(url, Duration::from_secs(5)).unwrap();

    let mut store = UserStore::new(env.storage.clone());
    store.initialize(&seed).await;

    assert!(!store.is_loading());
    assert_eq!(store.error(), None);
    assert_eq!(store.len(), 2);
    let leanne = store.get(1).unwrap();
    assert_eq!(leanne.address.city, "Gwenborough");
    assert_eq!(leanne.address.zipcode.as_deref(), Some("92998-3874"));

    // Restart: the snapshot wins and the seed is never consulted
    let mut restarted = UserStore::new(env.reopen());
    restarted.initialize(&FailingSeed).await;
    assert_eq!(restarted.len(), 2);
    assert_eq!(restarted.error(), None);
}

#[tokio::test]
async fn test_http_seed_error_status_sets_banner() {
    let env = TestStorage::new();
    let url = spawn_seed_server(StatusCode::INTERNAL_SERVER_ERROR, serde_json::json!({})).await;
    let seed = HttpSeedSource::new(url, Duration::from_secs(5)).unwrap();

    let mut store = UserStore::new(env.storage.clone());
    store.initialize(&seed).await;

    assert!(store.is_empty());
    assert_eq!(store.error(), Some(LOAD_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_failed_fetch_leaves_empty_store_with_error() {
    let env = TestStorage::new();
    let mut store = UserStore::new(env.storage.clone());

    store.initialize(&FailingSeed).await;

    assert!(store.records().is_empty());
    assert!(store.error().is_some());

    // Nothing was written, so the next start tries the seed again
    let mut restarted = UserStore::new(env.reopen());
    assert_eq!(restarted.restore(), Bootstrap::NeedsSeed);
}

#[tokio::test]
async fn test_app_bootstrap_applies_background_fetch() {
    let env = TestStorage::new();
    let mut app = App::new(&Config::default(), env.storage.clone());
    assert!(app.store().is_loading());

    app.bootstrap(Arc::new(StaticSeed(vec![
        user(1, "Leanne Graham", "Gwenborough"),
        user(2, "Ervin Howell", "Wisokyburgh"),
    ])));
    assert!(app.next_app_event().await);

    assert!(!app.store().is_loading());
    assert_eq!(app.store().len(), 2);
}
