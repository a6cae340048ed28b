//! Storage, record and seed-server fixtures

use std::sync::Arc;

use async_trait::async_trait;
use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tempfile::TempDir;
use userdeck::core::{SeedError, SeedSource};
use userdeck::data::{Address, AppStateStore, Database, StateStorage, UserRecord};

/// SQLite-backed storage in a fresh temp directory
pub struct TestStorage {
    pub dir: TempDir,
    pub db: Database,
    pub storage: Arc<dyn StateStorage>,
}

impl TestStorage {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("userdeck.db")).expect("Failed to open database");
        let storage: Arc<dyn StateStorage> = Arc::new(AppStateStore::new(db.connection()));
        Self { dir, db, storage }
    }

    /// Second handle on the same database file, as after a restart
    pub fn reopen(&self) -> Arc<dyn StateStorage> {
        let db = Database::open(self.db.path.clone()).expect("Failed to reopen database");
        Arc::new(AppStateStore::new(db.connection()))
    }
}

pub fn user(id: i64, name: &str, city: &str) -> UserRecord {
    UserRecord {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: "555-0100".to_string(),
        address: Address {
            street: Some("1 Test Way".to_string()),
            city: city.to_string(),
            zipcode: Some("12345".to_string()),
        },
    }
}

/// Two records in the shape the public mock endpoint returns
pub fn seed_payload() -> Value {
    json!([
        {
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": { "name": "Romaguera-Crona" }
        },
        {
            "id": 2,
            "name": "Ervin Howell",
            "username": "Antonette",
            "email": "Shanna@melissa.tv",
            "address": {
                "street": "Victor Plains",
                "suite": "Suite 879",
                "city": "Wisokyburgh",
                "zipcode": "90566-7771"
            },
            "phone": "010-692-6593 x09125"
        }
    ])
}

/// Serve `body` with `status` at `/users` on an ephemeral port; returns the URL
pub async fn spawn_seed_server(status: StatusCode, body: Value) -> String {
    let app = Router::new().route(
        "/users",
        get(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind seed server");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Seed server failed");
    });

    format!("http://{addr}/users")
}

pub struct StaticSeed(pub Vec<UserRecord>);

#[async_trait]
impl SeedSource for StaticSeed {
    async fn fetch(&self) -> Result<Vec<UserRecord>, SeedError> {
        Ok(self.0.clone())
    }
}

pub struct FailingSeed;

#[async_trait]
impl SeedSource for FailingSeed {
    async fn fetch(&self) -> Result<Vec<UserRecord>, SeedError> {
        Err(SeedError::Unavailable("offline".into()))
    }
}
