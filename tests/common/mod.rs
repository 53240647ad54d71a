#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use health_records_api::app::{app, AppState};
use health_records_api::cloudant::{CloudantError, DatabaseCreated, DocumentStore};

/// In-memory stand-in for Cloudant backing the router and bootstrap tests.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    fail_queries: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose query methods all fail, for the 500/degraded paths.
    pub fn failing() -> Self {
        Self {
            fail_queries: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, collection: &str, docs: Vec<Value>) {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .extend(docs);
    }

    pub fn documents(&self, collection: &str) -> Vec<Value> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn query_error() -> CloudantError {
        CloudantError::UnexpectedStatus {
            status: 500,
            context: "memory store".to_string(),
            body: "simulated failure".to_string(),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_database(&self, db: &str) -> Result<DatabaseCreated, CloudantError> {
        let mut collections = self.collections.lock().unwrap();
        if collections.contains_key(db) {
            Ok(DatabaseCreated::AlreadyExists)
        } else {
            collections.insert(db.to_string(), Vec::new());
            Ok(DatabaseCreated::Created)
        }
    }

    async fn bulk_insert(&self, db: &str, docs: Vec<Value>) -> Result<usize, CloudantError> {
        if self.fail_queries {
            return Err(Self::query_error());
        }
        let count = docs.len();
        self.insert(db, docs);
        Ok(count)
    }

    async fn find(&self, db: &str, selector: Value) -> Result<Vec<Value>, CloudantError> {
        if self.fail_queries {
            return Err(Self::query_error());
        }
        let selector = selector.as_object().cloned().unwrap_or_default();
        Ok(self
            .documents(db)
            .into_iter()
            .filter(|doc| selector.iter().all(|(key, value)| doc.get(key) == Some(value)))
            .collect())
    }

    async fn all_docs(&self, db: &str) -> Result<Vec<Value>, CloudantError> {
        if self.fail_queries {
            return Err(Self::query_error());
        }
        Ok(self.documents(db))
    }

    async fn ping(&self) -> Result<(), CloudantError> {
        if self.fail_queries {
            return Err(Self::query_error());
        }
        Ok(())
    }
}

/// Build the full router over an in-memory store.
pub fn app_with(store: Arc<MemoryStore>) -> Router {
    let store: Arc<dyn DocumentStore> = store;
    app(AppState { store })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router call");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).expect("request");
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    send(app, request).await
}

/// Seeded patient used across the endpoint tests.
pub fn jane() -> Value {
    serde_json::json!({
        "_id": "doc-jane",
        "_rev": "1-abc",
        "patient_id": "p001",
        "user_id": "p001",
        "first_name": "Jane",
        "last_name": "Doe",
        "address": "1 Main St",
        "city": "Springfield",
        "postcode": "12345",
        "gender": "F",
        "birthdate": "1980-02-01"
    })
}
