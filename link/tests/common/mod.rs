//! Shared test scaffolding: a scripted transport and the Car/Person fixture.
#![allow(dead_code)] // each test binary uses a different subset

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use mirage_link::{MirageClient, Result, Transport, TransportResponse};

/// In-memory transport scripted with canned responses per path. Unscripted
/// paths answer 404 with a JSON `null` body, like the real server. Every
/// request is tallied so tests can assert how often a path was hit.
pub struct FakeTransport {
    routes: HashMap<String, (u16, String)>,
    hits: Mutex<HashMap<String, usize>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            hits: Mutex::new(HashMap::new()),
        }
    }

    pub fn route(mut self, path: &str, status: u16, body: Value) -> Self {
        self.routes
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    pub fn hits(&self, path: &str) -> usize {
        *self.hits.lock().unwrap().get(path).unwrap_or(&0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, path: &str) -> Result<TransportResponse> {
        *self.hits.lock().unwrap().entry(path.to_string()).or_insert(0) += 1;
        let (status, body) = self
            .routes
            .get(path)
            .cloned()
            .unwrap_or((404, "null".to_string()));
        Ok(TransportResponse { status, body })
    }
}

pub fn schema() -> Value {
    json!({
        "Car": {
            "fields": [
                {"name": "brand", "index": true},
                {"name": "wheels", "index": false}
            ],
            "has_one": [{"name": "owner", "index": false}],
            "has_many": [{"name": "drivers", "index": false}]
        },
        "Person": {
            "fields": [
                {"name": "name", "index": true},
                {"name": "age", "index": false}
            ]
        }
    })
}

pub fn car_record() -> Value {
    json!({
        "id": 1,
        "type": "Car",
        "brand": "Mercedes 300",
        "wheels": 4,
        "owner": {"id": 1, "type": "Person"},
        "drivers": {"count": 2}
    })
}

pub fn person_record(id: u64, name: &str, age: u64) -> Value {
    json!({"id": id, "type": "Person", "name": name, "age": age})
}

/// Transport pre-scripted with the whole fixture graph: one car owned by
/// Person 1 and driven by Persons 1 and 2.
pub fn fixture_transport() -> FakeTransport {
    let p1 = person_record(1, "Hans", 60);
    let p2 = person_record(2, "Greta", 54);
    FakeTransport::new()
        .route("/metadata", 200, schema())
        .route("/cars", 200, json!({"count": 1}))
        .route("/people", 200, json!({"count": 2}))
        .route("/cars/1", 200, car_record())
        .route("/cars?brand=Mercedes+300", 200, json!([car_record()]))
        .route("/people?name=Hans", 200, json!([p1.clone()]))
        .route("/people/1", 200, p1.clone())
        .route("/people/2", 200, p2.clone())
        .route("/people/1..3", 200, json!([p1.clone(), p2.clone()]))
        .route("/cars/1/drivers", 200, json!({"count": 2}))
        .route("/cars/1/drivers/0", 200, p1.clone())
        .route("/cars/1/drivers/1", 200, p2.clone())
        .route("/cars/1/drivers/0..1", 200, json!([p1.clone(), p2.clone()]))
        .route("/cars/1/drivers/1,0", 200, json!([p2, p1]))
}

/// Client wired to the fixture transport, configured lazily from `/metadata`.
pub fn fixture_client() -> (Arc<FakeTransport>, MirageClient) {
    let transport = Arc::new(fixture_transport());
    let client = MirageClient::builder()
        .transport(transport.clone())
        .build()
        .unwrap();
    (transport, client)
}
