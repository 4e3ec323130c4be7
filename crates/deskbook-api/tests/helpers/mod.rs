//! Shared test helpers for API tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Days;
use serde_json::{Value, json};
use tower::ServiceExt;

use deskbook_api::{AppState, build_app};
use deskbook_core::config::{AppConfig, DatabaseConfig};
use deskbook_core::types::{format_date, today};
use deskbook_database::{MemoryInventoryStore, MemoryReservationLedger};
use deskbook_entity::inventory::InventoryTree;
use deskbook_service::InventorySnapshotHolder;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

impl TestApp {
    /// Build the app over fresh in-memory backends seeded with
    /// area-1 / ig-1 / {item-1, item-2} and area-2 / ig-2 / {item-3}.
    pub async fn new() -> Self {
        let config = AppConfig {
            server: Default::default(),
            database: DatabaseConfig::default(),
            logging: Default::default(),
            spaces: Default::default(),
        };
        let cors = config.server.cors.clone();

        let state = AppState::new(
            config,
            Arc::new(MemoryInventoryStore::new()),
            Arc::new(MemoryReservationLedger::new()),
            Arc::new(InventorySnapshotHolder::new()),
        );

        let tree: InventoryTree = serde_json::from_value(json!({
            "areas": [
                {
                    "id": "area-1",
                    "name": "Floor 1",
                    "item_groups": [{
                        "id": "ig-1",
                        "name": "Room 1",
                        "items": [
                            { "id": "item-1", "name": "Desk 1", "equipment": ["monitor"] },
                            { "id": "item-2", "name": "Desk 2" }
                        ]
                    }]
                },
                {
                    "id": "area-2",
                    "name": "Floor 2",
                    "item_groups": [{
                        "id": "ig-2",
                        "name": "Room 2",
                        "items": [{ "id": "item-3", "name": "Desk 3" }]
                    }]
                }
            ]
        }))
        .expect("Invalid test declaration");

        state
            .inventory_service
            .sync_from_declaration(&tree)
            .await
            .expect("Failed to seed inventory");

        Self {
            router: build_app(state, &cors),
        }
    }

    /// Make an HTTP request to the test app as `user`, optionally as an admin.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user: Option<&str>,
        admin: bool,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(user) = user {
            req = req.header("X-User-Id", user);
        }
        if admin {
            req = req.header("X-User-Role", "admin");
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    pub async fn get(&self, path: &str, user: &str) -> TestResponse {
        self.request("GET", path, None, Some(user), false).await
    }

    /// Book `item_id` for `user` on `date`.
    pub async fn book(&self, user: &str, item_id: &str, date: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/bookings",
            Some(json!({ "item_id": item_id, "booking_date": date })),
            Some(user),
            false,
        )
        .await
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` payload of a success response.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The machine-readable code of an error response.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

/// `today + offset` as `YYYY-MM-DD`.
pub fn date_in(offset: u64) -> String {
    format_date(today() + Days::new(offset))
}
