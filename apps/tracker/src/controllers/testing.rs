//! Shared fixtures for controller tests.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::api::ApiClient;
use crate::session::SessionStore;
use crate::storage::MemoryStore;
use crate::transport::testing::{json_response, FakeApi};
use crate::transport::{ApiRequest, ApiResponse, Method, RequestBody};

const APPLICATIONS_PATH: &str = "/api/applications";

/// Logs in through `fake` and returns a client bound to that session.
pub async fn logged_in_api(fake: FakeApi) -> (ApiClient, Arc<FakeApi>) {
    let fake = fake.with_login("test-token").into_arc();
    let session = Arc::new(SessionStore::new(fake.clone(), Arc::new(MemoryStore::new())));
    session.initialize().await;
    assert!(session.login("tester", "secret").await.is_success());
    (ApiClient::new(session), fake)
}

#[derive(Default)]
struct Rows {
    next_id: i64,
    rows: Vec<Value>,
}

/// A stateful `/api/applications` resource that stores whatever it is sent.
#[derive(Clone, Default)]
pub struct ApplicationsBackend {
    state: Arc<Mutex<Rows>>,
}

impl ApplicationsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(&self) -> Vec<Value> {
        self.state.lock().unwrap().rows.clone()
    }

    pub fn fake(&self) -> FakeApi {
        let state = self.state.clone();
        FakeApi::with_handler(move |request| Ok(handle(&state, request)))
    }
}

fn handle(state: &Mutex<Rows>, request: &ApiRequest) -> ApiResponse {
    let mut state = state.lock().unwrap();
    let item_id = request
        .path
        .strip_prefix("/api/applications/")
        .and_then(|id| id.parse::<i64>().ok());
    let body = match &request.body {
        RequestBody::Json(body) => Some(body.clone()),
        _ => None,
    };

    match (request.method, request.path.as_str(), item_id, body) {
        (Method::Get, APPLICATIONS_PATH, _, _) => {
            json_response(200, json!({ "applications": state.rows }))
        }
        (Method::Post, APPLICATIONS_PATH, _, Some(mut row)) => {
            state.next_id += 1;
            row["id"] = json!(state.next_id);
            state.rows.push(row.clone());
            json_response(
                201,
                json!({"message": "Application added successfully", "application": row}),
            )
        }
        (Method::Put, _, Some(id), Some(Value::Object(fields))) => {
            match state.rows.iter_mut().find(|row| row["id"] == json!(id)) {
                Some(row) => {
                    if let Some(row) = row.as_object_mut() {
                        for (key, value) in fields {
                            if key != "id" {
                                row.insert(key, value);
                            }
                        }
                    }
                    json_response(200, json!({"message": "Application updated successfully"}))
                }
                None => json_response(404, json!({"message": "Application not found"})),
            }
        }
        (Method::Delete, _, Some(id), _) => {
            let before = state.rows.len();
            state.rows.retain(|row| row["id"] != json!(id));
            if state.rows.len() < before {
                json_response(200, json!({"message": "Application deleted successfully"}))
            } else {
                json_response(404, json!({"message": "Application not found"}))
            }
        }
        _ => json_response(404, json!({"message": "The requested URL was not found"})),
    }
}
