//! In-memory `Transport` for tests: records every request and answers from
//! either scripted routes or a handler closure.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiRequest, ApiResponse, Method, Transport, LOGIN_PATH};
use crate::errors::TransportError;

type Handler = dyn Fn(&ApiRequest) -> Result<ApiResponse, TransportError> + Send + Sync;

#[derive(Clone)]
enum Scripted {
    Respond(u16, Value),
    Fail,
}

enum Mode {
    Routes(Mutex<HashMap<(Method, String), VecDeque<Scripted>>>),
    Handler(Box<Handler>),
}

pub struct FakeApi {
    mode: Mode,
    login_token: Option<String>,
    latency: Option<Duration>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeApi {
    /// Scripted routes; unknown routes answer 404. The last scripted response
    /// for a route repeats.
    pub fn new() -> Self {
        Self {
            mode: Mode::Routes(Mutex::new(HashMap::new())),
            login_token: None,
            latency: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_handler(
        handler: impl Fn(&ApiRequest) -> Result<ApiResponse, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            mode: Mode::Handler(Box::new(handler)),
            login_token: None,
            latency: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers `POST /api/auth/login` with `token`, whatever else is configured.
    pub fn with_login(mut self, token: &str) -> Self {
        self.login_token = Some(token.to_string());
        self
    }

    /// Holds every answer except the login shortcut for `delay`.
    pub fn with_latency(mut self, delay: Duration) -> Self {
        self.latency = Some(delay);
        self
    }

    pub fn on(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.push(method, path, Scripted::Respond(status, body));
        self
    }

    pub fn fail_on(self, method: Method, path: &str) -> Self {
        self.push(method, path, Scripted::Fail);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        match &self.mode {
            Mode::Routes(routes) => routes
                .lock()
                .unwrap()
                .entry((method, path.to_string()))
                .or_default()
                .push_back(scripted),
            Mode::Handler(_) => panic!("cannot script routes on a handler-backed FakeApi"),
        }
    }

    fn next_scripted(
        routes: &Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
        request: &ApiRequest,
    ) -> Option<Scripted> {
        let mut routes = routes.lock().unwrap();
        let queue = routes.get_mut(&(request.method, request.path.clone()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

pub fn json_response(status: u16, body: Value) -> ApiResponse {
    ApiResponse::new(status, serde_json::to_vec(&body).unwrap())
}

#[async_trait]
impl Transport for FakeApi {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(token) = &self.login_token {
            if request.method == Method::Post && request.path == LOGIN_PATH {
                return Ok(json_response(200, serde_json::json!({"access_token": token})));
            }
        }
        if let Some(delay) = self.latency {
            tokio::time::sleep(delay).await;
        }
        match &self.mode {
            Mode::Handler(handler) => handler(&request),
            Mode::Routes(routes) => match Self::next_scripted(routes, &request) {
                Some(Scripted::Respond(status, body)) => Ok(json_response(status, body)),
                Some(Scripted::Fail) => Err(TransportError::Network(
                    "connection refused".to_string(),
                )),
                None => Ok(json_response(
                    404,
                    serde_json::json!({"message": "The requested URL was not found"}),
                )),
            },
        }
    }
}
