//! Session store: bearer token lifecycle.
//!
//! State machine:
//!
//! ```text
//! Uninitialized ──initialize()──▶ Validating ──▶ Authenticated ⇄ Unauthenticated
//!                                            └─▶ Unauthenticated
//! ```
//!
//! The token itself is never held here. It lives in the `DurableStore` and is
//! re-read on every use, so the fetch wrapper and the session always agree.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::errors::StorageError;
use crate::storage::{DurableStore, ACCESS_TOKEN_KEY};
use crate::transport::{ApiRequest, Method, Transport, DASHBOARD_PATH, LOGIN_PATH, SIGNUP_PATH};

const NETWORK_ERROR: &str = "Network error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Validating,
    Authenticated,
    Unauthenticated,
}

impl SessionState {
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Uninitialized, Validating)
                | (Validating, Authenticated)
                | (Validating, Unauthenticated)
                | (Authenticated, Unauthenticated)
                | (Unauthenticated, Authenticated)
        )
    }

    /// Still working out whether a stored token is usable.
    pub fn is_settling(self) -> bool {
        matches!(self, SessionState::Uninitialized | SessionState::Validating)
    }
}

/// Result of `login` / `signup`. These never fail with an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    Failure { message: String },
}

impl AuthOutcome {
    fn failure(message: impl Into<String>) -> Self {
        AuthOutcome::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success)
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignupRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    message: Option<String>,
}

pub struct SessionStore {
    transport: Arc<dyn Transport>,
    storage: Arc<dyn DurableStore>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new(transport: Arc<dyn Transport>, storage: Arc<dyn DurableStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Uninitialized);
        Self {
            transport,
            storage,
            state,
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    pub fn storage(&self) -> Arc<dyn DurableStore> {
        Arc::clone(&self.storage)
    }

    /// Current token straight from durable storage.
    pub fn token(&self) -> Result<Option<String>, StorageError> {
        self.storage.get(ACCESS_TOKEN_KEY)
    }

    /// Checks a previously stored token against the dashboard endpoint.
    /// Always resolves; a network failure counts as an invalid token.
    pub async fn initialize(&self) -> SessionState {
        if !self.transition(SessionState::Validating) {
            return self.state();
        }

        let stored = match self.token() {
            Ok(token) => token,
            Err(e) => {
                warn!("Could not read stored token: {e}; discarding it");
                self.clear_token();
                None
            }
        };

        let next = match stored {
            Some(token) if self.validate(&token).await => SessionState::Authenticated,
            Some(_) => {
                info!("Stored token rejected; discarding it");
                self.clear_token();
                SessionState::Unauthenticated
            }
            None => SessionState::Unauthenticated,
        };

        self.transition(next);
        self.state()
    }

    pub async fn login(&self, username: &str, password: &str) -> AuthOutcome {
        if username.trim().is_empty() || password.is_empty() {
            return AuthOutcome::failure("Username and password are required");
        }
        self.authenticate(LOGIN_PATH, &LoginRequest { username, password }, "Login failed")
            .await
    }

    pub async fn signup(&self, username: &str, email: &str, password: &str) -> AuthOutcome {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return AuthOutcome::failure("Username, email and password are required");
        }
        let body = SignupRequest {
            username,
            email,
            password,
        };
        self.authenticate(SIGNUP_PATH, &body, "Signup failed").await
    }

    /// Clears the token locally. No network call.
    pub fn logout(&self) {
        self.clear_token();
        self.transition(SessionState::Unauthenticated);
        info!("Logged out");
    }

    /// Called by the fetch wrapper when the API rejects the token.
    pub fn expire(&self) {
        warn!("Session expired; clearing stored token");
        self.clear_token();
        self.transition(SessionState::Unauthenticated);
    }

    async fn validate(&self, token: &str) -> bool {
        let request = ApiRequest::get(DASHBOARD_PATH).with_bearer(token);
        match self.transport.send(request).await {
            Ok(response) => response.is_success(),
            Err(e) => {
                warn!("Token validation error: {e}");
                false
            }
        }
    }

    async fn authenticate<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> AuthOutcome {
        if self.state().is_settling() {
            return AuthOutcome::failure("Session is still initializing");
        }
        let body = match serde_json::to_value(body) {
            Ok(body) => body,
            Err(e) => {
                warn!("Could not encode {path} request: {e}");
                return AuthOutcome::failure(fallback);
            }
        };

        let request = ApiRequest::new(Method::Post, path).with_json(body);
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Auth request to {path} failed: {e}");
                return AuthOutcome::failure(NETWORK_ERROR);
            }
        };

        let parsed: Option<TokenResponse> = response.json().ok();
        if !response.is_success() {
            let message = parsed
                .and_then(|p| p.message)
                .unwrap_or_else(|| fallback.to_string());
            return AuthOutcome::failure(message);
        }

        let Some(token) = parsed.and_then(|p| p.access_token) else {
            warn!("{path} succeeded without an access token");
            return AuthOutcome::failure(fallback);
        };

        if let Err(e) = self.storage.set(ACCESS_TOKEN_KEY, &token) {
            warn!("Could not persist token: {e}");
            return AuthOutcome::failure("Could not save the session token");
        }
        // Re-authenticating while already authenticated is a no-op transition.
        self.transition(SessionState::Authenticated);
        info!("Authenticated via {path}");
        AuthOutcome::Success
    }

    fn clear_token(&self) {
        if let Err(e) = self.storage.remove(ACCESS_TOKEN_KEY) {
            warn!("Could not remove stored token: {e}");
        }
    }

    /// Applies `next` if the state machine allows it. Returns whether it moved.
    fn transition(&self, next: SessionState) -> bool {
        let mut moved = false;
        self.state.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            if !current.can_transition_to(next) {
                warn!("Rejected session transition {:?} -> {:?}", current, next);
                return false;
            }
            info!("Session {:?} -> {:?}", current, next);
            *current = next;
            moved = true;
            true
        });
        moved
    }
}
