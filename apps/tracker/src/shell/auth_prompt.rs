//! Login / signup prompt with its own short-lived notifications.

use std::sync::Arc;

use crate::notify::NotificationRelay;
use crate::session::{AuthOutcome, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Signup => "Sign Up",
        }
    }
}

pub struct AuthPrompt {
    session: Arc<SessionStore>,
    relay: NotificationRelay,
    mode: AuthMode,
    open: bool,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl AuthPrompt {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            session,
            relay: NotificationRelay::for_auth_prompt(),
            mode: AuthMode::Login,
            open: false,
            username: String::new(),
            email: String::new(),
            password: String::new(),
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn relay(&self) -> &NotificationRelay {
        &self.relay
    }

    /// Shows the prompt in `mode`. Opening in the other mode switches over
    /// the same way the toggle does.
    pub fn open(&mut self, mode: AuthMode) {
        if self.mode != mode {
            self.toggle_mode();
        }
        self.open = true;
    }

    /// Switches between login and signup, clearing every field.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        self.username.clear();
        self.email.clear();
        self.password.clear();
    }

    /// Submits the form in the current mode. The prompt closes on success.
    pub async fn submit(&mut self) -> bool {
        let outcome = match self.mode {
            AuthMode::Login => self.session.login(&self.username, &self.password).await,
            AuthMode::Signup => {
                self.session
                    .signup(&self.username, &self.email, &self.password)
                    .await
            }
        };

        match outcome {
            AuthOutcome::Success => {
                self.open = false;
                self.password.clear();
                self.relay.success(match self.mode {
                    AuthMode::Login => "Login successful!",
                    AuthMode::Signup => "Account created successfully!",
                });
                true
            }
            AuthOutcome::Failure { message } => {
                self.relay.error(message);
                false
            }
        }
    }
}
