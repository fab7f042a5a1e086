//! Presentation shell: decides between the landing view and the workspace,
//! and owns the page lifetime of whichever tab is open.

pub mod auth_prompt;

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::notify::NotificationRelay;
use crate::session::{SessionState, SessionStore};
use crate::storage::VISITED_KEY;

pub use auth_prompt::{AuthMode, AuthPrompt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Dashboard,
    Applications,
    TargetCompanies,
    InterviewPrep,
    EmailTracking,
    Networking,
}

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Applications => "Applications",
            Tab::TargetCompanies => "Target Companies",
            Tab::InterviewPrep => "Interview Prep",
            Tab::EmailTracking => "Email Tracking",
            Tab::Networking => "Networking",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellView {
    Loading,
    Landing { prompt_auth: bool },
    Workspace(Tab),
}

pub struct Shell {
    session: Arc<SessionStore>,
    relay: NotificationRelay,
    auth: AuthPrompt,
    tab: Tab,
    page: CancellationToken,
    session_rx: watch::Receiver<SessionState>,
}

impl Shell {
    pub fn new(session: Arc<SessionStore>) -> Self {
        let session_rx = session.subscribe();
        Self {
            auth: AuthPrompt::new(Arc::clone(&session)),
            session,
            relay: NotificationRelay::for_shell(),
            tab: Tab::Dashboard,
            page: CancellationToken::new(),
            session_rx,
        }
    }

    /// Settles the session and, on the very first launch, opens the auth prompt.
    pub async fn start(&mut self) -> ShellView {
        self.session.initialize().await;

        let storage = self.session.storage();
        match storage.get(VISITED_KEY) {
            Ok(Some(_)) => {}
            Ok(None) => {
                info!("First visit; opening the auth prompt");
                self.auth.open(AuthMode::Login);
                if let Err(e) = storage.set(VISITED_KEY, "true") {
                    warn!("Could not record first visit: {e}");
                }
            }
            Err(e) => warn!("Could not read first-visit flag: {e}"),
        }
        self.sync()
    }

    pub fn view(&self) -> ShellView {
        match self.session.state() {
            SessionState::Uninitialized | SessionState::Validating => ShellView::Loading,
            SessionState::Unauthenticated => ShellView::Landing {
                prompt_auth: self.auth.is_open(),
            },
            SessionState::Authenticated => ShellView::Workspace(self.tab),
        }
    }

    /// Applies any session change seen since the last call. Losing the
    /// session closes the current page.
    pub fn sync(&mut self) -> ShellView {
        if self.session_rx.has_changed().unwrap_or(false) {
            let state = *self.session_rx.borrow_and_update();
            if state == SessionState::Unauthenticated {
                self.close_page();
            }
        }
        self.view()
    }

    /// Switches tabs. The previous page is cancelled; the returned token
    /// belongs to the new one.
    pub fn select(&mut self, tab: Tab) -> CancellationToken {
        self.close_page();
        self.page = CancellationToken::new();
        self.tab = tab;
        debug!("Opened {}", tab.title());
        self.page.clone()
    }

    pub fn relay(&self) -> &NotificationRelay {
        &self.relay
    }

    pub fn auth(&self) -> &AuthPrompt {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut AuthPrompt {
        &mut self.auth
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.sync();
    }

    fn close_page(&self) {
        if !self.page.is_cancelled() {
            debug!("Closing {}", self.tab.title());
            self.page.cancel();
        }
    }
}
