use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::warn;

use crate::api::ApiClient;
use crate::config::Config;
use crate::controllers::{
    seeds, Applications, DashboardPage, EmailTracking, InterviewPrep, Networking, ResumeMatcher,
    TargetCompanies,
};
use crate::session::SessionStore;
use crate::shell::Shell;
use crate::storage::{DurableStore, FileStore, MemoryStore};
use crate::transport::{ReqwestTransport, Transport};

/// The one session context of a running client, handed to every page.
pub struct AppContext {
    pub shell: Shell,
    pub api: ApiClient,
}

impl AppContext {
    pub fn from_config(config: &Config) -> Result<Self> {
        let storage: Arc<dyn DurableStore> = match FileStore::open(&config.state_dir) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!(
                    "Could not open {}: {e}; the session will not outlive this run",
                    config.state_dir.display()
                );
                Arc::new(MemoryStore::new())
            }
        };
        let transport = ReqwestTransport::new(config.api_base_url.clone(), config.http_timeout)
            .context("Failed to build HTTP client")?;
        Ok(Self::from_parts(Arc::new(transport), storage))
    }

    pub fn from_parts(transport: Arc<dyn Transport>, storage: Arc<dyn DurableStore>) -> Self {
        let session = Arc::new(SessionStore::new(transport, storage));
        Self {
            api: ApiClient::new(Arc::clone(&session)),
            shell: Shell::new(session),
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.shell.session()
    }

    pub fn dashboard(&self) -> DashboardPage {
        DashboardPage::new(self.api.clone(), self.shell.relay().clone())
    }

    pub fn applications(&self) -> Applications {
        Applications::new(self.api.clone(), self.shell.relay().clone())
    }

    pub fn target_companies(&self) -> TargetCompanies {
        TargetCompanies::new(self.api.clone(), self.shell.relay().clone())
    }

    pub fn interview_prep(&self) -> InterviewPrep {
        InterviewPrep::new(self.api.clone(), self.shell.relay().clone())
    }

    pub fn networking(&self) -> Networking {
        Networking::seeded(self.shell.relay().clone(), seeds::networking_contacts())
    }

    pub fn email_tracking(&self) -> EmailTracking {
        EmailTracking::seeded(self.shell.relay().clone(), seeds::email_log())
    }

    pub fn resume_matcher(&self) -> ResumeMatcher {
        ResumeMatcher::new(self.api.clone(), self.shell.relay().clone())
    }
}
