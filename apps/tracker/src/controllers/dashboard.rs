//! Dashboard page: headline counters plus the most recent applications.

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{ApplicationDraft, DashboardSummary, Record, RemoteEntity};
use crate::notify::NotificationRelay;
use crate::transport::DASHBOARD_PATH;

pub const RECENT_LIMIT: usize = 10;

pub struct DashboardPage {
    api: ApiClient,
    relay: NotificationRelay,
    summary: Option<DashboardSummary>,
    recent: Vec<Record<ApplicationDraft>>,
}

impl DashboardPage {
    pub fn new(api: ApiClient, relay: NotificationRelay) -> Self {
        Self {
            api,
            relay,
            summary: None,
            recent: Vec::new(),
        }
    }

    pub fn summary(&self) -> Option<&DashboardSummary> {
        self.summary.as_ref()
    }

    pub fn recent(&self) -> &[Record<ApplicationDraft>] {
        &self.recent
    }

    /// Fetches both panels concurrently. Each panel fails on its own and keeps
    /// its previous contents. Returns true when both were refreshed.
    pub async fn load(&mut self, cancel: &CancellationToken) -> bool {
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            both = async {
                tokio::join!(
                    self.api.get_json::<DashboardSummary>(DASHBOARD_PATH),
                    fetch_recent(&self.api),
                )
            } => Some(both),
        };

        let Some((summary, recent)) = fetched else {
            debug!("Dropped dashboard load for a closed page");
            return false;
        };

        let mut refreshed = true;
        match summary {
            Ok(summary) => self.summary = Some(summary),
            Err(e) => {
                refreshed = false;
                self.report(&e, "Failed to load dashboard data");
            }
        }
        match recent {
            Ok(recent) => self.recent = recent,
            Err(e) => {
                refreshed = false;
                self.report(&e, "Failed to load recent applications");
            }
        }
        refreshed
    }

    fn report(&self, error: &ClientError, message: &str) {
        warn!("{message}: {error}");
        self.relay.error(message);
    }
}

async fn fetch_recent(api: &ApiClient) -> Result<Vec<Record<ApplicationDraft>>, ClientError> {
    let envelope: Value = api.get_json(ApplicationDraft::PATH).await?;
    let mut records =
        Record::<ApplicationDraft>::list_from_envelope(&envelope, ApplicationDraft::COLLECTION)?;
    records.truncate(RECENT_LIMIT);
    Ok(records)
}
