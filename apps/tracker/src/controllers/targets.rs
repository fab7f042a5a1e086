//! Target companies: the generic list plus company search.

use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::remote::RemoteList;
use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::record::drafts_from_envelope;
use crate::models::{Record, RecordId, TargetCompanyDraft};

pub const SEARCH_PATH: &str = "/api/search-companies";
pub const MAX_SEARCH_RESULTS: usize = 20;

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
}

impl RemoteList<TargetCompanyDraft> {
    /// Appends up to twenty search hits as unsaved targets. Returns how many
    /// were added.
    pub async fn search(&mut self, query: &str, cancel: &CancellationToken) -> usize {
        let query = query.trim();
        if query.is_empty() {
            self.relay.error("Search term required");
            return 0;
        }

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = search_companies(&self.api, query) => Some(result),
        };

        match fetched {
            None => 0,
            Some(Ok(found)) => {
                let added = found.len();
                debug!("Search for '{query}' returned {added} companies");
                self.records.extend(found);
                added
            }
            Some(Err(e)) => {
                self.report(&e, "Failed to search for companies".to_string());
                0
            }
        }
    }

    /// Saves a new target company and reloads the list.
    pub async fn add(&mut self, draft: TargetCompanyDraft, cancel: &CancellationToken) -> bool {
        let name = draft.name.clone();
        let added = self.create(draft.as_new_target(), cancel).await;
        if added {
            info!("Added {name} to target companies");
        }
        added
    }
}

async fn search_companies(
    api: &ApiClient,
    query: &str,
) -> Result<Vec<Record<TargetCompanyDraft>>, ClientError> {
    let envelope: Value = api.post_json(SEARCH_PATH, &SearchRequest { query }).await?;
    let found: Vec<TargetCompanyDraft> = drafts_from_envelope(&envelope, "results")?;
    Ok(found
        .into_iter()
        .take(MAX_SEARCH_RESULTS)
        .map(|hit| Record::new(RecordId::local(), hit.as_new_target()))
        .collect())
}
