//! List controller for API-backed entities.
//!
//! Load, then create/update (always followed by a full reload), and delete
//! (patched locally). Failures become notifications and leave the list and
//! form untouched.

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{Record, RecordId, RemoteEntity};
use crate::notify::NotificationRelay;

pub struct RemoteList<D: RemoteEntity> {
    pub(super) api: ApiClient,
    pub(super) relay: NotificationRelay,
    pub(super) records: Vec<Record<D>>,
    editing: Option<RecordId>,
    form: D,
}

impl<D: RemoteEntity> RemoteList<D> {
    pub fn new(api: ApiClient, relay: NotificationRelay) -> Self {
        Self {
            api,
            relay,
            records: Vec::new(),
            editing: None,
            form: D::default(),
        }
    }

    pub fn records(&self) -> &[Record<D>] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&Record<D>> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn form_mut(&mut self) -> &mut D {
        &mut self.form
    }

    /// Fetches the collection. Returns true when the list was replaced.
    /// A cancelled page keeps its old state and raises nothing.
    pub async fn load(&mut self, cancel: &CancellationToken) -> bool {
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = fetch_all::<D>(&self.api) => Some(result),
        };

        match fetched {
            None => {
                debug!("Dropped {} load for a closed page", D::PLURAL);
                false
            }
            Some(Ok(records)) => {
                debug!("Loaded {} {}", records.len(), D::PLURAL);
                self.records = records;
                true
            }
            Some(Err(e)) => {
                self.report(&e, format!("Failed to load {}", D::PLURAL));
                false
            }
        }
    }

    pub fn begin_create(&mut self) {
        self.editing = None;
        self.form = D::default();
    }

    /// Copies an existing record into the form. Returns false for unknown ids.
    pub fn begin_edit(&mut self, id: RecordId) -> bool {
        let Some(record) = self.get(id) else {
            return false;
        };
        let mut form = record.data.clone();
        form.prepare_for_edit();
        self.form = form;
        self.editing = Some(id);
        true
    }

    /// POSTs a new record or PUTs the one being edited, then reloads.
    pub async fn submit(&mut self, cancel: &CancellationToken) -> bool {
        if let Err(e) = self.form.validate() {
            self.relay.error(e.to_string());
            return false;
        }

        let (verb, result) = match self.editing {
            Some(id) => (
                "update",
                self.api
                    .put_json::<_, Value>(&D::item_path(id), &self.form)
                    .await,
            ),
            None => (
                "create",
                self.api.post_json::<_, Value>(D::PATH, &self.form).await,
            ),
        };

        if let Err(e) = result {
            self.report(&e, format!("Failed to {verb} {}", D::LABEL));
            return false;
        }

        info!("{} {verb}d", D::LABEL);
        self.load(cancel).await;
        self.editing = None;
        self.form = D::default();
        true
    }

    /// Convenience for `begin_create` + fill + `submit`.
    pub async fn create(&mut self, draft: D, cancel: &CancellationToken) -> bool {
        self.editing = None;
        self.form = draft;
        self.submit(cancel).await
    }

    /// Asks `confirm` first; on success drops the record locally without a reload.
    /// Records with a local id were never saved, so no request is made for them.
    pub async fn delete(&mut self, id: RecordId, confirm: impl FnOnce(&str) -> bool) -> bool {
        if !confirm(&format!("Are you sure you want to delete this {}?", D::LABEL)) {
            return false;
        }

        if !id.is_local() {
            if let Err(e) = self.api.delete(&D::item_path(id)).await {
                self.report(&e, format!("Failed to delete {}", D::LABEL));
                return false;
            }
        }

        self.records.retain(|r| r.id != id);
        if self.editing == Some(id) {
            self.begin_create();
        }
        true
    }

    pub(super) fn report(&self, error: &ClientError, message: String) {
        warn!(server_message = error.server_message(), "{message}: {error}");
        self.relay.error(message);
    }
}

pub(super) async fn fetch_all<D: RemoteEntity>(
    api: &ApiClient,
) -> Result<Vec<Record<D>>, ClientError> {
    let envelope: Value = api.get_json(D::PATH).await?;
    Ok(Record::list_from_envelope(&envelope, D::COLLECTION)?)
}
