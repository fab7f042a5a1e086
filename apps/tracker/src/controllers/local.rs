//! List controller for entities that only live in memory.
//!
//! Same editing flow as the remote list, minus the network: every change is
//! applied to the list directly. New records get a fresh uuid so ids are never
//! reused after a delete.

use tracing::{debug, info};

use crate::models::{Entity, Record, RecordId};
use crate::notify::NotificationRelay;

pub struct LocalList<D: Entity> {
    relay: NotificationRelay,
    records: Vec<Record<D>>,
    editing: Option<RecordId>,
    form: D,
}

impl<D: Entity> LocalList<D> {
    pub fn seeded(relay: NotificationRelay, seed: Vec<D>) -> Self {
        let records = seed
            .into_iter()
            .map(|data| Record::new(RecordId::local(), data))
            .collect::<Vec<_>>();
        debug!("Seeded {} {}", records.len(), D::PLURAL);
        Self {
            relay,
            records,
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

    pub fn begin_create(&mut self) {
        self.editing = None;
        self.form = D::default();
    }

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

    /// Appends the form as a new record, or writes it over the one being
    /// edited. Returns the id of the affected record.
    pub fn submit(&mut self) -> Option<RecordId> {
        if let Err(e) = self.form.validate() {
            self.relay.error(e.to_string());
            return None;
        }

        let data = std::mem::take(&mut self.form);
        let id = match self.editing.take() {
            Some(id) => match self.records.iter_mut().find(|r| r.id == id) {
                Some(record) => {
                    record.data = data;
                    info!("{} updated", D::LABEL);
                    id
                }
                // Deleted while the form was open; keep the edit as a new record.
                None => self.push(data),
            },
            None => self.push(data),
        };
        Some(id)
    }

    pub fn delete(&mut self, id: RecordId, confirm: impl FnOnce(&str) -> bool) -> bool {
        if !confirm(&format!("Are you sure you want to delete this {}?", D::LABEL)) {
            return false;
        }
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.editing == Some(id) {
            self.begin_create();
        }
        self.records.len() < before
    }

    fn push(&mut self, data: D) -> RecordId {
        let id = RecordId::local();
        self.records.push(Record::new(id, data));
        info!("{} added", D::LABEL);
        id
    }
}
