use std::fmt;
use std::str::FromStr;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ClientError;

/// Server-assigned integer id, or a client-generated placeholder for records
/// the server has never seen (mock collections, unsaved search results).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Server(i64),
    Local(Uuid),
}

impl RecordId {
    pub fn local() -> Self {
        RecordId::Local(Uuid::new_v4())
    }

    pub fn is_local(&self) -> bool {
        matches!(self, RecordId::Local(_))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Server(id) => write!(f, "{id}"),
            RecordId::Local(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<i64>() {
            return Ok(RecordId::Server(id));
        }
        Uuid::parse_str(s)
            .map(RecordId::Local)
            .map_err(|_| format!("'{s}' is neither a numeric nor a UUID record id"))
    }
}

/// A stored entity: its id plus the display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record<D> {
    pub id: RecordId,
    #[serde(flatten)]
    pub data: D,
}

impl<D> Record<D> {
    pub fn new(id: RecordId, data: D) -> Self {
        Self { id, data }
    }
}

impl<D: DeserializeOwned> Record<D> {
    /// Maps one stored wire object onto the display schema. The server's
    /// `id` is required; without it the record could never be updated or deleted.
    pub fn from_wire(value: Value) -> Result<Self, serde_json::Error> {
        let id = match value.get("id") {
            None | Some(Value::Null) => return Err(de::Error::missing_field("id")),
            Some(id) => RecordId::deserialize(id).map_err(|_| {
                <serde_json::Error as de::Error>::custom(format!("unusable record id {id}"))
            })?,
        };
        let data = serde_json::from_value(value)?;
        Ok(Self { id, data })
    }

    /// Reads `envelope[collection]` as a list of records. A missing key is an empty list.
    pub fn list_from_envelope(
        envelope: &Value,
        collection: &str,
    ) -> Result<Vec<Self>, serde_json::Error> {
        collection_items(envelope, collection)
            .iter()
            .cloned()
            .map(Self::from_wire)
            .collect()
    }
}

/// Reads `envelope[collection]` as bare drafts, for results the server has
/// not stored and that carry no id of their own.
pub fn drafts_from_envelope<D: DeserializeOwned>(
    envelope: &Value,
    collection: &str,
) -> Result<Vec<D>, serde_json::Error> {
    collection_items(envelope, collection)
        .iter()
        .cloned()
        .map(serde_json::from_value)
        .collect()
}

fn collection_items<'a>(envelope: &'a Value, collection: &str) -> &'a [Value] {
    envelope
        .get(collection)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Behaviour shared by every entity draft (form values).
pub trait Entity: Serialize + DeserializeOwned + Clone + Default + Send + Sync + 'static {
    /// Singular noun for messages, e.g. "application".
    const LABEL: &'static str;
    /// What a failed list load is called, e.g. "applications".
    const PLURAL: &'static str;

    /// Human names of required fields that are blank.
    fn missing_fields(&self) -> Vec<&'static str>;

    fn status(&self) -> Option<&str> {
        None
    }

    fn priority(&self) -> Option<&str> {
        None
    }

    /// Fill defaults the form expects when an existing record is opened for editing.
    fn prepare_for_edit(&mut self) {}

    fn validate(&self) -> Result<(), ClientError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ClientError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// An entity persisted by the REST API.
pub trait RemoteEntity: Entity {
    /// Key of the list inside the GET response envelope.
    const COLLECTION: &'static str;
    const PATH: &'static str;

    fn item_path(id: RecordId) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

/// `null` on the wire becomes the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
