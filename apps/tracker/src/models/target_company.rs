use serde::{Deserialize, Serialize};

use super::record::{is_blank, null_as_default, Entity, RemoteEntity};

pub const DEFAULT_STATUS: &str = "To Apply";
pub const DEFAULT_PRIORITY: &str = "Medium";

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetCompanyDraft {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(rename = "remote_policy", default)]
    pub remote: Option<String>,
    #[serde(rename = "application_status", default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub priority: Option<String>,
}

impl Default for TargetCompanyDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: None,
            website: None,
            size: None,
            industry: None,
            remote: None,
            status: default_status(),
            priority: Some(DEFAULT_PRIORITY.to_string()),
        }
    }
}

impl TargetCompanyDraft {
    /// Search results arrive without tracking fields; they always start out
    /// as "To Apply" / "Medium".
    pub fn as_new_target(mut self) -> Self {
        self.status = default_status();
        self.priority = Some(DEFAULT_PRIORITY.to_string());
        self
    }
}

impl Entity for TargetCompanyDraft {
    const LABEL: &'static str = "target company";
    const PLURAL: &'static str = "target companies";

    fn missing_fields(&self) -> Vec<&'static str> {
        if is_blank(&self.name) {
            vec!["company name"]
        } else {
            Vec::new()
        }
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }

    fn priority(&self) -> Option<&str> {
        self.priority.as_deref()
    }
}

impl RemoteEntity for TargetCompanyDraft {
    const COLLECTION: &'static str = "companies";
    const PATH: &'static str = "/api/target-companies";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{Record, RecordId};
    use serde_json::json;

    #[test]
    fn test_maps_remote_policy_and_application_status() {
        let record: Record<TargetCompanyDraft> = Record::from_wire(json!({
            "id": 5,
            "name": "Globex",
            "role": "SRE",
            "website": "https://globex.example",
            "size": "Large",
            "industry": "Energy",
            "remote_policy": "Hybrid",
            "application_status": "Applied",
            "priority": "High"
        }))
        .unwrap();
        assert_eq!(record.id, RecordId::Server(5));
        assert_eq!(record.data.remote.as_deref(), Some("Hybrid"));
        assert_eq!(record.data.status, "Applied");
    }

    #[test]
    fn test_search_result_becomes_new_target() {
        let hit: TargetCompanyDraft = serde_json::from_value(json!({
            "name": "TechCorp rust",
            "website": "https://techcorprust.com",
            "size": "Large",
            "industry": "Technology",
            "remote_policy": "Hybrid",
            "role": "rust Developer"
        }))
        .unwrap();
        let target = hit.as_new_target();
        assert_eq!(target.status, "To Apply");
        assert_eq!(target.priority.as_deref(), Some("Medium"));
    }

    #[test]
    fn test_name_is_required() {
        assert_eq!(
            TargetCompanyDraft::default().missing_fields(),
            vec!["company name"]
        );
    }
}
