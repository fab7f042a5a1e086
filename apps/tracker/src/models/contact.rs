use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{is_blank, Entity};

pub const HOW_MET_OPTIONS: &[&str] = &[
    "Conference",
    "LinkedIn",
    "Networking event",
    "Referral",
    "Work",
    "Social event",
    "Other",
];

/// A networking contact. Kept in memory only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub date_met: Option<NaiveDate>,
    pub how_met: Option<String>,
    pub next_action: Option<String>,
    pub next_action_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl Entity for ContactDraft {
    const LABEL: &'static str = "connection";
    const PLURAL: &'static str = "connections";

    fn missing_fields(&self) -> Vec<&'static str> {
        if is_blank(&self.name) {
            vec!["name"]
        } else {
            Vec::new()
        }
    }
}
