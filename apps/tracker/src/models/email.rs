use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::Entity;
use crate::errors::ClientError;

pub const STATUS_OPTIONS: &[&str] = &["Sent", "Delivered", "Read", "Scheduled", "Failed", "Response"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmailDirection {
    #[default]
    Outbound,
    Inbound,
}

impl EmailDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            EmailDirection::Outbound => "Outbound",
            EmailDirection::Inbound => "Inbound",
        }
    }
}

/// Direction as typed on the command line, case-insensitive.
pub fn parse_direction(input: &str) -> Result<EmailDirection, ClientError> {
    match input.trim().to_ascii_lowercase().as_str() {
        "outbound" | "out" => Ok(EmailDirection::Outbound),
        "inbound" | "in" => Ok(EmailDirection::Inbound),
        _ => Err(ClientError::Validation(format!(
            "'{}' is not a direction (inbound or outbound)",
            input.trim()
        ))),
    }
}

/// One logged email exchange. Kept in memory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailDraft {
    pub company: String,
    pub contact: String,
    pub subject: String,
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub direction: EmailDirection,
    pub status: String,
    pub follow_up_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl Default for EmailDraft {
    fn default() -> Self {
        Self {
            company: String::new(),
            contact: String::new(),
            subject: String::new(),
            date: None,
            direction: EmailDirection::Outbound,
            status: "Sent".to_string(),
            follow_up_date: None,
            notes: None,
        }
    }
}

impl Entity for EmailDraft {
    const LABEL: &'static str = "email record";
    const PLURAL: &'static str = "email records";

    fn missing_fields(&self) -> Vec<&'static str> {
        Vec::new()
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }
}
