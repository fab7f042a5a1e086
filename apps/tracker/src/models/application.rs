use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{is_blank, null_as_default, Entity, RemoteEntity};
use crate::errors::ClientError;

pub const STATUS_OPTIONS: &[&str] = &["Applied", "Processing", "Interview", "Rejected", "Offer"];
pub const PRIORITY_OPTIONS: &[&str] = &["Low", "Medium", "High"];
pub const DEFAULT_PRIORITY: &str = "Medium";

/// A job application as edited in the form.
///
/// Wire fields: company, role_title, location, hourly_rate, applied_date,
/// status, application_source, contact_email, priority_level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role_title: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub applied_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(rename = "application_source", default)]
    pub source: Option<String>,
    #[serde(rename = "contact_email", default)]
    pub contact: Option<String>,
    #[serde(rename = "priority_level", default)]
    pub priority: Option<String>,
}

impl Default for ApplicationDraft {
    fn default() -> Self {
        Self {
            company: String::new(),
            role_title: String::new(),
            location: None,
            hourly_rate: None,
            applied_date: None,
            status: "Applied".to_string(),
            source: None,
            contact: None,
            priority: Some(DEFAULT_PRIORITY.to_string()),
        }
    }
}

impl Entity for ApplicationDraft {
    const LABEL: &'static str = "application";
    const PLURAL: &'static str = "applications";

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.company) {
            missing.push("company");
        }
        if is_blank(&self.role_title) {
            missing.push("role title");
        }
        missing
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }

    fn priority(&self) -> Option<&str> {
        self.priority.as_deref()
    }

    fn prepare_for_edit(&mut self) {
        if self.priority.as_deref().map_or(true, is_blank) {
            self.priority = Some(DEFAULT_PRIORITY.to_string());
        }
    }
}

impl RemoteEntity for ApplicationDraft {
    const COLLECTION: &'static str = "applications";
    const PATH: &'static str = "/api/applications";
}

/// Hourly rate as typed into the form: blank means "not set".
pub fn parse_hourly_rate(input: &str) -> Result<Option<f64>, ClientError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    match input.parse::<f64>() {
        Ok(rate) if rate.is_finite() => Ok(Some(rate)),
        _ => Err(ClientError::Validation(format!(
            "'{input}' is not a valid hourly rate"
        ))),
    }
}

/// Calendar date as typed into the form (`YYYY-MM-DD`); blank means "not set".
pub fn parse_form_date(input: &str) -> Result<Option<NaiveDate>, ClientError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ClientError::Validation(format!("'{input}' is not a YYYY-MM-DD date")))
}
