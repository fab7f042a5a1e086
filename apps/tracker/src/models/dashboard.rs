use serde::{Deserialize, Serialize};

/// Aggregate counters from `GET /api/tracker/dashboard`. Missing counters read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSummary {
    pub total_applications: u32,
    pub applications_this_week: u32,
    pub interviews_scheduled: u32,
    pub offers_received: u32,
    pub high_priority_applications: u32,
    pub average_hourly_rate: f64,
    pub applications_today: u32,
    pub success_rate: f64,
}
