//! Derived views over record lists: status/priority classes and the pipeline.
//!
//! All matching is a case-insensitive substring test, so free-text values
//! like "Applied - waiting" still land somewhere sensible.

use crate::models::{Entity, Record};

/// Fixed pipeline columns for applications, in display order.
pub const APPLICATION_PIPELINE: &[&str] = &["Applied", "Processing", "Interview", "Offer", "Rejected"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Applied,
    Screening,
    Interview,
    Offer,
    Rejected,
    Other,
}

impl StatusClass {
    pub fn of(status: Option<&str>) -> Self {
        let Some(status) = status else {
            return StatusClass::Other;
        };
        let lower = status.to_lowercase();
        if lower.contains("applied") {
            StatusClass::Applied
        } else if lower.contains("screening") {
            StatusClass::Screening
        } else if lower.contains("interview") {
            StatusClass::Interview
        } else if lower.contains("offer") {
            StatusClass::Offer
        } else if lower.contains("rejected") {
            StatusClass::Rejected
        } else {
            StatusClass::Other
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusClass::Applied => "status-applied",
            StatusClass::Screening => "status-screening",
            StatusClass::Interview => "status-interview",
            StatusClass::Offer => "status-offer",
            StatusClass::Rejected => "status-rejected",
            StatusClass::Other => "status-other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityClass {
    High,
    Medium,
    Low,
    Default,
}

impl PriorityClass {
    pub fn of(priority: Option<&str>) -> Self {
        let Some(priority) = priority else {
            return PriorityClass::Default;
        };
        let lower = priority.to_lowercase();
        if lower.contains("high") {
            PriorityClass::High
        } else if lower.contains("medium") {
            PriorityClass::Medium
        } else if lower.contains("low") {
            PriorityClass::Low
        } else {
            PriorityClass::Default
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriorityClass::High => "bg-danger",
            PriorityClass::Medium => "bg-warning",
            PriorityClass::Low => "bg-success",
            PriorityClass::Default => "bg-secondary",
        }
    }
}

#[derive(Debug)]
pub struct PipelineColumn<'a, D> {
    pub status: &'static str,
    pub records: Vec<&'a Record<D>>,
}

/// Records whose status contains `status`, ignoring case, in list order.
pub fn bucket<'a, D: Entity>(records: &'a [Record<D>], status: &str) -> Vec<&'a Record<D>> {
    let needle = status.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .data
                .status()
                .is_some_and(|s| s.to_lowercase().contains(&needle))
        })
        .collect()
}

/// One column per bucket. Records matching no bucket are left out; a record
/// whose status mentions two buckets shows up in both.
pub fn pipeline<'a, D: Entity>(
    records: &'a [Record<D>],
    buckets: &[&'static str],
) -> Vec<PipelineColumn<'a, D>> {
    buckets
        .iter()
        .map(|&status| PipelineColumn {
            status,
            records: bucket(records, status),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApplicationDraft, RecordId};

    fn app(id: i64, status: &str) -> Record<ApplicationDraft> {
        Record::new(
            RecordId::Server(id),
            ApplicationDraft {
                company: format!("Company {id}"),
                role_title: "Engineer".into(),
                status: status.into(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_applied_bucket_matches_case_insensitively() {
        let records = vec![
            app(1, "Applied"),
            app(2, "applied"),
            app(3, "Processing"),
            app(4, "Weird"),
        ];

        let applied = bucket(&records, "Applied");
        let ids: Vec<_> = applied.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RecordId::Server(1), RecordId::Server(2)]);
    }

    #[test]
    fn test_unmatched_status_appears_in_no_column() {
        let records = vec![
            app(1, "Applied"),
            app(2, "applied"),
            app(3, "Processing"),
            app(4, "Weird"),
        ];

        let columns = pipeline(&records, APPLICATION_PIPELINE);

        assert_eq!(columns.len(), 5);
        assert_eq!(columns[0].records.len(), 2);
        assert_eq!(columns[1].records.len(), 1);
        assert!(columns
            .iter()
            .all(|c| c.records.iter().all(|r| r.id != RecordId::Server(4))));
    }

    #[test]
    fn test_status_class() {
        assert_eq!(StatusClass::of(Some("Phone Screening")), StatusClass::Screening);
        assert_eq!(StatusClass::of(Some("OFFER extended")), StatusClass::Offer);
        assert_eq!(StatusClass::of(Some("Ghosted")), StatusClass::Other);
        assert_eq!(StatusClass::of(None).label(), "status-other");
    }

    #[test]
    fn test_priority_class() {
        assert_eq!(PriorityClass::of(Some("HIGH")), PriorityClass::High);
        assert_eq!(PriorityClass::of(Some("medium-ish")), PriorityClass::Medium);
        assert_eq!(PriorityClass::of(Some("low")).label(), "bg-success");
        assert_eq!(PriorityClass::of(Some("urgent")), PriorityClass::Default);
        assert_eq!(PriorityClass::of(None), PriorityClass::Default);
    }
}
