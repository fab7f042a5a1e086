use serde::{Deserialize, Serialize};

use super::record::{is_blank, Entity, RemoteEntity};

/// An upcoming interview. Older exports use spreadsheet column names, which
/// are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewDraft {
    #[serde(default, alias = "Company")]
    pub company: Option<String>,
    #[serde(default, alias = "Role")]
    pub role: Option<String>,
    #[serde(default, alias = "Interview Date")]
    pub date: Option<String>,
    #[serde(rename = "type", default, alias = "Interview Type")]
    pub kind: Option<String>,
    #[serde(default, alias = "Interviewer")]
    pub interviewer: Option<String>,
    #[serde(default, alias = "Questions to Ask")]
    pub questions: Option<String>,
    #[serde(default, alias = "Research Notes")]
    pub notes: Option<String>,
}

impl Entity for InterviewDraft {
    const LABEL: &'static str = "interview";
    const PLURAL: &'static str = "interview prep data";

    fn missing_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("company", &self.company),
            ("role", &self.role),
            ("interview date", &self.date),
            ("interview type", &self.kind),
        ];
        fields
            .into_iter()
            .filter(|(_, value)| value.as_deref().map_or(true, is_blank))
            .map(|(name, _)| name)
            .collect()
    }
}

impl RemoteEntity for InterviewDraft {
    const COLLECTION: &'static str = "interviews";
    const PATH: &'static str = "/api/interviews";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{Record, RecordId};
    use serde_json::json;

    #[test]
    fn test_reads_api_field_names() {
        let record: Record<InterviewDraft> = Record::from_wire(json!({
            "id": 1,
            "company": "Tech Innovations Inc.",
            "role": "Senior Software Engineer",
            "date": "2025-01-15",
            "type": "Technical Interview",
            "interviewer": "John Smith",
            "questions": "What projects have you worked on?",
            "notes": "Focus on system design skills"
        }))
        .unwrap();
        assert_eq!(record.id, RecordId::Server(1));
        assert_eq!(record.data.kind.as_deref(), Some("Technical Interview"));
    }

    #[test]
    fn test_reads_spreadsheet_column_names() {
        let record: Record<InterviewDraft> = Record::from_wire(json!({
            "id": 2,
            "Company": "Globex",
            "Role": "SRE",
            "Interview Date": "2025-02-03",
            "Interview Type": "Onsite",
            "Interviewer": "Hank",
            "Questions to Ask": "On-call load?",
            "Research Notes": "Read the outage postmortems"
        }))
        .unwrap();
        let interview = record.data;
        assert_eq!(interview.company.as_deref(), Some("Globex"));
        assert_eq!(interview.date.as_deref(), Some("2025-02-03"));
        assert_eq!(interview.kind.as_deref(), Some("Onsite"));
        assert_eq!(interview.notes.as_deref(), Some("Read the outage postmortems"));
    }

    #[test]
    fn test_required_fields_for_scheduling() {
        let draft = InterviewDraft {
            company: Some("Globex".into()),
            role: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(
            draft.missing_fields(),
            vec!["role", "interview date", "interview type"]
        );
    }
}
