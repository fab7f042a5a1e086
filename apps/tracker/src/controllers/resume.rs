//! Resume upload and job matching.
//!
//! A resume is checked locally (type and size), uploaded as multipart, and the
//! server answers with a list of matching jobs. Any match can be saved as a
//! target company.

use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{RemoteEntity, TargetCompanyDraft};
use crate::notify::NotificationRelay;
use crate::transport::FilePart;

pub const UPLOAD_PATH: &str = "/api/upload-resume";
pub const UPLOAD_FIELD: &str = "resume";
pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

const ACCEPTED: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
];

/// A resume that passed the local checks and is ready to upload.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    file_name: String,
    mime: String,
    bytes: Bytes,
}

impl ResumeFile {
    /// Accepts Word, PDF and image files up to 10 MiB. When `mime` is absent
    /// the type is taken from the file extension.
    pub fn new(
        file_name: impl Into<String>,
        mime: Option<&str>,
        bytes: impl Into<Bytes>,
    ) -> Result<Self, ClientError> {
        let file_name = file_name.into();
        let bytes = bytes.into();

        let mime = match mime {
            Some("image/jpg") => Some("image/jpeg"),
            Some(given) => ACCEPTED
                .iter()
                .find(|(_, accepted)| *accepted == given)
                .map(|(_, accepted)| *accepted),
            None => mime_for_extension(&file_name),
        }
        .ok_or_else(|| {
            ClientError::Validation(
                "Please upload a Word document (.doc, .docx), PDF, or image file (.png, .jpg, .jpeg)"
                    .to_string(),
            )
        })?;

        if bytes.len() > MAX_RESUME_BYTES {
            return Err(ClientError::Validation(
                "Please upload a file smaller than 10MB".to_string(),
            ));
        }

        Ok(Self {
            file_name,
            mime: mime.to_string(),
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn size_mib(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0 / 1024.0
    }

    fn into_part(self) -> FilePart {
        FilePart {
            field: UPLOAD_FIELD.to_string(),
            file_name: self.file_name,
            mime: self.mime,
            bytes: self.bytes,
        }
    }
}

fn mime_for_extension(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    ACCEPTED
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// One suggested job from the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default, alias = "remote_policy")]
    pub remote_policy: Option<String>,
    #[serde(default)]
    pub apply_link: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, rename = "company_size")]
    pub company_size: Option<String>,
}

impl JobMatch {
    pub fn to_target(&self) -> TargetCompanyDraft {
        TargetCompanyDraft {
            name: self.company.clone(),
            role: Some(self.position.clone()),
            website: self.website.clone(),
            size: self.company_size.clone(),
            industry: self.industry.clone(),
            remote: self.remote_policy.clone(),
            ..Default::default()
        }
        .as_new_target()
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(rename = "jobMatches", default)]
    job_matches: Vec<JobMatch>,
}

pub struct ResumeMatcher {
    api: ApiClient,
    relay: NotificationRelay,
    matches: Vec<JobMatch>,
}

impl ResumeMatcher {
    pub fn new(api: ApiClient, relay: NotificationRelay) -> Self {
        Self {
            api,
            relay,
            matches: Vec::new(),
        }
    }

    pub fn matches(&self) -> &[JobMatch] {
        &self.matches
    }

    /// Uploads the resume and replaces the current matches with the result.
    pub async fn upload(&mut self, file: ResumeFile) -> bool {
        let name = file.file_name.clone();
        let result = self
            .api
            .upload::<UploadResponse>(UPLOAD_PATH, file.into_part())
            .await;

        match result {
            Ok(response) => {
                info!("{name} matched {} jobs", response.job_matches.len());
                self.matches = response.job_matches;
                true
            }
            Err(e) => {
                warn!("Failed to upload resume: {e}");
                self.relay.error("Failed to upload resume");
                false
            }
        }
    }

    pub async fn add_to_targets(&self, job: &JobMatch) -> bool {
        let result = self
            .api
            .post_json::<_, Value>(TargetCompanyDraft::PATH, &job.to_target())
            .await;
        match result {
            Ok(_) => {
                self.relay
                    .success(format!("{} added to target companies!", job.company));
                true
            }
            Err(e) => {
                warn!("Failed to add {} to targets: {e}", job.company);
                self.relay.error("Failed to add company to targets");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testing::logged_in_api;
    use crate::notify::NotificationKind;
    use crate::transport::testing::FakeApi;
    use crate::transport::{Method, RequestBody};
    use serde_json::json;

    fn matches_payload() -> Value {
        json!({
            "message": "Resume uploaded successfully",
            "jobMatches": [
                {
                    "company": "Tech Innovations Inc.",
                    "position": "Senior Software Engineer",
                    "industry": "Technology",
                    "salaryRange": "$90,000 - $130,000",
                    "remotePolicy": "Hybrid",
                    "applyLink": "https://techinnovations.com/jobs/123"
                },
                {
                    "company": "Global Solutions Ltd.",
                    "position": "Frontend Developer",
                    "industry": "Consulting",
                    "salaryRange": "$70,000 - $100,000",
                    "remotePolicy": "Remote",
                    "applyLink": "https://globalsolutions.com/jobs/456"
                }
            ]
        })
    }

    #[test]
    fn test_type_from_extension() {
        let file = ResumeFile::new("cv.DOCX", None, vec![1u8; 16]).unwrap();
        assert_eq!(
            file.mime(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(ResumeFile::new("cv.jpg", Some("image/jpg"), vec![0u8]).unwrap().mime(), "image/jpeg");
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let err = ResumeFile::new("cv.txt", None, vec![0u8]).unwrap_err();
        assert!(err.to_string().contains("Word document"));
        assert!(ResumeFile::new("cv.pdf", Some("text/plain"), vec![0u8]).is_err());
        assert!(ResumeFile::new("resume", None, vec![0u8]).is_err());
    }

    #[test]
    fn test_rejects_oversized_file() {
        let err = ResumeFile::new("cv.pdf", None, vec![0u8; MAX_RESUME_BYTES + 1]).unwrap_err();
        assert!(err.to_string().contains("smaller than 10MB"));
        assert!(ResumeFile::new("cv.pdf", None, vec![0u8; MAX_RESUME_BYTES]).is_ok());
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_and_keeps_matches() {
        let fake = FakeApi::new().on(Method::Post, UPLOAD_PATH, 200, matches_payload());
        let (api, fake) = logged_in_api(fake).await;
        let mut matcher = ResumeMatcher::new(api, NotificationRelay::for_shell());
        let file = ResumeFile::new("cv.pdf", Some("application/pdf"), b"%PDF-1.7".to_vec()).unwrap();

        assert!(matcher.upload(file).await);

        assert_eq!(matcher.matches().len(), 2);
        assert_eq!(matcher.matches()[0].salary_range.as_deref(), Some("$90,000 - $130,000"));
        assert_eq!(matcher.matches()[1].remote_policy.as_deref(), Some("Remote"));

        let upload = fake.requests().into_iter().find(|r| r.path == UPLOAD_PATH).unwrap();
        assert_eq!(upload.content_type(), None);
        let RequestBody::Multipart(part) = upload.body else {
            panic!("expected multipart");
        };
        assert_eq!(part.field, "resume");
        assert_eq!(part.file_name, "cv.pdf");
    }

    #[tokio::test]
    async fn test_failed_upload_notifies() {
        let fake = FakeApi::new().on(Method::Post, UPLOAD_PATH, 400, json!({"message": "No file part"}));
        let (api, _) = logged_in_api(fake).await;
        let relay = NotificationRelay::for_shell();
        let mut matcher = ResumeMatcher::new(api, relay.clone());
        let file = ResumeFile::new("cv.png", None, vec![0u8; 4]).unwrap();

        assert!(!matcher.upload(file).await);

        assert!(matcher.matches().is_empty());
        assert_eq!(relay.current().unwrap().text, "Failed to upload resume");
    }

    #[tokio::test]
    async fn test_add_match_to_targets() {
        let fake = FakeApi::new()
            .on(Method::Post, UPLOAD_PATH, 200, matches_payload())
            .on(Method::Post, "/api/target-companies", 201, json!({"message": "Target company added successfully"}));
        let (api, fake) = logged_in_api(fake).await;
        let relay = NotificationRelay::for_shell();
        let mut matcher = ResumeMatcher::new(api, relay.clone());
        matcher
            .upload(ResumeFile::new("cv.pdf", None, vec![0u8; 8]).unwrap())
            .await;
        let job = matcher.matches()[0].clone();

        assert!(matcher.add_to_targets(&job).await);

        let shown = relay.current().unwrap();
        assert_eq!(shown.kind, NotificationKind::Success);
        assert_eq!(shown.text, "Tech Innovations Inc. added to target companies!");
        let post = fake
            .requests()
            .into_iter()
            .find(|r| r.path == "/api/target-companies")
            .unwrap();
        let RequestBody::Json(body) = post.body else {
            panic!("expected a JSON body");
        };
        assert_eq!(body["name"], "Tech Innovations Inc.");
        assert_eq!(body["role"], "Senior Software Engineer");
        assert_eq!(body["remote_policy"], "Hybrid");
        assert_eq!(body["application_status"], "To Apply");
        assert_eq!(body["priority"], "Medium");
    }

    #[tokio::test]
    async fn test_add_match_failure_message() {
        let fake = FakeApi::new().fail_on(Method::Post, "/api/target-companies");
        let (api, _) = logged_in_api(fake).await;
        let relay = NotificationRelay::for_shell();
        let matcher = ResumeMatcher::new(api, relay.clone());
        let job: JobMatch = serde_json::from_value(json!({"company": "Acme", "position": "Dev"})).unwrap();

        assert!(!matcher.add_to_targets(&job).await);

        assert_eq!(relay.current().unwrap().text, "Failed to add company to targets");
    }
}
