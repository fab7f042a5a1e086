//! Entity list controllers: one per page of the workspace.
//!
//! API-backed entities use [`RemoteList`]; networking contacts and the email
//! log are seeded in-memory collections driven by [`LocalList`].

pub mod dashboard;
pub mod local;
pub mod remote;
pub mod resume;
pub mod seeds;
pub mod targets;

#[cfg(test)]
pub mod testing;

use crate::models::{
    ApplicationDraft, ContactDraft, EmailDraft, InterviewDraft, TargetCompanyDraft,
};

pub use dashboard::DashboardPage;
pub use local::LocalList;
pub use remote::RemoteList;
pub use resume::{ResumeFile, ResumeMatcher};

pub type Applications = RemoteList<ApplicationDraft>;
pub type TargetCompanies = RemoteList<TargetCompanyDraft>;
pub type InterviewPrep = RemoteList<InterviewDraft>;
pub type Networking = LocalList<ContactDraft>;
pub type EmailTracking = LocalList<EmailDraft>;
