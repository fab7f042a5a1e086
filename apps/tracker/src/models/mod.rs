//! Entity records and their wire schema.
//!
//! Each draft type is the display/form schema of one entity. Its serde
//! attributes are the wire mapping: `rename` for wire-field names, `alias`
//! for legacy keys, `default` for the null fallback.

pub mod application;
pub mod contact;
pub mod dashboard;
pub mod email;
pub mod interview;
pub mod record;
pub mod target_company;

pub use application::ApplicationDraft;
pub use contact::ContactDraft;
pub use dashboard::DashboardSummary;
pub use email::EmailDraft;
pub use interview::InterviewDraft;
pub use record::{Entity, Record, RecordId, RemoteEntity};
pub use target_company::TargetCompanyDraft;
