pub mod entity;
pub mod invariants;

pub use entity::{CompanySummary, CurrentUser, Job, JobDraft, JobListing};
pub use invariants::validate_job_draft;
