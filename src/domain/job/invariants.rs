use super::entity::JobDraft;
use crate::domain::ValidationError;

/// Title, description and requirements must be filled in
pub fn validate_job_draft(draft: &JobDraft) -> Result<(), ValidationError> {
    let mut errors = ValidationError::new();

    for (name, value) in [
        ("title", &draft.title),
        ("description", &draft.description),
        ("requirements", &draft.requirements),
    ] {
        if value.trim().is_empty() {
            errors.missing(name);
        }
    }

    errors.into_result()
}
