// src/domain/mod.rs
//
// Domain Root - entities the client reasons about and their local rules.
//
// The backend is the authority for every entity here. Rules in this layer
// only decide what the client refuses to send.

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod application;
pub mod job;
pub mod profile;
pub mod session;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Session
pub use session::Session;

// Profile Domain
pub use profile::{
    normalize_date_of_birth, validate_profile_form, Profile, ProfileField, ProfileForm,
    RegistrationKind,
};

// Job Domain
pub use job::{validate_job_draft, CompanySummary, CurrentUser, Job, JobDraft, JobListing};

// Applications
pub use application::{validate_application, JobApplication, ResumeFile};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use std::fmt;
use thiserror::Error;

/// Domain-level errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Field {0} cannot be changed")]
    FieldLocked(&'static str),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

/// Local form check failure. Raised before any request is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    /// Wire names of required fields left empty, in form order
    pub missing_fields: Vec<String>,
    /// Other problems (bad enum values, wrong attachment type)
    pub problems: Vec<String>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing(&mut self, field: impl Into<String>) {
        self.missing_fields.push(field.into());
    }

    pub fn problem(&mut self, message: impl Into<String>) {
        self.problems.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.missing_fields.is_empty() && self.problems.is_empty()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.missing_fields.is_empty() {
            parts.push(format!(
                "missing required fields: {}",
                self.missing_fields.join(", ")
            ));
        }
        parts.extend(self.problems.iter().cloned());
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}
