// src/domain/application.rs
//
// Job application - cover letter plus resume, sent once and never read back

use crate::domain::ValidationError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Resume attachment as picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn pdf(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(file_name, PDF_CONTENT_TYPE, bytes)
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type.eq_ignore_ascii_case(PDF_CONTENT_TYPE)
            || self.file_name.to_ascii_lowercase().ends_with(".pdf")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobApplication {
    pub job_id: String,
    pub cover_letter: String,
    pub resume: ResumeFile,
}

/// Cover letter required; resume must be a non-empty PDF
pub fn validate_application(cover_letter: &str, resume: Option<&ResumeFile>) -> Result<(), ValidationError> {
    let mut errors = ValidationError::new();

    if cover_letter.trim().is_empty() {
        errors.missing("coverLetter");
    }

    match resume {
        None => errors.missing("resume"),
        Some(file) if file.bytes.is_empty() => errors.problem("resume file is empty"),
        Some(file) if !file.is_pdf() => errors.problem("resume must be a PDF"),
        Some(_) => {}
    }

    errors.into_result()
}
