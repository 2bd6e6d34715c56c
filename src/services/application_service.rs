// src/services/application_service.rs
//
// Job applications
//
// CRITICAL RULES:
// - No token -> Unauthenticated, and no request is built
// - Cover letter and PDF resume are checked before anything is sent

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{validate_application, Job, JobApplication, ResumeFile};
use crate::error::{AppError, AppResult};
use crate::events::{ApplicationSubmitted, EventBus};
use crate::integrations::JobBoardApi;
use crate::repositories::SessionStore;

pub struct ApplicationService {
    api: Arc<dyn JobBoardApi>,
    session: Arc<dyn SessionStore>,
    event_bus: Arc<EventBus>,
}

impl ApplicationService {
    pub fn new(
        api: Arc<dyn JobBoardApi>,
        session: Arc<dyn SessionStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            api,
            session,
            event_bus,
        }
    }

    pub async fn submit_application(
        &self,
        job_id: &str,
        cover_letter: &str,
        resume: Option<ResumeFile>,
    ) -> AppResult<()> {
        if !self.session.get()?.is_authenticated() {
            log::warn!("Application to job {} refused: not signed in", job_id);
            return Err(AppError::Unauthenticated);
        }

        validate_application(cover_letter, resume.as_ref())?;
        let resume = resume
            .ok_or_else(|| AppError::Other("resume missing after validation".to_string()))?;

        let application = JobApplication {
            job_id: job_id.to_string(),
            cover_letter: cover_letter.to_string(),
            resume,
        };

        self.api.apply_to_job(&application).await.map_err(|e| {
            log::error!("Application to job {} failed: {}", job_id, e);
            e
        })?;

        log::info!("Applied to job {}", job_id);
        self.event_bus
            .emit(ApplicationSubmitted::new(job_id.to_string()));
        Ok(())
    }
}

/// The apply dialog for one posting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationModal {
    pub job_id: String,
    pub job_title: String,
    pub company_name: String,
    pub cover_letter: String,
    #[serde(skip)]
    pub resume: Option<ResumeFile>,
    /// A submission is in flight; the submit button is disabled
    pub submitting: bool,
}

impl ApplicationModal {
    pub fn open(job: &Job) -> Self {
        Self {
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            company_name: job.company_name().to_string(),
            cover_letter: String::new(),
            resume: None,
            submitting: false,
        }
    }

    pub fn heading(&self) -> String {
        format!("Apply for {}", self.job_title)
    }

    pub fn set_cover_letter(&mut self, text: impl Into<String>) {
        self.cover_letter = text.into();
    }

    pub fn attach_resume(&mut self, file: ResumeFile) {
        self.resume = Some(file);
    }

    pub fn resume_name(&self) -> Option<&str> {
        self.resume.as_ref().map(|r| r.file_name.as_str())
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && validate_application(&self.cover_letter, self.resume.as_ref()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Session;
    use crate::integrations::api::client::MockJobBoardApi;
    use crate::repositories::InMemorySessionStore;

    fn signed_in() -> Arc<InMemorySessionStore> {
        Arc::new(InMemorySessionStore::with_session(Session::new(
            Some("t1".to_string()),
            Some("Sam".to_string()),
            Some("s@x.com".to_string()),
        )))
    }

    fn resume() -> ResumeFile {
        ResumeFile::pdf("cv.pdf", b"%PDF-1.4".to_vec())
    }

    #[tokio::test]
    async fn test_no_token_means_no_request() {
        let mut api = MockJobBoardApi::new();
        api.expect_apply_to_job().times(0);
        let bus = Arc::new(EventBus::new());
        let service =
            ApplicationService::new(Arc::new(api), Arc::new(InMemorySessionStore::new()), bus.clone());

        let result = service
            .submit_application("j1", "Hire me", Some(resume()))
            .await;

        assert!(matches!(result, Err(AppError::Unauthenticated)));
        assert!(bus.get_event_log().is_empty());
    }

    #[tokio::test]
    async fn test_missing_resume_is_rejected_locally() {
        let mut api = MockJobBoardApi::new();
        api.expect_apply_to_job().times(0);
        let service =
            ApplicationService::new(Arc::new(api), signed_in(), Arc::new(EventBus::new()));

        let result = service.submit_application("j1", "", None).await;

        match result {
            Err(AppError::Validation(v)) => {
                assert_eq!(v.missing_fields, vec!["coverLetter", "resume"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submission_sends_multipart_payload_and_emits() {
        let mut api = MockJobBoardApi::new();
        api.expect_apply_to_job()
            .withf(|application| {
                application.job_id == "j1"
                    && application.cover_letter == "Hire me"
                    && application.resume.file_name == "cv.pdf"
            })
            .times(1)
            .returning(|_| Ok(()));
        let bus = Arc::new(EventBus::new());
        let service = ApplicationService::new(Arc::new(api), signed_in(), bus.clone());

        service
            .submit_application("j1", "Hire me", Some(resume()))
            .await
            .unwrap();

        assert_eq!(bus.get_event_log()[0].event_type, "ApplicationSubmitted");
    }

    #[tokio::test]
    async fn test_rejection_surfaces_server_message() {
        let mut api = MockJobBoardApi::new();
        api.expect_apply_to_job()
            .returning(|_| Err(AppError::request_failed(Some(400), "Already applied")));
        let service =
            ApplicationService::new(Arc::new(api), signed_in(), Arc::new(EventBus::new()));

        let result = service
            .submit_application("j1", "Hire me", Some(resume()))
            .await;

        match result {
            Err(AppError::RequestFailed { message, .. }) => assert_eq!(message, "Already applied"),
            other => panic!("expected request failure, got {:?}", other),
        }
    }

    #[test]
    fn test_modal_requires_letter_and_pdf() {
        let job: Job = serde_json::from_value(serde_json::json!({
            "_id": "j1",
            "title": "Closer",
            "company": { "firstName": "Acme" }
        }))
        .unwrap();
        let mut modal = ApplicationModal::open(&job);

        assert_eq!(modal.heading(), "Apply for Closer");
        assert_eq!(modal.company_name, "Acme");
        assert!(!modal.can_submit());

        modal.set_cover_letter("Hire me");
        modal.attach_resume(ResumeFile::new("cv.docx", "application/msword", vec![1]));
        assert!(!modal.can_submit());

        modal.attach_resume(resume());
        assert_eq!(modal.resume_name(), Some("cv.pdf"));
        assert!(modal.can_submit());

        modal.submitting = true;
        assert!(!modal.can_submit());
    }
}
