// src/services/job_board.rs
//
// Job Board view - listing plus the apply dialog
//
// One dialog at a time. While a submission is in flight the dialog stays
// open and refuses a second submit.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::application::notifications::NotificationQueue;
use crate::domain::{DomainError, JobListing, ResumeFile};
use crate::error::{AppError, AppResult};
use crate::services::application_service::{ApplicationModal, ApplicationService};
use crate::services::job_service::JobService;
use crate::services::navigation::{Navigator, Route};

const SIGN_IN_TO_APPLY: &str = "Please log in to apply for jobs";

#[derive(Default)]
struct BoardState {
    listings: Vec<JobListing>,
    modal: Option<ApplicationModal>,
}

pub struct JobBoard {
    jobs: Arc<JobService>,
    applications: Arc<ApplicationService>,
    notifications: Arc<NotificationQueue>,
    navigator: Arc<Navigator>,
    state: Mutex<BoardState>,
}

impl JobBoard {
    pub fn new(
        jobs: Arc<JobService>,
        applications: Arc<ApplicationService>,
        notifications: Arc<NotificationQueue>,
        navigator: Arc<Navigator>,
    ) -> Self {
        Self {
            jobs,
            applications,
            notifications,
            navigator,
            state: Mutex::new(BoardState::default()),
        }
    }

    /// Re-fetch the listing. On failure the previous listing stays.
    pub async fn refresh(&self) -> AppResult<Vec<JobListing>> {
        match self.jobs.fetch_public_jobs().await {
            Ok(listings) => {
                self.state().listings = listings.clone();
                Ok(listings)
            }
            Err(e) => {
                self.notifications.report(&e);
                Err(e)
            }
        }
    }

    pub fn listings(&self) -> Vec<JobListing> {
        self.state().listings.clone()
    }

    pub fn modal(&self) -> Option<ApplicationModal> {
        self.state().modal.clone()
    }

    /// Open the dialog for a posting from the current listing
    pub fn open_application(&self, job_id: &str) -> AppResult<ApplicationModal> {
        let mut state = self.state();
        let listing = state
            .listings
            .iter()
            .find(|l| l.job.id == job_id)
            .ok_or(AppError::NotFound)?;

        if !listing.can_apply() {
            return Err(AppError::Domain(DomainError::InvariantViolation(
                "cannot apply to your own posting".to_string(),
            )));
        }

        let modal = ApplicationModal::open(&listing.job);
        state.modal = Some(modal.clone());
        Ok(modal)
    }

    pub fn set_cover_letter(&self, text: impl Into<String>) -> AppResult<()> {
        self.with_modal(|modal| modal.set_cover_letter(text))
    }

    pub fn attach_resume(&self, file: ResumeFile) -> AppResult<()> {
        self.with_modal(|modal| modal.attach_resume(file))
    }

    /// Closing mid-submission is refused
    pub fn close_application(&self) -> bool {
        let mut state = self.state();
        match &state.modal {
            Some(modal) if modal.submitting => false,
            _ => {
                state.modal = None;
                true
            }
        }
    }

    /// Submit the open dialog. Success closes it; failure leaves it open
    /// with the user's input intact. Without a usable session the user is
    /// told to log in and sent to the entry route.
    pub async fn submit_application(&self) -> AppResult<()> {
        let (job_id, cover_letter, resume) = {
            let mut state = self.state();
            let modal = state.modal.as_mut().ok_or(AppError::NotFound)?;
            if modal.submitting {
                return Err(AppError::Domain(DomainError::InvalidStateTransition(
                    "application already submitting".to_string(),
                )));
            }
            modal.submitting = true;
            (
                modal.job_id.clone(),
                modal.cover_letter.clone(),
                modal.resume.clone(),
            )
        };

        let result = self
            .applications
            .submit_application(&job_id, &cover_letter, resume)
            .await;

        let mut state = self.state();
        match &result {
            Ok(()) => state.modal = None,
            Err(e) => {
                if let Some(modal) = state.modal.as_mut() {
                    modal.submitting = false;
                }
                if matches!(e, AppError::Unauthenticated) {
                    self.notifications.error(SIGN_IN_TO_APPLY);
                } else {
                    self.notifications.report(e);
                }
            }
        }
        drop(state);

        if result.as_ref().is_err_and(AppError::requires_sign_in) {
            log::warn!("Application refused without a session, redirecting");
            self.navigator.navigate(Route::Entry);
        }
        result
    }

    fn with_modal<F>(&self, update: F) -> AppResult<()>
    where
        F: FnOnce(&mut ApplicationModal),
    {
        let mut state = self.state();
        let modal = state.modal.as_mut().ok_or(AppError::NotFound)?;
        update(modal);
        Ok(())
    }

    fn state(&self) -> MutexGuard<'_, BoardState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
