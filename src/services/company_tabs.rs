// src/services/company_tabs.rs
//
// Company Tabs - job management for company accounts
//
// Shown under a complete company profile. Works on Job entities only and
// never touches the profile state machine.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::application::notifications::NotificationQueue;
use crate::domain::{validate_job_draft, Job, JobDraft};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, JobDeleted, JobPosted, JobUpdated};
use crate::integrations::JobBoardApi;
use crate::services::navigation::{Navigator, Route};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyTab {
    #[default]
    PostJob,
    CurrentPostings,
    Employees,
}

impl CompanyTab {
    pub const ALL: [CompanyTab; 3] = [
        CompanyTab::PostJob,
        CompanyTab::CurrentPostings,
        CompanyTab::Employees,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CompanyTab::PostJob => "Post Job",
            CompanyTab::CurrentPostings => "Current Postings",
            CompanyTab::Employees => "Employees",
        }
    }

    /// Placeholder text when the tab has nothing to list
    pub fn empty_message(&self) -> Option<&'static str> {
        match self {
            CompanyTab::PostJob => None,
            CompanyTab::CurrentPostings => Some("No active job postings yet"),
            CompanyTab::Employees => Some("No employees found"),
        }
    }
}

/// Someone working for the company. No endpoint serves these yet, so the
/// roster is always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub name: String,
    pub email: String,
}

#[derive(Default)]
struct TabsState {
    active: CompanyTab,
    postings: Vec<Job>,
}

pub struct CompanyTabs {
    api: Arc<dyn JobBoardApi>,
    event_bus: Arc<EventBus>,
    notifications: Arc<NotificationQueue>,
    navigator: Arc<Navigator>,
    state: Mutex<TabsState>,
}

impl CompanyTabs {
    pub fn new(
        api: Arc<dyn JobBoardApi>,
        event_bus: Arc<EventBus>,
        notifications: Arc<NotificationQueue>,
        navigator: Arc<Navigator>,
    ) -> Self {
        Self {
            api,
            event_bus,
            notifications,
            navigator,
            state: Mutex::new(TabsState::default()),
        }
    }

    pub fn active(&self) -> CompanyTab {
        self.state().active
    }

    pub fn select(&self, tab: CompanyTab) {
        log::debug!("Company tab -> {:?}", tab);
        self.state().active = tab;
    }

    /// Postings from the last successful load
    pub fn postings(&self) -> Vec<Job> {
        self.state().postings.clone()
    }

    pub fn employees(&self) -> Vec<Employee> {
        Vec::new()
    }

    /// Edit form seeded from a loaded posting
    pub fn edit_draft(&self, job_id: &str) -> AppResult<JobDraft> {
        self.state()
            .postings
            .iter()
            .find(|posting| posting.id == job_id)
            .map(Job::to_draft)
            .ok_or(AppError::NotFound)
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Validate locally, then create. Invalid drafts never reach the API.
    pub async fn post_job(&self, draft: &JobDraft) -> AppResult<Job> {
        let result = self.create(draft).await;
        self.report_failure(&result);
        result
    }

    pub async fn load_postings(&self) -> AppResult<Vec<Job>> {
        let result = self.api.list_company_jobs().await;
        if let Ok(jobs) = &result {
            log::debug!("Loaded {} company postings", jobs.len());
            self.state().postings = jobs.clone();
        }
        self.report_failure(&result);
        result
    }

    pub async fn update_job(&self, job_id: &str, draft: &JobDraft) -> AppResult<Job> {
        let result = self.update(job_id, draft).await;
        self.report_failure(&result);
        result
    }

    /// Returns `Ok(false)` without a request when not confirmed
    pub async fn delete_job(&self, job_id: &str, confirmed: bool) -> AppResult<bool> {
        if !confirmed {
            return Ok(false);
        }

        let result = self.api.delete_job(job_id).await;
        self.report_failure(&result);
        result?;

        self.state().postings.retain(|job| job.id != job_id);
        self.event_bus.emit(JobDeleted::new(job_id.to_string()));
        Ok(true)
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    async fn create(&self, draft: &JobDraft) -> AppResult<Job> {
        validate_job_draft(draft)?;

        let job = self.api.create_job(draft).await?;
        log::info!("Posted job {} ({})", job.id, job.title);

        self.state().postings.insert(0, job.clone());
        self.event_bus
            .emit(JobPosted::new(job.id.clone(), job.title.clone()));
        Ok(job)
    }

    async fn update(&self, job_id: &str, draft: &JobDraft) -> AppResult<Job> {
        validate_job_draft(draft)?;

        let job = self.api.update_job(job_id, draft).await?;
        log::info!("Updated job {}", job_id);

        if let Some(existing) = self
            .state()
            .postings
            .iter_mut()
            .find(|posting| posting.id == job_id)
        {
            *existing = job.clone();
        }
        self.event_bus.emit(JobUpdated::new(job_id.to_string()));
        Ok(job)
    }

    /// Queue the failure. A rejected session also sends the host to the
    /// entry route.
    fn report_failure<T>(&self, result: &AppResult<T>) {
        let Err(e) = result else {
            return;
        };

        if !matches!(e, AppError::Validation(_)) {
            log::error!("Job operation failed: {}", e);
        }
        self.notifications.report(e);

        if e.requires_sign_in() {
            log::warn!("Session rejected during job operation, redirecting");
            self.navigator.navigate(Route::Entry);
        }
    }

    fn state(&self) -> MutexGuard<'_, TabsState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
