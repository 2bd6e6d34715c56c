// src/services/job_service.rs
//
// Public job listing
//
// No caching: every call re-fetches. Owner annotations are best effort.

use std::sync::Arc;

use crate::domain::{Job, JobListing};
use crate::error::AppResult;
use crate::integrations::JobBoardApi;
use crate::repositories::SessionStore;

pub struct JobService {
    api: Arc<dyn JobBoardApi>,
    session: Arc<dyn SessionStore>,
}

impl JobService {
    pub fn new(api: Arc<dyn JobBoardApi>, session: Arc<dyn SessionStore>) -> Self {
        Self { api, session }
    }

    /// All postings, each marked when the signed-in user posted it.
    ///
    /// A failed owner lookup drops the annotations but not the listing.
    pub async fn fetch_public_jobs(&self) -> AppResult<Vec<JobListing>> {
        let jobs = self.api.list_jobs().await.map_err(|e| {
            log::error!("Failed to fetch jobs: {}", e);
            e
        })?;

        let viewer = self.viewer_id().await;
        log::debug!(
            "Fetched {} jobs (viewer: {})",
            jobs.len(),
            viewer.as_deref().unwrap_or("anonymous")
        );

        Ok(annotate(jobs, viewer.as_deref()))
    }

    async fn viewer_id(&self) -> Option<String> {
        match self.session.get() {
            Ok(session) if session.is_authenticated() => {}
            Ok(_) => return None,
            Err(e) => {
                log::warn!("Could not read session for owner lookup: {}", e);
                return None;
            }
        }

        match self.api.current_user().await {
            Ok(user) => Some(user.id),
            Err(e) => {
                log::warn!("Owner lookup failed, listing without annotations: {}", e);
                None
            }
        }
    }
}

fn annotate(jobs: Vec<Job>, viewer: Option<&str>) -> Vec<JobListing> {
    jobs.into_iter()
        .map(|job| {
            let is_own_posting = job.is_owned_by(viewer);
            JobListing { job, is_own_posting }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurrentUser, Session};
    use crate::error::AppError;
    use crate::integrations::api::client::MockJobBoardApi;
    use crate::repositories::InMemorySessionStore;

    fn job(id: &str, owner: &str) -> Job {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "title": "Closer",
            "postedBy": owner
        }))
        .unwrap()
    }

    fn signed_in() -> Arc<InMemorySessionStore> {
        Arc::new(InMemorySessionStore::with_session(Session::new(
            Some("t1".to_string()),
            Some("Ada".to_string()),
            Some("a@x.com".to_string()),
        )))
    }

    #[tokio::test]
    async fn test_own_postings_are_annotated() {
        let mut api = MockJobBoardApi::new();
        api.expect_list_jobs()
            .times(1)
            .returning(|| Ok(vec![job("j1", "u1"), job("j2", "u2")]));
        api.expect_current_user()
            .times(1)
            .returning(|| Ok(CurrentUser { id: "u1".to_string() }));
        let service = JobService::new(Arc::new(api), signed_in());

        let listings = service.fetch_public_jobs().await.unwrap();

        assert!(listings[0].is_own_posting);
        assert!(!listings[0].can_apply());
        assert!(!listings[1].is_own_posting);
    }

    #[tokio::test]
    async fn test_anonymous_viewer_skips_owner_lookup() {
        let mut api = MockJobBoardApi::new();
        api.expect_list_jobs().returning(|| Ok(vec![job("j1", "u1")]));
        api.expect_current_user().times(0);
        let service = JobService::new(Arc::new(api), Arc::new(InMemorySessionStore::new()));

        let listings = service.fetch_public_jobs().await.unwrap();

        assert_eq!(listings.len(), 1);
        assert!(listings[0].can_apply());
    }

    #[tokio::test]
    async fn test_owner_lookup_failure_keeps_listing() {
        let mut api = MockJobBoardApi::new();
        api.expect_list_jobs().returning(|| Ok(vec![job("j1", "u1")]));
        api.expect_current_user()
            .returning(|| Err(AppError::request_failed(Some(500), "boom")));
        let service = JobService::new(Arc::new(api), signed_in());

        let listings = service.fetch_public_jobs().await.unwrap();

        assert_eq!(listings.len(), 1);
        assert!(!listings[0].is_own_posting);
    }

    #[tokio::test]
    async fn test_listing_failure_is_returned() {
        let mut api = MockJobBoardApi::new();
        api.expect_list_jobs()
            .returning(|| Err(AppError::request_failed(None, "connection refused")));
        let service = JobService::new(Arc::new(api), signed_in());

        assert!(matches!(
            service.fetch_public_jobs().await,
            Err(AppError::RequestFailed { .. })
        ));
    }
}
