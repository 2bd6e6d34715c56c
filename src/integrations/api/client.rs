// src/integrations/api/client.rs
//
// Job board REST API client
//
// ARCHITECTURE:
// - Thin HTTP wrapper: base URL + bearer token from the session store
// - Maps wire data -> domain types, never mutates client state
// - No retry, no pooling policy, no backoff
//
// CRITICAL RULES:
// - Calls that need a session fail with Unauthenticated BEFORE a request
//   is built when no token is stored
// - Non-2xx answers become RequestFailed carrying the server's message

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, multipart, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::types::{AuthResponse, CredentialRequest, ErrorPayload};
use crate::domain::{CurrentUser, Job, JobApplication, JobDraft, Profile};
use crate::error::{AppError, AppResult};
use crate::repositories::SessionStore;

/// Operations the client performs against the backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobBoardApi: Send + Sync {
    /// Exchange an identity-provider credential for a backend session
    async fn verify_google_credential(&self, credential: &str) -> AppResult<AuthResponse>;

    async fn current_user(&self) -> AppResult<CurrentUser>;

    /// `None` when the user has no profile yet (404)
    async fn fetch_profile(&self) -> AppResult<Option<Profile>>;

    /// Create or update; returns the profile as persisted
    async fn save_profile(&self, profile: &Profile) -> AppResult<Profile>;

    async fn delete_account(&self) -> AppResult<()>;

    /// Public listing; sends the token when there is one
    async fn list_jobs(&self) -> AppResult<Vec<Job>>;

    /// Postings owned by the signed-in company
    async fn list_company_jobs(&self) -> AppResult<Vec<Job>>;

    async fn create_job(&self, draft: &JobDraft) -> AppResult<Job>;

    async fn update_job(&self, job_id: &str, draft: &JobDraft) -> AppResult<Job>;

    async fn delete_job(&self, job_id: &str) -> AppResult<()>;

    /// Multipart upload of cover letter and resume
    async fn apply_to_job(&self, application: &JobApplication) -> AppResult<()>;
}

/// Single posting, either bare or wrapped as `{ "job": ... }`
#[derive(Deserialize)]
#[serde(untagged)]
enum JobEnvelope {
    Bare(Job),
    Wrapped { job: Job },
}

impl From<JobEnvelope> for Job {
    fn from(envelope: JobEnvelope) -> Self {
        match envelope {
            JobEnvelope::Bare(job) | JobEnvelope::Wrapped { job } => job,
        }
    }
}

/// reqwest implementation of [`JobBoardApi`]
pub struct HttpApiClient {
    base_url: String,
    http_client: Client,
    session: Arc<dyn SessionStore>,
}

impl HttpApiClient {
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<dyn SessionStore>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // INTERNAL: Request plumbing
    // ========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Token if one is stored
    fn optional_token(&self) -> AppResult<Option<String>> {
        Ok(self.session.get()?.token)
    }

    /// Token or `Unauthenticated`; nothing is sent in the error case
    fn required_token(&self) -> AppResult<String> {
        self.optional_token()?.ok_or(AppError::Unauthenticated)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let mut request = self
            .http_client
            .request(method, self.url(path))
            .header(header::ACCEPT, "application/json");

        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        request
    }

    /// Send and turn non-2xx answers into `RequestFailed`
    async fn send(&self, request: RequestBuilder, label: &str) -> AppResult<Response> {
        let response = self.dispatch(request, label).await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        Ok(response)
    }

    /// Send without judging the status
    async fn dispatch(&self, request: RequestBuilder, label: &str) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            log::warn!("{} failed before a response: {}", label, e);
            AppError::from(e)
        })?;

        log::debug!("{} -> {}", label, response.status());
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, label: &str) -> AppResult<T> {
        let response = self.send(request, label).await?;

        response.json::<T>().await.map_err(|e| {
            AppError::request_failed(None, format!("Failed to parse {} response: {}", label, e))
        })
    }

    /// Build the error for a non-2xx response
    async fn failure(response: Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = server_message(&body).unwrap_or_else(|| generic_failure(status));
        log::warn!("Request rejected with {}: {}", status, message);

        AppError::request_failed(Some(status.as_u16()), message)
    }
}

/// The `message` field of an error payload, if the body has one
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.message)
        .filter(|message| !message.trim().is_empty())
}

fn generic_failure(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("Request failed with status {} {}", status.as_u16(), reason),
        None => format!("Request failed with status {}", status.as_u16()),
    }
}

#[async_trait]
impl JobBoardApi for HttpApiClient {
    async fn verify_google_credential(&self, credential: &str) -> AppResult<AuthResponse> {
        let request = self
            .request(Method::POST, "/auth/google/verify", None)
            .json(&CredentialRequest { credential });

        self.send_json(request, "POST /auth/google/verify").await
    }

    async fn current_user(&self) -> AppResult<CurrentUser> {
        let token = self.required_token()?;
        let request = self.request(Method::GET, "/api/users/me", Some(&token));

        self.send_json(request, "GET /api/users/me").await
    }

    async fn fetch_profile(&self) -> AppResult<Option<Profile>> {
        let token = self.required_token()?;
        let request = self.request(Method::GET, "/api/profile", Some(&token));

        let response = self.dispatch(request, "GET /api/profile").await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        let profile = response.json::<Profile>().await.map_err(|e| {
            AppError::request_failed(None, format!("Failed to parse profile response: {}", e))
        })?;
        Ok(Some(profile))
    }

    async fn save_profile(&self, profile: &Profile) -> AppResult<Profile> {
        let token = self.required_token()?;
        let request = self
            .request(Method::POST, "/api/profile", Some(&token))
            .json(profile);

        self.send_json(request, "POST /api/profile").await
    }

    async fn delete_account(&self) -> AppResult<()> {
        let token = self.required_token()?;
        let request = self.request(Method::DELETE, "/api/users/delete-account", Some(&token));

        self.send(request, "DELETE /api/users/delete-account").await?;
        Ok(())
    }

    async fn list_jobs(&self) -> AppResult<Vec<Job>> {
        let token = self.optional_token()?;
        let request = self.request(Method::GET, "/api/jobs", token.as_deref());

        self.send_json(request, "GET /api/jobs").await
    }

    async fn list_company_jobs(&self) -> AppResult<Vec<Job>> {
        let token = self.required_token()?;
        let request = self.request(Method::GET, "/api/jobs/company-jobs", Some(&token));

        self.send_json(request, "GET /api/jobs/company-jobs").await
    }

    async fn create_job(&self, draft: &JobDraft) -> AppResult<Job> {
        let token = self.required_token()?;
        let request = self
            .request(Method::POST, "/api/jobs", Some(&token))
            .json(draft);

        let envelope: JobEnvelope = self.send_json(request, "POST /api/jobs").await?;
        Ok(envelope.into())
    }

    async fn update_job(&self, job_id: &str, draft: &JobDraft) -> AppResult<Job> {
        let token = self.required_token()?;
        let path = format!("/api/jobs/{}", job_id);
        let request = self.request(Method::PUT, &path, Some(&token)).json(draft);

        let envelope: JobEnvelope = self.send_json(request, &format!("PUT {}", path)).await?;
        Ok(envelope.into())
    }

    async fn delete_job(&self, job_id: &str) -> AppResult<()> {
        let token = self.required_token()?;
        let path = format!("/api/jobs/{}", job_id);
        let request = self.request(Method::DELETE, &path, Some(&token));

        self.send(request, &format!("DELETE {}", path)).await?;
        Ok(())
    }

    async fn apply_to_job(&self, application: &JobApplication) -> AppResult<()> {
        let token = self.required_token()?;
        let path = format!("/api/jobs/{}/apply", application.job_id);

        let resume = multipart::Part::bytes(application.resume.bytes.clone())
            .file_name(application.resume.file_name.clone())
            .mime_str(&application.resume.content_type)
            .map_err(|e| AppError::Other(format!("Invalid resume content type: {}", e)))?;
        let form = multipart::Form::new()
            .text("coverLetter", application.cover_letter.clone())
            .part("resume", resume);

        let request = self.request(Method::POST, &path, Some(&token)).multipart(form);

        self.send(request, &format!("POST {}", path)).await?;
        Ok(())
    }
}
