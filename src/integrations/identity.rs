// src/integrations/identity.rs
//
// Credential verification
//
// The sign-in widget hands over an opaque credential. Everything that knows
// how that credential becomes a backend session sits behind
// CredentialVerifier, so the provider can change without touching the
// services that consume the result.

use std::sync::Arc;

use async_trait::async_trait;

use super::api::client::JobBoardApi;
use crate::error::{AppError, AppResult};

/// Session material returned by a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub token: String,
    pub name: String,
    pub email: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, credential: &str) -> AppResult<VerifiedIdentity>;
}

/// Verifies Google credentials through the backend's verify endpoint
pub struct BackendCredentialVerifier {
    api: Arc<dyn JobBoardApi>,
}

impl BackendCredentialVerifier {
    pub fn new(api: Arc<dyn JobBoardApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CredentialVerifier for BackendCredentialVerifier {
    async fn verify(&self, credential: &str) -> AppResult<VerifiedIdentity> {
        if credential.trim().is_empty() {
            return Err(AppError::Unauthenticated);
        }

        let response = self.api.verify_google_credential(credential).await?;
        if response.token.trim().is_empty() {
            return Err(AppError::request_failed(
                None,
                "Sign-in response did not include a session token",
            ));
        }

        Ok(VerifiedIdentity {
            token: response.token,
            name: response.user.name,
            email: response.user.email,
        })
    }
}
