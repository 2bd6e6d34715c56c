// src/integrations/api/types.rs
//
// Wire shapes that exist only at the API boundary

use serde::{Deserialize, Serialize};

/// Body of `POST /auth/google/verify`
#[derive(Debug, Clone, Serialize)]
pub struct CredentialRequest<'a> {
    pub credential: &'a str,
}

/// Backend answer to a verified credential
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Error payload the backend sends with non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    #[serde(default)]
    pub message: Option<String>,
}
