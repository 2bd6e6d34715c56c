// src/integrations/mod.rs
//
// External Integrations Module
//
// - api: the job board REST backend
// - identity: exchanging an identity-provider credential for a session

pub mod api;
pub mod identity;

pub use api::client::{HttpApiClient, JobBoardApi};
pub use api::types::{AuthResponse, AuthUser};
pub use identity::{BackendCredentialVerifier, CredentialVerifier, VerifiedIdentity};
