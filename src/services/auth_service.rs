// src/services/auth_service.rs
//
// Sign-in callback and logout
//
// CRITICAL RULES:
// - The session is written only after the verifier accepted the credential
// - Logout always ends with a hard navigation to the entry route

use std::sync::Arc;

use crate::domain::Session;
use crate::error::AppResult;
use crate::events::{EventBus, SignedIn, SignedOut};
use crate::integrations::CredentialVerifier;
use crate::repositories::SessionStore;
use crate::services::navigation::{Navigator, Route};

pub struct AuthService {
    verifier: Arc<dyn CredentialVerifier>,
    session: Arc<dyn SessionStore>,
    navigator: Arc<Navigator>,
    event_bus: Arc<EventBus>,
}

impl AuthService {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        session: Arc<dyn SessionStore>,
        navigator: Arc<Navigator>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            verifier,
            session,
            navigator,
            event_bus,
        }
    }

    /// Handle the identity widget's callback.
    ///
    /// On failure nothing is persisted and the previous session, if any,
    /// stays in place.
    pub async fn sign_in(&self, credential: &str) -> AppResult<Session> {
        let identity = self.verifier.verify(credential).await.map_err(|e| {
            log::warn!("Credential verification failed: {}", e);
            e
        })?;

        self.session
            .set(&identity.token, &identity.name, &identity.email)?;

        log::info!("Signed in as {}", identity.email);
        self.event_bus
            .emit(SignedIn::new(identity.name.clone(), identity.email.clone()));

        Ok(Session::new(
            Some(identity.token),
            Some(identity.name),
            Some(identity.email),
        ))
    }

    pub fn sign_out(&self) -> AppResult<()> {
        self.session.clear()?;

        log::info!("Signed out");
        self.event_bus.emit(SignedOut::new());
        self.navigator.hard_navigate(Route::Entry);
        Ok(())
    }

    pub fn current_session(&self) -> AppResult<Session> {
        self.session.get()
    }
}
