// src/application/bootstrap.rs
//
// Wiring: config -> session database -> API client -> services -> AppState

use std::sync::Arc;

use crate::application::notifications::NotificationQueue;
use crate::application::state::AppState;
use crate::config::ClientConfig;
use crate::db::{create_connection_pool, initialize_database, verify_database_integrity};
use crate::error::AppResult;
use crate::events::{register_notification_handlers, EventBus};
use crate::integrations::{BackendCredentialVerifier, CredentialVerifier, HttpApiClient, JobBoardApi};
use crate::repositories::{SessionStore, SqliteSessionStore};
use crate::services::{
    ApplicationService, AuthService, CompanyTabs, JobBoard, JobService, NavigationGuard,
    Navigator, ProfileMachine,
};

/// The outward-facing seams. Production uses SQLite and HTTP; tests and
/// embedding hosts can hand in their own.
pub struct Collaborators {
    pub session: Arc<dyn SessionStore>,
    pub api: Arc<dyn JobBoardApi>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

/// Build the production state: on-disk session store and the HTTP client
pub fn bootstrap(config: ClientConfig) -> AppResult<AppState> {
    // 1. INFRASTRUCTURE
    let pool = Arc::new(create_connection_pool(&config.data_dir)?);
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
    }

    // 2. SESSION + BACKEND
    let session: Arc<dyn SessionStore> = Arc::new(SqliteSessionStore::new(pool));
    let api: Arc<dyn JobBoardApi> = Arc::new(HttpApiClient::new(
        config.api_base_url.clone(),
        Arc::clone(&session),
        config.request_timeout(),
    )?);
    let verifier: Arc<dyn CredentialVerifier> =
        Arc::new(BackendCredentialVerifier::new(Arc::clone(&api)));

    log::info!("Job board client ready (backend: {})", config.api_base_url);

    Ok(bootstrap_with(
        config,
        Collaborators {
            session,
            api,
            verifier,
        },
    ))
}

/// Build the state around the given collaborators
pub fn bootstrap_with(config: ClientConfig, collaborators: Collaborators) -> AppState {
    let Collaborators {
        session,
        api,
        verifier,
    } = collaborators;

    // 3. EVENTS
    let event_bus = Arc::new(EventBus::new());
    let notifications = Arc::new(NotificationQueue::new());
    register_notification_handlers(&event_bus, Arc::clone(&notifications));

    // 4. SERVICES
    let navigator = Arc::new(Navigator::new(Arc::clone(&event_bus)));
    let guard = Arc::new(NavigationGuard::new(Arc::clone(&session)));

    let auth_service = Arc::new(AuthService::new(
        verifier,
        Arc::clone(&session),
        Arc::clone(&navigator),
        Arc::clone(&event_bus),
    ));

    let company_tabs = Arc::new(CompanyTabs::new(
        Arc::clone(&api),
        Arc::clone(&event_bus),
        Arc::clone(&notifications),
        Arc::clone(&navigator),
    ));

    let profile = Arc::new(ProfileMachine::new(
        Arc::clone(&api),
        Arc::clone(&session),
        Arc::clone(&navigator),
        Arc::clone(&notifications),
        Arc::clone(&event_bus),
        Arc::clone(&company_tabs),
        config.poll_interval(),
    ));

    let job_board = Arc::new(JobBoard::new(
        Arc::new(JobService::new(Arc::clone(&api), Arc::clone(&session))),
        Arc::new(ApplicationService::new(
            api,
            Arc::clone(&session),
            Arc::clone(&event_bus),
        )),
        Arc::clone(&notifications),
        Arc::clone(&navigator),
    ));

    // 5. APPLICATION STATE
    AppState {
        config,
        event_bus,
        notifications,
        session,
        navigator,
        guard,
        auth_service,
        profile,
        company_tabs,
        job_board,
    }
}
