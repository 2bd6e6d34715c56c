// src/application/state.rs

use std::sync::Arc;

use crate::application::notifications::NotificationQueue;
use crate::config::ClientConfig;
use crate::events::EventBus;
use crate::repositories::SessionStore;
use crate::services::{
    AuthService, CompanyTabs, JobBoard, NavigationGuard, Navigator, ProfileMachine,
};

/// Everything a presentation layer needs, wired once by `bootstrap`.
/// All fields are Arc-wrapped so views can hold what they use.
pub struct AppState {
    pub config: ClientConfig,
    pub event_bus: Arc<EventBus>,
    pub notifications: Arc<NotificationQueue>,
    pub session: Arc<dyn SessionStore>,
    pub navigator: Arc<Navigator>,
    pub guard: Arc<NavigationGuard>,
    pub auth_service: Arc<AuthService>,
    pub profile: Arc<ProfileMachine>,
    pub company_tabs: Arc<CompanyTabs>,
    pub job_board: Arc<JobBoard>,
}
