// src/services/profile_machine.rs
//
// Profile State Machine - decides what the profile page shows
//
// ARCHITECTURE:
// - One tagged ProfileState; every view decision is a match on it
// - Fetch and submit results carry a request ticket. A result is applied
//   only if its ticket is newer than the last applied one.
// - A background poller re-fetches while the state is Loading
//
// CRITICAL RULES:
// - No lock is held across an await
// - Local validation failures never reach the API
// - Account deletion needs explicit confirmation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::application::error_handling::ErrorResponse;
use crate::application::notifications::NotificationQueue;
use crate::domain::{validate_profile_form, DomainError, Profile, ProfileField, ProfileForm};
use crate::error::{AppError, AppResult};
use crate::events::{AccountDeleted, EventBus, ProfileLoaded, ProfileSaved};
use crate::integrations::JobBoardApi;
use crate::repositories::SessionStore;
use crate::services::company_tabs::CompanyTabs;
use crate::services::navigation::{Navigator, Route};

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileState {
    Loading,

    /// The session cannot back this page; the host must leave it
    Redirect(Route),

    /// First visit: blank form, email from the session
    NoProfile { form: ProfileForm },

    /// Persisted but missing a name or the registration kind
    Incomplete { profile: Profile, form: ProfileForm },

    /// Read-only card
    Complete { profile: Profile },

    /// Card reopened as a form
    Editing { profile: Profile, form: ProfileForm },
}

impl ProfileState {
    pub fn name(&self) -> &'static str {
        match self {
            ProfileState::Loading => "loading",
            ProfileState::Redirect(_) => "redirect",
            ProfileState::NoProfile { .. } => "no_profile",
            ProfileState::Incomplete { .. } => "incomplete_profile",
            ProfileState::Complete { .. } => "complete_profile",
            ProfileState::Editing { .. } => "editing",
        }
    }

    /// The form is shown instead of the card
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            ProfileState::NoProfile { .. }
                | ProfileState::Incomplete { .. }
                | ProfileState::Editing { .. }
        )
    }

    pub fn form(&self) -> Option<&ProfileForm> {
        match self {
            ProfileState::NoProfile { form }
            | ProfileState::Incomplete { form, .. }
            | ProfileState::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Last persisted profile, if any
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            ProfileState::Incomplete { profile, .. }
            | ProfileState::Complete { profile }
            | ProfileState::Editing { profile, .. } => Some(profile),
            _ => None,
        }
    }

    pub fn shows_company_tabs(&self) -> bool {
        matches!(self, ProfileState::Complete { profile } if profile.is_company())
    }

    /// State for a fetched (or just saved) profile
    fn settled(fetched: Option<Profile>, session_email: Option<&str>) -> ProfileState {
        match fetched {
            None => ProfileState::NoProfile {
                form: ProfileForm::blank(session_email.unwrap_or_default()),
            },
            Some(profile) if profile.is_complete() => ProfileState::Complete { profile },
            Some(profile) => {
                let form = ProfileForm::from_profile(&profile, session_email);
                ProfileState::Incomplete { profile, form }
            }
        }
    }
}

/// Snapshot for the rendering layer
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub state: &'static str,
    pub editing: bool,
    pub company_tabs: bool,
    pub last_error: Option<String>,
}

struct MachineState {
    state: ProfileState,
    last_error: Option<String>,
    /// Results with a ticket at or below this are stale
    applied_ticket: u64,
}

pub struct ProfileMachine {
    api: Arc<dyn JobBoardApi>,
    session: Arc<dyn SessionStore>,
    navigator: Arc<Navigator>,
    notifications: Arc<NotificationQueue>,
    event_bus: Arc<EventBus>,
    company_tabs: Arc<CompanyTabs>,
    poll_interval: Duration,
    next_ticket: AtomicU64,
    inner: Mutex<MachineState>,
    poller: Mutex<Option<JoinHandle<()>>>,
}

impl ProfileMachine {
    pub fn new(
        api: Arc<dyn JobBoardApi>,
        session: Arc<dyn SessionStore>,
        navigator: Arc<Navigator>,
        notifications: Arc<NotificationQueue>,
        event_bus: Arc<EventBus>,
        company_tabs: Arc<CompanyTabs>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            api,
            session,
            navigator,
            notifications,
            event_bus,
            company_tabs,
            poll_interval,
            next_ticket: AtomicU64::new(0),
            inner: Mutex::new(MachineState {
                state: ProfileState::Loading,
                last_error: None,
                applied_ticket: 0,
            }),
            poller: Mutex::new(None),
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn state(&self) -> ProfileState {
        self.inner().state.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner().last_error.clone()
    }

    pub fn view(&self) -> ProfileView {
        let inner = self.inner();
        ProfileView {
            state: inner.state.name(),
            editing: inner.state.is_editing(),
            company_tabs: inner.state.shows_company_tabs(),
            last_error: inner.last_error.clone(),
        }
    }

    /// The company sub-view, only under a complete company profile
    pub fn company_tabs(&self) -> Option<Arc<CompanyTabs>> {
        if self.inner().state.shows_company_tabs() {
            Some(Arc::clone(&self.company_tabs))
        } else {
            None
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller()
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Enter the page: reset to Loading and fetch.
    ///
    /// Without a token or an email the state becomes `Redirect(Entry)` and
    /// nothing is fetched. A rejected session (401) also redirects.
    pub async fn mount(self: &Arc<Self>) -> AppResult<ProfileState> {
        self.stop_polling();
        {
            let mut inner = self.inner();
            inner.state = ProfileState::Loading;
            inner.last_error = None;
        }

        if !self.session.get()?.has_identity() {
            log::info!("Profile page without a session, redirecting");
            return Ok(self.redirect_to_entry());
        }

        self.start_polling();
        self.fetch(true).await
    }

    /// Leave the page. Anything still in flight is ignored when it lands.
    pub fn unmount(&self) {
        self.stop_polling();
        let mut inner = self.inner();
        inner.applied_ticket = self.latest_ticket();
        inner.state = ProfileState::Loading;
        inner.last_error = None;
        log::debug!("Profile page unmounted");
    }

    /// Re-issue the fetch after a failure
    pub async fn retry(&self) -> AppResult<ProfileState> {
        self.fetch(true).await
    }

    // ========================================================================
    // EDITING
    // ========================================================================

    pub fn update_field(&self, field: ProfileField, value: impl Into<String>) -> AppResult<()> {
        let mut inner = self.inner();
        match &mut inner.state {
            ProfileState::NoProfile { form }
            | ProfileState::Incomplete { form, .. }
            | ProfileState::Editing { form, .. } => Ok(form.set_field(field, value)?),
            other => Err(invalid_transition("edit a field", other)),
        }
    }

    /// Reopen the card as a form seeded with the persisted profile
    pub fn start_editing(&self) -> AppResult<()> {
        let session_email = self.session_email();
        let mut inner = self.inner();
        let profile = match &inner.state {
            ProfileState::Complete { profile } => profile.clone(),
            other => return Err(invalid_transition("start editing", other)),
        };

        let form = ProfileForm::from_profile(&profile, session_email.as_deref());
        inner.state = ProfileState::Editing { profile, form };
        Ok(())
    }

    /// Drop the edits and go back to the card
    pub fn cancel_editing(&self) -> AppResult<()> {
        let mut inner = self.inner();
        let profile = match &inner.state {
            ProfileState::Editing { profile, .. } => profile.clone(),
            other => return Err(invalid_transition("cancel editing", other)),
        };

        inner.state = ProfileState::Complete { profile };
        Ok(())
    }

    /// Validate locally, then create or update.
    ///
    /// The profile the server returns becomes the state.
    pub async fn submit(&self) -> AppResult<Profile> {
        let (form, created) = {
            let inner = self.inner();
            match &inner.state {
                ProfileState::NoProfile { form } => (form.clone(), true),
                ProfileState::Incomplete { profile, form } => {
                    (form.clone(), !profile.is_profile_submitted)
                }
                ProfileState::Editing { form, .. } => (form.clone(), false),
                other => return Err(invalid_transition("submit", other)),
            }
        };

        let payload = match validate_profile_form(&form) {
            Ok(payload) => payload,
            Err(validation) => {
                let error = AppError::Validation(validation);
                log::debug!("Profile submission rejected locally: {}", error);
                self.fail(&error);
                return Err(error);
            }
        };

        let ticket = self.issue_ticket();
        let saved = match self.api.save_profile(&payload).await {
            Ok(saved) => saved,
            Err(e) => {
                log::error!("Failed to save profile: {}", e);
                self.fail_write(&e);
                return Err(e);
            }
        };

        let next = ProfileState::settled(Some(saved.clone()), self.session_email().as_deref());
        if self.apply(ticket, next) {
            log::info!(
                "Profile {} for {}",
                if created { "created" } else { "updated" },
                saved.email
            );
        }
        self.event_bus.emit(ProfileSaved::new(
            saved.email.clone(),
            saved.register_as.clone(),
            created,
        ));
        Ok(saved)
    }

    /// Delete the account once the user confirmed.
    ///
    /// Returns `Ok(false)` without a request when not confirmed. On success
    /// the session is cleared and the host reloads at the entry route.
    pub async fn delete_account(&self, confirmed: bool) -> AppResult<bool> {
        if !confirmed {
            log::debug!("Account deletion not confirmed");
            return Ok(false);
        }

        let email = self.session_email();
        if let Err(e) = self.api.delete_account().await {
            log::error!("Failed to delete account: {}", e);
            self.fail_write(&e);
            return Err(e);
        }

        self.session.clear()?;
        self.stop_polling();
        {
            let mut inner = self.inner();
            inner.applied_ticket = self.latest_ticket();
            inner.state = ProfileState::Redirect(Route::Entry);
            inner.last_error = None;
        }

        log::info!("Account deleted");
        self.event_bus.emit(AccountDeleted::new(email));
        self.navigator.hard_navigate(Route::Entry);
        Ok(true)
    }

    // ========================================================================
    // INTERNAL: Fetching
    // ========================================================================

    async fn fetch(&self, report: bool) -> AppResult<ProfileState> {
        let ticket = self.issue_ticket();
        let session_email = self.session_email();
        let result = self.api.fetch_profile().await;
        self.apply_fetch(ticket, result, session_email.as_deref(), report)
    }

    fn apply_fetch(
        &self,
        ticket: u64,
        result: AppResult<Option<Profile>>,
        session_email: Option<&str>,
        report: bool,
    ) -> AppResult<ProfileState> {
        let error = match result {
            Ok(fetched) => {
                let next = ProfileState::settled(fetched, session_email);
                if self.apply(ticket, next.clone()) {
                    self.event_bus
                        .emit(ProfileLoaded::new(next.name().to_string()));
                    return Ok(next);
                }
                return Ok(self.state());
            }
            Err(e) => e,
        };

        if self.is_stale(ticket) {
            log::debug!("Discarding stale profile error #{}: {}", ticket, error);
            return Ok(self.state());
        }

        if error.requires_sign_in() {
            log::warn!("Session rejected while loading profile");
            self.redirect_to_entry();
            return Err(error);
        }

        log::error!("Failed to fetch profile: {}", error);
        if report {
            self.fail(&error);
        } else {
            self.inner().last_error = Some(user_message(&error));
        }
        Err(error)
    }

    /// Replace the state if `ticket` is still current. A successful apply
    /// retires every ticket issued so far.
    fn apply(&self, ticket: u64, next: ProfileState) -> bool {
        let mut inner = self.inner();
        if ticket <= inner.applied_ticket {
            log::debug!(
                "Discarding stale profile response #{} (last applied #{})",
                ticket,
                inner.applied_ticket
            );
            return false;
        }

        log::debug!("Profile state {} -> {}", inner.state.name(), next.name());
        inner.applied_ticket = self.latest_ticket().max(ticket);
        inner.state = next;
        inner.last_error = None;
        true
    }

    fn is_stale(&self, ticket: u64) -> bool {
        ticket <= self.inner().applied_ticket
    }

    fn issue_ticket(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn latest_ticket(&self) -> u64 {
        self.next_ticket.load(Ordering::SeqCst)
    }

    // ========================================================================
    // INTERNAL: Polling
    // ========================================================================

    fn start_polling(self: &Arc<Self>) {
        if self.poll_interval.is_zero() {
            return;
        }

        let weak = Arc::downgrade(self);
        let interval = self.poll_interval;

        let task = tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                let Some(machine) = weak.upgrade() else {
                    break;
                };
                if !matches!(machine.state(), ProfileState::Loading) {
                    break;
                }

                log::debug!("Polling profile");
                let _ = machine.fetch(false).await;
            }
        });

        if let Some(previous) = self.poller().replace(task) {
            previous.abort();
        }
    }

    fn stop_polling(&self) {
        if let Some(task) = self.poller().take() {
            task.abort();
        }
    }

    // ========================================================================
    // INTERNAL: Helpers
    // ========================================================================

    fn redirect_to_entry(&self) -> ProfileState {
        let redirect = ProfileState::Redirect(Route::Entry);
        {
            let mut inner = self.inner();
            inner.applied_ticket = self.latest_ticket();
            inner.state = redirect.clone();
        }
        self.stop_polling();
        self.navigator.navigate(Route::Entry);
        redirect
    }

    /// A rejected session leaves the page; anything else stays on it
    fn fail_write(&self, error: &AppError) {
        if error.requires_sign_in() {
            log::warn!("Session rejected while writing profile, redirecting");
            self.redirect_to_entry();
        } else {
            self.fail(error);
        }
    }

    fn fail(&self, error: &AppError) {
        self.inner().last_error = Some(user_message(error));
        self.notifications.report(error);
    }

    fn session_email(&self) -> Option<String> {
        match self.session.get() {
            Ok(session) => session.user_email,
            Err(e) => {
                log::warn!("Could not read session email: {}", e);
                None
            }
        }
    }

    fn inner(&self) -> MutexGuard<'_, MachineState> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn poller(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.poller
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for ProfileMachine {
    fn drop(&mut self) {
        self.stop_polling();
    }
}

fn invalid_transition(action: &str, state: &ProfileState) -> AppError {
    AppError::Domain(DomainError::InvalidStateTransition(format!(
        "cannot {} while {}",
        action,
        state.name()
    )))
}

fn user_message(error: &AppError) -> String {
    ErrorResponse::from_app_error(error).message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Session;
    use crate::integrations::api::client::MockJobBoardApi;
    use crate::repositories::InMemorySessionStore;

    fn machine() -> ProfileMachine {
        let api: Arc<dyn JobBoardApi> = Arc::new(MockJobBoardApi::new());
        let bus = Arc::new(EventBus::new());
        let notifications = Arc::new(NotificationQueue::new());
        let store = Arc::new(InMemorySessionStore::with_session(Session::new(
            Some("t1".to_string()),
            None,
            Some("a@x.com".to_string()),
        )));
        ProfileMachine::new(
            api.clone(),
            store,
            Arc::new(Navigator::new(bus.clone())),
            notifications.clone(),
            bus.clone(),
            Arc::new(CompanyTabs::new(
                api,
                bus.clone(),
                notifications,
                Arc::new(Navigator::new(bus)),
            )),
            Duration::ZERO,
        )
    }

    fn complete_profile() -> Profile {
        Profile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "a@x.com".to_string(),
            register_as: "sales".to_string(),
            ..Profile::default()
        }
    }

    #[test]
    fn test_late_result_cannot_overwrite_newer_one() {
        let machine = machine();
        let older = machine.issue_ticket();
        let newer = machine.issue_ticket();

        machine
            .apply_fetch(newer, Ok(Some(complete_profile())), Some("a@x.com"), true)
            .unwrap();
        let state = machine
            .apply_fetch(older, Ok(None), Some("a@x.com"), true)
            .unwrap();

        assert!(matches!(state, ProfileState::Complete { .. }));
        assert!(matches!(machine.state(), ProfileState::Complete { .. }));
    }

    #[test]
    fn test_success_retires_outstanding_tickets() {
        let machine = machine();
        let first = machine.issue_ticket();
        let poll = machine.issue_ticket();

        machine
            .apply_fetch(first, Ok(Some(complete_profile())), Some("a@x.com"), true)
            .unwrap();
        machine.start_editing().unwrap();
        machine
            .apply_fetch(poll, Ok(None), Some("a@x.com"), false)
            .unwrap();

        assert!(matches!(machine.state(), ProfileState::Editing { .. }));
    }

    #[test]
    fn test_unmount_invalidates_in_flight_tickets() {
        let machine = machine();
        let in_flight = machine.issue_ticket();

        machine.unmount();
        machine
            .apply_fetch(in_flight, Ok(Some(complete_profile())), Some("a@x.com"), true)
            .unwrap();

        assert_eq!(machine.state(), ProfileState::Loading);
    }

    #[test]
    fn test_stale_error_is_not_reported() {
        let machine = machine();
        let older = machine.issue_ticket();
        let newer = machine.issue_ticket();

        machine
            .apply_fetch(newer, Ok(Some(complete_profile())), Some("a@x.com"), true)
            .unwrap();
        let result = machine.apply_fetch(
            older,
            Err(AppError::request_failed(Some(500), "boom")),
            Some("a@x.com"),
            true,
        );

        assert!(result.is_ok());
        assert!(machine.last_error().is_none());
        assert!(machine.notifications.is_empty());
    }

    #[test]
    fn test_state_names_and_flags() {
        let form = ProfileForm::blank("a@x.com");
        assert!(ProfileState::NoProfile { form }.is_editing());
        assert!(!ProfileState::Loading.is_editing());

        let company = Profile {
            register_as: "company".to_string(),
            ..complete_profile()
        };
        assert!(ProfileState::Complete { profile: company.clone() }.shows_company_tabs());
        assert!(!ProfileState::Complete { profile: complete_profile() }.shows_company_tabs());
        assert_eq!(
            ProfileState::Editing {
                form: ProfileForm::from_profile(&company, None),
                profile: company,
            }
            .name(),
            "editing"
        );
    }
}
