// src/services/navigation.rs
//
// Routes, the protected-view guard and the navigator
//
// CRITICAL RULES:
// - The guard reads the session at render time, never caches it
// - Without a token the protected view builder is NEVER invoked
// - Navigator only records requests; the host performs them

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::domain::Session;
use crate::events::{EventBus, NavigationRequested};
use crate::repositories::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Public landing page with the sign-in button
    Entry,
    Profile,
    Search,
    Notifications,
    Jobs,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Entry,
        Route::Profile,
        Route::Search,
        Route::Notifications,
        Route::Jobs,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::Profile => "/profile",
            Route::Search => "/search",
            Route::Notifications => "/notifications",
            Route::Jobs => "/jobs",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }

    /// Everything except the entry page needs a session
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Entry)
    }
}

/// Sidebar entry: either a route or the logout action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    pub label: &'static str,
    pub route: Option<Route>,
}

pub const SIDEBAR: [SidebarItem; 5] = [
    SidebarItem { label: "Home", route: Some(Route::Entry) },
    SidebarItem { label: "Notifications", route: Some(Route::Notifications) },
    SidebarItem { label: "Search", route: Some(Route::Search) },
    SidebarItem { label: "Profile", route: Some(Route::Profile) },
    SidebarItem { label: "Logout", route: None },
];

/// Result of guarding a protected view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome<V> {
    Render(V),
    Redirect(Route),
}

impl<V> GuardOutcome<V> {
    pub fn is_redirect(&self) -> bool {
        matches!(self, GuardOutcome::Redirect(_))
    }

    pub fn rendered(self) -> Option<V> {
        match self {
            GuardOutcome::Render(view) => Some(view),
            GuardOutcome::Redirect(_) => None,
        }
    }
}

pub struct NavigationGuard {
    session: Arc<dyn SessionStore>,
}

impl NavigationGuard {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    /// Session with a token, or the redirect target.
    ///
    /// An unreadable store counts as signed out.
    pub fn check(&self) -> GuardOutcome<Session> {
        match self.session.get() {
            Ok(session) if session.is_authenticated() => GuardOutcome::Render(session),
            Ok(_) => {
                log::debug!("No session token, redirecting to {}", Route::Entry.path());
                GuardOutcome::Redirect(Route::Entry)
            }
            Err(e) => {
                log::error!("Failed to read session: {}", e);
                GuardOutcome::Redirect(Route::Entry)
            }
        }
    }

    /// Build the protected view only when a token is present
    pub fn render<V, F>(&self, build: F) -> GuardOutcome<V>
    where
        F: FnOnce(Session) -> V,
    {
        match self.check() {
            GuardOutcome::Render(session) => GuardOutcome::Render(build(session)),
            GuardOutcome::Redirect(route) => GuardOutcome::Redirect(route),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationRecord {
    pub route: Route,
    /// Full reload instead of an in-app transition
    pub hard: bool,
}

pub struct Navigator {
    history: Mutex<Vec<NavigationRecord>>,
    event_bus: Arc<EventBus>,
}

impl Navigator {
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self {
            history: Mutex::new(Vec::new()),
            event_bus,
        }
    }

    pub fn navigate(&self, route: Route) {
        self.record(route, false);
    }

    /// Full reload; used after logout and account deletion so no view
    /// keeps stale session data
    pub fn hard_navigate(&self, route: Route) {
        self.record(route, true);
    }

    pub fn current(&self) -> Option<Route> {
        self.history().last().map(|r| r.route)
    }

    pub fn last(&self) -> Option<NavigationRecord> {
        self.history().last().cloned()
    }

    pub fn records(&self) -> Vec<NavigationRecord> {
        self.history().clone()
    }

    fn record(&self, route: Route, hard: bool) {
        log::info!(
            "Navigating to {}{}",
            route.path(),
            if hard { " (hard)" } else { "" }
        );
        self.history().push(NavigationRecord { route, hard });
        self.event_bus
            .emit(NavigationRequested::new(route.path().to_string(), hard));
    }

    fn history(&self) -> MutexGuard<'_, Vec<NavigationRecord>> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
