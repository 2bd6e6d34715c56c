// events/types.rs
//
// All domain events in the client.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// SESSION EVENTS
// ============================================================================

/// Emitted after a verified credential has been stored as the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedIn {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
}

impl SignedIn {
    pub fn new(user_name: String, user_email: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_name,
            user_email,
        }
    }
}

impl DomainEvent for SignedIn {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "SignedIn" }
}

/// Emitted when the session is cleared by logout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedOut {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl SignedOut {
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }
}

impl Default for SignedOut {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainEvent for SignedOut {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "SignedOut" }
}

/// Emitted whenever the client changes route.
/// `hard` means all in-memory view state is discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationRequested {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub path: String,
    pub hard: bool,
}

impl NavigationRequested {
    pub fn new(path: String, hard: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            path,
            hard,
        }
    }
}

impl DomainEvent for NavigationRequested {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "NavigationRequested" }
}

// ============================================================================
// PROFILE EVENTS
// ============================================================================

/// Emitted when a profile fetch settles the view (`state` is the state name)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileLoaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub state: String,
}

impl ProfileLoaded {
    pub fn new(state: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            state,
        }
    }
}

impl DomainEvent for ProfileLoaded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ProfileLoaded" }
}

/// Emitted after the backend accepted a profile submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSaved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub email: String,
    pub register_as: String,
    /// True when this submission created the profile
    pub created: bool,
}

impl ProfileSaved {
    pub fn new(email: String, register_as: String, created: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            email,
            register_as,
            created,
        }
    }
}

impl DomainEvent for ProfileSaved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ProfileSaved" }
}

/// Emitted after the backend deleted the account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub email: Option<String>,
}

impl AccountDeleted {
    pub fn new(email: Option<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            email,
        }
    }
}

impl DomainEvent for AccountDeleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "AccountDeleted" }
}

// ============================================================================
// JOB EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub job_id: String,
    pub title: String,
}

impl JobPosted {
    pub fn new(job_id: String, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            job_id,
            title,
        }
    }
}

impl DomainEvent for JobPosted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "JobPosted" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub job_id: String,
}

impl JobUpdated {
    pub fn new(job_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            job_id,
        }
    }
}

impl DomainEvent for JobUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "JobUpdated" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub job_id: String,
}

impl JobDeleted {
    pub fn new(job_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            job_id,
        }
    }
}

impl DomainEvent for JobDeleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "JobDeleted" }
}

/// Emitted after the backend accepted an application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSubmitted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub job_id: String,
}

impl ApplicationSubmitted {
    pub fn new(job_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            job_id,
        }
    }
}

impl DomainEvent for ApplicationSubmitted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ApplicationSubmitted" }
}
