// src/events/mod.rs
//
// Internal Event System - Public API
//
// EventHandler is internal to the bus and not exported.

pub mod bus;
pub mod handlers;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    AccountDeleted, ApplicationSubmitted, JobDeleted, JobPosted, JobUpdated, NavigationRequested,
    ProfileLoaded, ProfileSaved, SignedIn, SignedOut,
};

pub use bus::{EventBus, EventLogEntry};

pub use handlers::register_notification_handlers;
