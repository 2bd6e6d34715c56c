// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between a presentation layer and the services
// - Owns wiring (bootstrap), shared state and user-facing messages
// - Never talks to the backend directly

pub mod bootstrap;
pub mod error_handling;
pub mod notifications;
pub mod state;

pub use bootstrap::{bootstrap, bootstrap_with, Collaborators};
pub use error_handling::{ErrorResponse, ErrorType};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
pub use state::AppState;
