// src/lib.rs
// JobBoard - client core for the job board
//
// Architecture:
// - Backend-authoritative: the REST API owns every entity; the client
//   only decides what it refuses to send
// - Session injected: one SessionStore handed to every service
// - Explicit states: the profile page is a single tagged state machine
// - Event-driven notifications: services emit facts, handlers queue messages
// - Presentation-agnostic: a host renders AppState however it likes

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    normalize_date_of_birth,
    validate_application,
    validate_job_draft,
    validate_profile_form,
    CompanySummary,
    CurrentUser,
    DomainError,
    Job,
    JobApplication,
    JobDraft,
    JobListing,
    Profile,
    ProfileField,
    ProfileForm,
    RegistrationKind,
    ResumeFile,
    Session,
    ValidationError,
};

// ============================================================================
// PUBLIC API - Errors & Config
// ============================================================================

pub use config::ClientConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    register_notification_handlers,
    AccountDeleted,
    ApplicationSubmitted,
    DomainEvent,
    EventBus,
    EventLogEntry,
    JobDeleted,
    JobPosted,
    JobUpdated,
    NavigationRequested,
    ProfileLoaded,
    ProfileSaved,
    SignedIn,
    SignedOut,
};

// ============================================================================
// PUBLIC API - Persistence
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};
pub use repositories::{InMemorySessionStore, SessionStore, SqliteSessionStore};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{
    AuthResponse, AuthUser, BackendCredentialVerifier, CredentialVerifier, HttpApiClient,
    JobBoardApi, VerifiedIdentity,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    ApplicationModal,
    ApplicationService,
    AuthService,
    CompanyTab,
    CompanyTabs,
    Employee,
    GuardOutcome,
    JobBoard,
    JobService,
    NavigationGuard,
    NavigationRecord,
    Navigator,
    ProfileMachine,
    ProfileState,
    ProfileView,
    Route,
    SidebarItem,
    SIDEBAR,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{
    bootstrap, bootstrap_with, AppState, Collaborators, ErrorResponse, ErrorType, Notification,
    NotificationLevel, NotificationQueue,
};
