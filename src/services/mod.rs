// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services combine the API client, the session store and the event bus.
// Views drive them; they never render anything themselves.

pub mod application_service;
pub mod auth_service;
pub mod company_tabs;
pub mod job_board;
pub mod job_service;
pub mod navigation;
pub mod profile_machine;


// Re-export all services and their types
pub use application_service::{ApplicationModal, ApplicationService};

pub use auth_service::AuthService;

pub use company_tabs::{CompanyTab, CompanyTabs, Employee};

pub use job_board::JobBoard;

pub use job_service::JobService;

pub use navigation::{
    GuardOutcome, NavigationGuard, NavigationRecord, Navigator, Route, SidebarItem, SIDEBAR,
};

pub use profile_machine::{ProfileMachine, ProfileState, ProfileView};
