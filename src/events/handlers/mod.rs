// src/events/handlers/mod.rs
//
// Event Handlers
//
// Handlers use closure-based subscription via EventBus::subscribe.
// Only the registration functions are exported.

pub mod notification_handler;

pub use notification_handler::register_notification_handlers;
