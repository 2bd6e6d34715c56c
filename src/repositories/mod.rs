// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO event emission
// - Explicit SQL only

pub mod session_store;

pub use session_store::{InMemorySessionStore, SessionStore, SqliteSessionStore};
