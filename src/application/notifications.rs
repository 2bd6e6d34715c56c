// src/application/notifications.rs
//
// Transient message queue
//
// Services and event handlers push messages; the rendering layer drains
// them and decides how to show them (toast, banner, dialog).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::application::error_handling::ErrorResponse;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: Mutex<VecDeque<Notification>>,
    next_id: AtomicU64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, level: NotificationLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let notification = Notification {
            id,
            level,
            message: message.into(),
        };
        log::debug!("Notification #{} ({:?}): {}", id, level, notification.message);
        self.pending().push_back(notification);
        id
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Info, message)
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Error, message)
    }

    /// Queue the user-facing message for `error`
    pub fn report(&self, error: &AppError) -> u64 {
        let response = ErrorResponse::from_app_error(error);
        let message = match response.details {
            Some(details) if matches!(error, AppError::Validation(_)) => {
                format!("{}: {}", response.message, details)
            }
            _ => response.message,
        };
        self.error(message)
    }

    /// Remove a message before it is drained (user dismissed it)
    pub fn dismiss(&self, id: u64) -> bool {
        let mut pending = self.pending();
        let before = pending.len();
        pending.retain(|n| n.id != id);
        pending.len() != before
    }

    /// Take every pending message, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        self.pending().drain(..).collect()
    }

    pub fn peek(&self) -> Vec<Notification> {
        self.pending().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.pending().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn pending(&self) -> MutexGuard<'_, VecDeque<Notification>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;

    #[test]
    fn test_drain_in_order() {
        let queue = NotificationQueue::new();
        queue.info("one");
        queue.success("two");

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "one");
        assert_eq!(drained[1].level, NotificationLevel::Success);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dismiss() {
        let queue = NotificationQueue::new();
        let first = queue.info("one");
        queue.info("two");

        assert!(queue.dismiss(first));
        assert!(!queue.dismiss(first));
        assert_eq!(queue.peek()[0].message, "two");
    }

    #[test]
    fn test_report_uses_server_message() {
        let queue = NotificationQueue::new();
        queue.report(&AppError::request_failed(Some(500), "Database unavailable"));

        let drained = queue.drain();
        assert_eq!(drained[0].level, NotificationLevel::Error);
        assert_eq!(drained[0].message, "Database unavailable");
    }

    #[test]
    fn test_report_validation_names_fields() {
        let queue = NotificationQueue::new();
        let mut validation = ValidationError::new();
        validation.missing("firstName");
        queue.report(&AppError::Validation(validation));

        assert_eq!(
            queue.drain()[0].message,
            "Please complete all required fields: missing required fields: firstName"
        );
    }
}
