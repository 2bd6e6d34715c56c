// src/events/handlers/notification_handler.rs
//
// Turns successful outcomes into transient messages.
// Failures are reported by the caller that saw them, not here.

use std::sync::Arc;

use crate::application::notifications::NotificationQueue;
use crate::events::types::{
    AccountDeleted, ApplicationSubmitted, JobDeleted, JobPosted, JobUpdated, ProfileSaved,
    SignedIn,
};
use crate::events::EventBus;

pub fn register_notification_handlers(bus: &EventBus, queue: Arc<NotificationQueue>) {
    let q = Arc::clone(&queue);
    bus.subscribe::<SignedIn, _>(move |event| {
        if event.user_name.trim().is_empty() {
            q.info("Signed in");
        } else {
            q.info(format!("Welcome, {}", event.user_name));
        }
    });

    let q = Arc::clone(&queue);
    bus.subscribe::<ProfileSaved, _>(move |event| {
        if event.created {
            q.success("Profile created successfully!");
        } else {
            q.success("Profile updated successfully!");
        }
    });

    let q = Arc::clone(&queue);
    bus.subscribe::<AccountDeleted, _>(move |_| {
        q.info("Your account has been deleted");
    });

    let q = Arc::clone(&queue);
    bus.subscribe::<JobPosted, _>(move |event| {
        q.success(format!("Job \"{}\" posted successfully!", event.title));
    });

    let q = Arc::clone(&queue);
    bus.subscribe::<JobUpdated, _>(move |_| {
        q.success("Job updated successfully!");
    });

    let q = Arc::clone(&queue);
    bus.subscribe::<JobDeleted, _>(move |_| {
        q.info("Job posting deleted");
    });

    let q = queue;
    bus.subscribe::<ApplicationSubmitted, _>(move |_| {
        q.success("Application submitted successfully!");
    });

    log::debug!("Notification handlers registered");
}
