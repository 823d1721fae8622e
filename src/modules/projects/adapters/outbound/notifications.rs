// Port for the device notification scheduler.
//
// Purpose
// - Describe what deadline reminders need from the OS: permission, schedule, cancel.
//
// Boundaries
// - Identifiers are opaque strings assigned by the scheduler.
// - The port may be absent entirely. Callers hold it as an Option.

use crate::modules::projects::core::project::ProjectId;
use async_trait::async_trait;
use thiserror::Error;

pub const DEADLINES_CHANNEL: &str = "deadlines";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotificationError {
    #[error("notification scheduler unavailable")]
    Unavailable,

    #[error("unknown notification: {0}")]
    UnknownNotification(String),

    #[error("scheduler error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub channel_id: String,
    pub title: String,
    pub body: String,
    pub project_id: ProjectId,
    pub fire_at_millis: i64,
}

#[async_trait]
pub trait NotificationScheduler: Send + Sync {
    async fn request_permissions(&self) -> Result<bool, NotificationError>;
    async fn schedule(&self, request: NotificationRequest) -> Result<String, NotificationError>;
    async fn cancel(&self, notification_id: &str) -> Result<(), NotificationError>;
}
