// Timer backed implementation of the NotificationScheduler port.
//
// Purpose
// - Deliver deadline reminders from a long running server process.
//
// Responsibilities
// - Spawn one tokio task per reminder that sleeps until the fire time.
// - Delivery is a structured `info` log line on the `deadlines` target.
// - Cancelling aborts the sleeping task. Delivered reminders are forgotten.

use crate::modules::projects::adapters::outbound::notifications::{
    NotificationError, NotificationRequest, NotificationScheduler,
};
use crate::shared::core::clock::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use uuid::Uuid;

pub struct TimerNotificationScheduler {
    clock: Arc<dyn Clock>,
    pending: Arc<Mutex<HashMap<String, AbortHandle>>>,
    delivered: Arc<AtomicUsize>,
}

impl TimerNotificationScheduler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            pending: Arc::new(Mutex::new(HashMap::new())),
            delivered: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }

    pub fn delivered_count(&self) -> usize {
        self.delivered.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl NotificationScheduler for TimerNotificationScheduler {
    async fn request_permissions(&self) -> Result<bool, NotificationError> {
        Ok(true)
    }

    async fn schedule(&self, request: NotificationRequest) -> Result<String, NotificationError> {
        let id = Uuid::now_v7().to_string();
        let delay = request
            .fire_at_millis
            .saturating_sub(self.clock.now_millis())
            .max(0) as u64;

        // Held across the spawn so a reminder that is already due cannot
        // remove its entry before it was inserted.
        let mut pending = self.pending.lock().await;
        let task = tokio::spawn({
            let id = id.clone();
            let pending = self.pending.clone();
            let delivered = self.delivered.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                pending.lock().await.remove(&id);
                delivered.fetch_add(1, Ordering::SeqCst);
                tracing::info!(
                    target: "deadlines",
                    notification_id = %id,
                    channel = %request.channel_id,
                    project_id = request.project_id,
                    title = %request.title,
                    "{}",
                    request.body
                );
            }
        });
        pending.insert(id.clone(), task.abort_handle());
        tracing::debug!(notification_id = %id, delay_ms = delay, "reminder scheduled");
        Ok(id)
    }

    async fn cancel(&self, notification_id: &str) -> Result<(), NotificationError> {
        match self.pending.lock().await.remove(notification_id) {
            Some(task) => {
                task.abort();
                Ok(())
            }
            None => Err(NotificationError::UnknownNotification(
                notification_id.to_string(),
            )),
        }
    }
}
