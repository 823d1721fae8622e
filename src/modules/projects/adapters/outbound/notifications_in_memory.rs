// In memory implementation of the NotificationScheduler port.
//
// Purpose
// - Exercise deadline scheduling without a device.
//
// Responsibilities
// - Record pending notifications under uuid v7 identifiers.
// - Simulate denied permission and an offline scheduler.

use crate::modules::projects::adapters::outbound::notifications::{
    NotificationError, NotificationRequest, NotificationScheduler,
};
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use uuid::Uuid;

pub struct InMemoryNotificationScheduler {
    pending: Mutex<BTreeMap<String, NotificationRequest>>,
    permission_granted: bool,
    is_offline: bool,
}

impl Default for InMemoryNotificationScheduler {
    fn default() -> Self {
        Self {
            pending: Mutex::new(BTreeMap::new()),
            permission_granted: true,
            is_offline: false,
        }
    }
}

impl InMemoryNotificationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deny_permission(&mut self) {
        self.permission_granted = false;
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Pending notifications ordered by fire time.
    pub async fn pending(&self) -> Vec<(String, NotificationRequest)> {
        let mut pending: Vec<_> = self
            .pending
            .lock()
            .await
            .iter()
            .map(|(id, request)| (id.clone(), request.clone()))
            .collect();
        pending.sort_by_key(|(_, request)| request.fire_at_millis);
        pending
    }

    fn ensure_online(&self) -> Result<(), NotificationError> {
        if self.is_offline {
            return Err(NotificationError::Backend("Scheduler offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl NotificationScheduler for InMemoryNotificationScheduler {
    async fn request_permissions(&self) -> Result<bool, NotificationError> {
        self.ensure_online()?;
        Ok(self.permission_granted)
    }

    async fn schedule(&self, request: NotificationRequest) -> Result<String, NotificationError> {
        self.ensure_online()?;
        let id = Uuid::now_v7().to_string();
        self.pending.lock().await.insert(id.clone(), request);
        Ok(id)
    }

    async fn cancel(&self, notification_id: &str) -> Result<(), NotificationError> {
        self.ensure_online()?;
        match self.pending.lock().await.remove(notification_id) {
            Some(_) => Ok(()),
            None => Err(NotificationError::UnknownNotification(
                notification_id.to_string(),
            )),
        }
    }
}
