use crate::modules::projects::adapters::outbound::notifications::{
    DEADLINES_CHANNEL, NotificationRequest, NotificationScheduler,
};
use crate::modules::projects::core::project::Project;
use crate::modules::projects::core::validation::parse_date;
use crate::shared::core::clock::Clock;
use std::sync::Arc;

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Schedules and cancels deadline reminders. Without a scheduler every call is a no-op.
#[derive(Clone)]
pub struct DeadlineNotifier {
    scheduler: Option<Arc<dyn NotificationScheduler>>,
    clock: Arc<dyn Clock>,
}

impl DeadlineNotifier {
    pub fn new(scheduler: Option<Arc<dyn NotificationScheduler>>, clock: Arc<dyn Clock>) -> Self {
        Self { scheduler, clock }
    }

    pub fn disabled(clock: Arc<dyn Clock>) -> Self {
        Self::new(None, clock)
    }

    pub fn is_enabled(&self) -> bool {
        self.scheduler.is_some()
    }

    /// Schedule a reminder at the end date and one a day earlier, if that is still ahead.
    /// Returns the ids of whatever was scheduled.
    pub async fn schedule_project_deadline_notifications(&self, project: &Project) -> Vec<String> {
        let Some(scheduler) = &self.scheduler else {
            return Vec::new();
        };
        let Some(deadline) = deadline_millis(&project.end_date) else {
            return Vec::new();
        };
        match scheduler.request_permissions().await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(project_id = project.id, "notification permission denied");
                return Vec::new();
            }
            Err(err) => {
                tracing::warn!(project_id = project.id, %err, "permission request failed");
                return Vec::new();
            }
        }

        let mut requests = vec![NotificationRequest {
            channel_id: DEADLINES_CHANNEL.to_string(),
            title: "Project delivery due".to_string(),
            body: format!("Project {} is due today.", project.name),
            project_id: project.id,
            fire_at_millis: deadline,
        }];
        let day_before = deadline - DAY_MILLIS;
        if day_before > self.clock.now_millis() {
            requests.push(NotificationRequest {
                channel_id: DEADLINES_CHANNEL.to_string(),
                title: "Project deadline reminder".to_string(),
                body: format!("One day left until project {} is due.", project.name),
                project_id: project.id,
                fire_at_millis: day_before,
            });
        }

        let mut ids = Vec::with_capacity(requests.len());
        for request in requests {
            match scheduler.schedule(request).await {
                Ok(id) => ids.push(id),
                Err(err) => {
                    tracing::warn!(project_id = project.id, %err, "failed to schedule reminder");
                    break;
                }
            }
        }
        ids
    }

    /// Best effort: individual failures are logged and skipped.
    pub async fn cancel_notifications(&self, notification_ids: &[String]) {
        let Some(scheduler) = &self.scheduler else {
            return;
        };
        for id in notification_ids {
            if let Err(err) = scheduler.cancel(id).await {
                tracing::debug!(notification_id = %id, %err, "ignoring cancel failure");
            }
        }
    }
}

/// Midnight UTC of a `YYYY-MM-DD` end date.
fn deadline_millis(end_date: &str) -> Option<i64> {
    let date = parse_date(end_date.trim())?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}
