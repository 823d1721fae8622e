// Composition root for the projects bounded context.
//
// Responsibilities
// - Read config from environment.
// - Instantiate concrete infrastructure implementations.
// - Wire implementations into use case handlers and the HTTP router.

pub mod config;
pub mod http;
pub mod state;

use crate::modules::projects::adapters::outbound::notifications::NotificationScheduler;
use crate::modules::projects::adapters::outbound::notifications_timer::TimerNotificationScheduler;
use crate::shared::core::clock::{Clock, SystemClock};
use crate::shared::infrastructure::key_value_store::KeyValueStore;
use crate::shared::infrastructure::key_value_store::file::FileKeyValueStore;
use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
use config::{AppConfig, StorageKind};
use state::AppState;
use std::sync::Arc;

pub async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let backend: Arc<dyn KeyValueStore> = match config.storage {
        StorageKind::File => {
            tokio::fs::create_dir_all(&config.data_dir).await?;
            tracing::info!(data_dir = %config.data_dir.display(), "using file storage");
            Arc::new(FileKeyValueStore::new(config.data_dir.clone()))
        }
        StorageKind::Memory => {
            tracing::info!("using in-memory storage");
            Arc::new(InMemoryKeyValueStore::new())
        }
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let scheduler: Option<Arc<dyn NotificationScheduler>> = if config.notifications {
        Some(Arc::new(TimerNotificationScheduler::new(clock.clone())))
    } else {
        tracing::info!("deadline notifications disabled");
        None
    };

    Ok(AppState::new(backend, clock, scheduler, config.max_projects))
}

#[cfg(test)]
mod shell_tests {
    use super::*;
    use crate::modules::projects::core::listing::ProjectQuery;
    use crate::modules::projects::use_cases::project_lifecycle::command::ProjectDraft;
    use std::path::PathBuf;

    #[tokio::test]
    async fn it_should_persist_through_the_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().join("nested"),
            ..AppConfig::default()
        };

        let state = build_state(&config).await.unwrap();
        state
            .lifecycle
            .create_project(ProjectDraft {
                name: "Website".into(),
                ..ProjectDraft::default()
            })
            .await
            .unwrap();

        assert!(PathBuf::from(&config.data_dir).join("projects.json").exists());
        let reopened = build_state(&config).await.unwrap();
        let listed = reopened.lifecycle.list(&ProjectQuery::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].project.name, "Website");
    }

    #[tokio::test]
    async fn it_should_build_an_in_memory_state_without_notifications() {
        let config = AppConfig {
            storage: StorageKind::Memory,
            notifications: false,
            ..AppConfig::default()
        };
        let state = build_state(&config).await.unwrap();
        assert!(state.lifecycle.list(&ProjectQuery::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn it_should_schedule_reminders_on_the_timer_scheduler() {
        let config = AppConfig {
            storage: StorageKind::Memory,
            ..AppConfig::default()
        };
        let state = build_state(&config).await.unwrap();
        let created = state
            .lifecycle
            .create_project(ProjectDraft {
                name: "Website".into(),
                end_date: "2099-01-01".into(),
                ..ProjectDraft::default()
            })
            .await
            .unwrap();
        assert_eq!(created.notification_ids.len(), 2);
    }
}
