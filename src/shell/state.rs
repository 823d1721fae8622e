use crate::modules::projects::adapters::outbound::notifications::NotificationScheduler;
use crate::modules::projects::adapters::outbound::project_repository::ProjectRepository;
use crate::modules::projects::use_cases::deadline_notifications::handler::DeadlineNotifier;
use crate::modules::projects::use_cases::project_lifecycle::handler::ProjectLifecycle;
use crate::modules::projects::use_cases::track_time::handler::TimeTracker;
use crate::shared::core::clock::Clock;
use crate::shared::infrastructure::key_value_store::KeyValueStore;
use crate::shared::infrastructure::persistence_store::PersistenceStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<ProjectLifecycle<dyn KeyValueStore>>,
    pub time_tracker: Arc<TimeTracker<dyn KeyValueStore>>,
}

impl AppState {
    /// Wire both use cases over one repository, so they share its writer lock.
    pub fn new(
        backend: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        scheduler: Option<Arc<dyn NotificationScheduler>>,
        max_projects: usize,
    ) -> Self {
        let repository = Arc::new(ProjectRepository::new(
            PersistenceStore::new(backend),
            clock.clone(),
        ));
        let notifier = DeadlineNotifier::new(scheduler, clock);
        tracing::debug!(
            notifications = notifier.is_enabled(),
            max_projects,
            "project services wired"
        );
        Self {
            lifecycle: Arc::new(ProjectLifecycle::new(
                repository.clone(),
                notifier,
                max_projects,
            )),
            time_tracker: Arc::new(TimeTracker::new(repository)),
        }
    }
}
