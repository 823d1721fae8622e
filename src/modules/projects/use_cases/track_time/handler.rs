// Start/stop timer that accumulates tracked seconds on a project.
//
// Responsibilities
// - Starting records `startedAtTs`; starting again keeps the original start.
// - Stopping adds the elapsed whole seconds to `time` and clears `startedAtTs`.
// - Stopping a timer that is not running changes nothing but `updatedAt`.

use crate::modules::projects::adapters::outbound::project_repository::{
    ProjectRepository, RepositoryError,
};
use crate::modules::projects::core::patch::ProjectPatch;
use crate::modules::projects::core::project::{Project, ProjectId};
use crate::shared::infrastructure::key_value_store::KeyValueStore;
use std::sync::Arc;

pub struct TimeTracker<TStore>
where
    TStore: KeyValueStore + ?Sized + 'static,
{
    repository: Arc<ProjectRepository<TStore>>,
}

impl<TStore> TimeTracker<TStore>
where
    TStore: KeyValueStore + ?Sized + 'static,
{
    pub fn new(repository: Arc<ProjectRepository<TStore>>) -> Self {
        Self { repository }
    }

    pub async fn start_timer(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        let now = self.repository.now_millis();
        self.repository
            .update_project(id, move |current| {
                if current.is_timer_running() {
                    return ProjectPatch::default();
                }
                ProjectPatch {
                    started_at_ts: Some(Some(now)),
                    ..ProjectPatch::default()
                }
            })
            .await
    }

    pub async fn stop_timer(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        let now = self.repository.now_millis();
        self.repository
            .update_project(id, move |current| match current.started_at_ts {
                Some(started_at) => ProjectPatch {
                    time: Some(current.time + elapsed_seconds(started_at, now)),
                    started_at_ts: Some(None),
                    ..ProjectPatch::default()
                },
                None => ProjectPatch::default(),
            })
            .await
    }
}

fn elapsed_seconds(started_at: i64, now: i64) -> u64 {
    (now.saturating_sub(started_at).max(0) / 1000) as u64
}

#[cfg(test)]
mod time_tracker_tests {
    use super::*;
    use crate::modules::projects::adapters::outbound::project_repository::NewProject;
    use crate::shared::core::clock::{Clock, FixedClock};
    use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
    use crate::shared::infrastructure::persistence_store::PersistenceStore;
    use rstest::{fixture, rstest};

    const NOW: i64 = 1_700_000_000_000;

    #[fixture]
    fn before_each() -> (Arc<FixedClock>, TimeTracker<InMemoryKeyValueStore>) {
        let clock = Arc::new(FixedClock::new(NOW));
        let repository = Arc::new(ProjectRepository::new(
            PersistenceStore::new(Arc::new(InMemoryKeyValueStore::new())),
            clock.clone() as Arc<dyn Clock>,
        ));
        (clock, TimeTracker::new(repository))
    }

    #[rstest]
    #[case(0, 0)]
    #[case(999, 0)]
    #[case(90_500, 90)]
    #[case(-5_000, 0)]
    fn it_should_floor_elapsed_time_to_whole_seconds(#[case] delta: i64, #[case] expected: u64) {
        assert_eq!(elapsed_seconds(NOW, NOW + delta), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_accumulate_tracked_time_across_sessions(
        before_each: (Arc<FixedClock>, TimeTracker<InMemoryKeyValueStore>),
    ) {
        let (clock, tracker) = before_each;
        tracker
            .repository
            .add_project(NewProject::new(1, "Website"))
            .await
            .unwrap();

        let started = tracker.start_timer(1).await.unwrap().unwrap();
        assert_eq!(started.started_at_ts, Some(NOW));
        clock.advance(120_000);
        let stopped = tracker.stop_timer(1).await.unwrap().unwrap();
        assert_eq!(stopped.time, 120);
        assert_eq!(stopped.started_at_ts, None);

        tracker.start_timer(1).await.unwrap();
        clock.advance(30_000);
        let stopped = tracker.stop_timer(1).await.unwrap().unwrap();
        assert_eq!(stopped.time, 150);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_keep_the_original_start_when_started_twice(
        before_each: (Arc<FixedClock>, TimeTracker<InMemoryKeyValueStore>),
    ) {
        let (clock, tracker) = before_each;
        tracker
            .repository
            .add_project(NewProject::new(1, "Website"))
            .await
            .unwrap();
        tracker.start_timer(1).await.unwrap();
        clock.advance(10_000);
        let again = tracker.start_timer(1).await.unwrap().unwrap();
        assert!(again.is_timer_running());
        assert_eq!(again.started_at_ts, Some(NOW));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_leave_time_alone_when_no_timer_is_running(
        before_each: (Arc<FixedClock>, TimeTracker<InMemoryKeyValueStore>),
    ) {
        let (_, tracker) = before_each;
        tracker
            .repository
            .add_project(NewProject::new(1, "Website"))
            .await
            .unwrap();
        let stopped = tracker.stop_timer(1).await.unwrap().unwrap();
        assert_eq!(stopped.time, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_none_for_an_unknown_project(
        before_each: (Arc<FixedClock>, TimeTracker<InMemoryKeyValueStore>),
    ) {
        let (_, tracker) = before_each;
        assert_eq!(tracker.start_timer(9).await.unwrap(), None);
        assert_eq!(tracker.stop_timer(9).await.unwrap(), None);
    }
}
