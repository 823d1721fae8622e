use crate::modules::projects::adapters::outbound::project_repository::{NewProject, ProjectRepository};
use crate::modules::projects::core::task::Task;
use crate::modules::projects::use_cases::deadline_notifications::handler::DeadlineNotifier;
use crate::modules::projects::use_cases::project_lifecycle::command::{ProjectDraft, TaskDraft};
use crate::modules::projects::use_cases::project_lifecycle::handler::{
    LifecycleError, ProjectLifecycle,
};
use crate::shared::core::clock::{Clock, FixedClock};
use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
use crate::shared::infrastructure::persistence_store::PersistenceStore;
use std::sync::Arc;
use tokio::task::JoinSet;

fn shared_repository() -> Arc<ProjectRepository<InMemoryKeyValueStore>> {
    Arc::new(ProjectRepository::new(
        PersistenceStore::new(Arc::new(InMemoryKeyValueStore::new())),
        Arc::new(FixedClock::new(1_700_000_000_000)) as Arc<dyn Clock>,
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_task_additions_are_not_lost() {
    let repository = shared_repository();
    repository
        .add_project(NewProject::new(1, "Website"))
        .await
        .unwrap();

    let mut writers = JoinSet::new();
    for task_id in 1..=25 {
        let repository = repository.clone();
        writers.spawn(async move {
            repository
                .add_task_to_project(1, Task::new(task_id, format!("Task {task_id}")))
                .await
        });
    }
    while let Some(joined) = writers.join_next().await {
        joined.unwrap().unwrap();
    }

    let project = repository.get_project(1).await.unwrap().unwrap();
    let mut ids: Vec<_> = project.tasks.iter().map(|t| t.id).collect();
    ids.sort();
    assert_eq!(ids, (1..=25).collect::<Vec<_>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_project_additions_are_not_lost() {
    let repository = shared_repository();

    let mut writers = JoinSet::new();
    for id in 1..=10 {
        let repository = repository.clone();
        writers.spawn(async move {
            repository
                .add_project(NewProject::new(id, format!("Project {id}")))
                .await
        });
    }
    while let Some(joined) = writers.join_next().await {
        joined.unwrap().unwrap();
    }

    assert_eq!(repository.list_projects().await.unwrap().len(), 10);
}

fn shared_lifecycle(max_projects: usize) -> Arc<ProjectLifecycle<InMemoryKeyValueStore>> {
    let clock = Arc::new(FixedClock::new(1_735_689_600_000)) as Arc<dyn Clock>;
    let repository = Arc::new(ProjectRepository::new(
        PersistenceStore::new(Arc::new(InMemoryKeyValueStore::new())),
        clock.clone(),
    ));
    Arc::new(ProjectLifecycle::new(
        repository,
        DeadlineNotifier::disabled(clock),
        max_projects,
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creations_respect_the_limit_without_id_collisions() {
    let lifecycle = shared_lifecycle(5);

    let mut creators = JoinSet::new();
    for n in 0..8 {
        let lifecycle = lifecycle.clone();
        creators.spawn(async move {
            lifecycle
                .create_project(ProjectDraft {
                    name: format!("Project {n}"),
                    ..ProjectDraft::default()
                })
                .await
        });
    }

    let mut created = 0;
    let mut refused = 0;
    while let Some(joined) = creators.join_next().await {
        match joined.unwrap() {
            Ok(_) => created += 1,
            Err(LifecycleError::LimitReached { max: 5 }) => refused += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!((created, refused), (5, 3));
    let mut ids: Vec<_> = lifecycle
        .repository()
        .list_projects()
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_task_drafts_in_the_same_millisecond_all_land() {
    let lifecycle = shared_lifecycle(5);
    let project = lifecycle
        .create_project(ProjectDraft {
            name: "Website".into(),
            ..ProjectDraft::default()
        })
        .await
        .unwrap();
    let project_id = project.id;

    let mut writers = JoinSet::new();
    for n in 0..6 {
        let lifecycle = lifecycle.clone();
        writers.spawn(async move {
            lifecycle
                .add_task(
                    project_id,
                    TaskDraft {
                        description: format!("Task {n}"),
                        due_date: String::new(),
                    },
                )
                .await
        });
    }
    while let Some(joined) = writers.join_next().await {
        joined.unwrap().unwrap();
    }

    let stored = lifecycle.get(project_id).await.unwrap().unwrap();
    assert_eq!(stored.tasks.len(), 6);
    let mut task_ids: Vec<_> = stored.tasks.iter().map(|t| t.id).collect();
    task_ids.dedup();
    assert_eq!(task_ids.len(), 6);
}
