use crate::modules::projects::adapters::outbound::project_repository::{
    NewProject, PROJECTS_KEY, ProjectRepository,
};
use crate::modules::projects::core::patch::{ProjectPatch, TaskPatch};
use crate::modules::projects::core::project::{Project, ProjectStatus};
use crate::modules::projects::core::task::Task;
use crate::shared::core::clock::{Clock, FixedClock};
use crate::shared::infrastructure::key_value_store::KeyValueStore;
use crate::shared::infrastructure::key_value_store::file::FileKeyValueStore;
use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
use crate::shared::infrastructure::persistence_store::PersistenceStore;
use crate::tests::fixtures::projects::NewProjectBuilder;
use std::sync::Arc;

const NOW: i64 = 1_700_000_000_000;

fn repository_over<TStore>(backend: Arc<TStore>) -> (Arc<FixedClock>, ProjectRepository<TStore>)
where
    TStore: KeyValueStore + 'static,
{
    let clock = Arc::new(FixedClock::new(NOW));
    let repository = ProjectRepository::new(
        PersistenceStore::new(backend),
        clock.clone() as Arc<dyn Clock>,
    );
    (clock, repository)
}

#[tokio::test]
async fn adds_a_project_then_a_task_then_completes_it() {
    let (clock, repository) = repository_over(Arc::new(InMemoryKeyValueStore::new()));

    repository
        .add_project(NewProject::new(NOW, "Website"))
        .await
        .unwrap();
    let listed = repository.list_projects().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Website");
    assert_eq!(listed[0].status, ProjectStatus::NotStarted);
    assert!(listed[0].tasks.is_empty());

    clock.advance(1_000);
    let with_task = repository
        .add_task_to_project(NOW, Task::new(1, "Design"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(with_task.tasks.len(), 1);

    clock.advance(1_000);
    let toggled = repository
        .update_task_in_project(NOW, 1, |_| TaskPatch::completed(true))
        .await
        .unwrap()
        .unwrap();
    assert!(toggled.tasks[0].completed);
    assert_eq!(toggled.updated_at, NOW + 2_000);
    assert_eq!(repository.list_projects().await.unwrap(), vec![toggled]);
}

#[tokio::test]
async fn updating_an_unknown_project_leaves_the_collection_untouched() {
    let backend = Arc::new(InMemoryKeyValueStore::new());
    let (_, repository) = repository_over(backend.clone());
    repository
        .add_project(NewProjectBuilder::new().id(1).build())
        .await
        .unwrap();
    let before = backend.get_item(PROJECTS_KEY).await.unwrap();

    let result = repository
        .update_project(2, |_| ProjectPatch::status(ProjectStatus::Completed))
        .await
        .unwrap();

    assert_eq!(result, None);
    assert_eq!(backend.get_item(PROJECTS_KEY).await.unwrap(), before);
}

#[tokio::test]
async fn completing_twice_keeps_the_same_status() {
    let (clock, repository) = repository_over(Arc::new(InMemoryKeyValueStore::new()));
    repository
        .add_project(NewProject::new(1, "Website"))
        .await
        .unwrap();

    let first = repository
        .update_project(1, |_| ProjectPatch::status(ProjectStatus::Completed))
        .await
        .unwrap()
        .unwrap();
    clock.advance(5_000);
    let second = repository
        .update_project(1, |_| ProjectPatch::status(ProjectStatus::Completed))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(second.status, ProjectStatus::Completed);
    assert_eq!(
        Project {
            updated_at: first.updated_at,
            ..second.clone()
        },
        first
    );
    assert_eq!(second.updated_at, first.updated_at + 5_000);
}

#[tokio::test]
async fn a_sequence_of_operations_is_reflected_exactly_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let (_, repository) = repository_over(Arc::new(FileKeyValueStore::new(dir.path())));

    for (id, name) in [(1, "Website"), (2, "Logo"), (3, "Brochure")] {
        repository
            .add_project(NewProject::new(id, name))
            .await
            .unwrap();
    }
    repository
        .update_project(2, |_| ProjectPatch {
            name: Some("Logo v2".into()),
            ..ProjectPatch::default()
        })
        .await
        .unwrap();
    repository.add_project_note(3, "kickoff call").await.unwrap();
    repository.delete_project(1).await.unwrap();

    let (_, reopened) = repository_over(Arc::new(FileKeyValueStore::new(dir.path())));
    let projects = reopened.list_projects().await.unwrap();
    let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Logo v2", "Brochure"]);
    assert_eq!(projects[1].notes, vec!["kickoff call".to_string()]);
}
