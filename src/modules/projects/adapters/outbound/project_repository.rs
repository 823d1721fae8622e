// Typed, normalized CRUD over the "projects" collection.
//
// Purpose
// - The only component that reads or writes the "projects" key.
//
// Responsibilities
// - Normalize on every read, so callers always see well-typed records.
// - Run every mutation as load, modify, save while holding a single writer lock.
//   Concurrent callers queue up instead of overwriting each other's saves.
// - Report "not found" as `Ok(None)` and storage failures as errors.
//
// Boundaries
// - No validation of user input. That happens before a call reaches this layer.
// - No caching. Every operation reads the store.

use crate::modules::projects::core::normalize::normalize_projects;
use crate::modules::projects::core::patch::{ProjectPatch, TaskPatch};
use crate::modules::projects::core::project::{Project, ProjectId, ProjectStatus};
use crate::modules::projects::core::task::{Task, TaskId};
use crate::shared::core::clock::Clock;
use crate::shared::infrastructure::key_value_store::{KeyValueStore, StoreError};
use crate::shared::infrastructure::persistence_store::PersistenceStore;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

pub const PROJECTS_KEY: &str = "projects";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("project {id} already exists")]
    DuplicateProject { id: ProjectId },

    #[error("task {task_id} already exists in project {project_id}")]
    DuplicateTask {
        project_id: ProjectId,
        task_id: TaskId,
    },
}

/// Input for `add_project`: the caller's partial project. Only `id` and `name` are required.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub time: Option<u64>,
    #[serde(default)]
    pub tasks: Option<Vec<Task>>,
    #[serde(default)]
    pub notes: Option<Vec<String>>,
    #[serde(default)]
    pub notification_ids: Option<Vec<String>>,
}

impl NewProject {
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    fn into_project(self, now_millis: i64) -> Project {
        let mut project = Project::new(self.id, self.name, now_millis);
        project.budget = self.budget.unwrap_or_default();
        project.client_name = self.client_name.unwrap_or_default();
        project.start_date = self.start_date.unwrap_or_default();
        project.end_date = self.end_date.unwrap_or_default();
        project.description = self.description.unwrap_or_default();
        project.status = self.status.unwrap_or_default();
        project.time = self.time.unwrap_or_default();
        project.tasks = self.tasks.unwrap_or_default();
        project.notes = self.notes.unwrap_or_default();
        project.notification_ids = self.notification_ids.unwrap_or_default();
        project
    }
}

pub struct ProjectRepository<TStore>
where
    TStore: KeyValueStore + ?Sized + 'static,
{
    store: PersistenceStore<TStore>,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl<TStore> ProjectRepository<TStore>
where
    TStore: KeyValueStore + ?Sized + 'static,
{
    pub fn new(store: PersistenceStore<TStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, RepositoryError> {
        let raw = self.store.load(PROJECTS_KEY).await?;
        Ok(normalize_projects(&raw, self.now_millis()))
    }

    pub async fn get_project(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        Ok(self.list_projects().await?.into_iter().find(|p| p.id == id))
    }

    /// Persist `projects` verbatim as the new collection.
    pub async fn replace_all(&self, projects: &[Project]) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        self.store.save(PROJECTS_KEY, projects).await?;
        Ok(())
    }

    /// Append a new project. Returns the submitted value, not the stored record.
    pub async fn add_project(&self, new_project: NewProject) -> Result<NewProject, RepositoryError> {
        self.add_project_with(move |_| Ok(new_project)).await
    }

    /// Append a project built from the current collection while the writer lock is held,
    /// so checks on the collection and id choices cannot go stale.
    pub async fn add_project_with<F, E>(&self, build: F) -> Result<NewProject, E>
    where
        F: FnOnce(&[Project]) -> Result<NewProject, E> + Send,
        E: From<RepositoryError> + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut projects = self.list_projects().await?;
        let new_project = build(&projects)?;
        if projects.iter().any(|p| p.id == new_project.id) {
            return Err(RepositoryError::DuplicateProject { id: new_project.id }.into());
        }

        projects.push(new_project.clone().into_project(self.now_millis()));
        self.store
            .save(PROJECTS_KEY, &projects)
            .await
            .map_err(RepositoryError::from)?;
        tracing::info!(project_id = new_project.id, "project added");
        Ok(new_project)
    }

    pub async fn update_project<F>(
        &self,
        id: ProjectId,
        updater: F,
    ) -> Result<Option<Project>, RepositoryError>
    where
        F: FnOnce(&Project) -> ProjectPatch + Send,
    {
        self.mutate(id, |project| Ok(updater(project))).await
    }

    /// Like `update_project`, but the updater may reject the change. A rejection leaves
    /// the stored collection untouched.
    pub async fn try_update_project<F, E>(&self, id: ProjectId, updater: F) -> Result<Option<Project>, E>
    where
        F: FnOnce(&Project) -> Result<ProjectPatch, E> + Send,
        E: From<RepositoryError> + Send,
    {
        self.mutate(id, updater).await
    }

    pub async fn add_task_to_project(
        &self,
        id: ProjectId,
        task: Task,
    ) -> Result<Option<Project>, RepositoryError> {
        self.append_task_with(id, move |_| task).await
    }

    /// Append a task built from the current project while the writer lock is held.
    pub async fn append_task_with<F>(
        &self,
        id: ProjectId,
        build: F,
    ) -> Result<Option<Project>, RepositoryError>
    where
        F: FnOnce(&Project) -> Task + Send,
    {
        self.mutate(id, move |project| {
            let task = build(project);
            if project.task(task.id).is_some() {
                return Err(RepositoryError::DuplicateTask {
                    project_id: project.id,
                    task_id: task.id,
                });
            }
            let mut tasks = project.tasks.clone();
            tasks.push(task);
            Ok(ProjectPatch::tasks(tasks))
        })
        .await
    }

    /// Patch one task. An unknown `task_id` leaves the tasks as they were, but the
    /// project's `updatedAt` still advances.
    pub async fn update_task_in_project<F>(
        &self,
        id: ProjectId,
        task_id: TaskId,
        updater: F,
    ) -> Result<Option<Project>, RepositoryError>
    where
        F: FnOnce(&Task) -> TaskPatch + Send,
    {
        self.mutate(id, move |project| {
            let mut tasks = project.tasks.clone();
            match tasks.iter_mut().find(|t| t.id == task_id) {
                Some(task) => {
                    let patch = updater(task);
                    patch.apply_to(task);
                }
                None => tracing::debug!(project_id = id, task_id, "no task to update"),
            }
            Ok(ProjectPatch::tasks(tasks))
        })
        .await
    }

    /// Prepend a note, so the newest note is always first.
    pub async fn add_project_note(
        &self,
        id: ProjectId,
        note: impl Into<String>,
    ) -> Result<Option<Project>, RepositoryError> {
        let note = note.into();
        self.mutate(id, move |project| {
            let mut notes = Vec::with_capacity(project.notes.len() + 1);
            notes.push(note);
            notes.extend(project.notes.iter().cloned());
            Ok(ProjectPatch::notes(notes))
        })
        .await
    }

    /// Remove a project. Returns the removed record so the caller can clean up after it.
    pub async fn delete_project(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut projects = self.list_projects().await?;
        let Some(index) = projects.iter().position(|p| p.id == id) else {
            tracing::debug!(project_id = id, "no project to delete");
            return Ok(None);
        };

        let removed = projects.remove(index);
        self.store.save(PROJECTS_KEY, &projects).await?;
        tracing::info!(project_id = id, "project deleted");
        Ok(Some(removed))
    }

    async fn mutate<F, E>(&self, id: ProjectId, build_patch: F) -> Result<Option<Project>, E>
    where
        F: FnOnce(&Project) -> Result<ProjectPatch, E> + Send,
        E: From<RepositoryError> + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut projects = self.list_projects().await?;
        let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
            tracing::debug!(project_id = id, "no project to update");
            return Ok(None);
        };

        let patch = build_patch(&*project)?;
        patch.apply_to(project);
        project.updated_at = self.clock.now_millis().max(project.created_at);
        let updated = project.clone();

        self.store
            .save(PROJECTS_KEY, &projects)
            .await
            .map_err(RepositoryError::from)?;
        tracing::info!(project_id = id, "project updated");
        Ok(Some(updated))
    }
}
