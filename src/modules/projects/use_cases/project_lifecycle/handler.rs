use crate::modules::projects::adapters::outbound::project_repository::{
    NewProject, ProjectRepository, RepositoryError,
};
use crate::modules::projects::core::ids::next_id;
use crate::modules::projects::core::listing::{ProjectQuery, ProjectSummary, select};
use crate::modules::projects::core::patch::{ProjectPatch, TaskPatch};
use crate::modules::projects::core::project::{Project, ProjectId, ProjectStatus};
use crate::modules::projects::core::task::{Task, TaskId};
use crate::modules::projects::core::validation::{self, ValidationError};
use crate::modules::projects::use_cases::deadline_notifications::handler::DeadlineNotifier;
use crate::modules::projects::use_cases::project_lifecycle::command::{
    ProjectDraft, TaskDraft, validate_details_patch, validate_task_patch,
};
use crate::shared::infrastructure::key_value_store::KeyValueStore;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("the free tier allows at most {max} projects")]
    LimitReached { max: usize },

    #[error("project {0} not found")]
    NotFound(ProjectId),
}

/// Validates input, then drives the repository and the deadline notifier together.
/// Not-found on an existing id is reported as `Ok(None)`, like the repository does.
pub struct ProjectLifecycle<TStore>
where
    TStore: KeyValueStore + ?Sized + 'static,
{
    repository: Arc<ProjectRepository<TStore>>,
    notifier: DeadlineNotifier,
    max_projects: usize,
}

impl<TStore> ProjectLifecycle<TStore>
where
    TStore: KeyValueStore + ?Sized + 'static,
{
    pub fn new(
        repository: Arc<ProjectRepository<TStore>>,
        notifier: DeadlineNotifier,
        max_projects: usize,
    ) -> Self {
        Self {
            repository,
            notifier,
            max_projects,
        }
    }

    pub fn repository(&self) -> &Arc<ProjectRepository<TStore>> {
        &self.repository
    }

    pub async fn list(&self, query: &ProjectQuery) -> Result<Vec<ProjectSummary>, LifecycleError> {
        let projects = self.repository.list_projects().await?;
        Ok(select(projects, query))
    }

    pub async fn get(&self, id: ProjectId) -> Result<Option<Project>, LifecycleError> {
        Ok(self.repository.get_project(id).await?)
    }

    /// The project limit and the new id are decided under the repository's writer lock,
    /// so concurrent creations can neither exceed the limit nor collide.
    pub async fn create_project(&self, draft: ProjectDraft) -> Result<Project, LifecycleError> {
        let draft = draft.validate()?;
        let now = self.repository.now_millis();
        let max = self.max_projects;
        let added = self
            .repository
            .add_project_with(|existing| {
                if existing.len() >= max {
                    return Err(LifecycleError::LimitReached { max });
                }
                Ok(NewProject {
                    id: next_id(now, existing.iter().map(|p| p.id)),
                    name: draft.name,
                    budget: Some(draft.budget),
                    client_name: Some(draft.client_name),
                    start_date: Some(draft.start_date),
                    end_date: Some(draft.end_date),
                    description: Some(draft.description),
                    ..NewProject::default()
                })
            })
            .await?;

        let id = added.id;
        let created = self
            .repository
            .get_project(id)
            .await?
            .ok_or(LifecycleError::NotFound(id))?;
        let notification_ids = self
            .notifier
            .schedule_project_deadline_notifications(&created)
            .await;
        if notification_ids.is_empty() {
            return Ok(created);
        }
        self.repository
            .update_project(id, |_| ProjectPatch::notification_ids(notification_ids))
            .await?
            .ok_or(LifecycleError::NotFound(id))
    }

    /// Update descriptive fields. A changed end date reschedules the deadline reminders,
    /// and moving into or out of `Completed` cancels or restores them.
    pub async fn update_details(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> Result<Option<Project>, LifecycleError> {
        let patch = validate_details_patch(patch)?;
        if patch.is_empty() {
            return self.get(id).await;
        }

        let mut previous = None;
        let updated = self
            .repository
            .try_update_project(id, |current| -> Result<ProjectPatch, LifecycleError> {
                validation::date_range(
                    patch.start_date.as_deref().unwrap_or(&current.start_date),
                    patch.end_date.as_deref().unwrap_or(&current.end_date),
                )?;
                previous = Some((current.end_date.clone(), current.status));
                Ok(patch)
            })
            .await?;
        let (Some(updated), Some((previous_end_date, previous_status))) = (updated, previous)
        else {
            return Ok(None);
        };

        let was_completed = previous_status == ProjectStatus::Completed;
        let is_completed = updated.status == ProjectStatus::Completed;
        if updated.end_date == previous_end_date && was_completed == is_completed {
            return Ok(Some(updated));
        }
        self.reschedule(updated).await.map(Some)
    }

    pub async fn start_project(&self, id: ProjectId) -> Result<Option<Project>, LifecycleError> {
        Ok(self
            .repository
            .update_project(id, |_| ProjectPatch::status(ProjectStatus::InProgress))
            .await?)
    }

    /// Mark completed and drop any pending deadline reminders.
    pub async fn complete_project(&self, id: ProjectId) -> Result<Option<Project>, LifecycleError> {
        let mut pending = Vec::new();
        let updated = self
            .repository
            .update_project(id, |current| {
                pending = current.notification_ids.clone();
                ProjectPatch {
                    status: Some(ProjectStatus::Completed),
                    notification_ids: Some(Vec::new()),
                    ..ProjectPatch::default()
                }
            })
            .await?;
        self.notifier.cancel_notifications(&pending).await;
        Ok(updated)
    }

    pub async fn delete_project(&self, id: ProjectId) -> Result<Option<Project>, LifecycleError> {
        let removed = self.repository.delete_project(id).await?;
        if let Some(project) = &removed {
            self.notifier
                .cancel_notifications(&project.notification_ids)
                .await;
        }
        Ok(removed)
    }

    /// The task id is chosen under the repository's writer lock.
    pub async fn add_task(
        &self,
        id: ProjectId,
        draft: TaskDraft,
    ) -> Result<Option<Project>, LifecycleError> {
        let (description, due_date) = draft.validate()?;
        let now = self.repository.now_millis();
        Ok(self
            .repository
            .append_task_with(id, |project| {
                let task_id = next_id(now, project.tasks.iter().map(|t| t.id));
                Task::new(task_id, description).with_due_date(due_date)
            })
            .await?)
    }

    pub async fn update_task(
        &self,
        id: ProjectId,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> Result<Option<Project>, LifecycleError> {
        let patch = validate_task_patch(patch)?;
        Ok(self
            .repository
            .update_task_in_project(id, task_id, |_| patch)
            .await?)
    }

    pub async fn add_note(
        &self,
        id: ProjectId,
        text: &str,
    ) -> Result<Option<Project>, LifecycleError> {
        let note = validation::required(text, ValidationError::EmptyNote)?;
        Ok(self.repository.add_project_note(id, note).await?)
    }

    async fn reschedule(&self, project: Project) -> Result<Project, LifecycleError> {
        self.notifier
            .cancel_notifications(&project.notification_ids)
            .await;
        let notification_ids = if project.status == ProjectStatus::Completed {
            Vec::new()
        } else {
            self.notifier
                .schedule_project_deadline_notifications(&project)
                .await
        };
        let id = project.id;
        self.repository
            .update_project(id, |_| ProjectPatch::notification_ids(notification_ids))
            .await?
            .ok_or(LifecycleError::NotFound(id))
    }
}
