// Shallow merge patches for projects and tasks.
//
// Purpose
// - Name exactly which fields an update overwrites. `None` leaves the field untouched.
//
// Boundaries
// - `id`, `createdAt` and `updatedAt` are never patchable; the repository owns them.

use crate::modules::projects::core::project::{Project, ProjectStatus};
use crate::modules::projects::core::task::Task;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub budget: Option<f64>,
    pub client_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub time: Option<u64>,
    pub tasks: Option<Vec<Task>>,
    pub notes: Option<Vec<String>>,
    pub notification_ids: Option<Vec<String>>,
    /// `Some(None)` stops the timer marker, `Some(Some(ts))` sets it.
    #[serde(skip)]
    pub started_at_ts: Option<Option<i64>>,
}

impl ProjectPatch {
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Some(tasks),
            ..Self::default()
        }
    }

    pub fn notes(notes: Vec<String>) -> Self {
        Self {
            notes: Some(notes),
            ..Self::default()
        }
    }

    pub fn notification_ids(ids: Vec<String>) -> Self {
        Self {
            notification_ids: Some(ids),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(budget) = self.budget {
            project.budget = budget;
        }
        if let Some(client_name) = self.client_name {
            project.client_name = client_name;
        }
        if let Some(start_date) = self.start_date {
            project.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            project.end_date = end_date;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(time) = self.time {
            project.time = time;
        }
        if let Some(tasks) = self.tasks {
            project.tasks = tasks;
        }
        if let Some(notes) = self.notes {
            project.notes = notes;
        }
        if let Some(ids) = self.notification_ids {
            project.notification_ids = ids;
        }
        if let Some(started_at_ts) = self.started_at_ts {
            project.started_at_ts = started_at_ts;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
    pub notes: Option<Vec<String>>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn apply_to(self, task: &mut Task) {
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(notes) = self.notes {
            task.notes = notes;
        }
    }
}
