// Command data types for the project lifecycle.
//
// Purpose
// - Carry raw user input from a form or request body to the handler.
// - Be independent of the transport layer.
//
// Responsibilities
// - Validation turns each draft into the exact values the repository will store.

use crate::modules::projects::core::patch::{ProjectPatch, TaskPatch};
use crate::modules::projects::core::validation::{self, ValidationError};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDraft {
    pub name: String,
    pub budget: Option<f64>,
    pub client_name: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidProjectDraft {
    pub name: String,
    pub budget: f64,
    pub client_name: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

impl ProjectDraft {
    pub fn validate(self) -> Result<ValidProjectDraft, ValidationError> {
        let name = validation::required(&self.name, ValidationError::EmptyName)?;
        let budget = validation::budget(self.budget.unwrap_or(0.0))?;
        let start_date = validation::optional_date("startDate", &self.start_date)?;
        let end_date = validation::optional_date("endDate", &self.end_date)?;
        validation::date_range(&start_date, &end_date)?;
        Ok(ValidProjectDraft {
            name,
            budget,
            client_name: self.client_name.trim().to_string(),
            start_date,
            end_date,
            description: self.description.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDraft {
    pub description: String,
    pub due_date: String,
}

impl TaskDraft {
    /// Trimmed `(description, due_date)`.
    pub fn validate(self) -> Result<(String, String), ValidationError> {
        let description =
            validation::required(&self.description, ValidationError::EmptyTaskDescription)?;
        let due_date = validation::optional_date("dueDate", &self.due_date)?;
        Ok((description, due_date))
    }
}

/// Limit a details patch to descriptive fields and validate what it sets.
/// Tasks, notes, tracked time and notification ids have dedicated operations.
pub fn validate_details_patch(patch: ProjectPatch) -> Result<ProjectPatch, ValidationError> {
    let name = patch
        .name
        .map(|n| validation::required(&n, ValidationError::EmptyName))
        .transpose()?;
    let budget = patch.budget.map(validation::budget).transpose()?;
    let start_date = patch
        .start_date
        .map(|d| validation::optional_date("startDate", &d))
        .transpose()?;
    let end_date = patch
        .end_date
        .map(|d| validation::optional_date("endDate", &d))
        .transpose()?;

    Ok(ProjectPatch {
        name,
        budget,
        client_name: patch.client_name.map(|c| c.trim().to_string()),
        start_date,
        end_date,
        description: patch.description.map(|d| d.trim().to_string()),
        status: patch.status,
        ..ProjectPatch::default()
    })
}

pub fn validate_task_patch(patch: TaskPatch) -> Result<TaskPatch, ValidationError> {
    let description = patch
        .description
        .map(|d| validation::required(&d, ValidationError::EmptyTaskDescription))
        .transpose()?;
    let due_date = patch
        .due_date
        .map(|d| validation::optional_date("dueDate", &d))
        .transpose()?;
    Ok(TaskPatch {
        description,
        due_date,
        completed: patch.completed,
        notes: None,
    })
}
