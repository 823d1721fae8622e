// Shared test fixtures for project inputs.
// Canonical values live in ./src/tests/fixtures/json and are read whenever a builder is created.

use crate::modules::projects::adapters::outbound::project_repository::NewProject;
use crate::modules::projects::core::project::{ProjectId, ProjectStatus};
use crate::modules::projects::use_cases::project_lifecycle::command::ProjectDraft;
use std::fs;

pub struct NewProjectBuilder {
    inner: NewProject,
}

impl Default for NewProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl NewProjectBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string("./src/tests/fixtures/json/new_project.json").unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
    }

    pub fn id(mut self, v: ProjectId) -> Self {
        self.inner.id = v;
        self
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.inner.name = v.into();
        self
    }

    pub fn end_date(mut self, v: impl Into<String>) -> Self {
        self.inner.end_date = Some(v.into());
        self
    }

    pub fn status(mut self, v: ProjectStatus) -> Self {
        self.inner.status = Some(v);
        self
    }

    pub fn time(mut self, v: u64) -> Self {
        self.inner.time = Some(v);
        self
    }

    pub fn build(self) -> NewProject {
        self.inner
    }
}

pub struct ProjectDraftBuilder {
    inner: ProjectDraft,
}

impl Default for ProjectDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl ProjectDraftBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string("./src/tests/fixtures/json/project_draft.json").unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.inner.name = v.into();
        self
    }

    pub fn client_name(mut self, v: impl Into<String>) -> Self {
        self.inner.client_name = v.into();
        self
    }

    pub fn budget(mut self, v: f64) -> Self {
        self.inner.budget = Some(v);
        self
    }

    pub fn start_date(mut self, v: impl Into<String>) -> Self {
        self.inner.start_date = v.into();
        self
    }

    pub fn end_date(mut self, v: impl Into<String>) -> Self {
        self.inner.end_date = v.into();
        self
    }

    pub fn build(self) -> ProjectDraft {
        self.inner
    }
}
