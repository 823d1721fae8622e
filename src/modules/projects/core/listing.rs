// Filtering, sorting and summarizing the project list for display.
//
// Responsibilities
// - Filter by status ("All" keeps everything).
// - Sort by deadline (unset or unreadable end dates first) or by name.
// - Attach checklist progress and tracked hours to each entry.

use crate::modules::projects::core::project::{Progress, Project, ProjectStatus};
use crate::modules::projects::core::validation::parse_date;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl StatusFilter {
    fn matches(&self, status: ProjectStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::NotStarted => status == ProjectStatus::NotStarted,
            StatusFilter::InProgress => status == ProjectStatus::InProgress,
            StatusFilter::Completed => status == ProjectStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SortBy {
    #[default]
    Deadline,
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectQuery {
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub sort: SortBy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    pub progress: Progress,
    pub tracked_hours: f64,
}

impl From<Project> for ProjectSummary {
    fn from(project: Project) -> Self {
        Self {
            progress: project.progress(),
            tracked_hours: project.tracked_hours(),
            project,
        }
    }
}

pub fn select(projects: Vec<Project>, query: &ProjectQuery) -> Vec<ProjectSummary> {
    let mut selected: Vec<Project> = projects
        .into_iter()
        .filter(|p| query.status.matches(p.status))
        .collect();

    match query.sort {
        SortBy::Deadline => selected.sort_by_key(|p| parse_date(&p.end_date)),
        SortBy::Name => selected.sort_by(|a, b| a.name.cmp(&b.name)),
    }

    selected.into_iter().map(ProjectSummary::from).collect()
}
