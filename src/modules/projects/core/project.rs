// Project record as stored under the "projects" key.
//
// Purpose
// - The canonical, normalized shape every reader gets back from the repository.
//
// Notes
// - All timestamps are epoch milliseconds.
// - `time` is whole tracked seconds.
// - The wire format is camelCase with status strings "Not Started" / "In Progress" / "Completed".

use crate::modules::projects::core::task::Task;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type ProjectId = i64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "Not Started",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown project status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ProjectStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Not Started" => Ok(ProjectStatus::NotStarted),
            "In Progress" => Ok(ProjectStatus::InProgress),
            "Completed" => Ok(ProjectStatus::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub budget: f64,
    pub client_name: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub status: ProjectStatus,
    pub time: u64,
    pub tasks: Vec<Task>,
    pub notes: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub notification_ids: Vec<String>,
    pub started_at_ts: Option<i64>,
}

impl Project {
    /// Blank project with every optional field at its default.
    pub fn new(id: ProjectId, name: impl Into<String>, now_millis: i64) -> Self {
        Self {
            id,
            name: name.into(),
            budget: 0.0,
            client_name: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
            status: ProjectStatus::NotStarted,
            time: 0,
            tasks: Vec::new(),
            notes: Vec::new(),
            created_at: now_millis,
            updated_at: now_millis,
            notification_ids: Vec::new(),
            started_at_ts: None,
        }
    }

    pub fn task(&self, task_id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn is_timer_running(&self) -> bool {
        self.started_at_ts.is_some()
    }

    pub fn progress(&self) -> Progress {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        let percent = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u8
        };
        Progress {
            completed,
            total,
            percent,
        }
    }

    pub fn tracked_hours(&self) -> f64 {
        self.time as f64 / 3600.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}
