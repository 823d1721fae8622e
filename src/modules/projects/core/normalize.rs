// Defaulting and coercion of persisted project data.
//
// Purpose
// - Turn whatever JSON is stored under "projects" into well-typed records.
//
// Rules
// - Top level must be an array, otherwise the collection is empty.
// - Entries that are not objects, or lack an integer `id`, are dropped.
// - Missing or wrongly typed fields fall back to their defaults.
// - `updatedAt` never precedes `createdAt`.
//
// Boundaries
// - Pure: the caller supplies "now" for absent timestamps.

use crate::modules::projects::core::project::{Project, ProjectStatus};
use crate::modules::projects::core::task::Task;
use serde_json::{Map, Value};

pub fn normalize_projects(raw: &Value, now_millis: i64) -> Vec<Project> {
    let Some(entries) = raw.as_array() else {
        tracing::warn!("stored projects are not a list, treating as empty");
        return Vec::new();
    };
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let project = normalize_project(entry, now_millis);
            if project.is_none() {
                tracing::warn!(index, "dropping unreadable project entry");
            }
            project
        })
        .collect()
}

pub fn normalize_project(raw: &Value, now_millis: i64) -> Option<Project> {
    let fields = raw.as_object()?;
    let id = integer(fields.get("id"))?;

    let created_at = timestamp(fields.get("createdAt")).unwrap_or(now_millis);
    let updated_at = timestamp(fields.get("updatedAt"))
        .unwrap_or(now_millis)
        .max(created_at);

    Some(Project {
        id,
        name: text(fields, "name"),
        budget: budget(fields.get("budget")),
        client_name: text(fields, "clientName"),
        start_date: text(fields, "startDate"),
        end_date: text(fields, "endDate"),
        description: text(fields, "description"),
        status: fields
            .get("status")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<ProjectStatus>().ok())
            .unwrap_or_default(),
        time: seconds(fields.get("time")),
        tasks: fields
            .get("tasks")
            .and_then(Value::as_array)
            .map(|tasks| tasks.iter().filter_map(normalize_task).collect())
            .unwrap_or_default(),
        notes: strings(fields.get("notes")),
        created_at,
        updated_at,
        notification_ids: strings(fields.get("notificationIds")),
        started_at_ts: integer(fields.get("startedAtTs")),
    })
}

pub fn normalize_task(raw: &Value) -> Option<Task> {
    let fields = raw.as_object()?;
    Some(Task {
        id: integer(fields.get("id"))?,
        description: text(fields, "description"),
        due_date: text(fields, "dueDate"),
        completed: fields
            .get("completed")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        notes: strings(fields.get("notes")),
    })
}

fn text(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn integer(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f as i64)
}

fn timestamp(value: Option<&Value>) -> Option<i64> {
    integer(value).filter(|ts| *ts > 0)
}

fn budget(value: Option<&Value>) -> f64 {
    let amount = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    amount
        .filter(|a| a.is_finite() && *a >= 0.0)
        .unwrap_or(0.0)
}

fn seconds(value: Option<&Value>) -> u64 {
    value
        .and_then(Value::as_f64)
        .filter(|s| s.is_finite() && *s > 0.0)
        .map(|s| s.floor() as u64)
        .unwrap_or(0)
}

fn strings(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
