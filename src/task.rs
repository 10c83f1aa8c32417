//! Task data structure as received from the task API.
//!
//! Tasks are created and destroyed by the API. The board only ever holds a
//! read-derived copy, so nothing in here generates ids or timestamps on its own.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::*;

/// Opaque task identity assigned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId(s)
    }
}

/// Person a task is assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// A board task with its display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "iso_date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, with = "iso_date", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, with = "iso_date", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, with = "iso_date", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub subtasks: Vec<serde_json::Value>,
    #[serde(default)]
    pub comments: Vec<serde_json::Value>,
    #[serde(default)]
    pub attachments: Vec<serde_json::Value>,
}

impl Task {
    /// Completion time used to rank completed tasks:
    /// `completedAt`, then `updatedAt`, then `createdAt`.
    pub fn effective_completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at.or(self.updated_at).or(self.created_at)
    }

    pub fn lane(&self) -> Option<Status> {
        self.status.lane()
    }
}

/// Serde adapter for optional ISO dates.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (read as midnight UTC).
pub mod iso_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    pub fn serialize<S: Serializer>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse(s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid ISO date: {s}"))),
        }
    }
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: Option<DateTime<Utc>>, today: NaiveDate) -> String {
    match due {
        None => "-".into(),
        Some(d) => {
            let delta = d.date_naive() - today;
            if delta.num_days() == 0 {
                "today".into()
            } else if delta.num_days() == 1 {
                "tomorrow".into()
            } else if delta.num_days() > 1 {
                format!("in {}d", delta.num_days())
            } else {
                format!("{}d late", -delta.num_days())
            }
        }
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// Builders for tasks in unit tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    pub fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    pub fn task(id: &str, status: Status) -> Task {
        Task {
            id: TaskId::from(id),
            title: format!("Task {id}"),
            description: None,
            status: TaskStatus::Known(status),
            priority: Priority::Medium,
            due_date: None,
            completed_at: None,
            updated_at: None,
            created_at: None,
            assignee: None,
            category: None,
            subcategory: None,
            subtasks: Vec::new(),
            comments: Vec::new(),
            attachments: Vec::new(),
        }
    }

    pub fn with_status(id: &str, raw: &str) -> Task {
        let mut t = task(id, Status::Todo);
        t.status = TaskStatus::Unknown(raw.to_string());
        t
    }

    pub fn due(mut t: Task, at: DateTime<Utc>) -> Task {
        t.due_date = Some(at);
        t
    }

    pub fn completed(id: &str, at: DateTime<Utc>) -> Task {
        let mut t = task(id, Status::Completed);
        t.completed_at = Some(at);
        t
    }

    pub fn ids<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<&'a str> {
        tasks.into_iter().map(|t| t.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn deserializes_api_shape() {
        let json = r#"{
            "_id": "t1",
            "title": "Close seed round",
            "status": "in_progress",
            "priority": "critical",
            "dueDate": "2024-05-01",
            "updatedAt": "2024-04-02T10:30:00Z",
            "assignee": {"name": "Dana"},
            "subtasks": [{"title": "term sheet"}],
            "comments": []
        }"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.id, TaskId::from("t1"));
        assert_eq!(t.lane(), Some(Status::InProgress));
        assert_eq!(t.priority, Priority::Critical);
        assert_eq!(t.due_date, Some(date(2024, 5, 1)));
        assert_eq!(t.assignee.as_ref().map(|a| a.name.as_str()), Some("Dana"));
        assert_eq!(t.subtasks.len(), 1);
        assert!(t.attachments.is_empty());
    }

    #[test]
    fn rejects_garbage_dates() {
        let json = r#"{"_id": "t1", "title": "x", "status": "todo", "dueDate": "next week"}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn effective_completion_falls_back() {
        let mut t = task("a", Status::Completed);
        assert_eq!(t.effective_completed_at(), None);
        t.created_at = Some(date(2024, 1, 1));
        assert_eq!(t.effective_completed_at(), Some(date(2024, 1, 1)));
        t.updated_at = Some(date(2024, 2, 1));
        assert_eq!(t.effective_completed_at(), Some(date(2024, 2, 1)));
        t.completed_at = Some(date(2024, 3, 1));
        assert_eq!(t.effective_completed_at(), Some(date(2024, 3, 1)));
    }

    #[test]
    fn due_is_relative_to_today() {
        let today = date(2024, 5, 10).date_naive();
        assert_eq!(format_due_relative(None, today), "-");
        assert_eq!(format_due_relative(Some(date(2024, 5, 10)), today), "today");
        assert_eq!(format_due_relative(Some(date(2024, 5, 11)), today), "tomorrow");
        assert_eq!(format_due_relative(Some(date(2024, 5, 14)), today), "in 4d");
        assert_eq!(format_due_relative(Some(date(2024, 5, 8)), today), "2d late");
    }
}
