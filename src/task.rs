//! The task record and its status/priority enums.
//!
//! Tasks serialize to the same shape the persisted blob uses: a JSON object
//! with `id`, `name`, `description`, `dueDate`, `status`, and `priority`.
//! Status and priority carry serde defaults so seed records that omit them
//! hydrate to `Pending`/`Low`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Completed];

    /// The user-visible label, also the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "pending" => Ok(Status::Pending),
            "in progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            _ => Err(Error::InvalidArgument(format!(
                "invalid status '{value}' (expected Pending|In Progress|Completed)"
            ))),
        }
    }
}

/// Priority of a task. Ordered low to high.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(Error::InvalidArgument(format!(
                "invalid priority '{value}' (expected Low|Medium|High)"
            ))),
        }
    }
}

/// One user-visible to-do item.
///
/// `id` is unique within the collection and immutable after creation.
/// `name` and `due_date` are non-empty at creation time; that is enforced
/// by the editor and CLI, not by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "dueDate")]
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
}

/// Parse an ISO `YYYY-MM-DD` date, rejecting anything else.
pub fn parse_due_date(value: &str) -> crate::error::Result<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument(
            "due date cannot be empty".to_string(),
        ));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_label() {
        for status in Status::ALL {
            assert_eq!(status.label().parse::<Status>().unwrap(), status);
        }
    }

    #[test]
    fn status_parse_accepts_loose_forms() {
        assert_eq!("in_progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("IN PROGRESS".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!(" pending ".parse::<Status>().unwrap(), Status::Pending);
        assert!("done".parse::<Status>().is_err());
    }

    #[test]
    fn priority_parse_is_case_insensitive() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn task_serializes_with_blob_field_names() {
        let task = Task {
            id: 1,
            name: "Write report".to_string(),
            description: "Quarterly numbers".to_string(),
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            status: Status::InProgress,
            priority: Priority::High,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["dueDate"], "2026-09-01");
        assert_eq!(json["status"], "In Progress");
        assert_eq!(json["priority"], "High");
    }

    #[test]
    fn task_deserializes_without_status_or_priority() {
        let json = r#"{"id":2,"name":"Pay rent","dueDate":"2026-09-03"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, Status::Pending);
        assert_eq!(task.priority, Priority::Low);
        assert!(task.description.is_empty());
    }

    #[test]
    fn due_date_rejects_non_iso_input() {
        assert!(parse_due_date("2026-09-01").is_ok());
        assert!(matches!(
            parse_due_date("09/01/2026"),
            Err(Error::InvalidDate(_))
        ));
        assert!(parse_due_date("").is_err());
    }
}
