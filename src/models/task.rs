use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use validator::{Validate, ValidationError};

use crate::error::{AppError, FieldError};

const DUE_DATE_MESSAGE: &str = "Due date is required.";
const STATUS_MESSAGE: &str = "Status must be one of: Pending (0), InProgress (1), Completed (2).";

/// Represents the status of a task.
/// Transmitted as an integer on write and rendered by name on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Task is yet to be started.
    Pending = 0,
    /// Task is currently being worked on.
    InProgress = 1,
    /// Task is completed.
    Completed = 2,
}

impl TaskStatus {
    pub fn name(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl TryFrom<i32> for TaskStatus {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaskStatus::Pending),
            1 => Ok(TaskStatus::InProgress),
            2 => Ok(TaskStatus::Completed),
            other => Err(other),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A task as held by the task store.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: DateTime<Utc>,
    /// Identifier of the owning user. Never changes after creation.
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    /// Set whenever the task is mutated.
    pub updated_at: Option<DateTime<Utc>>,
}

/// A task that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: DateTime<Utc>,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl NewTask {
    pub fn into_task(self, id: i32) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            due_date: self.due_date,
            user_id: self.user_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Payload for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateRequest {
    #[serde(default)]
    #[validate(custom = "validate_required_title")]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters."))]
    pub description: String,

    #[serde(default)]
    #[validate(range(min = 0, max = 2, message = "Status must be one of: Pending (0), InProgress (1), Completed (2)."))]
    pub status: i32,

    #[validate(
        required(message = "Due date is required."),
        custom = "validate_future_date"
    )]
    pub due_date: Option<DateTime<Utc>>,
}

/// Payload for replacing every mutable field of a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateRequest {
    #[serde(default)]
    #[validate(custom = "validate_required_title")]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters."))]
    pub description: String,

    #[serde(default)]
    #[validate(range(min = 0, max = 2, message = "Status must be one of: Pending (0), InProgress (1), Completed (2)."))]
    pub status: i32,

    #[validate(required(message = "Due date is required."))]
    pub due_date: Option<DateTime<Utc>>,
}

/// Payload for a partial update. Absent fields leave the stored value untouched;
/// an empty title is treated as absent, an empty description is not.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatchRequest {
    #[validate(length(max = 200, message = "Title cannot exceed 200 characters."))]
    pub title: Option<String>,

    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters."))]
    pub description: Option<String>,

    #[validate(range(min = 0, max = 2, message = "Status must be one of: Pending (0), InProgress (1), Completed (2)."))]
    pub status: Option<i32>,

    pub due_date: Option<DateTime<Utc>>,
}

/// Task view returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    pub due_date: DateTime<Utc>,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.to_string(),
            due_date: task.due_date,
            user_id: task.user_id,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Parses a wire status, reporting the same message the validators use.
pub fn parse_status(value: i32) -> Result<TaskStatus, AppError> {
    TaskStatus::try_from(value).map_err(|_| AppError::BadRequest(STATUS_MESSAGE.into()))
}

/// Unwraps a due date that validation has already required.
pub fn require_due_date(due_date: Option<DateTime<Utc>>) -> Result<DateTime<Utc>, AppError> {
    due_date.ok_or_else(|| {
        AppError::ValidationError(vec![FieldError {
            property: "dueDate".into(),
            message: DUE_DATE_MESSAGE.into(),
        }])
    })
}

fn validate_required_title(title: &str) -> Result<(), ValidationError> {
    let (code, message) = if title.trim().is_empty() {
        ("required", "Title is required.")
    } else if title.chars().count() > 200 {
        ("length", "Title cannot exceed 200 characters.")
    } else {
        return Ok(());
    };
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::from(message));
    Err(error)
}

fn validate_future_date(due_date: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *due_date > Utc::now() {
        return Ok(());
    }
    let mut error = ValidationError::new("future_date");
    error.message = Some(Cow::from("Due date must be in the future."));
    Err(error)
}
