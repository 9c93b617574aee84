use chrono::Utc;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::task::{parse_status, require_due_date};
use crate::models::{
    NewTask, Task, TaskCreateRequest, TaskPatchRequest, TaskResponse, TaskUpdateRequest,
};
use crate::store::{TaskStore, UserStore};

/// Task CRUD scoped to the calling user.
///
/// Every lookup goes through `owned_task`: a task that exists but belongs to someone
/// else is reported exactly like a missing one.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    users: Arc<dyn UserStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>, users: Arc<dyn UserStore>) -> Self {
        Self { tasks, users }
    }

    fn owned_task(&self, task_id: i32, user_id: i32) -> Result<Option<Task>, AppError> {
        Ok(self
            .tasks
            .get_by_id(task_id)?
            .filter(|task| task.user_id == user_id))
    }

    /// Persists a mutated task. A task removed since it was read counts as absent.
    fn save(&self, task: Task) -> Result<Option<TaskResponse>, AppError> {
        match self.tasks.update(task) {
            Ok(saved) => Ok(Some(TaskResponse::from(&saved))),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn list_for_user(&self, user_id: i32) -> Result<Vec<TaskResponse>, AppError> {
        Ok(self
            .tasks
            .get_by_user_id(user_id)?
            .iter()
            .map(TaskResponse::from)
            .collect())
    }

    pub fn get(&self, task_id: i32, user_id: i32) -> Result<Option<TaskResponse>, AppError> {
        Ok(self
            .owned_task(task_id, user_id)?
            .as_ref()
            .map(TaskResponse::from))
    }

    pub fn create(
        &self,
        input: TaskCreateRequest,
        user_id: i32,
    ) -> Result<TaskResponse, AppError> {
        if self.users.get_by_id(user_id)?.is_none() {
            return Err(AppError::BadRequest("User not found.".into()));
        }

        let status = parse_status(input.status)?;
        let due_date = require_due_date(input.due_date)?;
        let task = self.tasks.create(NewTask {
            title: input.title,
            description: input.description,
            status,
            due_date,
            user_id,
            created_at: Utc::now(),
            updated_at: None,
        })?;

        log::info!("User {} created task {}", user_id, task.id);
        Ok(TaskResponse::from(&task))
    }

    /// Overwrites title, description, status and due date.
    pub fn update_full(
        &self,
        task_id: i32,
        input: TaskUpdateRequest,
        user_id: i32,
    ) -> Result<Option<TaskResponse>, AppError> {
        let mut task = match self.owned_task(task_id, user_id)? {
            Some(task) => task,
            None => return Ok(None),
        };

        task.status = parse_status(input.status)?;
        task.due_date = require_due_date(input.due_date)?;
        task.title = input.title;
        task.description = input.description;
        task.updated_at = Some(Utc::now());

        log::info!("User {} replaced task {}", user_id, task_id);
        self.save(task)
    }

    /// Applies the fields present in `patch`. An empty title is ignored; an empty
    /// description clears the stored one. `updated_at` is refreshed even when
    /// nothing else changes.
    pub fn update_partial(
        &self,
        task_id: i32,
        patch: TaskPatchRequest,
        user_id: i32,
    ) -> Result<Option<TaskResponse>, AppError> {
        let mut task = match self.owned_task(task_id, user_id)? {
            Some(task) => task,
            None => return Ok(None),
        };

        if let Some(title) = patch.title.filter(|t| !t.is_empty()) {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = parse_status(status)?;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        task.updated_at = Some(Utc::now());

        log::info!("User {} patched task {}", user_id, task_id);
        self.save(task)
    }

    pub fn delete(&self, task_id: i32, user_id: i32) -> Result<bool, AppError> {
        if self.owned_task(task_id, user_id)?.is_none() {
            return Ok(false);
        }
        let removed = self.tasks.delete(task_id)?;
        if removed {
            log::info!("User {} deleted task {}", user_id, task_id);
        }
        Ok(removed)
    }
}
