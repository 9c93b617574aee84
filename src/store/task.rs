use std::sync::RwLock;

use super::{read_lock, write_lock};
use crate::error::AppError;
use crate::models::{NewTask, Task};

/// Storage for tasks. Ownership is not enforced here; that is the service's job.
pub trait TaskStore: Send + Sync {
    /// Assigns the next id from this store's counter and stores the task.
    fn create(&self, task: NewTask) -> Result<Task, AppError>;

    fn get_by_id(&self, id: i32) -> Result<Option<Task>, AppError>;

    /// All tasks owned by `user_id`, in insertion order.
    fn get_by_user_id(&self, user_id: i32) -> Result<Vec<Task>, AppError>;

    /// Replaces the stored task with the same id.
    /// Returns `AppError::NotFound` if no such task exists.
    fn update(&self, task: Task) -> Result<Task, AppError>;

    /// Removes the task, reporting whether anything was removed.
    fn delete(&self, id: i32) -> Result<bool, AppError>;
}

#[derive(Debug, Default)]
struct TaskTable {
    last_id: i32,
    rows: Vec<Task>,
}

#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    table: RwLock<TaskTable>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for InMemoryTaskStore {
    fn create(&self, task: NewTask) -> Result<Task, AppError> {
        let mut table = write_lock(&self.table, "task")?;
        table.last_id += 1;
        let task = task.into_task(table.last_id);
        table.rows.push(task.clone());
        Ok(task)
    }

    fn get_by_id(&self, id: i32) -> Result<Option<Task>, AppError> {
        let table = read_lock(&self.table, "task")?;
        Ok(table.rows.iter().find(|t| t.id == id).cloned())
    }

    fn get_by_user_id(&self, user_id: i32) -> Result<Vec<Task>, AppError> {
        let table = read_lock(&self.table, "task")?;
        Ok(table
            .rows
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    fn update(&self, task: Task) -> Result<Task, AppError> {
        let mut table = write_lock(&self.table, "task")?;
        match table.rows.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => {
                *existing = task.clone();
                Ok(task)
            }
            None => Err(AppError::NotFound(format!("Task {} not found", task.id))),
        }
    }

    fn delete(&self, id: i32) -> Result<bool, AppError> {
        let mut table = write_lock(&self.table, "task")?;
        let before = table.rows.len();
        table.rows.retain(|t| t.id != id);
        Ok(table.rows.len() != before)
    }
}
