//! In-memory task repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::auth::domain::Subject;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, HashMap<TaskId, Task>>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, HashMap<TaskId, Task>>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Sorts tasks oldest first, breaking timestamp ties by identifier.
fn oldest_first(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by_key(|task| (task.created_at(), task.id().into_inner()));
    tasks
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.write()?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut tasks = self.write()?;
        let stored_version = tasks
            .get(&task.id())
            .map(Task::version)
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;

        if stored_version != task.version() {
            return Err(TaskRepositoryError::StaleVersion {
                task_id: task.id(),
                expected: task.version(),
            });
        }

        let updated = task.clone().with_version(stored_version + 1);
        tasks.insert(task.id(), updated.clone());
        Ok(updated)
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut tasks = self.write()?;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.read()?;
        Ok(oldest_first(tasks.values().cloned().collect()))
    }

    async fn find_by_owner(&self, owner: &Subject) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.read()?;
        Ok(oldest_first(
            tasks
                .values()
                .filter(|task| task.owner() == owner)
                .cloned()
                .collect(),
        ))
    }
}
