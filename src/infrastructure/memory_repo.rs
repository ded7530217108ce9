use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{
    repository::TaskRepository,
    task::{Task, TaskId},
};

/// Process-local task store. The backing `Vec` is the collection order, so
/// listing always yields insertion order; nothing survives the session.
#[derive(Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<Mutex<Vec<Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self { Self::default() }

    fn lock(&self) -> MutexGuard<'_, Vec<Task>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: Task) -> Result<()> {
        self.lock().push(task);
        Ok(())
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>> {
        Ok(self.lock().iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Task>> {
        Ok(self.lock().clone())
    }

    async fn replace(&self, task: Task) -> Result<bool> {
        let mut tasks = self.lock();
        match tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: TaskId) -> Result<bool> {
        let mut tasks = self.lock();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        Ok(tasks.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::InMemoryTaskRepository;
    use crate::domain::{
        repository::TaskRepository,
        task::{Task, TaskId, TaskPriority, TaskStatus},
    };

    fn task(title: &str) -> Task {
        let now = Utc::now();
        Task {
            id: TaskId::default(),
            title: title.to_string(),
            description: None,
            due_date: None,
            priority: TaskPriority::default(),
            status: TaskStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let repo = InMemoryTaskRepository::new();
        for title in ["first", "second", "third"] {
            repo.insert(task(title)).await.unwrap();
        }
        let titles: Vec<_> = repo.list().await.unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn replace_keeps_position() {
        let repo = InMemoryTaskRepository::new();
        repo.insert(task("first")).await.unwrap();
        let mut second = task("second");
        repo.insert(second.clone()).await.unwrap();
        repo.insert(task("third")).await.unwrap();

        second.title = "renamed".to_string();
        assert!(repo.replace(second).await.unwrap());
        let titles: Vec<_> = repo.list().await.unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["first", "renamed", "third"]);
    }

    #[tokio::test]
    async fn replace_and_delete_miss_unknown_ids() {
        let repo = InMemoryTaskRepository::new();
        repo.insert(task("only")).await.unwrap();
        assert!(!repo.replace(task("stranger")).await.unwrap());
        assert!(!repo.delete(TaskId::default()).await.unwrap());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
