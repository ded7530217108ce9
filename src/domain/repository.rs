use async_trait::async_trait;
use super::task::{Task, TaskId};

#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    async fn insert(&self, task: Task) -> anyhow::Result<()>;
    async fn get(&self, id: TaskId) -> anyhow::Result<Option<Task>>;
    async fn list(&self) -> anyhow::Result<Vec<Task>>;
    async fn replace(&self, task: Task) -> anyhow::Result<bool>;
    async fn delete(&self, id: TaskId) -> anyhow::Result<bool>;
}
