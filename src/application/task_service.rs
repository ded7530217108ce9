use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    error::{TaskError, ValidationError},
    repository::TaskRepository,
    task::{Task, TaskForm, TaskId, TaskStatus},
};

#[async_trait]
pub trait TaskService: Send + Sync + 'static {
    async fn add(&self, form: TaskForm) -> Result<Task, TaskError>;
    async fn edit(&self, id: TaskId, form: TaskForm) -> Result<Option<Task>, TaskError>;
    async fn toggle(&self, id: TaskId) -> Result<Option<Task>, TaskError>;
    async fn delete(&self, id: TaskId) -> Result<bool, TaskError>;
    async fn list(&self) -> Result<Vec<Task>, TaskError>;
    async fn filter(&self, status: TaskStatus) -> Result<Vec<Task>, TaskError>;
}

#[derive(Clone)]
pub struct TaskServiceImpl<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TaskRepository> TaskService for TaskServiceImpl<R> {
    async fn add(&self, form: TaskForm) -> Result<Task, TaskError> {
        let title = validated_title(&form.title)?;
        let now = Utc::now();
        let task = Task {
            id: TaskId::default(),
            title,
            description: normalized(form.description),
            due_date: form.due_date,
            priority: form.priority,
            status: TaskStatus::Open,
            created_at: now,
            updated_at: now,
        };
        self.repo.insert(task.clone()).await?;
        tracing::debug!(id = %task.id.0, "task added");
        Ok(task)
    }

    async fn edit(&self, id: TaskId, form: TaskForm) -> Result<Option<Task>, TaskError> {
        let title = validated_title(&form.title)?;
        let Some(mut task) = self.repo.get(id).await? else { return Ok(None) };
        task.title = title;
        task.description = normalized(form.description);
        task.due_date = form.due_date;
        task.priority = form.priority;
        task.updated_at = Utc::now();
        self.repo.replace(task.clone()).await?;
        tracing::debug!(id = %id.0, "task updated");
        Ok(Some(task))
    }

    async fn toggle(&self, id: TaskId) -> Result<Option<Task>, TaskError> {
        let Some(mut task) = self.repo.get(id).await? else { return Ok(None) };
        task.status = task.status.toggled();
        task.updated_at = Utc::now();
        self.repo.replace(task.clone()).await?;
        tracing::debug!(id = %id.0, status = task.status.label(), "task toggled");
        Ok(Some(task))
    }

    async fn delete(&self, id: TaskId) -> Result<bool, TaskError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::debug!(id = %id.0, "task deleted");
        }
        Ok(deleted)
    }

    async fn list(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.repo.list().await?)
    }

    async fn filter(&self, status: TaskStatus) -> Result<Vec<Task>, TaskError> {
        let mut tasks = self.repo.list().await?;
        tasks.retain(|t| t.status == status);
        Ok(tasks)
    }
}

fn validated_title(raw: &str) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        Err(ValidationError::TitleRequired)
    } else {
        Ok(title.to_string())
    }
}

// Blank descriptions collapse to None so a stored task never carries an
// empty string.
fn normalized(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
