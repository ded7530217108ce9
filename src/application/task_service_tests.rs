#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::application::task_service::{TaskService, TaskServiceImpl};
    use crate::domain::error::{TaskError, ValidationError};
    use crate::domain::task::{TaskForm, TaskId, TaskPriority, TaskStatus};
    use crate::infrastructure::memory_repo::InMemoryTaskRepository;

    fn service() -> TaskServiceImpl<InMemoryTaskRepository> {
        TaskServiceImpl::new(InMemoryTaskRepository::new())
    }

    fn form(title: &str) -> TaskForm {
        TaskForm { title: title.to_string(), ..TaskForm::default() }
    }

    fn assert_title_required(err: TaskError) {
        assert!(matches!(err, TaskError::Validation(ValidationError::TitleRequired)));
    }

    #[tokio::test]
    async fn add_creates_an_open_task() {
        let service = service();
        let task = service.add(form("Buy milk")).await.unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.created_at, task.updated_at);
        assert_eq!(service.filter(TaskStatus::Open).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_rejects_blank_title() {
        let service = service();
        assert_title_required(service.add(form("   ")).await.unwrap_err());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_trims_title_and_normalizes_description() {
        let service = service();
        let mut input = form("  Water plants  ");
        input.description = Some("   ".to_string());
        let task = service.add(input).await.unwrap();
        assert_eq!(task.title, "Water plants");
        assert_eq!(task.description, None);
    }

    #[tokio::test]
    async fn edit_replaces_fields_and_preserves_identity() {
        let service = service();
        let original = service.add(form("Buy milk")).await.unwrap();

        let updated = service
            .edit(
                original.id,
                TaskForm {
                    title: "Buy oat milk".to_string(),
                    description: Some("two cartons".to_string()),
                    due_date: NaiveDate::from_ymd_opt(2026, 8, 14),
                    priority: TaskPriority::High,
                },
            )
            .await
            .unwrap()
            .expect("task should exist");

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.status, original.status);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
        assert_eq!(updated.title, "Buy oat milk");
        assert_eq!(updated.description.as_deref(), Some("two cartons"));
        assert_eq!(updated.due_date, NaiveDate::from_ymd_opt(2026, 8, 14));
        assert_eq!(updated.priority, TaskPriority::High);
    }

    #[tokio::test]
    async fn edit_with_blank_title_changes_nothing() {
        let service = service();
        let original = service.add(form("Buy milk")).await.unwrap();
        assert_title_required(service.edit(original.id, form(" ")).await.unwrap_err());
        assert_eq!(service.list().await.unwrap(), vec![original]);
    }

    #[tokio::test]
    async fn edit_unknown_id_is_a_no_op() {
        let service = service();
        let result = service.edit(TaskId::default(), form("ghost")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn toggle_twice_round_trips_except_updated_at() {
        let service = service();
        let original = service.add(form("Buy milk")).await.unwrap();

        let completed = service.toggle(original.id).await.unwrap().unwrap();
        assert_eq!(completed.status, TaskStatus::Completed);

        let reopened = service.toggle(original.id).await.unwrap().unwrap();
        assert!(reopened.updated_at >= completed.updated_at);
        let mut comparable = reopened.clone();
        comparable.updated_at = original.updated_at;
        assert_eq!(comparable, original);
    }

    #[tokio::test]
    async fn toggle_moves_task_between_filters() {
        let service = service();
        let task = service
            .add(TaskForm { title: "Buy milk".to_string(), priority: TaskPriority::Low, ..TaskForm::default() })
            .await
            .unwrap();
        assert_eq!(task.priority, TaskPriority::Low);

        service.toggle(task.id).await.unwrap();
        let open = service.filter(TaskStatus::Open).await.unwrap();
        let completed = service.filter(TaskStatus::Completed).await.unwrap();
        assert!(open.iter().all(|t| t.id != task.id));
        assert!(completed.iter().any(|t| t.id == task.id));
    }

    #[tokio::test]
    async fn toggle_unknown_id_is_a_no_op() {
        let service = service();
        assert!(service.toggle(TaskId::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_task_from_both_filters() {
        let service = service();
        let task = service.add(form("Buy milk")).await.unwrap();
        assert!(service.delete(task.id).await.unwrap());
        assert!(!service.delete(task.id).await.unwrap());
        assert!(service.filter(TaskStatus::Open).await.unwrap().is_empty());
        assert!(service.filter(TaskStatus::Completed).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn filters_partition_the_collection_in_order() {
        let service = service();
        let a = service.add(form("a")).await.unwrap();
        let b = service.add(form("b")).await.unwrap();
        let c = service.add(form("c")).await.unwrap();
        service.toggle(b.id).await.unwrap();
        service.edit(c.id, form("c2")).await.unwrap();
        service.delete(a.id).await.unwrap();
        let d = service.add(form("d")).await.unwrap();

        let all = service.list().await.unwrap();
        let open = service.filter(TaskStatus::Open).await.unwrap();
        let completed = service.filter(TaskStatus::Completed).await.unwrap();

        assert_eq!(open.len() + completed.len(), all.len());
        assert!(open.iter().all(|t| completed.iter().all(|u| u.id != t.id)));

        let open_titles: Vec<_> = open.iter().map(|t| t.title.as_str()).collect();
        let completed_titles: Vec<_> = completed.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(open_titles, ["c2", "d"]);
        assert_eq!(completed_titles, ["b"]);
        assert_eq!(all.last().map(|t| t.id), Some(d.id));
    }
}
