//! Modal create/edit form for the task screen.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::task::{Task, TaskForm, TaskId, TaskPriority};
use crate::ui::input::InputField;

pub const DUE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FormField { Title, Description, Due, Priority }

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Due,
            Self::Due => Self::Priority,
            Self::Priority => Self::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Priority,
            Self::Description => Self::Title,
            Self::Due => Self::Description,
            Self::Priority => Self::Due,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Due date must be YYYY-MM-DD")]
    BadDueDate,
}

/// State behind the add/edit dialog. `editing` carries the target id when the
/// form was opened on an existing task.
pub struct TaskFormState {
    pub title: InputField,
    pub description: InputField,
    pub due: InputField,
    pub priority: TaskPriority,
    pub field: FormField,
    pub editing: Option<TaskId>,
}

impl TaskFormState {
    pub fn create() -> Self {
        Self {
            title: InputField::new(),
            description: InputField::new(),
            due: InputField::new(),
            priority: TaskPriority::default(),
            field: FormField::Title,
            editing: None,
        }
    }

    pub fn edit(task: &Task) -> Self {
        let due = task
            .due_date
            .map(|d| d.format(DUE_FORMAT).to_string())
            .unwrap_or_default();
        Self {
            title: InputField::with_value(&task.title),
            description: InputField::with_value(task.description.as_deref().unwrap_or_default()),
            due: InputField::with_value(&due),
            priority: task.priority,
            field: FormField::Title,
            editing: Some(task.id),
        }
    }

    pub fn active_input(&mut self) -> Option<&mut InputField> {
        match self.field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Due => Some(&mut self.due),
            FormField::Priority => None,
        }
    }

    pub fn cycle_priority(&mut self, forward: bool) {
        self.priority = match (self.priority, forward) {
            (TaskPriority::Low, true) => TaskPriority::Medium,
            (TaskPriority::Medium, true) => TaskPriority::High,
            (TaskPriority::High, true) => TaskPriority::Low,
            (TaskPriority::Low, false) => TaskPriority::High,
            (TaskPriority::Medium, false) => TaskPriority::Low,
            (TaskPriority::High, false) => TaskPriority::Medium,
        };
    }

    /// Build the service payload. The due date must be blank or `YYYY-MM-DD`;
    /// title validation belongs to the service.
    pub fn to_form(&self) -> Result<TaskForm, FormError> {
        let due = self.due.value().trim();
        let due_date = if due.is_empty() {
            None
        } else {
            Some(NaiveDate::parse_from_str(due, DUE_FORMAT).map_err(|_| FormError::BadDueDate)?)
        };
        Ok(TaskForm {
            title: self.title.value().to_string(),
            description: Some(self.description.value().to_string()),
            due_date,
            priority: self.priority,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::{FormError, FormField, TaskFormState};
    use crate::domain::task::{Task, TaskId, TaskPriority, TaskStatus};
    use crate::ui::input::InputField;

    #[test]
    fn blank_due_date_means_none() {
        let mut form = TaskFormState::create();
        form.due = InputField::with_value("   ");
        assert_eq!(form.to_form().unwrap().due_date, None);
    }

    #[test]
    fn due_date_parses_or_is_rejected() {
        let mut form = TaskFormState::create();
        form.due = InputField::with_value("2026-08-14");
        assert_eq!(form.to_form().unwrap().due_date, NaiveDate::from_ymd_opt(2026, 8, 14));

        form.due = InputField::with_value("next tuesday");
        assert_eq!(form.to_form().unwrap_err(), FormError::BadDueDate);
    }

    #[test]
    fn priority_cycles_and_wraps() {
        let mut form = TaskFormState::create();
        assert_eq!(form.priority, TaskPriority::Medium);
        form.cycle_priority(true);
        assert_eq!(form.priority, TaskPriority::High);
        form.cycle_priority(true);
        assert_eq!(form.priority, TaskPriority::Low);
        form.cycle_priority(false);
        assert_eq!(form.priority, TaskPriority::High);
    }

    #[test]
    fn field_order_wraps_both_ways() {
        assert_eq!(FormField::Priority.next(), FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::Priority);
    }

    #[test]
    fn edit_prefills_from_the_task() {
        let now = Utc::now();
        let task = Task {
            id: TaskId::default(),
            title: "Buy milk".to_string(),
            description: Some("two cartons".to_string()),
            due_date: NaiveDate::from_ymd_opt(2026, 8, 14),
            priority: TaskPriority::High,
            status: TaskStatus::Open,
            created_at: now,
            updated_at: now,
        };
        let form = TaskFormState::edit(&task);
        assert_eq!(form.title.value(), "Buy milk");
        assert_eq!(form.description.value(), "two cartons");
        assert_eq!(form.due.value(), "2026-08-14");
        assert_eq!(form.priority, TaskPriority::High);
        assert_eq!(form.editing, Some(task.id));
    }
}
