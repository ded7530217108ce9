use thiserror::Error;

/// A blank required field. Surfaced to the user as a transient notice and
/// never mutates the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task title is required")]
    TitleRequired,
    #[error("Please fill in all fields")]
    CredentialsRequired,
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The storage seam is fallible even though the in-memory store never
    /// actually fails.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl TaskError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
