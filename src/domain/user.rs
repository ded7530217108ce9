use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session identity produced by the simulated login. There is no account
/// store behind it; the identity lives exactly as long as the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

/// What the login form submits on the email path.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl User {
    /// Derive a display name from the email local part: "jane.doe@x" -> "Jane Doe".
    pub fn from_email(email: &str) -> Self {
        let local = email.split('@').next().unwrap_or(email);
        let name = local
            .split(['.', '_', '-'])
            .filter(|part| !part.is_empty())
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ");
        let name = if name.is_empty() { email.to_string() } else { name };
        Self { id: Uuid::new_v4(), name, email: email.to_string(), avatar: None }
    }

    pub fn demo_google() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "Google User".to_string(),
            email: "user@gmail.com".to_string(),
            avatar: None,
        }
    }

    /// Up to two initials for the header avatar fallback.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
