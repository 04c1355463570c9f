/// API route handlers
///
/// One module per resource. Every handler below `/api/teams` follows the
/// same fixed sequence: resolve the team, authorize the acting user for
/// the operation's action class, resolve the rest of the path, then
/// persist and map the outcome. The order matters: a caller who isn't
/// allowed to act on a team learns nothing about what exists below it.
///
/// - `health`: Health check endpoint
/// - `auth`: Registration, login and token refresh
/// - `users`: Authenticated self-service
/// - `teams`, `projects`, `sections`, `tasks`: the resource tree

pub mod auth;
pub mod health;
pub mod projects;
pub mod sections;
pub mod tasks;
pub mod teams;
pub mod users;

use serde::Serialize;

/// Plain-message payload for delete confirmations
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

impl MessageResponse {
    /// Creates a message payload
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Treats an empty string as "not supplied"
///
/// Update payloads leave a stored value unchanged both when a field is
/// omitted and when it arrives as an empty string; a field can't be
/// cleared to empty through the API.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("x".to_string())), Some("x".to_string()));
    }
}
