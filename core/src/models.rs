use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inline user definition carried by write payloads.
///
/// The task writer resolves descriptors by name: a descriptor whose name
/// matches an existing user yields that user's id unchanged (age and skills
/// in the descriptor are ignored for an existing match), otherwise a new
/// user row and its skill set are created inside the caller's transaction.
///
/// # Examples
///
/// ```rust
/// use roster_core::models::UserDescriptor;
///
/// let user = UserDescriptor {
///     name: "Ana".to_string(),
///     age: 34,
///     skills: vec!["sql".to_string(), "rust".to_string()],
/// };
/// assert_eq!(user.skills.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDescriptor {
    /// Natural lookup key used by the task writer
    pub name: String,
    /// User age in years
    pub age: i64,
    /// Full replacement skill set; empty is legal
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Write payload for creating or updating a task.
///
/// `date` arrives as a string and is normalized to a calendar date with no
/// time-of-day component before it reaches the store; `users` may mix
/// existing names and brand-new definitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskPayload {
    /// Task title
    pub title: String,
    /// Calendar date string, `YYYY-MM-DD` or an RFC 3339 timestamp
    pub date: String,
    /// Completion flag
    pub completed: bool,
    /// Users assigned to the task; duplicates are preserved
    #[serde(default)]
    pub users: Vec<UserDescriptor>,
}

/// Read projection of a user with its aggregated skill set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Stable generated identifier
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// User name
    pub name: String,
    /// User age in years
    pub age: i64,
    /// Skills sorted ascending; empty when the user has none
    pub skills: Vec<String>,
}

/// Read projection of a task with its aggregated assignee ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskOverview {
    /// Stable generated identifier
    pub id: i64,
    /// Task title
    pub title: String,
    /// Calendar date, no time component
    pub date: NaiveDate,
    /// Completion flag
    pub completed: bool,
    /// Assigned user ids in insertion order; empty when unassigned
    pub users: Vec<i64>,
}
