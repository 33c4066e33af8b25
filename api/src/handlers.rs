//! The request-layer operation boundary.
//!
//! Each handler validates nothing itself; it hands the payload to the
//! repository and maps the outcome to the fixed response envelope. Every
//! store error is caught here, after the repository has already rolled
//! back, so a failure envelope never reflects partial state.

use roster_core::{
    error::StoreError,
    models::{TaskPayload, UserDescriptor},
    repository::{TaskRepository, UserRepository},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Fixed response envelope for every operation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApiEnvelope {
    pub success: bool,
    pub status: u16,
    pub errors: Option<String>,
    pub response: Option<Value>,
}

impl ApiEnvelope {
    /// Success envelope with the given status and body
    pub fn ok(status: u16, response: Value) -> Self {
        Self {
            success: true,
            status,
            errors: None,
            response: Some(response),
        }
    }

    /// Failure envelope derived from a store error
    pub fn failure(error: &StoreError) -> Self {
        Self {
            success: false,
            status: error.status_code(),
            errors: Some(error.to_string()),
            response: None,
        }
    }
}

/// List every task with its assigned user ids
pub async fn list_tasks(repo: &dyn TaskRepository) -> ApiEnvelope {
    match repo.list_tasks().await {
        Ok(tasks) => ApiEnvelope::ok(200, json!(tasks)),
        Err(err) => {
            tracing::error!(error = %err, "failed to list tasks");
            ApiEnvelope::failure(&err)
        }
    }
}

/// List every user with its skills
pub async fn list_users(repo: &dyn UserRepository) -> ApiEnvelope {
    match repo.list_users().await {
        Ok(users) => ApiEnvelope::ok(200, json!(users)),
        Err(err) => {
            tracing::error!(error = %err, "failed to list users");
            ApiEnvelope::failure(&err)
        }
    }
}

/// Create a user and its skill set
pub async fn create_user(repo: &dyn UserRepository, payload: UserDescriptor) -> ApiEnvelope {
    match repo.create_user(payload).await {
        Ok(user_id) => ApiEnvelope::ok(201, json!({ "userId": user_id })),
        Err(err) => {
            tracing::error!(error = %err, "failed to create user");
            ApiEnvelope::failure(&err)
        }
    }
}

/// Update a user and replace its skill set
pub async fn update_user(
    repo: &dyn UserRepository,
    user_id: i64,
    payload: UserDescriptor,
) -> ApiEnvelope {
    match repo.update_user(user_id, payload).await {
        Ok(()) => ApiEnvelope::ok(200, json!("User updated")),
        Err(err) => {
            tracing::error!(error = %err, user_id, "failed to update user");
            ApiEnvelope::failure(&err)
        }
    }
}

/// Delete a user and its skills
pub async fn delete_user(repo: &dyn UserRepository, user_id: i64) -> ApiEnvelope {
    match repo.delete_user(user_id).await {
        Ok(()) => ApiEnvelope::ok(200, json!("User deleted")),
        Err(err) => {
            tracing::error!(error = %err, user_id, "failed to delete user");
            ApiEnvelope::failure(&err)
        }
    }
}

/// Create a task, resolving its inline users
pub async fn create_task(repo: &dyn TaskRepository, payload: TaskPayload) -> ApiEnvelope {
    match repo.create_task(payload).await {
        Ok(task_id) => ApiEnvelope::ok(201, json!({ "taskId": task_id })),
        Err(err) => {
            tracing::error!(error = %err, "failed to create task");
            ApiEnvelope::failure(&err)
        }
    }
}

/// Update a task and replace its assignment set
pub async fn update_task(
    repo: &dyn TaskRepository,
    task_id: i64,
    payload: TaskPayload,
) -> ApiEnvelope {
    match repo.update_task(task_id, payload).await {
        Ok(()) => ApiEnvelope::ok(200, json!("Task updated")),
        Err(err) => {
            tracing::error!(error = %err, task_id, "failed to update task");
            ApiEnvelope::failure(&err)
        }
    }
}
