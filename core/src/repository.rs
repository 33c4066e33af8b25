use async_trait::async_trait;

use crate::{
    error::Result,
    models::{TaskOverview, TaskPayload, UserDescriptor, UserProfile},
};

/// Repository trait for user persistence.
///
/// Implementations must be thread-safe and must apply each write as a
/// single atomic unit: the user row and its full skill-set replacement
/// either both commit or neither does.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user and its skill set in one transaction.
    ///
    /// # Returns
    /// * `Ok(i64)` - The generated user id
    /// * `Err(StoreError::Validation)` - If the descriptor is invalid
    /// * `Err(StoreError::Constraint)` - If a skill row violates the schema
    async fn create_user(&self, user: UserDescriptor) -> Result<i64>;

    /// Update a user's fields and replace its entire skill set.
    ///
    /// The skill set visible to readers afterwards equals exactly the
    /// list in `user`, regardless of what was stored before.
    ///
    /// # Returns
    /// * `Ok(())` - User updated
    /// * `Err(StoreError::NotFound)` - If no user exists with that id
    async fn update_user(&self, user_id: i64, user: UserDescriptor) -> Result<()>;

    /// Delete a user and all of its skill rows.
    ///
    /// Task assignment rows referencing the user are deliberately left in
    /// place; see the schema notes on dangling links.
    ///
    /// # Returns
    /// * `Ok(())` - User deleted
    /// * `Err(StoreError::NotFound)` - If no user exists with that id
    async fn delete_user(&self, user_id: i64) -> Result<()>;

    /// Get a single user projection by id.
    async fn get_user(&self, user_id: i64) -> Result<Option<UserProfile>>;

    /// List every user with its aggregated skills, sorted ascending.
    /// Users with zero skills appear with an empty list.
    async fn list_users(&self) -> Result<Vec<UserProfile>>;
}

/// Repository trait for task persistence.
///
/// Task writes resolve every inline user descriptor by name (creating
/// missing users and their skills on the way) and replace the full
/// assignment set, all inside one transaction.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a task, resolving and linking its users.
    ///
    /// # Returns
    /// * `Ok(i64)` - The generated task id
    /// * `Err(StoreError::Validation)` - If the payload is invalid
    /// * `Err(StoreError::Constraint)` - If any row write violates the schema
    async fn create_task(&self, task: TaskPayload) -> Result<i64>;

    /// Update a task's fields and replace its entire assignment set.
    ///
    /// # Returns
    /// * `Ok(())` - Task updated
    /// * `Err(StoreError::NotFound)` - If no task exists with that id
    async fn update_task(&self, task_id: i64, task: TaskPayload) -> Result<()>;

    /// Get a single task projection by id.
    async fn get_task(&self, task_id: i64) -> Result<Option<TaskOverview>>;

    /// List every task with its aggregated assignee ids. Tasks with no
    /// assignees appear with an empty list.
    async fn list_tasks(&self) -> Result<Vec<TaskOverview>>;
}
