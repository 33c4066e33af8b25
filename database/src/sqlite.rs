use async_trait::async_trait;
use chrono::NaiveDate;
use roster_core::{
    error::{Result, StoreError},
    models::{TaskOverview, TaskPayload, UserDescriptor, UserProfile},
    repository::{TaskRepository, UserRepository},
    validation::{normalize_task_date, PayloadValidator},
};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

use crate::common::{fold_task_rows, fold_user_rows, sqlx_error_to_store_error};
use crate::sync::{replace_assignments, replace_skills, resolve_user};

/// SQLite implementation of the roster repository traits.
///
/// Every write runs inside one transaction: the parent row and its full
/// child-set replacement either both commit or neither does. Reads go
/// straight to the pool.
#[derive(Debug, Clone)]
pub struct SqliteRosterRepository {
    pool: SqlitePool,
}

impl SqliteRosterRepository {
    /// Create a new SQLite repository with the given database URL
    ///
    /// # Arguments
    /// * `database_url` - SQLite database URL (file path or `:memory:`)
    ///
    /// # Returns
    /// * `Ok(SqliteRosterRepository)` - Successfully connected repository
    /// * `Err(StoreError::Database)` - If connection fails
    ///
    /// # Examples
    /// ```rust,no_run
    /// use roster_db::SqliteRosterRepository;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // In-memory database for testing
    /// let repo = SqliteRosterRepository::new(":memory:").await?;
    ///
    /// // File-based database
    /// let repo = SqliteRosterRepository::new("sqlite:///tmp/roster.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(database_url: &str) -> Result<Self> {
        let in_memory = database_url.contains(":memory:");
        let filename = database_url.trim_start_matches("sqlite://");

        let connect_options = if in_memory {
            sqlx::sqlite::SqliteConnectOptions::new()
                .filename(filename)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Memory)
                .busy_timeout(std::time::Duration::from_secs(5))
                .foreign_keys(true)
        } else {
            sqlx::sqlite::SqliteConnectOptions::new()
                .filename(filename)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .busy_timeout(std::time::Duration::from_secs(5))
                .foreign_keys(true)
        };

        // An in-memory database exists per connection, so the pool must
        // hold exactly one and never reclaim it.
        let pool_options = if in_memory {
            sqlx::sqlite::SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            sqlx::sqlite::SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(sqlx_error_to_store_error)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    ///
    /// Applies all pending migrations to bring the schema up to date.
    /// Should be called after creating a new repository instance.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Migration failed: {e}")))?;

        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get access to the underlying database pool for custom operations
    ///
    /// Primarily intended for tests that need direct SQL execution.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Verify database connectivity
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(sqlx_error_to_store_error)?;

        Ok(())
    }

    async fn begin(&self) -> Result<Transaction<'_, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| StoreError::TransactionStart(e.to_string()))
    }

    /// Commit on success, roll back on any step failure.
    ///
    /// The rollback is issued explicitly so no exit path leaves the
    /// transaction open; a failure of the rollback itself is logged but
    /// the original error is what surfaces.
    async fn finish<T>(&self, tx: Transaction<'_, Sqlite>, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                tx.commit()
                    .await
                    .map_err(|e| StoreError::Commit(e.to_string()))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(error = %rollback_err, "rollback failed after aborted write");
                }
                Err(err)
            }
        }
    }
}

/// Insert a user row and its skill set.
async fn insert_user(conn: &mut SqliteConnection, user: &UserDescriptor) -> Result<i64> {
    let user_id: i64 =
        sqlx::query_scalar("INSERT INTO users (name, age) VALUES (?, ?) RETURNING user_id")
            .bind(&user.name)
            .bind(user.age)
            .fetch_one(&mut *conn)
            .await
            .map_err(sqlx_error_to_store_error)?;

    replace_skills(conn, user_id, &user.skills).await?;
    Ok(user_id)
}

/// Update a user row and replace its skill set.
async fn write_user_update(
    conn: &mut SqliteConnection,
    user_id: i64,
    user: &UserDescriptor,
) -> Result<()> {
    let updated = sqlx::query("UPDATE users SET name = ?, age = ? WHERE user_id = ?")
        .bind(&user.name)
        .bind(user.age)
        .bind(user_id)
        .execute(&mut *conn)
        .await
        .map_err(sqlx_error_to_store_error)?;

    if updated.rows_affected() == 0 {
        return Err(StoreError::not_found_user(user_id));
    }

    replace_skills(conn, user_id, &user.skills).await
}

/// Delete a user row and all of its skills. Assignment rows referencing
/// the user are left in place.
async fn write_user_delete(conn: &mut SqliteConnection, user_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM user_skills WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *conn)
        .await
        .map_err(sqlx_error_to_store_error)?;

    let deleted = sqlx::query("DELETE FROM users WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *conn)
        .await
        .map_err(sqlx_error_to_store_error)?;

    if deleted.rows_affected() == 0 {
        return Err(StoreError::not_found_user(user_id));
    }

    Ok(())
}

/// Resolve every descriptor, write the task row, replace the assignment
/// set. `task_id` of `None` means create.
async fn write_task(
    conn: &mut SqliteConnection,
    task_id: Option<i64>,
    task: &TaskPayload,
    date: NaiveDate,
) -> Result<i64> {
    let mut user_ids = Vec::with_capacity(task.users.len());
    for user in &task.users {
        user_ids.push(resolve_user(conn, user).await?);
    }

    let task_id = match task_id {
        None => {
            sqlx::query_scalar(
                "INSERT INTO tasks (title, date, completed) VALUES (?, ?, ?) RETURNING id",
            )
            .bind(&task.title)
            .bind(date)
            .bind(task.completed)
            .fetch_one(&mut *conn)
            .await
            .map_err(sqlx_error_to_store_error)?
        }
        Some(task_id) => {
            let updated =
                sqlx::query("UPDATE tasks SET title = ?, date = ?, completed = ? WHERE id = ?")
                    .bind(&task.title)
                    .bind(date)
                    .bind(task.completed)
                    .bind(task_id)
                    .execute(&mut *conn)
                    .await
                    .map_err(sqlx_error_to_store_error)?;

            if updated.rows_affected() == 0 {
                return Err(StoreError::not_found_task(task_id));
            }
            task_id
        }
    };

    replace_assignments(conn, task_id, &user_ids).await?;
    Ok(task_id)
}

#[async_trait]
impl UserRepository for SqliteRosterRepository {
    async fn create_user(&self, user: UserDescriptor) -> Result<i64> {
        PayloadValidator::validate_user(&user)?;

        let mut tx = self.begin().await?;
        let result = insert_user(&mut tx, &user).await;
        let user_id = self.finish(tx, result).await?;

        tracing::info!(user_id, name = %user.name, "user created");
        Ok(user_id)
    }

    async fn update_user(&self, user_id: i64, user: UserDescriptor) -> Result<()> {
        PayloadValidator::validate_user(&user)?;

        let mut tx = self.begin().await?;
        let result = write_user_update(&mut tx, user_id, &user).await;
        self.finish(tx, result).await?;

        tracing::info!(user_id, "user updated");
        Ok(())
    }

    async fn delete_user(&self, user_id: i64) -> Result<()> {
        let mut tx = self.begin().await?;
        let result = write_user_delete(&mut tx, user_id).await;
        self.finish(tx, result).await?;

        tracing::info!(user_id, "user deleted");
        Ok(())
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<UserProfile>> {
        let rows = sqlx::query(
            r#"
            SELECT u.user_id, u.name, u.age, s.skill
            FROM users u
            LEFT JOIN user_skills s ON s.user_id = u.user_id
            WHERE u.user_id = ?
            ORDER BY s.skill ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(sqlx_error_to_store_error)?;

        Ok(fold_user_rows(&rows)?.into_iter().next())
    }

    async fn list_users(&self) -> Result<Vec<UserProfile>> {
        let rows = sqlx::query(
            r#"
            SELECT u.user_id, u.name, u.age, s.skill
            FROM users u
            LEFT JOIN user_skills s ON s.user_id = u.user_id
            ORDER BY u.user_id, s.skill ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(sqlx_error_to_store_error)?;

        fold_user_rows(&rows)
    }
}

#[async_trait]
impl TaskRepository for SqliteRosterRepository {
    async fn create_task(&self, task: TaskPayload) -> Result<i64> {
        PayloadValidator::validate_task(&task)?;
        let date = normalize_task_date(&task.date)?;

        let mut tx = self.begin().await?;
        let result = write_task(&mut tx, None, &task, date).await;
        let task_id = self.finish(tx, result).await?;

        tracing::info!(task_id, title = %task.title, "task created");
        Ok(task_id)
    }

    async fn update_task(&self, task_id: i64, task: TaskPayload) -> Result<()> {
        PayloadValidator::validate_task(&task)?;
        let date = normalize_task_date(&task.date)?;

        let mut tx = self.begin().await?;
        let result = write_task(&mut tx, Some(task_id), &task, date).await;
        self.finish(tx, result).await?;

        tracing::info!(task_id, "task updated");
        Ok(())
    }

    async fn get_task(&self, task_id: i64) -> Result<Option<TaskOverview>> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.title, t.date, t.completed, tu.user_id
            FROM tasks t
            LEFT JOIN task_users tu ON tu.task_id = t.id
            WHERE t.id = ?
            ORDER BY tu.id
            "#,
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await
        .map_err(sqlx_error_to_store_error)?;

        Ok(fold_task_rows(&rows)?.into_iter().next())
    }

    async fn list_tasks(&self) -> Result<Vec<TaskOverview>> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.title, t.date, t.completed, tu.user_id
            FROM tasks t
            LEFT JOIN task_users tu ON tu.task_id = t.id
            ORDER BY t.id, tu.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(sqlx_error_to_store_error)?;

        fold_task_rows(&rows)
    }
}
