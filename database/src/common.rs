use chrono::NaiveDate;
use roster_core::{
    error::{Result, StoreError},
    models::{TaskOverview, UserProfile},
};
use sqlx::{sqlite::SqliteRow, Row};

/// Convert a SQLx error to a StoreError.
///
/// Constraint violations (CHECK, NOT NULL, FOREIGN KEY) map to
/// `StoreError::Constraint` so callers can surface them as conflicts;
/// everything else is a generic database failure.
pub fn sqlx_error_to_store_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();
            if message.contains("constraint failed") {
                StoreError::Constraint(message.to_string())
            } else {
                StoreError::Database(format!("Database error: {message}"))
            }
        }
        sqlx::Error::RowNotFound => {
            // Absence is handled with fetch_optional at the call sites
            StoreError::Database("Unexpected RowNotFound error".to_string())
        }
        sqlx::Error::PoolTimedOut => StoreError::Database("Connection pool timeout".to_string()),
        sqlx::Error::Io(io_err) => StoreError::Database(format!("Database I/O error: {io_err}")),
        _ => StoreError::Database(format!("Database operation failed: {err}")),
    }
}

/// Fold joined task/assignment rows into task projections.
///
/// Rows must be ordered by task id; the assignment column is NULL for
/// tasks with no assignees, which yields an empty user list.
pub fn fold_task_rows(rows: &[SqliteRow]) -> Result<Vec<TaskOverview>> {
    let mut tasks: Vec<TaskOverview> = Vec::new();
    for row in rows {
        let id: i64 = row.get("id");
        let user_id: Option<i64> = row.get("user_id");

        match tasks.last_mut() {
            Some(task) if task.id == id => {
                if let Some(user_id) = user_id {
                    task.users.push(user_id);
                }
            }
            _ => {
                let date: NaiveDate = row.get("date");
                tasks.push(TaskOverview {
                    id,
                    title: row.get("title"),
                    date,
                    completed: row.get("completed"),
                    users: user_id.into_iter().collect(),
                });
            }
        }
    }
    Ok(tasks)
}

/// Fold joined user/skill rows into user projections.
///
/// Rows must be ordered by user id with skills ascending; the skill
/// column is NULL for users with no skills.
pub fn fold_user_rows(rows: &[SqliteRow]) -> Result<Vec<UserProfile>> {
    let mut users: Vec<UserProfile> = Vec::new();
    for row in rows {
        let user_id: i64 = row.get("user_id");
        let skill: Option<String> = row.get("skill");

        match users.last_mut() {
            Some(user) if user.user_id == user_id => {
                if let Some(skill) = skill {
                    user.skills.push(skill);
                }
            }
            _ => {
                users.push(UserProfile {
                    user_id,
                    name: row.get("name"),
                    age: row.get("age"),
                    skills: skill.into_iter().collect(),
                });
            }
        }
    }
    Ok(users)
}
