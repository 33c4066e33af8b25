//! Entity resolution and child-set synchronization.
//!
//! Every function here operates on a connection borrowed from the one
//! open transaction owned by the calling writer; nothing acquires a
//! connection of its own, and nothing commits. A failure at any point
//! propagates to the writer, which rolls the whole transaction back.

use roster_core::{error::Result, models::UserDescriptor};
use sqlx::SqliteConnection;

use crate::common::sqlx_error_to_store_error;

/// Resolve a user descriptor to a user id inside the caller's transaction.
///
/// Lookup is by exact name; the first match wins and the descriptor's age
/// and skills are ignored for an existing user. On a miss the user row and
/// its full skill set are created before the id is returned.
pub(crate) async fn resolve_user(
    conn: &mut SqliteConnection,
    user: &UserDescriptor,
) -> Result<i64> {
    let existing: Option<i64> =
        sqlx::query_scalar("SELECT user_id FROM users WHERE name = ? LIMIT 1")
            .bind(&user.name)
            .fetch_optional(&mut *conn)
            .await
            .map_err(sqlx_error_to_store_error)?;

    if let Some(user_id) = existing {
        return Ok(user_id);
    }

    let user_id: i64 =
        sqlx::query_scalar("INSERT INTO users (name, age) VALUES (?, ?) RETURNING user_id")
            .bind(&user.name)
            .bind(user.age)
            .fetch_one(&mut *conn)
            .await
            .map_err(sqlx_error_to_store_error)?;

    replace_skills(conn, user_id, &user.skills).await?;

    tracing::debug!(user_id, name = %user.name, "created user while resolving task payload");
    Ok(user_id)
}

/// Replace a user's entire skill set with the given list.
///
/// Delete-all then insert-all, preserving input order. An empty list is
/// legal and leaves the user with zero skills.
pub(crate) async fn replace_skills(
    conn: &mut SqliteConnection,
    user_id: i64,
    skills: &[String],
) -> Result<()> {
    sqlx::query("DELETE FROM user_skills WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *conn)
        .await
        .map_err(sqlx_error_to_store_error)?;

    for skill in skills {
        sqlx::query("INSERT INTO user_skills (user_id, skill) VALUES (?, ?)")
            .bind(user_id)
            .bind(skill)
            .execute(&mut *conn)
            .await
            .map_err(sqlx_error_to_store_error)?;
    }

    Ok(())
}

/// Replace a task's entire assignment set with the given user ids.
///
/// Mirrors [`replace_skills`] for the junction table. Duplicate ids in the
/// input produce duplicate assignment rows; dedup is not this layer's job.
pub(crate) async fn replace_assignments(
    conn: &mut SqliteConnection,
    task_id: i64,
    user_ids: &[i64],
) -> Result<()> {
    sqlx::query("DELETE FROM task_users WHERE task_id = ?")
        .bind(task_id)
        .execute(&mut *conn)
        .await
        .map_err(sqlx_error_to_store_error)?;

    for user_id in user_ids {
        sqlx::query("INSERT INTO task_users (task_id, user_id) VALUES (?, ?)")
            .bind(task_id)
            .bind(user_id)
            .execute(&mut *conn)
            .await
            .map_err(sqlx_error_to_store_error)?;
    }

    Ok(())
}
