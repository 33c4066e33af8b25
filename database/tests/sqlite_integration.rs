use roster_db::{
    SqliteRosterRepository, StoreError, TaskPayload, TaskRepository, UserDescriptor,
    UserRepository,
};

async fn create_test_repository() -> SqliteRosterRepository {
    let repo = SqliteRosterRepository::new(":memory:").await.unwrap();
    repo.migrate().await.unwrap();
    repo
}

fn descriptor(name: &str, age: i64, skills: &[&str]) -> UserDescriptor {
    UserDescriptor {
        name: name.to_string(),
        age,
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

fn payload(title: &str, date: &str, users: Vec<UserDescriptor>) -> TaskPayload {
    TaskPayload {
        title: title.to_string(),
        date: date.to_string(),
        completed: false,
        users,
    }
}

async fn count(repo: &SqliteRosterRepository, sql: &str) -> i64 {
    sqlx::query_scalar(sql).fetch_one(repo.pool()).await.unwrap()
}

#[tokio::test]
async fn test_skill_set_equals_last_written_list() {
    let repo = create_test_repository().await;

    let user_id = repo.create_user(descriptor("Ana", 34, &["go"])).await.unwrap();
    let profile = repo.get_user(user_id).await.unwrap().unwrap();
    assert_eq!(profile.skills, vec!["go"]);

    // Replacement, not accumulation
    repo.update_user(user_id, descriptor("Ana", 34, &["rust", "go"]))
        .await
        .unwrap();
    let profile = repo.get_user(user_id).await.unwrap().unwrap();
    assert_eq!(profile.skills, vec!["go", "rust"]);

    let rows = count(&repo, "SELECT COUNT(*) FROM user_skills").await;
    assert_eq!(rows, 2);
}

#[tokio::test]
async fn test_empty_skill_list_is_legal() {
    let repo = create_test_repository().await;

    let user_id = repo
        .create_user(descriptor("Ana", 34, &["sql", "rust"]))
        .await
        .unwrap();

    repo.update_user(user_id, descriptor("Ana", 35, &[]))
        .await
        .unwrap();

    let profile = repo.get_user(user_id).await.unwrap().unwrap();
    assert_eq!(profile.age, 35);
    assert!(profile.skills.is_empty());
}

#[tokio::test]
async fn test_task_create_resolves_missing_user_inline() {
    let repo = create_test_repository().await;

    let task_id = repo
        .create_task(payload(
            "Migrate schema",
            "2024-05-01",
            vec![descriptor("Bea", 30, &["sql"])],
        ))
        .await
        .unwrap();

    // Exactly one user, one skill, one task, one assignment
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM users").await, 1);
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM user_skills").await, 1);
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM tasks").await, 1);
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM task_users").await, 1);

    let users = repo.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Bea");
    assert_eq!(users[0].skills, vec!["sql"]);

    let overview = repo.get_task(task_id).await.unwrap().unwrap();
    assert_eq!(overview.users, vec![users[0].user_id]);
}

#[tokio::test]
async fn test_resolution_by_name_is_idempotent() {
    let repo = create_test_repository().await;

    let user_id = repo
        .create_user(descriptor("Ana", 34, &["rust"]))
        .await
        .unwrap();

    // Resolving the same name twice, with conflicting age and skills,
    // must reuse the existing row untouched.
    for _ in 0..2 {
        repo.create_task(payload(
            "Review PR",
            "2024-05-01",
            vec![descriptor("Ana", 99, &["x"])],
        ))
        .await
        .unwrap();
    }

    assert_eq!(count(&repo, "SELECT COUNT(*) FROM users").await, 1);

    let profile = repo.get_user(user_id).await.unwrap().unwrap();
    assert_eq!(profile.age, 34);
    assert_eq!(profile.skills, vec!["rust"]);

    for task in repo.list_tasks().await.unwrap() {
        assert_eq!(task.users, vec![user_id]);
    }
}

#[tokio::test]
async fn test_duplicate_descriptors_produce_duplicate_links() {
    let repo = create_test_repository().await;

    let task_id = repo
        .create_task(payload(
            "Pair work",
            "2024-05-01",
            vec![descriptor("Ana", 34, &[]), descriptor("Ana", 34, &[])],
        ))
        .await
        .unwrap();

    let overview = repo.get_task(task_id).await.unwrap().unwrap();
    assert_eq!(overview.users.len(), 2);
    assert_eq!(overview.users[0], overview.users[1]);
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM users").await, 1);
}

#[tokio::test]
async fn test_task_update_replaces_assignment_set() {
    let repo = create_test_repository().await;

    let task_id = repo
        .create_task(payload(
            "Rotate on-call",
            "2024-05-01",
            vec![descriptor("Ana", 34, &[]), descriptor("Bea", 30, &[])],
        ))
        .await
        .unwrap();
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM task_users").await, 2);

    let mut update = payload("Rotate on-call", "2024-06-01", vec![descriptor("Cho", 41, &[])]);
    update.completed = true;
    repo.update_task(task_id, update).await.unwrap();

    let overview = repo.get_task(task_id).await.unwrap().unwrap();
    assert_eq!(overview.users.len(), 1);
    assert!(overview.completed);
    assert_eq!(overview.date.to_string(), "2024-06-01");
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM task_users").await, 1);
}

#[tokio::test]
async fn test_task_date_normalized_from_timestamp() {
    let repo = create_test_repository().await;

    let task_id = repo
        .create_task(payload("Release", "2024-05-01T18:30:00Z", vec![]))
        .await
        .unwrap();

    let overview = repo.get_task(task_id).await.unwrap().unwrap();
    assert_eq!(overview.date.to_string(), "2024-05-01");
}

#[tokio::test]
async fn test_user_write_rolls_back_on_constraint_failure() {
    let repo = create_test_repository().await;

    // The second skill violates the non-blank CHECK after the first was
    // already inserted; nothing from the operation may survive.
    let result = repo.create_user(descriptor("Zed", 28, &["go", "  "])).await;
    assert!(matches!(result, Err(StoreError::Constraint(_))));

    assert_eq!(count(&repo, "SELECT COUNT(*) FROM users").await, 0);
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM user_skills").await, 0);
}

#[tokio::test]
async fn test_task_write_rolls_back_resolved_users() {
    let repo = create_test_repository().await;

    // "Bea" resolves and is inserted first, then "Mal" fails on a blank
    // skill; the rollback must also discard Bea and her skills.
    let result = repo
        .create_task(payload(
            "Doomed",
            "2024-05-01",
            vec![
                descriptor("Bea", 30, &["sql"]),
                descriptor("Mal", 25, &[" "]),
            ],
        ))
        .await;
    assert!(matches!(result, Err(StoreError::Constraint(_))));

    assert_eq!(count(&repo, "SELECT COUNT(*) FROM users").await, 0);
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM user_skills").await, 0);
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM tasks").await, 0);
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM task_users").await, 0);
}

#[tokio::test]
async fn test_delete_user_removes_skills_but_leaves_links() {
    let repo = create_test_repository().await;

    let task_id = repo
        .create_task(payload(
            "Handover",
            "2024-05-01",
            vec![descriptor("Ana", 34, &["sql", "rust"])],
        ))
        .await
        .unwrap();
    let user_id = repo.list_users().await.unwrap()[0].user_id;

    repo.delete_user(user_id).await.unwrap();

    assert!(repo.get_user(user_id).await.unwrap().is_none());
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM user_skills").await, 0);

    // Current contract: the assignment row dangles
    let overview = repo.get_task(task_id).await.unwrap().unwrap();
    assert_eq!(overview.users, vec![user_id]);
}

#[tokio::test]
async fn test_delete_missing_user_is_not_found() {
    let repo = create_test_repository().await;

    let result = repo.delete_user(9999).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn test_update_missing_task_is_not_found() {
    let repo = create_test_repository().await;

    let result = repo
        .update_task(9999, payload("Ghost", "2024-05-01", vec![]))
        .await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));

    // The failed update must not have created users as a side effect
    let result = repo
        .update_task(9999, payload("Ghost", "2024-05-01", vec![descriptor("Eve", 20, &[])]))
        .await;
    assert!(result.is_err());
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM users").await, 0);
}

#[tokio::test]
async fn test_projections_list_all_parents() {
    let repo = create_test_repository().await;

    repo.create_user(descriptor("Ana", 34, &[])).await.unwrap();
    repo.create_user(descriptor("Bea", 30, &["sql"])).await.unwrap();
    repo.create_task(payload("One", "2024-05-01", vec![])).await.unwrap();
    repo.create_task(payload("Two", "2024-05-02", vec![descriptor("Ana", 34, &[])]))
        .await
        .unwrap();

    let users = repo.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert!(users[0].skills.is_empty());
    assert_eq!(users[1].skills, vec!["sql"]);

    let tasks = repo.list_tasks().await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks[0].users.is_empty());
    assert_eq!(tasks[1].users.len(), 1);
}

#[tokio::test]
async fn test_file_backed_repository() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.db");
    let repo = SqliteRosterRepository::new(path.to_str().unwrap())
        .await
        .unwrap();
    repo.migrate().await.unwrap();

    let user_id = repo.create_user(descriptor("Ana", 34, &["sql"])).await.unwrap();

    // A second handle over the same file sees the committed write
    let reopened = SqliteRosterRepository::new(path.to_str().unwrap())
        .await
        .unwrap();
    let profile = reopened.get_user(user_id).await.unwrap().unwrap();
    assert_eq!(profile.name, "Ana");
}
