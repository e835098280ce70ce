//! Integration tests for the repository layer.
//!
//! Exercises the repositories against a real database:
//! - Owner scoping on ideas and projects
//! - Tri-state patches (absent vs. null vs. value)
//! - Unique and check constraint violations
//! - Transactional idea-to-project conversion
//! - Cascade and set-null behaviour on delete

use sqlx::PgPool;
use ideatrack_db::models::idea::{CreateIdea, UpdateIdea};
use ideatrack_db::models::project::{CreateProject, UpdateProject};
use ideatrack_db::models::status::{IdeaPriority, IdeaStatus, ProjectStatus, TaskStatus};
use ideatrack_db::models::task::{CreateTask, UpdateTask};
use ideatrack_db::models::user::{CreateUser, UpdateProfile, User};
use ideatrack_db::repositories::{IdeaRepo, ProjectRepo, TaskRepo, UserRepo};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, email: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            user_name: None,
            bio: None,
            roles: vec!["user".to_string()],
        },
    )
    .await
    .unwrap()
}

fn new_idea(user_id: Uuid, title: &str) -> CreateIdea {
    CreateIdea {
        user_id,
        title: title.to_string(),
        description: Some("An idea".to_string()),
        status: IdeaStatus::Draft,
        tags: vec!["test".to_string()],
        priority: Some(IdeaPriority::Medium),
    }
}

fn new_project(owner_id: Uuid, name: &str) -> CreateProject {
    CreateProject {
        owner_id,
        name: name.to_string(),
        description: None,
        status: ProjectStatus::Planning,
        assigned_to_user_ids: Vec::new(),
        start_date: None,
        end_date: None,
        budget: None,
        idea_id: None,
    }
}

fn new_task(project_id: Uuid, title: &str) -> CreateTask {
    CreateTask {
        project_id,
        title: title.to_string(),
        description: None,
        status: TaskStatus::Todo,
        due_date: None,
        assigned_to_id: None,
    }
}

fn constraint_of(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint().map(str::to_string),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_violates_unique_constraint(pool: PgPool) {
    new_user(&pool, "dup@example.com").await;

    let err = UserRepo::create(
        &pool,
        &CreateUser {
            email: "dup@example.com".to_string(),
            password_hash: "x".to_string(),
            user_name: None,
            bio: None,
            roles: vec!["user".to_string()],
        },
    )
    .await
    .unwrap_err();

    assert_eq!(constraint_of(&err).as_deref(), Some("uq_users_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_patch_distinguishes_absent_from_null(pool: PgPool) {
    let user = new_user(&pool, "profile@example.com").await;

    let set = UpdateProfile {
        user_name: Some(Some("Pat".to_string())),
        bio: Some(Some("Builder".to_string())),
        roles: None,
    };
    let updated = UserRepo::update_profile(&pool, user.id, &set)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.user_name.as_deref(), Some("Pat"));
    assert_eq!(updated.bio.as_deref(), Some("Builder"));

    // Clearing bio leaves user_name alone.
    let clear_bio = UpdateProfile {
        bio: Some(None),
        ..Default::default()
    };
    let updated = UserRepo::update_profile(&pool, user.id, &clear_bio)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.user_name.as_deref(), Some("Pat"));
    assert_eq!(updated.bio, None);
    assert_eq!(updated.roles, vec!["user".to_string()]);
}

// ---------------------------------------------------------------------------
// Ideas
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ideas_are_scoped_to_owner(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let bob = new_user(&pool, "bob@example.com").await;

    let idea = IdeaRepo::create(&pool, &new_idea(alice.id, "Alice's idea"))
        .await
        .unwrap();

    assert!(IdeaRepo::find_for_owner(&pool, idea.id, alice.id)
        .await
        .unwrap()
        .is_some());
    assert!(IdeaRepo::find_for_owner(&pool, idea.id, bob.id)
        .await
        .unwrap()
        .is_none());
    assert!(IdeaRepo::list_for_owner(&pool, bob.id).await.unwrap().is_empty());

    let patch = UpdateIdea {
        title: Some("Hijacked".to_string()),
        ..Default::default()
    };
    assert!(IdeaRepo::update_for_owner(&pool, idea.id, bob.id, &patch)
        .await
        .unwrap()
        .is_none());
    assert!(!IdeaRepo::delete_for_owner(&pool, idea.id, bob.id).await.unwrap());
    assert!(IdeaRepo::delete_for_owner(&pool, idea.id, alice.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_idea_titles_are_globally_unique(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let bob = new_user(&pool, "bob@example.com").await;

    IdeaRepo::create(&pool, &new_idea(alice.id, "Same title"))
        .await
        .unwrap();
    let err = IdeaRepo::create(&pool, &new_idea(bob.id, "Same title"))
        .await
        .unwrap_err();

    assert_eq!(constraint_of(&err).as_deref(), Some("uq_ideas_title"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_idea_patch_clears_priority_and_keeps_tags(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let idea = IdeaRepo::create(&pool, &new_idea(alice.id, "Patch me"))
        .await
        .unwrap();

    let patch = UpdateIdea {
        status: Some(IdeaStatus::Prioritized),
        priority: Some(None),
        ..Default::default()
    };
    let updated = IdeaRepo::update_for_owner(&pool, idea.id, alice.id, &patch)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.status, IdeaStatus::Prioritized);
    assert_eq!(updated.priority, None);
    assert_eq!(updated.tags, vec!["test".to_string()]);
    assert_eq!(updated.description.as_deref(), Some("An idea"));
    assert!(updated.updated_at >= idea.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_count_by_status_scopes_and_orders(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let bob = new_user(&pool, "bob@example.com").await;

    let mut archived = new_idea(alice.id, "A2");
    archived.status = IdeaStatus::Archived;
    IdeaRepo::create(&pool, &new_idea(alice.id, "A1")).await.unwrap();
    IdeaRepo::create(&pool, &archived).await.unwrap();
    IdeaRepo::create(&pool, &new_idea(bob.id, "B1")).await.unwrap();

    let mine = IdeaRepo::count_by_status(&pool, Some(alice.id))
        .await
        .unwrap();
    let pairs: Vec<_> = mine.iter().map(|c| (c.status, c.count)).collect();
    assert_eq!(
        pairs,
        vec![(IdeaStatus::Draft, 1), (IdeaStatus::Archived, 1)]
    );

    let all = IdeaRepo::count_by_status(&pool, None).await.unwrap();
    let total: i64 = all.iter().map(|c| c.count).sum();
    assert_eq!(total, 3);
    assert_eq!(all[0].status, IdeaStatus::Draft);
    assert_eq!(all[0].count, 2);
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_paging_is_newest_first(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    for i in 0..3 {
        ProjectRepo::create(&pool, &new_project(alice.id, &format!("P{i}")))
            .await
            .unwrap();
    }

    let first = ProjectRepo::list_for_owner(&pool, alice.id, 3, 0)
        .await
        .unwrap();
    assert_eq!(first.len(), 3);
    assert!(first[0].created_at >= first[1].created_at);

    let second = ProjectRepo::list_for_owner(&pool, alice.id, 3, 2)
        .await
        .unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, first[2].id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_check_constraints(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;

    let mut negative = new_project(alice.id, "Negative");
    negative.budget = Some(-1.0);
    let err = ProjectRepo::create(&pool, &negative).await.unwrap_err();
    assert_eq!(
        constraint_of(&err).as_deref(),
        Some("ck_projects_budget_non_negative")
    );

    let mut dated = new_project(alice.id, "Dated");
    dated.start_date = Some("2025-03-01T00:00:00Z".parse().unwrap());
    let project = ProjectRepo::create(&pool, &dated).await.unwrap();

    // Only the end date is patched; the check sees the stored start date.
    let patch = UpdateProject {
        end_date: Some(Some("2025-02-01T00:00:00Z".parse().unwrap())),
        ..Default::default()
    };
    let err = ProjectRepo::update_for_owner(&pool, project.id, alice.id, &patch)
        .await
        .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some("ck_projects_date_order"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_from_idea_marks_idea_converted(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let idea = IdeaRepo::create(&pool, &new_idea(alice.id, "Convert me"))
        .await
        .unwrap();

    let project = ProjectRepo::create_from_idea(&pool, idea.id, &new_project(alice.id, "From idea"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(project.idea_id, Some(idea.id));

    let idea = IdeaRepo::find_for_owner(&pool, idea.id, alice.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(idea.status, IdeaStatus::ConvertedToProject);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_from_idea_rolls_back_on_conflict(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    ProjectRepo::create(&pool, &new_project(alice.id, "Taken"))
        .await
        .unwrap();
    let idea = IdeaRepo::create(&pool, &new_idea(alice.id, "Stays draft"))
        .await
        .unwrap();

    let err = ProjectRepo::create_from_idea(&pool, idea.id, &new_project(alice.id, "Taken"))
        .await
        .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some("uq_projects_name"));

    let idea = IdeaRepo::find_for_owner(&pool, idea.id, alice.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(idea.status, IdeaStatus::Draft);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_from_foreign_idea_writes_nothing(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let bob = new_user(&pool, "bob@example.com").await;
    let idea = IdeaRepo::create(&pool, &new_idea(alice.id, "Alice only"))
        .await
        .unwrap();

    let result = ProjectRepo::create_from_idea(&pool, idea.id, &new_project(bob.id, "Stolen"))
        .await
        .unwrap();
    assert!(result.is_none());
    assert!(ProjectRepo::list_for_owner(&pool, bob.id, 10, 0)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_idea_unlinks_project(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let idea = IdeaRepo::create(&pool, &new_idea(alice.id, "Parent"))
        .await
        .unwrap();
    let project = ProjectRepo::create_from_idea(&pool, idea.id, &new_project(alice.id, "Child"))
        .await
        .unwrap()
        .unwrap();

    IdeaRepo::delete_for_owner(&pool, idea.id, alice.id)
        .await
        .unwrap();

    let project = ProjectRepo::find_for_owner(&pool, project.id, alice.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(project.idea_id, None);
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_task_titles_unique_per_project(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let p1 = ProjectRepo::create(&pool, &new_project(alice.id, "P1"))
        .await
        .unwrap();
    let p2 = ProjectRepo::create(&pool, &new_project(alice.id, "P2"))
        .await
        .unwrap();

    TaskRepo::create(&pool, &new_task(p1.id, "Write docs"))
        .await
        .unwrap();
    // Same title in another project is fine.
    TaskRepo::create(&pool, &new_task(p2.id, "Write docs"))
        .await
        .unwrap();

    let err = TaskRepo::create(&pool, &new_task(p1.id, "Write docs"))
        .await
        .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some("uq_tasks_project_title"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tasks_are_scoped_to_project(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let p1 = ProjectRepo::create(&pool, &new_project(alice.id, "P1"))
        .await
        .unwrap();
    let p2 = ProjectRepo::create(&pool, &new_project(alice.id, "P2"))
        .await
        .unwrap();
    let task = TaskRepo::create(&pool, &new_task(p1.id, "Only in P1"))
        .await
        .unwrap();

    assert!(TaskRepo::find_in_project(&pool, p2.id, task.id)
        .await
        .unwrap()
        .is_none());
    assert!(!TaskRepo::delete_in_project(&pool, p2.id, task.id)
        .await
        .unwrap());

    let patch = UpdateTask {
        status: Some(TaskStatus::Done),
        assigned_to_id: Some(Some(alice.id)),
        ..Default::default()
    };
    let updated = TaskRepo::update_in_project(&pool, p1.id, task.id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, TaskStatus::Done);
    assert_eq!(updated.assigned_to_id, Some(alice.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_project_cascades_tasks(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let project = ProjectRepo::create(&pool, &new_project(alice.id, "Doomed"))
        .await
        .unwrap();
    TaskRepo::create(&pool, &new_task(project.id, "T1"))
        .await
        .unwrap();

    assert!(ProjectRepo::delete_for_owner(&pool, project.id, alice.id)
        .await
        .unwrap());

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
