//! Populate a database with demo users, ideas, projects and tasks.
//!
//! Safe to run repeatedly: each record is looked up by its natural key
//! (email, idea title, project name, task title within project) and only
//! inserted when missing.

use anyhow::{anyhow, Context};
use chrono::NaiveDate;

use ideatrack_api::auth::password::hash_password;
use ideatrack_api::logging;
use ideatrack_core::roles::{ROLE_ADMIN, ROLE_USER};
use ideatrack_core::types::Timestamp;
use ideatrack_db::models::idea::{CreateIdea, Idea};
use ideatrack_db::models::project::{CreateProject, Project};
use ideatrack_db::models::status::{IdeaPriority, IdeaStatus, ProjectStatus, TaskStatus};
use ideatrack_db::models::task::CreateTask;
use ideatrack_db::models::user::{CreateUser, User};
use ideatrack_db::repositories::{IdeaRepo, ProjectRepo, TaskRepo, UserRepo};
use ideatrack_db::DbPool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing("ideatrack_seed=info,ideatrack_api=info");

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = ideatrack_db::create_pool(&database_url, 5)
        .await
        .context("Failed to connect to database")?;
    ideatrack_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let alice = ensure_user(
        &pool,
        "alice@example.com",
        "alice123",
        "Alice Smith",
        "Experienced full-stack developer with a focus on web applications.",
        &[ROLE_ADMIN, ROLE_USER],
    )
    .await?;
    let bob = ensure_user(
        &pool,
        "bob@example.com",
        "bob456",
        "Bob Johnson",
        "Product manager, passionate about user experience and data-driven decisions.",
        &[ROLE_USER],
    )
    .await?;

    let crm = ensure_idea(
        &pool,
        CreateIdea {
            user_id: alice.id,
            title: "New CRM System".into(),
            description: Some(
                "Develop a custom CRM system to better manage customer relationships and sales pipelines."
                    .into(),
            ),
            status: IdeaStatus::Prioritized,
            tags: vec!["CRM".into(), "Sales".into(), "Internal Tool".into()],
            priority: Some(IdeaPriority::High),
        },
    )
    .await?;
    ensure_idea(
        &pool,
        CreateIdea {
            user_id: bob.id,
            title: "Mobile App for Task Management".into(),
            description: Some(
                "A cross-platform mobile app for personal and team task management.".into(),
            ),
            status: IdeaStatus::Draft,
            tags: vec!["Mobile".into(), "Productivity".into()],
            priority: Some(IdeaPriority::Medium),
        },
    )
    .await?;
    ensure_idea(
        &pool,
        CreateIdea {
            user_id: alice.id,
            title: "Company Website Redesign".into(),
            description: Some("Refresh the public website with a modern, responsive design.".into()),
            status: IdeaStatus::Archived,
            tags: vec!["Website".into(), "Marketing".into()],
            priority: Some(IdeaPriority::High),
        },
    )
    .await?;

    let relaunch = ensure_project(
        &pool,
        CreateProject {
            owner_id: alice.id,
            name: "E-commerce Platform Relaunch".into(),
            description: Some(
                "Relaunch the online store with a new checkout flow and product catalogue.".into(),
            ),
            status: ProjectStatus::InProgress,
            assigned_to_user_ids: vec![alice.id, bob.id],
            start_date: Some(date(2025, 7, 1)?),
            end_date: Some(date(2025, 12, 31)?),
            budget: Some(150_000.0),
            idea_id: Some(crm.id),
        },
    )
    .await?;
    let wiki = ensure_project(
        &pool,
        CreateProject {
            owner_id: bob.id,
            name: "Internal Wiki Development".into(),
            description: Some("Build an internal knowledge base for team documentation.".into()),
            status: ProjectStatus::Planning,
            assigned_to_user_ids: vec![bob.id],
            start_date: Some(date(2025, 8, 1)?),
            end_date: Some(date(2025, 11, 30)?),
            budget: Some(50_000.0),
            idea_id: None,
        },
    )
    .await?;

    let tasks = [
        (
            &relaunch,
            "Implement user authentication",
            "Sign-up, login and session handling for shoppers.",
            TaskStatus::InProgress,
            date(2025, 7, 15)?,
            alice.id,
        ),
        (
            &relaunch,
            "Design product display pages",
            "Listing and detail pages for the product catalogue.",
            TaskStatus::Todo,
            date(2025, 7, 20)?,
            alice.id,
        ),
        (
            &relaunch,
            "Develop payment gateway integration",
            "Connect checkout to the payment provider.",
            TaskStatus::Blocked,
            date(2025, 8, 1)?,
            bob.id,
        ),
        (
            &wiki,
            "Set up basic wiki structure",
            "Create the top-level spaces and page templates.",
            TaskStatus::Todo,
            date(2025, 8, 10)?,
            bob.id,
        ),
    ];

    for (project, title, description, status, due, assignee) in tasks {
        let existing = TaskRepo::find_by_title(&pool, project.id, title).await?;
        if existing.is_some() {
            tracing::info!(title, "Task already present");
            continue;
        }
        TaskRepo::create(
            &pool,
            &CreateTask {
                project_id: project.id,
                title: title.into(),
                description: Some(description.into()),
                status,
                due_date: Some(due),
                assigned_to_id: Some(assignee),
            },
        )
        .await
        .with_context(|| format!("Failed to create task '{title}'"))?;
        tracing::info!(title, project = %project.name, "Task created");
    }

    pool.close().await;
    tracing::info!("Seeding complete");
    Ok(())
}

async fn ensure_user(
    pool: &DbPool,
    email: &str,
    password: &str,
    user_name: &str,
    bio: &str,
    roles: &[&str],
) -> anyhow::Result<User> {
    if let Some(user) = UserRepo::find_by_email(pool, email).await? {
        tracing::info!(email, "User already present");
        return Ok(user);
    }

    let password_hash =
        hash_password(password).map_err(|e| anyhow!("Failed to hash password for {email}: {e}"))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.into(),
            password_hash,
            user_name: Some(user_name.into()),
            bio: Some(bio.into()),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        },
    )
    .await
    .with_context(|| format!("Failed to create user {email}"))?;
    tracing::info!(email, "User created");
    Ok(user)
}

async fn ensure_idea(pool: &DbPool, input: CreateIdea) -> anyhow::Result<Idea> {
    if let Some(idea) = IdeaRepo::find_by_title(pool, &input.title).await? {
        tracing::info!(title = %idea.title, "Idea already present");
        return Ok(idea);
    }
    let idea = IdeaRepo::create(pool, &input)
        .await
        .with_context(|| format!("Failed to create idea '{}'", input.title))?;
    tracing::info!(title = %idea.title, "Idea created");
    Ok(idea)
}

async fn ensure_project(pool: &DbPool, input: CreateProject) -> anyhow::Result<Project> {
    if let Some(project) = ProjectRepo::find_by_name(pool, &input.name).await? {
        tracing::info!(name = %project.name, "Project already present");
        return Ok(project);
    }
    let project = ProjectRepo::create(pool, &input)
        .await
        .with_context(|| format!("Failed to create project '{}'", input.name))?;
    tracing::info!(name = %project.name, "Project created");
    Ok(project)
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<Timestamp> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| anyhow!("Invalid seed date {year}-{month:02}-{day:02}"))
}

