//! HTTP-level integration tests for `/api/ideas`, including conversion to a
//! project.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, delete_auth, get_auth, patch_json_auth, post_json_auth, put_json_auth, register,
    send,
};
use sqlx::PgPool;

async fn create_idea(app: axum::Router, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(app, "/api/ideas", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_applies_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, token) = register(app.clone(), "ida@example.com").await;

    let idea = create_idea(
        app,
        &token,
        serde_json::json!({ "title": "  Offline mode  ", "tags": [" sync ", "", "mobile"] }),
    )
    .await;

    assert_eq!(idea["title"], "Offline mode");
    assert_eq!(idea["status"], "Draft");
    assert_eq!(idea["tags"], serde_json::json!(["sync", "mobile"]));
    assert!(idea["priority"].is_null());
    assert_eq!(idea["userId"], user_id.as_str());
    assert!(idea["createdAt"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_requires_title_and_valid_enums(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register(app.clone(), "ida@example.com").await;

    let blank = post_json_auth(
        app.clone(),
        "/api/ideas",
        serde_json::json!({ "title": "   " }),
        &token,
    )
    .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(blank).await["message"], "Title is required");

    let bad_status = post_json_auth(
        app,
        "/api/ideas",
        serde_json::json!({ "title": "x", "status": "Someday" }),
        &token,
    )
    .await;
    assert_eq!(bad_status.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn titles_are_globally_unique(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register(app.clone(), "alice@example.com").await;
    let (_, bob) = register(app.clone(), "bob@example.com").await;

    create_idea(app.clone(), &alice, serde_json::json!({ "title": "Shared" })).await;
    let response = post_json_auth(
        app,
        "/api/ideas",
        serde_json::json!({ "title": "Shared" }),
        &bob,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["message"],
        "An idea with this title already exists."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ideas_are_owner_scoped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register(app.clone(), "alice@example.com").await;
    let (_, bob) = register(app.clone(), "bob@example.com").await;

    let idea = create_idea(app.clone(), &alice, serde_json::json!({ "title": "Private" })).await;
    let uri = format!("/api/ideas/{}", idea["id"].as_str().unwrap());

    let list = body_json(get_auth(app.clone(), "/api/ideas", &bob).await).await;
    assert_eq!(list, serde_json::json!([]));

    assert_eq!(
        get_auth(app.clone(), &uri, &bob).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        patch_json_auth(app.clone(), &uri, serde_json::json!({ "title": "Mine" }), &bob)
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        delete_auth(app.clone(), &uri, &bob).await.status(),
        StatusCode::NOT_FOUND
    );

    let still_there = get_auth(app, &uri, &alice).await;
    assert_eq!(still_there.status(), StatusCode::OK);
    assert_eq!(body_json(still_there).await["title"], "Private");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_newest_first(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register(app.clone(), "ida@example.com").await;

    create_idea(app.clone(), &token, serde_json::json!({ "title": "First" })).await;
    create_idea(app.clone(), &token, serde_json::json!({ "title": "Second" })).await;

    let list = body_json(get_auth(app, "/api/ideas", &token).await).await;
    let titles: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Second", "First"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_is_partial_and_null_clears(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register(app.clone(), "ida@example.com").await;
    let idea = create_idea(
        app.clone(),
        &token,
        serde_json::json!({
            "title": "Patchable",
            "description": "Long form",
            "priority": "High",
            "tags": ["a"]
        }),
    )
    .await;
    let uri = format!("/api/ideas/{}", idea["id"].as_str().unwrap());

    let response = put_json_auth(
        app.clone(),
        &uri,
        serde_json::json!({ "status": "Prioritized", "priority": null }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["status"], "Prioritized");
    assert!(updated["priority"].is_null());
    assert_eq!(updated["description"], "Long form");
    assert_eq!(updated["tags"], serde_json::json!(["a"]));

    let empty = patch_json_auth(app, &uri, serde_json::json!({}), &token).await;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(empty).await["message"],
        "No fields provided for update"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn put_null_clears_tags_and_description(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register(app.clone(), "nul@example.com").await;
    let idea = create_idea(
        app.clone(),
        &token,
        serde_json::json!({
            "title": "Clearable",
            "description": "Soon gone",
            "tags": ["x", "y"]
        }),
    )
    .await;
    let uri = format!("/api/ideas/{}", idea["id"].as_str().unwrap());

    let response = put_json_auth(
        app.clone(),
        &uri,
        serde_json::json!({ "tags": null, "description": null }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["tags"], serde_json::json!([]));
    assert!(updated["description"].is_null());
    assert_eq!(updated["title"], "Clearable");

    let stored = body_json(get_auth(app, &uri, &token).await).await;
    assert_eq!(stored["tags"], serde_json::json!([]));
    assert!(stored["description"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_returns_message_then_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register(app.clone(), "ida@example.com").await;
    let idea = create_idea(app.clone(), &token, serde_json::json!({ "title": "Doomed" })).await;
    let uri = format!("/api/ideas/{}", idea["id"].as_str().unwrap());

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Idea deleted successfully"
    );

    assert_eq!(
        get_auth(app, &uri, &token).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_id_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register(app.clone(), "ida@example.com").await;

    let response = get_auth(app, "/api/ideas/not-a-uuid", &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn convert_creates_linked_project(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, token) = register(app.clone(), "ida@example.com").await;
    let idea = create_idea(
        app.clone(),
        &token,
        serde_json::json!({ "title": "Loyalty programme", "description": "Points for purchases" }),
    )
    .await;
    let idea_id = idea["id"].as_str().unwrap();

    let response = post_json_auth(
        app.clone(),
        &format!("/api/ideas/{idea_id}/convert"),
        serde_json::json!({ "budget": 2500 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let project = body_json(response).await;
    assert_eq!(project["name"], "Loyalty programme");
    assert_eq!(project["description"], "Points for purchases");
    assert_eq!(project["ideaId"], idea_id);
    assert_eq!(project["ownerId"], user_id.as_str());
    assert_eq!(project["status"], "Planning");

    let idea = body_json(get_auth(app, &format!("/api/ideas/{idea_id}"), &token).await).await;
    assert_eq!(idea["status"], "ConvertedToProject");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn convert_without_body_uses_idea_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register(app.clone(), "bare@example.com").await;
    let idea = create_idea(
        app.clone(),
        &token,
        serde_json::json!({ "title": "Bare convert", "description": "No body sent" }),
    )
    .await;
    let idea_id = idea["id"].as_str().unwrap();

    let response = send(
        app,
        Method::POST,
        &format!("/api/ideas/{idea_id}/convert"),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let project = body_json(response).await;
    assert_eq!(project["name"], "Bare convert");
    assert_eq!(project["description"], "No body sent");
    assert_eq!(project["ideaId"], idea_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn convert_foreign_idea_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register(app.clone(), "alice@example.com").await;
    let (_, bob) = register(app.clone(), "bob@example.com").await;
    let idea = create_idea(app.clone(), &alice, serde_json::json!({ "title": "Hers" })).await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/ideas/{}/convert", idea["id"].as_str().unwrap()),
        serde_json::json!({}),
        &bob,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let projects = body_json(get_auth(app, "/api/projects", &bob).await).await;
    assert_eq!(projects["data"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn convert_name_conflict_leaves_idea_untouched(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register(app.clone(), "ida@example.com").await;
    post_json_auth(
        app.clone(),
        "/api/projects",
        serde_json::json!({ "name": "Taken" }),
        &token,
    )
    .await;
    let idea = create_idea(app.clone(), &token, serde_json::json!({ "title": "Taken" })).await;
    let idea_uri = format!("/api/ideas/{}", idea["id"].as_str().unwrap());

    let response = post_json_auth(
        app.clone(),
        &format!("{idea_uri}/convert"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let idea = body_json(get_auth(app, &idea_uri, &token).await).await;
    assert_eq!(idea["status"], "Draft");
}
