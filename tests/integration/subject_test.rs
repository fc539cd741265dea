//! Subject directory behavior: filtering, idempotent create, gated delete.

use http::StatusCode;
use uuid::Uuid;

use crate::require_test_app;

/// Branch names are free text, so a unique branch isolates each test's
/// rows from concurrent tests sharing the database.
fn unique_branch() -> String {
    format!("CSE-{}", &Uuid::new_v4().simple().to_string()[..8])
}

#[tokio::test]
async fn create_requires_admin() {
    let app = require_test_app!();

    let (student_token, _) = app.register_user("student").await;
    let response = app
        .request(
            "POST",
            "/api/subjects",
            Some(serde_json::json!({
                "name": "Algorithms",
                "code": "CS201",
                "year": 2,
                "semester": 1,
                "branch": unique_branch(),
            })),
            Some(&student_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_is_idempotent_per_identity() {
    let app = require_test_app!();

    let (admin_token, _) = app.register_admin("admin").await;
    let branch = unique_branch();

    let first = app.create_subject(&admin_token, "CS201", &branch).await;
    let second = app.create_subject(&admin_token, "CS201", &branch).await;

    assert_eq!(first, second, "same identity must return the same subject");
}

#[tokio::test]
async fn listing_filters_by_exact_term() {
    let app = require_test_app!();

    let (admin_token, _) = app.register_admin("admin").await;
    let branch_a = unique_branch();
    let branch_b = unique_branch();

    let in_a = app.create_subject(&admin_token, "CS201", &branch_a).await;
    let _in_b = app.create_subject(&admin_token, "CS202", &branch_b).await;

    let listed = app
        .request(
            "GET",
            &format!("/api/subjects/2/1?branch={branch_a}"),
            None,
            None,
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK);

    let ids: Vec<&str> = listed
        .json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![in_a.to_string().as_str()]);

    // An unused (year, semester, branch) combination is empty.
    let empty = app
        .request(
            "GET",
            &format!("/api/subjects/4/2?branch={branch_a}"),
            None,
            None,
        )
        .await;
    assert_eq!(empty.status, StatusCode::OK);
    assert!(empty.json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn legacy_branch_spelling_matches_existing_subject() {
    let app = require_test_app!();

    let (admin_token, _) = app.register_admin("admin").await;

    // A row created before branch canonicalization.
    let legacy_id = Uuid::new_v4();
    let code = format!("CS{}", &Uuid::new_v4().simple().to_string()[..6]);
    sqlx::query(
        "INSERT INTO subjects (id, name, code, year, semester, branch, icon) \
         VALUES ($1, 'Algorithms', $2, 2, 1, 'Computer Science', 'fas fa-book')",
    )
    .bind(legacy_id)
    .bind(&code)
    .execute(&app.db_pool)
    .await
    .unwrap();

    // Creating the same subject under the canonical branch reuses the row.
    let response = app
        .request(
            "POST",
            "/api/subjects",
            Some(serde_json::json!({
                "name": "Algorithms",
                "code": code,
                "year": 2,
                "semester": 1,
                "branch": "CSE",
            })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json["id"].as_str().unwrap(), legacy_id.to_string());
}

#[tokio::test]
async fn delete_blocked_while_resources_exist() {
    let app = require_test_app!();

    let (admin_token, _) = app.register_admin("admin").await;
    let subject_id = app
        .create_subject(&admin_token, "CS204", &unique_branch())
        .await;

    let upload = app
        .upload_resource(&admin_token, subject_id, "DB Notes", "db-notes.pdf", b"pdf")
        .await;
    assert_eq!(upload.status, StatusCode::CREATED);
    let resource_id = upload.json["id"].as_str().unwrap().to_string();

    let blocked = app
        .request(
            "DELETE",
            &format!("/api/subjects/{subject_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);

    // With the resource gone the delete succeeds.
    let delete_resource = app
        .request(
            "DELETE",
            &format!("/api/resources/{resource_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(delete_resource.status, StatusCode::OK);

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/subjects/{subject_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
}

#[tokio::test]
async fn update_edits_name_code_icon() {
    let app = require_test_app!();

    let (admin_token, _) = app.register_admin("admin").await;
    let subject_id = app
        .create_subject(&admin_token, "CS299", &unique_branch())
        .await;

    let updated = app
        .request(
            "PUT",
            &format!("/api/subjects/{subject_id}"),
            Some(serde_json::json!({
                "name": "Renamed Course",
                "icon": "fas fa-flask",
            })),
            Some(&admin_token),
        )
        .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json["name"].as_str().unwrap(), "Renamed Course");
    assert_eq!(updated.json["icon"].as_str().unwrap(), "fas fa-flask");
    // Untouched fields survive.
    assert_eq!(updated.json["code"].as_str().unwrap(), "CS299");
}
