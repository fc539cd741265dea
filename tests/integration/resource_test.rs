//! Resource upload, download, and deletion behavior.

use http::StatusCode;
use uuid::Uuid;

use crate::require_test_app;

fn unique_branch() -> String {
    format!("CSE-{}", &Uuid::new_v4().simple().to_string()[..8])
}

#[tokio::test]
async fn upload_then_download_round_trip() {
    let app = require_test_app!();

    let (admin_token, _) = app.register_admin("admin").await;
    let (student_token, student_id) = app.register_user("student").await;
    let subject_id = app
        .create_subject(&admin_token, "CS201", &unique_branch())
        .await;

    let content = b"%PDF-1.4 fake but byte-exact content";
    let upload = app
        .upload_resource(&admin_token, subject_id, "DS Notes", "ds-notes.pdf", content)
        .await;
    assert_eq!(upload.status, StatusCode::CREATED, "{:?}", upload.json);
    assert_eq!(upload.json["download_count"].as_i64().unwrap(), 0);
    let resource_id = upload.json["id"].as_str().unwrap().to_string();

    // The student downloads it byte-identical, with the original name.
    let download = app
        .request(
            "GET",
            &format!("/api/download/{resource_id}"),
            None,
            Some(&student_token),
        )
        .await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.bytes, content);
    assert!(download
        .content_disposition
        .as_deref()
        .unwrap()
        .contains("ds-notes.pdf"));

    // Exactly one download row and a counter of one.
    let listed = app
        .request(
            "GET",
            &format!("/api/resources/{subject_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(listed.json[0]["download_count"].as_i64().unwrap(), 1);

    let rows: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM downloads WHERE resource_id = $1 AND user_id = $2")
            .bind(Uuid::parse_str(&resource_id).unwrap())
            .bind(student_id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(rows, 1);

    // Repeats are not deduplicated.
    let again = app
        .request(
            "GET",
            &format!("/api/download/{resource_id}"),
            None,
            Some(&student_token),
        )
        .await;
    assert_eq!(again.status, StatusCode::OK);

    let listed = app
        .request(
            "GET",
            &format!("/api/resources/{subject_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(listed.json[0]["download_count"].as_i64().unwrap(), 2);
}

#[tokio::test]
async fn download_requires_auth() {
    let app = require_test_app!();

    let (admin_token, _) = app.register_admin("admin").await;
    let subject_id = app
        .create_subject(&admin_token, "CS202", &unique_branch())
        .await;
    let upload = app
        .upload_resource(&admin_token, subject_id, "Notes", "n.pdf", b"x")
        .await;
    let resource_id = upload.json["id"].as_str().unwrap();

    let anonymous = app
        .request("GET", &format!("/api/download/{resource_id}"), None, None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn upload_rejects_disallowed_extension() {
    let app = require_test_app!();

    let (admin_token, _) = app.register_admin("admin").await;
    let subject_id = app
        .create_subject(&admin_token, "CS203", &unique_branch())
        .await;

    let rejected = app
        .upload_resource(&admin_token, subject_id, "Script", "evil.exe", b"MZ")
        .await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);

    // Nothing was persisted.
    let listed = app
        .request(
            "GET",
            &format!("/api/resources/{subject_id}"),
            None,
            None,
        )
        .await;
    assert!(listed.json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn upload_requires_admin() {
    let app = require_test_app!();

    let (admin_token, _) = app.register_admin("admin").await;
    let (student_token, _) = app.register_user("student").await;
    let subject_id = app
        .create_subject(&admin_token, "CS204", &unique_branch())
        .await;

    let response = app
        .upload_resource(&student_token, subject_id, "Notes", "n.pdf", b"x")
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn upload_to_missing_subject_fails() {
    let app = require_test_app!();

    let (admin_token, _) = app.register_admin("admin").await;
    let response = app
        .upload_resource(&admin_token, Uuid::new_v4(), "Notes", "n.pdf", b"x")
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_owner_delete_forbidden() {
    let app = require_test_app!();

    let (admin_token, _) = app.register_admin("admin").await;
    let (student_token, _) = app.register_user("student").await;
    let subject_id = app
        .create_subject(&admin_token, "CS205", &unique_branch())
        .await;

    let upload = app
        .upload_resource(&admin_token, subject_id, "Notes", "n.pdf", b"x")
        .await;
    let resource_id = upload.json["id"].as_str().unwrap().to_string();

    let forbidden = app
        .request(
            "DELETE",
            &format!("/api/resources/{resource_id}"),
            None,
            Some(&student_token),
        )
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let allowed = app
        .request(
            "DELETE",
            &format!("/api/resources/{resource_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
}

#[tokio::test]
async fn list_filters_by_resource_type() {
    let app = require_test_app!();

    let (admin_token, _) = app.register_admin("admin").await;
    let subject_id = app
        .create_subject(&admin_token, "CS206", &unique_branch())
        .await;

    app.upload_resource(&admin_token, subject_id, "Notes", "n.pdf", b"x")
        .await;

    let notes = app
        .request(
            "GET",
            &format!("/api/resources/{subject_id}?type=notes"),
            None,
            None,
        )
        .await;
    assert_eq!(notes.json.as_array().unwrap().len(), 1);

    let pyqs = app
        .request(
            "GET",
            &format!("/api/resources/{subject_id}?type=pyqs"),
            None,
            None,
        )
        .await;
    assert!(pyqs.json.as_array().unwrap().is_empty());

    let invalid = app
        .request(
            "GET",
            &format!("/api/resources/{subject_id}?type=quiz"),
            None,
            None,
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}
