//! Per-user stats aggregation.

use http::StatusCode;
use uuid::Uuid;

use crate::require_test_app;

fn unique_branch() -> String {
    format!("CSE-{}", &Uuid::new_v4().simple().to_string()[..8])
}

#[tokio::test]
async fn stats_reflect_uploads_and_downloads() {
    let app = require_test_app!();

    let (admin_token, admin_id) = app.register_admin("uploader").await;
    let (student_token, student_id) = app.register_user("downloader").await;
    let subject_id = app
        .create_subject(&admin_token, "CS301", &unique_branch())
        .await;

    let first = app
        .upload_resource(&admin_token, subject_id, "AI Notes", "ai.pdf", b"a")
        .await;
    app.upload_resource(&admin_token, subject_id, "ML Notes", "ml.pdf", b"b")
        .await;
    let resource_id = first.json["id"].as_str().unwrap().to_string();

    // The student downloads the first resource twice.
    for _ in 0..2 {
        let download = app
            .request(
                "GET",
                &format!("/api/download/{resource_id}"),
                None,
                Some(&student_token),
            )
            .await;
        assert_eq!(download.status, StatusCode::OK);
    }

    // Uploader: two uploads, no downloads performed, two downloads received.
    let uploader_stats = app
        .request(
            "GET",
            &format!("/api/stats/{admin_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(uploader_stats.status, StatusCode::OK);
    assert_eq!(uploader_stats.json["uploads"].as_i64().unwrap(), 2);
    assert_eq!(uploader_stats.json["downloads"].as_i64().unwrap(), 0);
    assert_eq!(uploader_stats.json["total_downloads"].as_i64().unwrap(), 2);

    // Downloader: no uploads, two downloads performed.
    let downloader_stats = app
        .request(
            "GET",
            &format!("/api/stats/{student_id}"),
            None,
            Some(&student_token),
        )
        .await;
    assert_eq!(downloader_stats.json["uploads"].as_i64().unwrap(), 0);
    assert_eq!(downloader_stats.json["downloads"].as_i64().unwrap(), 2);
    assert_eq!(downloader_stats.json["total_downloads"].as_i64().unwrap(), 0);
}

#[tokio::test]
async fn stats_of_another_user_forbidden() {
    let app = require_test_app!();

    let (_, admin_id) = app.register_admin("watched").await;
    let (student_token, _) = app.register_user("curious").await;

    let response = app
        .request(
            "GET",
            &format!("/api/stats/{admin_id}"),
            None,
            Some(&student_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_may_view_any_stats() {
    let app = require_test_app!();

    let (admin_token, _) = app.register_admin("admin").await;
    let (_, student_id) = app.register_user("student").await;

    let response = app
        .request(
            "GET",
            &format!("/api/stats/{student_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
