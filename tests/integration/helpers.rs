//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use campusvault_core::config::app::ServerConfig;
use campusvault_core::config::auth::AuthConfig;
use campusvault_core::config::logging::LoggingConfig;
use campusvault_core::config::session::SessionConfig;
use campusvault_core::config::storage::StorageConfig;
use campusvault_core::config::worker::WorkerConfig;
use campusvault_core::config::{AppConfig, DatabaseConfig};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Upload directory, kept alive for the test's duration
    _upload_dir: tempfile::TempDir,
}

impl TestApp {
    /// Create a test application, or `None` when no test database is
    /// configured (the caller should skip the test).
    pub async fn try_new() -> Option<Self> {
        let url = match std::env::var("CAMPUSVAULT_TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => return None,
        };

        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");

        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url,
                max_connections: 5,
                min_connections: 1,
                connect_timeout_seconds: 10,
                idle_timeout_seconds: 60,
            },
            auth: AuthConfig::default(),
            session: SessionConfig::default(),
            storage: StorageConfig {
                upload_dir: upload_dir.path().to_string_lossy().into_owned(),
                backup_dir: upload_dir
                    .path()
                    .join("backups")
                    .to_string_lossy()
                    .into_owned(),
                ..StorageConfig::default()
            },
            worker: WorkerConfig {
                enabled: false,
                ..WorkerConfig::default()
            },
            logging: LoggingConfig::default(),
        };

        let db_pool = campusvault_database::connection::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database")
            .into_pool();

        campusvault_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let provider = campusvault_storage::providers::LocalStorageProvider::new(
            &config.storage.upload_dir,
        )
        .await
        .expect("Failed to init storage");
        let upload_store = Arc::new(campusvault_storage::UploadStore::new(Arc::new(provider)));

        let user_repo = Arc::new(
            campusvault_database::repositories::user::UserRepository::new(db_pool.clone()),
        );
        let subject_repo = Arc::new(
            campusvault_database::repositories::subject::SubjectRepository::new(db_pool.clone()),
        );
        let resource_repo = Arc::new(
            campusvault_database::repositories::resource::ResourceRepository::new(db_pool.clone()),
        );
        let download_repo = Arc::new(
            campusvault_database::repositories::download::DownloadRepository::new(db_pool.clone()),
        );
        let session_repo = Arc::new(
            campusvault_database::repositories::session::SessionRepository::new(db_pool.clone()),
        );

        let password_hasher = Arc::new(campusvault_auth::password::PasswordHasher::new());
        let password_validator = campusvault_auth::password::PasswordValidator::new(&config.auth);
        let session_store = Arc::new(campusvault_auth::session::store::SessionStore::new(
            Arc::clone(&session_repo),
            config.session.clone(),
        ));
        let session_manager = Arc::new(campusvault_auth::session::manager::SessionManager::new(
            Arc::clone(&user_repo),
            Arc::clone(&session_store),
            Arc::clone(&password_hasher),
            password_validator,
        ));

        let subject_service = Arc::new(
            campusvault_service::subject::service::SubjectService::new(
                Arc::clone(&subject_repo),
                Arc::clone(&resource_repo),
            ),
        );
        let resource_service = Arc::new(
            campusvault_service::resource::service::ResourceService::new(
                Arc::clone(&resource_repo),
                Arc::clone(&upload_store),
            ),
        );
        let upload_service = Arc::new(campusvault_service::resource::upload::UploadService::new(
            Arc::clone(&resource_repo),
            Arc::clone(&subject_repo),
            Arc::clone(&upload_store),
            config.storage.clone(),
        ));
        let download_service = Arc::new(
            campusvault_service::resource::download::DownloadService::new(
                Arc::clone(&resource_repo),
                Arc::clone(&download_repo),
                Arc::clone(&upload_store),
            ),
        );
        let user_service = Arc::new(campusvault_service::user::service::UserService::new(
            Arc::clone(&user_repo),
        ));
        let stats_service = Arc::new(campusvault_service::stats::service::StatsService::new(
            Arc::clone(&resource_repo),
            Arc::clone(&download_repo),
        ));

        let app_state = campusvault_api::state::AppState {
            config: Arc::new(config),
            db_pool: db_pool.clone(),
            upload_store,
            session_manager,
            subject_service,
            resource_service,
            upload_service,
            download_service,
            user_service,
            stats_service,
        };

        let router = campusvault_api::router::build_router(app_state);

        Some(Self {
            router,
            db_pool,
            _upload_dir: upload_dir,
        })
    }

    /// Register a fresh user and return (token, user id).
    ///
    /// Usernames carry a random suffix so tests never collide with one
    /// another or with earlier runs against the same database.
    pub async fn register_user(&self, prefix: &str) -> (String, Uuid) {
        let suffix = &Uuid::new_v4().simple().to_string()[..12];
        let username = format!("{prefix}-{suffix}");

        let body = serde_json::json!({
            "username": username,
            "email": format!("{username}@test.edu"),
            "password": "plum-Tractor-91",
            "full_name": "Test User",
            "year": 2,
        });

        let response = self.request("POST", "/api/register", Some(body), None).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.json
        );

        let token = response.json["token"].as_str().unwrap().to_string();
        let user_id = Uuid::parse_str(response.json["user"]["id"].as_str().unwrap()).unwrap();
        (token, user_id)
    }

    /// Register a fresh user and grant the admin flag directly.
    pub async fn register_admin(&self, prefix: &str) -> (String, Uuid) {
        let (token, user_id) = self.register_user(prefix).await;

        sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = $1")
            .bind(user_id)
            .execute(&self.db_pool)
            .await
            .expect("Failed to grant admin");

        (token, user_id)
    }

    /// Create a subject via the API and return its id.
    pub async fn create_subject(&self, admin_token: &str, code: &str, branch: &str) -> Uuid {
        let body = serde_json::json!({
            "name": format!("Course {code}"),
            "code": code,
            "year": 2,
            "semester": 1,
            "branch": branch,
        });

        let response = self
            .request("POST", "/api/subjects", Some(body), Some(admin_token))
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Subject creation failed: {:?}",
            response.json
        );

        Uuid::parse_str(response.json["id"].as_str().unwrap()).unwrap()
    }

    /// Upload a resource through the multipart endpoint.
    pub async fn upload_resource(
        &self,
        token: &str,
        subject_id: Uuid,
        title: &str,
        file_name: &str,
        content: &[u8],
    ) -> TestResponse {
        const BOUNDARY: &str = "campusvault-test-boundary";

        let mut body = Vec::new();
        for (name, value) in [
            ("title", title.to_string()),
            ("resource_type", "notes".to_string()),
            ("subject_id", subject_id.to_string()),
        ] {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/api/resources")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build upload request");

        self.send(request).await
    }

    /// Make a JSON request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_disposition = response
            .headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            json,
            bytes: bytes.to_vec(),
            content_disposition,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (Null when the body is not JSON)
    pub json: Value,
    /// Raw body bytes
    pub bytes: Vec<u8>,
    /// Content-Disposition header, if present
    pub content_disposition: Option<String>,
}

/// Skip the current test unless a test database is configured.
#[macro_export]
macro_rules! require_test_app {
    () => {
        match crate::helpers::TestApp::try_new().await {
            Some(app) => app,
            None => {
                eprintln!("CAMPUSVAULT_TEST_DATABASE_URL not set; skipping");
                return;
            }
        }
    };
}
