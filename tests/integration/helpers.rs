//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, Bytes};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use linkshare_api::AppState;
use linkshare_core::config::{AppConfig, SeedUser};
use linkshare_core::traits::storage::{ByteStream, FileModes, FileSystem};
use linkshare_database::UserStore;
use linkshare_entity::user::User;

pub const ALICE: &str = "0192f5a0-0000-7000-8000-00000000a11c";
pub const BOB: &str = "0192f5a0-0000-7000-8000-000000000b0b";
pub const CAROL: &str = "0192f5a0-0000-7000-8000-0000000ca201";
pub const ADMIN: &str = "0192f5a0-0000-7000-8000-00000000ad31";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application state, for direct store and filesystem access
    pub state: AppState,
    /// Storage root; removed on drop
    _dir: TempDir,
}

/// Response captured from the router
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Bytes,
    /// Parsed JSON body (`Null` when the body is not JSON)
    pub body: Value,
}

fn seed(id: &str, username: &str, role: &str, scope: &str, can_share: bool) -> SeedUser {
    SeedUser {
        id: id.to_string(),
        username: username.to_string(),
        display_name: None,
        role: role.to_string(),
        scope: scope.to_string(),
        can_share,
    }
}

impl TestApp {
    /// Create a new test application over a fresh storage root.
    ///
    /// Alice owns `/docs/{a.txt, b.md, sub/c.txt}` and `/secret.txt`.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.storage.root_path = dir.path().to_string_lossy().into_owned();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.users = vec![
            seed(ALICE, "alice", "user", "/users/alice", true),
            seed(BOB, "bob", "user", "/users/bob", true),
            seed(CAROL, "carol", "user", "/users/carol", false),
            seed(ADMIN, "admin", "admin", "/", true),
        ];
        config.users[0].display_name = Some("Alice".to_string());

        let state = linkshare_api::build_state(config)
            .await
            .expect("Failed to build state");
        let router = linkshare_api::build_app(state.clone());

        let app = Self {
            router,
            state,
            _dir: dir,
        };
        app.write_owned(ALICE, "/docs/a.txt", "alpha").await;
        app.write_owned(ALICE, "/docs/b.md", "# bravo").await;
        app.write_owned(ALICE, "/docs/sub/c.txt", "charlie").await;
        app.write_owned(ALICE, "/secret.txt", "top secret").await;
        app
    }

    /// Load a seeded user.
    pub async fn user(&self, id: &str) -> User {
        self.state
            .user_repo
            .get(id.parse().expect("Invalid user id"))
            .await
            .expect("Unknown user")
    }

    /// Mint an access token for a seeded user.
    pub async fn token(&self, id: &str) -> String {
        let user = self.user(id).await;
        let (token, _) = self
            .state
            .jwt_encoder
            .generate_access_token(user.id, user.role, &user.username)
            .expect("Failed to mint token");
        token
    }

    /// Write a file into a user's filesystem.
    pub async fn write_owned(&self, id: &str, path: &str, content: &'static str) {
        let user = self.user(id).await;
        let fs = self.state.storage_manager.user_fs(&user).await;
        let body: ByteStream = Box::pin(futures::stream::once(async move {
            Ok::<_, std::io::Error>(Bytes::from_static(content.as_bytes()))
        }));
        fs.write_stream(path, body, FileModes::default())
            .await
            .expect("Failed to write fixture file");
    }

    /// Whether a path exists in a user's filesystem.
    pub async fn exists_owned(&self, id: &str, path: &str) -> bool {
        let user = self.user(id).await;
        let fs = self.state.storage_manager.user_fs(&user).await;
        fs.exists(path).await.expect("Failed to stat")
    }

    /// Make a JSON request to the test app
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
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send raw content, optionally with a share password header
    pub async fn content(
        &self,
        method: &str,
        path: &str,
        content: &'static str,
        token: Option<&str>,
        password: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(password) = password {
            req = req.header("X-SHARE-PASSWORD", password);
        }
        let req = req
            .body(Body::from(content))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }

    /// Create a link as `owner` and return its JSON record.
    pub async fn create_link(&self, owner: &str, path: &str, body: Option<Value>) -> Value {
        let token = self.token(owner).await;
        let response = self
            .request("POST", &format!("/api/share{path}"), body, Some(&token))
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Create link failed: {:?}",
            response.body
        );
        response.body["data"].clone()
    }

    /// Publish a link as its owner.
    pub async fn publish(&self, owner: &str, hash: &str, permission: &str, allowed: &[&str]) {
        let token = self.token(owner).await;
        let response = self
            .request(
                "PUT",
                &format!("/api/shares/{hash}/public"),
                Some(serde_json::json!({
                    "permission": permission,
                    "allowed_users": allowed,
                })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    }
}
