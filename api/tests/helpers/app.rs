use api::auth::generate_jwt;
use api::routes::routes;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use db::models::user::Model as UserModel;
use db::test_utils::setup_test_db;
use serde_json::Value;
use services::user_service::UserService;
use tempfile::TempDir;
use util::{state::AppState, storage::AttachmentStore};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Router wired to a fresh database and attachment directory.
///
/// Keep the whole struct alive for the duration of the test; dropping it removes
/// the temporary directory holding both.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub _dir: TempDir,
}

pub async fn make_test_app() -> TestApp {
    make_test_app_with_base_url(None).await
}

pub async fn make_test_app_with_base_url(base_url: Option<&str>) -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db = setup_test_db(dir.path()).await;
    let storage = AttachmentStore::new(dir.path().join("uploads"));

    let state = AppState::new(db, TEST_JWT_SECRET, 60, storage)
        .with_base_url(base_url.map(str::to_owned));
    let router = routes(state.clone());

    TestApp { router, state, _dir: dir }
}

impl TestApp {
    /// Inserts a user directly and returns it together with a valid bearer token.
    pub async fn user_with_token(&self, username: &str) -> (UserModel, String) {
        let hash = UserService::hash_password("password123").expect("Failed to hash");
        let avatar = format!("https://avatars.test/{username}.png");
        let user = UserModel::create(self.state.db(), username, &hash, Some(&avatar), false)
            .await
            .expect("Failed to create user");
        let (token, _) = generate_jwt(&self.state, user.id, user.admin).expect("Failed to sign token");
        (user, token)
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        use tower::ServiceExt;
        self.router.clone().oneshot(req).await.unwrap()
    }
}

pub async fn json_body(response: Response<Body>) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}
