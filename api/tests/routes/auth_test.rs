#[cfg(test)]
mod tests {
    use crate::helpers::app::{empty_request, json_body, json_request, make_test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    fn register_body(username: &str) -> serde_json::Value {
        json!({
            "username": username,
            "password": "correct-horse",
            "avatar": "https://avatars.test/a.png"
        })
    }

    #[tokio::test]
    async fn test_register_success() {
        let app = make_test_app().await;

        let response = app.send(json_request("POST", "/auth/register", None, register_body("alice"))).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "User registered successfully");
        assert_eq!(json["data"]["username"], "alice");
        assert_eq!(json["data"]["admin"], false);
        assert!(json["data"]["id"].as_i64().is_some());
        assert!(json["data"]["token"].as_str().is_some());
        assert!(json["data"]["expires_at"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let app = make_test_app().await;
        app.send(json_request("POST", "/auth/register", None, register_body("alice"))).await;

        let response = app.send(json_request("POST", "/auth/register", None, register_body("alice"))).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Username is already taken");
    }

    #[tokio::test]
    async fn test_register_validation_errors() {
        let app = make_test_app().await;

        let response = app
            .send(json_request(
                "POST",
                "/auth/register",
                None,
                json!({ "username": "alice", "password": "short", "avatar": "https://avatars.test/a.png" }),
            ))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["message"], "Password must be at least 8 characters");
    }

    #[tokio::test]
    async fn test_register_rejects_bad_avatar_url() {
        let app = make_test_app().await;

        let response = app
            .send(json_request(
                "POST",
                "/auth/register",
                None,
                json!({ "username": "alice", "password": "correct-horse", "avatar": "not a url" }),
            ))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_round_trip_token_is_accepted() {
        let app = make_test_app().await;
        app.send(json_request("POST", "/auth/register", None, register_body("alice"))).await;

        let response = app
            .send(json_request(
                "POST",
                "/auth/login",
                None,
                json!({ "username": "alice", "password": "correct-horse" }),
            ))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["message"], "Login successful");
        let token = json["data"]["token"].as_str().unwrap().to_string();

        let response = app
            .send(json_request("POST", "/tickets", Some(&token), json!({ "title": "Hello" })))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app.send(empty_request("GET", "/tickets/1", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = make_test_app().await;
        app.send(json_request("POST", "/auth/register", None, register_body("alice"))).await;

        let response = app
            .send(json_request(
                "POST",
                "/auth/login",
                None,
                json!({ "username": "alice", "password": "wrong-password" }),
            ))
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let app = make_test_app().await;

        let response = app
            .send(json_request(
                "POST",
                "/auth/login",
                None,
                json!({ "username": "ghost", "password": "whatever1" }),
            ))
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_missing_fields_is_bad_request() {
        let app = make_test_app().await;

        let response = app
            .send(json_request("POST", "/auth/register", None, json!({ "username": "carol" })))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("missing field"));
    }

    #[tokio::test]
    async fn test_register_requires_avatar() {
        let app = make_test_app().await;

        let response = app
            .send(json_request(
                "POST",
                "/auth/register",
                None,
                json!({ "username": "carol", "password": "correct-horse" }),
            ))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert!(json["message"].as_str().unwrap().contains("avatar"));
    }

    #[tokio::test]
    async fn test_register_checks_length_of_trimmed_username() {
        let app = make_test_app().await;

        let response = app
            .send(json_request(
                "POST",
                "/auth/register",
                None,
                json!({ "username": "  ab ", "password": "correct-horse", "avatar": "https://avatars.test/a.png" }),
            ))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["message"], "Username must be between 3 and 32 characters");
    }

    #[tokio::test]
    async fn test_login_empty_body_is_bad_request() {
        let app = make_test_app().await;

        let response = app.send(json_request("POST", "/auth/login", None, json!({}))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["success"], false);
    }
}
