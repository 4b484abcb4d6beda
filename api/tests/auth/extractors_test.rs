#[cfg(test)]
mod tests {
    use crate::helpers::app::{TEST_JWT_SECRET, make_test_app};
    use api::auth::claims::{AuthUser, Claims};
    use axum::{extract::FromRequestParts, http::{Request, StatusCode}};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn now_secs() -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs()
    }

    fn token(claims: &Claims, secret: &str) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_ref())).unwrap()
    }

    async fn extract(auth_header: Option<String>) -> Result<AuthUser, (StatusCode, &'static str)> {
        let app = make_test_app().await;
        let mut builder = Request::builder();
        if let Some(value) = auth_header {
            builder = builder.header("Authorization", value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, &app.state).await
    }

    #[tokio::test]
    async fn test_valid_token() {
        let claims = Claims { sub: 7, exp: (now_secs() + 3600) as usize, admin: true };

        let user = extract(Some(format!("Bearer {}", token(&claims, TEST_JWT_SECRET))))
            .await
            .unwrap();

        assert_eq!(user.0.sub, 7);
        assert!(user.0.admin);
    }

    #[tokio::test]
    async fn test_invalid_token_wrong_secret() {
        let claims = Claims { sub: 1, exp: (now_secs() + 3600) as usize, admin: false };

        let (status, message) = extract(Some(format!("Bearer {}", token(&claims, "wrong_secret"))))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message, "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_expired_token() {
        let claims = Claims { sub: 1, exp: (now_secs() - 3600) as usize, admin: false };

        let (status, message) = extract(Some(format!("Bearer {}", token(&claims, TEST_JWT_SECRET))))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message, "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_missing_header() {
        let (status, message) = extract(None).await.unwrap_err();

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message, "Missing or invalid Authorization header");
    }

    #[tokio::test]
    async fn test_non_bearer_scheme() {
        let (status, _) = extract(Some("Basic YWxpY2U6cGFzcw==".into())).await.unwrap_err();

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
