#[cfg(test)]
mod tests {
    use crate::helpers::app::{empty_request, json_body, json_request, make_test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn protected_routes_require_token() {
        let app = make_test_app().await;

        let requests = vec![
            json_request("POST", "/tickets", None, json!({ "title": "t" })),
            empty_request("GET", "/tickets/1", None),
            empty_request("PATCH", "/tickets/1/close", None),
            empty_request("POST", "/tickets/1/replies", None),
            empty_request("GET", "/files/1/a.txt", None),
        ];

        for req in requests {
            let uri = req.uri().to_string();
            let response = app.send(req).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");

            let json = json_body(response).await;
            assert_eq!(json["success"], false);
            assert_eq!(json["message"], "Authentication required");
        }
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let app = make_test_app().await;

        let response = app.send(empty_request("GET", "/tickets/1", Some("not-a-jwt"))).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn public_routes_do_not_require_token() {
        let app = make_test_app().await;

        let response = app.send(empty_request("GET", "/health", None)).await;

        assert_eq!(response.status(), StatusCode::OK);
    }
}
