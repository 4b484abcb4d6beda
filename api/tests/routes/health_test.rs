#[cfg(test)]
mod tests {
    use crate::helpers::app::{empty_request, json_body, make_test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health_check() {
        let app = make_test_app().await;

        let response = app.send(empty_request("GET", "/health", None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "OK");
        assert_eq!(json["message"], "Health check passed");
    }
}
