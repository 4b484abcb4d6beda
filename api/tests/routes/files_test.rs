#[cfg(test)]
mod tests {
    use crate::helpers::MultipartBody;
    use crate::helpers::app::{empty_request, json_body, json_request, make_test_app};
    use axum::{body::to_bytes, http::{StatusCode, header}};
    use serde_json::json;

    async fn ticket_with_attachment(app: &crate::helpers::TestApp, token: &str) {
        app.send(json_request("POST", "/tickets", Some(token), json!({ "title": "t" }))).await;
        let req = MultipartBody::new()
            .text("content", "attached")
            .file("files", "pic.jpg", b"\xFF\xD8\xFFjpeg-bytes")
            .into_request("/tickets/1/replies", token, "localhost");
        assert_eq!(app.send(req).await.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_download_returns_uploaded_bytes() {
        let app = make_test_app().await;
        let (_, token) = app.user_with_token("alice").await;
        ticket_with_attachment(&app, &token).await;

        let response = app.send(empty_request("GET", "/files/1/pic.jpg", Some(&token))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"pic.jpg\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"\xFF\xD8\xFFjpeg-bytes");
    }

    #[tokio::test]
    async fn test_download_unknown_file() {
        let app = make_test_app().await;
        let (_, token) = app.user_with_token("alice").await;
        ticket_with_attachment(&app, &token).await;

        let response = app.send(empty_request("GET", "/files/1/other.jpg", Some(&token))).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], "File not found");
    }

    #[tokio::test]
    async fn test_download_file_missing_on_disk() {
        let app = make_test_app().await;
        let (_, token) = app.user_with_token("alice").await;
        ticket_with_attachment(&app, &token).await;
        std::fs::remove_file(app.state.storage().resolve("1/pic.jpg")).unwrap();

        let response = app.send(empty_request("GET", "/files/1/pic.jpg", Some(&token))).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], "File missing on disk");
    }
}
