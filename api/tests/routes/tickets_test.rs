#[cfg(test)]
mod tests {
    use crate::helpers::app::{empty_request, json_body, json_request, make_test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_ticket() {
        let app = make_test_app().await;
        let (alice, token) = app.user_with_token("alice").await;

        let response = app
            .send(json_request("POST", "/tickets", Some(&token), json!({ "title": "VPN is down" })))
            .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["title"], "VPN is down");
        assert_eq!(json["data"]["user_id"], alice.id);
        assert_eq!(json["data"]["status"], "OPEN");
        assert!(json["data"]["created_at"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_create_ticket_requires_title() {
        let app = make_test_app().await;
        let (_, token) = app.user_with_token("alice").await;

        let response = app
            .send(json_request("POST", "/tickets", Some(&token), json!({ "title": "" })))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_ticket_empty_body_is_bad_request() {
        let app = make_test_app().await;
        let (_, token) = app.user_with_token("alice").await;

        let response = app.send(json_request("POST", "/tickets", Some(&token), json!({}))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("title"));
    }

    #[tokio::test]
    async fn test_create_ticket_rejects_blank_title() {
        let app = make_test_app().await;
        let (_, token) = app.user_with_token("alice").await;

        let response = app
            .send(json_request("POST", "/tickets", Some(&token), json!({ "title": "   " })))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_ticket_without_replies() {
        let app = make_test_app().await;
        let (alice, token) = app.user_with_token("alice").await;
        app.send(json_request("POST", "/tickets", Some(&token), json!({ "title": "t" }))).await;

        let response = app.send(empty_request("GET", "/tickets/1", Some(&token))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let view = &json["data"];
        assert_eq!(view["ticketId"], 1);
        assert_eq!(view["asker"], alice.id);
        assert_eq!(view["parameters"]["duration"], 0);
        assert_eq!(view["participants"][alice.id.to_string()]["name"], "alice");
        assert_eq!(
            view["participants"][alice.id.to_string()]["avatarUrl"],
            "https://avatars.test/alice.png"
        );
        assert_eq!(view["timeline"].as_array().unwrap().len(), 1);
        assert_eq!(view["timeline"][0]["label"], "Opened");
        assert!(view["timeline"][0].get("userId").is_none());
        assert_eq!(view["conversation"], json!([]));
    }

    #[tokio::test]
    async fn test_get_unknown_ticket() {
        let app = make_test_app().await;
        let (_, token) = app.user_with_token("alice").await;

        let response = app.send(empty_request("GET", "/tickets/99", Some(&token))).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_body(response).await;
        assert_eq!(json["message"], "Ticket not found");
    }

    #[tokio::test]
    async fn test_close_ticket_appends_closed_event() {
        let app = make_test_app().await;
        let (_, token) = app.user_with_token("alice").await;
        app.send(json_request("POST", "/tickets", Some(&token), json!({ "title": "t" }))).await;

        let response = app.send(empty_request("PATCH", "/tickets/1/close", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["status"], "CLOSED");

        let json = json_body(app.send(empty_request("GET", "/tickets/1", Some(&token))).await).await;
        let timeline = json["data"]["timeline"].as_array().unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0]["label"], "Opened");
        assert_eq!(timeline[1]["label"], "Closed");
        assert!(json["data"]["parameters"]["duration"].as_i64().unwrap() >= 0);
    }

    #[tokio::test]
    async fn test_close_unknown_ticket() {
        let app = make_test_app().await;
        let (_, token) = app.user_with_token("alice").await;

        let response = app.send(empty_request("PATCH", "/tickets/42/close", Some(&token))).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_body(response).await;
        assert_eq!(json["message"], "Ticket not found");
    }
}
