use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::routes::common::{format_validation_errors, json_rejection_response};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::user::Model as UserModel;
use serde::{Deserialize, Serialize};
use services::ServiceError;
use services::user_service::{CreateUser, UserService};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32, message = "Username must be between 3 and 32 characters"))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub admin: bool,
    pub token: String,
    pub expires_at: String,
}

fn token_response(app_state: &AppState, user: UserModel) -> Result<UserResponse, Response> {
    match generate_jwt(app_state, user.id, user.admin) {
        Ok((token, expires_at)) => Ok(UserResponse {
            id: user.id,
            username: user.username,
            admin: user.admin,
            token,
            expires_at,
        }),
        Err(e) => {
            tracing::error!(error = %e, user_id = user.id, "Failed to sign token");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error("Failed to issue token")),
            )
                .into_response())
        }
    }
}

/// POST /auth/register
///
/// Register a new user and issue a token.
///
/// ### Request Body
/// ```json
/// {
///   "username": "alice",
///   "password": "strongpassword",
///   "avatar": "https://avatars.example.com/alice.png"
/// }
/// ```
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "username": "alice",
///     "admin": false,
///     "token": "jwt_token_here",
///     "expires_at": "2025-05-23T11:00:00+00:00"
///   },
///   "message": "User registered successfully"
/// }
/// ```
///
/// - `400 Bad Request` (missing field or validation failure)
/// - `409 Conflict` (username taken)
/// - `500 Internal Server Error`
pub async fn register(
    State(app_state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(mut req) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection_response::<UserResponse>(rejection),
    };

    // Length limits apply to the name as stored.
    req.username = req.username.trim().to_string();

    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(error_message)),
        )
            .into_response();
    }

    let params = CreateUser {
        username: req.username,
        password: req.password,
        avatar: Some(req.avatar),
        admin: false,
    };

    match UserService::register(app_state.db(), params).await {
        Ok(user) => match token_response(&app_state, user) {
            Ok(response) => (
                StatusCode::CREATED,
                Json(ApiResponse::success(response, "User registered successfully")),
            )
                .into_response(),
            Err(response) => response,
        },
        Err(ServiceError::Conflict(msg)) => (
            StatusCode::CONFLICT,
            Json(ApiResponse::<UserResponse>::error(msg)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to register user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error("Failed to register user")),
            )
                .into_response()
        }
    }
}

/// POST /auth/login
///
/// Authenticate an existing user and issue a JWT.
///
/// ### Request Body
/// ```json
/// {
///   "username": "alice",
///   "password": "strongpassword"
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with the same payload as registration
/// - `400 Bad Request` (missing fields)
/// - `401 Unauthorized` (`"Invalid credentials"`)
pub async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection_response::<UserResponse>(rejection),
    };

    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(error_message)),
        )
            .into_response();
    }

    let user = match UserService::verify_credentials(app_state.db(), &req.username, &req.password).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<UserResponse>::error("Invalid credentials")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to verify credentials");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error("Database error")),
            )
                .into_response();
        }
    };

    match token_response(&app_state, user) {
        Ok(response) => (
            StatusCode::OK,
            Json(ApiResponse::success(response, "Login successful")),
        )
            .into_response(),
        Err(response) => response,
    }
}
