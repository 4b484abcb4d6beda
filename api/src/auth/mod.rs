pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims};

use chrono::{Duration, Utc};
use jsonwebtoken::{Header, encode};
use util::state::AppState;

/// Generates a JWT and its expiry timestamp for a given user.
///
/// The token is signed with the key held in `AppState` and lives for the
/// configured number of minutes.
pub fn generate_jwt(
    app_state: &AppState,
    user_id: i64,
    admin: bool,
) -> Result<(String, String), jsonwebtoken::errors::Error> {
    let expiry = Utc::now() + Duration::minutes(app_state.jwt_duration_minutes());

    let claims = Claims {
        sub: user_id,
        admin,
        exp: expiry.timestamp() as usize,
    };

    let token = encode(&Header::default(), &claims, app_state.encoding_key())?;

    Ok((token, expiry.to_rfc3339()))
}
