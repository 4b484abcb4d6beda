//! Application state container shared across Axum route handlers and services.
//!
//! This struct holds shared resources such as the database connection, the JWT keys
//! and the attachment store. It is cloned into every handler via Axum's `State<T>`
//! extractor; all members are cheap to clone.

use crate::storage::AttachmentStore;
use jsonwebtoken::{DecodingKey, EncodingKey};
use sea_orm::DatabaseConnection;

/// Central application state shared across the server.
///
/// This includes:
/// - A cloned, thread-safe database connection for use with SeaORM.
/// - The HS256 keys used to issue and verify access tokens.
/// - The filesystem store that holds reply attachments.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    jwt_encoding_key: EncodingKey,
    jwt_decoding_key: DecodingKey,
    jwt_duration_minutes: i64,
    storage: AttachmentStore,
    base_url: Option<String>,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `db` - A SeaORM `DatabaseConnection`, typically cloned from the main pool.
    /// * `jwt_secret` - Shared secret for signing and verifying tokens.
    /// * `jwt_duration_minutes` - Lifetime of issued tokens.
    /// * `storage` - Where uploaded attachments are written to and served from.
    pub fn new(
        db: DatabaseConnection,
        jwt_secret: &str,
        jwt_duration_minutes: i64,
        storage: AttachmentStore,
    ) -> Self {
        Self {
            db,
            jwt_encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            jwt_decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            jwt_duration_minutes,
            storage,
            base_url: None,
        }
    }

    /// Sets the public base URL used when building attachment links.
    ///
    /// When unset, handlers fall back to the scheme and `Host` of the incoming request.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    ///
    /// This is ideal when the caller does not need ownership.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.jwt_encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.jwt_decoding_key
    }

    pub fn jwt_duration_minutes(&self) -> i64 {
        self.jwt_duration_minutes
    }

    pub fn storage(&self) -> &AttachmentStore {
        &self.storage
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }
}
