use crate::error::{ServiceError, ServiceResult};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use db::models::user::{self, Model};
use rand::rngs::OsRng;
use sea_orm::{DbConn, DbErr, SqlErr};

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub avatar: Option<String>,
    pub admin: bool,
}

pub struct UserService;

impl UserService {
    /// Stores a new user with an Argon2 password hash.
    ///
    /// Fails with [`ServiceError::Conflict`] when the username is taken, including
    /// when a concurrent registration wins the unique index race.
    pub async fn register(db: &DbConn, params: CreateUser) -> ServiceResult<Model> {
        let username = params.username.trim();

        if user::Model::find_by_username(db, username).await?.is_some() {
            return Err(ServiceError::Conflict("Username is already taken".into()));
        }

        let hash = Self::hash_password(&params.password)?;

        match user::Model::create(db, username, &hash, params.avatar.as_deref(), params.admin).await
        {
            Ok(model) => {
                tracing::info!(user_id = model.id, username = %model.username, "Registered user");
                Ok(model)
            }
            Err(err) if is_unique_violation(&err) => {
                Err(ServiceError::Conflict("Username is already taken".into()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Returns the user only when the password matches.
    pub async fn verify_credentials(
        db: &DbConn,
        username: &str,
        password: &str,
    ) -> ServiceResult<Option<Model>> {
        let username = username.trim();

        if let Some(user) = user::Model::find_by_username(db, username).await? {
            if Self::verify_password(&user, password) {
                return Ok(Some(user));
            }
        }

        Ok(None)
    }

    pub fn hash_password(password: &str) -> ServiceResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ServiceError::PasswordHash(e.to_string()))
    }

    pub fn verify_password(user: &Model, password: &str) -> bool {
        let parsed = match PasswordHash::new(&user.password_hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
