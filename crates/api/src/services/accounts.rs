//! Registration, login and profile.

use coursehub_core::error::CoreError;
use coursehub_core::roles::role_id_for;
use coursehub_core::types::DbId;
use coursehub_db::models::user::{CreateUser, UserResponse};
use coursehub_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::auth::jwt::{generate_access_token, JwtConfig};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "email is not a valid address"))]
    pub email: String,
    pub password: String,
    /// `"student"` or `"author"`.
    pub role: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

pub async fn register(
    pool: &PgPool,
    input: &RegisterRequest,
    min_password_length: usize,
) -> AppResult<UserResponse> {
    input.validate()?;
    validate_password_strength(&input.password, min_password_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let role_id = role_id_for(&input.role).ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "role must be 'student' or 'author'".into(),
        ))
    })?;

    if UserRepo::find_by_email(pool, &input.email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            email: input.email.clone(),
            password_hash,
            role_id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");
    Ok(user.into())
}

/// Wrong email and wrong password fail with the same message.
pub async fn login(
    pool: &PgPool,
    input: &LoginRequest,
    jwt: &JwtConfig,
) -> AppResult<LoginResponse> {
    let user = UserRepo::find_by_email(pool, &input.email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let access_token = generate_access_token(user.id, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: jwt.access_token_expiry_mins * 60,
        user: user.into(),
    })
}

pub async fn profile(pool: &PgPool, user_id: DbId) -> AppResult<UserResponse> {
    let user = UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or(AppError::not_found("User", user_id))?;
    Ok(user.into())
}
