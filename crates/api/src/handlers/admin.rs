//! Handlers for the `/admin` resource (sign-up, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bulletin_core::error::CoreError;
use bulletin_core::validation::{normalize_email, validate_email, validate_min_len, validate_password};
use bulletin_db::models::user::{CreateUser, PublicUser};
use bulletin_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::state::AppState;

/// Login failures use one message for both unknown email and wrong password
/// so responses do not reveal which check failed.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Treat absent and empty-string fields identically.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/signup`.
///
/// Fields are optional so a missing field produces the domain error message
/// instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Request body for `POST /admin/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response for `POST /admin/signup`.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: PublicUser,
    pub token: String,
}

/// Response for `POST /admin/login`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(rename = "loggedInUser")]
    pub logged_in_user: PublicUser,
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /admin/signup
///
/// Register an admin account. Returns the redacted user view plus a bearer
/// token so the frontend can log the caller straight in.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    let (Some(email), Some(password), Some(name)) = (
        non_empty(input.email),
        non_empty(input.password),
        non_empty(input.name),
    ) else {
        return Err(AppError::Core(CoreError::Validation(
            "All fields are required".into(),
        )));
    };

    let email = normalize_email(&email);
    validate_email(&email)?;
    validate_min_len("Name", &name)?;
    validate_password(&password)?;

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let created = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
            name,
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e, "uq_users_email") {
            AppError::Core(CoreError::Conflict("Email is already registered".into()))
        } else {
            AppError::Database(e)
        }
    })?;

    let token = generate_token(created.id, &created.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user: PublicUser::from(&created),
            token,
        }),
    ))
}

/// POST /admin/login
///
/// Authenticate with email + password. Returns the redacted user view plus
/// a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (Some(email), Some(password)) = (non_empty(input.email), non_empty(input.password))
    else {
        return Err(AppError::Core(CoreError::Validation(
            "Both email and password are required".into(),
        )));
    };

    let email = normalize_email(&email);
    validate_email(&email)?;

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let token = generate_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(LoginResponse {
        logged_in_user: PublicUser::from(&user),
        token,
    }))
}
