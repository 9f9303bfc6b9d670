use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use rand::{distributions::Alphanumeric, Rng};
use regex::Regex;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{
            ForgotPasswordRequest, LoginRequest, LoginResponse, RegisterRequest,
            ResetPasswordRequest,
        },
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::PasswordResetToken,
    },
    error::ApiError,
    state::AppState,
    users::{dto::PublicUser, repo::User},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Name is required.".into()));
    }

    // Email equality is case-sensitive throughout; no normalization here.
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email.".into()));
    }

    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::BadRequest(
            "Password must be at least 8 characters.".into(),
        ));
    }

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered.".into()));
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        ApiError::Internal(e)
    })?;

    let user = User::create(
        &state.db,
        &payload.name,
        &payload.email,
        &hash,
        payload.bio.as_deref(),
        payload.profile_picture.as_deref(),
        payload.is_mentor,
    )
    .await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required.".into(),
        ));
    }

    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::Unauthorized("User not found.".into())
        })?;

    if !verify_password(&payload.password, &user.password_hash) {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Incorrect password!".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(&user).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        ApiError::Internal(e)
    })?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".into()))?;

    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect();
    PasswordResetToken::create(&state.db, user.id, &token).await?;

    // Delivery is not awaited; a failed send does not fail the request.
    let mailer = state.mailer.clone();
    let email = user.email.clone();
    tokio::spawn(async move {
        if let Err(e) = mailer.send_password_reset(&email, &token).await {
            warn!(error = %e, "password reset email failed");
        }
    });

    info!(user_id = %user.id, "password reset requested");
    Ok(Json(serde_json::json!({
        "message": "Password reset email sent."
    })))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if payload.new_password.len() < 8 {
        return Err(ApiError::BadRequest(
            "Password must be at least 8 characters.".into(),
        ));
    }

    let reset = PasswordResetToken::find_valid(&state.db, &payload.token)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Invalid or expired token.".into()))?;

    let hash = hash_password(&payload.new_password).map_err(ApiError::Internal)?;

    // Hash swap and token consumption commit together
    let mut tx = state.db.begin().await?;
    sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
        .bind(reset.user_id)
        .bind(&hash)
        .execute(&mut *tx)
        .await?;
    PasswordResetToken::delete(&mut tx, reset.id).await?;
    tx.commit().await?;

    info!(user_id = %reset.user_id, "password reset completed");
    Ok(Json(serde_json::json!({ "message": "Password changed." })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex_accepts_plausible_addresses() {
        assert!(is_valid_email("mentor@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.io"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email(""));
    }
}
