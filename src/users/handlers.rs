use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    state::AppState,
    users::{
        dto::{BalanceResponse, PublicUser, UpdateBalanceRequest},
        repo::User,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/users/:id", get(get_user))
        .route("/users/:id/balance", patch(update_balance))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found.".into()))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".into()))?;
    Ok(Json(user.into()))
}

/// Runs before any query; a rejected value never reaches the store.
pub(crate) fn validate_new_balance(balance: Option<Decimal>) -> Result<Decimal, ApiError> {
    let balance = balance.ok_or_else(|| ApiError::BadRequest("Balance is required.".into()))?;
    if balance < Decimal::ZERO {
        return Err(ApiError::BadRequest("Balance cannot be negative.".into()));
    }
    Ok(balance)
}

#[instrument(skip(state, payload))]
pub async fn update_balance(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBalanceRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let new_balance = validate_new_balance(payload.balance).map_err(|e| {
        warn!(user_id = %id, "balance update rejected");
        e
    })?;

    let user = User::set_balance(&state.db, id, new_balance)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".into()))?;

    info!(user_id = %user.id, balance = %user.balance, "balance updated");
    Ok(Json(BalanceResponse {
        balance: user.balance,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_balance_is_a_client_error() {
        let err = validate_new_balance(None).unwrap_err();
        assert_eq!(err.to_string(), "Balance is required.");
    }

    #[test]
    fn negative_balance_is_a_client_error() {
        let err = validate_new_balance(Some(Decimal::new(-1, 0))).unwrap_err();
        assert_eq!(err.to_string(), "Balance cannot be negative.");
    }

    #[test]
    fn zero_and_positive_balances_pass() {
        assert_eq!(validate_new_balance(Some(Decimal::ZERO)).unwrap(), Decimal::ZERO);
        assert_eq!(
            validate_new_balance(Some(Decimal::new(705, 1))).unwrap(),
            Decimal::new(705, 1)
        );
    }
}
