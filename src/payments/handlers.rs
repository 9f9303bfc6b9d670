use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    payments::{
        dto::{CreatePaymentRequest, PaymentResponse, UpdateStatusRequest},
        repo::Payment,
        services::settle_payment,
    },
    state::AppState,
    users::repo::User,
};

pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/payments", post(create_payment))
        .route("/payments/:id", get(get_payment))
        .route("/payments/:id/status", patch(update_status))
        .route("/payments/:id/settle", post(settle))
}

pub(crate) fn validate_amount(amount: Decimal) -> Result<(), ApiError> {
    if amount <= Decimal::ZERO {
        return Err(ApiError::BadRequest(
            "Amount must be a positive number greater than zero.".into(),
        ));
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn create_payment(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Json(payload): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), ApiError> {
    validate_amount(payload.amount)?;

    if User::find_by_id(&state.db, payload.payer_id).await?.is_none() {
        return Err(ApiError::NotFound("Payer not found.".into()));
    }
    if User::find_by_id(&state.db, payload.mentor_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Mentor not found.".into()));
    }

    let payment = Payment::create(
        &state.db,
        payload.payer_id,
        payload.mentor_id,
        payload.amount,
    )
    .await?;

    info!(payment_id = %payment.id, amount = %payment.amount, "payment created");
    Ok((StatusCode::CREATED, Json(payment.into())))
}

#[instrument(skip(state))]
pub async fn get_payment(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment = Payment::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Payment not found.".into()))?;
    Ok(Json(payment.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment = Payment::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Payment not found.".into()))?;

    if !payment.status.can_transition(payload.status) {
        warn!(payment_id = %id, from = %payment.status, to = %payload.status, "illegal status transition");
        return Err(ApiError::BadRequest(format!(
            "Cannot change payment status from {} to {}.",
            payment.status, payload.status
        )));
    }

    // CAS on the status we just read; a concurrent writer surfaces as 409
    let updated = Payment::update_status(&state.db, id, payment.status, payload.status)
        .await?
        .ok_or_else(|| ApiError::Conflict("Payment status changed concurrently.".into()))?;

    info!(payment_id = %updated.id, status = %updated.status, "payment status updated");
    Ok(Json(updated.into()))
}

#[instrument(skip(state))]
pub async fn settle(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment = settle_payment(&state.db, id).await?;
    Ok(Json(payment.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        for bad in [Decimal::ZERO, Decimal::new(-1, 0), Decimal::new(-1, 2)] {
            let err = validate_amount(bad).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Amount must be a positive number greater than zero."
            );
        }
    }

    #[test]
    fn one_cent_is_accepted() {
        assert!(validate_amount(Decimal::new(1, 2)).is_ok());
    }
}
