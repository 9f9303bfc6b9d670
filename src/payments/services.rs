use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::payments::repo::Payment;
use crate::payments::status::PaymentStatus;

/// Settle a pending payment: flip it to `completed` and move the amount from
/// payer to mentor inside one database transaction. The guarded status flip
/// doubles as the double-settlement check, and the balance updates are
/// in-place arithmetic, so concurrent settlements cannot lose an update.
#[instrument(skip(db))]
pub async fn settle_payment(db: &PgPool, payment_id: Uuid) -> Result<Payment, ApiError> {
    let mut tx = db.begin().await?;

    let Some(payment) = sqlx::query_as::<_, Payment>(
        r#"
        UPDATE payments
        SET status = 'completed', updated_at = now()
        WHERE id = $1 AND status = 'pending'
        RETURNING id, payer_id, mentor_id, amount, status, created_at, updated_at
        "#,
    )
    .bind(payment_id)
    .fetch_optional(&mut *tx)
    .await?
    else {
        tx.rollback().await.ok();
        return match Payment::find_by_id(db, payment_id).await? {
            Some(p) => {
                warn!(payment_id = %payment_id, status = %p.status, "settlement rejected");
                Err(ApiError::Conflict(format!("Payment is already {}.", p.status)))
            }
            None => Err(ApiError::NotFound("Payment not found.".into())),
        };
    };

    // Debit only when the payer can cover the amount; the balance never goes
    // negative through this path.
    let debited = sqlx::query(
        r#"
        UPDATE users
        SET balance = balance - $2, updated_at = now()
        WHERE id = $1 AND balance >= $2
        "#,
    )
    .bind(payment.payer_id)
    .bind(payment.amount)
    .execute(&mut *tx)
    .await?;

    if debited.rows_affected() == 0 {
        tx.rollback().await.ok();
        // The rollback restored `pending`, so the guarded write can mark it
        // failed without racing another settle attempt.
        Payment::update_status(db, payment_id, PaymentStatus::Pending, PaymentStatus::Failed)
            .await?;
        warn!(payment_id = %payment_id, payer_id = %payment.payer_id, "insufficient balance");
        return Err(ApiError::BadRequest("Insufficient balance.".into()));
    }

    let credited = sqlx::query(
        r#"
        UPDATE users
        SET balance = balance + $2, updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(payment.mentor_id)
    .bind(payment.amount)
    .execute(&mut *tx)
    .await?;

    if credited.rows_affected() == 0 {
        tx.rollback().await.ok();
        return Err(ApiError::NotFound("Mentor not found.".into()));
    }

    tx.commit().await?;
    info!(payment_id = %payment.id, amount = %payment.amount, "payment settled");
    Ok(payment)
}
