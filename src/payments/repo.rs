use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::payments::status::PaymentStatus;

/// Payment record tying a payer to a mentor.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub payer_id: Uuid,
    pub mentor_id: Uuid,
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Payment {
    pub async fn create(
        db: &PgPool,
        payer_id: Uuid,
        mentor_id: Uuid,
        amount: Decimal,
    ) -> anyhow::Result<Payment> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (payer_id, mentor_id, amount)
            VALUES ($1, $2, $3)
            RETURNING id, payer_id, mentor_id, amount, status, created_at, updated_at
            "#,
        )
        .bind(payer_id)
        .bind(mentor_id)
        .bind(amount)
        .fetch_one(db)
        .await?;
        Ok(payment)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, payer_id, mentor_id, amount, status, created_at, updated_at
            FROM payments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(payment)
    }

    /// Compare-and-swap on the previously observed status. Returns None when
    /// the row is gone or another writer got there first.
    pub async fn update_status(
        db: &PgPool,
        id: Uuid,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> anyhow::Result<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET status = $3, updated_at = now()
            WHERE id = $1 AND status = $2
            RETURNING id, payer_id, mentor_id, amount, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(db)
        .await?;
        Ok(payment)
    }
}
