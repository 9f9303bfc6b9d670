use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// One-hour recovery token. Deleted when the password change succeeds;
/// expired rows are left in place and filtered out on read.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: OffsetDateTime,
}

pub const RESET_TOKEN_TTL: Duration = Duration::hours(1);

impl PasswordResetToken {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        token: &str,
    ) -> anyhow::Result<PasswordResetToken> {
        let row = sqlx::query_as::<_, PasswordResetToken>(
            r#"
            INSERT INTO password_reset_tokens (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token, expires_at
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(OffsetDateTime::now_utc() + RESET_TOKEN_TTL)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn find_valid(
        db: &PgPool,
        token: &str,
    ) -> anyhow::Result<Option<PasswordResetToken>> {
        let row = sqlx::query_as::<_, PasswordResetToken>(
            r#"
            SELECT id, user_id, token, expires_at
            FROM password_reset_tokens
            WHERE token = $1 AND expires_at > now()
            "#,
        )
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM password_reset_tokens WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
