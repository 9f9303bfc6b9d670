use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // base64(salt || derived key), not exposed in JSON
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub balance: Decimal,
    pub is_mentor: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl User {
    /// Find a user by email. Comparison is case-sensitive.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, bio, profile_picture,
                   balance, is_mentor, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, bio, profile_picture,
                   balance, is_mentor, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password. Balance starts at zero.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        bio: Option<&str>,
        profile_picture: Option<&str>,
        is_mentor: bool,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, bio, profile_picture, is_mentor)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, password_hash, bio, profile_picture,
                      balance, is_mentor, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(bio)
        .bind(profile_picture)
        .bind(is_mentor)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Overwrite the stored balance. Callers reject negative values before
    /// this runs; the storage layer itself does not constrain the column.
    pub async fn set_balance(
        db: &PgPool,
        user_id: Uuid,
        new_balance: Decimal,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET balance = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, name, email, password_hash, bio, profile_picture,
                      balance, is_mentor, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(new_balance)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}
