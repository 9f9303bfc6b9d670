use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Catalog entry mentors attach to their profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Skill {
    pub async fn find_by_name(db: &PgPool, name: &str) -> anyhow::Result<Option<Skill>> {
        let skill = sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, name, description, created_at
            FROM skills
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(db)
        .await?;
        Ok(skill)
    }

    pub async fn create(
        db: &PgPool,
        name: &str,
        description: Option<&str>,
    ) -> anyhow::Result<Skill> {
        let skill = sqlx::query_as::<_, Skill>(
            r#"
            INSERT INTO skills (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(db)
        .await?;
        Ok(skill)
    }

    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Skill>> {
        let skills = sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, name, description, created_at
            FROM skills
            ORDER BY name ASC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(skills)
    }
}
