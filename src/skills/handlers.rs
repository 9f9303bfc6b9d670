use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    skills::{dto::CreateSkillRequest, repo::Skill},
    state::AppState,
};

pub fn skill_routes() -> Router<AppState> {
    Router::new().route("/skills", get(list_skills).post(create_skill))
}

#[instrument(skip(state))]
pub async fn list_skills(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
) -> Result<Json<Vec<Skill>>, ApiError> {
    let skills = Skill::list(&state.db).await?;
    Ok(Json(skills))
}

#[instrument(skip(state, payload))]
pub async fn create_skill(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Json(payload): Json<CreateSkillRequest>,
) -> Result<(StatusCode, Json<Skill>), ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Skill name is required.".into()));
    }

    if Skill::find_by_name(&state.db, name).await?.is_some() {
        warn!(%name, "duplicate skill");
        return Err(ApiError::Conflict("Skill already exists.".into()));
    }

    let skill = Skill::create(&state.db, name, payload.description.as_deref()).await?;
    info!(skill_id = %skill.id, name = %skill.name, "skill created");
    Ok((StatusCode::CREATED, Json(skill)))
}
