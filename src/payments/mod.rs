use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod repo;
pub mod services;
pub mod status;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::payment_routes())
}
