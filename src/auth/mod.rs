use crate::state::AppState;
use axum::Router;

mod dto;
pub mod errors;
pub mod handlers;
pub mod notifier;
pub mod password;
pub mod repo;
pub mod services;
pub mod user;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::account_routes())
}
