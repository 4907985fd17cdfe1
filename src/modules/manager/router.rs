use axum::{Router, routing::get};

use super::controller::list_members;
use crate::state::AppState;

pub fn init_manager_router() -> Router<AppState> {
    Router::new().route("/members", get(list_members))
}
