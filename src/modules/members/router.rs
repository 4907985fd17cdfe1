use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{login, logout, me, refresh, signup};
use crate::state::AppState;

pub fn init_members_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/me", get(me))
}
