use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::profiles::handlers::profile_handler;
use crate::features::profiles::services::ProfileService;

pub fn routes(service: Arc<ProfileService>) -> Router {
    Router::new()
        .route(
            "/api/profiles/me",
            get(profile_handler::get_me).put(profile_handler::update_me),
        )
        .route(
            "/api/profiles/onboarding",
            post(profile_handler::complete_onboarding),
        )
        .with_state(service)
}
