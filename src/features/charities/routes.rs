use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::charities::handlers::charity_handler;
use crate::features::charities::services::CharityService;

/// Anonymous read paths: the approved-charity listing and detail
pub fn public_routes(service: Arc<CharityService>) -> Router {
    Router::new()
        .route("/api/charities", get(charity_handler::list_charities))
        .route("/api/charities/{id}", get(charity_handler::get_charity))
        .with_state(service)
}

/// Authenticated charity-role paths
pub fn routes(service: Arc<CharityService>) -> Router {
    Router::new()
        .route(
            "/api/charities/apply",
            post(charity_handler::submit_application),
        )
        .route("/api/charities/mine", get(charity_handler::get_my_charity))
        .route(
            "/api/charities/{id}/photo",
            post(charity_handler::upload_photo),
        )
        .with_state(service)
}
