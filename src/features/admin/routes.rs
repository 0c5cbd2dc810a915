use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::admin::handlers::admin_handler;
use crate::features::charities::services::CharityService;

/// Create admin routes (all require admin access)
pub fn routes(charity_service: Arc<CharityService>) -> Router {
    Router::new()
        .route("/charities", get(admin_handler::list_charities))
        .route("/charities/{id}", get(admin_handler::get_charity))
        .route("/charities/{id}/approve", post(admin_handler::approve_charity))
        .route("/charities/{id}/reject", post(admin_handler::reject_charity))
        .with_state(charity_service)
}
