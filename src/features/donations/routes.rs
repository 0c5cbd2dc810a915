use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::donations::handlers::donation_handler;
use crate::features::donations::services::DonationService;

pub fn routes(service: Arc<DonationService>) -> Router {
    Router::new()
        .route(
            "/api/donations",
            post(donation_handler::create_donation).get(donation_handler::list_my_donations),
        )
        .route("/api/donations/summary", get(donation_handler::get_summary))
        .route("/api/donations/export", get(donation_handler::export_csv))
        .route(
            "/api/charities/{id}/donations",
            get(donation_handler::list_charity_donations),
        )
        .with_state(service)
}
