use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::certificates::handlers::certificate_handler;
use crate::features::certificates::services::CertificateService;

pub fn routes(service: Arc<CertificateService>) -> Router {
    Router::new()
        .route(
            "/api/certificates",
            get(certificate_handler::list_certificates),
        )
        .route(
            "/api/certificates/{id}/download",
            get(certificate_handler::download_certificate),
        )
        .with_state(service)
}
