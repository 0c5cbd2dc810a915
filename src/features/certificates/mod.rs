//! Tax certificates (read-only).
//!
//! Certificates are issued externally per charity and tax year; donors can
//! list their own and download the document once it is available.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/certificates` | donor | Own certificates |
//! | GET | `/api/certificates/{id}/download` | donor | Presigned document URL |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::CertificateService;
