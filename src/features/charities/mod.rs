//! Charity application lifecycle.
//!
//! A charity application is submitted by a charity-role user, lands in
//! `pending_review`, and is approved or rejected by an admin with reviewer
//! metadata. Only approved charities are visible to donors.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/charities` | No | Approved charities, newest first |
//! | GET | `/api/charities/{id}` | No | One approved charity |
//! | POST | `/api/charities/apply` | charity | Submit application (multipart) |
//! | GET | `/api/charities/mine` | charity | Owned charity |
//! | POST | `/api/charities/{id}/photo` | charity | Upload/replace photo |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::{public_routes, routes};
pub use services::CharityService;
