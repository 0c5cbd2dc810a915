//! Donations: creation, history, derived analytics and CSV export.
//!
//! Donations are simulated: they are recorded directly in `paid` status and
//! are immutable afterwards. All derived views (totals, monthly buckets,
//! top charities, tax-year window) are pure functions in
//! [`services::analytics`] over rows already fetched.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/donations` | donor | Record a donation |
//! | GET | `/api/donations` | donor | Own donation history |
//! | GET | `/api/donations/summary` | donor | Derived analytics |
//! | GET | `/api/donations/export` | donor | CSV download |
//! | GET | `/api/charities/{id}/donations` | owner | Donations received |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::DonationService;
