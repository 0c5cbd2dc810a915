//! Admin review queue for charity applications.
//!
//! All endpoints require the admin role and are nested under `/api/admin`.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/admin/charities` | All applications with owner names and tallies |
//! | GET | `/api/admin/charities/{id}` | One application |
//! | POST | `/api/admin/charities/{id}/approve` | Approve a pending application |
//! | POST | `/api/admin/charities/{id}/reject` | Reject a pending application |

pub mod handlers;
pub mod routes;

pub use routes::routes;
