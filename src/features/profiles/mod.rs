//! User profile feature: onboarding and settings.
//!
//! A profile row gates access to the rest of the application: donation and
//! charity operations refuse callers whose onboarding is incomplete.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/profiles/me` | Yes | Fetch own profile |
//! | POST | `/api/profiles/onboarding` | Yes | Complete onboarding |
//! | PUT | `/api/profiles/me` | Yes | Update profile settings |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::ProfileService;
