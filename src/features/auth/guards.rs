//! Role-based authorization guards for the application.
//!
//! These guards extract the authenticated user and verify they have the
//! required role. The data-access layer relies on the following contracts,
//! enforced here and by ownership checks inside the services:
//!
//! - Anonymous and donor callers may only read charities with
//!   status = approved.
//! - A donor may only read their own donation and tax certificate rows.
//! - A charity owner may only mutate their own charity's pre-review fields
//!   and read donations made to that charity.
//! - Only admins may read the full charity list or mutate status,
//!   reviewed_by/reviewed_at, rejection_reason and admin_notes.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for admin-only endpoints (charity review, admin listings).
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}

/// Guard for donor endpoints (donating, donation history, certificates).
pub struct RequireDonor(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireDonor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_donor() && !user.is_admin() {
            return Err(AppError::Forbidden("Donor access required".to_string()));
        }

        Ok(RequireDonor(user.clone()))
    }
}

/// Guard for charity-role endpoints (application submission, owned-charity
/// dashboard). Ownership of a specific charity is checked by the services.
pub struct RequireCharity(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireCharity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_charity() && !user.is_admin() {
            return Err(AppError::Forbidden(
                "Charity organization access required".to_string(),
            ));
        }

        Ok(RequireCharity(user.clone()))
    }
}

/// Guard for any authenticated caller (profile endpoints).
pub struct RequireUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        Ok(RequireUser(user.clone()))
    }
}
