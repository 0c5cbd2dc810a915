use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::{ROLE_ADMIN, ROLE_CHARITY, ROLE_DONOR};

/// The verified caller identity, inserted into request extensions by the
/// auth middleware and passed explicitly into every service call.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if user has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check if user is an administrator
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// Check if user is a donor
    pub fn is_donor(&self) -> bool {
        self.has_role(ROLE_DONOR)
    }

    /// Check if user acts for a charity organization
    pub fn is_charity(&self) -> bool {
        self.has_role(ROLE_CHARITY)
    }
}

/// Raw JWT claims as issued by the external identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID (UUID string)
    pub sub: String,
    pub iss: String,
    pub exp: i64,
    #[serde(default)]
    pub roles: Vec<String>,
}
