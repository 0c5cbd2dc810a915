#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
#[allow(dead_code)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: Uuid::new_v4(),
        roles: vec!["admin".to_string()],
    }
}

#[cfg(test)]
#[allow(dead_code)]
pub fn create_donor_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: Uuid::new_v4(),
        roles: vec!["donor".to_string()],
    }
}

#[cfg(test)]
#[allow(dead_code)]
pub fn create_charity_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: Uuid::new_v4(),
        roles: vec!["charity".to_string()],
    }
}
