use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// User role enum matching the `user_role` database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Donor,
    Charity,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Donor => write!(f, "donor"),
            UserRole::Charity => write!(f, "charity"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

/// Database model for a user profile
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Profile {
    pub user_id: Uuid,
    pub role: UserRole,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub id_number: Option<String>,
    pub tax_reference: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub mobile_number: Option<String>,
    pub email: Option<String>,
    pub marketing_source: Option<String>,
    pub onboarding_completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// First name for greetings, falling back to the first word of
    /// `full_name`, then to "there".
    #[allow(dead_code)]
    pub fn greeting_name(&self) -> String {
        if let Some(first) = &self.first_name {
            if !first.is_empty() {
                return first.clone();
            }
        }

        if let Some(full) = &self.full_name {
            if let Some(first) = full.split_whitespace().next() {
                return first.to_string();
            }
        }

        "there".to_string()
    }

    /// Display name: `first_name last_name`, else `first_name`, else the
    /// stored `full_name`, else empty.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                format!("{} {}", first, last)
            }
            (Some(first), _) if !first.is_empty() => first.clone(),
            _ => self.full_name.clone().unwrap_or_default(),
        }
    }

    pub fn is_onboarded(&self) -> bool {
        self.onboarding_completed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_profile() -> Profile {
        Profile {
            user_id: Uuid::new_v4(),
            role: UserRole::Donor,
            full_name: None,
            first_name: None,
            last_name: None,
            id_number: None,
            tax_reference: None,
            address_line1: None,
            address_line2: None,
            city: None,
            province: None,
            postal_code: None,
            mobile_number: None,
            email: None,
            marketing_source: None,
            onboarding_completed_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_greeting_name_prefers_first_name() {
        let mut p = blank_profile();
        p.first_name = Some("Thandi".to_string());
        p.full_name = Some("Somebody Else".to_string());
        assert_eq!(p.greeting_name(), "Thandi");
    }

    #[test]
    fn test_greeting_name_falls_back_to_full_name() {
        let mut p = blank_profile();
        p.full_name = Some("Thandi Nkosi".to_string());
        assert_eq!(p.greeting_name(), "Thandi");
    }

    #[test]
    fn test_greeting_name_default() {
        assert_eq!(blank_profile().greeting_name(), "there");
    }

    #[test]
    fn test_display_name_combines_parts() {
        let mut p = blank_profile();
        p.first_name = Some("Thandi".to_string());
        p.last_name = Some("Nkosi".to_string());
        assert_eq!(p.display_name(), "Thandi Nkosi");

        p.last_name = None;
        assert_eq!(p.display_name(), "Thandi");

        p.first_name = None;
        p.full_name = Some("T. Nkosi".to_string());
        assert_eq!(p.display_name(), "T. Nkosi");

        p.full_name = None;
        assert_eq!(p.display_name(), "");
    }
}
