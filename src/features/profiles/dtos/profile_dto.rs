use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::profiles::models::{Profile, UserRole};

/// Request DTO for completing onboarding
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteOnboardingDto {
    pub role: UserRole,

    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// National identity number, used on tax certificates
    #[validate(length(max = 32, message = "ID number must not exceed 32 characters"))]
    pub id_number: Option<String>,

    /// Revenue-service taxpayer reference
    #[validate(length(max = 32, message = "Tax reference must not exceed 32 characters"))]
    pub tax_reference: Option<String>,

    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub mobile_number: Option<String>,

    /// Where the user heard about us
    pub marketing_source: Option<String>,
}

/// Request DTO for updating profile settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: Option<String>,

    #[validate(length(max = 32, message = "ID number must not exceed 32 characters"))]
    pub id_number: Option<String>,

    #[validate(length(max = 32, message = "Tax reference must not exceed 32 characters"))]
    pub tax_reference: Option<String>,

    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub mobile_number: Option<String>,
}

/// Response DTO for a profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponseDto {
    pub user_id: Uuid,
    pub role: UserRole,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponseDto {
    fn from(p: Profile) -> Self {
        let display_name = p.display_name();
        Self {
            user_id: p.user_id,
            role: p.role,
            display_name,
            first_name: p.first_name,
            last_name: p.last_name,
            email: p.email,
            id_number: p.id_number,
            tax_reference: p.tax_reference,
            address_line1: p.address_line1,
            address_line2: p.address_line2,
            city: p.city,
            province: p.province,
            postal_code: p.postal_code,
            mobile_number: p.mobile_number,
            onboarding_completed_at: p.onboarding_completed_at,
            created_at: p.created_at,
        }
    }
}
