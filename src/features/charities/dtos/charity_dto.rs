use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::charities::models::{Charity, CharityStatus};
use crate::shared::currency::Currency;

/// Request DTO for a charity application. Arrives as multipart form fields
/// alongside an optional photo part.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharityApplicationDto {
    #[validate(length(min = 1, max = 200, message = "Public name is required"))]
    pub public_name: String,

    #[validate(length(min = 1, max = 200, message = "Legal name is required"))]
    pub legal_name: String,

    #[validate(
        length(min = 1, max = 64, message = "Registration number is required"),
        regex(
            path = "*crate::shared::validation::REGISTRATION_NUMBER_REGEX",
            message = "Registration number may contain alphanumeric segments joined by '-' or '/'"
        )
    )]
    pub registration_number: String,

    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,

    #[validate(email(message = "Invalid contact email"))]
    pub contact_email: String,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Invalid contact phone number"
    ))]
    pub contact_phone: Option<String>,

    /// Currency donations to this charity are recorded in (default USD)
    pub currency: Option<Currency>,
}

/// An uploaded photo carried alongside an application or photo-replacement
/// request.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub data: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

impl PhotoUpload {
    /// File extension for the storage key, from the original filename with a
    /// fallback derived from the content type.
    pub fn extension(&self) -> &str {
        let from_name = self.file_name.rsplit('.').next();
        match from_name {
            Some(ext) if !ext.is_empty() && ext != self.file_name => ext,
            _ => match self.content_type.as_str() {
                "image/png" => "png",
                "image/webp" => "webp",
                _ => "jpg",
            },
        }
    }
}

/// Request DTO for approving a charity
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApproveCharityDto {
    #[validate(length(max = 5000, message = "Admin notes must not exceed 5000 characters"))]
    pub admin_notes: Option<String>,
}

/// Request DTO for rejecting a charity
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RejectCharityDto {
    /// Shown to the charity owner; required, must not be blank
    #[validate(length(min = 1, max = 5000, message = "Rejection reason is required"))]
    pub rejection_reason: String,

    #[validate(length(max = 5000, message = "Admin notes must not exceed 5000 characters"))]
    pub admin_notes: Option<String>,
}

/// Admin listing filter: an exact status or "all"
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct CharityStatusFilter {
    /// Exact status to keep; omit for all statuses
    pub status: Option<CharityStatus>,
}

/// Serializable status badge
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusBadgeDto {
    pub label: String,
    pub background: String,
    pub text: String,
}

impl From<CharityStatus> for StatusBadgeDto {
    fn from(status: CharityStatus) -> Self {
        let badge = status.badge();
        Self {
            label: badge.label.to_string(),
            background: badge.background.to_string(),
            text: badge.text.to_string(),
        }
    }
}

/// Response DTO for a charity as its owner (or an admin) sees it
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharityResponseDto {
    pub charity_id: Uuid,
    pub status: CharityStatus,
    pub badge: StatusBadgeDto,
    pub public_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Charity> for CharityResponseDto {
    fn from(c: Charity) -> Self {
        Self {
            charity_id: c.charity_id,
            status: c.status,
            badge: c.status.into(),
            public_name: c.public_name,
            legal_name: c.legal_name,
            registration_number: c.registration_number,
            description: c.description,
            website: c.website,
            contact_email: c.contact_email,
            contact_phone: c.contact_phone,
            currency: c.currency,
            photo_url: c.photo_url,
            rejection_reason: c.rejection_reason,
            approved_at: c.approved_at,
            created_at: c.created_at,
        }
    }
}

/// Response DTO for the public (donor-facing) charity listing
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharitySummaryDto {
    pub charity_id: Uuid,
    pub public_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

impl From<Charity> for CharitySummaryDto {
    fn from(c: Charity) -> Self {
        Self {
            charity_id: c.charity_id,
            public_name: c.public_name,
            description: c.description,
            website: c.website,
            photo_url: c.photo_url,
            currency: c.currency,
            created_at: c.created_at,
        }
    }
}

/// Response DTO for the admin review queue, annotated with resolved names
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminCharityDto {
    pub charity_id: Uuid,
    pub status: CharityStatus,
    pub badge: StatusBadgeDto,
    pub public_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AdminCharityDto {
    pub fn from_charity(
        c: Charity,
        owner_name: Option<String>,
        reviewer_name: Option<String>,
    ) -> Self {
        Self {
            charity_id: c.charity_id,
            status: c.status,
            badge: c.status.into(),
            public_name: c.public_name,
            legal_name: c.legal_name,
            registration_number: c.registration_number,
            description: c.description,
            website: c.website,
            contact_email: c.contact_email,
            contact_phone: c.contact_phone,
            currency: c.currency,
            photo_url: c.photo_url,
            rejection_reason: c.rejection_reason,
            admin_notes: c.admin_notes,
            owner_name,
            reviewer_name,
            reviewed_at: c.reviewed_at,
            approved_at: c.approved_at,
            created_at: c.created_at,
        }
    }
}

/// Status tallies over the whole application list
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

/// Admin listing response: applications (optionally filtered) plus tallies
/// over the unfiltered list
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminCharityListDto {
    pub charities: Vec<AdminCharityDto>,
    pub counts: StatusCounts,
}
