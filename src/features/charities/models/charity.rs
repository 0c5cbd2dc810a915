use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::currency::Currency;

/// Charity status enum matching the `charity_status` database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "charity_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CharityStatus {
    Draft,
    PendingReview,
    Approved,
    Rejected,
    Suspended,
}

impl std::fmt::Display for CharityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharityStatus::Draft => write!(f, "draft"),
            CharityStatus::PendingReview => write!(f, "pending_review"),
            CharityStatus::Approved => write!(f, "approved"),
            CharityStatus::Rejected => write!(f, "rejected"),
            CharityStatus::Suspended => write!(f, "suspended"),
        }
    }
}

/// Presentation attributes for a status, used by clients to render badges.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusBadge {
    pub label: &'static str,
    pub background: &'static str,
    pub text: &'static str,
}

impl CharityStatus {
    /// Total status → badge mapping. Every status renders; callers never
    /// branch on status themselves.
    pub fn badge(&self) -> StatusBadge {
        match self {
            CharityStatus::PendingReview => StatusBadge {
                label: "Pending Review",
                background: "#FEF3C7",
                text: "#92400E",
            },
            CharityStatus::Approved => StatusBadge {
                label: "Approved",
                background: "#D1FAE5",
                text: "#065F46",
            },
            CharityStatus::Rejected => StatusBadge {
                label: "Rejected",
                background: "#FEE2E2",
                text: "#991B1B",
            },
            CharityStatus::Suspended => StatusBadge {
                label: "Suspended",
                background: "#E5E7EB",
                text: "#374151",
            },
            // Draft is never shown in review queues; plain fallback styling
            CharityStatus::Draft => StatusBadge {
                label: "Draft",
                background: "#F3F4F6",
                text: "#6B7280",
            },
        }
    }
}

/// Role on the charity ↔ user join, matching `charity_user_role`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "charity_user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CharityUserRole {
    Owner,
    Admin,
    Viewer,
}

/// Database model for a charity application/profile
#[derive(Debug, Clone, FromRow)]
pub struct Charity {
    pub charity_id: Uuid,
    pub status: CharityStatus,
    pub public_name: String,
    pub legal_name: Option<String>,
    pub registration_number: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub currency: Currency,
    pub photo_url: Option<String>,
    pub rejection_reason: Option<String>,
    pub admin_notes: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Database model for the charity ↔ user join (the owner link)
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct CharityUser {
    pub charity_id: Uuid,
    pub user_id: Uuid,
    pub role: CharityUserRole,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_matches_db_values() {
        assert_eq!(CharityStatus::PendingReview.to_string(), "pending_review");
        assert_eq!(CharityStatus::Approved.to_string(), "approved");
        assert_eq!(CharityStatus::Rejected.to_string(), "rejected");
    }

    #[test]
    fn test_every_status_has_a_badge() {
        for status in [
            CharityStatus::Draft,
            CharityStatus::PendingReview,
            CharityStatus::Approved,
            CharityStatus::Rejected,
            CharityStatus::Suspended,
        ] {
            let badge = status.badge();
            assert!(!badge.label.is_empty());
            assert!(badge.background.starts_with('#'));
            assert!(badge.text.starts_with('#'));
        }
    }

    #[test]
    fn test_badge_labels() {
        assert_eq!(CharityStatus::PendingReview.badge().label, "Pending Review");
        assert_eq!(CharityStatus::Suspended.badge().label, "Suspended");
    }
}
