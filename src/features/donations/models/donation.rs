use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::currency::Currency;

/// Donation status enum matching the `donation_status` database enum.
/// In this system donations are written directly as `paid`; the remaining
/// states exist for a future real payment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "donation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    Created,
    PaymentPending,
    Paid,
    Failed,
    Refunded,
}

impl std::fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DonationStatus::Created => write!(f, "created"),
            DonationStatus::PaymentPending => write!(f, "payment_pending"),
            DonationStatus::Paid => write!(f, "paid"),
            DonationStatus::Failed => write!(f, "failed"),
            DonationStatus::Refunded => write!(f, "refunded"),
        }
    }
}

/// Database model for a donation
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Donation {
    pub donation_id: Uuid,
    pub donor_user_id: Uuid,
    pub charity_id: Uuid,
    pub amount_cents: i64,
    pub currency: Currency,
    pub status: DonationStatus,
    pub message: Option<String>,
    pub donated_at: DateTime<Utc>,
}

/// A donation joined with its charity's display fields — the row shape the
/// analytics functions operate on.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct DonationWithCharity {
    pub donation_id: Uuid,
    pub amount_cents: i64,
    pub currency: Currency,
    pub status: DonationStatus,
    pub message: Option<String>,
    pub donated_at: DateTime<Utc>,
    pub charity_id: Uuid,
    pub charity_name: String,
    pub charity_photo_url: Option<String>,
}

/// A donation joined with its donor's display name, for the charity-side
/// dashboard.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct DonationWithDonor {
    pub donation_id: Uuid,
    pub amount_cents: i64,
    pub currency: Currency,
    pub status: DonationStatus,
    pub message: Option<String>,
    pub donated_at: DateTime<Utc>,
    pub donor_name: Option<String>,
}
