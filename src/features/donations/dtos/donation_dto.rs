use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::donations::models::{
    Donation, DonationStatus, DonationWithCharity, DonationWithDonor,
};
use crate::features::donations::services::analytics::{CharityTotal, MonthlyTotal};
use crate::shared::currency::{format_amount, Currency};

/// Request DTO for recording a donation. The amount is the major-unit
/// decimal string the donor typed ("25.5"), converted to cents server-side.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationDto {
    pub charity_id: Uuid,

    #[validate(length(min = 1, max = 32, message = "Amount is required"))]
    pub amount: String,

    #[validate(length(max = 1000, message = "Message must not exceed 1000 characters"))]
    pub message: Option<String>,
}

/// Query parameters for the CSV export
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DonationExportParams {
    /// Keep only donations to this charity
    pub charity_id: Option<Uuid>,
    /// Keep only donations made in this calendar year
    pub year: Option<i32>,
}

/// Response DTO for a newly recorded donation
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponseDto {
    pub donation_id: Uuid,
    pub charity_id: Uuid,
    pub charity_name: String,
    pub amount_cents: i64,
    /// Display-only rendering; never parsed back
    pub amount_formatted: String,
    pub currency: Currency,
    pub status: DonationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub donated_at: DateTime<Utc>,
}

impl DonationResponseDto {
    pub fn from_donation(d: Donation, charity_name: String) -> Self {
        Self {
            donation_id: d.donation_id,
            charity_id: d.charity_id,
            charity_name,
            amount_cents: d.amount_cents,
            amount_formatted: format_amount(d.amount_cents, d.currency),
            currency: d.currency,
            status: d.status,
            message: d.message,
            donated_at: d.donated_at,
        }
    }
}

/// Response DTO for one entry in the donor's history
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationWithCharityDto {
    pub donation_id: Uuid,
    pub charity_id: Uuid,
    pub charity_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charity_photo_url: Option<String>,
    pub amount_cents: i64,
    pub amount_formatted: String,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub donated_at: DateTime<Utc>,
}

impl From<DonationWithCharity> for DonationWithCharityDto {
    fn from(d: DonationWithCharity) -> Self {
        Self {
            donation_id: d.donation_id,
            charity_id: d.charity_id,
            charity_name: d.charity_name,
            charity_photo_url: d.charity_photo_url,
            amount_cents: d.amount_cents,
            amount_formatted: format_amount(d.amount_cents, d.currency),
            currency: d.currency,
            message: d.message,
            donated_at: d.donated_at,
        }
    }
}

/// Response DTO for one entry in the charity's received-donations list
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationWithDonorDto {
    pub donation_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_name: Option<String>,
    pub amount_cents: i64,
    pub amount_formatted: String,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub donated_at: DateTime<Utc>,
}

impl From<DonationWithDonor> for DonationWithDonorDto {
    fn from(d: DonationWithDonor) -> Self {
        Self {
            donation_id: d.donation_id,
            donor_name: d.donor_name,
            amount_cents: d.amount_cents,
            amount_formatted: format_amount(d.amount_cents, d.currency),
            currency: d.currency,
            message: d.message,
            donated_at: d.donated_at,
        }
    }
}

/// One ranked charity in the donor summary
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharityTotalDto {
    pub charity_id: Uuid,
    pub name: String,
    pub amount_cents: i64,
}

impl From<CharityTotal> for CharityTotalDto {
    fn from(t: CharityTotal) -> Self {
        Self {
            charity_id: t.charity_id,
            name: t.name,
            amount_cents: t.amount_cents,
        }
    }
}

/// One calendar-month bucket in the donor summary
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotalDto {
    pub month: String,
    pub amount_cents: i64,
}

impl From<MonthlyTotal> for MonthlyTotalDto {
    fn from(t: MonthlyTotal) -> Self {
        Self {
            month: t.month_label,
            amount_cents: t.amount_cents,
        }
    }
}

/// Derived analytics for the donor dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonorSummaryDto {
    pub total_amount_cents: i64,
    pub donation_count: i64,
    pub top_charities: Vec<CharityTotalDto>,
    pub monthly_totals: Vec<MonthlyTotalDto>,
    pub tax_year_total_cents: i64,
}

impl DonorSummaryDto {
    pub fn new(
        total_amount_cents: i64,
        donation_count: i64,
        top_charities: Vec<CharityTotal>,
        monthly_totals: Vec<MonthlyTotal>,
        tax_year_total_cents: i64,
    ) -> Self {
        Self {
            total_amount_cents,
            donation_count,
            top_charities: top_charities.into_iter().map(Into::into).collect(),
            monthly_totals: monthly_totals.into_iter().map(Into::into).collect(),
            tax_year_total_cents,
        }
    }
}

/// Donations received by a charity, with the running total
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharityDonationsDto {
    pub donations: Vec<DonationWithDonorDto>,
    pub total_amount_cents: i64,
}

impl CharityDonationsDto {
    pub fn from_rows(rows: Vec<DonationWithDonor>) -> Self {
        let total_amount_cents = rows.iter().map(|d| d.amount_cents).sum();
        Self {
            donations: rows.into_iter().map(Into::into).collect(),
            total_amount_cents,
        }
    }
}
