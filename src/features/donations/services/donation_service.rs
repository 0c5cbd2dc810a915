use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::charities::models::{Charity, CharityStatus};
use crate::features::donations::dtos::{
    CharityDonationsDto, CreateDonationDto, DonationResponseDto, DonorSummaryDto,
};
use crate::features::donations::models::{Donation, DonationWithCharity, DonationWithDonor};
use crate::features::donations::services::analytics;
use crate::features::profiles::ProfileService;
use crate::modules::events::{track, EventSink};
use crate::shared::constants::EVENT_DONATE_SUCCEEDED;

/// How many charities the donor summary ranks
const TOP_CHARITIES_LIMIT: usize = 5;

/// How many trailing months the donor summary buckets
const SUMMARY_MONTHS_BACK: usize = 6;

/// Service for donation creation, history and derived analytics
pub struct DonationService {
    pool: PgPool,
    profiles: Arc<ProfileService>,
    events: Arc<dyn EventSink>,
}

impl DonationService {
    pub fn new(pool: PgPool, profiles: Arc<ProfileService>, events: Arc<dyn EventSink>) -> Self {
        Self {
            pool,
            profiles,
            events,
        }
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Record a donation from `actor` against an approved charity. The
    /// amount arrives as a major-unit decimal string and is validated before
    /// any write; the row is created directly in `paid` status.
    pub async fn create_donation(
        &self,
        actor: &AuthenticatedUser,
        dto: CreateDonationDto,
    ) -> Result<DonationResponseDto> {
        self.profiles.ensure_onboarded(actor.user_id).await?;

        let amount_cents = analytics::parse_donation_amount(&dto.amount)?;

        // Donations may only target approved charities; anything else is
        // invisible to donors
        let charity = sqlx::query_as::<_, Charity>(
            "SELECT * FROM charities WHERE charity_id = $1 AND status = 'approved'",
        )
        .bind(dto.charity_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch charity: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Charity not found".to_string()))?;

        debug_assert_eq!(charity.status, CharityStatus::Approved);

        let message = dto
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        let donation = sqlx::query_as::<_, Donation>(
            r#"
            INSERT INTO donations (donor_user_id, charity_id, amount_cents, currency, status, message)
            VALUES ($1, $2, $3, $4, 'paid', $5)
            RETURNING *
            "#,
        )
        .bind(actor.user_id)
        .bind(charity.charity_id)
        .bind(amount_cents)
        .bind(charity.currency)
        .bind(message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert donation: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Donation recorded: id={}, charity={}, amount_cents={}",
            donation.donation_id,
            charity.charity_id,
            amount_cents
        );

        track(
            &self.events,
            Some(actor.user_id),
            EVENT_DONATE_SUCCEEDED,
            Some(serde_json::json!({
                "charity_id": charity.charity_id,
                "amount_cents": amount_cents,
            })),
        );

        Ok(DonationResponseDto::from_donation(
            donation,
            charity.public_name,
        ))
    }

    // ========================================================================
    // Donor read paths
    // ========================================================================

    /// The donor's own donations joined with charity display fields, newest
    /// first.
    pub async fn list_for_donor(&self, donor_id: Uuid) -> Result<Vec<DonationWithCharity>> {
        let donations = sqlx::query_as::<_, DonationWithCharity>(
            r#"
            SELECT
                d.donation_id, d.amount_cents, d.currency, d.status,
                d.message, d.donated_at,
                c.charity_id, c.public_name AS charity_name,
                c.photo_url AS charity_photo_url
            FROM donations d
            JOIN charities c ON c.charity_id = d.charity_id
            WHERE d.donor_user_id = $1
            ORDER BY d.donated_at DESC
            "#,
        )
        .bind(donor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list donations: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(donations)
    }

    /// Derived analytics over the donor's full donation history: running
    /// total, top charities, trailing monthly buckets and the current tax
    /// year total.
    pub async fn summary_for_donor(&self, donor_id: Uuid) -> Result<DonorSummaryDto> {
        let donations = self.list_for_donor(donor_id).await?;
        let today = Utc::now().date_naive();
        Ok(Self::build_summary(&donations, today))
    }

    fn build_summary(donations: &[DonationWithCharity], reference: NaiveDate) -> DonorSummaryDto {
        DonorSummaryDto::new(
            analytics::total_amount(donations),
            donations.len() as i64,
            analytics::top_charities(donations, TOP_CHARITIES_LIMIT),
            analytics::monthly_totals(donations, reference, SUMMARY_MONTHS_BACK),
            analytics::tax_year_total(donations, reference),
        )
    }

    /// CSV export of the donor's donations, optionally narrowed to one
    /// charity and/or one calendar year. Returns (filename, body).
    pub async fn export_csv(
        &self,
        donor_id: Uuid,
        charity_id: Option<Uuid>,
        year: Option<i32>,
    ) -> Result<(String, String)> {
        let donations = self.list_for_donor(donor_id).await?;
        let filtered = analytics::filter_donations(&donations, charity_id, year);

        let filename = format!("donations-{}.csv", Utc::now().date_naive());
        Ok((filename, analytics::to_csv(&filtered)))
    }

    // ========================================================================
    // Charity read path
    // ========================================================================

    /// Donations received by a charity, visible only to its owner (or an
    /// admin), joined with donor display names.
    pub async fn list_for_charity(
        &self,
        charity_id: Uuid,
        actor: &AuthenticatedUser,
    ) -> Result<CharityDonationsDto> {
        self.ensure_charity_owner(charity_id, actor).await?;

        let donations = sqlx::query_as::<_, DonationWithDonor>(
            r#"
            SELECT
                d.donation_id, d.amount_cents, d.currency, d.status,
                d.message, d.donated_at,
                p.full_name AS donor_name
            FROM donations d
            JOIN profiles p ON p.user_id = d.donor_user_id
            WHERE d.charity_id = $1
            ORDER BY d.donated_at DESC
            "#,
        )
        .bind(charity_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list charity donations: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(CharityDonationsDto::from_rows(donations))
    }

    async fn ensure_charity_owner(&self, charity_id: Uuid, actor: &AuthenticatedUser) -> Result<()> {
        if actor.is_admin() {
            return Ok(());
        }

        let owns = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM charity_users
            WHERE charity_id = $1 AND user_id = $2 AND role = 'owner'
            "#,
        )
        .bind(charity_id)
        .bind(actor.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check charity ownership: {:?}", e);
            AppError::Database(e)
        })?;

        if owns == 0 {
            return Err(AppError::Forbidden(
                "Only the charity owner can view received donations".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::donations::models::DonationStatus;
    use crate::shared::currency::Currency;
    use chrono::TimeZone;

    fn donation(charity_name: &str, amount_cents: i64, date: (i32, u32, u32)) -> DonationWithCharity {
        DonationWithCharity {
            donation_id: Uuid::new_v4(),
            amount_cents,
            currency: Currency::USD,
            status: DonationStatus::Paid,
            message: None,
            donated_at: Utc
                .with_ymd_and_hms(date.0, date.1, date.2, 9, 30, 0)
                .unwrap(),
            charity_id: Uuid::new_v4(),
            charity_name: charity_name.to_string(),
            charity_photo_url: None,
        }
    }

    #[test]
    fn test_build_summary_shapes() {
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let donations = vec![
            donation("Acme", 2500, (2024, 6, 1)),
            donation("Beacon", 1000, (2024, 4, 20)),
            donation("Cedar", 500, (2023, 11, 2)),
        ];

        let summary = DonationService::build_summary(&donations, reference);
        assert_eq!(summary.total_amount_cents, 4000);
        assert_eq!(summary.donation_count, 3);
        assert_eq!(summary.monthly_totals.len(), SUMMARY_MONTHS_BACK);
        assert_eq!(summary.top_charities.len(), 3);
        assert_eq!(summary.top_charities[0].name, "Acme");
        // Only the two 2024 donations fall in the Mar 2024 - Feb 2025 window
        assert_eq!(summary.tax_year_total_cents, 3500);
    }

    #[test]
    fn test_build_summary_empty_history() {
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let summary = DonationService::build_summary(&[], reference);
        assert_eq!(summary.total_amount_cents, 0);
        assert_eq!(summary.donation_count, 0);
        assert!(summary.top_charities.is_empty());
        assert_eq!(summary.monthly_totals.len(), SUMMARY_MONTHS_BACK);
        assert!(summary.monthly_totals.iter().all(|m| m.amount_cents == 0));
        assert_eq!(summary.tax_year_total_cents, 0);
    }
}
