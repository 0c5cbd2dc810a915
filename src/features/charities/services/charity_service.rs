use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::charities::dtos::{
    AdminCharityDto, AdminCharityListDto, CharityApplicationDto, CharityResponseDto,
    CharitySummaryDto, PhotoUpload, StatusCounts,
};
use crate::features::charities::models::{Charity, CharityStatus, CharityUser, CharityUserRole};
use crate::features::profiles::models::Profile;
use crate::features::profiles::ProfileService;
use crate::modules::events::{track, EventSink};
use crate::modules::storage::{validate_image, ObjectStore};
use crate::shared::constants::{
    EVENT_CHARITY_APPROVED, EVENT_CHARITY_PROFILE_CREATED, EVENT_CHARITY_REJECTED,
};
use crate::shared::types::PaginationQuery;

/// A review transition is only legal from `pending_review`.
pub fn ensure_reviewable(status: CharityStatus) -> Result<()> {
    match status {
        CharityStatus::PendingReview => Ok(()),
        other => Err(AppError::InvalidState(format!(
            "Only applications pending review can be reviewed (current status: {})",
            other
        ))),
    }
}

/// Required application fields must survive trimming.
fn validate_application(dto: &CharityApplicationDto) -> Result<()> {
    let required = [
        ("Public name", dto.public_name.as_str()),
        ("Legal name", dto.legal_name.as_str()),
        ("Registration number", dto.registration_number.as_str()),
        ("Description", dto.description.as_str()),
        ("Contact email", dto.contact_email.as_str()),
    ];

    for (label, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{} is required", label)));
        }
    }

    Ok(())
}

/// Service owning the charity application lifecycle
pub struct CharityService {
    pool: PgPool,
    profiles: Arc<ProfileService>,
    storage: Arc<ObjectStore>,
    events: Arc<dyn EventSink>,
}

impl CharityService {
    pub fn new(
        pool: PgPool,
        profiles: Arc<ProfileService>,
        storage: Arc<ObjectStore>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            pool,
            profiles,
            storage,
            events,
        }
    }

    // ========================================================================
    // Application submission
    // ========================================================================

    /// Submit a charity application on behalf of `actor`.
    ///
    /// The charity row and the owner link are inserted in one transaction so
    /// a partial failure cannot leave an ownerless charity behind. The photo
    /// is attached afterwards and is allowed to fail: the application stands
    /// without it.
    pub async fn submit_application(
        &self,
        actor: &AuthenticatedUser,
        dto: CharityApplicationDto,
        photo: Option<PhotoUpload>,
    ) -> Result<CharityResponseDto> {
        self.profiles.ensure_onboarded(actor.user_id).await?;
        validate_application(&dto)?;

        if self.find_owned_by_user(actor.user_id).await?.is_some() {
            return Err(AppError::Conflict(
                "You already own a charity profile".to_string(),
            ));
        }

        let currency = dto.currency.unwrap_or_default();

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to open transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let charity = sqlx::query_as::<_, Charity>(
            r#"
            INSERT INTO charities (
                status, public_name, legal_name, registration_number,
                description, website, contact_email, contact_phone, currency
            ) VALUES (
                'pending_review', $1, $2, $3, $4, $5, $6, $7, $8
            )
            RETURNING *
            "#,
        )
        .bind(dto.public_name.trim())
        .bind(dto.legal_name.trim())
        .bind(dto.registration_number.trim())
        .bind(dto.description.trim())
        .bind(dto.website)
        .bind(dto.contact_email.trim())
        .bind(dto.contact_phone)
        .bind(currency)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert charity: {:?}", e);
            AppError::Database(e)
        })?;

        sqlx::query("INSERT INTO charity_users (charity_id, user_id, role) VALUES ($1, $2, $3)")
            .bind(charity.charity_id)
            .bind(actor.user_id)
            .bind(CharityUserRole::Owner)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert owner link: {:?}", e);
                AppError::Database(e)
            })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit application: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Charity application submitted: id={}, owner={}",
            charity.charity_id,
            actor.user_id
        );

        // Photo attach is best-effort: a storage failure must not undo the
        // application that just committed.
        let charity = if let Some(photo) = photo {
            match self.store_photo(charity.charity_id, &photo).await {
                Ok(updated) => updated,
                Err(e) => {
                    tracing::warn!(
                        "Photo attach failed for charity {}: {}",
                        charity.charity_id,
                        e
                    );
                    charity
                }
            }
        } else {
            charity
        };

        track(
            &self.events,
            Some(actor.user_id),
            EVENT_CHARITY_PROFILE_CREATED,
            Some(serde_json::json!({ "charity_id": charity.charity_id })),
        );

        Ok(charity.into())
    }

    // ========================================================================
    // Review transitions (admin)
    // ========================================================================

    /// Approve a pending application. Clears any previous rejection reason
    /// and stamps reviewer identity and timestamps.
    pub async fn approve(
        &self,
        charity_id: Uuid,
        reviewer: &AuthenticatedUser,
        admin_notes: Option<String>,
    ) -> Result<CharityResponseDto> {
        let charity = self.get_charity(charity_id).await?;
        ensure_reviewable(charity.status)?;

        let charity = sqlx::query_as::<_, Charity>(
            r#"
            UPDATE charities SET
                status = 'approved',
                approved_at = NOW(),
                reviewed_by = $2,
                reviewed_at = NOW(),
                rejection_reason = NULL,
                admin_notes = $3
            WHERE charity_id = $1 AND status = 'pending_review'
            RETURNING *
            "#,
        )
        .bind(charity_id)
        .bind(reviewer.user_id)
        .bind(admin_notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to approve charity: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| {
            AppError::InvalidState(
                "Only applications pending review can be reviewed".to_string(),
            )
        })?;

        tracing::info!(
            "Charity approved: id={}, reviewer={}",
            charity_id,
            reviewer.user_id
        );

        track(
            &self.events,
            Some(reviewer.user_id),
            EVENT_CHARITY_APPROVED,
            Some(serde_json::json!({ "charity_id": charity_id })),
        );

        Ok(charity.into())
    }

    /// Reject a pending application with a mandatory reason.
    pub async fn reject(
        &self,
        charity_id: Uuid,
        reviewer: &AuthenticatedUser,
        rejection_reason: &str,
        admin_notes: Option<String>,
    ) -> Result<CharityResponseDto> {
        let reason = rejection_reason.trim();
        if reason.is_empty() {
            return Err(AppError::Validation(
                "Rejection reason is required".to_string(),
            ));
        }

        let charity = self.get_charity(charity_id).await?;
        ensure_reviewable(charity.status)?;

        let charity = sqlx::query_as::<_, Charity>(
            r#"
            UPDATE charities SET
                status = 'rejected',
                rejection_reason = $3,
                reviewed_by = $2,
                reviewed_at = NOW(),
                admin_notes = $4
            WHERE charity_id = $1 AND status = 'pending_review'
            RETURNING *
            "#,
        )
        .bind(charity_id)
        .bind(reviewer.user_id)
        .bind(reason)
        .bind(admin_notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to reject charity: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| {
            AppError::InvalidState(
                "Only applications pending review can be reviewed".to_string(),
            )
        })?;

        tracing::info!(
            "Charity rejected: id={}, reviewer={}",
            charity_id,
            reviewer.user_id
        );

        track(
            &self.events,
            Some(reviewer.user_id),
            EVENT_CHARITY_REJECTED,
            Some(serde_json::json!({ "charity_id": charity_id })),
        );

        Ok(charity.into())
    }

    // ========================================================================
    // Read paths
    // ========================================================================

    /// Approved charities, most recent first. The only listing visible to
    /// anonymous and donor callers. Returns (page, total approved count).
    pub async fn get_public_listing(
        &self,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<CharitySummaryDto>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM charities WHERE status = 'approved'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count charities: {:?}", e);
            AppError::Database(e)
        })?;

        let charities = sqlx::query_as::<_, Charity>(
            r#"
            SELECT * FROM charities
            WHERE status = 'approved'
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(pagination.offset())
        .bind(pagination.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list charities: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((charities.into_iter().map(Into::into).collect(), total))
    }

    /// One approved charity; hidden (NotFound) in any other status.
    pub async fn get_public_charity(&self, charity_id: Uuid) -> Result<CharitySummaryDto> {
        let charity = sqlx::query_as::<_, Charity>(
            "SELECT * FROM charities WHERE charity_id = $1 AND status = 'approved'",
        )
        .bind(charity_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch charity: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Charity not found".to_string()))?;

        Ok(charity.into())
    }

    /// Every application with owner/reviewer names resolved, plus status
    /// tallies over the unfiltered list. Admin-only read path.
    pub async fn get_admin_listing(
        &self,
        status_filter: Option<CharityStatus>,
    ) -> Result<AdminCharityListDto> {
        let charities =
            sqlx::query_as::<_, Charity>("SELECT * FROM charities ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to list charities: {:?}", e);
                    AppError::Database(e)
                })?;

        let counts = StatusCounts {
            total: charities.len() as i64,
            pending: count_with_status(&charities, CharityStatus::PendingReview),
            approved: count_with_status(&charities, CharityStatus::Approved),
            rejected: count_with_status(&charities, CharityStatus::Rejected),
        };

        let filtered: Vec<Charity> = match status_filter {
            Some(status) => charities.into_iter().filter(|c| c.status == status).collect(),
            None => charities,
        };

        let mut items = Vec::with_capacity(filtered.len());
        for charity in filtered {
            items.push(self.annotate_for_admin(charity).await?);
        }

        Ok(AdminCharityListDto {
            charities: items,
            counts,
        })
    }

    /// One application with owner/reviewer names resolved. Admin-only.
    pub async fn get_admin_charity(&self, charity_id: Uuid) -> Result<AdminCharityDto> {
        let charity = self.get_charity(charity_id).await?;
        self.annotate_for_admin(charity).await
    }

    /// The charity owned by `user_id`, if any. Read paths take the first
    /// (only) owner link.
    pub async fn find_owned_by_user(&self, user_id: Uuid) -> Result<Option<Charity>> {
        let charity = sqlx::query_as::<_, Charity>(
            r#"
            SELECT c.* FROM charities c
            JOIN charity_users cu ON cu.charity_id = c.charity_id
            WHERE cu.user_id = $1 AND cu.role = 'owner'
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch owned charity: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(charity)
    }

    pub async fn get_owned_by_user(&self, user_id: Uuid) -> Result<CharityResponseDto> {
        self.find_owned_by_user(user_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("You do not own a charity profile".to_string()))
    }

    /// Owner-or-admin check for mutations on a specific charity.
    pub async fn ensure_owner(&self, charity_id: Uuid, actor: &AuthenticatedUser) -> Result<()> {
        if actor.is_admin() {
            return Ok(());
        }

        let link = sqlx::query_as::<_, CharityUser>(
            "SELECT * FROM charity_users WHERE charity_id = $1 AND user_id = $2 AND role = $3",
        )
        .bind(charity_id)
        .bind(actor.user_id)
        .bind(CharityUserRole::Owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check charity ownership: {:?}", e);
            AppError::Database(e)
        })?;

        if link.is_none() {
            return Err(AppError::Forbidden(
                "Only the charity owner can do this".to_string(),
            ));
        }

        Ok(())
    }

    // ========================================================================
    // Photo upload
    // ========================================================================

    /// Upload or replace the charity photo. Unlike the submit-time attach,
    /// a failure here is surfaced to the caller.
    pub async fn upload_photo(
        &self,
        charity_id: Uuid,
        actor: &AuthenticatedUser,
        photo: PhotoUpload,
    ) -> Result<CharityResponseDto> {
        // Existence check before the ownership check so admins get a 404,
        // not a 403, for unknown ids
        self.get_charity(charity_id).await?;
        self.ensure_owner(charity_id, actor).await?;

        let charity = self.store_photo(charity_id, &photo).await?;
        Ok(charity.into())
    }

    async fn store_photo(&self, charity_id: Uuid, photo: &PhotoUpload) -> Result<Charity> {
        if let Some(violation) = validate_image(photo.data.len(), &photo.content_type) {
            return Err(AppError::Validation(violation));
        }

        let key = ObjectStore::charity_photo_key(charity_id, photo.extension());
        self.storage
            .upload(&key, photo.data.clone(), &photo.content_type)
            .await?;

        let url = self.storage.public_url(&key);

        let charity = sqlx::query_as::<_, Charity>(
            "UPDATE charities SET photo_url = $2 WHERE charity_id = $1 RETURNING *",
        )
        .bind(charity_id)
        .bind(&url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to store photo URL: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Charity photo stored: id={}, key={}", charity_id, key);
        Ok(charity)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn get_charity(&self, charity_id: Uuid) -> Result<Charity> {
        sqlx::query_as::<_, Charity>("SELECT * FROM charities WHERE charity_id = $1")
            .bind(charity_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch charity: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("Charity not found".to_string()))
    }

    async fn annotate_for_admin(&self, charity: Charity) -> Result<AdminCharityDto> {
        let owner_name = self.get_owner_name(charity.charity_id).await?;
        let reviewer_name = match charity.reviewed_by {
            Some(reviewer_id) => self.get_profile_name(reviewer_id).await?,
            None => None,
        };

        Ok(AdminCharityDto::from_charity(
            charity,
            owner_name,
            reviewer_name,
        ))
    }

    async fn get_owner_name(&self, charity_id: Uuid) -> Result<Option<String>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT p.* FROM profiles p
            JOIN charity_users cu ON cu.user_id = p.user_id
            WHERE cu.charity_id = $1 AND cu.role = 'owner'
            LIMIT 1
            "#,
        )
        .bind(charity_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch owner profile: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(profile.map(|p| p.display_name()))
    }

    async fn get_profile_name(&self, user_id: Uuid) -> Result<Option<String>> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch reviewer profile: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(profile.map(|p| p.display_name()))
    }
}

fn count_with_status(charities: &[Charity], status: CharityStatus) -> i64 {
    charities.iter().filter(|c| c.status == status).count() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::currency::Currency;

    fn application() -> CharityApplicationDto {
        CharityApplicationDto {
            public_name: "Helping Hands".to_string(),
            legal_name: "Helping Hands NPO".to_string(),
            registration_number: "NPO-001".to_string(),
            description: "Food relief for the Cape Flats".to_string(),
            contact_email: "info@helpinghands.org".to_string(),
            website: None,
            contact_phone: None,
            currency: Some(Currency::ZAR),
        }
    }

    #[test]
    fn test_ensure_reviewable_accepts_pending() {
        assert!(ensure_reviewable(CharityStatus::PendingReview).is_ok());
    }

    #[test]
    fn test_ensure_reviewable_rejects_other_states() {
        for status in [
            CharityStatus::Draft,
            CharityStatus::Approved,
            CharityStatus::Rejected,
            CharityStatus::Suspended,
        ] {
            let err = ensure_reviewable(status).unwrap_err();
            assert!(matches!(err, AppError::InvalidState(_)));
        }
    }

    #[test]
    fn test_validate_application_accepts_complete_form() {
        assert!(validate_application(&application()).is_ok());
    }

    #[test]
    fn test_validate_application_rejects_blank_required_fields() {
        let mut dto = application();
        dto.legal_name = "   ".to_string();
        let err = validate_application(&dto).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut dto = application();
        dto.contact_email = String::new();
        assert!(validate_application(&dto).is_err());
    }
}
