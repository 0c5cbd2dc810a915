use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::profiles::dtos::{CompleteOnboardingDto, ProfileResponseDto, UpdateProfileDto};
use crate::features::profiles::models::Profile;
use crate::modules::events::{track, EventSink};
use crate::shared::constants::EVENT_SIGNUP_COMPLETED;

/// Service for user profiles and the onboarding gate
pub struct ProfileService {
    pool: PgPool,
    events: Arc<dyn EventSink>,
}

impl ProfileService {
    pub fn new(pool: PgPool, events: Arc<dyn EventSink>) -> Self {
        Self { pool, events }
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch profile: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(profile)
    }

    pub async fn get_by_user(&self, user_id: Uuid) -> Result<Profile> {
        self.find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    /// The onboarding gate: a caller may use donor/charity features only
    /// after their profile exists and onboarding is stamped complete.
    pub async fn ensure_onboarded(&self, user_id: Uuid) -> Result<Profile> {
        let profile = self.find_by_user(user_id).await?.ok_or_else(|| {
            AppError::Forbidden("Complete onboarding before using this feature".to_string())
        })?;

        if !profile.is_onboarded() {
            return Err(AppError::Forbidden(
                "Complete onboarding before using this feature".to_string(),
            ));
        }

        Ok(profile)
    }

    /// Create the profile row and stamp onboarding complete. Conflict if the
    /// caller already onboarded.
    pub async fn complete_onboarding(
        &self,
        user_id: Uuid,
        dto: CompleteOnboardingDto,
    ) -> Result<ProfileResponseDto> {
        if self.find_by_user(user_id).await?.is_some() {
            return Err(AppError::Conflict(
                "Onboarding has already been completed".to_string(),
            ));
        }

        let full_name = format!("{} {}", dto.first_name.trim(), dto.last_name.trim());

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (
                user_id, role, full_name, first_name, last_name,
                email, id_number, tax_reference,
                address_line1, address_line2, city, province, postal_code,
                mobile_number, marketing_source, onboarding_completed_at
            ) VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8,
                $9, $10, $11, $12, $13,
                $14, $15, NOW()
            )
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(dto.role)
        .bind(full_name)
        .bind(dto.first_name.trim())
        .bind(dto.last_name.trim())
        .bind(dto.email)
        .bind(dto.id_number)
        .bind(dto.tax_reference)
        .bind(dto.address_line1)
        .bind(dto.address_line2)
        .bind(dto.city)
        .bind(dto.province)
        .bind(dto.postal_code)
        .bind(dto.mobile_number)
        .bind(dto.marketing_source)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert profile: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Onboarding completed: user={}, role={}", user_id, profile.role);

        track(
            &self.events,
            Some(user_id),
            EVENT_SIGNUP_COMPLETED,
            Some(serde_json::json!({ "role": profile.role.to_string() })),
        );

        Ok(profile.into())
    }

    /// Update settings. Only the fields a user owns are touched; role and
    /// onboarding stamp never change here.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<ProfileResponseDto> {
        let current = self.get_by_user(user_id).await?;

        let first_name = dto.first_name.or(current.first_name);
        let last_name = dto.last_name.or(current.last_name);
        let full_name = match (&first_name, &last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first.clone()),
            _ => current.full_name,
        };

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles SET
                full_name = $2,
                first_name = $3,
                last_name = $4,
                id_number = COALESCE($5, id_number),
                tax_reference = COALESCE($6, tax_reference),
                address_line1 = COALESCE($7, address_line1),
                address_line2 = COALESCE($8, address_line2),
                city = COALESCE($9, city),
                province = COALESCE($10, province),
                postal_code = COALESCE($11, postal_code),
                mobile_number = COALESCE($12, mobile_number)
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(full_name)
        .bind(first_name)
        .bind(last_name)
        .bind(dto.id_number)
        .bind(dto.tax_reference)
        .bind(dto.address_line1)
        .bind(dto.address_line2)
        .bind(dto.city)
        .bind(dto.province)
        .bind(dto.postal_code)
        .bind(dto.mobile_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update profile: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(profile.into())
    }
}
