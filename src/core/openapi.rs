use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::handlers::admin_handler;
use crate::features::certificates::{dtos as certificates_dtos, handlers::certificate_handler};
use crate::features::charities::{
    dtos as charities_dtos, handlers::charity_handler, models as charities_models,
};
use crate::features::donations::{
    dtos as donations_dtos, handlers::donation_handler, models as donations_models,
};
use crate::features::profiles::{
    dtos as profiles_dtos, handlers::profile_handler, models as profiles_models,
};
use crate::shared::currency::Currency;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Profiles
        profile_handler::get_me,
        profile_handler::complete_onboarding,
        profile_handler::update_me,
        // Charities (public)
        charity_handler::list_charities,
        charity_handler::get_charity,
        // Charities (charity role)
        charity_handler::submit_application,
        charity_handler::get_my_charity,
        charity_handler::upload_photo,
        // Donations
        donation_handler::create_donation,
        donation_handler::list_my_donations,
        donation_handler::get_summary,
        donation_handler::export_csv,
        donation_handler::list_charity_donations,
        // Certificates
        certificate_handler::list_certificates,
        certificate_handler::download_certificate,
        // Admin
        admin_handler::list_charities,
        admin_handler::get_charity,
        admin_handler::approve_charity,
        admin_handler::reject_charity,
    ),
    components(
        schemas(
            // Shared
            Meta,
            Currency,
            // Profiles
            profiles_models::UserRole,
            profiles_dtos::CompleteOnboardingDto,
            profiles_dtos::UpdateProfileDto,
            profiles_dtos::ProfileResponseDto,
            ApiResponse<profiles_dtos::ProfileResponseDto>,
            // Charities
            charities_models::CharityStatus,
            charities_dtos::StatusBadgeDto,
            charities_dtos::CharityApplicationDto,
            charities_dtos::ApproveCharityDto,
            charities_dtos::RejectCharityDto,
            charities_dtos::CharityResponseDto,
            charities_dtos::CharitySummaryDto,
            charities_dtos::AdminCharityDto,
            charities_dtos::AdminCharityListDto,
            charities_dtos::StatusCounts,
            ApiResponse<charities_dtos::CharityResponseDto>,
            ApiResponse<charities_dtos::CharitySummaryDto>,
            ApiResponse<Vec<charities_dtos::CharitySummaryDto>>,
            ApiResponse<charities_dtos::AdminCharityDto>,
            ApiResponse<charities_dtos::AdminCharityListDto>,
            // Donations
            donations_models::DonationStatus,
            donations_dtos::CreateDonationDto,
            donations_dtos::DonationResponseDto,
            donations_dtos::DonationWithCharityDto,
            donations_dtos::DonationWithDonorDto,
            donations_dtos::CharityTotalDto,
            donations_dtos::MonthlyTotalDto,
            donations_dtos::DonorSummaryDto,
            donations_dtos::CharityDonationsDto,
            ApiResponse<donations_dtos::DonationResponseDto>,
            ApiResponse<Vec<donations_dtos::DonationWithCharityDto>>,
            ApiResponse<donations_dtos::DonorSummaryDto>,
            ApiResponse<donations_dtos::CharityDonationsDto>,
            // Certificates
            certificates_dtos::TaxCertificateDto,
            certificates_dtos::CertificateDownloadDto,
            ApiResponse<Vec<certificates_dtos::TaxCertificateDto>>,
            ApiResponse<certificates_dtos::CertificateDownloadDto>,
        )
    ),
    tags(
        (name = "profiles", description = "User onboarding and settings"),
        (name = "charities", description = "Charity listing and application lifecycle"),
        (name = "donations", description = "Donations, analytics and CSV export"),
        (name = "certificates", description = "Donor tax certificates (read-only)"),
        (name = "admin", description = "Charity application review (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "GiveBridge API",
        version = "0.1.0",
        description = "API documentation for the GiveBridge donation marketplace",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
