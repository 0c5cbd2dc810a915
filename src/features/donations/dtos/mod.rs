mod donation_dto;

pub use donation_dto::{
    CharityDonationsDto, CharityTotalDto, CreateDonationDto, DonationExportParams,
    DonationResponseDto, DonationWithCharityDto, DonationWithDonorDto, DonorSummaryDto,
    MonthlyTotalDto,
};
