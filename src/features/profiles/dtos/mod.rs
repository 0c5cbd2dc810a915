mod profile_dto;

pub use profile_dto::{CompleteOnboardingDto, ProfileResponseDto, UpdateProfileDto};
