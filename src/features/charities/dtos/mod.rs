mod charity_dto;

pub use charity_dto::{
    AdminCharityDto, AdminCharityListDto, ApproveCharityDto, CharityApplicationDto,
    CharityResponseDto, CharityStatusFilter, CharitySummaryDto, PhotoUpload, RejectCharityDto,
    StatusBadgeDto, StatusCounts,
};
