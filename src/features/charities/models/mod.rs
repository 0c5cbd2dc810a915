mod charity;

pub use charity::{Charity, CharityStatus, CharityUser, CharityUserRole, StatusBadge};
