mod charity_service;

pub use charity_service::{ensure_reviewable, CharityService};
