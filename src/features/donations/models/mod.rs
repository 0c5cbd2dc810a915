mod donation;

pub use donation::{Donation, DonationStatus, DonationWithCharity, DonationWithDonor};
