pub mod admin;
pub mod auth;
pub mod certificates;
pub mod charities;
pub mod donations;
pub mod profiles;
