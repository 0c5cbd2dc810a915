pub mod donation_handler;
