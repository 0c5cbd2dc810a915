pub mod certificate_handler;
