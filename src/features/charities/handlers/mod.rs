pub mod charity_handler;
