pub mod rate_handler;
