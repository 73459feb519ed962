pub mod platform;
pub mod profile;
