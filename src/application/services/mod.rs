pub mod payload;
pub mod rating_service;
