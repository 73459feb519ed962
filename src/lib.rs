//! Reputa — social media reputation scoring service.
//!
//! Aggregates public profile signals (facebook, instagram, tiktok, x) into
//! per-platform scores and one weighted overall rating, with an optional
//! natural-language summary of the result.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
