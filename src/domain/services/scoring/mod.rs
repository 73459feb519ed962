pub mod aggregate;
pub mod engine;
pub mod magnitude;
pub mod platform;
pub mod recency;
pub mod timestamp;

pub use aggregate::OverallScorer;
pub use engine::ReputationEngine;
pub use magnitude::normalize_magnitude;
pub use platform::PlatformScorer;
pub use recency::RecencyScorer;
pub use timestamp::resolve_timestamp;

/// Round to 2 decimal places at the point of emission. Internal math stays
/// at full precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
