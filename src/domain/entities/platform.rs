use serde::{Deserialize, Serialize};

use crate::domain::errors::ScoringError;

/// The four supported social networks.
///
/// The set is closed on purpose: the aggregate weight table covers exactly
/// these variants, so a weight lookup can never fail at runtime. Unknown
/// platform keys are rejected at the string boundary by [`Platform::from_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Tiktok,
    X,
}

impl Platform {
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::X => "x",
        }
    }

    pub fn from_key(key: &str) -> Result<Platform, ScoringError> {
        match key {
            "facebook" => Ok(Platform::Facebook),
            "instagram" => Ok(Platform::Instagram),
            "tiktok" => Ok(Platform::Tiktok),
            "x" => Ok(Platform::X),
            _ => Err(ScoringError::UnknownPlatform {
                key: key.to_string(),
            }),
        }
    }

    /// Base aggregation weight in percent. Sums to 100 over [`Platform::all`].
    pub fn base_weight(&self) -> u32 {
        match self {
            Platform::Facebook => 50,
            Platform::Instagram => 30,
            Platform::X => 11,
            Platform::Tiktok => 9,
        }
    }

    /// All platforms in fixed priority order (descending base weight).
    ///
    /// This order is the documented tie-break rule for anchor selection.
    pub fn all() -> [Platform; 4] {
        [
            Platform::Facebook,
            Platform::Instagram,
            Platform::X,
            Platform::Tiktok,
        ]
    }
}
