use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::platform::Platform;

/// Upstream fetch or parse failure for one platform.
///
/// Not an exception: a first-class value that flows through the engine
/// unscored and reappears unchanged in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDatum {
    pub error: String,
    pub message: String,
}

/// Raw per-platform observation from a profile data provider.
///
/// `followers`/`likes` are optional; absent means the provider saw no such
/// signal and is treated as 0. `posts` holds epoch seconds in any order;
/// the recency scorer re-sorts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProfileDatum {
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub posts: Vec<i64>,
}

impl ProfileDatum {
    pub fn follower_count(&self) -> u64 {
        self.followers.unwrap_or(0)
    }

    pub fn like_count(&self) -> u64 {
        self.likes.unwrap_or(0)
    }
}

/// One platform's input to the engine: data, or an upstream failure marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlatformDatum {
    Error(ErrorDatum),
    Profile(ProfileDatum),
}

/// One platform's output: a bounded score, or the failure marker passed
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlatformScore {
    Scored(f64),
    Failed(ErrorDatum),
}

impl PlatformScore {
    pub fn as_score(&self) -> Option<f64> {
        match self {
            PlatformScore::Scored(value) => Some(*value),
            PlatformScore::Failed(_) => None,
        }
    }
}

/// Final rating result: one entry per submitted platform plus the overall
/// rating. Constructed fresh per request, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub platform_scores: BTreeMap<Platform, PlatformScore>,
    pub overall_rating: f64,
}
