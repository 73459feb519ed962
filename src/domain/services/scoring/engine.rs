use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::entities::platform::Platform;
use crate::domain::entities::profile::{PlatformDatum, PlatformScore, ScoreReport};
use crate::domain::services::scoring::aggregate::OverallScorer;
use crate::domain::services::scoring::platform::PlatformScorer;
use crate::domain::services::scoring::round2;

/// The full scoring pipeline: per-platform scores plus the weighted overall
/// rating.
///
/// Pure computation over already-fetched data. Error data pass through to
/// the report untouched and never contribute to the overall rating; `now` is
/// an explicit parameter so repeated calls on identical input produce
/// identical reports.
#[derive(Debug, Clone, Default)]
pub struct ReputationEngine {
    platform_scorer: PlatformScorer,
    overall_scorer: OverallScorer,
}

impl ReputationEngine {
    pub fn new(platform_scorer: PlatformScorer) -> Self {
        ReputationEngine {
            platform_scorer,
            overall_scorer: OverallScorer,
        }
    }

    pub fn rate(
        &self,
        data: &BTreeMap<Platform, PlatformDatum>,
        now: DateTime<Utc>,
    ) -> ScoreReport {
        let now_epoch = now.timestamp();

        let mut scored = BTreeMap::new();
        let mut platform_scores = BTreeMap::new();

        for (platform, datum) in data {
            match datum {
                PlatformDatum::Profile(profile) => {
                    let score = self.platform_scorer.score(*platform, profile, now_epoch);
                    scored.insert(*platform, score);
                    platform_scores.insert(*platform, PlatformScore::Scored(round2(score)));
                }
                PlatformDatum::Error(error) => {
                    debug!(
                        platform = platform.key(),
                        error = %error.error,
                        "Platform data collection failed upstream, passing through unscored"
                    );
                    platform_scores.insert(*platform, PlatformScore::Failed(error.clone()));
                }
            }
        }

        let overall_rating = self.overall_scorer.calculate(&scored);

        ScoreReport {
            platform_scores,
            overall_rating,
        }
    }
}
