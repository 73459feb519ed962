use tracing::debug;

use crate::domain::entities::platform::Platform;
use crate::domain::entities::profile::ProfileDatum;
use crate::domain::services::scoring::recency::RecencyScorer;

/// Combines one platform's verification, follower, like, and activity
/// signals into a single score on a 0-10 scale.
///
/// Sub-scores: verified contributes 0 or 1; follower and like counts are
/// linearly clamped to 0-2 against a 10k cap and averaged; post recency
/// contributes up to `max_post_score` (7 by default), so the maximum
/// attainable total is 1 + 2 + 7 = 10.
#[derive(Debug, Clone)]
pub struct PlatformScorer {
    pub follower_cap: u64,
    pub like_cap: u64,
    pub max_post_score: f64,
    pub recency: RecencyScorer,
}

impl Default for PlatformScorer {
    fn default() -> Self {
        PlatformScorer {
            follower_cap: 10_000,
            like_cap: 10_000,
            max_post_score: 7.0,
            recency: RecencyScorer::default(),
        }
    }
}

impl PlatformScorer {
    /// Linear clamp of a raw count onto a 0-2 scale.
    pub fn sub_score(value: u64, cap: u64) -> f64 {
        if value >= cap {
            return 2.0;
        }
        value as f64 / cap as f64 * 2.0
    }

    /// Score a non-error profile datum. `now` is epoch seconds, injected for
    /// determinism.
    pub fn score(&self, platform: Platform, datum: &ProfileDatum, now: i64) -> f64 {
        let verified_score = if datum.verified { 1.0 } else { 0.0 };
        let follower_score = Self::sub_score(datum.follower_count(), self.follower_cap);
        let mut like_score = Self::sub_score(datum.like_count(), self.like_cap);

        // X and Instagram expose no usable like count; Facebook with zero
        // likes means the signal was absent. In all three cases follower
        // strength stands in for it.
        let likes_absent = matches!(platform, Platform::X | Platform::Instagram)
            || (platform == Platform::Facebook && datum.like_count() == 0);
        if likes_absent {
            like_score = follower_score;
        }

        let post_score = self
            .recency
            .calculate(&datum.posts, now, self.max_post_score);

        let total = verified_score + (follower_score + like_score) / 2.0 + post_score;

        debug!(
            platform = platform.key(),
            verified_score = verified_score,
            follower_score = follower_score,
            like_score = like_score,
            post_score = post_score,
            total = total,
            "Calculated platform score"
        );

        total
    }
}
