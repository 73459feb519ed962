use tracing::debug;

use crate::domain::services::scoring::round2;

const WEEK_SECONDS: i64 = 7 * 24 * 60 * 60;
const TWO_WEEKS_SECONDS: i64 = 14 * 24 * 60 * 60;
const THREE_WEEKS_SECONDS: i64 = 21 * 24 * 60 * 60;
const WINDOW_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Converts post timestamps into a recency-weighted activity sub-score.
///
/// Only the `top_n` most recent posts are examined. Each examined post falls
/// into one of four weekly age buckets (weights 1.0 / 0.75 / 0.5 / 0.25);
/// posts older than 30 days contribute nothing. The weighted sum is divided
/// by the number of posts examined, so the score reaches `max_score` only
/// when every examined post is less than a week old.
#[derive(Debug, Clone)]
pub struct RecencyScorer {
    pub top_n: usize,
}

impl Default for RecencyScorer {
    fn default() -> Self {
        RecencyScorer { top_n: 5 }
    }
}

impl RecencyScorer {
    /// Calculate the activity score for `posts` (epoch seconds, any order)
    /// relative to `now` (epoch seconds). Returns a value in
    /// [0.0, max_score], rounded to 2 decimals.
    pub fn calculate(&self, posts: &[i64], now: i64, max_score: f64) -> f64 {
        let mut sorted: Vec<i64> = posts.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.truncate(self.top_n);

        let examined = sorted.len();
        if examined == 0 {
            return 0.0;
        }

        let mut weighted_sum = 0.0;
        for ts in &sorted {
            let age = now - ts;
            weighted_sum += if age <= WEEK_SECONDS {
                1.0
            } else if age <= TWO_WEEKS_SECONDS {
                0.75
            } else if age <= THREE_WEEKS_SECONDS {
                0.5
            } else if age <= WINDOW_SECONDS {
                0.25
            } else {
                0.0
            };
        }

        let score = round2(weighted_sum / examined as f64 * max_score);
        debug!(
            examined = examined,
            weighted_sum = weighted_sum,
            score = score,
            "Calculated post recency score"
        );
        score
    }
}
