use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::entities::platform::Platform;
use crate::domain::services::scoring::round2;

/// Combines present per-platform scores into one overall rating.
///
/// Each platform carries a base weight in percent (facebook 50, instagram
/// 30, x 11, tiktok 9). The present platform with the highest base weight is
/// the anchor; the combined weight of every absent platform is added to it,
/// so the adjusted weights of the present platforms always sum to 100. Ties
/// cannot occur between distinct base weights, but anchor selection walks
/// [`Platform::all`] in fixed priority order, which makes the rule
/// deterministic regardless of input ordering.
#[derive(Debug, Clone, Default)]
pub struct OverallScorer;

impl OverallScorer {
    /// Weighted overall score across present platforms, rounded to 2
    /// decimals. Empty input scores 0.
    pub fn calculate(&self, platform_scores: &BTreeMap<Platform, f64>) -> f64 {
        if platform_scores.is_empty() {
            return 0.0;
        }

        let Some(anchor) = Platform::all()
            .into_iter()
            .filter(|p| platform_scores.contains_key(p))
            .max_by_key(|p| p.base_weight())
        else {
            return 0.0;
        };

        let absent_weight: u32 = Platform::all()
            .into_iter()
            .filter(|p| !platform_scores.contains_key(p))
            .map(|p| p.base_weight())
            .sum();

        debug!(
            anchor = anchor.key(),
            absent_weight = absent_weight,
            present = platform_scores.len(),
            "Redistributing weight onto anchor platform"
        );

        let mut total = 0.0;
        for (platform, score) in platform_scores {
            let mut weight = platform.base_weight();
            if *platform == anchor {
                weight += absent_weight;
            }
            total += score * weight as f64 / 100.0;
        }

        round2(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[(Platform, f64)]) -> BTreeMap<Platform, f64> {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_empty_scores_zero() {
        assert_eq!(OverallScorer.calculate(&BTreeMap::new()), 0.0);
    }

    #[test]
    fn test_all_platforms_present_uses_base_weights() {
        let input = scores(&[
            (Platform::Facebook, 10.0),
            (Platform::Instagram, 10.0),
            (Platform::X, 10.0),
            (Platform::Tiktok, 10.0),
        ]);
        assert_eq!(OverallScorer.calculate(&input), 10.0);
    }

    #[test]
    fn test_absent_weight_moves_to_facebook_anchor() {
        // x (11) and tiktok (9) absent: facebook 50 -> 70, instagram stays 30.
        // 4.0 * 0.70 + 6.0 * 0.30 = 4.6
        let input = scores(&[(Platform::Facebook, 4.0), (Platform::Instagram, 6.0)]);
        assert_eq!(OverallScorer.calculate(&input), 4.6);
    }

    #[test]
    fn test_single_platform_absorbs_all_weight() {
        let input = scores(&[(Platform::Tiktok, 5.0)]);
        assert_eq!(OverallScorer.calculate(&input), 5.0);
    }

    #[test]
    fn test_anchor_is_highest_present_base_weight() {
        // facebook absent: instagram (30) anchors and absorbs 50.
        // 6.0 * 0.80 + 2.0 * 0.11 + 4.0 * 0.09 = 4.8 + 0.22 + 0.36 = 5.38
        let input = scores(&[
            (Platform::Instagram, 6.0),
            (Platform::X, 2.0),
            (Platform::Tiktok, 4.0),
        ]);
        assert_eq!(OverallScorer.calculate(&input), 5.38);
    }

    #[test]
    fn test_result_rounded_to_two_decimals() {
        // facebook 70%, instagram 30%: 3.333*0.7 + 1.111*0.3 = 2.6664 -> 2.67
        let input = scores(&[(Platform::Facebook, 3.333), (Platform::Instagram, 1.111)]);
        assert_eq!(OverallScorer.calculate(&input), 2.67);
    }
}
