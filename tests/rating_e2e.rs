use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};

use reputa::application::services::payload::RawProfilePayload;
use reputa::application::services::rating_service::RatingService;
use reputa::domain::entities::platform::Platform;
use reputa::domain::entities::profile::{ErrorDatum, PlatformDatum, PlatformScore, ProfileDatum};
use reputa::domain::services::scoring::{OverallScorer, ReputationEngine};

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 10, 12, 0, 0).unwrap()
}

#[test]
fn test_scenario_a_two_platforms_present() {
    // facebook 4.0 and instagram 6.0 present; x and tiktok absent.
    // facebook anchors: 50 + 11 + 9 = 70, instagram keeps 30.
    // overall = 4.0 * 0.70 + 6.0 * 0.30 = 4.6
    let mut scores = BTreeMap::new();
    scores.insert(Platform::Facebook, 4.0);
    scores.insert(Platform::Instagram, 6.0);
    assert_eq!(OverallScorer.calculate(&scores), 4.6);
}

#[test]
fn test_scenario_b_single_platform_absorbs_everything() {
    // tiktok alone anchors and absorbs the other 91 points: weight 100.
    let mut scores = BTreeMap::new();
    scores.insert(Platform::Tiktok, 5.0);
    assert_eq!(OverallScorer.calculate(&scores), 5.0);
}

#[test]
fn test_scenario_c_error_platform_passes_through() {
    let engine = ReputationEngine::default();
    let error = ErrorDatum {
        error: "timeout".to_string(),
        message: "browser session timed out".to_string(),
    };

    let mut data = BTreeMap::new();
    data.insert(Platform::Facebook, PlatformDatum::Error(error.clone()));
    data.insert(
        Platform::Instagram,
        PlatformDatum::Profile(ProfileDatum {
            verified: true,
            followers: Some(10_000),
            likes: None,
            posts: vec![],
        }),
    );

    let report = engine.rate(&data, fixed_now());

    // The error datum reappears unchanged.
    assert_eq!(
        report.platform_scores.get(&Platform::Facebook),
        Some(&PlatformScore::Failed(error))
    );
    // instagram alone at redistributed 100%: 1 + (2 + 2)/2 + 0 = 3.0
    assert_eq!(report.overall_rating, 3.0);
}

#[test]
fn test_full_pipeline_is_idempotent() {
    let engine = ReputationEngine::default();
    let now = fixed_now();
    let day = 86_400;

    let mut data = BTreeMap::new();
    data.insert(
        Platform::Facebook,
        PlatformDatum::Profile(ProfileDatum {
            verified: true,
            followers: Some(4_200),
            likes: Some(950),
            posts: vec![now.timestamp() - day, now.timestamp() - 16 * day],
        }),
    );
    data.insert(
        Platform::X,
        PlatformDatum::Profile(ProfileDatum {
            verified: false,
            followers: Some(120_000),
            likes: None,
            posts: vec![now.timestamp() - 2 * day],
        }),
    );

    let first = engine.rate(&data, now);
    let second = engine.rate(&data, now);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_raw_payloads_through_rating_service() {
    // Scraped-shape payloads: magnitude strings, inconsistent field names,
    // free-text post stamps, one upstream failure.
    let service = RatingService::new(ReputationEngine::default());
    let now = fixed_now();

    let payloads: BTreeMap<String, RawProfilePayload> = serde_json::from_str(
        r#"{
            "facebook": {"error": "timeout", "message": "page load timed out"},
            "instagram": {"verified": true, "follower": "10K", "posts": ["1d", "2d"]},
            "tiktok": {"followers": 2500, "like": "50K", "posts": []},
            "x": {"follower": "1,234", "posts": ["not a date", "3h"]}
        }"#,
    )
    .unwrap();

    let outcome = service.rate(&payloads, now).await.unwrap();
    let report = &outcome.report;

    // All four submitted platforms appear exactly once.
    assert_eq!(report.platform_scores.len(), 4);

    // facebook: the error marker, untouched.
    assert_eq!(
        report.platform_scores.get(&Platform::Facebook),
        Some(&PlatformScore::Failed(ErrorDatum {
            error: "timeout".to_string(),
            message: "page load timed out".to_string(),
        }))
    );

    // instagram: verified 1 + (2 + 2)/2 + both posts fresh (7) = 10.0
    assert_eq!(
        report.platform_scores.get(&Platform::Instagram),
        Some(&PlatformScore::Scored(10.0))
    );

    // tiktok: 0 + (0.5 + 2.0)/2 + 0 = 1.25
    assert_eq!(
        report.platform_scores.get(&Platform::Tiktok),
        Some(&PlatformScore::Scored(1.25))
    );

    // x: bad stamp skipped, the "3h" post lands in the first bucket.
    // followers 1234 -> 0.2468; like mirrors follower; post 7.0
    // total = 0 + 0.2468 + 7.0 = 7.2468 -> 7.25 at emission
    assert_eq!(
        report.platform_scores.get(&Platform::X),
        Some(&PlatformScore::Scored(7.25))
    );

    // facebook errored, so instagram (highest present base weight) anchors:
    // 30 + 50 = 80, tiktok 9, x 11.
    // overall = 10.0*0.80 + 1.25*0.09 + 7.2468*0.11 = 8.0 + 0.1125 + 0.797148
    //         = 8.909648 -> 8.91
    assert_eq!(report.overall_rating, 8.91);
}

#[tokio::test]
async fn test_empty_request_rates_zero() {
    let service = RatingService::new(ReputationEngine::default());
    let outcome = service.rate(&BTreeMap::new(), fixed_now()).await.unwrap();
    assert_eq!(outcome.report.overall_rating, 0.0);
    assert!(outcome.report.platform_scores.is_empty());
}
