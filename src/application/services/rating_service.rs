use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::application::services::payload::RawProfilePayload;
use crate::domain::entities::platform::Platform;
use crate::domain::entities::profile::ScoreReport;
use crate::domain::errors::ScoringError;
use crate::domain::services::scoring::ReputationEngine;
use crate::infrastructure::feedback::FeedbackGenerator;

/// Scores plus the optional narrative summary.
#[derive(Debug, Clone)]
pub struct RatingOutcome {
    pub report: ScoreReport,
    pub feedback: Option<String>,
}

/// Orchestrates one rating request: decode provider payloads, run the
/// scoring engine, then ask the narrative generator for a summary.
///
/// Feedback is best-effort: a generator failure is logged and the scores are
/// returned without it, since the scores are the primary product.
pub struct RatingService {
    engine: ReputationEngine,
    feedback: Option<Arc<dyn FeedbackGenerator>>,
}

impl RatingService {
    pub fn new(engine: ReputationEngine) -> Self {
        RatingService {
            engine,
            feedback: None,
        }
    }

    pub fn with_feedback(mut self, generator: Arc<dyn FeedbackGenerator>) -> Self {
        self.feedback = Some(generator);
        self
    }

    pub async fn rate(
        &self,
        payloads: &BTreeMap<String, RawProfilePayload>,
        now: DateTime<Utc>,
    ) -> Result<RatingOutcome, ScoringError> {
        let mut data = BTreeMap::new();
        for (key, payload) in payloads {
            let platform = Platform::from_key(key)?;
            data.insert(platform, payload.decode(now)?);
        }

        let report = self.engine.rate(&data, now);
        info!(
            platforms = data.len(),
            overall_rating = report.overall_rating,
            "Generated score report"
        );

        let feedback = match &self.feedback {
            Some(generator) => match generator.generate(&data, &report).await {
                Ok(text) => Some(text),
                Err(err) => {
                    warn!(error = %err, "Feedback generation failed, returning scores without it");
                    None
                }
            },
            None => None,
        };

        Ok(RatingOutcome { report, feedback })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::profile::PlatformDatum;
    use crate::domain::errors::FeedbackError;
    use async_trait::async_trait;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 10, 12, 0, 0).unwrap()
    }

    struct CannedFeedback(Result<String, FeedbackError>);

    #[async_trait]
    impl FeedbackGenerator for CannedFeedback {
        async fn generate(
            &self,
            _raw: &BTreeMap<Platform, PlatformDatum>,
            _report: &ScoreReport,
        ) -> Result<String, FeedbackError> {
            match &self.0 {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(FeedbackError::EmptyResponse),
            }
        }
    }

    fn payloads(json: &str) -> BTreeMap<String, RawProfilePayload> {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_rate_without_feedback_generator() {
        let service = RatingService::new(ReputationEngine::default());
        let payloads = payloads(r#"{"tiktok": {"verified": true, "followers": 10000}}"#);
        let outcome = service.rate(&payloads, fixed_now()).await.unwrap();
        // tiktok: 1 + (2 + 0)/2 + 0 = 2.0 at 100% weight
        assert_eq!(outcome.report.overall_rating, 2.0);
        assert!(outcome.feedback.is_none());
    }

    #[tokio::test]
    async fn test_unknown_platform_key_rejected() {
        let service = RatingService::new(ReputationEngine::default());
        let payloads = payloads(r#"{"myspace": {"followers": 1}}"#);
        let err = service.rate(&payloads, fixed_now()).await.unwrap_err();
        assert_eq!(
            err,
            ScoringError::UnknownPlatform {
                key: "myspace".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_feedback_attached_when_generator_succeeds() {
        let service = RatingService::new(ReputationEngine::default())
            .with_feedback(Arc::new(CannedFeedback(Ok("solid presence".to_string()))));
        let payloads = payloads(r#"{"x": {"followers": 500}}"#);
        let outcome = service.rate(&payloads, fixed_now()).await.unwrap();
        assert_eq!(outcome.feedback.as_deref(), Some("solid presence"));
    }

    #[tokio::test]
    async fn test_feedback_failure_degrades_to_scores_only() {
        let service = RatingService::new(ReputationEngine::default())
            .with_feedback(Arc::new(CannedFeedback(Err(FeedbackError::EmptyResponse))));
        let payloads = payloads(r#"{"x": {"followers": 500}}"#);
        let outcome = service.rate(&payloads, fixed_now()).await.unwrap();
        assert!(outcome.feedback.is_none());
        assert!(outcome.report.platform_scores.contains_key(&Platform::X));
    }
}
