use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::entities::platform::Platform;
use crate::domain::entities::profile::{PlatformDatum, ScoreReport};
use crate::domain::errors::FeedbackError;

const GENERATE_CONTENT_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Narrative generator: turns raw data and a score report into a
/// natural-language summary.
#[async_trait]
pub trait FeedbackGenerator: Send + Sync {
    async fn generate(
        &self,
        raw: &BTreeMap<Platform, PlatformDatum>,
        report: &ScoreReport,
    ) -> Result<String, FeedbackError>;
}

/// Feedback client backed by the Gemini generateContent REST endpoint.
///
/// The system instruction is a preprompt file loaded once at construction;
/// a missing file fails construction rather than every request.
pub struct GeminiFeedbackClient {
    client: Client,
    api_key: String,
    model: String,
    system_instruction: String,
}

impl std::fmt::Debug for GeminiFeedbackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiFeedbackClient")
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiFeedbackClient {
    pub fn new(api_key: &str, model: &str, preprompt_path: &str) -> Result<Self, FeedbackError> {
        let system_instruction = std::fs::read_to_string(preprompt_path)
            .map_err(|source| FeedbackError::PrepromptUnavailable {
                path: preprompt_path.to_string(),
                source,
            })?
            .trim()
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| FeedbackError::RequestFailed(err.to_string()))?;

        Ok(GeminiFeedbackClient {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            system_instruction,
        })
    }

    fn build_user_prompt(
        raw: &BTreeMap<Platform, PlatformDatum>,
        report: &ScoreReport,
    ) -> String {
        let raw_json = serde_json::to_string(raw).unwrap_or_default();
        let report_json = serde_json::to_string(report).unwrap_or_default();
        format!(
            "Here is the resulting data that you will be analyzing:\n---\n{}{}\n---\n\
             :Generate the feedback based on this data and your instructions.",
            raw_json, report_json
        )
    }

    /// Pull the generated text out of a generateContent response body.
    fn extract_text(body: &Value) -> Result<String, FeedbackError> {
        if let Some(reason) = body
            .pointer("/promptFeedback/blockReason")
            .and_then(Value::as_str)
        {
            return Err(FeedbackError::Blocked(reason.to_string()));
        }

        let parts = body
            .pointer("/candidates/0/content/parts")
            .and_then(Value::as_array)
            .ok_or(FeedbackError::EmptyResponse)?;

        let text: String = parts
            .iter()
            .filter_map(|part| part["text"].as_str())
            .collect();

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(FeedbackError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl FeedbackGenerator for GeminiFeedbackClient {
    async fn generate(
        &self,
        raw: &BTreeMap<Platform, PlatformDatum>,
        report: &ScoreReport,
    ) -> Result<String, FeedbackError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GENERATE_CONTENT_URL, self.model, self.api_key
        );

        let request_body = serde_json::json!({
            "system_instruction": { "parts": [{ "text": self.system_instruction }] },
            "contents": [{ "parts": [{ "text": Self::build_user_prompt(raw, report) }] }],
            "generationConfig": { "temperature": 1.0 },
        });

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|err| FeedbackError::RequestFailed(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(status = %status, "Feedback endpoint returned an error status");
            return Err(FeedbackError::RequestFailed(format!(
                "HTTP {} from feedback endpoint",
                status
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| FeedbackError::RequestFailed(err.to_string()))?;

        let text = Self::extract_text(&body)?;
        info!(model = %self.model, "Generated narrative feedback");
        Ok(text)
    }
}
