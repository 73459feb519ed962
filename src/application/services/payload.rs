use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::domain::entities::profile::{ErrorDatum, PlatformDatum, ProfileDatum};
use crate::domain::errors::ScoringError;
use crate::domain::services::scoring::{normalize_magnitude, resolve_timestamp};

/// A count as a provider delivers it: structured APIs send numbers, page
/// scrapes send magnitude strings like "12.3K".
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawCount {
    Number(u64),
    Text(String),
}

impl RawCount {
    fn resolve(&self) -> Result<u64, ScoringError> {
        match self {
            RawCount::Number(value) => Ok(*value),
            RawCount::Text(text) => normalize_magnitude(text),
        }
    }
}

/// A post timestamp as a provider delivers it: epoch seconds from APIs,
/// free-text date strings from page scrapes.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawPostStamp {
    Epoch(i64),
    Text(String),
}

/// Loosely-shaped per-platform payload from a profile data provider.
///
/// Provider payloads are inconsistent about field naming
/// (`follower`/`followers`, `likes`/`like`); the serde aliases collapse them
/// onto one canonical field each. A payload carrying an `error` field is an
/// upstream failure marker and decodes to [`PlatformDatum::Error`].
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawProfilePayload {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, alias = "follower")]
    pub followers: Option<RawCount>,
    #[serde(default, alias = "like")]
    pub likes: Option<RawCount>,
    #[serde(default)]
    pub posts: Vec<RawPostStamp>,
}

impl RawProfilePayload {
    /// Convert into the typed datum the engine consumes.
    ///
    /// A malformed count fails the whole platform decode: an unparseable
    /// count must not silently become 0. A malformed post stamp is only
    /// skipped with a warning, so one bad date never zeroes the account's
    /// whole post list.
    pub fn decode(&self, now: DateTime<Utc>) -> Result<PlatformDatum, ScoringError> {
        if let Some(error) = &self.error {
            return Ok(PlatformDatum::Error(ErrorDatum {
                error: error.clone(),
                message: self.message.clone().unwrap_or_default(),
            }));
        }

        let followers = self.followers.as_ref().map(RawCount::resolve).transpose()?;
        let likes = self.likes.as_ref().map(RawCount::resolve).transpose()?;

        let mut posts = Vec::with_capacity(self.posts.len());
        for stamp in &self.posts {
            match stamp {
                RawPostStamp::Epoch(epoch) => posts.push(*epoch),
                RawPostStamp::Text(text) => match resolve_timestamp(text, now) {
                    Ok(epoch) => posts.push(epoch),
                    Err(err) => {
                        warn!(stamp = %text, error = %err, "Skipping malformed post timestamp");
                    }
                },
            }
        }

        Ok(PlatformDatum::Profile(ProfileDatum {
            verified: self.verified,
            followers,
            likes,
            posts,
        }))
    }
}
