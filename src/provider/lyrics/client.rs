//! Lyrics microservice client.
//!
//! Fetches lyrics for a (source, title, artist) triple and validates the
//! body against the [`LyricResponse`] schema before anything downstream
//! sees it. Callers are expected to normalize title/artist beforehand with
//! [`normalize`](crate::provider::normalize::normalize).
//!
//! An empty `lyrics` field in a valid response is a successful call: the
//! calling workflow decides it means "not found". Only transport failures,
//! non-success statuses, and schema violations are errors here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{LyricResponse, LyricSource, Schema};
use crate::error::{Error, ProviderError, Result};
use crate::mapping::Mapper;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3001";

/// Configuration for the lyrics adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LyricsConfig {
    /// Microservice root; override per deployment.
    pub base_url: String,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Lyrics microservice adapter.
pub struct LyricsClient {
    http_client: reqwest::Client,
    config: LyricsConfig,
    /// Provider-specific mapper for services whose body shape differs from
    /// the canonical one; absent means the body already matches the schema.
    mapper: Option<Mapper<LyricResponse>>,
}

impl LyricsClient {
    /// Create a client from an explicit config.
    pub fn new(config: LyricsConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            config,
            mapper: None,
        }
    }

    /// Use a provider-specific mapper instead of direct schema validation.
    pub fn with_mapper(mut self, mapper: Mapper<LyricResponse>) -> Self {
        self.mapper = Some(mapper);
        self
    }

    /// Fetch lyrics for a track from the given source.
    pub async fn lyrics_by_track(
        &self,
        source: LyricSource,
        title: &str,
        artist: &str,
    ) -> Result<LyricResponse> {
        let url = format!(
            "{}/lyrics?source={}&title={}&artist={}",
            self.config.base_url,
            source.key(),
            urlencoding::encode(title),
            urlencoding::encode(artist)
        );
        tracing::debug!(url, "lyrics request");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::Provider(ProviderError::not_found(
                "lyrics",
                format!("{title} by {artist} ({})", source.key()),
            )));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::Provider(ProviderError::RateLimited));
        }

        if !status.is_success() {
            tracing::warn!(%status, "lyrics request failed");
            return Err(Error::Provider(ProviderError::Api(format!("HTTP {status}"))));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;
        self.decode(&body)
    }

    /// Validate (or map, when a provider-specific mapper is configured) a
    /// response body into the canonical shape.
    fn decode(&self, body: &Value) -> Result<LyricResponse> {
        match &self.mapper {
            Some(mapper) => mapper.map(body),
            None => Ok(LyricResponse::validate(body)?),
        }
    }
}
