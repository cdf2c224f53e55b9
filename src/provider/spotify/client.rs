//! Spotify Web API client.
//!
//! Thin HTTP adapter over the catalog endpoints this core needs: album
//! search, by-id lookups, and album track listings. Response bodies are kept
//! as raw JSON trees and handed to the compiled mappers; this file knows
//! nothing about field shapes beyond where the result lists live.
//!
//! Authentication is out of scope for this layer: the caller owns token
//! acquisition/refresh and passes a bearer token in via [`SpotifyConfig`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::mapper;
use crate::domain::{Album, Artist, Track};
use crate::error::{Error, ProviderError, Result};
use crate::mapping::Mapper;
use crate::provider::normalize::normalize;

const DEFAULT_BASE_URL: &str = "https://api.spotify.com/v1";

/// Configuration for the Spotify adapter.
///
/// Constructed by the calling workflow and passed in; the adapter holds no
/// process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotifyConfig {
    /// OAuth bearer token, supplied and refreshed by the caller.
    pub access_token: String,
    /// API root; override for tests or a proxy.
    pub base_url: String,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Spotify catalog adapter.
pub struct SpotifyClient {
    http_client: reqwest::Client,
    config: SpotifyConfig,
    album_mapper: Mapper<Album>,
    track_mapper: Mapper<Track>,
    artist_mapper: Mapper<Artist>,
}

impl SpotifyClient {
    /// Create a client from an explicit config.
    pub fn new(config: SpotifyConfig) -> Self {
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
            album_mapper: mapper::album_mapper(),
            track_mapper: mapper::track_mapper(),
            artist_mapper: mapper::artist_mapper(),
        }
    }

    /// Search for an album by artist and title; returns the best match.
    ///
    /// Query keys are normalized before being sent so accent variants of
    /// the same name resolve to the same search.
    pub async fn search_album(&self, artist: &str, title: &str) -> Result<Album> {
        let query = format!(
            "album:\"{}\" artist:\"{}\"",
            normalize(title),
            normalize(artist)
        );
        let url = format!(
            "{}/search?type=album&limit=1&q={}",
            self.config.base_url,
            urlencoding::encode(&query)
        );
        let label = format!("{artist} - {title}");
        let body = self.get_json(&url, "album", &label).await?;
        let raw = body
            .pointer("/albums/items/0")
            .ok_or_else(|| ProviderError::not_found("album", label))?;
        self.map_album(raw)
    }

    /// Fetch an album by Spotify id.
    pub async fn album_by_id(&self, id: &str) -> Result<Album> {
        let url = format!("{}/albums/{id}", self.config.base_url);
        let body = self.get_json(&url, "album", id).await?;
        self.map_album(&body)
    }

    /// Fetch the track listing of an album.
    pub async fn tracks_by_album(&self, album_id: &str) -> Result<Vec<Track>> {
        let url = format!("{}/albums/{album_id}/tracks?limit=50", self.config.base_url);
        let body = self.get_json(&url, "album", album_id).await?;
        let items = match body.get("items") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        };
        items.iter().map(|raw| self.map_track(raw)).collect()
    }

    /// Fetch an artist by Spotify id.
    pub async fn artist_by_id(&self, id: &str) -> Result<Artist> {
        let url = format!("{}/artists/{id}", self.config.base_url);
        let body = self.get_json(&url, "artist", id).await?;
        self.map_artist(&body)
    }

    /// Fetch a track by Spotify id.
    pub async fn track_by_id(&self, id: &str) -> Result<Track> {
        let url = format!("{}/tracks/{id}", self.config.base_url);
        let body = self.get_json(&url, "track", id).await?;
        self.map_track(&body)
    }

    /// Map a raw Spotify album payload into the domain model.
    pub fn map_album(&self, raw: &Value) -> Result<Album> {
        self.album_mapper.map(raw)
    }

    /// Map a raw Spotify track payload into the domain model.
    pub fn map_track(&self, raw: &Value) -> Result<Track> {
        self.track_mapper.map(raw)
    }

    /// Map a raw Spotify artist payload into the domain model.
    pub fn map_artist(&self, raw: &Value) -> Result<Artist> {
        self.artist_mapper.map(raw)
    }

    /// Send a GET and triage the status before parsing the body.
    async fn get_json(&self, url: &str, entity: &'static str, query: &str) -> Result<Value> {
        tracing::debug!(url, "spotify request");

        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::Provider(ProviderError::not_found(entity, query)));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::Provider(ProviderError::RateLimited));
        }

        if !status.is_success() {
            // Spotify error bodies look like {"error": {"status": n, "message": "..."}}
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.pointer("/error/message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| format!("HTTP {status}"));
            tracing::warn!(%status, message, "spotify request failed");
            return Err(Error::Provider(ProviderError::Api(message)));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;
        Ok(body)
    }
}
