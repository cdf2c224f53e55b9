//! Capability traits for external data sources.
//!
//! Calling workflows depend only on these interfaces, never on a concrete
//! provider type, so sources are interchangeable and independently
//! testable. Production code uses the real adapters; tests substitute the
//! mocks below.
//!
//! # Example
//!
//! ```ignore
//! use cratedigger::provider::MusicProvider;
//!
//! async fn import_album<P: MusicProvider>(catalog: &P, artist: &str, title: &str) {
//!     let album = catalog.search_album(artist, title).await?;
//!     let tracks = catalog.tracks_by_album(&album.metadata.provider_ids()["spotify"]).await?;
//! }
//! ```

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Album, Artist, AudioPreview, LyricResponse, LyricSource, Track};
use crate::error::Result;

/// A music catalog source.
///
/// The async methods wrap network I/O; the `map_*` methods are the
/// provider's compiled mappers and are pure, synchronous, and callable from
/// any task.
#[async_trait]
pub trait MusicProvider: Send + Sync {
    /// Provider name as used in `metadata.provider_ids`.
    fn name(&self) -> &'static str;

    /// Search for an album by artist and title.
    async fn search_album(&self, artist: &str, title: &str) -> Result<Album>;

    /// Fetch an album by external id.
    async fn album_by_id(&self, id: &str) -> Result<Album>;

    /// Fetch the track listing of an album.
    async fn tracks_by_album(&self, album_id: &str) -> Result<Vec<Track>>;

    /// Fetch an artist by external id.
    async fn artist_by_id(&self, id: &str) -> Result<Artist>;

    /// Fetch a track by external id.
    async fn track_by_id(&self, id: &str) -> Result<Track>;

    /// Rewrite a raw album payload into the domain model.
    fn map_album(&self, raw: &Value) -> Result<Album>;

    /// Rewrite a raw track payload into the domain model.
    fn map_track(&self, raw: &Value) -> Result<Track>;

    /// Rewrite a raw artist payload into the domain model.
    fn map_artist(&self, raw: &Value) -> Result<Artist>;
}

/// A lyrics source.
#[async_trait]
pub trait LyricProvider: Send + Sync {
    /// Fetch lyrics for a (source, title, artist) triple.
    ///
    /// Title and artist should be pre-normalized by the caller. A response
    /// with empty lyrics is a successful "not found".
    async fn lyrics_by_track(
        &self,
        source: LyricSource,
        title: &str,
        artist: &str,
    ) -> Result<LyricResponse>;
}

/// Reserved capability for a future audio search/preview source.
///
/// No concrete adapter exists yet; workflows that will consume previews can
/// already be written against this interface.
#[async_trait]
pub trait AudioProvider: Send + Sync {
    /// Search for playable previews matching a title/artist pair.
    async fn search_previews(&self, title: &str, artist: &str) -> Result<Vec<AudioPreview>>;
}

// Implement the capability traits for the real adapters.

#[async_trait]
impl MusicProvider for super::spotify::SpotifyClient {
    fn name(&self) -> &'static str {
        "spotify"
    }

    async fn search_album(&self, artist: &str, title: &str) -> Result<Album> {
        self.search_album(artist, title).await
    }

    async fn album_by_id(&self, id: &str) -> Result<Album> {
        self.album_by_id(id).await
    }

    async fn tracks_by_album(&self, album_id: &str) -> Result<Vec<Track>> {
        self.tracks_by_album(album_id).await
    }

    async fn artist_by_id(&self, id: &str) -> Result<Artist> {
        self.artist_by_id(id).await
    }

    async fn track_by_id(&self, id: &str) -> Result<Track> {
        self.track_by_id(id).await
    }

    fn map_album(&self, raw: &Value) -> Result<Album> {
        self.map_album(raw)
    }

    fn map_track(&self, raw: &Value) -> Result<Track> {
        self.map_track(raw)
    }

    fn map_artist(&self, raw: &Value) -> Result<Artist> {
        self.map_artist(raw)
    }
}

#[async_trait]
impl LyricProvider for super::lyrics::LyricsClient {
    async fn lyrics_by_track(
        &self,
        source: LyricSource,
        title: &str,
        artist: &str,
    ) -> Result<LyricResponse> {
        self.lyrics_by_track(source, title, artist).await
    }
}
