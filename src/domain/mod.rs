//! Canonical domain model and its validation gate.
//!
//! These types are OUR types - provider payloads never cross into the rest
//! of the system without passing through [`Schema::validate`] first. Every
//! adapter's mapper output is checked here: required fields must be present,
//! defaulted fields are populated when absent, closed enums reject unknown
//! members, and the open-ended `metadata` mapping preserves whatever
//! provider-specific keys arrive while still validating the ones it
//! recognizes (`provider_ids`, `urls`, `audio_urls`).

mod validate;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ValidationError;
use validate::{
    absolute_url, expect_object, field, is_absolute_url, join, optional_str, optional_u64,
    required_bool, required_str, required_u64, string_seq,
};

/// A structural contract: how a raw output tree becomes a typed domain
/// object. Implemented by every entity an adapter is allowed to return.
pub trait Schema: Sized + Send + Sync {
    /// Entity name used in diagnostics.
    const NAME: &'static str;

    /// Check `value` against the contract and construct the normalized
    /// object, applying declared defaults.
    fn validate(value: &Value) -> Result<Self, ValidationError>;
}

/// Closed value variant for the open-ended metadata mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<MetaValue>),
    Map(BTreeMap<String, MetaValue>),
}

/// Open mapping carried by every entity.
///
/// Unrecognized keys are preserved, not rejected: provider-specific
/// identifiers and URLs vary and must not be lost or hard-coded into the
/// schema. Three keys get extra validation when present:
///
/// - `provider_ids`: mapping of provider name → non-empty external id;
/// - `urls`: mapping of absolute URLs;
/// - `audio_urls`: mapping or sequence of absolute URLs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    entries: BTreeMap<String, MetaValue>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// External ids keyed by provider name, empty if none were mapped.
    pub fn provider_ids(&self) -> BTreeMap<String, String> {
        self.string_map("provider_ids")
    }

    /// Absolute URLs keyed by provider name, empty if none were mapped.
    pub fn urls(&self) -> BTreeMap<String, String> {
        self.string_map("urls")
    }

    fn string_map(&self, key: &str) -> BTreeMap<String, String> {
        match self.entries.get(key) {
            Some(MetaValue::Map(map)) => map
                .iter()
                .filter_map(|(k, v)| match v {
                    MetaValue::Str(s) => Some((k.clone(), s.clone())),
                    _ => None,
                })
                .collect(),
            _ => BTreeMap::new(),
        }
    }

    fn validate_at(parent: &Value, at: &str) -> Result<Self, ValidationError> {
        let path = join(at, "metadata");
        let Some(value) = field(parent, "metadata") else {
            return Ok(Self::default());
        };
        let map = expect_object(value, &path)?;

        if let Some(ids) = map.get("provider_ids").filter(|v| !v.is_null()) {
            let ids_path = join(&path, "provider_ids");
            let ids = expect_object(ids, &ids_path)?;
            for (provider, id) in ids {
                let id_path = join(&ids_path, provider);
                match id {
                    Value::String(s) if !s.is_empty() => {}
                    Value::String(_) => {
                        return Err(ValidationError::new(id_path, "provider id must be non-empty"));
                    }
                    other => return Err(ValidationError::expected(id_path, "string", other)),
                }
            }
        }

        if let Some(urls) = map.get("urls").filter(|v| !v.is_null()) {
            let urls_path = join(&path, "urls");
            let urls = expect_object(urls, &urls_path)?;
            for (name, url) in urls {
                absolute_url(url, &join(&urls_path, name))?;
            }
        }

        if let Some(audio) = map.get("audio_urls").filter(|v| !v.is_null()) {
            let audio_path = join(&path, "audio_urls");
            match audio {
                Value::Array(items) => {
                    for (idx, url) in items.iter().enumerate() {
                        absolute_url(url, &join(&audio_path, &idx.to_string()))?;
                    }
                }
                Value::Object(entries) => {
                    for (name, url) in entries {
                        absolute_url(url, &join(&audio_path, name))?;
                    }
                }
                other => {
                    return Err(ValidationError::expected(
                        audio_path,
                        "mapping or sequence",
                        other,
                    ));
                }
            }
        }

        let mut entries = BTreeMap::new();
        for (key, value) in map {
            if let Some(converted) = meta_value(value) {
                entries.insert(key.clone(), converted);
            }
        }
        Ok(Self { entries })
    }
}

/// Convert an arbitrary JSON node into the closed variant; nulls are dropped.
fn meta_value(value: &Value) -> Option<MetaValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(MetaValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(MetaValue::Int(i))
            } else {
                n.as_f64().map(MetaValue::Float)
            }
        }
        Value::String(s) => Some(MetaValue::Str(s.clone())),
        Value::Array(items) => Some(MetaValue::List(items.iter().filter_map(meta_value).collect())),
        Value::Object(map) => Some(MetaValue::Map(
            map.iter()
                .filter_map(|(k, v)| meta_value(v).map(|mv| (k.clone(), mv)))
                .collect(),
        )),
    }
}

/// A performing or composing artist.
#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub name: String,
    pub genre_tags: Vec<String>,
    pub metadata: Metadata,
}

impl Artist {
    fn validate_at(value: &Value, at: &str) -> Result<Self, ValidationError> {
        expect_object(value, if at.is_empty() { Self::NAME } else { at })?;
        Ok(Self {
            name: required_str(value, at, "name")?,
            genre_tags: string_seq(value, at, "genre_tags")?,
            metadata: Metadata::validate_at(value, at)?,
        })
    }
}

impl Schema for Artist {
    const NAME: &'static str = "artist";

    fn validate(value: &Value) -> Result<Self, ValidationError> {
        Self::validate_at(value, "")
    }
}

fn optional_artist(parent: &Value, at: &str, name: &str) -> Result<Option<Artist>, ValidationError> {
    field(parent, name)
        .map(|value| Artist::validate_at(value, &join(at, name)))
        .transpose()
}

fn artist_seq(parent: &Value, at: &str, name: &str) -> Result<Vec<Artist>, ValidationError> {
    let path = join(at, name);
    match field(parent, name) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| Artist::validate_at(item, &join(&path, &idx.to_string())))
            .collect(),
        Some(other) => Err(ValidationError::expected(path, "sequence", other)),
    }
}

/// An album in the curated collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub title: String,
    pub total_tracks: Option<u64>,
    pub primary_artist: Option<Artist>,
    pub artists: Vec<Artist>,
    pub tracks: Vec<Track>,
    pub release_date: Option<String>,
    pub genre_tags: Vec<String>,
    pub metadata: Metadata,
}

impl Schema for Album {
    const NAME: &'static str = "album";

    fn validate(value: &Value) -> Result<Self, ValidationError> {
        expect_object(value, Self::NAME)?;
        let tracks = match field(value, "tracks") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| Track::validate_at(item, &format!("tracks.{idx}")))
                .collect::<Result<_, _>>()?,
            Some(other) => return Err(ValidationError::expected("tracks", "sequence", other)),
        };
        Ok(Self {
            title: required_str(value, "", "title")?,
            total_tracks: optional_u64(value, "", "total_tracks")?,
            primary_artist: optional_artist(value, "", "primary_artist")?,
            artists: artist_seq(value, "", "artists")?,
            tracks,
            release_date: optional_str(value, "", "release_date")?,
            genre_tags: string_seq(value, "", "genre_tags")?,
            metadata: Metadata::validate_at(value, "")?,
        })
    }
}

/// Embedded album reference carried by a track: title and metadata only.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumRef {
    pub title: String,
    pub metadata: Metadata,
}

impl AlbumRef {
    fn validate_at(value: &Value, at: &str) -> Result<Self, ValidationError> {
        expect_object(value, at)?;
        Ok(Self {
            title: required_str(value, at, "title")?,
            metadata: Metadata::validate_at(value, at)?,
        })
    }
}

/// Lifecycle of a track's lyrics fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LyricsFetchedStatus {
    #[default]
    NotFetched,
    Fetching,
    Fetched,
    Failed,
}

impl LyricsFetchedStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFetched => "not_fetched",
            Self::Fetching => "fetching",
            Self::Fetched => "fetched",
            Self::Failed => "failed",
        }
    }

    fn validate_at(parent: &Value, at: &str) -> Result<Self, ValidationError> {
        let path = join(at, "lyrics_fetched_status");
        match optional_str(parent, at, "lyrics_fetched_status")? {
            None => Ok(Self::default()),
            Some(s) => match s.as_str() {
                "not_fetched" => Ok(Self::NotFetched),
                "fetching" => Ok(Self::Fetching),
                "fetched" => Ok(Self::Fetched),
                "failed" => Ok(Self::Failed),
                other => Err(ValidationError::new(
                    path,
                    format!(
                        "unknown status `{other}`, expected one of not_fetched | fetching | fetched | failed"
                    ),
                )),
            },
        }
    }
}

/// A single track.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub title: String,
    pub isrc: Option<String>,
    pub duration_ms: u64,
    pub explicit_flag: bool,
    pub album: Option<AlbumRef>,
    pub primary_artist: Option<Artist>,
    pub artists: Vec<Artist>,
    pub lyrics: Option<String>,
    pub lyrics_fetched_status: LyricsFetchedStatus,
    pub genre_tags: Vec<String>,
    pub metadata: Metadata,
}

impl Track {
    fn validate_at(value: &Value, at: &str) -> Result<Self, ValidationError> {
        expect_object(value, if at.is_empty() { Self::NAME } else { at })?;
        let album = field(value, "album")
            .map(|album| AlbumRef::validate_at(album, &join(at, "album")))
            .transpose()?;
        Ok(Self {
            title: required_str(value, at, "title")?,
            isrc: optional_str(value, at, "isrc")?,
            duration_ms: required_u64(value, at, "duration_ms")?,
            explicit_flag: required_bool(value, at, "explicit_flag")?,
            album,
            primary_artist: optional_artist(value, at, "primary_artist")?,
            artists: artist_seq(value, at, "artists")?,
            lyrics: optional_str(value, at, "lyrics")?,
            lyrics_fetched_status: LyricsFetchedStatus::validate_at(value, at)?,
            genre_tags: string_seq(value, at, "genre_tags")?,
            metadata: Metadata::validate_at(value, at)?,
        })
    }
}

impl Schema for Track {
    const NAME: &'static str = "track";

    fn validate(value: &Value) -> Result<Self, ValidationError> {
        Self::validate_at(value, "")
    }
}

/// Known lyric sources. Closed set: values outside it fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricSource {
    Genius,
    Lrclib,
    Netease,
}

impl LyricSource {
    pub const ALL: [Self; 3] = [Self::Genius, Self::Lrclib, Self::Netease];

    /// Wire identifier used in queries and responses.
    pub fn key(self) -> &'static str {
        match self {
            Self::Genius => "genius",
            Self::Lrclib => "lrclib",
            Self::Netease => "netease",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "genius" => Some(Self::Genius),
            "lrclib" => Some(Self::Lrclib),
            "netease" => Some(Self::Netease),
            _ => None,
        }
    }
}

/// Validated response from a lyric provider.
///
/// An empty `lyrics` string is a successful response: the calling workflow
/// treats it as "not found", never as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricResponse {
    pub source: LyricSource,
    pub title: String,
    pub artist: String,
    pub lyrics: String,
    pub url: Option<String>,
}

impl Schema for LyricResponse {
    const NAME: &'static str = "lyric response";

    fn validate(value: &Value) -> Result<Self, ValidationError> {
        expect_object(value, Self::NAME)?;
        let source_key = required_str(value, "", "source")?;
        let source = LyricSource::from_key(&source_key).ok_or_else(|| {
            ValidationError::new("source", format!("unknown lyric source `{source_key}`"))
        })?;
        let url = match optional_str(value, "", "url")? {
            Some(u) if is_absolute_url(&u) => Some(u),
            Some(u) => {
                return Err(ValidationError::new(
                    "url",
                    format!("expected absolute URL, got `{u}`"),
                ));
            }
            None => None,
        };
        Ok(Self {
            source,
            title: required_str(value, "", "title")?,
            artist: required_str(value, "", "artist")?,
            lyrics: required_str(value, "", "lyrics")?,
            url,
        })
    }
}

/// Audio search/preview result from a (future) audio provider.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioPreview {
    pub title: String,
    pub preview_url: String,
    pub duration_ms: Option<u64>,
    pub metadata: Metadata,
}

impl Schema for AudioPreview {
    const NAME: &'static str = "audio preview";

    fn validate(value: &Value) -> Result<Self, ValidationError> {
        expect_object(value, Self::NAME)?;
        let preview_url = required_str(value, "", "preview_url")?;
        if !is_absolute_url(&preview_url) {
            return Err(ValidationError::new(
                "preview_url",
                format!("expected absolute URL, got `{preview_url}`"),
            ));
        }
        Ok(Self {
            title: required_str(value, "", "title")?,
            preview_url,
            duration_ms: optional_u64(value, "", "duration_ms")?,
            metadata: Metadata::validate_at(value, "")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn album_without_title_fails_naming_title() {
        let err = Album::validate(&json!({"release_date": "2016-04-23"})).unwrap_err();
        assert_eq!(err.path, "title");
    }

    #[test]
    fn minimal_album_gets_defaults() {
        let album = Album::validate(&json!({"title": "Lemonade"})).unwrap();
        assert_eq!(album.title, "Lemonade");
        assert_eq!(album.genre_tags, Vec::<String>::new());
        assert!(album.artists.is_empty());
        assert!(album.tracks.is_empty());
        assert!(album.metadata.is_empty());
        assert!(album.primary_artist.is_none());
    }

    #[test]
    fn artist_missing_name_fails_not_empty_string() {
        let err = Artist::validate(&json!({"genre_tags": ["pop"]})).unwrap_err();
        assert_eq!(err.path, "name");
    }

    #[test]
    fn nested_artist_violations_carry_full_paths() {
        let err = Album::validate(&json!({
            "title": "Lemonade",
            "artists": [{"name": "Beyoncé"}, {"genre_tags": []}],
        }))
        .unwrap_err();
        assert_eq!(err.path, "artists.1.name");
    }

    #[test]
    fn track_requires_duration_and_explicit_flag() {
        let err = Track::validate(&json!({"title": "Formation"})).unwrap_err();
        assert_eq!(err.path, "duration_ms");

        let err = Track::validate(&json!({"title": "Formation", "duration_ms": 213000}))
            .unwrap_err();
        assert_eq!(err.path, "explicit_flag");

        let track = Track::validate(&json!({
            "title": "Formation",
            "duration_ms": 213000,
            "explicit_flag": true,
        }))
        .unwrap();
        assert_eq!(track.lyrics_fetched_status, LyricsFetchedStatus::NotFetched);
        assert!(track.album.is_none());
    }

    #[test]
    fn track_rejects_unknown_fetch_status() {
        let err = Track::validate(&json!({
            "title": "Formation",
            "duration_ms": 213000,
            "explicit_flag": true,
            "lyrics_fetched_status": "pending",
        }))
        .unwrap_err();
        assert_eq!(err.path, "lyrics_fetched_status");
        assert!(err.reason.contains("pending"));
    }

    #[test]
    fn track_album_ref_is_title_plus_metadata_only() {
        let track = Track::validate(&json!({
            "title": "Formation",
            "duration_ms": 213000,
            "explicit_flag": true,
            "album": {"title": "Lemonade", "metadata": {"provider_ids": {"spotify": "abc123"}}},
        }))
        .unwrap();
        let album = track.album.unwrap();
        assert_eq!(album.title, "Lemonade");
        assert_eq!(
            album.metadata.provider_ids().get("spotify").map(String::as_str),
            Some("abc123")
        );
    }

    #[test]
    fn metadata_preserves_unknown_keys() {
        let album = Album::validate(&json!({
            "title": "Lemonade",
            "metadata": {
                "provider_ids": {"spotify": "abc123"},
                "label": "Parkwood",
                "popularity": 88,
            },
        }))
        .unwrap();
        assert_eq!(
            album.metadata.get("label"),
            Some(&MetaValue::Str("Parkwood".to_string()))
        );
        assert_eq!(album.metadata.get("popularity"), Some(&MetaValue::Int(88)));
    }

    #[test]
    fn metadata_rejects_empty_provider_id() {
        let err = Album::validate(&json!({
            "title": "Lemonade",
            "metadata": {"provider_ids": {"spotify": ""}},
        }))
        .unwrap_err();
        assert_eq!(err.path, "metadata.provider_ids.spotify");
    }

    #[test]
    fn metadata_rejects_relative_urls() {
        let err = Album::validate(&json!({
            "title": "Lemonade",
            "metadata": {"urls": {"spotify": "open.spotify.com/album/abc123"}},
        }))
        .unwrap_err();
        assert_eq!(err.path, "metadata.urls.spotify");
    }

    #[test]
    fn audio_urls_accept_both_shapes() {
        let as_seq = Album::validate(&json!({
            "title": "Lemonade",
            "metadata": {"audio_urls": ["https://p.scdn.co/mp3-preview/1"]},
        }));
        assert!(as_seq.is_ok());

        let as_map = Album::validate(&json!({
            "title": "Lemonade",
            "metadata": {"audio_urls": {"spotify": "https://p.scdn.co/mp3-preview/1"}},
        }));
        assert!(as_map.is_ok());
    }

    #[test]
    fn lyric_response_accepts_empty_lyrics() {
        // An empty string is a valid, if uninteresting, string. The calling
        // workflow decides it means "not found".
        let response = LyricResponse::validate(&json!({
            "source": "genius",
            "title": "Formation",
            "artist": "Beyonce",
            "lyrics": "",
        }))
        .unwrap();
        assert_eq!(response.source, LyricSource::Genius);
        assert!(response.lyrics.is_empty());
    }

    #[test]
    fn lyric_response_rejects_unknown_source() {
        let err = LyricResponse::validate(&json!({
            "source": "karaoke-hut",
            "title": "Formation",
            "artist": "Beyonce",
            "lyrics": "ok ladies",
        }))
        .unwrap_err();
        assert_eq!(err.path, "source");
    }

    #[test]
    fn lyric_source_round_trips_keys() {
        for source in LyricSource::ALL {
            assert_eq!(LyricSource::from_key(source.key()), Some(source));
        }
        assert_eq!(LyricSource::from_key(" Genius "), Some(LyricSource::Genius));
        assert_eq!(LyricSource::from_key("azlyrics"), None);
    }

    #[test]
    fn audio_preview_requires_absolute_preview_url() {
        let err = AudioPreview::validate(&json!({
            "title": "Formation",
            "preview_url": "mp3-preview/1",
        }))
        .unwrap_err();
        assert_eq!(err.path, "preview_url");

        let preview = AudioPreview::validate(&json!({
            "title": "Formation",
            "preview_url": "https://p.scdn.co/mp3-preview/1",
            "duration_ms": 30000,
        }))
        .unwrap();
        assert_eq!(preview.duration_ms, Some(30000));
    }
}
