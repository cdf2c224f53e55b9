//! Field maps and transforms for Spotify's raw album/track/artist shapes.
//!
//! This is the only place that knows what Spotify payloads look like. Each
//! mapper is compiled once and reused: simple correspondences go through the
//! field map, while `primary_artist`, `artists`, the embedded album
//! reference, and `metadata` are assembled by transforms (metadata is built
//! from several independent registrations and combined by the merge
//! resolver).

use serde_json::{Value, json};

use crate::domain::{Album, Artist, Track};
use crate::mapping::{FieldMap, Mapper, Transforms, path};

/// Compiled mapper for Spotify album payloads.
pub fn album_mapper() -> Mapper<Album> {
    let field_map = FieldMap::new()
        .field("name", "title")
        .field("total_tracks", "total_tracks")
        .field("release_date", "release_date")
        .field("genres", "genre_tags");
    let transforms = Transforms::new()
        .derive("primary_artist", |_, raw| Ok(primary_artist(raw)))
        .derive("artists", |_, raw| Ok(artist_nodes(raw)))
        .derive("metadata", |_, raw| Ok(source_metadata(raw)))
        .derive("metadata", |_, raw| {
            let mut meta = empty_object();
            if let Some(n) = raw.get("total_tracks").and_then(Value::as_u64) {
                path::set(&mut meta, "total_tracks", json!(n));
            }
            Ok(meta)
        });
    Mapper::compile(field_map, transforms).expect("album field map is duplicate-free")
}

/// Compiled mapper for Spotify track payloads.
pub fn track_mapper() -> Mapper<Track> {
    let field_map = FieldMap::new()
        .field("name", "title")
        .field("external_ids.isrc", "isrc")
        .field("duration_ms", "duration_ms")
        .field("explicit", "explicit_flag");
    let transforms = Transforms::new()
        .derive("primary_artist", |_, raw| Ok(primary_artist(raw)))
        .derive("artists", |_, raw| Ok(artist_nodes(raw)))
        .derive("album", |_, raw| Ok(album_ref(raw)))
        .derive("metadata", |_, raw| Ok(source_metadata(raw)))
        .derive("metadata", |_, raw| {
            let mut meta = empty_object();
            if let Some(preview) = raw.get("preview_url").and_then(Value::as_str) {
                path::set(&mut meta, "audio_urls", json!([preview]));
            }
            Ok(meta)
        });
    Mapper::compile(field_map, transforms).expect("track field map is duplicate-free")
}

/// Compiled mapper for Spotify artist payloads.
pub fn artist_mapper() -> Mapper<Artist> {
    let field_map = FieldMap::new()
        .field("name", "name")
        .field("genres", "genre_tags");
    let transforms = Transforms::new().derive("metadata", |_, raw| Ok(source_metadata(raw)));
    Mapper::compile(field_map, transforms).expect("artist field map is duplicate-free")
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Spotify id and canonical web URL, under the recognized metadata keys.
fn source_metadata(raw: &Value) -> Value {
    let mut meta = empty_object();
    if let Some(id) = raw.get("id").and_then(Value::as_str) {
        path::set(&mut meta, "provider_ids.spotify", json!(id));
    }
    if let Some(url) = path::get(raw, "external_urls.spotify").and_then(Value::as_str) {
        path::set(&mut meta, "urls.spotify", json!(url));
    }
    meta
}

/// First credited artist, or null so the optional field stays absent.
fn primary_artist(raw: &Value) -> Value {
    path::get(raw, "artists.0")
        .and_then(artist_node)
        .unwrap_or(Value::Null)
}

/// All credited artists; entries without a name are dropped rather than
/// failing the whole payload.
fn artist_nodes(raw: &Value) -> Value {
    match raw.get("artists") {
        Some(Value::Array(items)) => {
            Value::Array(items.iter().filter_map(artist_node).collect())
        }
        _ => Value::Null,
    }
}

fn artist_node(raw_artist: &Value) -> Option<Value> {
    let name = raw_artist.get("name").and_then(Value::as_str)?;
    let mut node = json!({ "name": name });
    let ids = source_metadata(raw_artist);
    if ids.as_object().is_some_and(|m| !m.is_empty()) {
        path::set(&mut node, "metadata", ids);
    }
    Some(node)
}

/// Embedded album reference for a track: title plus source metadata.
fn album_ref(raw: &Value) -> Value {
    let Some(album) = raw.get("album") else {
        return Value::Null;
    };
    let Some(title) = album.get("name").and_then(Value::as_str) else {
        return Value::Null;
    };
    let mut node = json!({ "title": title });
    let meta = source_metadata(album);
    if meta.as_object().is_some_and(|m| !m.is_empty()) {
        path::set(&mut node, "metadata", meta);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LyricsFetchedStatus, MetaValue};

    fn lemonade() -> Value {
        json!({
            "name": "Lemonade",
            "artists": [{"name": "Beyoncé"}],
            "id": "abc123",
            "release_date": "2016-04-23",
            "genres": ["pop"],
            "external_urls": {"spotify": "https://open.spotify.com/album/abc123"},
            "total_tracks": 13,
        })
    }

    #[test]
    fn maps_a_full_album_payload() {
        let album = album_mapper().map(&lemonade()).unwrap();

        assert_eq!(album.title, "Lemonade");
        assert_eq!(album.release_date.as_deref(), Some("2016-04-23"));
        assert_eq!(album.genre_tags, vec!["pop"]);
        assert_eq!(album.total_tracks, Some(13));
        assert_eq!(
            album.primary_artist.as_ref().map(|a| a.name.as_str()),
            Some("Beyoncé")
        );
        assert_eq!(album.artists.len(), 1);

        let ids = album.metadata.provider_ids();
        assert_eq!(ids.get("spotify").map(String::as_str), Some("abc123"));
        let urls = album.metadata.urls();
        assert_eq!(
            urls.get("spotify").map(String::as_str),
            Some("https://open.spotify.com/album/abc123")
        );
        assert_eq!(album.metadata.get("total_tracks"), Some(&MetaValue::Int(13)));
    }

    #[test]
    fn album_mapping_is_idempotent_per_payload() {
        let mapper = album_mapper();
        let first = mapper.map(&lemonade()).unwrap();
        let second = mapper.map(&lemonade()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn album_without_name_fails_at_title() {
        let mut raw = lemonade();
        raw.as_object_mut().unwrap().remove("name");
        let err = album_mapper().map(&raw).unwrap_err();
        assert!(err.to_string().contains("`title`"));
    }

    #[test]
    fn album_with_no_artists_has_no_primary() {
        let album = album_mapper().map(&json!({"name": "Demo Tape"})).unwrap();
        assert!(album.primary_artist.is_none());
        assert!(album.artists.is_empty());
        assert!(album.metadata.provider_ids().is_empty());
    }

    #[test]
    fn maps_a_track_payload() {
        let track = track_mapper()
            .map(&json!({
                "name": "Formation",
                "id": "trk9",
                "duration_ms": 213000,
                "explicit": true,
                "external_ids": {"isrc": "USSM11600498"},
                "preview_url": "https://p.scdn.co/mp3-preview/trk9",
                "artists": [{"name": "Beyoncé", "id": "art1"}],
                "album": {"name": "Lemonade", "id": "abc123"},
            }))
            .unwrap();

        assert_eq!(track.title, "Formation");
        assert_eq!(track.isrc.as_deref(), Some("USSM11600498"));
        assert_eq!(track.duration_ms, 213000);
        assert!(track.explicit_flag);
        assert_eq!(track.lyrics_fetched_status, LyricsFetchedStatus::NotFetched);

        let album = track.album.unwrap();
        assert_eq!(album.title, "Lemonade");
        assert_eq!(
            album.metadata.provider_ids().get("spotify").map(String::as_str),
            Some("abc123")
        );

        let artist = &track.artists[0];
        assert_eq!(
            artist.metadata.provider_ids().get("spotify").map(String::as_str),
            Some("art1")
        );
        assert_eq!(
            track.metadata.get("audio_urls"),
            Some(&MetaValue::List(vec![MetaValue::Str(
                "https://p.scdn.co/mp3-preview/trk9".to_string()
            )]))
        );
    }

    #[test]
    fn simplified_track_listing_still_maps() {
        // /albums/{id}/tracks items carry no album or external_ids
        let track = track_mapper()
            .map(&json!({
                "name": "Hold Up",
                "id": "trk2",
                "duration_ms": 221000,
                "explicit": false,
                "artists": [{"name": "Beyoncé"}],
            }))
            .unwrap();
        assert!(track.isrc.is_none());
        assert!(track.album.is_none());
    }

    #[test]
    fn maps_an_artist_payload() {
        let artist = artist_mapper()
            .map(&json!({
                "name": "Beyoncé",
                "id": "art1",
                "genres": ["pop", "r&b"],
                "external_urls": {"spotify": "https://open.spotify.com/artist/art1"},
            }))
            .unwrap();
        assert_eq!(artist.name, "Beyoncé");
        assert_eq!(artist.genre_tags, vec!["pop", "r&b"]);
        assert_eq!(
            artist.metadata.provider_ids().get("spotify").map(String::as_str),
            Some("art1")
        );
    }

    #[test]
    fn artist_without_name_fails_naming_name() {
        let err = artist_mapper().map(&json!({"id": "art1"})).unwrap_err();
        assert!(err.to_string().contains("`name`"));
    }
}
