//! Cratedigger - the field-mapping and normalization core of a
//! music-metadata curation tool.
//!
//! Heterogeneous, loosely-typed payloads from external catalogs (Spotify, a
//! lyrics microservice, a future audio-search source) are rewritten into a
//! single validated domain model. The pieces:
//!
//! - [`mapping`] - the engine: dot-path access over raw JSON trees, a
//!   compiler that turns a declarative field map plus per-path transforms
//!   into a reusable mapper, and merge rules for colliding transform
//!   outputs
//! - [`domain`] - the canonical shapes (Artist, Album, Track, lyric and
//!   audio-preview responses) and the validation gate every mapped object
//!   must pass before it is trusted anywhere else
//! - [`provider`] - the capability traits every external source implements,
//!   the concrete Spotify and lyrics adapters, and the text normalization
//!   that makes query keys comparable across sources
//! - [`error`] - the `MappingError` / `ValidationError` / `ProviderError`
//!   taxonomy
//!
//! The engine itself does no I/O, caches nothing, and retries nothing; a
//! compiled [`mapping::Mapper`] is immutable and safe to share across
//! tasks.
//!
//! # Example
//!
//! ```
//! use cratedigger::domain::Album;
//! use cratedigger::mapping::{FieldMap, Mapper, Transforms};
//! use serde_json::json;
//!
//! let field_map = FieldMap::new()
//!     .field("name", "title")
//!     .field("genres", "genre_tags");
//! let mapper: Mapper<Album> = Mapper::compile(field_map, Transforms::new()).unwrap();
//!
//! let album = mapper
//!     .map(&json!({"name": "Lemonade", "genres": ["pop"]}))
//!     .unwrap();
//! assert_eq!(album.title, "Lemonade");
//! ```

pub mod domain;
pub mod error;
pub mod mapping;
pub mod provider;

pub use domain::{
    Album, AlbumRef, Artist, AudioPreview, LyricResponse, LyricSource, LyricsFetchedStatus,
    MetaValue, Metadata, Schema, Track,
};
pub use error::{Error, MappingError, ProviderError, Result, ValidationError};
pub use mapping::{FieldMap, Mapper, Transforms};
pub use provider::{AudioProvider, LyricProvider, MusicProvider, normalize};
