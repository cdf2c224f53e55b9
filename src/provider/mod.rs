//! Provider adapters: the boundary between external catalogs and the
//! mapping engine.
//!
//! # Architecture
//!
//! - **Traits** (`traits.rs`) - the capability contracts every source must
//!   satisfy; workflows depend only on these
//! - **Adapters** (`spotify/`, `lyrics/`) - one module per external source,
//!   each split into an HTTP client and a mapping configuration
//! - **Normalization** (`normalize.rs`) - makes title/artist query keys
//!   comparable across sources
//!
//! Adapters perform network I/O and are async; the mapping step they hand
//! their bodies to is pure and synchronous. Failed upstream calls surface
//! immediately - no retry, no backoff, no caching at this layer.

pub mod lyrics;
pub mod normalize;
pub mod spotify;
pub mod traits;

pub use lyrics::{LyricsClient, LyricsConfig};
pub use normalize::normalize;
pub use spotify::{SpotifyClient, SpotifyConfig};
pub use traits::{AudioProvider, LyricProvider, MusicProvider};
