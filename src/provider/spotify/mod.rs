//! Spotify catalog adapter.
//!
//! `client` owns HTTP; `mapper` owns the field-map/transform configuration
//! that rewrites Spotify's raw shapes into the domain model. The trait
//! wiring that makes this adapter interchangeable with any other
//! [`MusicProvider`](crate::provider::MusicProvider) lives in
//! `provider::traits`.

pub mod client;
pub mod mapper;

pub use client::{SpotifyClient, SpotifyConfig};
