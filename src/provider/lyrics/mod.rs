//! Lyrics microservice adapter.

pub mod client;

pub use client::{LyricsClient, LyricsConfig};
