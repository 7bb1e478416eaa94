//! Mood-to-music suggestions backed by the Spotify client-credentials flow.
//!
//! The mood-to-playlist table is injected configuration, not a compiled-in
//! constant; see `Config::mood_playlists` for the defaults and overrides.

pub mod client;
pub mod handlers;
pub mod service;

pub use service::MusicService;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The moods a caller can ask music for. Serialized with their canonical
/// capitalized names ("Peaceful"), which is also how the playlist table is
/// keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Peaceful,
    Motivated,
    Happy,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Peaceful => "Peaceful",
            Mood::Motivated => "Motivated",
            Mood::Happy => "Happy",
        }
    }
}

/// A bearer credential as the token endpoint returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyToken {
    pub access_token: String,
    pub token_type: String,
    /// Declared lifetime in seconds. Honored: the cache refreshes before
    /// this runs out.
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub album: Album,
    pub artists: Vec<Artist>,
    /// 30-second preview clip; absent for tracks without one.
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Album {
    pub images: Vec<AlbumImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlbumImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    pub name: String,
}

/// The two-step music API seam: credential exchange, then playlist reads
/// under that credential.
#[async_trait]
pub trait MusicGateway: Send + Sync {
    /// Client-credentials exchange. Failures here are auth failures and
    /// abort the whole suggestion.
    async fn exchange_credentials(&self) -> Result<SpotifyToken, AppError>;

    /// One playlist's tracks. `authorization` is the full header value,
    /// token type included.
    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        authorization: &str,
    ) -> Result<Vec<Track>, AppError>;
}
