use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::errors::AppError;

use super::{Mood, MusicGateway, Track};

/// Refresh this many seconds before the token's declared expiry, so a
/// request never goes out with a credential about to die mid-flight.
const EXPIRY_BUFFER_SECS: u64 = 60;

struct CachedToken {
    /// Full Authorization header value: "{token_type} {access_token}".
    header: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Mood-to-track suggestions. Holds one cached credential for the whole
/// process; the playlist table comes in from configuration.
pub struct MusicService {
    gateway: Arc<dyn MusicGateway>,
    playlists: HashMap<String, String>,
    token: Mutex<Option<CachedToken>>,
}

impl MusicService {
    pub fn new(gateway: Arc<dyn MusicGateway>, playlists: HashMap<String, String>) -> Self {
        Self {
            gateway,
            playlists,
            token: Mutex::new(None),
        }
    }

    /// Tracks for one mood: resolve the playlist, ensure a live credential,
    /// fetch. Credential failure aborts before any playlist fetch.
    pub async fn suggest(&self, mood: Mood) -> Result<Vec<Track>, AppError> {
        let playlist_id = self
            .playlists
            .get(mood.as_str())
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "No playlist configured for mood {}",
                    mood.as_str()
                ))
            })?
            .clone();

        let authorization = self.authorization().await?;
        let tracks = self
            .gateway
            .playlist_tracks(&playlist_id, &authorization)
            .await?;

        info!(
            "suggested {} tracks for mood {} (playlist {playlist_id})",
            tracks.len(),
            mood.as_str()
        );
        Ok(tracks)
    }

    /// The cached Authorization header, refreshed via credential exchange
    /// when missing or within the expiry buffer. The lock is held across
    /// the exchange, so concurrent callers cannot stampede the token
    /// endpoint.
    async fn authorization(&self) -> Result<String, AppError> {
        let mut slot = self.token.lock().await;
        if let Some(cached) = slot.as_ref() {
            if cached.is_fresh() {
                return Ok(cached.header.clone());
            }
            debug!("cached music token expired, re-exchanging credentials");
        }

        let token = self.gateway.exchange_credentials().await?;
        let header = format!("{} {}", token.token_type, token.access_token);
        let lifetime = Duration::from_secs(token.expires_in.saturating_sub(EXPIRY_BUFFER_SECS));
        *slot = Some(CachedToken {
            header: header.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(header)
    }
}
