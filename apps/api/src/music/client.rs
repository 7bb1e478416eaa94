use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::AppError;

use super::{MusicGateway, SpotifyToken, Track};

const SPOTIFY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct PlaylistResponse {
    items: Vec<PlaylistItem>,
}

/// Playlist entries wrap their track; the track is null for entries whose
/// underlying song was removed from the catalog.
#[derive(Debug, Deserialize)]
struct PlaylistItem {
    track: Option<Track>,
}

/// Talks to the real Spotify endpoints. Base URLs are injected so tests and
/// staging can point elsewhere.
pub struct SpotifyGateway {
    client: Client,
    client_id: String,
    client_secret: String,
    accounts_url: String,
    api_url: String,
}

impl SpotifyGateway {
    pub fn new(
        client_id: String,
        client_secret: String,
        accounts_url: String,
        api_url: String,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(SPOTIFY_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            client_id,
            client_secret,
            accounts_url,
            api_url,
        }
    }
}

#[async_trait]
impl MusicGateway for SpotifyGateway {
    async fn exchange_credentials(&self) -> Result<SpotifyToken, AppError> {
        let response = self
            .client
            .post(format!(
                "{}/api/token",
                self.accounts_url.trim_end_matches('/')
            ))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Spotify token endpoint unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Auth(format!(
                "Spotify token exchange returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Spotify token response malformed: {e}")))
    }

    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        authorization: &str,
    ) -> Result<Vec<Track>, AppError> {
        let response = self
            .client
            .get(format!(
                "{}/v1/playlists/{playlist_id}/tracks",
                self.api_url.trim_end_matches('/')
            ))
            .header(reqwest::header::AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Spotify API unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Network(format!(
                "Spotify playlist fetch returned {status}: {body}"
            )));
        }

        let playlist: PlaylistResponse = response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("Spotify playlist response malformed: {e}")))?;

        Ok(playlist
            .items
            .into_iter()
            .filter_map(|item| item.track)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_items_unwrap_and_skip_removed_tracks() {
        let raw = r#"{
            "items": [
                {"track": {
                    "id": "t1",
                    "name": "Weightless",
                    "album": {"images": [{"url": "https://i.scdn.co/image/a"}]},
                    "artists": [{"name": "Marconi Union"}],
                    "preview_url": "https://p.scdn.co/mp3-preview/x"
                }},
                {"track": null},
                {"track": {
                    "id": "t2",
                    "name": "Clair de Lune",
                    "album": {"images": []},
                    "artists": [{"name": "Debussy"}],
                    "preview_url": null
                }}
            ]
        }"#;

        let playlist: PlaylistResponse = serde_json::from_str(raw).unwrap();
        let tracks: Vec<Track> = playlist.items.into_iter().filter_map(|i| i.track).collect();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].name, "Weightless");
        assert_eq!(tracks[0].artists[0].name, "Marconi Union");
        assert!(tracks[1].preview_url.is_none());
    }

    #[test]
    fn token_payload_uses_spotify_field_names() {
        let token: SpotifyToken = serde_json::from_str(
            r#"{"access_token": "abc", "token_type": "Bearer", "expires_in": 3600}"#,
        )
        .unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3600);
    }
}
