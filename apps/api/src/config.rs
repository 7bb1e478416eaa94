use std::collections::HashMap;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub s3_public_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_accounts_url: String,
    pub spotify_api_url: String,
    pub anthropic_api_key: String,
    pub audio_probe_url: String,
    /// Mood name -> Spotify playlist id, defaults overridable via
    /// MOOD_PLAYLISTS ("Peaceful=id,Motivated=id,...").
    pub mood_playlists: HashMap<String, String>,
    pub fetch_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            s3_public_url: require_env("S3_PUBLIC_URL")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            spotify_client_id: require_env("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: require_env("SPOTIFY_CLIENT_SECRET")?,
            spotify_accounts_url: std::env::var("SPOTIFY_ACCOUNTS_URL")
                .unwrap_or_else(|_| "https://accounts.spotify.com".to_string()),
            spotify_api_url: std::env::var("SPOTIFY_API_URL")
                .unwrap_or_else(|_| "https://api.spotify.com".to_string()),
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            audio_probe_url: require_env("AUDIO_PROBE_URL")?,
            mood_playlists: mood_playlists(std::env::var("MOOD_PLAYLISTS").ok().as_deref()),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u64>()
                .context("FETCH_TIMEOUT_SECS must be a number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Built-in mood map, merged with any `MOOD_PLAYLISTS` overrides.
fn mood_playlists(overrides: Option<&str>) -> HashMap<String, String> {
    let mut map: HashMap<String, String> = [
        ("Peaceful", "37i9dQZF1DX3rxVfibe1L0"),
        ("Motivated", "37i9dQZF1DXdxcBWuJkbcy"),
        ("Happy", "37i9dQZF1DX3rxVfibe1L0"),
    ]
    .into_iter()
    .map(|(mood, playlist)| (mood.to_string(), playlist.to_string()))
    .collect();

    if let Some(raw) = overrides {
        for pair in raw.split(',') {
            if let Some((mood, playlist)) = pair.split_once('=') {
                let (mood, playlist) = (mood.trim(), playlist.trim());
                if !mood.is_empty() && !playlist.is_empty() {
                    map.insert(mood.to_string(), playlist.to_string());
                }
            }
        }
    }

    map
}
