use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;

use super::{AudioProbe, UploadFile};

const PROBE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ProbeResponse {
    #[serde(rename = "hasAudio")]
    has_audio: bool,
}

/// Delegates audio detection to the media-probe service (ffprobe behind an
/// HTTP endpoint). The file goes over as the `file` multipart field; the
/// service answers `{"hasAudio": bool}` for anything it can read and
/// `false` for formats it cannot.
pub struct HttpAudioProbe {
    client: Client,
    endpoint: String,
}

impl HttpAudioProbe {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(PROBE_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
        }
    }
}

#[async_trait]
impl AudioProbe for HttpAudioProbe {
    async fn has_audio(&self, file: &UploadFile) -> Result<bool, AppError> {
        let part = Part::stream(file.bytes.clone())
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)
            .map_err(|e| AppError::Validation(format!("Invalid content type: {e}")))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Audio probe unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Network(format!(
                "Audio probe returned {status}: {body}"
            )));
        }

        let probe: ProbeResponse = response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("Audio probe returned malformed JSON: {e}")))?;

        debug!("audio probe for '{}': {}", file.filename, probe.has_audio);
        Ok(probe.has_audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_probe_payload() {
        let probe: ProbeResponse = serde_json::from_str(r#"{"hasAudio": true}"#).unwrap();
        assert!(probe.has_audio);
        let probe: ProbeResponse = serde_json::from_str(r#"{"hasAudio": false}"#).unwrap();
        assert!(!probe.has_audio);
    }
}
