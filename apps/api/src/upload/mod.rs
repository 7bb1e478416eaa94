//! Media upload. The object-storage write and the audio probe run
//! concurrently; the upload succeeds only when both do. Audio presence is
//! decided once here, at upload time, and stored with the video row.

pub mod handlers;
pub mod probe;
pub mod s3;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::notices::Notice;

/// Where uploaded bytes land. Public objects get a world-readable URL;
/// private ones live under a prefix the CDN does not serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

/// An incoming file, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// What the caller persists alongside their content row. `notice` is the
/// non-fatal advisory channel (currently only "silent video").
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub url: String,
    pub has_audio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Object storage seam. Returns the URL the stored object is reachable at.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn store(&self, visibility: Visibility, file: &UploadFile) -> Result<String, AppError>;
}

/// Answers whether a media file carries an audio track. Implementations
/// must treat non-media and unknown formats as "no audio", not as errors.
#[async_trait]
pub trait AudioProbe: Send + Sync {
    async fn has_audio(&self, file: &UploadFile) -> Result<bool, AppError>;
}

pub struct UploadService {
    store: Arc<dyn MediaStore>,
    probe: Arc<dyn AudioProbe>,
}

impl UploadService {
    pub fn new(store: Arc<dyn MediaStore>, probe: Arc<dyn AudioProbe>) -> Self {
        Self { store, probe }
    }

    /// Uploads one file. Storage write and audio probe are issued together;
    /// a failure in either fails the whole upload. A video that probes
    /// silent still succeeds, carrying an advisory notice.
    pub async fn upload(
        &self,
        visibility: Visibility,
        file: UploadFile,
    ) -> Result<UploadOutcome, AppError> {
        if file.bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }

        let (url, has_audio) = tokio::try_join!(
            self.store.store(visibility, &file),
            self.probe.has_audio(&file),
        )?;

        let notice = (file.content_type.starts_with("video/") && !has_audio)
            .then(|| Notice::advisory("This video does not have audio."));

        info!(
            "stored {} upload '{}' ({} bytes, audio: {has_audio})",
            visibility.as_str(),
            file.filename,
            file.bytes.len()
        );

        Ok(UploadOutcome {
            url,
            has_audio,
            notice,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::notices::NoticeLevel;

    use super::*;

    struct FakeStore {
        delay: Duration,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakeStore {
        fn ok() -> Self {
            Self {
                delay: Duration::ZERO,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MediaStore for FakeStore {
        async fn store(
            &self,
            visibility: Visibility,
            file: &UploadFile,
        ) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(AppError::Storage("bucket unavailable".to_string()));
            }
            Ok(format!(
                "https://cdn.example/{}/{}",
                visibility.as_str(),
                file.filename
            ))
        }
    }

    struct FakeProbe {
        delay: Duration,
        fail: bool,
        has_audio: bool,
        calls: AtomicUsize,
    }

    impl FakeProbe {
        fn hearing(has_audio: bool) -> Self {
            Self {
                delay: Duration::ZERO,
                fail: false,
                has_audio,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AudioProbe for FakeProbe {
        async fn has_audio(&self, _file: &UploadFile) -> Result<bool, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(AppError::Network("probe unreachable".to_string()));
            }
            Ok(self.has_audio)
        }
    }

    fn service(store: FakeStore, probe: FakeProbe) -> (UploadService, Arc<FakeStore>, Arc<FakeProbe>)
    {
        let store = Arc::new(store);
        let probe = Arc::new(probe);
        (
            UploadService::new(store.clone(), probe.clone()),
            store,
            probe,
        )
    }

    fn video(name: &str) -> UploadFile {
        UploadFile {
            filename: name.to_string(),
            content_type: "video/mp4".to_string(),
            bytes: Bytes::from_static(b"not really mpeg4"),
        }
    }

    fn png(name: &str) -> UploadFile {
        UploadFile {
            filename: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: Bytes::from_static(b"not really png"),
        }
    }

    #[tokio::test]
    async fn silent_video_succeeds_with_advisory() {
        let (svc, _, _) = service(FakeStore::ok(), FakeProbe::hearing(false));

        let outcome = svc
            .upload(Visibility::Public, video("run.mp4"))
            .await
            .unwrap();

        assert!(!outcome.has_audio);
        assert_eq!(outcome.url, "https://cdn.example/public/run.mp4");
        let notice = outcome.notice.expect("silent video should carry a notice");
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "This video does not have audio.");
    }

    #[tokio::test]
    async fn audible_video_carries_no_notice() {
        let (svc, _, _) = service(FakeStore::ok(), FakeProbe::hearing(true));

        let outcome = svc
            .upload(Visibility::Public, video("talk.mp4"))
            .await
            .unwrap();

        assert!(outcome.has_audio);
        assert!(outcome.notice.is_none());
    }

    #[tokio::test]
    async fn silent_non_video_carries_no_notice() {
        let (svc, _, _) = service(FakeStore::ok(), FakeProbe::hearing(false));

        let outcome = svc
            .upload(Visibility::Private, png("board.png"))
            .await
            .unwrap();

        assert!(!outcome.has_audio);
        assert!(outcome.notice.is_none());
        assert!(outcome.url.contains("/private/"));
    }

    #[tokio::test]
    async fn store_failure_fails_the_upload() {
        let mut store = FakeStore::ok();
        store.fail = true;
        let (svc, _, _) = service(store, FakeProbe::hearing(true));

        let err = svc
            .upload(Visibility::Public, video("run.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }

    #[tokio::test]
    async fn probe_failure_fails_the_upload_even_when_storage_succeeds() {
        let mut probe = FakeProbe::hearing(true);
        probe.fail = true;
        let (svc, store, _) = service(FakeStore::ok(), probe);

        let err = svc
            .upload(Visibility::Public, video("run.mp4"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Network(_)));
        // Both legs were issued; success of one does not mask the other.
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn store_and_probe_run_concurrently() {
        let mut store = FakeStore::ok();
        store.delay = Duration::from_millis(50);
        let mut probe = FakeProbe::hearing(true);
        probe.delay = Duration::from_millis(50);
        let (svc, _, _) = service(store, probe);

        let started = tokio::time::Instant::now();
        svc.upload(Visibility::Public, video("run.mp4"))
            .await
            .unwrap();

        // Sequential legs would take 100ms of virtual time.
        assert!(started.elapsed() < Duration::from_millis(80));
    }

    #[tokio::test]
    async fn empty_file_is_rejected_before_any_io() {
        let (svc, store, probe) = service(FakeStore::ok(), FakeProbe::hearing(true));

        let err = svc
            .upload(
                Visibility::Public,
                UploadFile {
                    filename: "empty.mp4".to_string(),
                    content_type: "video/mp4".to_string(),
                    bytes: Bytes::new(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }
}
