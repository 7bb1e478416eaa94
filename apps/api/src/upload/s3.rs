use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

use super::{MediaStore, UploadFile, Visibility};

/// S3/MinIO-backed media store. Objects land under
/// `uploads/{visibility}/{uuid}/{filename}` and are addressed through the
/// configured public base URL.
pub struct S3MediaStore {
    client: S3Client,
    bucket: String,
    public_url: String,
}

impl S3MediaStore {
    pub fn new(client: S3Client, bucket: String, public_url: String) -> Self {
        Self {
            client,
            bucket,
            public_url,
        }
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn store(&self, visibility: Visibility, file: &UploadFile) -> Result<String, AppError> {
        let key = object_key(visibility, Uuid::new_v4(), &file.filename);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(file.bytes.clone()))
            .content_type(&file.content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded media to s3://{}/{}", self.bucket, key);

        Ok(format!(
            "{}/{}/{}",
            self.public_url.trim_end_matches('/'),
            self.bucket,
            key
        ))
    }
}

/// Object key for one upload. The uuid segment keeps same-named files from
/// colliding; the filename segment keeps downloads human-readable. Client
/// names are reduced to their last path segment.
fn object_key(visibility: Visibility, id: Uuid, filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("upload.bin");
    format!("uploads/{}/{}/{}", visibility.as_str(), id, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_carries_visibility_uuid_and_name() {
        let id = Uuid::new_v4();
        let key = object_key(Visibility::Public, id, "clip.mp4");
        assert_eq!(key, format!("uploads/public/{id}/clip.mp4"));
    }

    #[test]
    fn client_paths_are_reduced_to_the_filename() {
        let id = Uuid::new_v4();
        assert!(object_key(Visibility::Private, id, "a/b/clip.mp4").ends_with("/clip.mp4"));
        assert!(
            object_key(Visibility::Private, id, "C:\\Users\\me\\clip.mp4").ends_with("/clip.mp4")
        );
        assert!(!object_key(Visibility::Private, id, "a/b/clip.mp4").contains("/a/b/"));
    }

    #[test]
    fn nameless_uploads_get_a_fallback() {
        let key = object_key(Visibility::Public, Uuid::new_v4(), "path/ends/in/");
        assert!(key.ends_with("/upload.bin"));
    }
}
