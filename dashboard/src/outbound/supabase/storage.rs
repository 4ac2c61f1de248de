//! Object storage adapter for the platform's storage API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use tracing::debug;

use super::http::{PlatformFailure, SupabaseClient, endpoint_from, send_empty};
use crate::domain::ports::{ObjectStorage, ObjectStorageError};
use crate::domain::{Bucket, StoragePath, UploadFile};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";
const CACHE_SECONDS: &str = "max-age=3600";

/// Storage API implementation of [`ObjectStorage`].
pub struct SupabaseObjectStorage {
    client: Arc<SupabaseClient>,
}

impl SupabaseObjectStorage {
    /// Create an adapter sharing `client`'s session.
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

fn object_url(base_url: &Url, bucket: Bucket, path: &StoragePath) -> Result<Url, PlatformFailure> {
    let mut segments = vec!["storage", "v1", "object", bucket.as_str()];
    segments.extend(path.as_str().split('/'));
    endpoint_from(base_url, &segments)
}

fn map_failure(failure: PlatformFailure, path: &StoragePath) -> ObjectStorageError {
    match failure {
        PlatformFailure::Status {
            duplicate: true, ..
        } => ObjectStorageError::already_exists(path.as_str()),
        PlatformFailure::Status { message, .. } => ObjectStorageError::rejected(message),
        PlatformFailure::Transport(message) | PlatformFailure::Decode(message) => {
            ObjectStorageError::transport(message)
        }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseObjectStorage {
    async fn upload(
        &self,
        bucket: Bucket,
        path: &StoragePath,
        file: &UploadFile,
    ) -> Result<(), ObjectStorageError> {
        let url = object_url(self.client.base_url(), bucket, path)
            .map_err(|failure| map_failure(failure, path))?;
        debug!(%bucket, %path, "writing object");
        let request = self
            .client
            .authorized(self.client.post(url))
            .await
            .map_err(|failure| map_failure(failure, path))?
            .header("x-upsert", "false")
            .header(CACHE_CONTROL, CACHE_SECONDS)
            .header(
                CONTENT_TYPE,
                file.content_type().unwrap_or(FALLBACK_CONTENT_TYPE),
            )
            .body(file.bytes().to_vec());
        send_empty(request)
            .await
            .map_err(|failure| map_failure(failure, path))
    }
}
