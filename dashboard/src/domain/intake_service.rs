//! File intake service staging uploads into dated storage paths.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::{FileIntakeCommand, ObjectStorage, ObjectStorageError};
use crate::domain::{Bucket, Error, StoragePath, UploadFile};

/// Intake service implementing the [`FileIntakeCommand`] driving port.
pub struct IntakeService<S> {
    storage: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> IntakeService<S> {
    /// Create a service writing to `storage`, dating paths with `clock`.
    pub fn new(storage: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }
}

fn map_storage_error(error: ObjectStorageError) -> Error {
    match error {
        ObjectStorageError::Transport { message } | ObjectStorageError::Rejected { message } => {
            Error::external_service(message)
        }
        ObjectStorageError::AlreadyExists { path } => {
            Error::external_service(format!("an object already exists at {path}"))
        }
    }
}

#[async_trait]
impl<S> FileIntakeCommand for IntakeService<S>
where
    S: ObjectStorage,
{
    async fn stage(&self, bucket: Bucket, file: &UploadFile) -> Result<StoragePath, Error> {
        // The date segment is the UTC calendar day, matching ISO timestamps.
        let path = StoragePath::generate(bucket, self.clock.utc().date_naive(), file.name());
        debug!(%bucket, %path, bytes = file.bytes().len(), "uploading file");
        self.storage
            .upload(bucket, &path, file)
            .await
            .map_err(|err| {
                warn!(%bucket, error = %err, "upload failed");
                map_storage_error(err)
            })?;
        Ok(path)
    }
}
