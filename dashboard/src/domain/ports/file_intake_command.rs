//! Driving port for staging files into storage.

use async_trait::async_trait;

use crate::domain::{Bucket, Error, StoragePath, UploadFile};

/// Use-case port for file intake.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileIntakeCommand: Send + Sync {
    /// Store `file` under a fresh dated path in `bucket`.
    ///
    /// Success means the file is stored, not that it has been processed.
    async fn stage(&self, bucket: Bucket, file: &UploadFile) -> Result<StoragePath, Error>;
}
