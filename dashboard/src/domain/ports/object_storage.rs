//! Port for the object store that receives uploaded files.

use async_trait::async_trait;

use crate::domain::{Bucket, StoragePath, UploadFile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by object storage adapters.
    pub enum ObjectStorageError {
        /// The storage service could not be reached.
        Transport { message: String } =>
            "storage request failed: {message}",
        /// The storage service refused the upload.
        Rejected { message: String } =>
            "storage rejected the upload: {message}",
        /// An object already exists at the requested path.
        AlreadyExists { path: String } =>
            "an object already exists at {path}",
    }
}

/// Port for writing objects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `file` at `path` inside `bucket` without overwriting.
    async fn upload(
        &self,
        bucket: Bucket,
        path: &StoragePath,
        file: &UploadFile,
    ) -> Result<(), ObjectStorageError>;
}
