//! Files staged into storage buckets for downstream processing.

use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

/// Storage bucket a file is staged into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Supplier invoices.
    Invoices,
    /// Point-of-sale closing reports.
    PosReports,
}

impl Bucket {
    /// Bucket name on the storage service.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invoices => "invoices",
            Self::PosReports => "pos_reports",
        }
    }

    /// File picker hint listing the accepted formats.
    pub const fn accept_hint(self) -> &'static str {
        match self {
            Self::Invoices => ".pdf,.xml,image/*",
            Self::PosReports => ".pdf,.csv,image/*",
        }
    }

    /// Message shown once a file has been stored.
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Invoices => "File uploaded. The invoice is now in the processing queue.",
            Self::PosReports => {
                "File uploaded. The report will be processed; \"Crediário\" entries are ignored."
            }
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for files offered for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadValidationError {
    /// The file name is blank.
    EmptyName,
    /// The file name contains a path separator.
    NameContainsSeparator,
}

impl fmt::Display for UploadValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "file name must not be empty"),
            Self::NameContainsSeparator => write!(f, "file name must not contain '/'"),
        }
    }
}

impl std::error::Error for UploadValidationError {}

/// A file picked or captured by the user.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl UploadFile {
    /// Validate the file name and wrap the payload.
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, UploadValidationError> {
        let name = file_name.into();
        if name.trim().is_empty() {
            return Err(UploadValidationError::EmptyName);
        }
        if name.contains('/') {
            return Err(UploadValidationError::NameContainsSeparator);
        }
        Ok(Self {
            name,
            content_type,
            bytes,
        })
    }

    /// Original file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type reported by the picker, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// File contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Object key a staged file was written to.
///
/// Shaped `{bucket}/{YYYY-MM-DD}/{uuid}-{file name}`; the random segment
/// keeps same-day uploads of identically named files apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoragePath(String);

impl StoragePath {
    /// Compose a path from its parts.
    pub fn new(bucket: Bucket, date: NaiveDate, id: Uuid, file_name: &str) -> Self {
        Self(format!(
            "{bucket}/{date}/{id}-{file_name}",
            date = date.format("%Y-%m-%d")
        ))
    }

    /// Compose a path with a fresh random identifier.
    pub fn generate(bucket: Bucket, date: NaiveDate, file_name: &str) -> Self {
        Self::new(bucket, date, Uuid::new_v4(), file_name)
    }

    /// Borrow the object key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
