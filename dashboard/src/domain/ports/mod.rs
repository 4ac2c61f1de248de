//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe the hosted platform the client talks to (identity,
//! tables, storage) plus the camera. Each exposes a typed error so adapters
//! map transport failures into predictable variants. Driving ports are the
//! use cases the view models call.

mod macros;

mod access_query;
mod capture_device;
mod categories_query;
mod category_repository;
mod daily_summary_source;
mod entry_command;
mod file_intake_command;
mod identity_provider;
mod object_storage;
mod profile_repository;
mod session_command;
mod summary_query;
mod transaction_repository;
mod transactions_query;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use access_query::MockAccessQuery;
pub use access_query::AccessQuery;
#[cfg(test)]
pub use capture_device::{MockCaptureDevice, MockCaptureStream};
pub use capture_device::{CaptureDevice, CaptureDeviceError, CaptureStream, CapturedFrame};
#[cfg(test)]
pub use categories_query::MockCategoriesQuery;
pub use categories_query::CategoriesQuery;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError};
#[cfg(test)]
pub use daily_summary_source::MockDailySummarySource;
pub use daily_summary_source::{DailySummarySource, DailySummarySourceError};
#[cfg(test)]
pub use entry_command::MockEntryCommand;
pub use entry_command::EntryCommand;
#[cfg(test)]
pub use file_intake_command::MockFileIntakeCommand;
pub use file_intake_command::FileIntakeCommand;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError, SessionChanges};
#[cfg(test)]
pub use object_storage::MockObjectStorage;
pub use object_storage::{ObjectStorage, ObjectStorageError};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use session_command::MockSessionCommand;
pub use session_command::SessionCommand;
#[cfg(test)]
pub use summary_query::MockSummaryQuery;
pub use summary_query::SummaryQuery;
#[cfg(test)]
pub use transaction_repository::MockTransactionRepository;
pub use transaction_repository::{TransactionRepository, TransactionRepositoryError};
#[cfg(test)]
pub use transactions_query::MockTransactionsQuery;
pub use transactions_query::TransactionsQuery;
