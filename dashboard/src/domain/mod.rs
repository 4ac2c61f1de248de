//! Domain primitives, rules and services.
//!
//! Purpose: model the dashboard's entities (profiles, transactions, summary
//! rows, staged files) with validated constructors, and implement the use
//! cases behind the driving ports. Nothing here knows about HTTP or the
//! hosted platform; adapters plug in through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: failure type returned by every use case.
//! - Access / UserProfile / Role: who the session acts as.
//! - Amount / format_brl: exact currency parsing and rendering.
//! - DateRange / month_start / month_end: calendar arithmetic.
//! - Services: ProfileResolver, SummaryService, EntryService, LedgerService,
//!   IntakeService and SessionService.

pub mod auth;
pub mod calendar;
pub mod entry_service;
pub mod error;
pub mod intake_service;
pub mod ledger_service;
pub mod money;
pub mod ports;
pub mod profile;
pub mod profile_resolver;
pub mod session_service;
pub mod summary;
pub mod summary_service;
pub mod transaction;
pub mod upload;
pub mod user;

pub use self::auth::{CredentialsValidationError, EmailAddress, LoginCredentials};
pub use self::calendar::{CalendarError, DateRange, month_end, month_start};
pub use self::entry_service::EntryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::intake_service::IntakeService;
pub use self::ledger_service::LedgerService;
pub use self::money::{Amount, AmountValidationError, format_brl};
pub use self::profile::{Access, Role, UserProfile};
pub use self::profile_resolver::ProfileResolver;
pub use self::session_service::SessionService;
pub use self::summary::{
    DailySummaryRow, DashboardSummary, SummaryOverflow, SummaryRequest, Totals,
};
pub use self::summary_service::SummaryService;
pub use self::transaction::{
    Category, CategoryId, NewTransaction, PaymentMethod, Transaction, TransactionDraft,
    TransactionId, TransactionKind, categories_for_kind,
};
pub use self::upload::{Bucket, StoragePath, UploadFile, UploadValidationError};
pub use self::user::{IdentifierValidationError, OrganizationId, Principal, UserId};
