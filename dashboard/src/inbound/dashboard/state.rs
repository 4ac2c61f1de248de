//! Shared view-layer state.
//!
//! View models accept [`DashboardPorts`] so they depend only on driving
//! ports (use cases) and stay testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccessQuery, CaptureDevice, CategoriesQuery, EntryCommand, FileIntakeCommand, SessionCommand,
    SummaryQuery, TransactionsQuery,
};

/// Dependency bundle for the dashboard view models.
#[derive(Clone)]
pub struct DashboardPorts {
    /// Resolves who the session acts as.
    pub access: Arc<dyn AccessQuery>,
    /// Sign-in, reset and sign-out.
    pub session: Arc<dyn SessionCommand>,
    /// Owner summary cards.
    pub summary: Arc<dyn SummaryQuery>,
    /// Recent transaction list.
    pub transactions: Arc<dyn TransactionsQuery>,
    /// Category catalog for the entry form.
    pub categories: Arc<dyn CategoriesQuery>,
    /// Manual entry submission.
    pub entries: Arc<dyn EntryCommand>,
    /// File staging.
    pub intake: Arc<dyn FileIntakeCommand>,
    /// Camera, when the platform has one.
    pub camera: Option<Arc<dyn CaptureDevice>>,
    /// Wall clock for "today" and capture names.
    pub clock: Arc<dyn Clock>,
    /// Row cap for the transaction table.
    pub recent_transactions_limit: usize,
}
