//! Driving port for the owner's income and expense summary.

use async_trait::async_trait;

use crate::domain::{Access, DashboardSummary, Error, SummaryRequest};

/// Use-case port for dashboard summaries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SummaryQuery: Send + Sync {
    /// Summarise `request` for `access`.
    ///
    /// Returns `Ok(None)` without querying anything unless `access` is an
    /// owner.
    async fn summarize(
        &self,
        access: &Access,
        request: &SummaryRequest,
    ) -> Result<Option<DashboardSummary>, Error>;
}
