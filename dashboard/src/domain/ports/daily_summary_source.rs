//! Port for the precomputed per-day summary view.

use async_trait::async_trait;

use crate::domain::{DailySummaryRow, DateRange, OrganizationId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by daily summary adapters.
    pub enum DailySummarySourceError {
        /// The data service could not be reached.
        Transport { message: String } =>
            "daily summary request failed: {message}",
        /// The data service refused the query.
        Rejected { message: String } =>
            "daily summary request rejected: {message}",
        /// A returned row could not be decoded.
        Decode { message: String } =>
            "daily summary row could not be decoded: {message}",
    }
}

/// Port for reading summary rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DailySummarySource: Send + Sync {
    /// Rows of `organization_id` whose day lies in `range`, oldest first.
    async fn fetch_range(
        &self,
        organization_id: &OrganizationId,
        range: &DateRange,
    ) -> Result<Vec<DailySummaryRow>, DailySummarySourceError>;
}
