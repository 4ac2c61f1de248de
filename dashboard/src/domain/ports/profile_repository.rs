//! Port for reading authorization profiles.

use async_trait::async_trait;

use crate::domain::{UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// The data service could not be reached.
        Transport { message: String } =>
            "profile lookup failed: {message}",
        /// The data service refused the query.
        Rejected { message: String } =>
            "profile lookup rejected: {message}",
        /// A returned row could not be decoded.
        Decode { message: String } =>
            "profile row could not be decoded: {message}",
    }
}

/// Port for profile lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch up to `limit` profiles belonging to `user_id`.
    ///
    /// Callers ask for more than one row so duplicates can be detected
    /// rather than silently picking one.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<UserProfile>, ProfileRepositoryError>;
}
