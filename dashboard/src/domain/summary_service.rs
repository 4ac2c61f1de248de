//! Owner summary service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{DailySummarySource, DailySummarySourceError, SummaryQuery};
use crate::domain::summary::fold;
use crate::domain::{Access, DashboardSummary, Error, SummaryRequest};

/// Summary service implementing the [`SummaryQuery`] driving port.
#[derive(Clone)]
pub struct SummaryService<S> {
    source: Arc<S>,
}

impl<S> SummaryService<S> {
    /// Create a service reading rows from `source`.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

fn map_source_error(error: DailySummarySourceError) -> Error {
    match error {
        DailySummarySourceError::Transport { message }
        | DailySummarySourceError::Rejected { message } => Error::external_service(message),
        DailySummarySourceError::Decode { message } => {
            Error::internal(format!("summary row could not be read: {message}"))
        }
    }
}

#[async_trait]
impl<S> SummaryQuery for SummaryService<S>
where
    S: DailySummarySource,
{
    async fn summarize(
        &self,
        access: &Access,
        request: &SummaryRequest,
    ) -> Result<Option<DashboardSummary>, Error> {
        let Access::Owner(profile) = access else {
            return Ok(None);
        };
        debug!(
            organization_id = %profile.organization_id,
            start = %request.range.start(),
            end = %request.range.end(),
            "fetching daily summary"
        );
        let rows = self
            .source
            .fetch_range(&profile.organization_id, &request.range)
            .await
            .map_err(map_source_error)?;
        let summary =
            fold(&rows, request).map_err(|overflow| Error::internal(overflow.to_string()))?;
        Ok(Some(summary))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockDailySummarySource;
    use crate::domain::{
        DailySummaryRow, ErrorCode, OrganizationId, Principal, Role, UserId, UserProfile,
    };
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    fn profile(role: Role) -> UserProfile {
        let owner = UserId::random();
        UserProfile {
            user_id: owner,
            organization_id: OrganizationId::random(),
            role,
            owner_id: owner,
        }
    }

    #[fixture]
    fn request() -> SummaryRequest {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).expect("leap day");
        SummaryRequest::month_to_date(today).expect("request")
    }

    #[rstest]
    #[case::employee(Access::Employee(profile(Role::Employee)))]
    #[case::anonymous(Access::Anonymous)]
    #[case::unprovisioned(Access::Unprovisioned {
        principal: Principal::new(UserId::random(), None),
    })]
    #[tokio::test]
    async fn non_owners_get_nothing_without_a_query(
        #[case] access: Access,
        request: SummaryRequest,
    ) {
        let mut source = MockDailySummarySource::new();
        source.expect_fetch_range().never();

        let summary = SummaryService::new(Arc::new(source))
            .summarize(&access, &request)
            .await
            .expect("no failure");
        assert_eq!(summary, None);
    }

    #[rstest]
    #[tokio::test]
    async fn owner_summary_is_scoped_to_the_organization_and_month(request: SummaryRequest) {
        let owner = profile(Role::Owner);
        let organization_id = owner.organization_id;
        let today = request.today;
        let mut source = MockDailySummarySource::new();
        source
            .expect_fetch_range()
            .withf(move |org, range| {
                *org == organization_id
                    && range.start() == NaiveDate::from_ymd_opt(2024, 2, 1).expect("start")
                    && range.end() == today
            })
            .times(1)
            .return_once(move |_, _| {
                Ok(vec![DailySummaryRow {
                    day: today,
                    total_incomes: Some(Decimal::new(1_050, 2)),
                    total_expenses: Some(Decimal::new(250, 2)),
                    net_result: Some(Decimal::new(800, 2)),
                }])
            });

        let summary = SummaryService::new(Arc::new(source))
            .summarize(&Access::Owner(owner), &request)
            .await
            .expect("summary")
            .expect("owner sees a summary");
        assert_eq!(summary.month.net(), Decimal::new(800, 2));
        assert_eq!(summary.today.map(|totals| totals.incomes()), Some(Decimal::new(1_050, 2)));
    }

    #[rstest]
    #[tokio::test]
    async fn source_failures_surface_the_platform_message(request: SummaryRequest) {
        let mut source = MockDailySummarySource::new();
        source
            .expect_fetch_range()
            .return_once(|_, _| Err(DailySummarySourceError::rejected("permission denied")));

        let err = SummaryService::new(Arc::new(source))
            .summarize(&Access::Owner(profile(Role::Owner)), &request)
            .await
            .expect_err("failure propagates");
        assert_eq!(err.code(), ErrorCode::ExternalService);
        assert_eq!(err.message(), "permission denied");
    }

    #[rstest]
    #[tokio::test]
    async fn out_of_range_totals_are_an_internal_error(request: SummaryRequest) {
        let today = request.today;
        let mut source = MockDailySummarySource::new();
        source.expect_fetch_range().return_once(move |_, _| {
            Ok(vec![DailySummaryRow {
                day: today,
                total_incomes: Some(Decimal::MAX),
                total_expenses: Some(Decimal::MIN),
                net_result: None,
            }])
        });

        let err = SummaryService::new(Arc::new(source))
            .summarize(&Access::Owner(profile(Role::Owner)), &request)
            .await
            .expect_err("overflow is reported");
        assert_eq!(err.code(), ErrorCode::Internal);
    }
}
