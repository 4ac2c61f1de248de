//! Shared fixtures for view-model tests.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use super::state::DashboardPorts;
use crate::domain::ports::{
    MockAccessQuery, MockCategoriesQuery, MockEntryCommand, MockFileIntakeCommand,
    MockSessionCommand, MockSummaryQuery, MockTransactionsQuery,
};

/// Clock pinned to 2025-05-20, noon local time.
pub(crate) struct FixtureClock;

impl FixtureClock {
    pub(crate) fn local_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).expect("valid fixture date")
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        let noon = Self::local_day().and_hms_opt(12, 0, 0).expect("valid time");
        Local
            .from_local_datetime(&noon)
            .earliest()
            .expect("noon exists locally")
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_747_742_400_123)
            .single()
            .expect("valid fixture timestamp")
    }
}

/// Port bundle backed by expectation-free mocks, customised by `configure`.
pub(crate) fn ports_with(configure: impl FnOnce(&mut DashboardPorts)) -> DashboardPorts {
    let mut ports = DashboardPorts {
        access: Arc::new(MockAccessQuery::new()),
        session: Arc::new(MockSessionCommand::new()),
        summary: Arc::new(MockSummaryQuery::new()),
        transactions: Arc::new(MockTransactionsQuery::new()),
        categories: Arc::new(MockCategoriesQuery::new()),
        entries: Arc::new(MockEntryCommand::new()),
        intake: Arc::new(MockFileIntakeCommand::new()),
        camera: None,
        clock: Arc::new(FixtureClock),
        recent_transactions_limit: 200,
    };
    configure(&mut ports);
    ports
}
