//! Owner summary cards.

use std::sync::Arc;

use mockable::Clock;
use rust_decimal::Decimal;
use tracing::error;

use super::scope::{LoadState, ViewScope};
use super::state::DashboardPorts;
use crate::domain::ports::SummaryQuery;
use crate::domain::{Access, DashboardSummary, SummaryRequest, Totals, format_brl};

/// One rendered figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    /// Caption above the figure.
    pub label: &'static str,
    /// Value formatted as reais.
    pub value: String,
    /// Whether the figure is below zero.
    pub negative: bool,
}

impl SummaryCard {
    fn new(label: &'static str, value: Decimal) -> Self {
        Self {
            label,
            value: format_brl(value),
            negative: value.is_sign_negative() && !value.is_zero(),
        }
    }
}

/// Today and month-to-date cards for the owner dashboard.
pub struct SummaryPanel {
    summary: Arc<dyn SummaryQuery>,
    clock: Arc<dyn Clock>,
    scope: ViewScope,
    state: LoadState<Option<DashboardSummary>>,
}

impl SummaryPanel {
    /// Build a panel from the shared port bundle.
    pub fn new(ports: &DashboardPorts) -> Self {
        Self {
            summary: Arc::clone(&ports.summary),
            clock: Arc::clone(&ports.clock),
            scope: ViewScope::new(),
            state: LoadState::Loading,
        }
    }

    /// Scope the renderer closes on unmount.
    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    /// Current load state. `Ready(None)` means there is nothing to show.
    pub fn state(&self) -> &LoadState<Option<DashboardSummary>> {
        &self.state
    }

    /// Load the month containing today's local date.
    ///
    /// Failures are logged and leave the panel empty rather than failed.
    pub async fn load(&mut self, access: &Access) {
        self.state = LoadState::Loading;
        let today = self.clock.local().date_naive();
        let outcome = match SummaryRequest::month_to_date(today) {
            Ok(request) => self
                .summary
                .summarize(access, &request)
                .await
                .map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        };
        if !self.scope.is_active() {
            return;
        }
        self.state = LoadState::Ready(outcome.unwrap_or_else(|message| {
            error!(error = %message, "loading the dashboard summary failed");
            None
        }));
    }

    /// Six cards, today first. `None` until a summary is available.
    pub fn cards(&self) -> Option<Vec<SummaryCard>> {
        let summary = self.state.ready().copied().flatten()?;
        let today = summary.today.unwrap_or_default();
        Some(cards_for(&today, &summary.month))
    }
}

fn cards_for(today: &Totals, month: &Totals) -> Vec<SummaryCard> {
    vec![
        SummaryCard::new("Today's income", today.incomes()),
        SummaryCard::new("Today's expenses", today.expenses()),
        SummaryCard::new("Today's result", today.net()),
        SummaryCard::new("Month income", month.incomes()),
        SummaryCard::new("Month expenses", month.expenses()),
        SummaryCard::new("Month result", month.net()),
    ]
}
